//! Domain layer - entities
//!
//! Data model of the minting page: network and contract descriptors, the
//! wallet session and the pending mint.

pub mod entities;

// Re-export domain components
pub use entities::*;
