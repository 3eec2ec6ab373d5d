//! Shared types, utilities, and constants
//!
//! Common types, helpers and constants used by the session manager and the
//! mint orchestrator.

pub mod types;
pub mod utils;
pub mod constants;
pub mod error;

// Re-export shared components
pub use types::*;
pub use utils::*;
pub use constants::*;
pub use error::*;
