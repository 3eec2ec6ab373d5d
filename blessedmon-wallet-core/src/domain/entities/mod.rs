//! Domain entities
//!
//! Network and contract descriptors, the wallet session and the pending mint.

pub mod network;
pub mod contract;
pub mod session;
pub mod mint;

pub use network::*;
pub use contract::*;
pub use session::*;
pub use mint::*;
