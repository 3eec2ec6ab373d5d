//! Core minting functionality
//!
//! Provider seam, wallet session lifecycle, mint orchestration and the
//! status channel they report through.

pub mod context;
pub mod mint;
pub mod provider;
pub mod readiness;
pub mod session;
pub mod status;

pub use context::AppContext;
pub use mint::MintOrchestrator;
pub use provider::{NftContract, ProviderEvent, WalletProvider};
pub use readiness::{ReadyHandle, Readiness};
pub use session::WalletSessionManager;
pub use status::StatusBoard;
