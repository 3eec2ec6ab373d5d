//! Infrastructure layer
//!
//! Environment-driven configuration and the JSON-RPC wallet provider.

pub mod config;
pub mod json_rpc;

pub use config::AppConfig;
pub use json_rpc::{JsonRpcNftContract, JsonRpcWalletProvider};
