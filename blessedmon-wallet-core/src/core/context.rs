//! Application context shared by the session manager and the minter

use std::sync::Arc;

use crate::core::provider::WalletProvider;
use crate::core::status::StatusBoard;
use crate::domain::{ContractDescriptor, NetworkConfig};
use crate::shared::error::WalletError;

/// Everything the page used to keep in globals, built once and passed in.
pub struct AppContext {
    pub network: NetworkConfig,
    pub contract: ContractDescriptor,
    pub provider: Option<Arc<dyn WalletProvider>>,
    pub status: StatusBoard,
}

impl AppContext {
    pub fn new(
        network: NetworkConfig,
        contract: ContractDescriptor,
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> Self {
        Self {
            network,
            contract,
            provider,
            status: StatusBoard::new(),
        }
    }

    pub fn provider(&self) -> Result<Arc<dyn WalletProvider>, WalletError> {
        self.provider.clone().ok_or_else(|| {
            WalletError::provider_unavailable("Please install MetaMask or another Ethereum wallet!")
        })
    }
}
