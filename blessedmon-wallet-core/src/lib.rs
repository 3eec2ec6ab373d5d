//! BlessedMon Wallet Core
//!
//! Wallet connection, network verification and NFT mint lifecycle for the
//! BlessedMon collection on Monad Testnet.
//!
//! ## Architecture
//!
//! - **Core**: provider seam, wallet session manager, mint orchestrator,
//!   status channel and readiness signal
//! - **Domain**: network, contract, session and pending mint entities
//! - **Shared**: common types, constants, errors and utilities
//! - **Infrastructure**: environment configuration and the JSON-RPC wallet
//!   provider
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use blessedmon_wallet_core::{
//!     AppConfig, JsonRpcWalletProvider, MinterApp, Readiness, WalletError, WalletProvider,
//! };
//!
//! # async fn run() -> Result<(), WalletError> {
//! let config = AppConfig::from_env()?;
//! let provider = Arc::new(JsonRpcWalletProvider::new(&config.wallet_url)?);
//! let app = MinterApp::from_config(&config, Some(provider as Arc<dyn WalletProvider>));
//!
//! app.start(Readiness::immediate()).await?;
//! app.connect().await?;
//! app.minter().set_image("image/png", &[0x89, 0x50, 0x4e, 0x47]).await?;
//! app.minter().set_details("Blessed Mon #1", "First of many").await;
//!
//! let outcome = app.mint().await?;
//! println!("minted: {}", outcome.explorer_url);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use crate::core::{
    AppContext, MintOrchestrator, NftContract, ProviderEvent, ReadyHandle, Readiness,
    StatusBoard, WalletProvider, WalletSessionManager,
};
pub use domain::{
    ContractDescriptor, NetworkConfig, PendingMint, SessionPhase, TokenMetadata, WalletSession,
    WalletView,
};
pub use infrastructure::{AppConfig, JsonRpcWalletProvider};
pub use shared::error::{WalletError, WalletRpcError};
pub use shared::types::{
    Address, GasEstimate, MintOutcome, MintReceipt, StatusKind, TransactionStatus, TxHash, U256,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the `env_logger` backend for the `log` facade.
pub fn init() {
    // A second call (tests, embedding hosts) keeps the first logger.
    let _ = env_logger::try_init();
}

/// The minting page: one context shared by the session manager and the
/// mint orchestrator.
pub struct MinterApp {
    ctx: Arc<AppContext>,
    session: Arc<WalletSessionManager>,
    minter: MintOrchestrator,
}

impl MinterApp {
    pub fn new(
        network: NetworkConfig,
        contract: ContractDescriptor,
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> Self {
        let ctx = Arc::new(AppContext::new(network, contract, provider));
        let session = Arc::new(WalletSessionManager::new(Arc::clone(&ctx)));
        let minter = MintOrchestrator::new(Arc::clone(&ctx), Arc::clone(&session));
        Self { ctx, session, minter }
    }

    pub fn from_config(config: &AppConfig, provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self::new(config.network.clone(), config.contract.clone(), provider)
    }

    /// Wait for the host to signal readiness, then reconnect a wallet that
    /// already authorized an account.
    ///
    /// A failing reconnect is reported on the status channel and leaves the
    /// session disconnected; it does not fail startup.
    pub async fn start(&self, readiness: Readiness) -> Result<WalletView, WalletError> {
        readiness.wait().await.map_err(|e| self.ctx.status.fail(e))?;
        log::info!(
            "minter ready for {} (chain {}), contract {:?}",
            self.ctx.network.chain_name,
            self.ctx.network.chain_id,
            self.ctx.contract.address
        );

        if let Err(e) = self.session.restore().await {
            log::warn!("automatic reconnect failed: {}", e);
        }
        Ok(self.session.view().await)
    }

    /// Drain wallet events on a background task.
    pub fn listen(&self, events: mpsc::Receiver<ProviderEvent>) -> JoinHandle<()> {
        tokio::spawn(Arc::clone(&self.session).listen(events))
    }

    pub async fn connect(&self) -> Result<Address, WalletError> {
        self.session.connect().await
    }

    pub async fn disconnect(&self) {
        self.session.disconnect().await
    }

    pub async fn mint(&self) -> Result<MintOutcome, WalletError> {
        self.minter.mint().await
    }

    pub async fn total_supply(&self) -> Result<U256, WalletError> {
        let contract = self.connected_contract().await?;
        contract.total_supply().await.map_err(WalletError::QueryFailed)
    }

    pub async fn token_uri(&self, token_id: U256) -> Result<String, WalletError> {
        let contract = self.connected_contract().await?;
        contract
            .token_uri(token_id)
            .await
            .map_err(WalletError::QueryFailed)
    }

    async fn connected_contract(&self) -> Result<Arc<dyn NftContract>, WalletError> {
        self.session
            .contract()
            .await
            .ok_or_else(|| WalletError::validation("Please connect your wallet first."))
    }

    pub fn minter(&self) -> &MintOrchestrator {
        &self.minter
    }

    pub fn session(&self) -> &Arc<WalletSessionManager> {
        &self.session
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.ctx.network
    }

    pub async fn view(&self) -> WalletView {
        self.session.view().await
    }

    pub fn status(&self) -> TransactionStatus {
        self.ctx.status.current()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<TransactionStatus> {
        self.ctx.status.subscribe()
    }
}
