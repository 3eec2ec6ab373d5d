//! Wallet session management
//!
//! Owns the connect/disconnect lifecycle, the target network check and the
//! wallet part of the UI. State machine:
//!
//! ```text
//! Disconnected -> Connecting -> Connected -> Disconnected
//!                                   |  ^
//!                                   v  |  (chain switched back)
//!                             NetworkMismatch
//! ```
//!
//! Failed connection attempts are never retried automatically.

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use crate::core::context::AppContext;
use crate::core::provider::{NftContract, ProviderEvent, WalletProvider};
use crate::domain::{SessionPhase, WalletSession, WalletView};
use crate::shared::error::{WalletError, WalletRpcError};
use crate::shared::types::{Address, GasEstimate};
use crate::shared::utils::{abbreviate_address, estimate_mint_cost};

#[derive(Default)]
struct SessionState {
    session: WalletSession,
    contract: Option<Arc<dyn NftContract>>,
    /// Set by an explicit disconnect; blocks reconnecting on wallet events.
    auto_connect_disabled: bool,
    gas: Option<GasEstimate>,
    /// Bumped on every clear. A connect attempt only commits when no clear
    /// happened while it was waiting on the wallet.
    generation: u64,
}

/// Who started a connect attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnectOrigin {
    User,
    Automatic,
}

pub struct WalletSessionManager {
    ctx: Arc<AppContext>,
    state: RwLock<SessionState>,
}

impl WalletSessionManager {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Request account access, verify the active chain and bind the
    /// contract for the first returned account.
    ///
    /// A failed chain switch still leaves the session connected, flagged as
    /// [`SessionPhase::NetworkMismatch`], and returns
    /// [`WalletError::NetworkConfigurationFailed`].
    ///
    /// A [`disconnect`](Self::disconnect) that lands while the attempt is
    /// waiting on the wallet wins: the attempt is dropped and fails with
    /// [`WalletError::ConnectionFailed`].
    pub async fn connect(&self) -> Result<Address, WalletError> {
        self.connect_from(ConnectOrigin::User)
            .await?
            .ok_or_else(|| WalletError::connection("Connection cancelled by disconnect."))
    }

    /// Connect started by the wallet or by startup restore. Returns
    /// `Ok(None)` when auto-connect is suppressed or a disconnect overtook it.
    async fn auto_connect(&self) -> Result<Option<Address>, WalletError> {
        self.connect_from(ConnectOrigin::Automatic).await
    }

    async fn connect_from(&self, origin: ConnectOrigin) -> Result<Option<Address>, WalletError> {
        let provider = self.ctx.provider().map_err(|e| self.ctx.status.fail(e))?;

        let (previous_phase, generation) = {
            let mut state = self.state.write().await;
            if origin == ConnectOrigin::Automatic && state.auto_connect_disabled {
                return Ok(None);
            }
            let previous = std::mem::replace(&mut state.session.phase, SessionPhase::Connecting);
            (previous, state.generation)
        };

        let accounts = match provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                let err = if e.is_user_rejection() {
                    WalletError::user_rejected(e.message)
                } else {
                    WalletError::connection(e.message)
                };
                return Err(self.abort_connect(previous_phase, generation, err).await);
            }
        };
        let Some(&address) = accounts.first() else {
            let err = WalletError::connection("wallet returned no accounts");
            return Err(self.abort_connect(previous_phase, generation, err).await);
        };

        let network_check = self.ensure_target_network(provider.as_ref()).await;

        let contract = match provider.bind_contract(&self.ctx.contract, address) {
            Ok(contract) => contract,
            Err(e) => {
                let err = WalletError::connection(e.message);
                return Err(self.abort_connect(previous_phase, generation, err).await);
            }
        };

        {
            let mut state = self.state.write().await;
            if state.generation != generation
                || (origin == ConnectOrigin::Automatic && state.auto_connect_disabled)
            {
                log::info!("dropping connection to {:?}, wallet was disconnected meanwhile", address);
                return Ok(None);
            }
            state.session = WalletSession {
                address: Some(address),
                phase: if network_check.is_ok() {
                    SessionPhase::Connected
                } else {
                    SessionPhase::NetworkMismatch
                },
            };
            state.contract = Some(contract);
            if origin == ConnectOrigin::User {
                state.auto_connect_disabled = false;
            }
        }

        if let Err(err) = network_check {
            return Err(self.ctx.status.fail(err));
        }

        log::info!("wallet {:?} connected on chain {}", address, self.ctx.network.chain_id);
        self.ctx
            .status
            .info(format!("Wallet connected: {}", abbreviate_address(&address)));
        self.refresh_gas_estimate(provider.as_ref(), generation).await;

        Ok(Some(address))
    }

    async fn abort_connect(
        &self,
        previous_phase: SessionPhase,
        generation: u64,
        err: WalletError,
    ) -> WalletError {
        log::error!("Connection error: {}", err);
        {
            let mut state = self.state.write().await;
            // A disconnect meanwhile already reset the phase.
            if state.generation == generation {
                state.session.phase = previous_phase;
            }
        }

        let message = match &err {
            WalletError::UserRejected(reason) => format!("Failed to connect wallet: {}", reason),
            other => other.user_message(),
        };
        self.ctx.status.error(message);
        err
    }

    /// Switch the wallet to the target chain, registering it first when the
    /// wallet does not know it.
    async fn ensure_target_network(&self, provider: &dyn WalletProvider) -> Result<(), WalletError> {
        let network = &self.ctx.network;
        let active = provider
            .chain_id()
            .await
            .map_err(|e| self.network_failure(e))?;
        if active == network.chain_id {
            return Ok(());
        }

        log::warn!(
            "wallet is on chain {}, switching to {} ({})",
            active,
            network.chain_name,
            network.chain_id
        );
        match provider.switch_chain(network.chain_id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_unrecognized_chain() => provider
                .add_chain(&network.add_chain_parameters())
                .await
                .map_err(|e| self.network_failure(e)),
            Err(e) => Err(self.network_failure(e)),
        }
    }

    fn network_failure(&self, cause: WalletRpcError) -> WalletError {
        log::error!("network configuration failed: {}", cause);
        WalletError::network_configuration(format!(
            "Failed to add {}. Please add it manually in your wallet.",
            self.ctx.network.chain_name
        ))
    }

    async fn refresh_gas_estimate(&self, provider: &dyn WalletProvider, generation: u64) {
        match provider.gas_price().await {
            Ok(gas_price) => {
                let estimate = estimate_mint_cost(gas_price);
                log::debug!(
                    "gas price {} gwei, estimated mint cost {:.6} {}",
                    estimate.gas_price_gwei,
                    estimate.total_estimated_cost_ether,
                    self.ctx.network.native_currency.symbol
                );
                let mut state = self.state.write().await;
                if state.generation == generation {
                    state.gas = Some(estimate);
                }
            }
            Err(e) => log::warn!("Error checking gas prices: {}", e),
        }
    }

    /// Drop the session and stop reconnecting on wallet events. Idempotent.
    pub async fn disconnect(&self) {
        self.clear(true).await;
        self.ctx.status.info("Wallet disconnected.");
    }

    async fn clear(&self, suppress_auto_connect: bool) {
        let mut state = self.state.write().await;
        state.session = WalletSession::default();
        state.contract = None;
        state.gas = None;
        state.generation = state.generation.wrapping_add(1);
        if suppress_auto_connect {
            state.auto_connect_disabled = true;
        }
    }

    /// Reconnect on load when the wallet already authorized an account.
    pub async fn restore(&self) -> Result<Option<Address>, WalletError> {
        if self.state.read().await.auto_connect_disabled {
            return Ok(None);
        }
        let Some(provider) = self.ctx.provider.clone() else {
            return Ok(None);
        };

        match provider.accounts().await {
            Ok(accounts) if !accounts.is_empty() => self.auto_connect().await,
            Ok(_) => Ok(None),
            Err(e) => {
                log::warn!("could not read authorized accounts: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn handle_event(&self, event: ProviderEvent) {
        log::debug!("provider event: {:?}", event);
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.on_accounts_changed(accounts).await,
            ProviderEvent::ChainChanged(chain_id) => self.on_chain_changed(chain_id).await,
        }
    }

    /// Process wallet events until every sender is dropped.
    pub async fn listen(self: Arc<Self>, mut events: mpsc::Receiver<ProviderEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        log::debug!("provider event channel closed");
    }

    async fn on_accounts_changed(&self, accounts: Vec<Address>) {
        let Some(&account) = accounts.first() else {
            // Remote disconnect: same outcome as disconnect(), minus the suppression.
            self.clear(false).await;
            self.ctx.status.info("Wallet disconnected.");
            return;
        };

        let (connected, suppressed) = {
            let state = self.state.read().await;
            (state.session.is_connected(), state.auto_connect_disabled)
        };

        if connected {
            self.switch_account(account).await;
        } else if !suppressed {
            if let Err(e) = self.auto_connect().await {
                log::warn!("auto-reconnect failed: {}", e);
            }
        } else {
            log::debug!("ignoring account change after manual disconnect");
        }
    }

    async fn switch_account(&self, account: Address) {
        let bound = self
            .ctx
            .provider()
            .and_then(|provider| {
                provider
                    .bind_contract(&self.ctx.contract, account)
                    .map_err(|e| WalletError::connection(e.message))
            });

        match bound {
            Ok(contract) => {
                let mut state = self.state.write().await;
                state.session.address = Some(account);
                state.contract = Some(contract);
                log::info!("active account changed to {:?}", account);
            }
            Err(err) => {
                self.ctx.status.fail(err);
            }
        }
    }

    async fn on_chain_changed(&self, chain_id: u64) {
        let network = &self.ctx.network;
        let mut state = self.state.write().await;

        if chain_id != network.chain_id {
            if state.session.is_connected() {
                state.session.phase = SessionPhase::NetworkMismatch;
            }
            drop(state);
            self.ctx
                .status
                .error(format!("Please switch to {}", network.chain_name));
        } else if state.session.phase == SessionPhase::NetworkMismatch {
            state.session.phase = SessionPhase::Connected;
            drop(state);
            self.ctx.status.info(format!("Switched to {}", network.chain_name));
        }
    }

    pub async fn session(&self) -> WalletSession {
        self.state.read().await.session.clone()
    }

    pub async fn view(&self) -> WalletView {
        let state = self.state.read().await;
        WalletView::project(&state.session, state.gas.clone())
    }

    /// Contract handle of the connected session.
    pub async fn contract(&self) -> Option<Arc<dyn NftContract>> {
        let state = self.state.read().await;
        if state.session.is_connected() {
            state.contract.clone()
        } else {
            None
        }
    }

    pub async fn is_auto_connect_disabled(&self) -> bool {
        self.state.read().await.auto_connect_disabled
    }

    pub async fn gas_estimate(&self) -> Option<GasEstimate> {
        self.state.read().await.gas.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::{MockNftContract, MockWalletProvider};
    use crate::domain::{ContractDescriptor, NetworkConfig};
    use crate::shared::constants::{MONAD_TESTNET_CHAIN_ID, UNRECOGNIZED_CHAIN};
    use crate::domain::AddChainParameters;
    use crate::shared::types::{StatusKind, U256};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use tokio::sync::Notify;

    fn account() -> Address {
        "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6".parse().unwrap()
    }

    fn manager_with(provider: Option<MockWalletProvider>) -> WalletSessionManager {
        let provider = provider.map(|p| Arc::new(p) as Arc<dyn WalletProvider>);
        let ctx = AppContext::new(
            NetworkConfig::monad_testnet(),
            ContractDescriptor::blessedmon().unwrap(),
            provider,
        );
        WalletSessionManager::new(Arc::new(ctx))
    }

    /// Wallet that hands out `account()` on `chain_id`.
    fn wallet_on(chain_id: u64, connects: usize) -> MockWalletProvider {
        let mut provider = MockWalletProvider::new();
        provider
            .expect_request_accounts()
            .times(connects)
            .returning(|| Ok(vec![account()]));
        provider.expect_chain_id().returning(move || Ok(chain_id));
        provider
            .expect_gas_price()
            .returning(|| Ok(U256::from(50_000_000_000u64)));
        provider
            .expect_bind_contract()
            .returning(|_, _| Ok(Arc::new(MockNftContract::new()) as Arc<dyn NftContract>));
        provider
    }

    #[tokio::test]
    async fn test_connect_on_target_chain_skips_chain_requests() {
        let mut provider = wallet_on(MONAD_TESTNET_CHAIN_ID, 1);
        provider.expect_switch_chain().never();
        provider.expect_add_chain().never();
        let manager = manager_with(Some(provider));

        let address = manager.connect().await.unwrap();

        assert_eq!(address, account());
        let session = manager.session().await;
        assert_eq!(session.phase, SessionPhase::Connected);
        assert!(session.is_connected());
        assert!(manager.contract().await.is_some());
        assert!(manager.gas_estimate().await.is_some());

        let view = manager.view().await;
        let shown = view.display_address.unwrap().to_lowercase();
        assert_eq!(shown, "0x742d...d8b6");
        assert!(view.show_disconnect);
    }

    #[tokio::test]
    async fn test_connect_switches_to_target_chain() {
        let mut provider = wallet_on(1, 1);
        provider
            .expect_switch_chain()
            .with(eq(MONAD_TESTNET_CHAIN_ID))
            .times(1)
            .returning(|_| Ok(()));
        provider.expect_add_chain().never();
        let manager = manager_with(Some(provider));

        manager.connect().await.unwrap();
        assert_eq!(manager.session().await.phase, SessionPhase::Connected);
    }

    #[tokio::test]
    async fn test_unknown_chain_is_added() {
        let mut provider = wallet_on(1, 1);
        provider
            .expect_switch_chain()
            .returning(|_| Err(WalletRpcError::new(UNRECOGNIZED_CHAIN, "Unrecognized chain ID")));
        provider
            .expect_add_chain()
            .withf(|params| params.chain_id == "0x279f" && params.chain_name == "Monad Testnet")
            .times(1)
            .returning(|_| Ok(()));
        let manager = manager_with(Some(provider));

        manager.connect().await.unwrap();
        assert_eq!(manager.session().await.phase, SessionPhase::Connected);
    }

    #[tokio::test]
    async fn test_failed_chain_add_leaves_session_flagged() {
        let mut provider = wallet_on(1, 1);
        provider
            .expect_switch_chain()
            .returning(|_| Err(WalletRpcError::new(UNRECOGNIZED_CHAIN, "Unrecognized chain ID")));
        provider
            .expect_add_chain()
            .returning(|_| Err(WalletRpcError::user_rejected()));
        let manager = manager_with(Some(provider));

        let err = manager.connect().await.unwrap_err();

        assert!(matches!(err, WalletError::NetworkConfigurationFailed(_)));
        let session = manager.session().await;
        assert!(session.is_connected());
        assert_eq!(session.phase, SessionPhase::NetworkMismatch);
        assert!(manager.contract().await.is_some());
        assert!(manager.view().await.network_mismatch);

        let status = manager.ctx.status.current();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(
            status.message,
            "Failed to add Monad Testnet. Please add it manually in your wallet."
        );
    }

    #[tokio::test]
    async fn test_missing_provider() {
        let manager = manager_with(None);

        let err = manager.connect().await.unwrap_err();

        assert!(matches!(err, WalletError::ProviderUnavailable(_)));
        assert_eq!(manager.ctx.status.current().kind, StatusKind::Error);
        assert_eq!(manager.session().await.phase, SessionPhase::Disconnected);
    }

    #[tokio::test]
    async fn test_rejected_account_request() {
        let mut provider = MockWalletProvider::new();
        provider
            .expect_request_accounts()
            .returning(|| Err(WalletRpcError::user_rejected()));
        provider.expect_chain_id().never();
        let manager = manager_with(Some(provider));

        let err = manager.connect().await.unwrap_err();

        assert!(matches!(err, WalletError::UserRejected(_)));
        assert_eq!(manager.session().await, WalletSession::default());
        assert_eq!(
            manager.ctx.status.current().message,
            "Failed to connect wallet: User rejected the request."
        );
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent_and_suppresses_reconnect() {
        let manager = manager_with(Some(wallet_on(MONAD_TESTNET_CHAIN_ID, 1)));
        manager.connect().await.unwrap();

        manager.disconnect().await;
        manager.disconnect().await;

        assert_eq!(manager.session().await, WalletSession::default());
        assert!(manager.contract().await.is_none());
        assert!(manager.is_auto_connect_disabled().await);
        let status = manager.ctx.status.current();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.message, "Wallet disconnected.");

        // Account reappearing must not reconnect: request_accounts allows one call.
        manager
            .handle_event(ProviderEvent::AccountsChanged(vec![account()]))
            .await;
        assert!(!manager.session().await.is_connected());
        assert_eq!(manager.restore().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remote_disconnect_matches_manual_disconnect_view() {
        let manual = manager_with(Some(wallet_on(MONAD_TESTNET_CHAIN_ID, 1)));
        manual.connect().await.unwrap();
        manual.disconnect().await;

        let remote = manager_with(Some(wallet_on(MONAD_TESTNET_CHAIN_ID, 2)));
        remote.connect().await.unwrap();
        remote.handle_event(ProviderEvent::AccountsChanged(vec![])).await;

        assert_eq!(remote.view().await, manual.view().await);
        assert_eq!(remote.ctx.status.current().message, manual.ctx.status.current().message);
        assert!(!remote.is_auto_connect_disabled().await);

        // The account coming back reconnects automatically.
        remote
            .handle_event(ProviderEvent::AccountsChanged(vec![account()]))
            .await;
        assert!(remote.session().await.is_connected());
    }

    #[tokio::test]
    async fn test_account_switch_rebinds_contract() {
        let other: Address = "0x1234567890123456789012345678901234567890".parse().unwrap();
        let mut provider = MockWalletProvider::new();
        provider
            .expect_request_accounts()
            .times(1)
            .returning(|| Ok(vec![account()]));
        provider.expect_chain_id().returning(|| Ok(MONAD_TESTNET_CHAIN_ID));
        provider.expect_gas_price().returning(|| Ok(U256::one()));
        provider
            .expect_bind_contract()
            .withf(|_, acct| *acct == account())
            .times(1)
            .returning(|_, _| Ok(Arc::new(MockNftContract::new()) as Arc<dyn NftContract>));
        provider
            .expect_bind_contract()
            .withf(move |_, acct| *acct == other)
            .times(1)
            .returning(|_, _| Ok(Arc::new(MockNftContract::new()) as Arc<dyn NftContract>));
        let manager = manager_with(Some(provider));
        manager.connect().await.unwrap();

        manager
            .handle_event(ProviderEvent::AccountsChanged(vec![other]))
            .await;

        assert_eq!(manager.session().await.address, Some(other));
    }

    #[tokio::test]
    async fn test_chain_change_flags_without_disconnecting() {
        let manager = manager_with(Some(wallet_on(MONAD_TESTNET_CHAIN_ID, 1)));
        manager.connect().await.unwrap();

        manager.handle_event(ProviderEvent::ChainChanged(1)).await;

        let session = manager.session().await;
        assert!(session.is_connected());
        assert_eq!(session.phase, SessionPhase::NetworkMismatch);
        let status = manager.ctx.status.current();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, "Please switch to Monad Testnet");

        manager
            .handle_event(ProviderEvent::ChainChanged(MONAD_TESTNET_CHAIN_ID))
            .await;
        assert_eq!(manager.session().await.phase, SessionPhase::Connected);
    }

    #[tokio::test]
    async fn test_restore_connects_authorized_account() {
        let mut provider = wallet_on(MONAD_TESTNET_CHAIN_ID, 1);
        provider.expect_accounts().returning(|| Ok(vec![account()]));
        let manager = manager_with(Some(provider));

        assert_eq!(manager.restore().await.unwrap(), Some(account()));
    }

    #[tokio::test]
    async fn test_restore_without_authorized_account_stays_disconnected() {
        let mut provider = wallet_on(MONAD_TESTNET_CHAIN_ID, 0);
        provider.expect_accounts().returning(|| Ok(vec![]));
        let manager = manager_with(Some(provider));

        assert_eq!(manager.restore().await.unwrap(), None);
        assert!(manager.view().await.show_connect);
    }

    #[tokio::test]
    async fn test_listen_drains_event_channel() {
        let manager = Arc::new(manager_with(Some(wallet_on(MONAD_TESTNET_CHAIN_ID, 1))));
        manager.connect().await.unwrap();

        let (tx, rx) = mpsc::channel(4);
        let listener = tokio::spawn(Arc::clone(&manager).listen(rx));
        tx.send(ProviderEvent::ChainChanged(1)).await.unwrap();
        tx.send(ProviderEvent::AccountsChanged(vec![])).await.unwrap();
        drop(tx);
        listener.await.unwrap();

        assert_eq!(manager.session().await, WalletSession::default());
        assert!(!manager.is_auto_connect_disabled().await);
    }

    #[tokio::test]
    async fn test_rejected_chain_switch_is_not_followed_by_add() {
        let mut provider = wallet_on(1, 1);
        provider
            .expect_switch_chain()
            .times(1)
            .returning(|_| Err(WalletRpcError::user_rejected()));
        provider.expect_add_chain().never();
        let manager = manager_with(Some(provider));

        let err = manager.connect().await.unwrap_err();

        assert!(matches!(err, WalletError::NetworkConfigurationFailed(_)));
        let session = manager.session().await;
        assert_eq!(session.address, Some(account()));
        assert_eq!(session.phase, SessionPhase::NetworkMismatch);
    }

    #[tokio::test]
    async fn test_unreadable_chain_id_flags_mismatch() {
        let mut provider = MockWalletProvider::new();
        provider.expect_request_accounts().returning(|| Ok(vec![account()]));
        provider
            .expect_chain_id()
            .returning(|| Err(WalletRpcError::other("rpc unavailable")));
        provider.expect_switch_chain().never();
        provider.expect_add_chain().never();
        provider
            .expect_bind_contract()
            .returning(|_, _| Ok(Arc::new(MockNftContract::new()) as Arc<dyn NftContract>));
        let manager = manager_with(Some(provider));

        let err = manager.connect().await.unwrap_err();

        assert!(matches!(err, WalletError::NetworkConfigurationFailed(_)));
        assert_eq!(manager.session().await.phase, SessionPhase::NetworkMismatch);
        assert_eq!(manager.gas_estimate().await, None);
    }

    #[tokio::test]
    async fn test_empty_account_list_restores_previous_phase() {
        let mut provider = MockWalletProvider::new();
        provider.expect_chain_id().returning(|| Ok(MONAD_TESTNET_CHAIN_ID));
        provider.expect_gas_price().returning(|| Ok(U256::from(1_000_000_000u64)));
        provider
            .expect_bind_contract()
            .times(1)
            .returning(|_, _| Ok(Arc::new(MockNftContract::new()) as Arc<dyn NftContract>));
        let mut calls = 0;
        provider.expect_request_accounts().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![account()])
            } else {
                Ok(vec![])
            }
        });
        let manager = manager_with(Some(provider));
        manager.connect().await.unwrap();

        let err = manager.connect().await.unwrap_err();

        assert!(matches!(err, WalletError::ConnectionFailed(_)));
        let session = manager.session().await;
        assert_eq!(session.phase, SessionPhase::Connected);
        assert_eq!(session.address, Some(account()));
        assert_eq!(
            manager.ctx.status.current().message,
            "Failed to connect wallet: wallet returned no accounts"
        );
    }

    /// Wallet whose account request parks until `gate` is notified.
    struct GatedWallet {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl WalletProvider for GatedWallet {
        async fn request_accounts(&self) -> Result<Vec<Address>, WalletRpcError> {
            self.gate.notified().await;
            Ok(vec![account()])
        }

        async fn accounts(&self) -> Result<Vec<Address>, WalletRpcError> {
            Ok(vec![account()])
        }

        async fn chain_id(&self) -> Result<u64, WalletRpcError> {
            Ok(MONAD_TESTNET_CHAIN_ID)
        }

        async fn switch_chain(&self, _chain_id: u64) -> Result<(), WalletRpcError> {
            Ok(())
        }

        async fn add_chain(&self, _params: &AddChainParameters) -> Result<(), WalletRpcError> {
            Ok(())
        }

        async fn gas_price(&self) -> Result<U256, WalletRpcError> {
            Ok(U256::from(1_000_000_000u64))
        }

        fn bind_contract(
            &self,
            _descriptor: &ContractDescriptor,
            _account: Address,
        ) -> Result<Arc<dyn NftContract>, WalletRpcError> {
            Ok(Arc::new(MockNftContract::new()))
        }
    }

    fn gated_manager() -> (Arc<WalletSessionManager>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let wallet = GatedWallet { gate: Arc::clone(&gate) };
        let ctx = AppContext::new(
            NetworkConfig::monad_testnet(),
            ContractDescriptor::blessedmon().unwrap(),
            Some(Arc::new(wallet) as Arc<dyn WalletProvider>),
        );
        (Arc::new(WalletSessionManager::new(Arc::new(ctx))), gate)
    }

    async fn wait_until_connecting(manager: &WalletSessionManager) {
        while manager.session().await.phase != SessionPhase::Connecting {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_disconnect_overtakes_pending_restore() {
        let (manager, gate) = gated_manager();
        let restore = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.restore().await }
        });
        wait_until_connecting(&manager).await;

        manager.disconnect().await;
        gate.notify_one();

        assert_eq!(restore.await.unwrap().unwrap(), None);
        assert_eq!(manager.session().await, WalletSession::default());
        assert!(manager.contract().await.is_none());
        assert!(manager.is_auto_connect_disabled().await);
        assert_eq!(manager.gas_estimate().await, None);
        assert_eq!(manager.ctx.status.current().message, "Wallet disconnected.");
    }

    #[tokio::test]
    async fn test_disconnect_overtakes_event_reconnect() {
        let (manager, gate) = gated_manager();
        let reconnect = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move {
                manager
                    .handle_event(ProviderEvent::AccountsChanged(vec![account()]))
                    .await
            }
        });
        wait_until_connecting(&manager).await;

        manager.disconnect().await;
        gate.notify_one();
        reconnect.await.unwrap();

        assert!(!manager.session().await.is_connected());
        assert!(manager.is_auto_connect_disabled().await);
    }

    #[tokio::test]
    async fn test_user_connect_after_disconnect_clears_suppression() {
        let (manager, gate) = gated_manager();
        manager.disconnect().await;

        let connect = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.connect().await }
        });
        wait_until_connecting(&manager).await;
        assert!(manager.view().await.connecting);
        gate.notify_one();

        assert_eq!(connect.await.unwrap().unwrap(), account());
        assert!(!manager.view().await.connecting);
        assert!(!manager.is_auto_connect_disabled().await);
        assert_eq!(manager.session().await.phase, SessionPhase::Connected);
    }

    #[tokio::test]
    async fn test_user_connect_cancelled_by_disconnect() {
        let (manager, gate) = gated_manager();
        let connect = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.connect().await }
        });
        wait_until_connecting(&manager).await;

        manager.disconnect().await;
        gate.notify_one();

        assert!(matches!(
            connect.await.unwrap(),
            Err(WalletError::ConnectionFailed(_))
        ));
        assert!(!manager.session().await.is_connected());
    }
}
