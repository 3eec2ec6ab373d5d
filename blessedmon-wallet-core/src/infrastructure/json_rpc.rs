//! EIP-1193 wallet provider over JSON-RPC
//!
//! Talks to a wallet that exposes the EIP-1193 method set on an HTTP
//! endpoint (for example a desktop wallet's local RPC). Transactions go out
//! through `eth_sendTransaction` so the wallet does the signing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ethers::{
    contract::{Contract, ContractError},
    providers::{Http, Middleware, PendingTransaction, Provider, ProviderError, RpcError},
};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::provider::{NftContract, ProviderEvent, WalletProvider};
use crate::domain::{AddChainParameters, ContractDescriptor};
use crate::shared::constants::*;
use crate::shared::error::{WalletError, WalletRpcError};
use crate::shared::types::{Address, MintReceipt, TxHash, U256};
use crate::shared::utils::chain_id_hex;

const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct JsonRpcWalletProvider {
    provider: Arc<Provider<Http>>,
}

impl JsonRpcWalletProvider {
    pub fn new(url: &str) -> Result<Self, WalletError> {
        let provider = Provider::<Http>::try_from(url)
            .map_err(|e| WalletError::config(format!("Invalid wallet URL '{}': {}", url, e)))?;
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// Poll the wallet for account and chain changes and forward them as
    /// [`ProviderEvent`]s. HTTP endpoints cannot push, so this stands in for
    /// the wallet's event subscription. The task ends as soon as the
    /// receiver is dropped, even while a poll is outstanding.
    pub fn spawn_change_watcher(
        self: Arc<Self>,
        interval: Duration,
    ) -> (mpsc::Receiver<ProviderEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut tracker = ChangeTracker::default();
            loop {
                let events = tokio::select! {
                    _ = tx.closed() => break,
                    events = async {
                        ticker.tick().await;
                        self.poll_changes(&mut tracker).await
                    } => events,
                };
                for event in events {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
            }
            log::debug!("change watcher stopped");
        });
        (rx, handle)
    }

    async fn poll_changes(&self, tracker: &mut ChangeTracker) -> Vec<ProviderEvent> {
        let mut events = Vec::new();
        match self.accounts().await {
            Ok(accounts) => events.extend(tracker.observe_accounts(accounts)),
            Err(e) => log::debug!("eth_accounts poll failed: {}", e),
        }
        match self.chain_id().await {
            Ok(chain_id) => events.extend(tracker.observe_chain(chain_id)),
            Err(e) => log::debug!("eth_chainId poll failed: {}", e),
        }
        events
    }
}

/// Turns polled snapshots into change events. The first observation only
/// records the baseline.
#[derive(Debug, Default)]
struct ChangeTracker {
    accounts: Option<Vec<Address>>,
    chain_id: Option<u64>,
}

impl ChangeTracker {
    fn observe_accounts(&mut self, accounts: Vec<Address>) -> Option<ProviderEvent> {
        let previous = self.accounts.replace(accounts.clone())?;
        (previous != accounts).then_some(ProviderEvent::AccountsChanged(accounts))
    }

    fn observe_chain(&mut self, chain_id: u64) -> Option<ProviderEvent> {
        let previous = self.chain_id.replace(chain_id)?;
        (previous != chain_id).then_some(ProviderEvent::ChainChanged(chain_id))
    }
}

fn rpc_error(err: ProviderError) -> WalletRpcError {
    match RpcError::as_error_response(&err) {
        Some(response) => WalletRpcError::new(response.code, response.message.clone()),
        None => WalletRpcError::other(err.to_string()),
    }
}

fn contract_error(err: ContractError<Provider<Http>>) -> WalletRpcError {
    match err {
        ContractError::MiddlewareError { e } => rpc_error(e),
        ContractError::ProviderError { e } => rpc_error(e),
        ContractError::Revert(data) => WalletRpcError::other(format!("execution reverted: {}", data)),
        other => WalletRpcError::other(other.to_string()),
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletRpcError> {
        self.provider
            .request::<_, Vec<Address>>("eth_requestAccounts", ())
            .await
            .map_err(rpc_error)
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletRpcError> {
        self.provider.get_accounts().await.map_err(rpc_error)
    }

    async fn chain_id(&self) -> Result<u64, WalletRpcError> {
        let chain_id = self.provider.get_chainid().await.map_err(rpc_error)?;
        Ok(chain_id.low_u64())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletRpcError> {
        self.provider
            .request::<_, serde_json::Value>(
                "wallet_switchEthereumChain",
                [json!({ "chainId": chain_id_hex(chain_id) })],
            )
            .await
            .map(|_| ())
            .map_err(rpc_error)
    }

    async fn add_chain(&self, params: &AddChainParameters) -> Result<(), WalletRpcError> {
        self.provider
            .request::<_, serde_json::Value>("wallet_addEthereumChain", [params.clone()])
            .await
            .map(|_| ())
            .map_err(rpc_error)
    }

    async fn gas_price(&self) -> Result<U256, WalletRpcError> {
        self.provider.get_gas_price().await.map_err(rpc_error)
    }

    fn bind_contract(
        &self,
        descriptor: &ContractDescriptor,
        account: Address,
    ) -> Result<Arc<dyn NftContract>, WalletRpcError> {
        let abi = descriptor
            .abi()
            .map_err(|e| WalletRpcError::other(e.to_string()))?;
        let contract = Contract::new(descriptor.address, abi, Arc::clone(&self.provider));
        Ok(Arc::new(JsonRpcNftContract {
            contract,
            provider: Arc::clone(&self.provider),
            from: account,
        }))
    }
}

/// Deployed NFT contract reached through the wallet endpoint.
pub struct JsonRpcNftContract {
    contract: Contract<Provider<Http>>,
    provider: Arc<Provider<Http>>,
    from: Address,
}

#[async_trait]
impl NftContract for JsonRpcNftContract {
    fn address(&self) -> Address {
        self.contract.address()
    }

    async fn minting_fee(&self) -> Result<U256, WalletRpcError> {
        self.contract
            .method::<_, U256>(MINTING_FEE_METHOD, ())
            .map_err(|e| WalletRpcError::other(e.to_string()))?
            .call()
            .await
            .map_err(contract_error)
    }

    async fn total_supply(&self) -> Result<U256, WalletRpcError> {
        self.contract
            .method::<_, U256>(TOTAL_SUPPLY_METHOD, ())
            .map_err(|e| WalletRpcError::other(e.to_string()))?
            .call()
            .await
            .map_err(contract_error)
    }

    async fn token_uri(&self, token_id: U256) -> Result<String, WalletRpcError> {
        self.contract
            .method::<_, String>(TOKEN_URI_METHOD, token_id)
            .map_err(|e| WalletRpcError::other(e.to_string()))?
            .call()
            .await
            .map_err(contract_error)
    }

    async fn mint_nft(&self, token_uri: String, value: U256) -> Result<TxHash, WalletRpcError> {
        let call = self
            .contract
            .method::<_, U256>(MINT_METHOD, token_uri)
            .map_err(|e| WalletRpcError::other(e.to_string()))?
            .from(self.from)
            .value(value);

        let pending_tx = call.send().await.map_err(contract_error)?;
        Ok(pending_tx.tx_hash())
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<MintReceipt, WalletRpcError> {
        let receipt = PendingTransaction::new(tx_hash, self.provider.as_ref())
            .interval(CONFIRMATION_POLL_INTERVAL)
            .await
            .map_err(rpc_error)?
            .ok_or_else(|| WalletRpcError::other(format!("transaction {:?} was dropped", tx_hash)))?;

        Ok(MintReceipt {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|b| b.as_u64()),
            gas_used: receipt.gas_used,
            success: receipt.status.map(|s| s.as_u64() == 1).unwrap_or(true),
        })
    }
}
