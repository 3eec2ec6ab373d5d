//! Wallet provider seam
//!
//! The session manager and the mint orchestrator never talk to a transport
//! directly. They go through [`WalletProvider`] (account access, chain
//! management) and [`NftContract`] (the deployed contract's call surface),
//! so the lifecycle can run against a JSON-RPC wallet endpoint or a mock.

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::{AddChainParameters, ContractDescriptor};
use crate::shared::error::WalletRpcError;
use crate::shared::types::{Address, MintReceipt, TxHash, U256};

/// Account and chain change notifications pushed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// `eth_requestAccounts`; prompts the user.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletRpcError>;

    /// `eth_accounts`; accounts already authorized for this origin.
    async fn accounts(&self) -> Result<Vec<Address>, WalletRpcError>;

    /// Currently active chain.
    async fn chain_id(&self) -> Result<u64, WalletRpcError>;

    /// `wallet_switchEthereumChain`
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletRpcError>;

    /// `wallet_addEthereumChain`
    async fn add_chain(&self, params: &AddChainParameters) -> Result<(), WalletRpcError>;

    async fn gas_price(&self) -> Result<U256, WalletRpcError>;

    /// Contract handle whose transactions are sent from `account`.
    fn bind_contract(
        &self,
        descriptor: &ContractDescriptor,
        account: Address,
    ) -> Result<Arc<dyn NftContract>, WalletRpcError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait NftContract: Send + Sync {
    fn address(&self) -> Address;

    /// `getMintingFee()`
    async fn minting_fee(&self) -> Result<U256, WalletRpcError>;

    /// `getTotalSupply()`
    async fn total_supply(&self) -> Result<U256, WalletRpcError>;

    /// `tokenURI(tokenId)`
    async fn token_uri(&self, token_id: U256) -> Result<String, WalletRpcError>;

    /// Submit `mintNFT(tokenURI)` with `value` attached. Resolves once the
    /// wallet hands back the transaction hash.
    async fn mint_nft(&self, token_uri: String, value: U256) -> Result<TxHash, WalletRpcError>;

    /// Wait until the transaction is included. No client-side timeout.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<MintReceipt, WalletRpcError>;
}
