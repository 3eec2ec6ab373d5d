//! Network entity for the wallet core

use serde::{Deserialize, Serialize};

use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::utils::chain_id_hex;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Fixed descriptor of the chain the contract lives on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl NetworkConfig {
    pub fn monad_testnet() -> Self {
        Self {
            chain_id: MONAD_TESTNET_CHAIN_ID,
            chain_name: MONAD_TESTNET_NAME.to_string(),
            native_currency: NativeCurrency {
                name: MONAD_CURRENCY_NAME.to_string(),
                symbol: MONAD_CURRENCY_SYMBOL.to_string(),
                decimals: MONAD_CURRENCY_DECIMALS,
            },
            rpc_urls: vec![MONAD_TESTNET_RPC_URL.to_string()],
            block_explorer_urls: vec![MONAD_TESTNET_EXPLORER_URL.to_string()],
        }
    }

    /// First explorer URL, used for transaction links.
    pub fn explorer_url(&self) -> &str {
        self.block_explorer_urls
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn chain_id_hex(&self) -> String {
        chain_id_hex(self.chain_id)
    }

    /// Parameters for the wallet's add-network request.
    pub fn add_chain_parameters(&self) -> AddChainParameters {
        AddChainParameters {
            chain_id: self.chain_id_hex(),
            chain_name: self.chain_name.clone(),
            native_currency: self.native_currency.clone(),
            rpc_urls: self.rpc_urls.clone(),
            block_explorer_urls: self.block_explorer_urls.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if self.chain_name.trim().is_empty() {
            return Err(WalletError::config("Chain name cannot be empty"));
        }
        if self.native_currency.symbol.trim().is_empty() {
            return Err(WalletError::config("Native currency symbol cannot be empty"));
        }
        if self.native_currency.decimals == 0 {
            return Err(WalletError::config("Native currency decimals must be non-zero"));
        }
        if self.rpc_urls.iter().all(|url| url.trim().is_empty()) {
            return Err(WalletError::config(format!(
                "At least one RPC URL is required for {}",
                self.chain_name
            )));
        }
        if self.block_explorer_urls.iter().all(|url| url.trim().is_empty()) {
            return Err(WalletError::config(format!(
                "At least one block explorer URL is required for {}",
                self.chain_name
            )));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::monad_testnet()
    }
}

/// `wallet_addEthereumChain` payload. Field names and the hex chain id are
/// what wallets expect verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameters {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}
