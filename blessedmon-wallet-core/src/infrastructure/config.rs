//! Runtime configuration
//!
//! Compiled-in Monad Testnet defaults, overridable through the environment
//! (or a `.env` file).

use std::env;

use dotenv::dotenv;

use crate::domain::{ContractDescriptor, NetworkConfig};
use crate::shared::constants::*;
use crate::shared::error::WalletError;
use crate::shared::utils::{parse_chain_id, validate_ethereum_address};

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub contract: ContractDescriptor,
    /// JSON-RPC endpoint of the wallet that signs on the user's behalf.
    pub wallet_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, WalletError> {
        dotenv().ok();
        Self::from_lookup(env_value)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WalletError> {
        let mut network = NetworkConfig::monad_testnet();

        if let Some(chain_id) = lookup("MINTER_CHAIN_ID") {
            network.chain_id = parse_chain_id(&chain_id)
                .map_err(|_| WalletError::config(format!("Invalid MINTER_CHAIN_ID: {}", chain_id)))?;
        }
        if let Some(name) = lookup("MINTER_CHAIN_NAME") {
            network.chain_name = name;
        }
        if let Some(rpc_url) = lookup("MINTER_RPC_URL") {
            network.rpc_urls = vec![rpc_url];
        }
        if let Some(explorer_url) = lookup("MINTER_EXPLORER_URL") {
            network.block_explorer_urls = vec![explorer_url.trim_end_matches('/').to_string()];
        }

        let contract_address =
            lookup("MINTER_CONTRACT_ADDRESS").unwrap_or_else(|| NFT_CONTRACT_ADDRESS.to_string());
        validate_ethereum_address(&contract_address).map_err(|e| {
            WalletError::config(format!("Invalid MINTER_CONTRACT_ADDRESS {}: {}", contract_address, e.user_message()))
        })?;
        let contract = ContractDescriptor::new(&contract_address)?;

        let wallet_url = lookup("MINTER_WALLET_URL").unwrap_or_else(|| DEFAULT_WALLET_URL.to_string());

        let config = Self {
            network,
            contract,
            wallet_url,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        self.network.validate()?;
        if self.wallet_url.trim().is_empty() {
            return Err(WalletError::config("Wallet URL cannot be empty"));
        }
        if self.contract.call_signatures.is_empty() {
            return Err(WalletError::config("Contract call surface cannot be empty"));
        }
        Ok(())
    }
}

/// Environment value, with blank values treated as unset.
fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::monad_testnet(),
            contract: ContractDescriptor {
                address: NFT_CONTRACT_ADDRESS.parse().unwrap_or_default(),
                call_signatures: NFT_CONTRACT_SIGNATURES.iter().map(|s| s.to_string()).collect(),
            },
            wallet_url: DEFAULT_WALLET_URL.to_string(),
        }
    }
}
