use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use blessedmon_wallet_core::shared::constants::{
    MONAD_TESTNET_CHAIN_ID, MONAD_TESTNET_EXPLORER_URL, MONAD_TESTNET_RPC_URL,
};
use blessedmon_wallet_core::shared::utils::parse_chain_id;

pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/BlessedMonNFT.sol/BlessedMonNFT.json";
pub const DEFAULT_NETWORK_NAME: &str = "Monad testnet";

/// Deployment settings. The signing key has no default and is never
/// printed; `Debug` redacts it.
#[derive(Clone)]
pub struct DeployConfig {
    pub private_key: String,
    pub rpc_url: String,
    pub chain_id: u64,
    pub network_name: String,
    pub artifact_path: PathBuf,
    pub explorer_url: String,
    pub confirmations: usize,
    pub log_level: String,
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("private_key", &"<redacted>")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("network_name", &self.network_name)
            .field("artifact_path", &self.artifact_path)
            .field("explorer_url", &self.explorer_url)
            .field("confirmations", &self.confirmations)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl DeployConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let chain_id = Self::validate_and_get_env_var(
            "DEPLOYER_CHAIN_ID",
            &MONAD_TESTNET_CHAIN_ID.to_string(),
            false,
        )?;
        let confirmations = Self::validate_and_get_env_var("DEPLOYER_CONFIRMATIONS", "1", false)?;

        let config = Self {
            private_key: Self::validate_and_get_env_var("DEPLOYER_PRIVATE_KEY", "", true)?,
            rpc_url: Self::validate_and_get_env_var("DEPLOYER_RPC_URL", MONAD_TESTNET_RPC_URL, false)?,
            chain_id: parse_chain_id(&chain_id)
                .map_err(|e| anyhow!("Invalid DEPLOYER_CHAIN_ID: {}", e))?,
            network_name: Self::validate_and_get_env_var(
                "DEPLOYER_NETWORK_NAME",
                DEFAULT_NETWORK_NAME,
                false,
            )?,
            artifact_path: PathBuf::from(Self::validate_and_get_env_var(
                "DEPLOYER_ARTIFACT",
                DEFAULT_ARTIFACT_PATH,
                false,
            )?),
            explorer_url: Self::validate_and_get_env_var(
                "DEPLOYER_EXPLORER_URL",
                MONAD_TESTNET_EXPLORER_URL,
                false,
            )?
            .trim_end_matches('/')
            .to_string(),
            confirmations: confirmations
                .parse()
                .map_err(|e| anyhow!("Invalid DEPLOYER_CONFIRMATIONS '{}': {}", confirmations, e))?,
            log_level: Self::validate_and_get_env_var("LOG_LEVEL", "info", false)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Read an environment variable, treating an empty value as unset.
    pub fn validate_and_get_env_var(key: &str, fallback: &str, required: bool) -> Result<String> {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            Ok(_) if required => Err(anyhow!("Environment variable {} is required but empty", key)),
            Err(_) if required => Err(anyhow!("Required environment variable {} is not set", key)),
            _ => Ok(fallback.to_string()),
        }
    }

    /// 32-byte hex key, with or without the `0x` prefix.
    pub fn is_valid_private_key(key: &str) -> bool {
        let hex_part = key.strip_prefix("0x").unwrap_or(key);
        hex_part.len() == 64 && hex_part.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn validate(&self) -> Result<()> {
        if !Self::is_valid_private_key(&self.private_key) {
            return Err(anyhow!(
                "DEPLOYER_PRIVATE_KEY must be 64 hex characters, optionally prefixed with 0x"
            ));
        }
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(anyhow!("DEPLOYER_RPC_URL must be an http(s) URL: {}", self.rpc_url));
        }
        if self.chain_id == 0 {
            return Err(anyhow!("DEPLOYER_CHAIN_ID must be non-zero"));
        }
        if self.confirmations == 0 {
            return Err(anyhow!("DEPLOYER_CONFIRMATIONS must be at least 1"));
        }
        if self.explorer_url.is_empty() {
            return Err(anyhow!("DEPLOYER_EXPLORER_URL cannot be empty"));
        }
        Ok(())
    }
}
