//! Deployed NFT contract descriptor

use ethers::abi::{Abi, parse_abi};
use serde::{Deserialize, Serialize};

use crate::shared::constants::{NFT_CONTRACT_ADDRESS, NFT_CONTRACT_SIGNATURES};
use crate::shared::error::WalletError;
use crate::shared::types::Address;
use crate::shared::utils::parse_address;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractDescriptor {
    pub address: Address,
    /// Human readable function signatures the contract exposes.
    pub call_signatures: Vec<String>,
}

impl ContractDescriptor {
    pub fn new(address: &str) -> Result<Self, WalletError> {
        Ok(Self {
            address: parse_address(address)?,
            call_signatures: NFT_CONTRACT_SIGNATURES.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn blessedmon() -> Result<Self, WalletError> {
        Self::new(NFT_CONTRACT_ADDRESS)
    }

    pub fn abi(&self) -> Result<Abi, WalletError> {
        let signatures: Vec<&str> = self.call_signatures.iter().map(String::as_str).collect();
        parse_abi(&signatures)
            .map_err(|e| WalletError::config(format!("Invalid contract signature: {}", e)))
    }
}
