use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ethers::abi::Abi;
use ethers::types::Bytes;
use serde::Deserialize;

/// Compiled contract as written by Hardhat (`artifacts/contracts/...json`).
/// Fields other than these three are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Self =
            serde_json::from_str(json).context("Failed to parse contract artifact")?;
        if artifact.bytecode.is_empty() {
            return Err(anyhow!(
                "Artifact for {} has no bytecode; is the contract abstract?",
                artifact.contract_name
            ));
        }
        Ok(artifact)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read contract artifact {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn has_constructor_args(&self) -> bool {
        self.abi
            .constructor()
            .map(|constructor| !constructor.inputs.is_empty())
            .unwrap_or(false)
    }
}
