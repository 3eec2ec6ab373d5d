//! BlessedMon contract deployer
//!
//! Reads a compiled contract artifact, deploys it with a locally held key
//! and reports the address, transaction hash and explorer link.

pub mod infrastructure;

pub use infrastructure::blockchain::{ContractArtifact, DeploymentReport, NftDeployer};
pub use infrastructure::config::DeployConfig;
pub use infrastructure::logger::{LogConfig, Logger};
