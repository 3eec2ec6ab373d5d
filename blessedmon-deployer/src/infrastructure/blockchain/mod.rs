pub mod artifact;
pub mod deployer;

pub use artifact::ContractArtifact;
pub use deployer::{DeploymentReport, NftDeployer};
