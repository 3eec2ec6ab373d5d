use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use blessedmon_wallet_core::shared::utils::{explorer_address_url, explorer_tx_url};
use ethers::{
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, TxHash},
};

use super::artifact::ContractArtifact;
use crate::infrastructure::config::DeployConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    pub contract_name: String,
    pub contract_address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub explorer_url: String,
    pub transaction_url: String,
}

pub struct NftDeployer {
    client: Arc<SignerMiddleware<Provider<Http>, LocalWallet>>,
    config: DeployConfig,
}

impl NftDeployer {
    pub fn new(config: DeployConfig) -> Result<Self> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| anyhow!("Failed to create HTTP provider for {}: {}", config.rpc_url, e))?;
        let wallet = config
            .private_key
            .parse::<LocalWallet>()
            .map_err(|_| anyhow!("DEPLOYER_PRIVATE_KEY is not a valid secp256k1 key"))?
            .with_chain_id(config.chain_id);

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            config,
        })
    }

    pub fn deployer_address(&self) -> Address {
        self.client.signer().address()
    }

    /// Deploy `artifact` with no constructor arguments and wait for the
    /// configured number of confirmations.
    pub async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeploymentReport> {
        if artifact.has_constructor_args() {
            return Err(anyhow!(
                "{} expects constructor arguments, which this deployer does not pass",
                artifact.contract_name
            ));
        }

        log::info!(
            "Deploying {} contract to {}...",
            artifact.contract_name,
            self.config.network_name
        );
        log::debug!(
            "deployer {:?}, chain {}, {} byte init code",
            self.deployer_address(),
            self.config.chain_id,
            artifact.bytecode.len()
        );

        let factory = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            Arc::clone(&self.client),
        );
        let (contract, receipt) = factory
            .deploy(())
            .context("Failed to build deployment transaction")?
            .confirmations(self.config.confirmations)
            .send_with_receipt()
            .await
            .context("Deployment transaction failed")?;

        let contract_address = contract.address();
        log::info!(
            "{} deployed at {:?} in block {:?}",
            artifact.contract_name,
            contract_address,
            receipt.block_number
        );

        Ok(DeploymentReport {
            contract_name: artifact.contract_name.clone(),
            contract_address,
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.map(|b| b.as_u64()),
            explorer_url: explorer_address_url(&self.config.explorer_url, &contract_address),
            transaction_url: explorer_tx_url(&self.config.explorer_url, &receipt.transaction_hash),
        })
    }
}
