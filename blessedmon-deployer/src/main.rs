use anyhow::Result;
use blessedmon_deployer::{ContractArtifact, DeployConfig, DeploymentReport, LogConfig, Logger, NftDeployer};
use colored::*;

#[tokio::main]
async fn main() {
    let config = match DeployConfig::from_env() {
        Ok(config) => config,
        Err(e) => std::process::exit(report_outcome(Err(e))),
    };

    // Held until after the last log line; exit() skips destructors.
    let log_guard = Logger::init(&LogConfig::with_level(&config.log_level));
    log::info!("Configuration loaded: {:?}", config);

    let code = report_outcome(run(config).await);
    drop(log_guard);
    std::process::exit(code);
}

async fn run(config: DeployConfig) -> Result<DeploymentReport> {
    let artifact = ContractArtifact::from_file(&config.artifact_path)?;
    let deployer = NftDeployer::new(config)?;
    let report = deployer.deploy(&artifact).await?;

    println!("{} deployed to: {:?}", report.contract_name, report.contract_address);
    println!("Transaction hash: {:?}", report.tx_hash);
    println!("Block explorer: {}", report.explorer_url);
    log::info!("deployment transaction: {}", report.transaction_url);
    Ok(report)
}

/// Print the final verdict and return the process exit code.
fn report_outcome(outcome: Result<DeploymentReport>) -> i32 {
    match outcome {
        Ok(report) => {
            println!("{}", "Deployment successful!".green().bold());
            println!("Contract address: {:?}", report.contract_address);
            0
        }
        Err(e) => {
            log::error!("deployment aborted: {:#}", e);
            eprintln!("{} {:#}", "Deployment failed:".red().bold(), e);
            1
        }
    }
}
