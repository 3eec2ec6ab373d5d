//! Mint one BlessedMon NFT through a wallet's JSON-RPC endpoint.
//!
//! Usage: `mint <image-path> <name> <description>`

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use blessedmon_wallet_core::shared::constants::CHANGE_WATCH_INTERVAL_MS;
use blessedmon_wallet_core::shared::utils::image_mime_for_extension;
use blessedmon_wallet_core::{
    AppConfig, JsonRpcWalletProvider, MinterApp, Readiness, WalletError, WalletProvider,
};

#[tokio::main]
async fn main() {
    blessedmon_wallet_core::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [image_path, name, description] = args.as_slice() else {
        eprintln!("Usage: mint <image-path> <name> <description>");
        std::process::exit(2);
    };

    if let Err(e) = run(Path::new(image_path), name, description).await {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(image_path: &Path, name: &str, description: &str) -> Result<(), WalletError> {
    let config = AppConfig::from_env()?;
    let provider = Arc::new(JsonRpcWalletProvider::new(&config.wallet_url)?);
    let (events, _watcher) =
        Arc::clone(&provider).spawn_change_watcher(Duration::from_millis(CHANGE_WATCH_INTERVAL_MS));

    let app = MinterApp::from_config(&config, Some(provider as Arc<dyn WalletProvider>));
    let _listener = app.listen(events);

    let view = app.start(Readiness::immediate()).await?;
    if !view.connected {
        app.connect().await?;
    }
    let view = app.view().await;
    if let Some(address) = &view.display_address {
        println!("Wallet connected: {}", address);
    }
    if let Some(gas) = &view.gas {
        println!(
            "Gas price: {} gwei, estimated total cost: {:.6} {}",
            gas.gas_price_gwei,
            gas.total_estimated_cost_ether,
            app.network().native_currency.symbol
        );
    }
    if let Ok(supply) = app.total_supply().await {
        println!("Minted so far: {}", supply);
    }

    let mime = image_path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(image_mime_for_extension)
        .unwrap_or("application/octet-stream");
    let bytes = tokio::fs::read(image_path).await.map_err(|e| {
        WalletError::validation(format!("Could not read {}: {}", image_path.display(), e))
    })?;
    app.minter().set_image(mime, &bytes).await?;
    app.minter().set_details(name, description).await;

    let mut status = app.subscribe_status();
    let printer = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();
            println!("[{}] {}", current.kind.as_str(), current.message);
        }
    });

    let outcome = app.mint().await;
    printer.abort();
    let outcome = outcome?;

    println!("Transaction: {:?}", outcome.tx_hash);
    if let Some(block) = outcome.block_number {
        println!("Block: {}", block);
    }
    println!("Explorer: {}", outcome.explorer_url);
    if let Ok(supply) = app.total_supply().await {
        println!("Total supply: {}", supply);
    }
    Ok(())
}
