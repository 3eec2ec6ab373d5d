use blessedmon_wallet_core::{AppConfig, ContractDescriptor};

fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let network = &config.network;
    let is_default_contract = ContractDescriptor::blessedmon()
        .map(|default| default.address == config.contract.address)
        .unwrap_or(false);

    println!("BlessedMon Minter Configuration:\n");
    println!("  Chain: {} ({}, {})", network.chain_name, network.chain_id, network.chain_id_hex());
    println!(
        "  Currency: {} ({}, {} decimals)",
        network.native_currency.name, network.native_currency.symbol, network.native_currency.decimals
    );
    println!("  RPC URLs: {}", network.rpc_urls.join(", "));
    println!("  Explorer URLs: {}", network.block_explorer_urls.join(", "));
    println!(
        "  Contract: {:?}{}",
        config.contract.address,
        if is_default_contract { "" } else { " (override)" }
    );
    for signature in &config.contract.call_signatures {
        println!("    {}", signature);
    }
    println!("  Wallet URL: {}", config.wallet_url);
}
