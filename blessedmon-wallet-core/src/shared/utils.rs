//! Utility functions for the wallet core

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ethers::utils::{format_ether, format_units, to_checksum};

use crate::shared::constants::{MINT_GAS_LIMIT, NOMINAL_MINTING_FEE_ETHER};
use crate::shared::error::WalletError;
use crate::shared::types::{Address, GasEstimate, TxHash, U256};

/// Validate Ethereum address format
pub fn validate_ethereum_address(address: &str) -> Result<(), WalletError> {
    if !address.starts_with("0x") {
        return Err(WalletError::validation("Address must start with 0x"));
    }

    if address.len() != 42 {
        return Err(WalletError::validation("Address must be 42 characters long"));
    }

    // Check if all characters after 0x are valid hex
    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WalletError::validation("Address contains invalid hex characters"));
    }

    Ok(())
}

pub fn parse_address(address: &str) -> Result<Address, WalletError> {
    validate_ethereum_address(address)?;
    address
        .parse::<Address>()
        .map_err(|e| WalletError::validation(format!("Invalid address '{}': {}", address, e)))
}

/// Chain id in the `0x`-prefixed lowercase hex form wallets expect.
pub fn chain_id_hex(chain_id: u64) -> String {
    format!("0x{:x}", chain_id)
}

/// Parse a chain id given either in decimal or as `0x` hex.
pub fn parse_chain_id(value: &str) -> Result<u64, WalletError> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex_digits) => u64::from_str_radix(hex_digits, 16),
        None => value.parse::<u64>(),
    };
    parsed.map_err(|e| WalletError::validation(format!("Invalid chain id '{}': {}", value, e)))
}

/// `0xB573...884c` style display of an address.
pub fn abbreviate_address(address: &Address) -> String {
    let checksummed = to_checksum(address, None);
    format!("{}...{}", &checksummed[..6], &checksummed[38..])
}

pub fn explorer_tx_url(explorer: &str, tx_hash: &TxHash) -> String {
    format!("{}/tx/{:?}", explorer.trim_end_matches('/'), tx_hash)
}

pub fn explorer_address_url(explorer: &str, address: &Address) -> String {
    format!("{}/address/{:?}", explorer.trim_end_matches('/'), address)
}

/// Format a wei amount in whole native units without trailing zeros.
pub fn format_native(amount: U256) -> String {
    trim_decimal_zeros(&format_ether(amount))
}

fn trim_decimal_zeros(value: &str) -> String {
    if !value.contains('.') {
        return value.to_string();
    }
    let trimmed = value.trim_end_matches('0');
    match trimmed.strip_suffix('.') {
        Some(whole) => format!("{}.0", whole),
        None => trimmed.to_string(),
    }
}

/// Price one mint at the given gas price using the fixed mint gas limit.
pub fn estimate_mint_cost(gas_price: U256) -> GasEstimate {
    let gas_price_gwei = format_units(gas_price, "gwei")
        .map(|v| trim_decimal_zeros(&v))
        .unwrap_or_else(|_| gas_price.to_string());
    let gas_price_ether = format_native(gas_price);
    let gas_cost_wei = gas_price.saturating_mul(U256::from(MINT_GAS_LIMIT));
    let estimated_gas_cost_ether = format_ether(gas_cost_wei).parse::<f64>().unwrap_or(0.0);

    GasEstimate {
        gas_price_wei: gas_price,
        gas_price_gwei,
        gas_price_ether,
        mint_gas_limit: MINT_GAS_LIMIT,
        estimated_gas_cost_ether,
        total_estimated_cost_ether: NOMINAL_MINTING_FEE_ETHER + estimated_gas_cost_ether,
    }
}

/// Encode raw image bytes as a `data:` URI.
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// MIME type for common image file extensions.
pub fn image_mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
