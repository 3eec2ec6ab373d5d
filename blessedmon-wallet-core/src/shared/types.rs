//! Common types used across the wallet core

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use ethers::types::{Address, TxHash, U256};

/// Severity of the status display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// Latest lifecycle event shown to the user. Each update replaces the
/// previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionStatus {
    pub kind: StatusKind,
    pub message: String,
    pub link: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionStatus {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            link: None,
            updated_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, message)
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Nothing reported yet.
    pub fn idle() -> Self {
        Self::info("")
    }
}

/// Outcome of waiting on a submitted transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MintReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: Option<U256>,
    /// `false` when the transaction was included but reverted.
    pub success: bool,
}

/// Result of a completed mint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MintOutcome {
    pub tx_hash: TxHash,
    pub explorer_url: String,
    pub block_number: Option<u64>,
}

/// Gas price snapshot taken after connecting, priced for one mint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GasEstimate {
    pub gas_price_wei: U256,
    pub gas_price_gwei: String,
    pub gas_price_ether: String,
    pub mint_gas_limit: u64,
    pub estimated_gas_cost_ether: f64,
    pub total_estimated_cost_ether: f64,
}
