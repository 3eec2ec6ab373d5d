//! Error handling for the wallet core
//!
//! Every failure of the connect and mint lifecycle is one of the flat kinds
//! below. Each carries the message shown in the status display.

use thiserror::Error;

use crate::shared::constants::{INTERNAL_JSON_RPC_ERROR, UNRECOGNIZED_CHAIN, USER_REJECTED_REQUEST};

/// Failure reported by the wallet provider or the RPC transport behind it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct WalletRpcError {
    pub code: Option<i64>,
    pub message: String,
}

impl WalletRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// Error without a JSON-RPC code (transport, decoding, reverts).
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(USER_REJECTED_REQUEST, "User rejected the request.")
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_REQUEST)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(UNRECOGNIZED_CHAIN)
    }

    pub fn is_internal_json_rpc(&self) -> bool {
        self.code == Some(INTERNAL_JSON_RPC_ERROR)
    }
}

/// Wallet error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Request rejected by user: {0}")]
    UserRejected(String),

    #[error("Network configuration failed: {0}")]
    NetworkConfigurationFailed(String),

    #[error("Validation error: {0}")]
    ValidationFailed(String),

    #[error("Minting fee query failed: {0}")]
    FeeQueryFailed(WalletRpcError),

    #[error("Transaction submission failed: {0}")]
    SubmissionFailed(WalletRpcError),

    #[error("Transaction confirmation failed: {0}")]
    ConfirmationFailed(WalletRpcError),

    #[error("Wallet connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Contract query failed: {0}")]
    QueryFailed(WalletRpcError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalletError {
    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable(message.into())
    }

    pub fn user_rejected(message: impl Into<String>) -> Self {
        Self::UserRejected(message.into())
    }

    pub fn network_configuration(message: impl Into<String>) -> Self {
        Self::NetworkConfigurationFailed(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionFailed(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classify a failed submission. A declined signature request is a
    /// rejection, anything else is a submission failure.
    pub fn from_submission(err: WalletRpcError) -> Self {
        if err.is_user_rejection() {
            Self::UserRejected(err.message)
        } else {
            Self::SubmissionFailed(err)
        }
    }

    /// Underlying provider failure, when there is one.
    pub fn rpc_error(&self) -> Option<&WalletRpcError> {
        match self {
            Self::FeeQueryFailed(e)
            | Self::SubmissionFailed(e)
            | Self::ConfirmationFailed(e)
            | Self::QueryFailed(e) => Some(e),
            _ => None,
        }
    }

    /// Text written to the status display for this failure.
    ///
    /// Only the internal JSON-RPC error code gets a friendlier message;
    /// provider failures otherwise show their raw message.
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationFailed(message)
            | Self::ProviderUnavailable(message)
            | Self::NetworkConfigurationFailed(message) => message.clone(),
            Self::UserRejected(message) | Self::Config(message) => format!("Error: {message}"),
            Self::ConnectionFailed(message) => format!("Failed to connect wallet: {message}"),
            Self::FeeQueryFailed(e)
            | Self::SubmissionFailed(e)
            | Self::ConfirmationFailed(e)
            | Self::QueryFailed(e) => {
                if e.is_internal_json_rpc() {
                    "Transaction failed. Please check your wallet balance and try again.".to_string()
                } else if e.message.is_empty() {
                    "Failed to mint NFT".to_string()
                } else {
                    format!("Error: {}", e.message)
                }
            }
        }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("JSON error: {}", err))
    }
}
