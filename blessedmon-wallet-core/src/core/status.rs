//! Single status display shared by the session manager and the minter

use tokio::sync::watch;

use crate::shared::error::WalletError;
use crate::shared::types::{StatusKind, TransactionStatus};

/// Holds the most recent [`TransactionStatus`]. Publishing replaces the
/// previous value; subscribers only ever see the latest one.
#[derive(Debug)]
pub struct StatusBoard {
    sender: watch::Sender<TransactionStatus>,
}

impl StatusBoard {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(TransactionStatus::idle());
        Self { sender }
    }

    pub fn publish(&self, status: TransactionStatus) {
        match status.kind {
            StatusKind::Error => log::warn!("status [{}]: {}", status.kind.as_str(), status.message),
            _ => log::info!("status [{}]: {}", status.kind.as_str(), status.message),
        }
        self.sender.send_replace(status);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(TransactionStatus::info(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(TransactionStatus::error(message));
    }

    /// Write a failure to the display and hand it back for propagation.
    pub fn fail(&self, err: WalletError) -> WalletError {
        self.error(err.user_message());
        err
    }

    pub fn current(&self) -> TransactionStatus {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransactionStatus> {
        self.sender.subscribe()
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
