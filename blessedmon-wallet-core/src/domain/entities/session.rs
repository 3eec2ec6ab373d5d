//! Wallet session entity and its UI projection

use serde::{Deserialize, Serialize};

use crate::shared::types::{Address, GasEstimate};
use crate::shared::utils::abbreviate_address;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionPhase {
    Disconnected,
    Connecting,
    Connected,
    /// Connected, but the wallet's active chain is not the target chain.
    NetworkMismatch,
}

/// The single authoritative wallet session for one visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub phase: SessionPhase,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

impl Default for WalletSession {
    fn default() -> Self {
        Self {
            address: None,
            phase: SessionPhase::Disconnected,
        }
    }
}

/// What the page shows for the wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletView {
    pub connected: bool,
    pub display_address: Option<String>,
    pub show_connect: bool,
    pub show_disconnect: bool,
    /// A connect attempt is waiting on the wallet.
    pub connecting: bool,
    pub network_mismatch: bool,
    pub gas: Option<GasEstimate>,
}

impl WalletView {
    pub fn project(session: &WalletSession, gas: Option<GasEstimate>) -> Self {
        let connecting = session.phase == SessionPhase::Connecting;
        match session.address {
            Some(address) => Self {
                connected: true,
                display_address: Some(abbreviate_address(&address)),
                show_connect: false,
                show_disconnect: true,
                connecting,
                network_mismatch: session.phase == SessionPhase::NetworkMismatch,
                gas,
            },
            None => Self {
                connected: false,
                display_address: None,
                show_connect: !connecting,
                show_disconnect: false,
                connecting,
                network_mismatch: false,
                gas: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_projection() {
        let view = WalletView::project(&WalletSession::default(), None);
        assert!(!view.connected);
        assert!(view.show_connect);
        assert!(!view.show_disconnect);
        assert_eq!(view.display_address, None);
    }

    #[test]
    fn test_mismatched_projection() {
        let session = WalletSession {
            address: Some(Address::repeat_byte(0x11)),
            phase: SessionPhase::NetworkMismatch,
        };
        let view = WalletView::project(&session, None);
        assert!(view.connected);
        assert!(view.network_mismatch);
        assert!(view.show_disconnect);
        assert_eq!(view.display_address.as_deref(), Some("0x1111...1111"));
    }

    #[test]
    fn test_connecting_projection() {
        let first_connect = WalletSession {
            address: None,
            phase: SessionPhase::Connecting,
        };
        let view = WalletView::project(&first_connect, None);
        assert!(view.connecting);
        assert!(!view.show_connect);
        assert!(!view.connected);

        let reconnect = WalletSession {
            address: Some(Address::repeat_byte(0x11)),
            phase: SessionPhase::Connecting,
        };
        let view = WalletView::project(&reconnect, None);
        assert!(view.connecting);
        assert!(view.connected);
        assert!(!view.network_mismatch);

        let settled = WalletSession {
            address: Some(Address::repeat_byte(0x11)),
            phase: SessionPhase::Connected,
        };
        assert!(!WalletView::project(&settled, None).connecting);
    }
}
