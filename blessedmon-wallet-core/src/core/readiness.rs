//! One-shot readiness signal from the hosting environment

use tokio::sync::oneshot;

use crate::shared::error::WalletError;

/// Held by the host; resolves the paired [`Readiness`] once.
#[derive(Debug)]
pub struct ReadyHandle {
    sender: oneshot::Sender<()>,
}

impl ReadyHandle {
    pub fn ready(self) {
        // Receiver gone means nobody is waiting anymore.
        let _ = self.sender.send(());
    }
}

#[derive(Debug)]
pub struct Readiness {
    receiver: oneshot::Receiver<()>,
}

impl Readiness {
    pub fn pair() -> (ReadyHandle, Readiness) {
        let (sender, receiver) = oneshot::channel();
        (ReadyHandle { sender }, Readiness { receiver })
    }

    /// Already resolved, for hosts that are ready at construction time.
    pub fn immediate() -> Readiness {
        let (handle, readiness) = Self::pair();
        handle.ready();
        readiness
    }

    pub async fn wait(self) -> Result<(), WalletError> {
        self.receiver.await.map_err(|_| {
            WalletError::provider_unavailable(
                "Wallet environment failed to initialize. Please refresh and try again.",
            )
        })
    }
}
