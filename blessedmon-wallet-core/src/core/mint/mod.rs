//! Mint orchestration
//!
//! Drives one mint attempt: local validation, fee lookup, submission and
//! confirmation. Every step is a suspension on the wallet provider; there is
//! no retry, no timeout and no cancellation once submitted. Any failure ends
//! the attempt and is written to the status display.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::core::context::AppContext;
use crate::core::provider::NftContract;
use crate::core::session::WalletSessionManager;
use crate::domain::PendingMint;
use crate::shared::constants::LARGE_TOKEN_URI_BYTES;
use crate::shared::error::{WalletError, WalletRpcError};
use crate::shared::types::{MintOutcome, TransactionStatus};
use crate::shared::utils::{explorer_tx_url, format_native};

pub struct MintOrchestrator {
    ctx: Arc<AppContext>,
    session: Arc<WalletSessionManager>,
    pending: Mutex<PendingMint>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the attempt ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MintOrchestrator {
    pub fn new(ctx: Arc<AppContext>, session: Arc<WalletSessionManager>) -> Self {
        Self {
            ctx,
            session,
            pending: Mutex::new(PendingMint::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn set_image(&self, mime: &str, bytes: &[u8]) -> Result<(), WalletError> {
        let result = self.pending.lock().await.set_image(mime, bytes);
        result.map_err(|e| self.ctx.status.fail(e))
    }

    pub async fn set_image_data_uri(&self, data_uri: impl Into<String>) -> Result<(), WalletError> {
        let result = self.pending.lock().await.set_image_data_uri(data_uri);
        result.map_err(|e| self.ctx.status.fail(e))
    }

    pub async fn set_details(&self, name: &str, description: &str) {
        self.pending.lock().await.set_details(name, description);
    }

    pub async fn pending(&self) -> PendingMint {
        self.pending.lock().await.clone()
    }

    pub async fn reset(&self) {
        self.pending.lock().await.reset();
    }

    /// Whether the mint affordance is enabled.
    pub async fn can_mint(&self) -> bool {
        !self.is_minting() && self.pending.lock().await.has_image()
    }

    pub fn is_minting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    /// Run one mint attempt with the current pending input.
    ///
    /// Preconditions are checked before any provider call: image, then name
    /// and description, then a connected session. The pending input is only
    /// cleared on success.
    pub async fn mint(&self) -> Result<MintOutcome, WalletError> {
        let Some(_guard) = self.begin() else {
            return Err(self.ctx.status.fail(WalletError::validation("A mint is already in progress.")));
        };

        let pending = self.pending.lock().await.clone();
        let metadata = pending.metadata().map_err(|e| self.ctx.status.fail(e))?;
        let contract = self.session.contract().await.ok_or_else(|| {
            self.ctx
                .status
                .fail(WalletError::validation("Please connect your wallet first."))
        })?;

        let token_uri = metadata.token_uri().map_err(|e| self.ctx.status.fail(e))?;
        if token_uri.len() > LARGE_TOKEN_URI_BYTES {
            // Embedded images make the locator unbounded; storage cost grows with it.
            log::warn!(
                "token locator is {} bytes, above the {} byte soft limit",
                token_uri.len(),
                LARGE_TOKEN_URI_BYTES
            );
        }

        match self.submit(contract.as_ref(), token_uri).await {
            Ok(outcome) => {
                self.pending.lock().await.reset();
                Ok(outcome)
            }
            Err(err) => {
                log::error!("Minting error: {}", err);
                Err(self.ctx.status.fail(err))
            }
        }
    }

    async fn submit(&self, contract: &dyn NftContract, token_uri: String) -> Result<MintOutcome, WalletError> {
        let status = &self.ctx.status;
        let symbol = &self.ctx.network.native_currency.symbol;

        status.info("Preparing transaction...");
        let fee = contract
            .minting_fee()
            .await
            .map_err(WalletError::FeeQueryFailed)?;
        log::info!("Contract minting fee: {} {}", format_native(fee), symbol);

        status.info(format!("Minting fee: {} {}", format_native(fee), symbol));
        log::debug!("submitting mint with {} byte token locator", token_uri.len());
        let tx_hash = contract
            .mint_nft(token_uri, fee)
            .await
            .map_err(WalletError::from_submission)?;
        log::info!("mint transaction submitted: {:?}", tx_hash);

        status.info("Transaction submitted! Waiting for confirmation...");
        let receipt = contract
            .wait_for_confirmation(tx_hash)
            .await
            .map_err(WalletError::ConfirmationFailed)?;
        if !receipt.success {
            return Err(WalletError::ConfirmationFailed(WalletRpcError::other(format!(
                "transaction {:?} reverted",
                tx_hash
            ))));
        }

        let explorer_url = explorer_tx_url(self.ctx.network.explorer_url(), &tx_hash);
        log::info!("NFT minted in block {:?}: {}", receipt.block_number, explorer_url);
        status.publish(
            TransactionStatus::success(format!("NFT minted successfully! Transaction: {}", explorer_url))
                .with_link(explorer_url.clone()),
        );

        Ok(MintOutcome {
            tx_hash,
            explorer_url,
            block_number: receipt.block_number,
        })
    }
}
