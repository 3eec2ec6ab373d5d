//! Pending mint input and token metadata

use serde::{Deserialize, Serialize};

use crate::shared::error::WalletError;
use crate::shared::utils::image_data_uri;

/// User input for the next mint. Cleared after a successful mint or an
/// explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMint {
    pub image_data_uri: Option<String>,
    pub name: String,
    pub description: String,
}

impl PendingMint {
    pub fn set_image(&mut self, mime: &str, bytes: &[u8]) -> Result<(), WalletError> {
        if !mime.starts_with("image/") {
            return Err(WalletError::validation("Please select an image file."));
        }
        self.image_data_uri = Some(image_data_uri(mime, bytes));
        Ok(())
    }

    pub fn set_image_data_uri(&mut self, data_uri: impl Into<String>) -> Result<(), WalletError> {
        let data_uri = data_uri.into();
        if !data_uri.starts_with("data:image/") {
            return Err(WalletError::validation("Please select an image file."));
        }
        self.image_data_uri = Some(data_uri);
        Ok(())
    }

    pub fn set_details(&mut self, name: &str, description: &str) {
        self.name = name.trim().to_string();
        self.description = description.trim().to_string();
    }

    pub fn has_image(&self) -> bool {
        self.image_data_uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        !self.has_image() && self.name.is_empty() && self.description.is_empty()
    }

    /// Local checks run before any provider call, in display order.
    pub fn validate(&self) -> Result<(), WalletError> {
        if !self.has_image() {
            return Err(WalletError::validation("Please select an image first."));
        }
        if self.name.is_empty() || self.description.is_empty() {
            return Err(WalletError::validation("Please enter both NFT name and description."));
        }
        Ok(())
    }

    pub fn metadata(&self) -> Result<TokenMetadata, WalletError> {
        self.validate()?;
        Ok(TokenMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image_data_uri.clone().unwrap_or_default(),
            attributes: Vec::new(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Token metadata embedded inline as the token locator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<serde_json::Value>,
}

impl TokenMetadata {
    /// Serialized form passed to `mintNFT`. The image is embedded, so the
    /// size is bounded only by the image.
    pub fn token_uri(&self) -> Result<String, WalletError> {
        Ok(serde_json::to_string(self)?)
    }
}
