//! The cart backup file.
//!
//! Every cart mutation mirrors the full line set to a JSON file so the cart
//! survives a process restart. The format is a JSON array of line objects
//! under a fixed file name, overwritten on every write.
//!
//! Loading fails open: a missing or corrupt backup yields an empty cart.

use std::io;
use std::path::PathBuf;

use super::cart::{Cart, CartLine};

/// Handle to the cart backup file.
#[derive(Debug, Clone)]
pub struct CartBackup {
    path: PathBuf,
}

impl CartBackup {
    /// Create a handle for the given backup file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The backup file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Restore the cart from the backup file.
    ///
    /// Called once at startup. A missing file is normal (first run); a
    /// corrupt file is logged and discarded. Both yield an empty cart.
    pub async fn load(&self) -> Cart {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no cart backup at {}", self.path.display());
                return Cart::new();
            }
            Err(e) => {
                tracing::warn!("failed to read cart backup {}: {e}", self.path.display());
                return Cart::new();
            }
        };

        match serde_json::from_slice::<Vec<CartLine>>(&raw) {
            Ok(lines) => Cart::from_lines(lines),
            Err(e) => {
                tracing::warn!("discarding corrupt cart backup {}: {e}", self.path.display());
                Cart::new()
            }
        }
    }

    /// Overwrite the backup with the current cart lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. Callers treat this as
    /// non-fatal: the in-memory cart stays authoritative for the session.
    pub async fn save(&self, cart: &Cart) -> io::Result<()> {
        let raw = serde_json::to_vec(cart.lines()).map_err(io::Error::from)?;
        tokio::fs::write(&self.path, raw).await
    }
}
