//! Durable local state: the bearer token and the wishlist.
//!
//! Both live in a single JSON file; every mutation rewrites the file.
//! There is no expiry logic beyond the session check-auth fallback
//! discarding a bad token.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orchard_core::ProductId;

/// Errors that can occur reading or writing the state file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default)]
    wishlist: Vec<ProductId>,
}

/// File-backed key-value store for the token and wishlist.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl LocalStore {
    /// Open the store at `path`, reading existing state if the file
    /// exists. A missing file is an empty store, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            StoreState::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ─────────────────────────────────────────────────────────────────────
    // Bearer token
    // ─────────────────────────────────────────────────────────────────────

    /// The persisted bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read().auth_token.as_deref().map(SecretString::from)
    }

    /// Persist a new bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn set_token(&self, token: &SecretString) -> Result<(), StoreError> {
        self.mutate(|state| state.auth_token = Some(token.expose_secret().to_owned()))
    }

    /// Remove the persisted bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn clear_token(&self) -> Result<(), StoreError> {
        self.mutate(|state| state.auth_token = None)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Wishlist
    // ─────────────────────────────────────────────────────────────────────

    /// The persisted wishlist, in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> Vec<ProductId> {
        self.read().wishlist.clone()
    }

    /// Whether `product_id` is on the wishlist.
    #[must_use]
    pub fn wishlist_contains(&self, product_id: &ProductId) -> bool {
        self.read().wishlist.contains(product_id)
    }

    /// Add a product to the wishlist. Adding twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn wishlist_add(&self, product_id: ProductId) -> Result<(), StoreError> {
        self.mutate(|state| {
            if !state.wishlist.contains(&product_id) {
                state.wishlist.push(product_id);
            }
        })
    }

    /// Remove a product from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn wishlist_remove(&self, product_id: &ProductId) -> Result<(), StoreError> {
        self.mutate(|state| state.wishlist.retain(|id| id != product_id))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Plumbing
    // ─────────────────────────────────────────────────────────────────────

    fn read(&self) -> StoreState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn mutate(&self, apply: impl FnOnce(&mut StoreState)) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state);
        self.save(&state)
    }

    fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}
