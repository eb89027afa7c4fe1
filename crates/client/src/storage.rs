//! Persisted browser-equivalent storage.
//!
//! The web storefront keeps four values in browser-durable storage: the
//! bearer token, the serialized user object, the theme preference, and the
//! liked-product ID set. This module provides the same contract behind a
//! trait so the CLI persists to a JSON file and tests stay in memory.
//!
//! Access is read-modify-write with no cross-process locking; two concurrent
//! writers last-write-win, exactly like two browser tabs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ClientError;

/// Well-known storage keys.
pub mod keys {
    /// Key for the opaque bearer token.
    pub const TOKEN: &str = "token";

    /// Key for the serialized cached user object.
    pub const USER: &str = "user";

    /// Key for the persisted theme preference.
    pub const THEME_MODE: &str = "themeMode";

    /// Key for the serialized liked-product ID array.
    pub const LIKED_PRODUCTS: &str = "likedProducts";
}

/// A string key-value store with browser-storage semantics.
pub trait StorageBackend: Send + Sync {
    /// Read a value, `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .map(|values| values.get(key).cloned())
            .unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

/// File-backed storage for the CLI.
///
/// The whole map is rewritten on every set/remove; values are small (a token,
/// a user object, a handful of product IDs), so this mirrors the browser's
/// synchronous storage without a database.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or create) a file-backed store at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if an existing file cannot be read
    /// or does not parse as a string map.
    pub fn open(path: &Path) -> Result<Self, ClientError> {
        let values = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| ClientError::Storage(format!("read {}: {e}", path.display())))?;
            serde_json::from_str(&raw)
                .map_err(|e| ClientError::Storage(format!("parse {}: {e}", path.display())))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_owned(),
            values: Mutex::new(values),
        })
    }

    fn flush(&self, values: &HashMap<String, String>) {
        match serde_json::to_string_pretty(values) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(&self.path, raw) {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist storage");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to serialize storage"),
        }
    }
}

impl StorageBackend for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .map(|values| values.get(key).cloned())
            .unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
            self.flush(&values);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
            self.flush(&values);
        }
    }
}
