//! Permanent disk-backed store.
//!
//! A flat JSON object of string keys to string values, loaded once at open
//! and mirrored in memory behind an `RwLock`. Every `put` rewrites the whole
//! file under the write lock, so the on-disk representation is always one
//! complete map; concurrent same-key traffic cannot interleave partial
//! writes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use cloak_core::{RawValue, StoreError};

use super::BackingStore;

/// Durable store with unbounded entry lifetime.
///
/// Only textual raw values are persisted; a shared value reaching `put` is
/// dropped with a warning, since opaque kinds belong in the memory store.
#[derive(Debug)]
pub struct DiskStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl DiskStore {
    /// Open a store file, creating an empty store if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read and
    /// [`StoreError::Corrupt`] if its contents are not a JSON string map.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        }
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|err| StoreError::Corrupt {
                path: path.clone(),
                reason: err.to_string(),
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite the backing file from the given map. Failures are logged and
    /// swallowed; persistence is best-effort by contract.
    fn flush(&self, entries: &HashMap<String, String>) {
        let serialized = match serde_json::to_string(entries) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to serialize cache contents"
                );
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, serialized) {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to persist cache file"
            );
        }
    }
}

impl BackingStore for DiskStore {
    fn get(&self, key: &str, _default: &RawValue) -> (bool, RawValue) {
        match self.entries.read() {
            Ok(entries) => match entries.get(key) {
                Some(value) => (true, RawValue::text(value.clone())),
                // Miss fallback is this store's own empty representation,
                // not the caller default; the coordinator substitutes.
                None => (false, RawValue::text("")),
            },
            Err(_) => {
                tracing::warn!(key, "cache map lock poisoned, reporting miss");
                (false, RawValue::text(""))
            }
        }
    }

    fn put(&self, key: &str, value: RawValue) {
        let text = match value {
            RawValue::Text(s) => s,
            RawValue::Shared(_) => {
                tracing::warn!(key, "dropping non-text value put to a disk store");
                return;
            }
        };
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), text);
            self.flush(&entries);
        }
    }
}
