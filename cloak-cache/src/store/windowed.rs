//! Time-windowed disk store.
//!
//! Expiry here is structural, not checked: the effective key embeds the
//! window length and the current window bucket, so once the clock crosses a
//! bucket boundary the old slot simply stops being addressed. No timestamp is
//! stored with the data and nothing is actively evicted; dead buckets linger
//! in the file until it is cleared out of band.

use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use cloak_core::{RawValue, StoreError};

use super::{BackingStore, DiskStore};

/// Durable store whose key space is partitioned into expiry buckets.
///
/// Storage mechanics are delegated to a [`DiskStore`]; this type only adds
/// the bucketed key construction.
pub struct WindowedStore {
    inner: DiskStore,
}

impl WindowedStore {
    /// Open a windowed store file. See [`DiskStore::open`] for error cases.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self {
            inner: DiskStore::open(path)?,
        })
    }

    /// Build the effective key for a base key within the current window.
    ///
    /// The window length is part of the key, so the same base key under
    /// different windows addresses distinct slots by construction. A
    /// zero-length window is clamped to one second.
    pub fn slot_key(base: &str, window: Duration) -> String {
        Self::slot_key_at(base, window, Utc::now().timestamp())
    }

    fn slot_key_at(base: &str, window: Duration, now_secs: i64) -> String {
        let window_secs = window.as_secs().max(1);
        let bucket = now_secs.div_euclid(window_secs as i64);
        format!("{}@{}s#{}", base, window_secs, bucket)
    }

    /// Number of stored slots, dead buckets included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl BackingStore for WindowedStore {
    fn get(&self, key: &str, default: &RawValue) -> (bool, RawValue) {
        self.inner.get(key, default)
    }

    fn put(&self, key: &str, value: RawValue) {
        self.inner.put(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_same_window_same_slot() {
        let now = 1_700_000_000;
        let a = WindowedStore::slot_key_at("lat", Duration::from_secs(1800), now);
        let b = WindowedStore::slot_key_at("lat", Duration::from_secs(1800), now + 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_windows_never_share_a_slot() {
        let now = 1_700_000_000;
        let short = WindowedStore::slot_key_at("lat", Duration::from_secs(60), now);
        let long = WindowedStore::slot_key_at("lat", Duration::from_secs(3600), now);
        assert_ne!(short, long);
    }

    #[test]
    fn test_bucket_rollover_changes_slot() {
        let window = Duration::from_secs(60);
        let before = WindowedStore::slot_key_at("imsi", window, 119);
        let after = WindowedStore::slot_key_at("imsi", window, 121);
        assert_ne!(before, after);
    }

    #[test]
    fn test_zero_window_is_clamped() {
        let key = WindowedStore::slot_key_at("k", Duration::ZERO, 42);
        assert_eq!(key, "k@1s#42");
    }

    #[test]
    fn test_stale_bucket_is_unreachable() {
        let dir = TempDir::new().unwrap();
        let store = WindowedStore::open(dir.path().join("windowed.json")).unwrap();
        let window = Duration::from_secs(60);

        let old_slot = WindowedStore::slot_key_at("net_type", window, 0);
        store.put(&old_slot, RawValue::text("4g"));

        let new_slot = WindowedStore::slot_key_at("net_type", window, 3600);
        let (hit, _) = store.get(&new_slot, &RawValue::text(""));
        assert!(!hit);

        // The dead slot still occupies space until cleared out of band.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delegates_storage_to_disk() {
        let dir = TempDir::new().unwrap();
        let store = WindowedStore::open(dir.path().join("windowed.json")).unwrap();
        let slot = WindowedStore::slot_key("device_id", Duration::from_secs(3600));
        store.put(&slot, RawValue::text("abc"));
        let (hit, value) = store.get(&slot, &RawValue::text(""));
        assert!(hit);
        assert_eq!(value.as_text(), Some("abc"));
    }
}
