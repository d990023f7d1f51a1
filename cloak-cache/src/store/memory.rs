//! Process-lifetime in-memory store.

use dashmap::DashMap;

use cloak_core::RawValue;

use super::BackingStore;

/// Volatile store backed by a concurrency-safe keyed map.
///
/// Values are held as [`RawValue`]s without any conversion, so typed values
/// stored here come back as the same type (the identity codec path). Reads
/// never block other reads; writes only contend on the key being written.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, RawValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl BackingStore for MemoryStore {
    fn get(&self, key: &str, default: &RawValue) -> (bool, RawValue) {
        match self.entries.get(key) {
            Some(entry) => (true, entry.value().clone()),
            None => (false, default.clone()),
        }
    }

    fn put(&self, key: &str, value: RawValue) {
        self.entries.insert(key.to_string(), value);
    }
}
