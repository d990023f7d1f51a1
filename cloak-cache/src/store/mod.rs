//! Backing store abstraction and the three concrete stores.
//!
//! A backing store is a keyed map with a defined persistence scope. The
//! coordinator never talks to a concrete store type; everything goes through
//! [`BackingStore`], so tests can substitute mocks.

pub mod disk;
pub mod memory;
pub mod windowed;

pub use disk::DiskStore;
pub use memory::MemoryStore;
pub use windowed::WindowedStore;

use cloak_core::RawValue;

/// Persistence scope of a backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Volatile, lives for the process lifetime.
    Memory,
    /// Durable, unbounded lifetime.
    PermanentDisk,
    /// Durable, but keys encode an expiry bucket so stale slots become
    /// unreachable without eviction.
    TimeWindowed,
}

/// Uniform get/put contract every store variant implements.
///
/// # Contract
///
/// - `get` must never fail for a missing key. A miss returns
///   `(false, fallback)` where the fallback is store-specific: it may be the
///   `default` the caller passed in, or the store's own empty representation.
///   Substituting the caller default on miss is the coordinator's job, not
///   the store's.
/// - `put` is best-effort. A store that cannot persist logs the failure and
///   moves on; persistence problems are never part of the caller-visible
///   error surface.
/// - Implementations must tolerate concurrent `get`/`put` on the same key
///   without corrupting their representation. No store is required to make a
///   coordinator-level get-then-put atomic: two concurrent misses may both
///   compute and both persist, last writer wins.
pub trait BackingStore: Send + Sync {
    /// Look up a key. Returns `(hit, value)`; see the trait contract for
    /// what `value` is on a miss.
    fn get(&self, key: &str, default: &RawValue) -> (bool, RawValue);

    /// Insert or overwrite a key. Best-effort.
    fn put(&self, key: &str, value: RawValue);
}
