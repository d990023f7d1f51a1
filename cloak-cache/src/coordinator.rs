//! Cache-aside coordinator.
//!
//! One algorithm behind three entry points: look the key up in the chosen
//! store, decode on hit, otherwise invoke the provider, substitute the
//! caller's default on failure, and persist whatever came out, even after a
//! failure. Persisting the fallback is what keeps an unstable
//! provider from being re-invoked on every call within the same cache scope:
//! a wrong cached default is considered cheaper than repeated expensive or
//! side-effecting recomputation.
//!
//! The coordinator holds no per-key state and takes no locks of its own. Two
//! concurrent misses on one key may both run the provider and both persist;
//! the later write wins. That race is part of the contract.

use std::sync::Arc;
use std::time::Duration;

use cloak_core::{decode_raw, CacheValue, ProviderError, RawValue};

use crate::config::CacheConfig;
use crate::observer::AccessObserver;
use crate::store::{BackingStore, StoreKind, WindowedStore};

/// Stateless orchestration over three injected stores and an observer.
///
/// # Type Parameters
///
/// - `M`: the volatile memory store
/// - `D`: the permanent disk store
/// - `W`: the time-windowed disk store
/// - `O`: the access observer
///
/// # Example
///
/// ```ignore
/// let id = coordinator.load_with_disk(
///     "device_id",
///     "TelephonyManager#getDeviceId",
///     String::new(),
///     || read_device_id(),
/// );
/// ```
pub struct CacheCoordinator<M, D, W, O>
where
    M: BackingStore,
    D: BackingStore,
    W: BackingStore,
    O: AccessObserver,
{
    memory: Arc<M>,
    disk: Arc<D>,
    windowed: Arc<W>,
    observer: Arc<O>,
    config: CacheConfig,
}

impl<M, D, W, O> CacheCoordinator<M, D, W, O>
where
    M: BackingStore,
    D: BackingStore,
    W: BackingStore,
    O: AccessObserver,
{
    /// Create a coordinator over the given stores and observer.
    pub fn new(
        memory: Arc<M>,
        disk: Arc<D>,
        windowed: Arc<W>,
        observer: Arc<O>,
        config: CacheConfig,
    ) -> Self {
        Self {
            memory,
            disk,
            windowed,
            observer,
            config,
        }
    }

    /// Create a coordinator with the default configuration.
    pub fn with_defaults(memory: Arc<M>, disk: Arc<D>, windowed: Arc<W>, observer: Arc<O>) -> Self {
        Self::new(memory, disk, windowed, observer, CacheConfig::default())
    }

    /// Get the coordinator configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Memoize `provider` behind the process-lifetime memory store.
    ///
    /// Values pass through untouched (identity codec), so any
    /// [`CacheValue`] kind works here, opaque kinds included.
    pub fn load_with_memory<T, F>(&self, key: &str, description: &str, default: T, provider: F) -> T
    where
        T: CacheValue,
        F: FnOnce() -> Result<T, ProviderError>,
    {
        self.load_via(
            self.memory.as_ref(),
            StoreKind::Memory,
            key,
            description,
            default,
            provider,
        )
    }

    /// Memoize `provider` behind the permanent disk store.
    ///
    /// The value is stringified on the way in and parsed on the way out;
    /// kinds that do not round-trip through text effectively never hit.
    pub fn load_with_disk<T, F>(&self, key: &str, description: &str, default: T, provider: F) -> T
    where
        T: CacheValue,
        F: FnOnce() -> Result<T, ProviderError>,
    {
        self.load_via(
            self.disk.as_ref(),
            StoreKind::PermanentDisk,
            key,
            description,
            default,
            provider,
        )
    }

    /// Memoize `provider` behind the time-windowed disk store.
    ///
    /// The effective key embeds `window` (falling back to
    /// [`CacheConfig::default_window`]) and the current bucket, so the same
    /// base key under different windows occupies distinct slots, and a
    /// rolled-over bucket naturally reads as a miss.
    pub fn load_with_window<T, F>(
        &self,
        key: &str,
        description: &str,
        default: T,
        window: Option<Duration>,
        provider: F,
    ) -> T
    where
        T: CacheValue,
        F: FnOnce() -> Result<T, ProviderError>,
    {
        let window = window.unwrap_or(self.config.default_window);
        let slot = WindowedStore::slot_key(key, window);
        self.load_via(
            self.windowed.as_ref(),
            StoreKind::TimeWindowed,
            &slot,
            description,
            default,
            provider,
        )
    }

    fn load_via<S, T, F>(
        &self,
        store: &S,
        kind: StoreKind,
        key: &str,
        description: &str,
        default: T,
        provider: F,
    ) -> T
    where
        S: BackingStore,
        T: CacheValue,
        F: FnOnce() -> Result<T, ProviderError>,
    {
        let (hit, cached) = Self::lookup(store, kind, key, &default);
        if hit {
            self.observer.record(key, description, true);
            return cached;
        }
        self.observer.record(key, description, false);

        let value = match provider() {
            Ok(value) => value,
            Err(error) => {
                self.observer.provider_failed(key, description, &error);
                default
            }
        };
        store.put(key, to_raw(kind, &value));
        value
    }

    /// Ask the store for a cached value and coerce it.
    ///
    /// On a hit the raw value is decoded; a decode failure is downgraded to
    /// a miss so a value cached under one kind and read back as another
    /// recomputes instead of failing the read. On a miss the store's own
    /// fallback is returned, with the caller default substituted when that
    /// fallback is vacant. Vacancy is never consulted on a hit.
    fn lookup<S, T>(store: &S, kind: StoreKind, key: &str, default: &T) -> (bool, T)
    where
        S: BackingStore,
        T: CacheValue,
    {
        let (hit, raw) = store.get(key, &to_raw(kind, default));
        if hit {
            match decode_raw::<T>(&raw) {
                Ok(value) => return (true, value),
                Err(error) => {
                    tracing::warn!(key, error = %error, "cached value failed to decode, treating as miss");
                    return (false, default.clone());
                }
            }
        }
        let fallback = match decode_raw::<T>(&raw) {
            Ok(value) if !value.is_vacant() => value,
            _ => default.clone(),
        };
        (false, fallback)
    }
}

impl<M, D, W, O> Clone for CacheCoordinator<M, D, W, O>
where
    M: BackingStore,
    D: BackingStore,
    W: BackingStore,
    O: AccessObserver,
{
    fn clone(&self) -> Self {
        Self {
            memory: Arc::clone(&self.memory),
            disk: Arc::clone(&self.disk),
            windowed: Arc::clone(&self.windowed),
            observer: Arc::clone(&self.observer),
            config: self.config.clone(),
        }
    }
}

/// The raw representation a store kind carries: typed for memory, text for
/// anything disk-backed.
fn to_raw<T: CacheValue>(kind: StoreKind, value: &T) -> RawValue {
    match kind {
        StoreKind::Memory => RawValue::shared(value.clone()),
        StoreKind::PermanentDisk | StoreKind::TimeWindowed => RawValue::text(value.encode()),
    }
}
