//! Access observer collaborator.
//!
//! The coordinator reports every load and every provider failure here.
//! Observers must never fail; they are fire-and-forget.

use cloak_core::ProviderError;

/// Notified on every load with the key, the caller-supplied description of
/// what is being looked up, and whether the cache answered.
pub trait AccessObserver: Send + Sync {
    /// One load happened. `hit` is true when the store answered.
    fn record(&self, key: &str, description: &str, hit: bool);

    /// The provider failed; the caller's default was substituted and cached.
    fn provider_failed(&self, key: &str, description: &str, error: &ProviderError);
}

/// Observer that reports through the `tracing` subscriber.
pub struct TracingObserver;

impl AccessObserver for TracingObserver {
    fn record(&self, key: &str, description: &str, hit: bool) {
        tracing::debug!(key, description, hit, "cache access");
    }

    fn provider_failed(&self, key: &str, description: &str, error: &ProviderError) {
        tracing::warn!(key, description, error = %error, "provider failed, caching default");
    }
}

/// Observer that discards everything. Useful in tests and benchmarks.
pub struct NoopObserver;

impl AccessObserver for NoopObserver {
    fn record(&self, _key: &str, _description: &str, _hit: bool) {}

    fn provider_failed(&self, _key: &str, _description: &str, _error: &ProviderError) {}
}
