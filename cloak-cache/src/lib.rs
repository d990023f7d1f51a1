//! Cache-aside coordination over interchangeable backing stores.
//!
//! This crate holds the moving parts of Cloak: the [`BackingStore`]
//! abstraction with its three concrete stores (process memory, permanent
//! disk, time-windowed disk), the [`AccessObserver`] collaborator, and the
//! [`CacheCoordinator`] that ties them together.
//!
//! # Design Philosophy
//!
//! The coordinator memoizes the result of an expensive or side-effecting
//! provider behind whichever store the caller picks. Two properties carry the
//! whole design:
//!
//! - **Compute once unless miss.** A hit never re-invokes the provider and
//!   never re-persists; the cached value is trusted verbatim.
//! - **Cache the failure.** A failing provider is logged, masked by the
//!   caller's default, and the default is persisted anyway, so an unstable
//!   provider is not hammered on every subsequent call.
//!
//! Stores and the observer are injected at construction; nothing in this
//! crate is a global.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cloak_cache::{CacheConfig, CacheCoordinator, DiskStore, MemoryStore,
//!                   TracingObserver, WindowedStore};
//!
//! let coordinator = CacheCoordinator::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(DiskStore::open("/data/cloak/permanent.json")?),
//!     Arc::new(WindowedStore::open("/data/cloak/windowed.json")?),
//!     Arc::new(TracingObserver),
//!     CacheConfig::default(),
//! );
//!
//! let device_id = coordinator.load_with_disk(
//!     "device_id",
//!     "TelephonyManager#getDeviceId",
//!     String::new(),
//!     || read_device_id(),
//! );
//! ```

mod config;
mod coordinator;
mod observer;
mod store;

pub use config::CacheConfig;
pub use coordinator::CacheCoordinator;
pub use observer::{AccessObserver, NoopObserver, TracingObserver};
pub use store::{BackingStore, DiskStore, MemoryStore, StoreKind, WindowedStore};
