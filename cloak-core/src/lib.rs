//! Cloak Core - Value Types and Codec
//!
//! Pure data types with no I/O. All other crates depend on this.
//! This crate contains the raw value representation exchanged with backing
//! stores, the typed value codec, the per-kind vacancy predicate, and the
//! error taxonomy.

mod error;
mod geo;
mod value;

pub use error::{CloakError, CloakResult, CodecError, ProviderError, StoreError};
pub use geo::GeoPoint;
pub use value::{decode_raw, CacheValue, RawValue};
