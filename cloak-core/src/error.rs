//! Error types for Cloak operations

use std::path::PathBuf;
use thiserror::Error;

/// Codec errors: a stored raw value could not be turned back into the
/// requested typed value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("cannot parse {raw:?} as {kind}")]
    Parse { kind: &'static str, raw: String },

    #[error("cached value is not a {expected}")]
    WrongType { expected: &'static str },

    #[error("{kind} values do not round-trip through text storage")]
    Unsupported { kind: &'static str },
}

/// Disk store errors, raised when opening or loading a cache file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read cache file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache file {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

/// Master error type for all Cloak errors.
#[derive(Debug, Error)]
pub enum CloakError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for Cloak operations.
pub type CloakResult<T> = Result<T, CloakError>;

/// Error produced by a value provider.
///
/// Opaque to the coordinator: a failing provider is reported to the access
/// observer and masked by the caller's default, never propagated.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

// =============================================================================
// TESTS
// =============================================================================
