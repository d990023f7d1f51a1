//! Raw value representation and the typed value codec.
//!
//! Backing stores exchange [`RawValue`]s: disk-backed stores only ever hold
//! text, while the memory store holds the typed value itself behind a shared
//! pointer. The [`CacheValue`] trait is the codec between a caller's typed
//! value and that raw representation, with the per-kind conversion resolved
//! at compile time instead of a runtime type switch.
//!
//! # Kind coverage
//!
//! Numeric kinds (`i8`/`i16`/`i32`/`i64`, `f32`/`f64`) and `String` round-trip
//! through text. Collections, paths with non-UTF-8 content, and [`GeoPoint`]
//! are opaque kinds: they stringify for display but do not decode, so they
//! effectively live only in the memory store. This mirrors the upstream
//! system's behavior and is intentionally not papered over.
//!
//! [`GeoPoint`]: crate::GeoPoint

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::CodecError;

/// The raw representation a backing store holds for one key.
#[derive(Clone)]
pub enum RawValue {
    /// Stringified value, the only form disk-backed stores accept.
    Text(String),
    /// Typed value behind a shared pointer, held as-is by the memory store.
    Shared(Arc<dyn Any + Send + Sync>),
}

impl RawValue {
    /// Wrap a string as a textual raw value.
    pub fn text(value: impl Into<String>) -> Self {
        RawValue::Text(value.into())
    }

    /// Wrap a typed value as a shared raw value.
    pub fn shared<T: Send + Sync + 'static>(value: T) -> Self {
        RawValue::Shared(Arc::new(value))
    }

    /// The textual content, if this raw value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            RawValue::Shared(_) => None,
        }
    }
}

impl fmt::Debug for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            RawValue::Shared(_) => f.write_str("Shared(..)"),
        }
    }
}

/// A value that can pass through the cache.
///
/// `encode` produces the stringified form persisted by disk-backed stores;
/// `decode` is the kind-directed parse back. `is_vacant` is the emptiness
/// predicate consulted by the coordinator **only on a cache miss**, to decide
/// whether a store's own fallback should be replaced by the caller's default.
/// A cache hit is always trusted verbatim, vacant or not.
///
/// Implementations must be cheap to clone; the coordinator clones defaults
/// and decoded values freely.
pub trait CacheValue: Clone + Send + Sync + 'static {
    /// Stringify for disk-backed storage.
    fn encode(&self) -> String;

    /// Parse the stringified form back into a typed value.
    fn decode(raw: &str) -> Result<Self, CodecError>;

    /// Whether this value counts as "nothing there" for miss-side default
    /// substitution. Defaults to `false`; numeric kinds never override it.
    fn is_vacant(&self) -> bool {
        false
    }
}

/// Turn a raw store value back into a typed value.
///
/// Text goes through [`CacheValue::decode`]; a shared value is downcast
/// directly, which is only valid when the stored value was put there as the
/// same type (the memory-store identity path).
pub fn decode_raw<T: CacheValue>(raw: &RawValue) -> Result<T, CodecError> {
    match raw {
        RawValue::Text(s) => T::decode(s),
        RawValue::Shared(v) => v
            .downcast_ref::<T>()
            .cloned()
            .ok_or(CodecError::WrongType {
                expected: std::any::type_name::<T>(),
            }),
    }
}

macro_rules! numeric_cache_value {
    ($($ty:ty),*) => {
        $(
            impl CacheValue for $ty {
                fn encode(&self) -> String {
                    self.to_string()
                }

                fn decode(raw: &str) -> Result<Self, CodecError> {
                    raw.parse::<$ty>().map_err(|_| CodecError::Parse {
                        kind: stringify!($ty),
                        raw: raw.to_string(),
                    })
                }
            }
        )*
    };
}

numeric_cache_value!(i8, i16, i32, i64, f32, f64);

impl CacheValue for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Result<Self, CodecError> {
        Ok(raw.to_string())
    }

    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

impl CacheValue for Vec<String> {
    fn encode(&self) -> String {
        format!("{:?}", self)
    }

    fn decode(_raw: &str) -> Result<Self, CodecError> {
        Err(CodecError::Unsupported { kind: "Vec<String>" })
    }

    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

impl CacheValue for PathBuf {
    fn encode(&self) -> String {
        self.display().to_string()
    }

    fn decode(raw: &str) -> Result<Self, CodecError> {
        Ok(PathBuf::from(raw))
    }

    /// A path pointing at the filesystem root carries no information.
    fn is_vacant(&self) -> bool {
        self.as_path() == Path::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_int_encode_decode_representative_values() {
        for value in [-1i32, 0, i32::MAX] {
            assert_eq!(i32::decode(&value.encode()).unwrap(), value);
        }
        assert_eq!(i8::decode("-128").unwrap(), i8::MIN);
        assert_eq!(i16::decode("32767").unwrap(), i16::MAX);
        assert_eq!(i64::decode(&i64::MIN.encode()).unwrap(), i64::MIN);
    }

    #[test]
    fn test_float_encode_decode_representative_values() {
        for value in [0.0f64, -3.14] {
            assert_eq!(f64::decode(&value.encode()).unwrap(), value);
        }
        assert_eq!(f32::decode("2.5").unwrap(), 2.5f32);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = i32::decode("abc").unwrap_err();
        assert_eq!(
            err,
            CodecError::Parse {
                kind: "i32",
                raw: "abc".to_string()
            }
        );
        assert!(f64::decode("").is_err());
        assert!(i8::decode("300").is_err());
    }

    #[test]
    fn test_string_identity_and_vacancy() {
        assert_eq!(String::decode("hello").unwrap(), "hello");
        assert!("".to_string().is_vacant());
        assert!(!"x".to_string().is_vacant());
    }

    #[test]
    fn test_collection_is_opaque() {
        let list = vec!["a".to_string(), "b".to_string()];
        assert_eq!(list.encode(), "[\"a\", \"b\"]");
        assert!(matches!(
            Vec::<String>::decode(&list.encode()),
            Err(CodecError::Unsupported { .. })
        ));
        assert!(Vec::<String>::new().is_vacant());
        assert!(!list.is_vacant());
    }

    #[test]
    fn test_path_vacancy() {
        assert!(PathBuf::from("/").is_vacant());
        assert!(!PathBuf::from("/data/app").is_vacant());
        assert_eq!(
            PathBuf::decode("/data/app").unwrap(),
            PathBuf::from("/data/app")
        );
    }

    #[test]
    fn test_numbers_are_never_vacant() {
        assert!(!0i32.is_vacant());
        assert!(!0.0f64.is_vacant());
    }

    #[test]
    fn test_decode_raw_text_and_shared() {
        let from_text: i64 = decode_raw(&RawValue::text("42")).unwrap();
        assert_eq!(from_text, 42);

        let from_shared: i64 = decode_raw(&RawValue::shared(7i64)).unwrap();
        assert_eq!(from_shared, 7);
    }

    #[test]
    fn test_decode_raw_shared_wrong_type() {
        let raw = RawValue::shared("not a number".to_string());
        let err = decode_raw::<i32>(&raw).unwrap_err();
        assert!(matches!(err, CodecError::WrongType { .. }));
    }

    #[test]
    fn test_raw_value_debug_hides_shared_contents() {
        assert_eq!(format!("{:?}", RawValue::text("abc")), "Text(\"abc\")");
        assert_eq!(format!("{:?}", RawValue::shared(1i32)), "Shared(..)");
    }

    proptest! {
        #[test]
        fn roundtrip_i8(x in any::<i8>()) {
            prop_assert_eq!(i8::decode(&x.encode()).unwrap(), x);
        }

        #[test]
        fn roundtrip_i16(x in any::<i16>()) {
            prop_assert_eq!(i16::decode(&x.encode()).unwrap(), x);
        }

        #[test]
        fn roundtrip_i32(x in any::<i32>()) {
            prop_assert_eq!(i32::decode(&x.encode()).unwrap(), x);
        }

        #[test]
        fn roundtrip_i64(x in any::<i64>()) {
            prop_assert_eq!(i64::decode(&x.encode()).unwrap(), x);
        }

        #[test]
        fn roundtrip_f32(x in -3.0e38f32..3.0e38f32) {
            prop_assert_eq!(f32::decode(&x.encode()).unwrap(), x);
        }

        #[test]
        fn roundtrip_f64(x in -1.0e300f64..1.0e300f64) {
            prop_assert_eq!(f64::decode(&x.encode()).unwrap(), x);
        }
    }
}
