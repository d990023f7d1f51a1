//! Geographic coordinate value.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::value::CacheValue;

/// A latitude/longitude pair as reported by a location lookup.
///
/// A coordinate of exactly zero on either axis is treated as "no fix yet"
/// rather than a real position, so such points are vacant for cache
/// purposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl CacheValue for GeoPoint {
    fn encode(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Geo points are an opaque kind: they only live in the memory store.
    fn decode(_raw: &str) -> Result<Self, CodecError> {
        Err(CodecError::Unsupported { kind: "GeoPoint" })
    }

    fn is_vacant(&self) -> bool {
        self.latitude == 0.0 || self.longitude == 0.0
    }
}
