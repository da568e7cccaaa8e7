pub mod cache;
pub mod nominatim;

pub use cache::{clear_cache, get_cache_path, CachingGeocoder};
pub use nominatim::NominatimGeocoder;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request geocoding timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A resolved latitude/longitude pair.
///
/// Only geocoders produce these; the rest of the crate treats them as
/// derived data owned by whoever requested the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub(crate) fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The service answered but matched nothing.
    #[error("address not found")]
    NotFound,

    #[error("request timed out after {}", humantime::format_duration(*.0))]
    Timeout(Duration),

    #[error("geocoding service error: {0}")]
    Service(String),
}

/// Resolves a normalized address to coordinates.
///
/// Implementations block for at most `timeout` and never retry.
pub trait Geocoder {
    fn geocode(&self, address: &str, timeout: Duration) -> Result<Coordinates, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str, timeout: Duration) -> Result<Coordinates, GeocodeError> {
        (**self).geocode(address, timeout)
    }
}
