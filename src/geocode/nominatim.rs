//! Nominatim / OpenStreetMap geocoder client.
//!
//! The public instance allows one request per second; this client issues
//! exactly one request per lookup and leaves pacing to the caller.

use super::{Coordinates, GeocodeError, Geocoder};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = concat!("rent-rank/", env!("CARGO_PKG_VERSION"));

pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to create geocoding HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str, timeout: Duration) -> Result<Coordinates, GeocodeError> {
        debug!(address, base_url = %self.base_url, "geocoding address");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .timeout(timeout)
            .send()
            .map_err(|e| classify(e, timeout))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodeError::Service(format!("HTTP {}", status)));
        }

        let body: serde_json::Value = resp.json().map_err(|e| classify(e, timeout))?;
        parse_response(&body)
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> GeocodeError {
    if err.is_timeout() {
        GeocodeError::Timeout(timeout)
    } else {
        GeocodeError::Service(err.to_string())
    }
}

fn parse_response(body: &serde_json::Value) -> Result<Coordinates, GeocodeError> {
    let results = body
        .as_array()
        .ok_or_else(|| GeocodeError::Service("Nominatim response is not an array".to_string()))?;

    let Some(first) = results.first() else {
        return Err(GeocodeError::NotFound);
    };

    let lat = parse_degrees(&first["lat"])
        .ok_or_else(|| GeocodeError::Service("Missing lat in Nominatim response".to_string()))?;
    let lon = parse_degrees(&first["lon"])
        .ok_or_else(|| GeocodeError::Service("Missing lon in Nominatim response".to_string()))?;

    Ok(Coordinates::new(lat, lon))
}

// Nominatim returns coordinates as strings; some compatible servers use numbers.
fn parse_degrees(value: &serde_json::Value) -> Option<f64> {
    value
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_first_result() {
        let body = serde_json::json!([
            {
                "lat": "38.9869",
                "lon": "-76.9426",
                "display_name": "McKeldin Library, College Park, MD"
            },
            { "lat": "0", "lon": "0" }
        ]);
        let coords = parse_response(&body).unwrap();
        assert!((coords.latitude() - 38.9869).abs() < 1e-6);
        assert!((coords.longitude() - -76.9426).abs() < 1e-6);
    }

    #[test]
    fn test_numeric_coordinates() {
        let body = serde_json::json!([{ "lat": 38.99, "lon": -76.93 }]);
        let coords = parse_response(&body).unwrap();
        assert_eq!(coords.latitude(), 38.99);
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let body = serde_json::json!([]);
        assert!(matches!(parse_response(&body), Err(GeocodeError::NotFound)));
    }

    #[test]
    fn test_malformed_body_is_service_error() {
        let body = serde_json::json!({ "error": "Unable to geocode" });
        assert!(matches!(parse_response(&body), Err(GeocodeError::Service(_))));

        let body = serde_json::json!([{ "lat": "north" }]);
        assert!(matches!(parse_response(&body), Err(GeocodeError::Service(_))));
    }
}
