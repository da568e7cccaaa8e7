use crate::geocode::nominatim::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::geocode::DEFAULT_TIMEOUT;
use crate::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CAMPUS_ADDRESS: &str = "7649 Library Ln, College Park, MD 20742";

/// Example YAML:
/// ```yaml
/// campus_address: "7649 Library Ln, College Park, MD 20742"
/// scoring:
///   average_rent: 1500
///   modes: [walk, drive]
/// geocoder:
///   timeout: 10s
///   cache: true
/// storage_path: ~/rentals.csv
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub campus_address: Option<String>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub geocoder: Option<GeocoderConfig>,

    /// CSV file for saved listings (default: ~/.config/rent-rank/saved_rentals.csv)
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeocoderConfig {
    /// Nominatim-compatible search endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout as a humantime string ("10s", "1m 30s")
    #[serde(default)]
    pub timeout: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    /// Keep successful lookups in the on-disk cache (default: true)
    #[serde(default)]
    pub cache: Option<bool>,
}

impl Config {
    pub fn campus_address(&self) -> &str {
        self.campus_address.as_deref().unwrap_or(DEFAULT_CAMPUS_ADDRESS)
    }

    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn geocoder(&self) -> GeocoderConfig {
        self.geocoder.clone().unwrap_or_default()
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(crate::store::get_store_path)
    }
}

impl GeocoderConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.unwrap_or(true)
    }

    /// Parsed timeout. Falls back to the default when unset or unparseable;
    /// `validate_config` reports the latter.
    pub fn timeout(&self) -> Duration {
        self.timeout
            .as_deref()
            .and_then(|t| humantime::parse_duration(t).ok())
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}
