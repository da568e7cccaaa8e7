mod schema;

pub use schema::{Config, GeocoderConfig, DEFAULT_CAMPUS_ADDRESS};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/rent-rank/)
///
/// Falls back to a relative `.config/rent-rank` when no home directory can
/// be determined.
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("rent-rank")
}

/// Get the default config file path (~/.config/rent-rank/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/rent-rank/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error; built-in defaults apply.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default = get_config_path();
            if !default.exists() {
                tracing::debug!(path = %default.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            default
        }
    };

    parse_config_file(&config_path)
}

fn parse_config_file(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref campus) = config.campus_address {
        if campus.trim().is_empty() {
            errors.push("campus_address: cannot be empty".to_string());
        }
    }

    if let Some(ref scoring) = config.scoring {
        if let Err(scoring_errors) = crate::scoring::validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }

    if let Some(ref geocoder) = config.geocoder {
        if let Some(ref url) = geocoder.base_url {
            if url.trim().is_empty() {
                errors.push("geocoder.base_url: cannot be empty".to_string());
            }
        }
        if let Some(ref timeout) = geocoder.timeout {
            match humantime::parse_duration(timeout) {
                Ok(d) if d.is_zero() => {
                    errors.push("geocoder.timeout: must be greater than zero".to_string());
                }
                Ok(_) => {}
                Err(e) => errors.push(format!(
                    "geocoder.timeout: invalid duration '{}': {}",
                    timeout, e
                )),
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
