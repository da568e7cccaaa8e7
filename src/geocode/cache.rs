use super::{Coordinates, GeocodeError, Geocoder};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Get the platform-appropriate cache directory for geocoded addresses
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("rent-rank/geocode-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/rent-rank/geocode-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Clear the on-disk geocode cache
pub fn clear_cache() -> Result<()> {
    let cache_path = get_cache_path();
    match std::fs::remove_dir_all(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove geocode cache directory"),
    }
}

/// Memoizing wrapper around another geocoder.
///
/// Geocoding a fixed address is idempotent, so successful lookups are kept
/// in memory and, when a disk path is set, in a cacache store shared across
/// runs. Failures are never cached.
pub struct CachingGeocoder<G> {
    inner: G,
    memory: RefCell<HashMap<String, Coordinates>>,
    disk_path: Option<PathBuf>,
}

impl<G: Geocoder> CachingGeocoder<G> {
    /// In-memory cache only.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            memory: RefCell::new(HashMap::new()),
            disk_path: None,
        }
    }

    /// In-memory cache backed by a cacache directory.
    pub fn with_disk(inner: G, disk_path: PathBuf) -> Self {
        Self {
            disk_path: Some(disk_path),
            ..Self::new(inner)
        }
    }

    /// Number of addresses currently memoized in this process
    pub fn cached_len(&self) -> usize {
        self.memory.borrow().len()
    }

    fn load_from_disk(&self, key: &str) -> Option<Coordinates> {
        let path = self.disk_path.as_ref()?;
        let bytes = cacache::read_sync(path, key).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn write_to_disk(&self, key: &str, coords: &Coordinates) {
        let Some(path) = self.disk_path.as_ref() else {
            return;
        };
        let written = serde_json::to_vec(coords)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| cacache::write_sync(path, key, bytes).map_err(anyhow::Error::from));
        if let Err(e) = written {
            warn!(address = key, error = %e, "failed to write geocode cache entry");
        }
    }
}

fn cache_key(address: &str) -> String {
    format!("geocode:{}", address)
}

impl<G: Geocoder> Geocoder for CachingGeocoder<G> {
    fn geocode(&self, address: &str, timeout: Duration) -> Result<Coordinates, GeocodeError> {
        if let Some(coords) = self.memory.borrow().get(address) {
            debug!(address, "geocode cache hit (memory)");
            return Ok(*coords);
        }

        let key = cache_key(address);
        if let Some(coords) = self.load_from_disk(&key) {
            debug!(address, "geocode cache hit (disk)");
            self.memory.borrow_mut().insert(address.to_string(), coords);
            return Ok(coords);
        }

        let coords = self.inner.geocode(address, timeout)?;
        self.memory.borrow_mut().insert(address.to_string(), coords);
        self.write_to_disk(&key, &coords);
        Ok(coords)
    }
}
