//! Offline test doubles.

use crate::geocode::{Coordinates, GeocodeError, Geocoder};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::time::Duration;

/// Geocoder backed by a lookup table. Unknown addresses are `NotFound`;
/// addresses registered with [`TableGeocoder::failing`] time out.
#[derive(Default)]
pub struct TableGeocoder {
    table: RefCell<HashMap<String, Coordinates>>,
    timeouts: RefCell<Vec<String>>,
    calls: Cell<usize>,
}

impl TableGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, address: &str, latitude: f64, longitude: f64) -> Self {
        self.set(address, latitude, longitude);
        self
    }

    pub fn failing(self, address: &str) -> Self {
        self.timeouts.borrow_mut().push(address.to_string());
        self
    }

    /// Move an address, as if the underlying map data changed.
    pub fn set(&self, address: &str, latitude: f64, longitude: f64) {
        self.table
            .borrow_mut()
            .insert(address.to_string(), Coordinates::new(latitude, longitude));
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, address: &str, timeout: Duration) -> Result<Coordinates, GeocodeError> {
        self.calls.set(self.calls.get() + 1);
        if self.timeouts.borrow().iter().any(|a| a == address) {
            return Err(GeocodeError::Timeout(timeout));
        }
        self.table
            .borrow()
            .get(address)
            .copied()
            .ok_or(GeocodeError::NotFound)
    }
}
