use super::{commute_time_minutes, great_circle_miles, TravelMode};
use crate::error::{Error, Result};
use crate::geocode::{Coordinates, Geocoder};
use crate::validation::normalize_address;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Distance and travel time between two addresses for one mode.
///
/// Distance depends only on the endpoints; time is derived from distance
/// and mode, so [`CommuteEstimate::set_mode`] never touches the distance.
#[derive(Debug, Clone, PartialEq)]
pub struct CommuteEstimate {
    start_address: String,
    end_address: String,
    mode: TravelMode,
    distance_miles: f64,
    time_minutes: f64,
}

impl CommuteEstimate {
    /// Rebuild an estimate from previously recorded values.
    ///
    /// Addresses are normalized and the distance is checked again, since a
    /// restored snapshot may have been edited or corrupted.
    pub fn restore(
        start_address: &str,
        end_address: &str,
        mode: TravelMode,
        distance_miles: f64,
    ) -> Result<Self> {
        Ok(Self {
            start_address: normalize_address(start_address)?,
            end_address: normalize_address(end_address)?,
            mode,
            time_minutes: commute_time_minutes(distance_miles, mode)?,
            distance_miles,
        })
    }

    pub fn start_address(&self) -> &str {
        &self.start_address
    }

    pub fn end_address(&self) -> &str {
        &self.end_address
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn distance_miles(&self) -> f64 {
        self.distance_miles
    }

    pub fn time_minutes(&self) -> f64 {
        self.time_minutes
    }

    /// Switch travel mode, recomputing only the time.
    pub fn set_mode(&mut self, mode: &str) -> Result<()> {
        let mode: TravelMode = mode.parse()?;
        self.time_minutes = commute_time_minutes(self.distance_miles, mode)?;
        self.mode = mode;
        Ok(())
    }
}

impl fmt::Display for CommuteEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} commute from '{}' -> '{}': {} miles, {} min",
            self.mode.label(),
            self.start_address,
            self.end_address,
            self.distance_miles,
            self.time_minutes
        )
    }
}

/// Produces [`CommuteEstimate`]s by geocoding both endpoints.
///
/// Every call geocodes afresh; wrap the geocoder in a
/// [`CachingGeocoder`](crate::geocode::CachingGeocoder) to memoize.
pub struct CommuteEstimator<G> {
    geocoder: G,
    timeout: Duration,
}

impl<G: Geocoder> CommuteEstimator<G> {
    pub fn new(geocoder: G, timeout: Duration) -> Self {
        Self { geocoder, timeout }
    }

    /// Geocode an already normalized address.
    pub fn locate(&self, address: &str) -> Result<Coordinates> {
        self.geocoder
            .geocode(address, self.timeout)
            .map_err(|source| Error::GeocodingFailure {
                address: address.to_string(),
                source,
            })
    }

    pub fn estimate(
        &self,
        start_address: &str,
        end_address: &str,
        mode: &str,
    ) -> Result<CommuteEstimate> {
        let start_address = normalize_address(start_address)?;
        let end_address = normalize_address(end_address)?;
        let mode: TravelMode = mode.parse()?;

        let distance_miles = self.distance_between(&start_address, &end_address)?;
        let time_minutes = commute_time_minutes(distance_miles, mode)?;
        debug!(
            start = %start_address,
            end = %end_address,
            %mode,
            distance_miles,
            time_minutes,
            "estimated commute"
        );

        Ok(CommuteEstimate {
            start_address,
            end_address,
            mode,
            distance_miles,
            time_minutes,
        })
    }

    /// Re-derive distance and time from the estimate's endpoints.
    ///
    /// On failure the estimate is left exactly as it was.
    pub fn refresh(&self, estimate: &mut CommuteEstimate) -> Result<()> {
        let distance_miles = self.distance_between(&estimate.start_address, &estimate.end_address)?;
        let time_minutes = commute_time_minutes(distance_miles, estimate.mode)?;
        estimate.distance_miles = distance_miles;
        estimate.time_minutes = time_minutes;
        Ok(())
    }

    /// Distances from `address` to `destination`, keyed by mode name, in
    /// the shape a listing expects. The distance is the same for every mode.
    pub fn distances(
        &self,
        address: &str,
        destination: &str,
        modes: &[TravelMode],
    ) -> Result<BTreeMap<String, f64>> {
        let address = normalize_address(address)?;
        let destination = normalize_address(destination)?;
        let miles = self.distance_between(&address, &destination)?;
        Ok(modes
            .iter()
            .map(|mode| (mode.as_str().to_string(), miles))
            .collect())
    }

    fn distance_between(&self, start: &str, end: &str) -> Result<f64> {
        let from = self.locate(start)?;
        let to = self.locate(end)?;
        let miles = great_circle_miles(&from, &to);
        if !miles.is_finite() || miles < 0.0 {
            return Err(Error::InvalidDistance {
                mode: "any".to_string(),
                distance: miles,
            });
        }
        Ok(miles)
    }
}
