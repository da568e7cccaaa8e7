use crate::commute::{CommuteEstimator, TravelMode};
use crate::error::{Error, Result};
use crate::geocode::{Coordinates, Geocoder};
use crate::units::UnitType;
use crate::validation::{normalize_address, validate_rent, validate_zip};
use std::collections::BTreeMap;
use tracing::debug;

/// Raw input for a listing, before validation.
#[derive(Debug, Clone)]
pub struct NewListing<'a> {
    pub address: &'a str,
    pub monthly_rent: f64,
    pub zip_code: &'a str,
    pub utilities_included: bool,
    pub unit_type: &'a str,
    pub lease_term_months: u32,
    /// Miles to campus keyed by travel mode. Keys that are not modes are kept
    /// but ignored by the commute factor.
    pub distances: BTreeMap<String, f64>,
}

/// A validated rental listing.
///
/// Fields are private so every change goes through a validating setter.
/// The address and its coordinates are only ever replaced together.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalListing {
    address: String,
    coordinates: Option<Coordinates>,
    monthly_rent: f64,
    zip_code: String,
    utilities_included: bool,
    unit_type: UnitType,
    lease_term_months: u32,
    distances: BTreeMap<String, f64>,
}

impl RentalListing {
    /// Validate the input and geocode the address.
    pub fn create<G: Geocoder>(
        new: NewListing<'_>,
        estimator: &CommuteEstimator<G>,
    ) -> Result<Self> {
        let mut listing = Self::from_parts(new)?;
        listing.coordinates = Some(estimator.locate(&listing.address)?);
        debug!(address = %listing.address, "created listing");
        Ok(listing)
    }

    /// Validate the input without geocoding. Used for listings restored from
    /// storage, which carry no coordinates until [`RentalListing::locate`].
    pub fn from_parts(new: NewListing<'_>) -> Result<Self> {
        let address = normalize_address(new.address)?;
        let monthly_rent = validate_rent(new.monthly_rent)?;
        let zip_code = validate_zip(new.zip_code.trim())?.to_string();
        let unit_type = UnitType::resolve(new.unit_type)?;
        validate_distances(&new.distances)?;

        Ok(Self {
            address,
            coordinates: None,
            monthly_rent,
            zip_code,
            utilities_included: new.utilities_included,
            unit_type,
            lease_term_months: new.lease_term_months,
            distances: new.distances,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn monthly_rent(&self) -> f64 {
        self.monthly_rent
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn utilities_included(&self) -> bool {
        self.utilities_included
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn lease_term_months(&self) -> u32 {
        self.lease_term_months
    }

    pub fn distances(&self) -> &BTreeMap<String, f64> {
        &self.distances
    }

    pub fn set_rent(&mut self, rent: f64) -> Result<()> {
        self.monthly_rent = validate_rent(rent)?;
        Ok(())
    }

    pub fn set_zip_code(&mut self, zip_code: &str) -> Result<()> {
        self.zip_code = validate_zip(zip_code.trim())?.to_string();
        Ok(())
    }

    pub fn set_utilities_included(&mut self, included: bool) {
        self.utilities_included = included;
    }

    /// A copy of this listing at a new address with freshly geocoded
    /// coordinates. `self` is untouched whether or not this succeeds.
    ///
    /// Distances are caller-supplied and are carried over as they are;
    /// recompute them with [`CommuteEstimator::distances`] if they depend
    /// on the address.
    pub fn update_address<G: Geocoder>(
        &self,
        new_address: &str,
        estimator: &CommuteEstimator<G>,
    ) -> Result<RentalListing> {
        let address = normalize_address(new_address)?;
        let coordinates = estimator.locate(&address)?;
        Ok(RentalListing {
            address,
            coordinates: Some(coordinates),
            ..self.clone()
        })
    }

    /// Geocode the current address, e.g. after loading from storage.
    pub fn locate<G: Geocoder>(&self, estimator: &CommuteEstimator<G>) -> Result<RentalListing> {
        self.update_address(&self.address, estimator)
    }

    /// Replace the distance table, validating it first.
    pub fn with_distances(&self, distances: BTreeMap<String, f64>) -> Result<RentalListing> {
        validate_distances(&distances)?;
        Ok(RentalListing {
            distances,
            ..self.clone()
        })
    }
}

// Every value must be finite so it survives a save and load. Only mode keys
// must also be non-negative.
fn validate_distances(distances: &BTreeMap<String, f64>) -> Result<()> {
    for (key, &distance) in distances {
        let is_mode = key.parse::<TravelMode>().is_ok();
        if !distance.is_finite() || (is_mode && distance < 0.0) {
            return Err(Error::InvalidDistance {
                mode: key.clone(),
                distance,
            });
        }
    }
    Ok(())
}
