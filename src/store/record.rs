use super::SavedListing;
use crate::error::{Error, Result};
use crate::listing::{NewListing, RentalListing};
use crate::units::UnitType;
use crate::validation::{parse_rent, validate_score};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const HEADERS: [&str; 9] = [
    "Address",
    "Rent",
    "ZIP",
    "Utilities Included",
    "Lease Term",
    "Property Type",
    "Type Score",
    "Overall Score",
    "Distances",
];

/// One CSV row as text. Every field is parsed by hand so a bad value can be
/// reported against its column.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingRecord {
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "Rent")]
    rent: String,
    #[serde(rename = "ZIP")]
    zip: String,
    #[serde(rename = "Utilities Included")]
    utilities_included: String,
    #[serde(rename = "Lease Term")]
    lease_term: String,
    #[serde(rename = "Property Type")]
    property_type: String,
    #[serde(rename = "Type Score")]
    type_score: String,
    #[serde(rename = "Overall Score")]
    overall_score: String,
    #[serde(rename = "Distances")]
    distances: String,
}

pub(crate) fn to_row(saved: &SavedListing) -> Result<[String; 9]> {
    let listing = &saved.listing;
    let distances = serde_json::to_string(listing.distances()).map_err(|e| {
        Error::validation("distances", format!("cannot be serialized: {}", e))
    })?;
    Ok([
        listing.address().to_string(),
        listing.monthly_rent().to_string(),
        listing.zip_code().to_string(),
        listing.utilities_included().to_string(),
        listing.lease_term_months().to_string(),
        listing.unit_type().code().to_string(),
        listing.unit_type().type_score().to_string(),
        saved.overall_score.to_string(),
        distances,
    ])
}

impl ListingRecord {
    /// Parse into a saved listing. `row` is the 1-based data row, for errors.
    pub(crate) fn parse(self, row: usize) -> Result<SavedListing> {
        let corrupt = |field: &'static str, reason: String| Error::PersistenceCorruption {
            row,
            field,
            reason,
        };

        let rent = parse_rent(&self.rent).map_err(|e| corrupt("Rent", e.to_string()))?;
        let utilities_included = parse_bool(&self.utilities_included).ok_or_else(|| {
            corrupt(
                "Utilities Included",
                format!("'{}' is not yes/no", self.utilities_included),
            )
        })?;
        let lease_term_months: u32 = self
            .lease_term
            .trim()
            .parse()
            .map_err(|_| {
                corrupt(
                    "Lease Term",
                    format!("'{}' is not a number of months", self.lease_term),
                )
            })?;

        let unit_type = UnitType::resolve(self.property_type.trim())
            .map_err(|e| corrupt("Property Type", e.to_string()))?;
        let type_score = parse_number(&self.type_score)
            .ok_or_else(|| corrupt("Type Score", format!("'{}' is not a number", self.type_score)))
            .and_then(|s| validate_score(s).map_err(|e| corrupt("Type Score", e.to_string())))?;
        if type_score != unit_type.type_score() {
            return Err(corrupt(
                "Type Score",
                format!(
                    "{} does not match {} ({})",
                    type_score,
                    unit_type.code(),
                    unit_type.type_score()
                ),
            ));
        }

        let overall_score = parse_number(&self.overall_score).ok_or_else(|| {
            corrupt("Overall Score", format!("'{}' is not a number", self.overall_score))
        })?;

        let distances: BTreeMap<String, f64> =
            serde_json::from_str(&self.distances).map_err(|e| {
                corrupt(
                    "Distances",
                    format!("malformed distances '{}': {}", self.distances, e),
                )
            })?;

        let listing = RentalListing::from_parts(NewListing {
            address: &self.address,
            monthly_rent: rent,
            zip_code: &self.zip,
            utilities_included,
            unit_type: unit_type.code(),
            lease_term_months,
            distances,
        })
        .map_err(|e| {
            let field = match &e {
                Error::InvalidDistance { .. } => "Distances",
                Error::Validation { field: "zip code", .. } => "ZIP",
                _ => "Address",
            };
            corrupt(field, e.to_string())
        })?;

        Ok(SavedListing {
            listing,
            overall_score,
        })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}
