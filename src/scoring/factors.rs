use crate::commute::{commute_time_minutes, TravelMode};
use crate::error::{Error, Result};
use crate::validation::round2;
use std::collections::BTreeMap;

pub const MONTH_TO_MONTH: &str = "Month-to-Month";
pub const SIX_MONTHS: &str = "6 Months";
pub const TWELVE_MONTHS: &str = "12 Months";

/// Price value of a rent against a reference average.
///
/// Ratios at or below 0.5 score 10 and ratios at or above 3.0 score 0.
/// Between those the score is `10 * (1.5 - ratio)`, which goes negative
/// once the ratio passes 1.5. That region is returned as computed.
pub fn price_score(rent: f64, reference_average_rent: f64) -> Result<f64> {
    if !(rent.is_finite() && rent > 0.0) {
        return Err(Error::InvalidInput {
            factor: "price",
            reason: format!("rent must be greater than zero (got {})", rent),
        });
    }
    if !(reference_average_rent.is_finite() && reference_average_rent > 0.0) {
        return Err(Error::InvalidInput {
            factor: "price",
            reason: format!(
                "reference average rent must be greater than zero (got {})",
                reference_average_rent
            ),
        });
    }

    let ratio = rent / reference_average_rent;
    let score = if ratio <= 0.5 {
        10.0
    } else if ratio >= 3.0 {
        0.0
    } else {
        round2(10.0 * (1.5 - ratio))
    };
    Ok(score)
}

/// Lease label for a term in months. Anything other than 6 or 12 is
/// treated as month-to-month.
pub fn lease_label(lease_term_months: u32) -> &'static str {
    match lease_term_months {
        6 => SIX_MONTHS,
        12 => TWELVE_MONTHS,
        _ => MONTH_TO_MONTH,
    }
}

/// Months for a lease label, the inverse of [`lease_label`].
pub fn lease_months(lease_term_label: &str) -> Result<u32> {
    match lease_term_label {
        MONTH_TO_MONTH => Ok(1),
        SIX_MONTHS => Ok(6),
        TWELVE_MONTHS => Ok(12),
        other => Err(Error::UnknownLeaseTerm(other.to_string())),
    }
}

pub fn flexibility_score(lease_term_label: &str) -> Result<u8> {
    match lease_term_label {
        MONTH_TO_MONTH => Ok(10),
        SIX_MONTHS => Ok(7),
        TWELVE_MONTHS => Ok(4),
        other => Err(Error::UnknownLeaseTerm(other.to_string())),
    }
}

/// Sub-score for a single commute time: full marks up to 10 minutes,
/// nothing from 60 minutes, linear in between.
pub fn commute_time_score(time_minutes: f64) -> f64 {
    if time_minutes <= 10.0 {
        10.0
    } else if time_minutes >= 60.0 {
        0.0
    } else {
        round2(10.0 * (1.0 - (time_minutes - 10.0) / 50.0))
    }
}

/// Mean commute sub-score over every recognized mode in `distances`.
///
/// Keys that are not travel modes (e.g. a named destination) are skipped.
pub fn commute_score(distances: &BTreeMap<String, f64>) -> Result<f64> {
    let mut total = 0.0;
    let mut count = 0usize;

    for (key, &distance) in distances {
        let Ok(mode) = key.parse::<TravelMode>() else {
            continue;
        };
        let time = commute_time_minutes(distance, mode).map_err(|_| Error::InvalidDistance {
            mode: key.clone(),
            distance,
        })?;
        total += commute_time_score(time);
        count += 1;
    }

    if count == 0 {
        return Err(Error::NoValidModes);
    }
    Ok(total / count as f64)
}
