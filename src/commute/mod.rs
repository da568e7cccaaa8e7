pub mod estimate;
pub mod mode;

pub use estimate::{CommuteEstimate, CommuteEstimator};
pub use mode::TravelMode;

use crate::error::{Error, Result};
use crate::geocode::Coordinates;
use crate::validation::round2;
use geo::{Distance, Haversine, Point};

const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance between two points in miles, rounded to 2 places.
pub fn great_circle_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let a = Point::new(from.longitude(), from.latitude());
    let b = Point::new(to.longitude(), to.latitude());
    round2(Haversine.distance(a, b) / METERS_PER_MILE)
}

/// Travel time in minutes for `distance_miles` at the mode's average speed.
pub fn commute_time_minutes(distance_miles: f64, mode: TravelMode) -> Result<f64> {
    if !distance_miles.is_finite() || distance_miles < 0.0 {
        return Err(Error::InvalidDistance {
            mode: mode.to_string(),
            distance: distance_miles,
        });
    }
    Ok(round2(distance_miles / mode.speed_mph() * 60.0))
}
