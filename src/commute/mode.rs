use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walk,
    Bike,
    Drive,
    Bus,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Walk,
        TravelMode::Bike,
        TravelMode::Drive,
        TravelMode::Bus,
    ];

    /// Fixed average speed in miles per hour
    pub fn speed_mph(self) -> f64 {
        match self {
            TravelMode::Walk => 3.0,
            TravelMode::Bike => 10.0,
            TravelMode::Drive => 25.0,
            TravelMode::Bus => 15.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walk => "walk",
            TravelMode::Bike => "bike",
            TravelMode::Drive => "drive",
            TravelMode::Bus => "bus",
        }
    }

    /// Capitalized name for display ("Walk").
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Walk => "Walk",
            TravelMode::Bike => "Bike",
            TravelMode::Drive => "Drive",
            TravelMode::Bus => "Bus",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidMode(s.to_string()))
    }
}
