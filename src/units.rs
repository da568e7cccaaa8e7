use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of rental layouts, each with a fixed desirability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Studio,
    OneBedOneBath,
    TwoBedOneBath,
    TwoBedTwoBath,
    ThreeBedTwoBath,
    ThreeBedThreeBath,
    FourBedTwoBath,
    FourBedThreeBath,
    FourBedFourBath,
    Basement,
    SharedHouse,
    SingleApartment,
}

struct UnitTypeEntry {
    unit: UnitType,
    code: &'static str,
    label: &'static str,
    score: f64,
}

// Adding a layout means adding a row here and an enum variant.
static CATALOG: [UnitTypeEntry; 12] = [
    UnitTypeEntry {
        unit: UnitType::Studio,
        code: "Studio",
        label: "Studio",
        score: 9.0,
    },
    UnitTypeEntry {
        unit: UnitType::OneBedOneBath,
        code: "1x1",
        label: "One Bed + One Bath",
        score: 10.0,
    },
    UnitTypeEntry {
        unit: UnitType::TwoBedOneBath,
        code: "2x1",
        label: "Two Bed + One Bath",
        score: 7.0,
    },
    UnitTypeEntry {
        unit: UnitType::TwoBedTwoBath,
        code: "2x2",
        label: "Two Bed + Two Bath",
        score: 8.0,
    },
    UnitTypeEntry {
        unit: UnitType::ThreeBedTwoBath,
        code: "3x2",
        label: "Three Bed + Two Bath",
        score: 6.0,
    },
    UnitTypeEntry {
        unit: UnitType::ThreeBedThreeBath,
        code: "3x3",
        label: "Three Bed + Three Bath",
        score: 7.0,
    },
    UnitTypeEntry {
        unit: UnitType::FourBedTwoBath,
        code: "4x2",
        label: "Four Bed + Two Bath",
        score: 4.0,
    },
    UnitTypeEntry {
        unit: UnitType::FourBedThreeBath,
        code: "4x3",
        label: "Four Bed + Three Bath",
        score: 5.5,
    },
    UnitTypeEntry {
        unit: UnitType::FourBedFourBath,
        code: "4x4",
        label: "Four Bed + Four Bath",
        score: 6.0,
    },
    UnitTypeEntry {
        unit: UnitType::Basement,
        code: "Basement",
        label: "Basement",
        score: 8.5,
    },
    UnitTypeEntry {
        unit: UnitType::SharedHouse,
        code: "Shared House",
        label: "Shared House",
        score: 7.0,
    },
    UnitTypeEntry {
        unit: UnitType::SingleApartment,
        code: "Single Apartment",
        label: "Single Apartment",
        score: 10.0,
    },
];

impl UnitType {
    /// Every variant, in catalog order
    pub fn all() -> impl Iterator<Item = UnitType> {
        CATALOG.iter().map(|entry| entry.unit)
    }

    /// Exact, case-sensitive lookup by short code ("Studio", "2x2", "Shared House", ...)
    pub fn resolve(name: &str) -> Result<UnitType, Error> {
        CATALOG
            .iter()
            .find(|entry| entry.code == name)
            .map(|entry| entry.unit)
            .ok_or_else(|| Error::UnknownPropertyType(name.to_string()))
    }

    fn entry(self) -> &'static UnitTypeEntry {
        // CATALOG lists every variant exactly once, in declaration order.
        &CATALOG[self as usize]
    }

    /// Desirability for a student renter, 0 to 10
    pub fn type_score(self) -> f64 {
        self.entry().score
    }

    /// Short code used for lookup and persistence
    pub fn code(self) -> &'static str {
        self.entry().code
    }

    /// Descriptive name, e.g. "Two Bed + Two Bath"
    pub fn label(self) -> &'static str {
        self.entry().label
    }
}

impl FromStr for UnitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::resolve(s)
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
