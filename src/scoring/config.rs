use serde::{Deserialize, Serialize};

/// Reference average monthly rent used by the price factor.
pub const DEFAULT_AVERAGE_RENT: f64 = 1500.0;

/// Fixed factor weights. They add up to 1.1, so a listing that scores
/// well everywhere can land above 10.
pub const PRICE_WEIGHT: f64 = 0.5;
pub const FLEXIBILITY_WEIGHT: f64 = 0.2;
pub const COMMUTE_WEIGHT: f64 = 0.3;
pub const TYPE_WEIGHT: f64 = 0.1;

/// Scoring configuration.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   average_rent: 1500
///   modes: [walk, bike, drive]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Reference average rent for the price factor (default: 1500.0)
    #[serde(default)]
    pub average_rent: Option<f64>,

    /// Travel modes estimated for new listings (default: walk, drive)
    #[serde(default)]
    pub modes: Option<Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            average_rent: Some(DEFAULT_AVERAGE_RENT),
            modes: Some(vec!["walk".to_string(), "drive".to_string()]),
        }
    }
}

impl ScoringConfig {
    pub fn average_rent(&self) -> f64 {
        self.average_rent.unwrap_or(DEFAULT_AVERAGE_RENT)
    }
}
