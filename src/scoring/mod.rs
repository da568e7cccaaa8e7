pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use factors::{commute_score, flexibility_score, lease_label, lease_months, price_score};
pub use engine::{FactorContribution, ScoreBreakdown, ScoreCalculator};
pub use validation::{configured_modes, validate_scoring};
