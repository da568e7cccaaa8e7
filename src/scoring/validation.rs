use super::config::ScoringConfig;
use crate::commute::TravelMode;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(rent) = config.average_rent {
        if !rent.is_finite() || rent <= 0.0 {
            errors.push(format!(
                "scoring.average_rent: must be greater than zero (got {})",
                rent
            ));
        }
    }

    if let Some(ref modes) = config.modes {
        if modes.is_empty() {
            errors.push("scoring.modes: at least one travel mode is required".to_string());
        }
        for (i, mode) in modes.iter().enumerate() {
            if let Err(e) = mode.parse::<TravelMode>() {
                errors.push(format!("scoring.modes[{}]: {}", i, e));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Configured modes as [`TravelMode`]s, dropping any that fail to parse.
/// Call [`validate_scoring`] first to surface those.
pub fn configured_modes(config: &ScoringConfig) -> Vec<TravelMode> {
    match config.modes {
        Some(ref modes) => modes.iter().filter_map(|m| m.parse().ok()).collect(),
        None => vec![TravelMode::Walk, TravelMode::Drive],
    }
}
