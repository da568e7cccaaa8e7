use crate::error::{Error, Result};

/// Round to two decimal places. Every factor score goes through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clean an address for display and lookup: title-case each word and
/// collapse runs of whitespace.
///
/// ```
/// assert_eq!(
///     rent_rank::validation::normalize_address("  123 main st,  college park ").unwrap(),
///     "123 Main St, College Park"
/// );
/// ```
pub fn normalize_address(address: &str) -> Result<String> {
    let normalized = address
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if normalized.is_empty() {
        return Err(Error::validation("address", "cannot be empty"));
    }
    Ok(normalized)
}

// Uppercase the first letter of every alphabetic run, lowercase the rest.
// "o'neil" -> "O'Neil", "4500b" -> "4500B".
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

pub fn validate_rent(rent: f64) -> Result<f64> {
    if !rent.is_finite() {
        return Err(Error::validation("rent", format!("{} is not a number", rent)));
    }
    if rent <= 0.0 {
        return Err(Error::validation(
            "rent",
            format!("must be greater than zero (got {})", rent),
        ));
    }
    Ok(rent)
}

/// Parse a rent typed or stored as text, accepting "$1,250" style input.
pub fn parse_rent(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    let rent: f64 = cleaned
        .parse()
        .map_err(|_| Error::validation("rent", format!("'{}' is not a numeric value", raw)))?;
    validate_rent(rent)
}

pub fn validate_zip(zip: &str) -> Result<&str> {
    if zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit()) {
        Ok(zip)
    } else {
        Err(Error::validation(
            "zip code",
            format!("'{}' must be exactly 5 digits", zip),
        ))
    }
}

/// Check a factor score is within [0, 10], returning it rounded to 2 places.
pub fn validate_score(score: f64) -> Result<f64> {
    if !score.is_finite() || !(0.0..=10.0).contains(&score) {
        return Err(Error::validation(
            "score",
            format!("{} must be between 0 and 10", score),
        ));
    }
    Ok(round2(score))
}
