use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::commute::{CommuteEstimate, TravelMode};
use crate::listing::RentalListing;
use crate::scoring::{lease_label, ScoreBreakdown};
use crate::store::SavedListing;
use crate::units::UnitType;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals ("8.00", "-0.70")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Format a monthly rent ("$1,250" or "$980.50")
pub fn format_rent(rent: f64) -> String {
    let cents = (rent * 100.0).round() as i64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if cents % 100 == 0 {
        format!("${}", grouped)
    } else {
        format!("${}.{:02}", grouped, cents % 100)
    }
}

/// One commute line: "Walk: 1.2 miles → 24 minutes"
pub fn format_commute_detail(mode: TravelMode, distance_miles: f64, time_minutes: f64) -> String {
    format!(
        "{}: {} miles → {} minutes",
        mode.label(),
        distance_miles,
        time_minutes
    )
}

pub fn format_estimate(estimate: &CommuteEstimate, use_colors: bool) -> String {
    if use_colors {
        estimate.to_string().bold().to_string()
    } else {
        estimate.to_string()
    }
}

/// Format a score breakdown: one line per factor, then the overall score
pub fn format_breakdown(breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let label_width = breakdown
        .factors()
        .iter()
        .map(|f| f.label.len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = breakdown
        .factors()
        .iter()
        .map(|factor| {
            format!(
                "  {:<width$}  {:>6} x {:.1}",
                factor.label,
                format_score(factor.score),
                factor.weight,
                width = label_width
            )
        })
        .collect();

    let overall = format_score(breakdown.overall_score);
    if use_colors {
        lines.push(format!("Overall Score: {}", overall.bold().green()));
    } else {
        lines.push(format!("Overall Score: {}", overall));
    }
    lines.join("\n")
}

/// Multi-line description of a listing
pub fn format_listing_detail(listing: &RentalListing, use_colors: bool) -> String {
    let unit = listing.unit_type();
    let utilities = if listing.utilities_included() {
        "included"
    } else {
        "not included"
    };
    let header = if use_colors {
        listing.address().bold().to_string()
    } else {
        listing.address().to_string()
    };

    let mut lines = vec![
        header,
        format!("  ZIP: {}", listing.zip_code()),
        format!(
            "  Rent: {} (utilities {})",
            format_rent(listing.monthly_rent()),
            utilities
        ),
        format!("  Lease: {}", lease_label(listing.lease_term_months())),
        format!("  Type: {} ({})", unit.label(), unit.code()),
    ];

    for (key, &miles) in listing.distances() {
        let line = match key.parse::<TravelMode>() {
            Ok(mode) => match crate::commute::commute_time_minutes(miles, mode) {
                Ok(minutes) => format_commute_detail(mode, miles, minutes),
                Err(_) => format!("{}: {} miles", key, miles),
            },
            Err(_) => format!("{}: {} miles", key, miles),
        };
        lines.push(format!("  {}", line));
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate an address to fit available width, accounting for Unicode
fn truncate_address(address: &str, max_width: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= max_width {
        address.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format saved listings as a ranked table: index, score, type, rent, address.
///
/// Rows come paired with their store position, which is what the index
/// column shows so it can be passed to `show` and `remove`.
pub fn format_ranked_table(rows: &[(usize, &SavedListing)], use_colors: bool) -> String {
    format_ranked_table_with_width(rows, use_colors, get_terminal_width())
}

fn format_ranked_table_with_width(
    rows: &[(usize, &SavedListing)],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if rows.is_empty() {
        return "No saved rentals.".to_string();
    }

    // Right-aligned position plus its trailing dot, at least " 1."
    let position_digits = rows
        .iter()
        .map(|(position, _)| position.to_string().len())
        .max()
        .unwrap_or(1)
        .max(2);
    let index_width = position_digits + 1;
    let score_width = 6;
    let type_width = UnitType::all().map(|u| u.code().len()).max().unwrap_or(8);
    let rent_width = 9;
    let separator = "  ";
    let fixed_width =
        index_width + 1 + score_width + type_width + rent_width + separator.len() * 3;

    rows.iter()
        .map(|(position, saved)| {
            let listing = &saved.listing;
            let index_str = format!("{:>width$}.", position, width = position_digits);
            let score_str = format!(
                "{:>width$}",
                format_score(saved.overall_score),
                width = score_width
            );
            let type_str = format!("{:<width$}", listing.unit_type().code(), width = type_width);
            let rent_str = format!(
                "{:>width$}",
                format_rent(listing.monthly_rent()),
                width = rent_width
            );

            let address = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_address(listing.address(), width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_address(listing.address(), 20),
                None => listing.address().to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    type_str.cyan(),
                    separator,
                    rent_str.yellow(),
                    separator,
                    address
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    score_str,
                    separator,
                    type_str,
                    separator,
                    rent_str,
                    separator,
                    address
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The unit-type catalog, one line per type with its score
pub fn format_unit_types(use_colors: bool) -> String {
    let code_width = UnitType::all().map(|u| u.code().len()).max().unwrap_or(0);
    UnitType::all()
        .map(|unit| {
            let code = format!("{:<width$}", unit.code(), width = code_width);
            let score = format!("{:>5.1}", unit.type_score());
            if use_colors {
                format!("{}  {}  {}", code.cyan(), score.bold(), unit.label())
            } else {
                format!("{}  {}  {}", code, score, unit.label())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
