//! Subcommand bodies for the `rent-rank` binary. Each returns the text to
//! print so the binary only decides where it goes.

use crate::commute::CommuteEstimator;
use crate::config::Config;
use crate::geocode::Geocoder;
use crate::listing::{NewListing, RentalListing};
use crate::output;
use crate::scoring::{configured_modes, lease_months, ScoreCalculator};
use crate::store::ListingStore;
use crate::validation::parse_rent;
use anyhow::{Context, Result};
use std::path::Path;

/// Listing fields as typed on the command line
#[derive(Debug, Clone)]
pub struct ScoreRequest<'a> {
    pub address: &'a str,
    pub rent: &'a str,
    pub zip: &'a str,
    pub lease_term: &'a str,
    pub unit_type: &'a str,
    pub utilities: bool,
}

/// Months from either a number or a lease label
pub fn parse_lease_term(raw: &str) -> crate::Result<u32> {
    let raw = raw.trim();
    match raw.parse::<u32>() {
        Ok(months) => Ok(months),
        Err(_) => lease_months(raw),
    }
}

fn open_store(path: &Path) -> Result<ListingStore> {
    ListingStore::open(path)
        .with_context(|| format!("Failed to load saved rentals from {}", path.display()))
}

/// Geocode, estimate distances to campus, score, and optionally save.
pub fn score<G: Geocoder>(
    config: &Config,
    estimator: &CommuteEstimator<G>,
    request: ScoreRequest<'_>,
    save: bool,
    use_colors: bool,
) -> Result<String> {
    let scoring = config.scoring();
    let calculator = ScoreCalculator::from_config(&scoring)?;

    let monthly_rent = parse_rent(request.rent)?;
    let lease_term_months = parse_lease_term(request.lease_term)?;
    let distances = estimator.distances(
        request.address,
        config.campus_address(),
        &configured_modes(&scoring),
    )?;

    let listing = RentalListing::create(
        NewListing {
            address: request.address,
            monthly_rent,
            zip_code: request.zip,
            utilities_included: request.utilities,
            unit_type: request.unit_type,
            lease_term_months,
            distances,
        },
        estimator,
    )?;
    let breakdown = calculator.breakdown(&listing)?;

    let mut out = format!(
        "{}\n\n{}",
        output::format_listing_detail(&listing, use_colors),
        output::format_breakdown(&breakdown, use_colors)
    );

    if save {
        let path = config.storage_path();
        let mut store = open_store(&path)?;
        store.add(listing, breakdown.overall_score)?;
        store.save(&path)?;
        out.push_str(&format!("\n\nSaved as #{}", store.len()));
    }

    Ok(out)
}

pub fn list(config: &Config, use_colors: bool) -> Result<String> {
    let store = open_store(&config.storage_path())?;
    Ok(output::format_ranked_table(
        &store.ranked_with_positions(),
        use_colors,
    ))
}

/// Breakdown of a saved listing, recomputed from its stored fields.
pub fn show(config: &Config, index: usize, use_colors: bool) -> Result<String> {
    let store = open_store(&config.storage_path())?;
    let saved = store.get(index)?;

    let calculator = ScoreCalculator::from_config(&config.scoring())?;
    let breakdown = calculator.breakdown(&saved.listing)?;

    let mut out = format!(
        "{}\n\n{}",
        output::format_listing_detail(&saved.listing, use_colors),
        output::format_breakdown(&breakdown, use_colors)
    );
    // The saved score may predate a config change
    if breakdown.overall_score != saved.overall_score {
        out.push_str(&format!(
            "\nSaved Score:   {}",
            output::format_score(saved.overall_score)
        ));
    }
    Ok(out)
}

pub fn remove(config: &Config, index: usize) -> Result<String> {
    let path = config.storage_path();
    let mut store = open_store(&path)?;
    let removed = store.remove(index)?;
    store.save(&path)?;

    Ok(format!("Removed #{}: {}", index, removed.listing.address()))
}

pub fn commute<G: Geocoder>(
    config: &Config,
    estimator: &CommuteEstimator<G>,
    address: &str,
    mode: &str,
    use_colors: bool,
) -> Result<String> {
    let estimate = estimator.estimate(address, config.campus_address(), mode)?;

    Ok(format!(
        "{}\n{}",
        output::format_estimate(&estimate, use_colors),
        output::format_commute_detail(
            estimate.mode(),
            estimate.distance_miles(),
            estimate.time_minutes()
        )
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::store::read_listings;
    use crate::testing::TableGeocoder;
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    const HOME: &str = "7303 Baltimore Ave";
    const CAMPUS: &str = "7649 Library Ln";

    fn geocoder() -> TableGeocoder {
        TableGeocoder::new()
            .with(HOME, 38.9807, -76.9370)
            .with(CAMPUS, 38.9859, -76.9452)
    }

    fn config(storage: &str) -> (Config, PathBuf) {
        let path = env::temp_dir().join(storage);
        let _ = fs::remove_file(&path);
        let config = Config {
            campus_address: Some(CAMPUS.to_string()),
            storage_path: Some(path.clone()),
            ..Default::default()
        };
        (config, path)
    }

    fn request(rent: &str) -> ScoreRequest<'_> {
        ScoreRequest {
            address: "7303 baltimore ave",
            rent,
            zip: "20740",
            lease_term: "12 Months",
            unit_type: "1x1",
            utilities: true,
        }
    }

    #[test]
    fn test_parse_lease_term() {
        assert_eq!(parse_lease_term("12").unwrap(), 12);
        assert_eq!(parse_lease_term(" 6 ").unwrap(), 6);
        assert_eq!(parse_lease_term("Month-to-Month").unwrap(), 1);
        assert!(matches!(
            parse_lease_term("Forever"),
            Err(Error::UnknownLeaseTerm(_))
        ));
    }

    #[test]
    fn test_score_without_save_leaves_store_alone() {
        let geo = geocoder();
        let estimator = CommuteEstimator::new(&geo, Duration::from_secs(10));
        let (config, path) = config("rent_rank_test_commands_nosave.csv");

        let out = score(&config, &estimator, request("$1,200"), false, false).unwrap();

        assert!(out.starts_with("7303 Baltimore Ave"));
        assert!(out.contains("Walk: "));
        assert!(out.contains("Overall Score: "));
        assert!(!out.contains("Saved as"));
        assert!(!path.exists());
    }

    #[test]
    fn test_score_save_list_show_remove() {
        let geo = geocoder();
        let estimator = CommuteEstimator::new(&geo, Duration::from_secs(10));
        let (config, path) = config("rent_rank_test_commands_flow.csv");

        let out = score(&config, &estimator, request("2400"), true, false).unwrap();
        assert!(out.ends_with("Saved as #1"));
        let out = score(&config, &estimator, request("1200"), true, false).unwrap();
        assert!(out.ends_with("Saved as #2"));
        assert_eq!(read_listings(&path).unwrap().len(), 2);

        // The cheaper listing ranks first but keeps its store position
        let table = list(&config, false).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 2."));
        assert!(lines[0].contains("$1,200"));
        assert!(lines[1].starts_with(" 1."));

        let detail = show(&config, 2, false).unwrap();
        assert!(detail.contains("Rent: $1,200"));
        assert!(detail.contains("Overall Score: "));
        assert!(!detail.contains("Saved Score"));

        let out = remove(&config, 2).unwrap();
        assert_eq!(out, "Removed #2: 7303 Baltimore Ave");
        let remaining = read_listings(&path).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].listing.monthly_rent(), 2400.0);

        let err = show(&config, 2, false).unwrap_err();
        let kind = err.downcast_ref::<Error>().map(Error::kind);
        assert_eq!(kind, Some(ErrorKind::Validation));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_list_empty_store() {
        let (config, _) = config("rent_rank_test_commands_empty.csv");
        assert_eq!(list(&config, false).unwrap(), "No saved rentals.");
    }

    #[test]
    fn test_score_geocoding_failure() {
        let geo = TableGeocoder::new().with(CAMPUS, 38.9859, -76.9452);
        let estimator = CommuteEstimator::new(&geo, Duration::from_secs(10));
        let (config, path) = config("rent_rank_test_commands_geofail.csv");

        let err = score(&config, &estimator, request("1200"), true, false).unwrap_err();
        let kind = err.downcast_ref::<Error>().map(Error::kind);
        assert_eq!(kind, Some(ErrorKind::ExternalService));
        assert!(!path.exists());
    }

    #[test]
    fn test_commute() {
        let geo = geocoder();
        let estimator = CommuteEstimator::new(&geo, Duration::from_secs(10));
        let (config, _) = config("rent_rank_test_commands_commute.csv");

        let out = commute(&config, &estimator, HOME, "bike", false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0]
            .starts_with("Bike commute from '7303 Baltimore Ave' -> '7649 Library Ln'"));
        assert!(lines[1].starts_with("Bike: "));

        assert!(commute(&config, &estimator, HOME, "jetpack", false).is_err());
    }
}
