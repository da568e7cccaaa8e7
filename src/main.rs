use clap::{Parser, Subcommand};
use rent_rank::commands::{self, ScoreRequest};
use rent_rank::commute::CommuteEstimator;
use rent_rank::config::Config;
use rent_rank::geocode::{CachingGeocoder, NominatimGeocoder};
use rent_rank::output;
use rent_rank::ErrorKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

type Estimator = CommuteEstimator<CachingGeocoder<NominatimGeocoder>>;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a listing, optionally saving it
    Score {
        /// Street address of the listing
        #[arg(long)]
        address: String,
        /// Monthly rent, e.g. 1250 or "$1,250"
        #[arg(long)]
        rent: String,
        /// 5-digit ZIP code
        #[arg(long)]
        zip: String,
        /// Lease length in months, or "Month-to-Month", "6 Months", "12 Months"
        #[arg(long, default_value = "12")]
        lease_term: String,
        /// Unit type code (see `rent-rank types`)
        #[arg(long = "type")]
        unit_type: String,
        /// Utilities are included in the rent
        #[arg(long)]
        utilities: bool,
        /// Append the scored listing to the saved rentals
        #[arg(long)]
        save: bool,
    },
    /// List saved rentals ranked by score (default if no subcommand)
    List,
    /// Show the score breakdown of a saved rental
    Show {
        /// Number of the rental (1-based, as shown in list)
        index: usize,
    },
    /// Remove a saved rental
    Remove {
        /// Number of the rental (1-based, as shown in list)
        index: usize,
    },
    /// Estimate the commute from an address to campus
    Commute {
        address: String,
        /// walk, bike, drive or bus
        #[arg(short, long, default_value = "walk")]
        mode: String,
    },
    /// List unit types and their scores
    Types,
}

#[derive(Parser, Debug)]
#[command(name = "rent-rank")]
#[command(about = "Rank off-campus rentals by price, lease, commute and layout", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/rent-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Skip the on-disk geocode cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Clear the on-disk geocode cache before running
    #[arg(long, global = true)]
    clear_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.clear_cache {
        if let Err(e) = rent_rank::geocode::clear_cache() {
            eprintln!("Failed to clear geocode cache: {:#}", e);
            std::process::exit(EXIT_ERROR);
        }
        tracing::info!("cleared geocode cache");
        if cli.command.is_none() {
            std::process::exit(EXIT_SUCCESS);
        }
    }

    let config_path = cli.config.map(PathBuf::from);
    let config = match rent_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = rent_rank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = output::should_use_colors();
    let command = cli.command.unwrap_or(Commands::List);

    let output = match command {
        Commands::Score {
            address,
            rent,
            zip,
            lease_term,
            unit_type,
            utilities,
            save,
        } => build_estimator(&config, cli.no_cache).and_then(|estimator| {
            let request = ScoreRequest {
                address: &address,
                rent: &rent,
                zip: &zip,
                lease_term: &lease_term,
                unit_type: &unit_type,
                utilities,
            };
            commands::score(&config, &estimator, request, save, use_colors)
        }),
        Commands::List => commands::list(&config, use_colors),
        Commands::Show { index } => commands::show(&config, index, use_colors),
        Commands::Remove { index } => commands::remove(&config, index),
        Commands::Commute { address, mode } => {
            build_estimator(&config, cli.no_cache).and_then(|estimator| {
                commands::commute(&config, &estimator, &address, &mode, use_colors)
            })
        }
        Commands::Types => Ok(output::format_unit_types(use_colors)),
    };

    match output {
        Ok(text) => {
            println!("{}", text);
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Log to stderr. `--verbose` turns on debug output for this crate;
/// otherwise RUST_LOG applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,rent_rank=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<rent_rank::Error>().map(rent_rank::Error::kind) {
        Some(ErrorKind::ExternalService) => EXIT_NETWORK,
        _ => EXIT_ERROR,
    }
}

fn build_estimator(config: &Config, no_cache: bool) -> anyhow::Result<Estimator> {
    let geocoder_config = config.geocoder();
    let client = NominatimGeocoder::new(geocoder_config.base_url(), geocoder_config.user_agent())?;

    let geocoder = if no_cache || !geocoder_config.cache_enabled() {
        CachingGeocoder::new(client)
    } else {
        CachingGeocoder::with_disk(client, rent_rank::geocode::get_cache_path())
    };
    Ok(CommuteEstimator::new(geocoder, geocoder_config.timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let geocoding = anyhow::Error::new(rent_rank::Error::GeocodingFailure {
            address: "1 First St".to_string(),
            source: rent_rank::geocode::GeocodeError::NotFound,
        });
        assert_eq!(exit_code_for(&geocoding), EXIT_NETWORK);

        let validation = anyhow::Error::new(rent_rank::Error::NoValidModes)
            .context("while scoring");
        assert_eq!(exit_code_for(&validation), EXIT_ERROR);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), EXIT_ERROR);
    }

    #[test]
    fn test_cli_parses_score() {
        let cli = Cli::try_parse_from([
            "rent-rank",
            "--no-cache",
            "score",
            "--address",
            "1 First St",
            "--rent",
            "$1,200",
            "--zip",
            "20740",
            "--type",
            "1x1",
            "--save",
        ])
        .unwrap();

        assert!(cli.no_cache);
        match cli.command {
            Some(Commands::Score {
                lease_term, save, utilities, ..
            }) => {
                assert_eq!(lease_term, "12");
                assert!(save);
                assert!(!utilities);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
