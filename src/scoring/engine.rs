use super::config::{
    ScoringConfig, COMMUTE_WEIGHT, FLEXIBILITY_WEIGHT, PRICE_WEIGHT, TYPE_WEIGHT,
};
use super::factors::{commute_score, flexibility_score, lease_label, price_score};
use crate::error::{Error, Result};
use crate::listing::RentalListing;
use crate::validation::round2;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: &'static str, // "Price", "Lease Flexibility", "Commute", "Property Type"
    pub score: f64,
    pub weight: f64,
}

impl FactorContribution {
    pub fn weighted(&self) -> f64 {
        self.score * self.weight
    }
}

/// Per-factor scores for one listing. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub price_score: f64,
    pub flexibility_score: f64,
    pub commute_score: f64,
    pub type_score: f64,
    pub overall_score: f64,
}

impl ScoreBreakdown {
    pub fn factors(&self) -> [FactorContribution; 4] {
        [
            FactorContribution {
                label: "Price",
                score: self.price_score,
                weight: PRICE_WEIGHT,
            },
            FactorContribution {
                label: "Lease Flexibility",
                score: self.flexibility_score,
                weight: FLEXIBILITY_WEIGHT,
            },
            FactorContribution {
                label: "Commute",
                score: self.commute_score,
                weight: COMMUTE_WEIGHT,
            },
            FactorContribution {
                label: "Property Type",
                score: self.type_score,
                weight: TYPE_WEIGHT,
            },
        ]
    }
}

/// Combines the four factor scores for a listing.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    average_rent: f64,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self {
            average_rent: super::config::DEFAULT_AVERAGE_RENT,
        }
    }
}

impl ScoreCalculator {
    pub fn new(average_rent: f64) -> Result<Self> {
        if !(average_rent.is_finite() && average_rent > 0.0) {
            return Err(Error::InvalidInput {
                factor: "price",
                reason: format!(
                    "reference average rent must be greater than zero (got {})",
                    average_rent
                ),
            });
        }
        Ok(Self { average_rent })
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        Self::new(config.average_rent())
    }

    pub fn average_rent(&self) -> f64 {
        self.average_rent
    }

    pub fn price_score(&self, rent: f64) -> Result<f64> {
        price_score(rent, self.average_rent)
    }

    pub fn flexibility_score(&self, lease_term_months: u32) -> Result<u8> {
        flexibility_score(lease_label(lease_term_months))
    }

    /// Compute every factor. Any failing factor fails the whole breakdown.
    pub fn breakdown(&self, listing: &RentalListing) -> Result<ScoreBreakdown> {
        let price = self.price_score(listing.monthly_rent())?;
        let flexibility = f64::from(self.flexibility_score(listing.lease_term_months())?);
        let commute = commute_score(listing.distances())?;
        let unit = listing.unit_type().type_score();

        let overall = round2(
            price * PRICE_WEIGHT
                + flexibility * FLEXIBILITY_WEIGHT
                + commute * COMMUTE_WEIGHT
                + unit * TYPE_WEIGHT,
        );

        Ok(ScoreBreakdown {
            price_score: price,
            flexibility_score: flexibility,
            commute_score: commute,
            type_score: unit,
            overall_score: overall,
        })
    }

    pub fn overall_score(&self, listing: &RentalListing) -> Result<f64> {
        Ok(self.breakdown(listing)?.overall_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::NewListing;
    use std::collections::BTreeMap;

    fn sample_listing(
        rent: f64,
        unit_type: &str,
        lease: u32,
        distances: &[(&str, f64)],
    ) -> RentalListing {
        RentalListing::from_parts(NewListing {
            address: "123 Main St, College Park, MD",
            monthly_rent: rent,
            zip_code: "20740",
            utilities_included: true,
            unit_type,
            lease_term_months: lease,
            distances: distances
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        })
        .unwrap()
    }

    #[test]
    fn test_breakdown_factors() {
        // price: 1200/1500 = 0.8 -> 7.0
        // flexibility: 12 months -> 4
        // commute: walk 1.0 (20 min) -> 8.0, drive 1.0 (2.4 min) -> 10.0, mean 9.0
        // type: 1x1 -> 10.0
        let listing = sample_listing(1200.0, "1x1", 12, &[("walk", 1.0), ("drive", 1.0)]);
        let breakdown = ScoreCalculator::default().breakdown(&listing).unwrap();

        assert_eq!(breakdown.price_score, 7.0);
        assert_eq!(breakdown.flexibility_score, 4.0);
        assert_eq!(breakdown.commute_score, 9.0);
        assert_eq!(breakdown.type_score, 10.0);
        // 3.5 + 0.8 + 2.7 + 1.0
        assert_eq!(breakdown.overall_score, 8.0);
    }

    #[test]
    fn test_overall_can_exceed_ten() {
        // Every factor at 10: 5 + 2 + 3 + 1
        let listing = sample_listing(600.0, "Single Apartment", 1, &[("walk", 0.2)]);
        let score = ScoreCalculator::default().overall_score(&listing).unwrap();
        assert_eq!(score, 11.0);
    }

    #[test]
    fn test_overall_carries_negative_price() {
        // price: 3000/1500 = 2.0 -> -5.0; flexibility 6 months -> 7
        // commute: drive 25 miles -> 0; type 4x2 -> 4.0
        let listing = sample_listing(3000.0, "4x2", 6, &[("drive", 25.0)]);
        let breakdown = ScoreCalculator::default().breakdown(&listing).unwrap();
        assert_eq!(breakdown.price_score, -5.0);
        // -2.5 + 1.4 + 0 + 0.4
        assert_eq!(breakdown.overall_score, -0.7);
    }

    #[test]
    fn test_overall_is_deterministic() {
        let listing = sample_listing(1350.0, "Studio", 6, &[("walk", 1.3), ("drive", 1.3)]);
        let calculator = ScoreCalculator::default();
        assert_eq!(
            calculator.overall_score(&listing).unwrap(),
            calculator.overall_score(&listing).unwrap()
        );
    }

    #[test]
    fn test_failing_factor_fails_aggregate() {
        let listing = sample_listing(1200.0, "2x2", 12, &[("UMD", 10.0)]);
        let result = ScoreCalculator::default().overall_score(&listing);
        assert!(matches!(result, Err(Error::NoValidModes)));
    }

    #[test]
    fn test_rent_affects_score() {
        let calculator = ScoreCalculator::default();
        let cheap = sample_listing(900.0, "2x2", 12, &[("walk", 1.0)]);
        let pricey = sample_listing(2000.0, "2x2", 12, &[("walk", 1.0)]);
        assert!(
            calculator.overall_score(&cheap).unwrap() > calculator.overall_score(&pricey).unwrap()
        );
    }

    #[test]
    fn test_unit_type_affects_score() {
        let calculator = ScoreCalculator::default();
        let studio = sample_listing(1200.0, "Studio", 12, &[("walk", 1.0)]);
        let four_by_two = sample_listing(1200.0, "4x2", 12, &[("walk", 1.0)]);
        assert!(
            calculator.overall_score(&studio).unwrap()
                > calculator.overall_score(&four_by_two).unwrap()
        );
    }

    #[test]
    fn test_custom_average_rent() {
        let listing = sample_listing(1200.0, "1x1", 12, &[("walk", 1.0)]);
        let calculator = ScoreCalculator::new(2400.0).unwrap();
        // ratio 0.5 -> 10
        assert_eq!(calculator.breakdown(&listing).unwrap().price_score, 10.0);
        assert!(ScoreCalculator::new(0.0).is_err());
    }

    #[test]
    fn test_factor_contributions() {
        let listing = sample_listing(1200.0, "1x1", 12, &[("walk", 1.0), ("drive", 1.0)]);
        let breakdown = ScoreCalculator::default().breakdown(&listing).unwrap();
        let factors = breakdown.factors();

        assert_eq!(factors[0].label, "Price");
        let total: f64 = factors.iter().map(FactorContribution::weighted).sum();
        assert_eq!(round2(total), breakdown.overall_score);
    }
}
