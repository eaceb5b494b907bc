//! Pairwise listing comparison.
//!
//! A candidate is scored against a reference listing starting from 100:
//! cheaper, newer and lower-mileage candidates gain points, the opposite
//! loses points, and a different fuel costs a flat penalty. Only the
//! per-factor contributions are capped; the total is not clamped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::listing::ListingRecord;
use crate::normalize::format_thousands;

const BASE_SCORE: f64 = 100.0;
const MAX_CHEAPER_BONUS: f64 = 20.0;
const MAX_PRICIER_PENALTY: f64 = 30.0;
const POINTS_PER_YEAR: f64 = 5.0;
const KM_PER_POINT: f64 = 10_000.0;
const MAX_LOWER_KM_BONUS: f64 = 15.0;
const MAX_HIGHER_KM_PENALTY: f64 = 20.0;
const FUEL_MISMATCH_PENALTY: f64 = 15.0;

pub const EXCLUDED_RATIONALE: &str = "different brand or model";
pub const SIMILAR_RATIONALE: &str = "similar specifications";

/// Ordinal classification of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Excluded,
    Poor,
    Acceptable,
    Good,
    Excellent,
}

impl Tier {
    /// Tier for a final (non-excluded) score
    pub fn for_score(score: f64) -> Self {
        if score >= 90.0 {
            Tier::Excellent
        } else if score >= 70.0 {
            Tier::Good
        } else if score >= 50.0 {
            Tier::Acceptable
        } else {
            Tier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Excluded => "EXCLUDED",
            Tier::Poor => "POOR",
            Tier::Acceptable => "ACCEPTABLE",
            Tier::Good => "GOOD",
            Tier::Excellent => "EXCELLENT",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub tier: Tier,
    pub score: i64,
    /// Contributing factors in evaluation order
    pub factors: Vec<String>,
}

impl ScoreResult {
    /// Factors joined for display
    pub fn rationale(&self) -> String {
        self.factors.join(" • ")
    }
}

/// Score `candidate` against `reference`
pub fn classify(reference: &ListingRecord, candidate: &ListingRecord) -> ScoreResult {
    if candidate.brand != reference.brand || candidate.model != reference.model {
        return ScoreResult {
            tier: Tier::Excluded,
            score: 0,
            factors: vec![EXCLUDED_RATIONALE.to_string()],
        };
    }

    let mut score = BASE_SCORE;
    let mut factors = Vec::new();

    let price_diff = candidate.price - reference.price;
    let price_pct = if reference.price > 0.0 {
        price_diff / reference.price * 100.0
    } else {
        0.0
    };
    if price_diff < 0.0 {
        factors.push(format!("cheaper by {:.0} EUR", price_diff.abs()));
        score += price_pct.abs().min(MAX_CHEAPER_BONUS);
    } else {
        if price_diff > 0.0 {
            factors.push(format!("more expensive by {:.0} EUR", price_diff));
        }
        score -= price_pct.min(MAX_PRICIER_PENALTY);
    }

    let year_diff = i64::from(candidate.year) - i64::from(reference.year);
    if year_diff > 0 {
        factors.push(format!("newer by {} year(s)", year_diff));
    } else if year_diff < 0 {
        factors.push(format!("older by {} year(s)", year_diff.abs()));
    }
    score += year_diff as f64 * POINTS_PER_YEAR;

    let km_diff = i64::from(candidate.mileage_km) - i64::from(reference.mileage_km);
    if km_diff < 0 {
        factors.push(format!("fewer km by {}", format_thousands(km_diff.unsigned_abs())));
        score += (km_diff.abs() as f64 / KM_PER_POINT).min(MAX_LOWER_KM_BONUS);
    } else if km_diff > 0 {
        factors.push(format!("more km by {}", format_thousands(km_diff.unsigned_abs())));
        score -= (km_diff as f64 / KM_PER_POINT).min(MAX_HIGHER_KM_PENALTY);
    }

    if candidate.fuel != reference.fuel {
        factors.push(format!("different fuel: {} vs {}", candidate.fuel, reference.fuel));
        score -= FUEL_MISMATCH_PENALTY;
    }

    if factors.is_empty() {
        factors.push(SIMILAR_RATIONALE.to_string());
    }

    ScoreResult {
        tier: Tier::for_score(score),
        // Truncates toward zero, like the thresholds above expect
        score: score as i64,
        factors,
    }
}
