//! Risk flags and the multiplicative loading they produce per branch
//!
//! Every flag is an enum variant carrying its own multiplier, so a misspelled
//! flag fails at parse time instead of silently loading at 1.0.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::policy::{Branch, RatingFactors, RiskProfile};

pub const SMOKER_LOADING: f64 = 1.8;
pub const HIGH_RISK_OCCUPATION_LOADING: f64 = 1.4;
pub const HYPERTENSION_LOADING: f64 = 1.3;
pub const DIABETES_LOADING: f64 = 1.5;
pub const HEART_DISEASE_LOADING: f64 = 2.0;

pub const ACCIDENT_RIDER_LOADING: f64 = 1.2;
pub const THEFT_RIDER_LOADING: f64 = 1.15;
pub const NATURAL_DISASTER_RIDER_LOADING: f64 = 1.25;

/// A single underwriting flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    #[serde(alias = "smoking")]
    Smoker,
    #[serde(alias = "high_risk")]
    HighRiskOccupation,
    Hypertension,
    Diabetes,
    HeartDisease,
    /// Non-life accident rider
    #[serde(alias = "accident")]
    AccidentCover,
    /// Non-life theft rider
    #[serde(alias = "theft")]
    TheftCover,
    /// Non-life natural disaster rider
    #[serde(alias = "natural_disaster")]
    NaturalDisasterCover,
}

impl RiskFlag {
    pub const ALL: [RiskFlag; 8] = [
        RiskFlag::Smoker,
        RiskFlag::HighRiskOccupation,
        RiskFlag::Hypertension,
        RiskFlag::Diabetes,
        RiskFlag::HeartDisease,
        RiskFlag::AccidentCover,
        RiskFlag::TheftCover,
        RiskFlag::NaturalDisasterCover,
    ];

    pub const fn multiplier(&self) -> f64 {
        match self {
            RiskFlag::Smoker => SMOKER_LOADING,
            RiskFlag::HighRiskOccupation => HIGH_RISK_OCCUPATION_LOADING,
            RiskFlag::Hypertension => HYPERTENSION_LOADING,
            RiskFlag::Diabetes => DIABETES_LOADING,
            RiskFlag::HeartDisease => HEART_DISEASE_LOADING,
            RiskFlag::AccidentCover => ACCIDENT_RIDER_LOADING,
            RiskFlag::TheftCover => THEFT_RIDER_LOADING,
            RiskFlag::NaturalDisasterCover => NATURAL_DISASTER_RIDER_LOADING,
        }
    }

    /// Branch whose premiums this flag loads
    pub const fn branch(&self) -> Branch {
        match self {
            RiskFlag::Smoker
            | RiskFlag::HighRiskOccupation
            | RiskFlag::Hypertension
            | RiskFlag::Diabetes
            | RiskFlag::HeartDisease => Branch::Life,
            RiskFlag::AccidentCover | RiskFlag::TheftCover | RiskFlag::NaturalDisasterCover => {
                Branch::NonLife
            }
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            RiskFlag::Smoker => "smoker",
            RiskFlag::HighRiskOccupation => "high_risk_occupation",
            RiskFlag::Hypertension => "hypertension",
            RiskFlag::Diabetes => "diabetes",
            RiskFlag::HeartDisease => "heart_disease",
            RiskFlag::AccidentCover => "accident_cover",
            RiskFlag::TheftCover => "theft_cover",
            RiskFlag::NaturalDisasterCover => "natural_disaster_cover",
        }
    }
}

impl std::str::FromStr for RiskFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase().replace('-', "_");
        let flag = match code.as_str() {
            "smoker" | "smoking" => RiskFlag::Smoker,
            "high_risk_occupation" | "high_risk" => RiskFlag::HighRiskOccupation,
            "hypertension" => RiskFlag::Hypertension,
            "diabetes" => RiskFlag::Diabetes,
            "heart_disease" => RiskFlag::HeartDisease,
            "accident_cover" | "accident" => RiskFlag::AccidentCover,
            "theft_cover" | "theft" => RiskFlag::TheftCover,
            "natural_disaster_cover" | "natural_disaster" => RiskFlag::NaturalDisasterCover,
            _ => return Err(format!("unknown risk flag: {}", s)),
        };
        Ok(flag)
    }
}

/// One named multiplicative component of a risk loading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingComponent {
    pub name: &'static str,
    pub factor: f64,
}

/// Resolved loading: the ordered components and their product
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskLoading {
    components: Vec<LoadingComponent>,
}

impl RiskLoading {
    /// Resolve the loading that applies to `branch`
    ///
    /// Flags belonging to another branch are ignored. Directly supplied rating
    /// factors must be finite and non-negative.
    pub fn resolve(
        branch: Branch,
        profile: &RiskProfile,
        rating: &RatingFactors,
    ) -> PricingResult<Self> {
        for (name, value) in rating.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::InvalidFactor { name, value });
            }
        }

        let mut loading = Self::default();

        match branch {
            Branch::Life => {}
            Branch::NonLife => {
                loading.push("risk_level", rating.risk_level);
                loading.push("guarantee_level", rating.guarantee_level);
            }
            Branch::Mandatory => {
                loading.push("risk_category", rating.risk_category);
                loading.push("region", rating.region);
            }
        }

        for flag in profile.iter() {
            if flag.branch() == branch {
                loading.push(flag.name(), flag.multiplier());
            } else {
                log::warn!("Ignoring {} flag on a {} request", flag.name(), branch);
            }
        }

        log::debug!("Risk factor for {}: {:.6}", branch, loading.total());
        Ok(loading)
    }

    fn push(&mut self, name: &'static str, factor: f64) {
        // Neutral factors carry no surcharge
        if factor != 1.0 {
            log::debug!("  {}: x{}", name, factor);
            self.components.push(LoadingComponent { name, factor });
        }
    }

    pub fn components(&self) -> &[LoadingComponent] {
        &self.components
    }

    /// Product of all components (1.0 when none apply)
    pub fn total(&self) -> f64 {
        self.components.iter().fold(1.0, |acc, c| acc * c.factor)
    }
}

/// Combined multiplicative risk factor for a request's branch
pub fn risk_factor(
    branch: Branch,
    profile: &RiskProfile,
    rating: &RatingFactors,
) -> PricingResult<f64> {
    RiskLoading::resolve(branch, profile, rating).map(|loading| loading.total())
}
