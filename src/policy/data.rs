//! Policy request structures consumed by the premium calculator

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assumptions::RiskFlag;
use crate::error::PricingError;

fn default_age() -> u32 {
    40
}

fn default_term() -> u32 {
    20
}

/// Default technical interest rate, in percent
fn default_interest_rate_pct() -> f64 {
    1.5
}

fn default_factor() -> f64 {
    1.0
}

/// Top-level insurance product family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    #[serde(alias = "vie")]
    Life,
    #[serde(alias = "non_vie")]
    NonLife,
    #[serde(alias = "obligatoire")]
    Mandatory,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Life => "life",
            Branch::NonLife => "non_life",
            Branch::Mandatory => "mandatory",
        }
    }

    /// Whether the branch sells the given coverage type
    pub fn offers(&self, coverage: CoverageType) -> bool {
        use CoverageType::*;
        match self {
            Branch::Life => matches!(coverage, TermDeath | WholeLife | Annuity),
            Branch::NonLife => matches!(coverage, Auto | Home | Accident | Liability | Travel),
            Branch::Mandatory => matches!(coverage, AutoLiability | Health | Professional | Home),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Branch {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "life" | "vie" => Ok(Branch::Life),
            "non_life" | "non_vie" => Ok(Branch::NonLife),
            "mandatory" | "obligatoire" => Ok(Branch::Mandatory),
            _ => Err(PricingError::UnknownBranch(s.to_string())),
        }
    }
}

/// Product line within a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageType {
    /// Temporary death cover
    #[serde(alias = "deces")]
    TermDeath,
    /// Death cover to the terminal age
    #[serde(alias = "vie_entiere")]
    WholeLife,
    /// Life-contingent income
    #[serde(alias = "rente")]
    Annuity,
    Auto,
    Home,
    Accident,
    Liability,
    Travel,
    AutoLiability,
    Health,
    Professional,
}

impl CoverageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageType::TermDeath => "term_death",
            CoverageType::WholeLife => "whole_life",
            CoverageType::Annuity => "annuity",
            CoverageType::Auto => "auto",
            CoverageType::Home => "home",
            CoverageType::Accident => "accident",
            CoverageType::Liability => "liability",
            CoverageType::Travel => "travel",
            CoverageType::AutoLiability => "auto_liability",
            CoverageType::Health => "health",
            CoverageType::Professional => "professional",
        }
    }

    /// Whether the supplied term is validated and used for this product
    pub fn uses_term(&self) -> bool {
        matches!(self, CoverageType::TermDeath | CoverageType::Annuity)
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverageType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coverage = match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "term_death" | "deces" => CoverageType::TermDeath,
            "whole_life" | "vie_entiere" => CoverageType::WholeLife,
            "annuity" | "rente" => CoverageType::Annuity,
            "auto" => CoverageType::Auto,
            "home" => CoverageType::Home,
            "accident" => CoverageType::Accident,
            "liability" => CoverageType::Liability,
            "travel" => CoverageType::Travel,
            "auto_liability" => CoverageType::AutoLiability,
            "health" => CoverageType::Health,
            "professional" => CoverageType::Professional,
            _ => return Err(PricingError::UnknownCoverageCode(s.to_string())),
        };
        Ok(coverage)
    }
}

/// Set of active risk flags
///
/// Serialized as a plain list, e.g. `["smoker", "diabetes"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskProfile {
    flags: BTreeSet<RiskFlag>,
}

impl RiskProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, flag: RiskFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    pub fn insert(&mut self, flag: RiskFlag) {
        self.flags.insert(flag);
    }

    /// Insert the flag when `active` is true
    pub fn set(&mut self, flag: RiskFlag, active: bool) {
        if active {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
    }

    pub fn contains(&self, flag: RiskFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RiskFlag> + '_ {
        self.flags.iter().copied()
    }
}

impl FromIterator<RiskFlag> for RiskProfile {
    fn from_iter<I: IntoIterator<Item = RiskFlag>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

/// Rating factors supplied directly by the underwriter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingFactors {
    /// Non-life risk level multiplier
    #[serde(default = "default_factor")]
    pub risk_level: f64,

    /// Non-life guarantee level multiplier
    #[serde(default = "default_factor")]
    pub guarantee_level: f64,

    /// Mandatory risk category multiplier
    #[serde(default = "default_factor")]
    pub risk_category: f64,

    /// Mandatory regional multiplier
    #[serde(default = "default_factor")]
    pub region: f64,
}

impl Default for RatingFactors {
    fn default() -> Self {
        Self {
            risk_level: 1.0,
            guarantee_level: 1.0,
            risk_category: 1.0,
            region: 1.0,
        }
    }
}

impl RatingFactors {
    /// Named factors in a fixed order, for validation and reporting
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("risk_level", self.risk_level),
            ("guarantee_level", self.guarantee_level),
            ("risk_category", self.risk_category),
            ("region", self.region),
        ]
    }
}

/// A single premium calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRequest {
    pub branch: Branch,

    pub coverage_type: CoverageType,

    /// Capital (life), insured value (non-life) or regulatory base (mandatory)
    pub coverage_amount: f64,

    /// Age of the insured at inception
    #[serde(default = "default_age")]
    pub age: u32,

    /// Coverage term in years (ignored for whole life)
    #[serde(default = "default_term")]
    pub term: u32,

    /// Annual technical interest rate in percent (1.5 = 1.5%)
    #[serde(default = "default_interest_rate_pct")]
    pub interest_rate_pct: f64,

    #[serde(default)]
    pub risk_profile: RiskProfile,

    #[serde(default)]
    pub rating: RatingFactors,
}

impl PolicyRequest {
    /// Create a request with default age, term, rate and no loadings
    pub fn new(branch: Branch, coverage_type: CoverageType, coverage_amount: f64) -> Self {
        Self {
            branch,
            coverage_type,
            coverage_amount,
            age: default_age(),
            term: default_term(),
            interest_rate_pct: default_interest_rate_pct(),
            risk_profile: RiskProfile::default(),
            rating: RatingFactors::default(),
        }
    }

    /// Life request with every actuarial input spelled out
    pub fn life(
        coverage_type: CoverageType,
        capital: f64,
        age: u32,
        term: u32,
        interest_rate_pct: f64,
    ) -> Self {
        Self::new(Branch::Life, coverage_type, capital)
            .with_age(age)
            .with_term(term)
            .with_interest_rate(interest_rate_pct)
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_term(mut self, term: u32) -> Self {
        self.term = term;
        self
    }

    pub fn with_interest_rate(mut self, interest_rate_pct: f64) -> Self {
        self.interest_rate_pct = interest_rate_pct;
        self
    }

    pub fn with_flag(mut self, flag: RiskFlag) -> Self {
        self.risk_profile.insert(flag);
        self
    }

    pub fn with_rating(mut self, rating: RatingFactors) -> Self {
        self.rating = rating;
        self
    }

    /// Technical rate as a decimal (0.015 for 1.5%)
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate_pct / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_codes() {
        assert_eq!("vie".parse::<Branch>(), Ok(Branch::Life));
        assert_eq!("non-life".parse::<Branch>(), Ok(Branch::NonLife));
        assert_eq!("Obligatoire".parse::<Branch>(), Ok(Branch::Mandatory));
        assert_eq!(
            "reinsurance".parse::<Branch>(),
            Err(PricingError::UnknownBranch("reinsurance".to_string()))
        );
    }

    #[test]
    fn test_coverage_codes() {
        assert_eq!("deces".parse::<CoverageType>(), Ok(CoverageType::TermDeath));
        assert_eq!("vie_entiere".parse::<CoverageType>(), Ok(CoverageType::WholeLife));
        assert_eq!("auto-liability".parse::<CoverageType>(), Ok(CoverageType::AutoLiability));
        assert!(matches!(
            "pet".parse::<CoverageType>(),
            Err(PricingError::UnknownCoverageCode(_))
        ));
    }

    #[test]
    fn test_branch_offers() {
        assert!(Branch::Life.offers(CoverageType::Annuity));
        assert!(!Branch::Life.offers(CoverageType::Auto));
        assert!(Branch::NonLife.offers(CoverageType::Home));
        assert!(Branch::Mandatory.offers(CoverageType::Home));
        assert!(!Branch::Mandatory.offers(CoverageType::Auto));
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{
            "branch": "vie",
            "coverage_type": "rente",
            "coverage_amount": 50000.0,
            "risk_profile": ["smoker", "diabetes"]
        }"#;
        let request: PolicyRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.branch, Branch::Life);
        assert_eq!(request.coverage_type, CoverageType::Annuity);
        assert_eq!(request.age, 40);
        assert_eq!(request.term, 20);
        assert_eq!(request.interest_rate_pct, 1.5);
        assert!(request.risk_profile.contains(RiskFlag::Smoker));
        assert!(request.risk_profile.contains(RiskFlag::Diabetes));
        assert_eq!(request.rating, RatingFactors::default());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let json = r#"{
            "branch": "life",
            "coverage_type": "term_death",
            "coverage_amount": 50000.0,
            "risk_profile": ["smoekr"]
        }"#;
        assert!(serde_json::from_str::<PolicyRequest>(json).is_err());
    }

    #[test]
    fn test_risk_profile_set() {
        let mut profile = RiskProfile::new().with(RiskFlag::Smoker);
        profile.set(RiskFlag::Smoker, false);
        profile.set(RiskFlag::TheftCover, true);
        assert!(!profile.contains(RiskFlag::Smoker));
        assert!(profile.contains(RiskFlag::TheftCover));
    }
}
