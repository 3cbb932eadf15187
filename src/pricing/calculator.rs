//! Premium calculator: validation, formula selection and final adjustments
//!
//! One request in, one result out. The calculator holds only read-only
//! assumptions and configuration, so a single instance can be shared by any
//! number of threads.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::breakdown::PremiumBreakdown;
use super::discount::DiscountCurve;
use super::life::{loaded_premium, LifeBasis};
use super::non_life::{mandatory_premium, non_life_premium, round_to_cents};
use crate::assumptions::{Assumptions, RiskLoading};
use crate::error::{LoadError, PricingError, PricingResult};
use crate::policy::{Branch, CoverageType, PolicyRequest};

/// Minimum coverage amount for every branch
pub const DEFAULT_MINIMUM_COVERAGE: f64 = 1_000.0;

/// Floor on the monthly life premium
pub const DEFAULT_MINIMUM_MONTHLY_PREMIUM: f64 = 5.0;

/// Age at which whole life and annuity cover ends
pub const DEFAULT_TERMINAL_AGE: u32 = 120;

/// Share of capital paid out each year by a life annuity
pub const DEFAULT_ANNUITY_PAYOUT_RATE: f64 = 0.08;

/// Pricing limits and expense loadings
///
/// Missing fields in a JSON file take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub minimum_coverage_amount: f64,
    pub life_min_age: u32,
    pub life_max_age: u32,
    /// Term bounds for term death and annuity cover
    pub min_term: u32,
    pub max_term: u32,
    pub terminal_age: u32,
    pub minimum_monthly_premium: f64,
    pub annuity_payout_rate: f64,
    pub term_death_loading: f64,
    pub whole_life_loading: f64,
    pub annuity_loading: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            minimum_coverage_amount: DEFAULT_MINIMUM_COVERAGE,
            life_min_age: 18,
            life_max_age: 80,
            min_term: 5,
            max_term: 40,
            terminal_age: DEFAULT_TERMINAL_AGE,
            minimum_monthly_premium: DEFAULT_MINIMUM_MONTHLY_PREMIUM,
            annuity_payout_rate: DEFAULT_ANNUITY_PAYOUT_RATE,
            term_death_loading: 1.20,  // 20% expense and profit margin
            whole_life_loading: 1.15,
            annuity_loading: 1.15,
        }
    }
}

impl PricingConfig {
    /// Load from a JSON file, defaulting any field it omits
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Period a premium amount covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumPeriod {
    Monthly,
    Annual,
}

impl PremiumPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PremiumPeriod::Monthly => "monthly",
            PremiumPeriod::Annual => "annual",
        }
    }
}

/// Outcome of a premium calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumResult {
    pub branch: Branch,
    pub coverage_type: CoverageType,
    /// Premium in currency units, rounded to cents
    pub premium: f64,
    pub period: PremiumPeriod,
    /// Combined risk factor applied to the premium
    pub risk_factor: f64,
}

impl PremiumResult {
    fn new(request: &PolicyRequest, premium: f64, period: PremiumPeriod, risk_factor: f64) -> Self {
        Self {
            branch: request.branch,
            coverage_type: request.coverage_type,
            premium,
            period,
            risk_factor,
        }
    }
}

/// Stateless premium calculator
#[derive(Debug, Clone, Default)]
pub struct PremiumCalculator {
    assumptions: Assumptions,
    config: PricingConfig,
}

impl PremiumCalculator {
    pub fn new(assumptions: Assumptions, config: PricingConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price a request
    pub fn calculate(&self, request: &PolicyRequest) -> PricingResult<PremiumResult> {
        self.quote(request).map(|(result, _)| result)
    }

    /// Price a request and split the premium into base and surcharges
    ///
    /// Mandatory premiums carry no surcharges: the base equals the total.
    pub fn breakdown(&self, request: &PolicyRequest) -> PricingResult<PremiumBreakdown> {
        let (result, loading) = self.quote(request)?;
        let breakdown = match request.branch {
            Branch::Life | Branch::NonLife => {
                PremiumBreakdown::from_loading(result.premium, result.period, &loading)
            }
            Branch::Mandatory => PremiumBreakdown::flat(result.premium, result.period),
        };
        Ok(breakdown)
    }

    fn quote(&self, request: &PolicyRequest) -> PricingResult<(PremiumResult, RiskLoading)> {
        if !request.branch.offers(request.coverage_type) {
            return Err(PricingError::UnknownCoverageType {
                branch: request.branch,
                coverage: request.coverage_type,
            });
        }

        let loading = RiskLoading::resolve(request.branch, &request.risk_profile, &request.rating)?;

        let result = match request.branch {
            Branch::Life => self.life_premium(request, loading.total())?,
            Branch::NonLife => {
                self.check_minimum_amount(request)?;
                let premium = non_life_premium(
                    &self.assumptions.rates,
                    request.coverage_type,
                    request.coverage_amount,
                    loading.total(),
                );
                PremiumResult::new(request, premium, PremiumPeriod::Annual, loading.total())
            }
            Branch::Mandatory => {
                self.check_minimum_amount(request)?;
                let premium = mandatory_premium(
                    &self.assumptions.rates,
                    request.coverage_type,
                    request.coverage_amount,
                    loading.total(),
                );
                PremiumResult::new(request, premium, PremiumPeriod::Annual, loading.total())
            }
        };

        log::debug!(
            "{} {} premium: {:.2} ({})",
            result.branch,
            result.coverage_type,
            result.premium,
            result.period.as_str()
        );
        Ok((result, loading))
    }

    fn check_minimum_amount(&self, request: &PolicyRequest) -> PricingResult<()> {
        let amount = request.coverage_amount;
        if !amount.is_finite() || amount < self.config.minimum_coverage_amount {
            return Err(PricingError::InvalidAmount {
                branch: request.branch,
                amount,
                minimum: self.config.minimum_coverage_amount,
            });
        }
        Ok(())
    }

    fn life_premium(&self, request: &PolicyRequest, risk_factor: f64) -> PricingResult<PremiumResult> {
        let config = &self.config;
        let capital = request.coverage_amount;

        if !capital.is_finite() {
            return Err(PricingError::InvalidAmount {
                branch: Branch::Life,
                amount: capital,
                minimum: config.minimum_coverage_amount,
            });
        }
        // Below-floor life capital prices at zero rather than failing
        if capital < config.minimum_coverage_amount {
            log::debug!("Life capital {} below floor, premium is zero", capital);
            return Ok(PremiumResult::new(request, 0.0, PremiumPeriod::Monthly, risk_factor));
        }

        if request.age < config.life_min_age || request.age > config.life_max_age {
            return Err(PricingError::InvalidAge {
                age: request.age,
                min: config.life_min_age,
                max: config.life_max_age,
            });
        }

        if request.coverage_type.uses_term()
            && (request.term < config.min_term || request.term > config.max_term)
        {
            return Err(PricingError::InvalidTerm {
                coverage: request.coverage_type,
                term: request.term,
                min: config.min_term,
                max: config.max_term,
            });
        }

        let curve = DiscountCurve::from_percent(request.interest_rate_pct)?;
        let basis = LifeBasis::new(self.assumptions.mortality, curve, config.terminal_age);
        let age = request.age;

        let annual = match request.coverage_type {
            CoverageType::TermDeath => loaded_premium(
                basis.term_death_pv(capital, age, request.term),
                risk_factor,
                config.term_death_loading,
            ),
            CoverageType::WholeLife => loaded_premium(
                basis.whole_life_pv(capital, age),
                risk_factor,
                config.whole_life_loading,
            ),
            CoverageType::Annuity => loaded_premium(
                basis.annuity_pv(capital * config.annuity_payout_rate, age),
                risk_factor,
                config.annuity_loading,
            ),
            other => {
                return Err(PricingError::UnknownCoverageType {
                    branch: Branch::Life,
                    coverage: other,
                })
            }
        };

        log::debug!("{} annual premium: {:.2}", request.coverage_type, annual);

        let monthly = round_to_cents(annual / 12.0).max(config.minimum_monthly_premium);
        Ok(PremiumResult::new(request, monthly, PremiumPeriod::Monthly, risk_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::RiskFlag;
    use crate::policy::RatingFactors;
    use approx::assert_abs_diff_eq;

    fn calculator() -> PremiumCalculator {
        PremiumCalculator::default()
    }

    fn term_death() -> PolicyRequest {
        PolicyRequest::life(CoverageType::TermDeath, 100_000.0, 40, 20, 1.5)
    }

    #[test]
    fn test_term_death_monthly_reference() {
        // 15243.6140 annual / 12
        let result = calculator().calculate(&term_death()).unwrap();
        assert_eq!(result.premium, 1270.30);
        assert_eq!(result.period, PremiumPeriod::Monthly);
        assert_eq!(result.risk_factor, 1.0);
    }

    #[test]
    fn test_term_death_with_loadings() {
        let request = term_death().with_flag(RiskFlag::Smoker).with_flag(RiskFlag::Diabetes);
        let result = calculator().calculate(&request).unwrap();
        // 41157.7578 annual / 12
        assert_eq!(result.premium, 3429.81);
    }

    #[test]
    fn test_whole_life_ignores_term() {
        let short = PolicyRequest::life(CoverageType::WholeLife, 100_000.0, 40, 1, 1.5);
        let long = short.clone().with_term(99);
        let calc = calculator();
        let a = calc.calculate(&short).unwrap();
        let b = calc.calculate(&long).unwrap();
        assert_eq!(a.premium, b.premium);
        assert_eq!(a.premium, 6075.70);
    }

    #[test]
    fn test_annuity_monthly_reference() {
        let request = PolicyRequest::life(CoverageType::Annuity, 100_000.0, 65, 10, 1.5);
        assert_eq!(calculator().calculate(&request).unwrap().premium, 7564.60);
    }

    #[test]
    fn test_monthly_floor() {
        // Annual 3.32, monthly 0.28 before the floor
        let request = PolicyRequest::life(CoverageType::TermDeath, 1_000.0, 18, 5, 1.5);
        assert_eq!(calculator().calculate(&request).unwrap().premium, 5.0);
    }

    #[test]
    fn test_life_below_floor_is_zero() {
        let request = PolicyRequest::life(CoverageType::TermDeath, 500.0, 40, 20, 1.5);
        let result = calculator().calculate(&request).unwrap();
        assert_eq!(result.premium, 0.0);
    }

    #[test]
    fn test_non_life_below_floor_raises() {
        let request = PolicyRequest::new(Branch::NonLife, CoverageType::Auto, 500.0);
        assert_eq!(
            calculator().calculate(&request),
            Err(PricingError::InvalidAmount {
                branch: Branch::NonLife,
                amount: 500.0,
                minimum: 1000.0,
            })
        );

        let request = PolicyRequest::new(Branch::Mandatory, CoverageType::Health, 999.99);
        assert!(matches!(
            calculator().calculate(&request),
            Err(PricingError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_life_age_bounds() {
        let calc = calculator();
        for age in [17, 81] {
            let request = term_death().with_age(age);
            assert_eq!(
                calc.calculate(&request),
                Err(PricingError::InvalidAge { age, min: 18, max: 80 })
            );
        }
        assert!(calc.calculate(&term_death().with_age(18)).is_ok());
        assert!(calc.calculate(&term_death().with_age(80)).is_ok());
    }

    #[test]
    fn test_term_bounds() {
        let calc = calculator();
        for term in [4, 41] {
            let request = term_death().with_term(term);
            assert!(matches!(
                calc.calculate(&request),
                Err(PricingError::InvalidTerm { term: t, .. }) if t == term
            ));
        }
        let annuity = PolicyRequest::life(CoverageType::Annuity, 100_000.0, 60, 3, 1.5);
        assert!(matches!(calc.calculate(&annuity), Err(PricingError::InvalidTerm { .. })));
    }

    #[test]
    fn test_coverage_outside_branch() {
        let request = PolicyRequest::new(Branch::Life, CoverageType::Auto, 50_000.0);
        assert_eq!(
            calculator().calculate(&request),
            Err(PricingError::UnknownCoverageType {
                branch: Branch::Life,
                coverage: CoverageType::Auto,
            })
        );
    }

    #[test]
    fn test_invalid_rate() {
        let request = term_death().with_interest_rate(-100.0);
        assert!(matches!(
            calculator().calculate(&request),
            Err(PricingError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_non_life_reference() {
        let request = PolicyRequest::new(Branch::NonLife, CoverageType::Auto, 50_000.0);
        let result = calculator().calculate(&request).unwrap();
        assert_eq!(result.premium, 1000.00);
        assert_eq!(result.period, PremiumPeriod::Annual);
    }

    #[test]
    fn test_mandatory_reference() {
        let request = PolicyRequest::new(Branch::Mandatory, CoverageType::AutoLiability, 20_000.0);
        let result = calculator().calculate(&request).unwrap();
        assert_eq!(result.premium, 300.00);
        assert_eq!(result.period, PremiumPeriod::Annual);
    }

    #[test]
    fn test_non_life_breakdown_reconciles() {
        let request = PolicyRequest::new(Branch::NonLife, CoverageType::Home, 180_000.0)
            .with_flag(RiskFlag::TheftCover)
            .with_flag(RiskFlag::NaturalDisasterCover)
            .with_rating(RatingFactors {
                risk_level: 1.1,
                ..RatingFactors::default()
            });

        let breakdown = calculator().breakdown(&request).unwrap();
        let result = calculator().calculate(&request).unwrap();

        assert_eq!(breakdown.total_premium, result.premium);
        assert!(breakdown.surcharge("theft_cover").is_some());
        assert!(breakdown.surcharge("risk_level").is_some());
        assert!(breakdown.reconciliation_gap() < 0.01);
    }

    #[test]
    fn test_life_breakdown_reconciles() {
        let request = term_death()
            .with_flag(RiskFlag::Smoker)
            .with_flag(RiskFlag::HighRiskOccupation)
            .with_flag(RiskFlag::HeartDisease);
        let breakdown = calculator().breakdown(&request).unwrap();

        assert_eq!(breakdown.period, PremiumPeriod::Monthly);
        assert_abs_diff_eq!(breakdown.base_premium, 1270.30, epsilon = 0.011);
        assert!(breakdown.reconciliation_gap() < 0.01);
    }

    #[test]
    fn test_mandatory_breakdown_is_flat() {
        let request = PolicyRequest::new(Branch::Mandatory, CoverageType::Professional, 50_000.0)
            .with_rating(RatingFactors {
                risk_category: 1.2,
                region: 1.1,
                ..RatingFactors::default()
            });
        let breakdown = calculator().breakdown(&request).unwrap();
        assert_eq!(breakdown.base_premium, breakdown.total_premium);
        assert!(breakdown.surcharges.is_empty());
        // 50000 × 1.8% × 1.2 × 1.1
        assert_eq!(breakdown.total_premium, 1188.00);
    }

    #[test]
    fn test_config_partial_json() {
        let config = PricingConfig::from_json_str(r#"{ "minimum_monthly_premium": 10.0 }"#).unwrap();
        assert_eq!(config.minimum_monthly_premium, 10.0);
        assert_eq!(config.minimum_coverage_amount, 1000.0);
        assert_eq!(config.term_death_loading, 1.20);

        let calc = PremiumCalculator::new(Assumptions::default_pricing(), config);
        let request = PolicyRequest::life(CoverageType::TermDeath, 1_000.0, 18, 5, 1.5);
        assert_eq!(calc.calculate(&request).unwrap().premium, 10.0);
    }
}
