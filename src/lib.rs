//! Premium Engine - Actuarial premium calculation for life, non-life and mandatory insurance
//!
//! This library provides:
//! - Mortality table lookups with extrapolation beyond the tabulated ages
//! - Discounted-cashflow life formulas (term death, whole life, life annuity)
//! - Tariff-based non-life and regulated mandatory premiums
//! - Multiplicative risk loadings and premium breakdowns
//! - Parallel batch quoting

pub mod error;
pub mod policy;
pub mod assumptions;
pub mod pricing;
pub mod runner;

// Re-export commonly used types
pub use error::{LoadError, PricingError, PricingResult};
pub use policy::{Branch, CoverageType, PolicyRequest, RatingFactors, RiskProfile};
pub use assumptions::{Assumptions, MortalityTable, RiskFlag, mortality_rate, risk_factor};
pub use pricing::{PremiumBreakdown, PremiumCalculator, PremiumPeriod, PremiumResult, PricingConfig};
pub use runner::QuoteRunner;
