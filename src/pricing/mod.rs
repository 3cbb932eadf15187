//! Premium formulas and the calculator that selects between them

mod breakdown;
mod calculator;
mod discount;
mod life;
mod non_life;

pub use breakdown::{PremiumBreakdown, Surcharge, COMPOUNDING_COMPONENT};
pub use calculator::{
    PremiumCalculator, PremiumPeriod, PremiumResult, PricingConfig, DEFAULT_ANNUITY_PAYOUT_RATE,
    DEFAULT_MINIMUM_COVERAGE, DEFAULT_MINIMUM_MONTHLY_PREMIUM, DEFAULT_TERMINAL_AGE,
};
pub use discount::{present_value_factor, DiscountCurve};
pub use life::{loaded_premium, LifeBasis};
pub use non_life::{mandatory_premium, non_life_premium, round_to_cents};
