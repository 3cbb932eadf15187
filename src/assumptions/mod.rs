//! Pricing assumptions: mortality, tariff rates and risk loadings

mod mortality;
mod product;
mod risk;

pub use mortality::{mortality_rate, MortalityTable, MAX_TABLE_AGE, MIN_TABLE_AGE};
pub use product::{ProductRates, DEFAULT_MANDATORY_RATE, DEFAULT_NON_LIFE_RATE};
pub use risk::{risk_factor, LoadingComponent, RiskFlag, RiskLoading};

/// Container for all pricing assumptions
///
/// Every table is a read-only static, so copies are free and the bundle can be
/// shared across threads without synchronization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assumptions {
    pub mortality: MortalityTable,
    pub rates: ProductRates,
}

impl Assumptions {
    /// Standard pricing basis
    pub const fn default_pricing() -> Self {
        Self {
            mortality: MortalityTable::standard(),
            rates: ProductRates::standard(),
        }
    }
}
