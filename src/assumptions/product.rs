//! Per-product tariff rates for non-life and mandatory branches

use crate::policy::CoverageType;

/// Non-life base rates as a share of the insured value
const NON_LIFE_BASE_RATES: &[(CoverageType, f64)] = &[
    (CoverageType::Auto, 0.020),
    (CoverageType::Home, 0.012),
    (CoverageType::Accident, 0.008),
];

/// Rate for non-life products without a dedicated tariff line
pub const DEFAULT_NON_LIFE_RATE: f64 = 0.015;

/// Regulatory rates as a share of the calculation base
const MANDATORY_RATES: &[(CoverageType, f64)] = &[
    (CoverageType::AutoLiability, 0.015),
    (CoverageType::Health, 0.025),
    (CoverageType::Professional, 0.018),
];

/// Rate for mandatory products without a dedicated regulatory line
pub const DEFAULT_MANDATORY_RATE: f64 = 0.020;

/// Fixed tariff tables
#[derive(Debug, Clone, Copy)]
pub struct ProductRates {
    non_life: &'static [(CoverageType, f64)],
    non_life_default: f64,
    mandatory: &'static [(CoverageType, f64)],
    mandatory_default: f64,
}

impl Default for ProductRates {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProductRates {
    pub const fn standard() -> Self {
        Self {
            non_life: NON_LIFE_BASE_RATES,
            non_life_default: DEFAULT_NON_LIFE_RATE,
            mandatory: MANDATORY_RATES,
            mandatory_default: DEFAULT_MANDATORY_RATE,
        }
    }

    /// Base rate for a non-life product line
    pub fn non_life_base_rate(&self, coverage: CoverageType) -> f64 {
        lookup(self.non_life, coverage).unwrap_or(self.non_life_default)
    }

    /// Regulatory rate for a mandatory product line
    pub fn regulatory_rate(&self, coverage: CoverageType) -> f64 {
        lookup(self.mandatory, coverage).unwrap_or(self.mandatory_default)
    }
}

fn lookup(table: &[(CoverageType, f64)], coverage: CoverageType) -> Option<f64> {
    table
        .iter()
        .find(|(line, _)| *line == coverage)
        .map(|(_, rate)| *rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_life_rates() {
        let rates = ProductRates::standard();
        assert_eq!(rates.non_life_base_rate(CoverageType::Auto), 0.02);
        assert_eq!(rates.non_life_base_rate(CoverageType::Home), 0.012);
        assert_eq!(rates.non_life_base_rate(CoverageType::Accident), 0.008);
        assert_eq!(rates.non_life_base_rate(CoverageType::Travel), 0.015);
        assert_eq!(rates.non_life_base_rate(CoverageType::Liability), 0.015);
    }

    #[test]
    fn test_regulatory_rates() {
        let rates = ProductRates::standard();
        assert_eq!(rates.regulatory_rate(CoverageType::AutoLiability), 0.015);
        assert_eq!(rates.regulatory_rate(CoverageType::Health), 0.025);
        assert_eq!(rates.regulatory_rate(CoverageType::Professional), 0.018);
        assert_eq!(rates.regulatory_rate(CoverageType::Home), 0.02);
    }
}
