//! Tariff-based premiums for non-life and mandatory products

use crate::assumptions::ProductRates;
use crate::policy::CoverageType;

/// Round a monetary amount to cents
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `insured_value × base_rate(type) × total_factor`, in cents
pub fn non_life_premium(
    rates: &ProductRates,
    coverage: CoverageType,
    insured_value: f64,
    total_factor: f64,
) -> f64 {
    let base_rate = rates.non_life_base_rate(coverage);
    log::debug!(
        "Non-life {}: value={} rate={} factor={}",
        coverage, insured_value, base_rate, total_factor
    );
    round_to_cents(insured_value * base_rate * total_factor)
}

/// `base × regulatory_rate(type) × category × region`, in cents
pub fn mandatory_premium(
    rates: &ProductRates,
    coverage: CoverageType,
    calculation_base: f64,
    category_region_factor: f64,
) -> f64 {
    let regulatory_rate = rates.regulatory_rate(coverage);
    log::debug!(
        "Mandatory {}: base={} rate={} factor={}",
        coverage, calculation_base, regulatory_rate, category_region_factor
    );
    round_to_cents(calculation_base * regulatory_rate * category_region_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(1270.3011), 1270.30);
        assert_eq!(round_to_cents(0.004), 0.0);
        assert_eq!(round_to_cents(2.675_1), 2.68);
    }

    #[test]
    fn test_auto_reference() {
        let rates = ProductRates::standard();
        assert_eq!(non_life_premium(&rates, CoverageType::Auto, 50_000.0, 1.0), 1000.00);
    }

    #[test]
    fn test_home_with_riders() {
        let rates = ProductRates::standard();
        // 200k × 1.2% × (1.2 × 1.15) = 3312.00
        let premium = non_life_premium(&rates, CoverageType::Home, 200_000.0, 1.2 * 1.15);
        assert_eq!(premium, 3312.00);
    }

    #[test]
    fn test_auto_liability_reference() {
        let rates = ProductRates::standard();
        assert_eq!(mandatory_premium(&rates, CoverageType::AutoLiability, 20_000.0, 1.0), 300.00);
    }

    #[test]
    fn test_mandatory_scales_linearly() {
        let rates = ProductRates::standard();
        let base = mandatory_premium(&rates, CoverageType::Health, 40_000.0, 1.0);
        let doubled = mandatory_premium(&rates, CoverageType::Health, 40_000.0, 2.0);
        assert_eq!(base, 1000.00);
        assert_eq!(doubled, 2000.00);
    }
}
