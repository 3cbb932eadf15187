//! Annual mortality rates by integer age
//!
//! The tabulated range covers ages 18 through 80. Younger ages clamp to the
//! age-18 rate. Older ages follow a linear extrapolation capped at 25% a year:
//! `min(0.25, 0.05 + (age - 80) * 0.025)`. The extrapolated rate at age 81 is
//! lower than the tabulated age-80 rate and must stay that way.

/// First tabulated age
pub const MIN_TABLE_AGE: u32 = 18;

/// Last tabulated age
pub const MAX_TABLE_AGE: u32 = 80;

/// Intercept of the extrapolation line at the last tabulated age
const EXTRAPOLATION_BASE: f64 = 0.05;

/// Annual increase of the extrapolated rate
const EXTRAPOLATION_STEP: f64 = 0.025;

/// Ceiling on the extrapolated rate
const EXTRAPOLATION_CAP: f64 = 0.25;

/// Base annual mortality rates, ages 18..=80 (index = age - 18)
const BASE_RATES: &[f64] = &[
    // Age 18-24
    0.0005, 0.0005, 0.0006, 0.0006, 0.0007, 0.0007, 0.0008,
    // Age 25-30
    0.0008, 0.0009, 0.0009, 0.0010, 0.0010, 0.0011,
    // Age 31-40
    0.0012, 0.0013, 0.0014, 0.0015, 0.0016,
    0.0017, 0.0019, 0.0020, 0.0022, 0.0024,
    // Age 41-50
    0.0026, 0.0029, 0.0032, 0.0035, 0.0039,
    0.0043, 0.0048, 0.0053, 0.0059, 0.0066,
    // Age 51-60
    0.0074, 0.0083, 0.0093, 0.0104, 0.0117,
    0.0132, 0.0148, 0.0166, 0.0187, 0.0211,
    // Age 61-70
    0.0238, 0.0268, 0.0302, 0.0340, 0.0383,
    0.0431, 0.0485, 0.0546, 0.0614, 0.0690,
    // Age 71-80
    0.0775, 0.0869, 0.0973, 0.1088, 0.1214,
    0.1352, 0.1502, 0.1664, 0.1838, 0.2024,
];

/// Immutable mortality table backed by static rates
#[derive(Debug, Clone, Copy)]
pub struct MortalityTable {
    base_rates: &'static [f64],
}

impl Default for MortalityTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl MortalityTable {
    /// The standard pricing table
    pub const fn standard() -> Self {
        Self {
            base_rates: BASE_RATES,
        }
    }

    /// Annual probability of death within the year at `age`
    pub fn rate(&self, age: u32) -> f64 {
        if age > MAX_TABLE_AGE {
            let years_beyond = (age - MAX_TABLE_AGE) as f64;
            return EXTRAPOLATION_CAP.min(EXTRAPOLATION_BASE + years_beyond * EXTRAPOLATION_STEP);
        }

        let idx = age.saturating_sub(MIN_TABLE_AGE) as usize;
        // Table covers every age up to MAX_TABLE_AGE
        self.base_rates[idx]
    }

    /// Probability of surviving `years` full years starting at `age`
    pub fn survival_probability(&self, age: u32, years: u32) -> f64 {
        (age..age + years).fold(1.0, |survival, a| survival * (1.0 - self.rate(a)))
    }

    /// Probability of dying exactly in policy year `year` (1-indexed)
    ///
    /// Survival through the first `year - 1` years times the mortality rate of
    /// the attained age in `year`.
    pub fn deferred_death_probability(&self, age: u32, year: u32) -> f64 {
        debug_assert!(year >= 1, "policy years are 1-indexed");
        let prior_years = year.saturating_sub(1);
        self.survival_probability(age, prior_years) * self.rate(age + prior_years)
    }

    /// Tabulated (age, rate) pairs
    pub fn tabulated(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.base_rates
            .iter()
            .enumerate()
            .map(|(idx, &rate)| (MIN_TABLE_AGE + idx as u32, rate))
    }
}

/// Annual mortality rate from the standard table
pub fn mortality_rate(age: u32) -> f64 {
    MortalityTable::standard().rate(age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table_covers_full_range() {
        let table = MortalityTable::standard();
        assert_eq!(table.tabulated().count(), 63);
        assert_eq!(table.rate(18), 0.0005);
        assert_eq!(table.rate(40), 0.0024);
        assert_eq!(table.rate(65), 0.0383);
        assert_eq!(table.rate(80), 0.2024);
    }

    #[test]
    fn test_rates_non_decreasing() {
        let table = MortalityTable::standard();
        for age in MIN_TABLE_AGE..MAX_TABLE_AGE {
            assert!(
                table.rate(age + 1) >= table.rate(age),
                "rate drops between {} and {}",
                age,
                age + 1
            );
        }
    }

    #[test]
    fn test_young_ages_clamp() {
        assert_eq!(mortality_rate(0), mortality_rate(18));
        assert_eq!(mortality_rate(17), 0.0005);
    }

    #[test]
    fn test_extrapolation_beyond_table() {
        assert_abs_diff_eq!(mortality_rate(81), 0.075, epsilon = 1e-12);
        assert_abs_diff_eq!(mortality_rate(85), 0.175, epsilon = 1e-12);
        // 0.05 + 10 * 0.025 = 0.30, capped
        assert_eq!(mortality_rate(90), 0.25);
        assert_eq!(mortality_rate(119), 0.25);
        for age in 81..=130 {
            let expected = (0.05 + (age - 80) as f64 * 0.025).min(0.25);
            assert_abs_diff_eq!(mortality_rate(age), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_survival_probability() {
        let table = MortalityTable::standard();
        assert_eq!(table.survival_probability(40, 0), 1.0);
        let expected = (1.0 - 0.0024) * (1.0 - 0.0026);
        assert_abs_diff_eq!(table.survival_probability(40, 2), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_deferred_death_probability() {
        let table = MortalityTable::standard();
        assert_eq!(table.deferred_death_probability(40, 1), 0.0024);
        let expected = (1.0 - 0.0024) * 0.0026;
        assert_abs_diff_eq!(table.deferred_death_probability(40, 2), expected, epsilon = 1e-15);

        // Deaths over the whole horizon plus survivors at the end account for everyone
        let horizon = 120 - 40;
        let deaths: f64 = (1..=horizon)
            .map(|k| table.deferred_death_probability(40, k))
            .sum();
        let survivors = table.survival_probability(40, horizon);
        assert_abs_diff_eq!(deaths + survivors, 1.0, epsilon = 1e-12);
    }
}
