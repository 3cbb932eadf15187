//! Life premium formulas: term death, whole life and life annuity
//!
//! Each `*_pv` method returns the expected present value of the benefits, and
//! [`loaded_premium`] turns it into an annual premium. The term death sum
//! weights every year by the raw mortality rate and does not condition on
//! survival. Whole life and the annuity do condition on survival, year by
//! year, up to the terminal age.

use crate::assumptions::MortalityTable;

use super::discount::DiscountCurve;

/// Mortality and interest basis for life formulas
#[derive(Debug, Clone, Copy)]
pub struct LifeBasis {
    pub mortality: MortalityTable,
    pub curve: DiscountCurve,
    /// Age at which whole life and annuity cover ends
    pub terminal_age: u32,
}

impl LifeBasis {
    pub fn new(mortality: MortalityTable, curve: DiscountCurve, terminal_age: u32) -> Self {
        Self {
            mortality,
            curve,
            terminal_age,
        }
    }

    /// Years of cover from `age` to the terminal age
    pub fn years_to_terminal_age(&self, age: u32) -> u32 {
        self.terminal_age.saturating_sub(age)
    }

    /// Temporary death cover: `Σ capital × q(age+k-1) × v^k` for k in 1..=term
    pub fn term_death_pv(&self, capital: f64, age: u32, term: u32) -> f64 {
        (1..=term)
            .map(|year| {
                let attained_age = age + year - 1;
                capital * self.mortality.rate(attained_age) * self.curve.factor(year)
            })
            .sum()
    }

    /// Whole life death cover, conditioned on survival to each year of death
    pub fn whole_life_pv(&self, capital: f64, age: u32) -> f64 {
        let mut survival = 1.0;
        let mut pv = 0.0;

        for year in 1..=self.years_to_terminal_age(age) {
            let q = self.mortality.rate(age + year - 1);
            let death_in_year = survival * q;
            pv += capital * death_in_year * self.curve.factor(year);
            survival *= 1.0 - q;
        }

        pv
    }

    /// Life annuity paying `annual_payout` at the end of every year survived into
    pub fn annuity_pv(&self, annual_payout: f64, age: u32) -> f64 {
        let mut survival = 1.0;
        let mut pv = 0.0;

        for year in 1..=self.years_to_terminal_age(age) {
            pv += annual_payout * survival * self.curve.factor(year);
            survival *= 1.0 - self.mortality.rate(age + year - 1);
        }

        pv
    }
}

/// Annual premium from a benefit present value
pub fn loaded_premium(pv: f64, risk_factor: f64, expense_loading: f64) -> f64 {
    pv * risk_factor * expense_loading
}
