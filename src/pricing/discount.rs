//! Annual discounting at a flat technical interest rate

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Present value of 1 paid `year_offset` years from inception: `(1 + rate)^-year_offset`
///
/// `rate` is a decimal (0.03 for 3%). Callers must keep it above -1.
pub fn present_value_factor(rate: f64, year_offset: u32) -> f64 {
    (1.0 + rate).powi(-(year_offset as i32))
}

/// Flat annual discount curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurve {
    /// Annual technical rate as a decimal
    pub annual_rate: f64,
}

impl DiscountCurve {
    /// Create from a rate expressed in percent (1.5 = 1.5%)
    pub fn from_percent(rate_pct: f64) -> PricingResult<Self> {
        if !rate_pct.is_finite() || rate_pct <= -100.0 {
            return Err(PricingError::InvalidRate { rate_pct });
        }
        Ok(Self {
            annual_rate: rate_pct / 100.0,
        })
    }

    /// Discount factor to the end of policy year `year`
    pub fn factor(&self, year: u32) -> f64 {
        present_value_factor(self.annual_rate, year)
    }

    /// Present value of `(year, amount)` payments
    pub fn pv_stream(&self, payments: impl IntoIterator<Item = (u32, f64)>) -> f64 {
        payments
            .into_iter()
            .map(|(year, amount)| amount * self.factor(year))
            .sum()
    }
}

impl Default for DiscountCurve {
    fn default() -> Self {
        Self { annual_rate: 0.015 }
    }
}
