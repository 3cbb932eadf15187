//! Premium decomposition into a base premium and named surcharges

use serde::{Deserialize, Serialize};

use super::calculator::PremiumPeriod;
use super::non_life::round_to_cents;
use crate::assumptions::RiskLoading;

/// Name of the component carrying the cross terms of compounded factors
pub const COMPOUNDING_COMPONENT: &str = "compounding";

/// A named surcharge in currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surcharge {
    pub name: String,
    pub amount: f64,
}

/// Base premium plus surcharges, reconciling to the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub base_premium: f64,
    pub surcharges: Vec<Surcharge>,
    pub total_premium: f64,
    pub period: PremiumPeriod,
}

impl PremiumBreakdown {
    /// Breakdown with no surcharges
    pub fn flat(total_premium: f64, period: PremiumPeriod) -> Self {
        Self {
            base_premium: total_premium,
            surcharges: Vec::new(),
            total_premium,
            period,
        }
    }

    /// Split `total_premium` along the components of `loading`
    ///
    /// The base is the total with the risk factor divided out. Each component
    /// contributes `base × (factor - 1)`. With several components the cross
    /// terms go to a `compounding` line; with one, rounding dust folds into it.
    pub fn from_loading(total_premium: f64, period: PremiumPeriod, loading: &RiskLoading) -> Self {
        let factor = loading.total();
        if total_premium == 0.0 || factor <= 0.0 {
            return Self::flat(total_premium, period);
        }

        let total = round_to_cents(total_premium);
        let base = total / factor;
        let base_premium = round_to_cents(base);

        let mut surcharges: Vec<Surcharge> = loading
            .components()
            .iter()
            .map(|component| Surcharge {
                name: component.name.to_string(),
                amount: round_to_cents(base * (component.factor - 1.0)),
            })
            .collect();

        let allocated: f64 = base_premium + surcharges.iter().map(|s| s.amount).sum::<f64>();
        let residual = round_to_cents(total - allocated);

        match surcharges.len() {
            0 => {}
            1 => surcharges[0].amount = round_to_cents(surcharges[0].amount + residual),
            _ if residual != 0.0 => surcharges.push(Surcharge {
                name: COMPOUNDING_COMPONENT.to_string(),
                amount: residual,
            }),
            _ => {}
        }

        Self {
            base_premium,
            surcharges,
            total_premium: total,
            period,
        }
    }

    pub fn surcharge_total(&self) -> f64 {
        self.surcharges.iter().map(|s| s.amount).sum()
    }

    /// Look up a surcharge by component name
    pub fn surcharge(&self, name: &str) -> Option<f64> {
        self.surcharges.iter().find(|s| s.name == name).map(|s| s.amount)
    }

    /// Absolute gap between the components and the total
    pub fn reconciliation_gap(&self) -> f64 {
        (self.base_premium + self.surcharge_total() - self.total_premium).abs()
    }
}
