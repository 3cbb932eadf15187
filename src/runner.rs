//! Batch quoting over many requests
//!
//! Builds the calculator once and prices any number of requests against it.
//! Requests are independent, so batches fan out across the rayon thread pool.

use rayon::prelude::*;

use crate::assumptions::Assumptions;
use crate::error::PricingResult;
use crate::policy::PolicyRequest;
use crate::pricing::{PremiumBreakdown, PremiumCalculator, PremiumResult, PricingConfig};

/// Shared calculator for batch quoting
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::new();
/// let requests = load_requests("quotes.csv")?;
/// for (request, result) in requests.iter().zip(runner.run_batch(&requests)) {
///     println!("{:?} -> {:?}", request.coverage_type, result);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuoteRunner {
    calculator: PremiumCalculator,
}

impl QuoteRunner {
    /// Runner with the standard pricing basis
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PricingConfig) -> Self {
        Self {
            calculator: PremiumCalculator::new(Assumptions::default_pricing(), config),
        }
    }

    pub fn with_calculator(calculator: PremiumCalculator) -> Self {
        Self { calculator }
    }

    /// Price a single request
    pub fn run(&self, request: &PolicyRequest) -> PricingResult<PremiumResult> {
        self.calculator.calculate(request)
    }

    /// Price every request in parallel; results keep input order
    pub fn run_batch(&self, requests: &[PolicyRequest]) -> Vec<PricingResult<PremiumResult>> {
        requests
            .par_iter()
            .map(|request| self.calculator.calculate(request))
            .collect()
    }

    /// Break down every request in parallel; results keep input order
    pub fn run_breakdowns(&self, requests: &[PolicyRequest]) -> Vec<PricingResult<PremiumBreakdown>> {
        requests
            .par_iter()
            .map(|request| self.calculator.breakdown(request))
            .collect()
    }

    pub fn calculator(&self) -> &PremiumCalculator {
        &self.calculator
    }
}
