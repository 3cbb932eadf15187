//! Error types for premium calculation and request loading
//!
//! Validation failures are raised before any computation starts. The calculator
//! never retries: a pure calculation fails the same way every time.

use thiserror::Error;

use crate::policy::{Branch, CoverageType};

/// Result alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// A request that cannot be priced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Coverage amount below the product floor (non-life and mandatory only)
    #[error("Invalid amount: {amount} is below the minimum of {minimum} for the {branch} branch")]
    InvalidAmount {
        branch: Branch,
        amount: f64,
        minimum: f64,
    },

    /// Age outside the branch's permitted range
    #[error("Invalid age: {age} is outside [{min}, {max}]")]
    InvalidAge { age: u32, min: u32, max: u32 },

    /// Term outside the permitted range for the coverage type
    #[error("Invalid term: {term} years is outside [{min}, {max}] for {coverage}")]
    InvalidTerm {
        coverage: CoverageType,
        term: u32,
        min: u32,
        max: u32,
    },

    /// Technical interest rate that would make the discount base non-positive
    #[error("Invalid technical rate: {rate_pct}%")]
    InvalidRate { rate_pct: f64 },

    /// Directly supplied rating factor that is negative or not finite
    #[error("Invalid rating factor {name}: {value}")]
    InvalidFactor { name: &'static str, value: f64 },

    /// Coverage type not offered within the requested branch
    #[error("Coverage type {coverage} is not offered in the {branch} branch")]
    UnknownCoverageType {
        branch: Branch,
        coverage: CoverageType,
    },

    /// Coverage type code that names no known product
    #[error("Unknown coverage type code: {0}")]
    UnknownCoverageCode(String),

    /// Branch code that names no known product family
    #[error("Unknown branch: {0}")]
    UnknownBranch(String),
}

/// Failure while reading requests or configuration from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row parsed but carries an unusable value
    #[error("Row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: PricingError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_constraint() {
        let err = PricingError::InvalidTerm {
            coverage: CoverageType::TermDeath,
            term: 45,
            min: 5,
            max: 40,
        };
        assert_eq!(
            err.to_string(),
            "Invalid term: 45 years is outside [5, 40] for term_death"
        );

        let err = PricingError::InvalidAmount {
            branch: Branch::NonLife,
            amount: 500.0,
            minimum: 1000.0,
        };
        assert!(err.to_string().contains("non_life"));
    }
}
