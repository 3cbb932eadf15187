//! Policy request structures and batch request loading

mod data;
pub mod loader;

pub use data::{Branch, CoverageType, PolicyRequest, RatingFactors, RiskProfile};
pub use loader::{load_requests, load_requests_from_reader};
