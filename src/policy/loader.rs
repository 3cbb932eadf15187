//! Load batches of policy requests from CSV
//!
//! Expected header (only the first three columns are required):
//! `branch,coverage_type,coverage_amount,age,term,interest_rate_pct,smoker,
//! high_risk_occupation,hypertension,diabetes,heart_disease,accident_cover,
//! theft_cover,natural_disaster_cover,risk_level,guarantee_level,risk_category,region`

use super::{Branch, CoverageType, PolicyRequest, RatingFactors, RiskProfile};
use crate::assumptions::RiskFlag;
use crate::error::{LoadError, PricingError};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Raw CSV row; flag columns accept `true/false`, `1/0` or `yes/no`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    branch: String,
    coverage_type: String,
    coverage_amount: f64,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    term: Option<u32>,
    #[serde(default)]
    interest_rate_pct: Option<f64>,

    #[serde(default)]
    smoker: Option<String>,
    #[serde(default)]
    high_risk_occupation: Option<String>,
    #[serde(default)]
    hypertension: Option<String>,
    #[serde(default)]
    diabetes: Option<String>,
    #[serde(default)]
    heart_disease: Option<String>,
    #[serde(default)]
    accident_cover: Option<String>,
    #[serde(default)]
    theft_cover: Option<String>,
    #[serde(default)]
    natural_disaster_cover: Option<String>,

    #[serde(default)]
    risk_level: Option<f64>,
    #[serde(default)]
    guarantee_level: Option<f64>,
    #[serde(default)]
    risk_category: Option<f64>,
    #[serde(default)]
    region: Option<f64>,
}

fn is_truthy(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "y"),
        None => false,
    }
}

impl CsvRow {
    fn to_request(self) -> Result<PolicyRequest, PricingError> {
        let branch: Branch = self.branch.parse()?;
        let coverage_type: CoverageType = self.coverage_type.parse()?;

        let mut profile = RiskProfile::new();
        profile.set(RiskFlag::Smoker, is_truthy(&self.smoker));
        profile.set(RiskFlag::HighRiskOccupation, is_truthy(&self.high_risk_occupation));
        profile.set(RiskFlag::Hypertension, is_truthy(&self.hypertension));
        profile.set(RiskFlag::Diabetes, is_truthy(&self.diabetes));
        profile.set(RiskFlag::HeartDisease, is_truthy(&self.heart_disease));
        profile.set(RiskFlag::AccidentCover, is_truthy(&self.accident_cover));
        profile.set(RiskFlag::TheftCover, is_truthy(&self.theft_cover));
        profile.set(RiskFlag::NaturalDisasterCover, is_truthy(&self.natural_disaster_cover));

        let defaults = RatingFactors::default();
        let rating = RatingFactors {
            risk_level: self.risk_level.unwrap_or(defaults.risk_level),
            guarantee_level: self.guarantee_level.unwrap_or(defaults.guarantee_level),
            risk_category: self.risk_category.unwrap_or(defaults.risk_category),
            region: self.region.unwrap_or(defaults.region),
        };

        let mut request = PolicyRequest::new(branch, coverage_type, self.coverage_amount)
            .with_rating(rating);
        if let Some(age) = self.age {
            request.age = age;
        }
        if let Some(term) = self.term {
            request.term = term;
        }
        if let Some(rate) = self.interest_rate_pct {
            request.interest_rate_pct = rate;
        }
        request.risk_profile = profile;

        Ok(request)
    }
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<PolicyRequest>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_requests_from_reader(file)
}

/// Load requests from any reader (e.g., string buffer, stdin)
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PolicyRequest>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut requests = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Header is line 1, first data row is line 2
        let request = row
            .to_request()
            .map_err(|source| LoadError::InvalidRow { row: idx + 2, source })?;
        requests.push(request);
    }

    log::debug!("Loaded {} policy requests", requests.len());
    Ok(requests)
}
