//! Typed rows for each dataset, decoded from normalized tables.

use serde::{Deserialize, Serialize};

use crate::core::types::{DatasetKind, Metric};
use crate::data::table::DatasetRecord;

/// GBD estimate for one (country, cause, sex, age, year) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisorderRecord {
    pub country: String,
    pub cause: String,
    pub sex: String,
    pub age: String,
    pub year: i32,
    pub prevalence_rate: f64,
    pub incidence_rate: f64,
    pub ylds_rate: f64,
}

impl DisorderRecord {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Prevalence => self.prevalence_rate,
            Metric::Incidence => self.incidence_rate,
            Metric::Ylds => self.ylds_rate,
        }
    }
}

impl DatasetRecord for DisorderRecord {
    const KIND: DatasetKind = DatasetKind::Disorders;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "country",
        "cause",
        "sex",
        "age",
        "year",
        "prevalence_rate",
        "incidence_rate",
        "ylds_rate",
    ];
}

/// Facility usage per 100k inhabitants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub facility_type: String,
    pub users_per_100k: f64,
}

impl DatasetRecord for FacilityRecord {
    const KIND: DatasetKind = DatasetKind::Facilities;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["facility_type", "users_per_100k"];
}

/// Mental-health workers per 100k, by profession. Either cell may be blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkforceRecord {
    pub profession: Option<String>,
    pub workers_per_100k: Option<f64>,
}

impl DatasetRecord for WorkforceRecord {
    const KIND: DatasetKind = DatasetKind::Workforce;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["profession", "workers_per_100k"];
}

/// Increased suicide-ideation risk (odds ratio with its confidence interval).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuicideRiskRecord {
    pub disorder: String,
    #[serde(rename = "or")]
    pub odds_ratio: f64,
    pub ci_lower: f64,
    pub ci_higher: f64,
}

impl DatasetRecord for SuicideRiskRecord {
    const KIND: DatasetKind = DatasetKind::SuicideRisk;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["disorder", "or", "ci_lower", "ci_higher"];
}

/// YLDs attributable to a risk factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorRecord {
    pub cause: String,
    pub risk_factor: String,
    pub sex: String,
    pub age: String,
    pub ylds_rate_per_100k: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl DatasetRecord for RiskFactorRecord {
    const KIND: DatasetKind = DatasetKind::RiskFactors;
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "cause",
        "risk_factor",
        "sex",
        "age",
        "ylds_rate_per_100k",
        "ci_lower",
        "ci_upper",
    ];
}
