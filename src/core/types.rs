use serde::{Deserialize, Serialize};
use std::fmt;

/// The five datasets the dashboard is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Disorders,
    Facilities,
    Workforce,
    SuicideRisk,
    RiskFactors,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 5] = [
        DatasetKind::Disorders,
        DatasetKind::Facilities,
        DatasetKind::Workforce,
        DatasetKind::SuicideRisk,
        DatasetKind::RiskFactors,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Disorders => "disorders",
            DatasetKind::Facilities => "facilities",
            DatasetKind::Workforce => "workforce",
            DatasetKind::SuicideRisk => "suicide risk",
            DatasetKind::RiskFactors => "risk factors",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rate metric shown by the full-width trend chart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Prevalence,
    Incidence,
    Ylds,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Prevalence, Metric::Incidence, Metric::Ylds];

    /// Label offered by the metric selector
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Prevalence => "Prevalence Rate",
            Metric::Incidence => "Incidence Rate",
            Metric::Ylds => "YLDs Rate",
        }
    }

    /// Normalized column holding the metric
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Prevalence => "prevalence_rate",
            Metric::Incidence => "incidence_rate",
            Metric::Ylds => "ylds_rate",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
