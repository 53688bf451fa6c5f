//! Explicit widget state for one render.
//!
//! A [`Selection`] is the value a front end hands to the renderer: the
//! currently selected disorders, sexes, age groups, year range, metric and
//! risk-factor filters. [`WidgetOptions`] lists what each widget can offer,
//! derived from the loaded datasets.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::defaults;
use crate::core::error::{DashboardError, Result};
use crate::core::types::Metric;
use crate::data::Datasets;

/// Inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidArgument(format!(
                "Year range {start}..{end} is inverted. The first year must not be after the last."
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub disorders: Vec<String>,
    pub sexes: Vec<String>,
    pub ages: Vec<String>,
    /// `None` selects every year the data covers
    pub years: Option<YearRange>,
    pub metric: Metric,
    pub rf_disorders: Vec<String>,
    pub risk_factors: Vec<String>,
    pub rf_sexes: Vec<String>,
}

impl Default for Selection {
    fn default() -> Self {
        let sexes: Vec<String> = defaults::SEXES.iter().map(|s| s.to_string()).collect();
        Self {
            disorders: vec![defaults::DISORDER.to_string()],
            sexes: sexes.clone(),
            ages: vec![defaults::AGE.to_string()],
            years: None,
            metric: Metric::default(),
            rf_disorders: vec![defaults::DISORDER.to_string()],
            risk_factors: vec![defaults::RISK_FACTOR.to_string()],
            rf_sexes: sexes,
        }
    }
}

/// Partial selection, as read from a config file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOverrides {
    pub disorders: Option<Vec<String>>,
    pub sexes: Option<Vec<String>>,
    pub ages: Option<Vec<String>>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub metric: Option<Metric>,
    pub rf_disorders: Option<Vec<String>>,
    pub risk_factors: Option<Vec<String>>,
    pub rf_sexes: Option<Vec<String>>,
}

impl SelectionOverrides {
    /// Fields set in `other` replace ours
    pub fn merge(&mut self, other: &SelectionOverrides) {
        fn take<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
            if let Some(value) = source {
                *target = Some(value.clone());
            }
        }

        take(&mut self.disorders, &other.disorders);
        take(&mut self.sexes, &other.sexes);
        take(&mut self.ages, &other.ages);
        take(&mut self.year_from, &other.year_from);
        take(&mut self.year_to, &other.year_to);
        take(&mut self.metric, &other.metric);
        take(&mut self.rf_disorders, &other.rf_disorders);
        take(&mut self.risk_factors, &other.risk_factors);
        take(&mut self.rf_sexes, &other.rf_sexes);
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.year_from, self.year_to) {
            YearRange::new(from, to)?;
        }
        Ok(())
    }
}

impl Selection {
    /// Apply overrides on top of the defaults. A single open year bound is
    /// completed from `options`.
    pub fn from_overrides(overrides: &SelectionOverrides, options: &WidgetOptions) -> Result<Self> {
        let mut selection = Selection::default();

        if let Some(ref disorders) = overrides.disorders {
            selection.disorders = disorders.clone();
        }
        if let Some(ref sexes) = overrides.sexes {
            selection.sexes = sexes.clone();
        }
        if let Some(ref ages) = overrides.ages {
            selection.ages = ages.clone();
        }
        if let Some(metric) = overrides.metric {
            selection.metric = metric;
        }
        if let Some(ref rf_disorders) = overrides.rf_disorders {
            selection.rf_disorders = rf_disorders.clone();
        }
        if let Some(ref risk_factors) = overrides.risk_factors {
            selection.risk_factors = risk_factors.clone();
        }
        if let Some(ref rf_sexes) = overrides.rf_sexes {
            selection.rf_sexes = rf_sexes.clone();
        }

        selection.years = match (overrides.year_from, overrides.year_to, options.years) {
            (None, None, _) => None,
            (Some(from), Some(to), _) => Some(YearRange::new(from, to)?),
            (Some(from), None, Some(bounds)) if from > bounds.end => {
                return Err(DashboardError::InvalidArgument(format!(
                    "First year {from} is after the last year in the data ({})",
                    bounds.end
                )));
            }
            (None, Some(to), Some(bounds)) if to < bounds.start => {
                return Err(DashboardError::InvalidArgument(format!(
                    "Last year {to} is before the first year in the data ({})",
                    bounds.start
                )));
            }
            (Some(from), None, Some(bounds)) => Some(YearRange::new(from, bounds.end)?),
            (None, Some(to), Some(bounds)) => Some(YearRange::new(bounds.start, to)?),
            (Some(year), None, None) | (None, Some(year), None) => {
                Some(YearRange::new(year, year)?)
            }
        };

        Ok(selection)
    }

    /// The year range this render filters on
    pub fn year_range(&self, options: &WidgetOptions) -> Option<YearRange> {
        self.years.or(options.years)
    }

    /// Selected values that no widget offers, as (widget, value) pairs.
    ///
    /// Such values are kept; they simply match no rows.
    pub fn unknown_values(&self, options: &WidgetOptions) -> Vec<(&'static str, String)> {
        let checks: [(&'static str, &Vec<String>, &Vec<String>); 6] = [
            ("disorder", &self.disorders, &options.disorders),
            ("sex", &self.sexes, &options.sexes),
            ("age", &self.ages, &options.ages),
            ("risk-factor disorder", &self.rf_disorders, &options.rf_disorders),
            ("risk factor", &self.risk_factors, &options.risk_factors),
            ("risk-factor sex", &self.rf_sexes, &options.sexes),
        ];

        checks
            .into_iter()
            .flat_map(|(widget, selected, offered)| {
                selected
                    .iter()
                    .filter(move |value| !offered.contains(*value))
                    .map(move |value| (widget, value.clone()))
            })
            .collect()
    }
}

/// Values offered by each widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WidgetOptions {
    pub disorders: Vec<String>,
    pub sexes: Vec<String>,
    pub ages: Vec<String>,
    pub years: Option<YearRange>,
    pub metrics: Vec<Metric>,
    pub rf_disorders: Vec<String>,
    pub risk_factors: Vec<String>,
}

impl WidgetOptions {
    pub fn from_datasets(datasets: &Datasets) -> Self {
        let disorders = &datasets.disorders;
        let years = disorders
            .iter()
            .map(|r| r.year)
            .min()
            .zip(disorders.iter().map(|r| r.year).max())
            .map(|(start, end)| YearRange { start, end });

        Self {
            disorders: distinct(disorders.iter().map(|r| r.cause.as_str())),
            sexes: distinct(disorders.iter().map(|r| r.sex.as_str())),
            ages: distinct(disorders.iter().map(|r| r.age.as_str())),
            years,
            metrics: Metric::ALL.to_vec(),
            rf_disorders: distinct(datasets.risk_factors.iter().map(|r| r.cause.as_str())),
            risk_factors: distinct(datasets.risk_factors.iter().map(|r| r.risk_factor.as_str())),
        }
    }
}

/// Distinct values in first-seen order
fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = FxHashSet::default();
    values
        .into_iter()
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
