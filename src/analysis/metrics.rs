use log::warn;
use serde::Serialize;

use crate::analysis::selection::Selection;
use crate::config::DashboardSettings;
use crate::core::error::{DashboardError, Result};
use crate::data::{DisorderRecord, FacilityRecord, WorkforceRecord};

/// Prevalence, incidence and YLD rates for the KPI row.
///
/// A rate is `None` when no disorder row matched the filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateKpis {
    pub prevalence: Option<f64>,
    pub incidence: Option<f64>,
    pub ylds: Option<f64>,
    pub matched_rows: usize,
}

/// The six headline indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub year: Option<i32>,
    pub prevalence: Option<f64>,
    pub incidence: Option<f64>,
    pub ylds: Option<f64>,
    pub worker_density: f64,
    pub outpatient_rate: Option<f64>,
    pub inpatient_rate: Option<f64>,
}

/// Most recent year in the disorder table
pub fn latest_year(disorders: &[DisorderRecord]) -> Option<i32> {
    disorders.iter().map(|r| r.year).max()
}

/// Rates for `country` in `year`, restricted to the selected causes, sexes and ages.
///
/// One matching row gives its values verbatim; several are averaged.
pub fn rate_kpis(
    disorders: &[DisorderRecord],
    country: &str,
    year: i32,
    selection: &Selection,
) -> RateKpis {
    let matched: Vec<&DisorderRecord> = disorders
        .iter()
        .filter(|r| {
            r.country == country
                && r.year == year
                && selection.disorders.contains(&r.cause)
                && selection.sexes.contains(&r.sex)
                && selection.ages.contains(&r.age)
        })
        .collect();

    match matched.as_slice() {
        [] => RateKpis {
            prevalence: None,
            incidence: None,
            ylds: None,
            matched_rows: 0,
        },
        [row] => RateKpis {
            prevalence: Some(row.prevalence_rate),
            incidence: Some(row.incidence_rate),
            ylds: Some(row.ylds_rate),
            matched_rows: 1,
        },
        rows => RateKpis {
            prevalence: mean(rows.iter().map(|r| r.prevalence_rate)),
            incidence: mean(rows.iter().map(|r| r.incidence_rate)),
            ylds: mean(rows.iter().map(|r| r.ylds_rate)),
            matched_rows: rows.len(),
        },
    }
}

/// Total mental-health workers per 100k; blank cells are skipped.
pub fn worker_density(workforce: &[WorkforceRecord]) -> f64 {
    workforce.iter().filter_map(|r| r.workers_per_100k).sum()
}

/// Users per 100k of the facility type labelled `label`.
///
/// No match gives `None`; more than one match is an error since the
/// indicator is a single number.
pub fn facility_rate(facilities: &[FacilityRecord], label: &str) -> Result<Option<f64>> {
    let mut matches = facilities.iter().filter(|r| r.facility_type == label);

    match (matches.next(), matches.next()) {
        (None, _) => Ok(None),
        (Some(row), None) => Ok(Some(row.users_per_100k)),
        (Some(_), Some(_)) => Err(DashboardError::AmbiguousValue(format!(
            "{} facility rows are labelled '{label}', expected exactly one",
            2 + matches.count()
        ))),
    }
}

/// Compute every KPI for one render.
pub fn compute_kpis(
    disorders: &[DisorderRecord],
    facilities: &[FacilityRecord],
    workforce: &[WorkforceRecord],
    settings: &DashboardSettings,
    selection: &Selection,
) -> Result<Kpis> {
    let year = settings.kpi_year.or_else(|| latest_year(disorders));

    let rates = match year {
        Some(year) => rate_kpis(disorders, &settings.focus_country, year, selection),
        None => RateKpis {
            prevalence: None,
            incidence: None,
            ylds: None,
            matched_rows: 0,
        },
    };
    if rates.matched_rows == 0 {
        warn!(
            "No disorder rows match {} in {} for the current selection; rate KPIs are unavailable",
            settings.focus_country,
            year.map_or_else(|| "any year".to_string(), |y| y.to_string())
        );
    }

    let outpatient_rate = facility_rate(facilities, &settings.outpatient_label)?;
    let inpatient_rate = facility_rate(facilities, &settings.inpatient_label)?;
    for (label, rate) in [
        (&settings.outpatient_label, outpatient_rate),
        (&settings.inpatient_label, inpatient_rate),
    ] {
        if rate.is_none() {
            warn!("No facility row is labelled '{label}'");
        }
    }

    Ok(Kpis {
        year,
        prevalence: rates.prevalence,
        incidence: rates.incidence,
        ylds: rates.ylds,
        worker_density: worker_density(workforce),
        outpatient_rate,
        inpatient_rate,
    })
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
