use serde::Serialize;

use crate::analysis::selection::{Selection, YearRange};
use crate::charts::spec::{ChartSpec, Encoding, FieldDef, Mark, MarkKind, SortOrder, StyledTable};
use crate::config::DashboardSettings;
use crate::core::constants::charts;
use crate::core::error::Result;
use crate::data::{DisorderRecord, RiskFactorRecord, SuicideRiskRecord, WorkforceRecord};

pub const WORKFORCE_COLUMNS: [&str; 2] = ["Profession", "Workers per 100k"];

/// A record plus the color key it is drawn under
#[derive(Debug, Serialize)]
struct LegendRow<'a, T> {
    #[serde(flatten)]
    record: &'a T,
    legend: String,
}

fn legend(parts: &[&str]) -> String {
    parts.join(charts::LEGEND_SEPARATOR)
}

/// Grouped bars of the selected metric per year, focus country next to the
/// comparison country.
pub fn metric_trend_chart(
    disorders: &[DisorderRecord],
    selection: &Selection,
    years: Option<YearRange>,
    settings: &DashboardSettings,
) -> Result<ChartSpec> {
    let rows: Vec<LegendRow<'_, DisorderRecord>> = disorders
        .iter()
        .filter(|r| {
            (r.country == settings.focus_country || r.country == settings.comparison_country)
                && selection.disorders.contains(&r.cause)
                && selection.sexes.contains(&r.sex)
                && selection.ages.contains(&r.age)
                && years.is_none_or(|range| range.contains(r.year))
        })
        .map(|record| LegendRow {
            record,
            legend: legend(&[record.country.as_str(), record.sex.as_str(), record.age.as_str()]),
        })
        .collect();

    let metric = selection.metric;
    let encoding = Encoding {
        x: Some(FieldDef::ordinal("year").title("Year")),
        x_offset: Some(FieldDef::nominal("country")),
        y: Some(FieldDef::quantitative(metric.column()).title(&format!("{} per 100k", metric.label()))),
        color: Some(FieldDef::nominal("legend")),
        tooltip: vec![
            FieldDef::ordinal("year").title("Year"),
            FieldDef::nominal("legend").title("Country | Sex | Age"),
            FieldDef::quantitative(metric.column())
                .title(metric.label())
                .format(".1f"),
        ],
        ..Default::default()
    };

    Ok(ChartSpec::new(&rows, charts::TREND_HEIGHT)?.with_layer(Mark::new(MarkKind::Bar), encoding))
}

/// Confidence interval bars with the odds ratio drawn as a tick.
///
/// The x axis runs from zero to 10% past the widest interval.
pub fn suicide_risk_chart(risks: &[SuicideRiskRecord]) -> Result<ChartSpec> {
    let mut x = FieldDef::quantitative("ci_lower").title("Risk increase by number of folds (x)");
    if let Some(max_upper) = risks.iter().map(|r| r.ci_higher).reduce(f64::max) {
        x = x.domain(0.0, max_upper * charts::RANGE_AXIS_PADDING);
    }

    let interval = Encoding {
        y: Some(
            FieldDef::nominal("disorder")
                .sort_by("or", SortOrder::Descending)
                .title(""),
        ),
        x: Some(x),
        x2: Some(FieldDef::quantitative("ci_higher")),
        ..Default::default()
    };
    let estimate = Encoding {
        y: Some(FieldDef::nominal("disorder")),
        x: Some(FieldDef::quantitative("or")),
        ..Default::default()
    };

    Ok(ChartSpec::new(risks, charts::SUICIDE_RISK_HEIGHT)?
        .with_layer(
            Mark::new(MarkKind::Bar)
                .color(charts::INTERVAL_COLOR)
                .size(charts::INTERVAL_SIZE),
            interval,
        )
        .with_layer(
            Mark::new(MarkKind::Tick)
                .color(charts::ESTIMATE_COLOR)
                .size(charts::ESTIMATE_SIZE)
                .thickness(charts::ESTIMATE_THICKNESS),
            estimate,
        ))
}

/// Professions with their worker density; incomplete rows are dropped.
pub fn workforce_table(workforce: &[WorkforceRecord]) -> StyledTable {
    let rows = workforce
        .iter()
        .filter_map(|r| match (&r.profession, r.workers_per_100k) {
            (Some(profession), Some(workers)) => {
                Some(vec![profession.clone(), format!("{workers:.2}")])
            }
            _ => None,
        })
        .collect();

    StyledTable {
        columns: WORKFORCE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        height: charts::WORKFORCE_TABLE_HEIGHT,
    }
}

/// Grouped bars of YLD rate per age group, one color per risk factor and sex.
pub fn risk_factor_chart(
    risk_factors: &[RiskFactorRecord],
    selection: &Selection,
) -> Result<ChartSpec> {
    let rows: Vec<LegendRow<'_, RiskFactorRecord>> = risk_factors
        .iter()
        .filter(|r| {
            selection.rf_disorders.contains(&r.cause)
                && selection.risk_factors.contains(&r.risk_factor)
                && selection.rf_sexes.contains(&r.sex)
        })
        .map(|record| LegendRow {
            record,
            legend: legend(&[record.risk_factor.as_str(), record.sex.as_str()]),
        })
        .collect();

    let encoding = Encoding {
        x: Some(FieldDef::nominal("age").title("Age Group")),
        y: Some(FieldDef::quantitative("ylds_rate_per_100k").title("YLD per 100k")),
        color: Some(FieldDef::nominal("legend")),
        ..Default::default()
    };

    Ok(ChartSpec::new(&rows, charts::RISK_FACTOR_HEIGHT)?
        .with_layer(Mark::new(MarkKind::Bar), encoding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Metric;
    use serde_json::json;

    fn disorder(country: &str, sex: &str, year: i32) -> DisorderRecord {
        DisorderRecord {
            country: country.to_string(),
            cause: "Anxiety disorders".to_string(),
            sex: sex.to_string(),
            age: "All ages".to_string(),
            year,
            prevalence_rate: 100.0,
            incidence_rate: 10.0,
            ylds_rate: 5.0,
        }
    }

    fn risk(disorder: &str, or: f64, low: f64, high: f64) -> SuicideRiskRecord {
        SuicideRiskRecord {
            disorder: disorder.to_string(),
            odds_ratio: or,
            ci_lower: low,
            ci_higher: high,
        }
    }

    fn risk_factor(risk_factor: &str, sex: &str, age: &str) -> RiskFactorRecord {
        RiskFactorRecord {
            cause: "Anxiety disorders".to_string(),
            risk_factor: risk_factor.to_string(),
            sex: sex.to_string(),
            age: age.to_string(),
            ylds_rate_per_100k: 12.5,
            ci_lower: 10.0,
            ci_upper: 15.0,
        }
    }

    #[test]
    fn test_metric_trend_chart_filters_and_labels() -> Result<()> {
        let disorders = vec![
            disorder("Lebanon", "Female", 2021),
            disorder("Global", "Male", 2020),
            disorder("Jordan", "Female", 2021),
            disorder("Lebanon", "Female", 1995),
        ];
        let selection = Selection {
            metric: Metric::Incidence,
            ..Default::default()
        };
        let years = Some(YearRange::new(2000, 2021)?);

        let spec = metric_trend_chart(&disorders, &selection, years, &DashboardSettings::default())?;
        assert_eq!(spec.height, 350);
        assert_eq!(spec.rows().len(), 2);
        assert_eq!(spec.rows()[0]["legend"], "Lebanon | Female | All ages");
        assert_eq!(spec.rows()[1]["legend"], "Global | Male | All ages");
        assert_eq!(spec.rows()[0]["incidence_rate"], 10.0);

        let encoding = &spec.layer[0].encoding;
        let y = encoding.y.as_ref().unwrap();
        assert_eq!(y.field, "incidence_rate");
        assert_eq!(y.title.as_deref(), Some("Incidence Rate per 100k"));
        assert_eq!(encoding.tooltip.len(), 3);
        assert_eq!(encoding.tooltip[2].format.as_deref(), Some(".1f"));
        Ok(())
    }

    #[test]
    fn test_metric_trend_chart_without_year_bound() -> Result<()> {
        let disorders = vec![disorder("Lebanon", "Female", 1990)];
        let spec = metric_trend_chart(
            &disorders,
            &Selection::default(),
            None,
            &DashboardSettings::default(),
        )?;
        assert_eq!(spec.rows().len(), 1);
        Ok(())
    }

    #[test]
    fn test_suicide_risk_domain_pads_widest_interval() -> Result<()> {
        let risks = vec![
            risk("Depression", 3.0, 2.0, 4.0),
            risk("Anxiety", 2.0, 1.5, 10.0),
        ];
        let spec = suicide_risk_chart(&risks)?;
        assert_eq!(spec.height, 250);
        assert_eq!(spec.layer.len(), 2);

        let x = spec.layer[0].encoding.x.as_ref().unwrap();
        let domain = x.scale.as_ref().unwrap().domain;
        assert_eq!(domain[0], 0.0);
        assert!((domain[1] - 11.0).abs() < 1e-9);

        let value = serde_json::to_value(&spec)?;
        assert_eq!(
            value["layer"][0]["mark"],
            json!({"type": "bar", "color": "#ddd", "size": 16.0})
        );
        assert_eq!(
            value["layer"][1]["mark"],
            json!({"type": "tick", "color": "red", "size": 20.0, "thickness": 2.0})
        );
        assert_eq!(
            value["layer"][0]["encoding"]["y"]["sort"],
            json!({"field": "or", "order": "descending"})
        );
        assert_eq!(value["layer"][1]["encoding"]["x"]["field"], "or");
        assert_eq!(value["data"]["values"][0]["or"], 3.0);
        Ok(())
    }

    #[test]
    fn test_suicide_risk_empty_has_no_domain() -> Result<()> {
        let spec = suicide_risk_chart(&[])?;
        assert!(spec.layer[0].encoding.x.as_ref().unwrap().scale.is_none());
        assert!(spec.rows().is_empty());
        Ok(())
    }

    #[test]
    fn test_workforce_table_formats_and_drops_incomplete_rows() {
        let workforce = vec![
            WorkforceRecord {
                profession: Some("Psychiatrists".to_string()),
                workers_per_100k: Some(1.234),
            },
            WorkforceRecord {
                profession: None,
                workers_per_100k: Some(3.0),
            },
            WorkforceRecord {
                profession: Some("Nurses".to_string()),
                workers_per_100k: None,
            },
            WorkforceRecord {
                profession: Some("Psychologists".to_string()),
                workers_per_100k: Some(7.0),
            },
        ];

        let table = workforce_table(&workforce);
        assert_eq!(table.columns, vec!["Profession", "Workers per 100k"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Psychiatrists".to_string(), "1.23".to_string()],
                vec!["Psychologists".to_string(), "7.00".to_string()],
            ]
        );
        assert_eq!(table.height, 280);
    }

    #[test]
    fn test_risk_factor_chart_filters_on_all_three_sets() -> Result<()> {
        let rows = vec![
            risk_factor("Behavioral risks", "Female", "20-24 years"),
            risk_factor("Behavioral risks", "Male", "20-24 years"),
            risk_factor("Metabolic risks", "Female", "20-24 years"),
        ];
        let selection = Selection {
            rf_sexes: vec!["Female".to_string()],
            ..Default::default()
        };

        let spec = risk_factor_chart(&rows, &selection)?;
        assert_eq!(spec.rows().len(), 1);
        assert_eq!(spec.rows()[0]["legend"], "Behavioral risks | Female");
        assert_eq!(spec.rows()[0]["age"], "20-24 years");

        let encoding = &spec.layer[0].encoding;
        assert_eq!(encoding.x.as_ref().unwrap().title.as_deref(), Some("Age Group"));
        assert_eq!(encoding.y.as_ref().unwrap().title.as_deref(), Some("YLD per 100k"));
        Ok(())
    }
}
