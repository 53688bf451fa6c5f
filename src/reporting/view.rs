//! Presentation assembly
//!
//! [`render`] is the single entry point front ends call: it takes the loaded
//! datasets and an explicit [`Selection`] and returns everything a page
//! needs, independent of how it is drawn.

use serde::Serialize;

use crate::analysis::metrics::{Kpis, compute_kpis};
use crate::analysis::selection::{Selection, WidgetOptions};
use crate::charts::builders::{
    metric_trend_chart, risk_factor_chart, suicide_risk_chart, workforce_table,
};
use crate::charts::spec::{ChartSpec, StyledTable};
use crate::config::DashboardSettings;
use crate::core::constants::{defaults, display};
use crate::core::error::Result;
use crate::data::Datasets;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: String,
    /// `None` when the indicator could not be computed
    pub value: Option<f64>,
}

impl KpiCard {
    fn new(label: String, value: Option<f64>) -> Self {
        Self { label, value }
    }

    /// Value with one decimal, or `n/a`
    pub fn display_value(&self) -> String {
        self.value
            .map_or_else(|| display::UNAVAILABLE.to_string(), |v| format!("{v:.1}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spec", rename_all = "lowercase")]
pub enum PanelContent {
    Chart(ChartSpec),
    Table(StyledTable),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Stable identifier, usable as a DOM id
    pub id: String,
    pub heading: String,
    /// Relative column width within its row
    pub weight: u8,
    pub content: PanelContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub kpis: Kpis,
    pub kpi_cards: Vec<KpiCard>,
    pub main_panel: Panel,
    pub row_panels: Vec<Panel>,
    pub footer: String,
    pub selection: Selection,
    pub options: WidgetOptions,
}

impl ViewModel {
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        std::iter::once(&self.main_panel).chain(self.row_panels.iter())
    }
}

fn kpi_cards(kpis: &Kpis) -> Vec<KpiCard> {
    let year = kpis
        .year
        .map_or_else(|| display::UNAVAILABLE.to_string(), |y| y.to_string());
    let survey = defaults::WHO_SURVEY_YEAR;

    vec![
        KpiCard::new(format!("Prevalence ({year}, per 100k)"), kpis.prevalence),
        KpiCard::new(format!("Incidence ({year}, per 100k)"), kpis.incidence),
        KpiCard::new(format!("YLDs ({year}, per 100k)"), kpis.ylds),
        KpiCard::new(
            format!("HC Workers ({survey}, per 100k)"),
            Some(kpis.worker_density),
        ),
        KpiCard::new(
            format!("Outpatients ({survey}, per 100k)"),
            kpis.outpatient_rate,
        ),
        KpiCard::new(format!("Inpatients ({survey}, per 100k)"), kpis.inpatient_rate),
    ]
}

/// Build the complete dashboard for one selection.
pub fn render(
    datasets: &Datasets,
    selection: &Selection,
    settings: &DashboardSettings,
) -> Result<ViewModel> {
    let options = WidgetOptions::from_datasets(datasets);
    let kpis = compute_kpis(
        &datasets.disorders,
        &datasets.facilities,
        &datasets.workforce,
        settings,
        selection,
    )?;

    let main_panel = Panel {
        id: "metric-trend".to_string(),
        heading: format!(
            "{} per 100k for {} — {} vs {}",
            selection.metric.label(),
            selection.disorders.join(", "),
            settings.comparison_country,
            settings.focus_country
        ),
        weight: 1,
        content: PanelContent::Chart(metric_trend_chart(
            &datasets.disorders,
            selection,
            selection.year_range(&options),
            settings,
        )?),
    };

    let row_panels = vec![
        Panel {
            id: "suicide-risk".to_string(),
            heading: format!(
                "Suicide Ideation Risk by Disorder ({})",
                defaults::SUICIDE_RISK_YEAR
            ),
            weight: 2,
            content: PanelContent::Chart(suicide_risk_chart(&datasets.suicide_risk)?),
        },
        Panel {
            id: "workforce".to_string(),
            heading: format!(
                "HC Workers per 100k by Profession ({})",
                defaults::WHO_SURVEY_YEAR
            ),
            weight: 2,
            content: PanelContent::Table(workforce_table(&datasets.workforce)),
        },
        Panel {
            id: "risk-factors".to_string(),
            heading: format!(
                "YLD Rate by Age & Risk Factor for {} ({})",
                selection.rf_disorders.join(", "),
                defaults::RISK_FACTOR_YEAR
            ),
            weight: 3,
            content: PanelContent::Chart(risk_factor_chart(&datasets.risk_factors, selection)?),
        },
    ];

    Ok(ViewModel {
        title: display::DASHBOARD_TITLE.to_string(),
        kpi_cards: kpi_cards(&kpis),
        kpis,
        main_panel,
        row_panels,
        footer: display::FOOTER.to_string(),
        selection: selection.clone(),
        options,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::types::Metric;
    use crate::data::{
        DisorderRecord, FacilityRecord, RiskFactorRecord, SuicideRiskRecord, WorkforceRecord,
    };

    fn disorder(country: &str, sex: &str, year: i32, prevalence: f64) -> DisorderRecord {
        DisorderRecord {
            country: country.to_string(),
            cause: "Anxiety disorders".to_string(),
            sex: sex.to_string(),
            age: "All ages".to_string(),
            year,
            prevalence_rate: prevalence,
            incidence_rate: prevalence / 10.0,
            ylds_rate: prevalence / 5.0,
        }
    }

    pub(crate) fn sample_datasets() -> Datasets {
        Datasets {
            disorders: vec![
                disorder("Lebanon", "Female", 2021, 1000.0),
                disorder("Lebanon", "Male", 2021, 600.0),
                disorder("Global", "Female", 2021, 4000.0),
                disorder("Lebanon", "Female", 2020, 950.0),
            ],
            facilities: vec![
                FacilityRecord {
                    facility_type: "Outpatient".to_string(),
                    users_per_100k: 350.5,
                },
                FacilityRecord {
                    facility_type: "Mental Hospitals".to_string(),
                    users_per_100k: 20.4,
                },
            ],
            workforce: vec![
                WorkforceRecord {
                    profession: Some("Psychiatrists".to_string()),
                    workers_per_100k: Some(1.25),
                },
                WorkforceRecord {
                    profession: Some("Nurses".to_string()),
                    workers_per_100k: Some(2.5),
                },
            ],
            suicide_risk: vec![SuicideRiskRecord {
                disorder: "Depression".to_string(),
                odds_ratio: 3.0,
                ci_lower: 2.0,
                ci_higher: 10.0,
            }],
            risk_factors: vec![RiskFactorRecord {
                cause: "Anxiety disorders".to_string(),
                risk_factor: "Behavioral risks".to_string(),
                sex: "Female".to_string(),
                age: "20-24 years".to_string(),
                ylds_rate_per_100k: 12.5,
                ci_lower: 10.0,
                ci_upper: 15.0,
            }],
        }
    }

    #[test]
    fn test_render_layout() -> Result<()> {
        let view = render(
            &sample_datasets(),
            &Selection::default(),
            &DashboardSettings::default(),
        )?;

        assert_eq!(view.title, "Mental Health Disorders Dashboard");
        assert_eq!(view.footer, "Data sources: GBD (2021) & WHO (2015)");
        assert_eq!(
            view.main_panel.heading,
            "Prevalence Rate per 100k for Anxiety disorders — Global vs Lebanon"
        );

        let headings: Vec<&str> = view.row_panels.iter().map(|p| p.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "Suicide Ideation Risk by Disorder (2014)",
                "HC Workers per 100k by Profession (2015)",
                "YLD Rate by Age & Risk Factor for Anxiety disorders (2021)",
            ]
        );
        let weights: Vec<u8> = view.row_panels.iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![2, 2, 3]);
        assert!(matches!(view.row_panels[1].content, PanelContent::Table(_)));
        assert_eq!(view.panels().count(), 4);
        Ok(())
    }

    #[test]
    fn test_render_kpi_cards() -> Result<()> {
        let view = render(
            &sample_datasets(),
            &Selection::default(),
            &DashboardSettings::default(),
        )?;

        let labels: Vec<&str> = view.kpi_cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Prevalence (2021, per 100k)",
                "Incidence (2021, per 100k)",
                "YLDs (2021, per 100k)",
                "HC Workers (2015, per 100k)",
                "Outpatients (2015, per 100k)",
                "Inpatients (2015, per 100k)",
            ]
        );
        assert_eq!(view.kpi_cards[0].display_value(), "800.0");
        assert_eq!(view.kpi_cards[3].display_value(), "3.8");
        assert_eq!(view.kpi_cards[4].display_value(), "350.5");
        Ok(())
    }

    #[test]
    fn test_render_unmatched_selection_is_unavailable() -> Result<()> {
        let selection = Selection {
            disorders: vec!["Eating disorders".to_string()],
            metric: Metric::Ylds,
            ..Default::default()
        };
        let view = render(&sample_datasets(), &selection, &DashboardSettings::default())?;

        assert_eq!(view.kpis.prevalence, None);
        assert_eq!(view.kpi_cards[0].display_value(), "n/a");
        assert!(view.main_panel.heading.starts_with("YLDs Rate per 100k for Eating disorders"));
        match &view.main_panel.content {
            PanelContent::Chart(spec) => assert!(spec.rows().is_empty()),
            other => panic!("Expected a chart, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_view_model_serializes_panel_kind() -> Result<()> {
        let view = render(
            &sample_datasets(),
            &Selection::default(),
            &DashboardSettings::default(),
        )?;
        let value = serde_json::to_value(&view)?;
        assert_eq!(value["main_panel"]["content"]["kind"], "chart");
        assert_eq!(value["row_panels"][1]["content"]["kind"], "table");
        assert_eq!(value["selection"]["metric"], "prevalence");
        Ok(())
    }
}
