use crate::charts::spec::StyledTable;
use crate::core::error::Result;
use crate::reporting::view::{KpiCard, Panel, PanelContent, ViewModel};
use std::fs;

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Vega runtime scripts, loaded in this order
    pub const VEGA_CDN: [&str; 3] = [
        "https://cdn.jsdelivr.net/npm/vega@5",
        "https://cdn.jsdelivr.net/npm/vega-lite@5",
        "https://cdn.jsdelivr.net/npm/vega-embed@6",
    ];

    /// Sidebar section titles, in widget order
    pub const DISORDER_WIDGET: &str = "Disorder";
    pub const SEX_WIDGET: &str = "Sex";
    pub const AGE_WIDGET: &str = "Age Group";
    pub const YEAR_WIDGET: &str = "Years";
    pub const METRIC_WIDGET: &str = "Metric";
    pub const RF_DISORDER_WIDGET: &str = "Risk Factor Disorder";
    pub const RISK_FACTOR_WIDGET: &str = "Risk Factor";
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// The rendered dashboard
    pub view: ViewModel,
    /// Timestamp when the dashboard was generated
    pub timestamp: String,
}

/// Standalone HTML page for a rendered dashboard
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard(data: &DashboardData, output_path: &str) -> Result<()> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    pub fn generate_html_content(data: &DashboardData) -> Result<String> {
        let scripts = dashboard_constants::VEGA_CDN
            .iter()
            .map(|src| format!(r#"<script src="{src}"></script>"#))
            .collect::<Vec<_>>()
            .join("\n    ");
        let body_content = Self::generate_body_content(data);
        let embed_script = Self::generate_embed_script(&data.view)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    {}
    <style>{}</style>
</head>
<body>
    {}
    <script>{}</script>
</body>
</html>"#,
            escape_html(&data.view.title),
            scripts,
            Self::generate_css(),
            body_content,
            embed_script
        ))
    }

    fn generate_css() -> &'static str {
        r#"
        :root {
            --primary-color: #2563eb;
            --muted-color: #555555;
            --bg-color: #f8fafc;
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .layout {
            display: grid;
            grid-template-columns: 260px 1fr;
            min-height: 100vh;
        }

        .sidebar {
            background: var(--card-bg);
            border-right: 1px solid var(--border-color);
            padding: 1.5rem;
        }

        .sidebar h2 {
            font-size: 1.1rem;
            margin-bottom: 1rem;
        }

        .widget { margin-bottom: 1.25rem; }

        .widget-title {
            font-size: 0.8rem;
            font-weight: 600;
            color: var(--text-secondary);
            text-transform: uppercase;
            letter-spacing: 0.5px;
            margin-bottom: 0.4rem;
        }

        .option {
            display: inline-block;
            padding: 0.15rem 0.5rem;
            margin: 0 0.25rem 0.25rem 0;
            border-radius: 6px;
            border: 1px solid var(--border-color);
            font-size: 0.8rem;
            color: var(--text-secondary);
        }

        .option.selected {
            background: var(--primary-color);
            border-color: var(--primary-color);
            color: white;
        }

        .container {
            padding: 2rem;
            max-width: 1400px;
        }

        .header {
            text-align: center;
            margin-bottom: 2rem;
        }

        .header h1 {
            font-size: 2.2rem;
            font-weight: 700;
        }

        .header p {
            color: var(--text-secondary);
            font-size: 0.9rem;
        }

        .section-title {
            font-size: 1.25rem;
            font-weight: 600;
            margin-bottom: 1rem;
        }

        .stats-grid {
            display: grid;
            grid-template-columns: repeat(6, minmax(0, 1fr));
            gap: 1rem;
            margin-bottom: 2rem;
        }

        .stat-card {
            background: var(--card-bg);
            padding: 1rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }

        .stat-label {
            font-size: 0.9em;
            font-weight: 600;
        }

        .stat-value {
            font-size: 2em;
            font-weight: 700;
            margin-top: 4px;
        }

        .stat-value.unavailable { color: var(--text-secondary); }

        .chart-container {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            margin-bottom: 2rem;
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }

        .chart-title {
            font-size: 1.1rem;
            font-weight: 600;
            text-align: center;
            margin-bottom: 1rem;
        }

        .chart { width: 100%; }

        .panel-row {
            display: grid;
            gap: 1.5rem;
        }

        .table-scroll { overflow-y: auto; }

        table {
            width: 100%;
            border-collapse: collapse;
            font-size: 0.9rem;
        }

        th, td {
            padding: 0.4rem 0.6rem;
            border-bottom: 1px solid var(--border-color);
            text-align: left;
        }

        td.numeric { text-align: right; }

        .footer {
            text-align: center;
            padding: 8px;
            font-size: 1.2em;
            color: var(--muted-color);
        }

        @media (max-width: 1024px) {
            .layout { grid-template-columns: 1fr; }
            .stats-grid { grid-template-columns: repeat(2, minmax(0, 1fr)); }
            .panel-row { grid-template-columns: 1fr !important; }
        }
        "#
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(data: &DashboardData) -> String {
        let view = &data.view;
        let sidebar = Self::generate_sidebar(view);
        let header_section = Self::generate_header_section(&view.title, &data.timestamp);
        let stats_section = Self::generate_stats_section(&view.kpi_cards);
        let main_section = Self::generate_panel(&view.main_panel);
        let row_section = Self::generate_panel_row(&view.row_panels);

        format!(
            r#"
            <div class="layout">
                {}
                <div class="container">
                    {}
                    {}
                    {}
                    {}
                    <div class="footer">{}</div>
                </div>
            </div>
            "#,
            sidebar,
            header_section,
            stats_section,
            main_section,
            row_section,
            escape_html(&view.footer)
        )
    }

    /// Generate the dashboard header section
    fn generate_header_section(title: &str, timestamp: &str) -> String {
        format!(
            r#"
            <div class="header">
                <h1>{}</h1>
                <p>Generated on {}</p>
            </div>
            "#,
            escape_html(title),
            escape_html(timestamp)
        )
    }

    /// Widget options with the selected values highlighted
    fn generate_sidebar(view: &ViewModel) -> String {
        let selection = &view.selection;
        let options = &view.options;
        let years = selection
            .year_range(options)
            .map(|range| range.to_string())
            .into_iter()
            .collect::<Vec<_>>();
        let metrics = options
            .metrics
            .iter()
            .map(|m| m.label().to_string())
            .collect::<Vec<_>>();
        let selected_metric = vec![selection.metric.label().to_string()];

        let widgets = [
            Self::generate_widget(
                dashboard_constants::DISORDER_WIDGET,
                &options.disorders,
                &selection.disorders,
            ),
            Self::generate_widget(
                dashboard_constants::SEX_WIDGET,
                &options.sexes,
                &selection.sexes,
            ),
            Self::generate_widget(
                dashboard_constants::AGE_WIDGET,
                &options.ages,
                &selection.ages,
            ),
            Self::generate_widget(dashboard_constants::YEAR_WIDGET, &years, &years),
            Self::generate_widget(
                dashboard_constants::METRIC_WIDGET,
                &metrics,
                &selected_metric,
            ),
            Self::generate_widget(
                dashboard_constants::RF_DISORDER_WIDGET,
                &options.rf_disorders,
                &selection.rf_disorders,
            ),
            Self::generate_widget(
                dashboard_constants::RISK_FACTOR_WIDGET,
                &options.risk_factors,
                &selection.risk_factors,
            ),
            Self::generate_widget(
                dashboard_constants::SEX_WIDGET,
                &options.sexes,
                &selection.rf_sexes,
            ),
        ];

        format!(
            r#"
            <aside class="sidebar">
                <h2>Filters</h2>
                {}
            </aside>
            "#,
            widgets.join("")
        )
    }

    fn generate_widget(title: &str, offered: &[String], selected: &[String]) -> String {
        let options_html = offered
            .iter()
            .map(|value| {
                let class = if selected.contains(value) {
                    "option selected"
                } else {
                    "option"
                };
                format!(r#"<span class="{}">{}</span>"#, class, escape_html(value))
            })
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"<div class="widget"><div class="widget-title">{}</div>{}</div>"#,
            escape_html(title),
            options_html
        )
    }

    /// Generate the KPI cards section
    fn generate_stats_section(cards: &[KpiCard]) -> String {
        let cards_html = cards
            .iter()
            .map(Self::generate_stat_card)
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"
            <h2 class="section-title">Key Indicators</h2>
            <div class="stats-grid">
                {}
            </div>
            "#,
            cards_html
        )
    }

    /// Generate a single KPI card
    fn generate_stat_card(card: &KpiCard) -> String {
        let value_class = if card.value.is_some() {
            "stat-value"
        } else {
            "stat-value unavailable"
        };

        format!(
            r#"
            <div class="stat-card">
                <div class="stat-label">{}</div>
                <div class="{}">{}</div>
            </div>
            "#,
            escape_html(&card.label),
            value_class,
            escape_html(&card.display_value())
        )
    }

    fn generate_panel_row(panels: &[Panel]) -> String {
        let columns = panels
            .iter()
            .map(|p| format!("{}fr", p.weight))
            .collect::<Vec<_>>()
            .join(" ");
        let panels_html = panels
            .iter()
            .map(Self::generate_panel)
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"
            <div class="panel-row" style="grid-template-columns: {};">
                {}
            </div>
            "#,
            columns, panels_html
        )
    }

    fn generate_panel(panel: &Panel) -> String {
        let content = match &panel.content {
            PanelContent::Chart(_) => {
                format!(r#"<div class="chart" id="{}"></div>"#, escape_html(&panel.id))
            }
            PanelContent::Table(table) => Self::generate_table(table),
        };

        format!(
            r#"
            <div class="chart-container">
                <h3 class="chart-title">{}</h3>
                {}
            </div>
            "#,
            escape_html(&panel.heading),
            content
        )
    }

    /// Styled table without an index column
    fn generate_table(table: &StyledTable) -> String {
        let header = table
            .columns
            .iter()
            .map(|c| format!("<th>{}</th>", escape_html(c)))
            .collect::<Vec<_>>()
            .join("");
        let body = table
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        if i == 0 {
                            format!("<td>{}</td>", escape_html(cell))
                        } else {
                            format!(r#"<td class="numeric">{}</td>"#, escape_html(cell))
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("");
                format!("<tr>{cells}</tr>")
            })
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"<div class="table-scroll" style="max-height: {}px;"><table><thead><tr>{}</tr></thead><tbody>{}</tbody></table></div>"#,
            table.height, header, body
        )
    }

    /// One `vegaEmbed` call per chart panel
    fn generate_embed_script(view: &ViewModel) -> Result<String> {
        let mut calls = Vec::new();
        for panel in view.panels() {
            if let PanelContent::Chart(spec) = &panel.content {
                // Keep "</script>" inside data from closing the tag
                let spec_json = spec.to_json()?.replace("</", "<\\/");
                calls.push(format!(
                    "vegaEmbed('#{}', {}, {{ actions: false }});",
                    panel.id, spec_json
                ));
            }
        }

        Ok(format!(
            r#"
        document.addEventListener('DOMContentLoaded', function() {{
            if (typeof vegaEmbed === 'undefined') {{
                return;
            }}
            {}
        }});
        "#,
            calls.join("\n            ")
        ))
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
