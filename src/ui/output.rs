//! Output formatting and display logic for mhdash

use crate::analysis::selection::WidgetOptions;
use crate::charts::spec::StyledTable;
use crate::core::constants::{display, output_formats};
use crate::core::error::Result;
use crate::reporting::view::{PanelContent, ViewModel};
use crate::ui::color::{Colors, colorize, heading, kpi_color};

/// Display a rendered dashboard in the requested format
pub fn display_view(view: &ViewModel, output_format: &str, quiet: bool) -> Result<()> {
    let rendered = match output_format {
        output_formats::MINIMAL => format_minimal(view),
        output_formats::JSON => format_json(view)?,
        _ if quiet => return Ok(()),
        _ => format_text(view),
    };
    println!("{rendered}");
    Ok(())
}

/// One `label: value` line per KPI, no colors
pub fn format_minimal(view: &ViewModel) -> String {
    view.kpi_cards
        .iter()
        .map(|card| format!("{}: {}", card.label, card.display_value()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The whole view-model, for other front ends
pub fn format_json(view: &ViewModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

/// Colored KPI listing followed by a summary of every panel
pub fn format_text(view: &ViewModel) -> String {
    let mut lines = vec![heading(&view.title, Colors::BRIGHT_CYAN), String::new()];

    lines.push(heading("Key Indicators", Colors::BRIGHT_CYAN));
    let width = view
        .kpi_cards
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);
    for card in &view.kpi_cards {
        lines.push(format!(
            "  {:<width$}  {}",
            card.label,
            colorize(&card.display_value(), kpi_color(card.value.is_some())),
        ));
    }

    for panel in view.panels() {
        lines.push(String::new());
        lines.push(heading(&panel.heading, Colors::BRIGHT_GREEN));
        match &panel.content {
            PanelContent::Chart(spec) => {
                let rows = spec.rows().len();
                if rows == 0 {
                    lines.push(colorize("  No data for the current selection", Colors::YELLOW));
                } else {
                    lines.push(format!("  {rows} data point(s)"));
                }
            }
            PanelContent::Table(table) => lines.extend(format_table(table)),
        }
    }

    lines.push(String::new());
    lines.push(colorize(&view.footer, Colors::DIM));
    lines.join("\n")
}

fn format_table(table: &StyledTable) -> Vec<String> {
    if table.rows.is_empty() {
        return vec![colorize("  No rows", Colors::YELLOW)];
    }

    let widths: Vec<usize> = (0..table.columns.len())
        .map(|i| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .chain(std::iter::once(&table.columns[i]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                if i == 0 {
                    format!("{cell:<w$}")
                } else {
                    format!("{cell:>w$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    std::iter::once(render_row(table.columns.as_slice()))
        .chain(table.rows.iter().map(|row| render_row(row.as_slice())))
        .map(|line| format!("  {}", line.trim_end()))
        .collect()
}

/// List what each filter can be set to
pub fn format_options(options: &WidgetOptions) -> String {
    let years = options
        .years
        .map_or_else(|| display::UNAVAILABLE.to_string(), |range| range.to_string());
    let metrics = options
        .metrics
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>();

    let sections: [(&str, String); 7] = [
        ("Disorders (--disorder)", options.disorders.join(", ")),
        ("Sexes (--sex, --rf-sex)", options.sexes.join(", ")),
        ("Age groups (--age)", options.ages.join(", ")),
        ("Years (--year-from, --year-to)", years),
        ("Metrics (--metric)", metrics.join(", ")),
        ("Risk factor disorders (--rf-disorder)", options.rf_disorders.join(", ")),
        ("Risk factors (--risk-factor)", options.risk_factors.join(", ")),
    ];

    sections
        .iter()
        .map(|(title, values)| {
            format!(
                "{}: {}",
                colorize(title, Colors::BRIGHT_CYAN),
                colorize(values, Colors::BRIGHT_WHITE)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn display_options(options: &WidgetOptions) {
    println!("{}", format_options(options));
}
