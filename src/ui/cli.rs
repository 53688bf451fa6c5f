// Command-line interface definitions and parsing for mhdash

use crate::analysis::selection::SelectionOverrides;
use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::core::types::Metric;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Data Sources
    /// Directory containing the dataset files (default: current directory)
    #[arg(short = 'd', long, value_name = "DIR", help_heading = "Data Sources")]
    pub data_dir: Option<String>,

    /// Disorder rates CSV, relative to the data directory
    #[arg(long, value_name = "FILE", help_heading = "Data Sources")]
    pub disorders_file: Option<String>,

    /// Facility usage CSV, relative to the data directory
    #[arg(long, value_name = "FILE", help_heading = "Data Sources")]
    pub facilities_file: Option<String>,

    /// Health workforce CSV, relative to the data directory
    #[arg(long, value_name = "FILE", help_heading = "Data Sources")]
    pub workforce_file: Option<String>,

    /// Suicide risk CSV, relative to the data directory
    #[arg(long, value_name = "FILE", help_heading = "Data Sources")]
    pub suicide_risk_file: Option<String>,

    /// Risk factor CSV, relative to the data directory
    #[arg(long, value_name = "FILE", help_heading = "Data Sources")]
    pub risk_factors_file: Option<String>,

    // Selection
    /// Disorders to show (comma-separated)
    #[arg(long, value_name = "LIST", help_heading = "Selection")]
    pub disorder: Option<String>,

    /// Sexes to show (comma-separated)
    #[arg(long, value_name = "LIST", help_heading = "Selection")]
    pub sex: Option<String>,

    /// Age groups to show (comma-separated)
    #[arg(long, value_name = "LIST", help_heading = "Selection")]
    pub age: Option<String>,

    /// First year of the trend chart (inclusive)
    #[arg(long, value_name = "YEAR", help_heading = "Selection")]
    pub year_from: Option<i32>,

    /// Last year of the trend chart (inclusive)
    #[arg(long, value_name = "YEAR", help_heading = "Selection")]
    pub year_to: Option<i32>,

    /// Rate plotted in the trend chart
    #[arg(long, value_enum, value_name = "METRIC", help_heading = "Selection")]
    pub metric: Option<Metric>,

    /// Disorders for the risk factor chart (comma-separated)
    #[arg(long, value_name = "LIST", help_heading = "Selection")]
    pub rf_disorder: Option<String>,

    /// Risk factors to show (comma-separated)
    #[arg(long, value_name = "LIST", help_heading = "Selection")]
    pub risk_factor: Option<String>,

    /// Sexes for the risk factor chart (comma-separated)
    #[arg(long, value_name = "LIST", help_heading = "Selection")]
    pub rf_sex: Option<String>,

    // Indicators
    /// Country the key indicators describe (default: Lebanon)
    #[arg(long, value_name = "NAME", help_heading = "Indicators")]
    pub country: Option<String>,

    /// Year of the rate indicators (default: latest year in the data)
    #[arg(long, value_name = "YEAR", help_heading = "Indicators")]
    pub kpi_year: Option<i32>,

    // Output & Verbosity
    /// Suppress all output except errors
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    /// Write a standalone HTML dashboard
    #[arg(long, value_name = "PATH", help_heading = "Output & Verbosity")]
    pub html_dashboard: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the values each filter can take
    Options,
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Split a comma-separated list, dropping blank entries
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter_map(|s| {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.trim().to_string())
            }
        })
        .collect()
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let list = |value: &Option<String>| value.as_deref().map(parse_list);

    CliConfig {
        // Data sources
        data_dir: cli.data_dir.clone(),
        disorders_file: cli.disorders_file.clone(),
        facilities_file: cli.facilities_file.clone(),
        workforce_file: cli.workforce_file.clone(),
        suicide_risk_file: cli.suicide_risk_file.clone(),
        risk_factors_file: cli.risk_factors_file.clone(),

        // Selection
        selection: SelectionOverrides {
            disorders: list(&cli.disorder),
            sexes: list(&cli.sex),
            ages: list(&cli.age),
            year_from: cli.year_from,
            year_to: cli.year_to,
            metric: cli.metric,
            rf_disorders: list(&cli.rf_disorder),
            risk_factors: list(&cli.risk_factor),
            rf_sexes: list(&cli.rf_sex),
        },

        // KPIs
        focus_country: cli.country.clone(),
        kpi_year: cli.kpi_year,

        // Output & format
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        html_dashboard_path: cli.html_dashboard.clone(),
        no_progress: cli.no_progress,

        // Configuration
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
