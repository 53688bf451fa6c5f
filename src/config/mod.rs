//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::selection::SelectionOverrides;
use crate::core::constants::{defaults, files, output_formats};
use crate::core::error::{DashboardError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory the dataset files are resolved against. Relative values in
    /// a config file are taken relative to that file.
    pub data_dir: Option<String>,

    /// Per-dataset file overrides (relative to `data_dir`)
    pub disorders_file: Option<String>,
    pub facilities_file: Option<String>,
    pub workforce_file: Option<String>,
    pub suicide_risk_file: Option<String>,
    pub risk_factors_file: Option<String>,

    /// Country the KPI row describes
    pub focus_country: Option<String>,

    /// Country the trend chart compares against
    pub comparison_country: Option<String>,

    /// Year of the rate KPIs (defaults to the latest year in the data)
    pub kpi_year: Option<i32>,

    /// Facility type labels used for the outpatient and inpatient KPIs
    pub outpatient_label: Option<String>,
    pub inpatient_label: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Write an HTML dashboard to this path
    pub html_dashboard_path: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Initial widget selection
    pub selection: Option<SelectionOverrides>,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| {
            DashboardError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        if let Some(base) = path.parent() {
            config.anchor_paths_at(base);
        }
        Ok(config)
    }

    /// Make relative data and output paths relative to `base`, the
    /// directory holding the config file.
    fn anchor_paths_at(&mut self, base: &Path) {
        if base.as_os_str().is_empty() {
            return;
        }

        let has_file_override = [
            &self.disorders_file,
            &self.facilities_file,
            &self.workforce_file,
            &self.suicide_risk_file,
            &self.risk_factors_file,
        ]
        .iter()
        .any(|file| file.is_some());
        // File overrides resolve against the data directory, which defaults to the config's own
        if self.data_dir.is_none() && has_file_override {
            self.data_dir = Some(files::DATA_DIR.to_string());
        }

        for value in [&mut self.data_dir, &mut self.html_dashboard_path]
            .into_iter()
            .flatten()
        {
            let anchored = if value.as_str() == files::DATA_DIR {
                base.to_path_buf()
            } else {
                base.join(value.as_str())
            };
            *value = anchored.to_string_lossy().into_owned();
        }
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        let candidates: Vec<PathBuf> = (0..=files::CONFIG_SEARCH_DEPTH)
            .map(|depth| PathBuf::from("../".repeat(depth)).join(files::CONFIG_FILE))
            .collect();
        Self::load_first_found(&candidates)
    }

    /// Load the first existing candidate. Files that fail to parse or
    /// validate are skipped with a warning.
    fn load_first_found(candidates: &[PathBuf]) -> Self {
        for path in candidates.iter().filter(|path| path.is_file()) {
            match Self::load_from_file(path) {
                Ok(config) => {
                    debug!("Using config file {}", path.display());
                    return config;
                }
                Err(e) => warn!("Ignoring config file '{}': {e}", path.display()),
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        fn take(target: &mut Option<String>, source: &Option<String>) {
            if let Some(value) = source {
                *target = Some(value.clone());
            }
        }

        // Data sources
        take(&mut self.data_dir, &cli_config.data_dir);
        take(&mut self.disorders_file, &cli_config.disorders_file);
        take(&mut self.facilities_file, &cli_config.facilities_file);
        take(&mut self.workforce_file, &cli_config.workforce_file);
        take(&mut self.suicide_risk_file, &cli_config.suicide_risk_file);
        take(&mut self.risk_factors_file, &cli_config.risk_factors_file);

        // KPIs
        take(&mut self.focus_country, &cli_config.focus_country);
        if let Some(year) = cli_config.kpi_year {
            self.kpi_year = Some(year);
        }

        // Output
        take(&mut self.output_format, &cli_config.output_format);
        take(&mut self.html_dashboard_path, &cli_config.html_dashboard_path);
        if cli_config.verbose {
            self.verbose = Some(true);
        }

        // Selection
        self.selection
            .get_or_insert_with(SelectionOverrides::default)
            .merge(&cli_config.selection);
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(DashboardError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        let labels = [
            ("focus_country", &self.focus_country),
            ("comparison_country", &self.comparison_country),
            ("outpatient_label", &self.outpatient_label),
            ("inpatient_label", &self.inpatient_label),
        ];
        for (key, value) in labels {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                return Err(DashboardError::Config(format!(
                    "'{key}' cannot be empty. Remove it to use the default."
                )));
            }
        }

        if let Some(ref selection) = self.selection {
            selection
                .validate()
                .map_err(|e| DashboardError::Config(format!("Invalid selection: {e}")))?;
        }

        Ok(())
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }
}

/// Fixed parameters of the dashboard, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSettings {
    pub focus_country: String,
    pub comparison_country: String,
    pub kpi_year: Option<i32>,
    pub outpatient_label: String,
    pub inpatient_label: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            focus_country: defaults::FOCUS_COUNTRY.to_string(),
            comparison_country: defaults::COMPARISON_COUNTRY.to_string(),
            kpi_year: None,
            outpatient_label: defaults::OUTPATIENT_LABEL.to_string(),
            inpatient_label: defaults::INPATIENT_LABEL.to_string(),
        }
    }
}

impl DashboardSettings {
    pub fn from_config(config: &Config) -> Self {
        let fallback = Self::default();
        Self {
            focus_country: config
                .focus_country
                .clone()
                .unwrap_or(fallback.focus_country),
            comparison_country: config
                .comparison_country
                .clone()
                .unwrap_or(fallback.comparison_country),
            kpi_year: config.kpi_year,
            outpatient_label: config
                .outpatient_label
                .clone()
                .unwrap_or(fallback.outpatient_label),
            inpatient_label: config
                .inpatient_label
                .clone()
                .unwrap_or(fallback.inpatient_label),
        }
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Data sources
    pub data_dir: Option<String>,          // --data-dir
    pub disorders_file: Option<String>,    // --disorders-file
    pub facilities_file: Option<String>,   // --facilities-file
    pub workforce_file: Option<String>,    // --workforce-file
    pub suicide_risk_file: Option<String>, // --suicide-risk-file
    pub risk_factors_file: Option<String>, // --risk-factors-file

    // Selection
    pub selection: SelectionOverrides,

    // KPIs
    pub focus_country: Option<String>, // --country
    pub kpi_year: Option<i32>,         // --kpi-year

    // Output & format
    pub quiet: bool,                         // --quiet
    pub verbose: bool,                       // --verbose
    pub output_format: Option<String>,       // --format
    pub html_dashboard_path: Option<String>, // --html-dashboard
    pub no_progress: bool,                   // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
