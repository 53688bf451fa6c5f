/// Application-wide constants.
///
/// Dataset file names, fixed labels and chart geometry live here so the
/// loaders, builders and renderers agree on them.
/// Output format constants
pub mod output_formats {
    /// Text output format - colored KPI listing with panel summaries
    pub const TEXT: &str = "text";
    /// JSON output format - the full view-model for other front ends
    pub const JSON: &str = "json";
    /// Minimal output format - one `label: value` line per KPI
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Default dataset file names, resolved against the data directory
pub mod files {
    pub const DISORDERS: &str = "dataset_mh_disorders_v2.csv";
    pub const FACILITIES: &str = "nb_of_facilities.csv";
    pub const WORKFORCE: &str = "nb_of_hr.csv";
    pub const SUICIDE_RISK: &str = "increased_suicide_risk_by_MH_disorder.csv";
    pub const RISK_FACTORS: &str = "risk_factors.csv";

    /// Default data directory
    pub const DATA_DIR: &str = ".";

    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE: &str = ".mhdash.toml";
    /// How many parent directories are searched for the config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Defaults for the KPI row and the widget selection
pub mod defaults {
    pub const FOCUS_COUNTRY: &str = "Lebanon";
    pub const COMPARISON_COUNTRY: &str = "Global";
    pub const OUTPATIENT_LABEL: &str = "Outpatient";
    pub const INPATIENT_LABEL: &str = "Mental Hospitals";

    pub const DISORDER: &str = "Anxiety disorders";
    pub const SEXES: [&str; 2] = ["Female", "Male"];
    pub const AGE: &str = "All ages";
    pub const RISK_FACTOR: &str = "Behavioral risks";

    /// Survey year of the WHO staffing and facility figures
    pub const WHO_SURVEY_YEAR: i32 = 2015;
    /// Survey year of the suicide-risk meta-analysis
    pub const SUICIDE_RISK_YEAR: i32 = 2014;
    /// GBD round of the risk-factor attribution
    pub const RISK_FACTOR_YEAR: i32 = 2021;
}

/// Chart geometry and styling
pub mod charts {
    /// Vega-Lite schema every chart spec declares
    pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

    pub const TREND_HEIGHT: u32 = 350;
    pub const SUICIDE_RISK_HEIGHT: u32 = 250;
    pub const WORKFORCE_TABLE_HEIGHT: u32 = 280;
    pub const RISK_FACTOR_HEIGHT: u32 = 350;

    /// Padding applied to the largest upper bound of the suicide-risk axis
    pub const RANGE_AXIS_PADDING: f64 = 1.1;

    pub const INTERVAL_COLOR: &str = "#ddd";
    pub const INTERVAL_SIZE: f64 = 16.0;
    pub const ESTIMATE_COLOR: &str = "red";
    pub const ESTIMATE_SIZE: f64 = 20.0;
    pub const ESTIMATE_THICKNESS: f64 = 2.0;

    /// Separator between the parts of a composite legend key
    pub const LEGEND_SEPARATOR: &str = " | ";
}

/// Display constants
pub mod display {
    /// Placeholder for a KPI whose filter matched no rows
    pub const UNAVAILABLE: &str = "n/a";
    pub const DASHBOARD_TITLE: &str = "Mental Health Disorders Dashboard";
    pub const FOOTER: &str = "Data sources: GBD (2021) & WHO (2015)";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_formats_constants() {
        assert_eq!(output_formats::TEXT, "text");
        assert_eq!(output_formats::JSON, "json");
        assert_eq!(output_formats::MINIMAL, "minimal");
        assert_eq!(output_formats::DEFAULT, "text");
        assert_eq!(output_formats::ALL.len(), 3);
    }

    #[test]
    fn test_default_file_names() {
        assert!(files::DISORDERS.ends_with(".csv"));
        assert!(files::SUICIDE_RISK.ends_with(".csv"));
        assert_eq!(files::CONFIG_FILE, ".mhdash.toml");
    }

    #[test]
    fn test_chart_constants() {
        assert_eq!(charts::RANGE_AXIS_PADDING, 1.1);
        assert_eq!(charts::LEGEND_SEPARATOR, " | ");
        assert_eq!(charts::TREND_HEIGHT, 350);
    }
}
