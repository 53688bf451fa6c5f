use crate::config::{Config, DashboardSettings};
use crate::core::constants::files;
use crate::core::types::DatasetKind;
use crate::data::{CacheStats, Table};
use crate::reporting::view::ViewModel;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
///
/// Can be called again once the config file is merged. The first call
/// installs the logger and later calls only move the level.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    // RUST_LOG still wins unless -q was given
    let from_env = !quiet && std::env::var_os("RUST_LOG").is_some();
    let mut builder = env_logger::Builder::from_default_env();
    if !from_env {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_module_path(false).format_target(false);

    // Already initialized (e.g. by another test or an earlier call)
    let _ = builder.try_init();
    if !from_env {
        log::set_max_level(level);
    }

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config, settings: &DashboardSettings) {
    let data_dir = config.data_dir.as_deref().unwrap_or(files::DATA_DIR);
    let kpi_year = settings
        .kpi_year
        .map_or_else(|| "latest".to_string(), |y| y.to_string());

    info!(
        "Configuration: data_dir={data_dir}, format={}",
        config.output_format()
    );
    info!(
        "KPIs: focus={}, comparison={}, year={kpi_year}",
        settings.focus_country, settings.comparison_country
    );
    info!(
        "Facility labels: outpatient='{}', inpatient='{}'",
        settings.outpatient_label, settings.inpatient_label
    );
}

/// Log a dataset that finished loading
pub fn log_dataset_loaded<P: AsRef<Path>>(kind: DatasetKind, path: P, table: &Table) {
    info!(
        "Loaded {kind} dataset: {} rows from {}",
        table.len(),
        path.as_ref().display()
    );
    debug!("  columns: {}", table.column_names().join(", "));
}

/// Log dataset cache effectiveness
pub fn log_cache_stats(stats: &CacheStats) {
    debug!(
        "Dataset cache: {} hit(s), {} miss(es), {} entr{}",
        stats.hits,
        stats.misses,
        stats.entries,
        if stats.entries == 1 { "y" } else { "ies" }
    );
}

/// Log selected values that no widget offers
pub fn log_unknown_selection(unknown: &[(&str, String)]) {
    for (widget, value) in unknown {
        warn!("Selected {widget} '{value}' does not occur in the data and matches no rows");
    }
}

/// Log render completion
pub fn log_render_complete(view: &ViewModel, duration_ms: u128) {
    let unavailable = view.kpi_cards.iter().filter(|c| c.value.is_none()).count();
    if unavailable == 0 {
        info!("✅ Dashboard rendered ({duration_ms}ms)");
    } else {
        warn!("⚠️ Dashboard rendered with {unavailable} unavailable KPI(s) ({duration_ms}ms)");
    }

    for panel in view.panels() {
        debug!("  panel '{}': {}", panel.id, panel.heading);
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::selection::Selection;
    use crate::reporting::view::render;
    use crate::reporting::view::tests::sample_datasets;
    use serial_test::serial;
    use std::io;

    #[test]
    #[serial]
    fn test_logger_initialization_verbose() {
        // Logger can only be initialized once per process; repeated calls must not panic
        init_logger(true, false);
    }

    #[test]
    #[serial]
    fn test_logger_initialization_quiet() {
        init_logger(false, true);
    }

    #[test]
    #[serial]
    fn test_logger_initialization_conflicting() {
        // quiet takes precedence
        init_logger(true, true);
    }

    #[test]
    #[serial]
    fn test_logger_level_follows_later_calls() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        init_logger(true, false);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        init_logger(false, true);
        assert_eq!(log::max_level(), log::LevelFilter::Off);
    }

    #[test]
    fn test_log_config_info_with_defaults() {
        let config = Config::default();
        log_config_info(&config, &DashboardSettings::from_config(&config));
    }

    #[test]
    fn test_log_config_info_with_values() {
        let config = Config {
            data_dir: Some("demos/data".to_string()),
            kpi_year: Some(2019),
            focus_country: Some("Jordan".to_string()),
            ..Default::default()
        };
        log_config_info(&config, &DashboardSettings::from_config(&config));
    }

    #[test]
    fn test_log_dataset_loaded() -> crate::core::error::Result<()> {
        let table = Table::from_reader(
            DatasetKind::Facilities,
            "facility_type,users_per_100k\nOutpatient,350\n".as_bytes(),
        )?;
        log_dataset_loaded(DatasetKind::Facilities, "nb_of_facilities.csv", &table);
        Ok(())
    }

    #[test]
    fn test_log_cache_stats() {
        log_cache_stats(&CacheStats {
            hits: 2,
            misses: 5,
            entries: 5,
        });
        log_cache_stats(&CacheStats::default());
    }

    #[test]
    fn test_log_unknown_selection() {
        log_unknown_selection(&[]);
        log_unknown_selection(&[("age", "Elderly".to_string())]);
    }

    #[test]
    fn test_log_render_complete() {
        let view = render(
            &sample_datasets(),
            &Selection::default(),
            &DashboardSettings::default(),
        )
        .unwrap();
        log_render_complete(&view, 12);
    }

    #[test]
    fn test_log_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        log_error("Failed to read file", Some(&io_error));
        log_error("Something went wrong", None);
    }
}
