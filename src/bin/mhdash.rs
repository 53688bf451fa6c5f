use clap::{CommandFactory, Parser};
use mhdash::analysis::{Selection, WidgetOptions};
use mhdash::config::{CliConfig, Config, DashboardSettings};
use mhdash::core::constants::output_formats;
use mhdash::core::types::DatasetKind;
use mhdash::data::{DatasetCache, DatasetPaths, Datasets};
use mhdash::reporting::logging;
use mhdash::reporting::{DashboardData, HtmlDashboard, ViewModel, render};
use mhdash::ui::ProgressReporter;
use mhdash::ui::completion::print_completions;
use mhdash::ui::output;
use mhdash::ui::{Cli, Commands, cli_to_config};

use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_dashboard_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        Some(Commands::Options) | None => None,
    }
}

/// Load the data, render the dashboard and write every requested output
pub fn run_dashboard_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    // CLI flags only until the config file has been read
    logging::init_logger(cli_config.verbose, cli_config.quiet);

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    // Setup logging and output settings
    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);

    let settings = DashboardSettings::from_config(&config);
    logging::log_config_info(&config, &settings);

    let datasets = load_datasets(&config, &output_settings)?;
    let options = WidgetOptions::from_datasets(&datasets);

    if matches!(cli.command, Some(Commands::Options)) {
        output::display_options(&options);
        return Ok(0);
    }

    let overrides = config.selection.clone().unwrap_or_default();
    let selection = Selection::from_overrides(&overrides, &options)?;
    logging::log_unknown_selection(&selection.unknown_values(&options));

    let start_time = Instant::now();
    let view = render(&datasets, &selection, &settings).inspect_err(|e| {
        logging::log_error("Could not render dashboard", Some(e));
    })?;
    logging::log_render_complete(&view, start_time.elapsed().as_millis());

    output::display_view(&view, &output_settings.output_format, output_settings.quiet)?;

    if let Some(ref dashboard_path) = config.html_dashboard_path {
        write_html_dashboard(view, dashboard_path, &output_settings)?;
    }

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn should_announce_files(&self) -> bool {
        !self.quiet && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config.output_format().to_string();
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> ProgressReporter {
    ProgressReporter::new(
        output_settings.show_progress && output_settings.output_format == output_formats::TEXT,
    )
}

/// Read the five datasets through the process-wide cache
pub fn load_datasets(
    config: &Config,
    output_settings: &OutputSettings,
) -> Result<Datasets, Box<dyn std::error::Error>> {
    let paths = DatasetPaths::from_config(config);
    let cache = DatasetCache::global();

    let mut progress = create_progress_reporter(output_settings);
    progress.start_loading(DatasetKind::ALL.len());

    let loaded = Datasets::load_with(&paths, cache, |kind, table| {
        logging::log_dataset_loaded(kind, paths.path(kind), table);
        progress.dataset_loaded(kind);
    });

    match loaded {
        Ok(datasets) => {
            progress.finish_loading();
            logging::log_cache_stats(&cache.stats());
            Ok(datasets)
        }
        Err(e) => {
            progress.abandon();
            logging::log_error("Could not load datasets", Some(&e));
            Err(e.into())
        }
    }
}

/// Write the standalone HTML page
pub fn write_html_dashboard(
    view: ViewModel,
    dashboard_path: &str,
    output_settings: &OutputSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard_data = DashboardData {
        view,
        timestamp: chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
    };

    HtmlDashboard::generate_dashboard(&dashboard_data, dashboard_path).inspect_err(|e| {
        logging::log_error("Failed to generate HTML dashboard", Some(e));
    })?;

    if output_settings.should_announce_files() {
        println!("📊 HTML dashboard generated: {dashboard_path}");
    }
    Ok(())
}
