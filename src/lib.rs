//! mhdash turns mental-health epidemiology and staffing datasets into a
//! dashboard: key indicators, a metric trend chart, suicide-risk intervals,
//! a workforce table and risk-factor burden by age.
//!
//! ```no_run
//! use mhdash::analysis::Selection;
//! use mhdash::config::DashboardSettings;
//! use mhdash::data::{DatasetCache, DatasetPaths, Datasets};
//! use mhdash::reporting::render;
//!
//! # fn main() -> mhdash::Result<()> {
//! let datasets = Datasets::load(&DatasetPaths::in_dir("demos/data"), DatasetCache::global())?;
//! let view = render(&datasets, &Selection::default(), &DashboardSettings::default())?;
//! println!("{}", view.kpi_cards[0].display_value());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod charts;
pub mod config;
pub mod core;
pub mod data;
pub mod reporting;
pub mod ui;

// Re-export commonly used items
pub use analysis::{Selection, SelectionOverrides, WidgetOptions};
pub use config::{CliConfig, Config, DashboardSettings};
pub use crate::core::{DashboardError, DatasetKind, Metric, Result};
pub use data::{DatasetCache, DatasetPaths, Datasets};
pub use reporting::{ViewModel, render};
