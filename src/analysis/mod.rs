//! Selection handling and KPI derivation
//!
//! This module turns loaded datasets and an explicit widget selection
//! into the scalar indicators shown at the top of the dashboard.

pub mod metrics;
pub mod selection;

// Re-export commonly used items
pub use metrics::{Kpis, RateKpis, compute_kpis, facility_rate, rate_kpis, worker_density};
pub use selection::{Selection, SelectionOverrides, WidgetOptions, YearRange};
