//! Presentation and reporting
//!
//! This module assembles the dashboard view-model, renders it as a
//! standalone HTML page, and provides structured logging for the application.

pub mod dashboard;
pub mod logging;
pub mod view;

// Re-export commonly used items
pub use dashboard::{DashboardData, HtmlDashboard};
pub use view::{KpiCard, Panel, PanelContent, ViewModel, render};
