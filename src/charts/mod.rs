//! Chart construction
//!
//! Pure builders turning filtered records into Vega-Lite chart
//! descriptions and display tables.

pub mod builders;
pub mod spec;

// Re-export commonly used items
pub use builders::{metric_trend_chart, risk_factor_chart, suicide_risk_chart, workforce_table};
pub use spec::{ChartSpec, Encoding, FieldDef, Mark, MarkKind, StyledTable};
