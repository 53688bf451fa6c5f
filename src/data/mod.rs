//! Dataset loading
//!
//! This module reads the five CSV sources, normalizes their headers,
//! memoizes the resulting tables and decodes them into typed records.

pub mod cache;
pub mod loader;
pub mod normalize;
pub mod records;
pub mod table;

// Re-export commonly used items
pub use cache::{CacheKey, CacheStats, DatasetCache};
pub use loader::{
    DatasetPaths, Datasets, load_disorders, load_facilities, load_risk_factors,
    load_suicide_risk, load_table, load_workforce,
};
pub use records::{
    DisorderRecord, FacilityRecord, RiskFactorRecord, SuicideRiskRecord, WorkforceRecord,
};
pub use table::{DatasetRecord, Table};
