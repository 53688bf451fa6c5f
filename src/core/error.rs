use std::fmt;

/// Error types for mhdash operations
#[derive(Debug)]
pub enum DashboardError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// CSV parsing or record decoding error
    Csv(csv::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON serialization error
    Serialization(serde_json::Error),

    /// Dataset file not found
    FileNotFound(String),

    /// A column required by a dataset is absent after normalization
    MissingColumn { dataset: String, column: String },

    /// A lookup expected a single value but found several
    AmbiguousValue(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Io(err) => write!(f, "IO error: {err}"),
            DashboardError::Config(msg) => write!(f, "Configuration error: {msg}"),
            DashboardError::Csv(err) => write!(f, "CSV error: {err}"),
            DashboardError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            DashboardError::Serialization(err) => write!(f, "Serialization error: {err}"),
            DashboardError::FileNotFound(path) => write!(f, "File not found: {path}"),
            DashboardError::MissingColumn { dataset, column } => {
                write!(f, "Missing column: '{column}' is required by the {dataset} dataset")
            }
            DashboardError::AmbiguousValue(msg) => write!(f, "Ambiguous value: {msg}"),
            DashboardError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Io(err) => Some(err),
            DashboardError::Csv(err) => Some(err),
            DashboardError::TomlParsing(err) => Some(err),
            DashboardError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err)
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::Csv(err)
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        DashboardError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err)
    }
}

/// Type alias for Results using DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
