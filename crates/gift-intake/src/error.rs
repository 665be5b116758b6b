//! Error types for Gift Intake.
//!
//! Runtime UI-state operations (advancing a step, dragging a handle, closing a
//! sheet) never fail: they refuse or clamp. Errors only come from constructing
//! components from external data such as configuration files or dates.

use std::path::PathBuf;

/// Result type alias for Gift Intake operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building intake components.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The range bounds leave no room for two distinct values.
    #[error("Invalid range bounds {low}..{high}: low must be below high")]
    InvalidBounds { low: i32, high: i32 },

    /// A date of birth that does not exist on the calendar.
    #[error("Invalid date of birth {year:04}-{month:02}-{day:02}")]
    InvalidDate { day: u32, month: u32, year: i32 },

    /// A configuration value outside its allowed range.
    #[error("Invalid value for config field '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },

    /// TOML parse error.
    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("Failed to access config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile serialization error.
    #[error("Failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Create a config value error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
