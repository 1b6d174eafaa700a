//! Error types for the factor subsystem.

use thiserror::Error;

/// Errors that can occur while building factor tables and overrides.
#[derive(Error, Debug)]
pub enum FactorError {
    /// Factor table file not found
    #[error("factor table not found at {path}")]
    NotFound {
        /// Expected file path
        path: String,
    },

    /// Failed to read a factor table file
    #[error("failed to load factor table from {path}: {source}")]
    LoadError {
        /// Path to the table file
        path: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse factor table TOML
    #[error("failed to parse factor table TOML in {path}: {source}")]
    ParseError {
        /// Path to the table file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Invalid factor entry (validation failed)
    #[error("invalid emission factor for {key}: {reason}")]
    ValidationError {
        /// Key of the offending entry
        key: String,
        /// Reason for validation failure
        reason: String,
    },

    /// A table with no valid entries
    #[error("factor table at {path} has no valid entries")]
    EmptyTable {
        /// Path to the table file
        path: String,
    },

    /// I/O error while accessing factor tables
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid key, label, factor or category
    #[error("invalid factor record: {0}")]
    Core(#[from] footprint_core::FootprintError),
}

/// Result type for factor operations.
pub type Result<T> = std::result::Result<T, FactorError>;
