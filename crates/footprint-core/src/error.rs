//! Core error types for Footprint.
//!
//! The estimation pipeline itself degrades gracefully and never fails; these
//! errors cover the edges where untrusted data enters: factor records built
//! from user input, configuration files, and I/O.

use thiserror::Error;

/// Central error type shared by the Footprint crates.
#[derive(Error, Debug)]
pub enum FootprintError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid factor record, reserved category)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `FootprintError`.
pub type Result<T> = std::result::Result<T, FootprintError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FootprintError::Validation("co2_per_kg must be finite".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: co2_per_kg must be finite"
        );

        let err = ConfigError::InvalidValue {
            field: "units.default_piece_weight_kg".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for units.default_piece_weight_kg: must be positive"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let err: FootprintError = config_err.into();
        assert!(matches!(err, FootprintError::Config(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: FootprintError = io_err.into();
        assert!(matches!(err, FootprintError::Io(_)));
    }
}
