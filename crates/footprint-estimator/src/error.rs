//! Error types for building an estimator.
//!
//! Estimation itself never fails; only assembling an [`crate::Estimator`]
//! from configuration and table files can.

use footprint_core::ConfigError;
use footprint_factors::FactorError;
use thiserror::Error;

/// Errors raised while setting up estimation.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// Configuration was invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Factor table could not be loaded
    #[error("factor table error: {0}")]
    Factors(#[from] FactorError),
}

/// Result type for estimator setup.
pub type Result<T> = std::result::Result<T, EstimateError>;
