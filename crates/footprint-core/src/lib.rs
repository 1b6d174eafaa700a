//! Footprint Core - Foundation crate for grocery footprint estimation.
//!
//! This crate provides shared types, rounding rules, error handling and
//! configuration management that the other Footprint crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Emission factors and their newtypes (`FactorKey`, `Category`)
//! - [`round`] - Half-away-from-zero rounding for displayed values
//!
//! # Example
//!
//! ```rust
//! use footprint_core::{Category, EmissionFactor, FactorKey};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let key = FactorKey::from_name("Oat Milk")?;
//! let factor = EmissionFactor::new("Oat milk", 0.9, Category::DairyAlternative)?;
//! assert_eq!(key.as_str(), "oat_milk");
//! assert_eq!(factor.category.as_str(), "dairy_alternative");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod round;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, FactorsConfig, MatchPolicy, MatchingConfig, ReportConfig, UnitsConfig};
pub use error::{ConfigError, ConfigResult, FootprintError, Result};
pub use types::{Category, EmissionFactor, FactorKey, MatchedFactor};
