//! Configuration management for Footprint.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main application configuration.
///
/// This is loaded from `~/.config/footprint/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Unit conversion settings
    pub units: UnitsConfig,
    /// Factor matching settings
    pub matching: MatchingConfig,
    /// Emission factor table source
    pub factors: FactorsConfig,
    /// Report shaping settings
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML or fail validation
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if absent.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            Self::from_toml_str(&contents)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `FOOTPRINT_DEFAULT_PIECE_WEIGHT_KG`: Override the fallback per-piece weight
    /// - `FOOTPRINT_MATCH_POLICY`: `first_match` or `longest_key`
    /// - `FOOTPRINT_FACTOR_TABLE`: Path to a TOML factor table replacing the built-ins
    /// - `FOOTPRINT_TOP_EMITTERS`: Number of top emitters to report
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FOOTPRINT_DEFAULT_PIECE_WEIGHT_KG") {
            if let Ok(weight) = val.parse() {
                self.units.default_piece_weight_kg = weight;
                tracing::debug!("Override units.default_piece_weight_kg from env: {}", weight);
            }
        }

        if let Some(val) = lookup("FOOTPRINT_MATCH_POLICY") {
            if let Ok(policy) = val.parse() {
                self.matching.policy = policy;
                tracing::debug!("Override matching.policy from env: {}", policy);
            }
        }

        if let Some(val) = lookup("FOOTPRINT_FACTOR_TABLE") {
            if !val.trim().is_empty() {
                tracing::debug!("Override factors.table_path from env: {}", val);
                self.factors.table_path = Some(PathBuf::from(val));
            }
        }

        if let Some(val) = lookup("FOOTPRINT_TOP_EMITTERS") {
            if let Ok(limit) = val.parse() {
                self.report.top_emitters = limit;
                tracing::debug!("Override report.top_emitters from env: {}", limit);
            }
        }
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        let weight = self.units.default_piece_weight_kg;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "units.default_piece_weight_kg".to_string(),
                reason: format!("must be a positive number, got {weight}"),
            });
        }

        if let Some(path) = &self.factors.table_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "factors.table_path".to_string(),
                    reason: "path cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `config_path`, creating parent directories as needed.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/footprint/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("org", "footprint", "footprint").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Unit conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    /// Weight assumed for one piece of an item with no known piece weight
    pub default_piece_weight_kg: f64,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            default_piece_weight_kg: 0.2,
        }
    }
}

/// How the factor matcher breaks ties inside a matching tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First candidate in table order wins
    #[default]
    FirstMatch,
    /// Candidate with the longest matched key or token wins, ties to table order
    LongestKey,
}

impl FromStr for MatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first_match" => Ok(Self::FirstMatch),
            "longest_key" => Ok(Self::LongestKey),
            other => Err(ConfigError::InvalidValue {
                field: "matching.policy".to_string(),
                reason: format!("expected 'first_match' or 'longest_key', got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstMatch => f.write_str("first_match"),
            Self::LongestKey => f.write_str("longest_key"),
        }
    }
}

/// Factor matching settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Tie-break policy within a matching tier
    pub policy: MatchPolicy,
}

/// Emission factor table source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorsConfig {
    /// TOML factor table replacing the built-in table; built-ins when unset
    pub table_path: Option<PathBuf>,
}

/// Report shaping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// How many top emitters get swap suggestions
    pub top_emitters: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_emitters: 4 }
    }
}
