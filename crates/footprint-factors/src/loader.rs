//! Factor table loading from TOML files.
//!
//! A table file lists entries in order:
//!
//! ```toml
//! [[factor]]
//! key = "beef"
//! label = "Beef (avg)"
//! co2_per_kg = 60.0
//! category = "meat"
//! ```

use crate::{
    error::{FactorError, Result},
    table::FactorTable,
};
use footprint_core::{Category, EmissionFactor, FactorKey, MatchedFactor};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Raw shape of a table file, before validation.
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default, rename = "factor")]
    factors: Vec<RawFactor>,
}

#[derive(Debug, Deserialize)]
struct RawFactor {
    key: String,
    label: String,
    co2_per_kg: f64,
    category: String,
}

impl RawFactor {
    fn into_entry(self) -> Result<MatchedFactor> {
        let key = FactorKey::new(self.key.trim())?;
        let category = self.category.parse::<Category>().map_err(|e| {
            FactorError::ValidationError {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;
        let factor = EmissionFactor::new(self.label, self.co2_per_kg, category).map_err(|e| {
            FactorError::ValidationError {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(MatchedFactor::new(key, factor))
    }
}

/// Loader for factor tables stored as TOML files.
pub struct FactorLoader {
    /// Path to the table file
    path: PathBuf,
}

impl FactorLoader {
    /// Create a loader for the given table file.
    ///
    /// # Errors
    /// Returns error if the file doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_file() {
            return Err(FactorError::NotFound {
                path: path.display().to_string(),
            });
        }

        Ok(Self { path })
    }

    /// Path of the table file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse and validate the table file.
    ///
    /// Invalid or duplicate entries are logged as warnings and skipped.
    ///
    /// # Errors
    /// Returns error if the file can't be read, isn't valid TOML, or has no
    /// valid entries.
    pub fn load(&self) -> Result<FactorTable> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| FactorError::LoadError {
            path: self.path.display().to_string(),
            source: Box::new(e),
        })?;

        let table = Self::parse(&contents, &self.path.display().to_string())?;

        info!(
            count = table.len(),
            path = %self.path.display(),
            "loaded emission factor table"
        );

        Ok(table)
    }

    /// Parse a table from TOML text. `origin` names the source in errors.
    ///
    /// # Errors
    /// Returns error if the text isn't valid TOML or has no valid entries.
    pub fn parse(contents: &str, origin: &str) -> Result<FactorTable> {
        let file: TableFile = toml::from_str(contents).map_err(|e| FactorError::ParseError {
            path: origin.to_string(),
            source: e,
        })?;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(file.factors.len());

        for raw in file.factors {
            let raw_key = raw.key.clone();
            match raw.into_entry() {
                Ok(entry) => {
                    if !seen.insert(entry.key.clone()) {
                        warn!(key = %entry.key, origin, "skipping duplicate emission factor");
                        continue;
                    }
                    entries.push(entry);
                }
                Err(e) => {
                    warn!(key = %raw_key, origin, error = %e, "skipping invalid emission factor");
                }
            }
        }

        if entries.is_empty() {
            return Err(FactorError::EmptyTable {
                path: origin.to_string(),
            });
        }

        FactorTable::new(entries)
    }
}
