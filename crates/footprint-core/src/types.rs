//! Shared types used across the Footprint crates.
//!
//! This module defines the emission-factor record and the newtypes and enums
//! around it: canonical factor keys and category tags.

use crate::error::FootprintError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for canonical emission-factor keys.
///
/// Keys are lowercase ASCII alphanumerics and underscores, e.g. `olive_oil`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FactorKey(String);

impl FactorKey {
    /// Create a new `FactorKey` from an already-canonical string.
    ///
    /// # Errors
    /// Returns error if the key is empty or contains characters outside `[a-z0-9_]`.
    pub fn new(key: impl Into<String>) -> Result<Self, FootprintError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Derive a key from a free-text item name.
    ///
    /// The name is lowercased and every run of characters outside `[a-z0-9]`
    /// collapses to a single underscore: `"Oat Milk!"` becomes `oat_milk_`.
    ///
    /// # Errors
    /// Returns error if the name is empty.
    pub fn from_name(name: &str) -> Result<Self, FootprintError> {
        static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
        let regex = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

        let lowered = name.to_lowercase();
        let key = regex.replace_all(&lowered, "_").into_owned();
        Self::new(key)
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(key: &str) -> Result<(), FootprintError> {
        static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = KEY_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9_]+$").expect("valid regex"));

        if regex.is_match(key) {
            Ok(())
        } else {
            Err(FootprintError::Validation(format!(
                "invalid factor key: must be non-empty lowercase alphanumeric with underscores, got '{key}'"
            )))
        }
    }
}

impl TryFrom<String> for FactorKey {
    type Error = FootprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FactorKey> for String {
    fn from(key: FactorKey) -> Self {
        key.0
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Food category tags used for the per-category breakdown and swap search.
///
/// The fixed tags cover the built-in table; `Custom` keeps the set open for
/// user-supplied overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    /// Red meat and poultry
    Meat,
    /// Milk, cheese, eggs and other dairy
    Dairy,
    /// Rice, pasta, bread
    Grains,
    /// Fruit and vegetables
    Produce,
    /// Fish and seafood
    Fish,
    /// Plant proteins (tofu, beans)
    Protein,
    /// Oils and condiments
    Condiment,
    /// Coffee and other drinks
    Drinks,
    /// Sugar and shelf staples
    Pantry,
    /// Plant-based milks
    DairyAlternative,
    /// Chocolate and sweets
    Treats,
    /// Catch-all for user entries without a better tag
    Other,
    /// Any other user-supplied tag
    Custom(String),
}

impl Category {
    /// Breakdown bucket for items without a resolved factor.
    ///
    /// Reserved: no factor may carry this tag.
    pub const UNKNOWN_BUCKET: &'static str = "unknown";

    /// Get the tag string for this category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Meat => "meat",
            Self::Dairy => "dairy",
            Self::Grains => "grains",
            Self::Produce => "produce",
            Self::Fish => "fish",
            Self::Protein => "protein",
            Self::Condiment => "condiment",
            Self::Drinks => "drinks",
            Self::Pantry => "pantry",
            Self::DairyAlternative => "dairy_alternative",
            Self::Treats => "treats",
            Self::Other => "other",
            Self::Custom(tag) => tag,
        }
    }
}

impl FromStr for Category {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        let category = match tag.as_str() {
            "" => {
                return Err(FootprintError::Validation(
                    "category tag cannot be empty".to_string(),
                ))
            }
            Self::UNKNOWN_BUCKET => {
                return Err(FootprintError::Validation(format!(
                    "category tag '{}' is reserved for unresolved items",
                    Self::UNKNOWN_BUCKET
                )))
            }
            "meat" => Self::Meat,
            "dairy" => Self::Dairy,
            "grains" => Self::Grains,
            "produce" => Self::Produce,
            "fish" => Self::Fish,
            "protein" => Self::Protein,
            "condiment" => Self::Condiment,
            "drinks" => Self::Drinks,
            "pantry" => Self::Pantry,
            "dairy_alternative" => Self::DairyAlternative,
            "treats" => Self::Treats,
            "other" => Self::Other,
            _ => Self::Custom(tag),
        };
        Ok(category)
    }
}

impl TryFrom<String> for Category {
    type Error = FootprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An emission factor: kg CO2-equivalent per kg of product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Display name, e.g. "Beans (dried)"
    pub label: String,
    /// kg CO2e per kg of product, finite and non-negative
    pub co2_per_kg: f64,
    /// Category tag for breakdown and swaps
    pub category: Category,
}

impl EmissionFactor {
    /// Create a validated emission factor.
    ///
    /// # Errors
    /// Returns error if the label is blank or `co2_per_kg` is negative or not finite.
    pub fn new(
        label: impl Into<String>,
        co2_per_kg: f64,
        category: Category,
    ) -> Result<Self, FootprintError> {
        let factor = Self {
            label: label.into(),
            co2_per_kg,
            category,
        };
        factor.validate()?;
        Ok(factor)
    }

    /// Validate the record.
    ///
    /// # Errors
    /// Returns error if the label is blank or `co2_per_kg` is negative or not finite.
    pub fn validate(&self) -> Result<(), FootprintError> {
        if self.label.trim().is_empty() {
            return Err(FootprintError::Validation(
                "factor label cannot be empty".to_string(),
            ));
        }

        if !self.co2_per_kg.is_finite() || self.co2_per_kg < 0.0 {
            return Err(FootprintError::Validation(format!(
                "co2_per_kg must be a finite non-negative number, got {}",
                self.co2_per_kg
            )));
        }

        Ok(())
    }
}

/// An emission factor together with the key it was found under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedFactor {
    /// Key of the matched table or override entry
    pub key: FactorKey,
    /// The matched record
    #[serde(flatten)]
    pub factor: EmissionFactor,
}

impl MatchedFactor {
    /// Pair a key with its factor.
    #[must_use]
    pub fn new(key: FactorKey, factor: EmissionFactor) -> Self {
        Self { key, factor }
    }
}
