//! Parsed and resolved grocery items and aggregation results.

use footprint_core::round::round_kg;
use footprint_core::MatchedFactor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unit recorded when a line names no unit.
pub const DEFAULT_UNIT: &str = "piece";

/// One grocery entry recovered from a line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// The input line, trimmed
    pub original: String,
    /// Cleaned item description
    pub name: String,
    /// Quantity as written, absent when the line gives no single quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    /// Unit token, lowercased; never empty
    pub unit: String,
    /// Quantity in kilograms, rounded to 3 decimals; never negative
    pub kg: f64,
}

impl GroceryItem {
    /// Build an item, normalizing `unit` and `kg`.
    ///
    /// A blank unit becomes `"piece"`; `kg` is clamped to a finite
    /// non-negative value and rounded to 3 decimals.
    #[must_use]
    pub fn new(
        original: impl Into<String>,
        name: impl Into<String>,
        qty: Option<f64>,
        unit: &str,
        kg: f64,
    ) -> Self {
        let unit = unit.trim().to_lowercase();
        let unit = if unit.is_empty() {
            DEFAULT_UNIT.to_string()
        } else {
            unit
        };
        let kg = if kg.is_finite() && kg > 0.0 {
            round_kg(kg)
        } else {
            0.0
        };

        Self {
            original: original.into(),
            name: name.into(),
            qty,
            unit,
            kg,
        }
    }
}

/// A grocery item with its resolved factor and emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// The parsed item
    #[serde(flatten)]
    pub item: GroceryItem,
    /// Matched factor, `None` when the item is unknown
    pub factor: Option<MatchedFactor>,
    /// kg CO2e rounded to 2 decimals, `None` when the item is unknown
    pub co2: Option<f64>,
}

impl ResolvedItem {
    /// Whether a factor was found for this item.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.factor.is_some()
    }
}

/// Totals and per-category breakdown for a list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Sum of all resolved emissions, kg CO2e, 2 decimals
    pub total: f64,
    /// kg CO2e per category tag; holds an `unknown` bucket at 0 when any item is unresolved
    pub breakdown: BTreeMap<String, f64>,
    /// Resolved items in input order
    pub details: Vec<ResolvedItem>,
    /// Number of items without a factor
    pub unknown_items: usize,
    /// Kilograms of items without a factor, 3 decimals
    pub unknown_kg: f64,
}

impl AggregationResult {
    /// Items that have a factor, in input order.
    pub fn resolved(&self) -> impl Iterator<Item = &ResolvedItem> {
        self.details.iter().filter(|d| d.is_resolved())
    }

    /// Items without a factor, in input order.
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedItem> {
        self.details.iter().filter(|d| !d.is_resolved())
    }
}
