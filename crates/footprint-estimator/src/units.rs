//! Unit normalization to kilograms.
//!
//! Volumes assume the density of water (1 l = 1 kg). Count units use a
//! per-piece weight looked up from the item name, with a fixed fallback.
//! Unrecognized unit tokens are treated as pieces, so conversion always
//! yields a number.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Known per-piece weights in kg, matched by substring of the item name.
const PIECE_WEIGHTS: &[(&str, f64)] = &[
    ("apple", 0.18),
    ("banana", 0.12),
    ("egg", 0.05),
    ("tomato", 0.12),
    ("avocado", 0.2),
];

/// Weight of one piece when the item name matches no known piece weight.
pub const DEFAULT_PIECE_WEIGHT_KG: f64 = 0.2;

const KG_PER_LB: f64 = 0.453_592_37;
const KG_PER_OZ: f64 = 0.028_349_523_1;

/// A recognized unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// kg, kgs, kilogram(s)
    Kilogram,
    /// g, gram(s)
    Gram,
    /// lb, lbs, pound(s)
    Pound,
    /// oz, ounce(s)
    Ounce,
    /// l, ltr, litre(s), liter(s)
    Litre,
    /// ml, millilitre(s), milliliter(s)
    Millilitre,
    /// piece-like units and anything unrecognized
    Piece,
}

impl Unit {
    /// Classify a unit token, case-insensitively.
    ///
    /// Never fails: unknown tokens are [`Unit::Piece`].
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Self::Kilogram,
            "g" | "gram" | "grams" => Self::Gram,
            "lb" | "lbs" | "pound" | "pounds" => Self::Pound,
            "oz" | "ounce" | "ounces" => Self::Ounce,
            "l" | "ltr" | "litre" | "litres" | "liter" | "liters" => Self::Litre,
            "ml" | "millilitre" | "millilitres" | "milliliter" | "milliliters" => Self::Millilitre,
            _ => Self::Piece,
        }
    }

    /// Kilograms per one of this unit, or `None` for pieces.
    #[must_use]
    pub fn kg_per_unit(self) -> Option<f64> {
        match self {
            Self::Kilogram | Self::Litre => Some(1.0),
            Self::Gram | Self::Millilitre => Some(0.001),
            Self::Pound => Some(KG_PER_LB),
            Self::Ounce => Some(KG_PER_OZ),
            Self::Piece => None,
        }
    }
}

/// Converts `(quantity, unit, item name)` triples to kilograms.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConverter {
    piece_weights: Vec<(String, f64)>,
    default_piece_weight_kg: f64,
}

impl UnitConverter {
    /// Create a converter with the standard piece weights and the given fallback weight.
    #[must_use]
    pub fn new(default_piece_weight_kg: f64) -> Self {
        Self {
            piece_weights: PIECE_WEIGHTS
                .iter()
                .map(|(name, kg)| ((*name).to_string(), *kg))
                .collect(),
            default_piece_weight_kg,
        }
    }

    /// Weight of one piece of `item_name`.
    ///
    /// The first known piece name contained in the lowercased item name wins.
    #[must_use]
    pub fn piece_weight(&self, item_name: &str) -> f64 {
        let name = item_name.to_lowercase();
        self.piece_weights
            .iter()
            .find(|(piece, _)| name.contains(piece.as_str()))
            .map_or(self.default_piece_weight_kg, |(_, kg)| *kg)
    }

    /// Convert a quantity in `unit` to kilograms.
    ///
    /// A missing, NaN, infinite or negative quantity yields 0.
    #[must_use]
    pub fn to_kg(&self, quantity: Option<f64>, unit: &str, item_name: &str) -> f64 {
        let Some(quantity) = quantity.filter(|q| q.is_finite()) else {
            return 0.0;
        };
        let quantity = quantity.max(0.0);

        let parsed = Unit::parse(unit);
        let kg = match parsed.kg_per_unit() {
            Some(factor) => quantity * factor,
            None => quantity * self.piece_weight(item_name),
        };

        trace!(quantity, unit, unit_kind = ?parsed, item_name, kg, "converted to kg");
        kg
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(DEFAULT_PIECE_WEIGHT_KG)
    }
}
