//! Grocery line parsing.
//!
//! A line is tried against an ordered cascade of shapes, most structured
//! first, and the first shape that fits wins:
//!
//! | Shape | Example |
//! |---|---|
//! | [`LineShape::Multiplier`] | `2 x 500g chicken breast` |
//! | [`LineShape::QuantityUnit`] | `500 g rice`, `chicken 1.5 lbs` |
//! | [`LineShape::CountDescriptor`] | `6 eggs`, `2 packs tofu` |
//! | [`LineShape::LeadingNumber`] | `3 apples` |
//! | [`LineShape::Bare`] | `avocado` |
//!
//! The ordering keeps `2 x 500g chicken` from being read as two pieces of
//! `x 500g chicken`.

use crate::types::{GroceryItem, DEFAULT_UNIT};
use crate::units::UnitConverter;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// The shape a line was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineShape {
    /// `<count> x <size><unit> <name>`
    Multiplier,
    /// `<qty> <mass or volume unit> <name>`
    QuantityUnit,
    /// `<qty> <piece descriptor> <name>`
    CountDescriptor,
    /// `<qty> <name>`
    LeadingNumber,
    /// `<name>` alone, one piece
    Bare,
}

impl LineShape {
    /// Shapes in the order they are tried.
    pub const CASCADE: [LineShape; 5] = [
        Self::Multiplier,
        Self::QuantityUnit,
        Self::CountDescriptor,
        Self::LeadingNumber,
        Self::Bare,
    ];
}

/// What a shape pulled out of a line, before name cleanup.
struct Extraction {
    qty: Option<f64>,
    unit: String,
    kg: f64,
    name: String,
}

fn multiplier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)([0-9]+(?:\.[0-9]+)?)\s*[x×]\s*([0-9]+(?:\.[0-9]+)?)(?:\s*(kilograms?|kgs?|grams?|g|pounds?|lbs?|ounces?|oz)\b)?",
        )
        .expect("valid regex")
    })
}

fn quantity_unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(kilograms?|kgs?|grams?|g|pounds?|lbs?|ounces?|oz|litres?|liters?|ltr|l|millilitres?|milliliters?|ml)\b",
        )
        .expect("valid regex")
    })
}

fn count_descriptor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(pcs|pieces|piece|pc|eggs?|bunch|packs?|pk)\b")
            .expect("valid regex")
    })
}

fn leading_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s+(.+)$").expect("valid regex"))
}

fn leading_of_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^of\s+").expect("valid regex"))
}

fn leading_times_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?:×\s*|x\s+)").expect("valid regex"))
}

/// Number captured by `group`; the regexes only capture valid decimals.
fn number(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

/// Remove the first occurrence of `matched` from `raw` and trim.
fn strip_match(raw: &str, matched: &str) -> String {
    raw.replacen(matched, "", 1).trim().to_string()
}

/// Strip a leading `of ` and a leading multiplication sign from a name.
fn sanitize_name(name: &str) -> String {
    let name = leading_of_regex().replace(name.trim(), "");
    let name = leading_times_regex().replace(&name, "");
    name.trim().to_string()
}

/// Parses grocery lines into [`GroceryItem`]s.
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    converter: UnitConverter,
}

impl LineParser {
    /// Create a parser using `converter` for kilogram conversion.
    #[must_use]
    pub fn new(converter: UnitConverter) -> Self {
        Self { converter }
    }

    /// The converter used for kilogram conversion.
    #[must_use]
    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    /// Parse one line. Returns `None` only for blank lines.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<GroceryItem> {
        self.parse_with_shape(line).map(|(item, _)| item)
    }

    /// Parse one line and report which shape matched.
    #[must_use]
    pub fn parse_with_shape(&self, line: &str) -> Option<(GroceryItem, LineShape)> {
        let raw = line.trim();
        if raw.is_empty() {
            return None;
        }

        let (shape, extraction) = LineShape::CASCADE
            .iter()
            .find_map(|shape| self.extract(*shape, raw).map(|e| (*shape, e)))?;

        let item = GroceryItem::new(
            raw,
            sanitize_name(&extraction.name),
            extraction.qty,
            &extraction.unit,
            extraction.kg,
        );

        debug!(
            shape = ?shape,
            name = %item.name,
            unit = %item.unit,
            kg = item.kg,
            "parsed grocery line"
        );

        Some((item, shape))
    }

    /// Parse a block of text, one entry per line, skipping blank lines.
    #[must_use]
    pub fn parse_list(&self, text: &str) -> Vec<GroceryItem> {
        text.lines().filter_map(|line| self.parse(line)).collect()
    }

    fn extract(&self, shape: LineShape, raw: &str) -> Option<Extraction> {
        match shape {
            LineShape::Multiplier => self.extract_multiplier(raw),
            LineShape::QuantityUnit => self.extract_quantity_unit(raw),
            LineShape::CountDescriptor => self.extract_count_descriptor(raw),
            LineShape::LeadingNumber => self.extract_leading_number(raw),
            LineShape::Bare => Some(self.extract_bare(raw)),
        }
    }

    fn extract_multiplier(&self, raw: &str) -> Option<Extraction> {
        let caps = multiplier_regex().captures(raw)?;
        let count = number(&caps, 1)?;
        let size = number(&caps, 2)?;
        let unit = caps
            .get(3)
            .map_or_else(|| "g".to_string(), |m| m.as_str().to_lowercase());

        Some(Extraction {
            qty: None,
            kg: self.converter.to_kg(Some(count * size), &unit, ""),
            unit,
            name: strip_match(raw, &caps[0]),
        })
    }

    fn extract_quantity_unit(&self, raw: &str) -> Option<Extraction> {
        let caps = quantity_unit_regex().captures(raw)?;
        let qty = number(&caps, 1)?;
        let unit = caps[2].to_lowercase();

        Some(Extraction {
            qty: Some(qty),
            kg: self.converter.to_kg(Some(qty), &unit, ""),
            unit,
            name: strip_match(raw, &caps[0]),
        })
    }

    fn extract_count_descriptor(&self, raw: &str) -> Option<Extraction> {
        let caps = count_descriptor_regex().captures(raw)?;
        let qty = number(&caps, 1)?;

        // "6 eggs" leaves nothing after stripping; the descriptor is the item
        let mut name = strip_match(raw, &caps[0]);
        if name.is_empty() {
            name = caps[2].to_string();
        }

        Some(Extraction {
            qty: Some(qty),
            kg: self.converter.to_kg(Some(qty), DEFAULT_UNIT, raw),
            unit: DEFAULT_UNIT.to_string(),
            name,
        })
    }

    fn extract_leading_number(&self, raw: &str) -> Option<Extraction> {
        let caps = leading_number_regex().captures(raw)?;
        let qty = number(&caps, 1)?;
        let name = caps[2].trim().to_string();

        Some(Extraction {
            qty: Some(qty),
            kg: self.converter.to_kg(Some(qty), DEFAULT_UNIT, &name),
            unit: DEFAULT_UNIT.to_string(),
            name,
        })
    }

    fn extract_bare(&self, raw: &str) -> Extraction {
        Extraction {
            qty: Some(1.0),
            kg: self.converter.to_kg(Some(1.0), DEFAULT_UNIT, raw),
            unit: DEFAULT_UNIT.to_string(),
            name: raw.to_string(),
        }
    }
}
