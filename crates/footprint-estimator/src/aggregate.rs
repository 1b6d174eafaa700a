//! Emissions aggregation over a list of grocery items.

use crate::types::{AggregationResult, GroceryItem, ResolvedItem};
use footprint_core::round::{add_co2, round_co2, round_kg};
use footprint_core::{Category, MatchPolicy};
use footprint_factors::{FactorMatcher, FactorOverrides, FactorTable};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Computes per-item emissions, the total and the per-category breakdown.
///
/// Every call starts from scratch; the engine keeps no state between calls,
/// so the same items and overrides always produce the same result.
#[derive(Debug, Clone)]
pub struct AggregationEngine<'a> {
    matcher: FactorMatcher<'a>,
}

impl<'a> AggregationEngine<'a> {
    /// Create an engine resolving against `table` with the given tie-break policy.
    #[must_use]
    pub fn new(table: &'a FactorTable, policy: MatchPolicy) -> Self {
        Self {
            matcher: FactorMatcher::new(table, policy),
        }
    }

    /// Create an engine from an existing matcher.
    #[must_use]
    pub fn with_matcher(matcher: FactorMatcher<'a>) -> Self {
        Self { matcher }
    }

    /// Resolve a single item.
    #[must_use]
    pub fn resolve(&self, item: &GroceryItem, overrides: &FactorOverrides) -> ResolvedItem {
        let factor = self.matcher.find(&item.name, overrides);
        let co2 = factor
            .as_ref()
            .map(|f| round_co2(item.kg * f.factor.co2_per_kg));

        ResolvedItem {
            item: item.clone(),
            factor,
            co2,
        }
    }

    /// Aggregate `items` against the table, with `overrides` taking precedence.
    ///
    /// Each item's emissions are rounded to 2 decimals before summing, and
    /// every running sum is rounded with [`add_co2`], so `total` equals the
    /// category values added up the same way. Unresolved items add an
    /// `unknown` bucket holding 0 and are counted in `unknown_items` and
    /// `unknown_kg` instead.
    #[must_use]
    pub fn aggregate(&self, items: &[GroceryItem], overrides: &FactorOverrides) -> AggregationResult {
        let mut total = 0.0;
        let mut breakdown: BTreeMap<String, f64> = BTreeMap::new();
        let mut unknown_items = 0usize;
        let mut unknown_kg = 0.0;

        let details: Vec<ResolvedItem> = items
            .iter()
            .map(|item| self.resolve(item, overrides))
            .collect();

        for detail in &details {
            match (&detail.factor, detail.co2) {
                (Some(matched), Some(co2)) => {
                    total = add_co2(total, co2);
                    let bucket = breakdown
                        .entry(matched.factor.category.to_string())
                        .or_insert(0.0);
                    *bucket = add_co2(*bucket, co2);
                }
                _ => {
                    warn!(name = %detail.item.name, original = %detail.item.original, "no emission factor for item");
                    unknown_items += 1;
                    unknown_kg += detail.item.kg;
                    breakdown
                        .entry(Category::UNKNOWN_BUCKET.to_string())
                        .or_insert(0.0);
                }
            }
        }

        let result = AggregationResult {
            total,
            breakdown,
            details,
            unknown_items,
            unknown_kg: round_kg(unknown_kg),
        };

        debug!(
            items = items.len(),
            total = result.total,
            unknown_items,
            "aggregated grocery emissions"
        );

        result
    }
}
