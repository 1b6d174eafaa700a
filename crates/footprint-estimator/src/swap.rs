//! Lower-footprint swap suggestions.

use crate::types::{AggregationResult, ResolvedItem};
use footprint_core::round::round_co2;
use footprint_core::MatchedFactor;
use footprint_factors::FactorTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How many top emitters get suggestions by default.
pub const DEFAULT_TOP_EMITTERS: usize = 4;

/// A top emitter paired with its suggested swap, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapSuggestion {
    /// The emitter
    pub item: ResolvedItem,
    /// Lowest-footprint alternative in the same category
    pub swap: Option<MatchedFactor>,
    /// kg CO2e saved by swapping the same weight, 2 decimals
    pub co2_saving: Option<f64>,
}

/// Finds same-category alternatives with a strictly lower factor.
#[derive(Debug, Clone, Copy)]
pub struct SwapAdvisor<'a> {
    table: &'a FactorTable,
}

impl<'a> SwapAdvisor<'a> {
    /// Create an advisor drawing alternatives from `table`.
    #[must_use]
    pub fn new(table: &'a FactorTable) -> Self {
        Self { table }
    }

    /// Lowest-factor table entry in the item's category that beats its current factor.
    ///
    /// Returns `None` for unresolved items or when nothing is strictly lower.
    /// Ties go to the entry that comes first in the table.
    #[must_use]
    pub fn suggest(&self, item: &ResolvedItem) -> Option<&'a MatchedFactor> {
        let current = &item.factor.as_ref()?.factor;

        self.table
            .in_category(&current.category)
            .filter(|candidate| candidate.factor.co2_per_kg < current.co2_per_kg)
            .fold(None, |best: Option<&'a MatchedFactor>, candidate| match best {
                Some(b) if b.factor.co2_per_kg <= candidate.factor.co2_per_kg => Some(b),
                _ => Some(candidate),
            })
    }

    /// Suggestions for the top `limit` emitters of `result`.
    #[must_use]
    pub fn suggestions(&self, result: &AggregationResult, limit: usize) -> Vec<SwapSuggestion> {
        top_emitters(result, limit)
            .into_iter()
            .map(|item| {
                let swap = self.suggest(item).cloned();
                let co2_saving = match (&item.factor, &swap) {
                    (Some(current), Some(alt)) => Some(round_co2(
                        item.item.kg * (current.factor.co2_per_kg - alt.factor.co2_per_kg),
                    )),
                    _ => None,
                };

                if let Some(alt) = &swap {
                    debug!(name = %item.item.name, swap = %alt.key, "suggested swap");
                }

                SwapSuggestion {
                    item: item.clone(),
                    swap,
                    co2_saving,
                }
            })
            .collect()
    }
}

/// The `limit` items with the highest emissions, highest first.
///
/// Unknown items and items with zero emissions are left out. Equal
/// emissions keep input order.
#[must_use]
pub fn top_emitters(result: &AggregationResult, limit: usize) -> Vec<&ResolvedItem> {
    let mut emitters: Vec<&ResolvedItem> = result
        .details
        .iter()
        .filter(|d| d.co2.is_some_and(|co2| co2 > 0.0))
        .collect();

    emitters.sort_by(|a, b| {
        let a = a.co2.unwrap_or_default();
        let b = b.co2.unwrap_or_default();
        b.total_cmp(&a)
    });
    emitters.truncate(limit);
    emitters
}
