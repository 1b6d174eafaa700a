//! Free-text lookup of emission factors.
//!
//! Lookup runs through three tiers, each exhausted before the next:
//!
//! 1. **Override**: the name contains the override key, or the override label
//!    contains the name.
//! 2. **Table**: the name equals or contains a table key, or the table label
//!    contains the name.
//! 3. **Label token**: any word of a table label appears inside the name.
//!
//! All comparisons are case-insensitive. Within a tier the [`MatchPolicy`]
//! picks the winner.

use crate::overrides::FactorOverrides;
use crate::table::FactorTable;
use footprint_core::{MatchPolicy, MatchedFactor};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, trace};

/// The tier that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Matched a user override
    Override,
    /// Matched a table key or label
    Table,
    /// Matched a single word of a table label
    LabelToken,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorMatch {
    /// Tier the match came from
    pub tier: MatchTier,
    /// The matched key and factor
    pub factor: MatchedFactor,
}

/// Lowercased label and label words of one table entry, computed once.
#[derive(Debug, Clone)]
struct LabelIndex {
    label: String,
    tokens: Vec<String>,
}

/// Resolves item names against a factor table and a set of overrides.
#[derive(Debug, Clone)]
pub struct FactorMatcher<'a> {
    table: &'a FactorTable,
    labels: Vec<LabelIndex>,
    policy: MatchPolicy,
}

impl<'a> FactorMatcher<'a> {
    /// Create a matcher over `table` using `policy` for tie-breaks.
    #[must_use]
    pub fn new(table: &'a FactorTable, policy: MatchPolicy) -> Self {
        let labels = table
            .iter()
            .map(|entry| {
                let label = entry.factor.label.to_lowercase();
                let tokens = label_tokens(&label);
                LabelIndex { label, tokens }
            })
            .collect();

        Self {
            table,
            labels,
            policy,
        }
    }

    /// The table this matcher searches after the overrides.
    #[must_use]
    pub fn table(&self) -> &'a FactorTable {
        self.table
    }

    /// Find the factor for `name`, or `None` when nothing matches.
    #[must_use]
    pub fn find(&self, name: &str, overrides: &FactorOverrides) -> Option<MatchedFactor> {
        self.find_with_tier(name, overrides).map(|m| m.factor)
    }

    /// Find the factor for `name` and report which tier matched.
    #[must_use]
    pub fn find_with_tier(&self, name: &str, overrides: &FactorOverrides) -> Option<FactorMatch> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }

        let found = self
            .match_overrides(&name, overrides)
            .map(|f| (MatchTier::Override, f))
            .or_else(|| self.match_table(&name).map(|f| (MatchTier::Table, f)))
            .or_else(|| {
                self.match_label_tokens(&name)
                    .map(|f| (MatchTier::LabelToken, f))
            });

        match found {
            Some((tier, factor)) => {
                debug!(name = %name, tier = ?tier, key = %factor.key, "matched emission factor");
                Some(FactorMatch {
                    tier,
                    factor: factor.clone(),
                })
            }
            None => {
                trace!(name = %name, "no emission factor matched");
                None
            }
        }
    }

    fn match_overrides<'o>(
        &self,
        name: &str,
        overrides: &'o FactorOverrides,
    ) -> Option<&'o MatchedFactor> {
        let candidates = overrides.iter().filter_map(|entry| {
            let key = entry.key.as_str();
            if name.contains(key) {
                Some((entry, key.len()))
            } else if entry.factor.label.to_lowercase().contains(name) {
                Some((entry, name.len()))
            } else {
                None
            }
        });

        self.select(candidates)
    }

    fn match_table(&self, name: &str) -> Option<&'a MatchedFactor> {
        let candidates = self
            .table
            .iter()
            .zip(&self.labels)
            .filter_map(|(entry, index)| {
                let key = entry.key.as_str();
                if name == key || name.contains(key) {
                    Some((entry, key.len()))
                } else if index.label.contains(name) {
                    Some((entry, name.len()))
                } else {
                    None
                }
            });

        self.select(candidates)
    }

    fn match_label_tokens(&self, name: &str) -> Option<&'a MatchedFactor> {
        let candidates = self
            .table
            .iter()
            .zip(&self.labels)
            .filter_map(|(entry, index)| {
                index
                    .tokens
                    .iter()
                    .filter(|token| name.contains(token.as_str()))
                    .map(String::len)
                    .max()
                    .map(|len| (entry, len))
            });

        self.select(candidates)
    }

    /// Pick the winner among `(entry, matched length)` candidates in table order.
    fn select<'t>(
        &self,
        mut candidates: impl Iterator<Item = (&'t MatchedFactor, usize)>,
    ) -> Option<&'t MatchedFactor> {
        match self.policy {
            MatchPolicy::FirstMatch => candidates.next().map(|(entry, _)| entry),
            MatchPolicy::LongestKey => candidates
                .fold(None, |best: Option<(&'t MatchedFactor, usize)>, (entry, len)| {
                    match best {
                        Some((_, best_len)) if best_len >= len => best,
                        _ => Some((entry, len)),
                    }
                })
                .map(|(entry, _)| entry),
        }
    }
}

/// Split a lowercased label into its non-empty words.
fn label_tokens(label: &str) -> Vec<String> {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    let regex = NON_WORD.get_or_init(|| Regex::new(r"[^a-z0-9_]+").expect("valid regex"));

    regex
        .split(label)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::{Category, EmissionFactor, FactorKey};

    fn matcher(table: &FactorTable) -> FactorMatcher<'_> {
        FactorMatcher::new(table, MatchPolicy::FirstMatch)
    }

    #[test]
    fn test_label_tokens() {
        assert_eq!(label_tokens("beans (dried)"), vec!["beans", "dried"]);
        assert_eq!(label_tokens("olive oil"), vec!["olive", "oil"]);
        assert!(label_tokens("").is_empty());
    }

    #[test]
    fn test_exact_key() {
        let table = FactorTable::builtin();
        let found = matcher(&table)
            .find("chicken", &FactorOverrides::new())
            .expect("chicken matches");
        assert_eq!(found.key.as_str(), "chicken");
        assert!((found.factor.co2_per_kg - 6.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_case_insensitive_and_contains_key() {
        let table = FactorTable::builtin();
        let found = matcher(&table)
            .find_with_tier("Chicken Breast", &FactorOverrides::new())
            .expect("chicken breast matches");
        assert_eq!(found.tier, MatchTier::Table);
        assert_eq!(found.factor.key.as_str(), "chicken");
    }

    #[test]
    fn test_label_contains_name() {
        let table = FactorTable::builtin();
        let found = matcher(&table)
            .find("olive oil", &FactorOverrides::new())
            .expect("olive oil matches via label");
        assert_eq!(found.key.as_str(), "olive_oil");
    }

    #[test]
    fn test_label_token_tier() {
        let table = FactorTable::builtin();
        let found = matcher(&table)
            .find_with_tier("dried kidney beans", &FactorOverrides::new())
            .expect("beans matches");
        // "beans" is also a key, so this resolves in the table tier
        assert_eq!(found.tier, MatchTier::Table);

        let found = matcher(&table)
            .find_with_tier("extra virgin oil", &FactorOverrides::new())
            .expect("oil token matches");
        assert_eq!(found.tier, MatchTier::LabelToken);
        assert_eq!(found.factor.key.as_str(), "olive_oil");
    }

    #[test]
    fn test_no_match() {
        let table = FactorTable::builtin();
        assert!(matcher(&table)
            .find("dragonfruit", &FactorOverrides::new())
            .is_none());
        assert!(matcher(&table).find("", &FactorOverrides::new()).is_none());
        assert!(matcher(&table).find("   ", &FactorOverrides::new()).is_none());
    }

    #[test]
    fn test_override_shadows_table() {
        let table = FactorTable::builtin();
        let mut overrides = FactorOverrides::new();
        overrides
            .upsert("chicken", Some("Local chicken"), 3.5, Some("meat"))
            .expect("upsert override");

        let found = matcher(&table)
            .find_with_tier("chicken breast", &overrides)
            .expect("override matches");
        assert_eq!(found.tier, MatchTier::Override);
        assert!((found.factor.factor.co2_per_kg - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_override_label_contains_name() {
        let table = FactorTable::builtin();
        let mut overrides = FactorOverrides::new();
        overrides
            .insert(
                FactorKey::new("oat_drink").expect("valid key"),
                EmissionFactor::new("Oat milk", 0.9, Category::DairyAlternative)
                    .expect("valid factor"),
            )
            .expect("insert override");

        let found = matcher(&table)
            .find("oat milk", &overrides)
            .expect("override label matches");
        assert_eq!(found.key.as_str(), "oat_drink");
    }

    #[test]
    fn test_longest_key_policy() {
        let table = FactorTable::new(vec![
            MatchedFactor::new(
                FactorKey::new("oil").expect("valid key"),
                EmissionFactor::new("Vegetable oil", 3.0, Category::Condiment)
                    .expect("valid factor"),
            ),
            MatchedFactor::new(
                FactorKey::new("olive").expect("valid key"),
                EmissionFactor::new("Olives", 1.0, Category::Produce).expect("valid factor"),
            ),
        ])
        .expect("valid table");

        let first = FactorMatcher::new(&table, MatchPolicy::FirstMatch)
            .find("olive oil", &FactorOverrides::new())
            .expect("first match");
        assert_eq!(first.key.as_str(), "oil");

        let longest = FactorMatcher::new(&table, MatchPolicy::LongestKey)
            .find("olive oil", &FactorOverrides::new())
            .expect("longest match");
        assert_eq!(longest.key.as_str(), "olive");
    }
}
