//! User-supplied emission factor overrides.
//!
//! Overrides shadow the factor table during matching. The set is a plain
//! value owned by the caller: estimators only ever borrow it, and an editor
//! publishes a new snapshot by replacing the whole set.

use crate::error::Result;
use footprint_core::{Category, EmissionFactor, FactorKey, MatchedFactor};
use tracing::debug;

/// An ordered set of user overrides keyed by [`FactorKey`].
///
/// Iteration follows insertion order; updating an existing key keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorOverrides {
    entries: Vec<MatchedFactor>,
}

impl FactorOverrides {
    /// Create an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override for a free-text item name, as an edit dialog would.
    ///
    /// The key is derived with [`FactorKey::from_name`]. A missing or blank
    /// label falls back to the item name and a missing or blank category to
    /// `other`.
    ///
    /// # Errors
    /// Returns error if the name yields no key, the category is reserved, or
    /// `co2_per_kg` is negative or not finite.
    pub fn upsert(
        &mut self,
        name: &str,
        label: Option<&str>,
        co2_per_kg: f64,
        category: Option<&str>,
    ) -> Result<FactorKey> {
        let key = FactorKey::from_name(name.trim())?;

        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| name.trim());

        let category = match category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(tag) => tag.parse()?,
            None => Category::Other,
        };

        let factor = EmissionFactor::new(label, co2_per_kg, category)?;
        self.insert(key.clone(), factor)?;
        Ok(key)
    }

    /// Insert or replace the override for `key`.
    ///
    /// # Errors
    /// Returns error if the factor fails validation.
    pub fn insert(&mut self, key: FactorKey, factor: EmissionFactor) -> Result<()> {
        factor.validate()?;

        if let Some(existing) = self.entries.iter_mut().find(|entry| entry.key == key) {
            existing.factor = factor;
            debug!(key = %key, "updated factor override");
        } else {
            debug!(key = %key, "added factor override");
            self.entries.push(MatchedFactor::new(key, factor));
        }

        Ok(())
    }

    /// Remove the override for `key`.
    ///
    /// Returns `true` if an override was present.
    pub fn remove(&mut self, key: &FactorKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.key != key);
        let removed = self.entries.len() != before;

        if removed {
            debug!(key = %key, "removed factor override");
        }

        removed
    }

    /// Look up an override by exact key.
    #[must_use]
    pub fn get(&self, key: &FactorKey) -> Option<&MatchedFactor> {
        self.entries.iter().find(|entry| &entry.key == key)
    }

    /// Iterate over overrides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchedFactor> {
        self.entries.iter()
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_derives_key_and_defaults() {
        let mut overrides = FactorOverrides::new();
        let key = overrides
            .upsert("Oat Milk", None, 0.9, None)
            .expect("upsert override");

        assert_eq!(key.as_str(), "oat_milk");
        let entry = overrides.get(&key).expect("override stored");
        assert_eq!(entry.factor.label, "Oat Milk");
        assert_eq!(entry.factor.category, Category::Other);
    }

    #[test]
    fn test_upsert_with_label_and_category() {
        let mut overrides = FactorOverrides::new();
        let key = overrides
            .upsert("oat milk", Some("Oat drink"), 0.9, Some("dairy_alternative"))
            .expect("upsert override");

        let entry = overrides.get(&key).expect("override stored");
        assert_eq!(entry.factor.label, "Oat drink");
        assert_eq!(entry.factor.category, Category::DairyAlternative);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut overrides = FactorOverrides::new();
        overrides
            .upsert("chicken", None, 5.0, Some("meat"))
            .expect("first");
        overrides.upsert("tofu", None, 1.5, Some("protein")).expect("second");
        overrides
            .upsert("chicken", None, 4.0, Some("meat"))
            .expect("update");

        let keys: Vec<&str> = overrides.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["chicken", "tofu"]);
        assert_eq!(overrides.len(), 2);

        let chicken = overrides
            .get(&FactorKey::new("chicken").expect("valid key"))
            .expect("chicken override");
        assert!((chicken.factor.co2_per_kg - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut overrides = FactorOverrides::new();
        assert!(overrides.upsert("", None, 1.0, None).is_err());
        assert!(overrides.upsert("tofu", None, -1.0, None).is_err());
        assert!(overrides.upsert("tofu", None, f64::NAN, None).is_err());
        assert!(overrides.upsert("tofu", None, 1.0, Some("unknown")).is_err());
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut overrides = FactorOverrides::new();
        let key = overrides.upsert("tofu", None, 1.5, None).expect("upsert");

        assert!(overrides.remove(&key));
        assert!(!overrides.remove(&key));
        assert!(overrides.is_empty());
    }
}
