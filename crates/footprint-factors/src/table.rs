//! Ordered emission factor tables.
//!
//! Table order matters: the matcher and the swap advisor both break ties by
//! position, so a table is a sequence rather than a map.

use crate::error::{FactorError, Result};
use footprint_core::{Category, EmissionFactor, FactorKey, MatchedFactor};
use std::collections::HashSet;

/// Built-in factors as `(key, label, kg CO2e per kg, category)`.
///
/// Starter values for demonstration; replace with curated figures
/// (Poore & Nemecek, Our World in Data) for real use.
const BUILTIN_FACTORS: &[(&str, &str, f64, Category)] = &[
    ("beef", "Beef (avg)", 60.0, Category::Meat),
    ("lamb", "Lamb", 24.0, Category::Meat),
    ("pork", "Pork", 12.0, Category::Meat),
    ("chicken", "Chicken", 6.9, Category::Meat),
    ("cheese", "Cheese", 21.0, Category::Dairy),
    ("milk", "Milk", 1.9, Category::Dairy),
    ("eggs", "Eggs", 4.5, Category::Dairy),
    ("rice", "Rice", 2.7, Category::Grains),
    ("pasta", "Pasta", 1.1, Category::Grains),
    ("bread", "Bread", 1.3, Category::Grains),
    ("potatoes", "Potatoes", 0.3, Category::Produce),
    ("tomato", "Tomato", 1.2, Category::Produce),
    ("lettuce", "Lettuce", 0.5, Category::Produce),
    ("apple", "Apple", 0.4, Category::Produce),
    ("banana", "Banana", 0.8, Category::Produce),
    ("avocado", "Avocado", 2.5, Category::Produce),
    ("salmon", "Salmon", 11.9, Category::Fish),
    ("tuna", "Tuna", 6.1, Category::Fish),
    ("shrimp", "Shrimp", 12.5, Category::Fish),
    ("tofu", "Tofu", 2.0, Category::Protein),
    ("beans", "Beans (dried)", 2.0, Category::Protein),
    ("yogurt", "Yogurt", 2.2, Category::Dairy),
    ("butter", "Butter", 12.0, Category::Dairy),
    ("olive_oil", "Olive oil", 6.0, Category::Condiment),
    ("coffee", "Coffee (beans)", 16.5, Category::Drinks),
    ("sugar", "Sugar", 2.8, Category::Pantry),
    ("almond_milk", "Almond milk", 2.4, Category::DairyAlternative),
    ("chocolate", "Chocolate", 18.0, Category::Treats),
];

/// An immutable, ordered table of emission factors with unique keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    entries: Vec<MatchedFactor>,
}

impl FactorTable {
    /// Build a table from ordered entries.
    ///
    /// # Errors
    /// Returns error if a factor fails validation or a key appears twice.
    pub fn new(entries: Vec<MatchedFactor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());

        for entry in &entries {
            entry
                .factor
                .validate()
                .map_err(|e| FactorError::ValidationError {
                    key: entry.key.to_string(),
                    reason: e.to_string(),
                })?;

            if !seen.insert(entry.key.clone()) {
                return Err(FactorError::ValidationError {
                    key: entry.key.to_string(),
                    reason: "duplicate key in factor table".to_string(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// The built-in starter table.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_FACTORS
            .iter()
            .map(|(key, label, co2_per_kg, category)| {
                MatchedFactor::new(
                    FactorKey::new(*key).expect("built-in factor keys are canonical"),
                    EmissionFactor {
                        label: (*label).to_string(),
                        co2_per_kg: *co2_per_kg,
                        category: category.clone(),
                    },
                )
            })
            .collect();

        Self { entries }
    }

    /// Look up an entry by exact key.
    #[must_use]
    pub fn get(&self, key: &FactorKey) -> Option<&MatchedFactor> {
        self.entries.iter().find(|entry| &entry.key == key)
    }

    /// Iterate over entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchedFactor> {
        self.entries.iter()
    }

    /// Iterate over the entries of one category, in table order.
    ///
    /// The iterator borrows only the table, so `category` may come from a
    /// shorter-lived value.
    pub fn in_category(
        &self,
        category: &Category,
    ) -> impl Iterator<Item = &MatchedFactor> + '_ {
        let category = category.clone();
        self.entries
            .iter()
            .filter(move |entry| entry.factor.category == category)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FactorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
