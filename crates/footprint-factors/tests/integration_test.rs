//! Integration tests for factor loading and matching
//!
//! Loads a table from disk, layers overrides on top and checks the
//! resolution order end to end.

use footprint_core::{Category, MatchPolicy};
use footprint_factors::{FactorError, FactorLoader, FactorMatcher, FactorOverrides, MatchTier};
use std::fs;
use tempfile::TempDir;

const TABLE: &str = r#"
[[factor]]
key = "beef"
label = "Beef (avg)"
co2_per_kg = 60.0
category = "meat"

[[factor]]
key = "lentils"
label = "Lentils (dried)"
co2_per_kg = 0.9
category = "protein"

[[factor]]
key = "oat_milk"
label = "Oat milk"
co2_per_kg = 0.9
category = "dairy_alternative"
"#;

#[test]
fn test_load_table_from_disk() {
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("factors.toml");
    fs::write(&path, TABLE).expect("write table");

    let loader = FactorLoader::new(&path).expect("create loader");
    let table = loader.load().expect("load table");

    assert_eq!(table.len(), 3);
    assert_eq!(loader.path(), path.as_path());
}

#[test]
fn test_loaded_table_matching_flow() {
    let table = FactorLoader::parse(TABLE, "test").expect("parse table");
    let matcher = FactorMatcher::new(&table, MatchPolicy::FirstMatch);
    let mut overrides = FactorOverrides::new();

    // Label token tier: "dried" belongs to the lentils label
    let found = matcher
        .find_with_tier("dried chickpeas", &overrides)
        .expect("token match");
    assert_eq!(found.tier, MatchTier::LabelToken);
    assert_eq!(found.factor.key.as_str(), "lentils");

    // A user override for chickpeas wins from now on
    overrides
        .upsert("chickpeas", Some("Chickpeas"), 0.8, Some("protein"))
        .expect("upsert override");
    let found = matcher
        .find_with_tier("dried chickpeas", &overrides)
        .expect("override match");
    assert_eq!(found.tier, MatchTier::Override);
    assert_eq!(found.factor.factor.category, Category::Protein);

    // Unmatched names stay unknown
    assert!(matcher.find("saffron", &overrides).is_none());
}

#[test]
fn test_load_rejects_table_without_valid_entries() {
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("factors.toml");
    fs::write(
        &path,
        "[[factor]]\nkey = \"x\"\nlabel = \"\"\nco2_per_kg = 1.0\ncategory = \"other\"\n",
    )
    .expect("write table");

    let loader = FactorLoader::new(&path).expect("create loader");
    assert!(matches!(loader.load(), Err(FactorError::EmptyTable { .. })));
}
