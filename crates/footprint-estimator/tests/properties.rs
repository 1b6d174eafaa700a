//! Property tests over generated grocery lists.

use footprint_core::round::add_co2;
use footprint_core::Category;
use footprint_estimator::{Estimator, GroceryItem, UnitConverter};
use footprint_factors::FactorOverrides;
use proptest::prelude::*;

const NAMES: &[&str] = &[
    "beef",
    "chicken breast",
    "cheese",
    "apples",
    "potatoes",
    "olive oil",
    "dried beans",
    "oat milk",
    "dragonfruit",
    "mystery box",
    "coffee",
    "salmon fillet",
];

const UNITS: &[&str] = &["g", "kg", "lb", "oz", "ml", "l", "pcs", "bunch"];

fn grocery_line() -> impl Strategy<Value = String> {
    (
        0usize..4,
        1u32..2000,
        1u32..6,
        prop::sample::select(UNITS),
        prop::sample::select(NAMES),
    )
        .prop_map(|(shape, qty, count, unit, name)| match shape {
            0 => format!("{count} x {qty}{unit} {name}"),
            1 => format!("{qty} {unit} {name}"),
            2 => format!("{count} {name}"),
            _ => name.to_string(),
        })
}

fn grocery_text() -> impl Strategy<Value = String> {
    prop::collection::vec(grocery_line(), 0..25).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn breakdown_sums_to_total(text in grocery_text()) {
        let estimator = Estimator::default();
        let items = estimator.parse_list(&text);
        let result = estimator.aggregate(&items, &FactorOverrides::new());

        let sum: f64 = result
            .breakdown
            .iter()
            .filter(|(category, _)| category.as_str() != Category::UNKNOWN_BUCKET)
            .map(|(_, value)| value)
            .sum();
        prop_assert!((sum - result.total).abs() <= 0.01);
        let rounded = result
            .breakdown
            .values()
            .fold(0.0, |acc, value| add_co2(acc, *value));
        prop_assert_eq!(rounded, result.total);
        prop_assert_eq!(
            result.breakdown.get(Category::UNKNOWN_BUCKET).copied().unwrap_or(0.0),
            0.0
        );
    }

    #[test]
    fn aggregate_is_idempotent(text in grocery_text()) {
        let estimator = Estimator::default();
        let mut overrides = FactorOverrides::new();
        overrides
            .upsert("oat milk", None, 0.9, Some("dairy_alternative"))
            .expect("upsert override");
        let items = estimator.parse_list(&text);

        let first = estimator.aggregate(&items, &overrides);
        let second = estimator.aggregate(&items, &overrides);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn details_follow_input_order(text in grocery_text()) {
        let estimator = Estimator::default();
        let items = estimator.parse_list(&text);
        let result = estimator.aggregate(&items, &FactorOverrides::new());

        let originals: Vec<&str> = result.details.iter().map(|d| d.item.original.as_str()).collect();
        let expected: Vec<&str> = items.iter().map(|i| i.original.as_str()).collect();
        prop_assert_eq!(originals, expected);
        prop_assert!(result.details.iter().all(|d| d.item.kg >= 0.0 && !d.item.unit.is_empty()));
    }

    #[test]
    fn swaps_are_strictly_lower(text in grocery_text()) {
        let estimator = Estimator::default();
        let items = estimator.parse_list(&text);
        let result = estimator.aggregate(&items, &FactorOverrides::new());

        for detail in &result.details {
            if let Some(swap) = estimator.suggest_swap(detail) {
                let current = detail.factor.as_ref().expect("swaps need a factor");
                prop_assert!(swap.factor.co2_per_kg < current.factor.co2_per_kg);
                prop_assert_eq!(&swap.factor.category, &current.factor.category);
            }
        }
    }

    #[test]
    fn huge_quantities_aggregate_without_overflow(
        lines in prop::collection::vec(
            (
                "[1-9][0-9]{15,39}",
                prop::sample::select(&["kg", "g", "lbs", "l"][..]),
                prop::sample::select(NAMES),
            ),
            1..6,
        )
    ) {
        let text = lines
            .iter()
            .map(|(digits, unit, name)| format!("{digits} {unit} {name}"))
            .collect::<Vec<_>>()
            .join("\n");
        let estimator = Estimator::default();
        let result = estimator.aggregate(&estimator.parse_list(&text), &FactorOverrides::new());

        let sum: f64 = result.details.iter().filter_map(|d| d.co2).sum();
        prop_assert!(result.total.is_finite());
        prop_assert!((result.total - sum).abs() <= sum.abs() * 1e-12 + 0.01);
        prop_assert!(result.breakdown.values().all(|value| value.is_finite() && *value >= 0.0));
    }

    #[test]
    fn mass_conversion_is_linear(qty in 0.0f64..10_000.0, unit in prop::sample::select(&["kg", "g", "lb", "lbs", "oz", "l", "ml"][..])) {
        let converter = UnitConverter::default();
        let one = converter.to_kg(Some(1.0), unit, "");
        let many = converter.to_kg(Some(qty), unit, "");
        prop_assert!((many - qty * one).abs() <= 1e-9 * qty.max(1.0));
    }

    #[test]
    fn parsed_lines_are_well_formed(line in "\\PC{0,40}") {
        let estimator = Estimator::default();
        match estimator.parse_line(&line) {
            None => prop_assert!(line.trim().is_empty()),
            Some(GroceryItem { unit, kg, original, .. }) => {
                prop_assert!(!unit.is_empty());
                prop_assert!(kg >= 0.0 && kg.is_finite());
                prop_assert_eq!(original.as_str(), line.trim());
            }
        }
    }
}
