//! Footprint Estimator - Grocery list to emissions estimates.
//!
//! This crate turns shorthand grocery text into kilogram quantities,
//! resolves each item to an emission factor, and rolls the results up into a
//! total and a per-category breakdown with swap suggestions.
//!
//! # Pipeline
//!
//! - [`parser`] - Ordered cascade of line shapes (`2 x 500g chicken`, `3 apples`, ...)
//! - [`units`] - Normalization of mass, volume and piece counts to kilograms
//! - [`aggregate`] - Per-item emissions, total and per-category breakdown
//! - [`swap`] - Lower-footprint alternatives for the top emitters
//! - [`estimator`] - Facade wiring the above to a factor table and configuration
//!
//! Every step is pure and synchronous. Malformed input degrades to an
//! approximate answer instead of an error; items without a factor are
//! reported as unknown.
//!
//! # Example
//!
//! ```rust
//! use footprint_estimator::Estimator;
//! use footprint_factors::FactorOverrides;
//!
//! let estimator = Estimator::default();
//! let items = estimator.parse_list("2 x 500g chicken breast\n1 kg potatoes\n3 apples");
//! let result = estimator.aggregate(&items, &FactorOverrides::new());
//!
//! assert_eq!(result.details.len(), 3);
//! assert_eq!(result.breakdown.get("meat"), Some(&6.9));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregate;
pub mod error;
#[allow(missing_docs)]
pub mod estimator;
pub mod parser;
pub mod swap;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use aggregate::AggregationEngine;
pub use error::{EstimateError, Result};
pub use estimator::{EstimateReport, Estimator};
pub use parser::{LineParser, LineShape};
pub use swap::{top_emitters, SwapAdvisor, SwapSuggestion};
pub use types::{AggregationResult, GroceryItem, ResolvedItem};
pub use units::{Unit, UnitConverter};
