//! Footprint Factors - Emission factor tables and free-text matching.
//!
//! This crate holds the emission factor data the estimator works against and
//! the lookup that ties a grocery item name to one factor.
//!
//! # Architecture
//!
//! - **Table** ([`table`]): Ordered, immutable factor table, including the built-in starter table
//! - **Loader** ([`loader`]): TOML table files replacing the built-ins
//! - **Overrides** ([`overrides`]): User-supplied factors that shadow the table
//! - **Matcher** ([`matcher`]): Tiered, case-insensitive name lookup
//! - **Errors** ([`error`]): Factor-specific error types
//!
//! # Example
//!
//! ```rust
//! use footprint_core::MatchPolicy;
//! use footprint_factors::{FactorMatcher, FactorOverrides, FactorTable};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = FactorTable::builtin();
//! let matcher = FactorMatcher::new(&table, MatchPolicy::FirstMatch);
//!
//! let mut overrides = FactorOverrides::new();
//! overrides.upsert("oat milk", None, 0.9, Some("dairy_alternative"))?;
//!
//! let chicken = matcher.find("chicken breast", &overrides).expect("built in");
//! assert_eq!(chicken.key.as_str(), "chicken");
//!
//! let oat = matcher.find("Oat Milk", &overrides).expect("override");
//! assert_eq!(oat.key.as_str(), "oat_milk");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod loader;
pub mod matcher;
pub mod overrides;
pub mod table;

// Re-export commonly used types
pub use error::{FactorError, Result};
pub use loader::FactorLoader;
pub use matcher::{FactorMatch, FactorMatcher, MatchTier};
pub use overrides::FactorOverrides;
pub use table::FactorTable;
