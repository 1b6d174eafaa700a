use crate::aggregate::AggregationEngine;
use crate::error::Result;
use crate::parser::LineParser;
use crate::swap::{SwapAdvisor, SwapSuggestion, DEFAULT_TOP_EMITTERS};
use crate::types::{AggregationResult, GroceryItem, ResolvedItem};
use crate::units::UnitConverter;
use footprint_core::{AppConfig, MatchPolicy, MatchedFactor};
use footprint_factors::{FactorLoader, FactorMatcher, FactorOverrides, FactorTable};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Aggregation plus swap suggestions for the top emitters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    /// Totals, breakdown and per-item detail
    pub result: AggregationResult,
    /// Swaps for the highest emitters, highest first
    pub suggestions: Vec<SwapSuggestion>,
}

/// Entry point tying parser, matcher, aggregation and swaps together.
///
/// The estimator owns the factor table; override sets are passed in on each
/// call and never stored.
#[derive(Debug, Clone)]
pub struct Estimator {
    parser: LineParser,
    table: FactorTable,
    policy: MatchPolicy,
    top_emitters: usize,
}

impl Estimator {
    /// Create an estimator from its parts.
    #[must_use]
    pub fn new(table: FactorTable, converter: UnitConverter, policy: MatchPolicy) -> Self {
        Self {
            parser: LineParser::new(converter),
            table,
            policy,
            top_emitters: DEFAULT_TOP_EMITTERS,
        }
    }

    /// Set how many top emitters [`Estimator::report`] suggests swaps for.
    #[must_use]
    pub fn with_top_emitters(mut self, limit: usize) -> Self {
        self.top_emitters = limit;
        self
    }

    /// Build an estimator from configuration.
    ///
    /// Loads the factor table named by `factors.table_path`, or uses the
    /// built-in table when unset.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the table file can't
    /// be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let table = match &config.factors.table_path {
            Some(path) => FactorLoader::new(path)?.load()?,
            None => FactorTable::builtin(),
        };

        info!(
            factors = table.len(),
            policy = %config.matching.policy,
            "estimator ready"
        );

        Ok(Self::new(
            table,
            UnitConverter::new(config.units.default_piece_weight_kg),
            config.matching.policy,
        )
        .with_top_emitters(config.report.top_emitters))
    }

    /// The factor table in use.
    #[must_use]
    pub fn table(&self) -> &FactorTable {
        &self.table
    }

    /// The line parser in use.
    #[must_use]
    pub fn parser(&self) -> &LineParser {
        &self.parser
    }

    /// A matcher over this estimator's table.
    #[must_use]
    pub fn matcher(&self) -> FactorMatcher<'_> {
        FactorMatcher::new(&self.table, self.policy)
    }

    /// Parse one line; `None` for blank lines.
    #[must_use]
    pub fn parse_line(&self, line: &str) -> Option<GroceryItem> {
        self.parser.parse(line)
    }

    /// Parse a newline-separated list, skipping blank lines.
    #[must_use]
    pub fn parse_list(&self, text: &str) -> Vec<GroceryItem> {
        self.parser.parse_list(text)
    }

    /// Aggregate `items`, with `overrides` shadowing the table.
    #[must_use]
    pub fn aggregate(&self, items: &[GroceryItem], overrides: &FactorOverrides) -> AggregationResult {
        AggregationEngine::with_matcher(self.matcher()).aggregate(items, overrides)
    }

    /// Swap for one resolved item.
    #[must_use]
    pub fn suggest_swap(&self, item: &ResolvedItem) -> Option<&MatchedFactor> {
        SwapAdvisor::new(&self.table).suggest(item)
    }

    /// Aggregate `items` and suggest swaps for the top emitters.
    #[must_use]
    pub fn report(&self, items: &[GroceryItem], overrides: &FactorOverrides) -> EstimateReport {
        let result = self.aggregate(items, overrides);
        let suggestions = SwapAdvisor::new(&self.table).suggestions(&result, self.top_emitters);
        EstimateReport {
            result,
            suggestions,
        }
    }

    /// Parse `text` and report on it in one step.
    #[must_use]
    pub fn estimate_text(&self, text: &str, overrides: &FactorOverrides) -> EstimateReport {
        let items = self.parse_list(text);
        self.report(&items, overrides)
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(
            FactorTable::builtin(),
            UnitConverter::default(),
            MatchPolicy::default(),
        )
    }
}
