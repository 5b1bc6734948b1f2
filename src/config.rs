//! Builder configuration.
//!
//! Loaded from TOML for the CLI, or passed as a plain JS object through the
//! WASM surface. Every field has a default so partial files are fine:
//!
//! ```toml
//! parse_mode = "strict"
//! missing_count = "skip"
//! aggregation = "mean_of_marginals"
//! percentage_decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// How the catalog loader treats entries that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Skip the entry and log it.
    #[default]
    Lenient,
    /// Fail the whole load with `MalformedCatalogEntry`.
    Strict,
}

/// What a missing per-option count means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCountPolicy {
    /// Treat it as 0 (understates aggregates when data is incomplete).
    #[default]
    Zero,
    /// Treat the answer as malformed.
    Skip,
}

/// Which cell aggregation rule the matrix generator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKind {
    /// Unweighted mean of the two marginals (provisional approximation).
    #[default]
    MeanOfMarginals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub parse_mode: ParseMode,
    pub missing_count: MissingCountPolicy,
    pub aggregation: AggregationKind,
    /// Decimal places kept on aggregated percentages
    pub percentage_decimals: u8,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Lenient,
            missing_count: MissingCountPolicy::Zero,
            aggregation: AggregationKind::MeanOfMarginals,
            percentage_decimals: 2,
        }
    }
}

impl BuilderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn strict(mut self) -> Self {
        self.parse_mode = ParseMode::Strict;
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = BuilderConfig::from_toml_str("").unwrap();
        assert_eq!(config, BuilderConfig::default());
        assert_eq!(config.percentage_decimals, 2);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config =
            BuilderConfig::from_toml_str("parse_mode = \"strict\"\nmissing_count = \"skip\"\n")
                .unwrap();
        assert_eq!(config.parse_mode, ParseMode::Strict);
        assert_eq!(config.missing_count, MissingCountPolicy::Skip);
        assert_eq!(config.aggregation, AggregationKind::MeanOfMarginals);
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        assert!(BuilderConfig::from_toml_str("parse_mode = \"sloppy\"").is_err());
    }
}
