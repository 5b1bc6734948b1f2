//! Test fixtures for generating survey-response catalogs in memory.
//!
//! This module provides a builder for catalog JSON in the backend's raw
//! format, so tests can describe questions, options and stats inline.
//!
//! # Example
//!
//! ```rust
//! use fixtures::CatalogBuilder;
//!
//! let json = CatalogBuilder::new()
//!     .add_question("Q1", "Gender")
//!     .add_option("1", "Male", 5)
//!     .add_option_pct("2", "Female", 7, 58.33)
//!     .build();
//!
//! let catalog = crosstab::Catalog::from_json(&json, &Default::default()).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use crosstab::{BuilderConfig, Catalog, TableBuilder};
use serde_json::{json, Map, Value};

// ============================================================================
// Catalog Builder
// ============================================================================

#[derive(Debug, Clone, Default)]
struct QuestionEntry {
    var: String,
    txt: String,
    options: Map<String, Value>,
    counts: Map<String, Value>,
    percentages: Map<String, Value>,
}

impl QuestionEntry {
    fn to_value(&self) -> Value {
        let mut stats = json!({ "count": Value::Object(self.counts.clone()) });
        if !self.percentages.is_empty() {
            stats["percentage"] = Value::Object(self.percentages.clone());
        }
        json!({
            "question": { "var": self.var, "txt": self.txt },
            "options": Value::Object(self.options.clone()),
            "stats": stats,
        })
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Question(QuestionEntry),
    Raw(Value),
}

/// Builder for raw catalog JSON.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    entries: Vec<Entry>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new question; following `add_option*` calls attach to it.
    #[must_use]
    pub fn add_question(mut self, var: &str, txt: &str) -> Self {
        self.entries.push(Entry::Question(QuestionEntry {
            var: var.to_string(),
            txt: txt.to_string(),
            ..QuestionEntry::default()
        }));
        self
    }

    fn current(&mut self) -> &mut QuestionEntry {
        match self.entries.last_mut() {
            Some(Entry::Question(q)) => q,
            _ => panic!("add_question must be called before adding options"),
        }
    }

    /// Option with a count and no percentage.
    #[must_use]
    pub fn add_option(mut self, key: &str, label: &str, count: u64) -> Self {
        let q = self.current();
        q.options.insert(key.into(), json!(label));
        q.counts.insert(key.into(), json!(count));
        self
    }

    /// Option with both count and percentage.
    #[must_use]
    pub fn add_option_pct(mut self, key: &str, label: &str, count: u64, pct: f64) -> Self {
        let q = self.current();
        q.options.insert(key.into(), json!(label));
        q.counts.insert(key.into(), json!(count));
        q.percentages.insert(key.into(), json!(pct));
        self
    }

    /// Option with a label but no count entry at all.
    #[must_use]
    pub fn add_option_without_count(mut self, key: &str, label: &str) -> Self {
        let q = self.current();
        q.options.insert(key.into(), json!(label));
        self
    }

    /// Arbitrary raw count value (negative, fractional, string...).
    #[must_use]
    pub fn add_option_raw_count(mut self, key: &str, label: &str, count: Value) -> Self {
        let q = self.current();
        q.options.insert(key.into(), json!(label));
        q.counts.insert(key.into(), count);
        self
    }

    /// Append an entry verbatim, for malformed-input tests.
    #[must_use]
    pub fn add_raw_entry(mut self, entry: Value) -> Self {
        self.entries.push(Entry::Raw(entry));
        self
    }

    pub fn to_value(&self) -> Value {
        let questions: Vec<Value> = self
            .entries
            .iter()
            .map(|e| match e {
                Entry::Question(q) => q.to_value(),
                Entry::Raw(v) => v.clone(),
            })
            .collect();
        json!({ "questions": questions })
    }

    /// Catalog JSON text.
    pub fn build(&self) -> String {
        self.to_value().to_string()
    }

    /// Parsed catalog with the default (lenient) config.
    pub fn build_catalog(&self) -> Catalog {
        Catalog::from_json(&self.build(), &BuilderConfig::default()).unwrap()
    }

    /// Fresh session over this catalog.
    pub fn build_session(&self) -> TableBuilder {
        TableBuilder::new(self.build_catalog(), BuilderConfig::default())
    }
}

// ============================================================================
// Canned catalogs
// ============================================================================

/// Q1 (k1: 5, k2: 7) and Q2 (k1: 3).
pub fn two_question_catalog() -> CatalogBuilder {
    CatalogBuilder::new()
        .add_question("Q1", "First question")
        .add_option("k1", "Yes", 5)
        .add_option("k2", "No", 7)
        .add_question("Q2", "Second question")
        .add_option("k1", "Maybe", 3)
}

/// A survey-like catalog with percentages on every option.
pub fn survey_catalog() -> CatalogBuilder {
    CatalogBuilder::new()
        .add_question("GENDER", "What is your gender?")
        .add_option_pct("1", "Male", 11, 19.64)
        .add_option_pct("2", "Female", 18, 17.86)
        .add_question("AGE", "How old are you?")
        .add_option_pct("1", "18-24", 10, 16.79)
        .add_option_pct("2", "25-34", 17, 16.07)
        .add_option_pct("3", "35+", 29, 67.14)
        .add_question("REGION", "Where do you live?")
        .add_option_pct("N", "North", 20, 40.0)
        .add_option_pct("S", "South", 30, 60.0)
}

/// Question with `n` answers, counts 0..n and percentages `i * 1.5`.
pub fn wide_question(builder: CatalogBuilder, id: &str, n: u64) -> CatalogBuilder {
    let mut builder = builder.add_question(id, id);
    for i in 0..n {
        let pct = 1.5 * f64::from(u32::try_from(i).unwrap());
        builder = builder.add_option_pct(&format!("{id}_{i:03}"), &format!("Answer {i}"), i, pct);
    }
    builder
}
