//! Question catalog loading.
//!
//! Turns the raw survey-response dataset into a list of validated
//! [`Question`]s. Validation happens once, here; everything downstream can
//! rely on non-empty ids, texts and answer lists.
//!
//! Rules per entry:
//! - `question.var` and `question.txt` must be present and non-empty
//! - one [`Answer`] per `options` key, visited in JavaScript property order
//! - an option whose label is absent or `null` is not an option at all
//! - a label that is empty or not a string is malformed, as is a percentage
//!   that is not a number or a count that is not a non-negative whole number
//!   (`4.0` counts as 4)
//! - an entry whose members have the wrong JSON shape is malformed
//! - a missing count is 0 unless [`MissingCountPolicy::Skip`] is configured
//! - a question with no surviving answers, or a repeated id, is malformed
//!
//! In [`ParseMode::Lenient`] malformed entries are dropped with a warning; in
//! [`ParseMode::Strict`] the first one fails the load.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{BuilderConfig, MissingCountPolicy, ParseMode};
use crate::error::{CrosstabError, Result};
use crate::types::{Answer, Question, QuestionStats, RawCatalog, RawQuestion};

/// Validated, ordered list of questions available for the axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog from questions that are already validated.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Parse catalog JSON and validate it.
    pub fn from_json(json: &str, config: &BuilderConfig) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::load(&raw, config)
    }

    /// Validate a raw dataset.
    pub fn load(raw: &RawCatalog, config: &BuilderConfig) -> Result<Self> {
        let mut questions = Vec::with_capacity(raw.questions.len());
        let mut seen: HashSet<String> = HashSet::new();

        for (index, entry) in raw.questions.iter().enumerate() {
            let outcome = serde_json::from_str::<RawQuestion>(entry.get())
                .map_err(|e| format!("unreadable entry: {e}"))
                .and_then(|parsed| convert_question(&parsed, config))
                .and_then(|q| {
                    if seen.contains(&q.id) {
                        Err(format!("duplicate question id {}", q.id))
                    } else {
                        Ok(q)
                    }
                });

            match outcome {
                Ok(question) => {
                    seen.insert(question.id.clone());
                    questions.push(question);
                }
                Err(reason) => match config.parse_mode {
                    ParseMode::Strict => {
                        return Err(CrosstabError::MalformedCatalogEntry { index, reason });
                    }
                    ParseMode::Lenient => {
                        warn!(index, %reason, "skipping malformed catalog entry");
                    }
                },
            }
        }

        info!(
            loaded = questions.len(),
            total = raw.questions.len(),
            "catalog loaded"
        );
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions whose id or text contains `term`, case-insensitively.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Question> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.questions.iter().collect();
        }
        self.questions
            .iter()
            .filter(|q| {
                q.id.to_lowercase().contains(&needle) || q.text.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

fn convert_question(raw: &RawQuestion, config: &BuilderConfig) -> std::result::Result<Question, String> {
    let meta = raw.question.as_ref().ok_or("missing question metadata")?;
    let id = text_field(meta.var.as_ref(), "question var")?;
    let text = text_field(meta.txt.as_ref(), "question txt")
        .map_err(|e| format!("question {id}: {e}"))?;

    let mut answers = Vec::new();
    if let Some(options) = raw.options.as_ref() {
        for key in options.keys() {
            let Some(label) = options.get(key) else {
                continue;
            };
            match convert_answer(key, label, raw.stats.as_ref(), config.missing_count) {
                Ok(answer) => answers.push(answer),
                Err(reason) if config.parse_mode == ParseMode::Strict => {
                    return Err(format!("question {id}, option {key}: {reason}"));
                }
                Err(reason) => {
                    debug!(question = id, option = key, %reason, "dropping answer");
                }
            }
        }
    }

    if answers.is_empty() {
        return Err(format!("question {id} has no valid answers"));
    }

    Ok(Question::new(id, text, answers))
}

/// A required, non-empty string member.
fn text_field<'a>(value: Option<&'a Value>, name: &str) -> std::result::Result<&'a str, String> {
    match value {
        None | Some(Value::Null) => Err(format!("missing {name}")),
        Some(Value::String(s)) if s.is_empty() => Err(format!("empty {name}")),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!("{name} {other} is not a string")),
    }
}

fn convert_answer(
    key: &str,
    label: &Value,
    stats: Option<&QuestionStats>,
    missing: MissingCountPolicy,
) -> std::result::Result<Answer, String> {
    let label = text_field(Some(label), "label")?;

    let count = match stats.and_then(|s| s.count.as_ref()).and_then(|c| c.get(key)) {
        Some(value) => parse_count(value)?,
        None => match missing {
            MissingCountPolicy::Zero => 0,
            MissingCountPolicy::Skip => return Err("missing count".into()),
        },
    };

    let percentage = match stats
        .and_then(|s| s.percentage.as_ref())
        .and_then(|p| p.get(key))
    {
        Some(value) => Some(
            value
                .as_f64()
                .ok_or_else(|| format!("percentage {value} is not a number"))?,
        ),
        None => None,
    };

    Ok(Answer {
        key: key.to_string(),
        label: label.to_string(),
        count,
        percentage,
    })
}

/// Largest integer an `f64` holds exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// A non-negative whole number, written either as an integer or as a float
/// with no fractional part (`4.0`).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn parse_count(value: &Value) -> std::result::Result<u64, String> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if (0.0..=MAX_EXACT_FLOAT).contains(&f) && f.fract() == 0.0 => Ok(f as u64),
        _ => Err(format!("count {value} is not a non-negative integer")),
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

    fn load(json: &str) -> Catalog {
        Catalog::from_json(json, &BuilderConfig::default()).unwrap()
    }

    #[test]
    fn test_maps_var_and_txt() {
        let catalog = load(
            r#"{"questions": [{
                "question": {"var": "Q1", "txt": "Gender"},
                "options": {"1": "Male", "2": "Female"},
                "stats": {"count": {"1": 5, "2": 7}, "percentage": {"1": 41.67, "2": 58.33}}
            }]}"#,
        );
        let q = catalog.get("Q1").unwrap();
        assert_eq!(q.text, "Gender");
        assert_eq!(q.answer_labels(), vec!["Male", "Female"]);
        assert_eq!(q.answers[0].count, 5);
        assert_eq!(q.answers[1].percentage, Some(58.33));
    }

    #[test]
    fn test_missing_count_defaults_to_zero() {
        let catalog = load(
            r#"{"questions": [{
                "question": {"var": "Q1", "txt": "T"},
                "options": {"a": "A"},
                "stats": {"count": {}}
            }]}"#,
        );
        assert_eq!(catalog.get("Q1").unwrap().answers[0].count, 0);
    }

    #[test]
    fn test_null_and_empty_labels_are_dropped() {
        let catalog = load(
            r#"{"questions": [{
                "question": {"var": "Q1", "txt": "T"},
                "options": {"a": null, "b": "", "c": "C"},
                "stats": {"count": {"a": 1, "b": 2, "c": 3}}
            }]}"#,
        );
        let q = catalog.get("Q1").unwrap();
        assert_eq!(q.answers.len(), 1);
        assert_eq!(q.answers[0].key, "c");
    }

    #[test]
    fn test_search_matches_id_and_text() {
        let catalog = Catalog::from_questions(vec![
            Question::new("AGE", "How old are you?", vec![Answer::new("1", "18-24", 3)]),
            Question::new("REGION", "Where do you live?", vec![Answer::new("1", "North", 3)]),
        ]);
        assert_eq!(catalog.search("age").len(), 1);
        assert_eq!(catalog.search("LIVE")[0].id, "REGION");
        assert_eq!(catalog.search("  ").len(), 2);
    }
}
