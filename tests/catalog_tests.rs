//! Catalog loading tests: lenient vs strict handling of malformed entries,
//! option ordering and missing statistics.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use crosstab::config::{MissingCountPolicy, ParseMode};
use crosstab::{BuilderConfig, Catalog, CrosstabError};
use fixtures::{survey_catalog, two_question_catalog, CatalogBuilder};
use serde_json::json;

fn lenient() -> BuilderConfig {
    BuilderConfig::default()
}

fn strict() -> BuilderConfig {
    BuilderConfig::default().strict()
}

fn ids(catalog: &Catalog) -> Vec<&str> {
    catalog.questions().iter().map(|q| q.id.as_str()).collect()
}

// ============================================================================
// Well-formed input
// ============================================================================

#[test]
fn test_survey_catalog_loads_in_document_order() {
    let catalog = Catalog::from_json(&survey_catalog().build(), &strict()).unwrap();
    assert_eq!(ids(&catalog), vec!["GENDER", "AGE", "REGION"]);

    let age = catalog.get("AGE").unwrap();
    assert_eq!(age.text, "How old are you?");
    assert_eq!(age.answer_labels(), vec!["18-24", "25-34", "35+"]);
    assert_eq!(age.answers[2].count, 29);
    let pct = age.answers[2].percentage.unwrap();
    assert!((pct - 67.14).abs() < 1e-9);
}

#[test]
fn test_missing_percentage_block() {
    let catalog = two_question_catalog().build_catalog();
    let q1 = catalog.get("Q1").unwrap();
    assert!(q1.answers.iter().all(|a| a.percentage.is_none()));
    assert_eq!(q1.answers[1].count, 7);
}

#[test]
fn test_option_keys_follow_js_property_order() {
    let json = r#"{"questions": [{
        "question": {"var": "Q", "txt": "Ordering"},
        "options": {"b": "Bee", "10": "Ten", "a": "Ay", "2": "Two", "01": "Zero-one"},
        "stats": {"count": {"b": 1, "10": 2, "a": 3, "2": 4, "01": 5}}
    }]}"#;
    let catalog = Catalog::from_json(json, &strict()).unwrap();
    let q = catalog.get("Q").unwrap();
    let keys: Vec<&str> = q.answers.iter().map(|a| a.key.as_str()).collect();
    assert_eq!(keys, vec!["2", "10", "b", "a", "01"]);
    assert_eq!(q.answers[0].count, 4);
}

#[test]
fn test_null_option_label_is_not_an_answer() {
    let json = r#"{"questions": [{
        "question": {"var": "Q", "txt": "Nulls"},
        "options": {"1": "One", "2": null},
        "stats": {"count": {"1": 1, "2": 2}}
    }]}"#;
    for config in [lenient(), strict()] {
        let catalog = Catalog::from_json(json, &config).unwrap();
        assert_eq!(catalog.get("Q").unwrap().answers.len(), 1);
    }
}

#[test]
fn test_search() {
    let catalog = survey_catalog().build_catalog();
    let found: Vec<_> = catalog.search("OLD").iter().map(|q| q.id.as_str()).collect();
    assert_eq!(found, vec!["AGE"]);
    assert_eq!(catalog.search("").len(), 3);
    assert_eq!(catalog.search("  region ").len(), 1);
    assert!(catalog.search("nothing like this").is_empty());
}

// ============================================================================
// Missing counts
// ============================================================================

#[test]
fn test_missing_count_defaults_to_zero() {
    let catalog = CatalogBuilder::new()
        .add_question("Q", "Counts")
        .add_option("1", "Counted", 4)
        .add_option_without_count("2", "Uncounted")
        .build_catalog();
    let q = catalog.get("Q").unwrap();
    assert_eq!(q.answers.len(), 2);
    assert_eq!(q.answers[1].count, 0);
}

#[test]
fn test_missing_count_skip_policy() {
    let json = CatalogBuilder::new()
        .add_question("Q", "Counts")
        .add_option("1", "Counted", 4)
        .add_option_without_count("2", "Uncounted")
        .build();
    let config = BuilderConfig {
        missing_count: MissingCountPolicy::Skip,
        ..BuilderConfig::default()
    };
    let catalog = Catalog::from_json(&json, &config).unwrap();
    assert_eq!(catalog.get("Q").unwrap().answers.len(), 1);

    let err = Catalog::from_json(&json, &config.strict()).unwrap_err();
    assert!(matches!(
        err,
        CrosstabError::MalformedCatalogEntry { index: 0, .. }
    ));
}

// ============================================================================
// Malformed entries
// ============================================================================

fn with_bad_count(count: serde_json::Value) -> String {
    CatalogBuilder::new()
        .add_question("GOOD", "Fine")
        .add_option("1", "One", 1)
        .add_question("BAD", "Broken")
        .add_option_raw_count("1", "One", count)
        .build()
}

#[test]
fn test_bad_counts_are_malformed() {
    for count in [json!(-3), json!(2.5), json!("5"), json!(true)] {
        let json = with_bad_count(count.clone());

        let catalog = Catalog::from_json(&json, &lenient()).unwrap();
        assert_eq!(ids(&catalog), vec!["GOOD"], "count {count} should drop BAD");
    }
}

#[test]
fn test_whole_float_count_is_accepted() {
    for config in [lenient(), strict()] {
        let catalog = Catalog::from_json(&with_bad_count(json!(4.0)), &config).unwrap();
        assert_eq!(ids(&catalog), vec!["GOOD", "BAD"]);
        assert_eq!(catalog.get("BAD").unwrap().answers[0].count, 4);
    }
}

#[test]
fn test_negative_count_fails_strict() {
    let err = Catalog::from_json(&with_bad_count(json!(-3)), &strict()).unwrap_err();
    match err {
        CrosstabError::MalformedCatalogEntry { index, reason } => {
            assert_eq!(index, 1);
            assert!(reason.contains("BAD"), "reason was {reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_missing_metadata_is_malformed() {
    let json = CatalogBuilder::new()
        .add_raw_entry(json!({ "options": {"1": "One"}, "stats": {"count": {"1": 1}} }))
        .add_raw_entry(json!({ "question": {"txt": "No var"}, "options": {"1": "One"} }))
        .add_raw_entry(json!({ "question": {"var": "NOTXT"}, "options": {"1": "One"} }))
        .add_raw_entry(json!({ "question": {"var": "", "txt": "Empty var"}, "options": {"1": "One"} }))
        .add_question("OK", "Fine")
        .add_option("1", "One", 1)
        .build();

    let catalog = Catalog::from_json(&json, &lenient()).unwrap();
    assert_eq!(ids(&catalog), vec!["OK"]);

    assert!(matches!(
        Catalog::from_json(&json, &strict()),
        Err(CrosstabError::MalformedCatalogEntry { index: 0, .. })
    ));
}

/// GOOD followed by one entry carrying a wrong-typed member.
fn with_wrong_type(entry: serde_json::Value) -> String {
    CatalogBuilder::new()
        .add_question("GOOD", "Fine")
        .add_option("1", "One", 1)
        .add_raw_entry(entry)
        .build()
}

fn wrong_type_entries() -> Vec<serde_json::Value> {
    vec![
        json!({ "question": {"var": "B", "txt": "T"}, "options": {"1": "One"}, "stats": {"count": {"1": "5"}} }),
        json!({ "question": {"var": "B", "txt": "T"}, "options": {"1": "One"},
                "stats": {"count": {"1": 5}, "percentage": {"1": "20%"}} }),
        json!({ "question": {"var": "B", "txt": "T"}, "options": {"1": 7}, "stats": {"count": {"1": 5}} }),
        json!({ "question": {"var": 42, "txt": "T"}, "options": {"1": "One"} }),
        json!({ "question": {"var": "B", "txt": ["T"]}, "options": {"1": "One"} }),
        json!({ "question": "B", "options": {"1": "One"} }),
        json!({ "question": {"var": "B", "txt": "T"}, "options": ["One"] }),
        json!({ "question": {"var": "B", "txt": "T"}, "options": {"1": "One"}, "stats": {"count": 5} }),
        json!(17),
    ]
}

#[test]
fn test_wrong_typed_entry_is_skipped_when_lenient() {
    for entry in wrong_type_entries() {
        let json = with_wrong_type(entry.clone());
        let catalog = Catalog::from_json(&json, &lenient())
            .unwrap_or_else(|e| panic!("{entry} failed the whole load: {e}"));
        assert_eq!(ids(&catalog), vec!["GOOD"], "{entry} should be skipped");
    }
}

#[test]
fn test_wrong_typed_entry_is_malformed_when_strict() {
    for entry in wrong_type_entries() {
        let json = with_wrong_type(entry.clone());
        match Catalog::from_json(&json, &strict()) {
            Err(CrosstabError::MalformedCatalogEntry { index, .. }) => {
                assert_eq!(index, 1, "{entry}");
            }
            other => panic!("{entry}: expected MalformedCatalogEntry, got {other:?}"),
        }
    }
}

#[test]
fn test_wrong_typed_answer_only_drops_that_answer() {
    let json = CatalogBuilder::new()
        .add_question("Q", "Mixed")
        .add_option("1", "One", 1)
        .add_option_raw_count("2", "Two", json!("2"))
        .build();
    let catalog = Catalog::from_json(&json, &lenient()).unwrap();
    assert_eq!(catalog.get("Q").unwrap().answer_labels(), vec!["One"]);
}

#[test]
fn test_question_without_answers_is_malformed() {
    let json = CatalogBuilder::new()
        .add_raw_entry(json!({ "question": {"var": "EMPTY", "txt": "No options"} }))
        .add_raw_entry(json!({ "question": {"var": "NULLS", "txt": "All null"}, "options": {"1": null} }))
        .build();

    let catalog = Catalog::from_json(&json, &lenient()).unwrap();
    assert!(catalog.is_empty());
    assert!(Catalog::from_json(&json, &strict()).is_err());
}

#[test]
fn test_empty_label_is_malformed() {
    let json = CatalogBuilder::new()
        .add_question("Q", "Labels")
        .add_option("1", "", 1)
        .add_option("2", "Two", 2)
        .build();

    let catalog = Catalog::from_json(&json, &lenient()).unwrap();
    assert_eq!(catalog.get("Q").unwrap().answer_labels(), vec!["Two"]);
    assert!(Catalog::from_json(&json, &strict()).is_err());
}

#[test]
fn test_duplicate_question_ids() {
    let json = CatalogBuilder::new()
        .add_question("Q", "First")
        .add_option("1", "One", 1)
        .add_question("Q", "Second")
        .add_option("1", "Uno", 2)
        .build();

    let catalog = Catalog::from_json(&json, &lenient()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("Q").unwrap().text, "First");

    assert!(matches!(
        Catalog::from_json(&json, &strict()),
        Err(CrosstabError::MalformedCatalogEntry { index: 1, .. })
    ));
}

#[test]
fn test_invalid_json() {
    assert!(matches!(
        Catalog::from_json("{not json", &lenient()),
        Err(CrosstabError::Json(_))
    ));
}

#[test]
fn test_config_from_toml_drives_loading() {
    let config = BuilderConfig::from_toml_str("parse_mode = \"strict\"\n").unwrap();
    assert_eq!(config.parse_mode, ParseMode::Strict);
    assert!(Catalog::from_json(&with_bad_count(json!(1.5)), &config).is_err());
}
