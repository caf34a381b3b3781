//! End-to-end comparison scenarios.

use json_flat::{flatten, FlatDocument, FlatValue};
use json_flat_compare::{compare, MismatchCategory, Status, Verdict};
use serde_json::json;

fn array_doc(path: &str, value: serde_json::Value) -> FlatDocument {
    FlatDocument::from_pairs(
        "id",
        [(path.to_string(), FlatValue::try_from(&value).unwrap())],
    )
}

#[test]
fn test_self_comparison_is_green() {
    let text = r#"{
        "id": 101,
        "name": "Alice",
        "address": {"street": "123 Main St", "city": "New York"},
        "skills": ["a", "b", "c"]
    }"#;
    let first = flatten(text).doc;
    let second = flatten(text).doc;

    let session = compare(&first, &second);
    assert_eq!(session.failure_count(), 0);
    assert_eq!(session.status(), Status::Green);
    assert_eq!(session.verdict(), Verdict::Equal);
    // One match per leaf scalar.
    assert_eq!(session.match_count(), 7);
}

#[test]
fn test_type_mismatch_without_data_mismatch() {
    let first = flatten(r#"{"a": 1}"#).doc;
    let second = flatten(r#"{"a": "1"}"#).doc;

    let session = compare(&first, &second);
    assert_eq!(session.counts().type_mismatch, 1);
    assert_eq!(session.counts().data_mismatch, 0);
    assert_eq!(session.failure_count(), 1);
}

#[test]
fn test_missing_key_scenario() {
    let first = flatten(r#"{"a": 1, "b": 2}"#).doc;
    let second = flatten(r#"{"a": 1}"#).doc;

    let session = compare(&first, &second);
    assert_eq!(session.counts().size_mismatch, 1);
    assert_eq!(session.counts().missing_keys, 1);
    assert_eq!(session.match_count(), 1);
    assert_eq!(session.matches()[0].path, "a");

    let missing: Vec<&str> = session
        .mismatches()
        .iter()
        .filter(|m| m.category == MismatchCategory::MissingKeys)
        .map(|m| m.message.as_str())
        .collect();
    assert_eq!(missing, vec!["Missing keys in second document: b"]);
}

// The verdict rule is `failures > 1 → 1, else the size sentinel`. The next
// three tests pin that asymmetry exactly; a future change to "any failure
// forces a differs verdict" must be a deliberate decision, not a regression.

#[test]
fn test_single_isolated_failure_keeps_equal_verdict() {
    let first = flatten(r#"{"a": 1}"#).doc;
    let second = flatten(r#"{"a": 2}"#).doc;

    let session = compare(&first, &second);
    assert_eq!(session.failure_count(), 1);
    assert_eq!(session.status(), Status::Red);
    // Same size, one failure: the size sentinel (Equal) stands.
    assert_eq!(session.verdict(), Verdict::Equal);
    assert_eq!(session.verdict().as_i8(), 0);
}

#[test]
fn test_multiple_failures_force_differs_verdict_at_equal_size() {
    let first = flatten(r#"{"a": 1, "b": 2}"#).doc;
    let second = flatten(r#"{"a": 9, "b": "2"}"#).doc;

    let session = compare(&first, &second);
    assert_eq!(first.len(), second.len());
    assert!(session.failure_count() >= 2);
    assert_eq!(session.verdict(), Verdict::FirstLarger);
    assert_eq!(session.verdict().as_i8(), 1);
}

#[test]
fn test_second_larger_verdict_collapses_under_multiple_failures() {
    // A flattened size difference always brings a missing-keys record with
    // it, so the -1 sentinel is overridden by the differs collapse.
    let first = flatten(r#"{"a": 1}"#).doc;
    let second = flatten(r#"{"a": 1, "b": 2}"#).doc;

    let session = compare(&first, &second);
    assert_eq!(session.failure_count(), 2);
    assert_eq!(session.verdict(), Verdict::FirstLarger);
}

#[test]
fn test_whole_array_length_mismatch_at_matched_path() {
    let first = array_doc("a", json!([1, 2, 3]));
    let second = array_doc("a", json!([1, 2]));

    let session = compare(&first, &second);
    // Document sizes are equal (one entry each); only the array lengths
    // differ. Shared indices match; the tail index is covered by the length
    // mismatch alone.
    assert_eq!(session.counts().size_mismatch, 1);
    assert_eq!(session.failure_count(), 1);
    assert_eq!(session.match_count(), 2);
    assert_eq!(session.matches()[0].path, "a[0]");
    assert_eq!(session.matches()[1].path, "a[1]");
    assert_eq!(
        session.mismatches()[0].message,
        "Array size mismatch at 'a': first document (3), second document (2)"
    );
}

#[test]
fn test_whole_array_element_mismatches() {
    let first = array_doc("a", json!([1, "x", true]));
    let second = array_doc("a", json!([1, 2, false]));

    let session = compare(&first, &second);
    assert_eq!(session.counts().type_mismatch, 1); // "x" vs 2
    assert_eq!(session.counts().data_mismatch, 1); // true vs false
    assert_eq!(session.match_count(), 1);
    assert_eq!(session.matches()[0].path, "a[0]");
}

#[test]
fn test_array_against_scalar_is_a_type_mismatch() {
    let first = array_doc("a", json!([1, 2]));
    let second = array_doc("a", json!(12));

    let session = compare(&first, &second);
    assert_eq!(session.counts().type_mismatch, 1);
    assert_eq!(
        session.mismatches()[0].message,
        "Type mismatch at 'a': first document (array), second document (number)"
    );
}

#[test]
fn test_invalid_json_degrades_to_informative_size_mismatch() {
    let broken = flatten("{oops");
    let intact = flatten(r#"{"a": 1}"#).doc;
    assert!(!broken.diagnostics.is_empty());

    let session = compare(&broken.doc, &intact);
    assert_eq!(session.counts().size_mismatch, 1);
    assert_eq!(session.counts().missing_keys, 1);
    assert_eq!(session.match_count(), 0);
}

#[test]
fn test_realistic_document_pair() {
    let first = flatten(
        r#"{
            "id": 101,
            "name": "Alice",
            "address": {"city": "New York", "zip": 10001},
            "skills": ["js", "ts"]
        }"#,
    )
    .doc;
    let second = flatten(
        r#"{
            "id": "101",
            "name": "Alice",
            "address": {"city": "San Francisco", "zip": "10001"},
            "skills": ["js", "py"],
            "extra": true
        }"#,
    )
    .doc;

    let session = compare(&first, &second);
    assert_eq!(session.counts().size_mismatch, 1); // 6 vs 7 entries
    assert_eq!(session.counts().missing_keys, 1); // "extra" absent from first
    assert_eq!(session.counts().type_mismatch, 2); // id, address.zip
    assert_eq!(session.counts().data_mismatch, 2); // address.city, skills[1]
    assert_eq!(session.failure_count(), 6);
    assert_eq!(session.match_count(), 2); // name, skills[0]
    assert_eq!(session.total_fields(), 8);
    assert_eq!(session.status(), Status::Red);
    assert_eq!(session.verdict(), Verdict::FirstLarger);
}

#[test]
fn test_keyed_array_reordering_is_invisible_to_comparison() {
    let first = flatten(r#"{"projects": [{"id": 2, "done": true}, {"id": 1, "done": false}]}"#).doc;
    let second = flatten(r#"{"projects": [{"id": 1, "done": false}, {"id": 2, "done": true}]}"#).doc;

    let session = compare(&first, &second);
    assert_eq!(session.failure_count(), 0);
    assert_eq!(session.match_count(), 4);
}
