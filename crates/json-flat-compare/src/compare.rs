//! The comparison algorithm.

use crate::session::{ComparisonSession, MismatchCategory, Verdict};
use json_flat::{FlatDocument, FlatValue};

/// Compares two flattened documents and returns the accumulated session.
///
/// The algorithm runs in four phases:
///
/// 1. A document-level size check. Unequal sizes record one `SizeMismatch`
///    and seed the ordering sentinel; comparison continues regardless.
/// 2. Key-set reconciliation over the union of both path sets. Each side
///    missing any paths gets exactly one `MissingKeys` record listing all of
///    them.
/// 3. A value walk over the intersection: differing type tags record a
///    `TypeMismatch`; two arrays are compared index-positionally; unequal
///    values record a `DataMismatch`; agreement records a match.
/// 4. The verdict: more than one failure collapses to
///    [`Verdict::FirstLarger`] ("documents differ materially"); otherwise the
///    size sentinel stands. A single isolated failure therefore does *not*
///    override a same-size `Equal` verdict — a long-standing sharp edge that
///    is preserved deliberately and pinned by tests.
///
/// # Example
///
/// ```
/// use json_flat::flatten;
/// use json_flat_compare::{compare, Verdict};
///
/// let first = flatten(r#"{"a": 1, "b": 2}"#).doc;
/// let second = flatten(r#"{"a": 1}"#).doc;
///
/// let session = compare(&first, &second);
/// assert_eq!(session.verdict(), Verdict::FirstLarger);
/// assert_eq!(session.match_count(), 1);
/// ```
pub fn compare(first: &FlatDocument, second: &FlatDocument) -> ComparisonSession {
    let mut session = ComparisonSession::new();

    let mut sentinel = Verdict::Equal;
    if first.len() != second.len() {
        session.record(
            MismatchCategory::SizeMismatch,
            format!(
                "Size mismatch: first document ({}), second document ({})",
                first.len(),
                second.len()
            ),
        );
        sentinel = if first.len() > second.len() {
            Verdict::FirstLarger
        } else {
            Verdict::SecondLarger
        };
    }

    record_missing(&mut session, second, first, "first");
    record_missing(&mut session, first, second, "second");

    for (path, first_value) in first.iter() {
        if let Some(second_value) = second.get(path) {
            compare_values(&mut session, path, first_value, second_value);
        }
    }

    let verdict = if session.failure_count() > 1 {
        Verdict::FirstLarger
    } else {
        sentinel
    };
    session.set_verdict(verdict);
    session
}

/// Records one `MissingKeys` mismatch for `target` when it lacks any path
/// present in `source`. Paths are listed in canonical order in a single
/// message, not one record per key.
fn record_missing(
    session: &mut ComparisonSession,
    source: &FlatDocument,
    target: &FlatDocument,
    side: &str,
) {
    let missing: Vec<&str> = source
        .paths()
        .filter(|path| !target.contains_path(path))
        .collect();
    if !missing.is_empty() {
        session.record(
            MismatchCategory::MissingKeys,
            format!("Missing keys in {side} document: {}", missing.join(", ")),
        );
    }
}

fn compare_values(session: &mut ComparisonSession, path: &str, a: &FlatValue, b: &FlatValue) {
    let (kind_a, kind_b) = (a.kind(), b.kind());
    if kind_a != kind_b {
        session.record(
            MismatchCategory::TypeMismatch,
            format!("Type mismatch at '{path}': first document ({kind_a}), second document ({kind_b})"),
        );
    } else if let (FlatValue::Array(items_a), FlatValue::Array(items_b)) = (a, b) {
        compare_arrays(session, path, items_a, items_b);
    } else if a != b {
        session.record(
            MismatchCategory::DataMismatch,
            format!("Data mismatch at '{path}': first document ({a}), second document ({b})"),
        );
    } else {
        session.push_match(path.to_string(), a.clone());
    }
}

/// Index-positional comparison of two whole arrays reached at a matched path.
///
/// A length difference records one `SizeMismatch` for the path; indices past
/// the shorter length are covered by that record and not reported
/// individually.
fn compare_arrays(
    session: &mut ComparisonSession,
    path: &str,
    items_a: &[FlatValue],
    items_b: &[FlatValue],
) {
    if items_a.len() != items_b.len() {
        session.record(
            MismatchCategory::SizeMismatch,
            format!(
                "Array size mismatch at '{path}': first document ({}), second document ({})",
                items_a.len(),
                items_b.len()
            ),
        );
    }

    for (index, (a, b)) in items_a.iter().zip(items_b.iter()).enumerate() {
        let (kind_a, kind_b) = (a.kind(), b.kind());
        if kind_a != kind_b {
            session.record(
                MismatchCategory::TypeMismatch,
                format!(
                    "Array type mismatch at '{path}[{index}]': first document ({kind_a}), second document ({kind_b})"
                ),
            );
        } else if a != b {
            session.record(
                MismatchCategory::DataMismatch,
                format!(
                    "Array data mismatch at '{path}[{index}]': first document ({a}), second document ({b})"
                ),
            );
        } else {
            session.push_match(format!("{path}[{index}]"), a.clone());
        }
    }
}
