//! Recursive-descent flattening and the array-ordering policy.

use crate::document::FlatDocument;
use crate::value::FlatValue;
use serde_json::Value;
use std::cmp::Ordering;

/// The default field name used to order sibling array elements.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// How arrays of objects are ordered before index assignment.
///
/// Both modes leave arrays untouched when any element is not an object, and
/// both are stable, so elements that compare equal keep their source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayOrdering {
    /// Sort by the string rendering of each element's primary-key value.
    /// Falls back to sorting by each object's first declared key *name* when
    /// the primary key is absent from any element (keyless objects sort last),
    /// recording a [`Diagnostic::PrimaryKeyFallback`].
    #[default]
    PrimaryKey,
    /// Sort only by first-key *presence*: objects with at least one key come
    /// before empty objects. Ties are not broken further.
    FirstKey,
}

/// Options controlling flattening.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Field name used to order arrays of objects. Defaults to `"id"`.
    pub primary_key: String,
    /// Array-ordering policy. Defaults to [`ArrayOrdering::PrimaryKey`].
    pub array_ordering: ArrayOrdering,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            array_ordering: ArrayOrdering::default(),
        }
    }
}

/// A non-fatal condition observed while flattening.
///
/// Diagnostics are returned to the caller instead of being logged, so the
/// embedding application decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The input was not syntactically valid JSON. Flattening degraded to an
    /// empty document.
    ParseFailure {
        /// Parser error detail.
        detail: String,
    },
    /// An array of objects could not be ordered by the configured primary key
    /// and was ordered by first declared key name instead.
    PrimaryKeyFallback {
        /// Flattened path of the array; empty string for a root array.
        path: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::ParseFailure { detail } => write!(f, "invalid JSON: {detail}"),
            Diagnostic::PrimaryKeyFallback { path } if path.is_empty() => {
                write!(f, "root array ordered by first key (primary key missing)")
            }
            Diagnostic::PrimaryKeyFallback { path } => {
                write!(f, "array at '{path}' ordered by first key (primary key missing)")
            }
        }
    }
}

/// The result of flattening one JSON text payload.
#[derive(Debug, Clone)]
pub struct FlattenOutcome {
    /// The flattened document. Empty when the input failed to parse.
    pub doc: FlatDocument,
    /// Conditions observed while flattening, in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Flattens a JSON text payload with default options.
///
/// Invalid JSON is not an error: the outcome carries an empty document plus a
/// [`Diagnostic::ParseFailure`]. An empty document compares as size zero
/// against any counterpart, which is itself informative.
///
/// # Example
///
/// ```
/// use json_flat::flatten;
///
/// let outcome = flatten(r#"{"a": {"b": [10, 20]}}"#);
/// assert_eq!(
///     outcome.doc.paths().collect::<Vec<_>>(),
///     vec!["a.b[0]", "a.b[1]"],
/// );
/// assert!(outcome.diagnostics.is_empty());
/// ```
pub fn flatten(json_text: &str) -> FlattenOutcome {
    flatten_with(json_text, &FlattenOptions::default())
}

/// Flattens a JSON text payload with explicit options.
pub fn flatten_with(json_text: &str, options: &FlattenOptions) -> FlattenOutcome {
    let mut pairs = Vec::new();
    let mut diagnostics = Vec::new();

    match serde_json::from_str::<Value>(json_text) {
        Ok(root) => walk(options, "", &root, &mut pairs, &mut diagnostics),
        Err(err) => diagnostics.push(Diagnostic::ParseFailure {
            detail: err.to_string(),
        }),
    }

    FlattenOutcome {
        doc: FlatDocument::from_pairs(&options.primary_key, pairs),
        diagnostics,
    }
}

fn walk(
    options: &FlattenOptions,
    path: &str,
    node: &Value,
    pairs: &mut Vec<(String, FlatValue)>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                walk(options, &child, value, pairs, diagnostics);
            }
        }
        Value::Array(items) => {
            // Indices are assigned after ordering, so the source order of a
            // sorted array is irreversibly lost.
            let ordered = order_array(options, path, items, diagnostics);
            for (index, value) in ordered.into_iter().enumerate() {
                walk(options, &format!("{path}[{index}]"), value, pairs, diagnostics);
            }
        }
        Value::Null => pairs.push((path.to_string(), FlatValue::Null)),
        Value::Bool(b) => pairs.push((path.to_string(), FlatValue::Bool(*b))),
        Value::Number(n) => pairs.push((path.to_string(), FlatValue::Number(n.clone()))),
        Value::String(s) => pairs.push((path.to_string(), FlatValue::String(s.clone()))),
    }
}

fn order_array<'v>(
    options: &FlattenOptions,
    path: &str,
    items: &'v [Value],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<&'v Value> {
    let mut ordered: Vec<&Value> = items.iter().collect();
    let all_objects = !items.is_empty() && items.iter().all(Value::is_object);
    if !all_objects {
        // Scalar or mixed arrays keep their source order.
        return ordered;
    }

    match options.array_ordering {
        ArrayOrdering::PrimaryKey => {
            let keyed = items
                .iter()
                .all(|item| item.get(&options.primary_key).is_some());
            if keyed {
                ordered.sort_by(|a, b| {
                    let ka = sort_key(a.get(&options.primary_key).unwrap_or(&Value::Null));
                    let kb = sort_key(b.get(&options.primary_key).unwrap_or(&Value::Null));
                    ka.cmp(&kb)
                });
            } else {
                diagnostics.push(Diagnostic::PrimaryKeyFallback {
                    path: path.to_string(),
                });
                ordered.sort_by(|a, b| match (first_key(a), first_key(b)) {
                    (Some(x), Some(y)) => x.cmp(y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                });
            }
        }
        ArrayOrdering::FirstKey => {
            ordered.sort_by(|a, b| match (first_key(a), first_key(b)) {
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                _ => Ordering::Equal,
            });
        }
    }
    ordered
}

fn first_key(value: &Value) -> Option<&str> {
    value
        .as_object()
        .and_then(|map| map.keys().next())
        .map(String::as_str)
}

/// String rendering of a primary-key value, used as the sort key.
///
/// Strings sort by their content; every other value sorts by its compact JSON
/// rendering. Comparison is ordinal.
fn sort_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(outcome: &FlattenOutcome) -> Vec<String> {
        outcome.doc.paths().map(str::to_string).collect()
    }

    #[test]
    fn test_nested_object_paths() {
        let outcome = flatten(r#"{"a": {"b": 1, "c": {"d": "x"}}, "e": null}"#);
        assert_eq!(paths(&outcome), vec!["a.b", "a.c.d", "e"]);
        assert_eq!(outcome.doc.get("e"), Some(&FlatValue::Null));
    }

    #[test]
    fn test_root_scalar_uses_empty_path() {
        let outcome = flatten("42");
        assert_eq!(outcome.doc.len(), 1);
        assert!(outcome.doc.contains_path(""));
    }

    #[test]
    fn test_paths_are_canonically_sorted() {
        // Declaration order differs from path order.
        let outcome = flatten(r#"{"z": 1, "a": 2, "m": {"q": 3, "b": 4}}"#);
        assert_eq!(paths(&outcome), vec!["a", "m.b", "m.q", "z"]);
    }

    #[test]
    fn test_empty_containers_contribute_nothing() {
        let outcome = flatten(r#"{"a": {}, "b": [], "c": 1}"#);
        assert_eq!(paths(&outcome), vec!["c"]);
    }

    #[test]
    fn test_parse_failure_degrades_to_empty_document() {
        let outcome = flatten("{not json");
        assert!(outcome.doc.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(matches!(
            outcome.diagnostics[0],
            Diagnostic::ParseFailure { .. }
        ));
    }

    #[test]
    fn test_scalar_array_keeps_source_order() {
        let outcome = flatten(r#"{"a": [3, 1, 2]}"#);
        assert_eq!(outcome.doc.get("a[0]").unwrap().to_string(), "3");
        assert_eq!(outcome.doc.get("a[2]").unwrap().to_string(), "2");
    }

    #[test]
    fn test_mixed_array_keeps_source_order() {
        let outcome = flatten(r#"{"a": [{"id": 2}, 1]}"#);
        assert_eq!(outcome.doc.get("a[0].id").unwrap().to_string(), "2");
        assert_eq!(outcome.doc.get("a[1]").unwrap().to_string(), "1");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_primary_key_sort_assigns_post_sort_indices() {
        let outcome = flatten(r#"{"a": [{"id": 2, "v": "b"}, {"id": 1, "v": "a"}]}"#);
        assert_eq!(outcome.doc.get("a[0].id").unwrap().to_string(), "1");
        assert_eq!(outcome.doc.get("a[0].v").unwrap().to_string(), "a");
        assert_eq!(outcome.doc.get("a[1].id").unwrap().to_string(), "2");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_primary_key_sort_is_string_based() {
        // "10" sorts before "2" ordinally.
        let outcome = flatten(r#"{"a": [{"id": 2}, {"id": 10}, {"id": 1}]}"#);
        assert_eq!(outcome.doc.get("a[0].id").unwrap().to_string(), "1");
        assert_eq!(outcome.doc.get("a[1].id").unwrap().to_string(), "10");
        assert_eq!(outcome.doc.get("a[2].id").unwrap().to_string(), "2");
    }

    #[test]
    fn test_custom_primary_key() {
        let options = FlattenOptions {
            primary_key: "name".to_string(),
            ..FlattenOptions::default()
        };
        let outcome = flatten_with(r#"{"a": [{"name": "z"}, {"name": "a"}]}"#, &options);
        assert_eq!(outcome.doc.get("a[0].name").unwrap().to_string(), "a");
        assert_eq!(outcome.doc.get("a[1].name").unwrap().to_string(), "z");
    }

    #[test]
    fn test_partial_primary_key_falls_back_to_first_key_names() {
        let outcome = flatten(r#"{"a": [{"z": 1}, {"id": 5, "b": 2}, {}]}"#);
        // First declared key names: "z", "id", none. Keyless objects sort last.
        assert_eq!(outcome.doc.get("a[0].id").unwrap().to_string(), "5");
        assert_eq!(outcome.doc.get("a[1].z").unwrap().to_string(), "1");
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::PrimaryKeyFallback {
                path: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_first_key_mode_sorts_by_presence_only() {
        let options = FlattenOptions {
            array_ordering: ArrayOrdering::FirstKey,
            ..FlattenOptions::default()
        };
        let outcome = flatten_with(r#"{"a": [{}, {"id": 2}, {"id": 1}]}"#, &options);
        // Keyed objects move ahead of the empty one but keep their relative
        // order; no diagnostic is recorded in this mode.
        assert_eq!(outcome.doc.get("a[0].id").unwrap().to_string(), "2");
        assert_eq!(outcome.doc.get("a[1].id").unwrap().to_string(), "1");
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_fallback_diagnostic_for_root_array() {
        let outcome = flatten(r#"[{"a": 1}, {"b": 2}]"#);
        assert_eq!(
            outcome.diagnostics,
            vec![Diagnostic::PrimaryKeyFallback {
                path: String::new()
            }]
        );
    }

    #[test]
    fn test_nested_arrays() {
        let outcome = flatten(r#"{"m": [[1, 2], [3]]}"#);
        assert_eq!(
            paths(&outcome),
            vec!["m[0][0]", "m[0][1]", "m[1][0]"],
        );
    }
}
