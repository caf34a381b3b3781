//! The flattened document type.

use crate::value::FlatValue;
use indexmap::IndexMap;
use std::collections::HashSet;

/// An order-stable mapping from flattened paths to leaf values.
///
/// Entries are sorted ascending by path exactly once at construction and the
/// document is immutable afterwards. Paths are generated during flattening, so
/// they are unique by construction.
#[derive(Debug, Clone)]
pub struct FlatDocument {
    entries: IndexMap<String, FlatValue>,
    primary_key: String,
}

impl FlatDocument {
    /// Builds a document from explicit `(path, value)` pairs.
    ///
    /// Pairs are sorted into the same canonical path order the flattener
    /// produces. If a path occurs more than once the last value wins.
    ///
    /// This is the entry point for callers that assemble documents directly,
    /// for example to compare whole arrays index-positionally instead of
    /// through their exploded `[i]` paths.
    ///
    /// # Example
    ///
    /// ```
    /// use json_flat::{FlatDocument, FlatValue};
    ///
    /// let doc = FlatDocument::from_pairs(
    ///     "id",
    ///     [
    ///         ("b".to_string(), FlatValue::Bool(true)),
    ///         ("a".to_string(), FlatValue::Null),
    ///     ],
    /// );
    /// assert_eq!(doc.paths().collect::<Vec<_>>(), vec!["a", "b"]);
    /// ```
    pub fn from_pairs<I>(primary_key: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, FlatValue)>,
    {
        let mut sorted: Vec<(String, FlatValue)> = pairs.into_iter().collect();
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut entries = IndexMap::with_capacity(sorted.len());
        for (path, value) in sorted {
            entries.insert(path, value);
        }
        FlatDocument {
            entries,
            primary_key: primary_key.to_string(),
        }
    }

    /// Number of leaf entries in the document.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the document has no entries.
    ///
    /// Invalid JSON input flattens to an empty document, so an empty document
    /// is an ordinary value, not an error state.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The primary key name this document's arrays were ordered by.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Looks up the value at a flattened path.
    pub fn get(&self, path: &str) -> Option<&FlatValue> {
        self.entries.get(path)
    }

    /// Returns `true` when the document contains the given path.
    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Iterates over all paths in canonical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The set of all paths, for key-set reconciliation.
    pub fn path_set(&self) -> HashSet<&str> {
        self.paths().collect()
    }

    /// Iterates over `(path, value)` entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for FlatDocument {
    /// Entry-order-sensitive equality. Two documents flattened from the same
    /// input are equal path-for-path and value-for-value.
    fn eq(&self, other: &Self) -> bool {
        self.primary_key == other.primary_key
            && self.entries.len() == other.entries.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(path: &str, value: FlatValue) -> (String, FlatValue) {
        (path.to_string(), value)
    }

    #[test]
    fn test_from_pairs_sorts_by_path() {
        let doc = FlatDocument::from_pairs(
            "id",
            [
                pair("b[1]", FlatValue::Bool(true)),
                pair("a", FlatValue::Null),
                pair("b[0]", FlatValue::Bool(false)),
            ],
        );
        assert_eq!(doc.paths().collect::<Vec<_>>(), vec!["a", "b[0]", "b[1]"]);
    }

    #[test]
    fn test_from_pairs_last_value_wins() {
        let doc = FlatDocument::from_pairs(
            "id",
            [
                pair("a", FlatValue::Bool(false)),
                pair("a", FlatValue::Bool(true)),
            ],
        );
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("a"), Some(&FlatValue::Bool(true)));
    }

    #[test]
    fn test_lookup_and_membership() {
        let doc = FlatDocument::from_pairs("id", [pair("x.y", FlatValue::Null)]);
        assert!(doc.contains_path("x.y"));
        assert!(!doc.contains_path("x"));
        assert_eq!(doc.get("missing"), None);
        assert!(doc.path_set().contains("x.y"));
    }

    #[test]
    fn test_empty_document() {
        let doc = FlatDocument::from_pairs("id", []);
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }
}
