//! Canonical flattening of JSON documents.
//!
//! A [`FlatDocument`] is an order-stable mapping from flattened path strings
//! (`address.city`, `projects[0].name`) to leaf values. Arrays of objects are
//! given a content-based order before index assignment, so two documents that
//! differ only in array element order flatten to identical maps.
//!
//! # Example
//!
//! ```
//! use json_flat::flatten;
//!
//! let outcome = flatten(r#"{"user": {"name": "Alice", "tags": ["a", "b"]}}"#);
//! let doc = outcome.doc;
//!
//! assert_eq!(doc.len(), 3);
//! assert_eq!(doc.get("user.name").unwrap().to_string(), "Alice");
//! assert_eq!(doc.get("user.tags[1]").unwrap().to_string(), "b");
//! ```

pub mod document;
pub mod flatten;
pub mod value;

pub use document::FlatDocument;
pub use flatten::{
    flatten, flatten_with, ArrayOrdering, Diagnostic, FlattenOptions, FlattenOutcome,
    DEFAULT_PRIMARY_KEY,
};
pub use value::{numbers_equal, FlatValue, ObjectValueError, ValueKind};
