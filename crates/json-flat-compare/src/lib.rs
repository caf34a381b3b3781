//! Structural comparison of flattened JSON documents.
//!
//! [`compare`] takes two [`FlatDocument`](json_flat::FlatDocument)s and
//! produces a [`ComparisonSession`]: an append-only record of every mismatch
//! (classified as size, type, data, or missing-keys), every successful match,
//! per-category counts, and an ordering verdict.
//!
//! # Example
//!
//! ```
//! use json_flat::flatten;
//! use json_flat_compare::{compare, Status};
//!
//! let first = flatten(r#"{"a": 1}"#).doc;
//! let second = flatten(r#"{"a": "1"}"#).doc;
//!
//! let session = compare(&first, &second);
//! assert_eq!(session.status(), Status::Red);
//! assert_eq!(session.failure_count(), 1);
//! ```

pub mod compare;
pub mod session;

pub use compare::compare;
pub use session::{
    CategoryCounts, ComparisonSession, MatchEntry, Mismatch, MismatchCategory, Status, Verdict,
};
