//! Comparison result types.

use json_flat::FlatValue;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// The fixed classification assigned to every detected discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MismatchCategory {
    SizeMismatch,
    TypeMismatch,
    DataMismatch,
    MissingKeys,
}

impl MismatchCategory {
    /// All categories, in their canonical declaration order.
    pub const ALL: [MismatchCategory; 4] = [
        MismatchCategory::SizeMismatch,
        MismatchCategory::TypeMismatch,
        MismatchCategory::DataMismatch,
        MismatchCategory::MissingKeys,
    ];

    /// The category's wire name.
    pub fn name(self) -> &'static str {
        match self {
            MismatchCategory::SizeMismatch => "sizeMismatch",
            MismatchCategory::TypeMismatch => "typeMismatch",
            MismatchCategory::DataMismatch => "dataMismatch",
            MismatchCategory::MissingKeys => "missingKeys",
        }
    }
}

impl fmt::Display for MismatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One detected discrepancy. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Classification of the discrepancy.
    pub category: MismatchCategory,
    /// Human-readable description carrying the offending path and both
    /// sides' values or type tags.
    pub message: String,
}

/// A `(path, value)` pair on which both documents agree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry {
    pub path: String,
    pub value: FlatValue,
}

/// Per-category mismatch counts, kept in sync with the mismatch list as it
/// grows so summary rendering stays O(1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub size_mismatch: usize,
    pub type_mismatch: usize,
    pub data_mismatch: usize,
    pub missing_keys: usize,
}

impl CategoryCounts {
    /// Count for one category.
    pub fn get(&self, category: MismatchCategory) -> usize {
        match category {
            MismatchCategory::SizeMismatch => self.size_mismatch,
            MismatchCategory::TypeMismatch => self.type_mismatch,
            MismatchCategory::DataMismatch => self.data_mismatch,
            MismatchCategory::MissingKeys => self.missing_keys,
        }
    }

    /// `(category, count)` pairs in canonical category order.
    pub fn iter(&self) -> impl Iterator<Item = (MismatchCategory, usize)> + '_ {
        MismatchCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
    }

    fn increment(&mut self, category: MismatchCategory) {
        match category {
            MismatchCategory::SizeMismatch => self.size_mismatch += 1,
            MismatchCategory::TypeMismatch => self.type_mismatch += 1,
            MismatchCategory::DataMismatch => self.data_mismatch += 1,
            MismatchCategory::MissingKeys => self.missing_keys += 1,
        }
    }
}

/// Overall outcome of a comparison run: `Green` while no failure has been
/// recorded, `Red` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "GREEN")]
    Green,
    #[serde(rename = "RED")]
    Red,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Green => write!(f, "GREEN"),
            Status::Red => write!(f, "RED"),
        }
    }
}

/// Ordering verdict of a comparison run.
///
/// `FirstLarger` doubles as the collapsed "documents differ materially"
/// outcome: once more than one failure has been recorded the verdict is
/// `FirstLarger` regardless of the size comparison. A single isolated failure
/// does not override the size-based verdict; see [`compare`](crate::compare)
/// for the exact rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The second document has more entries.
    SecondLarger,
    /// Equal sizes and at most one recorded failure.
    Equal,
    /// The first document has more entries, or the documents differ in more
    /// than one place.
    FirstLarger,
}

impl Verdict {
    /// The verdict as the conventional comparison sentinel: `-1`, `0` or `1`.
    pub fn as_i8(self) -> i8 {
        match self {
            Verdict::SecondLarger => -1,
            Verdict::Equal => 0,
            Verdict::FirstLarger => 1,
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

/// The accumulated result of one comparison run.
///
/// A session is created fresh by [`compare`](crate::compare), filled during
/// that single run, and read-only afterwards. The mismatch and match lists are
/// append-only; counts and the failure total are maintained incrementally and
/// always agree with the lists.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    mismatches: Vec<Mismatch>,
    matches: Vec<MatchEntry>,
    counts: CategoryCounts,
    verdict: Verdict,
}

impl ComparisonSession {
    pub(crate) fn new() -> Self {
        ComparisonSession {
            mismatches: Vec::new(),
            matches: Vec::new(),
            counts: CategoryCounts::default(),
            verdict: Verdict::Equal,
        }
    }

    pub(crate) fn record(&mut self, category: MismatchCategory, message: String) {
        self.counts.increment(category);
        self.mismatches.push(Mismatch { category, message });
    }

    pub(crate) fn push_match(&mut self, path: String, value: FlatValue) {
        self.matches.push(MatchEntry { path, value });
    }

    pub(crate) fn set_verdict(&mut self, verdict: Verdict) {
        self.verdict = verdict;
    }

    /// The ordering verdict of the run.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// `Green` when no failure was recorded, `Red` otherwise.
    pub fn status(&self) -> Status {
        if self.mismatches.is_empty() {
            Status::Green
        } else {
            Status::Red
        }
    }

    /// Total number of recorded failures, equal to the mismatch list length.
    pub fn failure_count(&self) -> usize {
        self.mismatches.len()
    }

    /// Number of `(path, value)` pairs both documents agreed on.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Total fields considered: matches plus failures.
    pub fn total_fields(&self) -> usize {
        self.match_count() + self.failure_count()
    }

    /// Per-category mismatch counts.
    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    /// Recorded mismatches, in detection order.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Recorded matches, in detection order.
    pub fn matches(&self) -> &[MatchEntry] {
        &self.matches
    }
}

impl Serialize for ComparisonSession {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ComparisonSession", 8)?;
        s.serialize_field("verdict", &self.verdict().as_i8())?;
        s.serialize_field("status", &self.status())?;
        s.serialize_field("totalFields", &self.total_fields())?;
        s.serialize_field("successfulMatches", &self.match_count())?;
        s.serialize_field("failedMatches", &self.failure_count())?;
        s.serialize_field("categoryCounts", self.counts())?;
        s.serialize_field("mismatches", self.mismatches())?;
        s.serialize_field("matches", self.matches())?;
        s.end()
    }
}
