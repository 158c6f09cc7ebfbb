//! LCS-based fuzzy ranking.
//!
//! A query is normalized once, every record field is rated against it by
//! [`Matcher`], each record keeps its best field rating, and records at or
//! above the configured accuracy are returned best first.

pub mod matcher;
pub mod normalize;
pub mod ranker;

use std::sync::Arc;

pub use matcher::{rate, LcsTable, Matcher, PreparedQuery};
pub use normalize::{normalize, TextRole};
pub use ranker::Ranker;

/// Added to a name-field rating that passed the local threshold.
pub const NAME_BONUS: f64 = 0.5;

/// Rating of a field that failed the local threshold. Below any accuracy.
pub const REJECTED_SCORE: f64 = -1000.0;

/// A record the ranker can search: a primary name plus tags.
///
/// Records are shared by `Arc` and never mutated by the ranker.
pub trait Searchable: Send + Sync {
    /// Name matched with [`NAME_BONUS`]
    fn primary_name(&self) -> &str;

    /// Auxiliary descriptors, matched without bonus
    fn tags(&self) -> &[String];
}

/// Which record field a rating is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Tag,
}

impl FieldKind {
    pub fn bonus(self) -> f64 {
        match self {
            FieldKind::Name => NAME_BONUS,
            FieldKind::Tag => 0.0,
        }
    }
}

/// Record with its best field rating for one query
#[derive(Debug)]
pub struct RankedCandidate<R> {
    pub record: Arc<R>,
    pub score: f64,
}

impl<R> RankedCandidate<R> {
    pub fn new(record: Arc<R>, score: f64) -> Self {
        Self { record, score }
    }
}

impl<R> Clone for RankedCandidate<R> {
    fn clone(&self) -> Self {
        Self {
            record: Arc::clone(&self.record),
            score: self.score,
        }
    }
}

/// Minimal owned record for callers without their own record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchableRecord {
    name: String,
    tags: Vec<String>,
}

impl SearchableRecord {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, tags: &[S]) -> Self {
        Self {
            name: name.into(),
            tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    /// Record with a name and no tags
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
        }
    }
}

impl Searchable for SearchableRecord {
    fn primary_name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}
