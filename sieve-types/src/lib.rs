//! Core types and traits for the Sieve search engine.
//!
//! This crate provides the values that cross the engine boundary:
//!
//! - **Documents**: ranked results and their caller-assigned status
//! - **Predicates**: the filter capability applied to ranking candidates
//! - **Errors**: the single error enum every fallible operation returns
//! - **Configuration**: ranking and queue tunables

#![warn(missing_docs)]

use core::fmt;

/// Unique document identifier.
///
/// Signed so that a negative id can be represented and rejected at insert
/// time rather than silently wrapping.
pub type DocId = i32;

/// Relevance tolerance used when comparing two scores.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Maximum number of documents a ranking call returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Nominal number of requests tracked by a request queue (one per minute of a day).
pub const REQUEST_WINDOW: usize = 1440;

/// A ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Document {
    /// Document identifier
    pub id: DocId,
    /// TF-IDF relevance for the query that produced this result
    pub relevance: f64,
    /// Average rating assigned when the document was indexed
    pub rating: i32,
}

impl Document {
    /// Creates a new search result.
    #[inline(always)]
    pub const fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Self {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Caller-assigned classification of a document. Fixed once indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum DocumentStatus {
    /// Live, searchable by default
    #[default]
    Actual = 0,
    /// Indexed but not relevant
    Irrelevant = 1,
    /// Blocked from default results
    Banned = 2,
    /// Marked as removed by the caller
    Removed = 3,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Actual => "actual",
            DocumentStatus::Irrelevant => "irrelevant",
            DocumentStatus::Banned => "banned",
            DocumentStatus::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// How an operation distributes its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Single thread, fully deterministic.
    #[default]
    Sequential,
    /// Fork-join over the rayon pool. All tasks are joined before returning.
    Parallel,
}

/// The words of one document matched by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMatch<'a> {
    /// Document identifier
    pub id: DocId,
    /// Matched plus-words, ascending. Empty if a minus-word matched.
    pub words: Vec<&'a str>,
    /// Status of the document
    pub status: DocumentStatus,
}

impl fmt::Display for DocumentMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, status = {}, words =",
            self.id, self.status as u8
        )?;
        for word in &self.words {
            write!(f, " {word}")?;
        }
        f.write_str("}")
    }
}

/// Filter applied to every ranking candidate.
///
/// Implementations must be pure: in parallel mode the same predicate is
/// called from several threads at once.
pub trait DocumentPredicate: Sync {
    /// Returns `true` if the document may appear in the results.
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
{
    #[inline(always)]
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

/// Accepts documents with the given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasStatus(pub DocumentStatus);

impl DocumentPredicate for HasStatus {
    #[inline(always)]
    fn matches(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        status == self.0
    }
}

/// Accepts documents whose rating is strictly above the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingAbove(pub i32);

impl DocumentPredicate for RatingAbove {
    #[inline(always)]
    fn matches(&self, _id: DocId, _status: DocumentStatus, rating: i32) -> bool {
        rating > self.0
    }
}

/// Accepts documents with even (or odd) ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdParity {
    /// Ids divisible by two
    Even,
    /// All other ids
    Odd,
}

impl DocumentPredicate for IdParity {
    #[inline(always)]
    fn matches(&self, id: DocId, _status: DocumentStatus, _rating: i32) -> bool {
        let even = id % 2 == 0;
        match self {
            IdParity::Even => even,
            IdParity::Odd => !even,
        }
    }
}

/// Which kind of text failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// A stop word
    StopWord,
    /// Document content
    Document,
    /// A search query
    Query,
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextKind::StopWord => "stop word",
            TextKind::Document => "document",
            TextKind::Query => "query",
        })
    }
}

/// Broad class of a [`SearchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed an argument the engine does not accept.
    InvalidArgument,
    /// The caller referred to a document that is not indexed.
    OutOfRange,
}

/// Errors returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Document ids must be non-negative.
    #[error("document id {id} is negative")]
    NegativeDocumentId {
        /// The rejected id.
        id: DocId,
    },
    /// A document with this id is already indexed.
    #[error("document id {id} is already indexed")]
    DuplicateDocumentId {
        /// The rejected id.
        id: DocId,
    },
    /// Text contains a control character (0x00-0x1F).
    #[error("{kind} contains invalid control characters: {word:?}")]
    InvalidCharacters {
        /// Where the text came from.
        kind: TextKind,
        /// The offending word or text.
        word: String,
    },
    /// A query word is a bare `-` or starts with `--`.
    #[error("query word {word:?} is an empty or repeated minus")]
    MalformedMinusWord {
        /// The offending query word.
        word: String,
    },
    /// Stop words cannot change while documents are indexed.
    #[error("stop words cannot change while {documents} documents are indexed")]
    StopWordsFrozen {
        /// Number of indexed documents.
        documents: usize,
    },
    /// The document is not indexed.
    #[error("document id {id} is not indexed")]
    DocumentNotFound {
        /// The requested id.
        id: DocId,
    },
}

impl SearchError {
    /// Returns the broad class of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            SearchError::DocumentNotFound { .. } => ErrorKind::OutOfRange,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = core::result::Result<T, SearchError>;

/// Engine configuration options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Maximum number of documents returned by a ranking call.
    /// Default: 5
    pub max_results: usize,
    /// Two relevances closer than this are tied and ordered by rating.
    /// Default: 1e-6
    pub relevance_epsilon: f64,
    /// Number of accumulator shards used by parallel ranking.
    /// 0 means one shard per rayon worker thread.
    pub shard_count: usize,
    /// Number of recent requests a request queue remembers.
    /// Default: 1440
    pub request_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
            shard_count: 0,
            request_window: REQUEST_WINDOW,
        }
    }
}

impl EngineConfig {
    /// Sets the maximum result count.
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the relevance tie tolerance.
    pub const fn with_relevance_epsilon(mut self, epsilon: f64) -> Self {
        self.relevance_epsilon = epsilon;
        self
    }

    /// Sets the accumulator shard count (0 = automatic).
    pub const fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Sets the request queue window.
    pub const fn with_request_window(mut self, request_window: usize) -> Self {
        self.request_window = request_window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_display() {
        let doc = Document::new(7, 0.5, 3);
        assert_eq!(
            doc.to_string(),
            "{ document_id = 7, relevance = 0.5, rating = 3 }"
        );
    }

    #[test]
    fn status_defaults_to_actual() {
        assert_eq!(DocumentStatus::default(), DocumentStatus::Actual);
        assert_eq!(size_of::<DocumentStatus>(), 1);
    }

    #[test]
    fn closures_are_predicates() {
        let pred = |id: DocId, _s: DocumentStatus, rating: i32| id > 0 && rating > 1;
        assert!(pred.matches(1, DocumentStatus::Banned, 2));
        assert!(!pred.matches(0, DocumentStatus::Actual, 2));
    }

    #[test]
    fn stock_predicates() {
        assert!(HasStatus(DocumentStatus::Banned).matches(1, DocumentStatus::Banned, 0));
        assert!(!HasStatus(DocumentStatus::Banned).matches(1, DocumentStatus::Actual, 0));
        assert!(RatingAbove(100).matches(1, DocumentStatus::Actual, 251));
        assert!(!RatingAbove(100).matches(1, DocumentStatus::Actual, 100));
        assert!(IdParity::Even.matches(4, DocumentStatus::Actual, 0));
        assert!(IdParity::Odd.matches(-3, DocumentStatus::Actual, 0));
        assert!(!IdParity::Odd.matches(2, DocumentStatus::Actual, 0));
    }

    #[test]
    fn error_kinds() {
        assert_eq!(
            SearchError::DocumentNotFound { id: 1 }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            SearchError::NegativeDocumentId { id: -1 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            SearchError::MalformedMinusWord { word: "--cat".into() }.kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn error_messages() {
        let err = SearchError::InvalidCharacters {
            kind: TextKind::Query,
            word: "ca\u{1}t".into(),
        };
        assert!(err.to_string().starts_with("query contains invalid control characters"));
        assert_eq!(
            SearchError::DuplicateDocumentId { id: 3 }.to_string(),
            "document id 3 is already indexed"
        );
    }

    #[test]
    fn match_display() {
        let m = DocumentMatch {
            id: 2,
            words: vec!["cat", "city"],
            status: DocumentStatus::Banned,
        };
        assert_eq!(m.to_string(), "{ document_id = 2, status = 2, words = cat city}");
    }

    #[test]
    fn config_builders() {
        let config = EngineConfig::default()
            .with_max_results(10)
            .with_shard_count(4)
            .with_request_window(60);
        assert_eq!(config.max_results, 10);
        assert_eq!(config.shard_count, 4);
        assert_eq!(config.request_window, 60);
        assert_eq!(config.relevance_epsilon, RELEVANCE_EPSILON);
    }
}
