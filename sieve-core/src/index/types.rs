//! Index types and constants.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use sieve_types::{DocId, DocumentStatus, EngineConfig};

use crate::analyzer::StopWords;

/// Term frequencies of one document, keyed by word.
pub type WordFrequencies = BTreeMap<String, f64>;

/// Term frequencies of one word, keyed by document.
pub type DocumentFrequencies = BTreeMap<DocId, f64>;

pub(crate) static EMPTY_FREQUENCIES: WordFrequencies = BTreeMap::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DocumentRecord {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// In-memory TF-IDF search index.
///
/// Owns both posting views. Every mutation goes through `&mut self` and
/// updates the forward and inverted postings together, so a reader never sees
/// one without the other. Ranking and matching take `&self` and may run in
/// parallel with each other, never with a mutation.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    pub(crate) stop_words: StopWords,
    /// word -> (document -> tf)
    pub(crate) inverted: FxHashMap<String, DocumentFrequencies>,
    /// document -> (word -> tf)
    pub(crate) forward: FxHashMap<DocId, WordFrequencies>,
    pub(crate) documents: BTreeMap<DocId, DocumentRecord>,
    /// Live ids in insertion order
    pub(crate) ids: Vec<DocId>,
    pub(crate) config: EngineConfig,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    /// Creates a new, empty index with no stop words.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a new index with custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            stop_words: StopWords::new(),
            inverted: FxHashMap::default(),
            forward: FxHashMap::default(),
            documents: BTreeMap::new(),
            ids: Vec::new(),
            config,
        }
    }

    /// Returns the number of documents in the index.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the index contains no documents.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the number of documents in the index.
    #[inline(always)]
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.len()
    }

    /// Returns `true` if a document with this id is indexed.
    #[inline(always)]
    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Returns the configuration.
    #[inline(always)]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the stop words.
    #[inline(always)]
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Iterates live document ids in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = DocId> + '_ {
        self.ids.iter().copied()
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = DocId;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
