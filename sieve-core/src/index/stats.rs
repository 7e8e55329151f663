//! Statistics and IndexStats.

use crate::index::types::SearchIndex;

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of documents in the index.
    pub num_documents: usize,
    /// Number of distinct indexed words.
    pub num_words: usize,
    /// Total number of (word, document) postings.
    pub total_postings: usize,
    /// Number of stop words.
    pub num_stop_words: usize,
}

impl SearchIndex {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats::from_index(self)
    }
}

impl IndexStats {
    /// Constructs stats from an index.
    pub fn from_index(index: &SearchIndex) -> Self {
        Self {
            num_documents: index.documents.len(),
            num_words: index.inverted.len(),
            total_postings: index.inverted.values().map(|p| p.len()).sum(),
            num_stop_words: index.stop_words.len(),
        }
    }

    /// Average number of distinct words per document.
    pub fn mean_document_words(&self) -> f64 {
        if self.num_documents == 0 {
            return 0.0;
        }
        self.total_postings as f64 / self.num_documents as f64
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} docs, {} words, {} postings, {} stop words",
            self.num_documents, self.num_words, self.total_postings, self.num_stop_words
        )
    }
}
