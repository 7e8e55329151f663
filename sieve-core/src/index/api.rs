//! Public API for adding documents and reading their postings.

use sieve_types::{DocId, DocumentStatus, Result, SearchError, TextKind};
use smallvec::SmallVec;
use tracing::debug;

use crate::analyzer::{is_valid_word, split_words, StopWords};
use crate::index::types::{DocumentRecord, SearchIndex, WordFrequencies, EMPTY_FREQUENCIES};

impl SearchIndex {
    /// Creates an index whose stop words are the words of `text`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidCharacters` if a stop word contains control characters.
    pub fn with_stop_words(text: &str) -> Result<Self> {
        Ok(Self::with_stop_word_set(StopWords::parse(text)?))
    }

    /// Creates an index from a collection of stop words.
    pub fn from_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_word_set(StopWords::from_words(words)?))
    }

    /// Creates an index from a prepared stop-word set.
    pub fn with_stop_word_set(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            ..Self::new()
        }
    }

    /// Adds the words of `text` to the stop words.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::StopWordsFrozen` if any document is indexed: existing
    /// postings are never re-filtered. Returns `SearchError::InvalidCharacters`
    /// for a word with control characters.
    pub fn add_stop_words(&mut self, text: &str) -> Result<()> {
        if !self.is_empty() {
            return Err(SearchError::StopWordsFrozen {
                documents: self.len(),
            });
        }
        self.stop_words.extend(text)
    }

    /// Adds a document to the index.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::NegativeDocumentId` if `id < 0`.
    /// Returns `SearchError::DuplicateDocumentId` if `id` is already indexed.
    /// Returns `SearchError::InvalidCharacters` if a word contains control characters.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::NegativeDocumentId { id });
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocumentId { id });
        }

        // Validate everything before touching either posting view.
        let mut words: SmallVec<[&str; 32]> = SmallVec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::InvalidCharacters {
                    kind: TextKind::Document,
                    word: word.to_owned(),
                });
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }

        let mut frequencies = WordFrequencies::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for &word in &words {
                *frequencies.entry(word.to_owned()).or_insert(0.0) += inv_word_count;
            }
        }
        for (word, &tf) in &frequencies {
            self.inverted
                .entry(word.clone())
                .or_default()
                .insert(id, tf);
        }

        let rating = average_rating(ratings);
        debug!(
            id,
            words = frequencies.len(),
            rating,
            ?status,
            "indexed document"
        );
        self.forward.insert(id, frequencies);
        self.documents.insert(id, DocumentRecord { rating, status });
        self.ids.push(id);
        Ok(())
    }

    /// Returns the term frequencies of a document, or an empty map if it is not indexed.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies {
        self.forward.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Returns the status of an indexed document.
    pub fn status(&self, id: DocId) -> Option<DocumentStatus> {
        self.documents.get(&id).map(|record| record.status)
    }

    /// Returns the rating of an indexed document.
    pub fn rating(&self, id: DocId) -> Option<i32> {
        self.documents.get(&id).map(|record| record.rating)
    }
}

/// Arithmetic mean truncated toward zero, 0 for no ratings.
pub(crate) fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
