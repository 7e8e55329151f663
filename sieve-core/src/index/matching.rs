//! Per-document query matching.

use rayon::prelude::*;
use sieve_types::{DocId, DocumentMatch, DocumentStatus, ExecutionMode, Result, SearchError};

use crate::analyzer::QueryParser;
use crate::index::types::SearchIndex;

/// Matched words and the document's status.
pub type MatchedWords<'a> = (Vec<&'a str>, DocumentStatus);

impl SearchIndex {
    /// Returns the plus-words of `raw_query` found in document `id`, in lexical order.
    ///
    /// The list is empty if any minus-word is found in the document. The
    /// returned words borrow from the index, not from the query.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::DocumentNotFound` if `id` is not indexed, or a
    /// parse error if the query is malformed.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<MatchedWords<'_>> {
        self.match_document_in(ExecutionMode::Sequential, raw_query, id)
    }

    /// [`match_document`](Self::match_document) with an explicit execution mode.
    pub fn match_document_in(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocId,
    ) -> Result<MatchedWords<'_>> {
        match mode {
            ExecutionMode::Sequential => {
                let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
                let status = self.check_id(id)?;
                if query.minus_words.iter().any(|w| self.word_in_document(w, id)) {
                    return Ok((Vec::new(), status));
                }
                let words = query
                    .plus_words
                    .iter()
                    .filter_map(|w| self.indexed_word(w, id))
                    .collect();
                Ok((words, status))
            }
            ExecutionMode::Parallel => {
                let query = QueryParser::new(&self.stop_words).parse_words(raw_query)?;
                let status = self.check_id(id)?;
                if query
                    .minus_words
                    .as_slice()
                    .par_iter()
                    .any(|w| self.word_in_document(w, id))
                {
                    return Ok((Vec::new(), status));
                }
                let mut words: Vec<&str> = query
                    .plus_words
                    .as_slice()
                    .par_iter()
                    .filter_map(|w| self.indexed_word(w, id))
                    .collect();
                words.par_sort_unstable();
                words.dedup();
                Ok((words, status))
            }
        }
    }

    /// Matches `raw_query` against every indexed document, ascending by id.
    pub fn match_documents(&self, raw_query: &str) -> Result<Vec<DocumentMatch<'_>>> {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
        let mut matches = Vec::with_capacity(self.documents.len());
        for (&id, record) in &self.documents {
            let words = if query.minus_words.iter().any(|w| self.word_in_document(w, id)) {
                Vec::new()
            } else {
                query
                    .plus_words
                    .iter()
                    .filter_map(|w| self.indexed_word(w, id))
                    .collect()
            };
            matches.push(DocumentMatch {
                id,
                words,
                status: record.status,
            });
        }
        Ok(matches)
    }

    fn check_id(&self, id: DocId) -> Result<DocumentStatus> {
        self.documents
            .get(&id)
            .map(|record| record.status)
            .ok_or(SearchError::DocumentNotFound { id })
    }

    #[inline(always)]
    fn word_in_document(&self, word: &str, id: DocId) -> bool {
        self.inverted
            .get(word)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// The index's own copy of `word` if document `id` contains it.
    #[inline(always)]
    fn indexed_word(&self, word: &str, id: DocId) -> Option<&str> {
        self.inverted
            .get_key_value(word)
            .filter(|(_, postings)| postings.contains_key(&id))
            .map(|(key, _)| key.as_str())
    }
}
