//! Document removal.

use rayon::prelude::*;
use sieve_types::{DocId, ExecutionMode};
use tracing::debug;

use crate::index::types::{DocumentFrequencies, SearchIndex};

impl SearchIndex {
    /// Removes a document and all of its postings.
    ///
    /// Returns `false` (and changes nothing) if `id` is not indexed.
    pub fn remove_document(&mut self, id: DocId) -> bool {
        self.remove_document_in(ExecutionMode::Sequential, id)
    }

    /// [`remove_document`](Self::remove_document) with an explicit execution mode.
    ///
    /// In parallel mode the document's word buckets are detached from the
    /// inverted postings, the id is erased from each bucket on the rayon pool,
    /// and the buckets that still hold postings are put back.
    pub fn remove_document_in(&mut self, mode: ExecutionMode, id: DocId) -> bool {
        if !self.documents.contains_key(&id) {
            return false;
        }
        let words = self.forward.remove(&id).unwrap_or_default();
        let word_count = words.len();

        match mode {
            ExecutionMode::Sequential => {
                for word in words.keys() {
                    if let Some(postings) = self.inverted.get_mut(word.as_str()) {
                        postings.remove(&id);
                        if postings.is_empty() {
                            self.inverted.remove(word.as_str());
                        }
                    }
                }
            }
            ExecutionMode::Parallel => {
                let mut buckets: Vec<(String, DocumentFrequencies)> = words
                    .into_keys()
                    .filter_map(|word| self.inverted.remove_entry(word.as_str()))
                    .collect();
                buckets.par_iter_mut().for_each(|(_, postings)| {
                    postings.remove(&id);
                });
                self.inverted
                    .extend(buckets.into_iter().filter(|(_, postings)| !postings.is_empty()));
            }
        }

        self.documents.remove(&id);
        self.ids.retain(|&live| live != id);
        debug!(id, words = word_count, ?mode, "removed document");
        true
    }
}
