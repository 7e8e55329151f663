//! Ranking: TF-IDF relevance, filtering, ordering and truncation.

use std::collections::BTreeMap;

use rayon::prelude::*;
use sieve_types::{
    DocId, Document, DocumentPredicate, DocumentStatus, ExecutionMode, HasStatus, Result,
    SearchError, TextKind,
};
use tracing::{debug_span, trace};

use crate::accumulator::ShardedAccumulator;
use crate::analyzer::{is_valid_word, QueryParser};
use crate::index::scoring::rank_documents;
use crate::index::types::SearchIndex;

impl SearchIndex {
    /// Returns the most relevant `Actual` documents for `raw_query`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidCharacters` or `SearchError::MalformedMinusWord`
    /// if the query does not parse.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_in(
            ExecutionMode::Sequential,
            raw_query,
            &HasStatus(DocumentStatus::Actual),
        )
    }

    /// Returns the most relevant documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_in(ExecutionMode::Sequential, raw_query, &HasStatus(status))
    }

    /// Returns the most relevant documents accepted by `predicate`.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: &P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        self.find_top_documents_in(ExecutionMode::Sequential, raw_query, predicate)
    }

    /// Ranks documents for `raw_query` using the given execution mode.
    ///
    /// Documents are ordered by relevance descending; relevances within the
    /// configured epsilon are ordered by rating descending. At most
    /// `config.max_results` documents are returned.
    pub fn find_top_documents_in<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: &P,
    ) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        if !is_valid_word(raw_query) {
            return Err(SearchError::InvalidCharacters {
                kind: TextKind::Query,
                word: raw_query.to_owned(),
            });
        }

        let mut matched = match mode {
            ExecutionMode::Sequential => self.find_all_documents(raw_query, predicate)?,
            ExecutionMode::Parallel => self.par_find_all_documents(raw_query, predicate)?,
        };

        rank_documents(&mut matched, self.config.relevance_epsilon, mode);
        matched.truncate(self.config.max_results);
        trace!(query = raw_query, ?mode, results = matched.len(), "ranked query");
        Ok(matched)
    }

    fn find_all_documents<P>(&self, raw_query: &str, predicate: &P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;

        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for &word in &query.plus_words {
            self.accumulate_word(word, predicate, |id, score| {
                *relevance.entry(id).or_insert(0.0) += score;
            });
        }

        self.exclude_minus_words(&mut relevance, query.minus_words.iter().copied());
        Ok(self.collect_documents(relevance))
    }

    fn par_find_all_documents<P>(&self, raw_query: &str, predicate: &P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        let mut query = QueryParser::new(&self.stop_words).parse_words(raw_query)?;
        query.dedup();

        let threads = rayon::current_num_threads().max(1);
        let chunk_size = (query.plus_words.len() / threads).max(1);
        let shards = match self.config.shard_count {
            0 => threads,
            n => n,
        };
        let mut accumulator: ShardedAccumulator<DocId, f64> = ShardedAccumulator::new(shards);

        {
            let _span = debug_span!("par_relevance", words = query.plus_words.len(), chunk_size)
                .entered();
            query.plus_words.as_slice().par_chunks(chunk_size).for_each(|chunk| {
                for &word in chunk {
                    self.accumulate_word(word, predicate, |id, score| {
                        *accumulator.access(id) += score;
                    });
                }
            });
        }

        let mut relevance = accumulator.drain();
        self.exclude_minus_words(&mut relevance, query.minus_words.iter().copied());
        Ok(self.collect_documents(relevance))
    }

    /// Calls `add(id, tf * idf)` for each posting of `word` that passes `predicate`.
    #[inline]
    fn accumulate_word<P, F>(&self, word: &str, predicate: &P, mut add: F)
    where
        P: DocumentPredicate + ?Sized,
        F: FnMut(DocId, f64),
    {
        let Some(postings) = self.inverted.get(word) else {
            return;
        };
        let idf = self.inverse_document_freq(postings.len());
        for (&id, &tf) in postings {
            let Some(record) = self.documents.get(&id) else {
                continue;
            };
            if predicate.matches(id, record.status, record.rating) {
                add(id, tf * idf);
            }
        }
    }

    fn exclude_minus_words<'w>(
        &self,
        relevance: &mut BTreeMap<DocId, f64>,
        minus_words: impl Iterator<Item = &'w str>,
    ) {
        for word in minus_words {
            if let Some(postings) = self.inverted.get(word) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }
    }

    fn collect_documents(&self, relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
        relevance
            .into_iter()
            .filter_map(|(id, score)| {
                self.documents
                    .get(&id)
                    .map(|record| Document::new(id, score, record.rating))
            })
            .collect()
    }
}
