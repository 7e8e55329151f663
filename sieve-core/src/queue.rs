//! Sliding window of recent find requests.

use std::collections::VecDeque;

use sieve_types::{Document, DocumentPredicate, DocumentStatus, ExecutionMode, Result};

use crate::index::SearchIndex;

#[derive(Debug, Clone)]
struct QueryResult {
    query: String,
    result_count: usize,
}

/// Records the last `capacity` find requests made through it and counts
/// the ones that returned nothing.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    index: &'a SearchIndex,
    requests: VecDeque<QueryResult>,
    capacity: usize,
    no_results: usize,
}

impl<'a> RequestQueue<'a> {
    /// Creates a queue whose window is the index's `request_window`.
    pub fn new(index: &'a SearchIndex) -> Self {
        Self::with_capacity(index, index.config().request_window)
    }

    /// Creates a queue remembering at most `capacity` requests (at least one).
    pub fn with_capacity(index: &'a SearchIndex, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            index,
            requests: VecDeque::with_capacity(capacity),
            capacity,
            no_results: 0,
        }
    }

    /// Runs `find_top_documents` and records the request.
    ///
    /// # Errors
    ///
    /// Propagates query errors. A failed request is not recorded.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Runs `find_top_documents_by_status` and records the request.
    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let docs = self.index.find_top_documents_by_status(raw_query, status)?;
        self.record(raw_query, docs.len());
        Ok(docs)
    }

    /// Runs `find_top_documents_by` and records the request.
    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: &P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        let docs = self
            .index
            .find_top_documents_in(ExecutionMode::Sequential, raw_query, predicate)?;
        self.record(raw_query, docs.len());
        Ok(docs)
    }

    /// Number of requests in the window that returned no documents.
    #[inline(always)]
    pub fn no_result_requests(&self) -> usize {
        self.no_results
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queries in the window, oldest first.
    pub fn recent_queries(&self) -> impl Iterator<Item = &str> + '_ {
        self.requests.iter().map(|r| r.query.as_str())
    }

    fn record(&mut self, query: &str, result_count: usize) {
        if self.requests.len() == self.capacity {
            if let Some(evicted) = self.requests.pop_front() {
                if evicted.result_count == 0 {
                    self.no_results -= 1;
                }
            }
        }
        if result_count == 0 {
            self.no_results += 1;
        }
        self.requests.push_back(QueryResult {
            query: query.to_owned(),
            result_count,
        });
    }
}
