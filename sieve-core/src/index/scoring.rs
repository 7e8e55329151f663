//! Scoring functions.

use core::cmp::Ordering;

use rayon::slice::ParallelSliceMut;
use sieve_types::{Document, ExecutionMode};

use crate::index::types::SearchIndex;

impl SearchIndex {
    /// `ln(N / df)` for a word present in the inverted postings.
    #[inline(always)]
    pub(crate) fn inverse_document_freq(&self, containing: usize) -> f64 {
        (self.documents.len() as f64 / containing as f64).ln()
    }
}

#[inline(always)]
fn by_relevance_desc(lhs: &Document, rhs: &Document) -> Ordering {
    rhs.relevance.total_cmp(&lhs.relevance)
}

/// Orders documents by relevance descending. Runs of documents whose
/// relevance is within `epsilon` of the run's first element count as tied and
/// are ordered by rating descending.
///
/// Both passes sort by a total order.
pub(crate) fn rank_documents(docs: &mut [Document], epsilon: f64, mode: ExecutionMode) {
    match mode {
        ExecutionMode::Sequential => docs.sort_by(by_relevance_desc),
        ExecutionMode::Parallel => docs.par_sort_by(by_relevance_desc),
    }

    let mut start = 0usize;
    while start < docs.len() {
        let leader = docs[start].relevance;
        let mut end = start + 1;
        while end < docs.len() && (leader - docs[end].relevance).abs() < epsilon {
            end += 1;
        }
        if end - start > 1 {
            docs[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        }
        start = end;
    }
}
