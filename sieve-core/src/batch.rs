//! Parallel batch query processing.

use rayon::prelude::*;
use sieve_types::{Document, Result};
use tracing::debug_span;

use crate::index::SearchIndex;

/// Runs `find_top_documents` for every query on the rayon pool.
///
/// `result[i]` holds the documents for `queries[i]`.
///
/// # Errors
///
/// Returns the error of the first failing query, in query order.
pub fn process_queries<S>(index: &SearchIndex, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let _span = debug_span!("process_queries", queries = queries.len()).entered();
    queries
        .par_iter()
        .map(|query| index.find_top_documents(query.as_ref()))
        .collect()
}

/// Like [`process_queries`], flattened into one list in query order.
pub fn process_queries_joined<S>(index: &SearchIndex, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    let _span = debug_span!("process_queries_joined", queries = queries.len()).entered();
    queries
        .par_iter()
        .map(|query| index.find_top_documents(query.as_ref()))
        .try_reduce(Vec::new, |mut joined, mut next| {
            joined.append(&mut next);
            Ok(joined)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_types::{DocId, DocumentStatus, SearchError};

    fn pets() -> SearchIndex {
        let mut index = SearchIndex::with_stop_words("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in texts.iter().enumerate() {
            index
                .add_document(id as DocId + 1, text, DocumentStatus::Actual, &[1, 2])
                .unwrap();
        }
        index
    }

    const QUERIES: [&str; 3] = ["nasty rat -not", "not very funny nasty pet", "curly hair"];

    #[test]
    fn results_per_query_in_order() {
        let index = pets();
        let results = process_queries(&index, &QUERIES).unwrap();
        let sizes: Vec<usize> = results.iter().map(Vec::len).collect();
        assert_eq!(sizes, [3, 5, 2]);

        for (query, docs) in QUERIES.iter().zip(&results) {
            assert_eq!(docs, &index.find_top_documents(query).unwrap());
        }
    }

    #[test]
    fn joined_keeps_query_order() {
        let index = pets();
        let joined = process_queries_joined(&index, &QUERIES).unwrap();
        assert_eq!(joined.len(), 10);

        let expected: Vec<_> = process_queries(&index, &QUERIES)
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(joined, expected);
    }

    #[test]
    fn owned_queries() {
        let index = pets();
        let queries: Vec<String> = QUERIES.iter().map(|q| q.to_string()).collect();
        assert_eq!(process_queries(&index, &queries).unwrap().len(), 3);
    }

    #[test]
    fn empty_batch() {
        let index = pets();
        let none: [&str; 0] = [];
        assert!(process_queries(&index, &none).unwrap().is_empty());
        assert!(process_queries_joined(&index, &none).unwrap().is_empty());
    }

    #[test]
    fn failing_query_fails_the_batch() {
        let index = pets();
        let queries = ["curly hair", "rat --pet", "funny"];
        assert!(matches!(
            process_queries(&index, &queries),
            Err(SearchError::MalformedMinusWord { .. })
        ));
        assert!(process_queries_joined(&index, &queries).is_err());
    }
}
