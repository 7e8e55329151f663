//! Duplicate detection by word set.
//!
//! Two documents are duplicates when they index exactly the same set of
//! words, regardless of frequencies, word order or stop words.

use std::collections::BTreeMap;

use sieve_types::DocId;
use tracing::info;

use crate::index::SearchIndex;

/// Returns the ids that duplicate a lower-id document, ascending.
///
/// The index is not modified.
pub fn find_duplicates(index: &SearchIndex) -> Vec<DocId> {
    let mut ids: Vec<DocId> = index.ids().collect();
    ids.sort_unstable();

    let mut first_seen: BTreeMap<Vec<&str>, DocId> = BTreeMap::new();
    let mut duplicates = Vec::new();

    for id in ids {
        // keys of an ordered map, so equal sets give equal vectors
        let vocabulary: Vec<&str> = index
            .word_frequencies(id)
            .keys()
            .map(String::as_str)
            .collect();

        match first_seen.get(&vocabulary) {
            Some(&original) => {
                let duplicate = id.max(original);
                info!("found duplicate document id {duplicate}");
                duplicates.push(duplicate);
            }
            None => {
                first_seen.insert(vocabulary, id);
            }
        }
    }

    duplicates
}

/// Removes every document that duplicates a lower-id document.
///
/// Returns the removed ids, ascending.
pub fn remove_duplicates(index: &mut SearchIndex) -> Vec<DocId> {
    let duplicates = find_duplicates(index);
    for &id in &duplicates {
        index.remove_document(id);
    }
    duplicates
}
