//! Thread-shared search index handle.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::index::SearchIndex;

/// A [`SearchIndex`] that can be shared between threads.
///
/// Any number of readers may rank, match or run batches at once through
/// [`read`](Self::read). Adding and removing documents takes the exclusive
/// [`write`](Self::write) guard and waits for every reader to finish.
#[derive(Debug, Default)]
pub struct SharedIndex {
    inner: RwLock<SearchIndex>,
}

impl SharedIndex {
    pub fn new(index: SearchIndex) -> Self {
        Self {
            inner: RwLock::new(index),
        }
    }

    /// Shared access for queries.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, SearchIndex> {
        self.inner.read()
    }

    /// Exclusive access for structural changes.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, SearchIndex> {
        self.inner.write()
    }

    pub fn into_inner(self) -> SearchIndex {
        self.inner.into_inner()
    }
}

impl From<SearchIndex> for SharedIndex {
    fn from(index: SearchIndex) -> Self {
        Self::new(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::process_queries;
    use sieve_types::{DocId, DocumentStatus, ExecutionMode, HasStatus};

    #[test]
    fn readers_and_writer_interleave() {
        let shared = SharedIndex::from(SearchIndex::with_stop_words("the").unwrap());
        {
            let mut index = shared.write();
            for id in 0..50 {
                index
                    .add_document(id, "the cat", DocumentStatus::Actual, &[id])
                    .unwrap();
            }
        }

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..20 {
                        let index = shared.read();
                        let docs = index
                            .find_top_documents_in(
                                ExecutionMode::Parallel,
                                "cat",
                                &HasStatus(DocumentStatus::Actual),
                            )
                            .unwrap();
                        assert!(!docs.is_empty());
                        assert!(process_queries(&index, &["cat", "dog"]).is_ok());
                    }
                });
            }
            s.spawn(|| {
                for id in 50..100 {
                    shared
                        .write()
                        .add_document(id, "the cat", DocumentStatus::Actual, &[])
                        .unwrap();
                }
                for id in 0..25 {
                    assert!(shared.write().remove_document_in(ExecutionMode::Parallel, id));
                }
            });
        });

        let index = shared.into_inner();
        assert_eq!(index.len(), 75);
        assert!(index.ids().all(|id: DocId| id >= 25));
    }

    #[test]
    fn default_is_empty() {
        let shared = SharedIndex::default();
        assert!(shared.read().is_empty());
    }
}
