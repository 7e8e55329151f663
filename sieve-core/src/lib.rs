//! Core of the sieve search engine.
//!
//! An in-memory TF-IDF index over short texts with plus/minus-word queries,
//! status and rating filters, and sequential or rayon-parallel variants of
//! ranking, matching and removal.
//!
//! ```
//! use sieve_core::SearchIndex;
//! use sieve_core::types::DocumentStatus;
//!
//! let mut index = SearchIndex::with_stop_words("in the").unwrap();
//! index.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//! let top = index.find_top_documents("cat -dog").unwrap();
//! assert_eq!(top[0].id, 42);
//! ```

pub mod accumulator;
pub mod analyzer;
pub mod batch;
pub mod dedup;
pub mod engine;
pub mod index;
pub mod queue;

pub use sieve_types as types;

pub use accumulator::ShardedAccumulator;
pub use batch::{process_queries, process_queries_joined};
pub use dedup::{find_duplicates, remove_duplicates};
pub use engine::SharedIndex;
pub use index::{IndexStats, MatchedWords, SearchIndex};
pub use queue::RequestQueue;
