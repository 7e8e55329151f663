//! TF-IDF indexing infrastructure for the search engine.
//!
//! Memory Layout:
//! - Forward postings: document -> ordered (word -> term frequency)
//! - Inverted postings: word -> ordered (document -> term frequency)
//! - Both views hold the same term frequencies and are only ever changed
//!   together by [`SearchIndex`] methods
//!
//! Threading:
//! - Ranking and matching take `&self`. Their parallel variants fan out over
//!   the rayon pool and join before returning.
//! - Adding and removing take `&mut self`, so no read can overlap a mutation.
//!   Use [`crate::engine::SharedIndex`] to share one index across threads.

mod api;
mod matching;
mod remove;
mod scoring;
mod search;
mod stats;
mod types;

pub use matching::MatchedWords;
pub use stats::IndexStats;
pub use types::{DocumentFrequencies, SearchIndex, WordFrequencies};
