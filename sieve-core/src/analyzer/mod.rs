//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Tokenizer**: Splits raw text into space-delimited words
//! - **Stop words**: The set of words ignored everywhere
//! - **Query**: Splits a query into plus- and minus-words

pub mod query;
pub mod stop_words;
pub mod tokenizer;

pub use query::{Query, QueryParser, QueryWords};
pub use stop_words::StopWords;
pub use tokenizer::{is_valid_word, split_words};
