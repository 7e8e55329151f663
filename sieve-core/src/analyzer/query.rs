//! Query parsing.
//!
//! A query is a space-separated list of words. A word prefixed with a single
//! `-` is a minus-word: documents containing it are excluded. Every other word
//! is a plus-word and contributes to relevance. Stop words are dropped after
//! the minus prefix has been stripped, so `-the` is ignored when `the` is a
//! stop word.
//!
//! Two output shapes exist:
//! - [`Query`] collapses duplicates and orders words lexically (sequential paths)
//! - [`QueryWords`] keeps words in query order with duplicates (parallel paths,
//!   which sort and deduplicate after their partitioned work)

use std::collections::BTreeSet;

use sieve_types::{Result, SearchError, TextKind};
use smallvec::SmallVec;

use crate::analyzer::stop_words::StopWords;
use crate::analyzer::tokenizer::{is_valid_word, split_words};

/// Inline capacity for the vector query form.
pub const INLINE_QUERY_WORDS: usize = 8;

/// Parsed query, set form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    /// Words that add relevance.
    pub plus_words: BTreeSet<&'q str>,
    /// Words that exclude a document.
    pub minus_words: BTreeSet<&'q str>,
    /// Number of recognised (non-stop) words, duplicates included.
    pub size: usize,
}

/// Parsed query, vector form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryWords<'q> {
    /// Words that add relevance, in query order.
    pub plus_words: SmallVec<[&'q str; INLINE_QUERY_WORDS]>,
    /// Words that exclude a document, in query order.
    pub minus_words: SmallVec<[&'q str; INLINE_QUERY_WORDS]>,
    /// Number of recognised (non-stop) words.
    pub size: usize,
}

impl QueryWords<'_> {
    /// Sorts and deduplicates both word lists.
    pub fn dedup(&mut self) {
        self.plus_words.sort_unstable();
        self.plus_words.dedup();
        self.minus_words.sort_unstable();
        self.minus_words.dedup();
    }
}

struct QueryWord<'q> {
    data: &'q str,
    is_minus: bool,
    is_stop: bool,
}

/// Splits query text into plus- and minus-words against a stop-word set.
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'s> {
    stop_words: &'s StopWords,
}

impl<'s> QueryParser<'s> {
    /// Creates a parser that drops `stop_words`.
    #[inline]
    pub const fn new(stop_words: &'s StopWords) -> Self {
        Self { stop_words }
    }

    /// Parses `text` into the set form.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::MalformedMinusWord` for a bare `-` or a word
    /// starting with `--`, and `SearchError::InvalidCharacters` for a word with
    /// a control character.
    pub fn parse<'q>(&self, text: &'q str) -> Result<Query<'q>> {
        let mut query = Query::default();
        for word in split_words(text) {
            let word = self.parse_word(word)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data);
            } else {
                query.plus_words.insert(word.data);
            }
            query.size += 1;
        }
        Ok(query)
    }

    /// Parses `text` into the vector form. Same validation as [`parse`](Self::parse).
    pub fn parse_words<'q>(&self, text: &'q str) -> Result<QueryWords<'q>> {
        let mut query = QueryWords::default();
        for word in split_words(text) {
            let word = self.parse_word(word)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.push(word.data);
            } else {
                query.plus_words.push(word.data);
            }
            query.size += 1;
        }
        Ok(query)
    }

    fn parse_word<'q>(&self, word: &'q str) -> Result<QueryWord<'q>> {
        if word == "-" || word.starts_with("--") {
            return Err(SearchError::MalformedMinusWord {
                word: word.to_owned(),
            });
        }
        if !is_valid_word(word) {
            return Err(SearchError::InvalidCharacters {
                kind: TextKind::Query,
                word: word.to_owned(),
            });
        }
        let (data, is_minus) = match word.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (word, false),
        };
        Ok(QueryWord {
            data,
            is_minus,
            is_stop: self.stop_words.contains(data),
        })
    }
}
