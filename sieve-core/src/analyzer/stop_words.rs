//! Stop-word set.

use std::collections::BTreeSet;

use sieve_types::{Result, SearchError, TextKind};

use crate::analyzer::tokenizer::{is_valid_word, split_words};

/// Distinct, non-empty words excluded from indexing and from queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from space-separated text.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidCharacters` if a word contains a control character.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words(split_words(text))
    }

    /// Builds the set from a collection of words. Empty words are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidCharacters` if a word contains a control character.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for word in words {
            set.insert(word.as_ref())?;
        }
        Ok(set)
    }

    /// Adds every word of space-separated text.
    ///
    /// Validation happens before any insertion, so a failed call leaves the
    /// set unchanged.
    pub fn extend(&mut self, text: &str) -> Result<()> {
        if let Some(bad) = split_words(text).find(|w| !is_valid_word(w)) {
            return Err(invalid(bad));
        }
        self.words.extend(split_words(text).map(str::to_owned));
        Ok(())
    }

    fn insert(&mut self, word: &str) -> Result<()> {
        if !is_valid_word(word) {
            return Err(invalid(word));
        }
        if !word.is_empty() {
            self.words.insert(word.to_owned());
        }
        Ok(())
    }

    /// Returns `true` if `word` is a stop word.
    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if there are no stop words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates the stop words in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

fn invalid(word: &str) -> SearchError {
    SearchError::InvalidCharacters {
        kind: TextKind::StopWord,
        word: word.to_owned(),
    }
}
