//! Word Splitting Module
//!
//! Splits raw text into words on ASCII space (0x20). This is the first stage
//! of both the indexing path and the query path.
//!
//! ## What It Does
//!
//! Given input like `"cat in  the city"`, it yields
//!
//! ```ignore
//! "cat", "in", "the", "city"
//! ```
//!
//! Runs of spaces produce no empty words. Words are slices of the input, not
//! new allocations.
//!
//! ## Validation
//!
//! Only the space byte separates words. Tabs, newlines and every other byte
//! below 0x20 stay inside the word they appear in, which is what
//! [`is_valid_word`] then rejects.

use memchr::memchr;

/// Returns `true` if `word` contains no control characters (bytes 0x00-0x1F).
#[inline(always)]
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}

/// Splits `text` into space-delimited words.
///
/// ```
/// use sieve_core::analyzer::tokenizer::split_words;
///
/// let words: Vec<&str> = split_words("  funny pet  ").collect();
/// assert_eq!(words, ["funny", "pet"]);
/// ```
#[inline]
pub fn split_words(text: &str) -> Words<'_> {
    Words { rest: text }
}

/// Iterator returned by [`split_words`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if self.rest.is_empty() {
                return None;
            }
            let bytes = self.rest.as_bytes();
            match memchr(b' ', bytes) {
                Some(0) => {
                    self.rest = &self.rest[1..];
                }
                Some(i) => {
                    // The space byte is never part of a multi-byte sequence, so
                    // both halves are valid UTF-8.
                    let word = &self.rest[..i];
                    self.rest = &self.rest[i + 1..];
                    return Some(word);
                }
                None => {
                    let word = self.rest;
                    self.rest = "";
                    return Some(word);
                }
            }
        }
    }
}
