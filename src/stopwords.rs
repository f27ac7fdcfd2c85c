// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stop-word filtering.
//!
//! Stop words are removed from documents before indexing and from queries
//! before matching, so they can never influence relevance. The set is fixed
//! at engine construction and immutable afterwards, which is what makes it
//! safe to consult from parallel query paths without locking.

use std::collections::HashSet;

use crate::error::SearchError;
use crate::tokenize::{is_valid_word, split_into_words};

/// Immutable set of words elided from documents and queries.
///
/// Lookup is by exact byte equality. Keys are owned `String`s but membership
/// tests take `&str`, so tokenized views can be checked without allocating.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Build a set from any collection of words.
    ///
    /// Empty strings are dropped. A word containing a control character in
    /// `[0x00, 0x20)` fails the whole construction with `InvalidArgument`.
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidArgument(
                    "Stop word contains invalid characters".to_string(),
                ));
            }
            words.insert(word.to_string());
        }
        Ok(Self { words })
    }

    /// Build a set from a single space-delimited string.
    pub fn from_text(text: &str) -> Result<Self, SearchError> {
        Self::new(split_into_words(text))
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
