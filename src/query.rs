// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing: plus-terms, minus-terms, and the validity rules.
//!
//! A raw query is a whitespace-delimited token sequence. A leading `-`
//! negates a token; negated terms disqualify any document containing them.
//! Stop words are dropped silently, negated or not.
//!
//! # Validity
//!
//! A token is rejected with `InvalidArgument` when:
//!
//! - it contains a control character in `[0x00, 0x20)`;
//! - it is a bare `-` (which also covers `- word` and a trailing `-`,
//!   since the tokenizer yields the dash as its own token);
//! - it starts with `--`.
//!
//! Parsed terms borrow from the raw query string; a `Query` never outlives
//! the call that produced it.

use crate::error::SearchError;
use crate::stopwords::StopWordSet;
use crate::tokenize::{is_valid_word, split_into_words};

/// One classified query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// A parsed query: terms a document is scored on, and terms whose presence
/// disqualifies it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Query<'a> {
    pub(crate) plus_words: Vec<&'a str>,
    pub(crate) minus_words: Vec<&'a str>,
}

fn parse_query_word<'a>(
    stop_words: &StopWordSet,
    token: &'a str,
) -> Result<QueryWord<'a>, SearchError> {
    if !is_valid_word(token) {
        return Err(SearchError::InvalidArgument(
            "Query word contains invalid characters".to_string(),
        ));
    }
    let (word, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if is_minus && word.is_empty() {
        return Err(SearchError::InvalidArgument(
            "No text after the minus sign".to_string(),
        ));
    }
    if is_minus && word.starts_with('-') {
        return Err(SearchError::InvalidArgument(
            "More than one minus sign before the word".to_string(),
        ));
    }
    Ok(QueryWord {
        word,
        is_minus,
        is_stop: stop_words.contains(word),
    })
}

/// Parse `text` into plus and minus term sequences.
///
/// With `dedup_plus` the plus sequence is sorted and deduplicated; the
/// scorer and the sequential matcher want that. The parallel matcher parses
/// without it and deduplicates after filtering instead.
pub(crate) fn parse_query<'a>(
    stop_words: &StopWordSet,
    text: &'a str,
    dedup_plus: bool,
) -> Result<Query<'a>, SearchError> {
    let mut query = Query::default();
    for token in split_into_words(text) {
        let query_word = parse_query_word(stop_words, token)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.push(query_word.word);
        } else {
            query.plus_words.push(query_word.word);
        }
    }
    if dedup_plus {
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
    }
    Ok(query)
}
