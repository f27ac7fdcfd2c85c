// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by the engine's fallible operations.
//!
//! Validation failures abort the operation and leave the index untouched;
//! nothing is recovered internally. A query term that simply matches no
//! document is not an error - it contributes zero relevance.

use std::fmt;

/// The two failure kinds the public surface can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A caller-supplied argument failed validation: a negative or already
    /// admitted document id, a control character in document text, a stop
    /// word, or a query token, or a malformed negation (`-` alone, `--word`,
    /// trailing `-`).
    InvalidArgument(String),
    /// An operation referenced a document id that is not in the index.
    OutOfRange(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidArgument(message) => {
                write!(f, "invalid argument: {message}")
            }
            SearchError::OutOfRange(message) => {
                write!(f, "out of range: {message}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
