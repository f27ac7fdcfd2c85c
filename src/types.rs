// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The value types the engine hands to and receives from callers.
//!
//! Nothing here owns index state. `Document` is a ranked hit, not the text
//! it was ranked from; the engine keeps the indexed content internally and
//! callers only ever see ids, relevances, and ratings.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of hits a single search returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Two relevance values closer than this compare as equal during ranking,
/// and the tie falls through to the rating comparison.
pub const COMPARISON_ACCURACY: f64 = 1e-6;

/// Document identifier. Signed so that admission can reject negative ids
/// instead of silently wrapping them.
pub type DocumentId = i32;

/// Lifecycle label attached to a document at admission.
///
/// A status never gates indexing: a `Banned` document is indexed like any
/// other and filtering happens at query time, through the status or
/// predicate overloads of the find operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// A ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Summed TF-IDF contribution of the query's plus-terms.
    pub relevance: f64,
    /// Truncated integer mean of the rater scores supplied at admission.
    pub rating: i32,
}
