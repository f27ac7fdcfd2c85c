// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Duplicate document detection and removal.
//!
//! Two documents are duplicates when their non-stop term sets are equal;
//! frequencies and word order play no part. The scan walks ids in ascending
//! order and keeps the first representative of each term set, so the
//! smallest id always wins.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::info;

use crate::engine::SearchEngine;
use crate::types::DocumentId;

/// Remove every document whose term set duplicates that of a smaller-id
/// document. Idempotent; infallible.
pub fn remove_duplicates(engine: &mut SearchEngine) {
    let mut seen_word_sets: HashSet<BTreeSet<Arc<str>>> = HashSet::new();
    let mut duplicates: Vec<DocumentId> = Vec::new();

    for document_id in engine.document_ids() {
        let Ok(word_freqs) = engine.get_word_frequencies(document_id) else {
            continue;
        };
        let word_set: BTreeSet<Arc<str>> = word_freqs.keys().cloned().collect();
        if seen_word_sets.contains(&word_set) {
            info!(document_id, "found duplicate document");
            duplicates.push(document_id);
        } else {
            seen_word_sets.insert(word_set);
        }
    }

    for document_id in duplicates {
        engine.remove_document(document_id);
    }
}
