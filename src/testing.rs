// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation. It
//! provides the canonical fixtures so the same corpora are not rebuilt by
//! hand in every test file.

#![doc(hidden)]

use crate::engine::SearchEngine;
use crate::types::{DocumentId, DocumentStatus};

/// An engine with the given stop words, panicking on invalid fixtures.
pub fn make_engine(stop_words_text: &str) -> SearchEngine {
    SearchEngine::from_stop_words_text(stop_words_text).expect("fixture stop words are valid")
}

/// Add an `Actual` document, panicking on invalid fixtures.
pub fn add_actual(engine: &mut SearchEngine, id: DocumentId, text: &str, ratings: &[i32]) {
    engine
        .add_document(id, text, DocumentStatus::Actual, ratings)
        .expect("fixture document is valid");
}

/// The three-document corpus used across ranking tests.
pub fn make_ranked_engine() -> SearchEngine {
    let mut engine = make_engine("");
    add_actual(&mut engine, 1, "fluffy cat fluffy tail", &[1, 2, 3]);
    add_actual(&mut engine, 2, "well-groomed dog expressive eyes", &[4, 5, 6]);
    add_actual(&mut engine, 3, "fluffy well-groomed cat in city", &[8, 9, 10]);
    engine
}
