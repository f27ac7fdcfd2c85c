// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lock-striped relevance accumulation.
//!
//! Parallel scoring fans out over query terms, and every term's worker wants
//! to add into the same per-document relevance map. One mutex around one map
//! would serialize the whole phase, so the map is split into independently
//! locked stripes; a document id is routed to stripe `id mod K` and two
//! workers only contend when their documents share a stripe.
//!
//! # Invariants
//!
//! - A key lives in exactly one stripe, so merging stripes never sees a
//!   duplicate and the merged map is totally ordered by id.
//! - `ScoreRef` holds its stripe lock for its whole lifetime; drop it before
//!   touching another key.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard};

use crate::types::DocumentId;

type Stripe = BTreeMap<DocumentId, f64>;

/// Concurrent `DocumentId -> f64` map for parallel score accumulation.
pub struct ScoreAccumulator {
    stripes: Vec<Mutex<Stripe>>,
}

/// Exclusive handle to one slot of the accumulator.
///
/// Dereferences to the slot's `f64`, zero-initialised on first touch. The
/// owning stripe stays locked until the handle is dropped.
pub struct ScoreRef<'a> {
    stripe: MutexGuard<'a, Stripe>,
    document_id: DocumentId,
}

impl Deref for ScoreRef<'_> {
    type Target = f64;

    fn deref(&self) -> &f64 {
        self.stripe
            .get(&self.document_id)
            .expect("slot inserted when the handle was created")
    }
}

impl DerefMut for ScoreRef<'_> {
    fn deref_mut(&mut self) -> &mut f64 {
        self.stripe
            .get_mut(&self.document_id)
            .expect("slot inserted when the handle was created")
    }
}

impl ScoreAccumulator {
    /// An accumulator with `stripe_count` stripes (clamped to at least one).
    pub fn new(stripe_count: usize) -> Self {
        let stripe_count = stripe_count.max(1);
        Self {
            stripes: (0..stripe_count).map(|_| Mutex::new(Stripe::new())).collect(),
        }
    }

    /// One stripe per worker thread of the current rayon pool.
    pub fn with_default_stripes() -> Self {
        Self::new(rayon::current_num_threads())
    }

    #[inline]
    fn stripe_for(&self, document_id: DocumentId) -> &Mutex<Stripe> {
        let index = document_id.rem_euclid(self.stripes.len() as DocumentId) as usize;
        &self.stripes[index]
    }

    /// Lock the owning stripe and return an exclusive handle to the slot
    /// for `document_id`.
    pub fn score_mut(&self, document_id: DocumentId) -> ScoreRef<'_> {
        let mut stripe = self.stripe_for(document_id).lock();
        stripe.entry(document_id).or_insert(0.0);
        ScoreRef {
            stripe,
            document_id,
        }
    }

    /// Remove `document_id` if present.
    pub fn erase(&self, document_id: DocumentId) {
        self.stripe_for(document_id).lock().remove(&document_id);
    }

    /// Merge every stripe into a single ordered map.
    ///
    /// Consumes the accumulator: once the merge starts no thread can still
    /// hold a handle into it, which is exactly the quiescence the merge
    /// requires.
    pub fn into_map(self) -> BTreeMap<DocumentId, f64> {
        let mut merged = BTreeMap::new();
        for stripe in self.stripes {
            merged.extend(stripe.into_inner());
        }
        merged
    }
}
