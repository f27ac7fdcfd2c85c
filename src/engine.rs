// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine core: admission, removal, scoring, and matching.
//!
//! # Index shape
//!
//! Four structures, kept mutually consistent by every mutation:
//!
//! ```text
//! word_to_document_freqs : term -> (document id -> term frequency)
//! document_to_word_freqs : document id -> (term -> term frequency)
//! documents              : document id -> { rating, status }
//! all_document_ids       : ordered id set (ascending iteration)
//! ```
//!
//! Terms are interned as `Arc<str>`: both projections and every matcher
//! result share one allocation per distinct term, and the allocation lives
//! as long as anything in the index references it. Term frequency is
//! occurrences divided by the document's non-stop word count, so a
//! document's frequencies sum to one whenever it has any non-stop word.
//!
//! # Concurrency
//!
//! Admission and removal take `&mut self`; queries take `&self`. Within a
//! process that is the whole synchronization story: readers run freely in
//! parallel, writers are exclusive by construction. The `*_parallel` entry
//! points parallelize a single operation internally with rayon and meet at
//! the lock-striped [`ScoreAccumulator`] where they must share state.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::accumulator::ScoreAccumulator;
use crate::error::SearchError;
use crate::query::{parse_query, Query};
use crate::stopwords::StopWordSet;
use crate::tokenize::{is_valid_word, split_into_words};
use crate::types::{
    Document, DocumentId, DocumentStatus, COMPARISON_ACCURACY, MAX_RESULT_DOCUMENT_COUNT,
};

/// Per-document metadata, created at admission and destroyed at removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DocumentRecord {
    rating: i32,
    status: DocumentStatus,
}

/// In-memory TF-IDF search engine over an inverted index.
#[derive(Debug, Default)]
pub struct SearchEngine {
    stop_words: StopWordSet,
    word_to_document_freqs: HashMap<Arc<str>, BTreeMap<DocumentId, f64>>,
    document_to_word_freqs: BTreeMap<DocumentId, HashMap<Arc<str>, f64>>,
    documents: BTreeMap<DocumentId, DocumentRecord>,
    all_document_ids: BTreeSet<DocumentId>,
}

// =============================================================================
// CONSTRUCTION AND ADMISSION
// =============================================================================

impl SearchEngine {
    /// An engine with stop words given as any collection of strings.
    ///
    /// Fails with `InvalidArgument` if a stop word contains a control
    /// character; empty strings are dropped.
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            stop_words: StopWordSet::new(stop_words)?,
            ..Self::default()
        })
    }

    /// An engine with stop words given as one space-delimited string.
    pub fn from_stop_words_text(stop_words_text: &str) -> Result<Self, SearchError> {
        Ok(Self {
            stop_words: StopWordSet::from_text(stop_words_text)?,
            ..Self::default()
        })
    }

    /// Admit a document.
    ///
    /// Fails with `InvalidArgument` when the text contains a control
    /// character, the id is negative, or the id was admitted before; the
    /// index is left unchanged on failure. A document with no non-stop
    /// words is still admitted, but contributes no index entries and can
    /// never match a query.
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if !is_valid_word(document) {
            return Err(SearchError::InvalidArgument(
                "Document contains invalid characters".to_string(),
            ));
        }
        if document_id < 0 {
            return Err(SearchError::InvalidArgument(
                "Attempt to add a document with a negative id".to_string(),
            ));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::InvalidArgument(
                "Attempt to add a document with the id of a previously added document"
                    .to_string(),
            ));
        }

        let words: Vec<&str> = split_into_words(document)
            .filter(|word| !self.stop_words.contains(word))
            .collect();
        let inverse_word_count = 1.0 / words.len() as f64;

        // The inverse projection gets an entry even for an empty document,
        // so that word-frequency lookup and removal treat it like any other.
        self.document_to_word_freqs.entry(document_id).or_default();
        for word in words {
            let term = self.intern(word);
            *self
                .word_to_document_freqs
                .entry(Arc::clone(&term))
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inverse_word_count;
            *self
                .document_to_word_freqs
                .entry(document_id)
                .or_default()
                .entry(term)
                .or_insert(0.0) += inverse_word_count;
        }
        self.documents.insert(
            document_id,
            DocumentRecord {
                rating: compute_average_rating(ratings),
                status,
            },
        );
        self.all_document_ids.insert(document_id);
        Ok(())
    }

    /// Reuse the existing allocation when the term is already indexed.
    fn intern(&self, word: &str) -> Arc<str> {
        match self.word_to_document_freqs.get_key_value(word) {
            Some((term, _)) => Arc::clone(term),
            None => Arc::from(word),
        }
    }
}

// =============================================================================
// SEARCH
// =============================================================================

impl SearchEngine {
    /// Top documents for `raw_query` among those with `Actual` status.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents for `raw_query` among those with the given status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_filter(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents for `raw_query` among those accepted by `filter`.
    ///
    /// The filter sees `(id, status, rating)` and must be pure and quick:
    /// it runs once per contributing document per plus-term. Results are
    /// ordered by descending relevance, ties within [`COMPARISON_ACCURACY`]
    /// broken by descending rating, and truncated to
    /// [`MAX_RESULT_DOCUMENT_COUNT`].
    pub fn find_top_documents_with_filter<F>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(&self.stop_words, raw_query, true)?;
        let mut matched_documents = self.find_all_documents(&query, filter);
        matched_documents.sort_by(compare_ranked);
        matched_documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched_documents)
    }

    /// Parallel twin of [`find_top_documents`](Self::find_top_documents).
    pub fn find_top_documents_parallel(
        &self,
        raw_query: &str,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_status_parallel(raw_query, DocumentStatus::Actual)
    }

    /// Parallel twin of
    /// [`find_top_documents_with_status`](Self::find_top_documents_with_status).
    pub fn find_top_documents_with_status_parallel(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_documents_with_filter_parallel(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Parallel twin of
    /// [`find_top_documents_with_filter`](Self::find_top_documents_with_filter).
    ///
    /// Plus-term accumulation and minus-term elimination each run as rayon
    /// tasks over the term sequences, meeting at a lock-striped accumulator;
    /// the final sort is a parallel sort. Ordering matches the sequential
    /// twin for identical inputs.
    pub fn find_top_documents_with_filter_parallel<F>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = parse_query(&self.stop_words, raw_query, true)?;
        let mut matched_documents = self.find_all_documents_parallel(&query, filter);
        matched_documents.par_sort_by(compare_ranked);
        matched_documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched_documents)
    }

    fn find_all_documents<F>(&self, query: &Query<'_>, filter: F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(document_freqs) = self.word_to_document_freqs.get(*word) else {
                continue;
            };
            let inverse_document_freq = self.inverse_document_freq(document_freqs);
            for (&document_id, &term_freq) in document_freqs {
                let Some(record) = self.documents.get(&document_id) else {
                    continue;
                };
                if filter(document_id, record.status, record.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) +=
                        term_freq * inverse_document_freq;
                }
            }
        }

        for word in &query.minus_words {
            let Some(document_freqs) = self.word_to_document_freqs.get(*word) else {
                continue;
            };
            for &document_id in document_freqs.keys() {
                document_to_relevance.remove(&document_id);
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(document_id, relevance)| Document {
                id: document_id,
                relevance,
                rating: self.rating_of(document_id),
            })
            .collect()
    }

    fn find_all_documents_parallel<F>(&self, query: &Query<'_>, filter: F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator = ScoreAccumulator::with_default_stripes();
        query.plus_words.par_iter().for_each(|word| {
            let Some(document_freqs) = self.word_to_document_freqs.get(*word) else {
                return;
            };
            let inverse_document_freq = self.inverse_document_freq(document_freqs);
            for (&document_id, &term_freq) in document_freqs {
                let Some(record) = self.documents.get(&document_id) else {
                    continue;
                };
                // The filter runs before the stripe lock is taken.
                if filter(document_id, record.status, record.rating) {
                    *accumulator.score_mut(document_id) += term_freq * inverse_document_freq;
                }
            }
        });

        // for_each above joins all plus-phase tasks, so an erasure here can
        // never race an accumulation of the same key.
        query.minus_words.par_iter().for_each(|word| {
            let Some(document_freqs) = self.word_to_document_freqs.get(*word) else {
                return;
            };
            for &document_id in document_freqs.keys() {
                accumulator.erase(document_id);
            }
        });

        accumulator
            .into_map()
            .into_iter()
            .map(|(document_id, relevance)| Document {
                id: document_id,
                relevance,
                rating: self.rating_of(document_id),
            })
            .collect()
    }

    /// Natural log of total document count over the term's document count.
    fn inverse_document_freq(&self, document_freqs: &BTreeMap<DocumentId, f64>) -> f64 {
        (self.documents.len() as f64 / document_freqs.len() as f64).ln()
    }

    fn rating_of(&self, document_id: DocumentId) -> i32 {
        self.documents
            .get(&document_id)
            .map_or(0, |record| record.rating)
    }
}

// =============================================================================
// MATCHING
// =============================================================================

impl SearchEngine {
    /// The query's plus-terms contained in one document, with its status.
    ///
    /// Fails with `OutOfRange` when the id is unknown. If any minus-term of
    /// the query occurs in the document, the term list is empty. The list
    /// is deduplicated and sorted.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<Arc<str>>, DocumentStatus), SearchError> {
        let record = self.record_of(document_id)?;
        let query = parse_query(&self.stop_words, raw_query, true)?;

        for word in &query.minus_words {
            if self.document_contains(document_id, word) {
                return Ok((Vec::new(), record.status));
            }
        }

        let mut matched_words = Vec::new();
        for word in &query.plus_words {
            if let Some((term, document_freqs)) =
                self.word_to_document_freqs.get_key_value(*word)
            {
                if document_freqs.contains_key(&document_id) {
                    matched_words.push(Arc::clone(term));
                }
            }
        }
        Ok((matched_words, record.status))
    }

    /// Parallel twin of [`match_document`](Self::match_document).
    ///
    /// The minus-term short circuit and the plus-term filter run as rayon
    /// tasks over an unsequenced parse; the survivors are sorted and
    /// deduplicated afterwards, so the result equals the sequential twin's.
    pub fn match_document_parallel(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<Arc<str>>, DocumentStatus), SearchError> {
        let record = self.record_of(document_id)?;
        let query = parse_query(&self.stop_words, raw_query, false)?;

        let has_minus = query
            .minus_words
            .par_iter()
            .any(|word| self.document_contains(document_id, word));
        if has_minus {
            return Ok((Vec::new(), record.status));
        }

        let mut matched_words: Vec<Arc<str>> = query
            .plus_words
            .par_iter()
            .filter_map(|word| {
                let (term, document_freqs) =
                    self.word_to_document_freqs.get_key_value(*word)?;
                document_freqs
                    .contains_key(&document_id)
                    .then(|| Arc::clone(term))
            })
            .collect();
        matched_words.sort_unstable();
        matched_words.dedup();
        Ok((matched_words, record.status))
    }

    #[inline]
    fn document_contains(&self, document_id: DocumentId, word: &str) -> bool {
        self.word_to_document_freqs
            .get(word)
            .is_some_and(|document_freqs| document_freqs.contains_key(&document_id))
    }

    fn record_of(&self, document_id: DocumentId) -> Result<&DocumentRecord, SearchError> {
        self.documents
            .get(&document_id)
            .ok_or_else(|| SearchError::OutOfRange(format!("No document with id {document_id}")))
    }
}

// =============================================================================
// INSPECTION AND REMOVAL
// =============================================================================

impl SearchEngine {
    /// Number of admitted documents.
    pub fn get_document_count(&self) -> usize {
        self.documents.len()
    }

    /// Admitted document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.all_document_ids.iter().copied()
    }

    /// Term frequencies of one document.
    ///
    /// Fails with `OutOfRange` when the id is unknown. A document with no
    /// non-stop words yields an empty map.
    pub fn get_word_frequencies(
        &self,
        document_id: DocumentId,
    ) -> Result<&HashMap<Arc<str>, f64>, SearchError> {
        self.document_to_word_freqs
            .get(&document_id)
            .ok_or_else(|| SearchError::OutOfRange(format!("No document with id {document_id}")))
    }

    /// Remove a document and every index reference to it. A no-op when the
    /// id is unknown.
    pub fn remove_document(&mut self, document_id: DocumentId) {
        let Some(word_freqs) = self.document_to_word_freqs.remove(&document_id) else {
            return;
        };
        // A term's posting map may become empty here; it is not collected.
        for term in word_freqs.keys() {
            if let Some(document_freqs) = self.word_to_document_freqs.get_mut(term) {
                document_freqs.remove(&document_id);
            }
        }
        self.documents.remove(&document_id);
        self.all_document_ids.remove(&document_id);
        debug!(document_id, "removed document");
    }

    /// Parallel twin of [`remove_document`](Self::remove_document).
    ///
    /// Posting erasures run as rayon tasks, each mutating a distinct term's
    /// posting map; the remaining bookkeeping happens on the calling thread
    /// after they have all joined.
    pub fn remove_document_parallel(&mut self, document_id: DocumentId) {
        let Some(word_freqs) = self.document_to_word_freqs.get(&document_id) else {
            return;
        };
        let words: HashSet<Arc<str>> = word_freqs.keys().cloned().collect();

        self.word_to_document_freqs
            .par_iter_mut()
            .for_each(|(term, document_freqs)| {
                if words.contains(term) {
                    document_freqs.remove(&document_id);
                }
            });

        self.document_to_word_freqs.remove(&document_id);
        self.documents.remove(&document_id);
        self.all_document_ids.remove(&document_id);
        debug!(document_id, "removed document");
    }
}

// =============================================================================
// RANKING
// =============================================================================

/// Ranking order: descending relevance; ties within [`COMPARISON_ACCURACY`]
/// fall back to descending rating.
fn compare_ranked(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < COMPARISON_ACCURACY {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}

fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    ratings.iter().sum::<i32>() / ratings.len() as i32
}

// =============================================================================
// TESTS
// =============================================================================
