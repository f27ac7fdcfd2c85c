//! In-memory TF-IDF full-text search.
//!
//! Documents are admitted with an id, raw text, a lifecycle status, and
//! rater scores; queries are free text with optional `-negated` terms and
//! come back as a ranked top-five, optionally filtered by a predicate over
//! id, status, and rating.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ tokenize.rs  │────▶│  query.rs   │────▶│    engine.rs     │
//! │ (word views) │     │ (plus/minus │     │ (inverted index, │
//! │              │     │  parsing)   │     │  scoring, match) │
//! └──────────────┘     └─────────────┘     └────────┬─────────┘
//!                                                   │
//!                  ┌────────────────┬───────────────┼───────────────┐
//!                  ▼                ▼               ▼               ▼
//!          ┌──────────────┐ ┌──────────────┐ ┌────────────┐ ┌─────────────┐
//!          │accumulator.rs│ │   batch.rs   │ │  dedup.rs  │ │request_queue│
//!          │(striped map  │ │(query fleets,│ │(duplicate  │ │(sliding     │
//!          │ for parallel │ │ positional   │ │ term sets) │ │ window      │
//!          │ scoring)     │ │ order)       │ │            │ │ statistics) │
//!          └──────────────┘ └──────────────┘ └────────────┘ └─────────────┘
//! ```
//!
//! Every potentially slow operation has a sequential entry point and a
//! `*_parallel` twin that runs the same algorithm over rayon and produces
//! the same output.
//!
//! # Usage
//!
//! ```
//! use talpa::{DocumentStatus, SearchEngine};
//!
//! let mut engine = SearchEngine::from_stop_words_text("and in the")?;
//! engine.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
//! engine.add_document(2, "well-groomed dog expressive eyes", DocumentStatus::Actual, &[5])?;
//!
//! let top = engine.find_top_documents("fluffy cat -dog")?;
//! assert_eq!(top.len(), 1);
//! assert_eq!(top[0].id, 1);
//! # Ok::<(), talpa::SearchError>(())
//! ```

mod accumulator;
mod batch;
mod dedup;
mod engine;
mod error;
mod query;
mod request_queue;
mod stopwords;
mod tokenize;
mod types;

#[doc(hidden)]
pub mod testing;

pub use accumulator::{ScoreAccumulator, ScoreRef};
pub use batch::{process_queries, process_queries_joined};
pub use dedup::remove_duplicates;
pub use engine::SearchEngine;
pub use error::SearchError;
pub use request_queue::RequestQueue;
pub use stopwords::StopWordSet;
pub use tokenize::split_into_words;
pub use types::{
    Document, DocumentId, DocumentStatus, COMPARISON_ACCURACY, MAX_RESULT_DOCUMENT_COUNT,
};
