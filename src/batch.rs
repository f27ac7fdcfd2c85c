// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Batched query execution.
//!
//! Runs a whole slice of queries against one engine concurrently. Each
//! query itself executes sequentially; the parallelism is across queries,
//! which is the right grain when batches are wide and queries are short.

use rayon::prelude::*;

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::types::Document;

/// Run every query concurrently, preserving positional correspondence:
/// `result[i]` is exactly `engine.find_top_documents(&queries[i])`.
///
/// The first query error aborts the batch.
pub fn process_queries<S>(
    engine: &SearchEngine,
    queries: &[S],
) -> Result<Vec<Vec<Document>>, SearchError>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|raw_query| engine.find_top_documents(raw_query.as_ref()))
        .collect()
}

/// Like [`process_queries`], flattened into one sequence in input order.
pub fn process_queries_joined<S>(
    engine: &SearchEngine,
    queries: &[S],
) -> Result<Vec<Document>, SearchError>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
