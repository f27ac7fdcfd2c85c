// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sliding-window request statistics.
//!
//! Wraps an engine and records one tick per search request. The window
//! covers the last `MINUTES_IN_DAY` ticks; the only exposed statistic is
//! how many requests inside the window returned no documents. Time is
//! logical - each recorded request advances it by one - so the window is a
//! bounded deque, not a clock.

use std::collections::VecDeque;

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::types::{Document, DocumentId, DocumentStatus};

/// Window length in ticks.
const MINUTES_IN_DAY: u64 = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    timestamp: u64,
    results: usize,
}

/// Per-engine request log with a fixed sliding window.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
    current_time: u64,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        Self {
            engine,
            requests: VecDeque::new(),
            no_result_requests: 0,
            current_time: 0,
        }
    }

    /// Search with `Actual` status and record the result count.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        self.add_find_request_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Search with the given status and record the result count.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        self.add_find_request_with_filter(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Search with a predicate and record the result count.
    ///
    /// A query that fails validation is not recorded; the window only sees
    /// requests that actually executed.
    pub fn add_find_request_with_filter<F>(
        &mut self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let result = self.engine.find_top_documents_with_filter(raw_query, filter)?;
        self.record(result.len());
        Ok(result)
    }

    /// Requests inside the window that returned no documents.
    pub fn get_no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    fn record(&mut self, results: usize) {
        self.current_time += 1;
        while let Some(front) = self.requests.front() {
            if front.timestamp + MINUTES_IN_DAY > self.current_time {
                break;
            }
            if front.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }
        self.requests.push_back(QueryResult {
            timestamp: self.current_time,
            results,
        });
        if results == 0 {
            self.no_result_requests += 1;
        }
    }
}
