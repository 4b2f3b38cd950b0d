//! Result aggregation.

use crate::types::{AggregatedResponse, BatchResponse, Page, ResponseMeta};
use crate::Error;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Flattens per-batch collections into one ordered response and stamps timing.
#[derive(Debug, Clone, Copy)]
pub struct ResultAggregator<'a> {
    result_key: Option<&'a str>,
    started: Instant,
}

impl<'a> ResultAggregator<'a> {
    pub fn new(result_key: Option<&'a str>, started: Instant) -> Self {
        Self {
            result_key,
            started,
        }
    }

    pub fn result_key(&self) -> Option<&'a str> {
        self.result_key
    }

    /// Items of the named collection across all batches, in batch order.
    ///
    /// Batches without the collection contribute nothing.
    pub fn flatten(&self, responses: &[BatchResponse]) -> Vec<Value> {
        let Some(key) = self.result_key else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (index, resp) in responses.iter().enumerate() {
            match resp.collection(key) {
                Some(items) => out.extend(items.iter().cloned()),
                None => debug!(batch = index, key, "batch response has no result collection"),
            }
        }
        out
    }

    /// Combined paging block: total from the last batch that reported one,
    /// result count from the flattened items.
    pub fn merge_pages(&self, responses: &[BatchResponse], offset: u64, results: usize) -> Page {
        let total_count = responses
            .iter()
            .rev()
            .find_map(|r| r.page.as_ref().map(|p| p.total_count))
            .unwrap_or(0);
        Page {
            results_count: results as u64,
            total_count,
            offset,
        }
    }

    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta::from_elapsed(self.started.elapsed())
    }

    pub fn success(&self, responses: &[BatchResponse]) -> AggregatedResponse {
        let items = self.flatten(responses);
        AggregatedResponse::success(self.result_key, items, self.meta())
    }

    /// `{ error, meta }` with no collection.
    pub fn failure(&self, error: &Error) -> AggregatedResponse {
        AggregatedResponse::failure(error.to_api_error(), self.meta())
    }
}
