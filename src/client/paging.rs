//! Paged reads.
//!
//! A page window wider than `batch_limit` is split into consecutive
//! `offset`/`limit` windows that run through the same bounded rounds as any
//! other batch operation.

use super::core::TinyccClient;
use crate::batch::{ResultAggregator, RoundExecutor};
use crate::transport::ApiRequest;
use crate::types::AggregatedResponse;
use crate::{Error, ErrorContext, Result};
use std::time::Instant;
use tracing::debug;

const URLS: &str = "urls";

/// Window and filters of a paged read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Entries to read; defaults to the client's `batch_limit`.
    pub limit: Option<usize>,
    pub offset: usize,
    /// Extra query parameters (`tags`, `order_by`, ...).
    pub query: Vec<(String, String)>,
}

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// `(offset, limit)` windows covering `start..end`, each at most `batch_limit` wide.
fn page_windows(
    start: usize,
    end: usize,
    batch_limit: usize,
) -> impl Iterator<Item = (usize, usize)> {
    (start..end)
        .step_by(batch_limit)
        .map(move |offset| (offset, batch_limit.min(end - offset)))
}

impl TinyccClient {
    /// Read `limit` URL entries starting at `offset`.
    ///
    /// The response carries the entries under `urls` and a `page` block whose
    /// `results_count` counts what came back and whose `total_count` is the
    /// server's total. Windows are built one round at a time; a window that
    /// comes back short marks the end of the data and no further round runs.
    pub async fn read_page(&self, params: PageParams) -> Result<AggregatedResponse> {
        let config = self.batch_config();
        let limit = params.limit.unwrap_or(config.batch_limit);
        if limit == 0 {
            return Err(Error::validation_with_context(
                "page limit must be greater than zero",
                ErrorContext::new().with_field_path("params.limit"),
            ));
        }
        let end = params.offset.checked_add(limit).ok_or_else(|| {
            Error::validation_with_context(
                "page window exceeds the addressable range",
                ErrorContext::new()
                    .with_field_path("params.limit")
                    .with_details(format!("offset: {}, limit: {}", params.offset, limit)),
            )
        })?;

        let aggregator = ResultAggregator::new(Some(URLS), Instant::now());
        let executor = RoundExecutor::new(config);
        let query = &params.query;
        let callback = |window: Vec<(usize, usize)>| {
            let (offset, len) = window.first().copied().unwrap_or_default();
            let mut request = ApiRequest::get(URLS)
                .with_query("offset", offset.to_string())
                .with_query("limit", len.to_string());
            for (k, v) in query {
                request = request.with_query(k.clone(), v.clone());
            }
            self.call_batch(request)
        };

        let mut responses = Vec::new();
        let mut cursor = params.offset;
        let mut round = 0;
        let outcome = async {
            while cursor < end {
                let windows: Vec<(usize, usize)> =
                    page_windows(cursor, end, config.batch_limit)
                        .take(config.parallel_streams)
                        .collect();
                let covered: usize = windows.iter().map(|(_, len)| len).sum();
                debug!(round, cursor, covered, "page round");

                let batches = windows.iter().map(|w| vec![*w]).collect();
                let round_responses = executor.execute_round(round, batches, &callback).await?;
                let exhausted = windows.iter().zip(&round_responses).any(|((_, len), resp)| {
                    resp.collection(URLS).map_or(0, <[_]>::len) < *len
                });
                responses.extend(round_responses);
                cursor += covered;
                round += 1;
                if exhausted {
                    debug!(round, cursor, "short page, stopping");
                    break;
                }
            }
            Ok::<(), Error>(())
        }
        .await;

        Ok(match outcome {
            Ok(()) => {
                let items = aggregator.flatten(&responses);
                let page = aggregator.merge_pages(&responses, params.offset as u64, items.len());
                AggregatedResponse::success(Some(URLS), items, aggregator.meta()).with_page(page)
            }
            Err(e) => aggregator.failure(&e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let params = PageParams::new()
            .with_limit(90)
            .with_offset(30)
            .with_query("order_by", "clicks");
        assert_eq!(params.limit, Some(90));
        assert_eq!(params.offset, 30);
        assert_eq!(params.query, vec![("order_by".to_string(), "clicks".to_string())]);
    }

    #[test]
    fn windows_cover_range_with_short_tail() {
        let windows: Vec<_> = page_windows(10, 80, 30).collect();
        assert_eq!(windows, vec![(10, 30), (40, 30), (70, 10)]);
        assert_eq!(page_windows(5, 5, 30).count(), 0);
    }

    #[test]
    fn windows_are_lazy_over_huge_ranges() {
        let first: Vec<_> = page_windows(0, usize::MAX, 30).take(2).collect();
        assert_eq!(first, vec![(0, 30), (30, 30)]);
    }
}
