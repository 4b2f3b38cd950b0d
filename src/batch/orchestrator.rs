//! Round loop.

use super::aggregate::ResultAggregator;
use super::config::BatchConfig;
use super::executor::RoundExecutor;
use super::partition;
use crate::types::{AggregatedResponse, BatchResponse};
use crate::Result;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

/// Drives one item collection through as many rounds as it takes.
///
/// The orchestrator holds only its immutable [`BatchConfig`]; each call owns its
/// own cursor and accumulation buffer, so one orchestrator can serve concurrent
/// calls.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    config: BatchConfig,
}

impl BatchOrchestrator {
    /// Fails with `Error::Configuration` when the limits are unusable.
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run every round and return the raw per-batch responses in
    /// round-then-batch order.
    ///
    /// The next round is only partitioned after the current one has fully
    /// resolved. The first failing round aborts the whole call.
    pub async fn execute<T, F, Fut>(&self, items: &[T], callback: F) -> Result<Vec<BatchResponse>>
    where
        T: Clone,
        F: Fn(Vec<T>) -> Fut,
        Fut: Future<Output = Result<BatchResponse>>,
    {
        let executor = RoundExecutor::new(&self.config);
        let mut responses = Vec::new();
        let mut cursor = 0;
        let mut round = 0;

        while cursor < items.len() {
            let batches: Vec<Vec<T>> = partition::next_round(
                &items[cursor..],
                self.config.batch_limit,
                self.config.parallel_streams,
            )
            .into_iter()
            .map(<[T]>::to_vec)
            .collect();
            let covered: usize = batches.iter().map(Vec::len).sum();
            debug!(
                round,
                cursor,
                covered,
                remaining = items.len() - cursor,
                "partitioned round"
            );

            let round_responses = executor.execute_round(round, batches, &callback).await?;
            responses.extend(round_responses);
            cursor += covered;
            round += 1;
        }

        Ok(responses)
    }

    /// Run every round and merge the `result_key` collection of each batch into
    /// one [`AggregatedResponse`].
    ///
    /// Runtime failures (failed batch, version mismatch) are reported in the
    /// response's `error` field with no collection. `request_time` covers the
    /// whole call.
    pub async fn run<T, F, Fut>(
        &self,
        items: &[T],
        callback: F,
        result_key: Option<&str>,
    ) -> Result<AggregatedResponse>
    where
        T: Clone,
        F: Fn(Vec<T>) -> Fut,
        Fut: Future<Output = Result<BatchResponse>>,
    {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("tinycc_batch_run", run_id = %run_id, items = items.len());
        let aggregator = ResultAggregator::new(result_key, Instant::now());

        let response = async move {
            let response = match self.execute(items, callback).await {
                Ok(responses) => aggregator.success(&responses),
                Err(e) => aggregator.failure(&e),
            };
            info!(
                success = response.is_success(),
                results = response.items().len(),
                error_code = response.error.code,
                request_time = response.meta.request_time,
                "tinycc batch run finished"
            );
            response
        }
        .instrument(span)
        .await;
        Ok(response)
    }
}

/// Validate `config`, then run `items` through a fresh orchestrator.
///
/// Configuration errors surface as `Err` before any callback is invoked.
pub async fn run_batched<T, F, Fut>(
    items: &[T],
    callback: F,
    result_key: Option<&str>,
    config: &BatchConfig,
) -> Result<AggregatedResponse>
where
    T: Clone,
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<BatchResponse>>,
{
    BatchOrchestrator::new(config.clone())?
        .run(items, callback, result_key)
        .await
}
