//! Round executor.

use super::config::BatchConfig;
use crate::types::BatchResponse;
use crate::{Error, ErrorContext, Result};
use futures::future::join_all;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs one round of batches concurrently and validates the combined outcome.
pub struct RoundExecutor<'a> {
    config: &'a BatchConfig,
}

impl<'a> RoundExecutor<'a> {
    pub fn new(config: &'a BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        self.config
    }

    /// Invoke `callback` once per batch, wait for every invocation, then validate.
    ///
    /// Results come back in batch order regardless of completion order. The first
    /// failed batch (in batch order) fails the round with its error unchanged.
    pub async fn execute_round<T, F, Fut>(
        &self,
        round: usize,
        batches: Vec<Vec<T>>,
        callback: &F,
    ) -> Result<Vec<BatchResponse>>
    where
        F: Fn(Vec<T>) -> Fut,
        Fut: Future<Output = Result<BatchResponse>>,
    {
        if batches.len() > self.config.parallel_streams {
            return Err(Error::configuration_with_context(
                "round holds more batches than parallel_streams allows",
                ErrorContext::new()
                    .with_details(format!(
                        "batches: {}, parallel_streams: {}",
                        batches.len(),
                        self.config.parallel_streams
                    ))
                    .with_source("round_executor"),
            ));
        }

        let start = Instant::now();
        let count = batches.len();
        debug!(round, batches = count, "round in flight");

        let outcomes = join_all(batches.into_iter().map(|batch| callback(batch))).await;

        let mut responses = Vec::with_capacity(count);
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(resp) => responses.push(resp),
                Err(e) => {
                    info!(
                        round,
                        batch = index,
                        error = %e,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "tinycc batch round failed"
                    );
                    return Err(e);
                }
            }
        }

        self.check_versions(round, &responses)?;

        debug!(
            round,
            batches = count,
            duration_ms = start.elapsed().as_millis() as u64,
            "round succeeded"
        );
        Ok(responses)
    }

    /// Every batch must report the expected protocol version.
    fn check_versions(&self, round: usize, responses: &[BatchResponse]) -> Result<()> {
        let expected = self.config.expected_version.as_str();
        if let Some((index, resp)) = responses
            .iter()
            .enumerate()
            .find(|(_, r)| r.version != expected)
        {
            warn!(
                round,
                batch = index,
                client_version = expected,
                api_version = resp.version.as_str(),
                "protocol version mismatch"
            );
            return Err(Error::version_mismatch(expected, resp.version.clone()));
        }
        Ok(())
    }
}
