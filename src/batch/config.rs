//! Batch orchestration limits.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};

/// Maximum items the API accepts per batch call.
pub const DEFAULT_BATCH_LIMIT: usize = 30;
/// Batches the API tolerates in flight at once.
pub const DEFAULT_PARALLEL_STREAMS: usize = 4;
/// Protocol version this client speaks.
pub const DEFAULT_API_VERSION: &str = "3.1";

/// Limits and expected protocol version for one orchestrator.
///
/// Built once, then only read. Clone it to derive a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub batch_limit: usize,
    pub parallel_streams: usize,
    pub expected_version: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_limit: DEFAULT_BATCH_LIMIT,
            parallel_streams: DEFAULT_PARALLEL_STREAMS,
            expected_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = limit;
        self
    }

    pub fn with_parallel_streams(mut self, streams: usize) -> Self {
        self.parallel_streams = streams;
        self
    }

    pub fn with_expected_version(mut self, version: impl Into<String>) -> Self {
        self.expected_version = version.into();
        self
    }

    /// Apply `TINYCC_BATCH_LIMIT`, `TINYCC_PARALLEL_STREAMS` and
    /// `TINYCC_API_VERSION` when they are set and parse.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_usize("TINYCC_BATCH_LIMIT") {
            self.batch_limit = v;
        }
        if let Some(v) = env_usize("TINYCC_PARALLEL_STREAMS") {
            self.parallel_streams = v;
        }
        if let Ok(v) = std::env::var("TINYCC_API_VERSION") {
            if !v.trim().is_empty() {
                self.expected_version = v.trim().to_string();
            }
        }
        self
    }

    /// Items one round can cover.
    pub fn round_capacity(&self) -> usize {
        self.batch_limit.saturating_mul(self.parallel_streams)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_limit == 0 {
            return Err(Error::configuration_with_context(
                "batch_limit must be greater than zero",
                ErrorContext::new()
                    .with_field_path("batch.batch_limit")
                    .with_source("batch_config"),
            ));
        }
        if self.parallel_streams == 0 {
            return Err(Error::configuration_with_context(
                "parallel_streams must be greater than zero",
                ErrorContext::new()
                    .with_field_path("batch.parallel_streams")
                    .with_source("batch_config"),
            ));
        }
        if self.expected_version.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "expected_version must not be empty",
                ErrorContext::new()
                    .with_field_path("batch.expected_version")
                    .with_source("batch_config"),
            ));
        }
        Ok(())
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<usize>().ok())
}
