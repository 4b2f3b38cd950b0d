//! 批量编排模块：将任意规模的条目集合拆分为有界批次并以受限并发执行。
//!
//! # Batch Orchestration Module
//!
//! The tiny.cc API accepts at most a small, fixed number of items per call and
//! tolerates a fixed number of parallel calls. This module lets callers work
//! with collections of any size anyway.
//!
//! ## Overview
//!
//! One orchestration call:
//! - splits the items into batches of at most `batch_limit` items
//! - groups up to `parallel_streams` batches into a round and runs them concurrently
//! - waits for the whole round, validates it, then moves on to the remainder
//! - merges every batch's named collection into one ordered response
//!
//! Any failed batch, or any batch reporting an unexpected protocol version, fails
//! the entire call. There are no retries and no partial results.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`BatchConfig`] | Immutable limits and expected protocol version |
//! | [`partition`] | Pure round partitioning and planning |
//! | [`RoundExecutor`] | Fan-out/fan-in execution of one round |
//! | [`ResultAggregator`] | Flattening and timing of the final response |
//! | [`BatchOrchestrator`] | Round loop tying the pieces together |
//!
//! ## Example
//!
//! ```rust
//! use tinycc_client::batch::{BatchConfig, BatchOrchestrator};
//! use tinycc_client::types::BatchResponse;
//!
//! # tokio_test::block_on(async {
//! let orchestrator = BatchOrchestrator::new(BatchConfig::new().with_batch_limit(2))?;
//! let items: Vec<u32> = (1..=5).collect();
//!
//! let response = orchestrator
//!     .run(&items, |batch: Vec<u32>| async move {
//!         let echoed = batch.into_iter().map(serde_json::Value::from).collect();
//!         Ok::<_, tinycc_client::Error>(
//!             BatchResponse {
//!                 version: "3.1".into(),
//!                 ..Default::default()
//!             }
//!             .with_collection("urls", echoed),
//!         )
//!     }, Some("urls"))
//!     .await?;
//!
//! assert!(response.is_success());
//! assert_eq!(response.items().len(), 5);
//! # Ok::<(), tinycc_client::Error>(())
//! # }).unwrap();
//! ```

mod aggregate;
mod config;
mod executor;
mod orchestrator;
pub mod partition;

pub use aggregate::ResultAggregator;
pub use config::{BatchConfig, DEFAULT_API_VERSION, DEFAULT_BATCH_LIMIT, DEFAULT_PARALLEL_STREAMS};
pub use executor::RoundExecutor;
pub use orchestrator::{run_batched, BatchOrchestrator};
