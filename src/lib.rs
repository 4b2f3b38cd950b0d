//! # tinycc-client
//!
//! 这是 tiny.cc REST API v3 的异步 Rust 客户端，核心是有界并发的批量编排器。
//!
//! Async client for the tiny.cc REST API v3, built around a bounded-concurrency
//! batch orchestrator.
//!
//! ## Overview
//!
//! The API accepts only a small number of items per call and a fixed number of
//! parallel calls. This crate lets callers shorten, read, edit, delete and reset
//! statistics for collections of any size: items are split into batches, batches
//! are grouped into rounds that run concurrently, and the results come back as one
//! ordered response.
//!
//! ## Core Guarantees
//!
//! - **Order**: output order equals input order, whatever order the network answers in
//! - **Bounded fan-out**: never more than `parallel_streams` calls in flight per operation
//! - **All-or-nothing**: one failed batch or protocol version mismatch fails the whole call
//! - **Pass-through errors**: remote `{code, message, details}` payloads reach the caller unchanged
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tinycc_client::{Selection, TinyccClient};
//!
//! #[tokio::main]
//! async fn main() -> tinycc_client::Result<()> {
//!     let client = TinyccClient::builder()
//!         .api_root_url("https://tinycc.com/tiny/api/3/")
//!         .username("demo")
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let long_urls = vec!["https://example.com/a".to_string()];
//!     let shortened = client.mass_shorten(&long_urls, None).await?;
//!     println!("{}", serde_json::to_string_pretty(&shortened)?);
//!
//!     let deleted = client.delete(&Selection::hashes(["abc"])).await?;
//!     assert!(deleted.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Partitioning, round execution and aggregation |
//! | [`client`] | Client, builder and selection-based operations |
//! | [`config`] | YAML/environment configuration |
//! | [`transport`] | Transport trait and `reqwest` implementation |
//! | [`types`] | Wire payloads, aggregated responses, selections |

pub mod batch;
pub mod client;
pub mod config;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use batch::{run_batched, BatchConfig, BatchOrchestrator};
pub use client::{PageParams, TinyccClient, TinyccClientBuilder};
pub use config::{ClientConfig, HttpConfig};
pub use transport::{ApiRequest, HttpTransport, Transport};
pub use types::{AggregatedResponse, ApiError, BatchResponse, Selection, UrlRecord};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
