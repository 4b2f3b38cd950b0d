//! 类型系统模块：定义 tiny.cc API v3 的核心数据类型。
//!
//! # Types Module
//!
//! Strongly-typed representations of the payloads exchanged with the tiny.cc
//! REST API and of the aggregated results produced by the batch orchestrator.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ApiError`] | Structured `{code, message, details}` error payload |
//! | [`BatchResponse`] | Parsed success payload of one batch call |
//! | [`AggregatedResponse`] | Merged result of one orchestration call |
//! | [`Selection`] | Explicit hashes-or-tags target of an operation |
//! | [`UrlRecord`] | Typed view of one URL entry |
//!
//! ## Example
//!
//! ```rust
//! use tinycc_client::types::{ApiError, Selection};
//!
//! let selection = Selection::hashes(["abc", "def"]);
//! assert_eq!(selection.len(), 2);
//! assert!(ApiError::empty().is_empty());
//! ```

pub mod api;
pub mod response;
pub mod selection;
pub mod url;

pub use api::{ApiError, Page, ResponseMeta};
pub use response::{AggregatedResponse, BatchResponse};
pub use selection::Selection;
pub use url::UrlRecord;
