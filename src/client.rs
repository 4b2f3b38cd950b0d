//! tiny.cc API client.
//!
//! Keep the public surface small and predictable. Every multi-item operation
//! goes through the batch orchestrator; implementation details are split into
//! submodules under `src/client/`.

pub mod builder;
pub mod core;
mod operations;
mod paging;

pub use builder::TinyccClientBuilder;
pub use core::TinyccClient;
pub use paging::PageParams;
