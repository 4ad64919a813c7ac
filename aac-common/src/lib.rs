//! # AAC Common Library
//!
//! Shared code for the AAC board service:
//! - Error types
//! - Configuration loading and data directory resolution
//! - Concurrency-safe caches used by the content-resolution pipeline

pub mod cache;
pub mod config;
pub mod error;

pub use cache::ShardedCache;
pub use error::{Error, Result};

/// Normalize a concept or search term for cache keys and matching:
/// trimmed, lowercased. Display strings keep their original casing.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
