//! Quote store: the key/value cache holding serialized daily series.
//!
//! Three variants implement [`QuoteStore`]: [`NullStore`] when caching is
//! disabled, [`MemoryStore`] for a single process, and [`RedisStore`] for a
//! shared networked cache.

mod memory;
mod null;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use self::memory::MemoryStore;
pub use self::null::NullStore;
pub use self::redis_store::RedisStore;

/// Errors from a quote store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cache backend error: {0}")]
    Backend(String),
    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("Cache store is closed")]
    Closed,
}

/// Key/value store with per-entry time-to-live.
///
/// A missing key is `Ok(None)`, never an error. Implementations must be safe
/// to share across concurrent requests.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Releases backend resources. Safe to call more than once.
    async fn close(&self) {}
}
