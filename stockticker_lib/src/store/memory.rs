//! In-memory TTL store backed by `DashMap` for concurrent access.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{QuoteStore, StoreError};

/// A single cached value with its expiration time.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe in-memory store with per-entry expiration.
///
/// Expired entries are lazily evicted on the next `get` for that key.
#[derive(Default)]
pub struct MemoryStore {
    store: DashMap<String, CacheEntry>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live value for `key`, or `None` if missing or expired.
    pub fn get_entry(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites an entry that expires after `ttl`.
    pub fn set_entry(&self, key: String, value: String, ttl: Duration) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.store.clear();
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.ensure_open()?;
        Ok(self.get_entry(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.set_entry(key.to_string(), value.to_string(), ttl);
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.clear();
    }
}
