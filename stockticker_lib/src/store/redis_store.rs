//! Networked store backed by Redis.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;

use super::{QuoteStore, StoreError};

/// Redis-backed store sharing one multiplexed connection across requests.
///
/// The connection manager reconnects on its own after a dropped connection.
/// Each call clones the handle out of the lock; `close` drops it, after which
/// every call fails with [`StoreError::Closed`].
pub struct RedisStore {
    conn: RwLock<Option<ConnectionManager>>,
    addr: String,
}

impl RedisStore {
    /// Connects to `host:port` and pings the server. Fails if Redis is unreachable.
    pub async fn connect(host: &str, port: u16) -> Result<Self, StoreError> {
        let addr = format!("redis://{}:{}/", host, port);
        let client = redis::Client::open(addr.as_str())?;
        let mut conn = ConnectionManager::new(client).await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        tracing::info!("Connected to Redis at {}:{}", host, port);
        Ok(Self {
            conn: RwLock::new(Some(conn)),
            addr,
        })
    }

    /// Connection URL of the backing server.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        self.conn.read().await.clone().ok_or(StoreError::Closed)
    }
}

#[async_trait]
impl QuoteStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl_seconds(ttl)).await?;
        Ok(())
    }

    async fn close(&self) {
        if self.conn.write().await.take().is_some() {
            tracing::debug!("Released Redis connection to {}", self.addr);
        }
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// `SET ... EX` takes whole seconds; round up and never go below one.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}
