use std::time::Duration;

use async_trait::async_trait;

use super::{QuoteStore, StoreError};

/// Store used when caching is disabled: every read misses, every write is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuoteStore for NullStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_misses() {
        let store = NullStore::new();
        store
            .set("symbol:IBM", "{}", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get("symbol:IBM").await.unwrap(), None);
    }
}
