//! Error types for the library layer.

use std::fmt;

use crate::store::StoreError;

/// Errors produced by the stock workflow.
///
/// Only `Fetch` and `CorruptCache` end a request; cache failures are logged
/// and recovered by the controller.
#[derive(Debug)]
pub enum StockError {
    /// The upstream API call failed.
    Fetch(alphavantage_api::Error),
    /// A cached payload could not be deserialized.
    CorruptCache(serde_json::Error),
    /// A fetched series could not be serialized for caching.
    Serialization(serde_json::Error),
    /// A cache read or write failed.
    Cache(StoreError),
}

impl fmt::Display for StockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Stock client error: {}", e),
            Self::CorruptCache(e) => write!(f, "Corrupt cached stock data: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Cache(e) => write!(f, "Cache error: {}", e),
        }
    }
}

impl std::error::Error for StockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::CorruptCache(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Cache(e) => Some(e),
        }
    }
}

impl From<alphavantage_api::Error> for StockError {
    fn from(e: alphavantage_api::Error) -> Self {
        Self::Fetch(e)
    }
}

impl From<StoreError> for StockError {
    fn from(e: StoreError) -> Self {
        Self::Cache(e)
    }
}
