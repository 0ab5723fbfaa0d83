//! Library layer for stockticker: quote store, market data seam, and the
//! stock workflow controller.
//!
//! Wraps the `alphavantage_api` client with a write-through cache keyed by
//! symbol and derives the per-request view (last N days and their mean close).

pub mod controller;
pub mod error;
pub mod market;
pub mod metrics;
pub mod store;

pub use alphavantage_api;
pub use alphavantage_api::types;

pub use controller::{
    average_close, build_view, cache_key, cache_ttl, StockController, StockView,
    DEFAULT_CACHE_TIMEOUT,
};
pub use error::StockError;
pub use market::MarketDataClient;
pub use metrics::{MetricsSnapshot, OperationSnapshot, StockMetrics};
pub use store::{MemoryStore, NullStore, QuoteStore, RedisStore, StoreError};
