//! Seam between the controller and the upstream market data API.

use alphavantage_api::types::{SortOrder, Stock};
use async_trait::async_trait;

/// Source of daily price series.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches the full daily history of `symbol`, sorted by `order`.
    async fn daily_series(
        &self,
        symbol: &str,
        order: SortOrder,
    ) -> Result<Stock, alphavantage_api::Error>;
}

#[async_trait]
impl MarketDataClient for alphavantage_api::Client {
    async fn daily_series(
        &self,
        symbol: &str,
        order: SortOrder,
    ) -> Result<Stock, alphavantage_api::Error> {
        alphavantage_api::Client::daily_series(self, symbol, order).await
    }
}
