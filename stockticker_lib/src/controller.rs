//! Stock workflow: cache lookup, upstream fetch on a miss, write-through,
//! truncation to the configured number of days, and averaging.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alphavantage_api::types::{DayData, SortOrder, Stock};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tokio::time::{timeout_at, Instant};

use crate::error::StockError;
use crate::market::MarketDataClient;
use crate::metrics::StockMetrics;
use crate::store::{QuoteStore, StoreError};

/// Deadline for all cache operations of one request, counted from its start.
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(15);

/// Fallback TTL when the next refresh instant does not exist locally.
const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Per-request result handed to the view layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StockView {
    pub days_requested: usize,
    pub days_returned: usize,
    pub daily_data: Vec<DayData>,
    /// Mean close over `daily_data`; `None` when no days are available.
    pub average_close: Option<f64>,
}

/// Serves the daily series of one configured symbol.
///
/// Holds only fixed configuration and shared handles, so one instance serves
/// concurrent requests.
pub struct StockController {
    client: Arc<dyn MarketDataClient>,
    store: Arc<dyn QuoteStore>,
    symbol: String,
    num_days: usize,
    cache_timeout: Duration,
    metrics: Arc<StockMetrics>,
}

impl StockController {
    pub fn new(
        client: Arc<dyn MarketDataClient>,
        store: Arc<dyn QuoteStore>,
        symbol: impl Into<String>,
        num_days: usize,
    ) -> Self {
        Self {
            client,
            store,
            symbol: symbol.into(),
            num_days,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            metrics: Arc::new(StockMetrics::new()),
        }
    }

    /// Overrides the cache deadline.
    pub fn with_cache_timeout(mut self, cache_timeout: Duration) -> Self {
        self.cache_timeout = cache_timeout;
        self
    }

    /// Records into shared counters instead of private ones.
    pub fn with_metrics(mut self, metrics: Arc<StockMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    pub fn metrics(&self) -> &Arc<StockMetrics> {
        &self.metrics
    }

    /// Runs the workflow for one request.
    ///
    /// Cache failures are logged and treated as a miss (read) or ignored
    /// (write). An upstream failure or an undecodable cached payload fails
    /// the request.
    pub async fn stock(&self) -> Result<StockView, StockError> {
        let key = cache_key(&self.symbol);
        let cache_deadline = Instant::now() + self.cache_timeout;

        let read = self.cached_payload(&key, cache_deadline).await;
        let cache_healthy = read.is_ok();
        let cached = read.unwrap_or_else(|e| {
            tracing::warn!("Failed to get stock from cache: {}", e);
            None
        });

        let stock = match cached {
            Some(payload) => {
                let stock =
                    serde_json::from_str::<Stock>(&payload).map_err(StockError::CorruptCache)?;
                tracing::debug!("Response cached ({} days)", stock.len());
                stock
            }
            None => {
                tracing::debug!("Response not cached");
                let stock = self.fetch().await?;
                if cache_healthy {
                    let ttl = cache_ttl(&Local::now());
                    tracing::debug!("Caching response with TTL: {:?}", ttl);
                    if let Err(e) = self.cache_stock(&key, &stock, ttl, cache_deadline).await {
                        tracing::warn!("Failed to cache stock: {}", e);
                    }
                }
                stock
            }
        };

        if stock.is_empty() {
            tracing::warn!("No daily data available for {}", self.symbol);
        }
        let view = build_view(stock.daily_data, self.num_days);
        tracing::debug!(
            "Returning {} of {} requested days",
            view.days_returned,
            view.days_requested
        );
        Ok(view)
    }

    async fn fetch(&self) -> Result<Stock, StockError> {
        let started = Instant::now();
        let result = self
            .client
            .daily_series(&self.symbol, SortOrder::Ascending)
            .await;
        self.metrics
            .client_daily
            .record(started.elapsed(), result.is_ok());
        Ok(result?)
    }

    /// Reads the raw cached payload. An empty value counts as a miss.
    async fn cached_payload(
        &self,
        key: &str,
        deadline: Instant,
    ) -> Result<Option<String>, StoreError> {
        let started = Instant::now();
        let result = self.bounded(deadline, self.store.get(key)).await;
        self.metrics
            .cache_read
            .record(started.elapsed(), result.is_ok());
        Ok(result?.filter(|payload| !payload.is_empty()))
    }

    async fn cache_stock(
        &self,
        key: &str,
        stock: &Stock,
        ttl: Duration,
        deadline: Instant,
    ) -> Result<(), StockError> {
        let payload = serde_json::to_string(stock).map_err(StockError::Serialization)?;
        let started = Instant::now();
        let result = self
            .bounded(deadline, self.store.set(key, &payload, ttl))
            .await;
        self.metrics
            .cache_write
            .record(started.elapsed(), result.is_ok());
        Ok(result?)
    }

    async fn bounded<T>(
        &self,
        deadline: Instant,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        timeout_at(deadline, op)
            .await
            .unwrap_or(Err(StoreError::Timeout(self.cache_timeout)))
    }
}

/// Cache key for a symbol's daily series.
pub fn cache_key(symbol: &str) -> String {
    format!("symbol:{}", symbol)
}

/// Time from `now` until 00:05 on the following calendar day in `now`'s zone.
///
/// An ambiguous local time resolves to its earliest instant; a local time
/// that does not exist falls back to 24 hours.
pub fn cache_ttl<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let refresh = now
        .date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 5, 0))
        .and_then(|local| now.timezone().from_local_datetime(&local).earliest());
    match refresh {
        Some(at) => at
            .signed_duration_since(now.clone())
            .to_std()
            .unwrap_or(ONE_DAY),
        None => ONE_DAY,
    }
}

/// Arithmetic mean of the closes, or `None` for an empty slice.
pub fn average_close(daily_data: &[DayData]) -> Option<f64> {
    if daily_data.is_empty() {
        return None;
    }
    let total: f64 = daily_data.iter().map(|d| d.close).sum();
    Some(total / daily_data.len() as f64)
}

/// Keeps the first `min(num_days, len)` entries, in their existing order,
/// and averages over exactly those.
pub fn build_view(mut daily_data: Vec<DayData>, num_days: usize) -> StockView {
    let days_returned = num_days.min(daily_data.len());
    daily_data.truncate(days_returned);
    let average_close = average_close(&daily_data);
    StockView {
        days_requested: num_days,
        days_returned,
        daily_data,
        average_close,
    }
}
