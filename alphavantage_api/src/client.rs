//! HTTP client for the Alpha Vantage query API.

use std::time::Duration;

use url::Url;

use crate::{
    parse::{parse_daily_series, sort_daily_data},
    query::{DailySeriesQuery, Query},
    types::{SortOrder, Stock},
    Error,
};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Request timeout for every API call, independent of any caller deadline.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 5;

/// HTTP client for the Alpha Vantage API.
///
/// Holds one pooled `reqwest::Client` and the account key, which is appended
/// to every request as `apikey`.
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: impl Into<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .build()
            .map_err(Error::ClientBuild)?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_url(&self, path: &str, query: &impl Query) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })?;
        let mut url = query.add_to_url(&url);
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<String, Error> {
        let resp = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("HTTP request failed: {}", e);
            Error::RequestFailed(e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::ReadBody(e)
        })?;

        if status != reqwest::StatusCode::OK {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Fetches the full daily history of `symbol`, sorted by `order`.
    pub async fn daily_series(&self, symbol: &str, order: SortOrder) -> Result<Stock, Error> {
        self.query_daily_series(&DailySeriesQuery::new(symbol), order)
            .await
    }

    /// Fetches a daily series described by `query`, sorted by `order`.
    pub async fn query_daily_series(
        &self,
        query: &DailySeriesQuery,
        order: SortOrder,
    ) -> Result<Stock, Error> {
        let url = self.get_url("/query", query)?;
        let body = self.get(url).await?;

        let mut daily_data = parse_daily_series(&body).map_err(|e| {
            tracing::error!("Failed to parse series for {}: {}", query.symbol, e);
            e
        })?;
        sort_daily_data(&mut daily_data, order);
        tracing::debug!("Fetched {} days for {}", daily_data.len(), query.symbol);

        Ok(Stock::new(daily_data))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
