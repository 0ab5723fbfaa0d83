//! Client for the Alpha Vantage `TIME_SERIES_DAILY` API.
//!
//! Fetches the daily history of a symbol, flattens it into `(date, close)`
//! pairs and sorts it. [`types::Stock`] is also the cache wire format.

mod client;
mod errors;
mod parse;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::parse::{parse_daily_series, sort_daily_data};
pub use self::query::{DailySeriesQuery, OutputSize, Query};
