//! Daily price series types shared by the client and its consumers.
//!
//! `Stock` doubles as the cache wire format: its serde shape is
//! `{"DailyData":[{"Date":"2019-09-20T00:00:00Z","Close":90.35}]}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sort order applied to a fetched daily series.
///
/// The labels are inverted relative to chronology: `Ascending` puts the most
/// recent date first, `Descending` puts the oldest date first. Consumers
/// depend on this pairing, so it is kept as is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest date first.
    #[default]
    Ascending,
    /// Oldest date first.
    Descending,
}

/// Closing price of one trading day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayData {
    /// Trading day.
    #[serde(rename = "Date", with = "wire_date")]
    pub date: NaiveDate,

    /// Closing price.
    #[serde(rename = "Close")]
    pub close: f64,
}

impl DayData {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily series for one symbol, in caller-specified order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "DailyData")]
    pub daily_data: Vec<DayData>,
}

impl Stock {
    pub fn new(daily_data: Vec<DayData>) -> Self {
        Self { daily_data }
    }

    pub fn len(&self) -> usize {
        self.daily_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily_data.is_empty()
    }
}

/// Writes dates as midnight-UTC RFC 3339 timestamps. Reads either an RFC 3339
/// timestamp (keeping its calendar date) or a bare `YYYY-MM-DD`.
mod wire_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.date_naive());
        }
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}
