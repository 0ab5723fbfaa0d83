//! Response envelopes returned by the `TIME_SERIES_DAILY` function.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Top-level key holding the daily bars.
pub const TIME_SERIES_KEY: &str = "Time Series (Daily)";

/// Error and notice fields Alpha Vantage returns in place of data.
///
/// `Error Message` is sent for invalid calls (bad symbol, bad key). `Note` and
/// `Information` carry rate-limit and premium-endpoint notices.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,

    #[serde(rename = "Note")]
    pub note: Option<String>,

    #[serde(rename = "Information")]
    pub information: Option<String>,
}

/// Successful daily series response. Bars are keyed by `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct DailySeriesEnvelope {
    #[serde(rename = "Meta Data", default)]
    pub meta_data: Option<MetaData>,

    #[serde(rename = "Time Series (Daily)")]
    pub time_series: HashMap<String, DailyBar>,
}

/// Descriptive header of a series response.
#[derive(Debug, Default, Deserialize)]
pub struct MetaData {
    #[serde(rename = "2. Symbol", default)]
    pub symbol: Option<String>,

    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: Option<String>,

    #[serde(rename = "5. Time Zone", default)]
    pub time_zone: Option<String>,
}

/// One day's bar. Only the close is read; open/high/low/volume are ignored.
#[derive(Debug, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "4. close", deserialize_with = "decimal_string")]
    pub close: f64,
}

/// Prices are sent as JSON strings holding a decimal, e.g. `"90.3500"`.
/// `NaN` and infinities are rejected; they cannot be written back as JSON numbers.
fn decimal_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let value = s.trim().parse::<f64>().map_err(serde::de::Error::custom)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "close price is not a finite number: {}",
            s
        )));
    }
    Ok(value)
}
