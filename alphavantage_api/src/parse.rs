//! Turns a `TIME_SERIES_DAILY` response body into a flat, sorted series.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{DailySeriesEnvelope, DayData, ErrorEnvelope, SortOrder, TIME_SERIES_KEY};
use crate::Error;

/// Parses a response body into unsorted `DayData`.
///
/// An `Error Message` field fails the call with [`Error::Upstream`], as does a
/// `Note` or `Information` notice sent in place of the series. Every series key
/// must be a `YYYY-MM-DD` date; the first bad key fails the whole call.
pub fn parse_daily_series(body: &str) -> Result<Vec<DayData>, Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    let notices = ErrorEnvelope::deserialize(&value).unwrap_or_default();
    if let Some(message) = notices.error_message {
        return Err(Error::Upstream(message));
    }
    if value.get(TIME_SERIES_KEY).is_none() {
        if let Some(notice) = notices.note.or(notices.information) {
            return Err(Error::Upstream(notice));
        }
    }

    let envelope = DailySeriesEnvelope::deserialize(&value)?;
    if let Some(meta) = &envelope.meta_data {
        tracing::debug!(
            "Series for {} last refreshed {} ({})",
            meta.symbol.as_deref().unwrap_or("?"),
            meta.last_refreshed.as_deref().unwrap_or("?"),
            meta.time_zone.as_deref().unwrap_or("?"),
        );
    }

    envelope
        .time_series
        .into_iter()
        .map(|(date_str, bar)| {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|source| {
                Error::InvalidDate {
                    date: date_str.clone(),
                    source,
                }
            })?;
            Ok(DayData::new(date, bar.close))
        })
        .collect()
}

/// Sorts a series in place. See [`SortOrder`] for the direction each label maps to.
pub fn sort_daily_data(daily_data: &mut [DayData], order: SortOrder) {
    match order {
        SortOrder::Ascending => daily_data.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Descending => daily_data.sort_by(|a, b| a.date.cmp(&b.date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series() -> Vec<DayData> {
        vec![
            DayData::new(date(2019, 9, 13), 94.4),
            DayData::new(date(2019, 9, 20), 90.35),
            DayData::new(date(2019, 9, 16), 91.0),
        ]
    }

    #[test]
    fn ascending_label_sorts_newest_first() {
        let mut data = series();
        sort_daily_data(&mut data, SortOrder::Ascending);
        let dates: Vec<_> = data.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2019, 9, 20), date(2019, 9, 16), date(2019, 9, 13)]);
    }

    #[test]
    fn descending_label_sorts_oldest_first() {
        let mut data = series();
        sort_daily_data(&mut data, SortOrder::Descending);
        let dates: Vec<_> = data.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2019, 9, 13), date(2019, 9, 16), date(2019, 9, 20)]);
    }

    #[test]
    fn error_message_wins_over_everything() {
        let body = r#"{"Error Message": "Invalid API call."}"#;
        match parse_daily_series(body) {
            Err(Error::Upstream(msg)) => assert_eq!(msg, "Invalid API call."),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn null_error_message_is_ignored() {
        let body = r#"{"Error Message": null, "Time Series (Daily)": {}}"#;
        assert!(parse_daily_series(body).unwrap().is_empty());
    }

    #[test]
    fn rate_limit_note_is_upstream_error() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
        assert!(matches!(parse_daily_series(body), Err(Error::Upstream(_))));
    }

    #[test]
    fn information_notice_is_upstream_error() {
        let body = r#"{"Information": "This is a premium endpoint."}"#;
        assert!(matches!(parse_daily_series(body), Err(Error::Upstream(_))));
    }

    #[test]
    fn missing_series_is_parse_error() {
        assert!(matches!(parse_daily_series("{}"), Err(Error::Parse(_))));
    }

    #[test]
    fn non_json_is_parse_error() {
        assert!(matches!(parse_daily_series("INVALID_JSON"), Err(Error::Parse(_))));
    }

    #[test]
    fn bad_date_key_fails_the_call() {
        let body = r#"{"Time Series (Daily)": {
            "2019-09-20": {"4. close": "90.3500"},
            "20/09/2019": {"4. close": "94.4000"}
        }}"#;
        match parse_daily_series(body) {
            Err(Error::InvalidDate { date, .. }) => assert_eq!(date, "20/09/2019"),
            other => panic!("expected invalid date, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_close_is_parse_error() {
        let body = r#"{"Time Series (Daily)": {"2019-09-20": {"4. close": "n/a"}}}"#;
        assert!(matches!(parse_daily_series(body), Err(Error::Parse(_))));
    }

    #[test]
    fn non_finite_close_is_parse_error() {
        for close in ["NaN", "inf", "-Infinity"] {
            let body = format!(
                r#"{{"Time Series (Daily)": {{"2019-09-20": {{"4. close": "{}"}}}}}}"#,
                close
            );
            assert!(
                matches!(parse_daily_series(&body), Err(Error::Parse(_))),
                "{} should be rejected",
                close
            );
        }
    }

    #[test]
    fn close_strings_become_floats() {
        let body = r#"{"Time Series (Daily)": {"2019-09-20": {"1. open": "93.2500", "4. close": "90.3500", "5. volume": "199054"}}}"#;
        let data = parse_daily_series(body).unwrap();
        assert_eq!(data, vec![DayData::new(date(2019, 9, 20), 90.35)]);
    }
}
