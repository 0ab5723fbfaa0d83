use alphavantage_api::{DailySeriesQuery, OutputSize, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/query").unwrap()
}

#[test]
fn daily_query_defaults_to_full_history() {
    let url = DailySeriesQuery::new("MSFT").add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("function=TIME_SERIES_DAILY"));
    assert!(query.contains("symbol=MSFT"));
    assert!(query.contains("outputsize=full"));
}

#[test]
fn daily_query_compact() {
    let url = DailySeriesQuery::new("MSFT")
        .with_output_size(OutputSize::Compact)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("outputsize=compact"));
}

#[test]
fn daily_query_escapes_symbol() {
    let url = DailySeriesQuery::new("SIX2.DEX&x=1").add_to_url(&base_url());
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("symbol".to_string(), "SIX2.DEX&x=1".to_string())));
}

#[test]
fn output_size_parses() {
    assert_eq!("full".parse::<OutputSize>(), Ok(OutputSize::Full));
    assert_eq!("compact".parse::<OutputSize>(), Ok(OutputSize::Compact));
    assert!("huge".parse::<OutputSize>().is_err());
}
