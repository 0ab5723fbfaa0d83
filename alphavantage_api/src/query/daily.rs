//! Query builder for the `TIME_SERIES_DAILY` function.

use url::Url;

use super::common::{OutputSize, Query};

/// Daily series request for one symbol.
#[derive(Clone, Debug)]
pub struct DailySeriesQuery {
    pub symbol: String,
    pub output_size: OutputSize,
}

impl DailySeriesQuery {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            output_size: OutputSize::default(),
        }
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }
}

impl Query for DailySeriesQuery {
    fn function(&self) -> &'static str {
        "TIME_SERIES_DAILY"
    }

    fn add_params(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("symbol", &self.symbol)
            .append_pair("outputsize", &self.output_size.to_string());
    }
}
