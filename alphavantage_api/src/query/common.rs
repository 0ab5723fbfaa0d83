//! Shared query infrastructure: the [`Query`] trait and [`OutputSize`].

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by query builders for the `/query` endpoint.
pub trait Query {
    /// Value of the `function` parameter, e.g. `TIME_SERIES_DAILY`.
    fn function(&self) -> &'static str;

    /// Appends parameters other than `function` to the URL.
    fn add_params(&self, url: &mut Url);

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("function", self.function());
        self.add_params(&mut url);
        url
    }
}

/// How much history a series request returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// The latest 100 data points.
    Compact,
    /// The full available history. This is the default.
    #[default]
    Full,
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSize::Compact => write!(f, "compact"),
            OutputSize::Full => write!(f, "full"),
        }
    }
}

impl FromStr for OutputSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(OutputSize::Compact),
            "full" => Ok(OutputSize::Full),
            _ => Err(()),
        }
    }
}
