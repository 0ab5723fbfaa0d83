//! Error types for the API client.

/// Errors that can occur when fetching a daily series.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
    /// The request URL could not be built from the base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    /// The request could not be sent or timed out.
    #[error("Request failed")]
    RequestFailed(#[source] reqwest::Error),
    /// The response body could not be read.
    #[error("Reading response failed")]
    ReadBody(#[source] reqwest::Error),
    /// The API returned a status other than 200, with a body snippet.
    #[error("Unexpected status code: expected 200, got {status}")]
    HttpStatus { status: u16, body: String },
    /// The API answered with an error or notice instead of data.
    #[error("Failed to get stock data: {0}")]
    Upstream(String),
    /// A series key was not a `YYYY-MM-DD` date.
    #[error("Failed to parse date '{date}' from response JSON")]
    InvalidDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
    /// The body was not JSON or did not have the expected shape.
    #[error("Failed to parse response")]
    Parse(#[from] serde_json::Error),
}
