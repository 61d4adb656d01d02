use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the league API. None of these are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("incorrect username or password")]
    BadCredentials,

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
