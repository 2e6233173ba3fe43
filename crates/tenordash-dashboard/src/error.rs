use thiserror::Error;

/// Failures talking to a `tenordash-server`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("rankings request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered `success: false`.
    #[error("{0}")]
    Api(String),

    /// Non-2xx answer whose body was not a rankings envelope.
    #[error("{url} answered HTTP {status}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("could not decode {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
