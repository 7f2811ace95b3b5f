use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network failure, timeout, or TLS error from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// A single record lacks a field required for display. Such records are
    /// dropped from the catalog rather than failing the fetch.
    #[error("product #{index} is missing {field}")]
    MissingField { index: usize, field: &'static str },
}
