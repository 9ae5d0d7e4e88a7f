use thiserror::Error;

/// Failure of a single page query against the store.
///
/// The `Display` output is what the catalogue shows in its error banner, so
/// [`StoreError::Query`] renders the store's own message verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// `PostgREST` rejected the query and explained why.
    #[error("{message}")]
    Query {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid store URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
