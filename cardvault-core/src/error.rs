use thiserror::Error;

/// Errors surfaced by the catalog transport and fetch pipeline.
///
/// These are non-fatal from the user's point of view: the fetcher turns
/// them into an inline error message, and changing the query retries
/// implicitly.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("Could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
