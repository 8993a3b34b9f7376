//! Error types for the Collection API client

/// Result type alias for Collection API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Collection API client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// API returned a non-success status
    #[error("API returned error status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The department has no object identifiers
    #[error("Collection index for department {0} is empty")]
    EmptyIndex(u32),
}

impl Error {
    /// True when the server answered 404 for the requested object
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}
