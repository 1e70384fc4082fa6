//! Airport lookup error types.

/// Errors that can occur when resolving airport countries.
#[derive(Debug, thiserror::Error)]
pub enum AirportError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site returned an error status
    #[error("lookup error {status}: {message}")]
    Api { status: u16, message: String },

    /// The cache file could not be written
    #[error("failed to write cache {path}: {source}")]
    CacheWrite {
        path: String,
        source: std::io::Error,
    },

    /// The cached table could not be encoded
    #[error("failed to encode cache: {0}")]
    CacheEncode(#[from] serde_json::Error),
}
