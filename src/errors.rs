use thiserror::Error;

/// All errors that can occur when using the Video Indexer SDK.
#[derive(Error, Debug)]
pub enum VideoIndexerError {
    /// The access-token endpoint rejected the subscription key, or no
    /// credentials were available at build time.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The requested video or account was not found (HTTP 404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The request was rate-limited (HTTP 429).
    #[error("rate limited (retry after {retry_after:?}s): {message}")]
    RateLimit {
        message: String,
        retry_after: Option<f64>,
    },

    /// A non-specific API error with the HTTP status code and response body.
    #[error("API error {status_code}: {message}")]
    Api {
        status_code: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// A transport-level HTTP error from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O error, typically from reading the local video file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Polling for video processing exceeded the configured timeout.
    #[error("poll timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The remote analysis reached the terminal Failed state.
    #[error("video processing failed: {0}")]
    ProcessingFailed(String),
}

/// A convenience alias for `Result<T, VideoIndexerError>`.
pub type Result<T> = std::result::Result<T, VideoIndexerError>;
