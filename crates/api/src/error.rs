//! Backend API error type.

/// Result alias for backend API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by the backend client.
///
/// Every failure is scoped to the single user action that triggered the
/// call; nothing here is retried automatically or treated as fatal.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request did not complete within the configured timeout
    #[error("backend did not respond in time")]
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS, ...)
    #[error("backend request failed: {0}")]
    Http(reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Backend-provided detail, or the raw body
        message: String,
    },

    /// The response body could not be decoded
    #[error("malformed backend response: {0}")]
    Decode(reqwest::Error),
}

impl ApiError {
    /// Classify a transport error, splitting timeouts out for the user.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}
