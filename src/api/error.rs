//! Errors from talking to the hospital API.

/// Transport, status and decoding failures. Business rejections
/// (e.g. a full slot) are not errors; they come back in the response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot connect to hospital API at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP client error: {0}")]
    Http(String),
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response body: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::Connection(_) | ApiError::Timeout(_) | ApiError::Http(_)
        )
    }
}
