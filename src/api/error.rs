use thiserror::Error;

/// Errors that can occur while fetching a page.
///
/// Every variant except `Cancelled` becomes a user-visible failure message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connectivity failure (DNS, refused connection, timeout, truncated body).
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-2xx status.
    #[error("API error (HTTP {status}): {message}")]
    Protocol { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("could not read response: {0}")]
    Decode(String),
    /// The load was superseded by a newer one. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
