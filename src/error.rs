use thiserror::Error;

/// Failures of a single call to the search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid backend base address {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! Status: {status}")]
    Status { status: u16 },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// The HTTP status that caused the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Status { status } => Some(*status),
            SearchError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
