//! Error types for API requests and token storage

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Token storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    /// Authorization failed and could not be refreshed; the session was logged out
    #[error("Unauthorized: session expired")]
    Unauthorized,

    #[error("Invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
