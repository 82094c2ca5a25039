//! Client error types.

use thiserror::Error;

/// Errors returned by [`crate::CheckoutClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Transport failure or an undecodable response body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status. `code` is the server's
    /// machine-readable code when the body carried one.
    #[error("HTTP {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

impl ClientError {
    /// Status code of an [`ClientError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server error code of an [`ClientError::Api`] error.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for client calls.
pub type ClientResult<T> = Result<T, ClientError>;
