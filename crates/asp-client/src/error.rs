//! Client error types.

use thiserror::Error;

/// Errors from talking to the Aspirant backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 401 from the backend. The session is not cleared automatically.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The response parsed as JSON but not into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Rejected locally before any request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
