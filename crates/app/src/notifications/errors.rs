//! Notification errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The email API returned a non-2xx response.
    #[error("unexpected response from email api: {0}")]
    UnexpectedResponse(String),
}
