//! Harness error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// The email body does not contain the expected template text
    #[error("Marker not found in email body: {0:?}")]
    MarkerNotFound(String),

    /// The reset URL does not have the expected path shape
    #[error("Malformed reset URL: {0}")]
    MalformedUrl(String),

    #[error("Mailbox is empty")]
    EmptyMailbox,

    /// No guest with this display name was created in this context
    #[error("Unknown guest: {0}")]
    UnknownGuest(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
