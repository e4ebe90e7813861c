//! Fetch error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Response is not a document: {0}")]
    Unparsable(String),

    #[error("No content region matching {0}")]
    MissingRegion(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("No page at {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<softnav_document::DocumentError> for FetchError {
    fn from(err: softnav_document::DocumentError) -> Self {
        match err {
            softnav_document::DocumentError::InvalidSelector(selector) => {
                FetchError::InvalidSelector(selector)
            }
            other => FetchError::Unparsable(other.to_string()),
        }
    }
}
