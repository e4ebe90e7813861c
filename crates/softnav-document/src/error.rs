//! Document error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("History state error: {0}")]
    HistoryState(#[from] serde_json::Error),
}
