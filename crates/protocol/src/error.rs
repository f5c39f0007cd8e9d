//! Protocol error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request envelope: {0}")]
    Envelope(String),
}

pub type Result<T> = std::result::Result<T, Error>;
