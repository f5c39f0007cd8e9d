//! Server error types.

use thiserror::Error;

/// Transport-level errors. Tool and protocol failures are not here;
/// they are answered on the wire, never raised.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
