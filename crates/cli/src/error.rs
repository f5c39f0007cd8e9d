//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// A tool could not be registered (duplicate name).
    #[error(transparent)]
    Registry(#[from] registry::ToolError),

    /// The transport failed.
    #[error(transparent)]
    Server(#[from] server::Error),

    /// The given config file does not exist.
    #[error("config file not found: {0}")]
    ConfigNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
