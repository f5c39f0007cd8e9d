use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while registering or invoking tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),
    #[error("invalid arguments: {0}")]
    Validation(String),
    #[error("execution failed: {0}")]
    Execution(String),
}

impl ToolError {
    /// Stable kind label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::NotFound(_) => "not_found",
            ToolError::DuplicateName(_) => "duplicate_name",
            ToolError::Validation(_) => "validation",
            ToolError::Execution(_) => "execution",
        }
    }
}
