//! Control plane error types

use thiserror::Error;

/// Control plane errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Failed to set context: {0}")]
    ContextFailed(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Deployment status is frozen: {0}")]
    StatusFrozen(String),

    #[error("Status report error: {0}")]
    ReportError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
