//! Azure control plane error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AzureError {
    #[error("az not found. Please install the Azure CLI: https://aka.ms/azure-cli")]
    AzNotFound,

    #[error("az command failed: {0}")]
    CommandFailed(String),

    #[error("Failed to set subscription '{subscription}': {message}")]
    SubscriptionFailed {
        subscription: String,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AzureError>;

impl From<AzureError> for scenarioflow_cloud::CloudError {
    fn from(err: AzureError) -> Self {
        use scenarioflow_cloud::CloudError;
        match err {
            AzureError::SubscriptionFailed { .. } => CloudError::ContextFailed(err.to_string()),
            AzureError::JsonError(e) => CloudError::Json(e),
            AzureError::IoError(e) => CloudError::Io(e),
            other => CloudError::CommandFailed(other.to_string()),
        }
    }
}
