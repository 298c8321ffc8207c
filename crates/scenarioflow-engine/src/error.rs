//! Engine error types

use scenarioflow_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Scenario '{0}' does not contain any code blocks")]
    EmptyScenario(String),

    #[error("Failed to establish context: {0}")]
    Precondition(#[source] CloudError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Cloud error: {0}")]
    Cloud(#[from] CloudError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
