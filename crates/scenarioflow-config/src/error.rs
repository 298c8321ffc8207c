use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error(
        "Config file not found. Checked:\n\
        - current directory: scenarioflow.local.yaml, .scenarioflow.local.yaml, scenarioflow.yaml, .scenarioflow.yaml\n\
        - ./.scenarioflow/ directory\n\
        - ~/.config/scenarioflow/config.yaml\n\
        A path can also be given with the SCENARIOFLOW_CONFIG_PATH environment variable"
    )]
    ConfigFileNotFound,

    #[error("Failed to parse config file {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
