//! Engine configuration file model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

fn default_environment() -> String {
    "local".to_string()
}

fn default_shell() -> String {
    "bash".to_string()
}

fn default_true() -> bool {
    true
}

/// Settings for running scenarios
///
/// Every field is optional in the file; CLI flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Subscription selected before the first command runs
    #[serde(default)]
    pub subscription: Option<String>,

    /// local, github-action or azure
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub correlation_id: Option<String>,

    /// Directory commands run in (defaults to the current directory)
    #[serde(default)]
    pub working_directory: Option<PathBuf>,

    #[serde(default = "default_shell")]
    pub shell: String,

    /// Carry exported variables from one command to the next
    #[serde(default = "default_true")]
    pub capture_environment: bool,

    #[serde(default)]
    pub verbose: bool,

    /// Where to keep the latest status snapshot as JSON
    #[serde(default)]
    pub status_file: Option<PathBuf>,

    /// Extra environment for every command
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            subscription: None,
            environment: default_environment(),
            correlation_id: None,
            working_directory: None,
            shell: default_shell(),
            capture_environment: true,
            verbose: false,
            status_file: None,
            variables: HashMap::new(),
        }
    }
}
