//! Target environments a scenario can run in

use crate::error::CloudError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where the scenario is being executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// Developer machine
    #[default]
    Local,
    /// GitHub Actions runner
    GithubAction,
    /// Azure-hosted runner that consumes status reports from stdout
    Azure,
}

impl Environment {
    /// Whether status reports are emitted for the hosting service
    pub fn reports_status(&self) -> bool {
        matches!(self, Environment::Azure)
    }
}

impl FromStr for Environment {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "github-action" => Ok(Environment::GithubAction),
            "azure" | "ocd" => Ok(Environment::Azure),
            other => Err(CloudError::InvalidConfig(format!(
                "unknown environment '{}' (expected local, github-action or azure)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::GithubAction => write!(f, "github-action"),
            Environment::Azure => write!(f, "azure"),
        }
    }
}
