//! az CLI wrapper
//!
//! Wraps the Azure CLI commands the scenario runner needs.

use crate::error::{AzureError, Result};
use std::process::Stdio;
use tokio::process::Command;

const DEFAULT_PROGRAM: &str = "az";

/// az CLI wrapper
#[derive(Debug, Clone)]
pub struct Az {
    program: String,
}

impl Default for Az {
    fn default() -> Self {
        Self::new()
    }
}

impl Az {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Use a different executable in place of `az`
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run an az command and return stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: {} {}", self.program, args.join(" "));

        let output = cmd.output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AzureError::AzNotFound,
            _ => AzureError::IoError(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AzureError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Make the given subscription the active one
    pub async fn set_subscription(&self, subscription: &str) -> Result<()> {
        self.run_command(&["account", "set", "--subscription", subscription])
            .await
            .map_err(|e| AzureError::SubscriptionFailed {
                subscription: subscription.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(subscription, "Azure subscription set");
        Ok(())
    }

    /// List the IDs of every resource in a resource group
    pub async fn list_resource_ids(&self, resource_group: &str) -> Result<Vec<String>> {
        let output = self
            .run_command(&[
                "resource",
                "list",
                "-g",
                resource_group,
                "--query",
                "[*].id",
                "--output",
                "json",
            ])
            .await?;

        parse_resource_ids(&output)
    }
}

fn parse_resource_ids(output: &str) -> Result<Vec<String>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_ids() {
        let ids = parse_resource_ids(
            r#"[
  "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/app",
  "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Storage/storageAccounts/st"
]"#,
        )
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids[1].ends_with("storageAccounts/st"));
    }

    #[test]
    fn test_parse_resource_ids_empty() {
        assert!(parse_resource_ids("").unwrap().is_empty());
        assert!(parse_resource_ids("[]\n").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let az = Az::with_program("scenarioflow-test-no-such-az");
        let result = az.list_resource_ids("rg").await;
        assert!(matches!(result, Err(AzureError::AzNotFound)));
    }
}
