//! Deployment status aggregation
//!
//! Tracks the overall progress of a scenario run against a control plane:
//! `NotStarted → Running → Succeeded | Failed`, plus one summary per step.
//! `Succeeded` and `Failed` are terminal; once reached, nothing changes.

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Overall outcome of a deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentState {
    #[default]
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl DeploymentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeploymentState::Succeeded | DeploymentState::Failed)
    }
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeploymentState::NotStarted => write!(f, "not started"),
            DeploymentState::Running => write!(f, "running"),
            DeploymentState::Succeeded => write!(f, "succeeded"),
            DeploymentState::Failed => write!(f, "failed"),
        }
    }
}

/// A command that may create remote resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub command: String,
    pub description: String,
}

impl ResourceDescriptor {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Summary of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    pub name: String,
    pub code_blocks: Vec<ResourceDescriptor>,
}

/// Aggregate status of a scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    steps: Vec<StepStatus>,
    /// 1-based; only ever increases
    current_step: usize,
    status: DeploymentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_group: Option<String>,
    #[serde(default, rename = "resourceURIs")]
    resource_uris: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Default for DeploymentStatus {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            current_step: 1,
            status: DeploymentState::NotStarted,
            resource_group: None,
            resource_uris: Vec::new(),
            error: None,
        }
    }
}

impl DeploymentStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step. Only allowed before the run starts.
    pub fn add_step(
        &mut self,
        name: impl Into<String>,
        code_blocks: Vec<ResourceDescriptor>,
    ) -> Result<()> {
        let name = name.into();
        if self.status != DeploymentState::NotStarted {
            return Err(CloudError::StatusFrozen(format!(
                "cannot add step '{}' while {}",
                name, self.status
            )));
        }

        self.steps.push(StepStatus { name, code_blocks });
        Ok(())
    }

    /// Mark the run as started
    pub fn begin(&mut self) {
        if self.status == DeploymentState::NotStarted {
            self.status = DeploymentState::Running;
        }
    }

    /// Move to the next step
    pub fn advance_step(&mut self) {
        if self.status.is_terminal() {
            debug!("Ignoring step advance on terminal status");
            return;
        }
        self.current_step += 1;
    }

    /// Mark the run as failed. The first error wins.
    pub fn set_error(&mut self, error: impl std::fmt::Display) {
        if self.status.is_terminal() {
            debug!(error = %error, "Ignoring error on terminal status");
            return;
        }
        self.status = DeploymentState::Failed;
        self.error = Some(error.to_string());
    }

    pub fn mark_succeeded(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = DeploymentState::Succeeded;
    }

    /// Record the resource group discovered during the run.
    ///
    /// Returns `false` when one was already recorded or the status is terminal.
    pub fn set_resource_group(&mut self, name: impl Into<String>) -> bool {
        if self.resource_group.is_some() || self.status.is_terminal() {
            return false;
        }
        self.resource_group = Some(name.into());
        true
    }

    /// Copy of the current state with resource URIs attached, for reporting
    pub fn with_resource_uris(mut self, uris: Vec<String>) -> Self {
        self.resource_uris = uris;
        self
    }

    pub fn snapshot(&self) -> DeploymentStatus {
        self.clone()
    }

    pub fn steps(&self) -> &[StepStatus] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn status(&self) -> DeploymentState {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn resource_group(&self) -> Option<&str> {
        self.resource_group.as_deref()
    }

    pub fn resource_uris(&self) -> &[String] {
        &self.resource_uris
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
