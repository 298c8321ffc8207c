//! Control plane abstraction
//!
//! The sequencer talks to the cloud only through these traits, so tests and
//! non-Azure environments can substitute their own implementations.

use crate::environment::Environment;
use crate::error::Result;
use crate::status::DeploymentStatus;
use async_trait::async_trait;

/// Remote control plane the scenario deploys into
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Control plane name (e.g., "azure")
    fn name(&self) -> &str;

    /// Select the account context the scenario runs under.
    ///
    /// An empty identifier keeps whatever context is already active.
    async fn set_context(&self, identifier: &str) -> Result<()>;

    /// List the URIs of every resource in the given resource group
    async fn resource_uris(&self, resource_group: &str) -> Result<Vec<String>>;
}

/// Pulls a resource group identifier out of command output
pub trait IdentifierExtractor: Send + Sync {
    /// Whether the command is one whose output may name a resource group
    fn matches_resource_command(&self, command: &str) -> bool;

    /// Find a resource group name in the output, if any
    fn find_identifier(&self, output: &str) -> Result<Option<String>>;
}

/// One-way consumer of status snapshots
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn publish(&self, status: &DeploymentStatus, environment: Environment) -> Result<()>;
}
