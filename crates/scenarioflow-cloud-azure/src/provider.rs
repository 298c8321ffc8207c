//! Azure control plane implementation

use crate::az::Az;
use crate::patterns;
use async_trait::async_trait;
use scenarioflow_cloud::{ControlPlane, IdentifierExtractor, Result};

/// Azure implementation of the control plane traits
#[derive(Debug, Clone, Default)]
pub struct AzurePlatform {
    az: Az,
}

impl AzurePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_az(az: Az) -> Self {
        Self { az }
    }

    pub fn az(&self) -> &Az {
        &self.az
    }
}

#[async_trait]
impl ControlPlane for AzurePlatform {
    fn name(&self) -> &str {
        "azure"
    }

    async fn set_context(&self, identifier: &str) -> Result<()> {
        if identifier.is_empty() {
            tracing::debug!("No subscription given, keeping the active one");
            return Ok(());
        }
        self.az.set_subscription(identifier).await?;
        Ok(())
    }

    async fn resource_uris(&self, resource_group: &str) -> Result<Vec<String>> {
        let uris = self.az.list_resource_ids(resource_group).await?;
        tracing::debug!(resource_group, count = uris.len(), "Listed resources");
        Ok(uris)
    }
}

impl IdentifierExtractor for AzurePlatform {
    fn matches_resource_command(&self, command: &str) -> bool {
        patterns::is_az_command(command)
    }

    fn find_identifier(&self, output: &str) -> Result<Option<String>> {
        Ok(patterns::find_resource_group_name(output))
    }
}
