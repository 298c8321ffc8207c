//! Azure control plane for ScenarioFlow
//!
//! This crate implements the control plane traits from `scenarioflow-cloud`
//! on top of the Azure CLI.
//!
//! # Features
//!
//! - Subscription selection (`az account set`)
//! - Resource listing for a resource group
//! - Detection of `az` commands and resource group names in their output
//!
//! # Requirements
//!
//! - `az` CLI must be installed and logged in
//!
//! # Example
//!
//! ```ignore
//! use scenarioflow_cloud::ControlPlane;
//! use scenarioflow_cloud_azure::AzurePlatform;
//!
//! let platform = AzurePlatform::new();
//! platform.set_context("00000000-0000-0000-0000-000000000000").await?;
//! let uris = platform.resource_uris("myResourceGroup").await?;
//! ```

pub mod az;
pub mod error;
pub mod patterns;
pub mod provider;

pub use az::Az;
pub use error::{AzureError, Result};
pub use patterns::{find_resource_group_name, is_az_command};
pub use provider::AzurePlatform;
