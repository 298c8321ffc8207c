//! Scenario loader
//!
//! Reads an already-parsed scenario from a YAML or JSON file.

use crate::error::{Result, ScenarioError};
use crate::model::Scenario;
use std::path::Path;
use tracing::{debug, info, instrument};

/// On-disk scenario formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
}

impl ScenarioFormat {
    /// Determine the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Some(ScenarioFormat::Yaml),
            Some("json") => Some(ScenarioFormat::Json),
            _ => None,
        }
    }
}

/// Load and validate a scenario file
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let format = ScenarioFormat::from_path(path)
        .ok_or_else(|| ScenarioError::UnsupportedFormat(path.to_path_buf()))?;

    let content = std::fs::read_to_string(path).map_err(|e| ScenarioError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(bytes = content.len(), ?format, "Read scenario file");

    let scenario =
        parse_scenario(&content, format).map_err(|message| ScenarioError::ParseError {
            path: path.to_path_buf(),
            message,
        })?;
    scenario.validate()?;

    info!(
        title = %scenario.title,
        steps = scenario.steps.len(),
        code_blocks = scenario.code_block_count(),
        "Scenario loaded successfully"
    );
    Ok(scenario)
}

/// Parse a scenario from a string without validating it
pub fn parse_scenario(
    content: &str,
    format: ScenarioFormat,
) -> std::result::Result<Scenario, String> {
    match format {
        ScenarioFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ScenarioFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}
