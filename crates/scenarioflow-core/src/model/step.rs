//! Step definition

use super::code_block::CodeBlock;
use serde::{Deserialize, Serialize};

/// A named stage of a scenario (e.g. "Create resource group")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Step {
    /// Heading the step was taken from; may be empty
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code_blocks: Vec<CodeBlock>,
}

impl Step {
    pub fn new(name: impl Into<String>, code_blocks: Vec<CodeBlock>) -> Self {
        Self {
            name: name.into(),
            code_blocks,
        }
    }
}
