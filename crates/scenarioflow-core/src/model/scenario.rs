//! Scenario definition

use super::code_block::CodeBlock;
use super::step::Step;
use crate::error::{Result, ScenarioError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scenario - an ordered sequence of steps extracted from a document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    /// Target environment the scenario was written for (local, azure, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Variable bindings available to every code block
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A code block together with its position in the scenario
#[derive(Debug, Clone, Copy)]
pub struct CodeBlockEntry<'a> {
    pub step_number: usize,
    pub step: &'a Step,
    pub block_number: usize,
    pub block: &'a CodeBlock,
}

impl Scenario {
    /// Iterate over every code block in execution order
    pub fn code_blocks(&self) -> impl Iterator<Item = CodeBlockEntry<'_>> {
        self.steps
            .iter()
            .enumerate()
            .flat_map(|(step_number, step)| {
                step.code_blocks
                    .iter()
                    .enumerate()
                    .map(move |(block_number, block)| CodeBlockEntry {
                        step_number,
                        step,
                        block_number,
                        block,
                    })
            })
    }

    pub fn code_block_count(&self) -> usize {
        self.steps.iter().map(|s| s.code_blocks.len()).sum()
    }

    /// Check the invariants a runnable scenario must satisfy
    pub fn validate(&self) -> Result<()> {
        if self.code_block_count() == 0 {
            return Err(ScenarioError::EmptyScenario(self.title.clone()));
        }

        for entry in self.code_blocks() {
            if let Some(value) = entry.block.expected_similarity
                && !(0.0..=1.0).contains(&value)
            {
                return Err(ScenarioError::InvalidSimilarity {
                    step: entry.step.name.clone(),
                    value,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty() {
        let scenario = Scenario {
            title: "Nothing".to_string(),
            steps: vec![Step::new("Intro", vec![])],
            ..Default::default()
        };
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::EmptyScenario(title)) if title == "Nothing"
        ));
    }

    #[test]
    fn test_validate_similarity_range() {
        let scenario = Scenario {
            title: "Bad".to_string(),
            steps: vec![Step::new(
                "Check",
                vec![
                    CodeBlock::new("echo hi", "bash")
                        .with_expected_output("hi")
                        .with_expected_similarity(1.5),
                ],
            )],
            ..Default::default()
        };
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::InvalidSimilarity { value, .. }) if value == 1.5
        ));
    }

    #[test]
    fn test_validate_ok() {
        let scenario = Scenario {
            title: "Ok".to_string(),
            steps: vec![Step::new("", vec![CodeBlock::new("echo hi", "bash")])],
            ..Default::default()
        };
        assert!(scenario.validate().is_ok());
    }
}
