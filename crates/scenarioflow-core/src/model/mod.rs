//! Model definitions
//!
//! A [`Scenario`] is the already-parsed form of a runnable document: an
//! ordered list of [`Step`]s, each grouping one or more [`CodeBlock`]s.
//! All of these are immutable once loaded.

mod code_block;
mod pattern;
mod scenario;
mod step;

// Re-exports
pub use code_block::*;
pub use scenario::*;
pub use step::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn block(content: &str) -> CodeBlock {
        CodeBlock {
            content: content.to_string(),
            language: "bash".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_code_block_count() {
        let scenario = Scenario {
            title: "Deploy".to_string(),
            environment: None,
            variables: Default::default(),
            steps: vec![
                Step::new("Create resource group", vec![block("az group create")]),
                Step::new("Create VM", vec![block("az vm create"), block("az vm show")]),
                Step::new("Notes", vec![]),
            ],
        };

        assert_eq!(scenario.code_block_count(), 3);
        let positions: Vec<(usize, usize, &str)> = scenario
            .code_blocks()
            .map(|entry| (entry.step_number, entry.block_number, entry.block.content.as_str()))
            .collect();
        assert_eq!(
            positions,
            vec![
                (0, 0, "az group create"),
                (1, 0, "az vm create"),
                (1, 1, "az vm show"),
            ]
        );
    }

    #[test]
    fn test_expectation_absent_without_expected_output() {
        assert!(block("echo hi").expectation().is_none());
    }
}
