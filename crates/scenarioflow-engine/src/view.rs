//! Presentation model
//!
//! Renderers never look at the sequencer directly; they get a
//! [`ScenarioView`] snapshot after every processed message.

use crate::error::Result;
use crate::ledger::Outcome;
use crate::sequencer::{Phase, Sequencer};
use scenarioflow_cloud::DeploymentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    /// Numbered step name, e.g. "1. Create resource group"
    pub name: String,
    pub state: StepState,
    pub blocks: usize,
    pub completed_blocks: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioView {
    pub title: String,
    pub phase: Phase,
    pub status: DeploymentState,
    pub current_step: usize,
    pub steps: Vec<StepView>,
    pub command_lines: Vec<String>,
    pub error: Option<String>,
    pub resource_group: Option<String>,
    pub completed_blocks: usize,
    pub total_blocks: usize,
}

impl ScenarioView {
    pub fn project(sequencer: &Sequencer) -> Self {
        let ledger = sequencer.ledger();
        let status = sequencer.status();
        let phase = sequencer.phase();
        let in_flight_step = match phase {
            Phase::AwaitingExecution(index) => ledger.get(index).map(|e| e.step_number),
            _ => None,
        };

        let steps = status
            .steps()
            .iter()
            .enumerate()
            .map(|(number, step)| {
                let entries: Vec<_> = ledger.iter().filter(|e| e.step_number == number).collect();
                let completed = entries.iter().filter(|e| !e.is_pending()).count();
                let failed = entries.iter().any(|e| e.outcome == Outcome::Failed);

                let state = if failed {
                    StepState::Failed
                } else if !entries.is_empty() && completed == entries.len() {
                    StepState::Succeeded
                } else if entries.is_empty() && phase == Phase::Completed {
                    StepState::Succeeded
                } else if in_flight_step == Some(number) || completed > 0 {
                    StepState::Running
                } else {
                    StepState::Pending
                };

                StepView {
                    name: step.name.clone(),
                    state,
                    blocks: entries.len(),
                    completed_blocks: completed,
                }
            })
            .collect();

        Self {
            title: sequencer.title().to_string(),
            phase,
            status: status.status(),
            current_step: status.current_step(),
            steps,
            command_lines: sequencer.command_lines().to_vec(),
            error: status.error().map(str::to_string),
            resource_group: sequencer.resource_group().map(str::to_string),
            completed_blocks: ledger.completed(),
            total_blocks: ledger.len(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Draws the current state of a run
pub trait Renderer {
    fn render(&mut self, view: &ScenarioView) -> Result<()>;

    /// Called once after the loop ends
    fn finish(&mut self, _view: &ScenarioView) -> Result<()> {
        Ok(())
    }
}
