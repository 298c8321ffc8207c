//! Scenario state machine
//!
//! The sequencer owns the ledger, the environment bindings and the deployment
//! status. It never runs anything itself: [`Sequencer::update`] reduces one
//! [`Message`] and returns the [`Effect`]s the driving loop must carry out.
//!
//! ```text
//! Idle ──start──▶ AwaitingExecution(0) ──ok──▶ AwaitingExecution(1) ──ok──▶ … ──▶ Completed
//!                        │                            │
//!                        └──────────fail──────────────┴──────────────────────────▶ Aborted
//! ```
//!
//! A quit key moves any non-terminal phase to `Cancelled`.

use crate::error::Result;
use crate::ledger::ExecutionLedger;
use crate::message::{Effect, ExecutionOutput, Key, Message};
use scenarioflow_cloud::{DeploymentStatus, IdentifierExtractor, ResourceDescriptor};
use scenarioflow_core::{CodeBlock, Scenario};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Environment variable bound to the first discovered resource group
pub const RESOURCE_GROUP_ENV: &str = "RESOURCE_GROUP_NAME";

const DEFAULT_PROMPT_LANGUAGE: &str = "bash";

/// Where the sequencer is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// The entry at this index is executing
    AwaitingExecution(usize),
    Completed,
    Aborted,
    Cancelled,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed | Phase::Aborted | Phase::Cancelled)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::AwaitingExecution(index) => write!(f, "executing #{}", index),
            Phase::Completed => write!(f, "completed"),
            Phase::Aborted => write!(f, "aborted"),
            Phase::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Prompt-annotated command line for the transcript
pub fn command_prompt(block: &CodeBlock) -> String {
    let language = if block.language.is_empty() {
        DEFAULT_PROMPT_LANGUAGE
    } else {
        block.language.as_str()
    };
    format!("{} $ {}", language, block.content)
}

pub struct Sequencer {
    title: String,
    ledger: ExecutionLedger,
    env: HashMap<String, String>,
    status: DeploymentStatus,
    phase: Phase,
    resource_group: Option<String>,
    command_lines: Vec<String>,
    extractor: Arc<dyn IdentifierExtractor>,
    size: Option<(u16, u16)>,
}

impl Sequencer {
    /// Build the ledger and the initial status. Nothing is dispatched yet.
    ///
    /// Scenario variables are overlaid by `env`.
    pub fn new(
        scenario: &Scenario,
        env: HashMap<String, String>,
        extractor: Arc<dyn IdentifierExtractor>,
    ) -> Result<Self> {
        let ledger = ExecutionLedger::from_scenario(scenario)?;

        let mut status = DeploymentStatus::new();
        for (number, step) in scenario.steps.iter().enumerate() {
            let descriptors = step
                .code_blocks
                .iter()
                .map(|block| ResourceDescriptor::new(&block.content, &block.description))
                .collect();
            status.add_step(format!("{}. {}", number + 1, step.name), descriptors)?;
        }

        let mut bindings = scenario.variables.clone();
        bindings.extend(env);

        Ok(Self {
            title: scenario.title.clone(),
            ledger,
            env: bindings,
            status,
            phase: Phase::Idle,
            resource_group: None,
            command_lines: Vec::new(),
            extractor,
            size: None,
        })
    }

    /// Dispatch the first entry
    pub fn start(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Idle {
            debug!(phase = %self.phase, "Sequencer already started");
            return Vec::new();
        }

        info!(title = %self.title, blocks = self.ledger.len(), "Starting scenario");
        self.status.begin();
        self.dispatch(0)
    }

    /// Reduce one message
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::Resize { width, height } => {
                self.size = Some((width, height));
                Vec::new()
            }
            Message::Input(key) => self.on_input(key),
            Message::ExecutionSucceeded { index, output } => {
                if !self.is_awaiting(index) {
                    return Vec::new();
                }
                self.on_success(index, output)
            }
            Message::ExecutionFailed {
                index,
                output,
                error,
            } => {
                if !self.is_awaiting(index) {
                    return Vec::new();
                }
                self.on_failure(index, output, error)
            }
        }
    }

    fn is_awaiting(&self, index: usize) -> bool {
        if self.phase == Phase::AwaitingExecution(index) {
            return true;
        }
        warn!(index, phase = %self.phase, "Ignoring notification for an entry that is not in flight");
        false
    }

    fn on_input(&mut self, key: Key) -> Vec<Effect> {
        if !key.is_quit() {
            return Vec::new();
        }
        if !self.phase.is_terminal() {
            info!(phase = %self.phase, "Scenario cancelled by user");
            self.phase = Phase::Cancelled;
        }
        vec![Effect::Quit]
    }

    fn on_success(&mut self, index: usize, output: ExecutionOutput) -> Vec<Effect> {
        let Some(entry) = self.ledger.get(index) else {
            return Vec::new();
        };
        let block = entry.block.clone();
        let step_name = entry.step_name.clone();

        if let Some(expectation) = block.expectation() {
            match expectation.verify(output.stdout.trim()) {
                Ok(comparison) => {
                    debug!(index, strategy = ?comparison.strategy, score = comparison.score, "Output accepted");
                }
                Err(mismatch) => {
                    warn!(index, "Output rejected: {}", mismatch);
                    return self.on_failure(index, output, mismatch.to_string());
                }
            }
        }

        let ExecutionOutput {
            stdout,
            stderr,
            env_updates,
            duration,
        } = output;

        self.env.extend(env_updates);
        self.discover_resource_group(&block, &stdout);
        self.command_lines.push(stdout.clone());
        self.ledger.record_success(index, stdout, stderr, duration);

        let next = index + 1;
        let Some(next_entry) = self.ledger.get(next) else {
            info!(title = %self.title, "Scenario completed");
            self.phase = Phase::Completed;
            self.status.mark_succeeded();
            return vec![Effect::PublishStatus(self.status.snapshot()), Effect::Quit];
        };

        if next_entry.step_name != step_name {
            self.status.advance_step();
        }
        self.dispatch(next)
    }

    fn on_failure(&mut self, index: usize, output: ExecutionOutput, error: String) -> Vec<Effect> {
        warn!(index, error = %error, "Code block failed");

        if output.stderr.is_empty() {
            self.command_lines.push(error.clone());
        } else {
            self.command_lines.push(output.stderr.clone());
        }
        self.ledger
            .record_failure(index, output.stdout, output.stderr, error.clone(), output.duration);

        self.status.set_error(error);
        self.phase = Phase::Aborted;
        vec![Effect::PublishStatus(self.status.snapshot()), Effect::Quit]
    }

    /// Bind the first resource group found in the output of a resource command
    fn discover_resource_group(&mut self, block: &CodeBlock, stdout: &str) {
        if self.resource_group.is_some() || !self.extractor.matches_resource_command(&block.content)
        {
            return;
        }

        match self.extractor.find_identifier(stdout) {
            Ok(Some(name)) => {
                info!(resource_group = %name, "Discovered resource group");
                self.status.set_resource_group(name.clone());
                self.env
                    .entry(RESOURCE_GROUP_ENV.to_string())
                    .or_insert_with(|| name.clone());
                self.resource_group = Some(name);
            }
            Ok(None) => {}
            Err(e) => warn!("Resource group extraction failed: {}", e),
        }
    }

    fn dispatch(&mut self, index: usize) -> Vec<Effect> {
        let Some(entry) = self.ledger.get(index) else {
            return Vec::new();
        };
        let block = entry.block.clone();

        debug!(index, step = %entry.step_name, "Dispatching code block");
        self.command_lines.push(command_prompt(&block));
        self.phase = Phase::AwaitingExecution(index);

        vec![Effect::Execute {
            index,
            block,
            env: self.env.clone(),
        }]
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ledger(&self) -> &ExecutionLedger {
        &self.ledger
    }

    pub fn status(&self) -> &DeploymentStatus {
        &self.status
    }

    pub(crate) fn status_mut(&mut self) -> &mut DeploymentStatus {
        &mut self.status
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    pub fn resource_group(&self) -> Option<&str> {
        self.resource_group.as_deref()
    }

    /// Prompt lines interleaved with captured output
    pub fn command_lines(&self) -> &[String] {
        &self.command_lines
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }
}
