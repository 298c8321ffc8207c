//! Execution ledger
//!
//! One [`StatefulCodeBlock`] per code block, indexed by a flat zero-based
//! execution order. Entries are created pending and each one is completed at
//! most once.

use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use scenarioflow_core::{CodeBlock, CodeBlockEntry, Scenario};
use serde::Serialize;
use std::time::Duration;

/// Result of executing one code block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl Outcome {
    /// `None` while pending, otherwise whether the block succeeded
    pub fn succeeded(&self) -> Option<bool> {
        match self {
            Outcome::Pending => None,
            Outcome::Succeeded => Some(true),
            Outcome::Failed => Some(false),
        }
    }
}

/// Mutable execution record for one code block
#[derive(Debug, Clone, Serialize)]
pub struct StatefulCodeBlock {
    pub block: CodeBlock,
    pub step_name: String,
    /// Zero-based index of the step in the scenario
    pub step_number: usize,
    /// Zero-based index of the block within its step
    pub block_number: usize,
    pub stdout: String,
    pub stderr: String,
    pub error: Option<String>,
    pub outcome: Outcome,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
}

impl StatefulCodeBlock {
    fn new(entry: CodeBlockEntry<'_>) -> Self {
        Self {
            block: entry.block.clone(),
            step_name: entry.step.name.clone(),
            step_number: entry.step_number,
            block_number: entry.block_number,
            stdout: String::new(),
            stderr: String::new(),
            error: None,
            outcome: Outcome::Pending,
            completed_at: None,
            duration: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.outcome == Outcome::Pending
    }

    pub fn succeeded(&self) -> Option<bool> {
        self.outcome.succeeded()
    }

    fn complete(&mut self, stdout: String, stderr: String, duration: Option<Duration>) {
        self.stdout = stdout;
        self.stderr = stderr;
        self.duration = duration;
        self.completed_at = Some(Utc::now());
    }
}

/// Every code block of a scenario in execution order
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionLedger {
    entries: Vec<StatefulCodeBlock>,
}

impl ExecutionLedger {
    /// Flatten a scenario's code blocks. An empty scenario is rejected.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let entries: Vec<_> = scenario.code_blocks().map(StatefulCodeBlock::new).collect();
        if entries.is_empty() {
            return Err(EngineError::EmptyScenario(scenario.title.clone()));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StatefulCodeBlock> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[StatefulCodeBlock] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatefulCodeBlock> {
        self.entries.iter()
    }

    /// Number of entries that have completed, successfully or not
    pub fn completed(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_pending()).count()
    }

    pub(crate) fn record_success(
        &mut self,
        index: usize,
        stdout: String,
        stderr: String,
        duration: Option<Duration>,
    ) {
        if let Some(entry) = self.pending_mut(index) {
            entry.complete(stdout, stderr, duration);
            entry.outcome = Outcome::Succeeded;
        }
    }

    pub(crate) fn record_failure(
        &mut self,
        index: usize,
        stdout: String,
        stderr: String,
        error: String,
        duration: Option<Duration>,
    ) {
        if let Some(entry) = self.pending_mut(index) {
            entry.complete(stdout, stderr, duration);
            entry.error = Some(error);
            entry.outcome = Outcome::Failed;
        }
    }

    fn pending_mut(&mut self, index: usize) -> Option<&mut StatefulCodeBlock> {
        match self.entries.get_mut(index) {
            Some(entry) if entry.is_pending() => Some(entry),
            Some(_) => {
                tracing::warn!(index, "Ledger entry already completed");
                None
            }
            None => None,
        }
    }
}
