//! Message loop
//!
//! Drives a [`Sequencer`] from a single task. Command executions run as
//! detached tasks and report back through the inbound channel, so messages
//! are processed strictly one at a time in arrival order.

use crate::error::{EngineError, Result};
use crate::executor::CommandExecutor;
use crate::ledger::ExecutionLedger;
use crate::message::{Effect, ExecutionOutput, Message};
use crate::sequencer::{Phase, Sequencer};
use crate::view::{Renderer, ScenarioView};
use scenarioflow_cloud::{
    ControlPlane, DeploymentStatus, Environment, IdentifierExtractor, StatusSink,
};
use scenarioflow_core::{CodeBlock, Scenario};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Everything the loop talks to outside the process
#[derive(Clone)]
pub struct Collaborators {
    pub executor: Arc<dyn CommandExecutor>,
    pub control_plane: Arc<dyn ControlPlane>,
    pub extractor: Arc<dyn IdentifierExtractor>,
    pub sinks: Vec<Arc<dyn StatusSink>>,
    pub environment: Environment,
}

/// Final state of a run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub phase: Phase,
    pub status: DeploymentStatus,
    pub ledger: ExecutionLedger,
    pub command_lines: Vec<String>,
    /// Number of executions dispatched
    pub dispatched: usize,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.phase == Phase::Completed
    }
}

pub struct Runtime {
    sequencer: Sequencer,
    collaborators: Collaborators,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    dispatched: usize,
}

impl Runtime {
    /// Select the control plane context and build the sequencer.
    ///
    /// If the context cannot be selected the failure is published and no
    /// runtime is produced.
    pub async fn establish(
        scenario: &Scenario,
        env: HashMap<String, String>,
        subscription: &str,
        collaborators: Collaborators,
    ) -> Result<Self> {
        let mut sequencer = Sequencer::new(scenario, env, collaborators.extractor.clone())?;

        if let Err(e) = collaborators.control_plane.set_context(subscription).await {
            error!(control_plane = collaborators.control_plane.name(), "Failed to establish context: {}", e);
            sequencer.status_mut().set_error(&e);
            publish_status(&collaborators, sequencer.status().snapshot()).await;
            return Err(EngineError::Precondition(e));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            sequencer,
            collaborators,
            tx,
            rx,
            dispatched: 0,
        })
    }

    /// Sender for input and resize messages from the presentation layer
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.tx.clone()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Run until the sequencer asks to quit
    pub async fn run(mut self, renderer: &mut dyn Renderer) -> Result<RunReport> {
        let effects = self.sequencer.start();
        renderer.render(&ScenarioView::project(&self.sequencer))?;
        let mut quit = self.apply(effects).await;

        while !quit {
            let Some(message) = self.rx.recv().await else {
                break;
            };
            let effects = self.sequencer.update(message);
            renderer.render(&ScenarioView::project(&self.sequencer))?;
            quit = self.apply(effects).await;
        }

        let phase = self.sequencer.phase();
        info!(%phase, dispatched = self.dispatched, "Scenario loop ended");
        renderer.finish(&ScenarioView::project(&self.sequencer))?;

        Ok(RunReport {
            phase,
            status: self.sequencer.status().snapshot(),
            ledger: self.sequencer.ledger().clone(),
            command_lines: self.sequencer.command_lines().to_vec(),
            dispatched: self.dispatched,
        })
    }

    /// Carry out effects; returns whether the loop should stop
    async fn apply(&mut self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::Execute { index, block, env } => self.spawn_execution(index, block, env),
                Effect::PublishStatus(status) => publish_status(&self.collaborators, status).await,
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    fn spawn_execution(&mut self, index: usize, block: CodeBlock, env: HashMap<String, String>) {
        self.dispatched += 1;
        let executor = self.collaborators.executor.clone();
        let tx = self.tx.clone();

        let execution = tokio::spawn(async move {
            match executor.execute(&block, &env).await {
                Ok(output) => Message::execution_succeeded(index, output),
                Err(failure) => Message::execution_failed(index, failure.output, failure.error),
            }
        });

        // A panicked or cancelled execution still owes the loop exactly one notification
        tokio::spawn(async move {
            let message = match execution.await {
                Ok(message) => message,
                Err(e) => {
                    error!(index, "Execution task ended abnormally: {}", e);
                    Message::execution_failed(index, ExecutionOutput::default(), e.to_string())
                }
            };
            if tx.send(message).is_err() {
                debug!(index, "Loop ended before execution finished");
            }
        });
    }
}

/// Attach resource URIs when a resource group is known, then hand the status to every sink
async fn publish_status(collaborators: &Collaborators, status: DeploymentStatus) {
    let status = match status.resource_group().map(str::to_string) {
        Some(group) => match collaborators.control_plane.resource_uris(&group).await {
            Ok(uris) => status.with_resource_uris(uris),
            Err(e) => {
                warn!(resource_group = %group, "Failed to list resources: {}", e);
                status
            }
        },
        None => status,
    };

    for sink in &collaborators.sinks {
        if let Err(e) = sink.publish(&status, collaborators.environment).await {
            warn!("Failed to publish status: {}", e);
        }
    }
}
