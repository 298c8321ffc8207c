//! ScenarioFlow Engine
//!
//! Runs a scenario one code block at a time.
//!
//! ```text
//!  ┌──────────┐  Message   ┌───────────┐  Effect::Execute   ┌─────────────────┐
//!  │ Runtime  │──────────▶│ Sequencer │──────────────────▶│ CommandExecutor │
//!  │ (loop)   │◀──────────│ (reduce)  │                    │ (detached task) │
//!  └────┬─────┘  Effects   └───────────┘                    └────────┬────────┘
//!       │                                                            │
//!       │◀─────────────── ExecutionSucceeded / ExecutionFailed ──────┘
//!       ▼
//!  Renderer (ScenarioView) / StatusSink (DeploymentStatus)
//! ```
//!
//! The [`Sequencer`] is a plain state machine and can be driven directly
//! with synthetic messages; the [`Runtime`] wires it to real collaborators.

pub mod error;
pub mod executor;
pub mod ledger;
pub mod message;
pub mod runtime;
pub mod sequencer;
pub mod view;

pub use error::{EngineError, Result};
pub use executor::{CommandExecutor, ExecutionFailure, ShellExecutor};
pub use ledger::{ExecutionLedger, Outcome, StatefulCodeBlock};
pub use message::{Effect, ExecutionOutput, Key, Message};
pub use runtime::{Collaborators, RunReport, Runtime};
pub use sequencer::{Phase, RESOURCE_GROUP_ENV, Sequencer, command_prompt};
pub use view::{Renderer, ScenarioView, StepState, StepView};
