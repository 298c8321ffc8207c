//! Messages that drive the sequencer and the effects it asks for

use scenarioflow_cloud::DeploymentStatus;
use scenarioflow_core::CodeBlock;
use std::collections::HashMap;
use std::time::Duration;

/// A key press, as far as the sequencer cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    CtrlC,
    Other,
}

impl Key {
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Char('q') | Key::Esc | Key::CtrlC)
    }
}

/// What a finished command produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub stderr: String,
    /// Variables the command exported or changed
    pub env_updates: HashMap<String, String>,
    pub duration: Option<Duration>,
}

impl ExecutionOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            ..Default::default()
        }
    }
}

/// Inbound events for the sequencer
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Resize {
        width: u16,
        height: u16,
    },
    Input(Key),
    ExecutionSucceeded {
        index: usize,
        output: ExecutionOutput,
    },
    ExecutionFailed {
        index: usize,
        output: ExecutionOutput,
        error: String,
    },
}

impl Message {
    pub fn resize(width: u16, height: u16) -> Self {
        Message::Resize { width, height }
    }

    pub fn input(key: Key) -> Self {
        Message::Input(key)
    }

    pub fn execution_succeeded(index: usize, output: ExecutionOutput) -> Self {
        Message::ExecutionSucceeded { index, output }
    }

    pub fn execution_failed(index: usize, output: ExecutionOutput, error: impl Into<String>) -> Self {
        Message::ExecutionFailed {
            index,
            output,
            error: error.into(),
        }
    }
}

/// Work the sequencer hands back to the loop that drives it
#[derive(Debug, Clone)]
pub enum Effect {
    /// Run a code block; its result comes back as a message
    Execute {
        index: usize,
        block: CodeBlock,
        env: HashMap<String, String>,
    },
    PublishStatus(DeploymentStatus),
    Quit,
}
