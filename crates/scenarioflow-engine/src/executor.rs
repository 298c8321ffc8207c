//! Command execution transport
//!
//! [`ShellExecutor`] runs each code block with `<shell> -c`. When environment
//! capture is on, the script dumps its environment (`env -0`, one
//! NUL-terminated record per variable) to a temp file after the command so
//! exported variables can be threaded into later blocks.

use crate::message::ExecutionOutput;
use async_trait::async_trait;
use scenarioflow_core::CodeBlock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// Variables the shell sets on its own; never reported as updates
const SHELL_MANAGED_VARS: [&str; 4] = ["_", "SHLVL", "PWD", "OLDPWD"];

/// A command that did not succeed
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionFailure {
    pub output: ExecutionOutput,
    pub error: String,
}

impl ExecutionFailure {
    pub fn new(output: ExecutionOutput, error: impl Into<String>) -> Self {
        Self {
            output,
            error: error.into(),
        }
    }
}

/// Runs one code block
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(
        &self,
        block: &CodeBlock,
        env: &HashMap<String, String>,
    ) -> Result<ExecutionOutput, ExecutionFailure>;
}

/// Runs code blocks through a local shell
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
    working_directory: Option<PathBuf>,
    capture_environment: bool,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self {
            shell: "bash".to_string(),
            working_directory: None,
            capture_environment: true,
        }
    }
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            ..Default::default()
        }
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_capture_environment(mut self, capture: bool) -> Self {
        self.capture_environment = capture;
        self
    }

    fn script(content: &str, env_file: Option<&Path>) -> String {
        match env_file {
            Some(path) => format!(
                "{}\n__scenarioflow_status=$?\nenv -0 > '{}'\nexit $__scenarioflow_status\n",
                content,
                path.display()
            ),
            None => content.to_string(),
        }
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(
        &self,
        block: &CodeBlock,
        env: &HashMap<String, String>,
    ) -> Result<ExecutionOutput, ExecutionFailure> {
        let env_file = if self.capture_environment {
            let file = tempfile::NamedTempFile::new().map_err(|e| {
                ExecutionFailure::new(
                    ExecutionOutput::default(),
                    format!("Failed to create environment file: {}", e),
                )
            })?;
            Some(file.into_temp_path())
        } else {
            None
        };

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(Self::script(&block.content, env_file.as_deref()));
        cmd.envs(env);
        if let Some(dir) = &self.working_directory {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: {} -c {}", self.shell, block.content);

        let started = Instant::now();
        let result = cmd.output().await;
        let duration = started.elapsed();

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                let failed = ExecutionOutput {
                    duration: Some(duration),
                    ..Default::default()
                };
                return Err(ExecutionFailure::new(
                    failed,
                    format!("Failed to run {}: {}", self.shell, e),
                ));
            }
        };

        let mut execution = ExecutionOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            env_updates: HashMap::new(),
            duration: Some(duration),
        };

        if !output.status.success() {
            let error = match output.status.code() {
                Some(code) => format!("Command exited with status {}", code),
                None => "Command terminated by signal".to_string(),
            };
            return Err(ExecutionFailure::new(execution, error));
        }

        if let Some(path) = &env_file {
            match tokio::fs::read(path).await {
                Ok(bytes) => {
                    let dump = String::from_utf8_lossy(&bytes);
                    let mut before: HashMap<String, String> = std::env::vars_os()
                        .map(|(k, v)| {
                            (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned())
                        })
                        .collect();
                    before.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
                    execution.env_updates = changed_variables(&before, parse_env_dump(&dump));
                }
                Err(e) => tracing::warn!("Failed to read captured environment: {}", e),
            }
        }

        Ok(execution)
    }
}

/// Parse `env -0` output. Records that are not `NAME=value` are skipped.
fn parse_env_dump(dump: &str) -> HashMap<String, String> {
    dump.split('\0')
        .filter_map(|record| record.split_once('='))
        .filter(|(name, _)| is_variable_name(name))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn changed_variables(
    before: &HashMap<String, String>,
    after: HashMap<String, String>,
) -> HashMap<String, String> {
    after
        .into_iter()
        .filter(|(name, _)| !SHELL_MANAGED_VARS.contains(&name.as_str()))
        .filter(|(name, value)| before.get(name) != Some(value))
        .collect()
}
