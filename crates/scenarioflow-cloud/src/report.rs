//! Status reporting
//!
//! Two sinks are provided: [`MarkerReporter`] writes the status between
//! `ie_us` / `ie_ue` markers so an Azure host can scrape it from stdout, and
//! [`StatusFileReporter`] keeps the latest snapshot in a JSON file.

use crate::environment::Environment;
use crate::error::{CloudError, Result};
use crate::platform::StatusSink;
use crate::status::DeploymentStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

pub const STATUS_START_MARKER: &str = "ie_us";
pub const STATUS_END_MARKER: &str = "ie_ue";

/// Render a status as a single marker-delimited line (without newline)
pub fn render_status_report(status: &DeploymentStatus) -> Result<String> {
    let json = serde_json::to_string(status)?;
    Ok(format!("{}{}{}", STATUS_START_MARKER, json, STATUS_END_MARKER))
}

/// Writes marker-delimited status reports, but only in environments that consume them
pub struct MarkerReporter<W: Write + Send> {
    writer: Mutex<W>,
}

impl MarkerReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> MarkerReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| CloudError::ReportError(e.to_string()))
    }
}

#[async_trait]
impl<W: Write + Send> StatusSink for MarkerReporter<W> {
    async fn publish(&self, status: &DeploymentStatus, environment: Environment) -> Result<()> {
        if !environment.reports_status() {
            tracing::debug!(
                %environment,
                status = %status.status(),
                step = status.current_step(),
                "Status report skipped for environment"
            );
            return Ok(());
        }

        let line = render_status_report(status)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| CloudError::ReportError(e.to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

/// Contents of a status file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub updated_at: DateTime<Utc>,
    pub environment: Environment,
    pub status: DeploymentStatus,
}

/// Keeps the latest status snapshot on disk, with one backup of the previous one
pub struct StatusFileReporter {
    path: PathBuf,
}

impl StatusFileReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".backup");
        PathBuf::from(name)
    }

    /// Load the last written record
    pub async fn load(&self) -> Result<Option<StatusRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[async_trait]
impl StatusSink for StatusFileReporter {
    async fn publish(&self, status: &DeploymentStatus, environment: Environment) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }

        let backup = self.backup_path();
        if self.path.exists() {
            if backup.exists() {
                fs::remove_file(&backup).await?;
            }
            fs::rename(&self.path, &backup).await?;
        }

        let record = StatusRecord {
            updated_at: Utc::now(),
            environment,
            status: status.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&record)?).await?;

        tracing::debug!("Saved status to {}", self.path.display());
        Ok(())
    }
}
