//! ScenarioFlow Cloud
//!
//! Control plane abstraction and deployment status reporting for
//! ScenarioFlow.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               scenarioflow-engine               │
//! │             (sequencer / runtime)               │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               scenarioflow-cloud                │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait ControlPlane / IdentifierExtractor│   │
//! │  │  trait StatusSink                        │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────┐  ┌──────────────────┐     │
//! │  │ DeploymentStatus │  │    Reporters     │     │
//! │  └──────────────────┘  └──────────────────┘     │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼──────────────────┐
//! │ scenarioflow-cloud-azure │
//! │     (az CLI wrapper)     │
//! └──────────────────────────┘
//! ```

pub mod environment;
pub mod error;
pub mod platform;
pub mod report;
pub mod status;

// Re-exports
pub use environment::Environment;
pub use error::{CloudError, Result};
pub use platform::{ControlPlane, IdentifierExtractor, StatusSink};
pub use report::{
    MarkerReporter, STATUS_END_MARKER, STATUS_START_MARKER, StatusFileReporter, StatusRecord,
    render_status_report,
};
pub use status::{DeploymentState, DeploymentStatus, ResourceDescriptor, StepStatus};
