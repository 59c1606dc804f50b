//! Wardsight Monitor Library
//!
//! Orchestration layer of the Wardsight patient monitoring pipeline:
//! skeletal motion-risk heuristics, dangerous-object screening, risk
//! fusion, alert generation, patient sessions, and the asynchronous
//! monitoring loop with atomic snapshot publishing.
//!
//! # Architecture
//!
//! Each cycle, [`PatientMonitor`] pulls a frame from its
//! [`FrameSource`](wardsight_core::FrameSource), runs the attached
//! [`DetectorSuite`] to build a
//! [`FrameInput`](wardsight_core::FrameInput), feeds it through the
//! [`MonitorPipeline`], and publishes a [`MonitorSnapshot`] that readers
//! load through a [`MonitorHandle`] without ever observing a torn state.
//! Acquisition failure is terminal for the loop; every estimator failure
//! mode is expressed as a neutral metric instead of an error.

pub mod alerting;
pub mod config;
pub mod fusion;
pub mod monitor;
pub mod motion;
pub mod objects;
pub mod pipeline;
pub mod session;
pub mod snapshot;

pub use alerting::{AlertBatch, AlertManager};
pub use config::{MonitorConfig, MonitorConfigBuilder};
pub use fusion::fuse_risk;
pub use monitor::{DetectorSuite, MonitorHandle, PatientMonitor};
pub use motion::{MotionRisk, MotionRiskEstimator};
pub use objects::{screen_dangerous_objects, DANGEROUS_LABELS};
pub use pipeline::{CycleOutput, MonitorPipeline};
pub use session::{HealthStats, PatientSession, SessionSummary};
pub use snapshot::{MonitorSnapshot, SnapshotCell};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
