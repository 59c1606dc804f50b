//! Wardsight Core Library
//!
//! Shared foundation for the Wardsight patient monitoring pipeline: domain
//! types exchanged between the per-metric estimators and the fusion layer,
//! the capability provider traits that wrap external detectors, and the
//! unified error type.
//!
//! # Architecture
//!
//! Detector inference (pose, hands, faces, objects) happens outside this
//! workspace. Each external detector is wrapped behind one narrow
//! capability trait ([`FaceRegionProvider`], [`MotionFieldProvider`],
//! [`LandmarkProvider`], [`HandTrackProvider`],
//! [`ObjectDetectionProvider`]); the pipeline composes trait objects and
//! consumes their structured outputs as a [`FrameInput`]. A provider that
//! yields nothing for a cycle produces a neutral result from the
//! corresponding estimator, never an error.

pub mod error;
pub mod metrics;
pub mod traits;
pub mod types;

pub use error::{MonitorError, Result};
pub use metrics::{
    Alert, AlertKind, HealthMetrics, RiskLevel, SafetyMetrics, Severity, SkinColorStatus,
};
pub use traits::{
    FaceRegionProvider, FrameSource, HandTrackProvider, LandmarkProvider,
    MotionFieldProvider, ObjectDetectionProvider,
};
pub use types::{
    BodyLandmark, FaceRegion, FrameInput, HandTrack, MotionField, ObjectDetection, VideoFrame,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
