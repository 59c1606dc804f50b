//! Capability provider traits wrapping external detectors.
//!
//! Each trait has exactly one narrow contract. The pipeline composes
//! boxed providers; a provider with nothing to report for a frame returns
//! `None` or an empty list, which downstream estimators treat as the
//! neutral case.

use crate::error::Result;
use crate::types::{
    BodyLandmark, FaceRegion, HandTrack, MotionField, ObjectDetection, VideoFrame,
};

/// Source of raw frames for the monitoring loop.
///
/// Acquisition failure is terminal for the loop; implementations should
/// release hardware resources in [`FrameSource::release`].
pub trait FrameSource: Send {
    /// Pull the next frame.
    fn next_frame(&mut self) -> Result<VideoFrame>;

    /// Release acquisition resources. Called once when the loop stops.
    fn release(&mut self) {}
}

/// Supplies a face bounding-box crop for a frame, if a face is visible.
pub trait FaceRegionProvider: Send {
    /// Locate and crop the primary face in the frame.
    fn face_region(&mut self, frame: &VideoFrame) -> Option<FaceRegion>;
}

/// Supplies a dense motion field between the previous and current frame.
///
/// Returns `None` until a previous frame exists.
pub trait MotionFieldProvider: Send {
    /// Compute the motion field for the current frame.
    fn motion_field(&mut self, frame: &VideoFrame) -> Option<MotionField>;
}

/// Supplies body landmarks for the person in the frame.
///
/// An empty list means no person was detected.
pub trait LandmarkProvider: Send {
    /// Detect skeletal landmarks.
    fn body_landmarks(&mut self, frame: &VideoFrame) -> Vec<BodyLandmark>;
}

/// Supplies per-hand wrist tracks.
pub trait HandTrackProvider: Send {
    /// Detect hands and report their wrist positions.
    fn hand_tracks(&mut self, frame: &VideoFrame) -> Vec<HandTrack>;
}

/// Supplies object detections for dangerous-object screening.
pub trait ObjectDetectionProvider: Send {
    /// Detect objects in the frame.
    fn detect_objects(&mut self, frame: &VideoFrame) -> Vec<ObjectDetection>;
}
