//! The asynchronous monitoring loop.
//!
//! [`PatientMonitor`] owns the frame source, the detector suite, and the
//! pipeline. `run` consumes the monitor; interaction afterwards goes
//! through the [`MonitorHandle`] obtained before starting, which exposes
//! the stop flag and the shared snapshot cell.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use wardsight_core::{
    FaceRegionProvider, FrameInput, FrameSource, HandTrackProvider, LandmarkProvider,
    MotionFieldProvider, ObjectDetectionProvider, VideoFrame,
};

use crate::config::MonitorConfig;
use crate::pipeline::MonitorPipeline;
use crate::snapshot::{MonitorSnapshot, SnapshotCell};

/// Optional per-channel detectors feeding the pipeline.
///
/// Any provider may be absent; its channel then yields the neutral input
/// (`None` or empty) every frame.
#[derive(Default)]
pub struct DetectorSuite {
    face: Option<Box<dyn FaceRegionProvider>>,
    motion: Option<Box<dyn MotionFieldProvider>>,
    landmarks: Option<Box<dyn LandmarkProvider>>,
    hands: Option<Box<dyn HandTrackProvider>>,
    objects: Option<Box<dyn ObjectDetectionProvider>>,
}

impl DetectorSuite {
    /// Create an empty suite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a face-region provider.
    #[must_use]
    pub fn with_face_provider(mut self, provider: Box<dyn FaceRegionProvider>) -> Self {
        self.face = Some(provider);
        self
    }

    /// Attach a motion-field provider.
    #[must_use]
    pub fn with_motion_provider(mut self, provider: Box<dyn MotionFieldProvider>) -> Self {
        self.motion = Some(provider);
        self
    }

    /// Attach a body-landmark provider.
    #[must_use]
    pub fn with_landmark_provider(mut self, provider: Box<dyn LandmarkProvider>) -> Self {
        self.landmarks = Some(provider);
        self
    }

    /// Attach a hand-track provider.
    #[must_use]
    pub fn with_hand_provider(mut self, provider: Box<dyn HandTrackProvider>) -> Self {
        self.hands = Some(provider);
        self
    }

    /// Attach an object-detection provider.
    #[must_use]
    pub fn with_object_provider(mut self, provider: Box<dyn ObjectDetectionProvider>) -> Self {
        self.objects = Some(provider);
        self
    }

    /// Run every attached provider over one frame.
    pub fn gather(&mut self, frame: &VideoFrame) -> FrameInput {
        FrameInput {
            face: self.face.as_mut().and_then(|p| p.face_region(frame)),
            motion_field: self.motion.as_mut().and_then(|p| p.motion_field(frame)),
            landmarks: self
                .landmarks
                .as_mut()
                .map(|p| p.body_landmarks(frame))
                .unwrap_or_default(),
            hand_tracks: self
                .hands
                .as_mut()
                .map(|p| p.hand_tracks(frame))
                .unwrap_or_default(),
            detections: self
                .objects
                .as_mut()
                .map(|p| p.detect_objects(frame))
                .unwrap_or_default(),
        }
    }
}

/// Shared handle to a running monitor.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    snapshot: Arc<SnapshotCell>,
    stop: Arc<AtomicBool>,
}

impl MonitorHandle {
    /// Request the loop to stop. The in-flight cycle completes first.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Read the latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<MonitorSnapshot> {
        self.snapshot.load()
    }
}

/// The monitoring loop: one frame source, one pipeline, one patient.
pub struct PatientMonitor {
    source: Box<dyn FrameSource>,
    suite: DetectorSuite,
    pipeline: MonitorPipeline,
    snapshot: Arc<SnapshotCell>,
    stop: Arc<AtomicBool>,
    cycle_interval: Duration,
}

impl PatientMonitor {
    /// Create a monitor.
    #[must_use]
    pub fn new(config: &MonitorConfig, source: Box<dyn FrameSource>, suite: DetectorSuite) -> Self {
        Self {
            source,
            suite,
            pipeline: MonitorPipeline::new(config),
            snapshot: Arc::new(SnapshotCell::new()),
            stop: Arc::new(AtomicBool::new(false)),
            cycle_interval: config.cycle_interval,
        }
    }

    /// Obtain a handle before starting the loop.
    #[must_use]
    pub fn handle(&self) -> MonitorHandle {
        MonitorHandle {
            snapshot: Arc::clone(&self.snapshot),
            stop: Arc::clone(&self.stop),
        }
    }

    /// Run the monitoring loop until stopped or acquisition fails.
    ///
    /// Frame acquisition failure is terminal: the loop logs the error and
    /// shuts down cleanly with the last published snapshot intact.
    pub async fn run(mut self) {
        tracing::info!(
            patient_id = %self.pipeline.session().patient_id,
            session_id = %self.pipeline.session().session_id,
            "monitoring loop started",
        );

        loop {
            if self.stop.load(Ordering::SeqCst) {
                tracing::info!("stop requested, shutting down");
                break;
            }

            let frame = match self.source.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!(error = %e, "frame acquisition failed, stopping loop");
                    break;
                }
            };

            let input = self.suite.gather(&frame);
            let output = self.pipeline.update(&input);

            for alert in &output.alerts {
                tracing::warn!(
                    kind = %alert.kind,
                    severity = %alert.severity,
                    message = %alert.message,
                    "alert raised",
                );
            }

            self.snapshot.publish(MonitorSnapshot {
                health: output.health,
                safety: output.safety,
                risk_level: output.risk_level,
                alerts: output.alerts,
                frames_processed: self.pipeline.session().frames_processed,
                updated_at: Utc::now(),
            });

            tokio::time::sleep(self.cycle_interval).await;
        }

        self.source.release();
        tracing::info!(
            frames = self.pipeline.session().frames_processed,
            "monitoring loop stopped",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use wardsight_core::{BodyLandmark, MonitorError, Result};

    // Yields a fixed number of black frames, then fails.
    struct ScriptedSource {
        remaining: usize,
        released: bool,
    }

    impl ScriptedSource {
        fn new(frames: usize) -> Self {
            Self {
                remaining: frames,
                released: false,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn next_frame(&mut self) -> Result<VideoFrame> {
            if self.remaining == 0 {
                return Err(MonitorError::acquisition("stream ended"));
            }
            self.remaining -= 1;
            let pixels = Array3::<u8>::zeros((8, 8, 3));
            Ok(VideoFrame::new(pixels, 0).unwrap())
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    struct FallenLandmarks;

    impl LandmarkProvider for FallenLandmarks {
        fn body_landmarks(&mut self, _frame: &VideoFrame) -> Vec<BodyLandmark> {
            let mut landmarks = vec![BodyLandmark::new(0.5, 0.5, 0.0, 1.0); 33];
            landmarks[11] = BodyLandmark::new(0.45, 0.3, 0.0, 1.0);
            landmarks[12] = BodyLandmark::new(0.55, 0.3, 0.0, 1.0);
            landmarks[23] = BodyLandmark::new(0.45, 0.6, 0.0, 1.0);
            landmarks[24] = BodyLandmark::new(0.55, 0.6, 0.0, 1.0);
            landmarks[0] = BodyLandmark::new(0.5, 0.2, 0.0, 1.0);
            landmarks
        }
    }

    fn fast_config() -> MonitorConfig {
        MonitorConfig::builder()
            .cycle_interval(Duration::from_millis(1))
            .build()
    }

    #[tokio::test]
    async fn loop_stops_on_acquisition_failure() {
        let monitor = PatientMonitor::new(
            &fast_config(),
            Box::new(ScriptedSource::new(3)),
            DetectorSuite::new(),
        );
        let handle = monitor.handle();
        monitor.run().await;

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.frames_processed, 3);
    }

    #[tokio::test]
    async fn loop_honors_stop_flag() {
        let monitor = PatientMonitor::new(
            &fast_config(),
            Box::new(ScriptedSource::new(usize::MAX)),
            DetectorSuite::new(),
        );
        let handle = monitor.handle();
        handle.stop();
        monitor.run().await;

        // Stop was requested before the first cycle.
        assert_eq!(handle.snapshot().frames_processed, 0);
        assert!(handle.is_stopped());
    }

    #[tokio::test]
    async fn snapshot_reflects_detected_risk() {
        let suite =
            DetectorSuite::new().with_landmark_provider(Box::new(FallenLandmarks));
        let monitor =
            PatientMonitor::new(&fast_config(), Box::new(ScriptedSource::new(2)), suite);
        let handle = monitor.handle();
        monitor.run().await;

        let snapshot = handle.snapshot();
        assert!(snapshot.safety.fall_risk > 0.8);
        assert_eq!(snapshot.alerts.len(), 1);
    }

    #[test]
    fn empty_suite_gathers_neutral_input() {
        let mut suite = DetectorSuite::new();
        let frame = VideoFrame::new(Array3::<u8>::zeros((8, 8, 3)), 0).unwrap();
        let input = suite.gather(&frame);
        assert!(input.face.is_none());
        assert!(input.motion_field.is_none());
        assert!(input.landmarks.is_empty());
        assert!(input.hand_tracks.is_empty());
        assert!(input.detections.is_empty());
    }
}
