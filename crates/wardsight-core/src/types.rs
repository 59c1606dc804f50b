//! Per-frame input types consumed by the monitoring pipeline.
//!
//! These are the structured outputs of external detectors, treated as
//! opaque measurements: the pipeline never runs inference itself.

use chrono::{DateTime, Utc};
use ndarray::{s, Array2, Array3};

/// A raw video frame handed to the capability providers.
///
/// Pixel layout is `(height, width, 3)` in BGR channel order.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Pixel data, shape `(h, w, 3)`, BGR.
    pub pixels: Array3<u8>,
    /// Monotonically increasing frame index.
    pub frame_index: u64,
    /// Acquisition timestamp.
    pub timestamp: DateTime<Utc>,
}

impl VideoFrame {
    /// Create a frame, validating the channel dimension.
    ///
    /// Returns `None` if the pixel array is not three-channel.
    pub fn new(pixels: Array3<u8>, frame_index: u64) -> Option<Self> {
        if pixels.dim().2 != 3 {
            return None;
        }
        Some(Self {
            pixels,
            frame_index,
            timestamp: Utc::now(),
        })
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }
}

/// A face bounding-box crop, used for rPPG heart rate estimation and skin
/// color analysis.
///
/// Pixel layout matches [`VideoFrame`]: `(h, w, 3)`, BGR.
#[derive(Debug, Clone)]
pub struct FaceRegion {
    /// Cropped pixel data.
    pub pixels: Array3<u8>,
}

impl FaceRegion {
    /// Wrap a crop. Returns `None` for a non-three-channel array.
    pub fn new(pixels: Array3<u8>) -> Option<Self> {
        if pixels.dim().2 != 3 {
            return None;
        }
        Some(Self { pixels })
    }

    /// Whether the crop contains no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let (h, w, _) = self.pixels.dim();
        h == 0 || w == 0
    }

    /// Mean intensity of one BGR channel (0 = blue, 1 = green, 2 = red).
    ///
    /// Returns 0.0 for an empty crop.
    #[must_use]
    pub fn mean_channel(&self, channel: usize) -> f64 {
        if self.is_empty() || channel >= 3 {
            return 0.0;
        }
        let plane = self.pixels.slice(s![.., .., channel]);
        let sum: f64 = plane.iter().map(|&v| f64::from(v)).sum();
        sum / plane.len() as f64
    }

    /// Mean green-channel intensity, the rPPG observable.
    #[must_use]
    pub fn mean_green(&self) -> f64 {
        self.mean_channel(1)
    }
}

/// A dense per-pixel motion-vector field between two consecutive frames.
#[derive(Debug, Clone)]
pub struct MotionField {
    /// Horizontal motion components.
    pub dx: Array2<f64>,
    /// Vertical motion components.
    pub dy: Array2<f64>,
}

impl MotionField {
    /// Create a motion field. Returns `None` if the component shapes differ.
    pub fn new(dx: Array2<f64>, dy: Array2<f64>) -> Option<Self> {
        if dx.dim() != dy.dim() {
            return None;
        }
        Some(Self { dx, dy })
    }

    /// Field height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.dx.dim().0
    }

    /// Field width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.dx.dim().1
    }

    /// Mean motion magnitude inside the chest sub-rectangle: rows
    /// `[h/3, 2h/3)`, columns `[w/4, 3w/4)`.
    ///
    /// Returns 0.0 if the sub-rectangle is degenerate.
    #[must_use]
    pub fn chest_motion(&self) -> f64 {
        let (h, w) = self.dx.dim();
        let (r0, r1) = (h / 3, 2 * h / 3);
        let (c0, c1) = (w / 4, 3 * w / 4);
        if r1 <= r0 || c1 <= c0 {
            return 0.0;
        }
        let dx = self.dx.slice(s![r0..r1, c0..c1]);
        let dy = self.dy.slice(s![r0..r1, c0..c1]);
        let sum: f64 = dx
            .iter()
            .zip(dy.iter())
            .map(|(&x, &y)| (x * x + y * y).sqrt())
            .sum();
        sum / dx.len() as f64
    }
}

/// A single skeletal landmark in normalized image coordinates.
///
/// Fixed indexing: 0 = nose, 11/12 = shoulders, 15/16 = wrists,
/// 19/20 = hands, 23/24 = hips, 27/28 = ankles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLandmark {
    /// Normalized horizontal position [0, 1].
    pub x: f64,
    /// Normalized vertical position [0, 1]; larger is lower in the image.
    pub y: f64,
    /// Relative depth (detector-defined units).
    pub z: f64,
    /// Detector visibility/confidence score [0, 1].
    pub visibility: f64,
}

impl BodyLandmark {
    /// Create a landmark.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }
}

/// A tracked hand: detector-reported hand index plus the wrist position
/// in normalized image coordinates.
///
/// Index 0 is the right hand, index 1 the left, matching the detector's
/// reporting order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandTrack {
    /// Detector-reported hand index.
    pub index: usize,
    /// Wrist position `[x, y]` in normalized coordinates.
    pub wrist: [f64; 2],
}

impl HandTrack {
    /// Create a hand track.
    #[must_use]
    pub fn new(index: usize, x: f64, y: f64) -> Self {
        Self {
            index,
            wrist: [x, y],
        }
    }
}

/// A detected object with label, confidence, and bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDetection {
    /// Class label reported by the detector.
    pub label: String,
    /// Detection confidence [0, 1].
    pub confidence: f64,
    /// Bounding box `[x1, y1, x2, y2]` in pixel coordinates.
    pub bbox: [f64; 4],
}

impl ObjectDetection {
    /// Create a detection.
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f64, bbox: [f64; 4]) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }
}

/// All detector outputs for one monitoring cycle.
///
/// Every channel is optional: an absent channel produces the neutral
/// result from the corresponding estimator, never a failure.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Face crop for heart rate and skin color analysis.
    pub face: Option<FaceRegion>,
    /// Dense motion field for breathing estimation.
    pub motion_field: Option<MotionField>,
    /// Body landmarks for fall/self-harm/aggression heuristics.
    pub landmarks: Vec<BodyLandmark>,
    /// Per-hand wrist tracks for tremor estimation.
    pub hand_tracks: Vec<HandTrack>,
    /// Object detections for dangerous-object screening.
    pub detections: Vec<ObjectDetection>,
}

impl FrameInput {
    /// An input with every channel absent.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the face crop.
    #[must_use]
    pub fn with_face(mut self, face: FaceRegion) -> Self {
        self.face = Some(face);
        self
    }

    /// Set the motion field.
    #[must_use]
    pub fn with_motion_field(mut self, field: MotionField) -> Self {
        self.motion_field = Some(field);
        self
    }

    /// Set the body landmarks.
    #[must_use]
    pub fn with_landmarks(mut self, landmarks: Vec<BodyLandmark>) -> Self {
        self.landmarks = landmarks;
        self
    }

    /// Set the hand tracks.
    #[must_use]
    pub fn with_hand_tracks(mut self, tracks: Vec<HandTrack>) -> Self {
        self.hand_tracks = tracks;
        self
    }

    /// Set the object detections.
    #[must_use]
    pub fn with_detections(mut self, detections: Vec<ObjectDetection>) -> Self {
        self.detections = detections;
        self
    }
}
