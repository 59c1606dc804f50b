//! Per-hand tremor scoring from wrist motion.
//!
//! Each tracked hand keeps its own FIFO window of 2-D wrist positions in
//! normalized image coordinates. The score is the population variance of
//! the last five frame-to-frame speed magnitudes, scaled into [0, 1]:
//! high variance over such a short horizon indicates the high-frequency
//! oscillation characteristic of tremor rather than deliberate movement.

use serde::{Deserialize, Serialize};
use wardsight_core::HandTrack;
use wardsight_signal::SampleWindow;

/// Window capacity per hand, in positions.
const POSITION_WINDOW: usize = 30;

/// Velocity samples scored per update.
const SCORED_VELOCITIES: usize = 5;

/// Which hand a track belongs to. Detector hand index 0 is the right
/// hand, index 1 the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    /// Detector index 0.
    Right,
    /// Detector index 1.
    Left,
}

impl std::fmt::Display for HandSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Right => write!(f, "right"),
            Self::Left => write!(f, "left"),
        }
    }
}

/// Tremor severity grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum TremorSeverity {
    /// Score 0.2 or below.
    #[default]
    Normal,
    /// Score above 0.2.
    Low,
    /// Score above 0.4.
    Medium,
    /// Score above 0.6.
    High,
    /// Score above 0.8.
    Critical,
}

impl TremorSeverity {
    /// Grade an overall tremor score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Self::Critical
        } else if score > 0.6 {
            Self::High
        } else if score > 0.4 {
            Self::Medium
        } else if score > 0.2 {
            Self::Low
        } else {
            Self::Normal
        }
    }
}

impl std::fmt::Display for TremorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Per-hand tremor reading for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandTremor {
    /// Which hand.
    pub side: HandSide,
    /// Wrist x in normalized image coordinates.
    pub x: f64,
    /// Wrist y in normalized image coordinates.
    pub y: f64,
    /// This hand's tremor score in [0, 1].
    pub tremor: f64,
}

/// One tremor estimation cycle's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TremorEstimate {
    /// Overall score: the worse of the two hands, in [0, 1].
    pub score: f64,
    /// Right-hand score (0 when the hand was not seen this cycle).
    pub right_hand: f64,
    /// Left-hand score (0 when the hand was not seen this cycle).
    pub left_hand: f64,
    /// Whether the overall score clears the detection threshold (0.5).
    pub detected: bool,
    /// Severity grade of the overall score.
    pub severity: TremorSeverity,
    /// Per-hand readings for the hands seen this cycle.
    pub hands: Vec<HandTremor>,
}

impl TremorEstimate {
    /// Neutral estimate: no hands visible.
    #[must_use]
    pub fn none() -> Self {
        Self {
            score: 0.0,
            right_hand: 0.0,
            left_hand: 0.0,
            detected: false,
            severity: TremorSeverity::Normal,
            hands: Vec::new(),
        }
    }
}

/// Tremor estimator with one position window per hand.
#[derive(Debug)]
pub struct TremorEstimator {
    right: SampleWindow<[f64; 2]>,
    left: SampleWindow<[f64; 2]>,
}

impl TremorEstimator {
    /// Create an estimator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            right: SampleWindow::new(POSITION_WINDOW),
            left: SampleWindow::new(POSITION_WINDOW),
        }
    }

    /// Process one frame's hand tracks and produce the current estimate.
    ///
    /// Tracks with a detector index other than 0 or 1 are ignored. A hand
    /// absent this frame scores 0 for the cycle; its position history is
    /// retained for when it reappears.
    pub fn update(&mut self, tracks: &[HandTrack]) -> TremorEstimate {
        let mut estimate = TremorEstimate::none();

        for track in tracks {
            let side = match track.index {
                0 => HandSide::Right,
                1 => HandSide::Left,
                _ => continue,
            };
            let window = match side {
                HandSide::Right => &mut self.right,
                HandSide::Left => &mut self.left,
            };
            window.push(track.wrist);
            let score = tremor_score(window.as_slice());

            match side {
                HandSide::Right => estimate.right_hand = score,
                HandSide::Left => estimate.left_hand = score,
            }
            estimate.hands.push(HandTremor {
                side,
                x: track.wrist[0],
                y: track.wrist[1],
                tremor: score,
            });
        }

        estimate.score = estimate.right_hand.max(estimate.left_hand);
        estimate.detected = estimate.score > 0.5;
        estimate.severity = TremorSeverity::from_score(estimate.score);
        estimate
    }

    /// Discard both hands' position histories.
    pub fn reset(&mut self) {
        self.right.clear();
        self.left.clear();
    }
}

impl Default for TremorEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a single hand's position history.
fn tremor_score(positions: &[[f64; 2]]) -> f64 {
    if positions.len() < 3 {
        return 0.0;
    }

    let speeds: Vec<f64> = positions
        .windows(2)
        .map(|pair| {
            let dx = pair[1][0] - pair[0][0];
            let dy = pair[1][1] - pair[0][1];
            (dx * dx + dy * dy).sqrt()
        })
        .collect();

    if speeds.len() < SCORED_VELOCITIES {
        return 0.0;
    }

    let recent = &speeds[speeds.len() - SCORED_VELOCITIES..];
    let mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let variance =
        recent.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / recent.len() as f64;

    (variance * 100.0).min(1.0)
}
