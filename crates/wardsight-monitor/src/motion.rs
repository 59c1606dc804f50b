//! Skeletal motion-risk heuristics.
//!
//! Operates on normalized body landmarks (coordinates in [0, 1], origin
//! top-left, y growing downward). A frame with fewer than
//! [`REQUIRED_LANDMARKS`] landmarks scores zero on every axis.

use serde::{Deserialize, Serialize};
use wardsight_core::BodyLandmark;

/// Minimum landmark count for any risk scoring.
pub const REQUIRED_LANDMARKS: usize = 32;

// Skeletal landmark indices (pose-model convention).
const NOSE: usize = 0;
const LEFT_SHOULDER: usize = 11;
const RIGHT_SHOULDER: usize = 12;
const LEFT_WRIST: usize = 15;
const RIGHT_WRIST: usize = 16;
const LEFT_HIP: usize = 23;
const RIGHT_HIP: usize = 24;

/// One motion-risk estimation cycle's output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionRisk {
    /// Fall risk score in [0, 1].
    pub fall_risk: f64,
    /// Self-harm risk score in [0, 1].
    pub self_harm_risk: f64,
    /// Aggressive motion score in [0, 1].
    pub aggressive_motion: f64,
}

/// Motion-risk estimator. Keeps the previous frame's landmarks for the
/// aggression heuristic.
#[derive(Debug, Default)]
pub struct MotionRiskEstimator {
    prev_landmarks: Option<Vec<BodyLandmark>>,
}

impl MotionRiskEstimator {
    /// Create an estimator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one frame's landmarks.
    ///
    /// An empty landmark list leaves the previous-frame memory intact so
    /// a single missed detection does not reset the aggression baseline.
    pub fn update(&mut self, landmarks: &[BodyLandmark]) -> MotionRisk {
        if landmarks.len() < REQUIRED_LANDMARKS {
            if !landmarks.is_empty() {
                self.prev_landmarks = Some(landmarks.to_vec());
            }
            return MotionRisk::default();
        }

        let risk = MotionRisk {
            fall_risk: fall_risk(landmarks),
            self_harm_risk: self_harm_risk(landmarks),
            aggressive_motion: aggressive_motion(landmarks, self.prev_landmarks.as_deref()),
        };
        self.prev_landmarks = Some(landmarks.to_vec());
        risk
    }

    /// Forget the previous frame's landmarks.
    pub fn reset(&mut self) {
        self.prev_landmarks = None;
    }
}

/// Posture-based fall risk.
fn fall_risk(landmarks: &[BodyLandmark]) -> f64 {
    let nose = &landmarks[NOSE];
    let shoulder_y = (landmarks[LEFT_SHOULDER].y + landmarks[RIGHT_SHOULDER].y) / 2.0;
    let hip_y = (landmarks[LEFT_HIP].y + landmarks[RIGHT_HIP].y) / 2.0;

    // Hips below shoulders: collapsing or collapsed.
    if hip_y > shoulder_y + 0.15 {
        return 0.9;
    }
    // Head near the bottom of the frame: lying on the ground.
    if nose.y > 0.8 {
        return 0.85;
    }
    // Head far off the shoulder line: leaning heavily.
    let shoulder_x = (landmarks[LEFT_SHOULDER].x + landmarks[RIGHT_SHOULDER].x) / 2.0;
    if (nose.x - shoulder_x).abs() > 0.15 {
        return 0.6;
    }
    0.0
}

/// Hands-near-face self-harm heuristic.
fn self_harm_risk(landmarks: &[BodyLandmark]) -> f64 {
    let face_line = landmarks[NOSE].y - 0.1;

    let mut hands_near_face = 0u32;
    for wrist in [&landmarks[LEFT_WRIST], &landmarks[RIGHT_WRIST]] {
        if wrist.y < face_line && wrist.visibility > 0.5 {
            hands_near_face += 1;
        }
    }
    (0.5 * f64::from(hands_near_face)).min(1.0)
}

/// Rapid arm motion between consecutive frames.
fn aggressive_motion(landmarks: &[BodyLandmark], prev: Option<&[BodyLandmark]>) -> f64 {
    let Some(prev) = prev else {
        return 0.0;
    };
    if prev.len() <= LEFT_WRIST {
        return 0.0;
    }

    let wrist = &landmarks[LEFT_WRIST];
    let prev_wrist = &prev[LEFT_WRIST];
    let dx = wrist.x - prev_wrist.x;
    let dy = wrist.y - prev_wrist.y;
    let speed = (dx * dx + dy * dy).sqrt();

    if speed > 0.1 {
        0.7
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Upright, visible pose: nose up top, shoulders above hips,
    // wrists at the sides.
    fn upright_pose() -> Vec<BodyLandmark> {
        let mut landmarks = vec![BodyLandmark::new(0.5, 0.5, 0.0, 1.0); 33];
        landmarks[NOSE] = BodyLandmark::new(0.5, 0.2, 0.0, 1.0);
        landmarks[LEFT_SHOULDER] = BodyLandmark::new(0.45, 0.35, 0.0, 1.0);
        landmarks[RIGHT_SHOULDER] = BodyLandmark::new(0.55, 0.35, 0.0, 1.0);
        landmarks[LEFT_WRIST] = BodyLandmark::new(0.4, 0.55, 0.0, 1.0);
        landmarks[RIGHT_WRIST] = BodyLandmark::new(0.6, 0.55, 0.0, 1.0);
        landmarks[LEFT_HIP] = BodyLandmark::new(0.45, 0.6, 0.0, 1.0);
        landmarks[RIGHT_HIP] = BodyLandmark::new(0.55, 0.6, 0.0, 1.0);
        landmarks
    }

    #[test]
    fn too_few_landmarks_scores_zero() {
        let mut est = MotionRiskEstimator::new();
        let short = vec![BodyLandmark::new(0.5, 0.5, 0.0, 1.0); 10];
        assert_eq!(est.update(&short), MotionRisk::default());
    }

    #[test]
    fn upright_pose_is_safe() {
        let mut est = MotionRiskEstimator::new();
        let risk = est.update(&upright_pose());
        assert!((risk.fall_risk - 0.0).abs() < f64::EPSILON);
        assert!((risk.self_harm_risk - 0.0).abs() < f64::EPSILON);
        assert!((risk.aggressive_motion - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hips_below_shoulders_is_falling() {
        let mut est = MotionRiskEstimator::new();
        let mut pose = upright_pose();
        pose[LEFT_HIP].y = 0.55;
        pose[RIGHT_HIP].y = 0.55;
        pose[LEFT_SHOULDER].y = 0.35;
        pose[RIGHT_SHOULDER].y = 0.35;
        // hip_y 0.55 > shoulder_y 0.35 + 0.15
        let risk = est.update(&pose);
        assert!((risk.fall_risk - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn head_near_ground_is_lying_down() {
        let mut est = MotionRiskEstimator::new();
        let mut pose = upright_pose();
        pose[NOSE].y = 0.85;
        // Keep hips near shoulders so the first clause does not fire.
        pose[LEFT_HIP].y = 0.45;
        pose[RIGHT_HIP].y = 0.45;
        let risk = est.update(&pose);
        assert!((risk.fall_risk - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn leaning_far_sideways_is_moderate_risk() {
        let mut est = MotionRiskEstimator::new();
        let mut pose = upright_pose();
        pose[NOSE].x = 0.8;
        let risk = est.update(&pose);
        assert!((risk.fall_risk - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn one_hand_at_face_is_half_risk() {
        let mut est = MotionRiskEstimator::new();
        let mut pose = upright_pose();
        pose[LEFT_WRIST] = BodyLandmark::new(0.5, 0.05, 0.0, 0.9);
        let risk = est.update(&pose);
        assert!((risk.self_harm_risk - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn both_hands_at_face_is_full_risk() {
        let mut est = MotionRiskEstimator::new();
        let mut pose = upright_pose();
        pose[LEFT_WRIST] = BodyLandmark::new(0.45, 0.05, 0.0, 0.9);
        pose[RIGHT_WRIST] = BodyLandmark::new(0.55, 0.05, 0.0, 0.9);
        let risk = est.update(&pose);
        assert!((risk.self_harm_risk - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn low_visibility_hand_not_counted() {
        let mut est = MotionRiskEstimator::new();
        let mut pose = upright_pose();
        pose[LEFT_WRIST] = BodyLandmark::new(0.5, 0.05, 0.0, 0.3);
        let risk = est.update(&pose);
        assert!((risk.self_harm_risk - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn first_frame_cannot_be_aggressive() {
        let mut est = MotionRiskEstimator::new();
        let risk = est.update(&upright_pose());
        assert!((risk.aggressive_motion - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fast_wrist_motion_is_aggressive() {
        let mut est = MotionRiskEstimator::new();
        est.update(&upright_pose());

        let mut pose = upright_pose();
        pose[LEFT_WRIST].x += 0.2;
        let risk = est.update(&pose);
        assert!((risk.aggressive_motion - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn slow_wrist_motion_is_not_aggressive() {
        let mut est = MotionRiskEstimator::new();
        est.update(&upright_pose());

        let mut pose = upright_pose();
        pose[LEFT_WRIST].x += 0.05;
        let risk = est.update(&pose);
        assert!((risk.aggressive_motion - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_forgets_previous_frame() {
        let mut est = MotionRiskEstimator::new();
        est.update(&upright_pose());
        est.reset();

        let mut pose = upright_pose();
        pose[LEFT_WRIST].x += 0.2;
        let risk = est.update(&pose);
        assert!((risk.aggressive_motion - 0.0).abs() < f64::EPSILON);
    }
}
