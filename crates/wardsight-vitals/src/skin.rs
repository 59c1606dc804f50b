//! Skin discoloration heuristics over the face crop.
//!
//! The BGR face crop is converted to HSV (8-bit scale: hue 0–179,
//! saturation and value 0–255) and the channel means are matched against
//! fixed thresholds for flushing, pallor, jaundice, and cyanosis.

use serde::{Deserialize, Serialize};
use wardsight_core::{FaceRegion, SkinColorStatus};

/// One skin-color analysis cycle's output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkinAnalysis {
    /// Diabetes / liver risk score in [0, 1].
    pub diabetes_risk: f64,
    /// Blood pressure risk score in [0, 1].
    pub bp_risk: f64,
    /// Discoloration classification.
    pub status: SkinColorStatus,
    /// Whether a face crop was available this cycle.
    pub face_detected: bool,
}

impl SkinAnalysis {
    /// Neutral analysis: no face visible.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            diabetes_risk: 0.0,
            bp_risk: 0.0,
            status: SkinColorStatus::Normal,
            face_detected: false,
        }
    }
}

/// Stateless skin-color analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkinColorAnalyzer;

impl SkinColorAnalyzer {
    /// Create an analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Analyze one frame's face crop.
    #[must_use]
    pub fn analyze(&self, face: Option<&FaceRegion>) -> SkinAnalysis {
        let Some(face) = face else {
            return SkinAnalysis::none();
        };
        if face.is_empty() {
            return SkinAnalysis::none();
        }

        let (mean_hue, mean_saturation, mean_value) = hsv_means(face);

        let mut analysis = SkinAnalysis {
            face_detected: true,
            ..SkinAnalysis::none()
        };

        if mean_value > 200.0 && mean_saturation > 100.0 {
            analysis.bp_risk = 0.7;
            analysis.status = SkinColorStatus::Flush;
        } else if mean_value < 100.0 {
            analysis.bp_risk = 0.6;
            analysis.diabetes_risk = 0.4;
            analysis.status = SkinColorStatus::Pale;
        } else if mean_hue > 10.0 && mean_hue < 30.0 && mean_saturation > 120.0 {
            analysis.diabetes_risk = 0.7;
            analysis.status = SkinColorStatus::YellowTint;
        } else if mean_hue > 100.0 || mean_hue < 10.0 {
            analysis.status = SkinColorStatus::Cyanotic;
        }

        analysis
    }
}

/// Mean H, S, V over a BGR crop, on the 8-bit HSV scale.
fn hsv_means(face: &FaceRegion) -> (f64, f64, f64) {
    let pixels = &face.pixels;
    let (height, width, _) = pixels.dim();
    let count = (height * width) as f64;

    let mut hue_sum = 0.0;
    let mut sat_sum = 0.0;
    let mut val_sum = 0.0;

    for row in 0..height {
        for col in 0..width {
            let b = f64::from(pixels[[row, col, 0]]);
            let g = f64::from(pixels[[row, col, 1]]);
            let r = f64::from(pixels[[row, col, 2]]);

            let max = b.max(g).max(r);
            let min = b.min(g).min(r);
            let delta = max - min;

            let mut hue = if delta == 0.0 {
                0.0
            } else if max == r {
                60.0 * (g - b) / delta
            } else if max == g {
                120.0 + 60.0 * (b - r) / delta
            } else {
                240.0 + 60.0 * (r - g) / delta
            };
            if hue < 0.0 {
                hue += 360.0;
            }

            hue_sum += hue / 2.0;
            sat_sum += if max == 0.0 { 0.0 } else { 255.0 * delta / max };
            val_sum += max;
        }
    }

    (hue_sum / count, sat_sum / count, val_sum / count)
}
