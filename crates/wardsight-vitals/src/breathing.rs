//! Respiratory-rate estimation from chest motion.
//!
//! The chest sub-rectangle of the dense motion field rises and falls with
//! each breath. Buffering its mean motion magnitude per frame and
//! extracting the dominant periodicity in the respiratory band
//! (0.1–0.5 Hz, i.e. 6–30 breaths per minute) recovers the breathing
//! rate.

use serde::{Deserialize, Serialize};
use wardsight_core::MotionField;
use wardsight_signal::{FrequencyBand, FrequencyEstimator, SampleWindow, VITAL_WARMUP_SAMPLES};

/// Configuration for [`BreathingEstimator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// Frame rate the motion samples arrive at, in Hz.
    pub fps: f64,
    /// FIFO window capacity in samples.
    pub window_capacity: usize,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            window_capacity: 150,
        }
    }
}

/// One breathing estimation cycle's output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreathingEstimate {
    /// Breathing rate in breaths per minute (0 when not measurable).
    pub breaths_per_minute: f64,
    /// Spectral confidence in [0, 1].
    pub confidence: f64,
    /// Apnea risk score in [0, 1].
    pub apnea_risk: f64,
    /// Current frame's raw chest motion magnitude.
    pub chest_motion: f64,
}

impl BreathingEstimate {
    /// Neutral estimate: no measurable breathing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            breaths_per_minute: 0.0,
            confidence: 0.0,
            apnea_risk: 0.0,
            chest_motion: 0.0,
        }
    }
}

/// Breathing estimator over the chest region of the motion field.
#[derive(Debug)]
pub struct BreathingEstimator {
    window: SampleWindow<f64>,
    spectral: FrequencyEstimator,
    band: FrequencyBand,
}

impl BreathingEstimator {
    /// Respiratory frequency band: 6–30 breaths per minute.
    pub const RESPIRATORY_BAND: FrequencyBand = FrequencyBand::new(0.1, 0.5);

    /// Create an estimator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BreathingConfig::default())
    }

    /// Create an estimator with an explicit configuration.
    #[must_use]
    pub fn with_config(config: BreathingConfig) -> Self {
        Self {
            window: SampleWindow::new(config.window_capacity),
            spectral: FrequencyEstimator::new(config.fps, VITAL_WARMUP_SAMPLES),
            band: Self::RESPIRATORY_BAND,
        }
    }

    /// Number of buffered chest-motion samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    /// Process one frame's motion field and produce the current estimate.
    ///
    /// An absent motion field contributes no sample; the estimate is still
    /// computed over whatever the window already holds.
    pub fn update(&mut self, motion: Option<&MotionField>) -> BreathingEstimate {
        let chest_motion = match motion {
            Some(field) => {
                let magnitude = field.chest_motion();
                self.window.push(magnitude);
                magnitude
            }
            None => 0.0,
        };

        let spectral = self.spectral.estimate(self.window.as_slice(), self.band);
        let breaths_per_minute = spectral.frequency_hz * 60.0;

        let apnea_risk = if self.window.is_ready(VITAL_WARMUP_SAMPLES) {
            apnea_risk_from_rate(breaths_per_minute)
        } else {
            0.0
        };

        BreathingEstimate {
            breaths_per_minute,
            confidence: spectral.confidence,
            apnea_risk,
            chest_motion,
        }
    }

    /// Discard all buffered samples.
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

impl Default for BreathingEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Apnea risk breakpoints over breathing rate, evaluated in order.
fn apnea_risk_from_rate(breaths_per_minute: f64) -> f64 {
    if breaths_per_minute == 0.0 {
        0.95
    } else if breaths_per_minute < 8.0 {
        0.85
    } else if breaths_per_minute > 25.0 {
        0.6
    } else if (12.0..=20.0).contains(&breaths_per_minute) {
        0.0
    } else {
        0.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use std::f64::consts::PI;

    // Motion field whose chest region moves with uniform magnitude.
    fn field_with_motion(magnitude: f64) -> MotionField {
        let dx = Array2::from_elem((30, 40), magnitude);
        let dy = Array2::zeros((30, 40));
        MotionField::new(dx, dy).unwrap()
    }

    fn feed_breathing(
        est: &mut BreathingEstimator,
        rate_bpm: f64,
        frames: usize,
    ) -> BreathingEstimate {
        let freq = rate_bpm / 60.0;
        let mut last = BreathingEstimate::none();
        for i in 0..frames {
            let t = i as f64 / 30.0;
            let magnitude = 1.0 + 0.8 * (2.0 * PI * freq * t).sin();
            last = est.update(Some(&field_with_motion(magnitude)));
        }
        last
    }

    #[test]
    fn no_motion_field_yields_neutral_estimate() {
        let mut est = BreathingEstimator::new();
        let result = est.update(None);
        assert_eq!(result, BreathingEstimate::none());
    }

    #[test]
    fn below_warmup_yields_zero_rate_and_risk() {
        let mut est = BreathingEstimator::new();
        let result = feed_breathing(&mut est, 15.0, 59);
        assert!((result.breaths_per_minute - 0.0).abs() < f64::EPSILON);
        assert!((result.apnea_risk - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normal_breathing_recovered() {
        // 15 breaths/min = 0.25 Hz. 150 samples at 30 Hz: 0.2 Hz bins,
        // leaving exactly one in-band bin candidate near 0.2 and 0.4.
        let mut est = BreathingEstimator::new();
        let result = feed_breathing(&mut est, 15.0, 150);
        assert!(result.breaths_per_minute > 0.0);
        assert!(
            (result.breaths_per_minute - 15.0).abs() <= 12.0,
            "got {} breaths/min",
            result.breaths_per_minute,
        );
    }

    #[test]
    fn normal_rate_scores_zero_apnea_risk() {
        assert!((apnea_risk_from_rate(15.0) - 0.0).abs() < f64::EPSILON);
        assert!((apnea_risk_from_rate(12.0) - 0.0).abs() < f64::EPSILON);
        assert!((apnea_risk_from_rate(20.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn apnea_breakpoints() {
        assert!((apnea_risk_from_rate(0.0) - 0.95).abs() < f64::EPSILON);
        assert!((apnea_risk_from_rate(5.0) - 0.85).abs() < f64::EPSILON);
        assert!((apnea_risk_from_rate(30.0) - 0.6).abs() < f64::EPSILON);
        assert!((apnea_risk_from_rate(10.0) - 0.3).abs() < f64::EPSILON);
        assert!((apnea_risk_from_rate(22.0) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn still_chest_flags_high_apnea_risk_once_warm() {
        let mut est = BreathingEstimator::new();
        for _ in 0..90 {
            est.update(Some(&field_with_motion(0.5)));
        }
        let result = est.update(Some(&field_with_motion(0.5)));
        // Constant motion has no periodicity: rate 0, maximal risk.
        assert!((result.breaths_per_minute - 0.0).abs() < f64::EPSILON);
        assert!((result.apnea_risk - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn chest_motion_reports_current_frame() {
        let mut est = BreathingEstimator::new();
        let result = est.update(Some(&field_with_motion(1.5)));
        assert!((result.chest_motion - 1.5).abs() < 1e-9);
    }
}
