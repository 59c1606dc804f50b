//! Remote photoplethysmography heart-rate estimation.
//!
//! Blood volume changes under the skin modulate the green channel of the
//! face crop. Buffering the per-frame mean green intensity and extracting
//! the dominant periodicity in the cardiac band (0.7–4.0 Hz, i.e.
//! 42–240 BPM) recovers the pulse rate without contact.

use serde::{Deserialize, Serialize};
use wardsight_core::FaceRegion;
use wardsight_signal::{FrequencyBand, FrequencyEstimator, SampleWindow, VITAL_WARMUP_SAMPLES};

/// Configuration for [`HeartRateEstimator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateConfig {
    /// Frame rate the green-channel samples arrive at, in Hz.
    pub fps: f64,
    /// FIFO window capacity in samples.
    pub window_capacity: usize,
    /// Confidence above which a pulse counts as detected.
    pub pulse_confidence_threshold: f64,
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            window_capacity: 150,
            pulse_confidence_threshold: 0.5,
        }
    }
}

/// One heart-rate estimation cycle's output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateEstimate {
    /// Heart rate in beats per minute (0 when not measurable).
    pub bpm: f64,
    /// Spectral confidence in [0, 1].
    pub confidence: f64,
    /// Whether the confidence clears the detection threshold.
    pub pulse_detected: bool,
    /// Stress score in [0, 1] derived from the heart rate.
    pub stress_level: f64,
}

impl HeartRateEstimate {
    /// Neutral estimate: no measurable pulse.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            bpm: 0.0,
            confidence: 0.0,
            pulse_detected: false,
            stress_level: 0.0,
        }
    }
}

/// Heart-rate estimator over the face-crop green channel.
#[derive(Debug)]
pub struct HeartRateEstimator {
    config: HeartRateConfig,
    window: SampleWindow<f64>,
    spectral: FrequencyEstimator,
    band: FrequencyBand,
}

impl HeartRateEstimator {
    /// Cardiac frequency band: 42–240 BPM.
    pub const CARDIAC_BAND: FrequencyBand = FrequencyBand::new(0.7, 4.0);

    /// Create an estimator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HeartRateConfig::default())
    }

    /// Create an estimator with an explicit configuration.
    #[must_use]
    pub fn with_config(config: HeartRateConfig) -> Self {
        let window = SampleWindow::new(config.window_capacity);
        let spectral = FrequencyEstimator::new(config.fps, VITAL_WARMUP_SAMPLES);
        Self {
            config,
            window,
            spectral,
            band: Self::CARDIAC_BAND,
        }
    }

    /// Number of buffered green-channel samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    /// Process one frame's face crop and produce the current estimate.
    ///
    /// An absent or empty face crop contributes no sample; the estimate is
    /// still computed over whatever the window already holds, so the rate
    /// decays gracefully through short occlusions.
    pub fn update(&mut self, face: Option<&FaceRegion>) -> HeartRateEstimate {
        if let Some(face) = face {
            if !face.is_empty() {
                self.window.push(face.mean_green());
            }
        }

        let spectral = self.spectral.estimate(self.window.as_slice(), self.band);
        let bpm = spectral.frequency_hz * 60.0;

        let stress_level = if self.window.is_ready(VITAL_WARMUP_SAMPLES) {
            stress_from_bpm(bpm)
        } else {
            0.0
        };

        HeartRateEstimate {
            bpm,
            confidence: spectral.confidence,
            pulse_detected: spectral.confidence > self.config.pulse_confidence_threshold,
            stress_level,
        }
    }

    /// Discard all buffered samples.
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

impl Default for HeartRateEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Stress score breakpoints over heart rate in BPM.
fn stress_from_bpm(bpm: f64) -> f64 {
    if bpm < 60.0 {
        0.3
    } else if bpm < 80.0 {
        0.0
    } else if bpm < 100.0 {
        0.3
    } else if bpm < 120.0 {
        0.6
    } else {
        0.9
    }
}
