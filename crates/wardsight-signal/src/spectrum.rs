//! Dominant-periodicity estimation via the discrete Fourier transform.
//!
//! The estimator z-score normalizes the sample sequence, computes the
//! full-length DFT, restricts attention to the positive-frequency bins
//! strictly inside the requested band, and reports the maximum-power bin
//! together with a power-ratio confidence. The computation is a pure
//! function of its inputs: identical samples and parameters always yield
//! an identical estimate.

use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// Variance floor below which a signal counts as constant.
const VARIANCE_FLOOR: f64 = 1e-15;

/// An open frequency interval `(low_hz, high_hz)` in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    /// Lower cutoff (exclusive).
    pub low_hz: f64,
    /// Upper cutoff (exclusive).
    pub high_hz: f64,
}

impl FrequencyBand {
    /// Create a band.
    #[must_use]
    pub const fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }

    /// Whether a frequency lies strictly inside the band.
    #[must_use]
    pub fn contains(&self, frequency_hz: f64) -> bool {
        frequency_hz > self.low_hz && frequency_hz < self.high_hz
    }
}

/// Result of a spectral estimation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEstimate {
    /// Dominant frequency in Hz (0 when nothing measurable).
    pub frequency_hz: f64,
    /// Fraction of in-band power carried by the dominant bin, in [0, 1].
    pub confidence: f64,
}

impl FrequencyEstimate {
    /// The neutral estimate: no measurable periodicity.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            frequency_hz: 0.0,
            confidence: 0.0,
        }
    }
}

/// Spectral periodicity estimator for a fixed sample rate.
#[derive(Debug, Clone)]
pub struct FrequencyEstimator {
    /// Sample rate in Hz.
    sample_rate_hz: f64,
    /// Warm-up minimum; fewer samples yield the neutral estimate.
    min_samples: usize,
}

impl FrequencyEstimator {
    /// Create an estimator.
    ///
    /// - `sample_rate_hz`: rate at which samples were captured.
    /// - `min_samples`: warm-up minimum before any estimate is produced.
    #[must_use]
    pub fn new(sample_rate_hz: f64, min_samples: usize) -> Self {
        Self {
            sample_rate_hz,
            min_samples,
        }
    }

    /// Sample rate in Hz.
    #[must_use]
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Estimate the dominant periodicity of `samples` within `band`.
    ///
    /// Returns [`FrequencyEstimate::none`] when the window is below the
    /// warm-up minimum, the signal has (numerically) zero variance, or no
    /// DFT bin falls strictly inside the band. Ties on bin power resolve
    /// to the lowest frequency.
    #[must_use]
    pub fn estimate(&self, samples: &[f64], band: FrequencyBand) -> FrequencyEstimate {
        let n = samples.len();
        if n < self.min_samples {
            return FrequencyEstimate::none();
        }

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        if variance < VARIANCE_FLOOR {
            return FrequencyEstimate::none();
        }
        let std_dev = variance.sqrt();

        let mut buffer: Vec<Complex64> = samples
            .iter()
            .map(|&x| Complex64::new((x - mean) / std_dev, 0.0))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        // Positive-frequency bins in ascending order; `>` keeps the first
        // occurrence on ties.
        let mut best_freq = 0.0;
        let mut best_power = f64::MIN;
        let mut total_power = 0.0;
        let mut in_band = 0usize;

        for (k, value) in buffer.iter().enumerate().take((n - 1) / 2 + 1).skip(1) {
            let frequency = k as f64 * self.sample_rate_hz / n as f64;
            if !band.contains(frequency) {
                continue;
            }
            let power = value.norm_sqr();
            total_power += power;
            in_band += 1;
            if power > best_power {
                best_power = power;
                best_freq = frequency;
            }
        }

        if in_band == 0 || total_power <= 0.0 {
            return FrequencyEstimate::none();
        }

        FrequencyEstimate {
            frequency_hz: best_freq,
            confidence: best_power / total_power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sinusoid(freq_hz: f64, sample_rate: f64, count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn below_warmup_returns_none() {
        let est = FrequencyEstimator::new(30.0, 60);
        let samples = sinusoid(1.2, 30.0, 59);
        let result = est.estimate(&samples, FrequencyBand::new(0.7, 4.0));
        assert_eq!(result, FrequencyEstimate::none());
    }

    #[test]
    fn exactly_warmup_produces_estimate() {
        let est = FrequencyEstimator::new(30.0, 60);
        let samples = sinusoid(1.2, 30.0, 60);
        let result = est.estimate(&samples, FrequencyBand::new(0.7, 4.0));
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn constant_signal_returns_none_for_all_bands() {
        let est = FrequencyEstimator::new(30.0, 60);
        let samples = vec![42.5; 150];
        for band in [
            FrequencyBand::new(0.7, 4.0),
            FrequencyBand::new(0.1, 0.5),
            FrequencyBand::new(0.0, 15.0),
        ] {
            assert_eq!(est.estimate(&samples, band), FrequencyEstimate::none());
        }
    }

    #[test]
    fn empty_band_returns_none() {
        let est = FrequencyEstimator::new(30.0, 60);
        let samples = sinusoid(1.2, 30.0, 90);
        // Band narrower than one bin spacing near its edges.
        let result = est.estimate(&samples, FrequencyBand::new(14.0, 14.01));
        assert_eq!(result, FrequencyEstimate::none());
    }

    #[test]
    fn pure_tone_found_within_bin_resolution() {
        // 90 samples at 30 Hz: bin resolution is 1/3 Hz.
        let est = FrequencyEstimator::new(30.0, 60);
        let samples = sinusoid(1.2, 30.0, 90);
        let result = est.estimate(&samples, FrequencyBand::new(0.7, 4.0));

        let resolution = 30.0 / 90.0;
        assert!(
            (result.frequency_hz - 1.2).abs() <= resolution,
            "dominant frequency {} not within one bin of 1.2 Hz",
            result.frequency_hz,
        );
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn dominant_bin_is_maximum_power_bin() {
        let sample_rate = 30.0;
        let n = 90;
        let est = FrequencyEstimator::new(sample_rate, 60);
        let samples = sinusoid(1.2, sample_rate, n);
        let band = FrequencyBand::new(0.7, 4.0);
        let result = est.estimate(&samples, band);

        // Recompute in-band powers directly and confirm the reported
        // frequency carries the maximum.
        let mean = samples.iter().sum::<f64>() / n as f64;
        let std =
            (samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n as f64).sqrt();
        let normalized: Vec<Complex64> = samples
            .iter()
            .map(|&x| Complex64::new((x - mean) / std, 0.0))
            .collect();
        let mut buffer = normalized;
        FftPlanner::new().plan_fft_forward(n).process(&mut buffer);

        let mut max_power = f64::MIN;
        let mut max_freq = 0.0;
        for (k, v) in buffer.iter().enumerate().take((n - 1) / 2 + 1).skip(1) {
            let f = k as f64 * sample_rate / n as f64;
            if band.contains(f) && v.norm_sqr() > max_power {
                max_power = v.norm_sqr();
                max_freq = f;
            }
        }
        assert!((result.frequency_hz - max_freq).abs() < 1e-9);
    }

    #[test]
    fn determinism() {
        let est = FrequencyEstimator::new(30.0, 60);
        let samples = sinusoid(2.4, 30.0, 120);
        let band = FrequencyBand::new(0.7, 4.0);
        let a = est.estimate(&samples, band);
        let b = est.estimate(&samples, band);
        assert_eq!(a, b);
    }

    #[test]
    fn confidence_is_power_fraction() {
        let est = FrequencyEstimator::new(30.0, 60);
        let samples = sinusoid(1.2, 30.0, 90);
        let result = est.estimate(&samples, FrequencyBand::new(0.7, 4.0));
        assert!(result.confidence > 0.0 && result.confidence <= 1.0);
    }

    #[test]
    fn noisy_tone_still_dominates() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let sample_rate = 30.0;
        let samples: Vec<f64> = (0..150)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (2.0 * PI * 1.5 * t).sin() + rng.gen_range(-0.2..0.2)
            })
            .collect();

        let est = FrequencyEstimator::new(sample_rate, 60);
        let result = est.estimate(&samples, FrequencyBand::new(0.7, 4.0));
        assert!(
            (result.frequency_hz - 1.5).abs() <= sample_rate / 150.0 * 2.0,
            "got {}",
            result.frequency_hz,
        );
    }

    #[test]
    fn band_contains_is_strict() {
        let band = FrequencyBand::new(0.7, 4.0);
        assert!(!band.contains(0.7));
        assert!(!band.contains(4.0));
        assert!(band.contains(0.71));
        assert!(band.contains(3.99));
    }
}
