//! Wardsight Signal Processing Library
//!
//! Building blocks shared by the vital-sign estimators:
//!
//! - **Sample windows** ([`SampleWindow`]): fixed-capacity FIFO buffers
//!   holding the most recent per-frame measurements.
//! - **Spectral estimation** ([`FrequencyEstimator`]): dominant-periodicity
//!   extraction within a frequency band via the discrete Fourier
//!   transform, with a power-ratio confidence score.
//!
//! # Example
//!
//! ```
//! use wardsight_signal::{FrequencyBand, FrequencyEstimator, SampleWindow};
//!
//! let mut window = SampleWindow::new(150);
//! let estimator = FrequencyEstimator::new(30.0, 60);
//!
//! for i in 0..90 {
//!     let t = i as f64 / 30.0;
//!     window.push((2.0 * std::f64::consts::PI * 1.2 * t).sin());
//! }
//!
//! let estimate = estimator.estimate(window.as_slice(), FrequencyBand::new(0.7, 4.0));
//! assert!(estimate.confidence > 0.0);
//! ```

pub mod spectrum;
pub mod window;

pub use spectrum::{FrequencyBand, FrequencyEstimate, FrequencyEstimator};
pub use window::SampleWindow;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Warm-up sample count shared by the vital-sign estimators.
pub const VITAL_WARMUP_SAMPLES: usize = 60;
