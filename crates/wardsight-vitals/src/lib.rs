//! Wardsight Vital Signs Library
//!
//! Contact-free vital-sign estimation from per-frame camera measurements:
//!
//! - **Heart rate** ([`HeartRateEstimator`]): remote photoplethysmography
//!   over the mean green-channel intensity of the face crop, with a
//!   heart-rate-derived stress score.
//! - **Breathing** ([`BreathingEstimator`]): respiratory rate from the
//!   mean motion magnitude inside the chest region, with an apnea risk
//!   score.
//! - **Tremor** ([`TremorEstimator`]): per-hand wrist velocity-variance
//!   scoring with a severity grade.
//! - **Skin color** ([`SkinColorAnalyzer`]): HSV discoloration heuristics
//!   over the face crop.
//!
//! All estimators are infallible: a missing or degenerate input channel
//! produces that estimator's neutral result rather than an error, so one
//! bad channel never blocks the rest of the pipeline.

pub mod breathing;
pub mod heartrate;
pub mod skin;
pub mod tremor;

pub use breathing::{BreathingConfig, BreathingEstimate, BreathingEstimator};
pub use heartrate::{HeartRateConfig, HeartRateEstimate, HeartRateEstimator};
pub use skin::{SkinAnalysis, SkinColorAnalyzer};
pub use tremor::{HandSide, HandTremor, TremorEstimate, TremorEstimator, TremorSeverity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
