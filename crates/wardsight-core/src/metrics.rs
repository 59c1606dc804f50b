//! Metric snapshots, risk levels, and alert types.
//!
//! [`HealthMetrics`] and [`SafetyMetrics`] are immutable once built: each
//! monitoring cycle constructs fresh values, overwrites the session's
//! current references, and appends to the unbounded histories.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall patient risk level, ordered from safest to most severe.
///
/// Recomputed fresh every cycle from the latest metric snapshot alone;
/// there is no smoothing or hysteresis across cycles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RiskLevel {
    /// No elevated risk indicators.
    #[default]
    Safe,
    /// Mild fall-risk posture.
    Low,
    /// Moderate risk or a dangerous object in view.
    Medium,
    /// Strong fall/self-harm posture or severe tremor.
    High,
    /// Immediate danger: fall, self-harm, or extreme heart rate.
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Alert severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational.
    Low,
    /// Important but not urgent.
    Medium,
    /// Urgent attention needed.
    High,
    /// Immediate action required.
    Critical,
}

impl Severity {
    /// Numeric rank, lower = more severe (CRITICAL = 0, LOW = 3).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Skin color classification from face-crop HSV analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SkinColorStatus {
    /// No notable discoloration.
    #[default]
    Normal,
    /// Flushed complexion, elevated blood pressure risk.
    Flush,
    /// Pale complexion, low blood pressure or anemia risk.
    Pale,
    /// Yellow tint, diabetes or liver risk.
    YellowTint,
    /// Bluish tint, respiratory risk.
    Cyanotic,
}

impl std::fmt::Display for SkinColorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Flush => write!(f, "FLUSH - High BP Risk"),
            Self::Pale => write!(f, "PALE - Low BP Risk"),
            Self::YellowTint => write!(f, "YELLOW_TINT - Diabetes/Liver Risk"),
            Self::Cyanotic => write!(f, "CYANOTIC - Respiratory Risk"),
        }
    }
}

/// Health metric snapshot for one cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Heart rate in beats per minute (0 when not measurable).
    pub heart_rate: f64,
    /// Breathing rate in breaths per minute (0 when not measurable).
    pub breathing_rate: f64,
    /// Stress score [0, 1] derived from heart rate.
    pub stress_level: f64,
    /// Overall tremor score [0, 1].
    pub tremor_score: f64,
    /// Skin color classification.
    pub skin_color_risk: SkinColorStatus,
    /// Snapshot timestamp.
    pub timestamp: DateTime<Utc>,
}

impl Default for HealthMetrics {
    fn default() -> Self {
        Self {
            heart_rate: 0.0,
            breathing_rate: 0.0,
            stress_level: 0.0,
            tremor_score: 0.0,
            skin_color_risk: SkinColorStatus::Normal,
            timestamp: Utc::now(),
        }
    }
}

/// Safety metric snapshot for one cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyMetrics {
    /// Fall risk score [0, 1].
    pub fall_risk: f64,
    /// Self-harm risk score [0, 1].
    pub self_harm_risk: f64,
    /// Aggressive motion score [0, 1].
    pub aggressive_motion: f64,
    /// Labels of dangerous objects in view (deduplicated, first seen first).
    pub dangerous_objects: Vec<String>,
    /// Snapshot timestamp.
    pub timestamp: DateTime<Utc>,
}

impl Default for SafetyMetrics {
    fn default() -> Self {
        Self {
            fall_risk: 0.0,
            self_harm_risk: 0.0,
            aggressive_motion: 0.0,
            dangerous_objects: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

/// Alert type identifier.
///
/// Within one cycle no two alerts share a kind; the alert engine
/// deduplicates on this value keeping the first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Fall detected or imminent.
    FallCritical,
    /// Elevated fall risk.
    FallWarning,
    /// Potential self-harm posture.
    SelfHarmCritical,
    /// Self-harm risk indicators.
    SelfHarmWarning,
    /// Rapid aggressive arm motion.
    AggressiveMotion,
    /// Dangerous object in view.
    DangerousObject,
    /// Heart rate above the alert ceiling.
    HighHeartRate,
    /// Heart rate below the alert floor.
    LowHeartRate,
    /// Significant tremor.
    TremorDetected,
    /// High stress score.
    HighStress,
}

impl AlertKind {
    /// Stable string identifier, used for wire formats and deduplication
    /// diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FallCritical => "FALL_CRITICAL",
            Self::FallWarning => "FALL_WARNING",
            Self::SelfHarmCritical => "SELF_HARM_CRITICAL",
            Self::SelfHarmWarning => "SELF_HARM_WARNING",
            Self::AggressiveMotion => "AGGRESSIVE_MOTION",
            Self::DangerousObject => "DANGEROUS_OBJECT",
            Self::HighHeartRate => "HIGH_HEART_RATE",
            Self::LowHeartRate => "LOW_HEART_RATE",
            Self::TremorDetected => "TREMOR_DETECTED",
            Self::HighStress => "HIGH_STRESS",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable alert record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Alert type.
    pub kind: AlertKind,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Supporting details (metric name → formatted value).
    pub details: HashMap<String, String>,
}

impl Alert {
    /// Create an alert with empty details.
    #[must_use]
    pub fn new(kind: AlertKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            timestamp: Utc::now(),
            details: HashMap::new(),
        }
    }

    /// Attach a detail entry.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}
