//! Patient monitoring sessions.
//!
//! A session accumulates unbounded metric and alert histories alongside
//! the current references that each monitoring cycle overwrites. History
//! keeps every deduplicated alert; the current-alert list is fully
//! replaced each cycle with the tail of the emitted batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wardsight_core::{Alert, HealthMetrics, RiskLevel, SafetyMetrics};

use crate::alerting::AlertBatch;

/// Current-alert list length.
const CURRENT_ALERT_TAIL: usize = 5;

/// One patient's monitoring session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSession {
    /// Unique session id.
    pub session_id: Uuid,
    /// External patient identifier.
    pub patient_id: String,
    /// Display name.
    pub patient_name: String,
    /// Session start time.
    pub started_at: DateTime<Utc>,
    /// Latest fused risk level.
    pub risk_level: RiskLevel,
    /// Latest health snapshot.
    pub current_health: HealthMetrics,
    /// Latest safety snapshot.
    pub current_safety: SafetyMetrics,
    /// Last cycle's emitted alerts (at most 5).
    pub current_alerts: Vec<Alert>,
    /// Every health snapshot, oldest first.
    pub health_history: Vec<HealthMetrics>,
    /// Every safety snapshot, oldest first.
    pub safety_history: Vec<SafetyMetrics>,
    /// Every deduplicated alert, oldest first.
    pub alert_history: Vec<Alert>,
    /// Frames processed so far.
    pub frames_processed: u64,
}

impl PatientSession {
    /// Start a session for a patient.
    #[must_use]
    pub fn new(patient_id: impl Into<String>, patient_name: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            patient_id: patient_id.into(),
            patient_name: patient_name.into(),
            started_at: Utc::now(),
            risk_level: RiskLevel::Safe,
            current_health: HealthMetrics::default(),
            current_safety: SafetyMetrics::default(),
            current_alerts: Vec::new(),
            health_history: Vec::new(),
            safety_history: Vec::new(),
            alert_history: Vec::new(),
            frames_processed: 0,
        }
    }

    /// Record a cycle's health snapshot: overwrite current, append history.
    pub fn update_health(&mut self, metrics: HealthMetrics) {
        self.current_health = metrics.clone();
        self.health_history.push(metrics);
    }

    /// Record a cycle's safety snapshot: overwrite current, append history.
    pub fn update_safety(&mut self, metrics: SafetyMetrics) {
        self.current_safety = metrics.clone();
        self.safety_history.push(metrics);
    }

    /// Record a cycle's alert batch.
    ///
    /// The full deduplicated batch goes to history; the current list is
    /// replaced with the last 5 emitted alerts, so a quiet cycle clears
    /// any stale alerts from view.
    pub fn record_alert_batch(&mut self, batch: &AlertBatch) {
        self.alert_history.extend(batch.deduplicated.iter().cloned());

        let tail_start = batch.emitted.len().saturating_sub(CURRENT_ALERT_TAIL);
        self.current_alerts = batch.emitted[tail_start..].to_vec();
    }

    /// Aggregate view of the session so far.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id,
            patient_id: self.patient_id.clone(),
            patient_name: self.patient_name.clone(),
            risk_level: self.risk_level,
            frames_processed: self.frames_processed,
            total_alerts: self.alert_history.len(),
            current_alerts: self.current_alerts.len(),
            heart_rate: self.current_health.heart_rate,
            breathing_rate: self.current_health.breathing_rate,
            stress_level: self.current_health.stress_level,
            tremor_score: self.current_health.tremor_score,
            fall_risk: self.current_safety.fall_risk,
            self_harm_risk: self.current_safety.self_harm_risk,
            aggressive_motion: self.current_safety.aggressive_motion,
            dangerous_object_count: self.current_safety.dangerous_objects.len(),
        }
    }

    /// Summary statistics over the health history, or `None` when no
    /// cycle has run yet.
    #[must_use]
    pub fn health_stats(&self) -> Option<HealthStats> {
        if self.health_history.is_empty() {
            return None;
        }

        let mut stats = HealthStats {
            samples: self.health_history.len(),
            mean_heart_rate: 0.0,
            min_heart_rate: f64::MAX,
            max_heart_rate: f64::MIN,
            mean_breathing_rate: 0.0,
            min_breathing_rate: f64::MAX,
            max_breathing_rate: f64::MIN,
        };

        for metrics in &self.health_history {
            stats.mean_heart_rate += metrics.heart_rate;
            stats.min_heart_rate = stats.min_heart_rate.min(metrics.heart_rate);
            stats.max_heart_rate = stats.max_heart_rate.max(metrics.heart_rate);
            stats.mean_breathing_rate += metrics.breathing_rate;
            stats.min_breathing_rate = stats.min_breathing_rate.min(metrics.breathing_rate);
            stats.max_breathing_rate = stats.max_breathing_rate.max(metrics.breathing_rate);
        }
        let count = stats.samples as f64;
        stats.mean_heart_rate /= count;
        stats.mean_breathing_rate /= count;

        Some(stats)
    }
}

/// Aggregate session view for dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session id.
    pub session_id: Uuid,
    /// External patient identifier.
    pub patient_id: String,
    /// Display name.
    pub patient_name: String,
    /// Latest fused risk level.
    pub risk_level: RiskLevel,
    /// Frames processed so far.
    pub frames_processed: u64,
    /// Alerts recorded in history.
    pub total_alerts: usize,
    /// Alerts currently in view.
    pub current_alerts: usize,
    /// Latest heart rate in BPM.
    pub heart_rate: f64,
    /// Latest breathing rate in breaths per minute.
    pub breathing_rate: f64,
    /// Latest stress score.
    pub stress_level: f64,
    /// Latest tremor score.
    pub tremor_score: f64,
    /// Latest fall risk.
    pub fall_risk: f64,
    /// Latest self-harm risk.
    pub self_harm_risk: f64,
    /// Latest aggression score.
    pub aggressive_motion: f64,
    /// Dangerous objects currently in view.
    pub dangerous_object_count: usize,
}

/// Summary statistics over the health history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthStats {
    /// History length.
    pub samples: usize,
    /// Mean heart rate in BPM.
    pub mean_heart_rate: f64,
    /// Minimum heart rate in BPM.
    pub min_heart_rate: f64,
    /// Maximum heart rate in BPM.
    pub max_heart_rate: f64,
    /// Mean breathing rate.
    pub mean_breathing_rate: f64,
    /// Minimum breathing rate.
    pub min_breathing_rate: f64,
    /// Maximum breathing rate.
    pub max_breathing_rate: f64,
}
