//! Alert generation, deduplication, and capping.
//!
//! Rules run in a fixed order (safety first, then health) so the emitted
//! batch is deterministic for a given metric snapshot. Each rule fires at
//! most one alert per cycle; deduplication keeps the first alert of each
//! kind, and the emitted batch is capped to a fixed total.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wardsight_core::{Alert, AlertKind, HealthMetrics, SafetyMetrics, Severity};

/// One cycle's alert output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertBatch {
    /// Deduplicated alerts before capping; this is what history records.
    pub deduplicated: Vec<Alert>,
    /// Capped batch actually delivered this cycle.
    pub emitted: Vec<Alert>,
}

/// Alert engine over the per-cycle metric snapshots.
#[derive(Debug, Clone)]
pub struct AlertManager {
    // Caps the emitted batch total; the name follows the dashboard
    // config key it is wired to.
    max_alerts_per_type: usize,
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(5)
    }
}

impl AlertManager {
    /// Create a manager with the given emitted-batch cap.
    #[must_use]
    pub fn new(max_alerts_per_type: usize) -> Self {
        Self {
            max_alerts_per_type,
        }
    }

    /// Emitted-batch cap.
    #[must_use]
    pub fn max_alerts_per_type(&self) -> usize {
        self.max_alerts_per_type
    }

    /// Evaluate every rule, deduplicate, and cap.
    #[must_use]
    pub fn process(&self, health: &HealthMetrics, safety: &SafetyMetrics) -> AlertBatch {
        let raw = self.evaluate(health, safety);
        self.deduplicate_and_cap(raw)
    }

    /// Run the rule tables in order: safety rules, then health rules.
    #[must_use]
    pub fn evaluate(&self, health: &HealthMetrics, safety: &SafetyMetrics) -> Vec<Alert> {
        let mut alerts = Vec::new();
        self.check_safety(safety, &mut alerts);
        self.check_health(health, &mut alerts);
        alerts
    }

    fn check_safety(&self, metrics: &SafetyMetrics, alerts: &mut Vec<Alert>) {
        if metrics.fall_risk > 0.7 {
            alerts.push(
                Alert::new(
                    AlertKind::FallCritical,
                    Severity::Critical,
                    "CRITICAL: Fall detected or imminent!",
                )
                .with_detail("fall_risk", format!("{:.2}", metrics.fall_risk)),
            );
        } else if metrics.fall_risk > 0.5 {
            alerts.push(
                Alert::new(
                    AlertKind::FallWarning,
                    Severity::High,
                    "WARNING: Patient at risk of falling",
                )
                .with_detail("fall_risk", format!("{:.2}", metrics.fall_risk)),
            );
        }

        if metrics.self_harm_risk > 0.7 {
            alerts.push(
                Alert::new(
                    AlertKind::SelfHarmCritical,
                    Severity::Critical,
                    "CRITICAL: Potential self-harm detected!",
                )
                .with_detail("self_harm_risk", format!("{:.2}", metrics.self_harm_risk)),
            );
        } else if metrics.self_harm_risk > 0.4 {
            alerts.push(
                Alert::new(
                    AlertKind::SelfHarmWarning,
                    Severity::High,
                    "WARNING: Self-harm risk detected",
                )
                .with_detail("self_harm_risk", format!("{:.2}", metrics.self_harm_risk)),
            );
        }

        if metrics.aggressive_motion > 0.6 {
            alerts.push(
                Alert::new(
                    AlertKind::AggressiveMotion,
                    Severity::High,
                    "WARNING: Aggressive motion detected",
                )
                .with_detail(
                    "aggression_score",
                    format!("{:.2}", metrics.aggressive_motion),
                ),
            );
        }

        if !metrics.dangerous_objects.is_empty() {
            alerts.push(
                Alert::new(
                    AlertKind::DangerousObject,
                    Severity::Critical,
                    format!(
                        "CRITICAL: Dangerous object detected: {}",
                        metrics.dangerous_objects.join(", "),
                    ),
                )
                .with_detail("objects", metrics.dangerous_objects.join(", ")),
            );
        }
    }

    fn check_health(&self, metrics: &HealthMetrics, alerts: &mut Vec<Alert>) {
        if metrics.heart_rate > 140.0 {
            alerts.push(
                Alert::new(
                    AlertKind::HighHeartRate,
                    Severity::High,
                    format!(
                        "WARNING: High heart rate detected: {:.0} BPM",
                        metrics.heart_rate,
                    ),
                )
                .with_detail("heart_rate", format!("{:.0}", metrics.heart_rate)),
            );
        } else if metrics.heart_rate > 0.0 && metrics.heart_rate < 50.0 {
            alerts.push(
                Alert::new(
                    AlertKind::LowHeartRate,
                    Severity::High,
                    format!(
                        "WARNING: Low heart rate detected: {:.0} BPM",
                        metrics.heart_rate,
                    ),
                )
                .with_detail("heart_rate", format!("{:.0}", metrics.heart_rate)),
            );
        }

        if metrics.tremor_score > 0.7 {
            alerts.push(
                Alert::new(
                    AlertKind::TremorDetected,
                    Severity::Medium,
                    "ALERT: Significant tremor detected (Parkinson's risk)",
                )
                .with_detail("tremor_score", format!("{:.2}", metrics.tremor_score)),
            );
        }

        if metrics.stress_level > 0.8 {
            alerts.push(
                Alert::new(
                    AlertKind::HighStress,
                    Severity::Medium,
                    "ALERT: High stress level detected",
                )
                .with_detail("stress_level", format!("{:.2}", metrics.stress_level)),
            );
        }
    }

    /// Keep the first alert of each kind, then truncate the emitted list
    /// to the cap. The pre-cap list is preserved for history.
    #[must_use]
    pub fn deduplicate_and_cap(&self, alerts: Vec<Alert>) -> AlertBatch {
        let mut seen: HashSet<AlertKind> = HashSet::new();
        let mut deduplicated = Vec::with_capacity(alerts.len());

        for alert in alerts {
            if seen.insert(alert.kind) {
                deduplicated.push(alert);
            }
        }

        let mut emitted = deduplicated.clone();
        emitted.truncate(self.max_alerts_per_type);

        AlertBatch {
            deduplicated,
            emitted,
        }
    }
}
