//! Overall risk-level fusion.
//!
//! A pure priority cascade over the latest health and safety snapshots:
//! the first matching clause wins, and every cycle is evaluated from
//! scratch with no hysteresis. A heart rate of 0 means "not measurable"
//! and must never read as bradycardia, so the low-rate clause requires a
//! positive measurement.

use wardsight_core::{HealthMetrics, RiskLevel, SafetyMetrics};

/// Fuse the two metric snapshots into one risk level.
#[must_use]
pub fn fuse_risk(health: &HealthMetrics, safety: &SafetyMetrics) -> RiskLevel {
    if safety.fall_risk > 0.8
        || safety.self_harm_risk > 0.8
        || health.heart_rate > 150.0
        || (health.heart_rate > 0.0 && health.heart_rate < 40.0)
    {
        RiskLevel::Critical
    } else if safety.fall_risk > 0.6 || safety.self_harm_risk > 0.6 || health.tremor_score > 0.7 {
        RiskLevel::High
    } else if safety.fall_risk > 0.4
        || health.tremor_score > 0.5
        || !safety.dangerous_objects.is_empty()
    {
        RiskLevel::Medium
    } else if safety.fall_risk > 0.2 {
        RiskLevel::Low
    } else {
        RiskLevel::Safe
    }
}
