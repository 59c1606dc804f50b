//! Atomic snapshot publishing.
//!
//! Each cycle publishes one immutable [`MonitorSnapshot`] by swapping an
//! `Arc` under a `parking_lot::RwLock`. Readers clone the `Arc` and see
//! either the whole previous snapshot or the whole new one, never a torn
//! mix of fields from different cycles.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use wardsight_core::{Alert, HealthMetrics, RiskLevel, SafetyMetrics};

/// Immutable per-cycle state for dashboards and API readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    /// Latest health snapshot.
    pub health: HealthMetrics,
    /// Latest safety snapshot.
    pub safety: SafetyMetrics,
    /// Fused risk level.
    pub risk_level: RiskLevel,
    /// Current alerts (at most 5).
    pub alerts: Vec<Alert>,
    /// Frames processed so far.
    pub frames_processed: u64,
    /// Publish time.
    pub updated_at: DateTime<Utc>,
}

impl Default for MonitorSnapshot {
    fn default() -> Self {
        Self {
            health: HealthMetrics::default(),
            safety: SafetyMetrics::default(),
            risk_level: RiskLevel::Safe,
            alerts: Vec::new(),
            frames_processed: 0,
            updated_at: Utc::now(),
        }
    }
}

/// Shared cell holding the most recent snapshot.
#[derive(Debug)]
pub struct SnapshotCell {
    inner: RwLock<Arc<MonitorSnapshot>>,
}

impl SnapshotCell {
    /// Create a cell holding a default (quiet) snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(MonitorSnapshot::default())),
        }
    }

    /// Replace the current snapshot.
    pub fn publish(&self, snapshot: MonitorSnapshot) {
        *self.inner.write() = Arc::new(snapshot);
    }

    /// Read the current snapshot. The returned `Arc` stays valid across
    /// later publishes.
    #[must_use]
    pub fn load(&self) -> Arc<MonitorSnapshot> {
        Arc::clone(&self.inner.read())
    }
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cell_holds_quiet_snapshot() {
        let cell = SnapshotCell::new();
        let snapshot = cell.load();
        assert_eq!(snapshot.risk_level, RiskLevel::Safe);
        assert!(snapshot.alerts.is_empty());
        assert_eq!(snapshot.frames_processed, 0);
    }

    #[test]
    fn publish_replaces_snapshot() {
        let cell = SnapshotCell::new();
        cell.publish(MonitorSnapshot {
            risk_level: RiskLevel::High,
            frames_processed: 10,
            ..MonitorSnapshot::default()
        });
        let snapshot = cell.load();
        assert_eq!(snapshot.risk_level, RiskLevel::High);
        assert_eq!(snapshot.frames_processed, 10);
    }

    #[test]
    fn loaded_snapshot_survives_later_publishes() {
        let cell = SnapshotCell::new();
        let before = cell.load();
        cell.publish(MonitorSnapshot {
            risk_level: RiskLevel::Critical,
            ..MonitorSnapshot::default()
        });
        // The old Arc still reads the old state.
        assert_eq!(before.risk_level, RiskLevel::Safe);
        assert_eq!(cell.load().risk_level, RiskLevel::Critical);
    }

    #[test]
    fn snapshot_serializes() {
        let snapshot = MonitorSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"risk_level\""));
    }
}
