//! Monitor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the monitoring pipeline and loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// External patient identifier.
    pub patient_id: String,
    /// Display name.
    pub patient_name: String,
    /// Frame rate the estimators assume, in Hz.
    pub fps: f64,
    /// Pause between monitoring cycles.
    pub cycle_interval: Duration,
    /// Emitted alert batch cap.
    pub max_alerts_per_type: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            patient_id: "P001".to_string(),
            patient_name: "Patient".to_string(),
            fps: 30.0,
            cycle_interval: Duration::from_millis(50),
            max_alerts_per_type: 5,
        }
    }
}

impl MonitorConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }
}

/// Builder for [`MonitorConfig`] with clamped setters.
#[derive(Debug, Clone, Default)]
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    /// Set the patient identifier.
    #[must_use]
    pub fn patient_id(mut self, id: impl Into<String>) -> Self {
        self.config.patient_id = id.into();
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn patient_name(mut self, name: impl Into<String>) -> Self {
        self.config.patient_name = name.into();
        self
    }

    /// Set the frame rate, clamped to [1, 240] Hz.
    #[must_use]
    pub fn fps(mut self, fps: f64) -> Self {
        self.config.fps = fps.clamp(1.0, 240.0);
        self
    }

    /// Set the cycle interval, floored at 1 ms.
    #[must_use]
    pub fn cycle_interval(mut self, interval: Duration) -> Self {
        self.config.cycle_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the emitted alert batch cap, floored at 1.
    #[must_use]
    pub fn max_alerts_per_type(mut self, cap: usize) -> Self {
        self.config.max_alerts_per_type = cap.max(1);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> MonitorConfig {
        self.config
    }
}
