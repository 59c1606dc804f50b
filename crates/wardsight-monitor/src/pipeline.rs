//! The per-frame monitoring pipeline.
//!
//! One `update` call runs every estimator over one frame's inputs,
//! records the snapshots in the session, fuses the risk level, and runs
//! the alert engine. Every estimator runs every cycle regardless of
//! which channels are present: an absent channel yields that estimator's
//! neutral result and never blocks the others.

use chrono::Utc;
use wardsight_core::{Alert, FrameInput, HealthMetrics, RiskLevel, SafetyMetrics};
use wardsight_vitals::{
    BreathingConfig, BreathingEstimator, HeartRateConfig, HeartRateEstimator, SkinColorAnalyzer,
    TremorEstimator,
};

use crate::alerting::AlertManager;
use crate::config::MonitorConfig;
use crate::fusion::fuse_risk;
use crate::motion::MotionRiskEstimator;
use crate::objects::screen_dangerous_objects;
use crate::session::PatientSession;

/// One monitoring cycle's output.
#[derive(Debug, Clone)]
pub struct CycleOutput {
    /// Health snapshot recorded this cycle.
    pub health: HealthMetrics,
    /// Safety snapshot recorded this cycle.
    pub safety: SafetyMetrics,
    /// Fused risk level.
    pub risk_level: RiskLevel,
    /// Emitted (deduplicated, capped) alerts.
    pub alerts: Vec<Alert>,
}

/// Stateful pipeline combining all estimators with a session.
#[derive(Debug)]
pub struct MonitorPipeline {
    heart_rate: HeartRateEstimator,
    breathing: BreathingEstimator,
    tremor: TremorEstimator,
    skin: SkinColorAnalyzer,
    motion: MotionRiskEstimator,
    alerts: AlertManager,
    session: PatientSession,
}

impl MonitorPipeline {
    /// Create a pipeline for a patient.
    #[must_use]
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            heart_rate: HeartRateEstimator::with_config(HeartRateConfig {
                fps: config.fps,
                ..HeartRateConfig::default()
            }),
            breathing: BreathingEstimator::with_config(BreathingConfig {
                fps: config.fps,
                ..BreathingConfig::default()
            }),
            tremor: TremorEstimator::new(),
            skin: SkinColorAnalyzer::new(),
            motion: MotionRiskEstimator::new(),
            alerts: AlertManager::new(config.max_alerts_per_type),
            session: PatientSession::new(config.patient_id.clone(), config.patient_name.clone()),
        }
    }

    /// The session this pipeline feeds.
    #[must_use]
    pub fn session(&self) -> &PatientSession {
        &self.session
    }

    /// Run one monitoring cycle over one frame's inputs.
    pub fn update(&mut self, input: &FrameInput) -> CycleOutput {
        let heart = self.heart_rate.update(input.face.as_ref());
        let breathing = self.breathing.update(input.motion_field.as_ref());
        let tremor = self.tremor.update(&input.hand_tracks);
        let skin = self.skin.analyze(input.face.as_ref());
        let motion = self.motion.update(&input.landmarks);
        let dangerous_objects = screen_dangerous_objects(&input.detections);

        let now = Utc::now();
        let health = HealthMetrics {
            heart_rate: heart.bpm,
            breathing_rate: breathing.breaths_per_minute,
            stress_level: heart.stress_level,
            tremor_score: tremor.score,
            skin_color_risk: skin.status,
            timestamp: now,
        };
        let safety = SafetyMetrics {
            fall_risk: motion.fall_risk,
            self_harm_risk: motion.self_harm_risk,
            aggressive_motion: motion.aggressive_motion,
            dangerous_objects,
            timestamp: now,
        };

        self.session.update_health(health.clone());
        self.session.update_safety(safety.clone());

        let risk_level = fuse_risk(&health, &safety);
        self.session.risk_level = risk_level;

        let batch = self.alerts.process(&health, &safety);
        self.session.record_alert_batch(&batch);
        self.session.frames_processed += 1;

        CycleOutput {
            health,
            safety,
            risk_level,
            alerts: batch.emitted,
        }
    }
}
