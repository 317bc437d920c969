// ABOUTME: Engine configuration for readiness, planning, deviation, and adaptation components
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Provides typed configuration for every engine component. There is no global instance:
//! callers build an [`IntelligenceConfig`] (usually with [`IntelligenceConfig::load`]) and hand
//! each section to the component that needs it.
//!
//! # Module Structure
//!
//! - `readiness` - Fatigue score weights, fatigue levels, ACWR bands, confidence
//! - `planning` - Phase proportions, cutbacks, load progression
//! - `deviation` - Compliance bounds, ACWR breach, schedule drift
//! - `adaptation` - Trigger thresholds and response multipliers

pub mod adaptation;
pub mod deviation;
pub mod error;
pub mod planning;
pub mod readiness;

pub use adaptation::{
    AdaptationConfig, InjuryRiskResponse, OverreachingResponse, TaperResponse,
    UndertrainingResponse,
};
pub use deviation::DeviationConfig;
pub use error::ConfigError;
pub use planning::{PhaseProportions, PlanningConfig};
pub use readiness::{
    AcwrBands, ConfidenceConfig, DeviationAlertConfig, FatigueThresholds, ReadinessConfig,
    ReadinessWeights,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Main engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Readiness and fatigue predictor
    pub readiness: ReadinessConfig,
    /// Plan generator
    pub planning: PlanningConfig,
    /// Deviation detector
    pub deviation: DeviationConfig,
    /// Adaptation engine
    pub adaptation: AdaptationConfig,
}

impl IntelligenceConfig {
    /// Load configuration: defaults, then environment overrides, then validation
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(
            readiness.tsb_weight = config.readiness.weights.tsb,
            planning.cutback_frequency = config.planning.cutback_frequency,
            planning.progression_rate = config.planning.progression_rate,
            "Intelligence configuration loaded"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first rule the configuration violates
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_readiness()?;
        self.validate_planning()?;
        self.validate_deviation()?;
        self.validate_adaptation()
    }

    fn validate_readiness(&self) -> Result<(), ConfigError> {
        let weights = &self.readiness.weights;
        let all = [
            weights.tsb,
            weights.acwr,
            weights.hrv,
            weights.resting_hr,
            weights.sleep,
            weights.subjective,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidWeights(
                "Readiness weights must be non-negative numbers",
            ));
        }
        if (weights.total() - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "Readiness weights must sum to 1.0",
            ));
        }

        let levels = &self.readiness.fatigue_thresholds;
        if !(0.0 < levels.recovered
            && levels.recovered < levels.moderate
            && levels.moderate < levels.fatigued
            && levels.fatigued < levels.exhausted
            && levels.exhausted < 100.0)
        {
            return Err(ConfigError::InvalidRange(
                "Fatigue thresholds must be ascending within 0-100",
            ));
        }

        let bands = &self.readiness.acwr_bands;
        if !(0.0 < bands.undertraining_below
            && bands.undertraining_below < bands.caution_above
            && bands.caution_above < bands.danger_at)
        {
            return Err(ConfigError::InvalidRange(
                "ACWR bands must be ordered: undertraining < caution < danger",
            ));
        }

        let confidence = &self.readiness.confidence;
        if !(0.0..=1.0).contains(&confidence.load_only)
            || !(0.0..=1.0).contains(&confidence.max)
            || confidence.load_only > confidence.max
        {
            return Err(ConfigError::ValueOutOfRange(
                "Readiness confidence bounds must lie in 0-1 with load_only <= max",
            ));
        }
        Ok(())
    }

    fn validate_planning(&self) -> Result<(), ConfigError> {
        let planning = &self.planning;
        let phases = &planning.phase_proportions;
        if phases.base <= 0.0 || phases.build <= 0.0 || phases.peak <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "Phase proportions must be positive",
            ));
        }
        if phases.total() > 1.0 + f64::EPSILON {
            return Err(ConfigError::InvalidWeights(
                "Phase proportions must sum to at most 1.0",
            ));
        }
        if !(3..=4).contains(&planning.cutback_frequency) {
            return Err(ConfigError::ValueOutOfRange(
                "Cutback frequency must be every 3 or 4 weeks",
            ));
        }
        if !(planning.cutback_factor > 0.0 && planning.cutback_factor < 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "Cutback factor must be between 0 and 1 (exclusive)",
            ));
        }
        if !(planning.progression_rate > 0.0 && planning.progression_rate <= 0.15) {
            return Err(ConfigError::ValueOutOfRange(
                "Progression rate must be in (0, 0.15]",
            ));
        }
        if planning.default_weekly_load <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Default weekly load must be positive",
            ));
        }
        if planning.max_quality_sessions > 3 {
            return Err(ConfigError::ValueOutOfRange(
                "At most 3 quality sessions per week are supported",
            ));
        }
        if planning.long_run_share < 1.0 || planning.quality_share < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Long run and quality shares must be at least an easy day",
            ));
        }
        Ok(())
    }

    fn validate_deviation(&self) -> Result<(), ConfigError> {
        let deviation = &self.deviation;
        if !(0.0 < deviation.undershoot_pct
            && deviation.undershoot_pct < 100.0
            && deviation.overshoot_pct > 100.0)
        {
            return Err(ConfigError::InvalidRange(
                "Compliance bounds must satisfy 0 < undershoot < 100 < overshoot",
            ));
        }
        if deviation.drift_run_length < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "Schedule drift needs a run of at least 2 sessions",
            ));
        }
        if deviation.acwr_breach <= 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "ACWR breach threshold must be above 1.0",
            ));
        }
        Ok(())
    }

    fn validate_adaptation(&self) -> Result<(), ConfigError> {
        let adaptation = &self.adaptation;
        if !(adaptation.high_priority_confidence > 0.0 && adaptation.high_priority_confidence < 1.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "High-priority confidence threshold must be between 0 and 1",
            ));
        }

        let multipliers = [
            adaptation.taper.volume_multiplier,
            adaptation.taper.final_volume_multiplier,
            adaptation.overreaching.max_volume_multiplier,
            adaptation.overreaching.min_volume_multiplier,
            adaptation.overreaching.intensity_multiplier,
            adaptation.injury_risk.volume_multiplier,
            1.0 + adaptation.undertraining.max_increase,
        ];
        if multipliers.iter().any(|m| !(*m > 0.0 && *m < 2.0)) {
            return Err(ConfigError::ValueOutOfRange(
                "Adaptation multipliers must lie in (0, 2)",
            ));
        }
        if adaptation.overreaching.min_volume_multiplier
            > adaptation.overreaching.max_volume_multiplier
        {
            return Err(ConfigError::InvalidRange(
                "Overreaching min volume multiplier must not exceed the max",
            ));
        }
        if adaptation.taper.final_days > adaptation.taper.window_days
            || adaptation.taper.window_days <= 0
        {
            return Err(ConfigError::InvalidRange(
                "Taper final days must fall inside a positive taper window",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Readiness weights
        Self::apply_env_var(
            "INTELLIGENCE_READINESS_TSB_WEIGHT",
            &mut self.readiness.weights.tsb,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_READINESS_ACWR_WEIGHT",
            &mut self.readiness.weights.acwr,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_READINESS_HRV_WEIGHT",
            &mut self.readiness.weights.hrv,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_READINESS_RHR_WEIGHT",
            &mut self.readiness.weights.resting_hr,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_READINESS_SLEEP_WEIGHT",
            &mut self.readiness.weights.sleep,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_READINESS_SUBJECTIVE_WEIGHT",
            &mut self.readiness.weights.subjective,
        )?;

        // Plan generation
        Self::apply_env_var(
            "INTELLIGENCE_PLAN_CUTBACK_FREQUENCY",
            &mut self.planning.cutback_frequency,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_PLAN_CUTBACK_FACTOR",
            &mut self.planning.cutback_factor,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_PLAN_PROGRESSION_RATE",
            &mut self.planning.progression_rate,
        )?;

        // Deviation detection
        Self::apply_env_var(
            "INTELLIGENCE_DEVIATION_UNDERSHOOT_PCT",
            &mut self.deviation.undershoot_pct,
        )?;
        Self::apply_env_var(
            "INTELLIGENCE_DEVIATION_OVERSHOOT_PCT",
            &mut self.deviation.overshoot_pct,
        )?;

        // Adaptation
        Self::apply_env_var(
            "INTELLIGENCE_ADAPTATION_HIGH_PRIORITY_CONFIDENCE",
            &mut self.adaptation.high_priority_confidence,
        )?;

        Ok(self)
    }
}
