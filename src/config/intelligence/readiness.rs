// ABOUTME: Readiness predictor configuration with component weights and fatigue thresholds
// ABOUTME: Configures signal blending, ACWR bands, and confidence accounting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Readiness Configuration
//!
//! Weights used to blend training-load and wellness signals into a fatigue score, the score
//! cut-offs for each fatigue level, and the ACWR band edges.
//!
//! # Scientific References
//!
//! - TSB: Banister training load model
//! - ACWR: Gabbett (2016), Hulin et al. (2016)
//! - HRV: Plews et al. (2013), Shaffer & Ginsberg (2017)

use pacewise_core::constants::acwr;
use serde::{Deserialize, Serialize};

/// Readiness predictor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Component weights
    pub weights: ReadinessWeights,
    /// Fatigue level cut-offs
    pub fatigue_thresholds: FatigueThresholds,
    /// ACWR risk bands
    pub acwr_bands: AcwrBands,
    /// Confidence accounting
    pub confidence: ConfidenceConfig,
    /// Baseline deviations worth a warning
    pub deviation_alerts: DeviationAlertConfig,
}

/// Weights of each signal in the fatigue score, renormalized over the signals present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessWeights {
    /// Training stress balance
    pub tsb: f64,
    /// Acute:chronic workload ratio
    pub acwr: f64,
    /// HRV against baseline
    pub hrv: f64,
    /// Resting heart rate against baseline
    pub resting_hr: f64,
    /// Sleep
    pub sleep: f64,
    /// Perceived fatigue and soreness
    pub subjective: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            tsb: 0.35,
            acwr: 0.25,
            hrv: 0.15,
            resting_hr: 0.10,
            sleep: 0.10,
            subjective: 0.05,
        }
    }
}

impl ReadinessWeights {
    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tsb + self.acwr + self.hrv + self.resting_hr + self.sleep + self.subjective
    }
}

/// Fatigue score lower bounds for each level above `Fresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueThresholds {
    /// Minimum score for `Recovered`
    pub recovered: f64,
    /// Minimum score for `Moderate`
    pub moderate: f64,
    /// Minimum score for `Fatigued`
    pub fatigued: f64,
    /// Minimum score for `Exhausted`
    pub exhausted: f64,
}

impl Default for FatigueThresholds {
    fn default() -> Self {
        Self {
            recovered: 20.0,
            moderate: 40.0,
            fatigued: 60.0,
            exhausted: 80.0,
        }
    }
}

/// ACWR band edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcwrBands {
    /// Below this ratio: undertraining
    pub undertraining_below: f64,
    /// Above this ratio: caution
    pub caution_above: f64,
    /// At or above this ratio: danger
    pub danger_at: f64,
}

impl Default for AcwrBands {
    fn default() -> Self {
        Self {
            undertraining_below: acwr::UNDERTRAINING_BELOW,
            caution_above: acwr::CAUTION_ABOVE,
            danger_at: acwr::DANGER_AT,
        }
    }
}

/// How prediction confidence grows with available data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Confidence with training load alone
    pub load_only: f64,
    /// Added per wellness signal present
    pub per_signal: f64,
    /// Added per signal that also has a personal baseline
    pub per_baseline: f64,
    /// Upper bound
    pub max: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            load_only: 0.55,
            per_signal: 0.08,
            per_baseline: 0.03,
            max: 0.95,
        }
    }
}

/// Baseline deviations that add a warning to a prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviationAlertConfig {
    /// HRV drop below baseline (percent)
    pub hrv_drop_pct: f64,
    /// Resting heart rate rise above baseline (percent)
    pub resting_hr_rise_pct: f64,
    /// Sleep shortfall below baseline (percent)
    pub sleep_shortfall_pct: f64,
}

impl Default for DeviationAlertConfig {
    fn default() -> Self {
        Self {
            hrv_drop_pct: 10.0,
            resting_hr_rise_pct: 5.0,
            sleep_shortfall_pct: 15.0,
        }
    }
}
