// ABOUTME: Daily readiness inputs and fatigue prediction outputs
// ABOUTME: Optional wellness signals are compared against personal baselines, never population norms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::athlete::{AthleteContext, ReadinessZone, RiskZone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Load snapshot plus optional wellness signals for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReadiness {
    /// Day described
    pub date: NaiveDate,
    /// Chronic training load
    pub ctl: f64,
    /// Acute training load
    pub atl: f64,
    /// Training stress balance
    pub tsb: f64,
    /// Acute:chronic ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acwr: Option<f64>,
    /// Morning HRV (RMSSD, ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrv_ms: Option<f64>,
    /// Personal HRV baseline (ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrv_baseline_ms: Option<f64>,
    /// Resting heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<f64>,
    /// Personal resting heart rate baseline (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_hr_baseline: Option<f64>,
    /// Sleep duration (hours)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Personal sleep duration baseline (hours)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_baseline_hours: Option<f64>,
    /// Sleep quality (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<f64>,
    /// Perceived fatigue (1 fresh - 10 exhausted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perceived_fatigue: Option<f64>,
    /// Muscle soreness (1 none - 10 severe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soreness: Option<f64>,
    /// VO2max estimate used to scale recovery time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2max: Option<f64>,
}

impl DailyReadiness {
    /// Readiness input from load figures only
    #[must_use]
    pub fn from_loads(date: NaiveDate, ctl: f64, atl: f64) -> Self {
        Self {
            date,
            ctl,
            atl,
            tsb: ctl - atl,
            acwr: AthleteContext::ratio(ctl, atl),
            hrv_ms: None,
            hrv_baseline_ms: None,
            resting_hr: None,
            resting_hr_baseline: None,
            sleep_hours: None,
            sleep_baseline_hours: None,
            sleep_quality: None,
            perceived_fatigue: None,
            soreness: None,
            vo2max: None,
        }
    }

    /// Readiness input from an athlete snapshot
    #[must_use]
    pub fn from_context(context: &AthleteContext) -> Self {
        Self {
            vo2max: context.vo2max,
            ..Self::from_loads(context.as_of, context.ctl, context.atl)
        }
    }

    /// Attach HRV and, optionally, its baseline
    #[must_use]
    pub const fn with_hrv(mut self, hrv_ms: f64, baseline_ms: Option<f64>) -> Self {
        self.hrv_ms = Some(hrv_ms);
        self.hrv_baseline_ms = baseline_ms;
        self
    }

    /// Attach resting heart rate and, optionally, its baseline
    #[must_use]
    pub const fn with_resting_hr(mut self, resting_hr: f64, baseline: Option<f64>) -> Self {
        self.resting_hr = Some(resting_hr);
        self.resting_hr_baseline = baseline;
        self
    }

    /// Attach sleep duration and, optionally, its baseline
    #[must_use]
    pub const fn with_sleep(mut self, hours: f64, baseline_hours: Option<f64>) -> Self {
        self.sleep_hours = Some(hours);
        self.sleep_baseline_hours = baseline_hours;
        self
    }

    /// Attach sleep quality (0-100)
    #[must_use]
    pub const fn with_sleep_quality(mut self, quality: f64) -> Self {
        self.sleep_quality = Some(quality);
        self
    }

    /// Attach subjective fatigue and soreness (1-10)
    #[must_use]
    pub const fn with_subjective(mut self, perceived_fatigue: f64, soreness: Option<f64>) -> Self {
        self.perceived_fatigue = Some(perceived_fatigue);
        self.soreness = soreness;
        self
    }

    /// Attach VO2max
    #[must_use]
    pub const fn with_vo2max(mut self, vo2max: f64) -> Self {
        self.vo2max = Some(vo2max);
        self
    }

    /// Number of optional wellness signals present
    #[must_use]
    pub fn signal_count(&self) -> usize {
        [
            self.hrv_ms,
            self.resting_hr,
            self.sleep_hours,
            self.perceived_fatigue,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Fatigue level from the blended fatigue score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueLevel {
    /// Score below 20
    Fresh,
    /// Score 20-39
    Recovered,
    /// Score 40-59
    Moderate,
    /// Score 60-79
    Fatigued,
    /// Score 80 and above
    Exhausted,
}

/// Graded risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No action needed
    Low,
    /// Monitor closely
    Moderate,
    /// Reduce load
    High,
    /// Stop and recover
    Critical,
}

/// Intensity ceiling for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedIntensity {
    /// No training
    Rest,
    /// Aerobic only
    Easy,
    /// Steady or tempo work
    Moderate,
    /// Quality sessions allowed
    Hard,
}

/// Recovery status derived from the fatigue score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryState {
    /// Ready to absorb hard work
    Recovered,
    /// Absorbing recent work, mostly recovered
    PartiallyRecovered,
    /// Still recovering
    Recovering,
    /// Substantial recovery debt
    Depleted,
}

/// Estimated time to full recovery
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryEstimate {
    /// Hours until recovered, clamped to 12-96
    pub hours: f64,
    /// Recovery status
    pub state: RecoveryState,
    /// Whether aerobic capacity adjusted the estimate
    pub vo2max_adjusted: bool,
}

/// Strain target range on a 0-21 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainTarget {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl StrainTarget {
    /// Target as a `(min, max)` tuple
    #[must_use]
    pub const fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Signals blended into the fatigue score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessComponent {
    /// Training stress balance
    Tsb,
    /// Acute:chronic workload ratio
    Acwr,
    /// HRV against baseline
    Hrv,
    /// Resting heart rate against baseline
    RestingHr,
    /// Sleep duration and quality
    Sleep,
    /// Perceived fatigue and soreness
    Subjective,
}

/// One component's contribution to the fatigue score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    /// Component
    pub component: ReadinessComponent,
    /// Raw input value
    pub raw_value: f64,
    /// Baseline the value was compared to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    /// Component fatigue score (0-100, higher is more fatigued)
    pub fatigue_score: f64,
    /// Weight after renormalizing over available components
    pub weight: f64,
}

/// Output of the readiness and fatigue predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatiguePrediction {
    /// Day described
    pub date: NaiveDate,
    /// Chronic training load
    pub ctl: f64,
    /// Acute training load
    pub atl: f64,
    /// Training stress balance
    pub tsb: f64,
    /// Acute:chronic ratio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acwr: Option<f64>,
    /// ACWR risk zone
    pub risk_zone: RiskZone,
    /// Blended fatigue score (0-100)
    pub fatigue_score: f64,
    /// Fatigue level
    pub fatigue_level: FatigueLevel,
    /// `100 - fatigue_score`
    pub readiness_score: f64,
    /// Readiness zone
    pub readiness_zone: ReadinessZone,
    /// Recovery estimate
    pub recovery: RecoveryEstimate,
    /// Overtraining risk
    pub overtraining_risk: RiskLevel,
    /// Injury risk
    pub injury_risk: RiskLevel,
    /// Burnout risk
    pub burnout_risk: RiskLevel,
    /// Intensity ceiling
    pub recommended_intensity: RecommendedIntensity,
    /// Strain target for the day
    pub strain_target: StrainTarget,
    /// Per-component breakdown
    pub components: Vec<ComponentScore>,
    /// Confidence (0-1), lower when wellness signals or baselines are missing
    pub confidence: f64,
    /// Notes about degraded inputs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// ACWR alert raised outside the optimal band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcwrAlert {
    /// Ratio that raised the alert
    pub acwr: f64,
    /// Zone the ratio falls in
    pub risk_zone: RiskZone,
    /// Alert severity
    pub risk_level: RiskLevel,
    /// Human-readable message
    pub message: String,
}
