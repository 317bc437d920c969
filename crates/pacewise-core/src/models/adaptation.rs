// ABOUTME: Adaptation recommendations with volume/intensity multipliers and an applied flag
// ABOUTME: AdaptationRecord preserves the prior revision of every week an adaptation rewrote
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::plan::TrainingWeek;
use crate::constants::adaptation::HIGH_PRIORITY_CONFIDENCE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition that caused an adaptation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationTrigger {
    /// Acute load well above chronic load
    Overreaching,
    /// Acute load well below chronic load, or sessions being skipped
    Undertraining,
    /// Race within the taper window
    RaceTaper,
    /// Deep negative form
    RecoveryNeeded,
    /// Sessions consistently completed below target
    Plateau,
    /// Elevated acute:chronic ratio or breach
    InjuryRisk,
}

impl fmt::Display for AdaptationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Overreaching => "overreaching",
            Self::Undertraining => "undertraining",
            Self::RaceTaper => "race-taper",
            Self::RecoveryNeeded => "recovery-needed",
            Self::Plateau => "plateau",
            Self::InjuryRisk => "injury-risk",
        };
        f.write_str(label)
    }
}

/// Kind of plan change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationType {
    /// Scale session durations and loads down
    ReduceVolume,
    /// Scale session durations and loads up
    IncreaseVolume,
    /// Convert the hardest session into recovery
    AddRecovery,
    /// Move remaining sessions to absorb missed work
    ShiftSchedule,
}

/// A quantified plan adjustment
///
/// `applied` flips to `true` exactly once; applying a recommendation twice is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationRecommendation {
    /// Unique identifier
    pub id: String,
    /// Why the adaptation is suggested
    pub trigger: AdaptationTrigger,
    /// What kind of change it makes
    pub adaptation_type: AdaptationType,
    /// Week to change, `None` for the next upcoming week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_week: Option<u32>,
    /// Session to change, `None` for the whole week
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_session: Option<String>,
    /// Duration/load scale factor
    pub volume_multiplier: f64,
    /// Load-only intensity scale factor
    pub intensity_multiplier: f64,
    /// Confidence (0-1)
    pub confidence: f64,
    /// Free-text reason
    pub reason: String,
    /// Set once acted upon
    #[serde(default)]
    pub applied: bool,
}

/// Alias used by callers that treat recommendations as non-binding suggestions
pub type AdaptationSuggestion = AdaptationRecommendation;

impl AdaptationRecommendation {
    /// Confidence strictly above the default high-priority threshold (0.8)
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.is_above(HIGH_PRIORITY_CONFIDENCE)
    }

    /// Confidence strictly above a custom threshold
    #[must_use]
    pub fn is_above(&self, threshold: f64) -> bool {
        self.confidence > threshold
    }

    /// Whether this recommendation lowers training stress
    #[must_use]
    pub fn is_reduction(&self) -> bool {
        self.volume_multiplier * self.intensity_multiplier < 1.0
    }
}

/// History entry appended to a plan each time a recommendation is applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationRecord {
    /// Recommendation as applied (with `applied = true`)
    pub recommendation: AdaptationRecommendation,
    /// When it was applied
    pub applied_at: DateTime<Utc>,
    /// Plan revision produced by this application
    pub plan_revision: u32,
    /// Week numbers rewritten
    pub affected_weeks: Vec<u32>,
    /// Each affected week as it was before the change
    pub prior_weeks: Vec<TrainingWeek>,
}
