// ABOUTME: Adaptation engine configuration for trigger thresholds and response multipliers
// ABOUTME: Configures taper, overreaching, undertraining, injury-risk, and recovery responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adaptation Configuration
//!
//! Thresholds that fire each adaptation trigger and the multipliers applied in response.

use pacewise_core::constants::{acwr, adaptation, training_load};
use serde::{Deserialize, Serialize};

/// Adaptation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationConfig {
    /// Confidence strictly above this is high priority
    pub high_priority_confidence: f64,
    /// Race-taper response
    pub taper: TaperResponse,
    /// Overreaching response
    pub overreaching: OverreachingResponse,
    /// Undertraining response
    pub undertraining: UndertrainingResponse,
    /// Elevated-ratio response
    pub injury_risk: InjuryRiskResponse,
    /// TSB below this adds a recovery day
    pub recovery_tsb: f64,
    /// Undershoot deviations that signal a plateau
    pub plateau_undershoot_count: usize,
    /// Missed sessions that trigger a schedule shift
    pub missed_session_count: usize,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            high_priority_confidence: adaptation::HIGH_PRIORITY_CONFIDENCE,
            taper: TaperResponse::default(),
            overreaching: OverreachingResponse::default(),
            undertraining: UndertrainingResponse::default(),
            injury_risk: InjuryRiskResponse::default(),
            recovery_tsb: training_load::TSB_DEEP_FATIGUE,
            plateau_undershoot_count: 3,
            missed_session_count: 2,
        }
    }
}

/// Race-taper response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaperResponse {
    /// Days before the race in which the taper fires
    pub window_days: i64,
    /// Volume multiplier inside the window
    pub volume_multiplier: f64,
    /// Days before the race for the final reduction
    pub final_days: i64,
    /// Volume multiplier in the final days
    pub final_volume_multiplier: f64,
    /// Confidence of a taper recommendation
    pub confidence: f64,
}

impl Default for TaperResponse {
    fn default() -> Self {
        Self {
            window_days: adaptation::RACE_TAPER_WINDOW_DAYS,
            volume_multiplier: 0.5,
            final_days: 3,
            final_volume_multiplier: 0.4,
            confidence: 0.95,
        }
    }
}

/// Overreaching response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverreachingResponse {
    /// ACWR at or above which the trigger fires
    pub acwr_threshold: f64,
    /// Overshoot deviations that fire the trigger on their own
    pub overshoot_count: usize,
    /// Volume multiplier at the threshold
    pub max_volume_multiplier: f64,
    /// Lowest volume multiplier
    pub min_volume_multiplier: f64,
    /// Intensity multiplier
    pub intensity_multiplier: f64,
}

impl Default for OverreachingResponse {
    fn default() -> Self {
        Self {
            acwr_threshold: acwr::DANGER_AT,
            overshoot_count: 2,
            max_volume_multiplier: 0.85,
            min_volume_multiplier: 0.6,
            intensity_multiplier: 0.9,
        }
    }
}

/// Undertraining response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndertrainingResponse {
    /// ACWR below which the trigger fires
    pub acwr_threshold: f64,
    /// Largest volume increase (fraction)
    pub max_increase: f64,
}

impl Default for UndertrainingResponse {
    fn default() -> Self {
        Self {
            acwr_threshold: acwr::UNDERTRAINING_BELOW,
            max_increase: 0.15,
        }
    }
}

/// Elevated-ratio response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryRiskResponse {
    /// ACWR above which the ratio is elevated
    pub acwr_threshold: f64,
    /// Volume multiplier
    pub volume_multiplier: f64,
    /// Confidence
    pub confidence: f64,
}

impl Default for InjuryRiskResponse {
    fn default() -> Self {
        Self {
            acwr_threshold: acwr::CAUTION_ABOVE,
            volume_multiplier: 0.9,
            confidence: 0.6,
        }
    }
}
