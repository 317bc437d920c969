// ABOUTME: Deviation detector configuration for compliance bounds, ACWR breach, and drift
// ABOUTME: Configures when executed training counts as an undershoot, overshoot, or schedule drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pacewise_core::constants::{acwr, training_load};
use serde::{Deserialize, Serialize};

/// Deviation detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviationConfig {
    /// Compliance below this percentage is an undershoot
    pub undershoot_pct: f64,
    /// Compliance above this percentage is an overshoot
    pub overshoot_pct: f64,
    /// ACWR from executed load at or above this value is a breach
    pub acwr_breach: f64,
    /// Consecutive slipped sessions that make a drift
    pub drift_run_length: usize,
    /// Minimum slip (days) for a session to count toward drift
    pub drift_min_slip_days: i64,
    /// Days of executed load required before a zero-seeded ratio is trusted
    pub min_chronic_history_days: i64,
}

impl Default for DeviationConfig {
    fn default() -> Self {
        Self {
            undershoot_pct: 70.0,
            overshoot_pct: 130.0,
            acwr_breach: acwr::DANGER_AT,
            drift_run_length: 3,
            drift_min_slip_days: 1,
            min_chronic_history_days: training_load::MIN_CHRONIC_HISTORY_DAYS,
        }
    }
}
