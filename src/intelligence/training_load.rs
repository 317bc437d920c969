// ABOUTME: Training load calculations for CTL, ATL, TSB, and ACWR over a daily load history
// ABOUTME: Implements day-filled exponentially weighted averages of chronic and acute load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Load Model
//!
//! Daily loads are summed per calendar day and gaps are filled with zero before smoothing, so
//! a week off decays fitness the way it does physiologically.
//!
//! EWA formula: `EWA_today = load_today * α + EWA_yesterday * (1 - α)` with `α = 2 / (N + 1)`.
//!
//! ## Scientific References
//!
//! - Banister, E.W. (1991). Modeling elite athletic performance.
//! - Coggan, A. (2003). Training and racing using a power meter: CTL/ATL/TSB.
//! - Williams, S. et al. (2017). Better way to determine the acute:chronic workload ratio?
//!   *British Journal of Sports Medicine*, 51(3), 209-210.

use chrono::{Duration, NaiveDate};
use pacewise_core::constants::training_load::{
    ACUTE_SPIKE_FACTOR, ATL_WINDOW_DAYS, CTL_WINDOW_DAYS, TSB_DETRAINING, TSB_OVERREACHING,
    VERY_HIGH_ATL,
};
use pacewise_core::errors::{AppError, AppResult};
use pacewise_core::models::{AthleteContext, RiskLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Load recorded on one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyLoad {
    /// Calendar day
    pub date: NaiveDate,
    /// Training load (TSS-like units)
    pub load: f64,
}

impl DailyLoad {
    /// Create a load entry
    #[must_use]
    pub const fn new(date: NaiveDate, load: f64) -> Self {
        Self { date, load }
    }
}

/// Training load metrics on a given day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoad {
    /// Chronic Training Load (42-day EWA) - represents fitness
    pub ctl: f64,
    /// Acute Training Load (7-day EWA) - represents fatigue
    pub atl: f64,
    /// Training Stress Balance (CTL - ATL) - represents form
    pub tsb: f64,
    /// ATL / CTL, absent when CTL is zero
    pub acwr: Option<f64>,
    /// Days covered by the smoothed series
    pub days_of_history: i64,
}

impl TrainingLoad {
    /// Zero load with no history
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ctl: 0.0,
            atl: 0.0,
            tsb: 0.0,
            acwr: None,
            days_of_history: 0,
        }
    }
}

/// One day of the smoothed series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSeriesPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Summed load for the day (zero on rest days)
    pub load: f64,
    /// CTL after this day
    pub ctl: f64,
    /// ATL after this day
    pub atl: f64,
    /// TSB after this day
    pub tsb: f64,
    /// ACWR after this day
    pub acwr: Option<f64>,
}

/// Calculator for training load metrics
#[derive(Debug, Clone, Copy)]
pub struct TrainingLoadCalculator {
    ctl_window_days: i64,
    atl_window_days: i64,
}

impl Default for TrainingLoadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingLoadCalculator {
    /// Create a new training load calculator with standard windows
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ctl_window_days: CTL_WINDOW_DAYS,
            atl_window_days: ATL_WINDOW_DAYS,
        }
    }

    /// Create a training load calculator with custom window sizes
    #[must_use]
    pub const fn with_windows(ctl_days: i64, atl_days: i64) -> Self {
        Self {
            ctl_window_days: ctl_days,
            atl_window_days: atl_days,
        }
    }

    /// Smoothing factor `α = 2 / (N + 1)`
    #[must_use]
    pub fn alpha(window_days: i64) -> f64 {
        2.0 / (window_days as f64 + 1.0)
    }

    /// Advance an EWA by one day
    #[must_use]
    pub fn ewa_step(previous: f64, load: f64, alpha: f64) -> f64 {
        load.mul_add(alpha, previous * (1.0 - alpha))
    }

    /// Chronic smoothing factor in use
    #[must_use]
    pub fn ctl_alpha(&self) -> f64 {
        Self::alpha(self.ctl_window_days)
    }

    /// Acute smoothing factor in use
    #[must_use]
    pub fn atl_alpha(&self) -> f64 {
        Self::alpha(self.atl_window_days)
    }

    /// Calculate CTL, ATL, TSB, and ACWR as of a date
    ///
    /// Entries after `as_of` are ignored. The series starts at the earliest entry and runs
    /// through `as_of`, so loads decay across trailing rest days.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if any load is negative or not finite
    pub fn calculate_training_load(
        &self,
        history: &[DailyLoad],
        as_of: NaiveDate,
    ) -> AppResult<TrainingLoad> {
        let series = self.load_series(history, as_of)?;
        Ok(series.last().map_or_else(TrainingLoad::empty, |last| TrainingLoad {
            ctl: last.ctl,
            atl: last.atl,
            tsb: last.tsb,
            acwr: last.acwr,
            days_of_history: i64::try_from(series.len()).unwrap_or(i64::MAX),
        }))
    }

    /// Full daily series from the first entry through `as_of`
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if any load is negative or not finite
    pub fn load_series(
        &self,
        history: &[DailyLoad],
        as_of: NaiveDate,
    ) -> AppResult<Vec<LoadSeriesPoint>> {
        let daily = Self::daily_totals(history, as_of)?;
        let Some(first_date) = daily.keys().next().copied() else {
            return Ok(Vec::new());
        };

        let ctl_alpha = self.ctl_alpha();
        let atl_alpha = self.atl_alpha();
        let days_span = (as_of - first_date).num_days();

        let mut ctl = 0.0;
        let mut atl = 0.0;
        let mut series = Vec::with_capacity(usize::try_from(days_span + 1).unwrap_or(0));
        for day_offset in 0..=days_span {
            let date = first_date + Duration::days(day_offset);
            let load = daily.get(&date).copied().unwrap_or(0.0);
            ctl = Self::ewa_step(ctl, load, ctl_alpha);
            atl = Self::ewa_step(atl, load, atl_alpha);
            series.push(LoadSeriesPoint {
                date,
                load,
                ctl,
                atl,
                tsb: ctl - atl,
                acwr: AthleteContext::ratio(ctl, atl),
            });
        }
        Ok(series)
    }

    /// Sum loads per calendar day, dropping entries after `as_of`
    fn daily_totals(
        history: &[DailyLoad],
        as_of: NaiveDate,
    ) -> AppResult<BTreeMap<NaiveDate, f64>> {
        let mut totals = BTreeMap::new();
        for entry in history {
            if !entry.load.is_finite() || entry.load < 0.0 {
                return Err(AppError::value_out_of_range(format!(
                    "Training load on {} must be a non-negative number, got {}",
                    entry.date, entry.load
                )));
            }
            if entry.date <= as_of {
                *totals.entry(entry.date).or_insert(0.0) += entry.load;
            }
        }
        Ok(totals)
    }

    /// Calculate TSB (Training Stress Balance) = CTL - ATL
    ///
    /// Interpretation:
    /// - TSB < -10: Overreaching (high fatigue, need recovery)
    /// - TSB -10 to 0: Productive training zone
    /// - TSB 0 to +10: Fresh, ready to perform
    /// - TSB > +10: Risk of detraining
    #[must_use]
    pub fn calculate_tsb(ctl: f64, atl: f64) -> f64 {
        ctl - atl
    }

    /// Interpret TSB value and provide status
    #[must_use]
    pub fn interpret_tsb(tsb: f64) -> TrainingStatus {
        if tsb < TSB_OVERREACHING {
            TrainingStatus::Overreaching
        } else if tsb < 0.0 {
            TrainingStatus::Productive
        } else if tsb <= TSB_DETRAINING {
            TrainingStatus::Fresh
        } else {
            TrainingStatus::Detraining
        }
    }

    /// Check if athlete is at risk of overtraining
    ///
    /// Warning conditions:
    /// - ATL > CTL x 1.3: Acute load spike
    /// - ATL > 150: Very high acute load
    /// - TSB < -10: Deep fatigue
    #[must_use]
    pub fn check_overtraining_risk(training_load: &TrainingLoad) -> OvertrainingRisk {
        let mut risk_factors = Vec::new();

        if training_load.ctl > 0.0 && training_load.atl > training_load.ctl * ACUTE_SPIKE_FACTOR {
            risk_factors
                .push("Acute training load spike detected (>30% above chronic load)".to_owned());
        }

        if training_load.atl > VERY_HIGH_ATL {
            risk_factors.push("Very high acute training load (>150 per day)".to_owned());
        }

        if training_load.tsb < TSB_OVERREACHING {
            risk_factors.push("Deep fatigue detected (TSB < -10) - recovery needed".to_owned());
        }

        let risk_level = match risk_factors.len() {
            0 => RiskLevel::Low,
            1 => RiskLevel::Moderate,
            2 => RiskLevel::High,
            _ => RiskLevel::Critical,
        };

        OvertrainingRisk {
            risk_level,
            risk_factors,
        }
    }

    /// Calculate recommended recovery days based on TSB
    #[must_use]
    pub fn recommend_recovery_days(tsb: f64) -> u32 {
        const VERY_DEEP_FATIGUE: f64 = -20.0;
        const DEEP_FATIGUE: f64 = -15.0;
        const MODERATE_FATIGUE: f64 = -10.0;

        if tsb < VERY_DEEP_FATIGUE {
            5
        } else if tsb < DEEP_FATIGUE {
            3
        } else if tsb < MODERATE_FATIGUE {
            2
        } else if tsb < 0.0 {
            1
        } else {
            0
        }
    }
}

/// Training status based on TSB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// TSB < -10: Overreaching, high fatigue
    Overreaching,
    /// TSB -10 to 0: Productive training zone
    Productive,
    /// TSB 0 to +10: Fresh, ready to perform
    Fresh,
    /// TSB > +10: Risk of detraining
    Detraining,
}

/// Overtraining risk assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertrainingRisk {
    /// Overall risk level
    pub risk_level: RiskLevel,
    /// Specific risk factors identified
    pub risk_factors: Vec<String>,
}
