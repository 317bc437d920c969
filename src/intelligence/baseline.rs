// ABOUTME: Personal baselines for HRV, resting heart rate, and sleep with rolling averages
// ABOUTME: Per-athlete signal history is kept in a sharded concurrent map keyed by athlete id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Personal Baselines
//!
//! A wellness value is only meaningful against the athlete's own history. Baselines are 7-day
//! and 30-day rolling averages of the observations strictly before the day being evaluated.
//! A rolling average needs at least three valid points; with fewer it is absent and callers
//! degrade to lower confidence instead of comparing against a population norm.
//!
//! ## Scientific References
//!
//! - Plews, D.J. et al. (2013). Training adaptation and heart rate variability in elite
//!   endurance athletes. *Sports Medicine*, 43(9), 773-781.
//! - Buchheit, M. (2014). Monitoring training status with HR measures. *Frontiers in
//!   Physiology*, 5, 73.

use chrono::{Duration, NaiveDate};
use dashmap::DashMap;
use pacewise_core::constants::baseline::{
    LONG_WINDOW_DAYS, MIN_VALID_POINTS, SHORT_WINDOW_DAYS, STABLE_BAND_PCT,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Wellness metrics that have personal baselines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineMetric {
    /// Heart rate variability (ms)
    Hrv,
    /// Resting heart rate (bpm)
    RestingHr,
    /// Sleep duration (hours)
    SleepHours,
}

impl BaselineMetric {
    /// Whether a rising value indicates better recovery
    #[must_use]
    pub const fn higher_is_better(&self) -> bool {
        match self {
            Self::Hrv | Self::SleepHours => true,
            Self::RestingHr => false,
        }
    }
}

/// Direction of a value relative to its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// More than 5% above baseline
    Up,
    /// More than 5% below baseline
    Down,
    /// Within 5% of baseline
    Stable,
}

/// A value compared to its personal baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    /// Metric compared
    pub metric: BaselineMetric,
    /// Current value
    pub current: f64,
    /// Baseline value
    pub baseline: f64,
    /// `(current - baseline) / baseline * 100`
    pub deviation_pct: f64,
    /// Direction outside the stable band
    pub direction: TrendDirection,
    /// Whether the direction is good for recovery
    pub favorable: bool,
}

impl BaselineComparison {
    /// Compare a value against a baseline, `None` when the baseline is not positive
    #[must_use]
    pub fn compare(metric: BaselineMetric, current: f64, baseline: f64) -> Option<Self> {
        if !(baseline.is_finite() && baseline > 0.0 && current.is_finite()) {
            return None;
        }
        let deviation_pct = (current - baseline) / baseline * 100.0;
        let direction = if deviation_pct > STABLE_BAND_PCT {
            TrendDirection::Up
        } else if deviation_pct < -STABLE_BAND_PCT {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };
        let favorable = match direction {
            TrendDirection::Stable => true,
            TrendDirection::Up => metric.higher_is_better(),
            TrendDirection::Down => !metric.higher_is_better(),
        };
        Some(Self {
            metric,
            current,
            baseline,
            deviation_pct,
            direction,
            favorable,
        })
    }
}

/// Average of the last `window` values, ignoring non-finite and non-positive entries
///
/// Returns `None` when fewer than three valid values remain, whatever the slice length.
#[must_use]
pub fn rolling_average(values: &[f64], window: usize) -> Option<f64> {
    let start = values.len().saturating_sub(window);
    let valid: Vec<f64> = values[start..]
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if valid.len() < MIN_VALID_POINTS {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// One day of wellness signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessObservation {
    /// Calendar day
    pub date: NaiveDate,
    /// HRV (ms)
    pub hrv_ms: Option<f64>,
    /// Resting heart rate (bpm)
    pub resting_hr: Option<f64>,
    /// Sleep duration (hours)
    pub sleep_hours: Option<f64>,
}

impl WellnessObservation {
    /// Observation with no signals
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            hrv_ms: None,
            resting_hr: None,
            sleep_hours: None,
        }
    }

    /// Whether any signal is present
    #[must_use]
    pub const fn has_signals(&self) -> bool {
        self.hrv_ms.is_some() || self.resting_hr.is_some() || self.sleep_hours.is_some()
    }
}

/// Rolling baselines as of a date
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalBaseline {
    /// 7-day HRV average
    pub hrv_7d: Option<f64>,
    /// 30-day HRV average
    pub hrv_30d: Option<f64>,
    /// 7-day resting heart rate average
    pub resting_hr_7d: Option<f64>,
    /// 30-day resting heart rate average
    pub resting_hr_30d: Option<f64>,
    /// 7-day sleep average
    pub sleep_7d: Option<f64>,
    /// 30-day sleep average
    pub sleep_30d: Option<f64>,
}

impl PersonalBaseline {
    /// Reference value for a metric: the 30-day average, else the 7-day average
    #[must_use]
    pub fn reference(&self, metric: BaselineMetric) -> Option<f64> {
        match metric {
            BaselineMetric::Hrv => self.hrv_30d.or(self.hrv_7d),
            BaselineMetric::RestingHr => self.resting_hr_30d.or(self.resting_hr_7d),
            BaselineMetric::SleepHours => self.sleep_30d.or(self.sleep_7d),
        }
    }

    /// Short-term trend: 7-day average against 30-day average
    #[must_use]
    pub fn trend(&self, metric: BaselineMetric) -> Option<BaselineComparison> {
        let (short, long) = match metric {
            BaselineMetric::Hrv => (self.hrv_7d, self.hrv_30d),
            BaselineMetric::RestingHr => (self.resting_hr_7d, self.resting_hr_30d),
            BaselineMetric::SleepHours => (self.sleep_7d, self.sleep_30d),
        };
        BaselineComparison::compare(metric, short?, long?)
    }

    /// Compare a current value with the reference baseline
    #[must_use]
    pub fn compare(&self, metric: BaselineMetric, current: f64) -> Option<BaselineComparison> {
        BaselineComparison::compare(metric, current, self.reference(metric)?)
    }
}

/// Bounded, date-ordered wellness history for one athlete
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalHistory {
    observations: VecDeque<WellnessObservation>,
}

impl SignalHistory {
    /// Maximum observations kept
    pub const CAPACITY: usize = LONG_WINDOW_DAYS;

    /// Record an observation, replacing any earlier record for the same date
    pub fn record(&mut self, observation: WellnessObservation) {
        match self
            .observations
            .binary_search_by_key(&observation.date, |o| o.date)
        {
            Ok(index) => self.observations[index] = observation,
            Err(index) => self.observations.insert(index, observation),
        }
        while self.observations.len() > Self::CAPACITY {
            self.observations.pop_front();
        }
    }

    /// Number of observations held
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether no observations are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Baselines from observations strictly before `date`
    #[must_use]
    pub fn baseline_as_of(&self, date: NaiveDate) -> PersonalBaseline {
        let window = |days: usize, pick: fn(&WellnessObservation) -> Option<f64>| {
            let from = date - Duration::days(i64::try_from(days).unwrap_or(i64::MAX));
            let values: Vec<f64> = self
                .observations
                .iter()
                .filter(|o| o.date >= from && o.date < date)
                .filter_map(pick)
                .collect();
            rolling_average(&values, days)
        };

        PersonalBaseline {
            hrv_7d: window(SHORT_WINDOW_DAYS, |o| o.hrv_ms),
            hrv_30d: window(LONG_WINDOW_DAYS, |o| o.hrv_ms),
            resting_hr_7d: window(SHORT_WINDOW_DAYS, |o| o.resting_hr),
            resting_hr_30d: window(LONG_WINDOW_DAYS, |o| o.resting_hr),
            sleep_7d: window(SHORT_WINDOW_DAYS, |o| o.sleep_hours),
            sleep_30d: window(LONG_WINDOW_DAYS, |o| o.sleep_hours),
        }
    }
}

/// Per-athlete signal histories
///
/// Uses `DashMap` for fine-grained locking: each athlete's history lives in one shard, and
/// the entry guard serializes writers for that athlete while other athletes proceed.
#[derive(Debug, Default)]
pub struct BaselineStore {
    histories: DashMap<String, SignalHistory>,
}

impl BaselineStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            histories: DashMap::new(),
        }
    }

    /// Record an observation for an athlete
    pub fn record(&self, athlete_id: &str, observation: WellnessObservation) {
        if !observation.has_signals() {
            return;
        }
        let mut entry = self.histories.entry(athlete_id.to_owned()).or_default();
        entry.record(observation);
        drop(entry);
    }

    /// Baselines as of the observation's date, then record the observation
    ///
    /// Both steps happen under the athlete's entry guard, so concurrent observations for the
    /// same athlete cannot land between the read and the write.
    pub fn observe(&self, athlete_id: &str, observation: WellnessObservation) -> PersonalBaseline {
        if !observation.has_signals() {
            return self.baseline_as_of(athlete_id, observation.date);
        }
        let mut entry = self.histories.entry(athlete_id.to_owned()).or_default();
        let baseline = entry.baseline_as_of(observation.date);
        entry.record(observation);
        drop(entry);
        baseline
    }

    /// Baselines for an athlete as of a date; empty when the athlete is unknown
    #[must_use]
    pub fn baseline_as_of(&self, athlete_id: &str, date: NaiveDate) -> PersonalBaseline {
        self.histories
            .get(athlete_id)
            .map(|history| history.baseline_as_of(date))
            .unwrap_or_default()
    }

    /// Cloned snapshot of an athlete's history
    #[must_use]
    pub fn snapshot(&self, athlete_id: &str) -> Option<SignalHistory> {
        self.histories.get(athlete_id).map(|h| h.clone())
    }

    /// Observations held for an athlete
    #[must_use]
    pub fn observation_count(&self, athlete_id: &str) -> usize {
        self.histories.get(athlete_id).map_or(0, |h| h.len())
    }

    /// Forget an athlete
    pub fn remove(&self, athlete_id: &str) -> Option<SignalHistory> {
        self.histories.remove(athlete_id).map(|(_, history)| history)
    }

    /// Number of athletes tracked
    #[must_use]
    pub fn athlete_count(&self) -> usize {
        self.histories.len()
    }
}
