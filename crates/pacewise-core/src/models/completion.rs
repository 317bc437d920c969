// ABOUTME: Executed workout records and deviations between planned and executed training
// ABOUTME: Compliance percentages are undefined until a workout is completed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::plan::{PlannedSession, WorkoutType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-reported feeling after a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feeling {
    /// Felt strong
    Great,
    /// Felt normal
    Good,
    /// Manageable
    Okay,
    /// Noticeably tired
    Tired,
    /// Struggled to finish
    Exhausted,
}

/// Record of a planned workout and, when done, how it was executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutCompletion {
    /// Planned session id this record refers to
    pub workout_id: String,
    /// Date the session was planned for
    pub planned_date: NaiveDate,
    /// Planned duration (minutes)
    pub planned_duration_min: u32,
    /// Planned load
    pub planned_load: f64,
    /// Planned workout type
    pub planned_type: WorkoutType,
    /// Date actually completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    /// Actual duration (minutes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_duration_min: Option<u32>,
    /// Actual load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_load: Option<f64>,
    /// Rating of perceived exertion (1-10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perceived_effort: Option<u8>,
    /// Self-reported feeling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeling: Option<Feeling>,
}

impl WorkoutCompletion {
    /// Start a record from a planned session, not yet completed
    #[must_use]
    pub fn for_session(session: &PlannedSession) -> Self {
        Self {
            workout_id: session.id.clone(),
            planned_date: session.date,
            planned_duration_min: session.duration_min,
            planned_load: session.target_load,
            planned_type: session.workout_type,
            completed_date: None,
            actual_duration_min: None,
            actual_load: None,
            perceived_effort: None,
            feeling: None,
        }
    }

    /// Mark as completed with actual figures
    #[must_use]
    pub fn completed(mut self, date: NaiveDate, duration_min: u32, load: f64) -> Self {
        self.completed_date = Some(date);
        self.actual_duration_min = Some(duration_min);
        self.actual_load = Some(load);
        self
    }

    /// Attach subjective feedback
    #[must_use]
    pub fn with_feedback(mut self, perceived_effort: u8, feeling: Feeling) -> Self {
        self.perceived_effort = Some(perceived_effort);
        self.feeling = Some(feeling);
        self
    }

    /// Whether the workout was done
    #[must_use]
    pub const fn was_completed(&self) -> bool {
        self.completed_date.is_some()
    }

    /// `actual_load / planned_load * 100`, `None` when not completed or nothing was planned
    #[must_use]
    pub fn compliance_pct(&self) -> Option<f64> {
        if !self.was_completed() || self.planned_load <= 0.0 {
            return None;
        }
        self.actual_load
            .map(|actual| actual / self.planned_load * 100.0)
    }

    /// `actual_duration / planned_duration * 100`, `None` when not completed
    #[must_use]
    pub fn duration_compliance_pct(&self) -> Option<f64> {
        if !self.was_completed() || self.planned_duration_min == 0 {
            return None;
        }
        self.actual_duration_min
            .map(|actual| f64::from(actual) / f64::from(self.planned_duration_min) * 100.0)
    }

    /// Days between planned and completed date (positive when late)
    #[must_use]
    pub fn slip_days(&self) -> Option<i64> {
        self.completed_date
            .map(|done| (done - self.planned_date).num_days())
    }

    /// Load actually absorbed, falling back to zero when not completed
    #[must_use]
    pub fn effective_load(&self) -> f64 {
        if self.was_completed() {
            self.actual_load.unwrap_or(self.planned_load)
        } else {
            0.0
        }
    }
}

/// Kind of mismatch between plan and execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationType {
    /// Elapsed session with no completion
    MissedSession,
    /// Completed well above planned load
    LoadOvershoot,
    /// Completed well below planned load
    LoadUndershoot,
    /// Acute:chronic ratio from executed load crossed the danger threshold
    AcwrBreach,
    /// Consecutive sessions completed on shifted dates
    ScheduleDrift,
}

/// Quantitative detail of a deviation, enough to target a fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationMetrics {
    /// Size of the deviation (percentage points, ratio, or days depending on type)
    pub magnitude: f64,
    /// Week the deviation belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    /// Sessions involved
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub session_ids: Vec<String>,
    /// Planned reference value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_value: Option<f64>,
    /// Observed value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<f64>,
}

/// A detected deviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDeviation {
    /// Deviation kind
    pub deviation_type: DeviationType,
    /// Metrics for targeting
    pub metrics: DeviationMetrics,
    /// Date the deviation occurred
    pub occurred_on: NaiveDate,
    /// Short description
    pub description: String,
}
