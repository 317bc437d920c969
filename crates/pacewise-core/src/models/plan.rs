// ABOUTME: Periodized training plan model with weeks, sessions, phases, and scheduling constraints
// ABOUTME: Plans are revisioned; adaptations produce new week revisions rather than in-place edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::adaptation::AdaptationRecord;
use super::athlete::AthleteContext;
use super::goal::RaceGoal;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Every weekday in Monday-first order
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Workout categories a session can be scheduled as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Conversational aerobic run
    Easy,
    /// Weekly long run
    Long,
    /// Sustained comfortably-hard effort
    Tempo,
    /// Lactate threshold work
    Threshold,
    /// VO2max intervals
    Intervals,
    /// Unstructured speed play
    Fartlek,
    /// Hill repeats
    Hills,
    /// Very easy recovery jog
    Recovery,
    /// No training
    Rest,
    /// Non-running aerobic work
    CrossTraining,
    /// Goal race
    Race,
}

impl WorkoutType {
    /// Hard sessions that must not fall on consecutive days
    #[must_use]
    pub const fn is_quality(&self) -> bool {
        matches!(
            self,
            Self::Tempo | Self::Threshold | Self::Intervals | Self::Fartlek | Self::Hills
        )
    }

    /// Approximate training load per minute (TSS-like units)
    #[must_use]
    pub const fn load_per_minute(&self) -> f64 {
        match self {
            Self::Rest => 0.0,
            Self::Recovery => 0.6,
            Self::CrossTraining => 0.7,
            Self::Easy => 0.9,
            Self::Long => 0.95,
            Self::Fartlek => 1.2,
            Self::Hills => 1.25,
            Self::Tempo => 1.3,
            Self::Threshold => 1.4,
            Self::Intervals | Self::Race => 1.5,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Long => "long",
            Self::Tempo => "tempo",
            Self::Threshold => "threshold",
            Self::Intervals => "intervals",
            Self::Fartlek => "fartlek",
            Self::Hills => "hills",
            Self::Recovery => "recovery",
            Self::Rest => "rest",
            Self::CrossTraining => "cross-training",
            Self::Race => "race",
        };
        f.write_str(label)
    }
}

/// Emphasis of a training week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingPhase {
    /// Aerobic foundation
    Base,
    /// Race-specific development
    Build,
    /// Highest load, sharpening
    Peak,
    /// Pre-race load reduction
    Taper,
    /// Cutback week for absorption
    Recovery,
}

/// How load and intensity are distributed across the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodizationType {
    /// Volume first, intensity later
    Linear,
    /// Intensity first, volume later
    Reverse,
    /// Concentrated blocks of one emphasis
    Block,
    /// Emphasis rotates week to week
    Undulating,
}

impl FromStr for PeriodizationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "reverse" => Ok(Self::Reverse),
            "block" => Ok(Self::Block),
            "undulating" | "dup" => Ok(Self::Undulating),
            other => Err(AppError::invalid_format(format!(
                "Unknown periodization '{other}'. Valid options: linear, reverse, block, undulating"
            ))),
        }
    }
}

impl fmt::Display for PeriodizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Linear => "linear",
            Self::Reverse => "reverse",
            Self::Block => "block",
            Self::Undulating => "undulating",
        };
        f.write_str(label)
    }
}

/// Scheduling constraints supplied by the athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct PlanConstraints {
    /// Training days per week (3-7)
    pub days_per_week: u8,
    /// Day the long run is scheduled on
    pub long_run_day: Weekday,
    /// Days with no training
    pub rest_days: Vec<Weekday>,
    /// Upper bound on weekly training time (hours)
    pub max_weekly_hours: f64,
    /// Upper bound on any single session (minutes); the race itself is exempt
    pub max_session_duration_min: u32,
    /// Easy days may be replaced by cross-training
    pub allow_cross_training: bool,
    /// Quality sessions may fall on consecutive days
    pub back_to_back_hard_ok: bool,
    /// Two sessions per day are acceptable
    pub allow_double_days: bool,
}

impl Default for PlanConstraints {
    fn default() -> Self {
        Self {
            days_per_week: 5,
            long_run_day: Weekday::Sun,
            rest_days: vec![Weekday::Mon],
            max_weekly_hours: 8.0,
            max_session_duration_min: 150,
            allow_cross_training: false,
            back_to_back_hard_ok: false,
            allow_double_days: false,
        }
    }
}

impl PlanConstraints {
    /// Shortest session the generator will schedule (minutes)
    pub const MIN_SESSION_MINUTES: u32 = 20;

    /// Non-rest days in Monday-first order
    #[must_use]
    pub fn available_days(&self) -> Vec<Weekday> {
        WEEKDAYS
            .iter()
            .copied()
            .filter(|day| !self.rest_days.contains(day))
            .collect()
    }

    /// Check that the constraints can be satisfied together
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for out-of-range fields and `InfeasibleConstraints` when the
    /// fields contradict each other
    pub fn validate(&self) -> AppResult<()> {
        if !(3..=7).contains(&self.days_per_week) {
            return Err(AppError::value_out_of_range(format!(
                "days_per_week must be between 3 and 7, got {}",
                self.days_per_week
            )));
        }
        if !self.max_weekly_hours.is_finite() || self.max_weekly_hours <= 0.0 {
            return Err(AppError::value_out_of_range(
                "max_weekly_hours must be a positive number",
            ));
        }
        if self.max_session_duration_min < Self::MIN_SESSION_MINUTES {
            return Err(AppError::value_out_of_range(format!(
                "max_session_duration_min must be at least {} minutes",
                Self::MIN_SESSION_MINUTES
            )));
        }
        if self.rest_days.contains(&self.long_run_day) {
            return Err(AppError::infeasible_constraints(format!(
                "Long run day {} is also a rest day",
                self.long_run_day
            )));
        }

        let available = self.available_days().len();
        if usize::from(self.days_per_week) > available {
            return Err(AppError::infeasible_constraints(format!(
                "days_per_week ({}) exceeds the {available} non-rest days available",
                self.days_per_week
            ))
            .with_details(serde_json::json!({
                "days_per_week": self.days_per_week,
                "available_days": available,
            })));
        }

        let minimum_weekly_minutes =
            f64::from(u32::from(self.days_per_week) * Self::MIN_SESSION_MINUTES);
        if self.max_weekly_hours * 60.0 < minimum_weekly_minutes {
            return Err(AppError::infeasible_constraints(format!(
                "max_weekly_hours ({:.1}) cannot fit {} sessions of {} minutes",
                self.max_weekly_hours,
                self.days_per_week,
                Self::MIN_SESSION_MINUTES
            )));
        }
        Ok(())
    }

    /// Weekly training time limit in whole minutes
    #[must_use]
    pub fn weekly_minute_budget(&self) -> u32 {
        (self.max_weekly_hours * 60.0).floor().max(0.0) as u32
    }

    /// Shrink `durations` so that they plus `fixed_minutes` fit the weekly limit
    ///
    /// Sessions are scaled down in 5-minute steps and never below
    /// [`Self::MIN_SESSION_MINUTES`]. Sessions pinned at the minimum drop out of the pool and
    /// the rest are rescaled until the total fits or nothing is left to shrink.
    pub fn fit_weekly_minutes(&self, durations: &mut [u32], fixed_minutes: u32) {
        let budget = self.weekly_minute_budget();
        let min = Self::MIN_SESSION_MINUTES;

        // Every pass that overshoots pins at least one more session at the minimum
        for _ in 0..=durations.len() {
            let total = fixed_minutes + durations.iter().sum::<u32>();
            if total <= budget {
                return;
            }
            let pinned: u32 = durations.iter().filter(|d| **d <= min).sum();
            let free: u32 = durations.iter().filter(|d| **d > min).sum();
            if free == 0 {
                return;
            }
            let available = budget.saturating_sub(fixed_minutes + pinned);
            let factor = f64::from(available) / f64::from(free);
            for duration in durations.iter_mut().filter(|d| **d > min) {
                let steps = (f64::from(*duration) * factor / f64::from(DURATION_STEP_MINUTES))
                    .floor()
                    .max(0.0) as u32;
                *duration = (steps * DURATION_STEP_MINUTES).max(min);
            }
        }
    }
}

/// Granularity of scheduled session durations (minutes)
const DURATION_STEP_MINUTES: u32 = 5;

/// Pace window in seconds per kilometer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    /// Fast end of the window
    pub fast_sec_per_km: f64,
    /// Slow end of the window
    pub slow_sec_per_km: f64,
}

impl PaceRange {
    /// Window of `spread` seconds either side of a center pace
    #[must_use]
    pub fn around(center_sec_per_km: f64, spread: f64) -> Self {
        Self {
            fast_sec_per_km: center_sec_per_km - spread,
            slow_sec_per_km: center_sec_per_km + spread,
        }
    }
}

/// Repeated work/recovery block inside a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructuredInterval {
    /// Number of repeats
    pub repetitions: u32,
    /// Work segment (seconds)
    pub work_seconds: u32,
    /// Recovery segment (seconds)
    pub recovery_seconds: u32,
    /// Work pace target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<PaceRange>,
    /// Work heart rate zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_zone: Option<u8>,
}

/// One scheduled training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSession {
    /// Stable identifier, `w{week}-{day}`
    pub id: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Day of week
    pub day: Weekday,
    /// Workout category
    pub workout_type: WorkoutType,
    /// Target duration (minutes)
    pub duration_min: u32,
    /// Target training load
    pub target_load: f64,
    /// Pace target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_target: Option<PaceRange>,
    /// Heart rate zone target (1-5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_zone: Option<u8>,
    /// Structured work blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intervals: Vec<StructuredInterval>,
    /// Human-readable summary
    pub description: String,
}

impl PlannedSession {
    /// Day index, 0 = Monday through 6 = Sunday
    #[must_use]
    pub fn day_index(&self) -> u32 {
        self.day.num_days_from_monday()
    }
}

/// One week of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingWeek {
    /// 1-based, contiguous within a plan
    pub week_number: u32,
    /// Monday of this week
    pub start_date: NaiveDate,
    /// Week emphasis
    pub phase: TrainingPhase,
    /// Weekly target load
    pub target_load: f64,
    /// Reduced-load recovery week
    pub is_cutback: bool,
    /// Sessions in day order, one per training day
    pub sessions: Vec<PlannedSession>,
    /// Incremented each time an adaptation rewrites this week
    #[serde(default)]
    pub revision: u32,
}

impl TrainingWeek {
    /// Sunday of this week
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(6)
    }

    /// Sum of session target loads
    #[must_use]
    pub fn planned_load(&self) -> f64 {
        self.sessions.iter().map(|s| s.target_load).sum()
    }

    /// Sum of session durations (minutes)
    #[must_use]
    pub fn planned_minutes(&self) -> u32 {
        self.sessions.iter().map(|s| s.duration_min).sum()
    }

    /// Number of non-rest sessions
    #[must_use]
    pub fn training_days(&self) -> usize {
        self.sessions
            .iter()
            .filter(|s| s.workout_type != WorkoutType::Rest)
            .count()
    }

    /// Session by id
    #[must_use]
    pub fn session(&self, session_id: &str) -> Option<&PlannedSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Whether the whole week lies before `as_of`
    #[must_use]
    pub fn has_elapsed(&self, as_of: NaiveDate) -> bool {
        self.end_date() < as_of
    }

    /// Whether `date` falls inside this week
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date()
    }
}

/// Periodized multi-week plan toward a race goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Stable plan identity, preserved across revisions
    pub id: Uuid,
    /// Athlete the plan belongs to
    pub athlete_id: String,
    /// Race goal
    pub goal: RaceGoal,
    /// Scheduling constraints
    pub constraints: PlanConstraints,
    /// Athlete snapshot at creation time
    pub athlete_context: AthleteContext,
    /// Periodization model
    pub periodization: PeriodizationType,
    /// Weeks 1..N in order
    pub weeks: Vec<TrainingWeek>,
    /// Week with the highest target load before the taper
    pub peak_week: u32,
    /// Monday of week 1
    pub start_date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Plan revision, 0 when freshly generated
    #[serde(default)]
    pub revision: u32,
    /// Append-only log of applied adaptations
    #[serde(default)]
    pub adaptation_history: Vec<AdaptationRecord>,
}

impl TrainingPlan {
    /// Number of weeks
    #[must_use]
    pub fn total_weeks(&self) -> u32 {
        u32::try_from(self.weeks.len()).unwrap_or(u32::MAX)
    }

    /// Week by number
    #[must_use]
    pub fn week(&self, week_number: u32) -> Option<&TrainingWeek> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }

    /// Week containing a date
    #[must_use]
    pub fn week_containing(&self, date: NaiveDate) -> Option<&TrainingWeek> {
        self.weeks.iter().find(|w| w.contains(date))
    }

    /// All sessions in date order
    pub fn sessions(&self) -> impl Iterator<Item = &PlannedSession> {
        self.weeks.iter().flat_map(|w| w.sessions.iter())
    }

    /// Session and its week number by session id
    #[must_use]
    pub fn find_session(&self, session_id: &str) -> Option<(u32, &PlannedSession)> {
        self.weeks.iter().find_map(|w| {
            w.session(session_id)
                .map(|session| (w.week_number, session))
        })
    }

    /// Sessions scheduled strictly before `as_of`
    pub fn elapsed_sessions(&self, as_of: NaiveDate) -> impl Iterator<Item = &PlannedSession> {
        self.sessions().filter(move |s| s.date < as_of)
    }

    /// Last day of the plan
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.weeks
            .last()
            .map_or(self.start_date, TrainingWeek::end_date)
    }

    /// Total planned load across all weeks
    #[must_use]
    pub fn total_planned_load(&self) -> f64 {
        self.weeks.iter().map(TrainingWeek::planned_load).sum()
    }
}
