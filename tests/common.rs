// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Provides dates, goals, constraints, athlete contexts, and completion builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pacewise`

use chrono::{Duration, NaiveDate, Weekday};
use pacewise::config::PlanningConfig;
use pacewise::intelligence::{AthleteContextCalculator, DailyLoad, PlanGenerator};
use pacewise::models::{
    AthleteContext, AthleteProfile, PlanConstraints, RaceDistance, RaceGoal, RaceResult,
    TrainingPlan, WorkoutCompletion,
};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .try_init();
    });
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// A Monday, used as the default plan start
pub fn plan_start() -> NaiveDate {
    date(2025, 1, 6)
}

/// Marathon on a Sunday 16 weeks after `plan_start`
pub fn marathon_goal() -> RaceGoal {
    RaceGoal::new(date(2025, 4, 27), RaceDistance::Marathon, 3 * 3600 + 30 * 60)
        .expect("valid goal")
}

/// 10K on a Saturday 10 weeks after `plan_start`
pub fn ten_k_goal() -> RaceGoal {
    RaceGoal::new(date(2025, 3, 15), RaceDistance::TenK, 45 * 60).expect("valid goal")
}

pub fn default_constraints() -> PlanConstraints {
    PlanConstraints::default()
}

pub fn constraints(days_per_week: u8, long_run_day: Weekday, rest_days: Vec<Weekday>) -> PlanConstraints {
    PlanConstraints {
        days_per_week,
        long_run_day,
        rest_days,
        ..PlanConstraints::default()
    }
}

/// Context from load figures only, dated the day before the plan starts
pub fn context(ctl: f64, atl: f64) -> AthleteContext {
    AthleteContext::from_loads("athlete-1", plan_start() - Duration::days(1), ctl, atl)
}

/// Context with heart rate zones and training paces
pub fn full_context(ctl: f64, atl: f64) -> AthleteContext {
    let profile = AthleteProfile {
        max_hr: Some(190),
        resting_hr: Some(50),
        recent_race: Some(RaceResult {
            distance_km: 10.0,
            time_seconds: 45.0 * 60.0,
        }),
        ..AthleteProfile::new("athlete-1")
    };
    let as_of = plan_start() - Duration::days(1);
    let history = steady_history(as_of, 120, ctl);
    let computed = AthleteContextCalculator::new()
        .compute(&history, &profile, as_of)
        .expect("context computes");
    let base = AthleteContext::from_loads("athlete-1", as_of, ctl, atl);
    AthleteContext {
        hr_zones: computed.hr_zones,
        training_paces: computed.training_paces,
        ..base
    }
}

/// Same load every day for `days` days ending on `end`
pub fn steady_history(end: NaiveDate, days: i64, load: f64) -> Vec<DailyLoad> {
    (0..days)
        .map(|offset| DailyLoad::new(end - Duration::days(days - 1 - offset), load))
        .collect()
}

pub fn generate_plan(goal: &RaceGoal, constraints: &PlanConstraints, context: &AthleteContext) -> TrainingPlan {
    PlanGenerator::new(PlanningConfig::default())
        .generate_plan_from(plan_start(), goal, constraints, context, None)
        .expect("plan generates")
}

pub fn marathon_plan() -> TrainingPlan {
    generate_plan(&marathon_goal(), &default_constraints(), &full_context(45.0, 45.0))
}

/// Every session before `as_of` completed on its planned day at its planned load
pub fn complete_as_planned(plan: &TrainingPlan, as_of: NaiveDate) -> Vec<WorkoutCompletion> {
    plan.sessions()
        .filter(|s| s.date < as_of && s.date >= plan.start_date)
        .map(|s| WorkoutCompletion::for_session(s).completed(s.date, s.duration_min, s.target_load))
        .collect()
}

/// Every session before `as_of` completed at `pct` percent of its planned load
pub fn complete_at_pct(plan: &TrainingPlan, as_of: NaiveDate, pct: f64) -> Vec<WorkoutCompletion> {
    plan.sessions()
        .filter(|s| s.date < as_of && s.date >= plan.start_date)
        .map(|s| {
            WorkoutCompletion::for_session(s).completed(
                s.date,
                s.duration_min,
                s.target_load * pct / 100.0,
            )
        })
        .collect()
}
