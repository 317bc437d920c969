// ABOUTME: Integration tests for periodized plan generation
// ABOUTME: Covers week layout, race placement, scheduling constraints, load progression, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Datelike, Duration, Weekday};
use common::{
    constraints, context, date, default_constraints, full_context, generate_plan, marathon_goal,
    marathon_plan, plan_start, ten_k_goal,
};
use pacewise::config::PlanningConfig;
use pacewise::errors::ErrorCode;
use pacewise::intelligence::{monday_of, select_training_days, PlanGenerator};
use pacewise::models::{
    PeriodizationType, PlanConstraints, RaceDistance, RaceGoal, TrainingPhase, TrainingWeek,
    WorkoutType,
};

fn is_full_week(week: &TrainingWeek) -> bool {
    !week.is_cutback && week.phase != TrainingPhase::Taper
}

#[test]
fn test_weeks_are_contiguous_mondays_ending_on_race_week() {
    common::init_test_logging();
    let plan = marathon_plan();

    assert_eq!(plan.total_weeks(), 16);
    assert_eq!(plan.start_date, plan_start());
    for (index, week) in plan.weeks.iter().enumerate() {
        assert_eq!(week.week_number as usize, index + 1);
        assert_eq!(week.start_date.weekday(), Weekday::Mon);
        assert_eq!(week.start_date, plan_start() + Duration::weeks(i64::try_from(index).unwrap()));
    }
    let last = plan.weeks.last().unwrap();
    assert!(last.contains(plan.goal.race_date));
    assert_eq!(plan.revision, 0);
    assert!(plan.adaptation_history.is_empty());
}

#[test]
fn test_race_session_is_scheduled_once_and_exempt_from_session_cap() {
    let plan = marathon_plan();
    let races: Vec<_> = plan
        .sessions()
        .filter(|s| s.workout_type == WorkoutType::Race)
        .collect();

    assert_eq!(races.len(), 1);
    let race = races[0];
    assert_eq!(race.date, date(2025, 4, 27));
    assert_eq!(race.duration_min, 210);
    assert!(race.duration_min > plan.constraints.max_session_duration_min);

    let pace = race.pace_target.expect("race has a pace target");
    let goal_pace = plan.goal.target_pace_sec_per_km();
    assert!(pace.fast_sec_per_km < goal_pace && goal_pace < pace.slow_sec_per_km);
}

#[test]
fn test_no_sessions_on_rest_days_and_long_run_on_long_day() {
    let plan = marathon_plan();

    for week in &plan.weeks {
        for session in &week.sessions {
            assert_ne!(session.day, Weekday::Mon, "{} is on a rest day", session.id);
            assert_eq!(session.date.weekday(), session.day);
            assert!(week.contains(session.date));
        }
        let race_week = week.contains(plan.goal.race_date);
        let long_runs: Vec<_> = week
            .sessions
            .iter()
            .filter(|s| s.workout_type == WorkoutType::Long)
            .collect();
        if race_week {
            assert!(long_runs.is_empty());
        } else {
            assert_eq!(long_runs.len(), 1, "week {}", week.week_number);
            assert_eq!(long_runs[0].day, Weekday::Sun);
        }
    }
}

#[test]
fn test_session_counts_follow_cutbacks() {
    let plan = marathon_plan();

    let cutbacks: Vec<u32> = plan
        .weeks
        .iter()
        .filter(|w| w.is_cutback)
        .map(|w| w.week_number)
        .collect();
    assert_eq!(cutbacks, vec![4, 8]);

    for week in &plan.weeks {
        if week.contains(plan.goal.race_date) {
            continue;
        }
        if week.is_cutback {
            assert_eq!(week.phase, TrainingPhase::Recovery);
            assert_eq!(week.sessions.len(), 4);
        } else {
            assert_eq!(week.sessions.len(), 5, "week {}", week.week_number);
        }
    }
}

#[test]
fn test_cutback_keeps_at_least_three_sessions() {
    let plan = generate_plan(
        &marathon_goal(),
        &constraints(3, Weekday::Sun, vec![Weekday::Mon]),
        &context(45.0, 45.0),
    );
    let cutback = plan.weeks.iter().find(|w| w.is_cutback).unwrap();
    assert_eq!(cutback.sessions.len(), 3);
}

#[test]
fn test_durations_respect_hour_limits() {
    let plan = marathon_plan();
    let max_session = plan.constraints.max_session_duration_min;
    let max_weekly = (plan.constraints.max_weekly_hours * 60.0) as u32;

    for week in &plan.weeks {
        let training_minutes: u32 = week
            .sessions
            .iter()
            .filter(|s| s.workout_type != WorkoutType::Race)
            .map(|s| s.duration_min)
            .sum();
        assert!(training_minutes <= max_weekly, "week {}", week.week_number);

        for session in week.sessions.iter().filter(|s| s.workout_type != WorkoutType::Race) {
            assert!(session.duration_min <= max_session);
            assert!(session.duration_min >= PlanConstraints::MIN_SESSION_MINUTES);
            assert!(session.target_load > 0.0);
        }
    }
}

#[test]
fn test_tight_weekly_hours_scale_sessions_down() {
    let tight = PlanConstraints {
        max_weekly_hours: 3.0,
        ..default_constraints()
    };
    let plan = generate_plan(&marathon_goal(), &tight, &context(60.0, 60.0));

    for week in &plan.weeks {
        let training_minutes: u32 = week
            .sessions
            .iter()
            .filter(|s| s.workout_type != WorkoutType::Race)
            .map(|s| s.duration_min)
            .sum();
        assert!(training_minutes <= 180, "week {} has {training_minutes}", week.week_number);
    }
}

#[test]
fn test_weekly_hours_near_session_minimum_still_fit() {
    // 105 minutes for five sessions leaves one slot above the 20-minute floor
    let tight = PlanConstraints {
        max_weekly_hours: 1.75,
        ..default_constraints()
    };
    let plan = generate_plan(&marathon_goal(), &tight, &context(45.0, 45.0));

    for week in &plan.weeks {
        let training: Vec<u32> = week
            .sessions
            .iter()
            .filter(|s| s.workout_type != WorkoutType::Race)
            .map(|s| s.duration_min)
            .collect();
        let total: u32 = training.iter().sum();
        assert!(total <= 105, "week {} has {total} minutes: {training:?}", week.week_number);
        assert!(training.iter().all(|d| *d >= PlanConstraints::MIN_SESSION_MINUTES));
    }
}

#[test]
fn test_fit_weekly_minutes_rescales_sessions_above_minimum() {
    let tight = PlanConstraints {
        max_weekly_hours: 1.75,
        ..default_constraints()
    };
    let mut durations = vec![30, 30, 25, 25, 60];
    tight.fit_weekly_minutes(&mut durations, 0);
    assert!(durations.iter().sum::<u32>() <= 105, "{durations:?}");
    assert!(durations.iter().all(|d| *d >= 20 && d % 5 == 0), "{durations:?}");

    let mut with_fixed = vec![40, 40];
    tight.fit_weekly_minutes(&mut with_fixed, 60);
    assert_eq!(with_fixed, vec![20, 20]);

    let mut already_fits = vec![20, 35, 50];
    tight.fit_weekly_minutes(&mut already_fits, 0);
    assert_eq!(already_fits, vec![20, 35, 50]);
}

#[test]
fn test_target_load_progresses_outside_cutbacks_and_taper() {
    let plan = marathon_plan();
    let full: Vec<f64> = plan
        .weeks
        .iter()
        .filter(|w| is_full_week(w))
        .map(|w| w.target_load)
        .collect();

    assert!(full.windows(2).all(|pair| pair[1] >= pair[0]), "{full:?}");
    assert!(full[0] >= 45.0 * 7.0 - 0.1);

    let peak = plan.week(plan.peak_week).unwrap();
    assert_ne!(peak.phase, TrainingPhase::Taper);
    let taper: Vec<f64> = plan
        .weeks
        .iter()
        .filter(|w| w.phase == TrainingPhase::Taper)
        .map(|w| w.target_load)
        .collect();
    assert_eq!(taper.len(), 3);
    assert!(taper.windows(2).all(|pair| pair[1] < pair[0]));
    assert!(taper.iter().all(|load| *load < peak.target_load));
}

#[test]
fn test_cutback_weeks_reduce_load() {
    let plan = marathon_plan();
    for week in plan.weeks.iter().filter(|w| w.is_cutback) {
        let previous = plan.week(week.week_number - 1).unwrap();
        assert!(week.target_load < previous.target_load);
    }
}

#[test]
fn test_quality_sessions_never_on_consecutive_days() {
    let plan = marathon_plan();
    let quality_dates: Vec<_> = plan
        .sessions()
        .filter(|s| s.workout_type.is_quality())
        .map(|s| s.date)
        .collect();

    assert!(!quality_dates.is_empty());
    for pair in quality_dates.windows(2) {
        assert!((pair[1] - pair[0]).num_days() > 1, "{} and {}", pair[0], pair[1]);
    }
}

#[test]
fn test_back_to_back_allowed_still_schedules_quality() {
    let relaxed = PlanConstraints {
        back_to_back_hard_ok: true,
        ..constraints(6, Weekday::Sun, vec![Weekday::Mon])
    };
    let plan = generate_plan(&marathon_goal(), &relaxed, &context(45.0, 45.0));
    let build_week = plan
        .weeks
        .iter()
        .find(|w| w.phase == TrainingPhase::Build && !w.is_cutback)
        .unwrap();

    let quality = build_week
        .sessions
        .iter()
        .filter(|s| s.workout_type.is_quality())
        .count();
    assert_eq!(quality, 2);
}

#[test]
fn test_sessions_carry_paces_and_zones_from_context() {
    let plan = marathon_plan();
    let easy = plan
        .sessions()
        .find(|s| s.workout_type == WorkoutType::Easy)
        .unwrap();
    assert!(easy.pace_target.is_some());
    assert_eq!(easy.hr_zone, Some(2));

    let bare = generate_plan(&marathon_goal(), &default_constraints(), &context(45.0, 45.0));
    let easy = bare
        .sessions()
        .find(|s| s.workout_type == WorkoutType::Easy)
        .unwrap();
    assert!(easy.pace_target.is_none());
    assert!(easy.hr_zone.is_none());
}

#[test]
fn test_zero_fitness_uses_default_starting_load() {
    let plan = generate_plan(&marathon_goal(), &default_constraints(), &context(0.0, 0.0));
    let first = &plan.weeks[0];
    assert!((first.target_load - PlanningConfig::default().default_weekly_load).abs() < 0.1);
    assert!(plan.weeks[1].target_load > first.target_load);
}

#[test]
fn test_race_on_rest_day_is_still_scheduled() {
    let goal = RaceGoal::new(date(2025, 4, 28), RaceDistance::Marathon, 3 * 3600).unwrap();
    let plan = generate_plan(&goal, &default_constraints(), &context(45.0, 45.0));

    let last = plan.weeks.last().unwrap();
    assert_eq!(last.start_date, date(2025, 4, 28));
    assert_eq!(last.sessions.len(), 1);
    assert_eq!(last.sessions[0].workout_type, WorkoutType::Race);
    assert_eq!(last.sessions[0].day, Weekday::Mon);
}

#[test]
fn test_mid_week_start_anchors_on_monday() {
    let start = date(2025, 1, 8);
    let plan = PlanGenerator::default()
        .generate_plan_from(start, &ten_k_goal(), &default_constraints(), &context(30.0, 30.0), None)
        .unwrap();

    assert_eq!(plan.weeks[0].start_date, monday_of(start));
    assert_eq!(plan.start_date, start);
    assert_eq!(plan.total_weeks(), 10);
}

#[test]
fn test_ten_k_race_week_stops_on_race_day() {
    let plan = generate_plan(&ten_k_goal(), &default_constraints(), &full_context(30.0, 30.0));
    let last = plan.weeks.last().unwrap();

    assert!(last.sessions.iter().all(|s| s.date <= plan.goal.race_date));
    assert_eq!(last.sessions.last().unwrap().workout_type, WorkoutType::Race);
    assert_eq!(plan.periodization, PeriodizationType::Undulating);
}

#[test]
fn test_explicit_periodization_is_kept() {
    let plan = PlanGenerator::default()
        .generate_plan_from(
            plan_start(),
            &marathon_goal(),
            &default_constraints(),
            &context(45.0, 45.0),
            Some(PeriodizationType::Block),
        )
        .unwrap();
    assert_eq!(plan.periodization, PeriodizationType::Block);
}

#[test]
fn test_periodization_selection() {
    let marathon = marathon_goal();
    let ten_k = ten_k_goal();
    let half = RaceGoal::new(date(2025, 4, 27), RaceDistance::HalfMarathon, 5400).unwrap();

    assert_eq!(PlanGenerator::select_periodization(&marathon, 6), PeriodizationType::Block);
    assert_eq!(PlanGenerator::select_periodization(&ten_k, 10), PeriodizationType::Undulating);
    assert_eq!(PlanGenerator::select_periodization(&marathon, 12), PeriodizationType::Reverse);
    assert_eq!(PlanGenerator::select_periodization(&marathon, 16), PeriodizationType::Linear);
    assert_eq!(PlanGenerator::select_periodization(&half, 12), PeriodizationType::Linear);
}

#[test]
fn test_total_weeks_and_taper_factors() {
    let monday = plan_start();
    assert_eq!(PlanGenerator::total_weeks(monday, monday + Duration::days(6)), 1);
    assert_eq!(PlanGenerator::total_weeks(monday, monday + Duration::days(7)), 2);
    assert_eq!(PlanGenerator::total_weeks(monday, date(2025, 4, 27)), 16);

    assert_eq!(PlanGenerator::taper_factors(&RaceDistance::FiveK).len(), 1);
    assert_eq!(PlanGenerator::taper_factors(&RaceDistance::HalfMarathon).len(), 2);
    assert_eq!(PlanGenerator::taper_factors(&RaceDistance::Ultra50K).len(), 3);
}

#[test]
fn test_phase_layout_orders_phases() {
    let phases = PlanGenerator::default().phase_layout(16, 3);
    assert_eq!(phases.len(), 16);
    assert_eq!(phases[0], TrainingPhase::Base);
    assert_eq!(&phases[13..], &[TrainingPhase::Taper; 3]);

    let rank = |p: &TrainingPhase| match p {
        TrainingPhase::Base => 0,
        TrainingPhase::Build => 1,
        TrainingPhase::Peak => 2,
        _ => 3,
    };
    assert!(phases.windows(2).all(|pair| rank(&pair[0]) <= rank(&pair[1])));
}

#[test]
fn test_select_training_days_spreads_from_long_run() {
    let days = select_training_days(&default_constraints(), 5);
    assert_eq!(days, vec![1, 2, 3, 4, 6]);

    let three = select_training_days(&constraints(3, Weekday::Sat, vec![]), 3);
    assert_eq!(three.len(), 3);
    assert!(three.contains(&5));
}

#[test]
fn test_infeasible_constraints_are_rejected() {
    let generator = PlanGenerator::default();
    let goal = marathon_goal();
    let ctx = context(40.0, 40.0);

    let too_many_days = constraints(6, Weekday::Sun, vec![Weekday::Mon, Weekday::Fri]);
    let err = generator
        .generate_plan_from(plan_start(), &goal, &too_many_days, &ctx, None)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InfeasibleConstraints);

    let long_on_rest = constraints(5, Weekday::Sun, vec![Weekday::Sun]);
    let err = generator
        .generate_plan_from(plan_start(), &goal, &long_on_rest, &ctx, None)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InfeasibleConstraints);

    let too_few_hours = PlanConstraints {
        max_weekly_hours: 1.0,
        ..default_constraints()
    };
    let err = generator
        .generate_plan_from(plan_start(), &goal, &too_few_hours, &ctx, None)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InfeasibleConstraints);

    let err = generator
        .generate_plan_from(plan_start(), &goal, &constraints(2, Weekday::Sun, vec![]), &ctx, None)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[test]
fn test_race_must_be_after_start() {
    let goal = RaceGoal::new(plan_start(), RaceDistance::TenK, 2700).unwrap();
    let err = PlanGenerator::default()
        .generate_plan_from(plan_start(), &goal, &default_constraints(), &context(30.0, 30.0), None)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_goal_parsing() {
    let goal = RaceGoal::from_strings(date(2025, 4, 27), "marathon", "3:30:00").unwrap();
    assert_eq!(goal.target_time_seconds, 12_600);
    assert_eq!(goal.distance, RaceDistance::Marathon);

    assert_eq!(RaceGoal::parse_target_time("45:00").unwrap(), 2700);
    assert_eq!(RaceGoal::parse_target_time("1500").unwrap(), 1500);
    assert_eq!(
        "15.5 km".parse::<RaceDistance>().unwrap(),
        RaceDistance::Custom { km: 15.5 }
    );

    for bad in ["", "3:75:00", "1:2:3:4", "abc", "0:00"] {
        let err = RaceGoal::parse_target_time(bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat, "input {bad:?}");
    }
    let err = "moon".parse::<RaceDistance>().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
    let err = RaceGoal::from_strings(date(2025, 4, 27), "10k", "fast").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
}
