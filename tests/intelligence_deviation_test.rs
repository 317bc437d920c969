// ABOUTME: Integration tests for plan deviation detection and weekly compliance
// ABOUTME: Covers missed sessions, load under/overshoot, ACWR breaches, and schedule drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{
    complete_as_planned, complete_at_pct, context, date, default_constraints, marathon_goal,
    marathon_plan, plan_start,
};
use pacewise::intelligence::{DeviationDetector, PlanGenerator};
use pacewise::models::{DeviationType, PlanDeviation, WorkoutCompletion};

fn of_type(deviations: &[PlanDeviation], kind: DeviationType) -> Vec<&PlanDeviation> {
    deviations
        .iter()
        .filter(|d| d.deviation_type == kind)
        .collect()
}

#[test]
fn test_nothing_elapsed_means_no_deviations() {
    common::init_test_logging();
    let plan = marathon_plan();
    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &[], plan_start());
    assert!(deviations.is_empty());
}

#[test]
fn test_every_elapsed_session_without_completion_is_missed() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(14);
    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &[], as_of);

    let missed = of_type(&deviations, DeviationType::MissedSession);
    assert_eq!(missed.len(), 10);
    assert_eq!(deviations.len(), 10);
    for deviation in missed {
        assert!(deviation.occurred_on < as_of);
        assert_eq!(deviation.metrics.session_ids.len(), 1);
        assert_eq!(deviation.metrics.actual_value, Some(0.0));
        assert!(deviation.metrics.magnitude > 0.0);
    }
    assert!(deviations.windows(2).all(|pair| pair[0].occurred_on <= pair[1].occurred_on));
}

#[test]
fn test_completed_as_planned_has_no_deviations() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(14);
    let completions = complete_as_planned(&plan, as_of);

    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
    assert!(deviations.is_empty(), "{deviations:?}");
}

#[test]
fn test_open_record_does_not_hide_a_completion() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(7);
    let mut completions = complete_as_planned(&plan, as_of);
    let first = plan.sessions().next().unwrap();
    completions.push(WorkoutCompletion::for_session(first));

    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
    assert!(of_type(&deviations, DeviationType::MissedSession).is_empty());
}

#[test]
fn test_low_execution_flags_undershoots() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(14);
    let completions = complete_at_pct(&plan, as_of, 60.0);

    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
    let undershoots = of_type(&deviations, DeviationType::LoadUndershoot);
    assert_eq!(undershoots.len(), 10);
    for deviation in undershoots {
        assert!((deviation.metrics.magnitude - 40.0).abs() < 1e-6);
    }
    assert!(of_type(&deviations, DeviationType::LoadOvershoot).is_empty());
}

#[test]
fn test_execution_within_band_is_not_flagged() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(14);
    for pct in [75.0, 120.0] {
        let completions = complete_at_pct(&plan, as_of, pct);
        let deviations =
            DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
        assert!(of_type(&deviations, DeviationType::LoadUndershoot).is_empty());
        assert!(of_type(&deviations, DeviationType::LoadOvershoot).is_empty());
    }
}

#[test]
fn test_high_execution_flags_overshoots() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(14);
    let completions = complete_at_pct(&plan, as_of, 140.0);

    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
    let overshoots = of_type(&deviations, DeviationType::LoadOvershoot);
    assert_eq!(overshoots.len(), 10);
    assert!((overshoots[0].metrics.magnitude - 40.0).abs() < 1e-6);
}

#[test]
fn test_session_compliance_percentage() {
    let plan = marathon_plan();
    let session = plan.sessions().next().unwrap();
    let mut record = WorkoutCompletion::for_session(session);
    assert_eq!(record.compliance_pct(), None);

    record.planned_load = 80.0;
    let record = record.completed(session.date, session.duration_min, 75.0);
    assert!((record.compliance_pct().unwrap() - 93.75).abs() < 1e-9);
    assert_eq!(record.slip_days(), Some(0));
}

#[test]
fn test_load_spike_is_flagged_as_acwr_breach() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(14);
    let completions = complete_at_pct(&plan, as_of, 400.0);

    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
    let breaches = of_type(&deviations, DeviationType::AcwrBreach);
    assert!(!breaches.is_empty());
    for breach in breaches {
        assert!(breach.metrics.magnitude >= 1.5);
        assert!(breach.metrics.week_number.is_some());
        assert!(!breach.metrics.session_ids.is_empty());
    }
}

#[test]
fn test_consecutive_late_sessions_flag_drift() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(7);
    let completions: Vec<WorkoutCompletion> = plan.weeks[0]
        .sessions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let done = if i < 3 { s.date + Duration::days(1) } else { s.date };
            WorkoutCompletion::for_session(s).completed(done, s.duration_min, s.target_load)
        })
        .collect();

    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
    let drifts = of_type(&deviations, DeviationType::ScheduleDrift);
    assert_eq!(drifts.len(), 1);
    let drift = drifts[0];
    assert_eq!(drift.metrics.session_ids.len(), 3);
    assert!((drift.metrics.magnitude - 1.0).abs() < f64::EPSILON);
    assert_eq!(drift.metrics.week_number, Some(1));
}

#[test]
fn test_two_late_sessions_are_not_drift() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(7);
    let completions: Vec<WorkoutCompletion> = plan.weeks[0]
        .sessions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let done = if i < 2 { s.date + Duration::days(1) } else { s.date };
            WorkoutCompletion::for_session(s).completed(done, s.duration_min, s.target_load)
        })
        .collect();

    let deviations = DeviationDetector::default().detect_deviations_as_of(&plan, &completions, as_of);
    assert!(of_type(&deviations, DeviationType::ScheduleDrift).is_empty());
}

#[test]
fn test_sessions_before_mid_week_start_are_not_missed() {
    let start = date(2025, 1, 8);
    let plan = PlanGenerator::default()
        .generate_plan_from(start, &marathon_goal(), &default_constraints(), &context(45.0, 45.0), None)
        .unwrap();
    assert!(plan.weeks[0].sessions.iter().any(|s| s.date < start));

    let deviations =
        DeviationDetector::default().detect_deviations_as_of(&plan, &[], date(2025, 1, 13));
    assert!(!deviations.is_empty());
    assert!(deviations.iter().all(|d| d.occurred_on >= start));
}

#[test]
fn test_weekly_compliance_summary() {
    let plan = marathon_plan();
    let as_of = plan_start() + Duration::days(14);
    let week_one_end = plan_start() + Duration::days(7);
    let completions = complete_as_planned(&plan, week_one_end);

    let summary = DeviationDetector::default().summarize_compliance(&plan, &completions, as_of);
    assert_eq!(summary.len(), 2);

    let first = &summary[0];
    assert_eq!(first.week_number, 1);
    assert_eq!(first.planned_sessions, 5);
    assert_eq!(first.completed_sessions, 5);
    assert!((first.compliance_pct.unwrap() - 100.0).abs() < 1e-9);

    let second = &summary[1];
    assert_eq!(second.completed_sessions, 0);
    assert!(second.completed_load.abs() < f64::EPSILON);
    assert!(second.compliance_pct.unwrap().abs() < f64::EPSILON);
}
