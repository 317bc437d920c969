// ABOUTME: Integration tests for training load, athlete context, and VDOT paces
// ABOUTME: Covers EWA load figures, TSB interpretation, overtraining risk, and context snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{date, steady_history};
use pacewise::errors::ErrorCode;
use pacewise::intelligence::{
    training_paces, AthleteContextCalculator, DailyLoad, TrainingLoad, TrainingLoadCalculator,
    TrainingStatus, VdotAlgorithm,
};
use pacewise::models::{AthleteProfile, RaceResult, ReadinessZone, RiskLevel, RiskZone};

#[test]
fn test_alpha_uses_window_length() {
    assert!((TrainingLoadCalculator::alpha(7) - 0.25).abs() < f64::EPSILON);
    assert!((TrainingLoadCalculator::alpha(42) - 2.0 / 43.0).abs() < f64::EPSILON);
}

#[test]
fn test_single_session_from_zero() {
    let day = date(2025, 3, 1);
    let load = TrainingLoadCalculator::new()
        .calculate_training_load(&[DailyLoad::new(day, 100.0)], day)
        .unwrap();

    assert!((load.atl - 25.0).abs() < 1e-9);
    assert!((load.ctl - 100.0 * 2.0 / 43.0).abs() < 1e-9);
    assert!((load.tsb - (load.ctl - load.atl)).abs() < 1e-9);
    let acwr = load.acwr.expect("positive chronic load yields a ratio");
    assert!((acwr - load.atl / load.ctl).abs() < 1e-9);
    assert_eq!(load.days_of_history, 1);
}

#[test]
fn test_steady_load_converges() {
    let end = date(2025, 6, 30);
    let history = steady_history(end, 365, 60.0);
    let load = TrainingLoadCalculator::new()
        .calculate_training_load(&history, end)
        .unwrap();

    assert!((load.ctl - 60.0).abs() < 0.1);
    assert!((load.atl - 60.0).abs() < 0.01);
    assert!(load.tsb.abs() < 0.1);
    assert!((load.acwr.unwrap() - 1.0).abs() < 0.01);
}

#[test]
fn test_same_day_loads_are_summed() {
    let day = date(2025, 3, 1);
    let calculator = TrainingLoadCalculator::new();
    let split = calculator
        .calculate_training_load(&[DailyLoad::new(day, 40.0), DailyLoad::new(day, 60.0)], day)
        .unwrap();
    let single = calculator
        .calculate_training_load(&[DailyLoad::new(day, 100.0)], day)
        .unwrap();
    assert!((split.ctl - single.ctl).abs() < 1e-9);
    assert!((split.atl - single.atl).abs() < 1e-9);
}

#[test]
fn test_rest_days_decay_loads() {
    let day = date(2025, 3, 1);
    let calculator = TrainingLoadCalculator::new();
    let history = [DailyLoad::new(day, 100.0)];
    let same_day = calculator.calculate_training_load(&history, day).unwrap();
    let week_later = calculator
        .calculate_training_load(&history, day + Duration::days(7))
        .unwrap();
    assert!(week_later.atl < same_day.atl);
    assert!(week_later.ctl < same_day.ctl);
    assert_eq!(week_later.days_of_history, 8);
}

#[test]
fn test_future_entries_ignored() {
    let day = date(2025, 3, 1);
    let history = [
        DailyLoad::new(day, 50.0),
        DailyLoad::new(day + Duration::days(3), 500.0),
    ];
    let load = TrainingLoadCalculator::new()
        .calculate_training_load(&history, day)
        .unwrap();
    assert!((load.atl - 12.5).abs() < 1e-9);
}

#[test]
fn test_empty_history_has_no_ratio() {
    let load = TrainingLoadCalculator::new()
        .calculate_training_load(&[], date(2025, 3, 1))
        .unwrap();
    assert!(load.ctl.abs() < f64::EPSILON);
    assert!(load.acwr.is_none());
}

#[test]
fn test_negative_load_rejected() {
    let day = date(2025, 3, 1);
    let error = TrainingLoadCalculator::new()
        .calculate_training_load(&[DailyLoad::new(day, -5.0)], day)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
}

#[test]
fn test_load_series_covers_every_day() {
    let start = date(2025, 3, 1);
    let history = [DailyLoad::new(start, 80.0), DailyLoad::new(start + Duration::days(4), 80.0)];
    let series = TrainingLoadCalculator::new()
        .load_series(&history, start + Duration::days(6))
        .unwrap();
    assert_eq!(series.len(), 7);
    assert!(series[1].load.abs() < f64::EPSILON);
    assert!((series[4].load - 80.0).abs() < f64::EPSILON);
    assert!(series.windows(2).all(|w| w[1].date == w[0].date + Duration::days(1)));
}

#[test]
fn test_interpret_tsb() {
    assert_eq!(TrainingLoadCalculator::interpret_tsb(-15.0), TrainingStatus::Overreaching);
    assert_eq!(TrainingLoadCalculator::interpret_tsb(-5.0), TrainingStatus::Productive);
    assert_eq!(TrainingLoadCalculator::interpret_tsb(5.0), TrainingStatus::Fresh);
    assert_eq!(TrainingLoadCalculator::interpret_tsb(15.0), TrainingStatus::Detraining);
}

#[test]
fn test_overtraining_risk_factors() {
    let calm = TrainingLoad {
        ctl: 50.0,
        atl: 50.0,
        tsb: 0.0,
        acwr: Some(1.0),
        days_of_history: 100,
    };
    assert_eq!(
        TrainingLoadCalculator::check_overtraining_risk(&calm).risk_level,
        RiskLevel::Low
    );

    let spiked = TrainingLoad {
        ctl: 50.0,
        atl: 80.0,
        tsb: -30.0,
        acwr: Some(1.6),
        days_of_history: 100,
    };
    let risk = TrainingLoadCalculator::check_overtraining_risk(&spiked);
    assert_eq!(risk.risk_level, RiskLevel::High);
    assert_eq!(risk.risk_factors.len(), 2);
}

#[test]
fn test_recommend_recovery_days() {
    assert_eq!(TrainingLoadCalculator::recommend_recovery_days(-25.0), 5);
    assert_eq!(TrainingLoadCalculator::recommend_recovery_days(-12.0), 2);
    assert_eq!(TrainingLoadCalculator::recommend_recovery_days(5.0), 0);
}

#[test]
fn test_vdot_from_race_result() {
    let vdot = VdotAlgorithm::Daniels
        .calculate_vdot(10_000.0, 45.0 * 60.0)
        .unwrap();
    // 45:00 10K is roughly VDOT 45
    assert!((43.0..47.0).contains(&vdot), "vdot {vdot}");
}

#[test]
fn test_training_paces_are_ordered() {
    let paces = training_paces(50.0).unwrap();
    assert!(paces.recovery > paces.easy);
    assert!(paces.easy > paces.marathon);
    assert!(paces.marathon > paces.threshold);
    assert!(paces.threshold > paces.interval);
    assert!(paces.interval > paces.repetition);
}

#[test]
fn test_training_paces_reject_out_of_range_vdot() {
    assert!(training_paces(5.0).is_err());
}

#[test]
fn test_context_computation() {
    let as_of = date(2025, 3, 1);
    let profile = AthleteProfile {
        max_hr: Some(190),
        resting_hr: Some(50),
        recent_race: Some(RaceResult {
            distance_km: 5.0,
            time_seconds: 20.0 * 60.0,
        }),
        ..AthleteProfile::new("runner")
    };
    let history = steady_history(as_of, 200, 50.0);
    let context = AthleteContextCalculator::new()
        .compute(&history, &profile, as_of)
        .unwrap();

    assert_eq!(context.athlete_id, "runner");
    assert!((context.ctl - 50.0).abs() < 0.5);
    assert_eq!(context.risk_zone, RiskZone::Optimal);
    let zones = context.hr_zones.as_ref().expect("zones from heart rates");
    assert_eq!(zones.zones.len(), 5);
    assert_eq!(zones.zones[0].min_bpm, 120);
    assert!(context.training_paces.is_some());
}

#[test]
fn test_context_without_profile_data() {
    let as_of = date(2025, 3, 1);
    let context = AthleteContextCalculator::new()
        .compute(&[], &AthleteProfile::new("new-runner"), as_of)
        .unwrap();
    assert!(context.acwr.is_none());
    assert!(context.hr_zones.is_none());
    assert!(context.training_paces.is_none());
    assert_eq!(context.readiness_zone, ReadinessZone::Yellow);
}

#[test]
fn test_with_readiness_returns_new_snapshot() {
    let as_of = date(2025, 3, 1);
    let context = AthleteContextCalculator::new()
        .compute(&[], &AthleteProfile::new("runner"), as_of)
        .unwrap();
    let updated = context.with_readiness(120.0);
    assert!((updated.readiness_score - 100.0).abs() < f64::EPSILON);
    assert_eq!(updated.readiness_zone, ReadinessZone::Green);
    assert!((context.readiness_score - 50.0).abs() < f64::EPSILON);
}
