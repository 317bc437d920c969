// ABOUTME: Integration tests for personal baselines, the baseline store, and recovery helpers
// ABOUTME: Covers rolling averages, trend comparisons, concurrent recording, strain, and sleep debt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::date;
use pacewise::intelligence::{
    rolling_average, strain_target, BaselineComparison, BaselineMetric, BaselineStore,
    SignalHistory, SleepDebt, TrendDirection, WellnessObservation,
};
use std::sync::Arc;
use std::thread;

fn observation(day_offset: i64, hrv: f64, resting_hr: f64, sleep: f64) -> WellnessObservation {
    WellnessObservation {
        hrv_ms: Some(hrv),
        resting_hr: Some(resting_hr),
        sleep_hours: Some(sleep),
        ..WellnessObservation::empty(date(2025, 3, 1) + Duration::days(day_offset))
    }
}

#[test]
fn test_rolling_average_needs_three_valid_points() {
    assert!(rolling_average(&[60.0, 62.0], 7).is_none());
    assert!(rolling_average(&[60.0, f64::NAN, 0.0, 62.0], 7).is_none());
    let average = rolling_average(&[60.0, 62.0, 64.0], 7).unwrap();
    assert!((average - 62.0).abs() < 1e-9);
}

#[test]
fn test_rolling_average_uses_latest_window() {
    let values = [10.0, 10.0, 10.0, 50.0, 50.0, 50.0];
    let average = rolling_average(&values, 3).unwrap();
    assert!((average - 50.0).abs() < 1e-9);
}

#[test]
fn test_comparison_direction_and_favorability() {
    let hrv_up = BaselineComparison::compare(BaselineMetric::Hrv, 66.0, 60.0).unwrap();
    assert!((hrv_up.deviation_pct - 10.0).abs() < 1e-9);
    assert_eq!(hrv_up.direction, TrendDirection::Up);
    assert!(hrv_up.favorable);

    let rhr_up = BaselineComparison::compare(BaselineMetric::RestingHr, 55.0, 50.0).unwrap();
    assert_eq!(rhr_up.direction, TrendDirection::Up);
    assert!(!rhr_up.favorable);

    let stable = BaselineComparison::compare(BaselineMetric::SleepHours, 7.8, 8.0).unwrap();
    assert_eq!(stable.direction, TrendDirection::Stable);
}

#[test]
fn test_comparison_requires_positive_baseline() {
    assert!(BaselineComparison::compare(BaselineMetric::Hrv, 60.0, 0.0).is_none());
    assert!(BaselineComparison::compare(BaselineMetric::Hrv, 60.0, f64::NAN).is_none());
}

#[test]
fn test_history_replaces_same_date_and_stays_sorted() {
    let mut history = SignalHistory::default();
    history.record(observation(2, 60.0, 50.0, 8.0));
    history.record(observation(0, 58.0, 52.0, 7.0));
    history.record(observation(2, 70.0, 48.0, 8.5));
    assert_eq!(history.len(), 2);

    let baseline = history.baseline_as_of(date(2025, 3, 10));
    // Two observations are not enough for a baseline
    assert!(baseline.hrv_7d.is_none());
}

#[test]
fn test_baseline_excludes_the_current_day() {
    let mut history = SignalHistory::default();
    for offset in 0..5 {
        history.record(observation(offset, 60.0, 50.0, 8.0));
    }
    history.record(observation(5, 120.0, 40.0, 4.0));

    let baseline = history.baseline_as_of(date(2025, 3, 6));
    assert!((baseline.hrv_7d.unwrap() - 60.0).abs() < 1e-9);
    assert!((baseline.reference(BaselineMetric::RestingHr).unwrap() - 50.0).abs() < 1e-9);
}

#[test]
fn test_baseline_trend_compares_short_and_long_windows() {
    let mut history = SignalHistory::default();
    for offset in 0..23 {
        history.record(observation(offset, 50.0, 50.0, 8.0));
    }
    for offset in 23..30 {
        history.record(observation(offset, 70.0, 50.0, 8.0));
    }
    let baseline = history.baseline_as_of(date(2025, 3, 31));
    let trend = baseline.trend(BaselineMetric::Hrv).unwrap();
    assert_eq!(trend.direction, TrendDirection::Up);
    assert!(trend.favorable);
    assert_eq!(
        baseline.trend(BaselineMetric::RestingHr).unwrap().direction,
        TrendDirection::Stable
    );
}

#[test]
fn test_history_capacity_is_bounded() {
    let mut history = SignalHistory::default();
    for offset in 0..45 {
        history.record(observation(offset, 60.0, 50.0, 8.0));
    }
    assert_eq!(history.len(), SignalHistory::CAPACITY);
}

#[test]
fn test_store_skips_empty_observations() {
    let store = BaselineStore::new();
    store.record("a", WellnessObservation::empty(date(2025, 3, 1)));
    assert_eq!(store.athlete_count(), 0);
    assert_eq!(store.observation_count("a"), 0);
    assert!(store.baseline_as_of("a", date(2025, 3, 2)).hrv_7d.is_none());
}

#[test]
fn test_observe_returns_prior_baseline_and_records() {
    let store = BaselineStore::new();
    for offset in 0..5 {
        store.record("a", observation(offset, 60.0, 50.0, 8.0));
    }

    let baseline = store.observe("a", observation(5, 120.0, 40.0, 4.0));
    assert!((baseline.hrv_7d.unwrap() - 60.0).abs() < 1e-9);
    assert_eq!(store.observation_count("a"), 6);

    let empty = store.observe("b", WellnessObservation::empty(date(2025, 3, 1)));
    assert!(empty.hrv_7d.is_none());
    assert_eq!(store.athlete_count(), 1);
}

#[test]
fn test_concurrent_observations_for_one_athlete_are_all_kept() {
    let store = Arc::new(BaselineStore::new());
    for offset in 0..5 {
        store.record("shared", observation(offset, 60.0, 50.0, 8.0));
    }
    let handles: Vec<_> = (5..15)
        .map(|offset| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.observe("shared", observation(offset, 60.0, 50.0, 8.0)))
        })
        .collect();
    for handle in handles {
        if let Some(hrv) = handle.join().unwrap().hrv_7d {
            assert!((hrv - 60.0).abs() < 1e-9);
        }
    }
    assert_eq!(store.observation_count("shared"), 15);
}

#[test]
fn test_store_isolates_athletes_across_threads() {
    let store = Arc::new(BaselineStore::new());
    let handles: Vec<_> = (0..4)
        .map(|athlete| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let id = format!("athlete-{athlete}");
                for offset in 0..10 {
                    store.record(&id, observation(offset, 50.0 + f64::from(athlete), 50.0, 8.0));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.athlete_count(), 4);
    for athlete in 0..4 {
        let id = format!("athlete-{athlete}");
        assert_eq!(store.observation_count(&id), 10);
        let baseline = store.baseline_as_of(&id, date(2025, 3, 11));
        assert!((baseline.hrv_7d.unwrap() - (50.0 + f64::from(athlete))).abs() < 1e-9);
    }

    let removed = store.remove("athlete-0").unwrap();
    assert_eq!(removed.len(), 10);
    assert!(store.snapshot("athlete-0").is_none());
}

#[test]
fn test_strain_target_boundaries() {
    assert_eq!(strain_target(67.0).as_tuple(), (14.0, 21.0));
    assert_eq!(strain_target(66.9).as_tuple(), (8.0, 14.0));
    assert_eq!(strain_target(34.0).as_tuple(), (8.0, 14.0));
    assert_eq!(strain_target(33.9).as_tuple(), (0.0, 8.0));
}

#[test]
fn test_sleep_debt_repayment() {
    let debt = SleepDebt::new(10.0);
    assert!((debt.nightly_repayment() - 1.0).abs() < f64::EPSILON);
    assert_eq!(debt.days_to_clear(), 10);

    let small = SleepDebt::new(3.5);
    assert!((small.nightly_repayment() - 0.5).abs() < f64::EPSILON);
    assert_eq!(small.days_to_clear(), 7);

    assert_eq!(SleepDebt::new(0.0).days_to_clear(), 0);
}

#[test]
fn test_sleep_debt_from_nights_ignores_surplus() {
    let debt = SleepDebt::from_nights_default(&[6.0, 9.0, 7.5]);
    assert!((debt.debt_hours - 2.5).abs() < 1e-9);
    assert_eq!(debt.nights, 3);
    assert!(debt.has_debt());
}
