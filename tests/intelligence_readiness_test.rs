// ABOUTME: Integration tests for the readiness and fatigue predictor
// ABOUTME: Covers component blending, risk levels, ACWR alerts, recovery estimates, and the service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{date, init_test_logging};
use pacewise::config::ReadinessConfig;
use pacewise::intelligence::{BaselineStore, ReadinessPredictor, ReadinessService};
use pacewise::models::{
    DailyReadiness, FatigueLevel, ReadinessComponent, ReadinessZone, RecommendedIntensity,
    RecoveryState, RiskLevel, RiskZone,
};
use std::sync::Arc;

fn predictor() -> ReadinessPredictor {
    ReadinessPredictor::new(ReadinessConfig::default())
}

#[test]
fn test_overreached_athlete_is_exhausted() {
    init_test_logging();
    let prediction = predictor().predict_fatigue(&DailyReadiness::from_loads(date(2025, 3, 1), 40.0, 65.0));

    assert_eq!(prediction.risk_zone, RiskZone::Danger);
    assert_eq!(prediction.fatigue_level, FatigueLevel::Exhausted);
    assert_eq!(prediction.injury_risk, RiskLevel::Critical);
    assert!(prediction.overtraining_risk >= RiskLevel::High);
    assert_eq!(prediction.recommended_intensity, RecommendedIntensity::Rest);
    assert_eq!(prediction.recovery.state, RecoveryState::Depleted);
    assert_eq!(prediction.readiness_zone, ReadinessZone::Red);
    assert_eq!(prediction.strain_target.as_tuple(), (0.0, 8.0));
}

#[test]
fn test_fresh_athlete_with_good_signals_can_train_hard() {
    let readiness = DailyReadiness::from_loads(date(2025, 3, 1), 50.0, 35.0)
        .with_hrv(66.0, Some(60.0))
        .with_resting_hr(48.0, Some(50.0))
        .with_sleep(8.5, Some(8.0));
    let prediction = predictor().predict_fatigue(&readiness);

    assert_eq!(prediction.fatigue_level, FatigueLevel::Recovered);
    assert_eq!(prediction.recommended_intensity, RecommendedIntensity::Hard);
    assert_eq!(prediction.injury_risk, RiskLevel::Low);
    assert_eq!(prediction.components.len(), 5);
    assert!((prediction.confidence - 0.88).abs() < 1e-9);
    assert!(prediction.warnings.is_empty());
}

#[test]
fn test_component_weights_are_renormalized() {
    let readiness = DailyReadiness::from_loads(date(2025, 3, 1), 50.0, 50.0).with_sleep(7.0, None);
    let prediction = predictor().predict_fatigue(&readiness);

    let total: f64 = prediction.components.iter().map(|c| c.weight).sum();
    assert!((total - 1.0).abs() < 1e-9);
    let weighted: f64 = prediction
        .components
        .iter()
        .map(|c| c.weight * c.fatigue_score)
        .sum();
    assert!((weighted - prediction.fatigue_score).abs() < 1e-9);
    assert!((prediction.readiness_score - (100.0 - prediction.fatigue_score)).abs() < 1e-9);
}

#[test]
fn test_sleep_falls_back_to_recommended_hours() {
    let readiness = DailyReadiness::from_loads(date(2025, 3, 1), 50.0, 50.0).with_sleep(6.0, None);
    let prediction = predictor().predict_fatigue(&readiness);
    let sleep = prediction
        .components
        .iter()
        .find(|c| c.component == ReadinessComponent::Sleep)
        .unwrap();
    assert_eq!(sleep.baseline, Some(8.0));
    // 25% shortfall: 50 + 2.5 * 25
    assert!((sleep.fatigue_score - 100.0).abs() < 1e-9);
}

#[test]
fn test_missing_chronic_load_lowers_confidence() {
    let prediction = predictor().predict_fatigue(&DailyReadiness::from_loads(date(2025, 3, 1), 0.0, 10.0));
    assert!(prediction.acwr.is_none());
    assert!((prediction.confidence - 0.47).abs() < 1e-9);
    assert!(prediction.warnings.iter().any(|w| w.contains("ACWR")));
    assert!(prediction.warnings.iter().any(|w| w.contains("No wellness signals")));
}

#[test]
fn test_signal_without_baseline_is_excluded() {
    let readiness = DailyReadiness::from_loads(date(2025, 3, 1), 50.0, 50.0).with_hrv(40.0, None);
    let prediction = predictor().predict_fatigue(&readiness);
    assert!(prediction
        .components
        .iter()
        .all(|c| c.component != ReadinessComponent::Hrv));
    assert!(prediction.warnings.iter().any(|w| w.contains("HRV baseline")));
}

#[test]
fn test_burnout_counts_independent_factors() {
    let readiness = DailyReadiness::from_loads(date(2025, 3, 1), 40.0, 65.0)
        .with_subjective(8.0, Some(7.0))
        .with_hrv(51.0, Some(60.0))
        .with_sleep(6.0, None);
    let prediction = predictor().predict_fatigue(&readiness);
    assert_eq!(prediction.burnout_risk, RiskLevel::Critical);

    let calm = predictor().predict_fatigue(&DailyReadiness::from_loads(date(2025, 3, 1), 50.0, 50.0));
    assert_eq!(calm.burnout_risk, RiskLevel::Low);
}

#[test]
fn test_acwr_alert_in_danger_zone() {
    let alert = predictor().check_acwr_alert(40.0, 65.0).unwrap();
    assert_eq!(alert.risk_zone, RiskZone::Danger);
    assert_eq!(alert.risk_level, RiskLevel::High);
    assert!(alert.message.contains("danger zone"));
}

#[test]
fn test_acwr_alert_band_edges() {
    let p = predictor();
    assert!(p.check_acwr_alert(40.0, 40.0).is_none());
    assert!(p.check_acwr_alert(100.0, 130.0).is_none());
    assert!(p.check_acwr_alert(100.0, 80.0).is_none());
    assert_eq!(p.check_acwr_alert(100.0, 150.0).unwrap().risk_zone, RiskZone::Danger);
    assert_eq!(p.check_acwr_alert(100.0, 140.0).unwrap().risk_zone, RiskZone::Caution);

    let low = p.check_acwr_alert(40.0, 28.0).unwrap();
    assert_eq!(low.risk_zone, RiskZone::Undertraining);
    assert_eq!(low.risk_level, RiskLevel::Moderate);

    assert!(p.check_acwr_alert(0.0, 30.0).is_none());
}

#[test]
fn test_acwr_fatigue_is_monotonic_above_the_band() {
    let p = predictor();
    let samples = [0.8, 1.0, 1.3, 1.4, 1.5, 1.6, 2.0];
    let scores: Vec<f64> = samples.iter().map(|r| p.acwr_fatigue(*r)).collect();
    assert!(scores.windows(2).all(|w| w[1] >= w[0]));
    assert!((p.acwr_fatigue(0.8) - 20.0).abs() < 1e-9);
    assert!((p.acwr_fatigue(1.5) - 80.0).abs() < 1e-9);
    assert!((p.acwr_fatigue(2.0) - 100.0).abs() < 1e-9);
    assert!(p.acwr_fatigue(0.0) > p.acwr_fatigue(0.8));
}

#[test]
fn test_recovery_estimate_clamps_and_adjusts() {
    let p = predictor();
    let minimal = p.estimate_recovery(0.0, 5.0, None);
    assert!((minimal.hours - 12.0).abs() < f64::EPSILON);
    assert_eq!(minimal.state, RecoveryState::Recovered);

    let extreme = p.estimate_recovery(100.0, -60.0, None);
    assert!((extreme.hours - 96.0).abs() < f64::EPSILON);

    let base = p.estimate_recovery(50.0, 0.0, None);
    let elite = p.estimate_recovery(50.0, 0.0, Some(65.0));
    let untrained = p.estimate_recovery(50.0, 0.0, Some(35.0));
    assert!((base.hours - 42.0).abs() < 1e-9);
    assert!((elite.hours - 42.0 * 0.85).abs() < 1e-9);
    assert!((untrained.hours - 42.0 * 1.2).abs() < 1e-9);
    assert!(elite.vo2max_adjusted);
    assert!(!base.vo2max_adjusted);
}

#[test]
fn test_batch_matches_sequential_predictions() {
    let p = predictor();
    let inputs: Vec<DailyReadiness> = (0..20)
        .map(|i| {
            DailyReadiness::from_loads(
                date(2025, 3, 1) + Duration::days(i),
                50.0,
                30.0 + 2.0 * i as f64,
            )
        })
        .collect();
    let batch = p.predict_batch(&inputs);
    assert_eq!(batch.len(), inputs.len());
    for (input, predicted) in inputs.iter().zip(&batch) {
        assert_eq!(predicted, &p.predict_fatigue(input));
    }
}

#[test]
fn test_service_fills_baselines_from_history() {
    init_test_logging();
    let store = Arc::new(BaselineStore::new());
    let service = ReadinessService::new(Arc::clone(&store), predictor());

    for offset in 0..5 {
        let day = date(2025, 3, 1) + Duration::days(offset);
        let prediction = service.predict_for_athlete(
            "runner",
            DailyReadiness::from_loads(day, 50.0, 50.0).with_hrv(60.0, None),
        );
        if offset < 3 {
            assert!(prediction
                .components
                .iter()
                .all(|c| c.component != ReadinessComponent::Hrv));
        }
    }

    let day = date(2025, 3, 6);
    let prediction = service.predict_for_athlete(
        "runner",
        DailyReadiness::from_loads(day, 50.0, 50.0).with_hrv(45.0, None),
    );
    let hrv = prediction
        .components
        .iter()
        .find(|c| c.component == ReadinessComponent::Hrv)
        .expect("baseline from five prior days");
    assert_eq!(hrv.baseline, Some(60.0));
    assert!((hrv.fatigue_score - 100.0).abs() < 1e-9);
    assert_eq!(store.observation_count("runner"), 6);
    assert!((service.baseline("runner", day).hrv_7d.unwrap() - 60.0).abs() < 1e-9);
}
