// ABOUTME: Unit tests for engine configuration defaults, validation, and environment overrides
// ABOUTME: Environment-mutating tests run serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pacewise::config::{ConfigError, IntelligenceConfig};
use pacewise::errors::{AppError, ErrorCode};
use serial_test::serial;
use std::env;

const OVERRIDES: [&str; 5] = [
    "INTELLIGENCE_READINESS_TSB_WEIGHT",
    "INTELLIGENCE_READINESS_ACWR_WEIGHT",
    "INTELLIGENCE_PLAN_CUTBACK_FREQUENCY",
    "INTELLIGENCE_DEVIATION_UNDERSHOOT_PCT",
    "INTELLIGENCE_ADAPTATION_HIGH_PRIORITY_CONFIDENCE",
];

fn clear_overrides() {
    for name in OVERRIDES {
        env::remove_var(name);
    }
}

#[test]
fn test_default_config_validation() {
    let config = IntelligenceConfig::default();
    assert!(config.validate().is_ok());

    let weights = &config.readiness.weights;
    assert!((weights.total() - 1.0).abs() < 1e-9);
    assert_eq!(config.planning.cutback_frequency, 4);
    assert!((config.deviation.undershoot_pct - 70.0).abs() < f64::EPSILON);
    assert!((config.adaptation.high_priority_confidence - 0.8).abs() < f64::EPSILON);
}

#[test]
fn test_invalid_weights_sum() {
    let mut config = IntelligenceConfig::default();
    config.readiness.weights.tsb = 0.8;
    config.readiness.weights.acwr = 0.8;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWeights(_))
    ));
}

#[test]
fn test_negative_weight_rejected() {
    let mut config = IntelligenceConfig::default();
    config.readiness.weights.sleep = -0.1;
    config.readiness.weights.tsb += 0.2;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWeights(_))
    ));
}

#[test]
fn test_unordered_thresholds_rejected() {
    let mut config = IntelligenceConfig::default();
    config.readiness.fatigue_thresholds.moderate = 10.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

    let mut config = IntelligenceConfig::default();
    config.readiness.acwr_bands.caution_above = 2.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_planning_bounds() {
    let mut config = IntelligenceConfig::default();
    config.planning.cutback_frequency = 6;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    let mut config = IntelligenceConfig::default();
    config.planning.progression_rate = 0.3;
    assert!(config.validate().is_err());

    let mut config = IntelligenceConfig::default();
    config.planning.cutback_frequency = 3;
    assert!(config.validate().is_ok());
}

#[test]
fn test_deviation_and_adaptation_bounds() {
    let mut config = IntelligenceConfig::default();
    config.deviation.overshoot_pct = 90.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

    let mut config = IntelligenceConfig::default();
    config.adaptation.overreaching.min_volume_multiplier = 0.95;
    assert!(config.validate().is_err());

    let mut config = IntelligenceConfig::default();
    config.adaptation.high_priority_confidence = 1.5;
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn test_environment_variable_override() {
    clear_overrides();
    env::set_var("INTELLIGENCE_READINESS_TSB_WEIGHT", "0.30");
    env::set_var("INTELLIGENCE_READINESS_ACWR_WEIGHT", "0.30");
    env::set_var("INTELLIGENCE_PLAN_CUTBACK_FREQUENCY", "3");
    env::set_var("INTELLIGENCE_ADAPTATION_HIGH_PRIORITY_CONFIDENCE", "0.75");

    let config = IntelligenceConfig::load().unwrap();

    assert!((config.readiness.weights.tsb - 0.30).abs() < 0.001);
    assert!((config.readiness.weights.acwr - 0.30).abs() < 0.001);
    assert_eq!(config.planning.cutback_frequency, 3);
    assert!((config.adaptation.high_priority_confidence - 0.75).abs() < 0.001);

    clear_overrides();
}

#[test]
#[serial]
fn test_unparseable_override_is_a_parse_error() {
    clear_overrides();
    env::set_var("INTELLIGENCE_DEVIATION_UNDERSHOOT_PCT", "seventy");

    let err = IntelligenceConfig::load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("INTELLIGENCE_DEVIATION_UNDERSHOOT_PCT"));

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ConfigError);

    clear_overrides();
}

#[test]
#[serial]
fn test_override_that_breaks_validation() {
    clear_overrides();
    env::set_var("INTELLIGENCE_READINESS_TSB_WEIGHT", "0.9");

    let err = IntelligenceConfig::load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWeights(_)));
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ConfigInvalid);

    clear_overrides();
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    clear_overrides();
    let loaded = IntelligenceConfig::load().unwrap();
    let defaults = IntelligenceConfig::default();
    assert_eq!(
        serde_json::to_value(&loaded).unwrap(),
        serde_json::to_value(&defaults).unwrap()
    );
}
