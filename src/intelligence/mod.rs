// ABOUTME: Intelligence module for training load, readiness, planning, and adaptation
// ABOUTME: Exposes the engines that plan, monitor, and adjust endurance training
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! The training engine:
//!
//! - **Training load**: CTL, ATL, TSB and ACWR from daily load history
//! - **Athlete context**: immutable snapshot with heart rate zones and training paces
//! - **Baselines**: per-athlete rolling HRV, resting HR and sleep averages
//! - **Readiness**: fatigue prediction with risk levels and recovery estimates
//! - **Plan generation**: periodized, constraint-respecting multi-week plans
//! - **Deviation detection**: planned versus completed work
//! - **Adaptation**: quantified plan adjustments applied as new plan revisions
//! - **Explanation**: itemized factors behind every output

/// Adaptation engine and plan revisions
pub mod adaptation;
/// Pace algorithms
pub mod algorithms;
/// Athlete context computation
pub mod athlete_context;
/// Personal baselines and signal history
pub mod baseline;
/// Deviation detection and compliance
pub mod deviation;
/// Explanation layer
pub mod explanation;
/// Training plan generation
pub mod plan_generator;
/// Readiness and fatigue prediction
pub mod readiness;
/// Strain targets and sleep debt
pub mod recovery;
/// Training load calculation
pub mod training_load;

pub use adaptation::AdaptationEngine;
pub use algorithms::{training_paces, VdotAlgorithm};
pub use athlete_context::AthleteContextCalculator;
pub use baseline::{
    rolling_average, BaselineComparison, BaselineMetric, BaselineStore, PersonalBaseline,
    SignalHistory, TrendDirection, WellnessObservation,
};
pub use deviation::{DeviationDetector, WeeklyCompliance};
pub use explanation::{AdaptationInputs, ExplanationEngine};
pub use plan_generator::{monday_of, select_training_days, PlanGenerator};
pub use readiness::{ReadinessPredictor, ReadinessService};
pub use recovery::{strain_target, SleepDebt};
pub use training_load::{
    DailyLoad, LoadSeriesPoint, OvertrainingRisk, TrainingLoad, TrainingLoadCalculator,
    TrainingStatus,
};
