// ABOUTME: Domain value objects for the periodization engine
// ABOUTME: Re-exports athlete, goal, plan, completion, adaptation, readiness, and explanation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Value objects exchanged between the engine components. None of them owns behavior beyond
//! derived getters and validation; computation lives in the engine crate.

/// Athlete fitness/fatigue snapshot, heart rate zones and training paces
pub mod athlete;
/// Race goals and standard distances
pub mod goal;
/// Plan constraints, periodized plans, weeks and sessions
pub mod plan;
/// Executed workouts and plan deviations
pub mod completion;
/// Adaptation recommendations and revision records
pub mod adaptation;
/// Daily readiness inputs and fatigue predictions
pub mod readiness;
/// Itemized explanation payloads
pub mod explanation;

pub use adaptation::{
    AdaptationRecommendation, AdaptationRecord, AdaptationSuggestion, AdaptationTrigger,
    AdaptationType,
};
pub use athlete::{
    AthleteContext, AthleteProfile, HeartRateZone, HeartRateZones, RaceResult, ReadinessZone,
    RiskZone, TrainingPaces,
};
pub use completion::{DeviationMetrics, DeviationType, Feeling, PlanDeviation, WorkoutCompletion};
pub use explanation::{DataSource, ExplainedRecommendation, ExplanationFactor, FactorImpact};
pub use goal::{RaceDistance, RaceGoal};
pub use plan::{
    PaceRange, PeriodizationType, PlanConstraints, PlannedSession, StructuredInterval,
    TrainingPhase, TrainingPlan, TrainingWeek, WorkoutType,
};
pub use readiness::{
    AcwrAlert, ComponentScore, DailyReadiness, FatigueLevel, FatiguePrediction,
    ReadinessComponent, RecommendedIntensity, RecoveryEstimate, RecoveryState, RiskLevel,
    StrainTarget,
};
