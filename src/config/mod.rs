// ABOUTME: Configuration management module for engine tuning parameters
// ABOUTME: Exposes the intelligence configuration and its domain sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Pacewise engine
//!
//! - **Intelligence**: readiness weights, planning cadence, deviation bounds, adaptation
//!   thresholds, loaded from defaults plus `INTELLIGENCE_*` environment overrides

/// Engine configuration and validation
pub mod intelligence;

pub use intelligence::{
    AdaptationConfig, ConfigError, DeviationConfig, IntelligenceConfig, PlanningConfig,
    ReadinessConfig,
};
