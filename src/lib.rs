// ABOUTME: Main library entry point for the Pacewise adaptive training engine
// ABOUTME: Re-exports the core models and errors alongside the engine modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacewise
//!
//! An adaptive endurance-training engine. Given an athlete's load history, physiological
//! signals and a race goal, it predicts readiness and fatigue, generates a periodized plan,
//! detects deviations between planned and completed work, recommends quantified adaptations,
//! and explains every output with itemized factors.
//!
//! ## Architecture
//!
//! - **`pacewise-core`**: errors, constants and value objects, re-exported here
//! - **Config**: injected engine configuration with environment overrides
//! - **Intelligence**: the engines
//! - **Logging**: `tracing` subscriber setup and structured engine events
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use pacewise::config::IntelligenceConfig;
//! use pacewise::errors::AppResult;
//! use pacewise::intelligence::PlanGenerator;
//! use pacewise::models::{AthleteContext, PlanConstraints, RaceGoal};
//!
//! fn main() -> AppResult<()> {
//!     let config = IntelligenceConfig::load()?;
//!     let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default();
//!     let race = NaiveDate::from_ymd_opt(2025, 4, 27).unwrap_or_default();
//!     let goal = RaceGoal::from_strings(race, "marathon", "3:30:00")?;
//!     let context = AthleteContext::from_loads("athlete-1", start, 45.0, 50.0);
//!     let plan = PlanGenerator::new(config.planning).generate_plan_from(
//!         start,
//!         &goal,
//!         &PlanConstraints::default(),
//!         &context,
//!         None,
//!     )?;
//!     println!("{} weeks, peak at week {}", plan.total_weeks(), plan.peak_week);
//!     Ok(())
//! }
//! ```

pub use pacewise_core::{constants, errors, models};

/// Engine configuration
pub mod config;

/// Training intelligence engines
pub mod intelligence;

/// Structured logging
pub mod logging;
