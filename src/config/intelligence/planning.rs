// ABOUTME: Plan generator configuration for phase allocation, cutbacks, and load progression
// ABOUTME: Configures progressive overload, cutback cadence, and quality-session limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planning Configuration
//!
//! # Scientific References
//!
//! - Progressive overload and the 10% rule: Buist et al. (2008)
//! - Periodization models: Issurin (2010), Bompa & Haff (2009)
//! - Tapering: Mujika & Padilla (2003), Bosquet et al. (2007)

use serde::{Deserialize, Serialize};

/// Plan generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Share of non-taper weeks given to each phase
    pub phase_proportions: PhaseProportions,
    /// A cutback week every N weeks (3-4)
    pub cutback_frequency: u32,
    /// Load multiplier for cutback weeks
    pub cutback_factor: f64,
    /// Weekly load growth within a phase
    pub progression_rate: f64,
    /// Starting weekly load when the athlete has no chronic load
    pub default_weekly_load: f64,
    /// Maximum quality sessions per week
    pub max_quality_sessions: u32,
    /// Share of the long run in the weekly duration budget, relative to an easy day
    pub long_run_share: f64,
    /// Share of each quality session, relative to an easy day
    pub quality_share: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            phase_proportions: PhaseProportions::default(),
            cutback_frequency: 4,
            cutback_factor: 0.7,
            progression_rate: 0.06,
            default_weekly_load: 200.0,
            max_quality_sessions: 2,
            long_run_share: 2.5,
            quality_share: 1.6,
        }
    }
}

/// Proportions of non-taper weeks per phase; the remainder goes to peak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseProportions {
    /// Base phase
    pub base: f64,
    /// Build phase
    pub build: f64,
    /// Peak phase
    pub peak: f64,
}

impl Default for PhaseProportions {
    fn default() -> Self {
        Self {
            base: 0.40,
            build: 0.35,
            peak: 0.15,
        }
    }
}

impl PhaseProportions {
    /// Sum of all proportions
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base + self.build + self.peak
    }
}
