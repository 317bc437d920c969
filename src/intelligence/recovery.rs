// ABOUTME: Strain targets from a recovery score and sleep debt accounting
// ABOUTME: Maps recovery tiers onto a 0-21 strain range and spreads sleep repayment over nights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recovery Helpers
//!
//! Strain on a 0-21 scale follows the recovery tier: high recovery can absorb a hard day,
//! low recovery should stay light. Tier boundaries at 67 and 34 belong to the upper tier.
//!
//! Sleep debt is repaid at most one hour per night, spread over a week when smaller.

use pacewise_core::constants::{readiness, sleep, strain};
use pacewise_core::models::StrainTarget;
use serde::{Deserialize, Serialize};

/// Strain range appropriate for a recovery score (0-100)
#[must_use]
pub fn strain_target(recovery_score: f64) -> StrainTarget {
    let (min, max) = if recovery_score >= readiness::GREEN_MIN {
        strain::HIGH_RECOVERY_TARGET
    } else if recovery_score >= readiness::YELLOW_MIN {
        strain::MODERATE_RECOVERY_TARGET
    } else {
        strain::LOW_RECOVERY_TARGET
    };
    StrainTarget { min, max }
}

/// Accumulated sleep debt and its repayment schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepDebt {
    /// Total debt (hours)
    pub debt_hours: f64,
    /// Nights counted
    pub nights: usize,
}

impl SleepDebt {
    /// Debt of a known size
    #[must_use]
    pub const fn new(debt_hours: f64) -> Self {
        Self {
            debt_hours,
            nights: 0,
        }
    }

    /// Sum of shortfalls below `recommended_hours`; surplus nights do not cancel debt
    #[must_use]
    pub fn from_nights(nights: &[f64], recommended_hours: f64) -> Self {
        let debt_hours = nights
            .iter()
            .filter(|h| h.is_finite())
            .map(|h| (recommended_hours - h).max(0.0))
            .sum();
        Self {
            debt_hours,
            nights: nights.len(),
        }
    }

    /// Debt against the default eight-hour recommendation
    #[must_use]
    pub fn from_nights_default(nights: &[f64]) -> Self {
        Self::from_nights(nights, sleep::RECOMMENDED_HOURS)
    }

    /// Extra sleep to add each night: `min(1.0, debt / 7)`
    #[must_use]
    pub fn nightly_repayment(&self) -> f64 {
        (self.debt_hours / sleep::REPAYMENT_SPREAD_DAYS).min(sleep::MAX_NIGHTLY_REPAYMENT_HOURS)
    }

    /// Nights needed to clear the debt at the nightly repayment rate
    #[must_use]
    pub fn days_to_clear(&self) -> u32 {
        let repayment = self.nightly_repayment();
        if self.debt_hours <= 0.0 || repayment <= 0.0 {
            return 0;
        }
        (self.debt_hours / repayment).ceil() as u32
    }

    /// Whether any debt remains
    #[must_use]
    pub fn has_debt(&self) -> bool {
        self.debt_hours > 0.0
    }
}
