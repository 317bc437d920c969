// ABOUTME: Builds AthleteContext snapshots from load history and the athlete's profile
// ABOUTME: Combines training load, Karvonen heart rate zones, and VDOT training paces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::algorithms::{training_paces, VdotAlgorithm};
use super::training_load::{DailyLoad, TrainingLoadCalculator};
use chrono::NaiveDate;
use pacewise_core::errors::AppResult;
use pacewise_core::models::{AthleteContext, AthleteProfile, HeartRateZones};
use tracing::debug;

/// Computes athlete snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct AthleteContextCalculator {
    load_calculator: TrainingLoadCalculator,
    vdot_algorithm: VdotAlgorithm,
}

impl AthleteContextCalculator {
    /// Calculator with standard load windows and the Daniels VDOT formula
    #[must_use]
    pub const fn new() -> Self {
        Self {
            load_calculator: TrainingLoadCalculator::new(),
            vdot_algorithm: VdotAlgorithm::Daniels,
        }
    }

    /// Calculator with custom components
    #[must_use]
    pub const fn with_components(
        load_calculator: TrainingLoadCalculator,
        vdot_algorithm: VdotAlgorithm,
    ) -> Self {
        Self {
            load_calculator,
            vdot_algorithm,
        }
    }

    /// Compute a snapshot as of a date
    ///
    /// Heart rate zones are attached when max and resting HR are known. Paces come from the
    /// most recent race result when present, otherwise from the profile VO2max.
    ///
    /// # Errors
    ///
    /// Returns a validation error for negative loads, implausible heart rates, or a race result
    /// or VO2max outside the supported VDOT range
    pub fn compute(
        &self,
        history: &[DailyLoad],
        profile: &AthleteProfile,
        as_of: NaiveDate,
    ) -> AppResult<AthleteContext> {
        let load = self.load_calculator.calculate_training_load(history, as_of)?;
        let mut context =
            AthleteContext::from_loads(&profile.athlete_id, as_of, load.ctl, load.atl);
        context.vo2max = profile.vo2max;

        if let (Some(max_hr), Some(resting_hr)) = (profile.max_hr, profile.resting_hr) {
            context = context.with_hr_zones(HeartRateZones::from_karvonen(max_hr, resting_hr)?);
        }

        if let Some(vdot) = self.estimate_vdot(profile)? {
            context = context.with_training_paces(training_paces(vdot)?);
        }

        debug!(
            athlete.id = %profile.athlete_id,
            ctl = context.ctl,
            atl = context.atl,
            tsb = context.tsb,
            acwr = ?context.acwr,
            risk_zone = ?context.risk_zone,
            "Athlete context computed"
        );
        Ok(context)
    }

    /// VDOT from the recent race result, falling back to VO2max as a proxy
    ///
    /// # Errors
    ///
    /// Returns a validation error when the race result is implausible
    pub fn estimate_vdot(&self, profile: &AthleteProfile) -> AppResult<Option<f64>> {
        if let Some(race) = profile.recent_race {
            let vdot = self
                .vdot_algorithm
                .calculate_vdot(race.distance_km * 1000.0, race.time_seconds)?;
            return Ok(Some(vdot));
        }
        Ok(profile.vo2max)
    }
}
