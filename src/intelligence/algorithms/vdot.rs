// ABOUTME: VDOT estimation from race results and named training paces derived from VDOT
// ABOUTME: Implements Jack Daniels' oxygen-cost polynomial and Riegel's power-law race equivalence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pacewise_core::errors::{AppError, AppResult};
use pacewise_core::models::TrainingPaces;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// VDOT calculation algorithm selection
///
/// - `Daniels`: oxygen cost `VO2 = -4.60 + 0.182258v + 0.000104v²` divided by the fraction of
///   VO2max sustainable for the race duration
/// - `Riegel`: converts the result to a 10K equivalent (`T2 = T1 x (D2/D1)^k`) first
///
/// # Scientific References
///
/// - Daniels, J. & Gilbert, J. (1979). *Oxygen Power: Performance Tables for Distance Runners*.
/// - Daniels, J. (2013). *Daniels' Running Formula* (3rd ed.). Human Kinetics.
/// - Riegel, P.S. (1981). Athletic records and human endurance. *American Scientist*, 69(3).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VdotAlgorithm {
    /// Jack Daniels' VDOT formula
    #[default]
    Daniels,
    /// Riegel power-law equivalence to 10K, then Daniels
    Riegel {
        /// Fatigue exponent (typically 1.03-1.08)
        exponent: f64,
    },
}

/// Minimum velocity for VDOT calculation (m/min)
const MIN_VELOCITY: f64 = 100.0;

/// Maximum velocity for VDOT calculation (m/min)
const MAX_VELOCITY: f64 = 500.0;

/// Oxygen cost coefficient for velocity squared
const DANIELS_A: f64 = 0.000_104;

/// Oxygen cost coefficient for velocity
const DANIELS_B: f64 = 0.182_258;

/// Oxygen cost constant term
const DANIELS_C: f64 = -4.60;

/// Plausible VDOT range for pace derivation
const VDOT_RANGE: (f64, f64) = (20.0, 90.0);

/// Fractions of VDOT for each named pace
const PACE_FRACTIONS: PaceFractions = PaceFractions {
    recovery: 0.62,
    easy: 0.70,
    marathon: 0.80,
    threshold: 0.88,
    interval: 0.975,
    repetition: 1.05,
};

struct PaceFractions {
    recovery: f64,
    easy: f64,
    marathon: f64,
    threshold: f64,
    interval: f64,
    repetition: f64,
}

impl VdotAlgorithm {
    /// Calculate VDOT from a race result
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if time or distance is not positive, or `ValueOutOfRange` if the
    /// implied velocity is outside 100-500 m/min
    pub fn calculate_vdot(&self, distance_meters: f64, time_seconds: f64) -> AppResult<f64> {
        if !(time_seconds.is_finite() && time_seconds > 0.0) {
            return Err(AppError::invalid_input("Race time must be positive"));
        }
        if !(distance_meters.is_finite() && distance_meters > 0.0) {
            return Err(AppError::invalid_input("Race distance must be positive"));
        }

        match self {
            Self::Daniels => Self::daniels(distance_meters, time_seconds),
            Self::Riegel { exponent } => {
                const REFERENCE_DISTANCE: f64 = 10_000.0;
                let equivalent =
                    time_seconds * (REFERENCE_DISTANCE / distance_meters).powf(*exponent);
                Self::daniels(REFERENCE_DISTANCE, equivalent)
            }
        }
    }

    fn daniels(distance_meters: f64, time_seconds: f64) -> AppResult<f64> {
        let velocity = distance_meters / time_seconds * 60.0;
        if !(MIN_VELOCITY..=MAX_VELOCITY).contains(&velocity) {
            return Err(AppError::value_out_of_range(format!(
                "Velocity {velocity:.1} m/min is outside valid range ({MIN_VELOCITY}-{MAX_VELOCITY})"
            )));
        }

        let vo2 = oxygen_cost(velocity);
        let fraction = Self::sustainable_fraction(time_seconds / 60.0);
        Ok(vo2 / fraction)
    }

    /// Fraction of VO2max sustainable for a race of the given duration (minutes)
    ///
    /// `%max = 0.8 + 0.1894393 e^(-0.012778 t) + 0.2989558 e^(-0.1932605 t)`
    #[must_use]
    pub fn sustainable_fraction(minutes: f64) -> f64 {
        0.298_955_8f64.mul_add(
            (-0.193_260_5 * minutes).exp(),
            0.189_439_3f64.mul_add((-0.012_778 * minutes).exp(), 0.8),
        )
    }

    /// Get algorithm name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Daniels => "daniels",
            Self::Riegel { .. } => "riegel",
        }
    }
}

impl FromStr for VdotAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daniels" => Ok(Self::Daniels),
            "riegel" => Ok(Self::Riegel { exponent: 1.06 }),
            other => Err(AppError::invalid_input(format!(
                "Unknown VDOT algorithm: '{other}'. Valid options: daniels, riegel"
            ))),
        }
    }
}

/// Oxygen cost (ml/kg/min) of running at `velocity` m/min
#[must_use]
pub fn oxygen_cost(velocity: f64) -> f64 {
    (DANIELS_A * velocity).mul_add(velocity, DANIELS_B.mul_add(velocity, DANIELS_C))
}

/// Velocity (m/min) whose oxygen cost equals `vo2`
///
/// Positive root of `A v² + B v + (C - vo2) = 0`.
#[must_use]
pub fn velocity_for_vo2(vo2: f64) -> f64 {
    let c = DANIELS_C - vo2;
    let discriminant = DANIELS_B.mul_add(DANIELS_B, -(4.0 * DANIELS_A * c));
    (discriminant.max(0.0).sqrt() - DANIELS_B) / (2.0 * DANIELS_A)
}

/// Named training paces (seconds per km) for a VDOT
///
/// # Errors
///
/// Returns `ValueOutOfRange` when VDOT is outside 20-90
pub fn training_paces(vdot: f64) -> AppResult<TrainingPaces> {
    if !(VDOT_RANGE.0..=VDOT_RANGE.1).contains(&vdot) {
        return Err(AppError::value_out_of_range(format!(
            "VDOT {vdot:.1} is outside the supported range ({}-{})",
            VDOT_RANGE.0, VDOT_RANGE.1
        )));
    }

    let pace = |fraction: f64| 60_000.0 / velocity_for_vo2(vdot * fraction);
    Ok(TrainingPaces {
        vdot,
        recovery: pace(PACE_FRACTIONS.recovery),
        easy: pace(PACE_FRACTIONS.easy),
        marathon: pace(PACE_FRACTIONS.marathon),
        threshold: pace(PACE_FRACTIONS.threshold),
        interval: pace(PACE_FRACTIONS.interval),
        repetition: pace(PACE_FRACTIONS.repetition),
    })
}
