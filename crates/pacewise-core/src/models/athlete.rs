// ABOUTME: Athlete fitness and fatigue snapshot with risk zones, heart rate zones, and paces
// ABOUTME: AthleteContext is recomputed from load history and never mutated in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{acwr, heart_rate, readiness};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Injury-risk zone derived from the acute:chronic workload ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskZone {
    /// ACWR below 0.8
    Undertraining,
    /// ACWR between 0.8 and 1.3 inclusive
    Optimal,
    /// ACWR above 1.3 and below 1.5
    Caution,
    /// ACWR at or above 1.5
    Danger,
}

impl RiskZone {
    /// Classify an ACWR value
    #[must_use]
    pub fn from_acwr(ratio: f64) -> Self {
        if ratio >= acwr::DANGER_AT {
            Self::Danger
        } else if ratio > acwr::CAUTION_ABOVE {
            Self::Caution
        } else if ratio >= acwr::UNDERTRAINING_BELOW {
            Self::Optimal
        } else {
            Self::Undertraining
        }
    }

    /// Whether this zone calls for more conservative programming
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::Caution | Self::Danger)
    }
}

/// Readiness traffic-light zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessZone {
    /// Score 67 and above
    Green,
    /// Score 34 to 66
    Yellow,
    /// Score below 34
    Red,
}

impl ReadinessZone {
    /// Classify a 0-100 readiness score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= readiness::GREEN_MIN {
            Self::Green
        } else if score >= readiness::YELLOW_MIN {
            Self::Yellow
        } else {
            Self::Red
        }
    }
}

/// A single heart rate training zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZone {
    /// Zone number (1-5)
    pub zone: u8,
    /// Lower bound (bpm)
    pub min_bpm: u32,
    /// Upper bound (bpm)
    pub max_bpm: u32,
}

impl HeartRateZone {
    /// Midpoint of the zone (bpm)
    #[must_use]
    pub const fn midpoint(&self) -> u32 {
        (self.min_bpm + self.max_bpm) / 2
    }
}

/// Five heart rate zones computed with the Karvonen (heart rate reserve) method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZones {
    /// Maximum heart rate used for the calculation
    pub max_hr: u32,
    /// Resting heart rate used for the calculation
    pub resting_hr: u32,
    /// Zones 1 through 5, ascending
    pub zones: Vec<HeartRateZone>,
}

impl HeartRateZones {
    /// Build zones from max and resting heart rate
    ///
    /// Zone `n` spans `resting + reserve * [f(n-1), f(n)]` for the reserve fractions
    /// 50/60/70/80/90/100%.
    ///
    /// # Errors
    ///
    /// Returns a `ValueOutOfRange` error when the heart rates are not physiologically plausible
    /// or resting heart rate is not below max heart rate
    pub fn from_karvonen(max_hr: u32, resting_hr: u32) -> AppResult<Self> {
        if !(100..=230).contains(&max_hr) {
            return Err(AppError::value_out_of_range(format!(
                "Max heart rate {max_hr} outside 100-230 bpm"
            )));
        }
        if !(25..=120).contains(&resting_hr) || resting_hr >= max_hr {
            return Err(AppError::value_out_of_range(format!(
                "Resting heart rate {resting_hr} must be 25-120 bpm and below max {max_hr}"
            )));
        }

        let reserve = f64::from(max_hr - resting_hr);
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let bpm_at =
            |fraction: f64| reserve.mul_add(fraction, f64::from(resting_hr)).round() as u32;

        let zones = heart_rate::KARVONEN_BOUNDARIES
            .windows(2)
            .zip(1_u8..)
            .map(|(bounds, zone)| HeartRateZone {
                zone,
                min_bpm: bpm_at(bounds[0]),
                max_bpm: bpm_at(bounds[1]),
            })
            .collect();

        Ok(Self {
            max_hr,
            resting_hr,
            zones,
        })
    }

    /// Look up a zone by number (1-5)
    #[must_use]
    pub fn zone(&self, number: u8) -> Option<&HeartRateZone> {
        self.zones.iter().find(|z| z.zone == number)
    }

    /// Find the zone containing a heart rate, if any
    #[must_use]
    pub fn zone_for_bpm(&self, bpm: u32) -> Option<u8> {
        self.zones
            .iter()
            .find(|z| bpm >= z.min_bpm && bpm <= z.max_bpm)
            .map(|z| z.zone)
    }
}

/// Named training paces in seconds per kilometer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingPaces {
    /// VDOT the paces were derived from
    pub vdot: f64,
    /// Recovery jog pace
    pub recovery: f64,
    /// Easy aerobic pace
    pub easy: f64,
    /// Marathon pace
    pub marathon: f64,
    /// Threshold (tempo) pace
    pub threshold: f64,
    /// VO2max interval pace
    pub interval: f64,
    /// Repetition (speed) pace
    pub repetition: f64,
}

/// Recent race performance used to estimate VDOT
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    /// Race distance (km)
    pub distance_km: f64,
    /// Finishing time (seconds)
    pub time_seconds: f64,
}

/// Static physiological profile supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Athlete identifier
    pub athlete_id: String,
    /// Maximum heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hr: Option<u32>,
    /// Resting heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_hr: Option<u32>,
    /// VO2max estimate (ml/kg/min)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2max: Option<f64>,
    /// Most recent race result, preferred over VO2max for pace derivation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_race: Option<RaceResult>,
}

impl AthleteProfile {
    /// Create a profile with only an athlete id
    #[must_use]
    pub fn new(athlete_id: impl Into<String>) -> Self {
        Self {
            athlete_id: athlete_id.into(),
            ..Self::default()
        }
    }
}

/// Fitness/fatigue snapshot of an athlete on a given date
///
/// Produced by the engine from a load history. Each computation yields a new snapshot;
/// derived fields (`tsb`, `acwr`, `risk_zone`, `readiness_zone`) are always consistent
/// with `ctl` and `atl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteContext {
    /// Athlete identifier
    pub athlete_id: String,
    /// Date the snapshot describes
    pub as_of: NaiveDate,
    /// Chronic training load (42-day EWA)
    pub ctl: f64,
    /// Acute training load (7-day EWA)
    pub atl: f64,
    /// Training stress balance (`ctl - atl`)
    pub tsb: f64,
    /// Acute:chronic workload ratio, absent when there is no chronic load
    pub acwr: Option<f64>,
    /// Injury-risk zone from ACWR
    pub risk_zone: RiskZone,
    /// Karvonen heart rate zones, when max and resting HR are known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_zones: Option<HeartRateZones>,
    /// Named training paces, when a VDOT could be estimated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_paces: Option<TrainingPaces>,
    /// VO2max estimate carried from the profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2max: Option<f64>,
    /// Readiness score (0-100)
    pub readiness_score: f64,
    /// Readiness zone
    pub readiness_zone: ReadinessZone,
}

impl AthleteContext {
    /// Build a snapshot from load figures alone
    ///
    /// Readiness is estimated from form: `clamp(50 + 2 * tsb, 0, 100)`.
    #[must_use]
    pub fn from_loads(athlete_id: impl Into<String>, as_of: NaiveDate, ctl: f64, atl: f64) -> Self {
        let tsb = ctl - atl;
        let ratio = Self::ratio(ctl, atl);
        let readiness_score = Self::readiness_from_tsb(tsb);
        Self {
            athlete_id: athlete_id.into(),
            as_of,
            ctl,
            atl,
            tsb,
            acwr: ratio,
            risk_zone: RiskZone::from_acwr(ratio.unwrap_or(0.0)),
            hr_zones: None,
            training_paces: None,
            vo2max: None,
            readiness_score,
            readiness_zone: ReadinessZone::from_score(readiness_score),
        }
    }

    /// Acute:chronic ratio, `None` when chronic load is not positive
    #[must_use]
    pub fn ratio(ctl: f64, atl: f64) -> Option<f64> {
        (ctl > 0.0).then(|| atl / ctl)
    }

    /// Readiness estimate from training stress balance alone
    #[must_use]
    pub fn readiness_from_tsb(tsb: f64) -> f64 {
        2.0_f64
            .mul_add(tsb, readiness::NEUTRAL_SCORE)
            .clamp(0.0, readiness::MAX_SCORE)
    }

    /// Return a new snapshot with a different readiness score
    ///
    /// The score is clamped to 0-100 and the zone is re-derived.
    #[must_use]
    pub fn with_readiness(&self, score: f64) -> Self {
        let score = score.clamp(0.0, readiness::MAX_SCORE);
        Self {
            readiness_score: score,
            readiness_zone: ReadinessZone::from_score(score),
            ..self.clone()
        }
    }

    /// Return a new snapshot with heart rate zones attached
    #[must_use]
    pub fn with_hr_zones(&self, zones: HeartRateZones) -> Self {
        Self {
            hr_zones: Some(zones),
            ..self.clone()
        }
    }

    /// Return a new snapshot with training paces attached
    #[must_use]
    pub fn with_training_paces(&self, paces: TrainingPaces) -> Self {
        Self {
            training_paces: Some(paces),
            ..self.clone()
        }
    }
}
