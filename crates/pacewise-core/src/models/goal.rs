// ABOUTME: Race goal model with standard distances, target time parsing, and derived pace
// ABOUTME: Malformed distance or time strings are rejected as validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::race_distances;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Race distance, either a standard event or a custom length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceDistance {
    /// 5 km
    FiveK,
    /// 10 km
    TenK,
    /// 21.0975 km
    HalfMarathon,
    /// 42.195 km
    Marathon,
    /// 50 km
    Ultra50K,
    /// Any other distance
    Custom {
        /// Distance in kilometers
        km: f64,
    },
}

impl RaceDistance {
    /// Distance in kilometers
    #[must_use]
    pub const fn km(&self) -> f64 {
        match self {
            Self::FiveK => race_distances::FIVE_K,
            Self::TenK => race_distances::TEN_K,
            Self::HalfMarathon => race_distances::HALF_MARATHON,
            Self::Marathon => race_distances::MARATHON,
            Self::Ultra50K => race_distances::ULTRA_50K,
            Self::Custom { km } => *km,
        }
    }

    /// Marathon or longer
    #[must_use]
    pub fn is_marathon_or_longer(&self) -> bool {
        self.km() >= race_distances::MARATHON
    }
}

impl fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FiveK => write!(f, "5K"),
            Self::TenK => write!(f, "10K"),
            Self::HalfMarathon => write!(f, "half marathon"),
            Self::Marathon => write!(f, "marathon"),
            Self::Ultra50K => write!(f, "50K"),
            Self::Custom { km } => write!(f, "{km:.1} km"),
        }
    }
}

impl FromStr for RaceDistance {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "5k" | "5 k" | "5km" => return Ok(Self::FiveK),
            "10k" | "10 k" | "10km" => return Ok(Self::TenK),
            "half" | "half marathon" | "hm" | "21k" => return Ok(Self::HalfMarathon),
            "marathon" | "full" | "full marathon" | "42k" => return Ok(Self::Marathon),
            "50k" | "50km" | "ultra" => return Ok(Self::Ultra50K),
            _ => {}
        }

        let numeric = normalized.trim_end_matches("km").trim();
        let km: f64 = numeric.parse().map_err(|_| {
            AppError::invalid_format(format!(
                "Unrecognized race distance '{s}'. Use 5k, 10k, half, marathon, 50k, or a number of km"
            ))
        })?;
        if !km.is_finite() || km <= 0.0 || km > 500.0 {
            return Err(AppError::value_out_of_range(format!(
                "Race distance {km} km must be between 0 and 500 km"
            )));
        }
        Ok(Self::Custom { km })
    }
}

/// Race goal the plan is built toward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceGoal {
    /// Race day
    pub race_date: NaiveDate,
    /// Race distance
    pub distance: RaceDistance,
    /// Target finishing time (seconds)
    pub target_time_seconds: u32,
    /// Optional event name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RaceGoal {
    /// Create a validated goal
    ///
    /// # Errors
    ///
    /// Returns a validation error when the target time is zero or a custom distance is not
    /// positive
    pub fn new(
        race_date: NaiveDate,
        distance: RaceDistance,
        target_time_seconds: u32,
    ) -> AppResult<Self> {
        if target_time_seconds == 0 {
            return Err(AppError::value_out_of_range(
                "Target time must be greater than zero",
            ));
        }
        let km = distance.km();
        if !km.is_finite() || km <= 0.0 {
            return Err(AppError::value_out_of_range(format!(
                "Race distance {km} km must be positive"
            )));
        }
        Ok(Self {
            race_date,
            distance,
            target_time_seconds,
            name: None,
        })
    }

    /// Create a goal from user-facing strings
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for malformed distance or time strings
    pub fn from_strings(
        race_date: NaiveDate,
        distance: &str,
        target_time: &str,
    ) -> AppResult<Self> {
        let distance = distance.parse::<RaceDistance>()?;
        let seconds = Self::parse_target_time(target_time)?;
        Self::new(race_date, distance, seconds)
    }

    /// Attach an event name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse `H:MM:SS`, `MM:SS`, or plain seconds into seconds
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the string has the wrong shape, a non-numeric component,
    /// minutes or seconds of 60 or more after the leading component, or a zero total
    pub fn parse_target_time(input: &str) -> AppResult<u32> {
        let malformed = || {
            AppError::invalid_format(format!(
                "Invalid target time '{input}'. Expected H:MM:SS, MM:SS, or seconds"
            ))
        };

        let parts: Vec<u32> = input
            .trim()
            .split(':')
            .map(|part| part.trim().parse::<u32>().map_err(|_| malformed()))
            .collect::<AppResult<_>>()?;

        if parts.is_empty() || parts.len() > 3 {
            return Err(malformed());
        }
        if parts.iter().skip(1).any(|&p| p >= 60) {
            return Err(malformed());
        }

        let total = parts
            .iter()
            .try_fold(0_u32, |acc, &p| acc.checked_mul(60)?.checked_add(p))
            .ok_or_else(malformed)?;
        if total == 0 {
            return Err(malformed());
        }
        Ok(total)
    }

    /// Target pace in seconds per kilometer (`target_time / distance_km`)
    #[must_use]
    pub fn target_pace_sec_per_km(&self) -> f64 {
        f64::from(self.target_time_seconds) / self.distance.km()
    }

    /// Days from `from` until race day (negative when the race is past)
    #[must_use]
    pub fn days_until(&self, from: NaiveDate) -> i64 {
        (self.race_date - from).num_days()
    }

    /// Whole weeks from `from` until race day, rounded up, minimum 1
    #[must_use]
    pub fn weeks_to_race(&self, from: NaiveDate) -> u32 {
        let days = self.days_until(from).max(0);
        let weeks = (days + 6) / 7;
        u32::try_from(weeks).unwrap_or(u32::MAX).max(1)
    }
}
