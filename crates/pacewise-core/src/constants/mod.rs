// ABOUTME: Training-science constants grouped by domain for the periodization engine
// ABOUTME: Load windows, ACWR bands, readiness bands, recovery clamps, and zone fractions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large block.
//! Tunable values also appear as defaults in the engine's `IntelligenceConfig`; the values
//! here are the ones that define the model itself and are not meant to be tuned per deployment.
//!
//! ## Scientific References
//!
//! - Banister, E.W. (1991). Modeling elite athletic performance. *Physiological Testing of
//!   Elite Athletes*, 403-424.
//! - Gabbett, T.J. (2016). The training-injury prevention paradox. *British Journal of Sports
//!   Medicine*, 50(5), 273-280.
//! - Karvonen, M.J. et al. (1957). The effects of training on heart rate. *Annales Medicinae
//!   Experimentalis et Biologiae Fenniae*, 35(3), 307-315.

/// Exponentially weighted load windows
pub mod training_load {
    /// Chronic Training Load window (days) - long-term fitness
    pub const CTL_WINDOW_DAYS: i64 = 42;
    /// Acute Training Load window (days) - short-term fatigue
    pub const ATL_WINDOW_DAYS: i64 = 7;
    /// Days of history required before a zero-seeded chronic load is trusted
    pub const MIN_CHRONIC_HISTORY_DAYS: i64 = 28;
    /// TSB below which the athlete is overreaching
    pub const TSB_OVERREACHING: f64 = -10.0;
    /// TSB above which fitness starts to decay
    pub const TSB_DETRAINING: f64 = 10.0;
    /// TSB below which deep fatigue requires added recovery
    pub const TSB_DEEP_FATIGUE: f64 = -20.0;
    /// Acute load considered very high regardless of chronic load
    pub const VERY_HIGH_ATL: f64 = 150.0;
    /// Acute spike factor relative to chronic load
    pub const ACUTE_SPIKE_FACTOR: f64 = 1.3;
}

/// Acute:chronic workload ratio bands (EWA ATL / EWA CTL)
pub mod acwr {
    /// Below this ratio the athlete is undertraining
    pub const UNDERTRAINING_BELOW: f64 = 0.8;
    /// Above this ratio (exclusive) load is elevated
    pub const CAUTION_ABOVE: f64 = 1.3;
    /// At or above this ratio load is in the danger zone
    pub const DANGER_AT: f64 = 1.5;
    /// Ratio at which the injury-risk fatigue component saturates
    pub const SATURATION: f64 = 1.6;
}

/// Readiness score bands (0-100, higher is readier)
pub mod readiness {
    /// Minimum score for the green zone
    pub const GREEN_MIN: f64 = 67.0;
    /// Minimum score for the yellow zone
    pub const YELLOW_MIN: f64 = 34.0;
    /// Maximum score
    pub const MAX_SCORE: f64 = 100.0;
    /// Neutral score used when no signal is available
    pub const NEUTRAL_SCORE: f64 = 50.0;
}

/// Strain targets on a 0-21 scale, keyed by recovery score
pub mod strain {
    /// Target range when recovery is high
    pub const HIGH_RECOVERY_TARGET: (f64, f64) = (14.0, 21.0);
    /// Target range when recovery is moderate
    pub const MODERATE_RECOVERY_TARGET: (f64, f64) = (8.0, 14.0);
    /// Target range when recovery is low
    pub const LOW_RECOVERY_TARGET: (f64, f64) = (0.0, 8.0);
}

/// Sleep debt accounting
pub mod sleep {
    /// Recommended nightly sleep (hours)
    pub const RECOMMENDED_HOURS: f64 = 8.0;
    /// Maximum extra sleep that can be repaid per night (hours)
    pub const MAX_NIGHTLY_REPAYMENT_HOURS: f64 = 1.0;
    /// Days over which debt is spread before the cap applies
    pub const REPAYMENT_SPREAD_DAYS: f64 = 7.0;
}

/// Recovery time estimation
pub mod recovery {
    /// Minimum recovery estimate (hours)
    pub const MIN_HOURS: f64 = 12.0;
    /// Maximum recovery estimate (hours)
    pub const MAX_HOURS: f64 = 96.0;
    /// Hours added per fatigue-score point
    pub const HOURS_PER_FATIGUE_POINT: f64 = 0.6;
    /// Hours added per TSB point below the deep-fatigue threshold
    pub const HOURS_PER_NEGATIVE_TSB_POINT: f64 = 1.5;
    /// VO2max above which recovery is faster
    pub const ELITE_VO2MAX: f64 = 60.0;
    /// VO2max below which recovery is slower
    pub const BELOW_AVERAGE_VO2MAX: f64 = 40.0;
    /// Recovery multiplier for elite aerobic capacity
    pub const ELITE_FACTOR: f64 = 0.85;
    /// Recovery multiplier for below-average aerobic capacity
    pub const BELOW_AVERAGE_FACTOR: f64 = 1.2;
}

/// Heart rate reserve fractions for the five Karvonen zones
pub mod heart_rate {
    /// Zone boundaries as fractions of heart rate reserve (zone N spans `[i, i+1]`)
    pub const KARVONEN_BOUNDARIES: [f64; 6] = [0.50, 0.60, 0.70, 0.80, 0.90, 1.00];
}

/// Personal-baseline comparisons
pub mod baseline {
    /// Minimum valid points before a rolling average exists
    pub const MIN_VALID_POINTS: usize = 3;
    /// Short rolling window (days)
    pub const SHORT_WINDOW_DAYS: usize = 7;
    /// Long rolling window (days)
    pub const LONG_WINDOW_DAYS: usize = 30;
    /// Deviation (percent) inside which a trend is stable
    pub const STABLE_BAND_PCT: f64 = 5.0;
}

/// Standard race distances in kilometers
pub mod race_distances {
    /// 5 kilometers
    pub const FIVE_K: f64 = 5.0;
    /// 10 kilometers
    pub const TEN_K: f64 = 10.0;
    /// Half marathon
    pub const HALF_MARATHON: f64 = 21.0975;
    /// Marathon
    pub const MARATHON: f64 = 42.195;
    /// 50 kilometer ultra
    pub const ULTRA_50K: f64 = 50.0;
}

/// Adaptation confidence thresholds
pub mod adaptation {
    /// Recommendations strictly above this confidence are high priority
    pub const HIGH_PRIORITY_CONFIDENCE: f64 = 0.8;
    /// Days before a race in which the taper trigger fires
    pub const RACE_TAPER_WINDOW_DAYS: i64 = 7;
}
