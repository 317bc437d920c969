// ABOUTME: Readiness and fatigue predictor blending training load with baseline wellness signals
// ABOUTME: Produces fatigue and recovery estimates, risk levels, intensity ceiling and ACWR alerts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Readiness & Fatigue Predictor
//!
//! Each available signal is turned into a component fatigue score (0-100, higher is more
//! fatigued) and blended with the configured weights, renormalized over the components that
//! are actually present. Missing signals never fail a prediction; they lower its confidence.
//!
//! Wellness signals are compared to the athlete's own rolling baseline. A signal without a
//! baseline (fewer than three valid historical points) is excluded from the blend.
//!
//! ## Scientific References
//!
//! - Gabbett, T.J. (2016). The training-injury prevention paradox. *BJSM*, 50(5), 273-280.
//! - Plews, D.J. et al. (2013). Training adaptation and heart rate variability in elite
//!   endurance athletes. *Sports Medicine*, 43(9), 773-781.
//! - Halson, S.L. (2014). Monitoring training load to understand fatigue in athletes.
//!   *Sports Medicine*, 44(2), 139-147.

use super::baseline::{BaselineMetric, BaselineStore, PersonalBaseline, WellnessObservation};
use super::recovery::strain_target;
use super::training_load::{TrainingLoad, TrainingLoadCalculator};
use crate::config::intelligence::ReadinessConfig;
use crate::logging::EngineLogger;
use chrono::NaiveDate;
use pacewise_core::constants::{acwr, recovery, sleep, training_load};
use pacewise_core::models::{
    AcwrAlert, ComponentScore, DailyReadiness, FatigueLevel, FatiguePrediction, ReadinessComponent,
    ReadinessZone, RecommendedIntensity, RecoveryEstimate, RecoveryState, RiskLevel, RiskZone,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Subjective scale bounds (1-10)
const SUBJECTIVE_MIN: f64 = 1.0;
const SUBJECTIVE_MAX: f64 = 10.0;

/// Perceived fatigue at or above which the athlete reports being worn down
const HIGH_PERCEIVED_FATIGUE: f64 = 7.0;

/// Share of the sleep component taken by duration when quality is also known
const SLEEP_DURATION_SHARE: f64 = 0.7;

/// Share of the subjective component taken by perceived fatigue when soreness is also known
const PERCEIVED_FATIGUE_SHARE: f64 = 0.7;

/// Readiness and fatigue predictor
///
/// Pure: every prediction is a function of its input snapshot and the injected configuration.
#[derive(Debug, Clone, Default)]
pub struct ReadinessPredictor {
    config: ReadinessConfig,
}

/// Blend accumulator for component scores
struct Blend {
    components: Vec<ComponentScore>,
    warnings: Vec<String>,
    baselines_used: usize,
    signals_used: usize,
}

impl ReadinessPredictor {
    /// Create a predictor with the given configuration
    #[must_use]
    pub const fn new(config: ReadinessConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &ReadinessConfig {
        &self.config
    }

    /// Predict fatigue, readiness, recovery, and risk from one day's snapshot
    #[must_use]
    pub fn predict_fatigue(&self, readiness: &DailyReadiness) -> FatiguePrediction {
        let blend = self.blend_components(readiness);
        let fatigue_score = Self::weighted_score(&blend.components);
        let fatigue_level = self.fatigue_level(fatigue_score);
        let readiness_score = 100.0 - fatigue_score;

        let acwr_value = readiness.acwr;
        let risk_zone = acwr_value.map_or(RiskZone::Optimal, |r| self.classify_acwr(r));

        let overtraining_risk = self.overtraining_risk(readiness, fatigue_level);
        let injury_risk = Self::injury_risk(risk_zone, acwr_value, fatigue_level);
        let burnout_risk = self.burnout_risk(readiness);
        let recommended_intensity =
            Self::recommend_intensity(fatigue_level, injury_risk, overtraining_risk);
        let recovery = self.estimate_recovery(fatigue_score, readiness.tsb, readiness.vo2max);
        let confidence = self.confidence(&blend, acwr_value.is_some());

        let Blend {
            components,
            warnings,
            ..
        } = blend;

        if !warnings.is_empty() {
            EngineLogger::log_degraded_confidence("readiness", &warnings.join("; "), confidence);
        }
        debug!(
            date = %readiness.date,
            fatigue_score,
            fatigue_level = ?fatigue_level,
            components = components.len(),
            confidence,
            "Fatigue predicted"
        );

        FatiguePrediction {
            date: readiness.date,
            ctl: readiness.ctl,
            atl: readiness.atl,
            tsb: readiness.tsb,
            acwr: acwr_value,
            risk_zone,
            fatigue_score,
            fatigue_level,
            readiness_score,
            readiness_zone: ReadinessZone::from_score(readiness_score),
            recovery,
            overtraining_risk,
            injury_risk,
            burnout_risk,
            recommended_intensity,
            strain_target: strain_target(readiness_score),
            components,
            confidence,
            warnings,
        }
    }

    /// Predict many independent snapshots in parallel
    #[must_use]
    pub fn predict_batch(&self, inputs: &[DailyReadiness]) -> Vec<FatiguePrediction> {
        inputs
            .par_iter()
            .map(|readiness| self.predict_fatigue(readiness))
            .collect()
    }

    /// Estimate hours to full recovery
    ///
    /// `12 + 0.6 * fatigue_score`, plus 1.5 hours per TSB point below -20, scaled by 0.85 for
    /// VO2max above 60 and 1.2 for VO2max below 40, clamped to 12-96 hours.
    #[must_use]
    pub fn estimate_recovery(
        &self,
        fatigue_score: f64,
        tsb: f64,
        vo2max: Option<f64>,
    ) -> RecoveryEstimate {
        let tsb_penalty = (training_load::TSB_DEEP_FATIGUE - tsb).max(0.0)
            * recovery::HOURS_PER_NEGATIVE_TSB_POINT;
        let base = recovery::HOURS_PER_FATIGUE_POINT.mul_add(
            fatigue_score.clamp(0.0, 100.0),
            recovery::MIN_HOURS,
        ) + tsb_penalty;

        let factor = match vo2max {
            Some(v) if v > recovery::ELITE_VO2MAX => Some(recovery::ELITE_FACTOR),
            Some(v) if v < recovery::BELOW_AVERAGE_VO2MAX => Some(recovery::BELOW_AVERAGE_FACTOR),
            _ => None,
        };
        let hours = (base * factor.unwrap_or(1.0)).clamp(recovery::MIN_HOURS, recovery::MAX_HOURS);

        let state = match self.fatigue_level(fatigue_score) {
            FatigueLevel::Fresh | FatigueLevel::Recovered => RecoveryState::Recovered,
            FatigueLevel::Moderate => RecoveryState::PartiallyRecovered,
            FatigueLevel::Fatigued => RecoveryState::Recovering,
            FatigueLevel::Exhausted => RecoveryState::Depleted,
        };

        RecoveryEstimate {
            hours,
            state,
            vo2max_adjusted: factor.is_some(),
        }
    }

    /// Alert when ACWR leaves the optimal band; `None` inside it or without chronic load
    #[must_use]
    pub fn check_acwr_alert(&self, ctl: f64, atl: f64) -> Option<AcwrAlert> {
        if ctl <= 0.0 {
            return None;
        }
        let ratio = atl / ctl;
        let bands = &self.config.acwr_bands;
        let risk_zone = self.classify_acwr(ratio);
        let (risk_level, message) = match risk_zone {
            RiskZone::Optimal => return None,
            RiskZone::Undertraining => (
                RiskLevel::Moderate,
                format!(
                    "ACWR {ratio:.2} is below {:.1}: undertraining, chronic fitness may decline",
                    bands.undertraining_below
                ),
            ),
            RiskZone::Caution => (
                RiskLevel::Moderate,
                format!(
                    "ACWR {ratio:.2} is elevated ({:.1}-{:.1}): hold load steady",
                    bands.caution_above, bands.danger_at
                ),
            ),
            RiskZone::Danger => (
                RiskLevel::High,
                format!(
                    "ACWR {ratio:.2} is in the danger zone (>= {:.1}): reduce acute load",
                    bands.danger_at
                ),
            ),
        };

        Some(AcwrAlert {
            acwr: ratio,
            risk_zone,
            risk_level,
            message,
        })
    }

    /// Classify ACWR against the configured bands
    #[must_use]
    pub fn classify_acwr(&self, ratio: f64) -> RiskZone {
        let bands = &self.config.acwr_bands;
        if ratio >= bands.danger_at {
            RiskZone::Danger
        } else if ratio > bands.caution_above {
            RiskZone::Caution
        } else if ratio >= bands.undertraining_below {
            RiskZone::Optimal
        } else {
            RiskZone::Undertraining
        }
    }

    /// Fatigue level for a blended score
    #[must_use]
    pub fn fatigue_level(&self, score: f64) -> FatigueLevel {
        let t = &self.config.fatigue_thresholds;
        if score < t.recovered {
            FatigueLevel::Fresh
        } else if score < t.moderate {
            FatigueLevel::Recovered
        } else if score < t.fatigued {
            FatigueLevel::Moderate
        } else if score < t.exhausted {
            FatigueLevel::Fatigued
        } else {
            FatigueLevel::Exhausted
        }
    }

    /// Fatigue from form: `clamp(50 - 2 * tsb)`
    #[must_use]
    pub fn tsb_fatigue(tsb: f64) -> f64 {
        2.0f64.mul_add(-tsb, 50.0).clamp(0.0, 100.0)
    }

    /// Fatigue from ACWR distance to the optimal band
    ///
    /// 20-40 across the optimal band, 40-80 across the caution band, 80-100 from the danger
    /// edge to saturation. Below the band the score rises mildly toward 40 at zero.
    #[must_use]
    pub fn acwr_fatigue(&self, ratio: f64) -> f64 {
        let bands = &self.config.acwr_bands;
        let lerp = |x: f64, x0: f64, x1: f64, y0: f64, y1: f64| {
            if x1 <= x0 {
                y1
            } else {
                ((x - x0) / (x1 - x0)).clamp(0.0, 1.0).mul_add(y1 - y0, y0)
            }
        };

        if ratio < bands.undertraining_below {
            lerp(ratio, 0.0, bands.undertraining_below, 40.0, 20.0)
        } else if ratio <= bands.caution_above {
            lerp(ratio, bands.undertraining_below, bands.caution_above, 20.0, 40.0)
        } else if ratio < bands.danger_at {
            lerp(ratio, bands.caution_above, bands.danger_at, 40.0, 80.0)
        } else {
            lerp(ratio, bands.danger_at, acwr::SATURATION.max(bands.danger_at), 80.0, 100.0)
        }
    }

    fn blend_components(&self, readiness: &DailyReadiness) -> Blend {
        let weights = &self.config.weights;
        let mut blend = Blend {
            components: Vec::with_capacity(6),
            warnings: Vec::new(),
            baselines_used: 0,
            signals_used: 0,
        };

        // Training load components are always present
        blend.push(
            ReadinessComponent::Tsb,
            readiness.tsb,
            None,
            Self::tsb_fatigue(readiness.tsb),
            weights.tsb,
        );
        if let Some(ratio) = readiness.acwr {
            blend.push(
                ReadinessComponent::Acwr,
                ratio,
                None,
                self.acwr_fatigue(ratio),
                weights.acwr,
            );
        } else {
            blend
                .warnings
                .push("No chronic training load; ACWR unavailable".to_owned());
        }

        if let Some(hrv) = readiness.hrv_ms {
            match readiness.hrv_baseline_ms.filter(|b| *b > 0.0) {
                Some(baseline) => {
                    let deviation = (hrv - baseline) / baseline * 100.0;
                    blend.push(
                        ReadinessComponent::Hrv,
                        hrv,
                        Some(baseline),
                        2.5f64.mul_add(-deviation, 50.0).clamp(0.0, 100.0),
                        weights.hrv,
                    );
                    blend.signals_used += 1;
                    blend.baselines_used += 1;
                }
                None => blend.warnings.push(
                    "HRV baseline unavailable (fewer than 3 valid days); HRV excluded".to_owned(),
                ),
            }
        }

        if let Some(rhr) = readiness.resting_hr {
            match readiness.resting_hr_baseline.filter(|b| *b > 0.0) {
                Some(baseline) => {
                    let deviation = (rhr - baseline) / baseline * 100.0;
                    blend.push(
                        ReadinessComponent::RestingHr,
                        rhr,
                        Some(baseline),
                        5.0f64.mul_add(deviation, 50.0).clamp(0.0, 100.0),
                        weights.resting_hr,
                    );
                    blend.signals_used += 1;
                    blend.baselines_used += 1;
                }
                None => blend.warnings.push(
                    "Resting HR baseline unavailable (fewer than 3 valid days); resting HR excluded"
                        .to_owned(),
                ),
            }
        }

        if let Some(hours) = readiness.sleep_hours {
            let personal = readiness.sleep_baseline_hours.filter(|b| *b > 0.0);
            let reference = personal.unwrap_or(sleep::RECOMMENDED_HOURS);
            let shortfall_pct = (reference - hours) / reference * 100.0;
            let duration_score = 2.5f64.mul_add(shortfall_pct, 50.0).clamp(0.0, 100.0);
            let score = readiness.sleep_quality.map_or(duration_score, |quality| {
                let quality_score = (100.0 - quality).clamp(0.0, 100.0);
                SLEEP_DURATION_SHARE.mul_add(
                    duration_score,
                    (1.0 - SLEEP_DURATION_SHARE) * quality_score,
                )
            });
            blend.push(
                ReadinessComponent::Sleep,
                hours,
                Some(reference),
                score,
                weights.sleep,
            );
            blend.signals_used += 1;
            if personal.is_some() {
                blend.baselines_used += 1;
            }
        }

        if let Some(perceived) = readiness.perceived_fatigue {
            let scale = |v: f64| {
                ((v.clamp(SUBJECTIVE_MIN, SUBJECTIVE_MAX) - SUBJECTIVE_MIN)
                    / (SUBJECTIVE_MAX - SUBJECTIVE_MIN))
                    * 100.0
            };
            let score = readiness.soreness.map_or(scale(perceived), |soreness| {
                PERCEIVED_FATIGUE_SHARE.mul_add(
                    scale(perceived),
                    (1.0 - PERCEIVED_FATIGUE_SHARE) * scale(soreness),
                )
            });
            blend.push(
                ReadinessComponent::Subjective,
                perceived,
                None,
                score,
                weights.subjective,
            );
            blend.signals_used += 1;
        }

        if blend.signals_used == 0 {
            blend
                .warnings
                .push("No wellness signals; prediction uses training load only".to_owned());
        }

        // Renormalize weights over the components present
        let total: f64 = blend.components.iter().map(|c| c.weight).sum();
        if total > 0.0 {
            for component in &mut blend.components {
                component.weight /= total;
            }
        }
        blend
    }

    fn weighted_score(components: &[ComponentScore]) -> f64 {
        let total: f64 = components.iter().map(|c| c.weight).sum();
        if total <= 0.0 {
            return 50.0;
        }
        let score: f64 = components.iter().map(|c| c.weight * c.fatigue_score).sum();
        (score / total).clamp(0.0, 100.0)
    }

    fn confidence(&self, blend: &Blend, has_acwr: bool) -> f64 {
        let c = &self.config.confidence;
        let mut confidence = c.per_baseline.mul_add(
            blend.baselines_used as f64,
            c.per_signal.mul_add(blend.signals_used as f64, c.load_only),
        );
        if !has_acwr {
            confidence -= c.per_signal;
        }
        confidence.clamp(0.0, c.max)
    }

    fn overtraining_risk(&self, readiness: &DailyReadiness, level: FatigueLevel) -> RiskLevel {
        let load = TrainingLoad {
            ctl: readiness.ctl,
            atl: readiness.atl,
            tsb: readiness.tsb,
            acwr: readiness.acwr,
            days_of_history: 0,
        };
        let mut risk = TrainingLoadCalculator::check_overtraining_risk(&load).risk_level;
        if level == FatigueLevel::Exhausted {
            risk = risk.max(RiskLevel::High);
        }

        let alerts = &self.config.deviation_alerts;
        let rhr_elevated = match (readiness.resting_hr, readiness.resting_hr_baseline) {
            (Some(rhr), Some(base)) if base > 0.0 => {
                (rhr - base) / base * 100.0 >= alerts.resting_hr_rise_pct
            }
            _ => false,
        };
        if rhr_elevated && risk >= RiskLevel::Moderate {
            risk = risk.max(RiskLevel::High);
        }
        risk
    }

    fn injury_risk(zone: RiskZone, ratio: Option<f64>, level: FatigueLevel) -> RiskLevel {
        let base = match zone {
            RiskZone::Danger if ratio.is_some_and(|r| r >= acwr::SATURATION) => RiskLevel::Critical,
            RiskZone::Danger => RiskLevel::High,
            RiskZone::Caution => RiskLevel::Moderate,
            RiskZone::Optimal | RiskZone::Undertraining => RiskLevel::Low,
        };
        if zone.is_elevated() && level >= FatigueLevel::Fatigued {
            base.max(RiskLevel::High)
        } else {
            base
        }
    }

    fn burnout_risk(&self, readiness: &DailyReadiness) -> RiskLevel {
        let alerts = &self.config.deviation_alerts;
        let below = |value: Option<f64>, baseline: Option<f64>, pct: f64| match (value, baseline) {
            (Some(v), Some(b)) if b > 0.0 => (b - v) / b * 100.0 >= pct,
            _ => false,
        };

        let factors = [
            readiness.tsb < training_load::TSB_DEEP_FATIGUE,
            readiness
                .perceived_fatigue
                .is_some_and(|f| f >= HIGH_PERCEIVED_FATIGUE),
            below(readiness.hrv_ms, readiness.hrv_baseline_ms, alerts.hrv_drop_pct),
            below(
                readiness.sleep_hours,
                readiness
                    .sleep_baseline_hours
                    .or(Some(sleep::RECOMMENDED_HOURS)),
                alerts.sleep_shortfall_pct,
            ),
        ];
        match factors.iter().filter(|f| **f).count() {
            0 => RiskLevel::Low,
            1 => RiskLevel::Moderate,
            2 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    fn recommend_intensity(
        level: FatigueLevel,
        injury: RiskLevel,
        overtraining: RiskLevel,
    ) -> RecommendedIntensity {
        match level {
            FatigueLevel::Fresh | FatigueLevel::Recovered => {
                if injury >= RiskLevel::High || overtraining >= RiskLevel::High {
                    RecommendedIntensity::Moderate
                } else {
                    RecommendedIntensity::Hard
                }
            }
            FatigueLevel::Moderate => {
                if injury >= RiskLevel::Moderate || overtraining >= RiskLevel::High {
                    RecommendedIntensity::Easy
                } else {
                    RecommendedIntensity::Moderate
                }
            }
            FatigueLevel::Fatigued => RecommendedIntensity::Easy,
            FatigueLevel::Exhausted => RecommendedIntensity::Rest,
        }
    }
}

impl Blend {
    fn push(
        &mut self,
        component: ReadinessComponent,
        raw_value: f64,
        baseline: Option<f64>,
        fatigue_score: f64,
        weight: f64,
    ) {
        self.components.push(ComponentScore {
            component,
            raw_value,
            baseline,
            fatigue_score,
            weight: weight.max(0.0),
        });
    }
}

/// Readiness predictor backed by a per-athlete baseline store
///
/// Baselines are snapshotted before the prediction and the day's observation is recorded
/// afterwards, so a value never contributes to its own baseline.
#[derive(Debug, Clone)]
pub struct ReadinessService {
    store: Arc<BaselineStore>,
    predictor: ReadinessPredictor,
}

impl ReadinessService {
    /// Create a service from an injected store and predictor
    #[must_use]
    pub fn new(store: Arc<BaselineStore>, predictor: ReadinessPredictor) -> Self {
        Self { store, predictor }
    }

    /// Baseline store in use
    #[must_use]
    pub fn store(&self) -> &Arc<BaselineStore> {
        &self.store
    }

    /// Predictor in use
    #[must_use]
    pub const fn predictor(&self) -> &ReadinessPredictor {
        &self.predictor
    }

    /// Record the day's signals, fill missing baselines from prior days, then predict
    ///
    /// The baseline read and the record are one step per athlete, so concurrent calls for the
    /// same athlete each see a consistent history.
    #[must_use]
    pub fn predict_for_athlete(
        &self,
        athlete_id: &str,
        readiness: DailyReadiness,
    ) -> FatiguePrediction {
        let baseline = self.store.observe(
            athlete_id,
            WellnessObservation {
                date: readiness.date,
                hrv_ms: readiness.hrv_ms,
                resting_hr: readiness.resting_hr,
                sleep_hours: readiness.sleep_hours,
            },
        );
        let readiness = with_personal_baseline(readiness, &baseline);
        let prediction = self.predictor.predict_fatigue(&readiness);

        EngineLogger::log_readiness_predicted(
            athlete_id,
            prediction.fatigue_score,
            &format!("{:?}", prediction.fatigue_level).to_lowercase(),
            prediction.confidence,
        );
        prediction
    }

    /// Personal baseline for an athlete as of a date
    #[must_use]
    pub fn baseline(&self, athlete_id: &str, date: NaiveDate) -> PersonalBaseline {
        self.store.baseline_as_of(athlete_id, date)
    }
}

/// Fill baselines the caller did not provide
fn with_personal_baseline(
    mut readiness: DailyReadiness,
    baseline: &PersonalBaseline,
) -> DailyReadiness {
    readiness.hrv_baseline_ms = readiness
        .hrv_baseline_ms
        .or_else(|| baseline.reference(BaselineMetric::Hrv));
    readiness.resting_hr_baseline = readiness
        .resting_hr_baseline
        .or_else(|| baseline.reference(BaselineMetric::RestingHr));
    readiness.sleep_baseline_hours = readiness
        .sleep_baseline_hours
        .or_else(|| baseline.reference(BaselineMetric::SleepHours));
    readiness
}
