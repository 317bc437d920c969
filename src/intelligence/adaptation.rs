// ABOUTME: Adaptation engine turning load state and deviations into quantified plan adjustments
// ABOUTME: Applies recommendations once, producing new plan revisions with an audit history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Adaptation Engine
//!
//! Triggers, in priority order:
//!
//! - **Race taper**: race within 7 days. Volume drops below 0.6 and overrides overreaching,
//!   undertraining, and plateau signals.
//! - **Recovery needed**: TSB below -20. Converts the hardest remaining session to recovery.
//! - **Overreaching**: ACWR at or above 1.5, or repeated load overshoots. Volume 0.6-0.85,
//!   confidence rising with the ACWR excess.
//! - **Injury risk**: ACWR in the caution band, or an ACWR breach deviation.
//! - **Plateau**: repeated load undershoots. Targets are re-based toward executed load.
//! - **Undertraining**: ACWR below 0.8 (volume increase), or missed sessions and schedule drift
//!   (schedule shift).
//!
//! Applying a recommendation is one-shot: the `applied` flag is set on success and a second
//! application is rejected with `AlreadyApplied`.

use crate::config::intelligence::AdaptationConfig;
use crate::logging::EngineLogger;
use chrono::{NaiveDate, Utc};
use pacewise_core::errors::{AppError, AppResult};
use pacewise_core::models::{
    AdaptationRecommendation, AdaptationRecord, AdaptationTrigger, AdaptationType, AthleteContext,
    DeviationType, PaceRange, PlanDeviation, PlanConstraints, PlannedSession, TrainingPlan,
    TrainingWeek, WorkoutType,
};
use tracing::debug;
use uuid::Uuid;

/// Overreaching volume reduction per ACWR point above the threshold
const OVERREACHING_VOLUME_SLOPE: f64 = 0.5;
/// Base confidence of an ACWR-driven overreaching recommendation
const OVERREACHING_BASE_CONFIDENCE: f64 = 0.7;
/// Confidence of an overshoot-driven overreaching recommendation
const OVERSHOOT_BASE_CONFIDENCE: f64 = 0.65;
/// Confidence added per deviation beyond the trigger count
const CONFIDENCE_PER_EXTRA_DEVIATION: f64 = 0.05;
/// Ceiling for deviation-driven confidence
const DEVIATION_CONFIDENCE_CAP: f64 = 0.8;

/// Recovery-needed multipliers and confidence bounds
const RECOVERY_VOLUME_MULTIPLIER: f64 = 0.8;
const RECOVERY_INTENSITY_MULTIPLIER: f64 = 0.85;
const RECOVERY_CONFIDENCE: (f64, f64) = (0.7, 0.9);

/// Undertraining volume increase per ACWR point below the threshold
const UNDERTRAINING_VOLUME_SLOPE: f64 = 0.5;
const UNDERTRAINING_CONFIDENCE: (f64, f64) = (0.6, 0.8);

/// Plateau re-basing bounds
const PLATEAU_VOLUME_BOUNDS: (f64, f64) = (0.7, 0.95);
const PLATEAU_BASE_CONFIDENCE: f64 = 0.6;

/// Schedule-shift confidence
const SHIFT_CONFIDENCE: f64 = 0.6;

/// Adaptation engine
#[derive(Debug, Clone, Default)]
pub struct AdaptationEngine {
    config: AdaptationConfig,
}

impl AdaptationEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: AdaptationConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &AdaptationConfig {
        &self.config
    }

    /// Recommendations as of today
    #[must_use]
    pub fn generate_adaptations(
        &self,
        current_ctl: f64,
        current_atl: f64,
        current_tsb: f64,
        upcoming_race_date: Option<NaiveDate>,
        deviations: &[PlanDeviation],
    ) -> Vec<AdaptationRecommendation> {
        self.generate_adaptations_as_of(
            current_ctl,
            current_atl,
            current_tsb,
            upcoming_race_date,
            deviations,
            Utc::now().date_naive(),
        )
    }

    /// Recommendations as of a date, race taper first, then by descending confidence
    ///
    /// A balanced athlete (ACWR inside the optimal band, TSB near zero, no deviations)
    /// receives no recommendations.
    #[must_use]
    pub fn generate_adaptations_as_of(
        &self,
        current_ctl: f64,
        current_atl: f64,
        current_tsb: f64,
        upcoming_race_date: Option<NaiveDate>,
        deviations: &[PlanDeviation],
        as_of: NaiveDate,
    ) -> Vec<AdaptationRecommendation> {
        let acwr = AthleteContext::ratio(current_ctl, current_atl);
        let count = |kind: DeviationType| {
            deviations
                .iter()
                .filter(|d| d.deviation_type == kind)
                .count()
        };

        let mut recommendations = Vec::new();
        let taper = upcoming_race_date.and_then(|race| self.race_taper(race, as_of));
        let tapering = taper.is_some();
        recommendations.extend(taper);
        recommendations.extend(self.recovery_needed(current_tsb));

        let overreaching = self.overreaching(acwr, count(DeviationType::LoadOvershoot));
        let overreaching_fired = overreaching.is_some();
        recommendations.extend(self.injury_risk(
            acwr,
            count(DeviationType::AcwrBreach),
            overreaching_fired,
        ));

        // Race taper already reduces volume
        if !tapering {
            recommendations.extend(overreaching);
            recommendations.extend(self.plateau(deviations));
            recommendations.extend(self.undertraining(acwr));
            recommendations.extend(self.schedule_shift(
                count(DeviationType::MissedSession),
                count(DeviationType::ScheduleDrift),
            ));
        }

        recommendations.sort_by(|a, b| {
            let a_taper = a.trigger == AdaptationTrigger::RaceTaper;
            let b_taper = b.trigger == AdaptationTrigger::RaceTaper;
            b_taper
                .cmp(&a_taper)
                .then(b.confidence.total_cmp(&a.confidence))
        });

        debug!(
            ctl = current_ctl,
            atl = current_atl,
            tsb = current_tsb,
            acwr = ?acwr,
            deviations = deviations.len(),
            recommendations = recommendations.len(),
            "Adaptations generated"
        );
        recommendations
    }

    /// Whether a recommendation clears the configured high-priority threshold
    #[must_use]
    pub fn is_high_priority(&self, recommendation: &AdaptationRecommendation) -> bool {
        recommendation.is_above(self.config.high_priority_confidence)
    }

    /// Scale a session's load and duration by a recommendation and mark it applied
    ///
    /// `adjusted_load = load * volume * intensity`,
    /// `adjusted_duration = round(duration * volume)`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyApplied` if the recommendation was applied before
    pub fn apply_adaptation(
        &self,
        recommendation: &mut AdaptationRecommendation,
        original_load: f64,
        original_duration: u32,
    ) -> AppResult<(f64, u32)> {
        if recommendation.applied {
            return Err(AppError::already_applied(&recommendation.id));
        }
        let adjusted = scale(recommendation, original_load, original_duration);
        recommendation.applied = true;
        Ok(adjusted)
    }

    /// Apply a recommendation to a plan, producing a new revision
    ///
    /// The target week defaults to the week containing `as_of` (or the first week after it).
    /// Only sessions dated on or after `as_of` change. The prior version of the week is kept
    /// in the appended history record.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyApplied` for an applied recommendation, `ResourceNotFound` when the
    /// target week or session does not exist or a recovery swap finds no session to replace,
    /// and `ElapsedWeekImmutable` when the target week has already elapsed
    pub fn apply_to_plan(
        &self,
        plan: &TrainingPlan,
        recommendation: &mut AdaptationRecommendation,
        as_of: NaiveDate,
    ) -> AppResult<TrainingPlan> {
        if recommendation.applied {
            return Err(AppError::already_applied(&recommendation.id));
        }

        let week_number = match recommendation.target_week {
            Some(n) => n,
            None => upcoming_week(plan, as_of).ok_or_else(|| {
                AppError::not_found(format!("No week of plan {} on or after {as_of}", plan.id))
            })?,
        };
        let week = plan.week(week_number).ok_or_else(|| {
            AppError::not_found(format!("Week {week_number} of plan {}", plan.id))
                .with_resource_id(plan.id.to_string())
        })?;
        if week.has_elapsed(as_of) {
            return Err(AppError::elapsed_week(week_number));
        }
        if let Some(session_id) = &recommendation.target_session {
            if week.session(session_id).is_none() {
                return Err(AppError::not_found(format!(
                    "Session {session_id} in week {week_number}"
                ))
                .with_resource_id(session_id.clone()));
            }
        }

        let revised = revise_week(
            week,
            recommendation,
            &plan.constraints,
            &plan.athlete_context,
            as_of,
        )?;

        let mut next = plan.clone();
        next.revision += 1;
        for slot in &mut next.weeks {
            if slot.week_number == week_number {
                *slot = revised.clone();
            }
        }

        recommendation.applied = true;
        next.adaptation_history.push(AdaptationRecord {
            recommendation: recommendation.clone(),
            applied_at: Utc::now(),
            plan_revision: next.revision,
            affected_weeks: vec![week_number],
            prior_weeks: vec![week.clone()],
        });

        EngineLogger::log_adaptation_applied(
            &plan.id.to_string(),
            &recommendation.trigger.to_string(),
            recommendation.volume_multiplier,
            &[week_number],
            next.revision,
        );
        Ok(next)
    }

    fn race_taper(
        &self,
        race_date: NaiveDate,
        as_of: NaiveDate,
    ) -> Option<AdaptationRecommendation> {
        let taper = &self.config.taper;
        let days = (race_date - as_of).num_days();
        if !(0..=taper.window_days).contains(&days) {
            return None;
        }
        let volume = if days <= taper.final_days {
            taper.final_volume_multiplier
        } else {
            taper.volume_multiplier
        };
        Some(recommendation(
            AdaptationTrigger::RaceTaper,
            AdaptationType::ReduceVolume,
            volume,
            1.0,
            taper.confidence,
            format!(
                "Race in {days} day(s): taper volume to {:.0}% while keeping intensity",
                volume * 100.0
            ),
        ))
    }

    fn recovery_needed(&self, tsb: f64) -> Option<AdaptationRecommendation> {
        if tsb >= self.config.recovery_tsb {
            return None;
        }
        let confidence = ((self.config.recovery_tsb - tsb) / 50.0 + RECOVERY_CONFIDENCE.0)
            .clamp(RECOVERY_CONFIDENCE.0, RECOVERY_CONFIDENCE.1);
        Some(recommendation(
            AdaptationTrigger::RecoveryNeeded,
            AdaptationType::AddRecovery,
            RECOVERY_VOLUME_MULTIPLIER,
            RECOVERY_INTENSITY_MULTIPLIER,
            confidence,
            format!(
                "TSB {tsb:.1} is below {:.0}: replace the hardest remaining session with recovery",
                self.config.recovery_tsb
            ),
        ))
    }

    fn overreaching(
        &self,
        acwr: Option<f64>,
        overshoots: usize,
    ) -> Option<AdaptationRecommendation> {
        let cfg = &self.config.overreaching;
        if let Some(ratio) = acwr.filter(|r| *r >= cfg.acwr_threshold) {
            let excess = ratio - cfg.acwr_threshold;
            let volume = OVERREACHING_VOLUME_SLOPE
                .mul_add(-excess, cfg.max_volume_multiplier)
                .clamp(cfg.min_volume_multiplier, cfg.max_volume_multiplier);
            let confidence = (OVERREACHING_BASE_CONFIDENCE + excess).clamp(0.6, 0.95);
            return Some(recommendation(
                AdaptationTrigger::Overreaching,
                AdaptationType::ReduceVolume,
                volume,
                cfg.intensity_multiplier,
                confidence,
                format!(
                    "ACWR {ratio:.2} is at or above {:.1}: reduce volume to {:.0}%",
                    cfg.acwr_threshold,
                    volume * 100.0
                ),
            ));
        }

        if overshoots >= cfg.overshoot_count && cfg.overshoot_count > 0 {
            let extra = (overshoots - cfg.overshoot_count) as f64;
            let confidence = CONFIDENCE_PER_EXTRA_DEVIATION
                .mul_add(extra, OVERSHOOT_BASE_CONFIDENCE)
                .min(DEVIATION_CONFIDENCE_CAP);
            return Some(recommendation(
                AdaptationTrigger::Overreaching,
                AdaptationType::ReduceVolume,
                cfg.max_volume_multiplier,
                1.0,
                confidence,
                format!(
                    "{overshoots} sessions exceeded planned load: reduce volume to {:.0}%",
                    cfg.max_volume_multiplier * 100.0
                ),
            ));
        }
        None
    }

    fn injury_risk(
        &self,
        acwr: Option<f64>,
        breaches: usize,
        overreaching: bool,
    ) -> Option<AdaptationRecommendation> {
        if overreaching {
            return None;
        }
        let cfg = &self.config.injury_risk;
        let danger = self.config.overreaching.acwr_threshold;
        let elevated = acwr.filter(|r| *r > cfg.acwr_threshold && *r < danger);
        let reason = match (elevated, breaches) {
            (Some(ratio), _) => format!(
                "ACWR {ratio:.2} is elevated ({:.1}-{danger:.1}): hold volume at {:.0}%",
                cfg.acwr_threshold,
                cfg.volume_multiplier * 100.0
            ),
            (None, n) if n > 0 => format!(
                "Executed load breached the ACWR threshold {n} time(s): hold volume at {:.0}%",
                cfg.volume_multiplier * 100.0
            ),
            _ => return None,
        };
        Some(recommendation(
            AdaptationTrigger::InjuryRisk,
            AdaptationType::ReduceVolume,
            cfg.volume_multiplier,
            1.0,
            cfg.confidence,
            reason,
        ))
    }

    fn plateau(&self, deviations: &[PlanDeviation]) -> Option<AdaptationRecommendation> {
        let undershoots: Vec<&PlanDeviation> = deviations
            .iter()
            .filter(|d| d.deviation_type == DeviationType::LoadUndershoot)
            .collect();
        let threshold = self.config.plateau_undershoot_count;
        if threshold == 0 || undershoots.len() < threshold {
            return None;
        }
        // Magnitude is the shortfall percentage
        let mean_shortfall = undershoots.iter().map(|d| d.metrics.magnitude).sum::<f64>()
            / undershoots.len() as f64;
        let volume = (1.0 - mean_shortfall / 100.0)
            .clamp(PLATEAU_VOLUME_BOUNDS.0, PLATEAU_VOLUME_BOUNDS.1);
        let extra = (undershoots.len() - threshold) as f64;
        let confidence = CONFIDENCE_PER_EXTRA_DEVIATION
            .mul_add(extra, PLATEAU_BASE_CONFIDENCE)
            .min(DEVIATION_CONFIDENCE_CAP);
        Some(recommendation(
            AdaptationTrigger::Plateau,
            AdaptationType::ReduceVolume,
            volume,
            1.0,
            confidence,
            format!(
                "{} sessions fell short of planned load by {mean_shortfall:.0}% on average: \
                 re-base targets to {:.0}%",
                undershoots.len(),
                volume * 100.0
            ),
        ))
    }

    fn undertraining(&self, acwr: Option<f64>) -> Option<AdaptationRecommendation> {
        let cfg = &self.config.undertraining;
        let ratio = acwr.filter(|r| *r < cfg.acwr_threshold)?;
        let deficit = cfg.acwr_threshold - ratio;
        let volume = 1.0 + (deficit * UNDERTRAINING_VOLUME_SLOPE).min(cfg.max_increase);
        let confidence = (UNDERTRAINING_CONFIDENCE.0 + deficit)
            .clamp(UNDERTRAINING_CONFIDENCE.0, UNDERTRAINING_CONFIDENCE.1);
        Some(recommendation(
            AdaptationTrigger::Undertraining,
            AdaptationType::IncreaseVolume,
            volume,
            1.0,
            confidence,
            format!(
                "ACWR {ratio:.2} is below {:.1}: increase volume to {:.0}%",
                cfg.acwr_threshold,
                volume * 100.0
            ),
        ))
    }

    fn schedule_shift(&self, missed: usize, drifts: usize) -> Option<AdaptationRecommendation> {
        let threshold = self.config.missed_session_count;
        let missed_trigger = threshold > 0 && missed >= threshold;
        if !missed_trigger && drifts == 0 {
            return None;
        }
        let reason = if drifts > 0 {
            format!(
                "Sessions are drifting from their planned days ({drifts} run(s)): \
                 defer the next hard session"
            )
        } else {
            format!(
                "{missed} sessions were missed: defer the next hard session to rebuild consistency"
            )
        };
        Some(recommendation(
            AdaptationTrigger::Undertraining,
            AdaptationType::ShiftSchedule,
            1.0,
            1.0,
            SHIFT_CONFIDENCE,
            reason,
        ))
    }
}

fn recommendation(
    trigger: AdaptationTrigger,
    adaptation_type: AdaptationType,
    volume_multiplier: f64,
    intensity_multiplier: f64,
    confidence: f64,
    reason: String,
) -> AdaptationRecommendation {
    AdaptationRecommendation {
        id: Uuid::new_v4().to_string(),
        trigger,
        adaptation_type,
        target_week: None,
        target_session: None,
        volume_multiplier,
        intensity_multiplier,
        confidence,
        reason,
        applied: false,
    }
}

fn scale(recommendation: &AdaptationRecommendation, load: f64, duration: u32) -> (f64, u32) {
    let adjusted_load =
        load * recommendation.volume_multiplier * recommendation.intensity_multiplier;
    let adjusted_duration = (f64::from(duration) * recommendation.volume_multiplier)
        .round()
        .max(0.0) as u32;
    (adjusted_load, adjusted_duration)
}

/// Week containing `as_of`, else the first week starting after it
fn upcoming_week(plan: &TrainingPlan, as_of: NaiveDate) -> Option<u32> {
    plan.week_containing(as_of)
        .or_else(|| plan.weeks.iter().find(|w| w.start_date > as_of))
        .map(|w| w.week_number)
}

/// New revision of a week with the recommendation applied to sessions on or after `as_of`
///
/// Volume changes keep each session's load per minute and are refit into the weekly hour
/// limit alongside the untouched sessions.
fn revise_week(
    week: &TrainingWeek,
    recommendation: &AdaptationRecommendation,
    constraints: &PlanConstraints,
    context: &AthleteContext,
    as_of: NaiveDate,
) -> AppResult<TrainingWeek> {
    let mut revised = week.clone();
    revised.revision += 1;

    let in_scope = |session: &PlannedSession| {
        session.date >= as_of
            && session.workout_type != WorkoutType::Race
            && match &recommendation.target_session {
                Some(id) => *id == session.id,
                None => true,
            }
    };

    match recommendation.adaptation_type {
        AdaptationType::ReduceVolume | AdaptationType::IncreaseVolume => {
            let scoped: Vec<usize> = (0..revised.sessions.len())
                .filter(|&i| in_scope(&revised.sessions[i]))
                .collect();
            let fixed_minutes: u32 = revised
                .sessions
                .iter()
                .enumerate()
                .filter(|(i, s)| !scoped.contains(i) && s.workout_type != WorkoutType::Race)
                .map(|(_, s)| s.duration_min)
                .sum();
            let mut minutes: Vec<u32> = scoped
                .iter()
                .map(|&i| {
                    let session = &revised.sessions[i];
                    let (_, duration) =
                        scale(recommendation, session.target_load, session.duration_min);
                    clamp_duration(duration, constraints)
                })
                .collect();
            constraints.fit_weekly_minutes(&mut minutes, fixed_minutes);

            for (&i, duration) in scoped.iter().zip(minutes) {
                let session = &mut revised.sessions[i];
                let load_per_minute = session.target_load / f64::from(session.duration_min.max(1));
                session.duration_min = duration;
                session.target_load = round_tenth(
                    load_per_minute * recommendation.intensity_multiplier * f64::from(duration),
                );
                session.description = format!(
                    "{} ({} adjusted to {:.0}% volume)",
                    session.description,
                    recommendation.trigger,
                    recommendation.volume_multiplier * 100.0
                );
            }
        }
        AdaptationType::AddRecovery => {
            let session = revised
                .sessions
                .iter_mut()
                .filter(|s| in_scope(s) && s.workout_type != WorkoutType::Recovery)
                .max_by(|a, b| a.target_load.total_cmp(&b.target_load))
                .ok_or_else(|| {
                    AppError::not_found(format!(
                        "Non-recovery session on or after {as_of} in week {}",
                        week.week_number
                    ))
                })?;
            let (_, duration) = scale(recommendation, session.target_load, session.duration_min);
            let duration = clamp_duration(duration, constraints);
            let replaced = session.workout_type;
            session.workout_type = WorkoutType::Recovery;
            session.duration_min = duration;
            session.target_load =
                round_tenth(f64::from(duration) * WorkoutType::Recovery.load_per_minute());
            session.pace_target = context
                .training_paces
                .as_ref()
                .map(|p| PaceRange::around(p.recovery, 10.0));
            session.hr_zone = context
                .hr_zones
                .as_ref()
                .and_then(|zones| zones.zone(1))
                .map(|z| z.zone);
            session.intervals.clear();
            session.description = format!("recovery {duration} min (replaces {replaced})");
        }
        AdaptationType::ShiftSchedule => {
            defer_next_quality(&mut revised, &in_scope, constraints.back_to_back_hard_ok);
        }
    }

    revised.target_load = match recommendation.adaptation_type {
        AdaptationType::ShiftSchedule => revised.target_load,
        _ => round_tenth(revised.planned_load()),
    };
    Ok(revised)
}

/// Swap the next in-scope quality session with a later easy session
///
/// The swap is skipped when it would put two quality sessions on consecutive days, unless
/// back-to-back hard days are allowed.
fn defer_next_quality(
    week: &mut TrainingWeek,
    in_scope: &dyn Fn(&PlannedSession) -> bool,
    back_to_back_ok: bool,
) {
    let movable: Vec<usize> = week
        .sessions
        .iter()
        .enumerate()
        .filter(|(_, s)| in_scope(s) && s.workout_type != WorkoutType::Long)
        .map(|(i, _)| i)
        .collect();
    let Some(position) = movable
        .iter()
        .position(|&i| week.sessions[i].workout_type.is_quality())
    else {
        return;
    };
    let quality_index = movable[position];

    let other_quality_days: Vec<u32> = week
        .sessions
        .iter()
        .enumerate()
        .filter(|(i, s)| *i != quality_index && s.workout_type.is_quality())
        .map(|(_, s)| s.day_index())
        .collect();

    let target = movable[position + 1..].iter().copied().find(|&i| {
        let candidate = &week.sessions[i];
        let easy = matches!(
            candidate.workout_type,
            WorkoutType::Easy | WorkoutType::Recovery | WorkoutType::CrossTraining
        );
        let adjacent = other_quality_days
            .iter()
            .any(|d| d.abs_diff(candidate.day_index()) == 1);
        easy && (back_to_back_ok || !adjacent)
    });

    if let Some(easy_index) = target {
        let (first, second) = (quality_index.min(easy_index), quality_index.max(easy_index));
        let (head, tail) = week.sessions.split_at_mut(second);
        swap_content(&mut head[first], &mut tail[0]);
    }
}

/// Exchange workout content while each session keeps its id and date
fn swap_content(a: &mut PlannedSession, b: &mut PlannedSession) {
    std::mem::swap(&mut a.workout_type, &mut b.workout_type);
    std::mem::swap(&mut a.duration_min, &mut b.duration_min);
    std::mem::swap(&mut a.target_load, &mut b.target_load);
    std::mem::swap(&mut a.pace_target, &mut b.pace_target);
    std::mem::swap(&mut a.hr_zone, &mut b.hr_zone);
    std::mem::swap(&mut a.intervals, &mut b.intervals);
    std::mem::swap(&mut a.description, &mut b.description);
}

fn clamp_duration(minutes: u32, constraints: &PlanConstraints) -> u32 {
    minutes.clamp(
        PlanConstraints::MIN_SESSION_MINUTES,
        constraints.max_session_duration_min,
    )
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
