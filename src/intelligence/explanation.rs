// ABOUTME: Explanation layer itemizing the factors behind readiness, adaptation, and plan outputs
// ABOUTME: Factor contributions sum to the explained score and never alter the wrapped decision
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Explanation Layer
//!
//! Every explanation is rebuilt from the same inputs that drove the decision, so the output
//! is reproducible. Factor weights are normalized to 1 and each factor's
//! `contribution_points = weight * factor_score`, so contributions add up to the explained
//! score:
//!
//! - fatigue: the readiness score (`100 - fatigue_score`)
//! - adaptation: support for the recommendation (0-100)
//! - plan: preparation adequacy (0-100)
//! - deviations: adherence (0-100)
//!
//! Factors scoring 60 or more are positive, 40 or less negative, anything between neutral.

use crate::config::intelligence::AdaptationConfig;
use chrono::NaiveDate;
use pacewise_core::constants::{acwr, training_load};
use pacewise_core::models::{
    AdaptationRecommendation, AdaptationTrigger, AdaptationType, AthleteContext, ComponentScore,
    DataSource, DeviationType, ExplainedRecommendation, ExplanationFactor, FactorImpact,
    FatiguePrediction, PlanDeviation, RaceDistance, ReadinessComponent, ReadinessZone,
    TrainingPlan, WorkoutType,
};

const POSITIVE_AT: f64 = 60.0;
const NEGATIVE_AT: f64 = 40.0;

/// Weight of the factor matching the recommendation's trigger
const PRIMARY_FACTOR_WEIGHT: f64 = 0.5;

/// Plan growth from first to peak week that scores fully
const COMFORTABLE_GROWTH: f64 = 1.5;
/// Plan growth at which the progression factor reaches zero
const MAX_GROWTH: f64 = 2.5;

/// Inputs that drove an adaptation decision
#[derive(Debug, Clone, Copy)]
pub struct AdaptationInputs<'a> {
    /// Chronic training load
    pub ctl: f64,
    /// Acute training load
    pub atl: f64,
    /// Training stress balance
    pub tsb: f64,
    /// Upcoming race, if any
    pub race_date: Option<NaiveDate>,
    /// Detected deviations
    pub deviations: &'a [PlanDeviation],
    /// Evaluation date
    pub as_of: NaiveDate,
}

/// Builds explanations for engine outputs
#[derive(Debug, Clone, Default)]
pub struct ExplanationEngine {
    adaptation: AdaptationConfig,
}

impl ExplanationEngine {
    /// Create an engine sharing the adaptation configuration used for priorities
    #[must_use]
    pub const fn new(adaptation: AdaptationConfig) -> Self {
        Self { adaptation }
    }

    /// Itemize a fatigue prediction; contributions sum to the readiness score
    ///
    /// Missing signals produce fewer factors, never an error.
    #[must_use]
    pub fn explain_fatigue(
        prediction: &FatiguePrediction,
    ) -> ExplainedRecommendation<FatiguePrediction> {
        let mut factors: Vec<ExplanationFactor> = prediction
            .components
            .iter()
            .map(component_factor)
            .collect();
        if factors.is_empty() {
            factors.push(factor(
                "No signals".into(),
                prediction.readiness_score,
                format!("{:.0}", prediction.readiness_score),
                1.0,
                prediction.readiness_score,
                "No load or wellness data; readiness is neutral".into(),
                vec![DataSource::TrainingLoad],
            ));
        }
        normalize(&mut factors);

        let limiting = factors
            .iter()
            .filter(|f| f.impact == FactorImpact::Negative)
            .max_by(|a, b| a.weighted_shortfall().total_cmp(&b.weighted_shortfall()))
            .map(|f| f.name.clone());
        let summary = match limiting {
            Some(name) => format!(
                "Readiness {:.0} ({}): {:?} training recommended, limited by {name}",
                prediction.readiness_score,
                zone_label(prediction.readiness_zone),
                prediction.recommended_intensity
            ),
            None => format!(
                "Readiness {:.0} ({}): {:?} training recommended",
                prediction.readiness_score,
                zone_label(prediction.readiness_zone),
                prediction.recommended_intensity
            ),
        };

        wrap(prediction.clone(), factors, summary, prediction.confidence)
    }

    /// Itemize the evidence for an adaptation recommendation
    #[must_use]
    pub fn explain_adaptation(
        &self,
        recommendation: &AdaptationRecommendation,
        inputs: &AdaptationInputs<'_>,
    ) -> ExplainedRecommendation<AdaptationRecommendation> {
        let reduces = matches!(
            recommendation.adaptation_type,
            AdaptationType::ReduceVolume | AdaptationType::AddRecovery
        ) || recommendation.is_reduction();
        let increases = recommendation.adaptation_type == AdaptationType::IncreaseVolume;

        let mut weighted: Vec<(bool, ExplanationFactor)> = Vec::new();

        if let Some(ratio) = AthleteContext::ratio(inputs.ctl, inputs.atl) {
            let high = (ratio - acwr::UNDERTRAINING_BELOW)
                / (acwr::SATURATION - acwr::UNDERTRAINING_BELOW)
                * 100.0;
            let score = directional(high.clamp(0.0, 100.0), reduces, increases);
            let primary = matches!(
                recommendation.trigger,
                AdaptationTrigger::Overreaching | AdaptationTrigger::InjuryRisk
            ) || (recommendation.trigger == AdaptationTrigger::Undertraining && increases);
            weighted.push((
                primary,
                ExplanationFactor {
                    threshold: Some(if increases {
                        acwr::UNDERTRAINING_BELOW
                    } else {
                        acwr::CAUTION_ABOVE
                    }),
                    ..factor(
                        "Acute:chronic workload ratio".into(),
                        ratio,
                        format!("{ratio:.2}"),
                        0.0,
                        score,
                        format!(
                            "ACWR {ratio:.2} (ATL {:.1} / CTL {:.1}); optimal band {:.1}-{:.1}",
                            inputs.atl,
                            inputs.ctl,
                            acwr::UNDERTRAINING_BELOW,
                            acwr::CAUTION_ABOVE
                        ),
                        vec![DataSource::TrainingLoad],
                    )
                },
            ));
        }

        let fatigue = 2.0f64.mul_add(-inputs.tsb, 50.0).clamp(0.0, 100.0);
        weighted.push((
            recommendation.trigger == AdaptationTrigger::RecoveryNeeded,
            ExplanationFactor {
                threshold: Some(training_load::TSB_DEEP_FATIGUE),
                ..factor(
                    "Training stress balance".into(),
                    inputs.tsb,
                    format!("{:+.1}", inputs.tsb),
                    0.0,
                    directional(fatigue, reduces, increases),
                    format!(
                        "TSB {:+.1}: {}",
                        inputs.tsb,
                        if inputs.tsb < training_load::TSB_DEEP_FATIGUE {
                            "deep accumulated fatigue"
                        } else if inputs.tsb < training_load::TSB_OVERREACHING {
                            "carrying significant fatigue"
                        } else if inputs.tsb > training_load::TSB_DETRAINING {
                            "fresh, with room for more load"
                        } else {
                            "balanced"
                        }
                    ),
                    vec![DataSource::TrainingLoad],
                )
            },
        ));

        if let Some(race) = inputs.race_date {
            let days = (race - inputs.as_of).num_days();
            let taper_score = match days {
                d if (0..=self.adaptation.taper.window_days).contains(&d) => 100.0,
                d if (0..=21).contains(&d) => 50.0,
                _ => 0.0,
            };
            let score = if recommendation.trigger == AdaptationTrigger::RaceTaper {
                taper_score
            } else {
                50.0
            };
            weighted.push((
                recommendation.trigger == AdaptationTrigger::RaceTaper,
                factor(
                    "Race proximity".into(),
                    days as f64,
                    format!("{days} days"),
                    0.0,
                    score,
                    format!("Race on {race}, {days} day(s) after {}", inputs.as_of),
                    vec![DataSource::RaceGoal],
                ),
            ));
        }

        if !inputs.deviations.is_empty() {
            let relevant = inputs
                .deviations
                .iter()
                .filter(|d| supports_trigger(d.deviation_type, recommendation))
                .count();
            let score = (relevant as f64 * 25.0).min(100.0);
            let primary = recommendation.trigger == AdaptationTrigger::Plateau
                || recommendation.adaptation_type == AdaptationType::ShiftSchedule;
            weighted.push((
                primary,
                factor(
                    "Plan adherence".into(),
                    relevant as f64,
                    format!("{relevant} of {}", inputs.deviations.len()),
                    0.0,
                    score,
                    format!(
                        "{relevant} of {} detected deviation(s) point toward this adjustment",
                        inputs.deviations.len()
                    ),
                    vec![DataSource::WorkoutCompletions],
                ),
            ));
        }

        let mut factors = primary_weighting(weighted);
        normalize(&mut factors);

        let priority = if recommendation.is_above(self.adaptation.high_priority_confidence) {
            "high priority"
        } else {
            "advisory"
        };
        let summary = format!(
            "{}, {priority} ({:.0}% confidence): {}",
            recommendation.trigger,
            recommendation.confidence * 100.0,
            recommendation.reason
        );
        wrap(recommendation.clone(), factors, summary, recommendation.confidence)
    }

    /// Itemize how well a plan fits the athlete's time and fitness
    #[must_use]
    pub fn explain_plan(plan: &TrainingPlan) -> ExplainedRecommendation<TrainingPlan> {
        let weeks = plan.total_weeks();
        let (recommended_weeks, needed_ctl) = preparation_norms(&plan.goal.distance);
        let ctl = plan.athlete_context.ctl;

        let time_score = (f64::from(weeks) / f64::from(recommended_weeks) * 100.0).min(100.0);
        let fitness_score = (ctl / needed_ctl * 100.0).clamp(0.0, 100.0);

        let first_load = plan.weeks.first().map_or(0.0, |w| w.target_load);
        let peak = plan.week(plan.peak_week);
        let peak_load = peak.map_or(first_load, |w| w.target_load);
        let growth = if first_load > 0.0 { peak_load / first_load } else { 1.0 };
        let growth_score = if growth <= COMFORTABLE_GROWTH {
            100.0
        } else {
            ((MAX_GROWTH - growth) / (MAX_GROWTH - COMFORTABLE_GROWTH) * 100.0).clamp(0.0, 100.0)
        };

        let available_minutes = plan.constraints.max_weekly_hours * 60.0;
        let needed_minutes = peak_load / WorkoutType::Easy.load_per_minute();
        let availability_score = if needed_minutes > 0.0 {
            (available_minutes / needed_minutes * 100.0).min(100.0)
        } else {
            100.0
        };

        let cutbacks = plan.weeks.iter().filter(|w| w.is_cutback).count();

        let mut factors = vec![
            ExplanationFactor {
                threshold: Some(f64::from(recommended_weeks)),
                ..factor(
                    "Preparation time".into(),
                    f64::from(weeks),
                    format!("{weeks} weeks"),
                    0.3,
                    time_score,
                    format!(
                        "{weeks} weeks until the {} (about {recommended_weeks} recommended)",
                        plan.goal.distance
                    ),
                    vec![DataSource::RaceGoal],
                )
            },
            ExplanationFactor {
                threshold: Some(needed_ctl),
                ..factor(
                    "Fitness base".into(),
                    ctl,
                    format!("CTL {ctl:.1}"),
                    0.3,
                    fitness_score,
                    format!(
                        "Chronic load {ctl:.1} against about {needed_ctl:.0} for this distance"
                    ),
                    vec![DataSource::TrainingLoad],
                )
            },
            factor(
                "Load progression".into(),
                growth,
                format!("x{growth:.2}"),
                0.2,
                growth_score,
                format!(
                    "Weekly load grows from {first_load:.0} to {peak_load:.0} at week {}, \
                     with {cutbacks} cutback week(s)",
                    plan.peak_week
                ),
                vec![DataSource::TrainingLoad, DataSource::PlanConstraints],
            ),
            factor(
                "Time availability".into(),
                plan.constraints.max_weekly_hours,
                format!("{:.1} h/week", plan.constraints.max_weekly_hours),
                0.2,
                availability_score,
                format!(
                    "{:.0} available minutes against about {needed_minutes:.0} for the peak week",
                    available_minutes
                ),
                vec![DataSource::PlanConstraints],
            ),
            ExplanationFactor {
                impact: FactorImpact::Neutral,
                ..factor(
                    "Periodization".into(),
                    f64::from(weeks),
                    plan.periodization.to_string(),
                    0.0,
                    50.0,
                    format!(
                        "{} periodization for {weeks} weeks to a {}",
                        plan.periodization, plan.goal.distance
                    ),
                    vec![DataSource::RaceGoal],
                )
            },
        ];
        normalize(&mut factors);

        let mut confidence = 0.5;
        if ctl > 0.0 {
            confidence += 0.2;
        }
        if plan.athlete_context.training_paces.is_some() {
            confidence += 0.1;
        }
        if plan.athlete_context.hr_zones.is_some() {
            confidence += 0.1;
        }

        let score: f64 = factors.iter().map(|f| f.contribution_points).sum();
        let summary = format!(
            "{weeks}-week {} plan for a {} on {}: preparation score {score:.0}",
            plan.periodization, plan.goal.distance, plan.goal.race_date
        );
        wrap(plan.clone(), factors, summary, confidence)
    }

    /// Itemize deviations by type; contributions sum to an adherence score
    #[must_use]
    pub fn explain_deviations(
        deviations: &[PlanDeviation],
    ) -> ExplainedRecommendation<Vec<PlanDeviation>> {
        const TYPES: [DeviationType; 5] = [
            DeviationType::MissedSession,
            DeviationType::LoadOvershoot,
            DeviationType::LoadUndershoot,
            DeviationType::AcwrBreach,
            DeviationType::ScheduleDrift,
        ];

        let mut factors: Vec<ExplanationFactor> = TYPES
            .iter()
            .filter_map(|&kind| {
                let matching: Vec<&PlanDeviation> =
                    deviations.iter().filter(|d| d.deviation_type == kind).collect();
                if matching.is_empty() {
                    return None;
                }
                let count = matching.len();
                let mean_magnitude =
                    matching.iter().map(|d| d.metrics.magnitude).sum::<f64>() / count as f64;
                let score = match kind {
                    DeviationType::MissedSession => 0.0,
                    DeviationType::LoadOvershoot | DeviationType::LoadUndershoot => {
                        (100.0 - mean_magnitude).clamp(0.0, 100.0)
                    }
                    DeviationType::AcwrBreach => 10.0,
                    DeviationType::ScheduleDrift => 60.0,
                };
                Some(factor(
                    deviation_label(kind).into(),
                    count as f64,
                    format!("{count}"),
                    count as f64,
                    score,
                    deviation_explanation(kind, count, mean_magnitude),
                    vec![DataSource::WorkoutCompletions],
                ))
            })
            .collect();

        if factors.is_empty() {
            factors.push(factor(
                "On plan".into(),
                0.0,
                "0".into(),
                1.0,
                100.0,
                "Completed sessions match the plan".into(),
                vec![DataSource::WorkoutCompletions],
            ));
        }
        normalize(&mut factors);

        let score: f64 = factors.iter().map(|f| f.contribution_points).sum();
        let summary = if deviations.is_empty() {
            "No deviations: adherence 100".to_owned()
        } else {
            format!("{} deviation(s): adherence {score:.0}", deviations.len())
        };
        let confidence = if deviations.is_empty() { 0.6 } else { 0.8 };
        wrap(deviations.to_vec(), factors, summary, confidence)
    }
}

fn component_factor(component: &ComponentScore) -> ExplanationFactor {
    let raw = component.raw_value;
    let (name, display, source, threshold) = match component.component {
        ReadinessComponent::Tsb => (
            "Training stress balance",
            format!("{raw:+.1}"),
            DataSource::TrainingLoad,
            Some(training_load::TSB_OVERREACHING),
        ),
        ReadinessComponent::Acwr => (
            "Acute:chronic workload ratio",
            format!("{raw:.2}"),
            DataSource::TrainingLoad,
            Some(acwr::CAUTION_ABOVE),
        ),
        ReadinessComponent::Hrv => (
            "Heart rate variability",
            format!("{raw:.0} ms"),
            DataSource::HeartRateVariability,
            None,
        ),
        ReadinessComponent::RestingHr => (
            "Resting heart rate",
            format!("{raw:.0} bpm"),
            DataSource::RestingHeartRate,
            None,
        ),
        ReadinessComponent::Sleep => ("Sleep", format!("{raw:.1} h"), DataSource::Sleep, None),
        ReadinessComponent::Subjective => (
            "Perceived fatigue",
            format!("{raw:.0}/10"),
            DataSource::SubjectiveReport,
            None,
        ),
    };
    let factor_score = 100.0 - component.fatigue_score;
    let explanation = match component.baseline {
        Some(baseline) if baseline > 0.0 => format!(
            "{name} {display} against a baseline of {baseline:.1} ({:+.1}%)",
            (raw - baseline) / baseline * 100.0
        ),
        _ => format!("{name} {display}, fatigue contribution {:.0}/100", component.fatigue_score),
    };
    ExplanationFactor {
        baseline: component.baseline,
        threshold,
        ..factor(
            name.into(),
            raw,
            display,
            component.weight,
            factor_score,
            explanation,
            vec![source],
        )
    }
}

fn factor(
    name: String,
    raw_value: f64,
    display_value: String,
    weight: f64,
    factor_score: f64,
    explanation: String,
    sources: Vec<DataSource>,
) -> ExplanationFactor {
    ExplanationFactor {
        name,
        raw_value,
        display_value,
        impact: impact_of(factor_score),
        weight,
        factor_score,
        contribution_points: weight * factor_score,
        explanation,
        baseline: None,
        threshold: None,
        sources,
    }
}

fn impact_of(score: f64) -> FactorImpact {
    if score >= POSITIVE_AT {
        FactorImpact::Positive
    } else if score <= NEGATIVE_AT {
        FactorImpact::Negative
    } else {
        FactorImpact::Neutral
    }
}

/// Scale weights to sum to 1 and recompute contributions
fn normalize(factors: &mut [ExplanationFactor]) {
    let total: f64 = factors.iter().map(|f| f.weight).sum();
    if total <= 0.0 {
        return;
    }
    for f in factors.iter_mut() {
        f.weight /= total;
        f.contribution_points = f.weight * f.factor_score;
    }
}

/// Primary factors share half the weight, the rest share the remainder
fn primary_weighting(weighted: Vec<(bool, ExplanationFactor)>) -> Vec<ExplanationFactor> {
    let primaries = weighted.iter().filter(|(p, _)| *p).count();
    let others = weighted.len() - primaries;
    let (primary_weight, other_weight) = match (primaries, others) {
        (0, n) => (0.0, 1.0 / n.max(1) as f64),
        (p, 0) => (1.0 / p as f64, 0.0),
        (p, n) => (PRIMARY_FACTOR_WEIGHT / p as f64, (1.0 - PRIMARY_FACTOR_WEIGHT) / n as f64),
    };
    weighted
        .into_iter()
        .map(|(primary, mut f)| {
            f.weight = if primary { primary_weight } else { other_weight };
            f
        })
        .collect()
}

/// Orient a "higher means more strain" score toward the recommendation
fn directional(strain: f64, reduces: bool, increases: bool) -> f64 {
    if reduces {
        strain
    } else if increases {
        100.0 - strain
    } else {
        50.0
    }
}

fn supports_trigger(kind: DeviationType, recommendation: &AdaptationRecommendation) -> bool {
    match recommendation.trigger {
        AdaptationTrigger::Overreaching => kind == DeviationType::LoadOvershoot,
        AdaptationTrigger::InjuryRisk => {
            matches!(kind, DeviationType::AcwrBreach | DeviationType::LoadOvershoot)
        }
        AdaptationTrigger::Plateau => kind == DeviationType::LoadUndershoot,
        AdaptationTrigger::Undertraining => matches!(
            kind,
            DeviationType::MissedSession
                | DeviationType::ScheduleDrift
                | DeviationType::LoadUndershoot
        ),
        AdaptationTrigger::RecoveryNeeded | AdaptationTrigger::RaceTaper => false,
    }
}

/// Typical preparation weeks and chronic load for a race distance
fn preparation_norms(distance: &RaceDistance) -> (u32, f64) {
    match distance {
        RaceDistance::FiveK => (6, 25.0),
        RaceDistance::TenK => (8, 30.0),
        RaceDistance::HalfMarathon => (10, 40.0),
        RaceDistance::Marathon => (16, 50.0),
        RaceDistance::Ultra50K => (20, 60.0),
        RaceDistance::Custom { km } if *km <= 10.0 => (8, 30.0),
        RaceDistance::Custom { km } if *km < 42.0 => (12, 40.0),
        RaceDistance::Custom { .. } => (20, 60.0),
    }
}

const fn deviation_label(kind: DeviationType) -> &'static str {
    match kind {
        DeviationType::MissedSession => "Missed sessions",
        DeviationType::LoadOvershoot => "Load overshoots",
        DeviationType::LoadUndershoot => "Load undershoots",
        DeviationType::AcwrBreach => "ACWR breaches",
        DeviationType::ScheduleDrift => "Schedule drift",
    }
}

fn deviation_explanation(kind: DeviationType, count: usize, mean_magnitude: f64) -> String {
    match kind {
        DeviationType::MissedSession => format!(
            "{count} planned session(s) had no completion \
             ({mean_magnitude:.0} load each on average)"
        ),
        DeviationType::LoadOvershoot => {
            format!("{count} session(s) exceeded planned load by {mean_magnitude:.0}% on average")
        }
        DeviationType::LoadUndershoot => format!(
            "{count} session(s) fell short of planned load by {mean_magnitude:.0}% on average"
        ),
        DeviationType::AcwrBreach => {
            format!("Executed load pushed ACWR to the danger zone {count} time(s)")
        }
        DeviationType::ScheduleDrift => {
            format!("{count} run(s) of sessions shifted by {mean_magnitude:.1} day(s) on average")
        }
    }
}

const fn zone_label(zone: ReadinessZone) -> &'static str {
    match zone {
        ReadinessZone::Green => "green",
        ReadinessZone::Yellow => "yellow",
        ReadinessZone::Red => "red",
    }
}

fn wrap<T>(
    recommendation: T,
    factors: Vec<ExplanationFactor>,
    summary: String,
    confidence: f64,
) -> ExplainedRecommendation<T> {
    let score = factors.iter().map(|f| f.contribution_points).sum::<f64>();
    ExplainedRecommendation {
        recommendation,
        score,
        summary,
        factors,
        confidence: confidence.clamp(0.0, 1.0),
    }
}
