// ABOUTME: Deviation detection between a training plan and executed workouts
// ABOUTME: Flags missed sessions, load under/overshoot, ACWR breaches, and schedule drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Deviation Detector
//!
//! Only sessions that have elapsed (dated before the evaluation day and on or after the plan
//! start date) are examined. Completions are matched to sessions by workout id.
//!
//! The ACWR scan continues the plan's starting CTL/ATL with the executed loads day by day and
//! flags each upward crossing of the breach ratio. A plan that starts without chronic load
//! needs four weeks of executed history before a breach can be flagged.

use super::training_load::TrainingLoadCalculator;
use crate::config::intelligence::DeviationConfig;
use crate::logging::EngineLogger;
use chrono::{Duration, NaiveDate, Utc};
use pacewise_core::constants::training_load::{ATL_WINDOW_DAYS, CTL_WINDOW_DAYS};
use pacewise_core::models::{
    AthleteContext, DeviationMetrics, DeviationType, PlanDeviation, PlannedSession, TrainingPlan,
    WorkoutCompletion, WorkoutType,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Planned versus executed training for one elapsed week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCompliance {
    /// Week number
    pub week_number: u32,
    /// Sum of planned session loads
    pub planned_load: f64,
    /// Sum of executed loads for the week's sessions
    pub completed_load: f64,
    /// Sessions planned
    pub planned_sessions: usize,
    /// Sessions completed
    pub completed_sessions: usize,
    /// `completed_load / planned_load * 100`, absent for a week with no planned load
    pub compliance_pct: Option<f64>,
}

/// Plan deviation detector
#[derive(Debug, Clone, Default)]
pub struct DeviationDetector {
    config: DeviationConfig,
}

impl DeviationDetector {
    /// Create a detector with the given configuration
    #[must_use]
    pub const fn new(config: DeviationConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &DeviationConfig {
        &self.config
    }

    /// Deviations for sessions elapsed before today
    #[must_use]
    pub fn detect_deviations(
        &self,
        plan: &TrainingPlan,
        completions: &[WorkoutCompletion],
    ) -> Vec<PlanDeviation> {
        self.detect_deviations_as_of(plan, completions, Utc::now().date_naive())
    }

    /// Deviations for sessions elapsed before `as_of`, ordered by date
    #[must_use]
    pub fn detect_deviations_as_of(
        &self,
        plan: &TrainingPlan,
        completions: &[WorkoutCompletion],
        as_of: NaiveDate,
    ) -> Vec<PlanDeviation> {
        let by_id = index_completions(completions);
        let elapsed: Vec<(u32, &PlannedSession)> = elapsed_sessions(plan, as_of).collect();

        let mut deviations: Vec<PlanDeviation> = elapsed
            .iter()
            .filter_map(|(week, session)| {
                self.classify_session(*week, session, by_id.get(session.id.as_str()).copied())
            })
            .collect();
        deviations.extend(self.detect_acwr_breaches(plan, completions, as_of));
        deviations.extend(self.detect_schedule_drift(&elapsed, &by_id));
        deviations.sort_by_key(|d| d.occurred_on);

        debug!(
            plan.id = %plan.id,
            elapsed_sessions = elapsed.len(),
            completions = completions.len(),
            "Deviation scan finished"
        );
        EngineLogger::log_deviations_detected(
            &plan.id.to_string(),
            &plan.athlete_id,
            deviations.len(),
        );
        deviations
    }

    /// Per-week planned and executed load for weeks that have fully elapsed
    #[must_use]
    pub fn summarize_compliance(
        &self,
        plan: &TrainingPlan,
        completions: &[WorkoutCompletion],
        as_of: NaiveDate,
    ) -> Vec<WeeklyCompliance> {
        let by_id = index_completions(completions);
        plan.weeks
            .iter()
            .filter(|week| week.has_elapsed(as_of))
            .map(|week| {
                let sessions: Vec<&PlannedSession> = week
                    .sessions
                    .iter()
                    .filter(|s| s.workout_type != WorkoutType::Rest && s.date >= plan.start_date)
                    .collect();
                let planned_load: f64 = sessions.iter().map(|s| s.target_load).sum();
                let done: Vec<&WorkoutCompletion> = sessions
                    .iter()
                    .filter_map(|s| by_id.get(s.id.as_str()).copied())
                    .filter(|c| c.was_completed())
                    .collect();
                let completed_load: f64 = done.iter().map(|c| c.effective_load()).sum();
                WeeklyCompliance {
                    week_number: week.week_number,
                    planned_load,
                    completed_load,
                    planned_sessions: sessions.len(),
                    completed_sessions: done.len(),
                    compliance_pct: (planned_load > 0.0)
                        .then(|| completed_load / planned_load * 100.0),
                }
            })
            .collect()
    }

    fn classify_session(
        &self,
        week_number: u32,
        session: &PlannedSession,
        completion: Option<&WorkoutCompletion>,
    ) -> Option<PlanDeviation> {
        let Some(completion) = completion.filter(|c| c.was_completed()) else {
            return Some(PlanDeviation {
                deviation_type: DeviationType::MissedSession,
                metrics: DeviationMetrics {
                    magnitude: session.target_load,
                    week_number: Some(week_number),
                    session_ids: vec![session.id.clone()],
                    planned_value: Some(session.target_load),
                    actual_value: Some(0.0),
                },
                occurred_on: session.date,
                description: format!(
                    "Missed {} session planned for {} ({:.0} load)",
                    session.workout_type, session.date, session.target_load
                ),
            });
        };

        let compliance = completion.compliance_pct()?;
        let deviation_type = if compliance < self.config.undershoot_pct {
            DeviationType::LoadUndershoot
        } else if compliance > self.config.overshoot_pct {
            DeviationType::LoadOvershoot
        } else {
            return None;
        };

        let verb = if deviation_type == DeviationType::LoadUndershoot {
            "below"
        } else {
            "above"
        };
        Some(PlanDeviation {
            deviation_type,
            metrics: DeviationMetrics {
                magnitude: (compliance - 100.0).abs(),
                week_number: Some(week_number),
                session_ids: vec![session.id.clone()],
                planned_value: Some(completion.planned_load),
                actual_value: completion.actual_load,
            },
            occurred_on: session.date,
            description: format!(
                "{} session on {} executed at {compliance:.0}% of planned load ({:.0}% {verb} plan)",
                session.workout_type,
                session.date,
                (compliance - 100.0).abs()
            ),
        })
    }

    /// Upward crossings of the breach ratio in the executed load series
    fn detect_acwr_breaches(
        &self,
        plan: &TrainingPlan,
        completions: &[WorkoutCompletion],
        as_of: NaiveDate,
    ) -> Vec<PlanDeviation> {
        let seed: &AthleteContext = &plan.athlete_context;
        let first_day = seed.as_of.max(plan.start_date - Duration::days(1)) + Duration::days(1);
        if first_day >= as_of {
            return Vec::new();
        }

        let mut daily: BTreeMap<NaiveDate, (f64, Vec<String>)> = BTreeMap::new();
        for completion in completions.iter().filter(|c| c.was_completed()) {
            if let Some(date) = completion.completed_date {
                if date >= first_day && date < as_of {
                    let entry = daily.entry(date).or_default();
                    entry.0 += completion.effective_load();
                    entry.1.push(completion.workout_id.clone());
                }
            }
        }

        let ctl_alpha = TrainingLoadCalculator::alpha(CTL_WINDOW_DAYS);
        let atl_alpha = TrainingLoadCalculator::alpha(ATL_WINDOW_DAYS);
        let needs_history = seed.ctl <= 0.0;

        let mut ctl = seed.ctl.max(0.0);
        let mut atl = seed.atl.max(0.0);
        let mut above = seed.acwr.is_some_and(|r| r >= self.config.acwr_breach);
        let mut breaches = Vec::new();

        let mut date = first_day;
        let mut day_count = 0_i64;
        while date < as_of {
            let (load, session_ids) = daily.remove(&date).unwrap_or_default();
            ctl = TrainingLoadCalculator::ewa_step(ctl, load, ctl_alpha);
            atl = TrainingLoadCalculator::ewa_step(atl, load, atl_alpha);
            day_count += 1;

            let trusted = !needs_history || day_count >= self.config.min_chronic_history_days;
            let ratio = AthleteContext::ratio(ctl, atl);
            let now_above = ratio.is_some_and(|r| r >= self.config.acwr_breach);

            if let Some(r) = ratio.filter(|_| trusted && now_above && !above) {
                breaches.push(PlanDeviation {
                    deviation_type: DeviationType::AcwrBreach,
                    metrics: DeviationMetrics {
                        magnitude: r,
                        week_number: plan.week_containing(date).map(|w| w.week_number),
                        session_ids,
                        planned_value: Some(self.config.acwr_breach),
                        actual_value: Some(r),
                    },
                    occurred_on: date,
                    description: format!(
                        "Acute:chronic workload ratio reached {r:.2} on {date} (threshold {:.2})",
                        self.config.acwr_breach
                    ),
                });
            }
            if trusted {
                above = now_above;
            }
            date += Duration::days(1);
        }
        breaches
    }

    /// Runs of consecutive completed sessions slipped the same direction
    fn detect_schedule_drift(
        &self,
        elapsed: &[(u32, &PlannedSession)],
        by_id: &HashMap<&str, &WorkoutCompletion>,
    ) -> Vec<PlanDeviation> {
        let min_slip = self.config.drift_min_slip_days.max(1);
        let mut drifts = Vec::new();
        let mut run: Vec<(u32, &WorkoutCompletion)> = Vec::new();
        let mut run_sign = 0_i64;

        let mut flush = |run: &mut Vec<(u32, &WorkoutCompletion)>| {
            if run.len() >= self.config.drift_run_length {
                drifts.extend(drift_deviation(run));
            }
            run.clear();
        };

        for (week, session) in elapsed {
            let slip = by_id
                .get(session.id.as_str())
                .and_then(|c| c.slip_days().map(|s| (*c, s)));
            match slip {
                Some((completion, days)) if days.abs() >= min_slip => {
                    let sign = days.signum();
                    if sign != run_sign {
                        flush(&mut run);
                        run_sign = sign;
                    }
                    run.push((*week, completion));
                }
                _ => {
                    flush(&mut run);
                    run_sign = 0;
                }
            }
        }
        flush(&mut run);
        drifts
    }
}

fn drift_deviation(run: &[(u32, &WorkoutCompletion)]) -> Option<PlanDeviation> {
    let slips: Vec<i64> = run
        .iter()
        .filter_map(|(_, c)| c.slip_days())
        .collect();
    let mean_slip = slips.iter().sum::<i64>() as f64 / slips.len().max(1) as f64;
    let occurred_on = run.last().and_then(|(_, c)| c.completed_date)?;
    let direction = if mean_slip > 0.0 { "late" } else { "early" };

    Some(PlanDeviation {
        deviation_type: DeviationType::ScheduleDrift,
        metrics: DeviationMetrics {
            magnitude: mean_slip.abs(),
            week_number: run.first().map(|(week, _)| *week),
            session_ids: run.iter().map(|(_, c)| c.workout_id.clone()).collect(),
            planned_value: Some(0.0),
            actual_value: Some(mean_slip),
        },
        occurred_on,
        description: format!(
            "{} consecutive sessions completed {:.1} days {direction} on average",
            run.len(),
            mean_slip.abs()
        ),
    })
}

/// Completions keyed by workout id, preferring a completed record over an open one
fn index_completions(completions: &[WorkoutCompletion]) -> HashMap<&str, &WorkoutCompletion> {
    let mut by_id: HashMap<&str, &WorkoutCompletion> = HashMap::with_capacity(completions.len());
    for completion in completions {
        let replace = match by_id.get(completion.workout_id.as_str()) {
            Some(existing) => !existing.was_completed() || completion.was_completed(),
            None => true,
        };
        if replace {
            by_id.insert(completion.workout_id.as_str(), completion);
        }
    }
    by_id
}

/// Training sessions dated from the plan start up to, not including, `as_of`
fn elapsed_sessions(
    plan: &TrainingPlan,
    as_of: NaiveDate,
) -> impl Iterator<Item = (u32, &PlannedSession)> {
    plan.weeks.iter().flat_map(move |week| {
        week.sessions
            .iter()
            .filter(move |s| {
                s.date < as_of && s.date >= plan.start_date && s.workout_type != WorkoutType::Rest
            })
            .map(move |s| (week.week_number, s))
    })
}
