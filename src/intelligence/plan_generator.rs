// ABOUTME: Periodized multi-week plan generation toward a race goal under scheduling constraints
// ABOUTME: Allocates phases and cutbacks, progresses weekly load, and places sessions on training days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generator
//!
//! Weeks run Monday to Sunday, starting with the week that contains the plan start date and
//! ending with the week that contains race day. The final one to three weeks taper depending
//! on race distance; the remaining weeks are split into base, build, and peak phases with a
//! cutback week every third or fourth week during base and build.
//!
//! Weekly target load starts from the athlete's chronic load (`ctl * 7`) and grows by the
//! configured progression rate for every non-cutback week, capped by what the weekly hour
//! limit allows. Sessions are spread across the available days starting from the long run day,
//! and quality sessions are kept off consecutive days unless back-to-back hard days are allowed.
//!
//! ## Scientific References
//!
//! - Issurin, V.B. (2010). New horizons for the methodology and physiology of training
//!   periodization. *Sports Medicine*, 40(3), 189-206.
//! - Mujika, I. & Padilla, S. (2003). Scientific bases for precompetition tapering strategies.
//!   *Medicine & Science in Sports & Exercise*, 35(7), 1182-1187.
//! - Daniels, J. (2013). *Daniels' Running Formula* (3rd ed.). Human Kinetics.

use crate::config::intelligence::PlanningConfig;
use crate::logging::EngineLogger;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use pacewise_core::constants::race_distances;
use pacewise_core::errors::{AppError, AppResult};
use pacewise_core::models::plan::WEEKDAYS;
use pacewise_core::models::{
    AthleteContext, PaceRange, PeriodizationType, PlanConstraints, PlannedSession, RaceDistance,
    RaceGoal, StructuredInterval, TrainingPhase, TrainingPlan, TrainingWeek, WorkoutType,
};
use tracing::debug;
use uuid::Uuid;

/// Load share of an easy session relative to the other session types
const EASY_SHARE: f64 = 1.0;
const RECOVERY_SHARE: f64 = 0.7;
const CROSS_TRAINING_SHARE: f64 = 0.8;

/// Load per minute used to convert the weekly hour limit into a load ceiling
const LOAD_CAP_PER_MINUTE: f64 = WorkoutType::Easy.load_per_minute();

/// Session durations are rounded to this many minutes
const DURATION_STEP_MIN: f64 = 5.0;

/// Taper load factors, final week last
const SHORT_TAPER: [f64; 1] = [0.55];
const HALF_TAPER: [f64; 2] = [0.7, 0.5];
const LONG_TAPER: [f64; 3] = [0.75, 0.6, 0.45];

/// Plans shorter than this many weeks use block periodization
const BLOCK_PERIODIZATION_MAX_WEEKS: u32 = 8;

/// Marathon-or-longer plans shorter than this use reverse periodization
const REVERSE_PERIODIZATION_MAX_WEEKS: u32 = 16;

/// Pace spread around a target (seconds per km)
const EASY_PACE_SPREAD: f64 = 10.0;
const QUALITY_PACE_SPREAD: f64 = 5.0;
const RACE_PACE_SPREAD: f64 = 3.0;

/// Week-level decisions taken before sessions are placed
#[derive(Debug, Clone, Copy)]
struct WeekOutline {
    week_number: u32,
    start_date: NaiveDate,
    phase: TrainingPhase,
    is_cutback: bool,
    target_load: f64,
    training_days: usize,
    quality_sessions: usize,
    index_in_plan: usize,
}

/// Periodized plan generator
#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: PlanningConfig,
}

impl PlanGenerator {
    /// Create a generator with the given configuration
    #[must_use]
    pub const fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Generate a plan starting today
    ///
    /// # Errors
    ///
    /// Returns a validation error if the constraints are infeasible or the race is not after
    /// today
    pub fn generate_plan(
        &self,
        goal: &RaceGoal,
        constraints: &PlanConstraints,
        context: &AthleteContext,
        periodization: Option<PeriodizationType>,
    ) -> AppResult<TrainingPlan> {
        self.generate_plan_from(
            Utc::now().date_naive(),
            goal,
            constraints,
            context,
            periodization,
        )
    }

    /// Generate a plan starting on `start_date`
    ///
    /// When `periodization` is `None` one is selected from race distance and plan length.
    ///
    /// # Errors
    ///
    /// Returns `InfeasibleConstraints` or `ValueOutOfRange` for constraints that cannot be
    /// satisfied, and `InvalidInput` when the race is not after `start_date`
    pub fn generate_plan_from(
        &self,
        start_date: NaiveDate,
        goal: &RaceGoal,
        constraints: &PlanConstraints,
        context: &AthleteContext,
        periodization: Option<PeriodizationType>,
    ) -> AppResult<TrainingPlan> {
        constraints.validate()?;
        if goal.race_date <= start_date {
            return Err(AppError::invalid_input(format!(
                "Race date {} must be after the plan start date {start_date}",
                goal.race_date
            )));
        }

        let first_monday = monday_of(start_date);
        let total_weeks = Self::total_weeks(first_monday, goal.race_date);
        let periodization =
            periodization.unwrap_or_else(|| Self::select_periodization(goal, total_weeks));

        let outlines = self.outline_weeks(first_monday, total_weeks, goal, constraints, context);
        let weeks: Vec<TrainingWeek> = outlines
            .iter()
            .map(|outline| self.build_week(outline, goal, constraints, context, periodization))
            .collect();
        let peak_week = Self::find_peak_week(&weeks);

        let plan = TrainingPlan {
            id: Uuid::new_v4(),
            athlete_id: context.athlete_id.clone(),
            goal: goal.clone(),
            constraints: constraints.clone(),
            athlete_context: context.clone(),
            periodization,
            weeks,
            peak_week,
            start_date,
            created_at: Utc::now(),
            revision: 0,
            adaptation_history: Vec::new(),
        };

        EngineLogger::log_plan_generated(
            &plan.id.to_string(),
            &plan.athlete_id,
            plan.total_weeks(),
            &periodization.to_string(),
            peak_week,
        );
        Ok(plan)
    }

    /// Weeks from the first plan Monday through the week containing race day
    #[must_use]
    pub fn total_weeks(first_monday: NaiveDate, race_date: NaiveDate) -> u32 {
        let days = (race_date - first_monday).num_days().max(0);
        u32::try_from(days / 7 + 1).unwrap_or(u32::MAX)
    }

    /// Heuristic periodization for a goal and plan length
    ///
    /// Short windows favor block periodization, 5K/10K goals undulating, marathon-or-longer
    /// goals without a long runway reverse, and everything else linear.
    #[must_use]
    pub fn select_periodization(goal: &RaceGoal, total_weeks: u32) -> PeriodizationType {
        if total_weeks < BLOCK_PERIODIZATION_MAX_WEEKS {
            PeriodizationType::Block
        } else if goal.distance.km() <= race_distances::TEN_K {
            PeriodizationType::Undulating
        } else if goal.distance.is_marathon_or_longer()
            && total_weeks < REVERSE_PERIODIZATION_MAX_WEEKS
        {
            PeriodizationType::Reverse
        } else {
            PeriodizationType::Linear
        }
    }

    /// Taper load factors for a race distance, final week last
    #[must_use]
    pub fn taper_factors(distance: &RaceDistance) -> &'static [f64] {
        let km = distance.km();
        if km <= race_distances::TEN_K {
            &SHORT_TAPER
        } else if km < race_distances::MARATHON {
            &HALF_TAPER
        } else {
            &LONG_TAPER
        }
    }

    /// Phase of every week, first week first
    #[must_use]
    pub fn phase_layout(&self, total_weeks: u32, taper_weeks: u32) -> Vec<TrainingPhase> {
        let total = total_weeks as usize;
        let taper = (taper_weeks as usize).min(total);
        let remaining = total - taper;

        let proportions = &self.config.phase_proportions;
        let share_total = proportions.total();
        let base = ((remaining as f64) * proportions.base / share_total).round() as usize;
        let build = ((remaining as f64) * proportions.build / share_total).round() as usize;
        let base = base.min(remaining);
        let build = build.min(remaining - base);

        (0..total)
            .map(|i| {
                if i >= remaining {
                    TrainingPhase::Taper
                } else if i < base {
                    TrainingPhase::Base
                } else if i < base + build {
                    TrainingPhase::Build
                } else {
                    TrainingPhase::Peak
                }
            })
            .collect()
    }

    fn outline_weeks(
        &self,
        first_monday: NaiveDate,
        total_weeks: u32,
        goal: &RaceGoal,
        constraints: &PlanConstraints,
        context: &AthleteContext,
    ) -> Vec<WeekOutline> {
        let factors = Self::taper_factors(&goal.distance);
        let taper_weeks = if total_weeks <= 1 {
            total_weeks
        } else {
            (factors.len() as u32).min(total_weeks - 1)
        };
        let phases = self.phase_layout(total_weeks, taper_weeks);
        let taper_factors = &factors[factors.len() - taper_weeks as usize..];

        // Elevated ACWR shortens the cutback cycle
        let cutback_every = if context.risk_zone.is_elevated() {
            self.config.cutback_frequency.saturating_sub(1).max(3)
        } else {
            self.config.cutback_frequency.max(2)
        };

        let start_load = if context.ctl > 0.0 {
            context.ctl * 7.0
        } else {
            self.config.default_weekly_load
        };
        let max_minutes = constraints.max_weekly_hours * 60.0;
        let load_cap = max_minutes * LOAD_CAP_PER_MINUTE;
        let days = usize::from(constraints.days_per_week);

        let mut outlines = Vec::with_capacity(phases.len());
        let mut progression_steps = 0_i32;
        let mut last_full_load = start_load.min(load_cap);
        let mut taper_index = 0_usize;

        for (index, phase) in phases.iter().copied().enumerate() {
            let week_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let start_date = first_monday + Duration::weeks(i64::from(week_number - 1));
            let progressed = (start_load
                * (1.0 + self.config.progression_rate).powi(progression_steps))
            .min(load_cap);

            let is_cutback = matches!(phase, TrainingPhase::Base | TrainingPhase::Build)
                && week_number % cutback_every == 0;

            let (phase, target_load, training_days) = if phase == TrainingPhase::Taper {
                let factor = taper_factors.get(taper_index).copied().unwrap_or(1.0);
                taper_index += 1;
                (phase, last_full_load * factor, days)
            } else if is_cutback {
                (
                    TrainingPhase::Recovery,
                    progressed * self.config.cutback_factor,
                    days.saturating_sub(1).max(3),
                )
            } else {
                progression_steps += 1;
                last_full_load = progressed;
                (phase, progressed, days)
            };

            outlines.push(WeekOutline {
                week_number,
                start_date,
                phase,
                is_cutback,
                target_load,
                training_days,
                quality_sessions: self.quality_sessions(phase, training_days),
                index_in_plan: index,
            });
        }

        debug!(
            total_weeks,
            taper_weeks,
            cutback_every,
            start_load,
            load_cap,
            "Plan weeks outlined"
        );
        outlines
    }

    fn quality_sessions(&self, phase: TrainingPhase, training_days: usize) -> usize {
        let by_phase = match phase {
            TrainingPhase::Recovery => 0,
            TrainingPhase::Base | TrainingPhase::Taper => 1,
            TrainingPhase::Build | TrainingPhase::Peak => 2,
        };
        by_phase
            .min(self.config.max_quality_sessions as usize)
            .min(training_days.saturating_sub(2))
    }

    fn build_week(
        &self,
        outline: &WeekOutline,
        goal: &RaceGoal,
        constraints: &PlanConstraints,
        context: &AthleteContext,
        periodization: PeriodizationType,
    ) -> TrainingWeek {
        let long_day = weekday_index(constraints.long_run_day);
        let mut days = select_training_days(constraints, outline.training_days);

        // The race week ends on race day
        let race_offset = (goal.race_date - outline.start_date).num_days();
        let race_day = (0..7).contains(&race_offset).then_some(race_offset as usize);
        if let Some(race) = race_day {
            days.retain(|d| *d <= race);
            if !days.contains(&race) {
                if days.len() >= outline.training_days {
                    if let Some(last_before) = days.iter().copied().filter(|d| *d < race).max() {
                        days.retain(|d| *d != last_before);
                    }
                }
                days.push(race);
                days.sort_unstable();
            }
        }

        let quality_types =
            quality_workouts(periodization, outline.phase, outline.index_in_plan);
        let types = Self::assign_workouts(
            &days,
            long_day,
            race_day,
            &quality_types[..outline.quality_sessions.min(quality_types.len())],
            constraints,
            outline.phase,
        );
        let durations = self.session_durations(&types, outline.target_load, constraints, goal);

        let sessions = types
            .iter()
            .zip(durations)
            .map(|(&(day, workout_type), duration_min)| {
                build_session(
                    outline.week_number,
                    outline.start_date + Duration::days(i64::try_from(day).unwrap_or_default()),
                    day,
                    workout_type,
                    duration_min,
                    goal,
                    context,
                )
            })
            .collect();

        TrainingWeek {
            week_number: outline.week_number,
            start_date: outline.start_date,
            phase: outline.phase,
            target_load: round_tenth(outline.target_load),
            is_cutback: outline.is_cutback,
            sessions,
            revision: 0,
        }
    }

    /// Workout type for each training day
    fn assign_workouts(
        days: &[usize],
        long_day: usize,
        race_day: Option<usize>,
        quality: &[WorkoutType],
        constraints: &PlanConstraints,
        phase: TrainingPhase,
    ) -> Vec<(usize, WorkoutType)> {
        // No long run in race week
        let has_long = race_day.is_none() && days.contains(&long_day);
        let reserved: Vec<usize> = [has_long.then_some(long_day), race_day]
            .into_iter()
            .flatten()
            .collect();
        let candidates: Vec<usize> = days
            .iter()
            .copied()
            .filter(|d| !reserved.contains(d))
            .collect();
        let quality_days = select_quality_days(
            &candidates,
            &reserved,
            quality.len(),
            constraints.back_to_back_hard_ok,
        );

        let mut assigned: Vec<(usize, WorkoutType)> = days
            .iter()
            .map(|&day| {
                let workout_type = if Some(day) == race_day {
                    WorkoutType::Race
                } else if has_long && day == long_day {
                    WorkoutType::Long
                } else if let Some(pos) = quality_days.iter().position(|q| *q == day) {
                    quality[pos]
                } else if has_long && day == (long_day + 1) % 7 {
                    WorkoutType::Recovery
                } else {
                    WorkoutType::Easy
                };
                (day, workout_type)
            })
            .collect();

        let cross_training_phase = matches!(phase, TrainingPhase::Base | TrainingPhase::Recovery);
        let easy_days = assigned
            .iter()
            .filter(|(_, t)| *t == WorkoutType::Easy)
            .count();
        if constraints.allow_cross_training && cross_training_phase && easy_days >= 2 {
            if let Some(slot) = assigned
                .iter_mut()
                .rev()
                .find(|(_, t)| *t == WorkoutType::Easy)
            {
                slot.1 = WorkoutType::CrossTraining;
            }
        }
        assigned
    }

    /// Session durations that share the weekly target load and fit the hour limits
    fn session_durations(
        &self,
        types: &[(usize, WorkoutType)],
        target_load: f64,
        constraints: &PlanConstraints,
        goal: &RaceGoal,
    ) -> Vec<u32> {
        let max_session = constraints.max_session_duration_min;
        let min_session = PlanConstraints::MIN_SESSION_MINUTES;
        let total_share: f64 = types.iter().map(|(_, t)| self.load_share(*t)).sum();

        let mut durations: Vec<u32> = types
            .iter()
            .map(|(_, workout_type)| {
                if *workout_type == WorkoutType::Race {
                    return goal.target_time_seconds.div_ceil(60);
                }
                if total_share <= 0.0 {
                    return min_session;
                }
                let load = target_load * self.load_share(*workout_type) / total_share;
                let minutes = load / workout_type.load_per_minute();
                round_to_step(minutes).clamp(min_session, max_session)
            })
            .collect();

        // Scale non-race sessions into the weekly hour limit
        let training: Vec<usize> = types
            .iter()
            .enumerate()
            .filter(|(_, (_, t))| *t != WorkoutType::Race)
            .map(|(i, _)| i)
            .collect();
        let mut training_minutes: Vec<u32> = training.iter().map(|&i| durations[i]).collect();
        constraints.fit_weekly_minutes(&mut training_minutes, 0);
        for (&i, minutes) in training.iter().zip(training_minutes) {
            durations[i] = minutes;
        }
        durations
    }

    fn load_share(&self, workout_type: WorkoutType) -> f64 {
        match workout_type {
            WorkoutType::Long => self.config.long_run_share,
            t if t.is_quality() => self.config.quality_share,
            WorkoutType::Recovery => RECOVERY_SHARE,
            WorkoutType::CrossTraining => CROSS_TRAINING_SHARE,
            WorkoutType::Race | WorkoutType::Rest => 0.0,
            _ => EASY_SHARE,
        }
    }

    /// Last week with the highest target load before the taper
    fn find_peak_week(weeks: &[TrainingWeek]) -> u32 {
        weeks
            .iter()
            .filter(|w| w.phase != TrainingPhase::Taper)
            .fold(None::<&TrainingWeek>, |best, week| match best {
                Some(b) if b.target_load > week.target_load => Some(b),
                _ => Some(week),
            })
            .or_else(|| weeks.first())
            .map_or(1, |w| w.week_number)
    }
}

/// Monday of the week containing `date`
#[must_use]
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Days apart on the weekly cycle (Sunday and Monday are adjacent)
fn day_gap(a: usize, b: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(7 - d)
}

/// Training days as Monday-based indices, spread out from the long run day
///
/// Each next day maximizes its distance to the days already chosen; ties go to the earlier
/// weekday. Rest days are never chosen.
#[must_use]
pub fn select_training_days(constraints: &PlanConstraints, count: usize) -> Vec<usize> {
    let available: Vec<usize> = constraints
        .available_days()
        .into_iter()
        .map(weekday_index)
        .collect();
    let mut chosen = vec![weekday_index(constraints.long_run_day)];

    while chosen.len() < count {
        let next = available
            .iter()
            .copied()
            .filter(|d| !chosen.contains(d))
            .max_by(|a, b| {
                let gap = |day: usize| chosen.iter().map(|c| day_gap(*c, day)).min().unwrap_or(7);
                gap(*a).cmp(&gap(*b)).then(b.cmp(a))
            });
        match next {
            Some(day) => chosen.push(day),
            None => break,
        }
    }
    chosen.sort_unstable();
    chosen
}

/// Quality days among the candidates, avoiding days next to another quality day
///
/// Days next to the long run or race are avoided when possible. Consecutive quality days are
/// only allowed when `back_to_back_ok`.
fn select_quality_days(
    candidates: &[usize],
    reserved: &[usize],
    wanted: usize,
    back_to_back_ok: bool,
) -> Vec<usize> {
    let mut picked: Vec<usize> = Vec::with_capacity(wanted);
    for relax_reserved in [false, true] {
        for &day in candidates {
            if picked.len() >= wanted {
                break;
            }
            if picked.contains(&day) {
                continue;
            }
            let next_to_reserved = reserved.iter().any(|r| day_gap(*r, day) == 1);
            let next_to_quality = picked.iter().any(|q| day_gap(*q, day) == 1);
            if (next_to_reserved && !relax_reserved) || (next_to_quality && !back_to_back_ok) {
                continue;
            }
            picked.push(day);
        }
    }
    picked.sort_unstable();
    picked
}

/// Quality workout rotation for a periodization model and phase
fn quality_workouts(
    periodization: PeriodizationType,
    phase: TrainingPhase,
    week_index: usize,
) -> [WorkoutType; 2] {
    use WorkoutType::{Fartlek, Hills, Intervals, Tempo, Threshold};

    match (periodization, phase) {
        (_, TrainingPhase::Recovery) => [Fartlek, Fartlek],
        (PeriodizationType::Undulating, TrainingPhase::Taper) => [Intervals, Tempo],
        (PeriodizationType::Undulating, _) => {
            const ROTATION: [WorkoutType; 5] = [Tempo, Intervals, Threshold, Hills, Fartlek];
            [
                ROTATION[week_index % ROTATION.len()],
                ROTATION[(week_index + 2) % ROTATION.len()],
            ]
        }
        (PeriodizationType::Linear, TrainingPhase::Base) => [Fartlek, Hills],
        (PeriodizationType::Linear, TrainingPhase::Build) => [Tempo, Hills],
        (PeriodizationType::Linear, TrainingPhase::Peak) => [Threshold, Intervals],
        (PeriodizationType::Reverse, TrainingPhase::Base) => [Intervals, Hills],
        (PeriodizationType::Reverse, TrainingPhase::Build) => [Threshold, Intervals],
        (PeriodizationType::Reverse, TrainingPhase::Peak) => [Tempo, Threshold],
        (PeriodizationType::Block, TrainingPhase::Base) => [Hills, Fartlek],
        (PeriodizationType::Block, TrainingPhase::Build) => [Threshold, Tempo],
        (PeriodizationType::Block, TrainingPhase::Peak) => [Intervals, Threshold],
        (_, TrainingPhase::Taper) => [Tempo, Intervals],
    }
}

fn build_session(
    week_number: u32,
    date: NaiveDate,
    day: usize,
    workout_type: WorkoutType,
    duration_min: u32,
    goal: &RaceGoal,
    context: &AthleteContext,
) -> PlannedSession {
    let weekday = WEEKDAYS[day % 7];
    let paces = context.training_paces.as_ref();

    let (center, spread, zone) = match workout_type {
        WorkoutType::Recovery => (paces.map(|p| p.recovery), EASY_PACE_SPREAD, 1),
        WorkoutType::Easy => (paces.map(|p| p.easy), EASY_PACE_SPREAD, 2),
        WorkoutType::Long => (paces.map(|p| p.easy + 5.0), EASY_PACE_SPREAD, 2),
        WorkoutType::CrossTraining | WorkoutType::Rest => (None, 0.0, 2),
        WorkoutType::Tempo => (
            paces.map(|p| (p.marathon + p.threshold) / 2.0),
            QUALITY_PACE_SPREAD,
            3,
        ),
        WorkoutType::Fartlek => (paces.map(|p| p.threshold), EASY_PACE_SPREAD, 3),
        WorkoutType::Threshold => (paces.map(|p| p.threshold), QUALITY_PACE_SPREAD, 4),
        WorkoutType::Hills => (None, 0.0, 4),
        WorkoutType::Intervals => (paces.map(|p| p.interval), QUALITY_PACE_SPREAD, 5),
        WorkoutType::Race => (Some(goal.target_pace_sec_per_km()), RACE_PACE_SPREAD, 4),
    };
    let pace_target = center.map(|c| PaceRange::around(c, spread));
    let hr_zone = context
        .hr_zones
        .as_ref()
        .and_then(|zones| zones.zone(zone))
        .map(|z| z.zone);
    let intervals = structured_intervals(workout_type, duration_min, pace_target, hr_zone);
    let description = describe(workout_type, duration_min, &intervals, goal);

    PlannedSession {
        id: format!("w{week_number}-{}", weekday.to_string().to_lowercase()),
        date,
        day: weekday,
        workout_type,
        duration_min,
        target_load: round_tenth(f64::from(duration_min) * workout_type.load_per_minute()),
        pace_target,
        hr_zone,
        intervals,
        description,
    }
}

/// Repetition structure for interval-style sessions, leaving 20 minutes to warm up and cool down
fn structured_intervals(
    workout_type: WorkoutType,
    duration_min: u32,
    pace: Option<PaceRange>,
    hr_zone: Option<u8>,
) -> Vec<StructuredInterval> {
    let main_set_seconds = duration_min.saturating_sub(20) * 60;
    let (work_seconds, recovery_seconds, min_reps, max_reps) = match workout_type {
        WorkoutType::Intervals => (180, 120, 3, 8),
        WorkoutType::Threshold => (480, 120, 2, 4),
        WorkoutType::Hills => (60, 90, 4, 10),
        WorkoutType::Fartlek => (120, 120, 4, 8),
        _ => return Vec::new(),
    };
    let repetitions =
        (main_set_seconds / (work_seconds + recovery_seconds)).clamp(min_reps, max_reps);
    vec![StructuredInterval {
        repetitions,
        work_seconds,
        recovery_seconds,
        pace,
        hr_zone,
    }]
}

fn describe(
    workout_type: WorkoutType,
    duration_min: u32,
    intervals: &[StructuredInterval],
    goal: &RaceGoal,
) -> String {
    match (workout_type, intervals.first()) {
        (WorkoutType::Race, _) => format!(
            "Race day: {} in {}",
            goal.distance,
            format_duration(goal.target_time_seconds)
        ),
        (_, Some(set)) => format!(
            "{workout_type} {duration_min} min: {} x {} with {} recovery",
            set.repetitions,
            format_duration(set.work_seconds),
            format_duration(set.recovery_seconds)
        ),
        _ => format!("{workout_type} {duration_min} min"),
    }
}

fn format_duration(seconds: u32) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

fn round_to_step(minutes: f64) -> u32 {
    ((minutes / DURATION_STEP_MIN).round() * DURATION_STEP_MIN).max(0.0) as u32
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
