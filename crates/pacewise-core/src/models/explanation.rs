// ABOUTME: Structured explanation payloads attached to engine outputs
// ABOUTME: Factors carry weights and contribution points that add up to the explained score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Direction a factor pushes the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorImpact {
    /// Supports readiness or the recommendation
    Positive,
    /// Works against readiness or the recommendation
    Negative,
    /// No material effect
    Neutral,
}

/// Provenance of a factor's input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Daily load history
    TrainingLoad,
    /// Heart rate variability readings
    HeartRateVariability,
    /// Resting heart rate readings
    RestingHeartRate,
    /// Sleep tracking
    Sleep,
    /// Athlete self-report
    SubjectiveReport,
    /// Workout completion records
    WorkoutCompletions,
    /// Race goal
    RaceGoal,
    /// Plan constraints
    PlanConstraints,
    /// Athlete profile (heart rates, VO2max, race results)
    AthleteProfile,
}

/// One itemized factor of an explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationFactor {
    /// Factor name
    pub name: String,
    /// Raw input value
    pub raw_value: f64,
    /// Formatted value for display
    pub display_value: String,
    /// Direction of influence
    pub impact: FactorImpact,
    /// Normalized weight (weights of one explanation sum to 1)
    pub weight: f64,
    /// Factor score on a 0-100 scale
    pub factor_score: f64,
    /// `weight * factor_score`; all contributions sum to the explained score
    pub contribution_points: f64,
    /// Natural-language explanation
    pub explanation: String,
    /// Personal baseline the value was compared against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    /// Threshold the value was compared against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Where the input came from
    pub sources: Vec<DataSource>,
}

impl ExplanationFactor {
    /// Points lost relative to a perfect factor score, weighted
    #[must_use]
    pub fn weighted_shortfall(&self) -> f64 {
        self.weight * (100.0 - self.factor_score)
    }
}

/// Any engine output wrapped with its itemized reasoning
///
/// Wrapping never changes `recommendation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainedRecommendation<T> {
    /// The underlying decision, unchanged
    pub recommendation: T,
    /// Explained score (0-100)
    pub score: f64,
    /// One-sentence summary
    pub summary: String,
    /// Itemized factors
    pub factors: Vec<ExplanationFactor>,
    /// Confidence in the explained decision (0-1)
    pub confidence: f64,
}

impl<T> ExplainedRecommendation<T> {
    /// Factors with positive impact
    #[must_use]
    pub fn positive_factors(&self) -> Vec<&ExplanationFactor> {
        self.factors_with(FactorImpact::Positive)
    }

    /// Factors with negative impact
    #[must_use]
    pub fn negative_factors(&self) -> Vec<&ExplanationFactor> {
        self.factors_with(FactorImpact::Negative)
    }

    /// Most negative contributor: the negative factor with the largest weighted shortfall
    #[must_use]
    pub fn limiting_factor(&self) -> Option<&ExplanationFactor> {
        self.negative_factors()
            .into_iter()
            .max_by(|a, b| a.weighted_shortfall().total_cmp(&b.weighted_shortfall()))
    }

    /// Sum of contribution points
    #[must_use]
    pub fn total_contribution(&self) -> f64 {
        self.factors.iter().map(|f| f.contribution_points).sum()
    }

    fn factors_with(&self, impact: FactorImpact) -> Vec<&ExplanationFactor> {
        self.factors.iter().filter(|f| f.impact == impact).collect()
    }
}
