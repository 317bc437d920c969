// ABOUTME: Unified error handling for the periodization engine with typed error codes
// ABOUTME: Validation, infeasibility, and idempotence failures are reported as AppError values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible engine operation returns [`AppResult`]. Nothing in the engine is fatal to the
//! hosting process: malformed inputs, infeasible constraints, and re-applied adaptations all
//! surface as an [`AppError`] carrying a closed [`ErrorCode`].
//!
//! Insufficient data (missing baselines, absent wellness signals) is deliberately *not* an
//! error. Components degrade to a lower-confidence result instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Generic invalid input
    InvalidInput = 3000,
    /// A required field was not supplied
    MissingRequiredField = 3001,
    /// A string could not be parsed (time strings, distances)
    InvalidFormat = 3002,
    /// A numeric value is outside its accepted range
    ValueOutOfRange = 3003,
    /// Plan constraints cannot all be satisfied at once
    InfeasibleConstraints = 3004,

    // Resource state (4000-4999)
    /// A referenced week, session, or athlete does not exist
    ResourceNotFound = 4000,
    /// An adaptation recommendation was already applied
    AlreadyApplied = 4001,
    /// An adaptation targeted a week that has already elapsed
    ElapsedWeekImmutable = 4002,

    // Configuration (6000-6999)
    /// Configuration could not be loaded
    ConfigError = 6000,
    /// Configuration failed validation
    ConfigInvalid = 6002,

    // Internal (9000-9999)
    /// Serialization or deserialization failure
    SerializationError = 9003,
    /// Unexpected internal failure
    InternalError = 9000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InfeasibleConstraints => "The plan constraints cannot be satisfied together",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::AlreadyApplied => "The adaptation has already been applied",
            Self::ElapsedWeekImmutable => "Elapsed training weeks cannot be modified",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether the error was caused by caller input rather than engine state
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MissingRequiredField
                | Self::InvalidFormat
                | Self::ValueOutOfRange
                | Self::InfeasibleConstraints
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Identifier of the plan, week, session, or recommendation involved
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            resource_id: None,
            details: Value::Object(Map::new()),
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.context.details = details;
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Malformed string input
    #[must_use]
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Numeric value outside its accepted range
    #[must_use]
    pub fn value_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Mutually infeasible plan constraints
    #[must_use]
    pub fn infeasible_constraints(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InfeasibleConstraints, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Adaptation recommendation already applied
    #[must_use]
    pub fn already_applied(recommendation_id: impl Into<String>) -> Self {
        let id = recommendation_id.into();
        Self::new(
            ErrorCode::AlreadyApplied,
            format!("Adaptation {id} has already been applied"),
        )
        .with_resource_id(id)
    }

    /// Adaptation targeting a week that is already in the past
    #[must_use]
    pub fn elapsed_week(week_number: u32) -> Self {
        Self::new(
            ErrorCode::ElapsedWeekImmutable,
            format!("Week {week_number} has already elapsed and cannot be modified"),
        )
        .with_resource_id(format!("week-{week_number}"))
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_applied_carries_resource_id() {
        let error = AppError::already_applied("rec-1");
        assert_eq!(error.code, ErrorCode::AlreadyApplied);
        assert_eq!(error.context.resource_id.as_deref(), Some("rec-1"));
        assert!(error.to_string().contains("already been applied"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InfeasibleConstraints).unwrap();
        assert_eq!(json, "\"INFEASIBLE_CONSTRAINTS\"");
    }

    #[test]
    fn test_validation_classification() {
        assert!(ErrorCode::InvalidFormat.is_validation());
        assert!(ErrorCode::InfeasibleConstraints.is_validation());
        assert!(!ErrorCode::AlreadyApplied.is_validation());
    }
}
