// ABOUTME: Configuration error types for engine configuration validation
// ABOUTME: Defines error variants for invalid ranges, weights, and environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for engine configuration validation.

use pacewise_core::errors::{AppError, ErrorCode};
use std::env;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Thresholds out of order (e.g., caution band above danger band)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Required configuration field is missing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse an override value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Weights don't sum to the required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::EnvVar(_) | ConfigError::Parse(_) | ConfigError::MissingField(_) => {
                ErrorCode::ConfigError
            }
            ConfigError::InvalidRange(_)
            | ConfigError::InvalidWeights(_)
            | ConfigError::ValueOutOfRange(_) => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string())
    }
}
