// ABOUTME: Logging configuration and structured event helpers for the periodization engine
// ABOUTME: Installs a tracing subscriber and emits canonical plan, adaptation, and readiness events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging for hosts embedding the engine
//!
//! The engine itself only emits `tracing` events; installing a subscriber is the host's
//! choice. [`LoggingConfig::init`] is provided for hosts that have no subscriber of their own.

use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::{info, warn, Level};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Default service name reported in startup events
pub const SERVICE_NAME: &str = "pacewise";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span information for tracing
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // In production, use more detailed logging
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Build the filter applied to the subscriber
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        env::var("RUST_LOG")
            .map_or_else(|_| EnvFilter::new(&self.level), EnvFilter::new)
            .add_directive(
                format!("pacewise={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| Level::INFO.into()),
            )
            .add_directive(
                format!("pacewise_core={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| Level::INFO.into()),
            )
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events())
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events());

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Pacewise engine logging initialized"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!("Configuration loaded: {}", config_summary);
    }
}

/// Initialize logging with default configuration
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Canonical structured events emitted by engine components
pub struct EngineLogger;

impl EngineLogger {
    /// Log a generated plan
    pub fn log_plan_generated(
        plan_id: &str,
        athlete_id: &str,
        weeks: u32,
        periodization: &str,
        peak_week: u32,
    ) {
        info!(
            plan.id = %plan_id,
            athlete.id = %athlete_id,
            plan.weeks = weeks,
            plan.periodization = %periodization,
            plan.peak_week = peak_week,
            "Training plan generated"
        );
    }

    /// Log an applied adaptation
    pub fn log_adaptation_applied(
        plan_id: &str,
        trigger: &str,
        volume_multiplier: f64,
        affected_weeks: &[u32],
        revision: u32,
    ) {
        info!(
            plan.id = %plan_id,
            adaptation.trigger = %trigger,
            adaptation.volume_multiplier = volume_multiplier,
            adaptation.affected_weeks = ?affected_weeks,
            plan.revision = revision,
            "Adaptation applied"
        );
    }

    /// Log a deviation scan
    pub fn log_deviations_detected(plan_id: &str, athlete_id: &str, count: usize) {
        info!(
            plan.id = %plan_id,
            athlete.id = %athlete_id,
            deviation.count = count,
            "Plan deviations detected"
        );
    }

    /// Log a readiness prediction
    pub fn log_readiness_predicted(
        athlete_id: &str,
        fatigue_score: f64,
        fatigue_level: &str,
        confidence: f64,
    ) {
        info!(
            athlete.id = %athlete_id,
            readiness.fatigue_score = fatigue_score,
            readiness.fatigue_level = %fatigue_level,
            readiness.confidence = confidence,
            "Readiness predicted"
        );
    }

    /// Log a result produced from degraded inputs
    pub fn log_degraded_confidence(component: &str, reason: &str, confidence: f64) {
        warn!(
            engine.component = %component,
            degraded.reason = %reason,
            degraded.confidence = confidence,
            "Result computed with reduced confidence"
        );
    }
}
