// ABOUTME: Core types and constants for the Pacewise adaptive periodization engine
// ABOUTME: Foundation crate with error handling, training constants, and domain value objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacewise Core
//!
//! Foundation crate providing shared types and constants for the Pacewise training
//! periodization engine. Everything in here is a plain value object: the engine crate
//! computes new snapshots from them, it never mutates one in place.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Training-science constants (load windows, ACWR bands, readiness bands)
//! - **models**: Athlete context, race goals, plans, completions, deviations, adaptations,
//!   readiness predictions, and explanation payloads

/// Unified error handling system with standard error codes
pub mod errors;

/// Training-science constants organized by domain
pub mod constants;

/// Domain value objects shared by every engine component
pub mod models;
