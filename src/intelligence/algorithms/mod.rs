// ABOUTME: Sports-science algorithms used by the engine
// ABOUTME: Currently VDOT estimation and VDOT-derived training paces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// VDOT estimation and training paces
pub mod vdot;

pub use vdot::{training_paces, VdotAlgorithm};
