// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for table generation

use crate::scene::SceneError;
use thiserror::Error;

/// Input parameters rejected before any geometry exists
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be greater than 0, got {value}")]
    NonPositiveLength { field: &'static str, value: f64 },

    #[error("table_height must be greater than top_thickness (table_height={table_height}, top_thickness={top_thickness})")]
    HeightNotAboveTop { table_height: f64, top_thickness: f64 },

    #[error("inset must be >= 0, got {inset}")]
    NegativeInset { inset: f64 },

    #[error("{field} must be in range [0.6, 1.0], got {value}")]
    TaperOutOfRange { field: &'static str, value: f64 },

    #[error("leg_splay_deg must be in range [0.0, 20.0], got {value}")]
    SplayOutOfRange { value: f64 },

    #[error("top_warp is too large for the given top_thickness; max |top_warp| is {limit:.4}, got {warp}")]
    WarpTooLarge { warp: f64, limit: f64 },

    #[error("top_width/top_depth must be greater than leg_thickness; max inset is {max_inset:.4}")]
    LegsWiderThanTop { max_inset: f64 },

    #[error("inset is too large for given dimensions; max inset is {max_inset:.4}")]
    InsetTooLarge { inset: f64, max_inset: f64 },
}

/// Failure while building a table assembly
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("invalid table parameters: {0}")]
    Parameters(#[from] ParameterError),

    #[error("scene host error: {0}")]
    Scene(#[from] SceneError),
}
