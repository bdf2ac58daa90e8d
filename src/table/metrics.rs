// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Dimensionless style metrics

use super::TableParameters;
use crate::utils::round4;
use serde::{Deserialize, Serialize};

/// Splay at or above this many degrees counts as a non-boxy feature
pub const SPLAY_SIGNAL_DEG: f64 = 3.0;
/// Tabletop taper at or below this ratio counts as a non-boxy feature
pub const TOP_TAPER_SIGNAL: f64 = 0.95;
/// Leg taper at or below this ratio counts as a non-boxy feature
pub const LEG_TAPER_SIGNAL: f64 = 0.9;

/// Ratios describing how readable and how "non-boxy" a table is.
/// All values are rounded to 4 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleMetrics {
    pub top_width: f64,
    pub top_depth: f64,
    pub top_aspect_ratio: f64,
    pub leg_thickness_ratio: f64,
    pub inset_ratio: f64,
    pub non_boxy_feature_count: u32,
    pub non_boxy_score: f64,
}

impl StyleMetrics {
    pub fn from_parameters(params: &TableParameters) -> Self {
        let reference_size = params.top_width.min(params.top_depth);
        let features = [
            params.leg_splay_deg >= SPLAY_SIGNAL_DEG,
            params.top_taper <= TOP_TAPER_SIGNAL,
            params.leg_taper <= LEG_TAPER_SIGNAL,
            params.top_warp.abs() > 0.0,
        ];
        let count = features.iter().filter(|&&active| active).count() as u32;

        Self {
            top_width: round4(params.top_width),
            top_depth: round4(params.top_depth),
            top_aspect_ratio: round4(params.top_width / params.top_depth.max(1e-8)),
            leg_thickness_ratio: round4(params.leg_thickness / reference_size),
            inset_ratio: round4(params.inset / reference_size),
            non_boxy_feature_count: count,
            non_boxy_score: round4(count as f64 / features.len() as f64),
        }
    }
}
