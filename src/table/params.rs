// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Table dimensions and styling parameters with pre-flight checks

use super::ParameterError;
use serde::{Deserialize, Serialize};

pub const MIN_TAPER: f64 = 0.6;
pub const MAX_TAPER: f64 = 1.0;
pub const MAX_SPLAY_DEG: f64 = 20.0;
/// |top_warp| may not exceed this fraction of top_thickness
pub const MAX_WARP_FRACTION: f64 = 0.45;

/// Everything needed to build one table. Lengths are in scene units, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableParameters {
    pub top_width: f64,
    pub top_depth: f64,
    pub top_thickness: f64,
    pub table_height: f64,
    pub leg_thickness: f64,
    /// Distance from each leg's outer edge to the tabletop edge
    pub inset: f64,
    /// Underside scale of the tabletop relative to its visible top
    pub top_taper: f64,
    /// Scale of the leg's upper end relative to its foot
    pub leg_taper: f64,
    pub leg_splay_deg: f64,
    pub top_warp: f64,
    pub bevel: bool,
    pub bevel_width: f64,
    pub bevel_segments: u32,
}

impl Default for TableParameters {
    fn default() -> Self {
        Self {
            top_width: 1.2,
            top_depth: 1.2,
            top_thickness: 0.08,
            table_height: 0.75,
            leg_thickness: 0.10,
            inset: 0.08,
            top_taper: 0.90,
            leg_taper: 0.82,
            leg_splay_deg: 5.0,
            top_warp: 0.008,
            bevel: false,
            bevel_width: 0.01,
            bevel_segments: 1,
        }
    }
}

impl TableParameters {
    /// Largest inset that still keeps the legs under the tabletop
    pub fn max_inset(&self) -> f64 {
        (self.top_width.min(self.top_depth) - self.leg_thickness) / 2.0
    }

    /// Reject parameter sets that cannot produce a well-formed table.
    ///
    /// Checks run in a fixed order and the first violation is returned.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let scalars = [
            ("top_width", self.top_width),
            ("top_depth", self.top_depth),
            ("top_thickness", self.top_thickness),
            ("table_height", self.table_height),
            ("leg_thickness", self.leg_thickness),
            ("inset", self.inset),
            ("top_taper", self.top_taper),
            ("leg_taper", self.leg_taper),
            ("leg_splay_deg", self.leg_splay_deg),
            ("top_warp", self.top_warp),
            ("bevel_width", self.bevel_width),
        ];
        if let Some(&(field, _)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParameterError::NonFinite { field });
        }

        let mut lengths = vec![
            ("top_width", self.top_width),
            ("top_depth", self.top_depth),
            ("top_thickness", self.top_thickness),
            ("table_height", self.table_height),
            ("leg_thickness", self.leg_thickness),
        ];
        if self.bevel {
            lengths.push(("bevel_width", self.bevel_width));
        }
        if let Some(&(field, value)) = lengths.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ParameterError::NonPositiveLength { field, value });
        }

        if self.table_height <= self.top_thickness {
            return Err(ParameterError::HeightNotAboveTop {
                table_height: self.table_height,
                top_thickness: self.top_thickness,
            });
        }
        if self.inset < 0.0 {
            return Err(ParameterError::NegativeInset { inset: self.inset });
        }
        for (field, value) in [("top_taper", self.top_taper), ("leg_taper", self.leg_taper)] {
            if !(MIN_TAPER..=MAX_TAPER).contains(&value) {
                return Err(ParameterError::TaperOutOfRange { field, value });
            }
        }
        if !(0.0..=MAX_SPLAY_DEG).contains(&self.leg_splay_deg) {
            return Err(ParameterError::SplayOutOfRange {
                value: self.leg_splay_deg,
            });
        }
        let warp_limit = self.top_thickness * MAX_WARP_FRACTION;
        if self.top_warp.abs() > warp_limit {
            return Err(ParameterError::WarpTooLarge {
                warp: self.top_warp,
                limit: warp_limit,
            });
        }

        let max_inset = self.max_inset();
        if max_inset <= 0.0 {
            return Err(ParameterError::LegsWiderThanTop { max_inset });
        }
        if self.inset > max_inset {
            return Err(ParameterError::InsetTooLarge {
                inset: self.inset,
                max_inset,
            });
        }

        Ok(())
    }
}
