// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric and stylistic validation of a built table.
//!
//! Expected quantities are re-derived from the input parameters, not read back
//! from the builder. All issues are collected; nothing here aborts.

use super::metrics::{LEG_TAPER_SIGNAL, SPLAY_SIGNAL_DEG, TOP_TAPER_SIGNAL};
use super::{TableAssembly, TableParameters};
use crate::scene::{ObjectId, SceneHost};
use crate::utils::approx_eq;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

/// Base tolerance for dimensions and positions
pub const DIMENSION_TOLERANCE: f64 = 1e-3;
/// Floor of the floor/underside contact tolerance
pub const MIN_TOUCH_TOLERANCE: f64 = 5e-3;
/// Empirical widening applied to the splay-induced corner excursion
pub const TOUCH_TOLERANCE_FACTOR: f64 = 1.2;

pub const LEG_RATIO_RANGE: (f64, f64) = (0.06, 0.16);
pub const INSET_RATIO_RANGE: (f64, f64) = (0.04, 0.20);

const EXPECTED_LEG_COUNT: usize = 4;

/// Contact tolerance for a splayed leg's world-space z extremes.
///
/// Heuristic: tilting a leg lifts or sinks the corners of its end faces by
/// roughly `leg_thickness * sin(splay)`. It ignores leg depth and biaxial
/// coupling, so it is not a geometric bound.
pub fn z_touch_tolerance(leg_thickness: f64, leg_splay_deg: f64) -> f64 {
    let corner_z_offset = leg_thickness * leg_splay_deg.abs().to_radians().sin();
    MIN_TOUCH_TOLERANCE.max(corner_z_offset * TOUCH_TOLERANCE_FACTOR)
}

/// Result of validating a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Pass,
    Fail(Vec<String>),
}

impl ValidationOutcome {
    pub fn from_issues(issues: Vec<String>) -> Self {
        if issues.is_empty() {
            Self::Pass
        } else {
            Self::Fail(issues)
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn issues(&self) -> &[String] {
        match self {
            Self::Pass => &[],
            Self::Fail(issues) => issues,
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail(_) => write!(f, "FAIL"),
        }
    }
}

fn xy_key(x: f64, y: f64) -> (i64, i64) {
    ((x * 1e4).round() as i64, (y * 1e4).round() as i64)
}

fn format_keys(keys: &BTreeSet<(i64, i64)>) -> String {
    let pairs: Vec<String> = keys
        .iter()
        .map(|(x, y)| format!("({:.4}, {:.4})", *x as f64 / 1e4, *y as f64 / 1e4))
        .collect();
    format!("[{}]", pairs.join(", "))
}

/// Check a built table against `params`; an empty list means it passed
pub fn validate_table<H: SceneHost>(
    host: &H,
    assembly: &TableAssembly,
    params: &TableParameters,
) -> Vec<String> {
    let mut issues = Vec::new();
    let close = |a: f64, b: f64| approx_eq(a, b, DIMENSION_TOLERANCE);

    if assembly.legs.len() != EXPECTED_LEG_COUNT {
        issues.push(format!(
            "Expected {} legs, got {}",
            EXPECTED_LEG_COUNT,
            assembly.legs.len()
        ));
    }

    check_table_top(host, assembly.table_top, params, &mut issues);

    let leg_height = params.table_height - params.top_thickness;
    let splay_cos = params.leg_splay_deg.to_radians().cos();
    let expected_leg_mesh_height = leg_height / (splay_cos * splay_cos).max(1e-5);
    let z_tolerance = z_touch_tolerance(params.leg_thickness, params.leg_splay_deg);
    debug!(expected_leg_mesh_height, z_tolerance, "derived leg expectations");

    let offset_x = params.top_width * 0.5 - params.inset - params.leg_thickness * 0.5;
    let offset_y = params.top_depth * 0.5 - params.inset - params.leg_thickness * 0.5;
    let expected_xy: BTreeSet<(i64, i64)> = [
        (offset_x, offset_y),
        (offset_x, -offset_y),
        (-offset_x, offset_y),
        (-offset_x, -offset_y),
    ]
    .iter()
    .map(|&(x, y)| xy_key(x, y))
    .collect();

    let mut actual_xy = BTreeSet::new();
    for &leg in &assembly.legs {
        let object = match host.object(leg) {
            Ok(object) => object,
            Err(err) => {
                issues.push(format!("Leg {} is missing from the scene: {}", leg, err));
                continue;
            }
        };
        let name = &object.name;

        let dims = object.dimensions();
        if !close(dims.x, params.leg_thickness) || !close(dims.y, params.leg_thickness) {
            issues.push(format!(
                "{} local XY mismatch: got ({}, {}), expected ({}, {})",
                name, dims.x, dims.y, params.leg_thickness, params.leg_thickness
            ));
        }
        if !close(dims.z, expected_leg_mesh_height) {
            issues.push(format!(
                "{} local Z mismatch: got {}, expected {}",
                name, dims.z, expected_leg_mesh_height
            ));
        }

        match host.world_bounding_box(leg) {
            Ok(bbox) => {
                if !approx_eq(bbox.min.z, 0.0, z_tolerance) {
                    issues.push(format!("{} does not touch ground: min_z={}", name, bbox.min.z));
                }
                if !approx_eq(bbox.max.z, leg_height, z_tolerance) {
                    issues.push(format!(
                        "{} does not touch tabletop underside: max_z={}, expected={}",
                        name, bbox.max.z, leg_height
                    ));
                }
            }
            Err(err) => issues.push(format!("{} world bounds unavailable: {}", name, err)),
        }

        if object.parent != Some(assembly.table_top) {
            issues.push(format!("{} is not parented to TableTop", name));
        }

        match host.world_location(leg) {
            Ok(location) => {
                actual_xy.insert(xy_key(location.x, location.y));
            }
            Err(err) => issues.push(format!("{} world location unavailable: {}", name, err)),
        }
    }

    if actual_xy != expected_xy {
        issues.push(format!(
            "Leg corner positions mismatch: got {}, expected {}",
            format_keys(&actual_xy),
            format_keys(&expected_xy)
        ));
    }

    check_style(params, &mut issues);

    if issues.is_empty() {
        debug!("table validation passed");
    } else {
        warn!(issues = issues.len(), "table validation failed");
    }
    issues
}

fn check_table_top<H: SceneHost>(
    host: &H,
    table_top: ObjectId,
    params: &TableParameters,
    issues: &mut Vec<String>,
) {
    let close = |a: f64, b: f64| approx_eq(a, b, DIMENSION_TOLERANCE);

    let object = match host.object(table_top) {
        Ok(object) => object,
        Err(err) => {
            issues.push(format!("TableTop is missing from the scene: {}", err));
            return;
        }
    };

    let dims = object.dimensions();
    if !close(dims.x, params.top_width) || !close(dims.y, params.top_depth) {
        issues.push(format!(
            "TableTop local XY mismatch: got ({}, {}), expected ({}, {})",
            dims.x, dims.y, params.top_width, params.top_depth
        ));
    }
    // Upward warp only ever grows the +z extent
    let expected_z = params.top_thickness + params.top_warp.max(0.0);
    if !close(dims.z, expected_z) {
        issues.push(format!(
            "TableTop local Z mismatch: got {}, expected {}",
            dims.z, expected_z
        ));
    }

    let expected_top_z = params.table_height - params.top_thickness / 2.0;
    match host.world_location(table_top) {
        Ok(location) if !close(location.z, expected_top_z) => issues.push(format!(
            "TableTop z mismatch: got {}, expected {}",
            location.z, expected_top_z
        )),
        Ok(_) => {}
        Err(err) => issues.push(format!("TableTop world location unavailable: {}", err)),
    }
}

fn check_style(params: &TableParameters, issues: &mut Vec<String>) {
    let reference_size = params.top_width.min(params.top_depth);
    let leg_ratio = params.leg_thickness / reference_size;
    let inset_ratio = params.inset / reference_size;

    let (leg_min, leg_max) = LEG_RATIO_RANGE;
    if !(leg_min..=leg_max).contains(&leg_ratio) {
        issues.push(format!(
            "Readability ratio leg_thickness/min(top_width,top_depth) out of range: {:.4} (expected {}..{})",
            leg_ratio, leg_min, leg_max
        ));
    }
    let (inset_min, inset_max) = INSET_RATIO_RANGE;
    if !(inset_min..=inset_max).contains(&inset_ratio) {
        issues.push(format!(
            "Readability ratio inset/min(top_width,top_depth) out of range: {:.4} (expected {:.2}..{:.2})",
            inset_ratio, inset_min, inset_max
        ));
    }
    if params.leg_splay_deg < SPLAY_SIGNAL_DEG {
        issues.push(format!(
            "Non-boxy rule failed: leg_splay_deg={:?} (expected >= {:.1})",
            params.leg_splay_deg, SPLAY_SIGNAL_DEG
        ));
    }
    if params.top_taper > TOP_TAPER_SIGNAL
        && params.leg_taper > LEG_TAPER_SIGNAL
        && params.top_warp.abs() <= 1e-9
    {
        issues.push(
            "Non-boxy rule failed: no taper/warp signal (top_taper too high, leg_taper too high, top_warp=0)"
                .to_string(),
        );
    }
}
