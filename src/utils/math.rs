// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// Check if two floats are within `tolerance` of each other (inclusive)
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Linear interpolation
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Round to a fixed number of decimal places, normalizing negative zero
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor + 0.0
}

/// Round to the 4 decimals used throughout reports and metrics
pub fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

/// Round each component of a vector to 4 decimals
pub fn round4_array(values: [f64; 3]) -> [f64; 3] {
    values.map(round4)
}
