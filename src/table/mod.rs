// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Low-poly table generation and validation

mod builder;
mod error;
mod metrics;
mod params;
mod report;
mod validator;

pub use builder::{
    create_low_poly_table, leg_anchors, leg_height, leg_mesh_height, leg_name, splay_rotation,
    TableAssembly, TableBuilder, BEVEL_ANGLE_LIMIT, COLLECTION_NAME, TABLE_TOP_NAME,
    TEMPLATE_LEG_NAME,
};
pub use error::{BuildError, ParameterError};
pub use metrics::{StyleMetrics, LEG_TAPER_SIGNAL, SPLAY_SIGNAL_DEG, TOP_TAPER_SIGNAL};
pub use params::{TableParameters, MAX_SPLAY_DEG, MAX_TAPER, MAX_WARP_FRACTION, MIN_TAPER};
pub use report::{LegReport, TableReport, TableTopReport};
pub use validator::{
    validate_table, z_touch_tolerance, ValidationOutcome, DIMENSION_TOLERANCE, INSET_RATIO_RANGE,
    LEG_RATIO_RANGE, MIN_TOUCH_TOLERANCE,
};
