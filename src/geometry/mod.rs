// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, shaping operators and transforms

mod bbox;
mod mesh;
pub mod primitives;
mod transform;

pub use bbox::BoundingBox;
pub use mesh::{Mesh, Polygon};
pub use primitives::{cuboid_mesh, taper_z, unit_cuboid_mesh, warp_top};
pub use transform::{matrix_translation, Transform};
