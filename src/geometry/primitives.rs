// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cuboid generator and per-vertex shaping operators

use super::{Mesh, Polygon};
use crate::utils::lerp;
use nalgebra::{Point3, Vector3};

/// Guard against zero-height meshes when normalizing heights
pub const TAPER_SPAN_EPSILON: f64 = 1e-8;
/// Warp strengths at or below this magnitude leave the mesh untouched
pub const WARP_STRENGTH_EPSILON: f64 = 1e-9;
/// Vertices within this distance of the maximum z belong to the top face
pub const TOP_FACE_EPSILON: f64 = 1e-6;

/// Centered cuboid with 8 shared vertices and 6 flat quad faces
pub fn cuboid_mesh(dimensions: Vector3<f64>) -> Mesh {
    let half = dimensions / 2.0;
    let mut mesh = Mesh::with_capacity(8, 6);

    // Bottom ring then top ring, counter-clockwise seen from +z
    for z in [-half.z, half.z] {
        mesh.add_vertex(Point3::new(-half.x, -half.y, z));
        mesh.add_vertex(Point3::new(half.x, -half.y, z));
        mesh.add_vertex(Point3::new(half.x, half.y, z));
        mesh.add_vertex(Point3::new(-half.x, half.y, z));
    }

    let faces = [
        [0, 3, 2, 1], // bottom (z-)
        [4, 5, 6, 7], // top (z+)
        [0, 1, 5, 4], // front (y-)
        [2, 3, 7, 6], // back (y+)
        [1, 2, 6, 5], // right (x+)
        [3, 0, 4, 7], // left (x-)
    ];
    for face in faces {
        mesh.add_polygon(Polygon::new(face.to_vec()));
    }

    mesh
}

/// Unit cuboid (`size = 1`) the scene host scales into shape
pub fn unit_cuboid_mesh() -> Mesh {
    cuboid_mesh(Vector3::new(1.0, 1.0, 1.0))
}

/// Scale each vertex's x/y by a factor interpolated along local z,
/// from `bottom_scale` at the lowest vertex to `top_scale` at the highest.
pub fn taper_z(mesh: &mut Mesh, bottom_scale: f64, top_scale: f64) {
    let bbox = mesh.bounding_box();
    if bbox.is_empty() {
        return;
    }
    let z_min = bbox.min.z;
    let span = (bbox.max.z - z_min).max(TAPER_SPAN_EPSILON);

    for vertex in &mut mesh.vertices {
        let t = (vertex.z - z_min) / span;
        let s = lerp(bottom_scale, top_scale, t);
        vertex.x *= s;
        vertex.y *= s;
    }
}

/// Push alternating diagonal corners of the top face up and down by `strength`.
///
/// Vertices with `x * y >= 0` rise, the others sink, which turns a flat top into a
/// shallow saddle while leaving the bottom face untouched.
pub fn warp_top(mesh: &mut Mesh, strength: f64) {
    if strength.abs() <= WARP_STRENGTH_EPSILON || mesh.is_empty() {
        return;
    }

    let z_max = mesh.bounding_box().max.z;
    for vertex in &mut mesh.vertices {
        if (vertex.z - z_max).abs() <= TOP_FACE_EPSILON {
            let sign = if vertex.x * vertex.y >= 0.0 { 1.0 } else { -1.0 };
            vertex.z += sign * strength;
        }
    }
}
