// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon mesh representation and utilities

use super::BoundingBox;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Planar polygon defined by vertex indices in counter-clockwise order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub indices: Vec<usize>,
    /// Smooth shading flag; `false` keeps a single flat normal for the face
    pub use_smooth: bool,
}

impl Polygon {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            use_smooth: false,
        }
    }
}

/// Polygon mesh with shared vertex positions in object-local coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub fn with_capacity(vertex_count: usize, polygon_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            polygons: Vec::with_capacity(polygon_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    /// Add a polygon
    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Local extents along each axis
    pub fn dimensions(&self) -> Vector3<f64> {
        self.bounding_box().size()
    }

    /// Transform all vertices by a matrix
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point(vertex);
        }
    }

    /// Scale vertex coordinates per axis about the local origin
    pub fn scale(&mut self, factors: &Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.coords.component_mul_assign(factors);
        }
    }

    /// Mark every face flat-shaded
    pub fn set_flat_shading(&mut self) {
        for polygon in &mut self.polygons {
            polygon.use_smooth = false;
        }
    }

    pub fn is_flat_shaded(&self) -> bool {
        self.polygons.iter().all(|polygon| !polygon.use_smooth)
    }

    /// Face normal via Newell's method, robust for slightly non-planar quads
    pub fn polygon_normal(&self, polygon: &Polygon) -> Vector3<f64> {
        let mut normal = Vector3::zeros();
        let count = polygon.indices.len();
        for i in 0..count {
            let current = &self.vertices[polygon.indices[i]];
            let next = &self.vertices[polygon.indices[(i + 1) % count]];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.try_normalize(1e-12).unwrap_or_else(Vector3::z)
    }
}
