// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene objects: an owned mesh buffer plus transform, parent link and modifiers

use crate::geometry::{Mesh, Transform};
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to an object inside a scene host.
///
/// A host may recycle the slot of a removed object; the generation tells the
/// new occupant apart from the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId {
    index: usize,
    generation: u32,
}

impl ObjectId {
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Non-destructive surface effects attached to an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    /// Edge rounding; cosmetic only, never baked into the validated mesh
    Bevel {
        width: f64,
        segments: u32,
        /// Only edges sharper than this angle (radians) are rounded
        angle_limit: f64,
    },
}

/// A named mesh object with its own vertex buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshObject {
    pub name: String,
    pub collection: String,
    pub mesh: Mesh,
    pub transform: Transform,
    pub parent: Option<ObjectId>,
    /// Correction between the parent's world matrix and this object's local
    /// transform, fixed at parenting time so the world transform is kept
    pub parent_inverse: Matrix4<f64>,
    pub modifiers: Vec<Modifier>,
}

impl MeshObject {
    pub fn new(name: impl Into<String>, collection: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            collection: collection.into(),
            mesh,
            transform: Transform::identity(),
            parent: None,
            parent_inverse: Matrix4::identity(),
            modifiers: Vec::new(),
        }
    }

    pub fn local_matrix(&self) -> Matrix4<f64> {
        self.transform.to_matrix()
    }

    /// Bake the object scale into vertex coordinates and reset scale to 1
    pub fn apply_scale(&mut self) {
        let scale = self.transform.scale;
        self.mesh.scale(&scale);
        self.transform.scale = Vector3::new(1.0, 1.0, 1.0);
    }

    /// Object-space size of the mesh, including any unapplied scale
    pub fn dimensions(&self) -> Vector3<f64> {
        self.mesh.dimensions().component_mul(&self.transform.scale).abs()
    }

    pub fn polygon_count(&self) -> usize {
        self.mesh.polygon_count()
    }
}
