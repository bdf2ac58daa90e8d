// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Object transforms (location, XYZ Euler rotation, scale)

use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Local transform of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vector3<f64>,
    /// XYZ Euler angles in radians
    pub rotation_euler: Vector3<f64>,
    pub scale: Vector3<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            location: Vector3::zeros(),
            rotation_euler: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Rotation applied about X, then Y, then Z
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        let angles = self.rotation_euler;
        let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x);
        let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y);
        let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z);
        rz * ry * rx
    }

    /// Translation * Rotation * Scale
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.location)
            * self.rotation().to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    pub fn rotation_degrees(&self) -> Vector3<f64> {
        self.rotation_euler.map(f64::to_degrees)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Translation column of an affine matrix
pub fn matrix_translation(matrix: &Matrix4<f64>) -> Vector3<f64> {
    matrix.fixed_view::<3, 1>(0, 3).into_owned()
}
