// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! The capabilities a 3D scene host must provide to the table builder

use super::{MeshObject, Modifier, ObjectId, SceneError, SceneResult};
use crate::geometry::{matrix_translation, BoundingBox};
use nalgebra::{Matrix4, Vector3};

/// Scene-graph operations consumed by the builder and validator.
///
/// Implementors own the object table. Handles stay valid until the object is
/// removed; stale handles yield [`SceneError::UnknownObject`], even when the
/// host has since reused the storage.
pub trait SceneHost {
    /// Remove every object in `collection`, returning how many were removed
    fn clear_collection(&mut self, collection: &str) -> usize;

    /// Create a unit cuboid at `location`, scaled per axis to `dimensions`
    fn create_cuboid(
        &mut self,
        name: &str,
        location: Vector3<f64>,
        dimensions: Vector3<f64>,
        collection: &str,
    ) -> ObjectId;

    /// Copy an object, including an independent copy of its vertex buffer
    fn duplicate(&mut self, id: ObjectId, name: &str) -> SceneResult<ObjectId>;

    fn remove(&mut self, id: ObjectId) -> SceneResult<MeshObject>;

    fn object(&self, id: ObjectId) -> SceneResult<&MeshObject>;

    fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut MeshObject>;

    /// Parent `child` to `parent` without changing the child's world transform
    fn set_parent_keep_world(&mut self, child: ObjectId, parent: ObjectId) -> SceneResult<()>;

    fn world_matrix(&self, id: ObjectId) -> SceneResult<Matrix4<f64>>;

    /// Live objects of a collection
    fn objects_in_collection(&self, collection: &str) -> Vec<ObjectId>;

    fn apply_scale(&mut self, id: ObjectId) -> SceneResult<()> {
        self.object_mut(id)?.apply_scale();
        Ok(())
    }

    fn set_location(&mut self, id: ObjectId, location: Vector3<f64>) -> SceneResult<()> {
        self.object_mut(id)?.transform.location = location;
        Ok(())
    }

    fn set_rotation_euler(&mut self, id: ObjectId, rotation: Vector3<f64>) -> SceneResult<()> {
        self.object_mut(id)?.transform.rotation_euler = rotation;
        Ok(())
    }

    fn set_flat_shading(&mut self, id: ObjectId) -> SceneResult<()> {
        self.object_mut(id)?.mesh.set_flat_shading();
        Ok(())
    }

    fn add_bevel(&mut self, id: ObjectId, width: f64, segments: u32, angle_limit: f64) -> SceneResult<()> {
        self.object_mut(id)?.modifiers.push(Modifier::Bevel {
            width,
            segments: segments.max(1),
            angle_limit,
        });
        Ok(())
    }

    fn world_location(&self, id: ObjectId) -> SceneResult<Vector3<f64>> {
        Ok(matrix_translation(&self.world_matrix(id)?))
    }

    /// Local mesh bounds, before any object transform
    fn local_bounding_box(&self, id: ObjectId) -> SceneResult<BoundingBox> {
        let object = self.object(id)?;
        if object.mesh.is_empty() {
            return Err(SceneError::EmptyMesh {
                name: object.name.clone(),
            });
        }
        Ok(object.mesh.bounding_box())
    }

    /// World-space box around the 8 transformed corners of the local bounds
    fn world_bounding_box(&self, id: ObjectId) -> SceneResult<BoundingBox> {
        let local = self.local_bounding_box(id)?;
        Ok(local.transformed(&self.world_matrix(id)?))
    }
}
