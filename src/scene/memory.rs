// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-memory scene host backed by a generational object arena

use super::{MeshObject, ObjectId, SceneError, SceneHost, SceneResult};
use crate::geometry::unit_cuboid_mesh;
use nalgebra::{Matrix4, Vector3};
use tracing::debug;

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    object: Option<MeshObject>,
}

/// Arena of mesh objects.
///
/// Freed slots are recycled under a bumped generation, so a rebuilt table
/// reuses the storage of the previous one while old handles keep failing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScene {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects across all collections
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.object.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots, live or free
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.live()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    fn live(&self) -> impl Iterator<Item = (ObjectId, &MeshObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object
                .as_ref()
                .map(|object| (ObjectId::new(index, slot.generation), object))
        })
    }

    fn insert(&mut self, object: MeshObject) -> ObjectId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.object = Some(object);
                ObjectId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    object: Some(object),
                });
                ObjectId::new(self.slots.len() - 1, 0)
            }
        }
    }

    fn is_ancestor(&self, candidate: ObjectId, of: ObjectId) -> bool {
        let mut current = self.object(of).ok().and_then(|object| object.parent);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.object(id).ok().and_then(|object| object.parent);
        }
        false
    }

    /// Matrix mapping the object's local space into its parent's frame
    fn parent_chain(&self, object: &MeshObject) -> SceneResult<Matrix4<f64>> {
        match object.parent {
            Some(parent) => Ok(self.world_matrix(parent)? * object.parent_inverse),
            None => Ok(object.parent_inverse),
        }
    }

    fn detach_children_of(&mut self, parent: ObjectId) -> SceneResult<()> {
        let children: Vec<ObjectId> = self
            .live()
            .filter(|(_, object)| object.parent == Some(parent))
            .map(|(id, _)| id)
            .collect();

        // Bake the parent chain into the child so it stays where it was
        for child in children {
            let chain = self.parent_chain(self.object(child)?)?;
            let object = self.object_mut(child)?;
            object.parent = None;
            object.parent_inverse = chain;
        }
        Ok(())
    }
}

impl SceneHost for InMemoryScene {
    fn clear_collection(&mut self, collection: &str) -> usize {
        let doomed = self.objects_in_collection(collection);
        let mut removed = 0;
        for id in doomed {
            if self.remove(id).is_ok() {
                removed += 1;
            }
        }
        debug!(collection, removed, free_slots = self.free.len(), "cleared collection");
        removed
    }

    fn create_cuboid(
        &mut self,
        name: &str,
        location: Vector3<f64>,
        dimensions: Vector3<f64>,
        collection: &str,
    ) -> ObjectId {
        let mut object = MeshObject::new(name, collection, unit_cuboid_mesh());
        object.transform.location = location;
        object.transform.scale = dimensions;
        self.insert(object)
    }

    fn duplicate(&mut self, id: ObjectId, name: &str) -> SceneResult<ObjectId> {
        let mut copy = self.object(id)?.clone();
        copy.name = name.to_string();
        Ok(self.insert(copy))
    }

    fn remove(&mut self, id: ObjectId) -> SceneResult<MeshObject> {
        self.object(id)?;
        self.detach_children_of(id)?;
        let slot = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .ok_or(SceneError::UnknownObject { id })?;
        let object = slot.object.take().ok_or(SceneError::UnknownObject { id })?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        Ok(object)
    }

    fn object(&self, id: ObjectId) -> SceneResult<&MeshObject> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.object.as_ref())
            .ok_or(SceneError::UnknownObject { id })
    }

    fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut MeshObject> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.object.as_mut())
            .ok_or(SceneError::UnknownObject { id })
    }

    fn set_parent_keep_world(&mut self, child: ObjectId, parent: ObjectId) -> SceneResult<()> {
        let child_object = self.object(child)?;
        let parent_object = self.object(parent)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::ParentCycle {
                child: child_object.name.clone(),
                parent: parent_object.name.clone(),
            });
        }

        // world = parent_world * parent_inverse * local must equal chain * local
        let chain = self.parent_chain(child_object)?;
        let parent_world = self.world_matrix(parent)?;
        let parent_world_inverse = parent_world
            .try_inverse()
            .ok_or_else(|| SceneError::SingularTransform {
                name: parent_object.name.clone(),
            })?;

        let object = self.object_mut(child)?;
        object.parent = Some(parent);
        object.parent_inverse = parent_world_inverse * chain;
        Ok(())
    }

    fn world_matrix(&self, id: ObjectId) -> SceneResult<Matrix4<f64>> {
        let object = self.object(id)?;
        Ok(self.parent_chain(object)? * object.local_matrix())
    }

    fn objects_in_collection(&self, collection: &str) -> Vec<ObjectId> {
        self.live()
            .filter(|(_, object)| object.collection == collection)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene_with_box(name: &str, location: Vector3<f64>) -> (InMemoryScene, ObjectId) {
        let mut scene = InMemoryScene::new();
        let id = scene.create_cuboid(name, location, Vector3::new(1.0, 1.0, 1.0), "Test");
        (scene, id)
    }

    #[test]
    fn test_create_cuboid_starts_as_scaled_unit_cube() {
        let mut scene = InMemoryScene::new();
        let id = scene.create_cuboid("Top", Vector3::new(0.0, 0.0, 0.71), Vector3::new(1.2, 1.2, 0.08), "Test");
        let object = scene.object(id).unwrap();

        assert_eq!(object.mesh.vertex_count(), 8);
        assert_relative_eq!(object.mesh.dimensions(), Vector3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(object.dimensions(), Vector3::new(1.2, 1.2, 0.08));

        scene.apply_scale(id).unwrap();
        let object = scene.object(id).unwrap();
        assert_relative_eq!(object.mesh.dimensions(), Vector3::new(1.2, 1.2, 0.08), epsilon = 1e-12);
    }

    #[test]
    fn test_duplicate_owns_its_vertex_buffer() {
        let (mut scene, original) = scene_with_box("Leg", Vector3::zeros());
        let copy = scene.duplicate(original, "Leg.001").unwrap();

        scene.object_mut(copy).unwrap().mesh.vertices[0].x = 42.0;

        assert_ne!(scene.object(original).unwrap().mesh.vertices[0].x, 42.0);
        assert_eq!(scene.object(copy).unwrap().name, "Leg.001");
    }

    #[test]
    fn test_reparent_preserves_world_transform() {
        let mut scene = InMemoryScene::new();
        let parent = scene.create_cuboid("Top", Vector3::new(0.0, 0.0, 0.71), Vector3::new(1.0, 1.0, 1.0), "Test");
        scene.set_rotation_euler(parent, Vector3::new(0.0, 0.0, 0.3)).unwrap();
        let child = scene.create_cuboid("Leg", Vector3::new(0.42, -0.42, 0.335), Vector3::new(1.0, 1.0, 1.0), "Test");
        scene.set_rotation_euler(child, Vector3::new(-0.08, 0.08, 0.0)).unwrap();

        let before = scene.world_matrix(child).unwrap();
        scene.set_parent_keep_world(child, parent).unwrap();
        let after = scene.world_matrix(child).unwrap();

        assert_relative_eq!(before, after, epsilon = 1e-12);
        assert_eq!(scene.object(child).unwrap().parent, Some(parent));
        // the local transform itself is untouched
        assert_relative_eq!(
            scene.object(child).unwrap().transform.location,
            Vector3::new(0.42, -0.42, 0.335)
        );
    }

    #[test]
    fn test_reparent_rejects_cycles() {
        let mut scene = InMemoryScene::new();
        let a = scene.create_cuboid("A", Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), "Test");
        let b = scene.create_cuboid("B", Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), "Test");
        scene.set_parent_keep_world(b, a).unwrap();

        assert!(matches!(
            scene.set_parent_keep_world(a, b),
            Err(SceneError::ParentCycle { .. })
        ));
        assert!(matches!(
            scene.set_parent_keep_world(a, a),
            Err(SceneError::ParentCycle { .. })
        ));
    }

    #[test]
    fn test_removing_parent_keeps_child_in_place() {
        let mut scene = InMemoryScene::new();
        let parent = scene.create_cuboid("Top", Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 1.0, 1.0), "Test");
        let child = scene.create_cuboid("Leg", Vector3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 1.0, 1.0), "Test");
        scene.set_parent_keep_world(child, parent).unwrap();
        scene.set_location(parent, Vector3::new(5.0, 5.0, 5.0)).unwrap();
        let before = scene.world_matrix(child).unwrap();

        scene.remove(parent).unwrap();

        assert_eq!(scene.object(child).unwrap().parent, None);
        assert_relative_eq!(scene.world_matrix(child).unwrap(), before, epsilon = 1e-12);
    }

    #[test]
    fn test_clear_collection_only_touches_that_collection() {
        let mut scene = InMemoryScene::new();
        scene.create_cuboid("A", Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), "Table");
        scene.create_cuboid("B", Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), "Table");
        let other = scene.create_cuboid("C", Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), "Props");

        assert_eq!(scene.clear_collection("Table"), 2);
        assert_eq!(scene.len(), 1);
        assert!(scene.object(other).is_ok());
        assert_eq!(scene.find_by_name("A"), None);
    }

    #[test]
    fn test_stale_handle_is_an_error() {
        let (mut scene, id) = scene_with_box("Gone", Vector3::zeros());
        scene.remove(id).unwrap();
        assert_eq!(scene.object(id).unwrap_err(), SceneError::UnknownObject { id });
    }

    #[test]
    fn test_freed_slot_is_reused_under_new_generation() {
        let (mut scene, old) = scene_with_box("Old", Vector3::zeros());
        scene.remove(old).unwrap();

        let new = scene.create_cuboid("New", Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0), "Test");

        assert_eq!(new.index(), old.index());
        assert_ne!(new, old);
        assert_eq!(scene.slot_count(), 1);
        assert_eq!(scene.object(old).unwrap_err(), SceneError::UnknownObject { id: old });
        assert!(scene.object_mut(old).is_err());
        assert!(scene.remove(old).is_err());
        assert_eq!(scene.object(new).unwrap().name, "New");
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        let (mut scene, id) = scene_with_box("Hollow", Vector3::zeros());
        let object = scene.object_mut(id).unwrap();
        object.mesh.vertices.clear();
        object.mesh.polygons.clear();

        let expected = SceneError::EmptyMesh {
            name: "Hollow".to_string(),
        };
        assert_eq!(scene.local_bounding_box(id).unwrap_err(), expected);
        assert_eq!(scene.world_bounding_box(id).unwrap_err(), expected);
    }

    #[test]
    fn test_world_bounding_box_of_rotated_object() {
        let (mut scene, id) = scene_with_box("Box", Vector3::new(0.0, 0.0, 0.5));
        scene.apply_scale(id).unwrap();
        scene
            .set_rotation_euler(id, Vector3::new(0.0, std::f64::consts::FRAC_PI_4, 0.0))
            .unwrap();

        let bbox = scene.world_bounding_box(id).unwrap();
        let half_diagonal = 0.5 * 2f64.sqrt();
        assert_relative_eq!(bbox.min.z, 0.5 - half_diagonal, epsilon = 1e-12);
        assert_relative_eq!(bbox.max.z, 0.5 + half_diagonal, epsilon = 1e-12);
    }
}
