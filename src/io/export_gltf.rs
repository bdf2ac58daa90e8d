// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! GLB (binary glTF 2.0) exporter for scene objects

use crate::scene::{MeshObject, ObjectId, SceneHost};
use anyhow::{Context, Result};
use nalgebra::{Matrix4, Vector3};
use serde_json::json;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

/// Z-up scene coordinates to glTF's Y-up
fn to_y_up(v: &Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.z as f32, -v.y as f32]
}

/// Flat-shaded, world-space triangle soup for one object
struct FlatPrimitive {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl FlatPrimitive {
    fn from_object(object: &MeshObject, world: &Matrix4<f64>) -> Self {
        let mut mesh = object.mesh.clone();
        mesh.transform(world);

        let mut primitive = Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        };

        for polygon in &mesh.polygons {
            if polygon.indices.len() < 3 {
                continue;
            }
            let normal = to_y_up(&mesh.polygon_normal(polygon));
            let base = primitive.positions.len() as u32;
            for &index in &polygon.indices {
                primitive.positions.push(to_y_up(&mesh.vertices[index].coords));
                primitive.normals.push(normal);
            }
            for i in 1..polygon.indices.len() as u32 - 1 {
                primitive.indices.extend_from_slice(&[base, base + i, base + i + 1]);
            }
        }

        primitive
    }

    fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for position in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(position[axis]);
                max[axis] = max[axis].max(position[axis]);
            }
        }
        (min, max)
    }
}

/// Build the glTF JSON document and its binary buffer.
///
/// Vertices are baked to world space, so every node carries an identity
/// transform. Objects whose parent is also exported become child nodes.
pub fn build_document<H: SceneHost>(
    host: &H,
    objects: &[ObjectId],
) -> Result<(serde_json::Value, Vec<u8>)> {
    let mut buffer_data = Vec::new();
    let mut accessors = Vec::new();
    let mut buffer_views = Vec::new();
    let mut meshes = Vec::new();
    let mut nodes = Vec::new();
    let node_of: HashMap<ObjectId, usize> =
        objects.iter().enumerate().map(|(node, &id)| (id, node)).collect();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); objects.len()];
    let mut roots = Vec::new();

    for (node, &id) in objects.iter().enumerate() {
        let object = host
            .object(id)
            .with_context(|| format!("Cannot export object {}", id))?;
        let world = host.world_matrix(id)?;
        let primitive = FlatPrimitive::from_object(object, &world);
        let (min_pos, max_pos) = primitive.bounds();

        let position_offset = buffer_data.len();
        for position in &primitive.positions {
            for component in position {
                buffer_data.extend_from_slice(&component.to_le_bytes());
            }
        }
        let normal_offset = buffer_data.len();
        for normal in &primitive.normals {
            for component in normal {
                buffer_data.extend_from_slice(&component.to_le_bytes());
            }
        }
        let indices_offset = buffer_data.len();
        for index in &primitive.indices {
            buffer_data.extend_from_slice(&index.to_le_bytes());
        }
        let end = buffer_data.len();

        let view = buffer_views.len();
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": position_offset,
            "byteLength": normal_offset - position_offset,
            "target": 34962
        }));
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": normal_offset,
            "byteLength": indices_offset - normal_offset,
            "target": 34962
        }));
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": indices_offset,
            "byteLength": end - indices_offset,
            "target": 34963
        }));

        let accessor = accessors.len();
        accessors.push(json!({
            "bufferView": view,
            "byteOffset": 0,
            "componentType": 5126,
            "count": primitive.positions.len(),
            "type": "VEC3",
            "min": min_pos,
            "max": max_pos
        }));
        accessors.push(json!({
            "bufferView": view + 1,
            "byteOffset": 0,
            "componentType": 5126,
            "count": primitive.normals.len(),
            "type": "VEC3"
        }));
        accessors.push(json!({
            "bufferView": view + 2,
            "byteOffset": 0,
            "componentType": 5125,
            "count": primitive.indices.len(),
            "type": "SCALAR"
        }));

        meshes.push(json!({
            "name": object.name,
            "primitives": [{
                "attributes": { "POSITION": accessor, "NORMAL": accessor + 1 },
                "indices": accessor + 2,
                "mode": 4
            }]
        }));
        nodes.push(json!({ "name": object.name, "mesh": node }));

        match object.parent.and_then(|parent| node_of.get(&parent)) {
            Some(&parent_node) => children[parent_node].push(node),
            None => roots.push(node),
        }
    }

    for (node, node_children) in children.into_iter().enumerate() {
        if !node_children.is_empty() {
            nodes[node]["children"] = json!(node_children);
        }
    }

    let gltf = json!({
        "asset": {
            "generator": "polytable",
            "version": "2.0"
        },
        "scene": 0,
        "scenes": [{ "nodes": roots }],
        "nodes": nodes,
        "meshes": meshes,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{ "byteLength": buffer_data.len() }]
    });

    Ok((gltf, buffer_data))
}

/// Write `objects` to a `.glb` file, creating parent directories
pub fn export_glb<H: SceneHost>(host: &H, objects: &[ObjectId], path: &Path) -> Result<()> {
    let (gltf_json_val, buffer_data) = build_document(host, objects)?;

    let json_string = serde_json::to_string(&gltf_json_val)?;
    let json_padded = align_to_multiple_of_four(json_string.len());
    let buffer_padded = align_to_multiple_of_four(buffer_data.len());
    let total_length = 12 + 8 + json_padded + 8 + buffer_padded;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create GLB file {}", path.display()))?;

    // Header
    file.write_all(&GLB_MAGIC.to_le_bytes())?;
    file.write_all(&2u32.to_le_bytes())?;
    file.write_all(&(total_length as u32).to_le_bytes())?;

    // JSON chunk, space padded
    file.write_all(&(json_padded as u32).to_le_bytes())?;
    file.write_all(&CHUNK_JSON.to_le_bytes())?;
    file.write_all(json_string.as_bytes())?;
    file.write_all(&vec![b' '; json_padded - json_string.len()])?;

    // BIN chunk, zero padded
    file.write_all(&(buffer_padded as u32).to_le_bytes())?;
    file.write_all(&CHUNK_BIN.to_le_bytes())?;
    file.write_all(&buffer_data)?;
    file.write_all(&vec![0u8; buffer_padded - buffer_data.len()])?;

    debug!(path = %path.display(), bytes = total_length, objects = objects.len(), "exported GLB");
    Ok(())
}

fn align_to_multiple_of_four(n: usize) -> usize {
    (n + 3) & !3
}
