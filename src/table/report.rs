// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Machine-readable summary of a built table

use super::{StyleMetrics, TableAssembly};
use crate::scene::{SceneHost, SceneResult};
use crate::utils::{round4, round4_array};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTopReport {
    pub location: [f64; 3],
    pub dimensions: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegReport {
    pub name: String,
    /// Parent-relative location
    pub location: [f64; 3],
    pub world_location: [f64; 3],
    pub dimensions: [f64; 3],
    pub rotation_deg: [f64; 3],
    pub parent: Option<String>,
}

/// Snapshot of a table assembly; all floats rounded to 4 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub collection: String,
    pub objects: Vec<String>,
    pub table_top: TableTopReport,
    pub leg_height: f64,
    pub leg_mesh_height: f64,
    pub style_metrics: StyleMetrics,
    pub legs: Vec<LegReport>,
    pub poly_total: usize,
}

fn to_array(v: &nalgebra::Vector3<f64>) -> [f64; 3] {
    round4_array([v.x, v.y, v.z])
}

impl TableReport {
    pub fn from_scene<H: SceneHost>(host: &H, assembly: &TableAssembly) -> SceneResult<Self> {
        let top = host.object(assembly.table_top)?;
        let table_top = TableTopReport {
            location: to_array(&host.world_location(assembly.table_top)?),
            dimensions: to_array(&top.dimensions()),
        };

        let mut objects = vec![top.name.clone()];
        let mut poly_total = top.polygon_count();
        let mut legs = Vec::with_capacity(assembly.legs.len());

        for &id in &assembly.legs {
            let leg = host.object(id)?;
            let parent = match leg.parent {
                Some(parent) => Some(host.object(parent)?.name.clone()),
                None => None,
            };
            legs.push(LegReport {
                name: leg.name.clone(),
                location: to_array(&leg.transform.location),
                world_location: to_array(&host.world_location(id)?),
                dimensions: to_array(&leg.dimensions()),
                rotation_deg: to_array(&leg.transform.rotation_degrees()),
                parent,
            });
            objects.push(leg.name.clone());
            poly_total += leg.polygon_count();
        }

        Ok(Self {
            collection: assembly.collection.clone(),
            objects,
            table_top,
            leg_height: round4(assembly.leg_height),
            leg_mesh_height: round4(assembly.leg_mesh_height),
            style_metrics: assembly.style_metrics.clone(),
            legs,
            poly_total,
        })
    }

    /// Pretty JSON with a trailing newline
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
