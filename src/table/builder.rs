// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Table assembly construction on top of a scene host

use super::{BuildError, StyleMetrics, TableParameters};
use crate::geometry::{taper_z, warp_top};
use crate::scene::{ObjectId, SceneHost};
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_4;
use tracing::{debug, info};

pub const COLLECTION_NAME: &str = "LowPolyTable";
pub const TABLE_TOP_NAME: &str = "TableTop";
pub const TEMPLATE_LEG_NAME: &str = "TableLeg_Template";
/// Bevel only rounds edges sharper than 45 degrees
pub const BEVEL_ANGLE_LIMIT: f64 = FRAC_PI_4;
/// Floor for the splay projection factor
pub const MIN_PROJECTED_FACTOR: f64 = 1e-5;

/// A built table: tabletop plus its four legs, all owned by the scene host
#[derive(Debug, Clone, PartialEq)]
pub struct TableAssembly {
    pub collection: String,
    pub table_top: ObjectId,
    /// Legs in anchor order: (+x,+y), (+x,-y), (-x,+y), (-x,-y)
    pub legs: Vec<ObjectId>,
    pub leg_height: f64,
    pub leg_mesh_height: f64,
    pub style_metrics: StyleMetrics,
}

impl TableAssembly {
    pub fn objects(&self) -> Vec<ObjectId> {
        std::iter::once(self.table_top).chain(self.legs.iter().copied()).collect()
    }
}

/// Vertical gap the legs have to close
pub fn leg_height(params: &TableParameters) -> f64 {
    params.table_height - params.top_thickness
}

/// Leg mesh length whose vertical projection still spans `leg_height` once the
/// leg is tilted by `leg_splay_deg` about both horizontal axes
pub fn leg_mesh_height(leg_height: f64, leg_splay_deg: f64) -> f64 {
    let cos = leg_splay_deg.to_radians().cos();
    leg_height / (cos * cos).max(MIN_PROJECTED_FACTOR)
}

/// Leg centers, one per quadrant, in generation order
pub fn leg_anchors(params: &TableParameters) -> [Vector3<f64>; 4] {
    let offset_x = params.top_width * 0.5 - params.inset - params.leg_thickness * 0.5;
    let offset_y = params.top_depth * 0.5 - params.inset - params.leg_thickness * 0.5;
    let z = leg_height(params) / 2.0;
    [
        Vector3::new(offset_x, offset_y, z),
        Vector3::new(offset_x, -offset_y, z),
        Vector3::new(-offset_x, offset_y, z),
        Vector3::new(-offset_x, -offset_y, z),
    ]
}

/// Euler rotation tilting a leg at `anchor` outward, away from the table center
pub fn splay_rotation(anchor: &Vector3<f64>, leg_splay_deg: f64) -> Vector3<f64> {
    let angle = leg_splay_deg.to_radians();
    Vector3::new(angle.copysign(anchor.y), angle.copysign(anchor.x), 0.0)
}

pub fn leg_name(index: usize) -> String {
    format!("TableLeg.{:03}", index)
}

/// Builds tables into a scene host's collection
pub struct TableBuilder<'a, H: SceneHost> {
    host: &'a mut H,
    collection: String,
}

impl<'a, H: SceneHost> TableBuilder<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        Self {
            host,
            collection: COLLECTION_NAME.to_string(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Validate `params`, clear the target collection and build a fresh table.
    ///
    /// Invalid parameters fail before the scene is touched.
    pub fn build(&mut self, params: &TableParameters) -> Result<TableAssembly, BuildError> {
        params.validate()?;

        let leg_height = leg_height(params);
        let leg_mesh_height = leg_mesh_height(leg_height, params.leg_splay_deg);
        debug!(leg_height, leg_mesh_height, splay_deg = params.leg_splay_deg, "derived leg dimensions");

        let removed = self.host.clear_collection(&self.collection);
        if removed > 0 {
            debug!(removed, collection = %self.collection, "removed previous generation");
        }

        let table_top = self.build_table_top(params)?;
        let template = self.build_template_leg(params, leg_height, leg_mesh_height)?;

        let mut legs = Vec::with_capacity(4);
        for (index, anchor) in leg_anchors(params).iter().enumerate() {
            let leg = self.host.duplicate(template, &leg_name(index + 1))?;
            self.host.set_location(leg, *anchor)?;
            self.host
                .set_rotation_euler(leg, splay_rotation(anchor, params.leg_splay_deg))?;
            self.host.set_flat_shading(leg)?;
            self.host.set_parent_keep_world(leg, table_top)?;
            if params.bevel {
                self.host
                    .add_bevel(leg, params.bevel_width, params.bevel_segments, BEVEL_ANGLE_LIMIT)?;
            }
            legs.push(leg);
        }

        self.host.remove(template)?;

        if params.bevel {
            self.host.add_bevel(
                table_top,
                params.bevel_width,
                params.bevel_segments,
                BEVEL_ANGLE_LIMIT,
            )?;
        }

        let style_metrics = StyleMetrics::from_parameters(params);
        info!(
            collection = %self.collection,
            legs = legs.len(),
            non_boxy_score = style_metrics.non_boxy_score,
            "built table"
        );

        Ok(TableAssembly {
            collection: self.collection.clone(),
            table_top,
            legs,
            leg_height,
            leg_mesh_height,
            style_metrics,
        })
    }

    fn build_table_top(&mut self, params: &TableParameters) -> Result<ObjectId, BuildError> {
        let top = self.host.create_cuboid(
            TABLE_TOP_NAME,
            Vector3::new(0.0, 0.0, params.table_height - params.top_thickness / 2.0),
            Vector3::new(params.top_width, params.top_depth, params.top_thickness),
            &self.collection,
        );
        self.host.apply_scale(top)?;

        let mesh = &mut self.host.object_mut(top)?.mesh;
        // Narrow underside, full-size visible top
        taper_z(mesh, params.top_taper, 1.0);
        warp_top(mesh, params.top_warp);
        mesh.set_flat_shading();
        Ok(top)
    }

    fn build_template_leg(
        &mut self,
        params: &TableParameters,
        leg_height: f64,
        leg_mesh_height: f64,
    ) -> Result<ObjectId, BuildError> {
        let leg = self.host.create_cuboid(
            TEMPLATE_LEG_NAME,
            Vector3::new(0.0, 0.0, leg_height / 2.0),
            Vector3::new(params.leg_thickness, params.leg_thickness, leg_mesh_height),
            &self.collection,
        );
        self.host.apply_scale(leg)?;

        let mesh = &mut self.host.object_mut(leg)?.mesh;
        // Full width at the floor, narrower under the tabletop
        taper_z(mesh, 1.0, params.leg_taper);
        mesh.set_flat_shading();
        Ok(leg)
    }
}

/// Build a table into the default collection of `host`
pub fn create_low_poly_table<H: SceneHost>(
    host: &mut H,
    params: &TableParameters,
) -> Result<TableAssembly, BuildError> {
    TableBuilder::new(host).build(params)
}
