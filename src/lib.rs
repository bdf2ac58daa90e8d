// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! polytable
//!
//! Procedural low-poly table generator with a geometric validator.
//! Builds a tapered, warped tabletop and four splayed legs into a scene host,
//! then checks the result against the input parameters.

pub mod cli;
pub mod config;
pub mod geometry;
pub mod io;
pub mod scene;
pub mod table;
pub mod utils;

pub use config::TableConfig;
pub use geometry::{BoundingBox, Mesh, Transform};
pub use io::{export_glb, write_report_json};
pub use scene::{InMemoryScene, ObjectId, SceneError, SceneHost};
pub use table::{
    create_low_poly_table, validate_table, BuildError, ParameterError, StyleMetrics,
    TableAssembly, TableBuilder, TableParameters, TableReport, ValidationOutcome,
};

/// Build a table into a fresh in-memory scene and validate it
pub fn build_and_validate(
    params: &TableParameters,
) -> Result<(InMemoryScene, TableAssembly, ValidationOutcome), BuildError> {
    let mut scene = InMemoryScene::new();
    let assembly = create_low_poly_table(&mut scene, params)?;
    let outcome = ValidationOutcome::from_issues(validate_table(&scene, &assembly, params));
    Ok((scene, assembly, outcome))
}
