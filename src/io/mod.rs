// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - report and mesh export

mod export_gltf;
mod report;

pub use export_gltf::{build_document as build_gltf_document, export_glb};
pub use report::{read_report_json, write_report_json};
