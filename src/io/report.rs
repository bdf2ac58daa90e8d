// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON report writer

use crate::table::TableReport;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Write `report` as pretty JSON, creating parent directories
pub fn write_report_json(report: &TableReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = report.to_json_pretty().context("Failed to serialize table report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    debug!(path = %path.display(), "wrote table report");
    Ok(())
}

/// Read a report back, mostly for tooling and tests
pub fn read_report_json(path: &Path) -> Result<TableReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse report {}", path.display()))
}
