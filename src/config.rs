// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Table generation configuration

use crate::table::TableParameters;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Picked up from the working directory when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "polytable.toml";
const ENV_PREFIX: &str = "POLYTABLE_";

/// Where generated artifacts go and whether to validate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub report_json: Option<PathBuf>,
    pub export_glb: Option<PathBuf>,
    pub validate: bool,
}

/// Top-level configuration file layout
///
/// ```toml
/// top_size = 1.0          # optional, sets top_width and top_depth
///
/// [table]
/// leg_splay_deg = 6.0
///
/// [output]
/// report_json = "out/table.json"
/// validate = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Legacy square-top shorthand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_size: Option<f64>,
    pub table: TableParameters,
    pub output: OutputConfig,
}

impl TableConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: TableConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `path`, or `polytable.toml` if present, then apply `POLYTABLE_*`
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a full variable name
    /// (e.g. `POLYTABLE_TOP_WIDTH`) to its value
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };
        let number = |name: &str| -> Result<Option<f64>> {
            var(name)
                .map(|(key, value)| {
                    value
                        .trim()
                        .parse::<f64>()
                        .with_context(|| format!("{} is not a number: {:?}", key, value))
                })
                .transpose()
        };

        let table = &mut self.table;
        for (name, field) in [
            ("TOP_THICKNESS", &mut table.top_thickness),
            ("TABLE_HEIGHT", &mut table.table_height),
            ("LEG_THICKNESS", &mut table.leg_thickness),
            ("INSET", &mut table.inset),
            ("TOP_TAPER", &mut table.top_taper),
            ("LEG_TAPER", &mut table.leg_taper),
            ("LEG_SPLAY_DEG", &mut table.leg_splay_deg),
            ("TOP_WARP", &mut table.top_warp),
            ("BEVEL_WIDTH", &mut table.bevel_width),
        ] {
            if let Some(value) = number(name)? {
                *field = value;
            }
        }
        if let Some((key, value)) = var("BEVEL_SEGMENTS") {
            table.bevel_segments = value
                .trim()
                .parse()
                .with_context(|| format!("{} is not a non-negative integer: {:?}", key, value))?;
        }
        if let Some((key, value)) = var("BEVEL") {
            table.bevel = parse_flag(&key, &value)?;
        }
        if let Some((key, value)) = var("VALIDATE") {
            self.output.validate = parse_flag(&key, &value)?;
        }
        if let Some((_, value)) = var("REPORT_JSON") {
            self.output.report_json = Some(PathBuf::from(value));
        }
        if let Some((_, value)) = var("EXPORT_GLB") {
            self.output.export_glb = Some(PathBuf::from(value));
        }
        self.override_top(number("TOP_SIZE")?, number("TOP_WIDTH")?, number("TOP_DEPTH")?);
        Ok(())
    }

    /// Layer tabletop dimensions from a higher-precedence source.
    ///
    /// A `top_size` from a lower layer is folded into width and depth first,
    /// so it cannot mask these values. Within the layer, `size` wins over
    /// `width` and `depth`, as it does in the file.
    pub fn override_top(&mut self, size: Option<f64>, width: Option<f64>, depth: Option<f64>) {
        if size.is_none() && width.is_none() && depth.is_none() {
            return;
        }
        self.table = self.resolved_parameters();
        self.top_size = None;

        if let Some(width) = width {
            self.table.top_width = width;
        }
        if let Some(depth) = depth {
            self.table.top_depth = depth;
        }
        if let Some(size) = size {
            self.top_size = Some(size);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Table parameters with `top_size` folded into width and depth
    pub fn resolved_parameters(&self) -> TableParameters {
        let mut params = self.table;
        if let Some(size) = self.top_size {
            params.top_width = size;
            params.top_depth = size;
        }
        params
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("{} is not a boolean: {:?}", key, other),
    }
}
