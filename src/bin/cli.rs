// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! polytable CLI

use anyhow::{Context, Result};
use clap::Parser;
use polytable::cli::Reporter;
use polytable::{
    create_low_poly_table, export_glb, validate_table, write_report_json, BuildError,
    InMemoryScene, TableConfig, TableReport, ValidationOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polytable")]
#[command(about = "Generate a stylized low-poly table and validate its geometry", long_about = None)]
struct Cli {
    /// Tabletop width (X)
    #[arg(long)]
    top_width: Option<f64>,

    /// Tabletop depth (Y)
    #[arg(long)]
    top_depth: Option<f64>,

    /// Sets both tabletop width and depth
    #[arg(long)]
    top_size: Option<f64>,

    #[arg(long)]
    top_thickness: Option<f64>,

    /// Floor to top surface
    #[arg(long)]
    table_height: Option<f64>,

    #[arg(long)]
    leg_thickness: Option<f64>,

    /// Leg outer edge to tabletop edge
    #[arg(long)]
    inset: Option<f64>,

    /// Underside scale of the tabletop [0.6, 1.0]
    #[arg(long)]
    top_taper: Option<f64>,

    /// Upper-end scale of each leg [0.6, 1.0]
    #[arg(long)]
    leg_taper: Option<f64>,

    /// Outward leg tilt in degrees [0, 20]
    #[arg(long)]
    leg_splay_deg: Option<f64>,

    /// Saddle displacement of the top face
    #[arg(long, allow_negative_numbers = true)]
    top_warp: Option<f64>,

    /// Attach a bevel modifier to every object
    #[arg(long)]
    bevel: bool,

    #[arg(long)]
    bevel_width: Option<f64>,

    #[arg(long)]
    bevel_segments: Option<u32>,

    /// Write the scene as a binary glTF file
    #[arg(long, value_name = "FILE")]
    export_glb: Option<PathBuf>,

    /// Write a JSON report of the built table
    #[arg(long, value_name = "FILE")]
    report_json: Option<PathBuf>,

    /// Check the built geometry; exits with status 2 on failure
    #[arg(long)]
    validate: bool,

    /// Configuration file (defaults to ./polytable.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration
    fn apply_to(&self, config: &mut TableConfig) {
        let table = &mut config.table;
        let overrides = [
            (self.top_thickness, &mut table.top_thickness),
            (self.table_height, &mut table.table_height),
            (self.leg_thickness, &mut table.leg_thickness),
            (self.inset, &mut table.inset),
            (self.top_taper, &mut table.top_taper),
            (self.leg_taper, &mut table.leg_taper),
            (self.leg_splay_deg, &mut table.leg_splay_deg),
            (self.top_warp, &mut table.top_warp),
            (self.bevel_width, &mut table.bevel_width),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(segments) = self.bevel_segments {
            table.bevel_segments = segments;
        }
        if self.bevel {
            table.bevel = true;
        }
        config.override_top(self.top_size, self.top_width, self.top_depth);
        if self.export_glb.is_some() {
            config.output.export_glb = self.export_glb.clone();
        }
        if self.report_json.is_some() {
            config.output.report_json = self.report_json.clone();
        }
        if self.validate {
            config.output.validate = true;
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("polytable=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = TableConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);
    let params = config.resolved_parameters();

    let mut scene = InMemoryScene::new();
    let start = std::time::Instant::now();
    let assembly = match create_low_poly_table(&mut scene, &params) {
        Ok(assembly) => assembly,
        Err(BuildError::Parameters(err)) => {
            Reporter::report_error(&err.to_string());
            return Ok(ExitCode::from(1));
        }
        Err(err) => return Err(err.into()),
    };
    let elapsed = start.elapsed();

    let report = TableReport::from_scene(&scene, &assembly)?;
    if cli.verbose {
        Reporter::report_build(&report, elapsed);
    }

    if let Some(path) = &config.output.report_json {
        write_report_json(&report, path)?;
        Reporter::report_info(&format!("Report written to {}", path.display()));
    }

    if let Some(path) = &config.output.export_glb {
        export_glb(&scene, &assembly.objects(), path)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        Reporter::report_info(&format!("GLB written to {}", path.display()));
    }

    if config.output.validate {
        let outcome = ValidationOutcome::from_issues(validate_table(&scene, &assembly, &params));
        Reporter::report_validation(&outcome);
        if !outcome.is_pass() {
            return Ok(ExitCode::from(2));
        }
    } else if config.output.report_json.is_none() && config.output.export_glb.is_none() {
        Reporter::success(&format!(
            "Built {} ({} objects, {} polygons)",
            report.collection,
            report.objects.len(),
            report.poly_total
        ));
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_top_size() {
        let mut config = TableConfig {
            top_size: Some(1.0),
            ..Default::default()
        };
        let cli = Cli::parse_from(["polytable", "--top-width", "1.6", "--leg-splay-deg", "8"]);
        cli.apply_to(&mut config);

        let params = config.resolved_parameters();
        assert_eq!(params.top_width, 1.6);
        assert_eq!(params.top_depth, 1.0);
        assert_eq!(params.leg_splay_deg, 8.0);
    }

    #[test]
    fn test_top_size_flag_sets_both_sides() {
        let mut config = TableConfig::default();
        config.table.top_depth = 0.7;
        let cli = Cli::parse_from(["polytable", "--top-size", "0.9", "--validate"]);
        cli.apply_to(&mut config);

        let params = config.resolved_parameters();
        assert_eq!((params.top_width, params.top_depth), (0.9, 0.9));
        assert!(config.output.validate);
    }
}
