// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::table::{TableReport, ValidationOutcome};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Summarize a freshly built table
    pub fn report_build(report: &TableReport, duration: Duration) {
        println!("\n{}", "━".repeat(60).bright_black());
        println!("{} {}", "Built:".bold(), report.collection.cyan());
        println!("{}", "━".repeat(60).bright_black());
        println!(
            "  {} {:?}",
            "Top dimensions:".bright_black(),
            report.table_top.dimensions
        );
        println!(
            "  {} {} (mesh {})",
            "Leg height:".bright_black(),
            report.leg_height.to_string().cyan(),
            report.leg_mesh_height
        );
        println!(
            "  {} {}",
            "Polygons:".bright_black(),
            report.poly_total.to_string().cyan()
        );
        println!(
            "  {} {} ({} of 4 features)",
            "Non-boxy score:".bright_black(),
            report.style_metrics.non_boxy_score.to_string().cyan(),
            report.style_metrics.non_boxy_feature_count
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(60).bright_black());
    }

    /// Print the validation verdict followed by one line per issue
    pub fn report_validation(outcome: &ValidationOutcome) {
        let mut lines = Self::validation_lines(outcome).into_iter();
        if let Some(header) = lines.next() {
            if outcome.is_pass() {
                println!("{}", header.green().bold());
            } else {
                println!("{}", header.red().bold());
            }
        }
        for line in lines {
            println!("{}", line.red());
        }
    }

    /// Plain-text form of a validation outcome
    pub fn validation_lines(outcome: &ValidationOutcome) -> Vec<String> {
        std::iter::once(format!("VALIDATION: {}", outcome))
            .chain(outcome.issues().iter().map(|issue| format!("- {}", issue)))
            .collect()
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
