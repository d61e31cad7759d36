// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::fuzz::FuzzReport;
use super::runner::RaycastResult;
use super::scene::{Outcome, QueryReport};
use colored::*;
use nalgebra::{Point2, Point3};
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report every query of a scene
    pub fn report_queries(scene: &str, reports: &[QueryReport]) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Scene:".bold(), scene.cyan());
        println!("{}", "━".repeat(80).bright_black());

        for report in reports {
            let mark = if report.outcome.is_positive() {
                "●".green()
            } else {
                "○".bright_black()
            };
            println!(
                "{} {} {}",
                mark,
                report.name.bold(),
                format!("[{}]", report.kind).bright_black()
            );
            for line in Self::describe(&report.outcome) {
                println!("    {}", line);
            }
        }

        let positive = reports.iter().filter(|r| r.outcome.is_positive()).count();
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Positive:".bright_black(),
            format!("{}/{}", positive, reports.len()).cyan()
        );
    }

    /// Report the nearest hit of a mesh ray cast
    pub fn report_raycast(file: &str, result: &RaycastResult) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Mesh:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
        match (&result.hit, result.distance) {
            (Some(point), Some(distance)) => {
                println!("{} {}", "✅".green(), "Hit".green().bold());
                Self::print_field("Point", &Self::format_point3(point));
                Self::print_field("Distance", &format!("{:.6}", distance));
            }
            _ => println!("{} {}", "○".bright_black(), "No hit".bold()),
        }
        Self::print_field("Triangles", &result.triangles.to_string());
        Self::print_field(
            "Mode",
            if result.parallel { "parallel" } else { "sequential" },
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(result.duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a fuzz run
    pub fn report_fuzz(report: &FuzzReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Fuzz seed:".bold(), report.seed.to_string().cyan());
        println!("{}", "━".repeat(80).bright_black());

        if report.passed() {
            println!(
                "{} {}",
                "✅".green(),
                "All invariants held".green().bold()
            );
        } else {
            println!(
                "{} {}",
                "❌".red(),
                format!("{} invariant violations", report.violations.len())
                    .red()
                    .bold()
            );
            for v in report.violations.iter().take(20) {
                println!(
                    "    {} {} {}",
                    format!("#{}", v.case).bright_black(),
                    v.check.yellow(),
                    v.detail
                );
            }
        }

        Self::print_field("Cases", &report.cases.to_string());
        Self::print_field("Checks", &report.checks.to_string());
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn describe(outcome: &Outcome) -> Vec<String> {
        match outcome {
            Outcome::Crossing { point, .. } => point
                .iter()
                .map(|p| format!("at {}", Self::format_point2(p)))
                .collect(),
            Outcome::Hit { point, .. } => point
                .iter()
                .map(|p| format!("at {}", Self::format_point3(p)))
                .collect(),
            Outcome::Containment { inside } => {
                vec![if *inside { "inside" } else { "outside" }.to_string()]
            }
            Outcome::Clip {
                overlap,
                polygon,
                area,
            } => {
                if *overlap {
                    vec![format!("{} vertices, area {:.6}", polygon.len(), area)]
                } else {
                    Vec::new()
                }
            }
            Outcome::Overlap { mtv, .. } => mtv
                .iter()
                .map(|m| {
                    format!(
                        "mtv {} depth {:.6}",
                        Self::format_point2(&Point2::from(m.normal)),
                        m.depth
                    )
                })
                .collect(),
            Outcome::Split {
                num_front,
                num_back,
                total,
                ..
            } => vec![format!(
                "{} front, {} back, {} total",
                num_front, num_back, total
            )],
        }
    }

    fn print_field(name: &str, value: &str) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            value.cyan()
        );
    }

    fn format_point2(p: &Point2<f32>) -> String {
        format!("({:.6}, {:.6})", p.x, p.y)
    }

    fn format_point3(p: &Point3<f32>) -> String {
        format!("({:.6}, {:.6}, {:.6})", p.x, p.y, p.z)
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
