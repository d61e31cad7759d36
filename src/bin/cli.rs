// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Intersector CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use intersector::cli::{OutputFormat, ProbeConfig, Reporter, Runner};
use intersector::geometry::Ray;
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intersector")]
#[command(about = "Intersector - probe intersection, overlap and ray queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./intersector.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a scene of named queries
    Query {
        /// Scene file (.toml or .json)
        input: PathBuf,
    },

    /// Cast a ray against an STL mesh
    Raycast {
        /// Input STL file
        input: PathBuf,

        /// Ray origin as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: [f32; 3],

        /// Ray direction as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        direction: [f32; 3],
    },

    /// Randomized self-check of kernel invariants
    Fuzz {
        /// Number of cases (overrides config)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// RNG seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show version information
    Version,
}

fn parse_vec3(s: &str) -> Result<[f32; 3]> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid vector: {}", s))?;
    match parts.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => anyhow::bail!("Expected three comma-separated values, got: {}", s),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ProbeConfig::load(cli.config.as_deref())?;
    if cli.json {
        config.output = OutputFormat::Json;
    }
    if !config.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Query { input } => {
            query_command(&config, input)?;
        }
        Commands::Raycast {
            input,
            origin,
            direction,
        } => {
            raycast_command(&config, input, origin, direction)?;
        }
        Commands::Fuzz { count, seed } => {
            let passed = fuzz_command(&config, *count, *seed)?;
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("Intersector v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn query_command(config: &ProbeConfig, input: &Path) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Scene file not found: {}", input.display()));
        std::process::exit(1);
    }

    let runner = Runner::new(config.clone());
    let reports = runner.run_scene(input)?;

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => Reporter::report_queries(&input.display().to_string(), &reports),
    }
    Ok(())
}

fn raycast_command(
    config: &ProbeConfig,
    input: &Path,
    origin: &[f32; 3],
    direction: &[f32; 3],
) -> Result<()> {
    let runner = Runner::new(config.clone());
    let mesh = runner.load_stl(input)?;
    if config.output == OutputFormat::Text {
        Reporter::report_info(&format!(
            "Loaded {} triangles from {}",
            mesh.triangle_count(),
            input.display()
        ));
    }

    let ray = Ray::new(
        Point3::new(origin[0], origin[1], origin[2]),
        Vector3::new(direction[0], direction[1], direction[2]),
    );
    let result = runner.raycast(&mesh, &ray)?;

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => Reporter::report_raycast(&input.display().to_string(), &result),
    }
    Ok(())
}

fn fuzz_command(config: &ProbeConfig, count: Option<usize>, seed: Option<u64>) -> Result<bool> {
    let count = count.unwrap_or(config.fuzz_count);
    let seed = seed.unwrap_or(config.fuzz_seed);
    let text = config.output == OutputFormat::Text;

    let runner = Runner::new(config.clone());
    let start = Instant::now();
    let report = runner.fuzz(count, seed, text)?;

    match config.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Reporter::report_fuzz(&report, start.elapsed()),
    }
    Ok(report.passed())
}
