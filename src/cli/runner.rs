// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Command execution for the `intersector` CLI

use super::config::ProbeConfig;
use super::fuzz::{FuzzReport, Fuzzer, FuzzerConfig};
use super::scene::{QueryReport, Scene};
use crate::geometry::{Ray, TriangleMesh};
use crate::intersect::{intersect_ray_triangles, intersect_ray_triangles_par};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::Point3;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Nearest hit of a ray against a loaded mesh
#[derive(Debug, Clone, Serialize)]
pub struct RaycastResult {
    pub hit: Option<Point3<f32>>,
    pub distance: Option<f32>,
    pub triangles: usize,
    pub parallel: bool,
    pub duration: Duration,
}

/// Runner for executing CLI commands
pub struct Runner {
    config: ProbeConfig,
}

impl Runner {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Load and evaluate a query scene
    pub fn run_scene(&self, path: &Path) -> Result<Vec<QueryReport>> {
        let scene = Scene::load(path)?;
        info!(queries = scene.queries.len(), path = ?path, "evaluating scene");
        scene.evaluate()
    }

    /// Load STL file into an indexed mesh of bare positions
    pub fn load_stl(&self, path: &Path) -> Result<TriangleMesh> {
        let file =
            File::open(path).with_context(|| format!("Failed to open STL file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let stl = stl_io::read_stl(&mut reader).context("Failed to read STL file")?;

        let mut mesh = TriangleMesh::with_capacity(3, stl.vertices.len(), stl.faces.len());
        for v in &stl.vertices {
            mesh.add_vertex(&[v[0], v[1], v[2]]);
        }
        for face in &stl.faces {
            let [a, b, c] = face.vertices;
            mesh.add_triangle([
                u32::try_from(a).context("STL vertex index exceeds u32")?,
                u32::try_from(b).context("STL vertex index exceeds u32")?,
                u32::try_from(c).context("STL vertex index exceeds u32")?,
            ]);
        }
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "loaded STL"
        );
        Ok(mesh)
    }

    /// Cast a ray against every triangle of `mesh`, going parallel above the
    /// configured triangle threshold
    pub fn raycast(&self, mesh: &TriangleMesh, ray: &Ray) -> Result<RaycastResult> {
        let triangles = mesh.triangle_count();
        let parallel = triangles > self.config.parallel_threshold;
        let start = Instant::now();

        let mut point = Point3::origin();
        let hit = if parallel {
            intersect_ray_triangles_par(ray, mesh.triangles(), Some(&mut point))
        } else {
            intersect_ray_triangles(ray, mesh.triangles(), Some(&mut point))
        }
        .context("Mesh rejected by ray cast")?;

        let hit = hit.then_some(point);
        Ok(RaycastResult {
            distance: hit.map(|p| (p - ray.origin).norm()),
            hit,
            triangles,
            parallel,
            duration: start.elapsed(),
        })
    }

    /// Run the invariant fuzzer, with a progress bar when `show_progress`
    pub fn fuzz(&self, count: usize, seed: u64, show_progress: bool) -> Result<FuzzReport> {
        let progress = if show_progress {
            let pb = ProgressBar::new(count as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                    )
                    .context("Invalid progress template")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut fuzzer = Fuzzer::new(FuzzerConfig {
            count,
            seed,
            ..Default::default()
        });
        let report = fuzzer.run(progress.as_ref());

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        Ok(report)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(ProbeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    #[test]
    fn test_raycast_switches_to_parallel() {
        let mesh = Primitive::sphere(1.0, 16).to_mesh();
        let ray = Ray::new(Point3::new(0.1, 0.2, -5.0), Vector3::z());

        let sequential = Runner::default().raycast(&mesh, &ray).unwrap();
        assert!(!sequential.parallel);

        let runner = Runner::new(ProbeConfig {
            parallel_threshold: 0,
            ..Default::default()
        });
        let parallel = runner.raycast(&mesh, &ray).unwrap();
        assert!(parallel.parallel);
        assert_eq!(sequential.hit, parallel.hit);
        assert!(sequential.distance.unwrap() > 3.9);
    }

    #[test]
    fn test_fuzz_without_progress() {
        let report = Runner::default().fuzz(20, 1, false).unwrap();
        assert_eq!(report.cases, 20);
        assert!(report.passed());
    }
}
