// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives generator

use super::TriangleMesh;
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// Floats per generated vertex: position followed by normal
pub const PRIMITIVE_VERTEX_SIZE: usize = 6;

/// Geometric primitives
#[derive(Debug, Clone, Copy)]
pub enum Primitive {
    Cube { size: Vector3<f32>, center: bool },
    Sphere { r: f32, segments: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f32>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f32, segments: u32) -> Self {
        let segments = if segments > 2 { segments } else { 32 };
        Self::Sphere { r, segments }
    }

    pub fn to_mesh(&self) -> TriangleMesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Sphere { r, segments } => generate_sphere_mesh(*r, *segments),
        }
    }
}

fn push_vertex(mesh: &mut TriangleMesh, position: Point3<f32>, normal: Vector3<f32>) -> u32 {
    mesh.add_vertex(&[
        position.x, position.y, position.z, normal.x, normal.y, normal.z,
    ])
}

fn generate_cube_mesh(size: Vector3<f32>, center: bool) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(PRIMITIVE_VERTEX_SIZE, 36, 12);

    let min = if center { -size / 2.0 } else { Vector3::zeros() };
    let max = min + size;

    // 8 corners of the cube
    let positions = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    // 6 faces, each with its normal
    let faces = [
        // Front (z+)
        ([4, 5, 6], Vector3::new(0.0, 0.0, 1.0)),
        ([4, 6, 7], Vector3::new(0.0, 0.0, 1.0)),
        // Back (z-)
        ([1, 0, 3], Vector3::new(0.0, 0.0, -1.0)),
        ([1, 3, 2], Vector3::new(0.0, 0.0, -1.0)),
        // Right (x+)
        ([5, 1, 2], Vector3::new(1.0, 0.0, 0.0)),
        ([5, 2, 6], Vector3::new(1.0, 0.0, 0.0)),
        // Left (x-)
        ([0, 4, 7], Vector3::new(-1.0, 0.0, 0.0)),
        ([0, 7, 3], Vector3::new(-1.0, 0.0, 0.0)),
        // Top (y+)
        ([7, 6, 2], Vector3::new(0.0, 1.0, 0.0)),
        ([7, 2, 3], Vector3::new(0.0, 1.0, 0.0)),
        // Bottom (y-)
        ([0, 1, 5], Vector3::new(0.0, -1.0, 0.0)),
        ([0, 5, 4], Vector3::new(0.0, -1.0, 0.0)),
    ];

    for (corners, normal) in faces {
        let v0 = push_vertex(&mut mesh, positions[corners[0]], normal);
        let v1 = push_vertex(&mut mesh, positions[corners[1]], normal);
        let v2 = push_vertex(&mut mesh, positions[corners[2]], normal);
        mesh.add_triangle([v0, v1, v2]);
    }

    mesh
}

fn generate_sphere_mesh(radius: f32, segments: u32) -> TriangleMesh {
    let stacks = segments;
    let slices = segments;
    let mut mesh = TriangleMesh::with_capacity(
        PRIMITIVE_VERTEX_SIZE,
        ((stacks + 1) * (slices + 1)) as usize,
        (stacks * slices * 2) as usize,
    );

    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        let y = radius * phi.cos();
        let r = radius * phi.sin();

        for j in 0..=slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            let x = r * theta.cos();
            let z = r * theta.sin();

            let normal = Vector3::new(x, y, z) / radius;
            push_vertex(&mut mesh, Point3::new(x, y, z), normal);
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let first = i * (slices + 1) + j;
            let second = first + slices + 1;

            mesh.add_triangle([first, second, first + 1]);
            mesh.add_triangle([second, second + 1, first + 1]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_mesh() {
        let mesh = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_mesh();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_size, PRIMITIVE_VERTEX_SIZE);

        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max, Point3::new(1.0, 1.0, 1.0));
        assert!(mesh.triangles().validate().is_ok());
    }

    #[test]
    fn test_sphere_vertices_lie_on_surface() {
        let mesh = Primitive::sphere(3.0, 12).to_mesh();
        assert_eq!(mesh.triangle_count(), 12 * 12 * 2);
        for i in 0..mesh.vertex_count() {
            assert_relative_eq!(mesh.position(i).coords.norm(), 3.0, epsilon = 1e-4);
        }
    }
}
