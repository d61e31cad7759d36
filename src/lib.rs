// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Intersector
//!
//! A stateless intersection kernel for 2D and 3D primitives: segments, rays
//! and lines, planes, convex and general polygons, triangles, spheres and
//! axis-aligned boxes. Every query is a pure function; optional results are
//! written through `Option<&mut T>` parameters and malformed inputs are
//! reported as [`GeometryError`].

pub mod cli;
pub mod error;
pub mod geometry;
pub mod intersect;
pub mod utils;

pub use error::{GeometryError, Result};
pub use geometry::{
    BoundingBox, Circle, MinimumTranslationVector, Plane, PlaneSide, Polygon, PolygonView,
    Primitive, Ray, Rectangle, TriangleMesh, Triangles,
};

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_basic_raycast() {
        let mesh = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_mesh();
        let ray = Ray::new(Point3::new(0.25, 0.5, -10.0), Vector3::z());
        let mut hit = Point3::origin();
        let found = intersect::intersect_ray_triangles(&ray, mesh.triangles(), Some(&mut hit));
        assert_eq!(found, Ok(true));
        assert!((hit.z + 1.0).abs() < 1e-5);
    }
}
