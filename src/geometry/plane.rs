// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Infinite plane in Hessian normal form

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Side of a plane a point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneSide {
    Front,   // Positive signed distance
    Back,    // Negative signed distance
    OnPlane, // Signed distance exactly zero
}

/// Plane with unit normal `normal` and signed offset `d`.
///
/// The signed distance of a point `p` is `normal·p + d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub d: f32,
}

impl Plane {
    /// Create a plane, normalizing `normal`
    pub fn new(normal: Vector3<f32>, d: f32) -> Self {
        Self {
            normal: normal.normalize(),
            d,
        }
    }

    /// Plane through `point` with the given normal
    pub fn from_point_normal(point: &Point3<f32>, normal: Vector3<f32>) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            d: -normal.dot(&point.coords),
        }
    }

    /// Plane through three points, normal `(p1 - p2) × (p2 - p3)`
    pub fn from_points(p1: &Point3<f32>, p2: &Point3<f32>, p3: &Point3<f32>) -> Self {
        let normal = (p1 - p2).cross(&(p2 - p3)).normalize();
        Self {
            normal,
            d: -p1.coords.dot(&normal),
        }
    }

    /// Signed distance of `point` to the plane
    pub fn distance(&self, point: &Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) + self.d
    }

    /// Classify a point. Only an exact zero distance counts as on the plane.
    pub fn test_point(&self, point: &Point3<f32>) -> PlaneSide {
        let dist = self.distance(point);
        if dist == 0.0 {
            PlaneSide::OnPlane
        } else if dist < 0.0 {
            PlaneSide::Back
        } else {
            PlaneSide::Front
        }
    }
}
