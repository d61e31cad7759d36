// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Half-infinite ray

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Ray starting at `origin` heading along `direction`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray
    pub fn end_point(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Copy of this ray with a unit-length direction
    pub fn normalized(&self) -> Self {
        Self {
            origin: self.origin,
            direction: self.direction.normalize(),
        }
    }
}
