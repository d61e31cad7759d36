// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle splitting against a plane
//!
//! A triangle is given as three vertices of `stride` floats each: a position
//! followed by free-form attributes. Crossing vertices are placed on the
//! plane and their attributes interpolated linearly along the cut edge.
//! Interpolated normals are not renormalized.

use super::linear::{intersect_linear_plane, Linear3};
use crate::error::{GeometryError, Result};
use crate::geometry::{Plane, PlaneSide};
use crate::utils::math::lerp;
use nalgebra::Point3;
use serde::Serialize;
use tracing::trace;

/// Result buffers and scratch space for [`split_triangle`].
///
/// Each side holds up to two triangles. After a split, `total` is 1 when the
/// triangle lay wholly on one side and 3 when it was cut; the side holding
/// two triangles is laid out as a fan `(v0, v1, v2), (v2, v3, v0)`.
#[derive(Debug, Clone, Serialize)]
pub struct SplitTriangle {
    stride: usize,
    front: Vec<f32>,
    back: Vec<f32>,
    #[serde(skip)]
    edge_split: Vec<f32>,
    num_front: usize,
    num_back: usize,
    total: usize,
    #[serde(skip)]
    front_current: bool,
    #[serde(skip)]
    front_offset: usize,
    #[serde(skip)]
    back_offset: usize,
}

impl SplitTriangle {
    /// Create a workspace for vertices of `stride` floats, at least 3
    pub fn new(stride: usize) -> Result<Self> {
        if stride < 3 {
            return Err(GeometryError::VertexSizeTooSmall(stride));
        }
        Ok(Self {
            stride,
            front: vec![0.0; stride * 6],
            back: vec![0.0; stride * 6],
            edge_split: vec![0.0; stride],
            num_front: 0,
            num_back: 0,
            total: 0,
            front_current: false,
            front_offset: 0,
            back_offset: 0,
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn num_front(&self) -> usize {
        self.num_front
    }

    pub fn num_back(&self) -> usize {
        self.num_back
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Vertex data of the triangles in front of the plane
    pub fn front(&self) -> &[f32] {
        &self.front[..self.num_front * 3 * self.stride]
    }

    /// Vertex data of the triangles behind the plane
    pub fn back(&self) -> &[f32] {
        &self.back[..self.num_back * 3 * self.stride]
    }

    fn reset(&mut self) {
        self.front_current = false;
        self.front_offset = 0;
        self.back_offset = 0;
        self.num_front = 0;
        self.num_back = 0;
        self.total = 0;
    }

    fn add(&mut self, vertex: &[f32]) {
        let stride = self.stride;
        if self.front_current {
            self.front[self.front_offset..self.front_offset + stride].copy_from_slice(vertex);
            self.front_offset += stride;
        } else {
            self.back[self.back_offset..self.back_offset + stride].copy_from_slice(vertex);
            self.back_offset += stride;
        }
    }

    fn add_edge_split(&mut self) {
        let stride = self.stride;
        if self.front_current {
            self.front[self.front_offset..self.front_offset + stride]
                .copy_from_slice(&self.edge_split);
            self.front_offset += stride;
        } else {
            self.back[self.back_offset..self.back_offset + stride]
                .copy_from_slice(&self.edge_split);
            self.back_offset += stride;
        }
    }

    /// Place the crossing of edge `s -> e` into the edge scratch
    fn split_edge(&mut self, s: &[f32], e: &[f32], plane: &Plane) {
        let line = Linear3::line(
            Point3::new(s[0], s[1], s[2]),
            Point3::new(e[0], e[1], e[2]),
        );
        let mut crossing = Point3::origin();
        let t = intersect_linear_plane(&line, plane, Some(&mut crossing));
        self.edge_split[0] = crossing.x;
        self.edge_split[1] = crossing.y;
        self.edge_split[2] = crossing.z;
        for i in 3..self.stride {
            self.edge_split[i] = lerp(s[i], e[i], t);
        }
    }
}

fn is_back(plane: &Plane, vertex: &[f32]) -> bool {
    plane.test_point(&Point3::new(vertex[0], vertex[1], vertex[2])) == PlaneSide::Back
}

/// Split `triangle` by `plane` into `split`.
///
/// Vertices exactly on the plane count as in front. The triangle length
/// must be a multiple of 3 and its stride must match the workspace's;
/// otherwise nothing is written.
pub fn split_triangle(triangle: &[f32], plane: &Plane, split: &mut SplitTriangle) -> Result<()> {
    if triangle.len() % 3 != 0 {
        return Err(GeometryError::MalformedTriangles {
            len: triangle.len(),
            multiple: 3,
        });
    }
    let stride = triangle.len() / 3;
    if stride < 3 {
        return Err(GeometryError::VertexSizeTooSmall(stride));
    }
    if stride != split.stride {
        return Err(GeometryError::StrideMismatch {
            expected: split.stride,
            actual: stride,
        });
    }

    let vertices = [
        &triangle[..stride],
        &triangle[stride..stride * 2],
        &triangle[stride * 2..],
    ];
    let back = [
        is_back(plane, vertices[0]),
        is_back(plane, vertices[1]),
        is_back(plane, vertices[2]),
    ];

    split.reset();

    if back[0] == back[1] && back[1] == back[2] {
        split.total = 1;
        if back[0] {
            split.num_back = 1;
            split.back[..triangle.len()].copy_from_slice(triangle);
        } else {
            split.num_front = 1;
            split.front[..triangle.len()].copy_from_slice(triangle);
        }
        return Ok(());
    }

    split.total = 3;
    split.num_front = back.iter().filter(|b| !**b).count();
    split.num_back = split.total - split.num_front;
    trace!(num_front = split.num_front, num_back = split.num_back, "splitting triangle");

    split.front_current = !back[0];

    for (first, second) in [(0, 1), (1, 2), (2, 0)] {
        split.add(vertices[first]);
        if back[first] != back[second] {
            split.split_edge(vertices[first], vertices[second], plane);
            split.add_edge_split();
            split.front_current = !split.front_current;
            split.add_edge_split();
        }
    }

    let fan = if split.num_front == 2 {
        &mut split.front
    } else {
        &mut split.back
    };
    fan.copy_within(stride * 2..stride * 4, stride * 3);
    fan.copy_within(0..stride, stride * 5);
    Ok(())
}
