// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 2D shape value types: polygons, circles, rectangles and the MTV

use crate::error::{GeometryError, Result};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Polygon stored as a flat `[x0, y0, x1, y1, ...]` coordinate buffer.
///
/// Winding depends on the consumer: clipping expects clockwise rings, the
/// separating axis test expects counter-clockwise ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Polygon {
    vertices: Vec<f32>,
}

impl TryFrom<Vec<f32>> for Polygon {
    type Error = GeometryError;

    fn try_from(vertices: Vec<f32>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<f32> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

impl Polygon {
    /// Wrap a flat coordinate buffer. An empty buffer is allowed.
    pub fn new(vertices: Vec<f32>) -> Result<Self> {
        if vertices.len() % 2 != 0 {
            return Err(GeometryError::OddCoordinateCount(vertices.len()));
        }
        Ok(Self { vertices })
    }

    pub fn from_points(points: &[Point2<f32>]) -> Self {
        let mut vertices = Vec::with_capacity(points.len() * 2);
        for p in points {
            vertices.push(p.x);
            vertices.push(p.y);
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Replace the coordinates, reusing the allocation when lengths match
    pub(crate) fn set_vertices(&mut self, coords: &[f32]) {
        if self.vertices.len() == coords.len() {
            self.vertices.copy_from_slice(coords);
        } else {
            self.vertices = coords.to_vec();
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, i: usize) -> Point2<f32> {
        Point2::new(self.vertices[i * 2], self.vertices[i * 2 + 1])
    }

    pub fn points(&self) -> Vec<Point2<f32>> {
        self.vertices
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect()
    }

    /// Borrow the whole polygon as a validated view
    pub fn view(&self) -> Result<PolygonView<'_>> {
        PolygonView::new(&self.vertices, 0, self.vertices.len())
    }

    /// Shoelace area, positive for counter-clockwise rings
    pub fn signed_area(&self) -> f32 {
        signed_area(&self.vertices)
    }
}

fn signed_area(coords: &[f32]) -> f32 {
    let n = coords.len() / 2;
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += coords[i * 2] * coords[j * 2 + 1] - coords[j * 2] * coords[i * 2 + 1];
    }
    sum / 2.0
}

/// Borrowed window of `count` floats starting at `offset` in a flat buffer
#[derive(Debug, Clone, Copy)]
pub struct PolygonView<'a> {
    coords: &'a [f32],
    offset: usize,
}

impl<'a> PolygonView<'a> {
    /// Validate and create a view. The window must be non-empty, hold whole
    /// vertices and lie inside the buffer.
    pub fn new(coords: &'a [f32], offset: usize, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(GeometryError::EmptyPolygon);
        }
        if count % 2 != 0 {
            return Err(GeometryError::OddCoordinateCount(count));
        }
        let end = offset
            .checked_add(count)
            .filter(|end| *end <= coords.len())
            .ok_or(GeometryError::PolygonWindowOutOfBounds {
                offset,
                end: offset.saturating_add(count),
                len: coords.len(),
            })?;
        Ok(Self {
            coords: &coords[offset..end],
            offset,
        })
    }

    /// Offset of the window within its backing buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The windowed coordinates
    pub fn coords(&self) -> &'a [f32] {
        self.coords
    }

    pub fn vertex_count(&self) -> usize {
        self.coords.len() / 2
    }

    pub fn vertex(&self, i: usize) -> Point2<f32> {
        Point2::new(self.coords[i * 2], self.coords[i * 2 + 1])
    }

    /// Vertex after `i`, wrapping to the first vertex of the window
    pub fn next_vertex(&self, i: usize) -> Point2<f32> {
        self.vertex((i + 1) % self.vertex_count())
    }
}

/// Minimum translation vector: push along `normal` by `depth` to separate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumTranslationVector {
    pub normal: Vector2<f32>,
    pub depth: f32,
}

impl Default for MinimumTranslationVector {
    fn default() -> Self {
        Self {
            normal: Vector2::zeros(),
            depth: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2<f32>,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Point2<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Inclusive containment
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    pub fn max(&self) -> Point2<f32> {
        Point2::new(self.x + self.width, self.y + self.height)
    }

    /// Inclusive containment
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        self.x <= point.x
            && self.x + self.width >= point.x
            && self.y <= point.y
            && self.y + self.height >= point.y
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}
