// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point classification predicates
//!
//! Side-of-line tests compare their cross-product term against
//! [`FLOAT_ROUNDING_ERROR`], never against exact zero.

use crate::geometry::PolygonView;
use crate::utils::math::{cross2, FLOAT_ROUNDING_ERROR};
use nalgebra::{Point2, Point3, Vector3};

fn ternary(value: f32) -> i32 {
    if value > FLOAT_ROUNDING_ERROR {
        1
    } else if value < -FLOAT_ROUNDING_ERROR {
        -1
    } else {
        0
    }
}

/// Side of the directed line `first -> second` that `point` lies on.
///
/// Returns 1 for the left side, -1 for the right side and 0 on the line.
pub fn point_line_side(first: &Point2<f32>, second: &Point2<f32>, point: &Point2<f32>) -> i32 {
    let line = second - first;
    let rel = point - first;
    ternary(cross2(line.x, line.y, rel.x, rel.y))
}

/// Per-axis side of `point` relative to the 3D line `first -> second`.
///
/// Each component is the ternary sign of the matching component of
/// `(second - first) × (point - first)`.
pub fn point_line_side_3d(
    first: &Point3<f32>,
    second: &Point3<f32>,
    point: &Point3<f32>,
) -> Vector3<i32> {
    let c = (second - first).cross(&(point - first));
    Vector3::new(ternary(c.x), ternary(c.y), ternary(c.z))
}

/// Whether `point` lies inside triangle `(t1, t2, t3)`.
///
/// The point is assumed to lie in the triangle's plane; this is not checked.
pub fn point_in_triangle_3d(
    point: &Point3<f32>,
    t1: &Point3<f32>,
    t2: &Point3<f32>,
    t3: &Point3<f32>,
) -> bool {
    let v0 = t1 - point;
    let v1 = t2 - point;
    let v2 = t3 - point;

    let ab = v0.dot(&v1);
    let ac = v0.dot(&v2);
    let bc = v1.dot(&v2);
    let cc = v2.dot(&v2);

    if bc * ac - cc * ab < 0.0 {
        return false;
    }
    let bb = v1.dot(&v1);
    ab * bc - ac * bb >= 0.0
}

/// Whether `p` lies inside or on the boundary of triangle `(a, b, c)`.
/// Works for either winding.
pub fn point_in_triangle(p: &Point2<f32>, a: &Point2<f32>, b: &Point2<f32>, c: &Point2<f32>) -> bool {
    let edge = |from: &Point2<f32>, to: &Point2<f32>| {
        let e = to - from;
        let r = p - from;
        cross2(e.x, e.y, r.x, r.y)
    };
    let d1 = edge(a, b);
    let d2 = edge(b, c);
    let d3 = edge(c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn on_segment(a: &Point2<f32>, b: &Point2<f32>, p: &Point2<f32>) -> bool {
    if point_line_side(a, b, p) != 0 {
        return false;
    }
    let ab = b - a;
    let t = (p - a).dot(&ab);
    t >= -FLOAT_ROUNDING_ERROR && t <= ab.norm_squared() + FLOAT_ROUNDING_ERROR
}

/// Crossing-number test over a ring of vertex positions. Points on an edge
/// count as inside.
pub fn point_in_polygon(polygon: &[Point2<f32>], point: &Point2<f32>) -> bool {
    let Some(mut last) = polygon.last() else {
        return false;
    };
    let (x, y) = (point.x, point.y);
    let mut odd_nodes = false;
    for vertex in polygon {
        if on_segment(last, vertex, point) {
            return true;
        }
        if (vertex.y < y && last.y >= y) || (last.y < y && vertex.y >= y) {
            let cross_x = vertex.x + (y - vertex.y) / (last.y - vertex.y) * (last.x - vertex.x);
            if cross_x < x {
                odd_nodes = !odd_nodes;
            }
        }
        last = vertex;
    }
    odd_nodes
}

/// [`point_in_polygon`] over a flat coordinate window
pub fn point_in_polygon_view(polygon: &PolygonView<'_>, point: &Point2<f32>) -> bool {
    let n = polygon.vertex_count();
    let (x, y) = (point.x, point.y);
    let mut odd_nodes = false;
    let mut last = polygon.vertex(n - 1);
    for i in 0..n {
        let vertex = polygon.vertex(i);
        if on_segment(&last, &vertex, point) {
            return true;
        }
        if (vertex.y < y && last.y >= y) || (last.y < y && vertex.y >= y) {
            let cross_x = vertex.x + (y - vertex.y) / (last.y - vertex.y) * (last.x - vertex.x);
            if cross_x < x {
                odd_nodes = !odd_nodes;
            }
        }
        last = vertex;
    }
    odd_nodes
}
