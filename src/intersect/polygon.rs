// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon intersection: convex clipping, general overlap and edge scans

use super::linear::{intersect_linear_2d, intersect_lines, intersect_segments, Linear2};
use super::predicates::{point_in_polygon_view, point_line_side};
use crate::geometry::{Polygon, PolygonView};
use crate::utils::math::cross2;
use nalgebra::Point2;
use tracing::trace;

/// Clip convex polygon `subject` against convex polygon `clip` with the
/// Sutherland-Hodgman algorithm.
///
/// Both polygons must be wound clockwise. Returns whether the polygons
/// overlap; when they do and `overlap` is given, it receives the clipped
/// ring, overwritten in place if its length already matches.
pub fn clip_polygons(subject: &Polygon, clip: &Polygon, overlap: Option<&mut Polygon>) -> bool {
    if subject.is_empty() || clip.is_empty() {
        return false;
    }

    let mut ring: Vec<f32> = subject.vertices().to_vec();
    let mut next: Vec<f32> = Vec::with_capacity(ring.len() + 4);
    let edge_count = clip.vertex_count();

    for i in 0..edge_count {
        let ep1 = clip.vertex(i);
        let ep2 = clip.vertex((i + 1) % edge_count);
        if ring.is_empty() {
            trace!(edge = i, "clip ring emptied");
            return false;
        }

        let n = ring.len();
        let mut s = Point2::new(ring[n - 2], ring[n - 1]);
        for j in (0..n).step_by(2) {
            let e = Point2::new(ring[j], ring[j + 1]);
            let s_inside = point_line_side(&ep2, &ep1, &s) > 0;
            if point_line_side(&ep2, &ep1, &e) > 0 {
                if !s_inside {
                    let ip = edge_crossing(&s, &e, &ep1, &ep2);
                    let k = next.len();
                    if k < 2 || next[k - 2] != ip.x || next[k - 1] != ip.y {
                        next.push(ip.x);
                        next.push(ip.y);
                    }
                }
                next.push(e.x);
                next.push(e.y);
            } else if s_inside {
                let ip = edge_crossing(&s, &e, &ep1, &ep2);
                next.push(ip.x);
                next.push(ip.y);
            }
            s = e;
        }

        std::mem::swap(&mut ring, &mut next);
        next.clear();
    }

    if ring.is_empty() {
        return false;
    }
    if let Some(out) = overlap {
        out.set_vertices(&ring);
    }
    true
}

fn edge_crossing(
    s: &Point2<f32>,
    e: &Point2<f32>,
    ep1: &Point2<f32>,
    ep2: &Point2<f32>,
) -> Point2<f32> {
    let mut ip = Point2::origin();
    intersect_lines(s, e, ep1, ep2, Some(&mut ip));
    ip
}

/// Whether two arbitrary polygons overlap: either contains the other's first
/// vertex, or any pair of edges crosses.
pub fn intersect_polygons(a: &PolygonView<'_>, b: &PolygonView<'_>) -> bool {
    if point_in_polygon_view(a, &b.vertex(0)) {
        return true;
    }
    if point_in_polygon_view(b, &a.vertex(0)) {
        return true;
    }
    intersect_polygon_edges(a, b)
}

/// Whether any edge of `a` crosses any edge of `b`
pub fn intersect_polygon_edges(a: &PolygonView<'_>, b: &PolygonView<'_>) -> bool {
    let n = a.vertex_count();
    let m = b.vertex_count();
    let mut a1 = a.vertex(n - 1);
    for i in 0..n {
        let a2 = a.vertex(i);
        let mut b1 = b.vertex(m - 1);
        for j in 0..m {
            let b2 = b.vertex(j);
            if intersect_segments(&a1, &a2, &b1, &b2, None) {
                return true;
            }
            b1 = b2;
        }
        a1 = a2;
    }
    false
}

/// Scan the polygon's edges against `probe`, skipping edges exactly parallel
/// to it
fn crosses_any_edge(probe: &Linear2, polygon: &PolygonView<'_>) -> bool {
    let dir = probe.direction();
    let n = polygon.vertex_count();
    let mut v1 = polygon.vertex(n - 1);
    for i in 0..n {
        let v2 = polygon.vertex(i);
        let edge = Linear2::segment(v1, v2);
        let ed = edge.direction();
        if cross2(ed.x, ed.y, dir.x, dir.y) != 0.0
            && !intersect_linear_2d(&edge, probe, None).is_infinite()
        {
            return true;
        }
        v1 = v2;
    }
    false
}

/// Whether the infinite line through `p1` and `p2` crosses an edge of the polygon
pub fn intersect_line_polygon(p1: &Point2<f32>, p2: &Point2<f32>, polygon: &PolygonView<'_>) -> bool {
    crosses_any_edge(&Linear2::line(*p1, *p2), polygon)
}

/// Whether segment `p1-p2` crosses an edge of the polygon. A segment lying
/// wholly inside does not count.
pub fn intersect_segment_polygon(
    p1: &Point2<f32>,
    p2: &Point2<f32>,
    polygon: &PolygonView<'_>,
) -> bool {
    crosses_any_edge(&Linear2::segment(*p1, *p2), polygon)
}
