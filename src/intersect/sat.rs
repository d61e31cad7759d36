// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Separating axis test for convex polygons

use super::predicates::point_line_side;
use crate::geometry::{MinimumTranslationVector, PolygonView};
use nalgebra::Vector2;
use tracing::trace;

/// Projection interval of a polygon onto an axis
fn project(polygon: &PolygonView<'_>, axis: &Vector2<f32>) -> (f32, f32) {
    let first = axis.dot(&polygon.vertex(0).coords);
    let mut min = first;
    let mut max = first;
    for i in 1..polygon.vertex_count() {
        let p = axis.dot(&polygon.vertex(i).coords);
        if p < min {
            min = p;
        } else if p > max {
            max = p;
        }
    }
    (min, max)
}

/// Penetration of two intervals, or `None` when they are disjoint.
///
/// When one interval strictly contains the other, the smaller end gap is
/// added so that the containing shape is pushed all the way out.
fn penetration(min1: f32, max1: f32, min2: f32, max2: f32) -> Option<f32> {
    if !((min1 <= min2 && max1 >= min2) || (min2 <= min1 && max2 >= min1)) {
        return None;
    }
    let mut o = max1.min(max2) - min1.max(min2);
    if (min1 < min2 && max1 > max2) || (min2 < min1 && max2 > max1) {
        let mins = (min1 - min2).abs();
        let maxs = (max1 - max2).abs();
        o += mins.min(maxs);
    }
    Some(o)
}

struct AxisScan {
    depth: f32,
    normal: Vector2<f32>,
}

/// Test every edge axis of `edges` against both polygons. Returns false as
/// soon as a separating axis is found.
///
/// `owner_first` selects the sign convention: axes from the first polygon
/// keep their direction when the other polygon's side tally is
/// non-negative, axes from the second polygon when it is negative.
fn scan_axes(
    edges: &PolygonView<'_>,
    other: &PolygonView<'_>,
    first: &PolygonView<'_>,
    second: &PolygonView<'_>,
    owner_first: bool,
    best: &mut AxisScan,
) -> bool {
    for i in 0..edges.vertex_count() {
        let p1 = edges.vertex(i);
        let p2 = edges.next_vertex(i);

        let axis = Vector2::new(p1.y - p2.y, p2.x - p1.x);
        let axis = axis / axis.norm();

        let (min1, max1) = project(first, &axis);
        let (min2, max2) = project(second, &axis);

        let Some(o) = penetration(min1, max1, min2, max2) else {
            trace!(edge = i, owner_first, "separating axis found");
            return false;
        };

        if o < best.depth {
            let mut in_normal_dir = 0;
            for j in 0..other.vertex_count() {
                in_normal_dir -= point_line_side(&p1, &p2, &other.vertex(j));
            }
            let keep = if owner_first {
                in_normal_dir >= 0
            } else {
                in_normal_dir < 0
            };
            best.depth = o;
            best.normal = if keep { axis } else { -axis };
        }
    }
    true
}

/// Whether two convex polygons overlap.
///
/// Both polygons must be wound counter-clockwise. Touching polygons count as
/// overlapping. On overlap `mtv` receives the unit normal and depth of the
/// axis with the smallest penetration; moving `a` along `normal` by `depth`
/// (or `b` against it) resolves the overlap.
pub fn overlap_convex_polygons(
    a: &PolygonView<'_>,
    b: &PolygonView<'_>,
    mtv: Option<&mut MinimumTranslationVector>,
) -> bool {
    let mut best = AxisScan {
        depth: f32::MAX,
        normal: Vector2::zeros(),
    };

    if !scan_axes(a, b, a, b, true, &mut best) {
        return false;
    }
    if !scan_axes(b, a, a, b, false, &mut best) {
        return false;
    }

    if let Some(out) = mtv {
        out.normal = best.normal;
        out.depth = best.depth;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ccw_square(x: f32, y: f32, size: f32) -> Vec<f32> {
        vec![x, y, x + size, y, x + size, y + size, x, y + size]
    }

    #[test]
    fn test_disjoint_squares() {
        let a = ccw_square(0.0, 0.0, 1.0);
        let b = ccw_square(3.0, 0.0, 1.0);
        let a = PolygonView::new(&a, 0, 8).unwrap();
        let b = PolygonView::new(&b, 0, 8).unwrap();
        let mut mtv = MinimumTranslationVector::default();
        assert!(!overlap_convex_polygons(&a, &b, Some(&mut mtv)));
        assert_eq!(mtv, MinimumTranslationVector::default());
    }

    #[test]
    fn test_identical_squares() {
        let coords = ccw_square(0.0, 0.0, 1.0);
        let a = PolygonView::new(&coords, 0, 8).unwrap();
        let mut mtv = MinimumTranslationVector::default();
        assert!(overlap_convex_polygons(&a, &a, Some(&mut mtv)));
        assert_relative_eq!(mtv.depth, 1.0);
        assert_relative_eq!(mtv.normal.norm(), 1.0);
        assert_relative_eq!(mtv.normal, Vector2::new(0.0, -1.0));
    }

    #[test]
    fn test_partial_overlap_mtv() {
        let a = ccw_square(0.0, 0.0, 2.0);
        let b = vec![1.0, 0.5, 3.0, 0.5, 3.0, 1.5, 1.0, 1.5];
        let a = PolygonView::new(&a, 0, 8).unwrap();
        let b = PolygonView::new(&b, 0, 8).unwrap();
        let mut mtv = MinimumTranslationVector::default();
        assert!(overlap_convex_polygons(&a, &b, Some(&mut mtv)));
        assert_relative_eq!(mtv.depth, 1.0);
        assert_relative_eq!(mtv.normal, Vector2::new(-1.0, 0.0));
    }

    #[test]
    fn test_views_with_offsets() {
        let mut buffer = vec![99.0, 99.0, -7.0, -7.0];
        buffer.extend(ccw_square(0.0, 0.0, 1.0));
        buffer.extend(ccw_square(0.5, 0.0, 1.0));
        let a = PolygonView::new(&buffer, 4, 8).unwrap();
        let b = PolygonView::new(&buffer, 12, 8).unwrap();
        assert_eq!(a.offset(), 4);
        let mut mtv = MinimumTranslationVector::default();
        assert!(overlap_convex_polygons(&a, &b, Some(&mut mtv)));
        assert_relative_eq!(mtv.depth, 0.5);
    }

    #[test]
    fn test_touching_counts_as_overlap() {
        let a = ccw_square(0.0, 0.0, 1.0);
        let b = ccw_square(1.0, 0.0, 1.0);
        let a = PolygonView::new(&a, 0, 8).unwrap();
        let b = PolygonView::new(&b, 0, 8).unwrap();
        assert!(overlap_convex_polygons(&a, &b, None));
    }
}
