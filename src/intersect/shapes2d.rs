// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segment, circle and rectangle tests in the plane

use super::linear::{intersect_segments, nearest_segment_point};
use crate::geometry::{Circle, MinimumTranslationVector, Rectangle};
use nalgebra::{Point2, Vector2};

/// Whether segment `start-end` touches the circle of squared radius
/// `square_radius` around `center`
pub fn intersect_segment_circle(
    start: &Point2<f32>,
    end: &Point2<f32>,
    center: &Point2<f32>,
    square_radius: f32,
) -> bool {
    let nearest = nearest_segment_point(start, end, center);
    (center - nearest).norm_squared() <= square_radius
}

/// [`intersect_segment_circle`] that also reports how to push the circle off
/// the segment.
///
/// On a hit, `mtv.normal` points from the circle's centre away from the
/// nearest segment point and `mtv.depth` is the radius minus their distance.
/// A centre lying on the segment uses the segment's perpendicular and the
/// full radius.
pub fn intersect_segment_circle_mtv(
    start: &Point2<f32>,
    end: &Point2<f32>,
    circle: &Circle,
    mtv: Option<&mut MinimumTranslationVector>,
) -> bool {
    let nearest = nearest_segment_point(start, end, &circle.center);
    let offset = nearest - circle.center;
    let hit = offset.norm_squared() <= circle.radius * circle.radius;

    if let (true, Some(out)) = (hit, mtv) {
        if offset == Vector2::zeros() {
            out.normal = Vector2::new(end.y - start.y, start.x - end.x).normalize();
            out.depth = circle.radius;
        } else {
            out.normal = offset.normalize();
            out.depth = circle.radius - offset.norm();
        }
    }
    hit
}

/// Strict overlap of two circles
pub fn overlap_circles(a: &Circle, b: &Circle) -> bool {
    let radius_sum = a.radius + b.radius;
    (a.center - b.center).norm_squared() < radius_sum * radius_sum
}

/// Strict overlap of two rectangles; shared edges do not count
pub fn overlap_rectangles(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Whether the rectangles overlap, writing the overlap area to `intersection`
pub fn intersect_rectangles(
    a: &Rectangle,
    b: &Rectangle,
    intersection: Option<&mut Rectangle>,
) -> bool {
    if !overlap_rectangles(a, b) {
        return false;
    }
    if let Some(out) = intersection {
        out.x = a.x.max(b.x);
        out.width = (a.x + a.width).min(b.x + b.width) - out.x;
        out.y = a.y.max(b.y);
        out.height = (a.y + a.height).min(b.y + b.height) - out.y;
    }
    true
}

/// Whether the circle overlaps the rectangle, using the rectangle point
/// closest to the centre
pub fn overlap_circle_rectangle(c: &Circle, r: &Rectangle) -> bool {
    let closest = Point2::new(
        c.center.x.max(r.x).min(r.x + r.width),
        c.center.y.max(r.y).min(r.y + r.height),
    );
    (closest - c.center).norm_squared() < c.radius * c.radius
}

/// Whether segment `start-end` touches the rectangle: either endpoint inside,
/// or a crossing with one of its four edges
pub fn intersect_segment_rectangle(start: &Point2<f32>, end: &Point2<f32>, r: &Rectangle) -> bool {
    if r.contains(start) || r.contains(end) {
        return true;
    }

    let min = r.min();
    let max = r.max();
    let corners = [
        (Point2::new(min.x, min.y), Point2::new(min.x, max.y)),
        (Point2::new(min.x, min.y), Point2::new(max.x, min.y)),
        (Point2::new(max.x, min.y), Point2::new(max.x, max.y)),
        (Point2::new(min.x, max.y), Point2::new(max.x, max.y)),
    ];
    corners
        .iter()
        .any(|(a, b)| intersect_segments(start, end, a, b, None))
}
