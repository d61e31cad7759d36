// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parametric intersection of segments, rays and lines
//!
//! A linear is `first + s * D`, where `D` is either `second - first` or
//! `second` itself when the second point is a direction. Its [`Extent`]
//! bounds the parameter: both bounds give a segment on `[0, 1]`, only the
//! lower bound gives a ray on `[0, ∞)`, neither gives an infinite line.
//!
//! The engines return the parameter `s` on the first linear, or one of the
//! infinite sentinels when there is no intersection. Which sentinel is
//! returned carries which bound rejected the hit; the 2D and plane engines
//! use opposite sign conventions for the bound checks.

use crate::geometry::{Plane, Ray};
use crate::utils::math::{clamp, cross2, FLOAT_ROUNDING_ERROR};
use nalgebra::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which ends of the parameter range are bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub lower: bool,
    pub upper: bool,
}

impl Extent {
    pub const SEGMENT: Extent = Extent {
        lower: true,
        upper: true,
    };
    pub const RAY: Extent = Extent {
        lower: true,
        upper: false,
    };
    pub const LINE: Extent = Extent {
        lower: false,
        upper: false,
    };

    /// Scales for the nearest-point query: 1 on a bounded end, infinite
    /// on an open one
    fn scales(&self) -> (f32, f32) {
        let scale = |bounded: bool| if bounded { 1.0 } else { f32::INFINITY };
        (scale(self.lower), scale(self.upper))
    }
}

/// Segment, ray or line in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Linear2 {
    pub first: Point2<f32>,
    pub second: Point2<f32>,
    pub second_is_direction: bool,
    pub extent: Extent,
}

impl Linear2 {
    pub fn new(
        first: Point2<f32>,
        second: Point2<f32>,
        second_is_direction: bool,
        extent: Extent,
    ) -> Self {
        Self {
            first,
            second,
            second_is_direction,
            extent,
        }
    }

    pub fn segment(start: Point2<f32>, end: Point2<f32>) -> Self {
        Self::new(start, end, false, Extent::SEGMENT)
    }

    pub fn ray(origin: Point2<f32>, direction: Vector2<f32>) -> Self {
        Self::new(origin, Point2::from(direction), true, Extent::RAY)
    }

    /// Infinite line through two points
    pub fn line(first: Point2<f32>, second: Point2<f32>) -> Self {
        Self::new(first, second, false, Extent::LINE)
    }

    pub fn direction(&self) -> Vector2<f32> {
        if self.second_is_direction {
            self.second.coords
        } else {
            self.second - self.first
        }
    }

    pub fn point_at(&self, s: f32) -> Point2<f32> {
        self.first + self.direction() * s
    }

    /// Point of this linear nearest to `point`
    pub fn nearest_point(&self, point: &Point2<f32>) -> Point2<f32> {
        let (lower, upper) = self.extent.scales();
        nearest_scaled_point(&self.first, &self.direction(), lower, upper, point)
    }
}

/// Segment, ray or line in space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Linear3 {
    pub first: Point3<f32>,
    pub second: Point3<f32>,
    pub second_is_direction: bool,
    pub extent: Extent,
}

impl Linear3 {
    pub fn new(
        first: Point3<f32>,
        second: Point3<f32>,
        second_is_direction: bool,
        extent: Extent,
    ) -> Self {
        Self {
            first,
            second,
            second_is_direction,
            extent,
        }
    }

    pub fn segment(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self::new(start, end, false, Extent::SEGMENT)
    }

    pub fn ray(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self::new(origin, Point3::from(direction), true, Extent::RAY)
    }

    pub fn line(first: Point3<f32>, second: Point3<f32>) -> Self {
        Self::new(first, second, false, Extent::LINE)
    }

    pub fn direction(&self) -> Vector3<f32> {
        if self.second_is_direction {
            self.second.coords
        } else {
            self.second - self.first
        }
    }

    pub fn point_at(&self, s: f32) -> Point3<f32> {
        self.first + self.direction() * s
    }
}

/// Intersect two planar linears.
///
/// Returns `s` with the hit at `a.first + s * a.direction()`, or an infinite
/// sentinel: `-∞` when an upper bound rejects the hit, `+∞` when a lower
/// bound does. On a rejection the output point is set to NaN.
///
/// With an exactly zero determinant the sign of the cross product of the two
/// *first points* decides the sentinel, and the output point is set to the
/// matching infinity. That cross product is positional, not directional, so
/// it does not measure whether the linears coincide. When it is zero the
/// general formula runs anyway and NaN or infinity propagates.
pub fn intersect_linear_2d(
    a: &Linear2,
    b: &Linear2,
    intersection: Option<&mut Point2<f32>>,
) -> f32 {
    let d1 = a.direction();
    let d2 = b.direction();
    let d = cross2(d1.x, d1.y, d2.x, d2.y);

    if d == 0.0 {
        let crs = cross2(a.first.x, a.first.y, b.first.x, b.first.y);
        if crs > 0.0 {
            trace!("parallel linears, positive first-point cross");
            if let Some(out) = intersection {
                *out = Point2::new(f32::INFINITY, f32::INFINITY);
            }
            return f32::INFINITY;
        } else if crs < 0.0 {
            trace!("parallel linears, negative first-point cross");
            if let Some(out) = intersection {
                *out = Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
            }
            return f32::NEG_INFINITY;
        }
        trace!("parallel linears with zero first-point cross, falling through");
    }

    let xd = a.first.x - b.first.x;
    let yd = a.first.y - b.first.y;

    let s1 = -cross2(xd, yd, d2.x, d2.y) / d;
    if let Some(sentinel) = bound_rejection(&a.extent, s1) {
        return reject(sentinel, intersection);
    }

    let s2 = -cross2(xd, yd, d1.x, d1.y) / d;
    if let Some(sentinel) = bound_rejection(&b.extent, s2) {
        return reject(sentinel, intersection);
    }

    if let Some(out) = intersection {
        *out = a.first + d1 * s1;
    }
    s1
}

fn bound_rejection(extent: &Extent, s: f32) -> Option<f32> {
    if extent.upper && s > 1.0 {
        Some(f32::NEG_INFINITY)
    } else if extent.lower && s < 0.0 {
        Some(f32::INFINITY)
    } else {
        None
    }
}

fn reject(sentinel: f32, intersection: Option<&mut Point2<f32>>) -> f32 {
    if let Some(out) = intersection {
        *out = Point2::new(f32::NAN, f32::NAN);
    }
    sentinel
}

/// Intersect a linear with a plane.
///
/// Returns `s` with the hit at `l.first + s * l.direction()`. A lower bound
/// rejection yields `-∞`, an upper bound rejection `+∞`. A linear parallel to
/// the plane hits at its first point (`s = 0`) only when that point lies
/// exactly on the plane; otherwise `+∞`.
pub fn intersect_linear_plane(
    l: &Linear3,
    plane: &Plane,
    intersection: Option<&mut Point3<f32>>,
) -> f32 {
    let dir = l.direction();
    let dot = dir.dot(&plane.normal);
    if dot != 0.0 {
        let s = -(l.first.coords.dot(&plane.normal) + plane.d) / dot;
        if l.extent.lower && s < 0.0 {
            return f32::NEG_INFINITY;
        }
        if l.extent.upper && s > 1.0 {
            return f32::INFINITY;
        }
        if let Some(out) = intersection {
            *out = l.first + dir * s;
        }
        s
    } else if plane.distance(&l.first) == 0.0 {
        trace!("linear parallel to plane and lying in it");
        if let Some(out) = intersection {
            *out = l.first;
        }
        0.0
    } else {
        f32::INFINITY
    }
}

/// Whether segments `a1-a2` and `b1-b2` intersect
pub fn intersect_segments(
    a1: &Point2<f32>,
    a2: &Point2<f32>,
    b1: &Point2<f32>,
    b2: &Point2<f32>,
    intersection: Option<&mut Point2<f32>>,
) -> bool {
    let a = Linear2::segment(*a1, *a2);
    let b = Linear2::segment(*b1, *b2);
    !intersect_linear_2d(&a, &b, intersection).is_infinite()
}

/// Whether two rays given by origin and direction intersect
pub fn intersect_rays(
    origin1: &Point2<f32>,
    direction1: &Vector2<f32>,
    origin2: &Point2<f32>,
    direction2: &Vector2<f32>,
    intersection: Option<&mut Point2<f32>>,
) -> bool {
    let a = Linear2::ray(*origin1, *direction1);
    let b = Linear2::ray(*origin2, *direction2);
    !intersect_linear_2d(&a, &b, intersection).is_infinite()
}

/// Whether the infinite lines through `a1-a2` and `b1-b2` intersect
pub fn intersect_lines(
    a1: &Point2<f32>,
    a2: &Point2<f32>,
    b1: &Point2<f32>,
    b2: &Point2<f32>,
    intersection: Option<&mut Point2<f32>>,
) -> bool {
    let a = Linear2::line(*a1, *a2);
    let b = Linear2::line(*b1, *b2);
    !intersect_linear_2d(&a, &b, intersection).is_infinite()
}

pub fn intersect_segment_plane(
    start: &Point3<f32>,
    end: &Point3<f32>,
    plane: &Plane,
    intersection: Option<&mut Point3<f32>>,
) -> bool {
    let l = Linear3::segment(*start, *end);
    !intersect_linear_plane(&l, plane, intersection).is_infinite()
}

pub fn intersect_ray_plane(
    ray: &Ray,
    plane: &Plane,
    intersection: Option<&mut Point3<f32>>,
) -> bool {
    let l = Linear3::ray(ray.origin, ray.direction);
    !intersect_linear_plane(&l, plane, intersection).is_infinite()
}

/// Whether the infinite line through `first` and `second` meets the plane
pub fn intersect_line_plane(
    first: &Point3<f32>,
    second: &Point3<f32>,
    plane: &Plane,
    intersection: Option<&mut Point3<f32>>,
) -> bool {
    let l = Linear3::line(*first, *second);
    !intersect_linear_plane(&l, plane, intersection).is_infinite()
}

/// Nearest point to `point` on `first + t * direction` with
/// `t ∈ [1 - lower_scale, upper_scale]`.
///
/// A scale of 1 bounds that end at the linear's endpoint; an infinite scale
/// leaves it open. A direction shorter than the rounding error collapses the
/// linear to `first`.
pub fn nearest_scaled_point(
    first: &Point2<f32>,
    direction: &Vector2<f32>,
    lower_scale: f32,
    upper_scale: f32,
    point: &Point2<f32>,
) -> Point2<f32> {
    let length2 = direction.norm_squared();
    if length2 < FLOAT_ROUNDING_ERROR {
        return *first;
    }
    let t = (point - first).dot(direction) / length2;
    first + direction * clamp(t, 1.0 - lower_scale, upper_scale)
}

pub fn nearest_segment_point(
    start: &Point2<f32>,
    end: &Point2<f32>,
    point: &Point2<f32>,
) -> Point2<f32> {
    Linear2::segment(*start, *end).nearest_point(point)
}

/// Nearest point on the ray starting at `first` and passing through `second`
pub fn nearest_ray_point(
    first: &Point2<f32>,
    second: &Point2<f32>,
    point: &Point2<f32>,
) -> Point2<f32> {
    Linear2::new(*first, *second, false, Extent::RAY).nearest_point(point)
}

pub fn nearest_line_point(
    first: &Point2<f32>,
    second: &Point2<f32>,
    point: &Point2<f32>,
) -> Point2<f32> {
    Linear2::line(*first, *second).nearest_point(point)
}

/// Distance from `point` to the infinite line through `start` and `end`
pub fn distance_line_point(start: &Point2<f32>, end: &Point2<f32>, point: &Point2<f32>) -> f32 {
    let line = end - start;
    let length = line.norm();
    if length * length < FLOAT_ROUNDING_ERROR {
        return (point - start).norm();
    }
    let rel = point - start;
    cross2(rel.x, rel.y, line.x, line.y).abs() / length
}

pub fn distance_segment_point(start: &Point2<f32>, end: &Point2<f32>, point: &Point2<f32>) -> f32 {
    (nearest_segment_point(start, end, point) - point).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_crossing_segments() {
        let mut hit = Point2::origin();
        assert!(intersect_segments(
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(2.0, -2.0),
            &Point2::new(2.0, 2.0),
            Some(&mut hit),
        ));
        assert_relative_eq!(hit, Point2::new(2.0, 0.0));
    }

    #[test]
    fn test_bound_rejections_use_sentinels() {
        let a = Linear2::segment(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let beyond = Linear2::segment(Point2::new(3.0, -1.0), Point2::new(3.0, 1.0));
        let behind = Linear2::segment(Point2::new(-3.0, -1.0), Point2::new(-3.0, 1.0));

        let mut hit = Point2::origin();
        assert_eq!(intersect_linear_2d(&a, &beyond, Some(&mut hit)), f32::NEG_INFINITY);
        assert!(hit.x.is_nan());
        assert_eq!(intersect_linear_2d(&a, &behind, None), f32::INFINITY);

        let line = Linear2::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        assert_relative_eq!(intersect_linear_2d(&line, &beyond, None), 3.0);
    }

    #[test]
    fn test_second_linear_bounds_checked() {
        let line = Linear2::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let short = Linear2::segment(Point2::new(2.0, 1.0), Point2::new(2.0, 3.0));
        assert!(intersect_linear_2d(&line, &short, None).is_infinite());
        assert!(intersect_lines(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, 1.0),
            &Point2::new(2.0, 3.0),
            None,
        ));
    }

    #[test]
    fn test_parallel_uses_first_point_cross() {
        let a = Linear2::segment(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0));
        let b = Linear2::segment(Point2::new(0.0, 1.0), Point2::new(1.0, 1.0));
        let mut hit = Point2::origin();
        assert_eq!(intersect_linear_2d(&a, &b, Some(&mut hit)), f32::INFINITY);
        assert_eq!(hit, Point2::new(f32::INFINITY, f32::INFINITY));
        assert_eq!(intersect_linear_2d(&b, &a, None), f32::NEG_INFINITY);
    }

    #[test]
    fn test_rays() {
        let mut hit = Point2::origin();
        assert!(intersect_rays(
            &Point2::new(0.0, 0.0),
            &Vector2::new(1.0, 1.0),
            &Point2::new(4.0, 0.0),
            &Vector2::new(-1.0, 1.0),
            Some(&mut hit),
        ));
        assert_relative_eq!(hit, Point2::new(2.0, 2.0));

        assert!(!intersect_rays(
            &Point2::new(0.0, 0.0),
            &Vector2::new(-1.0, -1.0),
            &Point2::new(4.0, 0.0),
            &Vector2::new(-1.0, 1.0),
            None,
        ));
    }

    #[test]
    fn test_plane_engine() {
        let plane = Plane::new(Vector3::z(), -1.0);
        let mut hit = Point3::origin();
        assert!(intersect_segment_plane(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 4.0),
            &plane,
            Some(&mut hit),
        ));
        assert_relative_eq!(hit, Point3::new(0.0, 0.0, 1.0));

        let short = Linear3::segment(Point3::new(0.0, 0.0, 2.0), Point3::new(0.0, 0.0, 3.0));
        assert_eq!(intersect_linear_plane(&short, &plane, None), f32::NEG_INFINITY);

        let below = Linear3::segment(Point3::new(0.0, 0.0, -3.0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(intersect_linear_plane(&below, &plane, None), f32::INFINITY);

        assert!(intersect_line_plane(
            &Point3::new(0.0, 0.0, 2.0),
            &Point3::new(0.0, 0.0, 3.0),
            &plane,
            None,
        ));

        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(intersect_ray_plane(&ray, &plane, Some(&mut hit)));
        assert_relative_eq!(hit, Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_parallel_plane_cases() {
        let plane = Plane::new(Vector3::z(), -1.0);
        let inside = Linear3::segment(Point3::new(0.0, 0.0, 1.0), Point3::new(5.0, 0.0, 1.0));
        let mut hit = Point3::origin();
        assert_eq!(intersect_linear_plane(&inside, &plane, Some(&mut hit)), 0.0);
        assert_eq!(hit, Point3::new(0.0, 0.0, 1.0));

        let off = Linear3::line(Point3::new(0.0, 0.0, 2.0), Point3::new(5.0, 0.0, 2.0));
        assert_eq!(intersect_linear_plane(&off, &plane, None), f32::INFINITY);
    }

    #[test]
    fn test_nearest_points() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);

        assert_eq!(nearest_segment_point(&a, &b, &Point2::new(2.0, 3.0)), Point2::new(2.0, 0.0));
        assert_eq!(nearest_segment_point(&a, &b, &Point2::new(-2.0, 3.0)), a);
        assert_eq!(nearest_segment_point(&a, &b, &Point2::new(9.0, 3.0)), b);

        assert_eq!(nearest_ray_point(&a, &b, &Point2::new(9.0, 3.0)), Point2::new(9.0, 0.0));
        assert_eq!(nearest_ray_point(&a, &b, &Point2::new(-2.0, 3.0)), a);

        assert_eq!(nearest_line_point(&a, &b, &Point2::new(-2.0, 3.0)), Point2::new(-2.0, 0.0));

        assert_eq!(nearest_segment_point(&a, &a, &Point2::new(1.0, 1.0)), a);
    }

    #[test]
    fn test_nearest_point_direction_mode() {
        let ray = Linear2::ray(Point2::new(1.0, 1.0), Vector2::new(2.0, 0.0));
        assert_eq!(ray.nearest_point(&Point2::new(10.0, 5.0)), Point2::new(10.0, 1.0));

        let seg = Linear2::new(Point2::new(1.0, 1.0), Point2::new(2.0, 0.0), true, Extent::SEGMENT);
        assert_eq!(seg.nearest_point(&Point2::new(10.0, 5.0)), Point2::new(3.0, 1.0));
    }

    #[test]
    fn test_distances() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        assert_relative_eq!(distance_line_point(&a, &b, &Point2::new(10.0, 3.0)), 3.0);
        assert_relative_eq!(distance_segment_point(&a, &b, &Point2::new(7.0, 4.0)), 5.0);
    }
}
