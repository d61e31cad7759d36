// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ray casts against triangles, spheres and axis-aligned boxes

use super::predicates::point_in_triangle_3d;
use crate::error::Result;
use crate::geometry::{BoundingBox, Plane, PlaneSide, Ray, Triangles};
use crate::utils::math::{is_zero, FLOAT_ROUNDING_ERROR};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Intersect a ray with triangle `(t1, t2, t3)` using Möller–Trumbore.
///
/// A ray parallel to the triangle only hits when its origin lies exactly in
/// the triangle's plane and inside the triangle; the hit is then the origin.
pub fn intersect_ray_triangle(
    ray: &Ray,
    t1: &Point3<f32>,
    t2: &Point3<f32>,
    t3: &Point3<f32>,
    intersection: Option<&mut Point3<f32>>,
) -> bool {
    let edge1 = t2 - t1;
    let edge2 = t3 - t1;

    let pvec = ray.direction.cross(&edge2);
    let det = edge1.dot(&pvec);
    if is_zero(det) {
        let plane = Plane::from_points(t1, t2, t3);
        if plane.test_point(&ray.origin) == PlaneSide::OnPlane
            && point_in_triangle_3d(&ray.origin, t1, t2, t3)
        {
            trace!("ray parallel to triangle, origin inside");
            if let Some(out) = intersection {
                *out = ray.origin;
            }
            return true;
        }
        return false;
    }

    let inv_det = 1.0 / det;

    let tvec = ray.origin - t1;
    let u = tvec.dot(&pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let qvec = tvec.cross(&edge1);
    let v = ray.direction.dot(&qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    let t = edge2.dot(&qvec) * inv_det;
    if t < 0.0 {
        return false;
    }

    if let Some(out) = intersection {
        *out = if t <= FLOAT_ROUNDING_ERROR {
            ray.origin
        } else {
            ray.end_point(t)
        };
    }
    true
}

/// Intersect a ray with a sphere. The ray direction must be normalized.
pub fn intersect_ray_sphere(
    ray: &Ray,
    center: &Point3<f32>,
    radius: f32,
    intersection: Option<&mut Point3<f32>>,
) -> bool {
    let len = ray.direction.dot(&(center - ray.origin));
    if len < 0.0 {
        return false;
    }
    let dst2 = (center - ray.end_point(len)).norm_squared();
    let r2 = radius * radius;
    if dst2 > r2 {
        return false;
    }
    if let Some(out) = intersection {
        *out = ray.end_point(len - (r2 - dst2).sqrt());
    }
    true
}

/// Ray parameter of the first point inside the box, or `None` on a miss.
///
/// An origin inside the box (faces included) yields `Some(0.0)`. Otherwise
/// only the faces the ray can approach are tested.
pub fn ray_bounds_distance(ray: &Ray, bbox: &BoundingBox) -> Option<f32> {
    if bbox.contains(&ray.origin) {
        return Some(0.0);
    }

    let o = ray.origin;
    let d = ray.direction;
    let mut lowest: Option<f32> = None;

    // (axis, face coordinate, approaching from below)
    let faces = [
        (0, bbox.min.x, true),
        (0, bbox.max.x, false),
        (1, bbox.min.y, true),
        (1, bbox.max.y, false),
        (2, bbox.min.z, true),
        (2, bbox.max.z, false),
    ];

    for (axis, face, from_below) in faces {
        let approaches = if from_below {
            o[axis] <= face && d[axis] > 0.0
        } else {
            o[axis] >= face && d[axis] < 0.0
        };
        if !approaches {
            continue;
        }
        let t = (face - o[axis]) / d[axis];
        if t < 0.0 {
            continue;
        }
        let p = ray.end_point(t);
        let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);
        let on_face = p[a] >= bbox.min[a]
            && p[a] <= bbox.max[a]
            && p[b] >= bbox.min[b]
            && p[b] <= bbox.max[b];
        if on_face && lowest.map_or(true, |l| t < l) {
            lowest = Some(t);
        }
    }
    lowest
}

/// Intersect a ray with a box. The reported point is clamped into the box.
pub fn intersect_ray_bounds(
    ray: &Ray,
    bbox: &BoundingBox,
    intersection: Option<&mut Point3<f32>>,
) -> bool {
    let Some(t) = ray_bounds_distance(ray, bbox) else {
        return false;
    };
    if let Some(out) = intersection {
        *out = bbox.clamp_point(&ray.end_point(t));
    }
    true
}

/// Slab test against a box given by centre and full dimensions
pub fn intersect_ray_bounds_fast_center(
    ray: &Ray,
    center: &Point3<f32>,
    dimensions: &Vector3<f32>,
) -> bool {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let div = 1.0 / ray.direction[axis];
        let half = dimensions[axis] * 0.5;
        let mut lo = ((center[axis] - half) - ray.origin[axis]) * div;
        let mut hi = ((center[axis] + half) - ray.origin[axis]) * div;
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        t_min = t_min.max(lo);
        t_max = t_max.min(hi);
    }
    t_max >= 0.0 && t_max >= t_min
}

/// Boolean-only slab test
pub fn intersect_ray_bounds_fast(ray: &Ray, bbox: &BoundingBox) -> bool {
    intersect_ray_bounds_fast_center(ray, &bbox.center(), &bbox.dimensions())
}

/// Whether the plane passes through the box: the box's projection radius
/// onto the normal covers the centre's signed distance.
///
/// Signed distance is `n·c + d` here because [`Plane`] stores `d` so that
/// `n·p + d = 0` on the plane; for a plane stored as `n·p = distance` the
/// same test reads `n·c - distance`.
pub fn intersect_bounds_plane_fast(bbox: &BoundingBox, plane: &Plane) -> bool {
    let half = bbox.dimensions() * 0.5;
    let n = plane.normal;
    let radius = half.x * n.x.abs() + half.y * n.y.abs() + half.z * n.z.abs();
    plane.distance(&bbox.center()).abs() <= radius
}

#[derive(Debug, Clone, Copy)]
struct TriangleHit {
    index: usize,
    dist2: f32,
    point: Point3<f32>,
}

fn hit_triangle(ray: &Ray, triangles: &Triangles<'_>, index: usize) -> Option<TriangleHit> {
    let [a, b, c] = triangles.triangle(index);
    let mut point = Point3::origin();
    if intersect_ray_triangle(ray, &a, &b, &c, Some(&mut point)) {
        Some(TriangleHit {
            index,
            dist2: (point - ray.origin).norm_squared(),
            point,
        })
    } else {
        None
    }
}

fn closer(a: TriangleHit, b: TriangleHit) -> TriangleHit {
    match a.dist2.total_cmp(&b.dist2).then(a.index.cmp(&b.index)) {
        std::cmp::Ordering::Greater => b,
        _ => a,
    }
}

/// Nearest hit of a ray against a triangle collection.
///
/// The collection is validated first; a malformed one is an error and no
/// triangle is tested. Among several hits the one closest to the ray origin
/// wins, ties going to the earlier triangle.
pub fn intersect_ray_triangles(
    ray: &Ray,
    triangles: Triangles<'_>,
    intersection: Option<&mut Point3<f32>>,
) -> Result<bool> {
    validate(&triangles)?;

    let mut best: Option<TriangleHit> = None;
    for index in 0..triangles.len() {
        if let Some(hit) = hit_triangle(ray, &triangles, index) {
            best = Some(match best {
                Some(current) => closer(current, hit),
                None => hit,
            });
        }
    }
    Ok(write_best(best, intersection))
}

/// [`intersect_ray_triangles`] spread over the rayon thread pool. Returns
/// the same hit as the sequential scan.
pub fn intersect_ray_triangles_par(
    ray: &Ray,
    triangles: Triangles<'_>,
    intersection: Option<&mut Point3<f32>>,
) -> Result<bool> {
    validate(&triangles)?;

    let best = (0..triangles.len())
        .into_par_iter()
        .filter_map(|index| hit_triangle(ray, &triangles, index))
        .reduce_with(closer);
    Ok(write_best(best, intersection))
}

fn validate(triangles: &Triangles<'_>) -> Result<()> {
    if let Err(e) = triangles.validate() {
        debug!(error = %e, "rejected triangle collection");
        return Err(e);
    }
    Ok(())
}

fn write_best(best: Option<TriangleHit>, intersection: Option<&mut Point3<f32>>) -> bool {
    match best {
        Some(hit) => {
            if let Some(out) = intersection {
                *out = hit.point;
            }
            true
        }
        None => false,
    }
}
