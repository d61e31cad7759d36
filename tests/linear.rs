// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Segments, rays and lines through the public API

use approx::assert_relative_eq;
use intersector::geometry::{Plane, Ray};
use intersector::intersect::{
    distance_line_point, distance_segment_point, intersect_linear_2d, intersect_linear_plane,
    intersect_ray_plane, intersect_segments, nearest_line_point, nearest_ray_point,
    nearest_segment_point, Extent, Linear2, Linear3,
};
use nalgebra::{Point2, Point3, Vector2, Vector3};

#[test]
fn test_star_of_segments_meets_at_centre() {
    let center = Point2::new(1.5, -0.5);
    let spokes: Vec<(Point2<f32>, Point2<f32>)> = (0..8)
        .map(|k| {
            let angle = k as f32 * std::f32::consts::PI / 8.0;
            let d = Vector2::new(angle.cos(), angle.sin()) * 3.0;
            (center - d, center + d)
        })
        .collect();

    for (i, a) in spokes.iter().enumerate() {
        for b in spokes.iter().skip(i + 1) {
            let mut hit = Point2::origin();
            assert!(intersect_segments(&a.0, &a.1, &b.0, &b.1, Some(&mut hit)));
            assert_relative_eq!(hit, center, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_ray_against_segment_sentinels() {
    let ray = Linear2::ray(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
    let ahead = Linear2::segment(Point2::new(5.0, -1.0), Point2::new(5.0, 1.0));
    let behind = Linear2::segment(Point2::new(-5.0, -1.0), Point2::new(-5.0, 1.0));
    let below = Linear2::segment(Point2::new(5.0, -2.0), Point2::new(5.0, -1.0));

    let mut hit = Point2::origin();
    assert_relative_eq!(intersect_linear_2d(&ray, &ahead, Some(&mut hit)), 5.0);
    assert_relative_eq!(hit, Point2::new(5.0, 0.0));

    // lower bound of the ray
    assert_eq!(intersect_linear_2d(&ray, &behind, None), f32::INFINITY);
    // upper bound of the second segment
    assert_eq!(intersect_linear_2d(&ray, &below, Some(&mut hit)), f32::NEG_INFINITY);
    assert!(hit.x.is_nan() && hit.y.is_nan());
}

#[test]
fn test_custom_extent_with_direction() {
    // Open below, bounded above: everything up to first + direction
    let capped = Linear2::new(
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.0),
        true,
        Extent {
            lower: false,
            upper: true,
        },
    );
    let cross_behind = Linear2::line(Point2::new(-7.0, -1.0), Point2::new(-7.0, 1.0));
    let cross_beyond = Linear2::line(Point2::new(3.0, -1.0), Point2::new(3.0, 1.0));
    assert_relative_eq!(intersect_linear_2d(&capped, &cross_behind, None), -3.5);
    assert_eq!(intersect_linear_2d(&capped, &cross_beyond, None), f32::NEG_INFINITY);
    assert_eq!(capped.point_at(0.5), Point2::new(1.0, 0.0));
}

#[test]
fn test_plane_parameter_along_segment() {
    let plane =
        Plane::from_point_normal(&Point3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 4.0));
    let seg = Linear3::segment(Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 8.0));
    let mut hit = Point3::origin();
    assert_relative_eq!(intersect_linear_plane(&seg, &plane, Some(&mut hit)), 0.25);
    assert_relative_eq!(hit, Point3::new(1.0, 1.0, 2.0));

    let away = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::z());
    assert!(!intersect_ray_plane(&away, &plane, None));
}

#[test]
fn test_nearest_points_respect_extent() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(2.0, 0.0);

    let beyond = Point2::new(5.0, 1.0);
    assert_eq!(nearest_segment_point(&a, &b, &beyond), b);
    assert_relative_eq!(nearest_ray_point(&a, &b, &beyond), Point2::new(5.0, 0.0));
    assert_relative_eq!(nearest_line_point(&a, &b, &beyond), Point2::new(5.0, 0.0));

    let behind = Point2::new(-2.0, 1.0);
    assert_eq!(nearest_segment_point(&a, &b, &behind), a);
    assert_eq!(nearest_ray_point(&a, &b, &behind), a);
    assert_relative_eq!(nearest_line_point(&a, &b, &behind), Point2::new(-2.0, 0.0));

    // a collapsed segment is its start point
    assert_eq!(nearest_segment_point(&a, &a, &beyond), a);
}

#[test]
fn test_point_distances() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(2.0, 0.0);
    let p = Point2::new(5.0, 3.0);
    assert_relative_eq!(distance_line_point(&a, &b, &p), 3.0);
    assert_relative_eq!(distance_segment_point(&a, &b, &p), 18.0f32.sqrt());
    assert_relative_eq!(distance_line_point(&a, &a, &p), 34.0f32.sqrt());
}
