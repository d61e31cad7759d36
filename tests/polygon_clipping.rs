// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon clipping, overlap and containment

use approx::assert_relative_eq;
use intersector::geometry::{Polygon, PolygonView};
use intersector::intersect::{
    clip_polygons, intersect_line_polygon, intersect_polygons, intersect_segment_polygon,
    point_in_polygon, point_in_polygon_view,
};
use intersector::GeometryError;
use nalgebra::Point2;

fn cw_rect(x: f32, y: f32, w: f32, h: f32) -> Polygon {
    Polygon::from_points(&[
        Point2::new(x, y),
        Point2::new(x, y + h),
        Point2::new(x + w, y + h),
        Point2::new(x + w, y),
    ])
}

fn u_shape() -> Vec<Point2<f32>> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 0.0),
        Point2::new(3.0, 3.0),
        Point2::new(2.0, 3.0),
        Point2::new(2.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 3.0),
        Point2::new(0.0, 3.0),
    ]
}

#[test]
fn test_clip_triangle_by_square() {
    let triangle = Polygon::from_points(&[
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 4.0),
        Point2::new(4.0, 0.0),
    ]);
    assert!(triangle.signed_area() < 0.0);
    let square = cw_rect(1.0, 1.0, 2.0, 2.0);

    let mut overlap = Polygon::default();
    assert!(clip_polygons(&triangle, &square, Some(&mut overlap)));
    assert_relative_eq!(overlap.signed_area().abs(), 2.0, epsilon = 1e-4);
    for p in overlap.points() {
        assert!(p.x + p.y <= 4.0 + 1e-4);
        assert!((1.0 - 1e-4..=3.0 + 1e-4).contains(&p.x));
        assert!((1.0 - 1e-4..=3.0 + 1e-4).contains(&p.y));
    }
}

#[test]
fn test_clip_subject_inside_clip() {
    let inner = cw_rect(1.0, 1.0, 1.0, 2.0);
    let outer = cw_rect(0.0, 0.0, 5.0, 5.0);
    let mut overlap = Polygon::default();
    assert!(clip_polygons(&inner, &outer, Some(&mut overlap)));
    assert_eq!(overlap.vertex_count(), 4);
    assert_relative_eq!(overlap.signed_area(), inner.signed_area(), epsilon = 1e-5);
}

#[test]
fn test_clip_miss_leaves_output_alone() {
    let a = cw_rect(0.0, 0.0, 1.0, 1.0);
    let b = cw_rect(4.0, 0.0, 1.0, 1.0);
    let mut overlap = cw_rect(9.0, 9.0, 1.0, 1.0);
    let before = overlap.clone();
    assert!(!clip_polygons(&a, &b, Some(&mut overlap)));
    assert_eq!(overlap, before);
}

#[test]
fn test_concave_point_in_polygon() {
    let ring = u_shape();
    assert!(point_in_polygon(&ring, &Point2::new(0.5, 2.0)));
    assert!(point_in_polygon(&ring, &Point2::new(1.5, 0.5)));
    assert!(!point_in_polygon(&ring, &Point2::new(1.5, 2.0)));
    assert!(!point_in_polygon(&ring, &Point2::new(4.0, 1.0)));
    // on an edge
    assert!(point_in_polygon(&ring, &Point2::new(3.0, 1.5)));
    assert!(!point_in_polygon(&[], &Point2::new(0.0, 0.0)));
}

#[test]
fn test_views_agree_with_point_lists() {
    let ring = u_shape();
    let mut buffer = vec![-1.0, -1.0];
    for p in &ring {
        buffer.extend([p.x, p.y]);
    }
    let view = PolygonView::new(&buffer, 2, ring.len() * 2).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            let p = Point2::new(x as f32 * 0.5 - 0.25, y as f32 * 0.5 - 0.25);
            assert_eq!(point_in_polygon(&ring, &p), point_in_polygon_view(&view, &p));
        }
    }
}

#[test]
fn test_window_validation() {
    let buffer = [0.0f32; 6];
    assert_eq!(
        PolygonView::new(&buffer, 0, 0).unwrap_err(),
        GeometryError::EmptyPolygon
    );
    assert_eq!(
        PolygonView::new(&buffer, 0, 3).unwrap_err(),
        GeometryError::OddCoordinateCount(3)
    );
    assert_eq!(
        PolygonView::new(&buffer, 4, 4).unwrap_err(),
        GeometryError::PolygonWindowOutOfBounds {
            offset: 4,
            end: 8,
            len: 6
        }
    );
    assert!(Polygon::new(vec![1.0, 2.0, 3.0]).is_err());
}

#[test]
fn test_general_polygon_overlap() {
    let big = cw_rect(0.0, 0.0, 10.0, 10.0);
    let small = cw_rect(4.0, 4.0, 1.0, 1.0);
    let wide = cw_rect(-1.0, 4.0, 12.0, 1.0);
    let tall = cw_rect(4.0, -1.0, 1.0, 12.0);
    let far = cw_rect(20.0, 20.0, 1.0, 1.0);

    fn v(p: &Polygon) -> PolygonView<'_> {
        p.view().unwrap()
    }
    assert!(intersect_polygons(&v(&big), &v(&small)));
    assert!(intersect_polygons(&v(&small), &v(&big)));
    assert!(intersect_polygons(&v(&wide), &v(&tall)));
    assert!(!intersect_polygons(&v(&big), &v(&far)));
}

#[test]
fn test_line_and_segment_against_polygon() {
    let square = cw_rect(0.0, 0.0, 2.0, 2.0);
    let view = square.view().unwrap();

    assert!(intersect_line_polygon(
        &Point2::new(10.0, 1.0),
        &Point2::new(11.0, 1.0),
        &view
    ));
    assert!(!intersect_line_polygon(
        &Point2::new(0.0, 5.0),
        &Point2::new(1.0, 5.0),
        &view
    ));

    assert!(intersect_segment_polygon(
        &Point2::new(-1.0, 1.0),
        &Point2::new(1.0, 1.0),
        &view
    ));
    assert!(!intersect_segment_polygon(
        &Point2::new(0.5, 1.0),
        &Point2::new(1.5, 1.0),
        &view
    ));
}
