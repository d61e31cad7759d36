// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Query scenes: named intersection queries loaded from TOML or JSON
//!
//! ```toml
//! [[queries]]
//! name = "crossing diagonals"
//! kind = "segment_segment"
//! a = [[0.0, 0.0], [2.0, 2.0]]
//! b = [[0.0, 2.0], [2.0, 0.0]]
//! ```

use crate::error::Result as GeometryResult;
use crate::geometry::{BoundingBox, MinimumTranslationVector, Plane, Polygon, Ray};
use crate::intersect::{
    clip_polygons, intersect_ray_bounds, intersect_ray_sphere, intersect_ray_triangle,
    intersect_segments, overlap_convex_polygons, point_in_polygon, split_triangle, SplitTriangle,
};
use anyhow::{Context, Result};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

type P2 = [f32; 2];
type P3 = [f32; 3];

/// A file full of queries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySpec {
    pub name: String,
    #[serde(flatten)]
    pub query: Query,
}

/// One query, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    SegmentSegment { a: [P2; 2], b: [P2; 2] },
    PointInPolygon { polygon: Vec<P2>, point: P2 },
    /// Both rings clockwise
    ClipPolygons { subject: Vec<P2>, clip: Vec<P2> },
    /// Both rings counter-clockwise
    ConvexOverlap { a: Vec<P2>, b: Vec<P2> },
    RayTriangle { origin: P3, direction: P3, triangle: [P3; 3] },
    RaySphere { origin: P3, direction: P3, center: P3, radius: f32 },
    RayBox { origin: P3, direction: P3, min: P3, max: P3 },
    /// Plane given as `normal . p + d = 0`
    SplitTriangle { triangle: [P3; 3], normal: P3, d: f32 },
}

/// Result of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Crossing {
        hit: bool,
        point: Option<Point2<f32>>,
    },
    Containment {
        inside: bool,
    },
    Clip {
        overlap: bool,
        polygon: Vec<Point2<f32>>,
        area: f32,
    },
    Overlap {
        overlap: bool,
        mtv: Option<MinimumTranslationVector>,
    },
    Hit {
        hit: bool,
        point: Option<Point3<f32>>,
    },
    Split {
        num_front: usize,
        num_back: usize,
        total: usize,
        front: Vec<[Point3<f32>; 3]>,
        back: Vec<[Point3<f32>; 3]>,
    },
}

impl Outcome {
    /// Whether the query found an intersection, overlap or containment.
    /// A split counts as positive when the triangle was cut.
    pub fn is_positive(&self) -> bool {
        match self {
            Outcome::Crossing { hit, .. } | Outcome::Hit { hit, .. } => *hit,
            Outcome::Containment { inside } => *inside,
            Outcome::Clip { overlap, .. } | Outcome::Overlap { overlap, .. } => *overlap,
            Outcome::Split { total, .. } => *total > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub name: String,
    pub kind: &'static str,
    #[serde(flatten)]
    pub outcome: Outcome,
}

fn p2(p: &P2) -> Point2<f32> {
    Point2::new(p[0], p[1])
}

fn p3(p: &P3) -> Point3<f32> {
    Point3::new(p[0], p[1], p[2])
}

fn ray(origin: &P3, direction: &P3) -> Ray {
    Ray::new(p3(origin), Vector3::new(direction[0], direction[1], direction[2])).normalized()
}

fn polygon(points: &[P2]) -> Polygon {
    let points: Vec<Point2<f32>> = points.iter().map(p2).collect();
    Polygon::from_points(&points)
}

fn triangles(data: &[f32], stride: usize) -> Vec<[Point3<f32>; 3]> {
    data.chunks_exact(stride * 3)
        .map(|t| {
            let p = |k: usize| Point3::new(t[k * stride], t[k * stride + 1], t[k * stride + 2]);
            [p(0), p(1), p(2)]
        })
        .collect()
}

impl Query {
    pub fn kind(&self) -> &'static str {
        match self {
            Query::SegmentSegment { .. } => "segment_segment",
            Query::PointInPolygon { .. } => "point_in_polygon",
            Query::ClipPolygons { .. } => "clip_polygons",
            Query::ConvexOverlap { .. } => "convex_overlap",
            Query::RayTriangle { .. } => "ray_triangle",
            Query::RaySphere { .. } => "ray_sphere",
            Query::RayBox { .. } => "ray_box",
            Query::SplitTriangle { .. } => "split_triangle",
        }
    }

    /// Run the query through the kernel
    pub fn evaluate(&self) -> GeometryResult<Outcome> {
        let outcome = match self {
            Query::SegmentSegment { a, b } => {
                let mut point = Point2::origin();
                let hit = intersect_segments(
                    &p2(&a[0]),
                    &p2(&a[1]),
                    &p2(&b[0]),
                    &p2(&b[1]),
                    Some(&mut point),
                );
                Outcome::Crossing {
                    hit,
                    point: hit.then_some(point),
                }
            }
            Query::PointInPolygon { polygon, point } => {
                let ring: Vec<Point2<f32>> = polygon.iter().map(p2).collect();
                Outcome::Containment {
                    inside: point_in_polygon(&ring, &p2(point)),
                }
            }
            Query::ClipPolygons { subject, clip } => {
                let mut overlap = Polygon::default();
                let hit = clip_polygons(&polygon(subject), &polygon(clip), Some(&mut overlap));
                if hit {
                    Outcome::Clip {
                        overlap: true,
                        area: overlap.signed_area().abs(),
                        polygon: overlap.points(),
                    }
                } else {
                    Outcome::Clip {
                        overlap: false,
                        polygon: Vec::new(),
                        area: 0.0,
                    }
                }
            }
            Query::ConvexOverlap { a, b } => {
                let a = polygon(a);
                let b = polygon(b);
                let mut mtv = MinimumTranslationVector::default();
                let overlap = overlap_convex_polygons(&a.view()?, &b.view()?, Some(&mut mtv));
                Outcome::Overlap {
                    overlap,
                    mtv: overlap.then_some(mtv),
                }
            }
            Query::RayTriangle {
                origin,
                direction,
                triangle,
            } => {
                let mut point = Point3::origin();
                let hit = intersect_ray_triangle(
                    &ray(origin, direction),
                    &p3(&triangle[0]),
                    &p3(&triangle[1]),
                    &p3(&triangle[2]),
                    Some(&mut point),
                );
                Outcome::Hit {
                    hit,
                    point: hit.then_some(point),
                }
            }
            Query::RaySphere {
                origin,
                direction,
                center,
                radius,
            } => {
                let mut point = Point3::origin();
                let hit = intersect_ray_sphere(
                    &ray(origin, direction),
                    &p3(center),
                    *radius,
                    Some(&mut point),
                );
                Outcome::Hit {
                    hit,
                    point: hit.then_some(point),
                }
            }
            Query::RayBox {
                origin,
                direction,
                min,
                max,
            } => {
                let bbox = BoundingBox::new(p3(min), p3(max));
                let mut point = Point3::origin();
                let hit = intersect_ray_bounds(&ray(origin, direction), &bbox, Some(&mut point));
                Outcome::Hit {
                    hit,
                    point: hit.then_some(point),
                }
            }
            Query::SplitTriangle {
                triangle,
                normal,
                d,
            } => {
                let plane = Plane::new(Vector3::new(normal[0], normal[1], normal[2]), *d);
                let data: Vec<f32> = triangle.iter().flatten().copied().collect();
                let mut split = SplitTriangle::new(3)?;
                split_triangle(&data, &plane, &mut split)?;
                Outcome::Split {
                    num_front: split.num_front(),
                    num_back: split.num_back(),
                    total: split.total(),
                    front: triangles(split.front(), 3),
                    back: triangles(split.back(), 3),
                }
            }
        };
        Ok(outcome)
    }
}

impl QuerySpec {
    pub fn evaluate(&self) -> Result<QueryReport> {
        let outcome = self
            .query
            .evaluate()
            .with_context(|| format!("Query '{}' failed", self.name))?;
        Ok(QueryReport {
            name: self.name.clone(),
            kind: self.query.kind(),
            outcome,
        })
    }
}

impl Scene {
    /// Load a scene; `.json` files are parsed as JSON, anything else as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {:?}", path))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let scene = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON scene: {:?}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML scene: {:?}", path))?
        };
        Ok(scene)
    }

    /// Evaluate every query in order
    pub fn evaluate(&self) -> Result<Vec<QueryReport>> {
        self.queries.iter().map(QuerySpec::evaluate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SCENE: &str = r#"
[[queries]]
name = "diagonals"
kind = "segment_segment"
a = [[0, 0], [2, 2]]
b = [[0, 2], [2, 0]]

[[queries]]
name = "box"
kind = "ray_box"
origin = [-5.0, 0.5, 0.5]
direction = [1.0, 0.0, 0.0]
min = [0.0, 0.0, 0.0]
max = [1.0, 1.0, 1.0]

[[queries]]
name = "cut"
kind = "split_triangle"
triangle = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0]]
normal = [1.0, 0.0, 0.0]
d = -1.0
"#;

    #[test]
    fn test_toml_scene_evaluates() {
        let scene: Scene = toml::from_str(SCENE).unwrap();
        let reports = scene.evaluate().unwrap();
        assert_eq!(reports.len(), 3);

        match &reports[0].outcome {
            Outcome::Crossing { hit, point } => {
                assert!(hit);
                assert_relative_eq!(point.unwrap(), Point2::new(1.0, 1.0));
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        assert_eq!(reports[1].kind, "ray_box");
        assert_eq!(
            reports[1].outcome,
            Outcome::Hit {
                hit: true,
                point: Some(Point3::new(0.0, 0.5, 0.5))
            }
        );

        match &reports[2].outcome {
            Outcome::Split {
                num_front,
                num_back,
                total,
                front,
                back,
            } => {
                assert_eq!((*num_front, *num_back, *total), (2, 1, 3));
                assert_eq!(front.len(), 2);
                assert_eq!(back.len(), 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(reports.iter().all(|r| r.outcome.is_positive()));
    }

    #[test]
    fn test_json_report_shape() {
        let spec: QuerySpec = serde_json::from_str(
            r#"{"name": "inside", "kind": "point_in_polygon",
                "polygon": [[0, 0], [1, 0], [1, 1], [0, 1]], "point": [0.5, 0.5]}"#,
        )
        .unwrap();
        let report = spec.evaluate().unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["name"], "inside");
        assert_eq!(json["kind"], "point_in_polygon");
        assert_eq!(json["inside"], true);
    }

    #[test]
    fn test_empty_convex_polygon_is_reported() {
        let query = Query::ConvexOverlap {
            a: Vec::new(),
            b: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
        };
        assert!(query.evaluate().is_err());
    }
}
