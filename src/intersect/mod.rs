// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Intersection, overlap and containment routines
//!
//! Every routine is a pure function of its inputs. Optional results are
//! written through `Option<&mut T>` parameters; no state is shared between
//! calls, so all of them can be used from any number of threads.

mod linear;
mod polygon;
mod predicates;
mod raycast;
mod sat;
mod shapes2d;
mod triangle_splitting;

pub use linear::{
    distance_line_point, distance_segment_point, intersect_line_plane, intersect_linear_2d,
    intersect_linear_plane, intersect_lines, intersect_ray_plane, intersect_rays,
    intersect_segment_plane, intersect_segments, nearest_line_point, nearest_ray_point,
    nearest_scaled_point, nearest_segment_point, Extent, Linear2, Linear3,
};
pub use polygon::{
    clip_polygons, intersect_line_polygon, intersect_polygon_edges, intersect_polygons,
    intersect_segment_polygon,
};
pub use predicates::{
    point_in_polygon, point_in_polygon_view, point_in_triangle, point_in_triangle_3d,
    point_line_side, point_line_side_3d,
};
pub use raycast::{
    intersect_bounds_plane_fast, intersect_ray_bounds, intersect_ray_bounds_fast,
    intersect_ray_bounds_fast_center, intersect_ray_sphere, intersect_ray_triangle,
    intersect_ray_triangles, intersect_ray_triangles_par, ray_bounds_distance,
};
pub use sat::overlap_convex_polygons;
pub use shapes2d::{
    intersect_rectangles, intersect_segment_circle, intersect_segment_circle_mtv,
    intersect_segment_rectangle, overlap_circle_rectangle, overlap_circles, overlap_rectangles,
};
pub use triangle_splitting::{split_triangle, SplitTriangle};
