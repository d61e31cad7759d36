// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - value types consumed by the intersection routines

mod bbox;
mod mesh;
mod plane;
mod primitives;
mod ray;
mod shapes;

pub use bbox::BoundingBox;
pub use mesh::{TriangleMesh, Triangles};
pub use plane::{Plane, PlaneSide};
pub use primitives::{Primitive, PRIMITIVE_VERTEX_SIZE};
pub use ray::Ray;
pub use shapes::{Circle, MinimumTranslationVector, Polygon, PolygonView, Rectangle};
