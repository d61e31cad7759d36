// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle collections
//!
//! [`TriangleMesh`] owns an interleaved vertex buffer plus an index buffer.
//! [`Triangles`] is the borrowed form accepted by the nearest-hit ray query,
//! covering flat triangle soups, indexed buffers and point lists.

use super::BoundingBox;
use crate::error::{GeometryError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Indexed triangle mesh with `vertex_size` floats per vertex.
///
/// The first three floats of each vertex are its position; any remaining
/// floats are free-form attributes (normals, UVs, colors).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub vertex_size: usize,
}

impl TriangleMesh {
    pub fn new(vertex_size: usize) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            vertex_size,
        }
    }

    pub fn with_capacity(vertex_size: usize, vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * vertex_size),
            indices: Vec::with_capacity(triangle_count * 3),
            vertex_size,
        }
    }

    /// Add a vertex and return its index. `data` is truncated or zero-padded
    /// to the mesh's vertex size.
    pub fn add_vertex(&mut self, data: &[f32]) -> u32 {
        let index = self.vertex_count() as u32;
        for i in 0..self.vertex_size {
            self.vertices.push(data.get(i).copied().unwrap_or(0.0));
        }
        index
    }

    pub fn add_triangle(&mut self, indices: [u32; 3]) {
        self.indices.extend_from_slice(&indices);
    }

    pub fn vertex_count(&self) -> usize {
        if self.vertex_size == 0 {
            0
        } else {
            self.vertices.len() / self.vertex_size
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Point3<f32> {
        let o = i * self.vertex_size;
        Point3::new(self.vertices[o], self.vertices[o + 1], self.vertices[o + 2])
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for i in 0..self.vertex_count() {
            bbox.expand_to_include(&self.position(i));
        }
        bbox
    }

    /// Borrow the mesh as an indexed triangle collection
    pub fn triangles(&self) -> Triangles<'_> {
        Triangles::Indexed {
            vertices: &self.vertices,
            indices: &self.indices,
            vertex_size: self.vertex_size,
        }
    }

    /// Expand into a flat list of 9 floats per triangle
    pub fn triangle_soup(&self) -> Vec<f32> {
        let mut soup = Vec::with_capacity(self.indices.len() * 3);
        for &index in &self.indices {
            let p = self.position(index as usize);
            soup.extend_from_slice(&[p.x, p.y, p.z]);
        }
        soup
    }

    /// Expand into a list of 3 positions per triangle
    pub fn corner_points(&self) -> Vec<Point3<f32>> {
        self.indices
            .iter()
            .map(|&index| self.position(index as usize))
            .collect()
    }
}

/// Borrowed triangle collection
#[derive(Debug, Clone, Copy)]
pub enum Triangles<'a> {
    /// 9 floats per triangle
    Flat(&'a [f32]),
    /// 3 indices per triangle into a buffer of `vertex_size` floats per vertex
    Indexed {
        vertices: &'a [f32],
        indices: &'a [u32],
        vertex_size: usize,
    },
    /// 3 points per triangle
    Listed(&'a [Point3<f32>]),
}

impl<'a> Triangles<'a> {
    /// Check the collection is well formed before any triangle is read
    pub fn validate(&self) -> Result<()> {
        match *self {
            Triangles::Flat(data) => {
                if data.len() % 9 != 0 {
                    return Err(GeometryError::MalformedTriangles {
                        len: data.len(),
                        multiple: 9,
                    });
                }
            }
            Triangles::Indexed {
                vertices,
                indices,
                vertex_size,
            } => {
                if indices.len() % 3 != 0 {
                    return Err(GeometryError::MalformedTriangles {
                        len: indices.len(),
                        multiple: 3,
                    });
                }
                if vertex_size < 3 {
                    return Err(GeometryError::VertexSizeTooSmall(vertex_size));
                }
                for &index in indices {
                    let index = index as usize;
                    let end = index
                        .checked_mul(vertex_size)
                        .and_then(|start| start.checked_add(3));
                    if end.map_or(true, |end| end > vertices.len()) {
                        return Err(GeometryError::IndexOutOfBounds {
                            index,
                            available: vertices.len(),
                        });
                    }
                }
            }
            Triangles::Listed(points) => {
                if points.len() % 3 != 0 {
                    return Err(GeometryError::MalformedTriangles {
                        len: points.len(),
                        multiple: 3,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of whole triangles in the collection
    pub fn len(&self) -> usize {
        match *self {
            Triangles::Flat(data) => data.len() / 9,
            Triangles::Indexed { indices, .. } => indices.len() / 3,
            Triangles::Listed(points) => points.len() / 3,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Corners of triangle `i`. The collection must have been validated.
    pub fn triangle(&self, i: usize) -> [Point3<f32>; 3] {
        match *self {
            Triangles::Flat(data) => {
                let t = &data[i * 9..i * 9 + 9];
                [
                    Point3::new(t[0], t[1], t[2]),
                    Point3::new(t[3], t[4], t[5]),
                    Point3::new(t[6], t[7], t[8]),
                ]
            }
            Triangles::Indexed {
                vertices,
                indices,
                vertex_size,
            } => {
                let corner = |k: usize| {
                    let o = indices[i * 3 + k] as usize * vertex_size;
                    Point3::new(vertices[o], vertices[o + 1], vertices[o + 2])
                };
                [corner(0), corner(1), corner(2)]
            }
            Triangles::Listed(points) => [points[i * 3], points[i * 3 + 1], points[i * 3 + 2]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        let mut mesh = TriangleMesh::new(5);
        mesh.add_vertex(&[0.0, 0.0, 0.0, 0.0, 0.0]);
        mesh.add_vertex(&[1.0, 0.0, 0.0, 1.0, 0.0]);
        mesh.add_vertex(&[1.0, 1.0, 0.0, 1.0, 1.0]);
        mesh.add_vertex(&[0.0, 1.0, 0.0]);
        mesh.add_triangle([0, 1, 2]);
        mesh.add_triangle([0, 2, 3]);
        mesh
    }

    #[test]
    fn test_mesh_layout() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.position(3), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.vertices.len(), 20);
        assert_eq!(mesh.bounding_box().max, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_flattened_forms_agree() {
        let mesh = quad();
        let soup = mesh.triangle_soup();
        let points = mesh.corner_points();
        assert_eq!(soup.len(), 18);

        let indexed = mesh.triangles();
        let flat = Triangles::Flat(&soup);
        let listed = Triangles::Listed(&points);
        for t in [indexed, flat, listed] {
            assert!(t.validate().is_ok());
            assert_eq!(t.len(), 2);
            assert_eq!(t.triangle(1)[2], Point3::new(0.0, 1.0, 0.0));
        }
    }

    #[test]
    fn test_validation_errors() {
        let data = [0.0f32; 10];
        assert_eq!(
            Triangles::Flat(&data).validate(),
            Err(GeometryError::MalformedTriangles { len: 10, multiple: 9 })
        );

        let vertices = [0.0f32; 9];
        let bad_size = Triangles::Indexed {
            vertices: &vertices,
            indices: &[0, 1, 2],
            vertex_size: 2,
        };
        assert_eq!(bad_size.validate(), Err(GeometryError::VertexSizeTooSmall(2)));

        let bad_index = Triangles::Indexed {
            vertices: &vertices,
            indices: &[0, 1, 3],
            vertex_size: 3,
        };
        assert_eq!(
            bad_index.validate(),
            Err(GeometryError::IndexOutOfBounds { index: 3, available: 9 })
        );
    }

    #[test]
    fn test_validation_overflowing_offsets() {
        let vertices = [0.0f32; 9];
        // index * vertex_size fits in usize but adding the xyz span does not
        let huge_stride = Triangles::Indexed {
            vertices: &vertices,
            indices: &[1, 1, 1],
            vertex_size: usize::MAX - 1,
        };
        assert_eq!(
            huge_stride.validate(),
            Err(GeometryError::IndexOutOfBounds { index: 1, available: 9 })
        );

        let wrapping = Triangles::Indexed {
            vertices: &vertices,
            indices: &[0, 0, 2],
            vertex_size: usize::MAX,
        };
        assert_eq!(
            wrapping.validate(),
            Err(GeometryError::IndexOutOfBounds { index: 2, available: 9 })
        );
    }
}
