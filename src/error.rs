// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Precondition violations reported by the kernel
//!
//! "No intersection" is never an error: it is a `false`, a `None` or an
//! infinite sentinel. These variants cover malformed inputs only, and every
//! operation that can produce one validates before touching any output.

use thiserror::Error;

/// Errors raised when a caller hands the kernel malformed input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A flat or indexed triangle collection whose length is not a whole
    /// number of triangles
    #[error("triangle collection of length {len} is not a multiple of {multiple}")]
    MalformedTriangles { len: usize, multiple: usize },

    /// A per-vertex layout too small to hold a position
    #[error("vertex size {0} is smaller than the 3 floats of a position")]
    VertexSizeTooSmall(usize),

    /// An index pointing past the end of the vertex buffer
    #[error("index {index} addresses vertex data beyond {available} floats")]
    IndexOutOfBounds { index: usize, available: usize },

    /// A polygon with no vertices where at least one is required
    #[error("polygon has no vertices")]
    EmptyPolygon,

    /// A flat polygon buffer with an odd number of coordinates
    #[error("polygon coordinate count {0} is odd")]
    OddCoordinateCount(usize),

    /// An offset/count window reaching past the end of its buffer
    #[error("polygon window {offset}..{end} exceeds buffer of length {len}")]
    PolygonWindowOutOfBounds { offset: usize, end: usize, len: usize },

    /// A split request whose vertex stride does not match the workspace
    #[error("triangle stride {actual} does not match split workspace stride {expected}")]
    StrideMismatch { expected: usize, actual: usize },
}

/// Result alias used throughout the kernel
pub type Result<T> = std::result::Result<T, GeometryError>;
