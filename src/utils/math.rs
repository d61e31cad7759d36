// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::Point3;

/// Rounding error shared by every collinearity and zero test in the kernel
pub const FLOAT_ROUNDING_ERROR: f32 = 0.000001;

/// Check whether a value is zero within [`FLOAT_ROUNDING_ERROR`]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= FLOAT_ROUNDING_ERROR
}

/// Clamp a value between min and max
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// 2D cross product of the vectors (a, b) and (c, d)
pub fn cross2(a: f32, b: f32, c: f32, d: f32) -> f32 {
    a * d - b * c
}

/// Unsigned area of a 3D triangle
pub fn triangle_area_3d(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> f32 {
    (b - a).cross(&(c - a)).norm() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero_uses_rounding_error() {
        assert!(is_zero(0.0));
        assert!(is_zero(FLOAT_ROUNDING_ERROR));
        assert!(!is_zero(FLOAT_ROUNDING_ERROR * 2.0));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_triangle_area() {
        let area = triangle_area_3d(
            &Point3::new(0.0, 0.0, 1.0),
            &Point3::new(2.0, 0.0, 1.0),
            &Point3::new(0.0, 2.0, 1.0),
        );
        assert!((area - 2.0).abs() < 1e-6);
    }
}
