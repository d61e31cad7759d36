// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared scalar helpers

pub mod math;

pub use math::{clamp, is_zero, lerp, FLOAT_ROUNDING_ERROR};
