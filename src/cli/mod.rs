// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the intersector probe

pub mod config;
pub mod fuzz;
pub mod reporter;
pub mod runner;
pub mod scene;

pub use config::{OutputFormat, ProbeConfig};
pub use fuzz::{FuzzReport, Fuzzer, FuzzerConfig, Violation};
pub use reporter::Reporter;
pub use runner::{RaycastResult, Runner};
pub use scene::{Outcome, Query, QueryReport, QuerySpec, Scene};
