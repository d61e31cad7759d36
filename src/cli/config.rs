// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Probe configuration for the `intersector` CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "intersector.toml";

/// How reports are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format: {}", other),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Report format
    pub output: OutputFormat,
    /// Colored text output
    pub color: bool,
    /// Cases per fuzz run
    pub fuzz_count: usize,
    /// Seed for fuzz runs
    pub fuzz_seed: u64,
    /// Triangle count above which ray casts go parallel
    pub parallel_threshold: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            color: true,
            fuzz_count: 10_000,
            fuzz_seed: 0x5eed,
            parallel_threshold: 4_096,
        }
    }
}

impl ProbeConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ProbeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// An explicit path must exist; otherwise `intersector.toml` is read when
    /// present and defaults are used when it is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `INTERSECTOR_*` overrides looked up through `var`
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(output) = var("INTERSECTOR_OUTPUT") {
            self.output = output.parse()?;
        }

        if let Some(count) = var("INTERSECTOR_FUZZ_COUNT") {
            self.fuzz_count = count
                .parse()
                .with_context(|| format!("Invalid INTERSECTOR_FUZZ_COUNT: {}", count))?;
        }

        if let Some(seed) = var("INTERSECTOR_FUZZ_SEED") {
            self.fuzz_seed = seed
                .parse()
                .with_context(|| format!("Invalid INTERSECTOR_FUZZ_SEED: {}", seed))?;
        }

        if let Some(threshold) = var("INTERSECTOR_PARALLEL_THRESHOLD") {
            self.parallel_threshold = threshold.parse().with_context(|| {
                format!("Invalid INTERSECTOR_PARALLEL_THRESHOLD: {}", threshold)
            })?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
