//! Segmentation parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SIGMA: f64 = 0.5;
pub const DEFAULT_K: f64 = 100.0;
pub const DEFAULT_MIN_SIZE: usize = 100;

/// Parameters of one segmentation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Gaussian blur radius applied before building the graph.
    /// Values below 0.01 are clamped.
    pub sigma: f64,
    /// Threshold function parameter. A region of `size` pixels accepts
    /// edges up to `k / size` heavier than its last merge, so larger `k`
    /// yields larger regions.
    pub k: f64,
    /// Regions smaller than this are merged into a neighbour after the
    /// main pass.
    pub min_size: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            k: DEFAULT_K,
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

impl SegmentationConfig {
    pub fn new(sigma: f64, k: f64, min_size: usize) -> Self {
        Self { sigma, k, min_size }
    }

    /// Reports the first parameter outside the engine's contract.
    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.sigma.is_finite(),
            "sigma must be finite, got {}",
            self.sigma
        );
        anyhow::ensure!(
            self.k.is_finite() && self.k >= 0.0,
            "k must be finite and non-negative, got {}",
            self.k
        );
        anyhow::ensure!(
            self.min_size >= 1,
            "min_size must be at least 1, got {}",
            self.min_size
        );
        Ok(())
    }

    /// Panics on parameters outside the engine's contract.
    pub fn validate(&self) {
        if let Err(err) = self.check() {
            panic!("{}", err);
        }
    }

    /// Multiplies all three parameters by `factor`; `min_size` is truncated
    /// and kept at least 1.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            sigma: self.sigma * factor,
            k: self.k * factor,
            min_size: ((self.min_size as f64 * factor) as usize).max(1),
        }
    }

    /// Loads a YAML or JSON config, chosen by file extension, and rejects
    /// out-of-contract values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: Self = common::serde::read_file(path)?;
        config.check()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        common::serde::write_file(self, path)
    }
}
