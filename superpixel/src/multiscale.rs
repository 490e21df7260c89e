//! Runs the segmenter at several parameter scales in parallel.

use rayon::prelude::*;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::config::SegmentationConfig;
use crate::error::Result;
use crate::pixel::PixelAccessor;
use crate::segmentation::{Segmentation, Segmenter};

/// Preset multipliers applied to every parameter of the base config.
#[derive(Debug, Display, EnumIter, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Scale {
    Small,
    Middle,
    Large,
}

impl Scale {
    pub fn factor(&self) -> f64 {
        match self {
            Scale::Small => 0.8,
            Scale::Middle => 1.6,
            Scale::Large => 5.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScaleSegmentation {
    pub scale: Scale,
    pub config: SegmentationConfig,
    pub segmentation: Segmentation,
}

#[derive(Debug, Clone)]
pub struct MultiScaleSegmenter {
    base: SegmentationConfig,
}

impl MultiScaleSegmenter {
    pub fn new(base: SegmentationConfig) -> Self {
        base.validate();
        Self { base }
    }

    pub fn base(&self) -> &SegmentationConfig {
        &self.base
    }

    /// Segments `image` once per [`Scale`]. Results come back in `Scale`
    /// order; the first failure is returned.
    pub fn run<P: PixelAccessor + Sync>(&self, image: &P) -> Result<Vec<ScaleSegmentation>> {
        let scales: Vec<Scale> = Scale::iter().collect();

        scales
            .into_par_iter()
            .map(|scale| {
                let config = self.base.scaled(scale.factor());
                let segmentation = Segmenter::new(config).segment(image)?;
                tracing::info!(
                    %scale,
                    sigma = config.sigma,
                    k = config.k,
                    min_size = config.min_size,
                    segments = segmentation.segment_count(),
                    "Segmented"
                );

                Ok(ScaleSegmentation {
                    scale,
                    config,
                    segmentation,
                })
            })
            .collect()
    }
}
