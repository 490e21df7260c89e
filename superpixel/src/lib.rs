//! Superpixel - graph-based image segmentation.
//!
//! Splits an image into regions of perceptually similar pixels using the
//! Felzenszwalb-Huttenlocher adaptive threshold criterion over an
//! 8-connected pixel graph.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use superpixel::{Image, SegmentationConfig, Segmenter};
//!
//! let image = Image::read_file("photo.png")?;
//! let result = Segmenter::new(SegmentationConfig::default()).segment(&image)?;
//!
//! println!("Found {} segments", result.segment_count());
//! ```

pub mod config;
pub mod disjoint_set;
pub mod error;
pub mod gaussian;
pub mod graph;
pub mod labeling;
pub mod multiscale;
pub mod pixel;
pub mod segmentation;

pub mod prelude;

// ============================================================================
// Pixel buffers
// ============================================================================

pub use error::{Error, Result};
pub use pixel::{Image, Pixel, PixelAccessor, PixelFormat};

// ============================================================================
// Segmentation
// ============================================================================

pub use config::SegmentationConfig;
pub use disjoint_set::DisjointSetForest;
pub use gaussian::GaussianSmoother;
pub use graph::{build_graph, sort_edges, Edge};
pub use labeling::LabelMap;
pub use multiscale::{MultiScaleSegmenter, Scale, ScaleSegmentation};
pub use segmentation::{
    merge_small_regions, segment_graph, segment_graph_with_observer, MergeEvent, Segmentation,
    Segmenter,
};
