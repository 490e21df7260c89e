//! Common imports for segmenting images.
//!
//! ```rust,ignore
//! use superpixel::prelude::*;
//! ```

pub use crate::config::SegmentationConfig;
pub use crate::error::{Error, Result};
pub use crate::labeling::LabelMap;
pub use crate::multiscale::{MultiScaleSegmenter, Scale};
pub use crate::pixel::{Image, Pixel, PixelAccessor, PixelFormat};
pub use crate::segmentation::{Segmentation, Segmenter};
