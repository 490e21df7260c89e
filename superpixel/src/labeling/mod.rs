//! Per-pixel segment labels derived from a finished forest.


use std::collections::BTreeMap;

use common::Buffer2;
use rand::Rng;

use crate::disjoint_set::DisjointSetForest;
use crate::pixel::{Image, Pixel, PixelFormat};

/// Representative id for every pixel, row-major over the full image.
///
/// Ids are forest roots, i.e. the linear index of one pixel of the segment.
/// They are not dense; use [`LabelMap::compact`] for `0..n` ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Buffer2<u32>,
    segment_count: usize,
}

impl LabelMap {
    pub fn from_forest(forest: &DisjointSetForest, width: usize, height: usize) -> Self {
        assert_eq!(
            forest.len(),
            width * height,
            "forest size must equal width * height"
        );

        let labels = Buffer2::from_fn(width, height, |x, y| forest.root(y * width + x) as u32);
        let segment_count = count_representatives(&labels);

        Self {
            labels,
            segment_count,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.labels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.labels.height()
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Raw row-major labels.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        self.labels.values()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.labels.get(x, y).copied()
    }

    /// Pixel count per representative id.
    pub fn segment_sizes(&self) -> BTreeMap<u32, usize> {
        let mut sizes = BTreeMap::new();
        for &label in self.labels.iter() {
            *sizes.entry(label).or_insert(0) += 1;
        }
        sizes
    }

    /// Remaps ids to `0..segment_count` in order of first appearance
    /// (row-major scan).
    pub fn compact(&self) -> Buffer2<u32> {
        let mut dense = vec![u32::MAX; self.labels.len()];
        let mut next = 0u32;

        let values = self
            .labels
            .iter()
            .map(|&label| {
                let slot = &mut dense[label as usize];
                if *slot == u32::MAX {
                    *slot = next;
                    next += 1;
                }
                *slot
            })
            .collect();

        debug_assert_eq!(next as usize, self.segment_count);

        Buffer2::new(self.width(), self.height(), values)
    }

    /// Paints each segment with a random color drawn from `rng`.
    ///
    /// Colors are drawn in order of first appearance, so a seeded generator
    /// reproduces the same picture.
    pub fn colorize<R: Rng>(&self, rng: &mut R) -> Image {
        let palette: Vec<Pixel> = (0..self.segment_count)
            .map(|_| Pixel::rgb(rng.random(), rng.random(), rng.random()))
            .collect();
        let dense = self.compact();

        Image::from_fn(self.width(), self.height(), PixelFormat::Rgb8, |x, y| {
            palette[dense[(x, y)] as usize]
        })
    }
}

/// A representative is the root pixel itself, so it labels its own index.
fn count_representatives(labels: &Buffer2<u32>) -> usize {
    labels
        .iter()
        .enumerate()
        .filter(|&(i, &label)| label as usize == i)
        .count()
}
