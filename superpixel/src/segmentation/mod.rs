//! Adaptive-threshold graph segmentation.
//!
//! Edges are consumed in ascending weight order. Two regions merge when the
//! edge joining them is no heavier than either region's threshold, where a
//! region's threshold is the weight of its latest merge plus `k / size`.
//! Large homogeneous regions thus become harder to extend while small ones
//! still absorb similar neighbours. A second pass then forces every region
//! below `min_size` into an adjacent one.

#[cfg(test)]
mod tests;

use crate::config::SegmentationConfig;
use crate::disjoint_set::DisjointSetForest;
use crate::error::Result;
use crate::gaussian::GaussianSmoother;
use crate::graph::{build_graph, sort_edges, Edge};
use crate::labeling::LabelMap;
use crate::pixel::PixelAccessor;

// ============================================================================
// Threshold table
// ============================================================================

/// Per-representative merge threshold.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    k: f64,
    values: Vec<f64>,
}

impl ThresholdTable {
    /// Every vertex starts as a singleton with threshold `k / 1`.
    pub fn new(vertex_count: usize, k: f64) -> Self {
        Self {
            k,
            values: vec![threshold_fn(k, 1); vertex_count],
        }
    }

    #[inline]
    pub fn get(&self, root: usize) -> f64 {
        self.values[root]
    }

    /// Records a merge of weight `weight` that produced a region of `size`.
    #[inline]
    pub fn update(&mut self, root: usize, weight: f64, size: usize) {
        self.values[root] = weight + threshold_fn(self.k, size);
    }
}

#[inline]
fn threshold_fn(k: f64, size: usize) -> f64 {
    k / size as f64
}

// ============================================================================
// Main pass
// ============================================================================

/// One merge performed by the main pass, with both thresholds as they were
/// when the merge was decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub edge: Edge,
    pub root_a: usize,
    pub root_b: usize,
    pub threshold_a: f64,
    pub threshold_b: f64,
}

/// Segments a graph whose edges are already sorted ascending by weight.
pub fn segment_graph(sorted_edges: &[Edge], vertex_count: usize, k: f64) -> DisjointSetForest {
    segment_graph_with_observer(sorted_edges, vertex_count, k, |_| {})
}

/// Like [`segment_graph`], calling `on_merge` for every union performed.
pub fn segment_graph_with_observer<F>(
    sorted_edges: &[Edge],
    vertex_count: usize,
    k: f64,
    mut on_merge: F,
) -> DisjointSetForest
where
    F: FnMut(&MergeEvent),
{
    debug_assert!(
        sorted_edges
            .windows(2)
            .all(|pair| pair[0].weight <= pair[1].weight),
        "edges must be sorted by ascending weight"
    );

    let mut forest = DisjointSetForest::new(vertex_count);
    let mut thresholds = ThresholdTable::new(vertex_count, k);

    for edge in sorted_edges {
        let a = forest.find(edge.a as usize);
        let b = forest.find(edge.b as usize);
        if a == b {
            continue;
        }

        let threshold_a = thresholds.get(a);
        let threshold_b = thresholds.get(b);
        if edge.weight > threshold_a || edge.weight > threshold_b {
            continue;
        }

        let root = forest.union(a, b);
        thresholds.update(root, edge.weight, forest.size(root));

        on_merge(&MergeEvent {
            edge: *edge,
            root_a: a,
            root_b: b,
            threshold_a,
            threshold_b,
        });
    }

    forest
}

// ============================================================================
// Small region pass
// ============================================================================

/// Unions the endpoints of every edge that touches a region smaller than
/// `min_size`, regardless of weight. Returns the number of unions performed.
///
/// A region with no edge to another region stays below `min_size`.
pub fn merge_small_regions(forest: &mut DisjointSetForest, edges: &[Edge], min_size: usize) -> usize {
    let mut merges = 0;

    for edge in edges {
        let a = forest.find(edge.a as usize);
        let b = forest.find(edge.b as usize);
        if a != b && (forest.size(a) < min_size || forest.size(b) < min_size) {
            forest.union(a, b);
            merges += 1;
        }
    }

    merges
}

// ============================================================================
// Pipeline
// ============================================================================

/// Result of one segmentation run.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub labels: LabelMap,
    pub edge_count: usize,
    pub threshold_merges: usize,
    pub small_region_merges: usize,
}

impl Segmentation {
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.labels.segment_count()
    }
}

/// Runs smoothing, graph construction, both merge passes and labeling.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmentationConfig,
}

impl Segmenter {
    pub fn new(config: SegmentationConfig) -> Self {
        config.validate();
        Self { config }
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    pub fn segment<P: PixelAccessor>(&self, image: &P) -> Result<Segmentation> {
        let width = image.width();
        let height = image.height();

        let smoothed = GaussianSmoother::new(self.config.sigma).smooth(image)?;

        let mut edges = build_graph(&smoothed)?;
        sort_edges(&mut edges);

        let mut threshold_merges = 0;
        let mut forest =
            segment_graph_with_observer(&edges, width * height, self.config.k, |_| {
                threshold_merges += 1;
            });
        tracing::debug!(
            edges = edges.len(),
            merges = threshold_merges,
            regions = forest.count(),
            "Threshold pass finished"
        );

        let small_region_merges = merge_small_regions(&mut forest, &edges, self.config.min_size);
        tracing::debug!(
            merges = small_region_merges,
            regions = forest.count(),
            min_size = self.config.min_size,
            "Small region pass finished"
        );

        let labels = LabelMap::from_forest(&forest, width, height);
        debug_assert_eq!(labels.segment_count(), forest.count());

        Ok(Segmentation {
            labels,
            edge_count: edges.len(),
            threshold_merges,
            small_region_merges,
        })
    }
}
