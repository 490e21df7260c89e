//! Tests for the threshold pass, the small region pass and the full pipeline.

use std::collections::HashSet;

use rand::prelude::*;

use super::*;
use crate::graph::edge_count;
use crate::pixel::{Image, Pixel, PixelFormat};

/// 4x4 image, black on the left half and white on the right half.
fn split_image() -> Image {
    Image::from_fn(4, 4, PixelFormat::Rgb8, |x, _| {
        if x < 2 {
            Pixel::BLACK
        } else {
            Pixel::WHITE
        }
    })
}

fn noise_image(width: usize, height: usize, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    Image::from_fn(width, height, PixelFormat::Rgb8, |x, y| {
        // Four flat quadrants with mild noise on top.
        let base = match (x * 2 / width, y * 2 / height) {
            (0, 0) => [200, 40, 40],
            (1, 0) => [40, 200, 40],
            (0, _) => [40, 40, 200],
            _ => [200, 200, 40],
        };
        let jitter = |c: i32, rng: &mut StdRng| (c + rng.random_range(-4..=4)).clamp(0, 255) as u8;
        Pixel::rgb(
            jitter(base[0], &mut rng),
            jitter(base[1], &mut rng),
            jitter(base[2], &mut rng),
        )
    })
}

fn sorted_graph(image: &Image, sigma: f64) -> Vec<Edge> {
    let smoothed = GaussianSmoother::new(sigma).smooth(image).unwrap();
    let mut edges = build_graph(&smoothed).unwrap();
    sort_edges(&mut edges);
    edges
}

// ============================================================================
// Threshold table
// ============================================================================

#[test]
fn test_threshold_table_starts_at_k() {
    let table = ThresholdTable::new(3, 50.0);
    for v in 0..3 {
        assert_eq!(table.get(v), 50.0);
    }
}

#[test]
fn test_threshold_table_update() {
    let mut table = ThresholdTable::new(3, 50.0);
    table.update(1, 2.0, 4);
    assert_eq!(table.get(1), 2.0 + 50.0 / 4.0);
    assert_eq!(table.get(0), 50.0);
}

// ============================================================================
// Threshold pass
// ============================================================================

#[test]
fn test_heavy_edge_is_rejected() {
    let edges = [Edge { a: 0, b: 1, weight: 11.0 }];
    let forest = segment_graph(&edges, 2, 10.0);
    assert_eq!(forest.count(), 2);
}

#[test]
fn test_edge_at_threshold_merges() {
    let edges = [Edge { a: 0, b: 1, weight: 10.0 }];
    let forest = segment_graph(&edges, 2, 10.0);
    assert_eq!(forest.count(), 1);
}

#[test]
fn test_threshold_shrinks_as_region_grows() {
    // 0-1 merge at weight 0 gives threshold 0 + 10/2 = 5, so the 6.0 edge
    // is rejected even though a fresh singleton would accept it.
    let edges = [
        Edge { a: 0, b: 1, weight: 0.0 },
        Edge { a: 1, b: 2, weight: 6.0 },
        Edge { a: 3, b: 4, weight: 6.0 },
    ];
    let mut forest = segment_graph(&edges, 5, 10.0);

    assert_eq!(forest.find(0), forest.find(1));
    assert_ne!(forest.find(1), forest.find(2));
    assert_eq!(forest.find(3), forest.find(4));
    assert_eq!(forest.count(), 3);
}

#[test]
fn test_threshold_includes_last_merge_weight() {
    // After merging on weight 8 the pair's threshold is 8 + 10/2 = 13.
    let edges = [
        Edge { a: 0, b: 1, weight: 8.0 },
        Edge { a: 1, b: 2, weight: 9.0 },
    ];
    let forest = segment_graph(&edges, 3, 10.0);
    assert_eq!(forest.count(), 1);
}

#[test]
fn test_zero_k_merges_only_identical_colors() {
    let edges = [
        Edge { a: 0, b: 1, weight: 0.0 },
        Edge { a: 1, b: 2, weight: 0.5 },
    ];
    let forest = segment_graph(&edges, 3, 0.0);
    assert_eq!(forest.count(), 2);
}

#[test]
fn test_merge_events_respect_both_thresholds() {
    let image = noise_image(24, 18, 9);
    let edges = sorted_graph(&image, 0.8);
    let k = 150.0;

    let mut events = Vec::new();
    let forest = segment_graph_with_observer(&edges, 24 * 18, k, |event| events.push(*event));

    assert!(!events.is_empty());
    assert_eq!(events.len(), 24 * 18 - forest.count());

    for event in &events {
        assert!(event.edge.weight <= event.threshold_a);
        assert!(event.edge.weight <= event.threshold_b);
        assert_ne!(event.root_a, event.root_b);
    }

    // Replay: rebuild the thresholds from the recorded merges and check they
    // match what the engine saw.
    let mut forest = DisjointSetForest::new(24 * 18);
    let mut table = ThresholdTable::new(24 * 18, k);
    for event in &events {
        let a = forest.find(event.edge.a as usize);
        let b = forest.find(event.edge.b as usize);
        assert_eq!((a, b), (event.root_a, event.root_b));
        assert_eq!(table.get(a), event.threshold_a);
        assert_eq!(table.get(b), event.threshold_b);

        let root = forest.union(a, b);
        table.update(root, event.edge.weight, forest.size(root));
    }
}

#[test]
fn test_segmentation_is_deterministic() {
    let image = noise_image(30, 20, 3);
    let config = SegmentationConfig::new(0.8, 200.0, 5);

    let first = Segmenter::new(config).segment(&image).unwrap();
    let second = Segmenter::new(config).segment(&image).unwrap();
    assert_eq!(first.labels, second.labels);
}

// ============================================================================
// Small region pass
// ============================================================================

#[test]
fn test_small_regions_are_absorbed() {
    // Chain 0-1-2-3 with every edge too heavy for the threshold pass. The
    // middle edge comes last, when both pairs have already reached min_size.
    let edges = [
        Edge { a: 0, b: 1, weight: 100.0 },
        Edge { a: 2, b: 3, weight: 100.0 },
        Edge { a: 1, b: 2, weight: 100.0 },
    ];
    let mut forest = segment_graph(&edges, 4, 1.0);
    assert_eq!(forest.count(), 4);

    let merges = merge_small_regions(&mut forest, &edges, 2);
    assert_eq!(merges, 2);
    assert_eq!(forest.count(), 2);
    for root in forest.roots().collect::<Vec<_>>() {
        assert!(forest.size(root) >= 2);
    }
}

#[test]
fn test_min_size_one_is_a_no_op() {
    let edges = [Edge { a: 0, b: 1, weight: 100.0 }];
    let mut forest = segment_graph(&edges, 2, 1.0);
    assert_eq!(merge_small_regions(&mut forest, &edges, 1), 0);
    assert_eq!(forest.count(), 2);
}

#[test]
fn test_isolated_region_stays_small() {
    // Vertex 2 has no edges, so nothing can absorb it.
    let edges = [Edge { a: 0, b: 1, weight: 100.0 }];
    let mut forest = segment_graph(&edges, 3, 1.0);
    merge_small_regions(&mut forest, &edges, 5);

    assert_eq!(forest.count(), 2);
    let r = forest.find(2);
    assert_eq!(forest.size(r), 1);
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_flat_image_is_one_region() {
    let image = Image::filled(4, 4, PixelFormat::Rgb8, Pixel::rgb(90, 140, 30));

    for k in [0.0, 1.0, 100.0, 10_000.0] {
        for min_size in [1, 3, 16, 100] {
            for sigma in [0.0, 0.5, 2.0] {
                let config = SegmentationConfig::new(sigma, k, min_size);
                let result = Segmenter::new(config).segment(&image).unwrap();
                assert_eq!(
                    result.segment_count(),
                    1,
                    "k={} min_size={} sigma={}",
                    k,
                    min_size,
                    sigma
                );
            }
        }
    }
}

#[test]
fn test_split_image_is_two_regions() {
    let config = SegmentationConfig::new(0.01, 10.0, 1);
    let result = Segmenter::new(config).segment(&split_image()).unwrap();

    assert_eq!(result.segment_count(), 2);
    assert_eq!(result.small_region_merges, 0);
    assert_eq!(result.edge_count, edge_count(4, 4));

    let labels = &result.labels;
    for y in 0..4 {
        assert_eq!(labels.get(0, y), labels.get(1, y));
        assert_eq!(labels.get(2, y), labels.get(3, y));
        assert_ne!(labels.get(1, y), labels.get(2, y));
    }
}

#[test]
fn test_split_image_with_large_min_size_is_one_region() {
    let config = SegmentationConfig::new(0.01, 10.0, 20);
    let result = Segmenter::new(config).segment(&split_image()).unwrap();

    assert_eq!(result.segment_count(), 1);
    assert_eq!(result.small_region_merges, 1);
}

#[test]
fn test_label_map_covers_every_pixel() {
    let width = 37;
    let height = 23;
    let image = noise_image(width, height, 77);
    let config = SegmentationConfig::new(0.5, 300.0, 20);
    let result = Segmenter::new(config).segment(&image).unwrap();

    let labels = result.labels.labels();
    assert_eq!(labels.len(), width * height);

    let distinct: HashSet<u32> = labels.iter().copied().collect();
    assert_eq!(distinct.len(), result.segment_count());

    // Every id is a pixel index that labels itself.
    for &id in &distinct {
        assert!((id as usize) < width * height);
        assert_eq!(labels[id as usize], id);
    }

    let sizes = result.labels.segment_sizes();
    assert_eq!(sizes.values().sum::<usize>(), width * height);
    assert!(sizes.values().all(|&size| size >= 20));
}

#[test]
fn test_quadrants_are_found() {
    // The blur leaves a band of mixed colors along the quadrant borders that
    // forms its own region of a few dozen pixels. A min_size above the band
    // but below a quadrant folds it into one neighbour.
    let image = noise_image(32, 32, 5);
    let config = SegmentationConfig::new(0.8, 300.0, 100);
    let result = Segmenter::new(config).segment(&image).unwrap();

    assert_eq!(result.segment_count(), 4);
    assert!(result.small_region_merges >= 1);
    let labels = &result.labels;
    assert_ne!(labels.get(0, 0), labels.get(31, 0));
    assert_ne!(labels.get(0, 0), labels.get(0, 31));
    assert_ne!(labels.get(31, 31), labels.get(0, 31));
    assert_eq!(labels.get(2, 2), labels.get(13, 13));
}

#[test]
fn test_blur_band_survives_small_min_size() {
    let image = noise_image(32, 32, 5);
    let config = SegmentationConfig::new(0.8, 300.0, 50);
    let result = Segmenter::new(config).segment(&image).unwrap();

    // Four quadrants plus the border band, each at least min_size.
    assert!(result.segment_count() > 4);
    assert!(result.labels.segment_sizes().values().all(|&size| size >= 50));

    let labels = &result.labels;
    let corners = [
        labels.get(0, 0),
        labels.get(31, 0),
        labels.get(0, 31),
        labels.get(31, 31),
    ];
    let distinct: HashSet<_> = corners.iter().collect();
    assert_eq!(distinct.len(), 4);
}

#[test]
fn test_gray_image_segments() {
    let image = Image::from_fn(6, 4, PixelFormat::Gray8, |x, _| {
        Pixel::gray(if x < 3 { 10 } else { 240 })
    });
    let config = SegmentationConfig::new(0.01, 5.0, 1);
    let result = Segmenter::new(config).segment(&image).unwrap();
    assert_eq!(result.segment_count(), 2);
}

#[test]
fn test_single_pixel_image() {
    let image = Image::filled(1, 1, PixelFormat::Rgb8, Pixel::WHITE);
    let result = Segmenter::new(SegmentationConfig::default())
        .segment(&image)
        .unwrap();
    assert_eq!(result.segment_count(), 1);
    assert_eq!(result.edge_count, 0);
    assert_eq!(result.labels.labels(), &[0]);
}

#[test]
#[should_panic(expected = "min_size must be at least 1")]
fn test_invalid_config_panics() {
    Segmenter::new(SegmentationConfig::new(0.5, 10.0, 0));
}
