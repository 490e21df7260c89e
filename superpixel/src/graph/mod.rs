//! Weighted neighbour graph over the pixel grid.
//!
//! Vertices are pixels in row-major order (`y * width + x`) over the whole
//! image. Each pixel links to its right, down, down-right and up-right
//! neighbours when they exist, so every 8-connected pair is covered once.


use crate::error::Result;
use crate::pixel::PixelAccessor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
    /// Euclidean RGB distance between the endpoints.
    pub weight: f64,
}

/// Linear vertex id of pixel `(x, y)`.
#[inline]
pub fn vertex_index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Number of edges [`build_graph`] emits for a `width` x `height` grid.
pub fn edge_count(width: usize, height: usize) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let horizontal = (width - 1) * height;
    let vertical = width * (height - 1);
    let diagonal = 2 * (width - 1) * (height - 1);
    horizontal + vertical + diagonal
}

/// Builds the neighbour graph of `image`, weighting edges by color distance.
pub fn build_graph<P: PixelAccessor>(image: &P) -> Result<Vec<Edge>> {
    let width = image.width();
    let height = image.height();
    assert!(
        width * height <= u32::MAX as usize,
        "image with {} pixels exceeds vertex id range",
        width * height
    );

    let mut edges = Vec::with_capacity(edge_count(width, height));

    for y in 0..height {
        for x in 0..width {
            let a = vertex_index(x, y, width) as u32;
            let pixel = image.get(x, y)?;

            let mut link = |nx: usize, ny: usize| -> Result<()> {
                let neighbour = image.get(nx, ny)?;
                edges.push(Edge {
                    a,
                    b: vertex_index(nx, ny, width) as u32,
                    weight: pixel.color_distance(&neighbour),
                });
                Ok(())
            };

            let has_right = x + 1 < width;
            let has_down = y + 1 < height;

            if has_right {
                link(x + 1, y)?;
            }
            if has_down {
                link(x, y + 1)?;
            }
            if has_right && has_down {
                link(x + 1, y + 1)?;
            }
            if has_right && y > 0 {
                link(x + 1, y - 1)?;
            }
        }
    }

    debug_assert_eq!(edges.len(), edge_count(width, height));

    Ok(edges)
}

/// Sorts edges by ascending weight. The sort is stable, so equal weights keep
/// their construction order and results are reproducible.
pub fn sort_edges(edges: &mut [Edge]) {
    edges.sort_by(|lhs, rhs| lhs.weight.total_cmp(&rhs.weight));
}
