//! Disjoint-set forest with union by rank and path compression.
//!
//! Every element starts as its own singleton subset. Subset roots carry the
//! element count of their subset, which the segmentation threshold depends on.

#[cfg(test)]
mod tests;

/// Bookkeeping for one element of the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Subset {
    parent: u32,
    /// Upper bound on the height of the subtree rooted here.
    rank: u32,
    /// Element count; meaningful only while this element is a root.
    size: u32,
}

#[derive(Debug, Clone)]
pub struct DisjointSetForest {
    subsets: Vec<Subset>,
    count: usize,
}

impl DisjointSetForest {
    /// Creates `elements` singleton subsets.
    pub fn new(elements: usize) -> Self {
        assert!(
            elements <= u32::MAX as usize,
            "DisjointSetForest supports at most {} elements, got {}",
            u32::MAX,
            elements
        );

        let subsets = (0..elements as u32)
            .map(|i| Subset {
                parent: i,
                rank: 0,
                size: 1,
            })
            .collect();

        Self {
            subsets,
            count: elements,
        }
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    /// Number of distinct subsets.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Finds the root of `x` and points every node on the path directly at it.
    pub fn find(&mut self, x: usize) -> usize {
        let root = self.root(x);

        let mut current = x;
        while current != root {
            let next = self.subsets[current].parent as usize;
            self.subsets[current].parent = root as u32;
            current = next;
        }

        root
    }

    /// Finds the root of `x` without modifying the forest.
    pub fn root(&self, x: usize) -> usize {
        let mut current = x;
        loop {
            let parent = self.subsets[current].parent as usize;
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    #[inline]
    pub fn is_root(&self, x: usize) -> bool {
        self.subsets[x].parent as usize == x
    }

    /// Merges the subsets rooted at `a` and `b` and returns the new root.
    ///
    /// Both arguments must be distinct roots; resolve them with [`find`](Self::find) first.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        assert!(
            self.is_root(a) && self.is_root(b),
            "union expects roots, got {} and {}",
            a,
            b
        );
        assert_ne!(a, b, "union of a subset with itself");

        let rank_a = self.subsets[a].rank;
        let rank_b = self.subsets[b].rank;

        let (child, root) = if rank_a > rank_b { (b, a) } else { (a, b) };

        self.subsets[child].parent = root as u32;
        self.subsets[root].size += self.subsets[child].size;
        if rank_a == rank_b {
            self.subsets[root].rank += 1;
        }
        self.count -= 1;

        root
    }

    /// Element count of the subset rooted at `root`.
    #[inline]
    pub fn size(&self, root: usize) -> usize {
        debug_assert!(self.is_root(root), "size queried for non-root {}", root);
        self.subsets[root].size as usize
    }

    #[inline]
    pub fn rank(&self, root: usize) -> u32 {
        self.subsets[root].rank
    }

    /// Iterates current roots in ascending index order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.subsets.len()).filter(|&i| self.is_root(i))
    }
}
