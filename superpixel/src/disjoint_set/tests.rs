//! Tests for the disjoint-set forest.

use rand::prelude::*;

use super::*;

#[test]
fn test_new_creates_singletons() {
    let mut forest = DisjointSetForest::new(5);
    assert_eq!(forest.len(), 5);
    assert_eq!(forest.count(), 5);

    for i in 0..5 {
        assert_eq!(forest.find(i), i);
        assert_eq!(forest.size(i), 1);
        assert_eq!(forest.rank(i), 0);
    }
}

#[test]
fn test_empty_forest() {
    let forest = DisjointSetForest::new(0);
    assert!(forest.is_empty());
    assert_eq!(forest.count(), 0);
    assert_eq!(forest.roots().count(), 0);
}

#[test]
fn test_union_sums_sizes_and_decrements_count() {
    let mut forest = DisjointSetForest::new(4);

    let root = forest.union(0, 1);
    assert_eq!(forest.size(root), 2);
    assert_eq!(forest.count(), 3);

    let other = forest.union(2, 3);
    let merged = forest.union(root, other);
    assert_eq!(forest.size(merged), 4);
    assert_eq!(forest.count(), 1);

    for i in 0..4 {
        assert_eq!(forest.find(i), merged);
    }
}

#[test]
fn test_union_attaches_lower_rank_under_higher() {
    let mut forest = DisjointSetForest::new(3);

    let pair = forest.union(0, 1);
    assert_eq!(forest.rank(pair), 1);

    // Singleton (rank 0) goes under the rank 1 root regardless of argument order.
    let root = forest.union(2, pair);
    assert_eq!(root, pair);
    assert_eq!(forest.rank(root), 1);
}

#[test]
fn test_union_rank_tie_picks_second_root() {
    let mut forest = DisjointSetForest::new(2);
    let root = forest.union(0, 1);
    assert_eq!(root, 1);
    assert_eq!(forest.rank(1), 1);
    assert!(!forest.is_root(0));
}

#[test]
#[should_panic(expected = "union expects roots")]
fn test_union_rejects_non_roots() {
    let mut forest = DisjointSetForest::new(3);
    forest.union(0, 1);
    forest.union(0, 2);
}

#[test]
#[should_panic]
fn test_out_of_range_find_panics() {
    let mut forest = DisjointSetForest::new(3);
    forest.find(3);
}

#[test]
fn test_find_compresses_path() {
    let mut forest = DisjointSetForest::new(4);
    // Build a chain deeper than one level: 0 -> 1, then {0,1} -> 3 via rank.
    let a = forest.union(0, 1);
    let b = forest.union(2, 3);
    let root = forest.union(a, b);

    let leaf = (0..4).find(|&i| forest.root(i) == root && i != a && i != b && i != root);
    let leaf = leaf.expect("a leaf two levels below the root");

    assert_eq!(forest.find(leaf), root);
    assert_eq!(forest.subsets[leaf].parent as usize, root);
}

#[test]
fn test_root_matches_find() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut forest = DisjointSetForest::new(200);

    for _ in 0..150 {
        let a = forest.find(rng.random_range(0..200));
        let b = forest.find(rng.random_range(0..200));
        if a != b {
            forest.union(a, b);
        }
    }

    for i in 0..200 {
        let read_only = forest.root(i);
        assert_eq!(forest.find(i), read_only);
    }
}

#[test]
fn test_find_is_idempotent_and_sizes_add_up() {
    let mut rng = StdRng::seed_from_u64(42);
    let n = 1000;
    let mut forest = DisjointSetForest::new(n);

    for _ in 0..800 {
        let a = forest.find(rng.random_range(0..n));
        let b = forest.find(rng.random_range(0..n));
        if a == b {
            continue;
        }

        let size_a = forest.size(a);
        let size_b = forest.size(b);
        let count = forest.count();

        let root = forest.union(a, b);
        assert_eq!(forest.size(root), size_a + size_b);
        assert_eq!(forest.count(), count - 1);
    }

    for x in 0..n {
        let r = forest.find(x);
        assert_eq!(forest.find(r), r, "find(find({x})) != find({x})");
    }

    let roots: Vec<usize> = forest.roots().collect();
    assert_eq!(roots.len(), forest.count());
    let total: usize = roots.iter().map(|&r| forest.size(r)).sum();
    assert_eq!(total, n);
}

#[test]
fn test_many_random_operations_complete() {
    let mut rng = StdRng::seed_from_u64(12345);
    let n = 100_000;
    let mut forest = DisjointSetForest::new(n);

    for _ in 0..1_000_000 {
        let a = forest.find(rng.random_range(0..n));
        let b = forest.find(rng.random_range(0..n));
        if a != b && rng.random_bool(0.5) {
            forest.union(a, b);
        }
    }

    // Ranks stay logarithmic with union by rank.
    let max_rank = forest.roots().map(|r| forest.rank(r)).max().unwrap_or(0);
    assert!(max_rank <= 17, "rank {} exceeds log2(n)", max_rank);
    assert_eq!(forest.len(), n);
}
