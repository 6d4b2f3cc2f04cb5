// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout throughput over growing trees: a balanced shape and a degenerate
//! spine, to confirm the contour-threaded measure pass scales linearly.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use trunk_tidy::Tidier;
use trunk_tree::SearchTree;

/// Keys in midpoint-first order, so insertion produces a balanced tree.
fn balanced_keys(lo: i64, hi: i64, keys: &mut Vec<i64>) {
    if lo > hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    keys.push(mid);
    balanced_keys(lo, mid - 1, keys);
    balanced_keys(mid + 1, hi, keys);
}

fn balanced_tree(n: i64) -> SearchTree<i64> {
    let mut keys = Vec::new();
    balanced_keys(0, n - 1, &mut keys);
    let mut tree = SearchTree::new(keys[0]);
    for &k in &keys[1..] {
        tree.insert(k);
    }
    tree
}

fn spine_tree(n: i64) -> SearchTree<i64> {
    let mut tree = SearchTree::new(0);
    for k in 1..n {
        tree.insert(k);
    }
    tree
}

fn bench_layout(c: &mut Criterion) {
    let tidier = Tidier::new();

    let mut group = c.benchmark_group("layout_balanced");
    for n in [255_i64, 4_095, 65_535] {
        let tree = balanced_tree(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| tidier.layout(tree.tree(), tree.root()).unwrap());
        });
    }
    group.finish();

    let mut group = c.benchmark_group("layout_spine");
    for n in [256_i64, 4_096] {
        let tree = spine_tree(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| tidier.layout(tree.tree(), tree.root()).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
