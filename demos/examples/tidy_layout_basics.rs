// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidy layout basics.
//!
//! Build an ordered tree, compute a tidy drawing, and print each node's
//! coordinates plus the bounding summary a renderer would consume.
//!
//! Run:
//! - `cargo run -p trunk_demos --example tidy_layout_basics`

use kurbo::Rect;
use trunk_tidy::Tidier;
use trunk_tree::{SearchTree, Visit};

fn main() {
    let mut tree = SearchTree::new(0);
    for k in [-2, -1, -4, -3, -5, 2, 1, 4, 3, 5] {
        tree.insert(k);
    }

    // Scale by 40 units per level, as a pixel-minded renderer might.
    let layout = Tidier::new()
        .layout_scaled(tree.tree(), tree.root(), 40.0)
        .expect("well-formed tree lays out");

    tree.tree().visit_preorder(tree.root(), |id, depth| {
        let p = layout.pos(id).expect("reachable node has a position");
        let key = tree.tree().value(id);
        println!("{:indent$}{key:>3} at ({:>6.1}, {:>6.1})", "", p.x, p.y, indent = depth * 2);
        Visit::Continue
    });

    println!(
        "bounds: {:?} ({} x {}), centered on {:?}",
        layout.bounds(),
        layout.width(),
        layout.height(),
        layout.center(),
    );

    // A renderer would pad the bounds into a viewport before drawing.
    let viewport: Rect = layout.bounds().inflate(20.0, 20.0);
    println!("viewport: {viewport:?}");
}
