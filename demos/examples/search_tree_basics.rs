// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search tree basics.
//!
//! Build a small ordered tree, look keys up, traverse with early exit, and
//! rotate a node without disturbing the key order.
//!
//! Run:
//! - `cargo run -p trunk_demos --example search_tree_basics`

use trunk_tree::{SearchTree, Visit};

fn main() {
    // Build a small ordered tree
    let mut tree = SearchTree::new(0);
    for k in [-2, -1, -3, 2, 3, 1] {
        tree.insert(k);
    }

    // In-order traversal yields sorted keys
    let mut keys = Vec::new();
    tree.tree().visit_inorder(tree.root(), |id, _| {
        keys.push(*tree.tree().value(id));
        Visit::Continue
    });
    println!("in-order keys: {keys:?}");
    assert!(keys.windows(2).all(|w| w[0] < w[1]));

    // Early exit: stop preorder as soon as a negative key shows up
    let mut visited = 0;
    tree.tree().visit_preorder(tree.root(), |id, _| {
        visited += 1;
        if *tree.tree().value(id) < 0 {
            Visit::Stop
        } else {
            Visit::Continue
        }
    });
    println!("preorder visited {visited} nodes before stopping");

    // Rotate a node toward the root; the in-order sequence is preserved
    let two = tree.find(&2).expect("key 2 was inserted");
    tree.tree_mut().rotate(two);
    let mut after = Vec::new();
    tree.tree().visit_inorder(tree.root(), |id, _| {
        after.push(*tree.tree().value(id));
        Visit::Continue
    });
    println!("in-order keys after rotation: {after:?}");
    assert_eq!(keys, after, "rotation must preserve key order");
}
