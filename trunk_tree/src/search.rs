// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered layer over [`Tree`]: comparison-based insertion and lookup.

use crate::tree::Tree;
use crate::types::NodeId;

/// A binary search tree of totally ordered keys.
///
/// Wraps a [`Tree<K>`] and keeps the binary-search invariant: every key in a
/// node's left subtree is strictly less than its key, every key in the right
/// subtree strictly greater, and no key appears twice. In-order traversal
/// therefore yields strictly increasing keys.
///
/// The current root is found by following parent links from the first node, so
/// it stays correct when callers restructure the tree with
/// [`Tree::rotate`] (which preserves the in-order sequence).
#[derive(Debug)]
pub struct SearchTree<K> {
    tree: Tree<K>,
    anchor: NodeId,
}

impl<K: Ord> SearchTree<K> {
    /// Create a search tree holding a single key.
    pub fn new(key: K) -> Self {
        let mut tree = Tree::new();
        let anchor = tree.push(key);
        Self { tree, anchor }
    }

    /// Insert `key`, descending by comparison from the current root.
    ///
    /// A key already present anywhere on the search path makes this a no-op.
    /// Returns `self` for chaining.
    pub fn insert(&mut self, key: K) -> &mut Self {
        let mut node = self.root();
        loop {
            match key.cmp(self.tree.value(node)) {
                core::cmp::Ordering::Greater => match self.tree.right(node) {
                    Some(r) => node = r,
                    None => {
                        let leaf = self.tree.push(key);
                        self.tree.set_right(node, Some(leaf));
                        break;
                    }
                },
                core::cmp::Ordering::Less => match self.tree.left(node) {
                    Some(l) => node = l,
                    None => {
                        let leaf = self.tree.push(key);
                        self.tree.set_left(node, Some(leaf));
                        break;
                    }
                },
                core::cmp::Ordering::Equal => break,
            }
        }
        self
    }

    /// Find the node holding `key`, descending by comparison from the current
    /// root. `None` when no such key exists.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut node = self.root();
        loop {
            match key.cmp(self.tree.value(node)) {
                core::cmp::Ordering::Greater => node = self.tree.right(node)?,
                core::cmp::Ordering::Less => node = self.tree.left(node)?,
                core::cmp::Ordering::Equal => return Some(node),
            }
        }
    }

    /// The current root of the search tree.
    pub fn root(&self) -> NodeId {
        self.tree.root_of(self.anchor)
    }

    /// The underlying node arena.
    pub fn tree(&self) -> &Tree<K> {
        &self.tree
    }

    /// The underlying node arena, mutably.
    ///
    /// Structural edits must keep the search invariant if [`find`](Self::find)
    /// and [`insert`](Self::insert) are to stay meaningful; [`Tree::rotate`]
    /// does, arbitrary re-wiring does not.
    pub fn tree_mut(&mut self) -> &mut Tree<K> {
        &mut self.tree
    }
}
