// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trunk Tree: a generational-arena binary tree with parent back-references.
//!
//! The building block under the `trunk` workspace: a [`Tree`] owns binary nodes
//! in generational slots, so parent links can be plain non-owning [`NodeId`]s
//! with no reference cycles to manage.
//!
//! - Structural mutation: [`Tree::set_left`]/[`Tree::set_right`]/[`Tree::set_side`],
//!   raw single [rotation](Tree::rotate), subtree [cloning](Tree::clone_subtree)
//!   and [removal](Tree::remove).
//! - Queries: [`Tree::side_of`], [`Tree::children`], [`Tree::sibling`],
//!   [`Tree::root_of`], [`Tree::is_leaf`], generational [liveness](Tree::is_alive).
//! - Traversal protocols: [`Tree::visit_preorder`], [`Tree::visit_inorder`],
//!   [`Tree::visit_postorder`], each with cooperative early exit via the typed
//!   [`Visit`] sentinel (no exceptions, no unwinding; every recursive call site
//!   checks and re-returns [`Visit::Stop`]).
//! - An ordered layer: [`SearchTree`] adds comparison-based
//!   [`insert`](SearchTree::insert)/[`find`](SearchTree::find) on top of the
//!   same arena.
//!
//! Layout of the computed drawing lives in the sibling `trunk_tidy` crate; this
//! crate knows nothing about coordinates.
//!
//! ## Parent pointers are advisory
//!
//! Installing a child over an occupied slot does not clear the displaced node's
//! parent pointer. A detached subtree therefore remembers where it used to hang
//! until it is reattached; queries like [`Tree::sibling`] and [`Tree::side_of`]
//! treat such nodes as unregistered rather than trusting the stale pointer.
//!
//! ## Minimal usage
//!
//! ```
//! use trunk_tree::{SearchTree, Visit};
//!
//! let mut tree = SearchTree::new(0);
//! for k in [-2, -1, -3, 2, 3, 1] {
//!     tree.insert(k);
//! }
//!
//! // In-order traversal yields sorted keys; stop early once past zero.
//! let mut seen = Vec::new();
//! tree.tree().visit_inorder(tree.root(), |id, _depth| {
//!     let key = *tree.tree().value(id);
//!     seen.push(key);
//!     if key > 0 { Visit::Stop } else { Visit::Continue }
//! });
//! assert_eq!(seen, [-3, -2, -1, 0, 1]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod search;
mod tree;
mod types;

pub use search::SearchTree;
pub use tree::Tree;
pub use types::{NodeId, Side, TreeError, Visit};
