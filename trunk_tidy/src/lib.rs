// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trunk Tidy: tidy drawings of binary trees, Kurbo-native.
//!
//! Assigns a 2D coordinate to every node of a [`trunk_tree::Tree`] so the
//! resulting drawing is *tidy*: minimal in width, depth-aligned, and symmetric.
//!
//! - Nodes of equal depth share a `y` coordinate.
//! - A node with two children is horizontally centered between them; left
//!   children land strictly left of their parent, right children strictly right.
//! - Subtrees never overlap: nodes sharing a depth are separated by at least
//!   one layout unit.
//! - Mirror-symmetric structures are drawn symmetrically, and identical
//!   substructures get identical relative offsets wherever they appear.
//!
//! The algorithm is the classic two-pass contour-threading procedure: a
//! post-order *measure* pass walks the facing contours of each node's subtrees
//! in lock-step to compute minimal separations, splicing threads across depth
//! gaps so the whole pass stays linear in node count; a pre-order *transform*
//! pass then converts relative offsets into absolute coordinates and folds them
//! into a bounding box.
//!
//! ## Not a renderer
//!
//! This crate only computes coordinates. A drawing layer is expected to call
//! [`Tidier::layout`] once a tree is built, then read each node's position from
//! the returned [`TidyLayout`] to paint it however it likes.
//!
//! ## Minimal usage
//!
//! ```
//! use trunk_tidy::Tidier;
//! use trunk_tree::SearchTree;
//!
//! let mut tree = SearchTree::new(0);
//! for k in [-2, -1, -3, 2, 3, 1] {
//!     tree.insert(k);
//! }
//!
//! let layout = Tidier::new().layout(tree.tree(), tree.root()).unwrap();
//!
//! // The root sits at the origin, centered over its subtrees.
//! let root = layout.pos(tree.root()).unwrap();
//! assert_eq!((root.x, root.y), (0.0, 0.0));
//! assert!(layout.width() > 0.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tidy;
mod types;

pub use tidy::{MAX_CONTOUR_STEPS, Tidier};
pub use types::{LayoutError, TidyLayout};
