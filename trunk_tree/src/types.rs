// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: node identifiers, child sides, traversal control, and errors.

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is freed and reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On allocation, a fresh slot starts at generation `1`.
/// - On [`remove`](crate::Tree::remove), the slot is freed; any existing `NodeId`
///   that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new,
///   distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still
/// refers to a live node. Stale `NodeId`s never alias a different live node because
/// the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    /// Slot index of this node.
    ///
    /// Stable while the node is alive; suitable for keying external side tables
    /// sized by [`Tree::node_bound`](crate::Tree::node_bound).
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// The left child slot.
    Left,
    /// The right child slot.
    Right,
}

/// Visitor outcome controlling a depth-first traversal.
///
/// Returned by the visitor passed to [`Tree::visit_preorder`](crate::Tree::visit_preorder)
/// and friends. `Stop` halts the traversal immediately: every recursive call checks
/// the value returned by its visit and re-returns it, so no further nodes are
/// visited, including siblings and the remaining subtrees of ancestors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Visit {
    /// Keep visiting.
    Continue,
    /// Halt the whole traversal.
    Stop,
}

/// Structural precondition failures reported by tree queries.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TreeError {
    /// [`side_of`](crate::Tree::side_of) was called with a node that is not a
    /// direct child of the given parent.
    NotAChild,
}

impl core::fmt::Display for TreeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotAChild => write!(f, "node is not a child of the given parent"),
        }
    }
}

impl core::error::Error for TreeError {}
