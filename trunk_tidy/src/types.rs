// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Result and error types for a layout pass.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use trunk_tree::NodeId;

/// Absolute coordinates computed by one [`Tidier::layout`](crate::Tidier::layout) pass.
///
/// Holds a position for every node reachable from the laid-out root, keyed by
/// slot index, plus the bounding box over all of them. Positions are a side
/// table: the tree itself is not mutated, and a fresh `TidyLayout` replaces the
/// previous one entirely on each pass.
#[derive(Clone, Debug)]
pub struct TidyLayout {
    pub(crate) positions: Vec<Option<Point>>,
    pub(crate) bounds: Rect,
}

impl TidyLayout {
    /// The absolute position of `id`.
    ///
    /// `None` for nodes that were not part of the laid-out subtree (detached
    /// nodes sharing the arena, freed slots).
    pub fn pos(&self, id: NodeId) -> Option<Point> {
        self.positions.get(id.index()).copied().flatten()
    }

    /// Bounding box over all laid-out node positions.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Horizontal extent of the drawing.
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Vertical extent of the drawing.
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

/// Failures reported by a layout pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LayoutError {
    /// The contour walk exceeded its step bound while measuring one node.
    ///
    /// Indicates a structurally corrupted or pathologically deep tree; see
    /// [`MAX_CONTOUR_STEPS`](crate::MAX_CONTOUR_STEPS).
    DegenerateTree,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DegenerateTree => write!(
                f,
                "contour walk exceeded its step bound; tree is impossibly deep or corrupted"
            ),
        }
    }
}

impl core::error::Error for LayoutError {}
