// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-phase tidy layout: post-order contour measurement, pre-order
//! transformation to absolute coordinates.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Point, Rect};
use trunk_tree::{NodeId, Tree};

use crate::types::{LayoutError, TidyLayout};

/// Minimum horizontal distance, in layout units, between any two nodes that
/// share a depth.
const MIN_SEPARATION: f64 = 1.0;

/// Upper bound on contour steps while measuring a single node.
///
/// A well-formed tree never comes close; exceeding it means the contour walk is
/// cycling through corrupted structure (or the tree is impossibly deep), and
/// measurement fails with [`LayoutError::DegenerateTree`].
pub const MAX_CONTOUR_STEPS: usize = 100_000;

/// Computes tidy drawings of binary trees.
///
/// Stateless: one [`layout`](Tidier::layout) call walks the tree twice and
/// returns a fresh [`TidyLayout`]. All intermediate bookkeeping (relative
/// offsets, contour threads, depths) lives in a per-call side table, so
/// repeated calls on an unchanged tree produce identical coordinates.
///
/// The produced drawing aligns equal-depth nodes on a shared `y`, centers every
/// two-child node over its children, keeps left children strictly left of
/// their parent (right strictly right), separates same-depth nodes by at least
/// one unit, and draws mirror-symmetric structures symmetrically.
#[derive(Copy, Clone, Debug, Default)]
pub struct Tidier;

impl Tidier {
    /// Create a tidier.
    pub const fn new() -> Self {
        Self
    }

    /// Lay out the tree rooted at `root` with a unit scale of 1.
    pub fn layout<T>(&self, tree: &Tree<T>, root: NodeId) -> Result<TidyLayout, LayoutError> {
        self.layout_scaled(tree, root, 1.0)
    }

    /// Lay out the tree rooted at `root`, scaling both axes by `unit`.
    ///
    /// The root lands at `x = 0`; every node's `y` is its depth times `unit`.
    pub fn layout_scaled<T>(
        &self,
        tree: &Tree<T>,
        root: NodeId,
        unit: f64,
    ) -> Result<TidyLayout, LayoutError> {
        self.layout_with_step_bound(tree, root, unit, MAX_CONTOUR_STEPS)
    }

    fn layout_with_step_bound<T>(
        &self,
        tree: &Tree<T>,
        root: NodeId,
        unit: f64,
        step_bound: usize,
    ) -> Result<TidyLayout, LayoutError> {
        let mut pass = Pass {
            tree,
            scratch: vec![Scratch::default(); tree.node_bound()],
            step_bound,
        };
        pass.measure(Some(root), 0)?;
        let mut positions: Vec<Option<Point>> = vec![None; tree.node_bound()];
        let mut bounds = None;
        pass.transform(Some(root), 0.0, unit, &mut positions, &mut bounds);
        Ok(TidyLayout {
            positions,
            bounds: bounds.unwrap_or(Rect::ZERO),
        })
    }
}

/// Per-node pass-scoped bookkeeping, discarded when the layout call returns.
///
/// `offset` is the node's half-separation from its children during measurement;
/// once a thread is spliced through a node, its `offset` is reinterpreted as
/// the displacement along the thread.
#[derive(Clone, Copy, Default)]
struct Scratch {
    offset: f64,
    depth: usize,
    thread_left: Option<NodeId>,
    thread_right: Option<NodeId>,
}

/// A boundary node of a subtree: the deepest node on its leftmost or rightmost
/// edge, with its depth and its horizontal offset relative to the subtree root.
#[derive(Clone, Copy)]
struct Extreme {
    node: NodeId,
    off: f64,
    lev: i64,
}

/// Both extremes of one subtree. `None` stands for the "no node" sentinel
/// (treated as depth −1 when comparing extremes of sibling subtrees).
#[derive(Clone, Copy, Default)]
struct Extremes {
    left: Option<Extreme>,
    right: Option<Extreme>,
}

fn level_of(e: Option<Extreme>) -> i64 {
    e.map_or(-1, |x| x.lev)
}

struct Pass<'a, T> {
    tree: &'a Tree<T>,
    scratch: Vec<Scratch>,
    step_bound: usize,
}

impl<T> Pass<'_, T> {
    /// Left contour link: an installed thread takes precedence over the child.
    fn contour_left(&self, id: NodeId) -> Option<NodeId> {
        self.scratch[id.index()]
            .thread_left
            .or_else(|| self.tree.left(id))
    }

    /// Right contour link: an installed thread takes precedence over the child.
    fn contour_right(&self, id: NodeId) -> Option<NodeId> {
        self.scratch[id.index()]
            .thread_right
            .or_else(|| self.tree.right(id))
    }

    /// Post-order measurement: computes every node's `offset` (half the
    /// separation between its subtrees) and returns the subtree's extremes.
    ///
    /// The two subtrees are pushed apart by walking the right contour of the
    /// left subtree and the left contour of the right subtree in lock-step,
    /// accumulating the separation deficit whenever the contours come closer
    /// than [`MIN_SEPARATION`]. When one contour runs out, a thread is spliced
    /// from the shallower side's terminal extreme to the surviving node, so
    /// ancestor-level walks cross the depth gap in constant time. That thread
    /// splice is what keeps the whole pass linear in node count.
    fn measure(&mut self, node: Option<NodeId>, level: usize) -> Result<Extremes, LayoutError> {
        let Some(id) = node else {
            return Ok(Extremes::default());
        };
        self.scratch[id.index()].depth = level;
        let left = self.tree.left(id);
        let right = self.tree.right(id);
        let lx = self.measure(left, level + 1)?;
        let rx = self.measure(right, level + 1)?;

        if left.is_none() && right.is_none() {
            // Leaf: zero offset, its own extreme on both edges.
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Tree depth is nowhere near i64::MAX."
            )]
            let e = Extreme {
                node: id,
                off: 0.0,
                lev: level as i64,
            };
            return Ok(Extremes {
                left: Some(e),
                right: Some(e),
            });
        }

        let mut cursep = MIN_SEPARATION;
        let mut rootsep = 0.0;
        let mut loffsum = 0.0;
        let mut roffsum = 0.0;
        let (mut l, mut r) = (left, right);
        let mut steps = 0_usize;
        while let (Some(lc), Some(rc)) = (l, r) {
            steps += 1;
            if steps > self.step_bound {
                return Err(LayoutError::DegenerateTree);
            }
            if cursep < MIN_SEPARATION {
                rootsep += MIN_SEPARATION - cursep;
                cursep = MIN_SEPARATION;
            }
            let off = self.scratch[lc.index()].offset;
            if self.contour_right(lc).is_some() {
                loffsum += off;
                cursep -= off;
                l = self.contour_right(lc);
            } else {
                loffsum -= off;
                cursep += off;
                l = self.contour_left(lc);
            }
            let off = self.scratch[rc.index()].offset;
            if self.contour_left(rc).is_some() {
                roffsum -= off;
                cursep -= off;
                r = self.contour_left(rc);
            } else {
                roffsum += off;
                cursep += off;
                r = self.contour_right(rc);
            }
        }

        // Half the total root separation centers the node between its subtrees
        // once the left one shifts left and the right one shifts right by it.
        let offset = (rootsep + MIN_SEPARATION) / 2.0;
        self.scratch[id.index()].offset = offset;
        loffsum -= offset;
        roffsum += offset;

        // Adopt the deeper side's extreme on each edge (absent child defaults
        // to the other side), translated into this node's coordinate frame.
        let out_left = if level_of(rx.left) > level_of(lx.left) || left.is_none() {
            rx.left.map(|e| Extreme {
                off: e.off + offset,
                ..e
            })
        } else {
            lx.left.map(|e| Extreme {
                off: e.off - offset,
                ..e
            })
        };
        let out_right = if level_of(lx.right) > level_of(rx.right) || right.is_none() {
            lx.right.map(|e| Extreme {
                off: e.off - offset,
                ..e
            })
        } else {
            rx.right.map(|e| Extreme {
                off: e.off + offset,
                ..e
            })
        };

        // One contour outlived the other: splice a thread from the shallower
        // side's terminal extreme to the surviving node. The thread's offset is
        // the absolute discrepancy between the two walks' coordinate systems,
        // and it occupies whichever contour slot keeps the walk's sign
        // convention correct.
        if let Some(target) = l.filter(|&n| Some(n) != left) {
            if let Some(rr) = rx.right {
                let s = &mut self.scratch[rr.node.index()];
                s.offset = ((rr.off + offset) - loffsum).abs();
                if loffsum - offset <= rr.off {
                    s.thread_left = Some(target);
                } else {
                    s.thread_right = Some(target);
                }
            }
        } else if let Some(target) = r.filter(|&n| Some(n) != right) {
            if let Some(ll) = lx.left {
                let s = &mut self.scratch[ll.node.index()];
                s.offset = ((ll.off - offset) - roffsum).abs();
                if roffsum + offset >= ll.off {
                    s.thread_right = Some(target);
                } else {
                    s.thread_left = Some(target);
                }
            }
        }

        Ok(Extremes {
            left: out_left,
            right: out_right,
        })
    }

    /// Pre-order transformation from relative offsets to absolute coordinates,
    /// folding every position into the bounding box as it goes.
    fn transform(
        &self,
        node: Option<NodeId>,
        x: f64,
        unit: f64,
        positions: &mut [Option<Point>],
        bounds: &mut Option<Rect>,
    ) {
        let Some(id) = node else {
            return;
        };
        let s = self.scratch[id.index()];
        let p = Point::new(x * unit, s.depth as f64 * unit);
        positions[id.index()] = Some(p);
        *bounds = Some(match bounds.take() {
            Some(r) => r.union_pt(p),
            None => Rect::from_points(p, p),
        });
        self.transform(self.tree.left(id), x - s.offset, unit, positions, bounds);
        self.transform(self.tree.right(id), x + s.offset, unit, positions, bounds);
    }
}
