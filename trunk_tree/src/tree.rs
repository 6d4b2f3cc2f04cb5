// Copyright 2025 the Trunk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: the generational arena, structural mutation, traversals.

use alloc::vec::Vec;

use crate::types::{NodeId, Side, TreeError, Visit};

#[derive(Clone, Debug)]
struct Node<T> {
    generation: u32,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    value: T,
}

impl<T> Node<T> {
    fn new(generation: u32, value: T) -> Self {
        Self {
            generation,
            parent: None,
            left: None,
            right: None,
            value,
        }
    }
}

/// A forest of binary nodes stored in generational slots.
///
/// Nodes are allocated with [`push`](Tree::push) or [`branch`](Tree::branch) and
/// wired together with [`set_left`](Tree::set_left)/[`set_right`](Tree::set_right).
/// `left`/`right` are the owning links; `parent` is a non-owning back-reference
/// maintained whenever a node is installed as a child.
///
/// Installing a child over an occupied slot does **not** clear the displaced
/// node's parent pointer: the displaced subtree keeps a stale back-reference
/// until it is reattached somewhere else. See [`Tree::set_left`].
pub struct Tree<T> {
    nodes: Vec<Option<Node<T>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl<T> Tree<T> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Allocate a detached leaf node holding `value`.
    pub fn push(&mut self, value: T) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, value));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, value)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Allocate a node holding `value` with optional initial children.
    ///
    /// Children are installed via [`set_left`](Tree::set_left)/[`set_right`](Tree::set_right),
    /// so their parent pointers are updated.
    pub fn branch(&mut self, value: T, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let id = self.push(value);
        if left.is_some() {
            self.set_left(id, left);
        }
        if right.is_some() {
            self.set_right(id, right);
        }
        id
    }

    /// Remove a node and its subtree, recycling their slots.
    ///
    /// No-op for stale ids. The parent's child slot is cleared when the node is
    /// still registered under it.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            // A displaced subtree may carry a stale parent pointer; only unlink
            // from a parent that is itself alive.
            if self.is_alive(parent) {
                if self.node(parent).left == Some(id) {
                    self.node_mut(parent).left = None;
                } else if self.node(parent).right == Some(id) {
                    self.node_mut(parent).right = None;
                }
            }
        }
        let (left, right) = {
            let n = self.node(id);
            (n.left, n.right)
        };
        if let Some(l) = left {
            self.remove(l);
        }
        if let Some(r) = right {
            self.remove(r);
        }
        self.nodes[id.index()] = None;
        self.free_list.push(id.index());
    }

    /// Install `child` in the left slot (or clear it with `None`).
    ///
    /// Sets the child's parent pointer. Deliberately leaves the displaced
    /// occupant's parent pointer untouched, so a detached subtree remembers
    /// where it used to hang until reattached.
    pub fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.node_mut(id).left = child;
        if let Some(c) = child {
            self.node_mut(c).parent = Some(id);
        }
    }

    /// Install `child` in the right slot (or clear it with `None`).
    ///
    /// Same displaced-occupant semantics as [`set_left`](Tree::set_left).
    pub fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.node_mut(id).right = child;
        if let Some(c) = child {
            self.node_mut(c).parent = Some(id);
        }
    }

    /// Install `child` in the slot named by `side`.
    pub fn set_side(&mut self, id: NodeId, child: Option<NodeId>, side: Side) {
        match side {
            Side::Left => self.set_left(id, child),
            Side::Right => self.set_right(id, child),
        }
    }

    /// Which slot of `parent` holds `child`.
    ///
    /// Fails with [`TreeError::NotAChild`] when `child` is not a direct child.
    pub fn side_of(&self, parent: NodeId, child: NodeId) -> Result<Side, TreeError> {
        let n = self.node(parent);
        if n.left == Some(child) {
            Ok(Side::Left)
        } else if n.right == Some(child) {
            Ok(Side::Right)
        } else {
            Err(TreeError::NotAChild)
        }
    }

    /// The left child, if present.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    /// The right child, if present.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    /// The child in the slot named by `side`, if present.
    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    /// The parent back-reference, if any.
    ///
    /// May be stale for a subtree displaced by [`set_left`](Tree::set_left)/
    /// [`set_right`](Tree::set_right).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Borrow the value stored at `id`.
    pub fn value(&self, id: NodeId) -> &T {
        &self.node(id).value
    }

    /// Mutably borrow the value stored at `id`.
    pub fn value_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.node_mut(id).value
    }

    /// Present children in order, left before right. Yields 0, 1, or 2 ids.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        let n = self.node(id);
        n.left.into_iter().chain(n.right)
    }

    /// The other child of this node's parent.
    ///
    /// `None` when the node has no parent, when the parent has been removed,
    /// or when the node is not actually registered as either child of its
    /// parent (stale back-reference).
    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent.filter(|&p| self.is_alive(p))?;
        let p = self.node(parent);
        if p.left == Some(id) {
            p.right
        } else if p.right == Some(id) {
            p.left
        } else {
            None
        }
    }

    /// Follow parent links to the root of the tree containing `id`.
    ///
    /// A stale parent pointer into a freed slot is treated as no parent, so a
    /// displaced subtree whose old parent was removed is its own root.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            if !self.is_alive(parent) {
                break;
            }
            current = parent;
        }
        current
    }

    /// True iff both children are absent.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        let n = self.node(id);
        n.left.is_none() && n.right.is_none()
    }

    /// A single raw rotation around `id` and its parent.
    ///
    /// If `id` is the left child, the parent adopts `id`'s right subtree and
    /// becomes `id`'s right child; symmetric for a right child. The grandparent's
    /// slot that held the parent now holds `id`. No-op when `id` has no parent.
    ///
    /// Rotation preserves the in-order sequence, so it keeps a
    /// [`SearchTree`](crate::SearchTree) ordered; rotating nodes of an arbitrarily
    /// wired tree gives no such guarantee.
    pub fn rotate(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        let grandparent = self.node(parent).parent;
        if self.node(parent).left == Some(id) {
            let moved = self.node(id).right;
            self.set_left(parent, moved);
            self.node_mut(id).right = Some(parent);
        } else {
            let moved = self.node(id).left;
            self.set_right(parent, moved);
            self.node_mut(id).left = Some(parent);
        }
        self.node_mut(parent).parent = Some(id);
        self.node_mut(id).parent = grandparent;
        let Some(g) = grandparent else {
            return;
        };
        if self.node(g).left == Some(parent) {
            self.node_mut(g).left = Some(id);
        } else {
            self.node_mut(g).right = Some(id);
        }
    }

    /// Deep-copy the subtree rooted at `id`.
    ///
    /// The returned node is a fresh root (no parent), regardless of whether `id`
    /// had one.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId
    where
        T: Clone,
    {
        let (left, right, value) = {
            let n = self.node(id);
            (n.left, n.right, n.value.clone())
        };
        let copy = self.push(value);
        if let Some(l) = left {
            let c = self.clone_subtree(l);
            self.set_left(copy, Some(c));
        }
        if let Some(r) = right {
            let c = self.clone_subtree(r);
            self.set_right(copy, Some(c));
        }
        copy
    }

    /// Depth-first traversal visiting each node before its subtrees.
    ///
    /// `f` receives the node and its depth below `id`. Returning [`Visit::Stop`]
    /// halts the whole traversal; the sentinel propagates up through every
    /// enclosing recursive call.
    pub fn visit_preorder<F>(&self, id: NodeId, mut f: F) -> Visit
    where
        F: FnMut(NodeId, usize) -> Visit,
    {
        self.preorder(id, 0, &mut f)
    }

    /// Depth-first traversal visiting the left subtree, the node, then the right subtree.
    pub fn visit_inorder<F>(&self, id: NodeId, mut f: F) -> Visit
    where
        F: FnMut(NodeId, usize) -> Visit,
    {
        self.inorder(id, 0, &mut f)
    }

    /// Depth-first traversal visiting both subtrees before the node.
    pub fn visit_postorder<F>(&self, id: NodeId, mut f: F) -> Visit
    where
        F: FnMut(NodeId, usize) -> Visit,
    {
        self.postorder(id, 0, &mut f)
    }

    /// Number of nodes in the subtree rooted at `id`.
    pub fn subtree_len(&self, id: NodeId) -> usize {
        let mut count = 0;
        self.visit_preorder(id, |_, _| {
            count += 1;
            Visit::Continue
        });
        count
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot is occupied and its generation matches the
    /// generation stored in that slot. See [`NodeId`] for the generational
    /// semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live nodes across all slots.
    pub fn alive_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Exclusive upper bound on live slot indices.
    ///
    /// Useful for sizing external side tables keyed by [`NodeId::index`].
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.index()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.index()].as_mut().expect("dangling NodeId")
    }

    fn preorder<F>(&self, id: NodeId, depth: usize, f: &mut F) -> Visit
    where
        F: FnMut(NodeId, usize) -> Visit,
    {
        if f(id, depth) == Visit::Stop {
            return Visit::Stop;
        }
        if let Some(l) = self.node(id).left {
            if self.preorder(l, depth + 1, f) == Visit::Stop {
                return Visit::Stop;
            }
        }
        if let Some(r) = self.node(id).right {
            if self.preorder(r, depth + 1, f) == Visit::Stop {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }

    fn inorder<F>(&self, id: NodeId, depth: usize, f: &mut F) -> Visit
    where
        F: FnMut(NodeId, usize) -> Visit,
    {
        if let Some(l) = self.node(id).left {
            if self.inorder(l, depth + 1, f) == Visit::Stop {
                return Visit::Stop;
            }
        }
        if f(id, depth) == Visit::Stop {
            return Visit::Stop;
        }
        if let Some(r) = self.node(id).right {
            if self.inorder(r, depth + 1, f) == Visit::Stop {
                return Visit::Stop;
            }
        }
        Visit::Continue
    }

    fn postorder<F>(&self, id: NodeId, depth: usize, f: &mut F) -> Visit
    where
        F: FnMut(NodeId, usize) -> Visit,
    {
        if let Some(l) = self.node(id).left {
            if self.postorder(l, depth + 1, f) == Visit::Stop {
                return Visit::Stop;
            }
        }
        if let Some(r) = self.node(id).right {
            if self.postorder(r, depth + 1, f) == Visit::Stop {
                return Visit::Stop;
            }
        }
        f(id, depth)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn branch_wires_children_and_parents() {
        let mut tree: Tree<()> = Tree::new();
        let l = tree.push(());
        let r = tree.push(());
        let root = tree.branch((), Some(l), Some(r));
        assert_eq!(tree.left(root), Some(l));
        assert_eq!(tree.right(root), Some(r));
        assert_eq!(tree.parent(l), Some(root));
        assert_eq!(tree.parent(r), Some(root));
        assert_eq!(tree.subtree_len(root), 3);
    }

    #[test]
    fn set_left_and_right_assign_parent() {
        let mut tree: Tree<u8> = Tree::new();
        let one = tree.push(1);
        let two = tree.push(2);
        tree.set_left(one, Some(two));
        assert_eq!(tree.left(one), Some(two));
        assert_eq!(tree.parent(two), Some(one));

        let three = tree.push(3);
        tree.set_right(one, Some(three));
        assert_eq!(tree.right(one), Some(three));
        assert_eq!(tree.parent(three), Some(one));
    }

    #[test]
    fn displaced_child_keeps_stale_parent() {
        let mut tree: Tree<u8> = Tree::new();
        let root = tree.push(0);
        let old = tree.push(1);
        let new = tree.push(2);
        tree.set_left(root, Some(old));
        tree.set_left(root, Some(new));
        // The displaced node still points at its old parent but is no longer
        // registered there.
        assert_eq!(tree.parent(old), Some(root));
        assert_eq!(tree.sibling(old), None);
        assert_eq!(tree.side_of(root, old), Err(TreeError::NotAChild));
    }

    #[test]
    fn side_of_and_set_side() {
        let mut tree: Tree<u8> = Tree::new();
        let root = tree.push(0);
        let a = tree.push(1);
        let b = tree.push(2);
        tree.set_side(root, Some(a), Side::Left);
        tree.set_side(root, Some(b), Side::Right);
        assert_eq!(tree.side_of(root, a), Ok(Side::Left));
        assert_eq!(tree.side_of(root, b), Ok(Side::Right));
        assert_eq!(tree.child(root, Side::Left), Some(a));
        assert_eq!(tree.child(root, Side::Right), Some(b));

        let stranger = tree.push(3);
        assert_eq!(tree.side_of(root, stranger), Err(TreeError::NotAChild));
    }

    #[test]
    fn children_are_ordered_and_present_only() {
        let mut tree: Tree<u8> = Tree::new();
        let l = tree.push(1);
        let r = tree.push(2);
        let both = tree.branch(0, Some(l), Some(r));
        let kids: Vec<_> = tree.children(both).collect();
        assert_eq!(kids, [l, r]);

        let only_right = tree.push(3);
        let r2 = tree.push(4);
        tree.set_right(only_right, Some(r2));
        let kids: Vec<_> = tree.children(only_right).collect();
        assert_eq!(kids, [r2]);

        let leaf = tree.push(5);
        assert_eq!(tree.children(leaf).count(), 0);
        assert!(tree.is_leaf(leaf));
    }

    #[test]
    fn sibling_of_each_child() {
        let mut tree: Tree<u8> = Tree::new();
        let l = tree.push(1);
        let r = tree.push(2);
        let root = tree.branch(0, Some(l), Some(r));
        assert_eq!(tree.sibling(l), Some(r));
        assert_eq!(tree.sibling(r), Some(l));
        assert_eq!(tree.sibling(root), None, "root has no sibling");
    }

    #[test]
    fn root_of_follows_parents() {
        let mut tree: Tree<u8> = Tree::new();
        let leaf = tree.push(3);
        let mid = tree.branch(2, Some(leaf), None);
        let root = tree.branch(1, None, Some(mid));
        assert_eq!(tree.root_of(leaf), root);
        assert_eq!(tree.root_of(mid), root);
        assert_eq!(tree.root_of(root), root);
    }

    #[test]
    fn rotate_without_parent_is_noop() {
        let mut tree: Tree<u8> = Tree::new();
        let l = tree.push(1);
        let root = tree.branch(0, Some(l), None);
        tree.rotate(root);
        assert_eq!(tree.left(root), Some(l));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn rotate_left_child_up() {
        // parent with left child `node`; `node` has a right subtree that the
        // parent must adopt.
        let mut tree: Tree<u8> = Tree::new();
        let nr = tree.push(3);
        let node = tree.branch(1, None, Some(nr));
        let parent = tree.branch(2, Some(node), None);
        let grand = tree.branch(4, Some(parent), None);

        tree.rotate(node);
        assert_eq!(tree.left(grand), Some(node));
        assert_eq!(tree.parent(node), Some(grand));
        assert_eq!(tree.right(node), Some(parent));
        assert_eq!(tree.parent(parent), Some(node));
        assert_eq!(tree.left(parent), Some(nr));
        assert_eq!(tree.parent(nr), Some(parent));
    }

    #[test]
    fn clone_subtree_is_detached_and_distinct() {
        let mut tree: Tree<u8> = Tree::new();
        let l = tree.push(1);
        let r = tree.push(2);
        let root = tree.branch(0, Some(l), Some(r));
        let parent = tree.branch(9, Some(root), None);

        let copy = tree.clone_subtree(root);
        assert_ne!(copy, root);
        assert_eq!(tree.parent(copy), None, "clone becomes a root");
        assert_eq!(tree.parent(root), Some(parent), "original untouched");
        assert_eq!(tree.subtree_len(copy), 3);

        let mut values: Vec<u8> = Vec::new();
        tree.visit_inorder(copy, |id, _| {
            values.push(*tree.value(id));
            Visit::Continue
        });
        assert_eq!(values, [1, 0, 2]);
    }

    #[test]
    fn traversal_orders() {
        // Shape:    0
        //          / \
        //        -1   1
        let mut tree: Tree<i8> = Tree::new();
        let l = tree.push(-1);
        let r = tree.push(1);
        let root = tree.branch(0, Some(l), Some(r));

        let mut pre = Vec::new();
        tree.visit_preorder(root, |id, _| {
            pre.push(*tree.value(id));
            Visit::Continue
        });
        assert_eq!(pre, [0, -1, 1]);

        let mut ino = Vec::new();
        tree.visit_inorder(root, |id, _| {
            ino.push(*tree.value(id));
            Visit::Continue
        });
        assert_eq!(ino, [-1, 0, 1]);

        let mut post = Vec::new();
        tree.visit_postorder(root, |id, _| {
            post.push(*tree.value(id));
            Visit::Continue
        });
        assert_eq!(post, [-1, 1, 0]);
    }

    #[test]
    fn traversal_reports_depth() {
        let mut tree: Tree<u8> = Tree::new();
        let leaf = tree.push(2);
        let mid = tree.branch(1, Some(leaf), None);
        let root = tree.branch(0, Some(mid), None);
        let mut depths = Vec::new();
        tree.visit_preorder(root, |id, depth| {
            depths.push((*tree.value(id), depth));
            Visit::Continue
        });
        assert_eq!(depths, [(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn stop_halts_all_enclosing_traversal() {
        let mut tree: Tree<i8> = Tree::new();
        let l = tree.push(-1);
        let r = tree.push(1);
        let root = tree.branch(0, Some(l), Some(r));

        let mut total = 0;
        let out = tree.visit_preorder(root, |id, _| {
            total += 1;
            if *tree.value(id) == -1 {
                Visit::Stop
            } else {
                Visit::Continue
            }
        });
        assert_eq!(out, Visit::Stop);
        assert_eq!(total, 2, "preorder stops at the second node");

        total = 0;
        tree.visit_inorder(root, |id, _| {
            total += 1;
            if *tree.value(id) == -1 {
                Visit::Stop
            } else {
                Visit::Continue
            }
        });
        assert_eq!(total, 1, "inorder stops at the first node");

        total = 0;
        tree.visit_postorder(root, |id, _| {
            total += 1;
            if *tree.value(id) == -1 {
                Visit::Stop
            } else {
                Visit::Continue
            }
        });
        assert_eq!(total, 1, "postorder stops at the first node");
    }

    #[test]
    fn liveness_remove_and_slot_reuse() {
        let mut tree: Tree<u8> = Tree::new();
        let root = tree.push(0);
        let a = tree.push(1);
        tree.set_left(root, Some(a));
        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));
        assert_eq!(tree.alive_count(), 2);

        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert_eq!(tree.left(root), None, "parent slot cleared");
        assert_eq!(tree.alive_count(), 1);

        let b = tree.push(2);
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a), "old id stays stale after slot reuse");
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn queries_survive_removal_of_a_stale_parent() {
        let mut tree: Tree<u8> = Tree::new();
        let root = tree.push(0);
        let displaced = tree.push(1);
        let replacement = tree.push(2);
        tree.set_left(root, Some(displaced));
        tree.set_left(root, Some(replacement));
        tree.remove(root);

        // The displaced node's parent pointer now names a freed slot; treat it
        // as detached rather than following it.
        assert!(tree.is_alive(displaced));
        assert_eq!(tree.root_of(displaced), displaced);
        assert_eq!(tree.sibling(displaced), None);

        // Slot reuse must not resurrect the link either.
        let recycled = tree.push(3);
        assert_eq!(tree.root_of(displaced), displaced);
        assert_eq!(tree.sibling(displaced), None);
        assert_eq!(tree.root_of(recycled), recycled);
    }

    #[test]
    fn remove_frees_whole_subtree() {
        let mut tree: Tree<u8> = Tree::new();
        let l = tree.push(1);
        let r = tree.push(2);
        let mid = tree.branch(3, Some(l), Some(r));
        let root = tree.branch(0, Some(mid), None);
        tree.remove(mid);
        assert_eq!(tree.alive_count(), 1);
        assert!(!tree.is_alive(l));
        assert!(!tree.is_alive(r));
        assert!(tree.is_leaf(root));
    }
}
