// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only traversal over the hierarchy.
//!
//! Consumers (printers, renderers, debuggers) see nodes through [`NodeRef`]:
//! a box, a leaf/internal tag, and two optional children — enough to
//! reconstruct a full preorder walk without ever touching the arena. The
//! iterator keeps its own stack, so deep trees cost heap instead of call
//! frames.

use alloc::vec::Vec;

use crate::tree::{Bvh, NodeIx};
use crate::types::{Aabb2D, Scalar};

/// Read-only view of one node in a [`Bvh`].
#[derive(Copy, Clone, Debug)]
pub struct NodeRef<'a, T: Scalar> {
    tree: &'a Bvh<T>,
    ix: NodeIx,
}

impl<'a, T: Scalar> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a Bvh<T>, ix: NodeIx) -> Self {
        Self { tree, ix }
    }

    /// The node's bounding box.
    pub fn aabb(&self) -> &'a Aabb2D<T> {
        self.tree.aabb_of(self.ix)
    }

    /// True for leaves, false for internal nodes.
    pub fn is_leaf(&self) -> bool {
        self.tree.is_leaf(self.ix)
    }

    /// The left child, if present.
    pub fn left(&self) -> Option<Self> {
        self.tree.children(self.ix).0.map(|c| Self::new(self.tree, c))
    }

    /// The right child, if present.
    pub fn right(&self) -> Option<Self> {
        self.tree.children(self.ix).1.map(|c| Self::new(self.tree, c))
    }
}

/// Preorder iterator over `(node, depth)` pairs, created by [`Bvh::iter`].
#[derive(Debug)]
pub struct DepthFirst<'a, T: Scalar> {
    tree: &'a Bvh<T>,
    stack: Vec<(NodeIx, usize)>,
}

impl<'a, T: Scalar> DepthFirst<'a, T> {
    pub(crate) fn new(tree: &'a Bvh<T>, root: Option<NodeIx>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = root {
            stack.push((root, 0));
        }
        Self { tree, stack }
    }
}

impl<'a, T: Scalar> Iterator for DepthFirst<'a, T> {
    type Item = (NodeRef<'a, T>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (ix, depth) = self.stack.pop()?;
        let (left, right) = self.tree.children(ix);
        // Right below left so the left subtree pops first.
        if let Some(r) = right {
            self.stack.push((r, depth + 1));
        }
        if let Some(l) = left {
            self.stack.push((l, depth + 1));
        }
        Some((NodeRef::new(self.tree, ix), depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn empty_tree_yields_nothing() {
        let tree: Bvh<f64> = Bvh::new();
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn preorder_visits_parent_before_children() {
        let mut tree: Bvh<f32> = Bvh::new();
        tree.insert(Aabb2D::new(0.0, 0.0, 6.0, 6.0));
        tree.insert(Aabb2D::new(10.0, 0.0, 16.0, 6.0));
        tree.insert(Aabb2D::new(20.0, 0.0, 26.0, 6.0));

        let order: Vec<(bool, usize)> = tree.iter().map(|(n, d)| (n.is_leaf(), d)).collect();
        assert_eq!(order.len(), 5, "3 leaves and 2 internal nodes");
        assert_eq!(order[0], (false, 0), "root first");
        // Depth never jumps by more than one going down.
        for pair in order.windows(2) {
            assert!(pair[1].1 <= pair[0].1 + 1, "preorder depth steps");
        }
    }

    #[test]
    fn node_refs_mirror_the_structure() {
        let mut tree: Bvh<f32> = Bvh::new();
        tree.insert(Aabb2D::new(0.0, 0.0, 6.0, 6.0));
        tree.insert(Aabb2D::new(10.0, 0.0, 16.0, 6.0));
        let root = tree.root().expect("root");
        assert!(!root.is_leaf());
        let left = root.left().expect("left child");
        let right = root.right().expect("right child");
        assert!(left.is_leaf() && right.is_leaf());
        assert_eq!(*root.aabb(), left.aabb().union(right.aabb()));
    }
}
