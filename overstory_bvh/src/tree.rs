// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dynamic hierarchy: arena storage, insertion, removal, update.

use alloc::vec::Vec;

use crate::cost::{perimeter, union_of};
use crate::error::Error;
use crate::iter::{DepthFirst, NodeRef};
use crate::types::{Aabb2D, Scalar};

/// Generational handle for a leaf in a [`Bvh`].
///
/// Handles become stale as soon as the leaf is removed (including the removal
/// half of [`Bvh::update`]); stale handles are rejected, never dereferenced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeafId(u32, u32);

impl LeafId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Leaf handles are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Plain arena index; only ever handed out internally.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeIx(usize);

impl NodeIx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug)]
enum Kind {
    Leaf,
    Internal {
        left: Option<NodeIx>,
        right: Option<NodeIx>,
    },
}

#[derive(Clone, Debug)]
struct Node<T> {
    aabb: Aabb2D<T>,
    /// Navigational back-reference; ownership flows through child links only.
    parent: Option<NodeIx>,
    kind: Kind,
}

/// An incrementally maintained bounding-volume hierarchy over 2D AABBs.
///
/// Nodes live in a slot arena addressed by index; freed slots go to a free
/// list and bump a per-slot generation so stale [`LeafId`]s can be detected.
/// An internal node's box is kept tightly equal to the union of its children
/// after every completed mutation. Internal nodes may be left with a single
/// child by removals; that state is tolerated by the sibling search and the
/// rotation pass rather than collapsed away.
#[derive(Clone)]
pub struct Bvh<T: Scalar> {
    nodes: Vec<Option<Node<T>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: Option<NodeIx>,
    leaves: usize,
}

impl<T: Scalar> Default for Bvh<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> core::fmt::Debug for Bvh<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Bvh")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("leaves", &self.leaves)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> Bvh<T> {
    /// Create a new empty hierarchy.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: None,
            leaves: 0,
        }
    }

    /// Number of leaves currently in the tree.
    pub fn len(&self) -> usize {
        self.leaves
    }

    /// True if the tree holds no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves == 0
    }

    /// Drop all nodes and reset to the empty state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.generations.clear();
        self.free_list.clear();
        self.root = None;
        self.leaves = 0;
    }

    /// The box of a live leaf, or `None` for a stale handle.
    pub fn get(&self, id: LeafId) -> Option<&Aabb2D<T>> {
        let ix = self.live_leaf(id)?;
        Some(&self.node(ix).aabb)
    }

    /// True if `id` refers to a leaf currently in the tree.
    pub fn contains(&self, id: LeafId) -> bool {
        self.live_leaf(id).is_some()
    }

    /// Insert a leaf with the given box and return its handle.
    ///
    /// The new leaf is paired with the sibling the cost heuristic selects,
    /// then every ancestor of the splice point is refit and locally rotated.
    pub fn insert(&mut self, aabb: Aabb2D<T>) -> LeafId {
        let leaf = self.alloc(Node {
            aabb,
            parent: None,
            kind: Kind::Leaf,
        });
        self.leaves += 1;

        let Some(root) = self.root else {
            self.root = Some(leaf);
            return self.leaf_id(leaf);
        };

        let sibling = self.find_best_sibling(root, &aabb);
        let old_parent = self.node(sibling).parent;
        let joined = self.node(sibling).aabb.union(&aabb);
        let new_parent = self.alloc(Node {
            aabb: joined,
            parent: old_parent,
            kind: Kind::Internal {
                left: Some(sibling),
                right: Some(leaf),
            },
        });
        match old_parent {
            Some(p) => self.replace_child(p, sibling, Some(new_parent)),
            None => self.root = Some(new_parent),
        }
        self.node_mut(sibling).parent = Some(new_parent);
        self.node_mut(leaf).parent = Some(new_parent);

        let mut walk = old_parent;
        while let Some(ix) = walk {
            self.refit(ix);
            self.rotate(ix);
            walk = self.node(ix).parent;
        }
        self.leaf_id(leaf)
    }

    /// Remove the leaf behind `id`.
    ///
    /// Fails with [`Error::DetachedLeaf`] if the handle is stale or was never
    /// part of this tree. Ancestors left with a single child survive; an
    /// ancestor left with no children at all is freed, so removing every leaf
    /// returns the tree to the empty state.
    pub fn remove(&mut self, id: LeafId) -> Result<(), Error> {
        let ix = self.live_leaf(id).ok_or(Error::DetachedLeaf)?;
        let parent = self.node(ix).parent;
        self.free(ix);
        self.leaves -= 1;

        let Some(parent) = parent else {
            self.root = None;
            return Ok(());
        };
        self.replace_child(parent, ix, None);

        // Free any ancestor that just lost its last child.
        let mut walk = Some(parent);
        while let Some(p) = walk {
            if self.children(p) != (None, None) {
                break;
            }
            let above = self.node(p).parent;
            match above {
                Some(a) => self.replace_child(a, p, None),
                None => self.root = None,
            }
            self.free(p);
            walk = above;
        }

        while let Some(p) = walk {
            self.refit(p);
            self.rotate(p);
            walk = self.node(p).parent;
        }
        Ok(())
    }

    /// Replace the leaf behind `id` with a new leaf carrying `aabb`.
    ///
    /// This is remove-then-insert: the old leaf is destroyed, identity is not
    /// preserved, and the returned handle supersedes `id`.
    pub fn update(&mut self, id: LeafId, aabb: Aabb2D<T>) -> Result<LeafId, Error> {
        self.remove(id)?;
        Ok(self.insert(aabb))
    }

    /// Root of the tree as a read-only reference, if any.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|ix| NodeRef::new(self, ix))
    }

    /// Preorder traversal of `(node, depth)` pairs, using an explicit stack.
    pub fn iter(&self) -> DepthFirst<'_, T> {
        DepthFirst::new(self, self.root)
    }

    // --- sibling search ---

    /// Greedy descent for the cheapest node to pair a new box with.
    ///
    /// Stops where pairing directly is strictly cheaper than following either
    /// child; otherwise follows the cheaper side, left on ties. An absent
    /// child is priced at the direct cost plus a fixed penalty of one, so it
    /// is never preferred over a concrete branch. Pure query; never mutates.
    pub(crate) fn find_best_sibling(&self, start: NodeIx, aabb: &Aabb2D<T>) -> NodeIx {
        let one = T::acc_from_usize(1);
        let mut ix = start;
        loop {
            let node = self.node(ix);
            let Kind::Internal { left, right } = node.kind else {
                break;
            };
            let direct = perimeter(&node.aabb.union(aabb));
            let cost_left = match left {
                Some(l) => perimeter(&self.node(l).aabb.union(aabb)),
                None => direct + one,
            };
            let cost_right = match right {
                Some(r) => perimeter(&self.node(r).aabb.union(aabb)),
                None => direct + one,
            };
            if direct < cost_left && direct < cost_right {
                break;
            }
            let next = if cost_left <= cost_right { left } else { right };
            ix = next.expect("descended into an absent child");
        }
        ix
    }

    // --- refit ---

    /// Recompute `ix`'s box from its children; a lone child is copied verbatim.
    fn refit(&mut self, ix: NodeIx) {
        let (left, right) = self.children(ix);
        let joined = if let (Some(l), Some(r)) = (left, right) {
            self.node(l).aabb.union(&self.node(r).aabb)
        } else {
            let only = left.or(right).expect("refit requires at least one child");
            self.node(only).aabb
        };
        self.node_mut(ix).aabb = joined;
    }

    // --- rotation ---

    /// Try the four grandchild swaps at `ix` and apply the best one.
    ///
    /// Each candidate promotes one grandchild to a direct child of `ix` and
    /// pushes the opposite subtree down in its place. A candidate's cost is
    /// the perimeter of the rebuilt subtree, which with both grandchildren
    /// live equals the union of the three surviving grandchild boxes; a
    /// candidate whose promoted grandchild is missing is skipped. The most
    /// negative strictly-improving delta wins, then exactly the one rebuilt
    /// internal node is refit. No-op unless `ix` has two children.
    fn rotate(&mut self, ix: NodeIx) {
        let (Some(l), Some(r)) = self.children(ix) else {
            return;
        };
        let (ll, lr) = self.children(l);
        let (rl, rr) = self.children(r);

        let pick = {
            let box_of = |c: Option<NodeIx>| c.map(|c| self.node(c).aabb);
            let l_box = self.node(l).aabb;
            let r_box = self.node(r).aabb;
            let cost_l = perimeter(&l_box);
            let cost_r = perimeter(&r_box);

            let candidates = [
                // Promote ll; left becomes {right, lr}.
                (ll, union_of(&[Some(r_box), box_of(lr)]), cost_l),
                // Promote lr; left becomes {ll, right}.
                (lr, union_of(&[box_of(ll), Some(r_box)]), cost_l),
                // Promote rl; right becomes {left, rr}.
                (rl, union_of(&[Some(l_box), box_of(rr)]), cost_r),
                // Promote rr; right becomes {rl, left}.
                (rr, union_of(&[box_of(rl), Some(l_box)]), cost_r),
            ];

            let zero = T::acc_from_usize(0);
            let mut best: Option<(usize, T::Acc)> = None;
            for (i, (promoted, joined, before)) in candidates.iter().enumerate() {
                let Some(joined) = joined else { continue };
                if promoted.is_none() {
                    continue;
                }
                let delta = perimeter(joined) - *before;
                if delta < zero && best.is_none_or(|(_, b)| delta < b) {
                    best = Some((i, delta));
                }
            }
            match best {
                Some((pick, _)) => pick,
                None => return,
            }
        };

        match pick {
            0 => {
                let promoted = ll.expect("winning candidate promotes a live grandchild");
                self.set_right(ix, Some(promoted));
                self.node_mut(promoted).parent = Some(ix);
                self.set_left(l, Some(r));
                self.node_mut(r).parent = Some(l);
                self.refit(l);
            }
            1 => {
                let promoted = lr.expect("winning candidate promotes a live grandchild");
                self.set_right(ix, Some(promoted));
                self.node_mut(promoted).parent = Some(ix);
                self.set_right(l, Some(r));
                self.node_mut(r).parent = Some(l);
                self.refit(l);
            }
            2 => {
                let promoted = rl.expect("winning candidate promotes a live grandchild");
                self.set_left(ix, Some(promoted));
                self.node_mut(promoted).parent = Some(ix);
                self.set_left(r, Some(l));
                self.node_mut(l).parent = Some(r);
                self.refit(r);
            }
            _ => {
                let promoted = rr.expect("winning candidate promotes a live grandchild");
                self.set_left(ix, Some(promoted));
                self.node_mut(promoted).parent = Some(ix);
                self.set_right(r, Some(l));
                self.node_mut(l).parent = Some(r);
                self.refit(r);
            }
        }
    }

    // --- arena plumbing ---

    fn alloc(&mut self, node: Node<T>) -> NodeIx {
        if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].saturating_add(1);
            self.nodes[idx] = Some(node);
            NodeIx::new(idx)
        } else {
            self.nodes.push(Some(node));
            self.generations.push(1);
            NodeIx::new(self.nodes.len() - 1)
        }
    }

    fn free(&mut self, ix: NodeIx) {
        self.nodes[ix.get()] = None;
        self.free_list.push(ix.get());
    }

    fn leaf_id(&self, ix: NodeIx) -> LeafId {
        LeafId::new(ix.get(), self.generations[ix.get()])
    }

    fn live_leaf(&self, id: LeafId) -> Option<NodeIx> {
        let node = self.nodes.get(id.idx())?.as_ref()?;
        if !matches!(node.kind, Kind::Leaf) || self.generations[id.idx()] != id.1 {
            return None;
        }
        Some(NodeIx::new(id.idx()))
    }

    fn node(&self, ix: NodeIx) -> &Node<T> {
        self.nodes[ix.get()].as_ref().expect("dangling node index")
    }

    fn node_mut(&mut self, ix: NodeIx) -> &mut Node<T> {
        self.nodes[ix.get()].as_mut().expect("dangling node index")
    }

    pub(crate) fn children(&self, ix: NodeIx) -> (Option<NodeIx>, Option<NodeIx>) {
        match self.node(ix).kind {
            Kind::Leaf => (None, None),
            Kind::Internal { left, right } => (left, right),
        }
    }

    pub(crate) fn aabb_of(&self, ix: NodeIx) -> &Aabb2D<T> {
        &self.node(ix).aabb
    }

    pub(crate) fn is_leaf(&self, ix: NodeIx) -> bool {
        matches!(self.node(ix).kind, Kind::Leaf)
    }

    fn set_left(&mut self, ix: NodeIx, child: Option<NodeIx>) {
        match &mut self.node_mut(ix).kind {
            Kind::Internal { left, .. } => *left = child,
            Kind::Leaf => unreachable!("leaf nodes have no child slots"),
        }
    }

    fn set_right(&mut self, ix: NodeIx, child: Option<NodeIx>) {
        match &mut self.node_mut(ix).kind {
            Kind::Internal { right, .. } => *right = child,
            Kind::Leaf => unreachable!("leaf nodes have no child slots"),
        }
    }

    /// Swap whichever of `parent`'s slots holds `old` (matched by identity).
    fn replace_child(&mut self, parent: NodeIx, old: NodeIx, new: Option<NodeIx>) {
        match &mut self.node_mut(parent).kind {
            Kind::Internal { left, .. } if *left == Some(old) => *left = new,
            Kind::Internal { right, .. } if *right == Some(old) => *right = new,
            _ => unreachable!("child link out of sync with parent link"),
        }
    }
}
