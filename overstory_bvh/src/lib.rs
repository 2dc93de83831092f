// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_bvh --heading-base-level=0

//! Overstory BVH: an incrementally maintained 2D bounding-volume hierarchy.
//!
//! Overstory BVH is a building block for broad-phase collision detection and
//! similar acceleration structures. It keeps a binary tree of axis-aligned
//! bounding boxes (AABBs) up to date under arbitrary sequences of insertions,
//! removals, and updates — the whole structure is never rebuilt from scratch.
//!
//! - Insert a leaf and get back a stable generational handle ([`LeafId`]).
//! - Remove or update leaves by handle; an update replaces the leaf outright,
//!   so the handle it returns supersedes the one passed in.
//! - Traverse read-only via [`Bvh::root`] / [`Bvh::iter`] for printing,
//!   rendering, or debugging.
//!
//! New leaves are placed by a greedy descent ranked with a perimeter cost
//! (`2 × (width + height)`, the 2D stand-in for the surface-area heuristic).
//! After every mutation the ancestors of the change are refit bottom-up and a
//! local rotation pass tries four grandchild swaps at each one, applying a
//! swap only when it strictly reduces cost. This keeps the tree close to
//! optimal without ever paying for a global rebuild.
//!
//! The crate is generic over the scalar type `T` via [`Scalar`], with
//! widened cost accumulators (f32→f64, f64→f64, i64→i128) so candidate
//! ranking stays robust. It does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use overstory_bvh::{Aabb2D, Bvh};
//!
//! let mut tree: Bvh<f64> = Bvh::new();
//! let a = tree.insert(Aabb2D::new(0.0, 0.0, 6.0, 6.0));
//! let b = tree.insert(Aabb2D::new(10.0, 0.0, 16.0, 6.0));
//!
//! // The root covers both leaves.
//! let root = tree.root().unwrap();
//! assert_eq!(*root.aabb(), Aabb2D::new(0.0, 0.0, 16.0, 6.0));
//!
//! // Moving a leaf is remove + reinsert; the handle is replaced.
//! let b = tree.update(b, Aabb2D::new(20.0, 0.0, 26.0, 6.0)).unwrap();
//! assert_eq!(tree.len(), 2);
//!
//! tree.remove(a).unwrap();
//! tree.remove(b).unwrap();
//! assert!(tree.is_empty());
//! ```
//!
//! ## Scope and semantics
//!
//! - 2D only. The heuristics generalize to 3D but this crate does not.
//! - No spatial queries (ray cast, overlap, nearest neighbor); pair this
//!   crate with a query layer if you need them.
//! - Removals may leave an internal node holding a single child; the search
//!   and rotation passes tolerate that state rather than collapsing it.
//!   An internal node that loses its last child is freed.
//! - Mutation requires `&mut Bvh`, so single-writer access is enforced by
//!   the borrow checker; read-only traversal is freely shareable.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates, and does not
//! validate that box mins lie below maxes; both are the caller's contract.

#![no_std]

extern crate alloc;

pub mod cost;
pub mod error;
pub mod iter;
pub mod tree;
pub mod types;

pub use cost::{cost, perimeter, union_cost};
pub use error::Error;
pub use iter::{DepthFirst, NodeRef};
pub use tree::{Bvh, LeafId};
pub use types::{Aabb2D, Scalar, ScalarAcc};
