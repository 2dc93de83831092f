// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overstory Render: text and SVG views of a BVH.
//!
//! Debug-oriented consumers of [`overstory_bvh`]:
//!
//! - [`render_text`]: an ANSI-colored box-drawing dump of the hierarchy,
//!   one node per line — green leaves, red internal nodes.
//! - [`render_svg`]: a standalone SVG document with one stroked rectangle
//!   per node; internal nodes are inflated by a small padding so nested
//!   boxes stay visible.
//!
//! Both walk the tree exclusively through the read-only traversal API and
//! never mutate it. Output goes to a `String`; callers decide whether that
//! ends up on a terminal or in a file.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod svg;
pub mod text;

pub use svg::render_svg;
pub use text::render_text;
