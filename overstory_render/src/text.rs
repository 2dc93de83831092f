// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ANSI box-drawing dump of a hierarchy.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{Display, Write as _};

use overstory_bvh::{Bvh, NodeRef, Scalar};

const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// Render the tree as an indented listing, one node per line.
///
/// Leaves print bold green, internal nodes bold red, each as
/// `x1,y1,x2,y2` behind box-drawing connectors. An empty tree renders as
/// an empty string. Traversal is iterative with an explicit stack.
pub fn render_text<T: Scalar + Display>(tree: &Bvh<T>) -> String {
    let mut out = String::new();
    let Some(root) = tree.root() else {
        return out;
    };
    // (node, prefix, is_left); right pushed first so the left child pops first.
    let mut stack: Vec<(NodeRef<'_, T>, String, bool)> = vec![(root, String::new(), false)];
    while let Some((node, prefix, is_left)) = stack.pop() {
        let (branch, pad) = if is_left {
            ("├── ", "│   ")
        } else {
            ("└── ", "    ")
        };
        let color = if node.is_leaf() { GREEN } else { RED };
        let b = node.aabb();
        let _ = writeln!(
            out,
            "{prefix}{branch}{color}{},{},{},{}{RESET}",
            b.min_x, b.min_y, b.max_x, b.max_y
        );
        let child_prefix = format!("{prefix}{pad}");
        if let Some(r) = node.right() {
            stack.push((r, child_prefix.clone(), false));
        }
        if let Some(l) = node.left() {
            stack.push((l, child_prefix, true));
        }
    }
    out
}
