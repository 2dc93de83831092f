// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorted-input demo.
//!
//! Insert a row of non-overlapping boxes in ascending x order — the worst
//! case for a greedy build without rotations — print the tree, and write
//! `output2.svg`. The rotation pass keeps the hierarchy shallow.
//!
//! Run:
//! - `cargo run -p overstory_demos --example bvh_sorted`

use overstory_bvh::{Aabb2D, Bvh};
use overstory_render::{render_svg, render_text};

fn main() {
    let mut tree: Bvh<f32> = Bvh::new();
    for i in 0..5 {
        let x = i as f32 * 10.0;
        tree.insert(Aabb2D::<f32>::from_xywh(x, 0.0, 6.0, 6.0));
    }

    println!("sorted input test result:");
    print!("{}", render_text(&tree));
    std::fs::write("output2.svg", render_svg(&tree)).expect("write output2.svg");
}
