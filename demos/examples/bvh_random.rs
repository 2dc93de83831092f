// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random-box demo.
//!
//! Seed one explicit RNG, insert six random boxes, print the tree, and
//! write `output1.svg`.
//!
//! Run:
//! - `cargo run -p overstory_demos --example bvh_random`

use overstory_bvh::{Aabb2D, Bvh};
use overstory_render::{render_svg, render_text};

struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform-ish integer in `lo..hi`.
    fn gen_range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo)
    }
}

fn main() {
    let mut rng = Rng::new(0x5EED_F00D_0000_0001);
    let mut tree: Bvh<f32> = Bvh::new();
    for _ in 0..6 {
        let x = rng.gen_range(1, 100) as f32;
        let y = rng.gen_range(1, 100) as f32;
        let w = rng.gen_range(1, 6) as f32;
        let h = rng.gen_range(1, 6) as f32;
        tree.insert(Aabb2D::<f32>::from_xywh(x, y, w, h));
    }

    println!("random test result:");
    print!("{}", render_text(&tree));
    std::fs::write("output1.svg", render_svg(&tree)).expect("write output1.svg");
}
