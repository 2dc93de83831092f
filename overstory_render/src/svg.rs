// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG rendering of a hierarchy.

use alloc::string::String;
use core::fmt::Write as _;

use kurbo::{Rect, Shape};
use overstory_bvh::{Bvh, Scalar};

/// Inset applied to internal-node rectangles so nested boxes stay visible.
const PADDING: f64 = 0.5;

/// Curve flattening tolerance; rectangles flatten exactly, so this is moot.
const TOLERANCE: f64 = 0.1;

/// Render the tree as a standalone SVG document.
///
/// One stroked, unfilled rectangle per node on a fixed `1000×1000` canvas
/// with `viewBox="-20 -20 140 140"`: green for leaves, red for internal
/// nodes, the latter inflated by [`PADDING`]. Path data goes through
/// [`kurbo::BezPath::to_svg`].
pub fn render_svg<T: Scalar + Into<f64>>(tree: &Bvh<T>) -> String {
    let mut out = String::from(
        "<svg width=\"1000\" height=\"1000\" viewBox=\"-20 -20 140 140\" xmlns=\"http://www.w3.org/2000/svg\">\n",
    );
    for (node, _depth) in tree.iter() {
        let b = node.aabb();
        let rect = Rect::new(
            b.min_x.into(),
            b.min_y.into(),
            b.max_x.into(),
            b.max_y.into(),
        );
        let (rect, color) = if node.is_leaf() {
            (rect, "green")
        } else {
            (rect.inflate(PADDING, PADDING), "red")
        };
        let d = rect.to_path(TOLERANCE).to_svg();
        let _ = writeln!(
            out,
            "  <path stroke=\"{color}\" fill-opacity=\"0\" stroke-width=\"0.2\" d=\"{d}\"/>"
        );
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use overstory_bvh::Aabb2D;

    #[test]
    fn empty_tree_is_an_empty_document() {
        let tree: Bvh<f64> = Bvh::new();
        let svg = render_svg(&tree);
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<path").count(), 0);
    }

    #[test]
    fn one_path_per_node_with_role_colors() {
        let mut tree: Bvh<f32> = Bvh::new();
        tree.insert(Aabb2D::new(0.0, 0.0, 6.0, 6.0));
        tree.insert(Aabb2D::new(10.0, 0.0, 16.0, 6.0));
        let svg = render_svg(&tree);
        assert_eq!(svg.matches("<path").count(), tree.iter().count());
        assert_eq!(svg.matches("stroke=\"green\"").count(), 2);
        assert_eq!(svg.matches("stroke=\"red\"").count(), 1);
    }

    #[test]
    fn internal_nodes_are_inflated() {
        let mut tree: Bvh<f64> = Bvh::new();
        tree.insert(Aabb2D::new(0.0, 0.0, 6.0, 6.0));
        tree.insert(Aabb2D::new(10.0, 0.0, 16.0, 6.0));
        let svg = render_svg(&tree);
        // Root box is (0,0)-(16,6); the padded outline starts at -0.5.
        assert!(svg.contains("-0.5"), "internal rectangle must be padded");
        assert!(svg.contains("16.5"), "padding applies on the max side too");
    }
}
