// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Perimeter-based cost heuristic.
//!
//! In 2D the box perimeter `2 × (width + height)` stands in for the classic
//! surface-area heuristic. All costs are computed in the scalar's widened
//! accumulator type so f32 trees rank candidates in f64 and i64 trees in i128.

use crate::error::Error;
use crate::types::{Aabb2D, Scalar};

/// Perimeter of a box: `2 × (width + height)`, in the widened accumulator.
#[inline]
pub fn perimeter<T: Scalar>(b: &Aabb2D<T>) -> T::Acc {
    let w = T::widen(T::sub(b.max_x, b.min_x));
    let h = T::widen(T::sub(b.max_y, b.min_y));
    (w + h) + (w + h)
}

/// Perimeter cost of a possibly absent box; an absent box costs zero.
#[inline]
pub fn cost<T: Scalar>(b: Option<&Aabb2D<T>>) -> T::Acc {
    match b {
        Some(b) => perimeter(b),
        None => T::acc_from_usize(0),
    }
}

/// Perimeter of the union of all present boxes.
///
/// The result is deterministic and independent of input order. At least one
/// entry must be present; an all-absent set is a usage error and is rejected
/// with [`Error::EmptyUnion`] rather than silently costing a zeroed box.
pub fn union_cost<T: Scalar>(boxes: &[Option<Aabb2D<T>>]) -> Result<T::Acc, Error> {
    union_of(boxes)
        .map(|b| perimeter(&b))
        .ok_or(Error::EmptyUnion)
}

/// Union box of all present entries, or `None` if every entry is absent.
pub(crate) fn union_of<T: Scalar>(boxes: &[Option<Aabb2D<T>>]) -> Option<Aabb2D<T>> {
    let mut acc: Option<Aabb2D<T>> = None;
    for b in boxes.iter().flatten() {
        acc = Some(match acc {
            Some(a) => a.union(b),
            None => *b,
        });
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perimeter_of_unit_square() {
        let b = Aabb2D::new(0.0_f32, 0.0, 1.0, 1.0);
        assert_eq!(perimeter(&b), 4.0);
    }

    #[test]
    fn absent_box_costs_zero() {
        assert_eq!(cost::<f64>(None), 0.0);
        let b = Aabb2D::new(0.0_f64, 0.0, 6.0, 6.0);
        assert_eq!(cost(Some(&b)), 24.0);
    }

    #[test]
    fn union_cost_skips_absent_entries() {
        let a = Aabb2D::new(0.0_f64, 0.0, 6.0, 6.0);
        let b = Aabb2D::new(10.0, 0.0, 16.0, 6.0);
        let c = union_cost(&[Some(a), None, Some(b)]).unwrap();
        // Union is (0,0)-(16,6): 2 * (16 + 6).
        assert_eq!(c, 44.0);
    }

    #[test]
    fn union_cost_is_order_independent() {
        let a = Aabb2D::new(-3_i64, 1, 4, 9);
        let b = Aabb2D::new(2, -5, 11, 3);
        let ab = union_cost(&[Some(a), Some(b)]).unwrap();
        let ba = union_cost(&[Some(b), Some(a)]).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn all_absent_union_is_rejected() {
        let none: [Option<Aabb2D<f64>>; 3] = [None, None, None];
        assert_eq!(union_cost(&none), Err(Error::EmptyUnion));
        assert_eq!(union_cost::<f64>(&[]), Err(Error::EmptyUnion));
    }
}
