// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    ///
    /// No ordering is enforced between mins and maxes; supplying an inverted
    /// box is part of the caller's contract and leaves costs unspecified.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// The smallest AABB enclosing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }
}

impl Aabb2D<f32> {
    /// Create an AABB from origin and size in f32.
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<i64> {
    /// Create an AABB from origin and size in i64.
    pub const fn from_xywh(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

/// Numeric scalar abstraction for 2D AABBs.
///
/// Provides the minimal set of operations required for perimeter-cost
/// bookkeeping, and an associated widened accumulator type for cost sums
/// (e.g., f32→f64, i64→i128) so comparisons stay robust.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for cost computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + Debug;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Convert a `usize` to the accumulator type (for fixed penalties).
    fn acc_from_usize(n: usize) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as Self::Acc
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as i128
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}
