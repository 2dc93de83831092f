// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for precondition violations surfaced to callers.

use core::fmt;

/// Errors reported by the hierarchy and its cost helpers.
///
/// None of these arise during normal operation; each one names a caller-side
/// precondition that was not met.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A union cost was requested over a set with no present boxes.
    EmptyUnion,
    /// The leaf handle does not refer to a leaf currently in the tree
    /// (stale, reused, or never inserted).
    DetachedLeaf,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUnion => write!(f, "union cost requires at least one present box"),
            Self::DetachedLeaf => write!(f, "leaf handle is not attached to this tree"),
        }
    }
}

impl core::error::Error for Error {}
