// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element handle type.

use core::fmt;

/// Sentinel value indicating "no element" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an element in a [`SceneGraph`](super::SceneGraph).
///
/// Handles are local to the graph that issued them: the same logical element
/// in an old and a new snapshot has two unrelated handles, and only its
/// string id links them. The generation counter detects handles that outlive
/// a removed element whose slot has been reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ElementId {
    /// Returns the raw slot index (for diagnostics and change lists).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}@gen{})", self.idx, self.generation)
    }
}
