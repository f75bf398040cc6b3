// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property animations applied to a graph.
//!
//! An [`Animation`] owns the start and end state of every property it
//! touches. Playing it means calling [`tween`](Animation::tween) with an
//! eased progress in `[0, 1]` and finally [`finish`](Animation::finish),
//! which writes the end state and removes elements that faded out.
//!
//! Animations hold [`ElementId`](crate::model::ElementId)s and are only
//! meaningful for the graph they were composed against.

mod compound;
mod fade;
mod morph;
mod motion;
mod resize;

pub use compound::CompoundAnimation;
pub use fade::FadeAnimation;
pub use morph::MorphEdgesAnimation;
pub use motion::MoveAnimation;
pub use resize::ResizeAnimation;

use crate::model::SceneGraph;
use crate::time::{Duration, Timebase};

/// Maps linear progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Identity.
    Linear,
    /// Quadratic ease-in-out: `2t²` for the first half, `1 − 2(1−t)²` for
    /// the second.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Applies the curve to `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 2.0 * u * u
                }
            }
        }
    }
}

/// Timing parameters for animated updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationContext {
    /// Total duration, in [`HostTime`](crate::time::HostTime) ticks.
    pub duration: Duration,
    /// Progress curve.
    pub easing: Easing,
}

impl AnimationContext {
    /// 250 ms, ease-in-out, for nanosecond tick sources.
    pub const DEFAULT: Self = Self::from_millis(250, Timebase::NANOS);

    /// An ease-in-out context lasting `millis` in the given timebase.
    #[must_use]
    pub const fn from_millis(millis: u64, timebase: Timebase) -> Self {
        Self {
            duration: Duration::from_millis(millis, timebase),
            easing: Easing::EaseInOut,
        }
    }

    /// Returns a copy with a different easing curve.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for AnimationContext {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One of the animations the composer produces.
#[derive(Debug)]
pub enum Animation {
    /// Opacity fades.
    Fade(FadeAnimation),
    /// Position interpolation.
    Move(MoveAnimation),
    /// Size interpolation.
    Resize(ResizeAnimation),
    /// Edge route interpolation.
    MorphEdges(MorphEdgesAnimation),
    /// Several of the above played in lockstep.
    Compound(CompoundAnimation),
}

impl Animation {
    /// Writes the state at eased progress `t` into `graph`.
    pub fn tween(&self, graph: &mut SceneGraph, t: f64) {
        match self {
            Self::Fade(a) => a.tween(graph, t),
            Self::Move(a) => a.tween(graph, t),
            Self::Resize(a) => a.tween(graph, t),
            Self::MorphEdges(a) => a.tween(graph, t),
            Self::Compound(a) => a.tween(graph, t),
        }
    }

    /// Writes the end state into `graph` and removes faded-out elements.
    pub fn finish(&self, graph: &mut SceneGraph) {
        match self {
            Self::Fade(a) => a.finish(graph),
            Self::Move(a) => a.tween(graph, 1.0),
            Self::Resize(a) => a.tween(graph, 1.0),
            Self::MorphEdges(a) => a.finish(graph),
            Self::Compound(a) => a.finish(graph),
        }
    }

    /// Returns the number of non-compound animations contained.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Compound(c) => c.parts().iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }
}
