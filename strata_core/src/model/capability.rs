// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability flags and the optional per-element state they gate.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

bitflags::bitflags! {
    /// The capabilities an element exposes to reconciliation and animation.
    ///
    /// Each flag gates a piece of state in the [`SceneGraph`](super::SceneGraph):
    /// positions for [`LOCATABLE`](Self::LOCATABLE), sizes for
    /// [`SIZEABLE`](Self::SIZEABLE), and so on. Reconciliation only diffs a
    /// property when both sides of a match carry the flag.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Capabilities: u16 {
        /// Has a position relative to its parent.
        const LOCATABLE = 1 << 0;
        /// Has a size (possibly unset).
        const SIZEABLE = 1 << 1;
        /// Carries a selection flag.
        const SELECTABLE = 1 << 2;
        /// Carries an opacity that may be animated.
        const FADEABLE = 1 << 3;
        /// Carries scroll and zoom.
        const VIEWPORT = 1 << 4;
        /// Is an edge with routing state.
        const ROUTABLE = 1 << 5;
        /// May own children.
        const CONTAINER = 1 << 6;
    }
}

impl Capabilities {
    /// Capabilities of a diagram root: a scrollable, zoomable container.
    pub const ROOT: Self = Self::VIEWPORT.union(Self::CONTAINER);

    /// Capabilities of a typical node: placed, sized, selectable, fadeable
    /// and able to hold labels, ports, or nested nodes.
    pub const NODE: Self = Self::LOCATABLE
        .union(Self::SIZEABLE)
        .union(Self::SELECTABLE)
        .union(Self::FADEABLE)
        .union(Self::CONTAINER);

    /// Capabilities of a typical edge.
    pub const EDGE: Self = Self::ROUTABLE
        .union(Self::SELECTABLE)
        .union(Self::FADEABLE)
        .union(Self::CONTAINER);

    /// Capabilities of a label or other decoration.
    pub const LABEL: Self = Self::LOCATABLE
        .union(Self::SIZEABLE)
        .union(Self::SELECTABLE)
        .union(Self::FADEABLE);

    /// Capabilities given to elements whose type is not registered.
    #[must_use]
    pub const fn default_element() -> Self {
        Self::CONTAINER.union(Self::FADEABLE)
    }
}

/// Scroll offset and zoom factor of a viewport-capable element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Scroll offset in diagram coordinates.
    pub scroll: Point,
    /// Zoom factor (1.0 is unscaled).
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll: Point::ZERO,
            zoom: 1.0,
        }
    }
}

/// Routing state of an edge.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRoute {
    /// Key into the [`EdgeRouterRegistry`](crate::router::EdgeRouterRegistry).
    pub router_kind: String,
    /// Logical id of the source element, if connected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_id: Option<String>,
    /// Logical id of the target element, if connected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_id: Option<String>,
    /// User-defined bend points between source and target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub routing_points: Vec<Point>,
}

impl EdgeRoute {
    /// Creates a route for the given router kind with no endpoints or bends.
    #[must_use]
    pub fn new(router_kind: impl Into<String>) -> Self {
        Self {
            router_kind: router_kind.into(),
            ..Self::default()
        }
    }

    /// Sets source and target ids.
    #[must_use]
    pub fn between(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_id = Some(source.into());
        self.target_id = Some(target.into());
        self
    }

    /// Sets the routing points.
    #[must_use]
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.routing_points = points;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_compose_expected_flags() {
        assert!(Capabilities::NODE.contains(Capabilities::LOCATABLE | Capabilities::SIZEABLE));
        assert!(!Capabilities::NODE.contains(Capabilities::ROUTABLE));
        assert!(Capabilities::EDGE.contains(Capabilities::ROUTABLE));
        assert!(Capabilities::ROOT.contains(Capabilities::VIEWPORT));
        assert!(!Capabilities::LABEL.contains(Capabilities::CONTAINER));
    }

    #[test]
    fn viewport_defaults_to_unit_zoom() {
        let v = Viewport::default();
        assert_eq!(v.zoom, 1.0);
        assert_eq!(v.scroll, Point::ZERO);
    }
}
