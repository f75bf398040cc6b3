// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain, owned descriptions of diagram subtrees.
//!
//! Schemas are what a data source sends: they carry ids, types and property
//! values but no topology handles. A [`ModelFactory`](super::ModelFactory)
//! materializes them into a live [`SceneGraph`](super::SceneGraph). With the
//! `serde` feature they decode directly from JSON, using `"type"` as the key
//! for [`kind`](ElementSchema::kind).

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use super::capability::{Capabilities, EdgeRoute, Viewport};

/// Description of an element and its children.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementSchema {
    /// Logical id, unique within one graph.
    pub id: String,
    /// Type tag, used to look up default capabilities.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Explicit capabilities; overrides the factory's registry when set.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub capabilities: Option<Capabilities>,
    /// Position relative to the parent.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub position: Option<Point>,
    /// Size; omitted means "not measured yet".
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub size: Option<Size>,
    /// Opacity; omitted means fully opaque.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub opacity: Option<f64>,
    /// Selection flag.
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected: bool,
    /// Routing state for edges.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub route: Option<EdgeRoute>,
    /// Children, in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ElementSchema>,
}

impl ElementSchema {
    /// Creates a schema with the given id and type and no properties.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Sets the position.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Sets the size.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets explicit capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Sets the selection flag.
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Sets the routing state.
    #[must_use]
    pub fn with_route(mut self, route: EdgeRoute) -> Self {
        self.route = Some(route);
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// Description of a whole diagram.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootSchema {
    /// Logical id of the root. Updates only animate when it is unchanged.
    pub id: String,
    /// Type tag of the root.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Explicit capabilities; overrides the factory's registry when set.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub capabilities: Option<Capabilities>,
    /// Canvas bounds of the rendered viewport, if known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub canvas_bounds: Option<Rect>,
    /// Scroll and zoom for viewport-capable roots.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub viewport: Option<Viewport>,
    /// Top-level elements, in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<ElementSchema>,
}

impl RootSchema {
    /// Creates a root schema with the given id and type and no children.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Sets the canvas bounds.
    #[must_use]
    pub fn with_canvas_bounds(mut self, bounds: Rect) -> Self {
        self.canvas_bounds = Some(bounds);
        self
    }

    /// Sets the viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Sets explicit capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Appends a top-level element.
    #[must_use]
    pub fn with_child(mut self, child: ElementSchema) -> Self {
        self.children.push(child);
        self
    }
}

/// A caller-supplied correspondence used for incremental updates.
///
/// `left` describes the element being replaced or removed (only its id is
/// consulted), `right` the element being added or replacing it. A patch
/// touches only the ids it lists; everything else is assumed unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSchema {
    /// The element on the old side.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub left: Option<ElementSchema>,
    /// The element on the new side.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub right: Option<ElementSchema>,
    /// Parent id of `left` in the old graph.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub left_parent_id: Option<String>,
    /// Parent id of `right` in the new graph.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub right_parent_id: Option<String>,
}

impl MatchSchema {
    /// An addition of `right` under `parent_id`.
    #[must_use]
    pub fn add(right: ElementSchema, parent_id: impl Into<String>) -> Self {
        Self {
            right: Some(right),
            right_parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }

    /// A removal of `left`, previously under `parent_id`.
    #[must_use]
    pub fn remove(left: ElementSchema, parent_id: impl Into<String>) -> Self {
        Self {
            left: Some(left),
            left_parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }

    /// A replacement of `left` by `right`, both under `parent_id`.
    #[must_use]
    pub fn replace(left: ElementSchema, right: ElementSchema, parent_id: impl Into<String>) -> Self {
        let parent_id = parent_id.into();
        Self {
            left: Some(left),
            right: Some(right),
            left_parent_id: Some(parent_id.clone()),
            right_parent_id: Some(parent_id),
        }
    }

    /// Returns the same correspondence seen from the other side.
    ///
    /// Undoing a patch applies its mirror.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            left: self.right.clone(),
            right: self.left.clone(),
            left_parent_id: self.right_parent_id.clone(),
            right_parent_id: self.left_parent_id.clone(),
        }
    }
}
