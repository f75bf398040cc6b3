// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Animation frames mutate element properties many times per second, and a
//! renderer only wants to repaint what changed. The scene graph marks these
//! channels (via [`understory_dirty`]) on every property write and
//! [`SceneGraph::evaluate`](crate::model::SceneGraph::evaluate) drains them
//! into [`ModelChanges`](crate::model::ModelChanges).
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`BOUNDS`] and [`OPACITY`] are marked with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) along child → parent
//!   dependency edges. Positions are relative to the parent and opacity
//!   multiplies down the tree, so moving or fading a container affects every
//!   descendant.
//! - **Local-only**: [`ROUTE`] and [`SELECTION`] only report the element
//!   that was written.
//! - **Structural**: [`TOPOLOGY`] is marked when elements are added or
//!   removed and forces a traversal-order rebuild.

use understory_dirty::Channel;

/// Position or size changed; world origins of descendants are recomputed.
pub const BOUNDS: Channel = Channel::new(0);

/// Opacity changed; effective opacity of descendants is recomputed.
pub const OPACITY: Channel = Channel::new(1);

/// Edge routing points changed.
pub const ROUTE: Channel = Channel::new(2);

/// Selection flag changed.
pub const SELECTION: Channel = Channel::new(3);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(4);
