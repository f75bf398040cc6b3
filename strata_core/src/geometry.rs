// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerance comparisons and validity checks for diagram geometry.
//!
//! Positions and sizes are [`kurbo`] types. A size of [`EMPTY_SIZE`] marks an
//! element whose dimensions have not been measured yet; reconciliation treats
//! such sizes as "unset" rather than as a zero-sized box.

use kurbo::{Point, Rect, Size};

/// Sentinel size for elements whose dimensions are not known yet.
pub const EMPTY_SIZE: Size = Size::new(-1.0, -1.0);

/// Sentinel canvas bounds for a root that has not been rendered yet.
pub const EMPTY_CANVAS: Rect = Rect::new(0.0, 0.0, -1.0, -1.0);

/// Default tolerance used when comparing coordinates.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Returns whether `a` and `b` differ by at most `epsilon`.
///
/// A difference of exactly `epsilon` counts as equal. NaN never compares
/// equal.
#[inline]
#[must_use]
pub fn almost_equals(a: f64, b: f64, epsilon: f64) -> bool {
    let d = a - b;
    d <= epsilon && d >= -epsilon
}

/// Returns whether two points are equal within `epsilon` on both axes.
#[inline]
#[must_use]
pub fn points_almost_equal(a: Point, b: Point, epsilon: f64) -> bool {
    almost_equals(a.x, b.x, epsilon) && almost_equals(a.y, b.y, epsilon)
}

/// Returns whether two sizes are equal within `epsilon` in both dimensions.
#[inline]
#[must_use]
pub fn sizes_almost_equal(a: Size, b: Size, epsilon: f64) -> bool {
    almost_equals(a.width, b.width, epsilon) && almost_equals(a.height, b.height, epsilon)
}

/// Returns whether `size` describes a measured box (both dimensions `>= 0`).
#[inline]
#[must_use]
pub fn is_valid_size(size: Size) -> bool {
    size.width >= 0.0 && size.height >= 0.0
}

/// Returns whether `rect` is a valid (non-inverted) rectangle.
#[inline]
#[must_use]
pub fn is_valid_rect(rect: Rect) -> bool {
    is_valid_size(rect.size())
}

/// Linear interpolation between two sizes.
#[inline]
#[must_use]
pub fn lerp_size(from: Size, to: Size, t: f64) -> Size {
    Size::new(
        from.width + (to.width - from.width) * t,
        from.height + (to.height - from.height) * t,
    )
}
