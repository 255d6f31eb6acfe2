// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform engine: pure 2D helpers and the sticker placement model.
//!
//! The free functions here are small, deterministic building blocks used by the
//! gesture sessions. [`StickerGeometry`] ties them together into a view-style
//! placement: an untransformed `bounds` rectangle, a `center` in parent space,
//! and a linear `transform` applied about that center.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `atan2`
use kurbo::{Affine, Point, Rect, Size};

/// Smallest baseline distance used when deriving a scale factor from a pointer.
///
/// A rotate gesture that starts exactly on the pivot would otherwise divide by
/// zero on its first update.
pub const MIN_PIVOT_DISTANCE: f64 = 1.0;

/// Returns the midpoint of `rect`.
#[must_use]
pub fn rect_center(rect: Rect) -> Point {
    Point::new((rect.x0 + rect.x1) * 0.5, (rect.y0 + rect.y1) * 0.5)
}

/// Scales the size of `rect` component-wise, keeping its origin.
#[must_use]
pub fn scale_rect(rect: Rect, w_factor: f64, h_factor: f64) -> Rect {
    Rect::from_origin_size(
        rect.origin(),
        Size::new(rect.width() * w_factor, rect.height() * h_factor),
    )
}

/// Extracts the rotation angle of `transform`, in radians within `(-π, π]`.
///
/// For kurbo coefficients `[a, b, c, d, e, f]` this is `atan2(b, a)`.
#[must_use]
pub fn affine_angle(transform: Affine) -> f64 {
    let [a, b, ..] = transform.as_coeffs();
    b.atan2(a)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(p2)
}

/// Angle of the ray from `pivot` towards `point`, as `atan2(dy, dx)`.
#[must_use]
pub fn bearing(pivot: Point, point: Point) -> f64 {
    (point.y - pivot.y).atan2(point.x - pivot.x)
}

/// Placement of a sticker inside its parent container.
///
/// Applying [`to_parent`](Self::to_parent) to `bounds` always yields the
/// on-screen footprint; [`frame`](Self::frame) is its axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickerGeometry {
    /// Center of the sticker in parent coordinates.
    pub center: Point,
    /// Untransformed bounds in local coordinates (origin normally at zero).
    pub bounds: Rect,
    /// Linear transform applied about `center`.
    pub transform: Affine,
}

impl StickerGeometry {
    /// Creates an untransformed placement with the given local bounds.
    ///
    /// The center starts at the middle of `bounds`, so the initial frame equals
    /// the bounds.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            center: rect_center(bounds),
            bounds,
            transform: Affine::IDENTITY,
        }
    }

    /// Local → parent transform.
    #[must_use]
    pub fn to_parent(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
            * self.transform
            * Affine::translate(-rect_center(self.bounds).to_vec2())
    }

    /// Parent → local transform.
    #[must_use]
    pub fn to_local(&self) -> Affine {
        self.to_parent().inverse()
    }

    /// Maps a point from parent coordinates into local bounds coordinates.
    #[must_use]
    pub fn parent_to_local(&self, point: Point) -> Point {
        self.to_local() * point
    }

    /// Maps a point from local bounds coordinates into parent coordinates.
    #[must_use]
    pub fn local_to_parent(&self, point: Point) -> Point {
        self.to_parent() * point
    }

    /// Axis-aligned bounding box of the transformed bounds, in parent coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.to_parent().transform_rect_bbox(self.bounds)
    }

    /// Rotation angle of the current transform.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        affine_angle(self.transform)
    }
}
