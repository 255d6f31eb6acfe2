// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture state: phases, pointer samples, recognizer arbitration, and the
//! per-gesture baseline sessions.
//!
//! ## Usage
//!
//! 1) On [`GesturePhase::Began`], capture a session from the current geometry.
//! 2) On every [`GesturePhase::Changed`], derive the live transform from the
//!    session and the current pointer. Sessions are anchored to the gesture
//!    start, so updates never accumulate error.
//! 3) On [`GesturePhase::Ended`] (or `Cancelled`), drop the session.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_sticker::gesture::MoveSession;
//!
//! let session = MoveSession::begin(Point::new(10.0, 10.0), Point::new(100.0, 100.0));
//! assert_eq!(session.center_at(Point::new(15.0, 8.0)), Point::new(105.0, 98.0));
//! ```

use kurbo::{Point, Rect};

use crate::geometry::{MIN_PIVOT_DISTANCE, bearing, distance, scale_rect};

/// Phase reported by the host for a continuous or discrete gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The recognizer started tracking.
    Began,
    /// The pointer moved while tracking.
    Changed,
    /// The gesture finished normally.
    Ended,
    /// The host aborted the gesture; handled exactly like [`Self::Ended`].
    Cancelled,
}

impl GesturePhase {
    /// Returns `true` for the phases that close a gesture.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// Coordinate space a pointer location is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CoordinateSpace {
    /// The sticker's parent container.
    #[default]
    Parent,
    /// The sticker's own untransformed bounds.
    Local,
}

/// One pointer sample delivered to a recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Gesture phase of this sample.
    pub phase: GesturePhase,
    /// Pointer location in `space`.
    pub location: Point,
    /// Space `location` is expressed in.
    pub space: CoordinateSpace,
}

impl PointerSample {
    /// A sample in parent coordinates.
    #[must_use]
    pub const fn parent(phase: GesturePhase, location: Point) -> Self {
        Self {
            phase,
            location,
            space: CoordinateSpace::Parent,
        }
    }

    /// A sample in the sticker's local coordinates.
    #[must_use]
    pub const fn local(phase: GesturePhase, location: Point) -> Self {
        Self {
            phase,
            location,
            space: CoordinateSpace::Local,
        }
    }
}

/// The five recognizers attached to a sticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recognizer {
    /// Pan on the sticker body.
    Move,
    /// Pan on the rotate handle.
    RotateResize,
    /// Tap on the close handle.
    CloseTap,
    /// Tap on the flip handle.
    FlipTap,
    /// Tap anywhere not absorbed by a handle.
    SelectTap,
}

impl Recognizer {
    /// Returns `true` for recognizers attached to a handle.
    #[must_use]
    pub const fn is_handle_recognizer(self) -> bool {
        matches!(self, Self::RotateResize | Self::CloseTap | Self::FlipTap)
    }

    /// Whether `self` may only recognize after `other` has failed.
    ///
    /// Sticker-level recognizers always wait for handle recognizers. This is a
    /// fixed policy and not configurable.
    #[must_use]
    pub const fn requires_failure_of(self, other: Self) -> bool {
        !self.is_handle_recognizer() && other.is_handle_recognizer()
    }
}

/// Baseline for a move gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveSession {
    start_location: Point,
    start_center: Point,
}

impl MoveSession {
    /// Records the pointer and sticker center (both in parent space) at gesture start.
    #[must_use]
    pub const fn begin(location: Point, center: Point) -> Self {
        Self {
            start_location: location,
            start_center: center,
        }
    }

    /// Center for the pointer at `location`: the start center plus the total pointer offset.
    #[must_use]
    pub fn center_at(&self, location: Point) -> Point {
        self.start_center + (location - self.start_location)
    }
}

/// Baseline for a rotate-and-resize gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateSession {
    initial_bounds: Rect,
    initial_distance: f64,
    delta_angle: f64,
}

impl RotateSession {
    /// Captures the baseline for a pointer at `location` rotating about `pivot`.
    ///
    /// `rotation` is the sticker's current rotation angle and `bounds` its
    /// current untransformed bounds.
    #[must_use]
    pub fn begin(pivot: Point, location: Point, rotation: f64, bounds: Rect) -> Self {
        Self {
            initial_bounds: bounds,
            initial_distance: distance(pivot, location).max(MIN_PIVOT_DISTANCE),
            delta_angle: bearing(pivot, location) - rotation,
        }
    }

    /// Absolute rotation angle for the pointer at `location`.
    #[must_use]
    pub fn rotation_at(&self, pivot: Point, location: Point) -> f64 {
        let angle_diff = self.delta_angle - bearing(pivot, location);
        -angle_diff
    }

    /// Uniform scale factor for the pointer at `location`.
    ///
    /// The factor is floored so the shorter side of the scaled bounds never
    /// drops below `minimum_size`.
    #[must_use]
    pub fn scale_at(&self, pivot: Point, location: Point, minimum_size: f64) -> f64 {
        let scale = distance(pivot, location) / self.initial_distance;
        let shorter = self.initial_bounds.width().min(self.initial_bounds.height());
        if shorter > 0.0 {
            scale.max(minimum_size / shorter)
        } else {
            scale
        }
    }

    /// Initial bounds scaled uniformly by `scale`.
    #[must_use]
    pub fn bounds_at(&self, scale: f64) -> Rect {
        scale_rect(self.initial_bounds, scale, scale)
    }
}
