// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sticker --heading-base-level=0

//! Understory Sticker: a headless model of an interactive sticker overlay.
//!
//! A sticker wraps an arbitrary piece of content (an image, a label, a video
//! thumbnail) and lets the user move, rotate, resize, flip, and close it with
//! pan and tap gestures. This crate owns the hard part of that widget: turning
//! pointer samples into transforms while keeping the handles and constraints
//! consistent.
//!
//! It does **not** render anything, own a view tree, or recognize gestures
//! from raw touches. Callers are expected to:
//! - Draw the content into [`StickerWidget::content_frame`] and each visible
//!   handle into its [`Handle::frame`], both mapped through
//!   [`StickerGeometry::to_parent`].
//! - Feed recognized pans and taps into the `handle_*` entry points, or let
//!   [`StickerWidget::route_pan`] / [`StickerWidget::route_tap`] arbitrate
//!   between handle and body recognizers.
//! - Track which sticker is "selected" themselves, typically by reacting to
//!   [`StickerEvent::BeginMoving`] and [`StickerEvent::DidTap`].
//!
//! The pieces, leaves first:
//!
//! - [`geometry`]: pure 2D helpers and the [`StickerGeometry`] placement model.
//! - [`layout`]: corner anchoring and autoresizing of the three handles.
//! - [`gesture`]: phases, pointer samples, recognizer arbitration, and the
//!   move / rotate-resize baseline sessions.
//! - [`observer`]: the notifications a sticker emits.
//! - [`StickerWidget`]: the façade tying them together.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_sticker::gesture::{GesturePhase, PointerSample};
//! use understory_sticker::{EventLog, StickerEvent, StickerWidget};
//!
//! // A 100x60 piece of content gets an 11-unit inset on every side.
//! let mut sticker = StickerWidget::<Size>::new(Size::new(100.0, 60.0));
//! assert_eq!(sticker.bounds().size(), Size::new(122.0, 82.0));
//!
//! let log = EventLog::new();
//! sticker.set_observer(log.clone());
//! sticker.set_center(Point::new(200.0, 200.0));
//!
//! // Drag the body by (30, -10).
//! sticker.handle_move(PointerSample::parent(GesturePhase::Began, Point::new(190.0, 190.0)));
//! sticker.handle_move(PointerSample::parent(GesturePhase::Changed, Point::new(205.0, 185.0)));
//! sticker.handle_move(PointerSample::parent(GesturePhase::Ended, Point::new(220.0, 180.0)));
//!
//! assert_eq!(sticker.center(), Point::new(230.0, 190.0));
//! assert_eq!(
//!     log.events(),
//!     [StickerEvent::BeginMoving, StickerEvent::ChangeMoving, StickerEvent::EndMoving]
//! );
//! ```
//!
//! ## Rotate and resize
//!
//! A pan on the rotate handle rotates the sticker about its center and scales
//! its bounds by the ratio of the pointer's current distance from the center to
//! its distance at gesture start. Both values are recomputed from the gesture's
//! baseline on every update rather than accumulated, and the scale is floored
//! so the shorter side never drops below [`StickerWidget::minimum_size`].
//!
//! ```rust
//! use core::f64::consts::FRAC_PI_2;
//! use kurbo::{Point, Size};
//! use understory_sticker::StickerWidget;
//! use understory_sticker::gesture::{GesturePhase, PointerSample};
//!
//! let mut sticker = StickerWidget::<Size>::new(Size::new(100.0, 60.0));
//! sticker.set_center(Point::new(0.0, 0.0));
//!
//! sticker.handle_rotate(PointerSample::parent(GesturePhase::Began, Point::new(50.0, 0.0)));
//! sticker.handle_rotate(PointerSample::parent(GesturePhase::Changed, Point::new(0.0, 100.0)));
//! sticker.handle_rotate(PointerSample::parent(GesturePhase::Ended, Point::new(0.0, 100.0)));
//!
//! assert!((sticker.rotation() - FRAC_PI_2).abs() < 1e-9);
//! assert!((sticker.bounds().width() - 244.0).abs() < 1e-9);
//! ```
//!
//! ## Logging
//!
//! Gesture phases are traced through the [`log`] facade at `trace` level;
//! dropped samples and ignored configuration are reported at `debug` level.
//! No logger is installed by this crate.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod config;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod observer;
mod sticker;

pub use config::{DEFAULT_INSET, DEFAULT_OUTLINE_COLOR, StickerConfig};
pub use geometry::StickerGeometry;
pub use layout::{Anchor, Handle, HandleKind};
pub use observer::{EventLog, StickerEvent, StickerObserver};
pub use sticker::{FLIP_DURATION, Layer, StickerContent, StickerWidget};
