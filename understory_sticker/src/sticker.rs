// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;
use core::time::Duration;

use kurbo::{Affine, Point, Rect, Size};
use log::{debug, trace};
use peniko::Color;

use crate::config::StickerConfig;
use crate::geometry::StickerGeometry;
use crate::gesture::{CoordinateSpace, GesturePhase, MoveSession, PointerSample, Recognizer, RotateSession};
use crate::layout::{Anchor, AutoresizingMask, Handle, HandleKind, Handles, autoresize};
use crate::observer::{StickerEvent, StickerObserver};

/// Suggested duration for hosts that tween the flip mirror.
///
/// The sticker applies the mirror immediately; a host with an animation
/// facility can interpolate from the previous content transform over this time.
pub const FLIP_DURATION: Duration = Duration::from_millis(300);

/// The wrapped content element of a sticker.
///
/// The sticker only needs the content's size at construction. Afterwards it
/// tracks the content's frame and transform itself; hosts read them back via
/// [`StickerWidget::content_frame`] and [`StickerWidget::content_transform`].
pub trait StickerContent {
    /// Size of the content before any sticker padding is added.
    fn size(&self) -> Size;
}

impl StickerContent for Size {
    fn size(&self) -> Size {
        *self
    }
}

impl StickerContent for Rect {
    fn size(&self) -> Size {
        Rect::size(self)
    }
}

/// One entry of a sticker's back-to-front paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The wrapped content; always at the back.
    Content,
    /// An editing handle.
    Handle(HandleKind),
}

/// A movable, rotatable, resizable, flippable, and closable wrapper around content.
///
/// See the [crate docs](crate) for an overview and example.
pub struct StickerWidget<C, I = ()> {
    content: C,
    content_frame: Rect,
    content_transform: Affine,
    geometry: StickerGeometry,
    handles: Handles<I>,
    inset: u32,
    minimum_size: u32,
    show_editing_handlers: bool,
    outline_border_color: Color,
    user_info: Option<Box<dyn Any>>,
    observer: Option<Box<dyn StickerObserver<C, I>>>,
    move_session: Option<MoveSession>,
    rotate_session: Option<RotateSession>,
    active_pan: Option<(Recognizer, Point)>,
    attached: bool,
    needs_redraw: bool,
}

impl<C: fmt::Debug, I: fmt::Debug> fmt::Debug for StickerWidget<C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickerWidget")
            .field("content", &self.content)
            .field("content_frame", &self.content_frame)
            .field("content_transform", &self.content_transform)
            .field("geometry", &self.geometry)
            .field("handles", &self.handles)
            .field("inset", &self.inset)
            .field("minimum_size", &self.minimum_size)
            .field("show_editing_handlers", &self.show_editing_handlers)
            .field("outline_border_color", &self.outline_border_color)
            .field("has_observer", &self.observer.is_some())
            .field("move_session", &self.move_session)
            .field("rotate_session", &self.rotate_session)
            .field("active_pan", &self.active_pan)
            .field("attached", &self.attached)
            .field("needs_redraw", &self.needs_redraw)
            .finish_non_exhaustive()
    }
}

impl<C: StickerContent, I> StickerWidget<C, I> {
    /// Wraps `content` with the default configuration.
    #[must_use]
    pub fn new(content: C) -> Self {
        Self::with_config(content, StickerConfig::default())
    }

    /// Wraps `content` using `config`.
    ///
    /// The bounds are the content size padded by the inset on every side, and
    /// the sticker starts centered on the middle of those bounds.
    #[must_use]
    pub fn with_config(content: C, config: StickerConfig) -> Self {
        let raw = content.size();
        let content_size = Size::new(raw.width.max(0.0), raw.height.max(0.0));
        let inset = config.inset;
        let bounds = padded_bounds(content_size, inset);
        let content_frame = Rect::from_center_size(bounds.center(), content_size);
        let mut handles = Handles::new(
            f64::from(inset),
            content_frame,
            HandleKind::ALL.map(|kind| config.anchor(kind)),
        );
        for kind in HandleKind::ALL {
            handles.set_enabled(kind, config.is_enabled(kind));
        }
        handles.apply_gate(config.show_editing_handlers);
        Self {
            content,
            content_frame,
            content_transform: Affine::IDENTITY,
            geometry: StickerGeometry::new(bounds),
            handles,
            inset,
            minimum_size: config.minimum_size.max(default_minimum_size(inset)),
            show_editing_handlers: config.show_editing_handlers,
            outline_border_color: config.outline_border_color,
            user_info: None,
            observer: None,
            move_session: None,
            rotate_session: None,
            active_pan: None,
            attached: true,
            needs_redraw: false,
        }
    }
}

impl<C, I> StickerWidget<C, I> {
    /// The wrapped content.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the wrapped content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Gives the content back to the host, consuming the sticker.
    #[must_use]
    pub fn into_content(self) -> C {
        self.content
    }

    /// Content frame in local coordinates; follows the bounds with fixed margins.
    #[must_use]
    pub fn content_frame(&self) -> Rect {
        self.content_frame
    }

    /// Transform of the content about its own center (only ever a mirror).
    #[must_use]
    pub fn content_transform(&self) -> Affine {
        self.content_transform
    }

    /// Returns `true` if the content is currently mirrored.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.content_transform.determinant() < 0.0
    }

    /// Full placement of the sticker.
    #[must_use]
    pub fn geometry(&self) -> StickerGeometry {
        self.geometry
    }

    /// Center in parent coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        self.geometry.center
    }

    /// Moves the sticker so its center is at `center` (parent coordinates).
    pub fn set_center(&mut self, center: Point) {
        self.geometry.center = center;
    }

    /// Transform applied about the center.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.geometry.transform
    }

    /// Replaces the transform applied about the center.
    pub fn set_transform(&mut self, transform: Affine) {
        self.geometry.transform = transform;
    }

    /// Untransformed bounds in local coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.geometry.bounds
    }

    /// Bounding box of the transformed bounds in parent coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.geometry.frame()
    }

    /// Rotation angle of the current transform.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.geometry.rotation()
    }

    /// All three handles.
    #[must_use]
    pub fn handles(&self) -> &Handles<I> {
        &self.handles
    }

    /// The handle of the given kind.
    #[must_use]
    pub fn handle(&self, kind: HandleKind) -> &Handle<I> {
        self.handles.get(kind)
    }

    /// Back-to-front paint order: the content, then the handles.
    #[must_use]
    pub fn layers(&self) -> [Layer; 4] {
        [
            Layer::Content,
            Layer::Handle(HandleKind::Close),
            Layer::Handle(HandleKind::Rotate),
            Layer::Handle(HandleKind::Flip),
        ]
    }

    /// Sets the icon for a handle.
    pub fn set_image(&mut self, image: I, kind: HandleKind) {
        self.handles.set_image(kind, image);
    }

    /// Pins a handle to a corner of the content.
    ///
    /// Nothing prevents two handles from sharing a corner.
    pub fn set_position(&mut self, anchor: Anchor, kind: HandleKind) {
        self.handles.place(kind, anchor, self.content_frame);
    }

    /// Half the handle edge length, and the padding around the content.
    #[must_use]
    pub fn inset(&self) -> u32 {
        self.inset
    }

    /// Lower bound for [`minimum_size`](Self::minimum_size): `4 * inset`.
    #[must_use]
    pub fn default_minimum_size(&self) -> u32 {
        default_minimum_size(self.inset)
    }

    /// Minimum for the shorter side of the bounds while resizing.
    #[must_use]
    pub fn minimum_size(&self) -> u32 {
        self.minimum_size
    }

    /// Requests a minimum size; values below [`default_minimum_size`](Self::default_minimum_size) are raised to it.
    pub fn set_minimum_size(&mut self, minimum_size: u32) {
        self.minimum_size = minimum_size.max(self.default_minimum_size());
    }

    /// Changes the handle edge length.
    ///
    /// The inset becomes `round(size / 2)`, the minimum size is raised if
    /// needed, and the bounds are rebuilt around the current content size. The
    /// center and transform are preserved, and every handle keeps its anchor.
    /// A size of `0` is ignored.
    pub fn set_handle_size(&mut self, size: u32) {
        if size == 0 {
            debug!("ignoring zero handle size");
            return;
        }
        self.inset = size.div_ceil(2);
        self.minimum_size = self.minimum_size.max(self.default_minimum_size());

        let content_size = self.content_frame.size();
        let bounds = padded_bounds(content_size, self.inset);
        self.geometry.bounds = bounds;
        self.content_frame = Rect::from_center_size(bounds.center(), content_size);
        self.handles
            .resize_all(f64::from(self.inset), self.content_frame);
    }

    /// Whether the close handle is enabled on its own.
    #[must_use]
    pub fn enable_close(&self) -> bool {
        self.handles.get(HandleKind::Close).is_enabled()
    }

    /// Enables or disables the close handle.
    pub fn set_enable_close(&mut self, enabled: bool) {
        self.set_handle_enabled(HandleKind::Close, enabled);
    }

    /// Whether the rotate handle is enabled on its own.
    #[must_use]
    pub fn enable_rotate(&self) -> bool {
        self.handles.get(HandleKind::Rotate).is_enabled()
    }

    /// Enables or disables the rotate handle.
    pub fn set_enable_rotate(&mut self, enabled: bool) {
        self.set_handle_enabled(HandleKind::Rotate, enabled);
    }

    /// Whether the flip handle is enabled on its own.
    #[must_use]
    pub fn enable_flip(&self) -> bool {
        self.handles.get(HandleKind::Flip).is_enabled()
    }

    /// Enables or disables the flip handle.
    pub fn set_enable_flip(&mut self, enabled: bool) {
        self.set_handle_enabled(HandleKind::Flip, enabled);
    }

    fn set_handle_enabled(&mut self, kind: HandleKind, enabled: bool) {
        self.handles.set_enabled(kind, enabled);
        self.handles.apply_gate(self.show_editing_handlers);
    }

    /// Global gate for handle visibility and interactivity.
    #[must_use]
    pub fn show_editing_handlers(&self) -> bool {
        self.show_editing_handlers
    }

    /// Shows or hides all handles.
    ///
    /// While hidden, no handle is visible or interactive. Showing them again
    /// restores each handle to its own enable flag.
    pub fn set_show_editing_handlers(&mut self, show: bool) {
        self.show_editing_handlers = show;
        self.handles.apply_gate(show);
    }

    /// Color of the outline drawn around the content.
    #[must_use]
    pub fn outline_border_color(&self) -> Color {
        self.outline_border_color
    }

    /// Sets the outline color.
    pub fn set_outline_border_color(&mut self, color: Color) {
        self.outline_border_color = color;
    }

    /// Outline width: `1.0` while handles are shown, `0.0` otherwise.
    #[must_use]
    pub fn outline_border_width(&self) -> f64 {
        if self.show_editing_handlers { 1.0 } else { 0.0 }
    }

    /// Stores arbitrary host data on the sticker.
    pub fn set_user_info<T: Any>(&mut self, info: T) {
        self.user_info = Some(Box::new(info));
    }

    /// Host data, if present and of type `T`.
    #[must_use]
    pub fn user_info<T: Any>(&self) -> Option<&T> {
        self.user_info.as_ref()?.downcast_ref()
    }

    /// Removes and returns the host data.
    pub fn take_user_info(&mut self) -> Option<Box<dyn Any>> {
        self.user_info.take()
    }

    /// Installs the observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl StickerObserver<C, I> + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes and returns the observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn StickerObserver<C, I>>> {
        self.observer.take()
    }

    /// Returns `true` while the sticker belongs to a container.
    ///
    /// A close tap detaches the sticker; detached stickers ignore all input.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns `true` if a resize requested a redraw that has not been taken.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clears and returns the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.needs_redraw)
    }

    /// Feeds the move recognizer (pan on the sticker body).
    ///
    /// The center follows the total pointer offset since `Began`. `Ended` and
    /// `Cancelled` apply the final offset before notifying.
    pub fn handle_move(&mut self, sample: PointerSample) {
        let Some(location) = self.accept(sample) else {
            return;
        };
        match sample.phase {
            GesturePhase::Began => {
                trace!("move began at {location:?}");
                self.move_session = Some(MoveSession::begin(location, self.geometry.center));
                self.emit(StickerEvent::BeginMoving);
            }
            GesturePhase::Changed => {
                let Some(session) = self.move_session else {
                    debug!("dropping move update without a session");
                    return;
                };
                self.geometry.center = session.center_at(location);
                self.emit(StickerEvent::ChangeMoving);
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                let Some(session) = self.move_session.take() else {
                    debug!("dropping move end without a session");
                    return;
                };
                self.geometry.center = session.center_at(location);
                trace!("move ended at center {:?}", self.geometry.center);
                self.emit(StickerEvent::EndMoving);
            }
        }
    }

    /// Feeds the rotate/resize recognizer (pan on the rotate handle).
    ///
    /// Each update replaces the transform with an absolute rotation and the
    /// bounds with the start bounds scaled by the pointer's distance ratio to
    /// the center, floored by [`minimum_size`](Self::minimum_size).
    pub fn handle_rotate(&mut self, sample: PointerSample) {
        let Some(location) = self.accept(sample) else {
            return;
        };
        let pivot = self.geometry.center;
        match sample.phase {
            GesturePhase::Began => {
                if !self.handles.get(HandleKind::Rotate).is_interactive() {
                    debug!("rotate handle is not interactive");
                    return;
                }
                trace!("rotate began at {location:?}");
                self.rotate_session = Some(RotateSession::begin(
                    pivot,
                    location,
                    self.rotation(),
                    self.geometry.bounds,
                ));
                self.emit(StickerEvent::BeginRotating);
            }
            GesturePhase::Changed => {
                let Some(session) = self.rotate_session else {
                    debug!("dropping rotate update without a session");
                    return;
                };
                self.geometry.transform = Affine::rotate(session.rotation_at(pivot, location));
                let scale = session.scale_at(pivot, location, f64::from(self.minimum_size));
                self.set_bounds(session.bounds_at(scale));
                self.needs_redraw = true;
                self.emit(StickerEvent::ChangeRotating);
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                if self.rotate_session.take().is_none() {
                    debug!("dropping rotate end without a session");
                    return;
                }
                trace!("rotate ended at angle {}", self.rotation());
                self.emit(StickerEvent::EndRotating);
            }
        }
    }

    /// Fires the close recognizer: notifies, then detaches the sticker.
    pub fn handle_close_tap(&mut self) {
        if !self.attached || !self.handles.get(HandleKind::Close).is_interactive() {
            debug!("close tap ignored");
            return;
        }
        self.emit(StickerEvent::DidClose);
        self.attached = false;
        self.move_session = None;
        self.rotate_session = None;
        self.active_pan = None;
    }

    /// Fires the flip recognizer: mirrors the content horizontally.
    ///
    /// The sticker's bounds, center, transform, and handles are untouched.
    pub fn handle_flip_tap(&mut self) {
        if !self.attached || !self.handles.get(HandleKind::Flip).is_interactive() {
            debug!("flip tap ignored");
            return;
        }
        self.content_transform = self.content_transform * Affine::scale_non_uniform(-1.0, 1.0);
        trace!("content flipped: {}", self.is_flipped());
    }

    /// Fires the select recognizer: notifies without changing any state.
    pub fn handle_tap(&mut self) {
        if !self.attached {
            debug!("tap on detached sticker ignored");
            return;
        }
        self.emit(StickerEvent::DidTap);
    }

    /// Returns `true` if `location` (parent coordinates) is on the sticker:
    /// inside its transformed bounds or over an interactive handle.
    #[must_use]
    pub fn contains(&self, location: Point) -> bool {
        let local = self.geometry.parent_to_local(location);
        self.geometry.bounds.contains(local) || self.handles.hit_test(local).is_some()
    }

    /// Routes a pan sample to the rotate or move recognizer.
    ///
    /// On `Began`, a pointer over the interactive rotate handle starts a
    /// rotate/resize, a pointer elsewhere on the sticker starts a move, and a
    /// pointer off the sticker is not routed at all. A `Began` while another
    /// pan is active cancels that pan first. Later phases go to whichever
    /// recognizer began. Returns the recognizer that received the sample.
    pub fn route_pan(&mut self, sample: PointerSample) -> Option<Recognizer> {
        if sample.phase == GesturePhase::Began {
            let location = self.accept(sample)?;
            if let Some((active, last)) = self.active_pan.take() {
                debug!("{active:?} interrupted by a new pan");
                self.dispatch_pan(active, PointerSample::parent(GesturePhase::Cancelled, last));
            }
            let local = self.geometry.parent_to_local(location);
            let handle = match self.handles.hit_test(local) {
                Some(HandleKind::Rotate) => Some(Recognizer::RotateResize),
                _ => None,
            };
            let Some(picked) = self.arbitrate(local, handle, Recognizer::Move) else {
                trace!("pan at {location:?} missed the sticker");
                return None;
            };
            self.active_pan = Some((picked, location));
            self.dispatch_pan(picked, sample);
            return Some(picked);
        }
        let Some((active, _)) = self.active_pan else {
            debug!("dropping {:?} pan sample without an active recognizer", sample.phase);
            return None;
        };
        if sample.phase.is_terminal() {
            self.active_pan = None;
        } else if let Some(location) = self.accept(sample) {
            self.active_pan = Some((active, location));
        }
        self.dispatch_pan(active, sample);
        Some(active)
    }

    /// Routes a tap at `location` (parent coordinates).
    ///
    /// Taps on the interactive close or flip handle are absorbed by it. The
    /// rotate handle has no tap recognizer, so a tap there, like a tap anywhere
    /// else on the sticker, falls through to select. Taps off the sticker are
    /// not routed. Returns the recognizer that fired.
    pub fn route_tap(&mut self, location: Point) -> Option<Recognizer> {
        let location = self.accept(PointerSample::parent(GesturePhase::Ended, location))?;
        let local = self.geometry.parent_to_local(location);
        let handle = match self.handles.hit_test(local) {
            Some(HandleKind::Close) => Some(Recognizer::CloseTap),
            Some(HandleKind::Flip) => Some(Recognizer::FlipTap),
            Some(HandleKind::Rotate) | None => None,
        };
        let Some(recognizer) = self.arbitrate(local, handle, Recognizer::SelectTap) else {
            trace!("tap at {location:?} missed the sticker");
            return None;
        };
        match recognizer {
            Recognizer::CloseTap => self.handle_close_tap(),
            Recognizer::FlipTap => self.handle_flip_tap(),
            _ => self.handle_tap(),
        }
        Some(recognizer)
    }

    /// Picks the recognizer for a pointer at `local`.
    ///
    /// `body` only wins if it does not have to wait for `handle`, and only on
    /// the sticker's bounds.
    fn arbitrate(
        &self,
        local: Point,
        handle: Option<Recognizer>,
        body: Recognizer,
    ) -> Option<Recognizer> {
        match handle {
            Some(handle) if body.requires_failure_of(handle) => Some(handle),
            _ if self.geometry.bounds.contains(local) => Some(body),
            _ => None,
        }
    }

    fn dispatch_pan(&mut self, recognizer: Recognizer, sample: PointerSample) {
        match recognizer {
            Recognizer::RotateResize => self.handle_rotate(sample),
            _ => self.handle_move(sample),
        }
    }

    /// Validates a sample and lifts it into parent coordinates.
    fn accept(&self, sample: PointerSample) -> Option<Point> {
        if !self.attached {
            debug!("input on detached sticker ignored");
            return None;
        }
        if !sample.location.is_finite() {
            debug!("dropping non-finite pointer location {:?}", sample.location);
            return None;
        }
        Some(match sample.space {
            CoordinateSpace::Parent => sample.location,
            CoordinateSpace::Local => self.geometry.local_to_parent(sample.location),
        })
    }

    /// Replaces the bounds, re-laying the content and handles by their masks.
    fn set_bounds(&mut self, bounds: Rect) {
        let old = self.geometry.bounds.size();
        let new = bounds.size();
        self.geometry.bounds = bounds;
        self.content_frame = autoresize(
            self.content_frame,
            AutoresizingMask::FLEXIBLE_WIDTH | AutoresizingMask::FLEXIBLE_HEIGHT,
            old,
            new,
        );
        self.handles.autoresize_all(old, new);
    }

    fn emit(&mut self, event: StickerEvent) {
        trace!("sticker event {event:?}");
        if let Some(mut observer) = self.observer.take() {
            observer.on_event(self, event);
            self.observer = Some(observer);
        }
    }
}

fn default_minimum_size(inset: u32) -> u32 {
    inset.saturating_mul(4)
}

fn padded_bounds(content_size: Size, inset: u32) -> Rect {
    let pad = f64::from(inset) * 2.0;
    Rect::from_origin_size(
        Point::ORIGIN,
        Size::new(content_size.width + pad, content_size.height + pad),
    )
}
