// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle layout: corner anchoring and autoresizing of the three editing handles.
//!
//! Handles live in the sticker's local (untransformed) coordinate space. Each
//! one is centered on a corner of the content frame and carries an
//! [`AutoresizingMask`] whose flexible margins point *away* from that corner,
//! so the handle stays pinned to it while the sticker's bounds are resized.

use kurbo::{Point, Rect, Size};

/// One of the three editing handles of a sticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Tapping removes the sticker from its container.
    Close,
    /// Dragging rotates and uniformly resizes the sticker.
    Rotate,
    /// Tapping mirrors the content horizontally.
    Flip,
}

impl HandleKind {
    /// All handle kinds, in back-to-front paint order.
    pub const ALL: [Self; 3] = [Self::Close, Self::Rotate, Self::Flip];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Close => 0,
            Self::Rotate => 1,
            Self::Flip => 2,
        }
    }

    /// Anchor used when the handle has not been positioned explicitly.
    #[must_use]
    pub const fn default_anchor(self) -> Anchor {
        match self {
            Self::Close => Anchor::TopLeft,
            Self::Rotate => Anchor::BottomRight,
            Self::Flip => Anchor::BottomLeft,
        }
    }
}

/// Corner of the content frame a handle is centered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Minimum x, minimum y.
    TopLeft,
    /// Maximum x, minimum y.
    TopRight,
    /// Minimum x, maximum y.
    BottomLeft,
    /// Maximum x, maximum y.
    BottomRight,
}

impl Anchor {
    /// Flexible margins on the two edges away from this corner.
    #[must_use]
    pub const fn resizing_mask(self) -> AutoresizingMask {
        match self {
            Self::TopLeft => AutoresizingMask::FLEXIBLE_RIGHT_MARGIN
                .union(AutoresizingMask::FLEXIBLE_BOTTOM_MARGIN),
            Self::TopRight => AutoresizingMask::FLEXIBLE_LEFT_MARGIN
                .union(AutoresizingMask::FLEXIBLE_BOTTOM_MARGIN),
            Self::BottomLeft => AutoresizingMask::FLEXIBLE_RIGHT_MARGIN
                .union(AutoresizingMask::FLEXIBLE_TOP_MARGIN),
            Self::BottomRight => AutoresizingMask::FLEXIBLE_LEFT_MARGIN
                .union(AutoresizingMask::FLEXIBLE_TOP_MARGIN),
        }
    }
}

bitflags::bitflags! {
    /// Which parts of a child frame absorb a change in its container's size.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AutoresizingMask: u8 {
        /// Space before the child on the x axis may change.
        const FLEXIBLE_LEFT_MARGIN   = 0b0000_0001;
        /// The child's width may change.
        const FLEXIBLE_WIDTH         = 0b0000_0010;
        /// Space after the child on the x axis may change.
        const FLEXIBLE_RIGHT_MARGIN  = 0b0000_0100;
        /// Space before the child on the y axis may change.
        const FLEXIBLE_TOP_MARGIN    = 0b0000_1000;
        /// The child's height may change.
        const FLEXIBLE_HEIGHT        = 0b0001_0000;
        /// Space after the child on the y axis may change.
        const FLEXIBLE_BOTTOM_MARGIN = 0b0010_0000;
    }
}

/// Returns the point of `content_frame` that a handle at `anchor` is centered on.
#[must_use]
pub fn anchor_point(content_frame: Rect, anchor: Anchor) -> Point {
    let o = content_frame.origin();
    let s = content_frame.size();
    match anchor {
        Anchor::TopLeft => o,
        Anchor::TopRight => Point::new(o.x + s.width, o.y),
        Anchor::BottomLeft => Point::new(o.x, o.y + s.height),
        Anchor::BottomRight => Point::new(o.x + s.width, o.y + s.height),
    }
}

/// Re-lays `frame` after its container changed from `old` to `new` size.
///
/// On each axis the size delta is shared between the flexible parts of the
/// mask in proportion to their current extents. If every flexible part is
/// empty the delta is split evenly. Without flexible parts the frame stays put.
#[must_use]
pub fn autoresize(frame: Rect, mask: AutoresizingMask, old: Size, new: Size) -> Rect {
    let (x0, width) = resize_axis(
        frame.x0,
        frame.width(),
        old.width - frame.x1,
        new.width - old.width,
        [
            mask.contains(AutoresizingMask::FLEXIBLE_LEFT_MARGIN),
            mask.contains(AutoresizingMask::FLEXIBLE_WIDTH),
            mask.contains(AutoresizingMask::FLEXIBLE_RIGHT_MARGIN),
        ],
    );
    let (y0, height) = resize_axis(
        frame.y0,
        frame.height(),
        old.height - frame.y1,
        new.height - old.height,
        [
            mask.contains(AutoresizingMask::FLEXIBLE_TOP_MARGIN),
            mask.contains(AutoresizingMask::FLEXIBLE_HEIGHT),
            mask.contains(AutoresizingMask::FLEXIBLE_BOTTOM_MARGIN),
        ],
    );
    Rect::from_origin_size((x0, y0), Size::new(width, height))
}

fn resize_axis(lead: f64, extent: f64, trail: f64, delta: f64, flexible: [bool; 3]) -> (f64, f64) {
    let parts = [lead.max(0.0), extent.max(0.0), trail.max(0.0)];
    let mut count = 0_u8;
    let mut total = 0.0;
    for (part, flex) in parts.iter().zip(flexible) {
        if flex {
            count += 1;
            total += part;
        }
    }
    if count == 0 || delta == 0.0 {
        return (lead, extent);
    }
    let share = |i: usize| -> f64 {
        if !flexible[i] {
            0.0
        } else if total > 0.0 {
            delta * parts[i] / total
        } else {
            delta / f64::from(count)
        }
    };
    (lead + share(0), (extent + share(1)).max(0.0))
}

/// An editing handle: its anchor, local frame, and effective visibility.
#[derive(Clone, Debug)]
pub struct Handle<I> {
    kind: HandleKind,
    anchor: Anchor,
    frame: Rect,
    mask: AutoresizingMask,
    enabled: bool,
    visible: bool,
    interactive: bool,
    image: Option<I>,
}

impl<I> Handle<I> {
    fn new(kind: HandleKind, anchor: Anchor, inset: f64, content_frame: Rect) -> Self {
        let mut handle = Self {
            kind,
            anchor,
            frame: Rect::ZERO,
            mask: anchor.resizing_mask(),
            enabled: true,
            visible: true,
            interactive: true,
            image: None,
        };
        handle.resize(inset);
        handle.place(anchor, content_frame);
        handle
    }

    /// Which handle this is.
    #[must_use]
    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    /// Corner this handle is pinned to.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Frame in the sticker's local coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Center of [`frame`](Self::frame).
    #[must_use]
    pub fn center(&self) -> Point {
        self.frame.center()
    }

    /// Autoresizing policy derived from the anchor.
    #[must_use]
    pub fn mask(&self) -> AutoresizingMask {
        self.mask
    }

    /// The handle's own enable flag, independent of the global gate.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the handle is currently drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the handle currently receives input.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Host-provided icon, if any.
    #[must_use]
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    fn place(&mut self, anchor: Anchor, content_frame: Rect) {
        self.anchor = anchor;
        self.mask = anchor.resizing_mask();
        self.frame = Rect::from_center_size(anchor_point(content_frame, anchor), self.frame.size());
    }

    fn resize(&mut self, inset: f64) {
        let side = inset * 2.0;
        self.frame = Rect::from_origin_size(self.frame.origin(), Size::new(side, side));
    }
}

/// The close, rotate, and flip handles of one sticker.
#[derive(Clone, Debug)]
pub struct Handles<I> {
    handles: [Handle<I>; 3],
}

impl<I> Handles<I> {
    /// Creates three `2 * inset` square handles centered on their anchors.
    #[must_use]
    pub fn new(inset: f64, content_frame: Rect, anchors: [Anchor; 3]) -> Self {
        let [close, rotate, flip] = anchors;
        Self {
            handles: [
                Handle::new(HandleKind::Close, close, inset, content_frame),
                Handle::new(HandleKind::Rotate, rotate, inset, content_frame),
                Handle::new(HandleKind::Flip, flip, inset, content_frame),
            ],
        }
    }

    /// Returns the handle of the given kind.
    #[must_use]
    pub fn get(&self, kind: HandleKind) -> &Handle<I> {
        &self.handles[kind.index()]
    }

    fn get_mut(&mut self, kind: HandleKind) -> &mut Handle<I> {
        &mut self.handles[kind.index()]
    }

    /// Iterates the handles in back-to-front paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Handle<I>> {
        self.handles.iter()
    }

    /// Pins `kind` to `anchor` on `content_frame`.
    pub fn place(&mut self, kind: HandleKind, anchor: Anchor, content_frame: Rect) {
        self.get_mut(kind).place(anchor, content_frame);
    }

    /// Resizes every handle to `2 * inset` and re-applies its recorded anchor.
    pub fn resize_all(&mut self, inset: f64, content_frame: Rect) {
        for handle in &mut self.handles {
            handle.resize(inset);
            handle.place(handle.anchor, content_frame);
        }
    }

    /// Follows a change of the sticker's bounds size using each handle's mask.
    pub fn autoresize_all(&mut self, old: Size, new: Size) {
        for handle in &mut self.handles {
            handle.frame = autoresize(handle.frame, handle.mask, old, new);
        }
    }

    /// Records the individual enable flag of `kind`.
    pub fn set_enabled(&mut self, kind: HandleKind, enabled: bool) {
        self.get_mut(kind).enabled = enabled;
    }

    /// Recomputes visibility and interactivity under the global `show` gate.
    pub fn apply_gate(&mut self, show: bool) {
        for handle in &mut self.handles {
            let on = show && handle.enabled;
            handle.visible = on;
            handle.interactive = on;
        }
    }

    /// Stores the icon drawn for `kind`.
    pub fn set_image(&mut self, kind: HandleKind, image: I) {
        self.get_mut(kind).image = Some(image);
    }

    /// Topmost interactive handle whose frame contains `local`.
    #[must_use]
    pub fn hit_test(&self, local: Point) -> Option<HandleKind> {
        self.handles
            .iter()
            .rev()
            .find(|h| h.interactive && h.frame.contains(local))
            .map(|h| h.kind)
    }
}
