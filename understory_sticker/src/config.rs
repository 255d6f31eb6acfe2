// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::layout::{Anchor, HandleKind};

/// Inset used when none is configured: half of a 22-unit handle.
pub const DEFAULT_INSET: u32 = 11;

/// Outline color used when none is configured.
pub const DEFAULT_OUTLINE_COLOR: Color = Color::new([0.6, 0.4, 0.2, 1.0]);

/// Construction-time configuration for a [`StickerWidget`](crate::StickerWidget).
///
/// Every value can still be changed on the sticker afterwards; this only saves
/// a series of setter calls right after construction.
#[derive(Clone, Copy, Debug)]
pub struct StickerConfig {
    /// Half the handle edge length, and the padding around the content.
    pub inset: u32,
    /// Anchors for the close, rotate, and flip handles, in that order.
    pub anchors: [Anchor; 3],
    /// Individual enable flags for the close, rotate, and flip handles.
    pub enabled: [bool; 3],
    /// Global gate for handle visibility and interactivity.
    pub show_editing_handlers: bool,
    /// Requested minimum for the shorter side while resizing.
    ///
    /// Raised to `4 * inset` if smaller.
    pub minimum_size: u32,
    /// Color of the outline drawn around the content while editing.
    pub outline_border_color: Color,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            inset: DEFAULT_INSET,
            anchors: HandleKind::ALL.map(HandleKind::default_anchor),
            enabled: [true; 3],
            show_editing_handlers: true,
            minimum_size: 0,
            outline_border_color: DEFAULT_OUTLINE_COLOR,
        }
    }
}

impl StickerConfig {
    /// Sets the inset from a full handle edge length; `0` leaves it unchanged.
    #[must_use]
    pub fn with_handle_size(mut self, size: u32) -> Self {
        if size > 0 {
            self.inset = size.div_ceil(2);
        }
        self
    }

    /// Pins `kind` to `anchor`.
    #[must_use]
    pub fn with_anchor(mut self, kind: HandleKind, anchor: Anchor) -> Self {
        self.anchors[kind.index()] = anchor;
        self
    }

    /// Sets the individual enable flag of `kind`.
    #[must_use]
    pub fn with_enabled(mut self, kind: HandleKind, enabled: bool) -> Self {
        self.enabled[kind.index()] = enabled;
        self
    }

    /// Sets the global handle gate.
    #[must_use]
    pub fn with_show_editing_handlers(mut self, show: bool) -> Self {
        self.show_editing_handlers = show;
        self
    }

    /// Requests a minimum size for the shorter side while resizing.
    #[must_use]
    pub fn with_minimum_size(mut self, minimum_size: u32) -> Self {
        self.minimum_size = minimum_size;
        self
    }

    /// Sets the outline color.
    #[must_use]
    pub fn with_outline_border_color(mut self, color: Color) -> Self {
        self.outline_border_color = color;
        self
    }

    pub(crate) fn anchor(&self, kind: HandleKind) -> Anchor {
        self.anchors[kind.index()]
    }

    pub(crate) fn is_enabled(&self, kind: HandleKind) -> bool {
        self.enabled[kind.index()]
    }
}
