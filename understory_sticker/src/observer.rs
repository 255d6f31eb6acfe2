// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer interface for sticker notifications.
//!
//! Notifications are delivered synchronously from inside the gesture entry
//! point that caused them. Nothing is returned to the sticker; a sticker with
//! no observer simply drops them.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::StickerWidget;

/// The eight notifications a sticker emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StickerEvent {
    /// A move gesture started.
    BeginMoving,
    /// A move gesture moved the sticker.
    ChangeMoving,
    /// A move gesture finished.
    EndMoving,
    /// A rotate/resize gesture started.
    BeginRotating,
    /// A rotate/resize gesture changed rotation or size.
    ChangeRotating,
    /// A rotate/resize gesture finished.
    EndRotating,
    /// The close handle was tapped; the sticker detaches right after this.
    DidClose,
    /// The sticker was tapped outside its handles.
    DidTap,
}

/// Receives notifications from a [`StickerWidget`].
///
/// Every method has an empty default, so implementors only override what they
/// care about. [`on_event`](Self::on_event) is the single entry point the
/// sticker calls; by default it forwards to the named methods.
pub trait StickerObserver<C, I> {
    /// Called for every notification.
    fn on_event(&mut self, sticker: &StickerWidget<C, I>, event: StickerEvent) {
        match event {
            StickerEvent::BeginMoving => self.begin_moving(sticker),
            StickerEvent::ChangeMoving => self.change_moving(sticker),
            StickerEvent::EndMoving => self.end_moving(sticker),
            StickerEvent::BeginRotating => self.begin_rotating(sticker),
            StickerEvent::ChangeRotating => self.change_rotating(sticker),
            StickerEvent::EndRotating => self.end_rotating(sticker),
            StickerEvent::DidClose => self.did_close(sticker),
            StickerEvent::DidTap => self.did_tap(sticker),
        }
    }

    /// See [`StickerEvent::BeginMoving`].
    fn begin_moving(&mut self, _sticker: &StickerWidget<C, I>) {}
    /// See [`StickerEvent::ChangeMoving`].
    fn change_moving(&mut self, _sticker: &StickerWidget<C, I>) {}
    /// See [`StickerEvent::EndMoving`].
    fn end_moving(&mut self, _sticker: &StickerWidget<C, I>) {}
    /// See [`StickerEvent::BeginRotating`].
    fn begin_rotating(&mut self, _sticker: &StickerWidget<C, I>) {}
    /// See [`StickerEvent::ChangeRotating`].
    fn change_rotating(&mut self, _sticker: &StickerWidget<C, I>) {}
    /// See [`StickerEvent::EndRotating`].
    fn end_rotating(&mut self, _sticker: &StickerWidget<C, I>) {}
    /// See [`StickerEvent::DidClose`].
    fn did_close(&mut self, _sticker: &StickerWidget<C, I>) {}
    /// See [`StickerEvent::DidTap`].
    fn did_tap(&mut self, _sticker: &StickerWidget<C, I>) {}
}

/// Shared, cloneable record of every notification received.
///
/// Clones share one buffer, so a host can keep a clone while the sticker owns
/// another as its observer. Single-threaded by construction.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<StickerEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<StickerEvent> {
        self.events.borrow().clone()
    }

    /// Removes and returns all recorded events.
    pub fn take(&self) -> Vec<StickerEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl<C, I> StickerObserver<C, I> for EventLog {
    fn on_event(&mut self, _sticker: &StickerWidget<C, I>, event: StickerEvent) {
        self.events.borrow_mut().push(event);
    }
}
