// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario tests for `understory_sticker`.
//!
//! These drive whole gestures through the public API and check the resulting
//! geometry, handle layout, and notifications.

use std::cell::RefCell;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::rc::Rc;

use kurbo::{Affine, Point, Rect, Size};
use understory_sticker::geometry::affine_angle;
use understory_sticker::gesture::{GesturePhase, PointerSample};
use understory_sticker::{
    Anchor, EventLog, HandleKind, StickerConfig, StickerEvent, StickerObserver, StickerWidget,
};

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn approx_pt(a: Point, b: Point) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y)
}

fn at(phase: GesturePhase, x: f64, y: f64) -> PointerSample {
    PointerSample::parent(phase, Point::new(x, y))
}

fn content_100x60() -> StickerWidget<Size> {
    StickerWidget::new(Size::new(100.0, 60.0))
}

#[test]
fn move_lands_on_start_center_plus_total_offset() {
    let starts = [(0.0, 0.0), (-40.0, 12.5), (300.0, -7.0)];
    let ends = [(0.0, 0.0), (10.0, 10.0), (-55.5, 80.25)];
    for (sx, sy) in starts {
        for (ex, ey) in ends {
            let mut s = content_100x60();
            s.set_center(Point::new(150.0, 90.0));
            s.handle_move(at(GesturePhase::Began, sx, sy));
            // Intermediate samples do not influence the final center.
            s.handle_move(at(GesturePhase::Changed, sx + 999.0, sy - 999.0));
            s.handle_move(at(GesturePhase::Changed, -3.0, 4.0));
            s.handle_move(at(GesturePhase::Ended, ex, ey));
            let expected = Point::new(150.0 + (ex - sx), 90.0 + (ey - sy));
            assert!(
                approx_pt(s.center(), expected),
                "center {:?} != {expected:?}",
                s.center()
            );
        }
    }
}

#[test]
fn rotation_unchanged_when_pointer_does_not_move() {
    for initial in [0.0, 0.5, -1.2, PI - 0.01] {
        let mut s = content_100x60();
        s.set_center(Point::new(50.0, 50.0));
        s.set_transform(Affine::rotate(initial));
        s.handle_rotate(at(GesturePhase::Began, 130.0, 77.0));
        s.handle_rotate(at(GesturePhase::Changed, 130.0, 77.0));
        s.handle_rotate(at(GesturePhase::Ended, 130.0, 77.0));
        assert!(
            approx(s.rotation(), initial),
            "rotation {} drifted from {initial}",
            s.rotation()
        );
        assert!(approx(s.bounds().width(), 122.0));
    }
}

#[test]
fn rotation_is_absolute_not_accumulated() {
    let mut s = content_100x60();
    s.set_center(Point::ORIGIN);
    s.handle_rotate(at(GesturePhase::Began, 100.0, 0.0));
    // Wander around, then come back to 45 degrees.
    for step in 0..50_u32 {
        let t = f64::from(step) * 0.13;
        s.handle_rotate(at(GesturePhase::Changed, 100.0 * t.cos(), 100.0 * t.sin()));
    }
    s.handle_rotate(at(GesturePhase::Changed, 100.0, 100.0));
    s.handle_rotate(at(GesturePhase::Ended, 100.0, 100.0));
    assert!(approx(s.rotation(), FRAC_PI_4));
}

#[test]
fn shorter_side_never_drops_below_minimum() {
    for minimum in [44_u32, 60, 81] {
        let mut s = content_100x60();
        s.set_minimum_size(minimum);
        s.set_center(Point::ORIGIN);
        s.handle_rotate(at(GesturePhase::Began, 200.0, 0.0));
        for x in [150.0, 100.0, 40.0, 5.0, 0.5, 0.0] {
            s.handle_rotate(at(GesturePhase::Changed, x, 0.0));
            let b = s.bounds();
            let shorter = b.width().min(b.height());
            assert!(
                shorter >= f64::from(minimum) - EPS,
                "shorter side {shorter} below minimum {minimum}"
            );
        }
        s.handle_rotate(at(GesturePhase::Ended, 0.0, 0.0));
    }
}

#[test]
fn angle_extraction_round_trips() {
    let mut theta = -PI + 1e-3;
    while theta <= PI {
        assert!(approx(affine_angle(Affine::rotate(theta)), theta));
        theta += 0.05;
    }
    assert!(approx(affine_angle(Affine::rotate(PI)), PI));
}

#[test]
fn handle_resize_reanchors_and_preserves_placement() {
    for size in [1_u32, 7, 22, 40, 41, 100] {
        let mut s = content_100x60();
        s.set_center(Point::new(300.0, 220.0));
        s.set_transform(Affine::rotate(0.6));
        s.set_position(Anchor::BottomRight, HandleKind::Close);
        let center_before = s.center();
        let rotation_before = s.rotation();

        s.set_handle_size(size);

        let content = s.content_frame();
        let corner = Point::new(content.x1, content.y1);
        assert!(approx_pt(s.handle(HandleKind::Close).center(), corner));
        assert_eq!(s.handle(HandleKind::Close).anchor(), Anchor::BottomRight);
        let inset = f64::from(s.inset());
        assert!(approx_pt(content.origin(), Point::new(inset, inset)));
        assert_eq!(
            s.handle(HandleKind::Close).frame().size(),
            Size::new(inset * 2.0, inset * 2.0)
        );
        assert_eq!(s.center(), center_before);
        assert!(approx(s.rotation(), rotation_before));
    }
}

#[test]
fn handle_resize_after_rotate_resize_keeps_scaled_content() {
    let mut s = content_100x60();
    s.set_center(Point::ORIGIN);
    s.handle_rotate(at(GesturePhase::Began, 50.0, 0.0));
    s.handle_rotate(at(GesturePhase::Changed, 100.0, 0.0));
    s.handle_rotate(at(GesturePhase::Ended, 100.0, 0.0));
    // Scale 2 grew the content to 222x142 with 11-unit margins.
    assert_eq!(s.content_frame().size(), Size::new(222.0, 142.0));

    s.set_handle_size(40);
    assert_eq!(s.bounds(), Rect::new(0.0, 0.0, 262.0, 182.0));
    assert_eq!(s.content_frame(), Rect::new(20.0, 20.0, 242.0, 162.0));
}

#[test]
fn editing_gate_restores_individual_flags() {
    let mut s = content_100x60();
    s.set_enable_flip(false);
    s.set_show_editing_handlers(false);
    for kind in HandleKind::ALL {
        assert!(!s.handle(kind).is_visible(), "{kind:?} visible while gated");
        assert!(!s.handle(kind).is_interactive(), "{kind:?} interactive while gated");
    }
    assert_eq!(s.outline_border_width(), 0.0);

    s.set_show_editing_handlers(true);
    assert!(s.handle(HandleKind::Close).is_visible());
    assert!(s.handle(HandleKind::Rotate).is_visible());
    assert!(!s.handle(HandleKind::Flip).is_visible());
    assert!(!s.handle(HandleKind::Flip).is_interactive());
    assert!(!s.enable_flip());
    assert_eq!(s.outline_border_width(), 1.0);
}

#[test]
fn disabling_a_handle_while_gated_stays_hidden_after_reveal() {
    let mut s = content_100x60();
    s.set_show_editing_handlers(false);
    s.set_enable_close(false);
    assert!(!s.handle(HandleKind::Close).is_visible());
    s.set_show_editing_handlers(true);
    assert!(!s.handle(HandleKind::Close).is_visible());
    s.set_enable_close(true);
    assert!(s.handle(HandleKind::Close).is_visible());
}

#[test]
fn end_to_end_handle_size_scenario() {
    let mut s = content_100x60();
    assert_eq!(s.inset(), 11);
    assert_eq!(s.bounds().size(), Size::new(122.0, 82.0));

    s.set_handle_size(40);
    assert_eq!(s.inset(), 20);
    assert_eq!(s.bounds().size(), Size::new(140.0, 100.0));
    assert!(s.minimum_size() >= 80);
    assert_eq!(s.default_minimum_size(), 80);
}

#[test]
fn flip_leaves_bounding_geometry_alone() {
    let mut s = content_100x60();
    s.set_center(Point::new(40.0, 70.0));
    s.set_transform(Affine::rotate(0.3));
    let frame = s.frame();
    let bounds = s.bounds();
    let center = s.center();
    let handles: Vec<Point> = s.handles().iter().map(|h| h.center()).collect();

    s.handle_flip_tap();

    assert_eq!(s.frame(), frame);
    assert_eq!(s.bounds(), bounds);
    assert_eq!(s.center(), center);
    let after: Vec<Point> = s.handles().iter().map(|h| h.center()).collect();
    assert_eq!(after, handles);
    assert_eq!(
        s.content_transform(),
        Affine::scale_non_uniform(-1.0, 1.0)
    );
}

#[test]
fn flip_is_ignored_when_handle_disabled() {
    let mut s = content_100x60();
    s.set_enable_flip(false);
    s.handle_flip_tap();
    assert!(!s.is_flipped());
}

#[test]
fn full_gesture_notification_sequence() {
    let mut s = content_100x60();
    let log = EventLog::new();
    s.set_observer(log.clone());
    s.set_center(Point::new(100.0, 100.0));

    s.handle_tap();
    s.handle_move(at(GesturePhase::Began, 100.0, 100.0));
    s.handle_move(at(GesturePhase::Changed, 110.0, 100.0));
    s.handle_move(at(GesturePhase::Changed, 120.0, 100.0));
    s.handle_move(at(GesturePhase::Ended, 120.0, 100.0));
    s.handle_rotate(at(GesturePhase::Began, 180.0, 100.0));
    s.handle_rotate(at(GesturePhase::Changed, 120.0, 160.0));
    s.handle_rotate(at(GesturePhase::Cancelled, 120.0, 160.0));
    s.handle_close_tap();

    assert_eq!(
        log.events(),
        [
            StickerEvent::DidTap,
            StickerEvent::BeginMoving,
            StickerEvent::ChangeMoving,
            StickerEvent::ChangeMoving,
            StickerEvent::EndMoving,
            StickerEvent::BeginRotating,
            StickerEvent::ChangeRotating,
            StickerEvent::EndRotating,
            StickerEvent::DidClose,
        ]
    );
    assert!(approx(s.rotation(), FRAC_PI_2));
    assert!(!s.is_attached());
}

#[test]
fn no_observer_is_fine() {
    let mut s = content_100x60();
    s.handle_tap();
    s.handle_move(at(GesturePhase::Began, 0.0, 0.0));
    s.handle_move(at(GesturePhase::Ended, 1.0, 1.0));
    s.handle_close_tap();
    assert!(!s.is_attached());
}

#[test]
fn config_applies_at_construction() {
    let config = StickerConfig::default()
        .with_handle_size(30)
        .with_anchor(HandleKind::Flip, Anchor::TopRight)
        .with_enabled(HandleKind::Close, false)
        .with_minimum_size(100);
    let s = StickerWidget::<Size>::with_config(Size::new(50.0, 50.0), config);
    assert_eq!(s.inset(), 15);
    assert_eq!(s.bounds().size(), Size::new(80.0, 80.0));
    assert_eq!(s.minimum_size(), 100);
    assert_eq!(s.handle(HandleKind::Flip).center(), Point::new(65.0, 15.0));
    assert!(!s.handle(HandleKind::Close).is_visible());
    assert!(s.handle(HandleKind::Rotate).is_visible());
}

#[test]
fn images_are_stored_per_handle() {
    let mut s = StickerWidget::<Size, &'static str>::new(Size::new(10.0, 10.0));
    s.set_image("close.png", HandleKind::Close);
    s.set_image("rotate.png", HandleKind::Rotate);
    assert_eq!(s.handle(HandleKind::Close).image(), Some(&"close.png"));
    assert_eq!(s.handle(HandleKind::Rotate).image(), Some(&"rotate.png"));
    assert_eq!(s.handle(HandleKind::Flip).image(), None);
}

#[test]
fn rotated_sticker_routes_taps_through_its_transform() {
    let mut s = content_100x60();
    s.set_center(Point::new(200.0, 200.0));
    s.set_transform(Affine::rotate(PI));
    // Upside down: the close handle (local top-left) now sits bottom-right of center.
    let close_local = s.handle(HandleKind::Close).center();
    let close_parent = s.geometry().local_to_parent(close_local);
    assert!(approx_pt(close_parent, Point::new(250.0, 230.0)));
    let log = EventLog::new();
    s.set_observer(log.clone());
    s.route_tap(close_parent);
    assert_eq!(log.events(), [StickerEvent::DidClose]);
}

/// A minimal host that owns several stickers and tracks the selected one.
#[derive(Default)]
struct Host {
    selected: Option<usize>,
    closed: Vec<usize>,
}

struct HostLink {
    id: usize,
    host: Rc<RefCell<Host>>,
}

impl StickerObserver<Size, ()> for HostLink {
    fn begin_moving(&mut self, _sticker: &StickerWidget<Size, ()>) {
        self.host.borrow_mut().selected = Some(self.id);
    }

    fn did_tap(&mut self, _sticker: &StickerWidget<Size, ()>) {
        self.host.borrow_mut().selected = Some(self.id);
    }

    fn did_close(&mut self, _sticker: &StickerWidget<Size, ()>) {
        let mut host = self.host.borrow_mut();
        host.closed.push(self.id);
        if host.selected == Some(self.id) {
            host.selected = None;
        }
    }
}

#[test]
fn host_tracks_selection_from_notifications() {
    let host = Rc::new(RefCell::new(Host::default()));
    let mut stickers: Vec<StickerWidget<Size>> = [100.0, 300.0, 500.0]
        .into_iter()
        .enumerate()
        .map(|(id, x)| {
            let mut s = StickerWidget::new(Size::new(100.0, 50.0));
            s.set_center(Point::new(x, 100.0));
            s.set_observer(HostLink {
                id,
                host: host.clone(),
            });
            s
        })
        .collect();

    stickers[1].route_tap(Point::new(300.0, 100.0));
    assert_eq!(host.borrow().selected, Some(1));

    stickers[2].route_pan(at(GesturePhase::Began, 500.0, 100.0));
    assert_eq!(host.borrow().selected, Some(2));
    stickers[2].route_pan(at(GesturePhase::Ended, 520.0, 110.0));
    assert_eq!(stickers[2].center(), Point::new(520.0, 110.0));

    // Close handle of sticker 2 sits on its content's top-left corner.
    let close = stickers[2]
        .geometry()
        .local_to_parent(stickers[2].handle(HandleKind::Close).center());
    stickers[2].route_tap(close);
    stickers.retain(StickerWidget::is_attached);

    assert_eq!(stickers.len(), 2);
    assert_eq!(host.borrow().closed, [2]);
    assert_eq!(host.borrow().selected, None);
}

#[test]
fn host_finds_the_tapped_sticker_by_routing() {
    let mut stickers: Vec<StickerWidget<Size>> = [100.0, 300.0]
        .into_iter()
        .map(|x| {
            let mut s = StickerWidget::new(Size::new(100.0, 50.0));
            s.set_center(Point::new(x, 100.0));
            s
        })
        .collect();

    let hit: Vec<bool> = stickers
        .iter_mut()
        .map(|s| s.route_tap(Point::new(310.0, 90.0)).is_some())
        .collect();
    assert_eq!(hit, [false, true]);

    // Between the two stickers nothing is hit.
    assert!(stickers.iter().all(|s| !s.contains(Point::new(200.0, 100.0))));
    assert_eq!(stickers[0].route_pan(at(GesturePhase::Began, 200.0, 100.0)), None);
    assert_eq!(stickers[0].center(), Point::new(100.0, 100.0));
}
