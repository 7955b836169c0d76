use super::*;
use crate::environment::DeviceIdentifier;
use crate::geometry::Rect;
use crate::spin::normalize_degrees;
use crate::tree::ElementTree;
use crate::tree::stub::StubTree;
use crate::tween::Lerp;
use proptest::prelude::*;

const MS: Duration = Duration::from_millis(1);
const FRAME: Duration = Duration::from_millis(16);

fn desktop() -> DeviceProfile {
    DeviceProfile {
        has_touch: false,
        viewport_width: 1920.0,
        identifier: DeviceIdentifier::new("GNOME"),
    }
}

fn started(now: Instant) -> CursorEngine<usize> {
    let mut engine = CursorEngine::new(CursorOptions::default(), now).unwrap();
    assert!(engine.start(&desktop(), Point::new(400.0, 300.0), now));
    engine
}

/// page with two side-by-side targets
fn page() -> (StubTree, usize, usize, usize) {
    let mut tree = StubTree::new();
    let page = tree.add(None, Rect::new(0.0, 0.0, 1000.0, 1000.0), &["page"]);
    let a = tree.add_target(Some(page), Rect::new(10.0, 10.0, 50.0, 50.0));
    let b = tree.add_target(Some(page), Rect::new(100.0, 20.0, 60.0, 40.0));
    (tree, page, a, b)
}

fn expected_offsets(tree: &StubTree, target: usize, cursor: Point) -> Corners {
    BracketMetrics::default()
        .resolve(tree.bounds(&target))
        .map(|c| c - cursor)
}

fn assert_corners_near(actual: Corners, expected: Corners) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.distance(e) < 1e-6, "{a:?} != {e:?}");
    }
}

fn run_frames(engine: &mut CursorEngine<usize>, tree: &StubTree, from: Instant, until: Instant) {
    let mut t = from;
    while t <= until {
        engine.tick(tree, t);
        t += FRAME;
    }
}

fn angular_gap(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

#[test]
fn test_hover_locks_after_hover_duration() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = started(t0);

    engine.pointer_move(Point::new(30.0, 30.0), t0);
    engine.pointer_over(&a, &tree, t0);

    assert_eq!(engine.phase(t0), Phase::Engaging);
    assert!(engine.tracking_attached());
    assert!(!engine.is_spinning());
    assert_eq!(engine.session().map(|s| s.mode()), Some(EngageMode::Smooth));

    let done = t0 + 208 * MS;
    run_frames(&mut engine, &tree, t0, done);

    assert_eq!(engine.phase(done), Phase::Locked);
    assert_eq!(engine.session().map(|s| s.strength(done)), Some(1.0));

    let frame = engine.frame(done).unwrap();
    assert_eq!(frame.position, Point::new(30.0, 30.0));
    assert_corners_near(frame.corners, expected_offsets(&tree, a, frame.position));
    assert_eq!(frame.corners[0], Point::new(-23.0, -23.0));
    assert_eq!(frame.corners[2], Point::new(21.0, 21.0));
}

#[test]
fn test_press_snaps_in_same_turn() {
    let t0 = Instant::now();
    let (tree, _, _, b) = page();
    let mut engine = started(t0);

    engine.pointer_move(Point::new(130.0, 40.0), t0);
    engine.pointer_down(Some(&b), &tree, t0);

    // no tick in between
    let frame = engine.frame(t0).unwrap();
    assert_eq!(frame.phase, Phase::Locked);
    assert_eq!(engine.session().map(|s| s.mode()), Some(EngageMode::Immediate));
    assert_corners_near(frame.corners, expected_offsets(&tree, b, frame.position));
    assert_eq!(frame.rotation, 0.0);
}

#[test]
fn test_press_on_descendant_locks_enclosing_target() {
    let t0 = Instant::now();
    let (mut tree, _, a, _) = page();
    let label = tree.add(Some(a), Rect::new(15.0, 15.0, 20.0, 10.0), &["label"]);
    let mut engine = started(t0);

    engine.pointer_down(Some(&label), &tree, t0);

    assert_eq!(engine.active_target(), Some(&a));
}

#[test]
fn test_press_feedback_scales_and_reverts() {
    let t0 = Instant::now();
    let (tree, page, _, _) = page();
    let mut engine = started(t0);

    engine.pointer_down(Some(&page), &tree, t0);
    let pressed = engine.frame(t0 + 300 * MS).unwrap();
    assert_eq!(pressed.dot_scale, DOT_PRESS_SCALE);
    assert_eq!(pressed.scale, BODY_PRESS_SCALE);
    assert!(engine.session().is_none());

    let t1 = t0 + 300 * MS;
    engine.pointer_up(Some(&page), &tree, t1);
    let released = engine.frame(t1 + 300 * MS).unwrap();
    assert_eq!(released.dot_scale, 1.0);
    assert_eq!(released.scale, 1.0);
}

#[test]
fn test_release_over_empty_space_suppresses_hover() {
    let t0 = Instant::now();
    let (mut tree, page, _, _) = page();
    let c = tree.add_target(Some(page), Rect::new(200.0, 200.0, 40.0, 40.0));
    let mut engine = started(t0);

    engine.pointer_move(Point::new(190.0, 190.0), t0);
    engine.pointer_down(Some(&page), &tree, t0);
    engine.pointer_up(Some(&page), &tree, t0);

    engine.pointer_over(&c, &tree, t0 + 100 * MS);
    assert!(engine.session().is_none());
    assert_eq!(engine.phase(t0 + 100 * MS), Phase::Idle);

    engine.pointer_over(&c, &tree, t0 + 200 * MS);
    assert_eq!(engine.active_target(), Some(&c));
}

#[test]
fn test_press_on_target_overrides_suppression() {
    let t0 = Instant::now();
    let (tree, page, a, _) = page();
    let mut engine = started(t0);

    engine.pointer_up(Some(&page), &tree, t0);
    engine.pointer_down(Some(&a), &tree, t0 + 10 * MS);

    assert_eq!(engine.active_target(), Some(&a));
    assert!(!engine.is_suppressed(t0 + 10 * MS));
}

#[test]
fn test_release_on_target_does_not_suppress() {
    let t0 = Instant::now();
    let (tree, _, a, b) = page();
    let mut engine = started(t0);

    engine.pointer_down(Some(&a), &tree, t0);
    engine.pointer_up(Some(&a), &tree, t0 + 50 * MS);
    engine.pointer_leave(&a, t0 + 60 * MS);
    engine.pointer_over(&b, &tree, t0 + 70 * MS);

    assert_eq!(engine.active_target(), Some(&b));
}

#[test]
fn test_switching_targets_skips_release_animation() {
    let t0 = Instant::now();
    let (tree, _, a, b) = page();
    let mut engine = started(t0);

    engine.pointer_over(&a, &tree, t0);
    run_frames(&mut engine, &tree, t0, t0 + 250 * MS);

    let t1 = t0 + 260 * MS;
    engine.pointer_over(&b, &tree, t1);

    assert_eq!(engine.active_target(), Some(&b));
    assert_eq!(engine.phase(t1), Phase::Engaging);
    assert!(engine.release_until.is_none());
    assert!(!engine.is_spinning());
}

#[test]
fn test_hovering_active_target_again_is_ignored() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = started(t0);

    engine.pointer_down(Some(&a), &tree, t0);
    engine.pointer_over(&a, &tree, t0 + 10 * MS);

    let session = engine.session().unwrap();
    assert_eq!(session.mode(), EngageMode::Immediate);
    assert_eq!(session.strength(t0 + 10 * MS), 1.0);
}

#[test]
fn test_leave_releases_to_rest_and_resumes_spin() {
    let t0 = Instant::now();
    let (tree, _, a, b) = page();
    let mut engine = started(t0);

    engine.pointer_down(Some(&a), &tree, t0);
    engine.pointer_leave(&b, t0 + 10 * MS);
    assert_eq!(engine.active_target(), Some(&a));

    let t1 = t0 + 20 * MS;
    engine.pointer_leave(&a, t1);

    assert!(engine.session().is_none());
    assert!(!engine.tracking_attached());
    assert!(engine.is_spinning());
    assert_eq!(engine.phase(t1), Phase::Releasing);

    let t2 = t1 + RELEASE_DURATION;
    engine.tick(&tree, t2);
    assert_eq!(engine.phase(t2), Phase::Idle);
    assert_eq!(
        engine.frame(t2).unwrap().corners,
        BracketMetrics::default().rest_offsets()
    );
}

#[test]
fn test_two_layer_smoothing_mid_ramp() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = started(t0);
    engine.pointer_move(Point::new(30.0, 30.0), t0);
    engine.pointer_over(&a, &tree, t0);

    let t1 = t0 + 150 * MS;
    let strength = engine.session().unwrap().strength(t1);
    assert!(strength > 0.0 && strength < SNAP_STRENGTH);

    let before = engine.corners[0].get(t1);
    engine.tick(&tree, t1);

    let delta = expected_offsets(&tree, a, engine.cursor.position.get(t1))[0];
    let blended = before.lerp(delta, strength);
    assert!(engine.corners[0].get(t1).distance(before) < 1e-9);
    assert!(engine.corners[0].destination().distance(blended) < 1e-9);
    assert!(engine.corners[0].is_animating(t1 + 10 * MS));
    assert!(!engine.corners[0].is_animating(t1 + TRACKING_EASE));
}

#[test]
fn test_removed_target_releases_within_one_tick() {
    let t0 = Instant::now();
    let (mut tree, _, a, _) = page();
    let mut engine = started(t0);

    engine.pointer_down(Some(&a), &tree, t0);
    tree.detach(a);

    let t1 = t0 + FRAME;
    engine.tick(&tree, t1);

    assert!(engine.session().is_none());
    assert!(engine.is_spinning());
    assert_eq!(engine.phase(t1), Phase::Releasing);
}

#[test]
fn test_scroll_off_target_releases() {
    let t0 = Instant::now();
    let (mut tree, _, d, _) = page();
    let mut engine = started(t0);

    engine.pointer_move(Point::new(30.0, 30.0), t0);
    engine.pointer_down(Some(&d), &tree, t0);

    // small scroll, pointer still over d
    tree.move_to(d, Rect::new(10.0, 5.0, 50.0, 50.0));
    engine.scroll(&tree, t0 + 10 * MS);
    assert_eq!(engine.active_target(), Some(&d));

    tree.move_to(d, Rect::new(10.0, 200.0, 50.0, 50.0));
    let t1 = t0 + 20 * MS;
    engine.scroll(&tree, t1);

    assert!(engine.session().is_none());
    assert!(engine.is_spinning());
    assert_eq!(engine.phase(t1), Phase::Releasing);
}

#[test]
fn test_tracking_follows_moving_target() {
    let t0 = Instant::now();
    let (mut tree, _, a, _) = page();
    let mut engine = started(t0);
    engine.pointer_move(Point::new(30.0, 30.0), t0);
    engine.pointer_down(Some(&a), &tree, t0);

    tree.move_to(a, Rect::new(12.0, 14.0, 50.0, 50.0));
    let t1 = t0 + 200 * MS;
    engine.tick(&tree, t1);

    let frame = engine.frame(t1).unwrap();
    assert_corners_near(frame.corners, expected_offsets(&tree, a, frame.position));
}

#[test]
fn test_zero_size_target_collapses_frame() {
    let t0 = Instant::now();
    let (mut tree, page, _, _) = page();
    let dot = tree.add_target(Some(page), Rect::new(300.0, 300.0, 0.0, 0.0));
    let mut engine = started(t0);

    engine.pointer_down(Some(&dot), &tree, t0);

    let corners = engine.frame(t0).unwrap().corners;
    assert!(corners.iter().all(|c| *c == corners[0]));
}

#[test]
fn test_rotation_is_continuous_across_release() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = started(t0);
    let per_frame = 360.0 * FRAME.as_secs_f64() / engine.options().spin_duration;

    for round in 0..3u32 {
        let enter = t0 + (700 + round * 1500) * MS;
        let leave = enter + 400 * MS;

        let before_enter = engine.rotation(enter);
        engine.pointer_over(&a, &tree, enter);
        assert!(angular_gap(engine.rotation(enter), before_enter) < 1e-9);
        run_frames(&mut engine, &tree, enter, leave);
        assert!(angular_gap(engine.rotation(leave), 0.0) < 1e-9);

        let before_leave = engine.rotation(leave);
        engine.pointer_leave(&a, leave);
        let after_leave = engine.rotation(leave);
        assert!(angular_gap(before_leave, after_leave) < 1e-9);

        let next = engine.rotation(leave + FRAME);
        assert!(angular_gap(next, after_leave) <= per_frame + 1e-9);
    }
}

#[test]
fn test_quick_release_resumes_from_mid_turn() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = started(t0);

    let enter = t0 + 500 * MS;
    engine.pointer_over(&a, &tree, enter);
    let leave = enter + 50 * MS;
    let shown = engine.rotation(leave);
    assert!(shown > 0.0 && shown < 90.0);

    engine.pointer_leave(&a, leave);
    assert!(angular_gap(engine.rotation(leave), shown) < 1e-9);
}

#[test]
fn test_mobile_profile_keeps_engine_inert() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = CursorEngine::new(CursorOptions::default(), t0).unwrap();
    let phone = DeviceProfile {
        has_touch: true,
        viewport_width: 390.0,
        identifier: DeviceIdentifier::new("Mozilla/5.0 (iPhone)"),
    };

    assert!(!engine.start(&phone, Point::new(195.0, 400.0), t0));
    assert!(!engine.is_running());
    assert!(!engine.hides_platform_pointer());
    assert!(engine.frame(t0).is_none());

    engine.pointer_down(Some(&a), &tree, t0);
    engine.pointer_over(&a, &tree, t0);
    assert!(engine.session().is_none());
}

#[test]
fn test_start_centers_cursor_and_stop_tears_down() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = started(t0);

    let frame = engine.frame(t0).unwrap();
    assert_eq!(frame.position, Point::new(400.0, 300.0));
    assert_eq!(frame.phase, Phase::Idle);
    assert!(engine.hides_platform_pointer());

    engine.pointer_down(Some(&a), &tree, t0);
    engine.stop();

    assert!(engine.session().is_none());
    assert!(!engine.tracking_attached());
    assert!(engine.frame(t0).is_none());
    assert!(!engine.hides_platform_pointer());

    assert!(engine.start(&desktop(), Point::new(10.0, 10.0), t0 + FRAME));
    assert!(engine.is_spinning());
}

#[test]
fn test_spin_duration_change_keeps_angle() {
    let t0 = Instant::now();
    let mut engine = started(t0);
    let t1 = t0 + 700 * MS;
    let before = engine.rotation(t1);

    engine.set_spin_duration(0.5, t1).unwrap();

    assert!(angular_gap(engine.rotation(t1), before) < 1e-9);
    assert!((engine.rotation(t1 + 125 * MS) - engine.rotation(t1) - 90.0).abs() < 1e-9);
    assert!(engine.set_spin_duration(-1.0, t1).is_err());
    assert_eq!(engine.options().spin_duration, 0.5);
}

#[test]
fn test_selector_change_releases_lock() {
    let t0 = Instant::now();
    let (tree, _, a, _) = page();
    let mut engine = started(t0);
    engine.pointer_down(Some(&a), &tree, t0);

    let same = engine.options().clone();
    engine.reconfigure(same, t0).unwrap();
    assert_eq!(engine.active_target(), Some(&a));

    let options = CursorOptions {
        target_selector: ".other".parse().unwrap(),
        ..Default::default()
    };
    engine.reconfigure(options, t0 + FRAME).unwrap();
    assert!(engine.session().is_none());

    engine.pointer_over(&a, &tree, t0 + 2 * FRAME);
    assert!(engine.session().is_none());
}

/// page > card (target) > { label, dismiss (target) }
fn card_page() -> (StubTree, usize, usize, usize) {
    let mut tree = StubTree::new();
    let page = tree.add(None, Rect::new(0.0, 0.0, 1000.0, 1000.0), &["page"]);
    let card = tree.add_target(Some(page), Rect::new(10.0, 10.0, 200.0, 100.0));
    let label = tree.add(Some(card), Rect::new(20.0, 20.0, 50.0, 10.0), &["label"]);
    let dismiss = tree.add_target(Some(card), Rect::new(150.0, 70.0, 40.0, 20.0));
    (tree, card, label, dismiss)
}

#[test]
fn test_motion_within_one_target_keeps_lock() {
    let t0 = Instant::now();
    let (tree, card, _, _) = card_page();
    let mut engine = started(t0);

    engine.pointer_at(Point::new(25.0, 25.0), &tree, t0);
    assert_eq!(engine.active_target(), Some(&card));

    // label -> bare card area
    engine.pointer_at(Point::new(100.0, 50.0), &tree, t0 + FRAME);
    assert_eq!(engine.active_target(), Some(&card));
    assert_eq!(engine.release_until, None);
    assert_eq!(engine.last_pointer(), Point::new(100.0, 50.0));
}

#[test]
fn test_motion_into_nested_target_switches_lock() {
    let t0 = Instant::now();
    let (tree, card, _, dismiss) = card_page();
    let mut engine = started(t0);

    engine.pointer_at(Point::new(100.0, 50.0), &tree, t0);
    assert_eq!(engine.active_target(), Some(&card));

    engine.pointer_at(Point::new(160.0, 80.0), &tree, t0 + FRAME);
    assert_eq!(engine.active_target(), Some(&dismiss));
    // switched directly, no release in between
    assert_eq!(engine.release_until, None);
    assert!(!engine.is_spinning());
}

#[test]
fn test_motion_out_of_nested_target_relocks_outer() {
    let t0 = Instant::now();
    let (tree, card, _, dismiss) = card_page();
    let mut engine = started(t0);

    engine.pointer_at(Point::new(160.0, 80.0), &tree, t0);
    assert_eq!(engine.active_target(), Some(&dismiss));

    let t1 = t0 + FRAME;
    engine.pointer_at(Point::new(100.0, 50.0), &tree, t1);

    assert_eq!(engine.active_target(), Some(&card));
    assert_eq!(engine.session().map(|s| s.mode()), Some(EngageMode::Smooth));
    assert_eq!(engine.phase(t1), Phase::Engaging);
}

#[test]
fn test_motion_off_target_and_out_of_window_release() {
    let t0 = Instant::now();
    let (tree, card, _, _) = card_page();
    let mut engine = started(t0);

    engine.pointer_at(Point::new(100.0, 50.0), &tree, t0);
    engine.pointer_at(Point::new(500.0, 500.0), &tree, t0 + FRAME);
    assert!(engine.session().is_none());
    assert!(engine.is_spinning());

    engine.pointer_at(Point::new(100.0, 50.0), &tree, t0 + 2 * FRAME);
    assert_eq!(engine.active_target(), Some(&card));

    let t1 = t0 + 3 * FRAME;
    engine.pointer_exit(t1);
    assert!(engine.session().is_none());
    assert_eq!(engine.phase(t1), Phase::Releasing);

    // re-entering the same spot counts as a fresh hover
    engine.pointer_at(Point::new(100.0, 50.0), &tree, t1 + FRAME);
    assert_eq!(engine.active_target(), Some(&card));
}

#[test]
fn test_deferred_scroll_checks_layout_on_next_tick() {
    let t0 = Instant::now();
    let (mut tree, _, d, _) = page();
    let mut engine = started(t0);

    engine.pointer_move(Point::new(30.0, 30.0), t0);
    engine.pointer_down(Some(&d), &tree, t0);

    // layout unchanged: the lock survives and the request is consumed
    engine.scroll_later();
    engine.tick(&tree, t0 + FRAME);
    assert_eq!(engine.active_target(), Some(&d));
    assert!(!engine.scroll_pending);

    // the scroll is reported before layout moves the target
    engine.scroll_later();
    assert_eq!(engine.active_target(), Some(&d));
    tree.move_to(d, Rect::new(10.0, 200.0, 50.0, 50.0));

    let t1 = t0 + 2 * FRAME;
    engine.tick(&tree, t1);
    assert!(engine.session().is_none());
    assert!(engine.is_spinning());
    assert_eq!(engine.phase(t1), Phase::Releasing);
}

#[test]
fn test_oversized_durations_are_rejected() {
    let t0 = Instant::now();
    let options = CursorOptions {
        spin_duration: 1e20,
        ..Default::default()
    };
    assert!(CursorEngine::<usize>::new(options, t0).is_err());

    let mut engine = started(t0);
    assert!(engine.set_spin_duration(f64::MAX, t0).is_err());
    assert_eq!(engine.options().spin_duration, 2.0);
}

#[derive(Debug, Clone)]
enum Op {
    Move(f64, f64),
    MoveAt(f64, f64),
    Exit,
    Over(usize),
    Leave(usize),
    Down(Option<usize>),
    Up(Option<usize>),
    Scroll,
    ScrollLater,
    Tick,
    Detach(usize),
    Wait(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0..200.0f64, 0.0..200.0f64).prop_map(|(x, y)| Op::Move(x, y)),
        (0.0..200.0f64, 0.0..200.0f64).prop_map(|(x, y)| Op::MoveAt(x, y)),
        Just(Op::Exit),
        (0usize..4).prop_map(Op::Over),
        (0usize..4).prop_map(Op::Leave),
        proptest::option::of(0usize..4).prop_map(Op::Down),
        proptest::option::of(0usize..4).prop_map(Op::Up),
        Just(Op::Scroll),
        Just(Op::ScrollLater),
        Just(Op::Tick),
        (1usize..4).prop_map(Op::Detach),
        (1u64..400).prop_map(Op::Wait),
    ]
}

proptest! {
    #[test]
    fn single_session_and_exclusive_spin(ops in proptest::collection::vec(op(), 1..64)) {
        let mut now = Instant::now();
        let (mut tree, page, _, b) = page();
        let nested = tree.add_target(Some(b), Rect::new(110.0, 25.0, 10.0, 10.0));
        let targets = [page + 1, b, nested];
        let mut engine = started(now);

        for op in ops {
            match op {
                Op::Move(x, y) => engine.pointer_move(Point::new(x, y), now),
                Op::MoveAt(x, y) => engine.pointer_at(Point::new(x, y), &tree, now),
                Op::Exit => engine.pointer_exit(now),
                Op::Over(n) => engine.pointer_over(&n, &tree, now),
                Op::Leave(n) => engine.pointer_leave(&n, now),
                Op::Down(n) => engine.pointer_down(n.as_ref(), &tree, now),
                Op::Up(n) => engine.pointer_up(n.as_ref(), &tree, now),
                Op::Scroll => engine.scroll(&tree, now),
                Op::ScrollLater => engine.scroll_later(),
                Op::Tick => engine.tick(&tree, now),
                Op::Detach(n) => tree.detach(n),
                Op::Wait(ms) => now += Duration::from_millis(ms),
            }

            prop_assert_eq!(engine.session().is_some(), !engine.is_spinning());
            prop_assert_eq!(engine.tracking_attached(), engine.session().is_some());
            if let Some(target) = engine.active_target() {
                prop_assert!(targets.contains(target));
            }
            let phase = engine.phase(now);
            prop_assert_eq!(
                matches!(phase, Phase::Engaging | Phase::Locked),
                engine.session().is_some()
            );
        }
    }
}
