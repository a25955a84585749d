use crate::*;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::scroller::{EVENT_NAMES, FLICK};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + (end - start) * unit
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// A surface with settable geometry and clock that records every write.
#[derive(Debug)]
struct TestSurface {
    now: u64,
    caps: Capabilities,
    wrapper: Rect,
    content: Rect,
    elements: Vec<(ElementId, Rect)>,
    viewport: Viewport,
    translated: Vec<Transform>,
    /// Overrides the read-back transform (a transition in flight).
    rendered: Option<Transform>,
    transition_ms: u64,
    easing: Option<Easing>,
    layouts: usize,
    frame_requested: bool,
    clicks: Vec<SyntheticClick>,
    pointer_events: Vec<bool>,
    bound: Vec<InputClass>,
    bind_target: Option<BindTarget>,
}

impl TestSurface {
    fn vertical(wrapper_height: f64, content_height: f64) -> Self {
        Self {
            now: 0,
            caps: Capabilities {
                touch: true,
                transition: false,
            },
            wrapper: Rect::new(0.0, 0.0, 100.0, wrapper_height),
            content: Rect::new(0.0, 0.0, 100.0, content_height),
            elements: Vec::new(),
            viewport: Viewport {
                width: 1000.0,
                height: 1000.0,
                scroll: Point::ZERO,
            },
            translated: Vec::new(),
            rendered: None,
            transition_ms: 0,
            easing: None,
            layouts: 0,
            frame_requested: false,
            clicks: Vec::new(),
            pointer_events: Vec::new(),
            bound: Vec::new(),
            bind_target: None,
        }
    }

    fn with_transition(mut self) -> Self {
        self.caps.transition = true;
        self
    }
}

impl Surface for TestSurface {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn wrapper_rect(&self) -> Rect {
        self.wrapper
    }

    fn content_rect(&self) -> Rect {
        self.content
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.elements
            .iter()
            .find(|(id, _)| *id == element)
            .map(|(_, r)| *r)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn translate(&mut self, transform: &Transform) {
        self.translated.push(transform.clone());
    }

    fn computed_transform(&self) -> Transform {
        self.rendered
            .clone()
            .or_else(|| self.translated.last().cloned())
            .unwrap_or_default()
    }

    fn set_transition_duration(&mut self, ms: u64) {
        self.transition_ms = ms;
    }

    fn set_transition_easing(&mut self, easing: Easing) {
        self.easing = Some(easing);
    }

    fn force_layout(&mut self) {
        self.layouts += 1;
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_requested = false;
    }

    fn dispatch_click(&mut self, click: SyntheticClick) {
        self.clicks.push(click);
    }

    fn set_pointer_events(&mut self, enabled: bool) {
        self.pointer_events.push(enabled);
    }

    fn bind_input(&mut self, class: InputClass, target: BindTarget) {
        self.bound.push(class);
        self.bind_target = Some(target);
    }

    fn unbind_input(&mut self, class: InputClass) {
        self.bound.retain(|c| *c != class);
    }
}

type Log = Rc<RefCell<Vec<&'static str>>>;

/// Records every coordinator event except `flick`, which changes behaviour when observed.
fn record(scroller: &Scroller<TestSurface>) -> Log {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    for &name in EVENT_NAMES.iter().filter(|n| **n != FLICK) {
        let log = Rc::clone(&log);
        scroller
            .hooks()
            .subscribe(name, move |_: &ScrollEvent| log.borrow_mut().push(name));
    }
    log
}

fn count(log: &Log, name: &str) -> usize {
    log.borrow().iter().filter(|n| **n == name).count()
}

fn scroller(options: ScrollOptions) -> Scroller<TestSurface> {
    Scroller::new(TestSurface::vertical(200.0, 400.0), options)
}

fn at(s: &mut Scroller<TestSurface>, now: u64) {
    s.surface_mut().now = now;
}

fn touch(s: &mut Scroller<TestSurface>, phase: PointerPhase, x: f64, y: f64) -> InputResponse {
    s.handle_pointer(&PointerEvent::touch(phase, x, y))
}

fn run_frames(s: &mut Scroller<TestSurface>, until: u64) {
    while s.surface().frame_requested && s.surface().now < until {
        let now = s.surface().now + 16;
        at(s, now);
        s.surface_mut().frame_requested = false;
        s.tick();
    }
}

fn axis(options: ScrollOptions, wrapper: f64, content: f64) -> AxisModel {
    let mut axis = AxisModel::new(Axis::Vertical, Rc::new(options));
    axis.refresh(AxisGeometry {
        wrapper_extent: wrapper,
        content_extent: content,
        relative_offset: 0.0,
    });
    axis
}

#[test]
fn hook_bus_runs_in_registration_order_and_stops_at_first_veto() {
    let bus: HookBus<u32> = HookBus::new(&["tick"]);
    let seen = Rc::new(RefCell::new(Vec::new()));

    for (tag, verdict) in [(1, Decision::Proceed), (2, Decision::Veto), (3, Decision::Proceed)] {
        let seen = Rc::clone(&seen);
        bus.on("tick", move |p: &u32| {
            seen.borrow_mut().push((tag, *p));
            verdict
        });
    }

    assert_eq!(bus.trigger("tick", &7), Decision::Veto);
    assert_eq!(*seen.borrow(), alloc::vec![(1, 7), (2, 7)]);
}

#[test]
fn hook_bus_proceeds_without_listeners() {
    let bus: HookBus<()> = HookBus::new(&["a"]);
    assert_eq!(bus.trigger("a", &()), Decision::Proceed);
    assert_eq!(bus.listener_count("a"), 0);
}

#[test]
fn hook_bus_once_deregisters_after_first_call() {
    let bus: HookBus<()> = HookBus::new(&["a"]);
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    bus.once("a", move |_: &()| c.set(c.get() + 1));

    assert_eq!(bus.listener_count("a"), 1);
    bus.trigger("a", &());
    bus.trigger("a", &());
    assert_eq!(calls.get(), 1);
    assert_eq!(bus.listener_count("a"), 0);
}

#[test]
fn hook_bus_once_survives_a_dispatch_vetoed_before_it() {
    let bus: HookBus<()> = HookBus::new(&["a"]);
    let veto = bus.subscribe("a", |_: &()| Decision::Veto);
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    bus.once("a", move |_: &()| c.set(c.get() + 1));

    assert_eq!(bus.trigger("a", &()), Decision::Veto);
    assert_eq!(calls.get(), 0);
    assert_eq!(bus.listener_count("a"), 2);

    bus.off(Some("a"), Some(veto));
    assert_eq!(bus.trigger("a", &()), Decision::Proceed);
    assert_eq!(calls.get(), 1);
    assert_eq!(bus.listener_count("a"), 0);
}

#[test]
fn hook_bus_once_runs_once_under_nested_dispatch() {
    let bus: Rc<HookBus<()>> = Rc::new(HookBus::new(&["a"]));
    let depth = Rc::new(Cell::new(0));
    let handle = Rc::clone(&bus);
    let d = Rc::clone(&depth);
    bus.subscribe("a", move |_: &()| {
        if d.get() == 0 {
            d.set(1);
            handle.trigger("a", &());
        }
    });
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    bus.once("a", move |_: &()| c.set(c.get() + 1));

    bus.trigger("a", &());
    assert_eq!(calls.get(), 1);
    assert_eq!(bus.listener_count("a"), 1);
}

#[test]
fn hook_bus_off_by_id_event_and_everything() {
    let bus: HookBus<()> = HookBus::new(&["a", "b"]);
    let first = bus.subscribe("a", |_: &()| ());
    bus.subscribe("a", |_: &()| ());
    bus.subscribe("b", |_: &()| ());

    bus.off(Some("a"), Some(first));
    assert_eq!(bus.listener_count("a"), 1);

    bus.off(Some("a"), None);
    assert_eq!(bus.listener_count("a"), 0);
    assert_eq!(bus.listener_count("b"), 1);

    let id = bus.subscribe("a", |_: &()| ());
    bus.off(None, Some(id));
    assert_eq!(bus.listener_count("a"), 0);

    bus.off(None, None);
    assert_eq!(bus.listener_count("b"), 0);
}

#[test]
fn hook_bus_unknown_event_registers_but_never_dispatches() {
    let bus: HookBus<()> = HookBus::new(&["a"]);
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    bus.subscribe("typo", move |_: &()| {
        c.set(c.get() + 1);
        Decision::Veto
    });

    assert!(!bus.is_declared("typo"));
    assert_eq!(bus.listener_count("typo"), 1);
    assert_eq!(bus.trigger("typo", &()), Decision::Proceed);
    assert_eq!(calls.get(), 0);

    bus.declare(&["typo"]);
    assert_eq!(bus.trigger("typo", &()), Decision::Veto);
    assert_eq!(calls.get(), 1);
}

#[test]
fn hook_bus_registry_changes_during_dispatch_apply_to_the_next_one() {
    let bus: Rc<HookBus<()>> = Rc::new(HookBus::new(&["a"]));
    let late_calls = Rc::new(Cell::new(0));

    let handle = Rc::clone(&bus);
    let late = Rc::clone(&late_calls);
    bus.once("a", move |_: &()| {
        let late = Rc::clone(&late);
        handle.subscribe("a", move |_: &()| late.set(late.get() + 1));
    });

    bus.trigger("a", &());
    assert_eq!(late_calls.get(), 0);
    bus.trigger("a", &());
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn hook_bus_destroy_clears_registrations_and_declarations() {
    let bus: HookBus<()> = HookBus::new(&["a"]);
    bus.subscribe("a", |_: &()| ());
    bus.destroy();
    assert_eq!(bus.listener_count("a"), 0);
    assert!(!bus.is_declared("a"));
}

#[test]
fn easing_curves_hit_endpoints_and_expose_css() {
    for easing in [
        Easing::Linear,
        Easing::Swipe,
        Easing::SwipeBounce,
        Easing::Bounce,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ] {
        assert!(easing.sample(0.0).abs() < 1e-9, "{easing:?}");
        assert!((easing.sample(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
    }
    assert!((Easing::Bounce.sample(0.5) - 0.9375).abs() < 1e-12);
    assert!((Easing::SwipeBounce.sample(0.5) - 0.75).abs() < 1e-12);
    assert!((Easing::CubicBezier(0.0, 0.0, 1.0, 1.0).sample(0.3) - 0.3).abs() < 1e-4);

    assert_eq!(Easing::Linear.css(), "linear");
    assert_eq!(Easing::Swipe.css(), "cubic-bezier(0.23, 1, 0.32, 1)");
    assert_eq!(Easing::Bounce.css(), "cubic-bezier(0.165, 0.84, 0.44, 1)");
}

#[test]
fn options_processing_applies_passthrough_and_capabilities() {
    let caps = Capabilities {
        touch: true,
        transition: false,
    };
    let o = ScrollOptions::new()
        .with_scroll_x(true)
        .with_free_scroll(true)
        .with_passthrough(Passthrough::Vertical)
        .processed(caps);
    assert!(!o.use_transition);
    assert!(!o.prevent_default);
    assert!(!o.free_scroll);
    assert!(o.scroll_x);
    assert!(!o.scroll_y);
    assert_eq!(o.direction_lock_threshold, 0.0);
    assert_eq!(o.disable_mouse, Some(true));
    assert_eq!(o.disable_touch, Some(false));

    let o = ScrollOptions::new()
        .with_free_scroll(true)
        .with_disable_mouse(Some(false))
        .processed(Capabilities::default());
    assert!(o.scroll_x && o.scroll_y && o.free_scroll);
    assert_eq!(o.disable_mouse, Some(false));
    assert!(o.use_transition);
}

#[test]
fn element_exception_matches_tags_and_classes_case_insensitively() {
    let ex = ElementException::tags(&["TEXTAREA"]).with_class("no-scroll");
    assert!(ex.matches(&Target::new(ElementId(1), "textarea")));
    assert!(ex.matches(&Target::new(ElementId(1), "div").with_class("item No-Scroll")));
    assert!(!ex.matches(&Target::new(ElementId(1), "div").with_class("item")));
    assert!(!ElementException::default().matches(&Target::default()));
}

#[test]
fn direction_lock_decides_once_per_gesture() {
    let mut lock = DirectionLock::new(5.0, false, Passthrough::None);
    assert_eq!(lock.check_moving_direction(20.0, 3.0), HostAction::Scroll);
    assert_eq!(lock.state(), LockState::Horizontal);

    // Later samples never re-decide.
    lock.check_moving_direction(0.0, 100.0);
    assert_eq!(lock.state(), LockState::Horizontal);
    assert_eq!(lock.adjust_delta(4.0, 9.0), (4.0, 0.0));

    lock.reset();
    lock.check_moving_direction(3.0, 8.0);
    assert_eq!(lock.state(), LockState::Vertical);
    assert_eq!(lock.adjust_delta(4.0, 9.0), (0.0, 9.0));

    lock.reset();
    lock.check_moving_direction(6.0, 8.0);
    assert_eq!(lock.state(), LockState::Unlocked);
    assert_eq!(lock.adjust_delta(4.0, 9.0), (4.0, 9.0));
}

#[test]
fn direction_lock_passthrough_yields_or_suppresses() {
    let mut lock = DirectionLock::new(0.0, false, Passthrough::Vertical);
    assert_eq!(lock.check_moving_direction(1.0, 30.0), HostAction::Yield);

    lock.reset();
    assert_eq!(lock.check_moving_direction(30.0, 1.0), HostAction::Suppress);

    let mut free = DirectionLock::new(5.0, true, Passthrough::None);
    assert_eq!(free.check_moving_direction(30.0, 1.0), HostAction::Scroll);
    assert_eq!(free.state(), LockState::Unlocked);
}

#[test]
fn axis_refresh_derives_bounds() {
    let a = axis(ScrollOptions::new(), 200.0, 400.0);
    assert_eq!((a.min_bound(), a.max_bound()), (0.0, -200.0));
    assert!(a.has_overflow());

    let short = axis(ScrollOptions::new(), 200.0, 150.0);
    assert!(!short.has_overflow());
    assert_eq!(short.max_bound(), short.min_bound());

    let mut offset = AxisModel::new(Axis::Vertical, Rc::new(ScrollOptions::new()));
    offset.refresh(AxisGeometry {
        wrapper_extent: 200.0,
        content_extent: 400.0,
        relative_offset: 10.0,
    });
    assert_eq!(offset.max_bound(), -210.0);

    let not_scrollable = axis(ScrollOptions::new().with_scroll_y(false), 200.0, 400.0);
    assert!(!not_scrollable.has_overflow());
}

#[test]
fn axis_degenerate_geometry_has_no_overflow_or_motion() {
    for (wrapper, content) in [(0.0, 400.0), (200.0, 0.0), (-5.0, -5.0), (0.0, 0.0)] {
        let mut a = axis(ScrollOptions::new(), wrapper, content);
        assert!(!a.has_overflow());
        assert_eq!(a.move_by(-50.0), 0.0);
        a.update_position(0.0);
        a.reset_start_pos();
        assert_eq!(a.end(10).destination, None);
        assert_eq!(a.adjust_position(-30.0), 0.0);
    }
}

#[test]
fn axis_move_without_bounce_clamps() {
    let mut a = axis(ScrollOptions::new().with_bounce(BounceConfig::NONE), 200.0, 400.0);
    assert_eq!(a.move_by(30.0), 0.0);
    assert_eq!(a.move_by(-150.0), -150.0);
    assert_eq!(a.move_by(-150.0), -200.0);
    assert_eq!(a.moving_direction(), Direction::Forward);
}

#[test]
fn axis_rubber_band_damps_outward_and_releases_inward() {
    let mut a = axis(ScrollOptions::new(), 200.0, 400.0);
    let first = a.move_by(30.0);
    assert!((first - 10.0).abs() < 1e-9);

    // Each outward step adds less than the previous one.
    let second = a.move_by(30.0) - first;
    assert!(second < 10.0 && second > 0.0);

    // Moving back in is undamped.
    let before = a.position();
    assert!((a.move_by(-5.0) - (before - 5.0)).abs() < 1e-9);
}

#[test]
fn property_rubber_band_stays_within_cap() {
    for seed in 1..=32u64 {
        let mut rng = Lcg::new(seed);
        let bounce = rng.gen_bool();
        let options = ScrollOptions::new().with_bounce(if bounce {
            BounceConfig::ALL
        } else {
            BounceConfig::NONE
        });
        let wrapper = rng.gen_range_f64(50.0, 600.0);
        let content = wrapper + rng.gen_range_f64(1.0, 2000.0);
        let mut a = axis(options, wrapper, content);
        let cap = a.overshoot_cap();
        let (lo, hi) = if bounce {
            (a.max_bound() - cap, a.min_bound() + cap)
        } else {
            (a.max_bound(), a.min_bound())
        };

        for _ in 0..200 {
            let delta = rng.gen_range_f64(-400.0, 400.0);
            let p = a.move_by(delta);
            assert!(
                p >= lo - 1e-9 && p <= hi + 1e-9,
                "seed={seed} p={p} lo={lo} hi={hi}"
            );
        }
    }
}

#[test]
fn axis_momentum_clamps_at_the_edge_with_swipe_bounce_time() {
    let mut a = axis(ScrollOptions::new(), 200.0, 400.0);
    a.update_position(-100.0);
    a.reset_start_pos();
    a.update_position(-210.0);

    let m = a.end(100);
    assert_eq!(m.destination, Some(-200.0));
    assert_eq!(m.duration, 500);
    assert!(m.bounced);
}

#[test]
fn axis_momentum_projects_with_deceleration() {
    let mut a = axis(ScrollOptions::new(), 200.0, 2000.0);
    a.reset_start_pos();
    a.update_position(-60.0);

    // v = 0.6 px/ms, travel = v² / (2 · 0.0015) = 120, time = v / 0.0015 = 400.
    let m = a.end(100);
    assert_eq!(m.destination, Some(-180.0));
    assert_eq!(m.duration, 400);
    assert!(!m.bounced);
}

#[test]
fn axis_momentum_requires_thresholds() {
    let mut a = axis(ScrollOptions::new(), 200.0, 2000.0);
    a.reset_start_pos();
    a.update_position(-60.0);
    assert_eq!(a.end(300).destination, None);

    a.reset_start_pos();
    a.update_position(-70.0);
    assert_eq!(a.end(100).destination, None);

    let mut off = axis(ScrollOptions::new().with_momentum(false), 200.0, 2000.0);
    off.update_position(-60.0);
    assert_eq!(off.end(10).destination, None);
}

#[test]
fn axis_boundary_checks_and_adjustment() {
    let mut a = axis(ScrollOptions::new(), 200.0, 400.0);
    a.update_position(12.5);
    let b = a.check_in_boundary();
    assert!(!b.in_boundary);
    assert_eq!(b.position, 0.0);

    a.update_position(-80.4);
    let b = a.check_in_boundary();
    assert!(b.in_boundary);
    assert_eq!(b.position, -80.4);

    assert_eq!(a.adjust_position(-80.4), -80.0);
    assert_eq!(a.adjust_position(-999.0), -200.0);
    assert_eq!(a.adjust_position(40.0), 0.0);
}

#[test]
fn scroller_binds_enabled_input_classes() {
    let s = scroller(ScrollOptions::new());
    assert_eq!(s.surface().bound, alloc::vec![InputClass::Touch]);

    let s = scroller(ScrollOptions::new().with_disable_mouse(Some(false)));
    assert_eq!(
        s.surface().bound,
        alloc::vec![InputClass::Touch, InputClass::Mouse]
    );
    assert_eq!(s.surface().bind_target, Some(BindTarget::Page));
}

#[test]
fn bind_to_wrapper_keeps_move_and_end_on_the_wrapper() {
    let s = scroller(ScrollOptions::new().with_bind_to_wrapper(true));
    assert_eq!(s.surface().bind_target, Some(BindTarget::Wrapper));
    assert_eq!(s.input().bind_target(), BindTarget::Wrapper);
}

#[test]
fn slow_small_drag_is_held_and_carried_into_the_first_qualifying_move() {
    let mut s = scroller(ScrollOptions::new().with_bounce(BounceConfig::NONE));
    let log = record(&s);

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::Move, 500.0, 490.0);
    assert_eq!(s.position().y, 0.0);
    assert_eq!(s.phase(), Phase::Tracking);

    touch(&mut s, PointerPhase::Move, 500.0, 475.0);
    touch(&mut s, PointerPhase::Move, 500.0, 455.0);

    assert_eq!(s.position(), Point::new(0.0, -45.0));
    assert_eq!(count(&log, "scrollStart"), 1);
    assert_eq!(s.phase(), Phase::Dragging);
    assert_eq!(s.direction_lock().state(), LockState::Vertical);
}

#[test]
fn gesture_under_thresholds_resolves_as_click() {
    let mut s = scroller(
        ScrollOptions::new()
            .with_probe(Probe::Continuous)
            .with_click(true),
    );
    let log = record(&s);

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::Move, 504.0, 495.0);
    touch(&mut s, PointerPhase::End, 504.0, 495.0);

    assert_eq!(count(&log, "scrollStart"), 0);
    assert_eq!(count(&log, "scroll"), 0);
    assert_eq!(count(&log, "scrollCancel"), 1);
    assert_eq!(s.surface().clicks.len(), 1);
    assert_eq!(s.surface().clicks[0].kind, ClickKind::Click);
    assert_eq!(s.phase(), Phase::Idle);
}

#[test]
fn vetoing_start_aborts_the_session_and_the_next_start_works() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);
    s.input_hooks().once("start", |_: &InputEvent| Decision::Veto);

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::Move, 500.0, 440.0);
    touch(&mut s, PointerPhase::End, 500.0, 440.0);
    assert_eq!(s.position().y, 0.0);
    assert_eq!(count(&log, "start"), 0);
    assert_eq!(count(&log, "touchEnd"), 0);

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::Move, 500.0, 440.0);
    assert_eq!(s.position().y, -60.0);
    assert_eq!(count(&log, "start"), 1);
}

#[test]
fn second_tap_within_delay_is_a_double_click_without_single_click() {
    let mut s = scroller(
        ScrollOptions::new()
            .with_click(true)
            .with_dblclick(Some(DblclickConfig::default())),
    );

    for now in [0, 100, 200] {
        at(&mut s, now);
        touch(&mut s, PointerPhase::Start, 500.0, 500.0);
        touch(&mut s, PointerPhase::End, 500.0, 500.0);
    }

    let kinds: Vec<ClickKind> = s.surface().clicks.iter().map(|c| c.kind.clone()).collect();
    assert_eq!(
        kinds,
        alloc::vec![ClickKind::Click, ClickKind::DoubleClick, ClickKind::Click]
    );
}

#[test]
fn tap_event_is_dispatched_with_its_name() {
    let mut s = scroller(ScrollOptions::new().with_tap(Some("tap")));
    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::End, 500.0, 500.0);
    assert_eq!(s.surface().clicks[0].kind, ClickKind::Tap(String::from("tap")));
}

fn quick_drag(s: &mut Scroller<TestSurface>) {
    at(s, 0);
    touch(s, PointerPhase::Start, 500.0, 500.0);
    at(s, 50);
    touch(s, PointerPhase::Move, 500.0, 480.0);
    at(s, 100);
    touch(s, PointerPhase::Move, 500.0, 440.0);
    touch(s, PointerPhase::End, 500.0, 440.0);
}

#[test]
fn flick_fires_only_with_a_listener() {
    let mut s = Scroller::new(TestSurface::vertical(200.0, 2000.0), ScrollOptions::new());
    let flicks = Rc::new(Cell::new(0));
    let f = Rc::clone(&flicks);
    s.hooks().on("flick", move |_: &ScrollEvent| f.set(f.get() + 1));
    let log = record(&s);

    quick_drag(&mut s);
    assert_eq!(flicks.get(), 1);
    assert_eq!(count(&log, "momentum"), 0);
    assert!(!s.is_animating());
}

#[test]
fn without_flick_listener_momentum_runs_to_rest() {
    let mut s = Scroller::new(TestSurface::vertical(200.0, 2000.0), ScrollOptions::new());
    let plans = Rc::new(RefCell::new(Vec::new()));
    let p = Rc::clone(&plans);
    s.hooks().on("momentum", move |e: &ScrollEvent| {
        if let ScrollEvent::Momentum(plan) = e {
            p.borrow_mut().push(*plan);
        }
    });
    let log = record(&s);

    quick_drag(&mut s);
    assert_eq!(
        *plans.borrow(),
        alloc::vec![MomentumPlan {
            x: 0.0,
            y: -180.0,
            duration: 400,
            easing: Easing::Swipe,
        }]
    );
    assert_eq!(s.phase(), Phase::Momentum);
    assert!(s.is_animating());

    at(&mut s, 500);
    s.tick();
    assert_eq!(s.position(), Point::new(0.0, -180.0));
    assert_eq!(count(&log, "scrollEnd"), 1);
    assert_eq!(s.phase(), Phase::Idle);
    assert!(!s.is_animating());
}

#[test]
fn vetoed_momentum_ends_in_place() {
    let mut s = Scroller::new(TestSurface::vertical(200.0, 2000.0), ScrollOptions::new());
    s.hooks().on("momentum", |_: &ScrollEvent| Decision::Veto);
    let log = record(&s);

    quick_drag(&mut s);
    assert!(!s.is_animating());
    assert_eq!(s.position().y, -60.0);
    assert_eq!(count(&log, "scrollEnd"), 1);
}

#[test]
fn overscrolled_drag_rebounds_into_bounds() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);

    at(&mut s, 0);
    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    at(&mut s, 10);
    touch(&mut s, PointerPhase::Move, 500.0, 520.0);
    at(&mut s, 20);
    touch(&mut s, PointerPhase::Move, 500.0, 560.0);
    let over = s.position().y;
    assert!(over > 0.0 && over <= 100.0, "{over}");

    at(&mut s, 30);
    touch(&mut s, PointerPhase::End, 500.0, 560.0);
    assert_eq!(s.phase(), Phase::Rebounding);

    run_frames(&mut s, 2000);
    assert_eq!(s.position().y, 0.0);
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(count(&log, "scrollEnd"), 1);
}

#[test]
fn zero_duration_scroll_to_lands_exactly() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);

    s.scroll_to(0.0, -120.0, 0, None, &ExtraTransform::default(), false);
    assert_eq!(s.position(), Point::new(0.0, -120.0));
    assert_eq!(s.surface().layouts, 1);
    assert_eq!(count(&log, "scrollTo"), 1);
    assert_eq!(count(&log, "scroll"), 1);
    assert_eq!(count(&log, "scrollEnd"), 1);

    // Same position: nothing to do.
    s.scroll_to(0.0, -120.0, 300, None, &ExtraTransform::default(), false);
    assert!(!s.is_animating());
}

#[test]
fn silent_scroll_to_reports_nothing_but_scroll_to() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);
    s.scroll_to(0.0, -50.0, 0, None, &ExtraTransform::default(), true);
    assert_eq!(s.position().y, -50.0);
    assert_eq!(*log.borrow(), alloc::vec!["scrollTo"]);
}

#[test]
fn scroll_to_carries_extra_channels() {
    let mut s = scroller(ScrollOptions::new());
    let extra = ExtraTransform {
        start: alloc::vec![Channel {
            name: "scale",
            value: 1.0
        }],
        end: alloc::vec![Channel {
            name: "scale",
            value: 2.0
        }],
    };
    s.scroll_to(0.0, -100.0, 0, None, &extra, false);
    let last = s.surface().translated.last().cloned().unwrap_or_default();
    assert_eq!(last.channel("scale"), Some(2.0));
}

#[test]
fn scroll_by_is_relative() {
    let mut s = scroller(ScrollOptions::new());
    s.scroll_by(0.0, -30.0, 0, None);
    s.scroll_by(0.0, -30.0, 0, None);
    assert_eq!(s.position().y, -60.0);
}

#[test]
fn new_gesture_force_stops_a_motion_and_is_not_a_click() {
    let mut s = scroller(ScrollOptions::new().with_click(true));
    let log = record(&s);

    s.scroll_to(0.0, -150.0, 300, None, &ExtraTransform::default(), false);
    assert!(s.is_animating());
    assert_eq!(s.phase(), Phase::Animating);

    at(&mut s, 150);
    s.tick();
    let mid = s.position().y;
    assert!((mid - -140.625).abs() < 1e-9, "{mid}");

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    assert!(!s.is_animating());
    assert!(s.animator().force_stopped());
    assert_eq!(s.position().y, mid);
    assert_eq!(count(&log, "scrollEnd"), 1);

    // A new drag after the stop never revives the old motion.
    touch(&mut s, PointerPhase::Move, 500.0, 470.0);
    assert!(!s.is_animating());

    touch(&mut s, PointerPhase::End, 500.0, 470.0);
    assert!(s.surface().clicks.is_empty());
    assert!(!s.animator().force_stopped());
}

#[test]
fn tap_that_stops_a_motion_dispatches_no_click() {
    let mut s = scroller(ScrollOptions::new().with_click(true));
    s.scroll_to(0.0, -150.0, 300, None, &ExtraTransform::default(), false);
    at(&mut s, 100);
    s.tick();

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::End, 500.0, 500.0);
    assert!(s.surface().clicks.is_empty());
}

#[test]
fn before_force_stop_veto_suppresses_the_report() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);
    s.animation_hooks()
        .on("beforeForceStop", |_: &Transform| Decision::Veto);

    s.scroll_to(0.0, -150.0, 300, None, &ExtraTransform::default(), false);
    at(&mut s, 100);
    s.tick();
    touch(&mut s, PointerPhase::Start, 500.0, 500.0);

    assert!(!s.is_animating());
    assert!(s.animator().force_stopped());
    assert_eq!(count(&log, "scrollEnd"), 0);
}

#[test]
fn timeline_backend_writes_end_once_and_completes_on_transition_end() {
    let mut s = Scroller::new(
        TestSurface::vertical(200.0, 400.0).with_transition(),
        ScrollOptions::new(),
    );
    assert_eq!(s.animator().backend(), Backend::Timeline);
    let log = record(&s);

    s.scroll_to(0.0, -100.0, 300, None, &ExtraTransform::default(), false);
    assert!(s.is_animating());
    assert_eq!(s.surface().transition_ms, 300);
    assert_eq!(s.surface().easing, Some(Easing::Bounce));
    assert_eq!(s.surface().translated.len(), 1);
    assert!(!s.surface().frame_requested);

    s.transition_end();
    assert!(!s.is_animating());
    assert_eq!(s.surface().transition_ms, 0);
    assert_eq!(count(&log, "scrollEnd"), 1);
    assert_eq!(s.phase(), Phase::Idle);

    // Spurious completions are ignored.
    s.transition_end();
    assert_eq!(count(&log, "scrollEnd"), 1);
}

#[test]
fn timeline_stop_freezes_at_the_rendered_transform() {
    let mut s = Scroller::new(
        TestSurface::vertical(200.0, 400.0).with_transition(),
        ScrollOptions::new(),
    );
    s.scroll_to(0.0, -100.0, 300, None, &ExtraTransform::default(), false);
    s.surface_mut().rendered = Some(Transform::new(0.0, -40.0));

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    assert!(!s.is_animating());
    assert_eq!(s.position().y, -40.0);
    assert_eq!(s.surface().transition_ms, 0);
    assert_eq!(
        s.surface().translated.last().map(|t| t.y),
        Some(-40.0)
    );
}

#[test]
fn timeline_continuous_probe_reports_scroll_and_ends_on_the_next_frame() {
    let mut s = Scroller::new(
        TestSurface::vertical(200.0, 400.0).with_transition(),
        ScrollOptions::new().with_probe(Probe::Continuous),
    );
    let log = record(&s);

    s.scroll_to(0.0, -100.0, 300, None, &ExtraTransform::default(), false);
    assert!(s.surface().frame_requested);

    s.surface_mut().rendered = Some(Transform::new(0.0, -50.0));
    at(&mut s, 16);
    s.tick();
    assert_eq!(count(&log, "scroll"), 1);

    s.surface_mut().rendered = Some(Transform::new(0.0, -100.0));
    s.transition_end();
    assert_eq!(count(&log, "scrollEnd"), 0);

    at(&mut s, 32);
    s.tick();
    assert_eq!(count(&log, "scroll"), 2);
    assert_eq!(count(&log, "scrollEnd"), 1);
}

#[test]
fn interpolated_continuous_probe_reports_every_frame() {
    let mut s = scroller(ScrollOptions::new().with_probe(Probe::Continuous));
    let log = record(&s);

    s.scroll_to(0.0, -100.0, 100, Some(Easing::Linear), &ExtraTransform::default(), false);
    assert_eq!(count(&log, "scroll"), 1);
    run_frames(&mut s, 1000);

    assert_eq!(s.position().y, -100.0);
    // One report per frame: t = 0, 16, ..., 96, then the final snap.
    assert_eq!(count(&log, "scroll"), 8);
    assert_eq!(count(&log, "scrollEnd"), 1);
}

#[test]
fn throttled_scroll_reports_once_per_interval_while_dragging() {
    let surface = TestSurface::vertical(200.0, 2000.0);
    let mut s = Scroller::new(
        surface,
        ScrollOptions::new()
            .with_probe(Probe::Throttled)
            .with_bounce(BounceConfig::NONE),
    );
    let log = record(&s);

    touch(&mut s, PointerPhase::Start, 500.0, 800.0);
    let mut y = 800.0;
    for now in (100..=300).step_by(100) {
        at(&mut s, now);
        y -= 20.0;
        touch(&mut s, PointerPhase::Move, 500.0, y);
    }
    assert_eq!(s.position().y, -60.0);
    assert_eq!(count(&log, "scroll"), 0);
    assert_eq!(s.axis_y().start_position(), 0.0);

    for now in (400..=800).step_by(100) {
        at(&mut s, now);
        y -= 20.0;
        touch(&mut s, PointerPhase::Move, 500.0, y);
        if now == 400 {
            assert_eq!(count(&log, "scroll"), 1);
            assert_eq!(s.axis_y().start_position(), -80.0);
        }
    }
    assert_eq!(s.position().y, -160.0);
    assert_eq!(count(&log, "scroll"), 2);
    assert_eq!(s.axis_y().start_position(), -160.0);

    touch(&mut s, PointerPhase::End, 500.0, y);
    assert_eq!(count(&log, "momentum"), 0);
    assert_eq!(count(&log, "scrollEnd"), 1);
    assert_eq!(count(&log, "scroll"), 2);
}

#[test]
fn scroll_to_element_resolves_offsets_and_can_be_vetoed() {
    let mut surface = TestSurface::vertical(200.0, 400.0);
    surface.elements.push((ElementId(7), Rect::new(0.0, 120.0, 100.0, 50.0)));
    surface.elements.push((ElementId(8), Rect::new(0.0, 380.0, 100.0, 20.0)));
    let mut s = Scroller::new(surface, ScrollOptions::new());

    assert!(s.scroll_to_element(
        ElementId(7),
        0,
        ElementOffset::default(),
        ElementOffset::default(),
        None
    ));
    assert_eq!(s.position().y, -120.0);

    assert!(s.scroll_to_element(
        ElementId(7),
        0,
        ElementOffset::Px(0.0),
        ElementOffset::Center,
        None
    ));
    assert_eq!(s.position().y, -45.0);

    assert!(s.scroll_to_element(
        ElementId(8),
        0,
        ElementOffset::default(),
        ElementOffset::default(),
        None
    ));
    assert_eq!(s.position().y, -200.0);

    assert!(!s.scroll_to_element(
        ElementId(99),
        0,
        ElementOffset::default(),
        ElementOffset::default(),
        None
    ));

    s.hooks()
        .on("scrollToElement", |_: &ScrollEvent| Decision::Veto);
    assert!(!s.scroll_to_element(
        ElementId(7),
        0,
        ElementOffset::default(),
        ElementOffset::default(),
        None
    ));
    assert_eq!(s.position().y, -200.0);
}

#[test]
fn resize_is_debounced_into_one_refresh() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);

    s.on_resize();
    at(&mut s, 30);
    s.on_resize();
    s.surface_mut().content.height = 1000.0;

    at(&mut s, 60);
    s.tick();
    assert_eq!(count(&log, "refresh"), 0);
    assert_eq!(s.axis_y().max_bound(), -200.0);

    at(&mut s, 90);
    s.tick();
    assert_eq!(count(&log, "refresh"), 1);
    assert_eq!(s.axis_y().max_bound(), -800.0);
    assert!(!s.resize_pending());
}

#[test]
fn refresh_rebounds_content_left_out_of_bounds() {
    let mut s = scroller(ScrollOptions::new());
    s.scroll_to(0.0, -200.0, 0, None, &ExtraTransform::default(), false);
    s.surface_mut().content.height = 300.0;
    s.refresh();
    assert_eq!(s.position().y, -100.0);
}

#[test]
fn passthrough_axis_yields_and_cross_axis_suppresses() {
    let mut surface = TestSurface::vertical(200.0, 400.0);
    surface.content.width = 400.0;
    let options = ScrollOptions::new()
        .with_scroll_x(true)
        .with_passthrough(Passthrough::Vertical);

    let mut s = Scroller::new(surface, options);
    let r = touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    assert!(!r.prevent_default);
    let r = touch(&mut s, PointerPhase::Move, 480.0, 500.0);
    assert!(r.prevent_default);
    assert_eq!(s.position(), Point::new(-20.0, 0.0));
    touch(&mut s, PointerPhase::End, 480.0, 500.0);

    let mut surface = TestSurface::vertical(200.0, 400.0);
    surface.content.width = 400.0;
    let options = ScrollOptions::new()
        .with_scroll_x(true)
        .with_passthrough(Passthrough::Vertical);
    let mut s = Scroller::new(surface, options);
    let log = record(&s);
    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::Move, 500.0, 470.0);
    assert_eq!(s.phase(), Phase::Idle);
    touch(&mut s, PointerPhase::Move, 500.0, 400.0);
    touch(&mut s, PointerPhase::End, 500.0, 400.0);
    assert_eq!(s.position(), Point::ZERO);
    assert_eq!(count(&log, "scrollStart"), 0);
    assert_eq!(count(&log, "touchEnd"), 0);
}

#[test]
fn input_policy_filters_buttons_exceptions_and_classes() {
    let mut s = scroller(ScrollOptions::new().with_disable_mouse(Some(false)));
    let log = record(&s);

    let right = PointerEvent::mouse(PointerPhase::Start, 500.0, 500.0).with_button(Button::Secondary);
    s.handle_pointer(&right);
    assert_eq!(count(&log, "start"), 0);

    let textarea = PointerEvent::touch(PointerPhase::Start, 500.0, 500.0)
        .with_target(Target::new(ElementId(3), "TEXTAREA"));
    s.handle_pointer(&textarea);
    assert_eq!(count(&log, "start"), 0);

    let r = touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    assert!(r.prevent_default);
    assert_eq!(count(&log, "start"), 1);

    // Mouse primitives are ignored while a touch session is active.
    s.handle_pointer(&PointerEvent::mouse(PointerPhase::Move, 500.0, 400.0));
    assert_eq!(s.position().y, 0.0);
    s.handle_pointer(&PointerEvent::mouse(PointerPhase::End, 500.0, 400.0));
    assert_eq!(count(&log, "touchEnd"), 0);

    let input = PointerEvent::touch(PointerPhase::End, 500.0, 500.0)
        .with_target(Target::new(ElementId(4), "input"));
    let r = s.handle_pointer(&input);
    assert!(!r.prevent_default);
    assert_eq!(count(&log, "touchEnd"), 1);
}

#[test]
fn stop_propagation_follows_options() {
    let mut s = scroller(ScrollOptions::new().with_stop_propagation(true));
    let r = touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    assert!(r.stop_propagation);
}

#[test]
fn pointer_reaching_the_viewport_edge_ends_the_gesture() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);

    touch(&mut s, PointerPhase::Start, 500.0, 100.0);
    touch(&mut s, PointerPhase::Move, 500.0, 10.0);
    assert_eq!(count(&log, "touchEnd"), 1);

    let y = s.position().y;
    touch(&mut s, PointerPhase::Move, 500.0, 5.0);
    assert_eq!(s.position().y, y);
}

#[test]
fn cancel_ends_the_session_like_end() {
    let run = |last: PointerPhase| {
        let mut s = scroller(ScrollOptions::new());
        let log = record(&s);
        touch(&mut s, PointerPhase::Start, 500.0, 500.0);
        at(&mut s, 400);
        touch(&mut s, PointerPhase::Move, 500.0, 440.0);
        at(&mut s, 800);
        let r = touch(&mut s, last, 500.0, 440.0);
        assert!(!s.input().is_active());
        assert_eq!(s.phase(), Phase::Idle);

        at(&mut s, 900);
        touch(&mut s, PointerPhase::Move, 500.0, 400.0);
        let names = log.borrow().clone();
        (names, s.position(), r)
    };

    let (ended, at_end, r_end) = run(PointerPhase::End);
    let (cancelled, at_cancel, r_cancel) = run(PointerPhase::Cancel);
    assert_eq!(at_end, Point::new(0.0, -60.0));
    assert_eq!(at_cancel, at_end);
    assert_eq!(cancelled, ended);
    assert_eq!(r_cancel, r_end);
    assert_eq!(ended.iter().filter(|n| **n == "touchEnd").count(), 1);
    assert_eq!(ended.last().copied(), Some("scrollEnd"));
}

#[test]
fn native_clicks_are_swallowed_unless_excepted_or_synthetic() {
    let mut s = scroller(ScrollOptions::new().with_click(true));

    let r = touch(&mut s, PointerPhase::Click, 500.0, 500.0);
    assert!(r.prevent_default && r.stop_propagation);

    let button = PointerEvent::touch(PointerPhase::Click, 500.0, 500.0)
        .with_target(Target::new(ElementId(2), "BUTTON"));
    assert_eq!(s.handle_pointer(&button), InputResponse::default());

    let mut synthetic = PointerEvent::touch(PointerPhase::Click, 500.0, 500.0);
    synthetic.synthetic = true;
    assert_eq!(s.handle_pointer(&synthetic), InputResponse::default());
}

#[test]
fn pointer_events_are_disabled_while_moving_and_restored_on_scroll_end() {
    let mut s = Scroller::new(TestSurface::vertical(200.0, 2000.0), ScrollOptions::new());
    quick_drag(&mut s);
    assert_eq!(s.surface().pointer_events, alloc::vec![false]);

    at(&mut s, 500);
    s.tick();
    assert_eq!(s.surface().pointer_events, alloc::vec![false, true]);
}

#[test]
fn disabled_scroller_ignores_gestures_until_enabled() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);
    s.disable();
    assert!(!s.is_enabled());

    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::Move, 500.0, 440.0);
    assert_eq!(s.position().y, 0.0);
    s.on_resize();
    assert!(!s.resize_pending());

    s.enable();
    touch(&mut s, PointerPhase::Start, 500.0, 500.0);
    touch(&mut s, PointerPhase::Move, 500.0, 440.0);
    assert_eq!(s.position().y, -60.0);
    assert_eq!(count(&log, "disable"), 1);
    assert_eq!(count(&log, "enable"), 1);
}

#[test]
fn destroy_unbinds_input_and_clears_hooks() {
    let mut s = scroller(ScrollOptions::new());
    let log = record(&s);
    s.destroy();

    assert_eq!(count(&log, "destroy"), 1);
    assert!(s.surface().bound.is_empty());
    assert_eq!(s.hooks().listener_count("scrollEnd"), 0);
    assert!(!s.hooks().is_declared("scrollEnd"));
    assert_eq!(s.input_hooks().listener_count("start"), 0);
}
