mod actions;

use alloc::rc::Rc;

use crate::animation::{Animator, Backend, Progress};
use crate::axis::{AxisGeometry, AxisModel};
use crate::direction_lock::DirectionLock;
use crate::easing::Easing;
use crate::gesture::{GestureNormalizer, InputEvent};
use crate::hooks::HookBus;
use crate::options::{Probe, ScrollOptions};
use crate::surface::Surface;
use crate::{
    Axis, Channel, ElementId, ExtraTransform, InputResponse, Phase, Point, PointerEvent, PointerPhase,
    Transform,
};

pub const BEFORE_START: &str = "beforeStart";
pub const START: &str = "start";
pub const BEFORE_SCROLL_START: &str = "beforeScrollStart";
pub const BEFORE_MOVE: &str = "beforeMove";
pub const SCROLL_START: &str = "scrollStart";
pub const SCROLL: &str = "scroll";
pub const BEFORE_END: &str = "beforeEnd";
pub const TOUCH_END: &str = "touchEnd";
pub const END: &str = "end";
pub const SCROLL_END: &str = "scrollEnd";
pub const FLICK: &str = "flick";
pub const SCROLL_CANCEL: &str = "scrollCancel";
pub const MOMENTUM: &str = "momentum";
pub const SCROLL_TO: &str = "scrollTo";
pub const SCROLL_TO_ELEMENT: &str = "scrollToElement";
pub const REFRESH: &str = "refresh";
pub const ENABLE: &str = "enable";
pub const DISABLE: &str = "disable";
pub const DESTROY: &str = "destroy";

pub const EVENT_NAMES: &[&str] = &[
    BEFORE_START,
    START,
    BEFORE_SCROLL_START,
    BEFORE_MOVE,
    SCROLL_START,
    SCROLL,
    BEFORE_END,
    TOUCH_END,
    END,
    SCROLL_END,
    FLICK,
    SCROLL_CANCEL,
    MOMENTUM,
    SCROLL_TO,
    SCROLL_TO_ELEMENT,
    REFRESH,
    ENABLE,
    DISABLE,
    DESTROY,
];

/// The motion decided when a drag is released with enough velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentumPlan {
    pub x: f64,
    pub y: f64,
    pub duration: u64,
    pub easing: Easing,
}

/// Payload of the coordinator's hook bus.
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollEvent {
    /// `scrollStart`, `flick`, `scrollCancel`, `refresh`, `enable`, `disable`, `destroy`.
    None,
    /// `beforeStart`, `start`, `beforeScrollStart`, `beforeMove`, `beforeEnd`.
    Pointer(PointerEvent),
    /// `scroll`, `touchEnd`, `end`, `scrollEnd`.
    Position(Point),
    /// `scrollTo`: the requested end transform.
    Transform(Transform),
    /// `momentum`.
    Momentum(MomentumPlan),
    /// `scrollToElement`: the element and the resolved, clamped destination.
    Element { element: ElementId, position: Point },
}

impl ScrollEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Position(p) | Self::Element { position: p, .. } => Some(*p),
            Self::Transform(t) => Some(t.point()),
            Self::Momentum(plan) => Some(Point::new(plan.x, plan.y)),
            Self::None | Self::Pointer(_) => None,
        }
    }
}

/// Offset applied on top of an element's position by [`Scroller::scroll_to_element`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementOffset {
    Px(f64),
    /// Center the element in the wrapper.
    Center,
}

impl Default for ElementOffset {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl ElementOffset {
    fn resolve(self, element_extent: f64, wrapper_extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Center => (element_extent / 2.0 - wrapper_extent / 2.0).round(),
        }
    }
}

/// A touch/pointer scroller for one wrapper and its content.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `handle_pointer` for every pointer primitive (and apply the returned [`InputResponse`])
/// - `tick` on every requested frame and on timer ticks (resize debounce)
/// - `transition_end` when a declarative transition on the content completes
/// - `on_resize` when the window or container size changes
pub struct Scroller<S: Surface> {
    surface: S,
    options: Rc<ScrollOptions>,
    hooks: HookBus<ScrollEvent>,
    normalizer: GestureNormalizer,
    lock: DirectionLock,
    axis_x: AxisModel,
    axis_y: AxisModel,
    animator: Animator,

    enabled: bool,
    moved: bool,
    phase: Phase,
    start_time: u64,
    end_time: Option<u64>,
    /// Drag deltas absorbed by the jitter filter, applied with the first qualifying sample.
    held_delta: Point,
    last_click: Option<u64>,
    resize_deadline: Option<u64>,
    pointer_events: bool,
}

impl<S: Surface> Scroller<S> {
    pub fn new(mut surface: S, options: ScrollOptions) -> Self {
        let options = Rc::new(options.processed(surface.capabilities()));
        let backend = if options.use_transition {
            Backend::Timeline
        } else {
            Backend::Interpolated
        };
        rdebug!(?backend, options = ?*options, "Scroller::new");

        let mut normalizer = GestureNormalizer::new(Rc::clone(&options));
        normalizer.bind(&mut surface);

        let mut scroller = Self {
            surface,
            hooks: HookBus::new(EVENT_NAMES),
            normalizer,
            lock: DirectionLock::new(
                options.direction_lock_threshold,
                options.free_scroll,
                options.passthrough,
            ),
            axis_x: AxisModel::new(Axis::Horizontal, Rc::clone(&options)),
            axis_y: AxisModel::new(Axis::Vertical, Rc::clone(&options)),
            animator: Animator::new(backend, options.probe),
            options,
            enabled: true,
            moved: false,
            phase: Phase::Idle,
            start_time: 0,
            end_time: None,
            held_delta: Point::ZERO,
            last_click: None,
            resize_deadline: None,
            pointer_events: true,
        };

        scroller.refresh();
        let (x, y) = (scroller.options.start_x, scroller.options.start_y);
        scroller.scroll_to(x, y, 0, None, &ExtraTransform::default(), true);
        scroller
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn hooks(&self) -> &HookBus<ScrollEvent> {
        &self.hooks
    }

    /// The gesture normalizer's hooks (`beforeStart`, `start`, `move`, `end`, `click`).
    pub fn input_hooks(&self) -> &HookBus<InputEvent> {
        self.normalizer.hooks()
    }

    pub fn input(&self) -> &GestureNormalizer {
        &self.normalizer
    }

    /// The animator's hooks (`move`, `end`, `beforeForceStop`, `forceStop`).
    pub fn animation_hooks(&self) -> &HookBus<Transform> {
        self.animator.hooks()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn axis(&self, axis: Axis) -> &AxisModel {
        match axis {
            Axis::Horizontal => &self.axis_x,
            Axis::Vertical => &self.axis_y,
        }
    }

    pub fn axis_x(&self) -> &AxisModel {
        &self.axis_x
    }

    pub fn axis_y(&self) -> &AxisModel {
        &self.axis_y
    }

    pub fn direction_lock(&self) -> &DirectionLock {
        &self.lock
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_animating(&self) -> bool {
        self.animator.pending()
    }

    pub fn position(&self) -> Point {
        Point::new(self.axis_x.position(), self.axis_y.position())
    }

    /// Routes a pointer primitive through the gesture lifecycle.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> InputResponse {
        let mut response = InputResponse::default();
        match event.phase {
            PointerPhase::Start => self.pointer_start(event, &mut response),
            PointerPhase::Move => self.pointer_move(event, &mut response),
            PointerPhase::End | PointerPhase::Cancel => self.pointer_end(event, &mut response),
            PointerPhase::Click => self.pointer_click(event, &mut response),
        }
        response
    }

    /// Advances time-driven work: the resize debounce and the requested animation frame.
    pub fn tick(&mut self) {
        let now = self.surface.now_ms();
        if self.resize_deadline.is_some_and(|deadline| now >= deadline) {
            self.resize_deadline = None;
            self.refresh();
        }

        if self.animator.frame_scheduled() {
            let progress = self.animator.frame(&mut self.surface);
            self.sync_axes();
            self.handle_progress(progress);
        }
    }

    /// Completion of a declarative transition on the content.
    pub fn transition_end(&mut self) {
        if self.animator.backend() != Backend::Timeline || !self.animator.pending() {
            return;
        }
        self.animator.transition_time(0, &mut self.surface);

        if !self.reset_position(self.options.bounce_time, Some(Easing::Bounce)) {
            self.animator.set_pending(false);
            if self.options.probe != Probe::Continuous {
                self.phase = Phase::Idle;
                self.emit_scroll_end(self.position());
            }
        }
    }

    /// Arms (or re-arms) the debounced refresh.
    pub fn on_resize(&mut self) {
        if !self.enabled {
            return;
        }
        self.resize_deadline = Some(self.surface.now_ms() + self.options.resize_polling);
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_deadline.is_some()
    }

    /// Re-reads geometry and re-derives both axes' bounds.
    pub fn refresh(&mut self) {
        let wrapper = self.surface.wrapper_rect();
        let content = self.surface.content_rect();

        self.axis_x.refresh(AxisGeometry {
            wrapper_extent: wrapper.width,
            content_extent: content.width,
            relative_offset: content.x,
        });
        self.axis_y.refresh(AxisGeometry {
            wrapper_extent: wrapper.height,
            content_extent: content.height,
            relative_offset: content.y,
        });
        self.end_time = None;

        rdebug!(?wrapper, ?content, "Scroller: refresh");
        self.hooks.trigger(REFRESH, &ScrollEvent::None);

        if !self.animator.pending() {
            self.reset_position(0, None);
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        self.hooks.trigger(ENABLE, &ScrollEvent::None);
    }

    /// Stops reacting to input. A frame already requested is cancelled.
    pub fn disable(&mut self) {
        self.animator.cancel_frame(&mut self.surface);
        self.enabled = false;
        self.hooks.trigger(DISABLE, &ScrollEvent::None);
    }

    /// Unbinds input, cancels frames and clears every hook registry.
    pub fn destroy(&mut self) {
        self.hooks.trigger(DESTROY, &ScrollEvent::None);
        self.normalizer.destroy(&mut self.surface);
        self.animator.destroy(&mut self.surface);
        self.hooks.destroy();
        self.resize_deadline = None;
        self.enabled = false;
        self.phase = Phase::Idle;
        rdebug!("Scroller: destroyed");
    }

    /// Moves the content to `(x, y)`.
    ///
    /// `easing` defaults to [`Easing::Bounce`]. Nothing happens when the content already sits
    /// at `(x, y)`. `silent` suppresses the animator's `move`/`end` for zero-duration moves.
    pub fn scroll_to(
        &mut self,
        x: f64,
        y: f64,
        duration: u64,
        easing: Option<Easing>,
        extra: &ExtraTransform,
        silent: bool,
    ) {
        let end = Transform::new(x, y).with_channels(&extra.end);
        self.animate_to(
            end,
            &extra.start,
            duration,
            easing.unwrap_or_default(),
            silent,
            Phase::Animating,
        );
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64, duration: u64, easing: Option<Easing>) {
        let Point { x, y } = self.position();
        self.scroll_to(
            x + dx,
            y + dy,
            duration,
            easing,
            &ExtraTransform::default(),
            false,
        );
    }

    /// Scrolls so that `element` sits at the wrapper origin, shifted by the offsets.
    ///
    /// Returns `false` when the element is unknown or a `scrollToElement` listener vetoed.
    pub fn scroll_to_element(
        &mut self,
        element: ElementId,
        duration: u64,
        offset_x: ElementOffset,
        offset_y: ElementOffset,
        easing: Option<Easing>,
    ) -> bool {
        let Some(rect) = self.surface.element_rect(element) else {
            rwarn!(?element, "Scroller: scroll_to_element on an unknown element");
            return false;
        };
        let wrapper = self.surface.wrapper_rect();

        let ox = offset_x.resolve(rect.width, wrapper.width);
        let oy = offset_y.resolve(rect.height, wrapper.height);
        let position = Point::new(
            self.axis_x.adjust_position(-(rect.x - wrapper.x) - ox),
            self.axis_y.adjust_position(-(rect.y - wrapper.y) - oy),
        );

        let event = ScrollEvent::Element { element, position };
        if self.hooks.trigger(SCROLL_TO_ELEMENT, &event).is_veto() {
            return false;
        }
        self.scroll_to(
            position.x,
            position.y,
            duration,
            easing,
            &ExtraTransform::default(),
            false,
        );
        true
    }

    /// Rebounds into bounds when either axis is outside them.
    ///
    /// Returns `true` when a rebound was issued.
    pub fn reset_position(&mut self, duration: u64, easing: Option<Easing>) -> bool {
        let bx = self.axis_x.check_in_boundary();
        let by = self.axis_y.check_in_boundary();
        if bx.in_boundary && by.in_boundary {
            return false;
        }
        rdebug!(x = bx.position, y = by.position, duration, "Scroller: rebound");
        self.animate_to(
            Transform::new(bx.position, by.position),
            &[],
            duration,
            easing.unwrap_or(Easing::Bounce),
            false,
            Phase::Rebounding,
        );
        true
    }

    fn animate_to(
        &mut self,
        end: Transform,
        extra_start: &[Channel],
        duration: u64,
        easing: Easing,
        silent: bool,
        phase: Phase,
    ) {
        let start = Transform::from_point(self.position()).with_channels(extra_start);
        self.hooks.trigger(SCROLL_TO, &ScrollEvent::Transform(end.clone()));
        if start.x == end.x && start.y == end.y {
            return;
        }

        self.phase = phase;
        if duration > 0 {
            self.set_pointer_events(false);
        }
        let progress = self
            .animator
            .move_to(&start, &end, duration, easing, silent, &mut self.surface);
        debug_assert!(
            duration > 0 || !self.animator.pending(),
            "zero-duration motion left the animator pending"
        );
        self.sync_axes();

        let settled = !self.animator.pending() && progress.ended.is_none();
        self.handle_progress(progress);
        if settled && self.phase == phase {
            self.phase = Phase::Idle;
        }
    }

    fn handle_progress(&mut self, progress: Progress) {
        if let Some(moved) = progress.moved {
            self.hooks.trigger(SCROLL, &ScrollEvent::Position(moved.point()));
        }
        if let Some(ended) = progress.ended {
            self.animation_ended(ended.point());
        }
    }

    /// Resting reconciliation after a motion completed on its own.
    fn animation_ended(&mut self, position: Point) {
        if !self.reset_position(self.options.bounce_time, None) {
            self.animator.set_pending(false);
            self.phase = Phase::Idle;
            self.emit_scroll_end(position);
        }
    }

    fn sync_axes(&mut self) {
        let current = self.animator.current();
        let (x, y) = (current.x, current.y);
        self.axis_x.update_position(x);
        self.axis_y.update_position(y);
    }

    fn emit_scroll_end(&mut self, position: Point) {
        self.set_pointer_events(true);
        self.hooks.trigger(SCROLL_END, &ScrollEvent::Position(position));
    }

    fn set_pointer_events(&mut self, enabled: bool) {
        if self.pointer_events != enabled {
            self.pointer_events = enabled;
            self.surface.set_pointer_events(enabled);
        }
    }
}

impl<S: Surface + core::fmt::Debug> core::fmt::Debug for Scroller<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scroller")
            .field("surface", &self.surface)
            .field("phase", &self.phase)
            .field("position", &self.position())
            .field("enabled", &self.enabled)
            .field("backend", &self.animator.backend())
            .field("pending", &self.animator.pending())
            .finish_non_exhaustive()
    }
}
