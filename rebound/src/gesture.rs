use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::hooks::HookBus;
use crate::options::ScrollOptions;
use crate::surface::{BindTarget, Surface};
use crate::{Button, InputClass, InputResponse, Point, PointerEvent, Viewport};

/// Payload of the normalizer's hook bus.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// A move sample with its delta against the previous sample.
    Move { delta: Point, event: PointerEvent },
}

impl InputEvent {
    pub fn pointer(&self) -> &PointerEvent {
        match self {
            Self::Pointer(event) | Self::Move { event, .. } => event,
        }
    }
}

pub const BEFORE_START: &str = "beforeStart";
pub const START: &str = "start";
pub const MOVE: &str = "move";
pub const END: &str = "end";
pub const CLICK: &str = "click";

pub const EVENT_NAMES: &[&str] = &[BEFORE_START, START, MOVE, END, CLICK];

/// Turns raw pointer primitives into one gesture session at a time.
///
/// A session is locked to the input class that started it: primitives of the other class are
/// ignored until the session ends.
#[derive(Debug)]
pub struct GestureNormalizer {
    options: Rc<ScrollOptions>,
    hooks: HookBus<InputEvent>,
    initiated: Option<InputClass>,
    point: Point,
    bound: Vec<InputClass>,
}

impl GestureNormalizer {
    pub fn new(options: Rc<ScrollOptions>) -> Self {
        Self {
            options,
            hooks: HookBus::new(EVENT_NAMES),
            initiated: None,
            point: Point::ZERO,
            bound: Vec::new(),
        }
    }

    pub fn hooks(&self) -> &HookBus<InputEvent> {
        &self.hooks
    }

    pub fn initiated(&self) -> Option<InputClass> {
        self.initiated
    }

    pub fn is_active(&self) -> bool {
        self.initiated.is_some()
    }

    /// The last page coordinate of the session.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Registers the enabled input classes with the surface.
    pub fn bind<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.unbind(surface);
        let target = self.bind_target();
        if surface.capabilities().touch && !self.options.touch_disabled() {
            surface.bind_input(InputClass::Touch, target);
            self.bound.push(InputClass::Touch);
        }
        if !self.options.mouse_disabled() {
            surface.bind_input(InputClass::Mouse, target);
            self.bound.push(InputClass::Mouse);
        }
        rdebug!(bound = ?self.bound, ?target, "GestureNormalizer: bind");
    }

    pub fn bind_target(&self) -> BindTarget {
        if self.options.bind_to_wrapper {
            BindTarget::Wrapper
        } else {
            BindTarget::Page
        }
    }

    pub fn unbind<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for class in self.bound.drain(..) {
            surface.unbind_input(class);
        }
    }

    pub fn bound(&self) -> &[InputClass] {
        &self.bound
    }

    fn apply_policy(&self, prevent: bool, response: &mut InputResponse) {
        if prevent {
            response.prevent_default = true;
        }
        if self.options.stop_propagation {
            response.stop_propagation = true;
        }
    }

    fn prevents(&self, event: &PointerEvent) -> bool {
        self.options.prevent_default && !self.options.prevent_default_exception.matches(&event.target)
    }

    /// Opens a session. Returns `true` when the session started.
    pub fn start(&mut self, event: &PointerEvent, response: &mut InputResponse) -> bool {
        if self.initiated.is_some_and(|c| c != event.class) {
            return false;
        }
        self.initiated = Some(event.class);

        if self.options.tag_exception.matches(&event.target) {
            self.initiated = None;
            return false;
        }
        if event.class == InputClass::Mouse && event.button != Button::Primary {
            self.initiated = None;
            return false;
        }

        let payload = InputEvent::Pointer(event.clone());
        if self.hooks.trigger(BEFORE_START, &payload).is_veto() {
            self.initiated = None;
            return false;
        }

        self.apply_policy(self.prevents(event), response);
        self.point = event.page;

        if self.hooks.trigger(START, &payload).is_veto() {
            rdebug!("GestureNormalizer: start vetoed; session aborted");
            self.initiated = None;
            return false;
        }
        true
    }

    /// Advances the session. Returns the delta against the previous sample unless the
    /// primitive does not belong to the session or a `move` listener vetoed it.
    pub fn move_to(&mut self, event: &PointerEvent, response: &mut InputResponse) -> Option<Point> {
        if self.initiated != Some(event.class) {
            return None;
        }
        self.apply_policy(self.options.prevent_default, response);

        let delta = Point::new(event.page.x - self.point.x, event.page.y - self.point.y);
        self.point = event.page;

        let payload = InputEvent::Move {
            delta,
            event: event.clone(),
        };
        if self.hooks.trigger(MOVE, &payload).is_veto() {
            return None;
        }
        Some(delta)
    }

    /// Whether the last sample lies within `momentum_limit_distance` of a viewport edge.
    pub fn reached_edge(&self, viewport: Viewport) -> bool {
        let margin = self.options.momentum_limit_distance;
        let x = self.point.x - viewport.scroll.x;
        let y = self.point.y - viewport.scroll.y;
        x > viewport.width - margin || x < margin || y < margin || y > viewport.height - margin
    }

    /// Closes the session. Returns `true` when the primitive ended the active session.
    pub fn end(&mut self, event: &PointerEvent, response: &mut InputResponse) -> bool {
        if self.initiated != Some(event.class) {
            return false;
        }
        self.initiated = None;
        self.apply_policy(self.prevents(event), response);
        self.hooks.trigger(END, &InputEvent::Pointer(event.clone()));
        true
    }

    /// Forwards a native click. Synthetic clicks are dropped.
    pub fn click(&self, event: &PointerEvent) -> bool {
        if event.synthetic {
            return false;
        }
        self.hooks.trigger(CLICK, &InputEvent::Pointer(event.clone()));
        true
    }

    /// Drops the session without an `end`; the host takes over the gesture.
    pub fn release(&mut self) {
        self.initiated = None;
    }

    pub fn destroy<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.unbind(surface);
        self.initiated = None;
        self.hooks.destroy();
    }
}
