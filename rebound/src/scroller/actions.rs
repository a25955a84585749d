//! The gesture lifecycle: start, move, end, click detection and settling.

use super::{
    BEFORE_END, BEFORE_MOVE, BEFORE_SCROLL_START, BEFORE_START, END, FLICK, MOMENTUM,
    MomentumPlan, SCROLL, SCROLL_CANCEL, SCROLL_START, START, ScrollEvent, Scroller, TOUCH_END,
};
use crate::direction_lock::HostAction;
use crate::easing::Easing;
use crate::options::Probe;
use crate::surface::{ClickKind, Surface, SyntheticClick};
use crate::{InputResponse, Phase, Point, PointerEvent, Transform};

impl<S: Surface> Scroller<S> {
    pub(super) fn pointer_start(&mut self, event: &PointerEvent, response: &mut InputResponse) {
        if !self.normalizer.start(event, response) {
            return;
        }
        if !self.enabled {
            self.normalizer.release();
            return;
        }
        let payload = ScrollEvent::Pointer(event.clone());
        if self.hooks.trigger(BEFORE_START, &payload).is_veto() {
            self.normalizer.release();
            return;
        }

        self.moved = false;
        self.start_time = self.surface.now_ms();
        self.held_delta = Point::ZERO;
        self.lock.reset();
        self.axis_x.start();
        self.axis_y.start();

        let was_pending = self.animator.pending();
        let frozen = self.animator.stop(&mut self.surface);
        if was_pending {
            self.sync_axes();
        }
        if let Some(frozen) = frozen {
            rdebug!(at = ?frozen.point(), "Scroller: motion interrupted by a new gesture");
            self.emit_scroll_end(frozen.point());
        }

        self.axis_x.reset_start_pos();
        self.axis_y.reset_start_pos();
        self.phase = Phase::Tracking;

        rdebug!(page = ?event.page, class = ?event.class, "Scroller: gesture start");
        self.hooks.trigger(START, &payload);
        self.hooks.trigger(BEFORE_SCROLL_START, &payload);
    }

    pub(super) fn pointer_move(&mut self, event: &PointerEvent, response: &mut InputResponse) {
        if let Some(delta) = self.normalizer.move_to(event, response) {
            if self.enabled {
                self.drag(delta, event, response);
            }
        }

        if self.normalizer.initiated() == Some(event.class)
            && self.normalizer.reached_edge(self.surface.viewport())
        {
            rdebug!(page = ?event.page, "Scroller: pointer reached the viewport edge");
            self.pointer_end(event, response);
        }
    }

    fn drag(&mut self, delta: Point, event: &PointerEvent, response: &mut InputResponse) {
        if self
            .hooks
            .trigger(BEFORE_MOVE, &ScrollEvent::Pointer(event.clone()))
            .is_veto()
        {
            return;
        }

        let abs_x = self.axis_x.abs_dist(delta.x);
        let abs_y = self.axis_y.abs_dist(delta.y);
        let now = self.surface.now_ms();

        self.held_delta.x += delta.x;
        self.held_delta.y += delta.y;
        if self.is_jitter(abs_x, abs_y, now) {
            rtrace!(abs_x, abs_y, "Scroller: held back as jitter");
            return;
        }

        match self.lock.check_moving_direction(abs_x, abs_y) {
            HostAction::Yield => {
                rdebug!(lock = ?self.lock.state(), "Scroller: gesture yielded to the host");
                self.normalizer.release();
                self.held_delta = Point::ZERO;
                self.phase = Phase::Idle;
                return;
            }
            HostAction::Suppress => response.prevent_default = true,
            HostAction::Scroll => {}
        }

        let held = core::mem::replace(&mut self.held_delta, Point::ZERO);
        let (dx, dy) = self.lock.adjust_delta(held.x, held.y);
        let x = self.axis_x.move_by(dx);
        let y = self.axis_y.move_by(dy);

        if !self.moved {
            self.moved = true;
            self.phase = Phase::Dragging;
            self.hooks.trigger(SCROLL_START, &ScrollEvent::None);
        }

        rtrace!(x, y, "Scroller: drag");
        self.animator
            .translate(&Transform::new(x, y), &mut self.surface);
        self.set_pointer_events(false);
        self.dispatch_scroll(now);
    }

    /// Samples that arrive long after the previous gesture and have not travelled far yet.
    fn is_jitter(&self, abs_x: f64, abs_y: f64, now: u64) -> bool {
        let idle = self
            .end_time
            .is_none_or(|end| now.saturating_sub(end) > self.options.momentum_limit_time);
        idle && abs_x < self.options.momentum_limit_distance
            && abs_y < self.options.momentum_limit_distance
    }

    fn dispatch_scroll(&mut self, now: u64) {
        if now.saturating_sub(self.start_time) > self.options.momentum_limit_time {
            self.start_time = now;
            self.axis_x.update_start_pos();
            self.axis_y.update_start_pos();
            if self.options.probe == Probe::Throttled {
                self.hooks
                    .trigger(SCROLL, &ScrollEvent::Position(self.position()));
            }
        }
        if self.options.probe == Probe::Continuous {
            self.hooks
                .trigger(SCROLL, &ScrollEvent::Position(self.position()));
        }
    }

    pub(super) fn pointer_end(&mut self, event: &PointerEvent, response: &mut InputResponse) {
        if !self.normalizer.end(event, response) || !self.enabled {
            return;
        }
        if self
            .hooks
            .trigger(BEFORE_END, &ScrollEvent::Pointer(event.clone()))
            .is_veto()
        {
            return;
        }

        let position = self.position();
        self.axis_x.update_direction();
        self.axis_y.update_direction();

        self.hooks
            .trigger(TOUCH_END, &ScrollEvent::Position(position));
        if self
            .hooks
            .trigger(END, &ScrollEvent::Position(position))
            .is_veto()
        {
            return;
        }

        if !self.moved && self.check_click(event) {
            self.animator.set_force_stopped(false);
            self.phase = Phase::Idle;
            self.hooks.trigger(SCROLL_CANCEL, &ScrollEvent::None);
            return;
        }
        self.animator.set_force_stopped(false);

        if self.reset_position(self.options.bounce_time, Some(Easing::Bounce)) {
            return;
        }

        self.animator
            .translate(&Transform::from_point(position), &mut self.surface);
        let now = self.surface.now_ms();
        self.end_time = Some(now);
        let duration = now.saturating_sub(self.start_time);

        rdebug!(?position, duration, moved = self.moved, "Scroller: gesture end");
        self.settle(position, duration);
    }

    /// Decides what happens after a released drag: flick, momentum or rest.
    fn settle(&mut self, position: Point, duration: u64) {
        let opts = &self.options;
        let dx = (position.x - self.axis_x.start_position()).abs();
        let dy = (position.y - self.axis_y.start_position()).abs();

        if self.hooks.listener_count(FLICK) >= 1
            && duration < opts.flick_limit_time
            && dx < opts.flick_limit_distance
            && dy < opts.flick_limit_distance
        {
            rdebug!(duration, dx, dy, "Scroller: flick");
            self.phase = Phase::Idle;
            self.set_pointer_events(true);
            self.hooks.trigger(FLICK, &ScrollEvent::None);
            return;
        }

        if self.momentum(position, duration) {
            return;
        }

        self.phase = Phase::Idle;
        self.emit_scroll_end(position);
    }

    fn momentum(&mut self, position: Point, duration: u64) -> bool {
        let mx = self.axis_x.end(duration);
        let my = self.axis_y.end(duration);

        let plan = MomentumPlan {
            x: mx.destination.unwrap_or(position.x),
            y: my.destination.unwrap_or(position.y),
            duration: mx.duration.max(my.duration),
            easing: if mx.bounced || my.bounced {
                Easing::SwipeBounce
            } else {
                Easing::Swipe
            },
        };
        if plan.x == position.x && plan.y == position.y {
            return false;
        }
        if self
            .hooks
            .trigger(MOMENTUM, &ScrollEvent::Momentum(plan))
            .is_veto()
        {
            rdebug!("Scroller: momentum vetoed");
            return false;
        }

        rdebug!(?plan, "Scroller: momentum");
        self.animate_to(
            Transform::new(plan.x, plan.y),
            &[],
            plan.duration,
            plan.easing,
            false,
            Phase::Momentum,
        );
        true
    }

    /// Synthesizes clicks for an unmoved gesture. Returns `false` when the gesture stopped a
    /// motion in flight, which is never a click.
    fn check_click(&mut self, event: &PointerEvent) -> bool {
        if self.animator.force_stopped() {
            return false;
        }
        let now = self.surface.now_ms();
        let click = |kind| SyntheticClick {
            kind,
            target: event.target.id,
            point: event.page,
        };

        let double = match (self.options.dblclick, self.last_click) {
            (Some(config), Some(last)) => now.saturating_sub(last) < config.delay_ms,
            _ => false,
        };
        if double {
            self.surface.dispatch_click(click(ClickKind::DoubleClick));
        }
        if let Some(tap) = &self.options.tap {
            self.surface.dispatch_click(click(ClickKind::Tap(tap.clone())));
        }
        if self.options.click
            && !double
            && !self.options.prevent_default_exception.matches(&event.target)
        {
            self.surface.dispatch_click(click(ClickKind::Click));
        }

        self.last_click = if double { None } else { Some(now) };
        true
    }

    /// Native clicks reaching the content are swallowed unless they target an exception.
    pub(super) fn pointer_click(&mut self, event: &PointerEvent, response: &mut InputResponse) {
        if !self.options.click || !self.normalizer.click(event) {
            return;
        }
        if self.enabled && !self.options.prevent_default_exception.matches(&event.target) {
            response.prevent_default = true;
            response.stop_propagation = true;
        }
    }
}
