use alloc::rc::Rc;

use crate::options::ScrollOptions;
use crate::{Axis, Direction};

/// Extents an axis is refreshed from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisGeometry {
    pub wrapper_extent: f64,
    pub content_extent: f64,
    /// Offset of the content's resting origin inside the wrapper.
    pub relative_offset: f64,
}

/// A momentum projection computed when a drag ends.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Momentum {
    /// `None` when the gesture does not qualify for momentum.
    pub destination: Option<f64>,
    pub duration: u64,
    /// The projection was clamped at an edge; the motion should use the swipe-bounce curve.
    pub bounced: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    /// The nearest in-bound position (equal to the current position when in bounds).
    pub position: f64,
    pub in_boundary: bool,
}

/// Per-axis kinematics: position, bounds, rubber band and momentum projection.
///
/// Positions follow the transform convention: the home edge sits at `min_bound` (usually 0)
/// and scrolling towards the far edge makes the position more negative, down to `max_bound`.
#[derive(Clone, Debug)]
pub struct AxisModel {
    axis: Axis,
    options: Rc<ScrollOptions>,
    scrollable: bool,
    /// `[home edge, far edge]`.
    bounces: [bool; 2],

    position: f64,
    start_position: f64,
    abs_start_position: f64,
    dist: f64,
    min_bound: f64,
    max_bound: f64,
    has_overflow: bool,
    direction: Direction,
    moving_direction: Direction,

    wrapper_extent: f64,
    content_extent: f64,
    relative_offset: f64,
}

impl AxisModel {
    pub fn new(axis: Axis, options: Rc<ScrollOptions>) -> Self {
        let (scrollable, bounces) = match axis {
            Axis::Horizontal => (
                options.scroll_x,
                [options.bounce.left, options.bounce.right],
            ),
            Axis::Vertical => (
                options.scroll_y,
                [options.bounce.top, options.bounce.bottom],
            ),
        };
        Self {
            axis,
            options,
            scrollable,
            bounces,
            position: 0.0,
            start_position: 0.0,
            abs_start_position: 0.0,
            dist: 0.0,
            min_bound: 0.0,
            max_bound: 0.0,
            has_overflow: false,
            direction: Direction::None,
            moving_direction: Direction::None,
            wrapper_extent: 0.0,
            content_extent: 0.0,
            relative_offset: 0.0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn start_position(&self) -> f64 {
        self.start_position
    }

    pub fn abs_start_position(&self) -> f64 {
        self.abs_start_position
    }

    pub fn min_bound(&self) -> f64 {
        self.min_bound
    }

    pub fn max_bound(&self) -> f64 {
        self.max_bound
    }

    pub fn has_overflow(&self) -> bool {
        self.has_overflow
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn moving_direction(&self) -> Direction {
        self.moving_direction
    }

    pub fn wrapper_extent(&self) -> f64 {
        self.wrapper_extent
    }

    pub fn content_extent(&self) -> f64 {
        self.content_extent
    }

    pub fn relative_offset(&self) -> f64 {
        self.relative_offset
    }

    /// The largest rubber-band excursion past either edge.
    pub fn overshoot_cap(&self) -> f64 {
        (self.options.overshoot_ratio * self.wrapper_extent).max(0.0)
    }

    pub fn start(&mut self) {
        self.dist = 0.0;
        self.direction = Direction::None;
        self.moving_direction = Direction::None;
    }

    pub fn reset_start_pos(&mut self) {
        self.start_position = self.position;
        self.abs_start_position = self.position;
    }

    pub fn update_start_pos(&mut self) {
        self.start_position = self.position;
    }

    /// Accumulates `delta` into the gesture distance and returns its absolute value.
    pub fn abs_dist(&mut self, delta: f64) -> f64 {
        self.dist += delta;
        self.dist.abs()
    }

    pub fn update_position(&mut self, position: f64) {
        self.position = position;
    }

    pub fn update_direction(&mut self) {
        self.direction = Direction::of_delta(self.position - self.abs_start_position);
    }

    /// Applies a drag delta and returns the new position.
    pub fn move_by(&mut self, delta: f64) -> f64 {
        let delta = if self.has_overflow { delta } else { 0.0 };
        self.moving_direction = Direction::of_delta(delta);

        let candidate = self.position + delta;
        self.position = if candidate > self.min_bound {
            self.past_edge(candidate, delta, 0)
        } else if candidate < self.max_bound {
            self.past_edge(candidate, delta, 1)
        } else {
            candidate
        };
        self.position
    }

    /// Resolves a candidate beyond the home (`edge == 0`) or far (`edge == 1`) bound.
    fn past_edge(&self, candidate: f64, delta: f64, edge: usize) -> f64 {
        // Work in "outward distance" so both edges share one formula.
        let (bound, sign) = if edge == 0 {
            (self.min_bound, 1.0)
        } else {
            (self.max_bound, -1.0)
        };
        let cap = self.overshoot_cap();
        if !self.bounces[edge] || cap <= 0.0 {
            return bound;
        }

        let outward = delta * sign > 0.0;
        if !outward {
            return candidate;
        }

        let overshoot = ((self.position - bound) * sign).max(0.0);
        let from = if overshoot > 0.0 { self.position } else { bound };
        let excess = (candidate - from) * sign;
        let grown = overshoot + excess / 3.0 * (1.0 - overshoot / cap).max(0.0);
        let next = grown.min(cap.max(overshoot));
        bound + next * sign
    }

    /// Projects momentum for a gesture that lasted `duration` ms since the interval start.
    pub fn end(&self, duration: u64) -> Momentum {
        let opts = &self.options;
        let moved = self.position - self.start_position;

        let qualifies = opts.momentum
            && self.has_overflow
            && duration < opts.momentum_limit_time
            && moved.abs() > opts.momentum_limit_distance
            && opts.deceleration > 0.0;
        if !qualifies {
            return Momentum::default();
        }

        let speed = moved.abs() / duration.max(1) as f64;
        let travel = speed * speed / (2.0 * opts.deceleration);
        let mut destination = self.position + travel * moved.signum();
        let mut time = (speed / opts.deceleration).min(opts.swipe_time as f64);
        let mut bounced = false;

        if destination > self.min_bound {
            destination = self.min_bound;
            time = opts.swipe_bounce_time as f64;
            bounced = true;
        } else if destination < self.max_bound {
            destination = self.max_bound;
            time = opts.swipe_bounce_time as f64;
            bounced = true;
        }

        rtrace!(
            axis = ?self.axis,
            speed,
            destination,
            time,
            bounced,
            "AxisModel: momentum"
        );
        Momentum {
            destination: Some(destination.round()),
            duration: time.round() as u64,
            bounced,
        }
    }

    pub fn check_in_boundary(&self) -> Boundary {
        let position = self.position.clamp(self.max_bound, self.min_bound);
        Boundary {
            position,
            in_boundary: position == self.position,
        }
    }

    /// Rounds `candidate` and clamps it into bounds; without overflow, the home edge.
    pub fn adjust_position(&self, candidate: f64) -> f64 {
        if !self.has_overflow {
            return self.min_bound;
        }
        candidate.round().clamp(self.max_bound, self.min_bound)
    }

    pub fn refresh(&mut self, geometry: AxisGeometry) {
        self.wrapper_extent = geometry.wrapper_extent;
        self.content_extent = geometry.content_extent;
        self.relative_offset = geometry.relative_offset;

        let degenerate = !(geometry.wrapper_extent > 0.0 && geometry.content_extent > 0.0);
        self.min_bound = 0.0;
        self.max_bound = if degenerate {
            0.0
        } else {
            geometry.wrapper_extent - geometry.content_extent
        };
        if self.max_bound < 0.0 {
            self.max_bound -= geometry.relative_offset;
        }

        self.has_overflow = self.scrollable && !degenerate && self.max_bound < self.min_bound;
        if !self.has_overflow {
            self.max_bound = self.min_bound;
            if !degenerate {
                self.content_extent = self.wrapper_extent;
            }
        }
        self.direction = Direction::None;

        rdebug!(
            axis = ?self.axis,
            min_bound = self.min_bound,
            max_bound = self.max_bound,
            has_overflow = self.has_overflow,
            "AxisModel: refresh"
        );
    }
}
