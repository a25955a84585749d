use crate::options::Passthrough;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockState {
    #[default]
    Undecided,
    Horizontal,
    Vertical,
    /// Both axes move.
    Unlocked,
}

/// What the adapter should do with the host's native behaviour for the current move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostAction {
    /// Scroll normally.
    Scroll,
    /// The gesture belongs to the host: release the session and stop consuming input.
    Yield,
    /// Keep the gesture and prevent the host default (the lock is perpendicular to the
    /// passthrough axis).
    Suppress,
}

/// Decides, once per gesture, whether the gesture is horizontal, vertical or free.
#[derive(Clone, Debug)]
pub struct DirectionLock {
    threshold: f64,
    free_scroll: bool,
    passthrough: Passthrough,
    state: LockState,
}

impl DirectionLock {
    pub fn new(threshold: f64, free_scroll: bool, passthrough: Passthrough) -> Self {
        Self {
            threshold,
            free_scroll,
            passthrough,
            state: LockState::Undecided,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = LockState::Undecided;
    }

    pub fn check_moving_direction(&mut self, abs_x: f64, abs_y: f64) -> HostAction {
        self.compute(abs_x, abs_y);

        let (own, other) = match self.state {
            LockState::Horizontal => (Passthrough::Horizontal, Passthrough::Vertical),
            LockState::Vertical => (Passthrough::Vertical, Passthrough::Horizontal),
            LockState::Undecided | LockState::Unlocked => return HostAction::Scroll,
        };
        if self.passthrough == own {
            HostAction::Yield
        } else if self.passthrough == other {
            HostAction::Suppress
        } else {
            HostAction::Scroll
        }
    }

    fn compute(&mut self, abs_x: f64, abs_y: f64) {
        if self.free_scroll {
            self.state = LockState::Unlocked;
            return;
        }
        if self.state != LockState::Undecided {
            return;
        }
        self.state = if abs_x > abs_y + self.threshold {
            LockState::Horizontal
        } else if abs_y >= abs_x + self.threshold {
            LockState::Vertical
        } else {
            LockState::Unlocked
        };
        rtrace!(state = ?self.state, abs_x, abs_y, "DirectionLock: decided");
    }

    /// Zeroes the component perpendicular to a locked axis.
    pub fn adjust_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        match self.state {
            LockState::Horizontal => (dx, 0.0),
            LockState::Vertical => (0.0, dy),
            LockState::Undecided | LockState::Unlocked => (dx, dy),
        }
    }
}
