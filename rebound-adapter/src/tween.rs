use rebound::{Easing, Transform};

/// A transform tween used to stand in for a platform transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: Transform,
    pub to: Transform,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Transform, to: Transform, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> Transform {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = elapsed as f64 / self.duration_ms as f64;
        self.from.lerp(&self.to, self.easing.sample(t))
    }

    /// Restarts from the value rendered at `now_ms` towards `new_to`.
    pub fn retarget(&mut self, now_ms: u64, new_to: Transform, duration_ms: u64, easing: Easing) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, easing);
    }
}
