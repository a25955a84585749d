use super::{Playback, Progress};
use crate::easing::Easing;
use crate::options::Probe;
use crate::surface::Surface;
use crate::Transform;

/// Declarative playback: the platform runs the transition; with continuous probing the
/// rendered transform is polled every frame until the transition completes.
#[derive(Debug)]
pub struct Timeline {
    pub(crate) playback: Playback,
}

impl Timeline {
    pub(crate) fn new(probe: Probe) -> Self {
        Self {
            playback: Playback::new(probe),
        }
    }

    pub(crate) fn transition_time<S: Surface + ?Sized>(&mut self, ms: u64, surface: &mut S) {
        surface.set_transition_duration(ms);
    }

    pub(crate) fn move_to<S: Surface + ?Sized>(
        &mut self,
        start: &Transform,
        end: &Transform,
        duration: u64,
        easing: Easing,
        silent: bool,
        surface: &mut S,
    ) -> Progress {
        self.playback.pending = duration > 0 && (start.x != end.x || start.y != end.y);
        surface.set_transition_easing(easing);
        self.transition_time(duration, surface);

        if duration == 0 {
            self.playback.cancel(surface);
            return self.playback.jump(end, silent, surface);
        }

        self.playback.translate(end, surface);
        if self.playback.probe == Probe::Continuous {
            self.playback.cancel(surface);
            self.playback.schedule(surface);
        }
        Progress::default()
    }

    /// One probe poll.
    pub(crate) fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Progress {
        let mut progress = Progress::default();
        if !self.playback.frame_scheduled {
            return progress;
        }
        self.playback.frame_scheduled = false;

        let rendered = surface.computed_transform();
        self.playback.report_move(&rendered, &mut progress);
        if !self.playback.pending {
            self.playback.report_end(&rendered, &mut progress);
            return progress;
        }
        self.playback.schedule(surface);
        progress
    }

    pub(crate) fn stop<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<Transform> {
        if !self.playback.pending {
            return None;
        }
        self.playback.pending = false;
        self.playback.cancel(surface);

        let frozen = surface.computed_transform();
        self.transition_time(0, surface);
        self.playback.translate(&frozen, surface);
        self.playback.force_stop(frozen)
    }
}
