use super::{Playback, Progress};
use crate::easing::Easing;
use crate::options::Probe;
use crate::surface::Surface;
use crate::Transform;

#[derive(Clone, Debug)]
struct Task {
    start: Transform,
    end: Transform,
    duration: u64,
    easing: Easing,
    started_ms: u64,
}

impl Task {
    fn sample(&self, now_ms: u64) -> Transform {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        let t = elapsed as f64 / self.duration.max(1) as f64;
        self.start.lerp(&self.end, self.easing.sample(t))
    }

    fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= self.duration
    }
}

/// Frame-by-frame playback: each frame samples the easing and writes the interpolated
/// transform.
#[derive(Debug)]
pub struct Interpolated {
    pub(crate) playback: Playback,
    task: Option<Task>,
}

impl Interpolated {
    pub(crate) fn new(probe: Probe) -> Self {
        Self {
            playback: Playback::new(probe),
            task: None,
        }
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
        self.playback.cancel(surface);
        if duration == 0 {
            self.task = None;
            self.playback.pending = false;
            return self.playback.jump(end, silent, surface);
        }

        self.task = Some(Task {
            start: start.clone(),
            end: end.clone(),
            duration,
            easing,
            started_ms: surface.now_ms(),
        });
        self.playback.pending = true;
        self.step(surface)
    }

    pub(crate) fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Progress {
        self.playback.frame_scheduled = false;
        if !self.playback.pending {
            return Progress::default();
        }
        self.step(surface)
    }

    fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Progress {
        let mut progress = Progress::default();
        let Some(task) = self.task.as_ref() else {
            return progress;
        };
        let now = surface.now_ms();

        if task.is_done(now) {
            let end = task.end.clone();
            self.task = None;
            self.playback.pending = false;
            self.playback.translate(&end, surface);
            self.playback.report_move(&end, &mut progress);
            self.playback.report_end(&end, &mut progress);
            return progress;
        }

        let sample = task.sample(now);
        self.playback.translate(&sample, surface);
        self.playback.schedule(surface);
        if self.playback.probe == Probe::Continuous {
            self.playback.report_move(&sample, &mut progress);
        }
        progress
    }

    pub(crate) fn stop<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<Transform> {
        if !self.playback.pending {
            return None;
        }
        self.playback.pending = false;
        self.playback.cancel(surface);
        self.task = None;

        let frozen = surface.computed_transform();
        self.playback.current = frozen.clone();
        self.playback.force_stop(frozen)
    }
}
