//! Motion playback with two interchangeable backends.
//!
//! [`Animator::Interpolated`] computes every frame itself and writes the interpolated transform;
//! [`Animator::Timeline`] hands duration and timing function to the platform, writes the end
//! transform once, and learns about completion from [`crate::Scroller::transition_end`].
//!
//! Both report progress twice: through their `HookBus<Transform>` for external listeners, and
//! through the returned [`Progress`] for the coordinator.

mod interpolated;
mod timeline;

pub use interpolated::Interpolated;
pub use timeline::Timeline;

use crate::easing::Easing;
use crate::hooks::HookBus;
use crate::options::Probe;
use crate::surface::Surface;
use crate::Transform;

pub const MOVE: &str = "move";
pub const END: &str = "end";
pub const BEFORE_FORCE_STOP: &str = "beforeForceStop";
pub const FORCE_STOP: &str = "forceStop";

pub const EVENT_NAMES: &[&str] = &[MOVE, END, BEFORE_FORCE_STOP, FORCE_STOP];

/// What one animator call produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Progress {
    pub moved: Option<Transform>,
    pub ended: Option<Transform>,
}

impl Progress {
    pub fn is_empty(&self) -> bool {
        self.moved.is_none() && self.ended.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Backend {
    Interpolated,
    Timeline,
}

/// State shared by both backends.
#[derive(Debug)]
pub(crate) struct Playback {
    pub(crate) pending: bool,
    pub(crate) force_stopped: bool,
    pub(crate) current: Transform,
    pub(crate) frame_scheduled: bool,
    pub(crate) probe: Probe,
    pub(crate) hooks: HookBus<Transform>,
}

impl Playback {
    fn new(probe: Probe) -> Self {
        Self {
            pending: false,
            force_stopped: false,
            current: Transform::default(),
            frame_scheduled: false,
            probe,
            hooks: HookBus::new(EVENT_NAMES),
        }
    }

    pub(crate) fn translate<S: Surface + ?Sized>(&mut self, transform: &Transform, surface: &mut S) {
        surface.translate(transform);
        self.current = transform.clone();
    }

    pub(crate) fn schedule<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.request_frame();
        self.frame_scheduled = true;
    }

    pub(crate) fn cancel<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.frame_scheduled {
            surface.cancel_frame();
            self.frame_scheduled = false;
        }
    }

    pub(crate) fn report_move(&self, transform: &Transform, progress: &mut Progress) {
        self.hooks.trigger(MOVE, transform);
        progress.moved = Some(transform.clone());
    }

    pub(crate) fn report_end(&self, transform: &Transform, progress: &mut Progress) {
        self.hooks.trigger(END, transform);
        progress.ended = Some(transform.clone());
    }

    /// Zero-duration motion: write, force a layout read, report unless silent.
    pub(crate) fn jump<S: Surface + ?Sized>(
        &mut self,
        end: &Transform,
        silent: bool,
        surface: &mut S,
    ) -> Progress {
        let mut progress = Progress::default();
        self.translate(end, surface);
        surface.force_layout();
        if !silent {
            self.report_move(end, &mut progress);
            self.report_end(end, &mut progress);
        }
        progress
    }

    /// Marks a freeze at `frozen` and asks the listeners whether to report it.
    pub(crate) fn force_stop(&mut self, frozen: Transform) -> Option<Transform> {
        self.force_stopped = true;
        if self.hooks.trigger(BEFORE_FORCE_STOP, &frozen).is_veto() {
            rdebug!("Animator: forceStop vetoed");
            return None;
        }
        self.hooks.trigger(FORCE_STOP, &frozen);
        Some(frozen)
    }
}

/// The animation engine; the backend is chosen once at construction.
#[derive(Debug)]
pub enum Animator {
    Interpolated(Interpolated),
    Timeline(Timeline),
}

impl Animator {
    pub fn new(backend: Backend, probe: Probe) -> Self {
        match backend {
            Backend::Interpolated => Self::Interpolated(Interpolated::new(probe)),
            Backend::Timeline => Self::Timeline(Timeline::new(probe)),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Self::Interpolated(_) => Backend::Interpolated,
            Self::Timeline(_) => Backend::Timeline,
        }
    }

    fn playback(&self) -> &Playback {
        match self {
            Self::Interpolated(a) => &a.playback,
            Self::Timeline(a) => &a.playback,
        }
    }

    fn playback_mut(&mut self) -> &mut Playback {
        match self {
            Self::Interpolated(a) => &mut a.playback,
            Self::Timeline(a) => &mut a.playback,
        }
    }

    pub fn hooks(&self) -> &HookBus<Transform> {
        &self.playback().hooks
    }

    /// True while a motion is in flight.
    pub fn pending(&self) -> bool {
        self.playback().pending
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.playback_mut().pending = pending;
    }

    /// True after [`Animator::stop`] interrupted a motion, until the coordinator clears it.
    pub fn force_stopped(&self) -> bool {
        self.playback().force_stopped
    }

    pub fn set_force_stopped(&mut self, force_stopped: bool) {
        self.playback_mut().force_stopped = force_stopped;
    }

    /// The last transform written to the surface.
    pub fn current(&self) -> &Transform {
        &self.playback().current
    }

    pub fn frame_scheduled(&self) -> bool {
        self.playback().frame_scheduled
    }

    /// Raw write used while dragging.
    pub fn translate<S: Surface + ?Sized>(&mut self, transform: &Transform, surface: &mut S) {
        self.playback_mut().translate(transform, surface);
    }

    pub fn move_to<S: Surface + ?Sized>(
        &mut self,
        start: &Transform,
        end: &Transform,
        duration: u64,
        easing: Easing,
        silent: bool,
        surface: &mut S,
    ) -> Progress {
        rtrace!(
            backend = ?self.backend(),
            from = ?start.point(),
            to = ?end.point(),
            duration,
            "Animator: move"
        );
        match self {
            Self::Interpolated(a) => a.move_to(start, end, duration, easing, silent, surface),
            Self::Timeline(a) => a.move_to(start, end, duration, easing, silent, surface),
        }
    }

    /// Runs one scheduled frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Progress {
        match self {
            Self::Interpolated(a) => a.frame(surface),
            Self::Timeline(a) => a.frame(surface),
        }
    }

    /// Halts the motion in flight and freezes the content where it is rendered.
    ///
    /// Idempotent. Returns the frozen transform when `forceStop` was reported.
    pub fn stop<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<Transform> {
        match self {
            Self::Interpolated(a) => a.stop(surface),
            Self::Timeline(a) => a.stop(surface),
        }
    }

    /// Sets the declarative transition duration; a no-op for the interpolated backend.
    pub fn transition_time<S: Surface + ?Sized>(&mut self, ms: u64, surface: &mut S) {
        if let Self::Timeline(a) = self {
            a.transition_time(ms, surface);
        }
    }

    /// Cancels any scheduled frame and clears the hook registry.
    pub fn destroy<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let playback = self.playback_mut();
        playback.cancel(surface);
        playback.pending = false;
        playback.hooks.destroy();
    }

    pub(crate) fn cancel_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.playback_mut().cancel(surface);
    }
}
