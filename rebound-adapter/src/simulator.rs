use rebound::{
    InputClass, InputResponse, Point, PointerEvent, PointerPhase, ScrollOptions, Scroller, Size,
    Target,
};

use crate::MemorySurface;

/// One entry of a pointer script.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    /// Lifts the pointer where it last was.
    Up,
    Cancel,
    /// Down and up at the same point, without time passing.
    Tap { x: f64, y: f64 },
    /// Lets `ms` of frames run.
    Wait(u64),
    /// Changes the content size and notifies the scroller.
    Resize { width: f64, height: f64 },
}

/// Drives a [`Scroller`] over a [`MemorySurface`] the way a platform event loop would.
///
/// Time only moves through [`Simulator::advance`] (and [`Step::Wait`]). Each frame runs, in
/// order: transition completion, then `tick` when a frame was requested or a resize refresh
/// is armed.
#[derive(Debug)]
pub struct Simulator {
    scroller: Scroller<MemorySurface>,
    frame_ms: u64,
    class: InputClass,
    target: Target,
    pointer: Point,
}

impl Simulator {
    pub const FRAME_MS: u64 = 16;

    pub fn new(surface: MemorySurface, options: ScrollOptions) -> Self {
        Self::from_scroller(Scroller::new(surface, options))
    }

    pub fn from_scroller(scroller: Scroller<MemorySurface>) -> Self {
        Self {
            scroller,
            frame_ms: Self::FRAME_MS,
            class: InputClass::Touch,
            target: Target::default(),
            pointer: Point::ZERO,
        }
    }

    pub fn with_frame_ms(mut self, frame_ms: u64) -> Self {
        self.frame_ms = frame_ms.max(1);
        self
    }

    /// Input class used for scripted primitives.
    pub fn with_input_class(mut self, class: InputClass) -> Self {
        self.class = class;
        self
    }

    /// Target element reported with scripted primitives.
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn scroller(&self) -> &Scroller<MemorySurface> {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut Scroller<MemorySurface> {
        &mut self.scroller
    }

    pub fn into_scroller(self) -> Scroller<MemorySurface> {
        self.scroller
    }

    pub fn surface(&self) -> &MemorySurface {
        self.scroller.surface()
    }

    pub fn now_ms(&self) -> u64 {
        self.scroller.surface().now_ms()
    }

    pub fn position(&self) -> Point {
        self.scroller.position()
    }

    /// Forwards one primitive at the current time.
    pub fn pointer(&mut self, event: &PointerEvent) -> InputResponse {
        self.scroller.handle_pointer(event)
    }

    fn primitive(&mut self, phase: PointerPhase, at: Point) -> InputResponse {
        self.pointer = at;
        let event = PointerEvent::new(phase, self.class, at).with_target(self.target.clone());
        self.scroller.handle_pointer(&event)
    }

    pub fn down(&mut self, x: f64, y: f64) -> InputResponse {
        self.primitive(PointerPhase::Start, Point::new(x, y))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> InputResponse {
        self.primitive(PointerPhase::Move, Point::new(x, y))
    }

    pub fn up(&mut self) -> InputResponse {
        self.primitive(PointerPhase::End, self.pointer)
    }

    pub fn cancel(&mut self) -> InputResponse {
        self.primitive(PointerPhase::Cancel, self.pointer)
    }

    pub fn tap(&mut self, x: f64, y: f64) {
        self.down(x, y);
        self.up();
    }

    /// Drags from `from` to `to` in `samples` evenly spaced moves over `duration_ms`, then
    /// lifts the pointer.
    pub fn drag(&mut self, from: Point, to: Point, duration_ms: u64, samples: u32) {
        let samples = samples.max(1);
        self.down(from.x, from.y);
        let mut elapsed = 0;
        for i in 1..=samples {
            let t = f64::from(i) / f64::from(samples);
            let due = duration_ms * u64::from(i) / u64::from(samples);
            self.advance(due - elapsed);
            elapsed = due;
            self.move_to(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        }
        self.up();
    }

    /// Lets `ms` of time pass frame by frame.
    pub fn advance(&mut self, ms: u64) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(self.frame_ms);
            self.scroller.surface_mut().advance(step);
            remaining -= step;
            self.frame();
        }
    }

    fn frame(&mut self) {
        if self.scroller.surface_mut().take_transition_end() {
            self.scroller.transition_end();
        }
        let requested = self.scroller.surface_mut().take_frame_request();
        if requested || self.scroller.resize_pending() {
            self.scroller.tick();
        }
    }

    fn is_idle(&self) -> bool {
        let surface = self.scroller.surface();
        !self.scroller.is_animating()
            && !surface.is_transitioning()
            && !surface.frame_requested()
            && !self.scroller.resize_pending()
    }

    /// Runs frames until nothing is in flight or `max_ms` elapsed. Returns whether the
    /// scroller came to rest.
    pub fn run_until_idle(&mut self, max_ms: u64) -> bool {
        let mut elapsed = 0;
        while !self.is_idle() {
            if elapsed >= max_ms {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "rebound_adapter",
                    max_ms,
                    position = ?self.scroller.position(),
                    "Simulator: still moving after the frame budget"
                );
                return false;
            }
            self.advance(self.frame_ms);
            elapsed += self.frame_ms;
        }
        true
    }

    pub fn resize(&mut self, content: Size) {
        self.scroller.surface_mut().set_content_size(content);
        self.scroller.on_resize();
    }

    /// Replays `script`, returning the response to every forwarded primitive.
    pub fn play(&mut self, script: &[Step]) -> Vec<InputResponse> {
        let mut responses = Vec::new();
        for step in script {
            match *step {
                Step::Down { x, y } => responses.push(self.down(x, y)),
                Step::Move { x, y } => responses.push(self.move_to(x, y)),
                Step::Up => responses.push(self.up()),
                Step::Cancel => responses.push(self.cancel()),
                Step::Tap { x, y } => {
                    responses.push(self.down(x, y));
                    responses.push(self.up());
                }
                Step::Wait(ms) => self.advance(ms),
                Step::Resize { width, height } => self.resize(Size::new(width, height)),
            }
        }
        responses
    }
}
