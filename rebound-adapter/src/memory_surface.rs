use rebound::{
    BindTarget, Capabilities, Easing, ElementId, InputClass, Rect, Size, Surface, SyntheticClick, Transform,
    Viewport,
};

use crate::Tween;

/// An in-memory [`Surface`] with a manual clock.
///
/// Declarative transitions are simulated with a [`Tween`]: a `translate` issued while the
/// transition duration is non-zero animates from the currently rendered transform, and
/// [`MemorySurface::computed_transform`] samples it. [`MemorySurface::take_transition_end`]
/// reports completion the way a platform `transitionend` would.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    now_ms: u64,
    capabilities: Capabilities,
    wrapper: Rect,
    content: Rect,
    elements: Vec<(ElementId, Rect)>,
    viewport: Viewport,

    transform: Transform,
    transition_ms: u64,
    easing: Easing,
    tween: Option<Tween>,

    frame_requested: bool,
    clicks: Vec<SyntheticClick>,
    pointer_events: bool,
    bound: Vec<InputClass>,
    bind_target: Option<BindTarget>,
    writes: usize,
    layouts: usize,
}

impl MemorySurface {
    /// A wrapper of `wrapper` size at the page origin, with `content` inside it. The viewport
    /// defaults to the wrapper box.
    pub fn new(wrapper: Size, content: Size) -> Self {
        Self {
            now_ms: 0,
            capabilities: Capabilities::default(),
            wrapper: Rect::new(0.0, 0.0, wrapper.width, wrapper.height),
            content: Rect::new(0.0, 0.0, content.width, content.height),
            elements: Vec::new(),
            viewport: Viewport {
                width: wrapper.width,
                height: wrapper.height,
                scroll: rebound::Point::ZERO,
            },
            transform: Transform::default(),
            transition_ms: 0,
            easing: Easing::default(),
            tween: None,
            frame_requested: false,
            clicks: Vec::new(),
            pointer_events: true,
            bound: Vec::new(),
            bind_target: None,
            writes: 0,
            layouts: 0,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_element(mut self, element: ElementId, rect: Rect) -> Self {
        self.set_element(element, rect);
        self
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn set_now_ms(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    pub fn set_wrapper_size(&mut self, size: Size) {
        self.wrapper.width = size.width;
        self.wrapper.height = size.height;
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content.width = size.width;
        self.content.height = size.height;
    }

    pub fn set_element(&mut self, element: ElementId, rect: Rect) {
        match self.elements.iter_mut().find(|(id, _)| *id == element) {
            Some((_, r)) => *r = rect,
            None => self.elements.push((element, rect)),
        }
    }

    pub fn remove_element(&mut self, element: ElementId) {
        self.elements.retain(|(id, _)| *id != element);
    }

    /// The last transform written (the transition target while one is running).
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transition_ms(&self) -> u64 {
        self.transition_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn is_transitioning(&self) -> bool {
        self.tween.is_some()
    }

    /// Returns `true` once when the running transition has reached its end.
    pub fn take_transition_end(&mut self) -> bool {
        match &self.tween {
            Some(tween) if tween.is_done(self.now_ms) => {
                self.tween = None;
                true
            }
            _ => false,
        }
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn take_frame_request(&mut self) -> bool {
        core::mem::take(&mut self.frame_requested)
    }

    pub fn clicks(&self) -> &[SyntheticClick] {
        &self.clicks
    }

    pub fn take_clicks(&mut self) -> Vec<SyntheticClick> {
        core::mem::take(&mut self.clicks)
    }

    pub fn pointer_events(&self) -> bool {
        self.pointer_events
    }

    pub fn bound(&self) -> &[InputClass] {
        &self.bound
    }

    /// Where move/end primitives were last bound. `None` before the first bind.
    pub fn bind_target(&self) -> Option<BindTarget> {
        self.bind_target
    }

    /// Number of `translate` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn layouts(&self) -> usize {
        self.layouts
    }
}

impl Surface for MemorySurface {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn wrapper_rect(&self) -> Rect {
        self.wrapper
    }

    fn content_rect(&self) -> Rect {
        self.content
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.elements
            .iter()
            .find(|(id, _)| *id == element)
            .map(|(_, rect)| *rect)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn translate(&mut self, transform: &Transform) {
        self.writes += 1;
        if self.transition_ms == 0 {
            self.tween = None;
        } else {
            let now = self.now_ms;
            match &mut self.tween {
                Some(tween) => {
                    tween.retarget(now, transform.clone(), self.transition_ms, self.easing)
                }
                None => {
                    self.tween = Some(Tween::new(
                        self.transform.clone(),
                        transform.clone(),
                        now,
                        self.transition_ms,
                        self.easing,
                    ));
                }
            }
        }
        self.transform = transform.clone();
    }

    fn computed_transform(&self) -> Transform {
        match &self.tween {
            Some(tween) => tween.sample(self.now_ms),
            None => self.transform.clone(),
        }
    }

    fn set_transition_duration(&mut self, ms: u64) {
        self.transition_ms = ms;
    }

    fn set_transition_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    fn force_layout(&mut self) {
        self.layouts += 1;
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_requested = false;
    }

    fn dispatch_click(&mut self, click: SyntheticClick) {
        self.clicks.push(click);
    }

    fn set_pointer_events(&mut self, enabled: bool) {
        self.pointer_events = enabled;
    }

    fn bind_input(&mut self, class: InputClass, target: BindTarget) {
        self.bind_target = Some(target);
        if !self.bound.contains(&class) {
            self.bound.push(class);
        }
    }

    fn unbind_input(&mut self, class: InputClass) {
        self.bound.retain(|c| *c != class);
    }
}
