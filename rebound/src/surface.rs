use alloc::string::String;

use crate::easing::Easing;
use crate::{ElementId, InputClass, Point, Rect, Transform, Viewport};

/// What the platform can do; consulted once when options are processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    /// Touch input exists.
    pub touch: bool,
    /// Declarative transitions (duration + timing function) are available.
    pub transition: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            touch: true,
            transition: true,
        }
    }
}

/// Where an adapter listens for the move and end primitives of a session.
///
/// Start primitives always come from the wrapper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindTarget {
    /// The whole page, so a drag keeps tracking after the pointer leaves the wrapper.
    #[default]
    Page,
    Wrapper,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClickKind {
    Click,
    DoubleClick,
    /// A custom tap event with the configured name.
    Tap(String),
}

/// A click the engine asks the platform to dispatch on its behalf.
///
/// Adapters mark the resulting native event as synthetic when forwarding it back, so the
/// engine does not swallow its own clicks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntheticClick {
    pub kind: ClickKind,
    pub target: ElementId,
    pub point: Point,
}

/// The platform adapter the engine renders through.
///
/// Geometry is reported in page coordinates. `wrapper_rect`/`element_rect` `x`/`y` are
/// cumulative offsets of the element from the page origin (positive numbers), as
/// `scroll_to_element` expects.
pub trait Surface {
    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> u64;

    fn capabilities(&self) -> Capabilities;

    fn wrapper_rect(&self) -> Rect;

    /// Content box; `x`/`y` are the content's offset inside the wrapper at rest.
    fn content_rect(&self) -> Rect;

    /// Layout offset of `element`, ignoring the content transform. `None` for unknown ids.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    /// Writes the content transform.
    fn translate(&mut self, transform: &Transform);

    /// The transform currently rendered, which differs from the last `translate` while a
    /// declarative transition is running.
    fn computed_transform(&self) -> Transform;

    fn set_transition_duration(&mut self, ms: u64);

    fn set_transition_easing(&mut self, easing: Easing);

    /// Flushes pending style writes (a forced layout read on real platforms).
    fn force_layout(&mut self);

    /// Asks for [`crate::Scroller::tick`] to be called on the next frame.
    fn request_frame(&mut self);

    fn cancel_frame(&mut self);

    fn dispatch_click(&mut self, click: SyntheticClick);

    /// Enables or disables pointer events on the content while it moves.
    fn set_pointer_events(&mut self, _enabled: bool) {}

    fn bind_input(&mut self, _class: InputClass, _target: BindTarget) {}

    fn unbind_input(&mut self, _class: InputClass) {}
}
