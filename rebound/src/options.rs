use alloc::string::String;
use alloc::vec::Vec;

use crate::Target;
use crate::surface::Capabilities;

/// Scroll-position event cadence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Probe {
    /// No `scroll` events while dragging or animating.
    #[default]
    Disabled,
    /// At most one `scroll` per `momentum_limit_time` while dragging.
    Throttled,
    /// A `scroll` for every drag sample and every animation frame.
    Continuous,
}

/// The axis left to the host's native scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passthrough {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Per-edge rebound switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BounceConfig {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl BounceConfig {
    pub const ALL: Self = Self::uniform(true);
    pub const NONE: Self = Self::uniform(false);

    pub const fn uniform(enabled: bool) -> Self {
        Self {
            top: enabled,
            bottom: enabled,
            left: enabled,
            right: enabled,
        }
    }
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DblclickConfig {
    /// Maximum gap between two taps, in milliseconds.
    pub delay_ms: u64,
}

impl Default for DblclickConfig {
    fn default() -> Self {
        Self { delay_ms: 300 }
    }
}

/// Matches pointer targets by tag name or class name (ASCII case-insensitive).
///
/// An empty matcher matches nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementException {
    pub tag_names: Vec<String>,
    pub class_names: Vec<String>,
}

impl ElementException {
    pub fn tags(tags: &[&str]) -> Self {
        Self {
            tag_names: tags.iter().map(|t| String::from(*t)).collect(),
            class_names: Vec::new(),
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_names.push(class_name.into());
        self
    }

    pub fn matches(&self, target: &Target) -> bool {
        let tag = self
            .tag_names
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&target.tag_name));
        let class = || {
            target.class_name.split_ascii_whitespace().any(|c| {
                self.class_names
                    .iter()
                    .any(|want| want.eq_ignore_ascii_case(c))
            })
        };
        tag || class()
    }
}

/// Configuration for [`crate::Scroller`].
///
/// `Scroller::new` runs [`ScrollOptions::processed`] exactly once against the surface
/// capabilities and shares the result; the processed value is never re-derived.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollOptions {
    pub start_x: f64,
    pub start_y: f64,
    pub scroll_x: bool,
    pub scroll_y: bool,
    /// Scroll both axes at once; disables the direction lock.
    pub free_scroll: bool,
    /// Minimum dominance (px) of one axis over the other before a gesture locks to it.
    pub direction_lock_threshold: f64,
    pub passthrough: Passthrough,

    /// Synthesize a click for unmoved gestures.
    pub click: bool,
    pub dblclick: Option<DblclickConfig>,
    /// Name of a synthetic tap dispatched for unmoved gestures.
    pub tap: Option<String>,

    pub bounce: BounceConfig,
    pub bounce_time: u64,
    /// Rubber-band cap as a fraction of the wrapper extent.
    pub overshoot_ratio: f64,

    pub momentum: bool,
    pub momentum_limit_time: u64,
    pub momentum_limit_distance: f64,
    /// Momentum deceleration in px/ms².
    pub deceleration: f64,
    pub swipe_time: u64,
    pub swipe_bounce_time: u64,

    pub flick_limit_time: u64,
    pub flick_limit_distance: f64,

    /// Debounce window for resize-triggered refreshes.
    pub resize_polling: u64,
    pub probe: Probe,

    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub prevent_default_exception: ElementException,
    /// Targets on which a gesture never starts.
    pub tag_exception: ElementException,

    /// Use the timeline (declarative transition) backend when the surface supports it.
    pub use_transition: bool,
    /// Follow moves only over the wrapper rather than the whole page. See [`crate::BindTarget`].
    pub bind_to_wrapper: bool,
    pub disable_mouse: Option<bool>,
    pub disable_touch: Option<bool>,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            start_y: 0.0,
            scroll_x: false,
            scroll_y: true,
            free_scroll: false,
            direction_lock_threshold: 5.0,
            passthrough: Passthrough::None,
            click: false,
            dblclick: None,
            tap: None,
            bounce: BounceConfig::ALL,
            bounce_time: 800,
            overshoot_ratio: 0.5,
            momentum: true,
            momentum_limit_time: 300,
            momentum_limit_distance: 15.0,
            deceleration: 0.0015,
            swipe_time: 2500,
            swipe_bounce_time: 500,
            flick_limit_time: 200,
            flick_limit_distance: 100.0,
            resize_polling: 60,
            probe: Probe::Disabled,
            prevent_default: true,
            stop_propagation: false,
            prevent_default_exception: ElementException::tags(&[
                "INPUT", "TEXTAREA", "BUTTON", "SELECT", "AUDIO",
            ]),
            tag_exception: ElementException::tags(&["TEXTAREA"]),
            use_transition: true,
            bind_to_wrapper: false,
            disable_mouse: None,
            disable_touch: None,
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the options against platform capabilities.
    ///
    /// - the timeline backend needs `capabilities.transition`;
    /// - a passthrough axis stops scrolling on that axis and turns off prevent-default, free
    ///   scrolling and the lock threshold;
    /// - free scrolling enables both axes;
    /// - unset input switches follow `capabilities.touch`.
    pub fn processed(mut self, capabilities: Capabilities) -> Self {
        let passthrough = self.passthrough != Passthrough::None;

        self.use_transition &= capabilities.transition;
        self.prevent_default &= !passthrough;

        if self.passthrough == Passthrough::Horizontal {
            self.scroll_x = false;
        }
        if self.passthrough == Passthrough::Vertical {
            self.scroll_y = false;
        }

        self.free_scroll &= !passthrough;
        if self.free_scroll {
            self.scroll_x = true;
            self.scroll_y = true;
        }

        if passthrough {
            self.direction_lock_threshold = 0.0;
        }

        self.disable_mouse.get_or_insert(capabilities.touch);
        self.disable_touch.get_or_insert(!capabilities.touch);

        if self.deceleration <= 0.0 {
            rwarn!(
                deceleration = self.deceleration,
                "ScrollOptions: non-positive deceleration; momentum disabled"
            );
            self.momentum = false;
        }
        self
    }

    pub fn mouse_disabled(&self) -> bool {
        self.disable_mouse.unwrap_or(false)
    }

    pub fn touch_disabled(&self) -> bool {
        self.disable_touch.unwrap_or(false)
    }

    pub fn with_start(mut self, x: f64, y: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self
    }

    pub fn with_scroll_x(mut self, scroll_x: bool) -> Self {
        self.scroll_x = scroll_x;
        self
    }

    pub fn with_scroll_y(mut self, scroll_y: bool) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    pub fn with_free_scroll(mut self, free_scroll: bool) -> Self {
        self.free_scroll = free_scroll;
        self
    }

    pub fn with_direction_lock_threshold(mut self, threshold: f64) -> Self {
        self.direction_lock_threshold = threshold;
        self
    }

    pub fn with_passthrough(mut self, passthrough: Passthrough) -> Self {
        self.passthrough = passthrough;
        self
    }

    pub fn with_click(mut self, click: bool) -> Self {
        self.click = click;
        self
    }

    pub fn with_dblclick(mut self, dblclick: Option<DblclickConfig>) -> Self {
        self.dblclick = dblclick;
        self
    }

    pub fn with_tap(mut self, tap: Option<impl Into<String>>) -> Self {
        self.tap = tap.map(Into::into);
        self
    }

    pub fn with_bounce(mut self, bounce: BounceConfig) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_bounce_time(mut self, bounce_time: u64) -> Self {
        self.bounce_time = bounce_time;
        self
    }

    pub fn with_overshoot_ratio(mut self, ratio: f64) -> Self {
        self.overshoot_ratio = ratio;
        self
    }

    pub fn with_momentum(mut self, momentum: bool) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_momentum_limits(mut self, time: u64, distance: f64) -> Self {
        self.momentum_limit_time = time;
        self.momentum_limit_distance = distance;
        self
    }

    pub fn with_deceleration(mut self, deceleration: f64) -> Self {
        self.deceleration = deceleration;
        self
    }

    pub fn with_swipe_time(mut self, swipe_time: u64, swipe_bounce_time: u64) -> Self {
        self.swipe_time = swipe_time;
        self.swipe_bounce_time = swipe_bounce_time;
        self
    }

    pub fn with_flick_limits(mut self, time: u64, distance: f64) -> Self {
        self.flick_limit_time = time;
        self.flick_limit_distance = distance;
        self
    }

    pub fn with_resize_polling(mut self, resize_polling: u64) -> Self {
        self.resize_polling = resize_polling;
        self
    }

    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    pub fn with_stop_propagation(mut self, stop_propagation: bool) -> Self {
        self.stop_propagation = stop_propagation;
        self
    }

    pub fn with_prevent_default_exception(mut self, exception: ElementException) -> Self {
        self.prevent_default_exception = exception;
        self
    }

    pub fn with_tag_exception(mut self, exception: ElementException) -> Self {
        self.tag_exception = exception;
        self
    }

    pub fn with_use_transition(mut self, use_transition: bool) -> Self {
        self.use_transition = use_transition;
        self
    }

    pub fn with_bind_to_wrapper(mut self, bind_to_wrapper: bool) -> Self {
        self.bind_to_wrapper = bind_to_wrapper;
        self
    }

    pub fn with_disable_mouse(mut self, disable_mouse: Option<bool>) -> Self {
        self.disable_mouse = disable_mouse;
        self
    }

    pub fn with_disable_touch(mut self, disable_touch: Option<bool>) -> Self {
        self.disable_touch = disable_touch;
        self
    }
}

impl core::fmt::Debug for ScrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("start", &(self.start_x, self.start_y))
            .field("scroll_x", &self.scroll_x)
            .field("scroll_y", &self.scroll_y)
            .field("free_scroll", &self.free_scroll)
            .field("direction_lock_threshold", &self.direction_lock_threshold)
            .field("passthrough", &self.passthrough)
            .field("bounce", &self.bounce)
            .field("momentum", &self.momentum)
            .field("deceleration", &self.deceleration)
            .field("probe", &self.probe)
            .field("use_transition", &self.use_transition)
            .field("disable_mouse", &self.disable_mouse)
            .field("disable_touch", &self.disable_touch)
            .finish_non_exhaustive()
    }
}
