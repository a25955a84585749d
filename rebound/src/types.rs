use alloc::string::String;
use alloc::vec::Vec;

/// A 2D coordinate pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An element box: `x`/`y` is the offset of the element, `width`/`height` its extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The visible page area, used for the edge safety net of the gesture normalizer.
///
/// `scroll` is the page scroll offset: pointer page coordinates minus `scroll` give client
/// coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Direction of travel along one axis.
///
/// `Forward` means the position decreases (content moves towards the far edge), which is
/// what a finger dragging up/left produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    None,
}

impl Direction {
    pub(crate) fn of_delta(delta: f64) -> Self {
        if delta < 0.0 {
            Self::Forward
        } else if delta > 0.0 {
            Self::Backward
        } else {
            Self::None
        }
    }
}

/// A named, interpolated channel carried alongside the x/y position (e.g. `scale`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Channel {
    pub name: &'static str,
    pub value: f64,
}

/// A content transform: the scroll position plus optional extra channels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub extra: Vec<Channel>,
}

impl Transform {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            extra: Vec::new(),
        }
    }

    pub fn from_point(point: Point) -> Self {
        Self::new(point.x, point.y)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn channel(&self, name: &str) -> Option<f64> {
        self.extra.iter().find(|c| c.name == name).map(|c| c.value)
    }

    /// Sets (or adds) an extra channel.
    pub fn set_channel(&mut self, name: &'static str, value: f64) {
        match self.extra.iter_mut().find(|c| c.name == name) {
            Some(c) => c.value = value,
            None => self.extra.push(Channel { name, value }),
        }
    }

    pub(crate) fn with_channels(mut self, channels: &[Channel]) -> Self {
        for c in channels {
            self.set_channel(c.name, c.value);
        }
        self
    }

    /// Linear interpolation towards `to` by `eased` (0..=1).
    ///
    /// Channels only present in `to` start from their end value.
    pub fn lerp(&self, to: &Self, eased: f64) -> Self {
        let mix = |a: f64, b: f64| (b - a) * eased + a;
        let extra = to
            .extra
            .iter()
            .map(|c| Channel {
                name: c.name,
                value: mix(self.channel(c.name).unwrap_or(c.value), c.value),
            })
            .collect();
        Self {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            extra,
        }
    }
}

/// Extra channels applied on top of the start and end points of a `scroll_to`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraTransform {
    pub start: Vec<Channel>,
    pub end: Vec<Channel>,
}

/// Opaque handle for an element owned by the platform adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

/// The element a pointer primitive was dispatched to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub id: ElementId,
    pub tag_name: String,
    pub class_name: String,
}

impl Target {
    pub fn new(id: ElementId, tag_name: impl Into<String>) -> Self {
        Self {
            id,
            tag_name: tag_name.into(),
            class_name: String::new(),
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

/// The two mutually exclusive input classes a gesture session can be locked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputClass {
    Touch,
    Mouse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
    Click,
}

/// Mouse button of a pointer primitive; touch input always reports `Primary`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

/// A raw pointer primitive forwarded by the platform adapter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub class: InputClass,
    /// Page coordinates of the (first) contact point.
    pub page: Point,
    pub button: Button,
    pub target: Target,
    /// Set on events the engine dispatched itself (see [`crate::SyntheticClick`]).
    pub synthetic: bool,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, class: InputClass, page: Point) -> Self {
        Self {
            phase,
            class,
            page,
            button: Button::Primary,
            target: Target::default(),
            synthetic: false,
        }
    }

    pub fn touch(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(phase, InputClass::Touch, Point::new(x, y))
    }

    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::new(phase, InputClass::Mouse, Point::new(x, y))
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }
}

/// What the adapter should do with the native event it just forwarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

/// Observable coarse state of the gesture lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    /// A pointer is down but has not moved past the jitter thresholds.
    Tracking,
    Dragging,
    Momentum,
    Rebounding,
    /// A programmatic `scroll_to` is in flight.
    Animating,
}
