//! A headless touch/pointer scrolling engine.
//!
//! For an in-memory surface, a pointer-script simulator and an event recorder, see the
//! `rebound-adapter` crate.
//!
//! This crate turns raw pointer gestures into scroll motion: direction locking, rubber-band
//! overscroll, momentum after release and rebound into bounds, played back either frame by
//! frame or through a declarative platform transition.
//!
//! It is UI-agnostic. A platform layer implements [`Surface`] to provide:
//! - a millisecond clock and a frame scheduler
//! - wrapper/content/element geometry
//! - content transform writes and read-back
//!
//! and forwards pointer primitives to [`Scroller::handle_pointer`].
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod animation;
pub mod axis;
pub mod direction_lock;
pub mod easing;
pub mod gesture;
pub mod hooks;
mod options;
pub mod scroller;
mod surface;
mod types;

#[cfg(test)]
mod tests;

pub use animation::{Animator, Backend, Progress};
pub use axis::{AxisGeometry, AxisModel, Boundary, Momentum};
pub use direction_lock::{DirectionLock, HostAction, LockState};
pub use easing::Easing;
pub use gesture::{GestureNormalizer, InputEvent};
pub use hooks::{Decision, HookBus, ListenerId};
pub use options::{
    BounceConfig, DblclickConfig, ElementException, Passthrough, Probe, ScrollOptions,
};
pub use scroller::{ElementOffset, MomentumPlan, ScrollEvent, Scroller};
pub use surface::{BindTarget, Capabilities, ClickKind, Surface, SyntheticClick};
pub use types::{
    Axis, Button, Channel, Direction, ElementId, ExtraTransform, InputClass, InputResponse,
    Phase, Point, PointerEvent, PointerPhase, Rect, Size, Target, Transform, Viewport,
};
