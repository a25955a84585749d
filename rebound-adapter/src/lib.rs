//! Adapter utilities for the `rebound` crate.
//!
//! The `rebound` crate is UI-agnostic and talks to the platform through its `Surface` trait.
//! This crate provides small, framework-neutral helpers for headless use:
//!
//! - An in-memory surface with a manual clock and simulated transitions
//! - A simulator that replays pointer scripts and drives frames
//! - An event log recorder for coordinator hooks
//!
//! This crate is intentionally framework-agnostic (no DOM/winit/egui bindings).
#![forbid(unsafe_code)]

mod event_log;
mod memory_surface;
mod simulator;
mod tween;


pub use event_log::{EventLog, LoggedEvent};
pub use memory_surface::MemorySurface;
pub use simulator::{Simulator, Step};
pub use tween::Tween;
