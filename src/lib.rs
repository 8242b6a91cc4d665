//! Translate S-Pen hover, contact, button and tool events into the pointer,
//! mouse and lightgun semantics of a libretro-style input API.
//!
//! The [`StylusEngine`] keeps the latest pen state, filters phantom touches
//! that follow a hover and maps tap/barrel/hover onto logical actions. The
//! [`ffi`] module exposes the same engine to C callers.

pub mod clock;
pub mod engine;
pub mod ffi;
pub mod guard;
pub mod ids;
pub mod mapping;
pub mod state;
pub mod transform;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::{CoordinateTransform, Fallback, InputQuery, StylusEngine};
pub use guard::{GuardSettings, HoverGuard};
pub use mapping::{Action, HoverBehavior, MappingConfig};
pub use state::{Button, DeviceState, ToolType};
pub use transform::{Rotation, ScreenTransform};
