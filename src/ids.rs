//! Device and query ids shared with the consuming pointer/lightgun input API.
//! These values are a wire contract with external consumers; do not renumber.

/// Mouse-like device class, queried through `mapped_button`.
pub const DEVICE_MOUSE: u32 = 1;
/// Pointer device class, queried through `emit_pointer`.
pub const DEVICE_POINTER: u32 = 6;
/// Lightgun-like device class for `mapped_button`. Shares its value with the pointer class.
pub const DEVICE_LIGHTGUN: u32 = 6;

pub const POINTER_X: u32 = 0;
pub const POINTER_Y: u32 = 1;
pub const POINTER_PRESSED: u32 = 2;
pub const POINTER_COUNT: u32 = 3;

pub const MOUSE_LEFT: u32 = 0;
pub const MOUSE_RIGHT: u32 = 1;
pub const MOUSE_MIDDLE: u32 = 2;

pub const LIGHTGUN_TRIGGER: u32 = 2;
/// Cursor visibility (aim without firing).
pub const LIGHTGUN_CURSOR: u32 = 3;
/// Reload, also reported for an offscreen shot.
pub const LIGHTGUN_RELOAD: u32 = 16;

/// Value returned for any query that carries no input.
pub const NO_INPUT: i16 = 0;
