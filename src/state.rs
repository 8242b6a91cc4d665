//! Snapshot of the stylus as last reported by the hardware.

use std::fmt;
use std::str::FromStr;

/// Number of independently tracked buttons in [`DeviceState::buttons`].
pub const MAX_BUTTONS: u32 = 32;

/// What the digitizer says is touching (or near) the surface.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolType {
    Stylus = 0,
    Finger = 1,
    #[default]
    Unknown = 2,
}

impl ToolType {
    /// Raw values outside the known set are reported as `Unknown`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => ToolType::Stylus,
            1 => ToolType::Finger,
            _ => ToolType::Unknown,
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolType::Stylus => write!(f, "stylus"),
            ToolType::Finger => write!(f, "finger"),
            ToolType::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ToolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stylus" | "pen" => Ok(ToolType::Stylus),
            "finger" => Ok(ToolType::Finger),
            "unknown" => Ok(ToolType::Unknown),
            _ => Err(format!(
                "Invalid tool type '{}'. Valid values: stylus, finger, unknown",
                s
            )),
        }
    }
}

/// Physical S-Pen buttons and their bit index in the button mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Tip = 0,
    /// Side button on the pen body.
    Barrel = 1,
    Eraser = 2,
}

impl From<Button> for u32 {
    fn from(button: Button) -> u32 {
        button as u32
    }
}

impl FromStr for Button {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tip" => Ok(Button::Tip),
            "barrel" | "side" => Ok(Button::Barrel),
            "eraser" => Ok(Button::Eraser),
            _ => Err(format!(
                "Invalid button '{}'. Valid values: tip, barrel, eraser or an index below {}",
                s, MAX_BUTTONS
            )),
        }
    }
}

/// Latest reported stylus state. Overwritten as a whole on every hover/contact event.
///
/// `contact` and `hover` are never both true. Pressure is passed through as
/// reported; callers that need it in `[0.0, 1.0]` clamp before ingestion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceState {
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
    /// Hover distance. No ingested event reports it, so it stays 0.
    pub distance: f32,
    pub tool_type: ToolType,
    /// Tip touching the surface.
    pub contact: bool,
    /// Tip near the surface but not touching.
    pub hover: bool,
    /// One bit per button index, see [`Button`].
    pub buttons: u32,
    /// Monotonic milliseconds of the last mutation.
    pub timestamp_ms: u64,
}

impl DeviceState {
    /// True when the pen is touching or hovering.
    pub fn is_active(&self) -> bool {
        self.contact || self.hover
    }

    /// Whether the button at `index` is held. Out-of-range indices are never held.
    pub fn button(&self, index: u32) -> bool {
        index < MAX_BUTTONS && self.buttons & (1 << index) != 0
    }

    pub fn barrel_pressed(&self) -> bool {
        self.button(Button::Barrel.into())
    }

    pub(crate) fn set_button(&mut self, index: u32, pressed: bool) {
        if pressed {
            self.buttons |= 1 << index;
        } else {
            self.buttons &= !(1 << index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        let state = DeviceState::default();
        assert_eq!(state.tool_type, ToolType::Unknown);
        assert!(!state.is_active());
        assert_eq!(state.buttons, 0);
        assert_eq!(state.distance, 0.0);
    }

    #[test]
    fn test_button_bits() {
        let mut state = DeviceState::default();
        state.set_button(Button::Barrel.into(), true);
        state.set_button(31, true);
        assert!(state.barrel_pressed());
        assert!(state.button(31));
        assert!(!state.button(Button::Eraser.into()));
        assert!(!state.button(32));

        state.set_button(Button::Barrel.into(), false);
        assert!(!state.barrel_pressed());
        assert_eq!(state.buttons, 1 << 31);
    }

    #[test]
    fn test_tool_type_from_raw() {
        assert_eq!(ToolType::from_raw(0), ToolType::Stylus);
        assert_eq!(ToolType::from_raw(1), ToolType::Finger);
        assert_eq!(ToolType::from_raw(2), ToolType::Unknown);
        assert_eq!(ToolType::from_raw(99), ToolType::Unknown);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Stylus".parse::<ToolType>().unwrap(), ToolType::Stylus);
        assert_eq!("barrel".parse::<Button>().unwrap(), Button::Barrel);
        assert!("wand".parse::<ToolType>().is_err());
        assert!("grip".parse::<Button>().is_err());
    }
}
