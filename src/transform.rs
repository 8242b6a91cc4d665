//! Mapping from device-native pen coordinates to a core's screen space.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Lowest device-native coordinate.
pub const NATIVE_MIN: f32 = -32768.0;
/// Width of the device-native coordinate range.
pub const NATIVE_SPAN: f32 = 65536.0;

/// Rotation of the emulated screen relative to the digitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rotation {
    #[default]
    None,
    /// Screen turned 90° clockwise.
    Clockwise,
    /// Screen turned 90° counter-clockwise.
    CounterClockwise,
    UpsideDown,
}

impl Rotation {
    /// Rotate normalized coordinates (both in `[0, 1]`).
    fn apply(&self, u: f32, v: f32) -> (f32, f32) {
        match self {
            Rotation::None => (u, v),
            Rotation::Clockwise => (1.0 - v, u),
            Rotation::CounterClockwise => (v, 1.0 - u),
            Rotation::UpsideDown => (1.0 - u, 1.0 - v),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::None => write!(f, "none"),
            Rotation::Clockwise => write!(f, "clockwise"),
            Rotation::CounterClockwise => write!(f, "counter-clockwise"),
            Rotation::UpsideDown => write!(f, "upside-down"),
        }
    }
}

impl FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "none" | "0" => Ok(Rotation::None),
            "clockwise" | "cw" | "90" => Ok(Rotation::Clockwise),
            "counter-clockwise" | "ccw" | "270" => Ok(Rotation::CounterClockwise),
            "upside-down" | "180" => Ok(Rotation::UpsideDown),
            _ => Err(format!(
                "Invalid rotation '{}'. Valid values: none, clockwise, counter-clockwise, upside-down",
                s
            )),
        }
    }
}

/// Scales the native range onto a `width` x `height` pixel screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub width: u32,
    pub height: u32,
    pub rotation: Rotation,
}

impl ScreenTransform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rotation: Rotation::None,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Map a native point to screen pixels, clamped to the screen.
    pub fn apply(&self, x: f32, y: f32) -> (i32, i32) {
        let u = (x - NATIVE_MIN) / NATIVE_SPAN;
        let v = (y - NATIVE_MIN) / NATIVE_SPAN;
        let (u, v) = self.rotation.apply(u, v);
        (scale(u, self.width), scale(v, self.height))
    }
}

fn scale(t: f32, extent: u32) -> i32 {
    let max = extent.saturating_sub(1) as i32;
    ((t * extent as f32) as i32).clamp(0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snes_screen() {
        let t = ScreenTransform::new(256, 224);
        assert_eq!(t.apply(-32768.0, -32768.0), (0, 0));
        assert_eq!(t.apply(0.0, 0.0), (128, 112));
        assert_eq!(t.apply(32767.0, 32767.0), (255, 223));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let t = ScreenTransform::new(320, 240);
        assert_eq!(t.apply(-40000.0, 40000.0), (0, 239));
    }

    #[test]
    fn test_rotation() {
        let t = ScreenTransform::new(100, 100).with_rotation(Rotation::Clockwise);
        // native top-left lands on the top-right corner
        assert_eq!(t.apply(-32768.0, -32768.0), (99, 0));

        let t = t.with_rotation(Rotation::UpsideDown);
        assert_eq!(t.apply(-32768.0, -32768.0), (99, 99));
        assert_eq!(t.apply(0.0, 0.0), (50, 50));

        let t = t.with_rotation(Rotation::CounterClockwise);
        assert_eq!(t.apply(-32768.0, -32768.0), (0, 99));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("cw".parse::<Rotation>().unwrap(), Rotation::Clockwise);
        assert_eq!(
            "counter_clockwise".parse::<Rotation>().unwrap(),
            Rotation::CounterClockwise
        );
        assert!("sideways".parse::<Rotation>().is_err());
    }
}
