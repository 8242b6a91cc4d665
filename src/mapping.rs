//! Mapping of physical pen input (tap, barrel button, hover) onto logical actions.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::state::DeviceState;

pub const DEFAULT_PRESSURE_THRESHOLD: f32 = 0.1;

/// Logical, device-agnostic action a physical input can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Disabled = 0,
    #[default]
    LeftClick = 1,
    RightClick = 2,
    MiddleClick = 3,
    Trigger = 4,
    Reload = 5,
    Offscreen = 6,
    Cursor = 7,
}

impl Action {
    /// Unknown raw values never match anything, the same as `Disabled`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Action::LeftClick,
            2 => Action::RightClick,
            3 => Action::MiddleClick,
            4 => Action::Trigger,
            5 => Action::Reload,
            6 => Action::Offscreen,
            7 => Action::Cursor,
            _ => Action::Disabled,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Disabled => write!(f, "disabled"),
            Action::LeftClick => write!(f, "left-click"),
            Action::RightClick => write!(f, "right-click"),
            Action::MiddleClick => write!(f, "middle-click"),
            Action::Trigger => write!(f, "trigger"),
            Action::Reload => write!(f, "reload"),
            Action::Offscreen => write!(f, "offscreen"),
            Action::Cursor => write!(f, "cursor"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "disabled" | "none" => Ok(Action::Disabled),
            "left-click" | "left" => Ok(Action::LeftClick),
            "right-click" | "right" => Ok(Action::RightClick),
            "middle-click" | "middle" => Ok(Action::MiddleClick),
            "trigger" => Ok(Action::Trigger),
            "reload" => Ok(Action::Reload),
            "offscreen" => Ok(Action::Offscreen),
            "cursor" => Ok(Action::Cursor),
            _ => Err(format!(
                "Invalid action '{}'. Valid values: disabled, left-click, right-click, \
                 middle-click, trigger, reload, offscreen, cursor",
                s
            )),
        }
    }
}

/// How hovering (pen near but not touching) is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoverBehavior {
    Disabled = 0,
    #[default]
    Cursor = 1,
    /// Hover aims a lightgun cursor without firing.
    LightgunTracking = 2,
}

impl HoverBehavior {
    /// Unknown raw values keep hover enabled without lightgun tracking.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => HoverBehavior::Disabled,
            2 => HoverBehavior::LightgunTracking,
            _ => HoverBehavior::Cursor,
        }
    }
}

impl fmt::Display for HoverBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoverBehavior::Disabled => write!(f, "disabled"),
            HoverBehavior::Cursor => write!(f, "cursor"),
            HoverBehavior::LightgunTracking => write!(f, "lightgun-tracking"),
        }
    }
}

impl FromStr for HoverBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "disabled" | "none" => Ok(HoverBehavior::Disabled),
            "cursor" => Ok(HoverBehavior::Cursor),
            "lightgun-tracking" | "lightgun" => Ok(HoverBehavior::LightgunTracking),
            _ => Err(format!(
                "Invalid hover behavior '{}'. Valid values: disabled, cursor, lightgun-tracking",
                s
            )),
        }
    }
}

/// Replaced as a unit; there are no partial updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingConfig {
    pub tap_action: Action,
    pub barrel_action: Action,
    pub hover_behavior: HoverBehavior,
    /// Minimum pressure for a hover to fire the tap action.
    pub pressure_threshold: f32,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            tap_action: Action::LeftClick,
            barrel_action: Action::RightClick,
            hover_behavior: HoverBehavior::Cursor,
            pressure_threshold: DEFAULT_PRESSURE_THRESHOLD,
        }
    }
}

impl MappingConfig {
    fn hover_enabled(&self, state: &DeviceState) -> bool {
        state.hover && self.hover_behavior != HoverBehavior::Disabled
    }

    /// Whether `action` is asserted by `state`.
    ///
    /// Tap and barrel are checked independently: if both map to the same action
    /// either one asserts it.
    pub fn triggers(&self, action: Action, state: &DeviceState) -> bool {
        match action {
            Action::Disabled => false,
            Action::Cursor => self.hover_enabled(state),
            Action::LeftClick
            | Action::RightClick
            | Action::MiddleClick
            | Action::Trigger
            | Action::Reload
            | Action::Offscreen => {
                (state.contact && self.tap_action == action)
                    || (state.barrel_pressed() && self.barrel_action == action)
                    || (self.hover_enabled(state)
                        && self.tap_action == action
                        && state.pressure >= self.pressure_threshold)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Button;

    fn hovering(pressure: f32) -> DeviceState {
        DeviceState {
            hover: true,
            pressure,
            ..Default::default()
        }
    }

    fn touching() -> DeviceState {
        DeviceState {
            contact: true,
            pressure: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_disabled_never_triggers() {
        let mapping = MappingConfig {
            tap_action: Action::Disabled,
            barrel_action: Action::Disabled,
            ..Default::default()
        };
        let mut state = touching();
        state.set_button(Button::Barrel.into(), true);
        assert!(!mapping.triggers(Action::Disabled, &state));
    }

    #[test]
    fn test_tap_and_barrel() {
        let mapping = MappingConfig::default();
        assert!(mapping.triggers(Action::LeftClick, &touching()));
        assert!(!mapping.triggers(Action::RightClick, &touching()));

        let mut state = DeviceState::default();
        state.set_button(Button::Barrel.into(), true);
        assert!(mapping.triggers(Action::RightClick, &state));
        assert!(!mapping.triggers(Action::LeftClick, &state));
    }

    #[test]
    fn test_same_action_on_both_inputs() {
        let mapping = MappingConfig {
            tap_action: Action::Trigger,
            barrel_action: Action::Trigger,
            ..Default::default()
        };
        assert!(mapping.triggers(Action::Trigger, &touching()));

        let mut state = DeviceState::default();
        state.set_button(Button::Barrel.into(), true);
        assert!(mapping.triggers(Action::Trigger, &state));
    }

    #[test]
    fn test_hover_pressure_threshold() {
        let mapping = MappingConfig {
            pressure_threshold: 0.3,
            ..Default::default()
        };
        assert!(!mapping.triggers(Action::LeftClick, &hovering(0.2)));
        assert!(mapping.triggers(Action::LeftClick, &hovering(0.3)));

        let no_hover = MappingConfig {
            hover_behavior: HoverBehavior::Disabled,
            ..mapping
        };
        assert!(!no_hover.triggers(Action::LeftClick, &hovering(0.9)));
    }

    #[test]
    fn test_cursor_follows_hover() {
        let mapping = MappingConfig::default();
        assert!(mapping.triggers(Action::Cursor, &hovering(0.0)));
        assert!(!mapping.triggers(Action::Cursor, &touching()));

        let disabled = MappingConfig {
            hover_behavior: HoverBehavior::Disabled,
            ..mapping
        };
        assert!(!disabled.triggers(Action::Cursor, &hovering(0.0)));
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(Action::from_raw(5), Action::Reload);
        assert_eq!(Action::from_raw(42), Action::Disabled);
        assert_eq!(HoverBehavior::from_raw(2), HoverBehavior::LightgunTracking);
        assert_eq!(HoverBehavior::from_raw(9), HoverBehavior::Cursor);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("right-click".parse::<Action>().unwrap(), Action::RightClick);
        assert_eq!("MIDDLE_CLICK".parse::<Action>().unwrap(), Action::MiddleClick);
        assert_eq!(
            "lightgun-tracking".parse::<HoverBehavior>().unwrap(),
            HoverBehavior::LightgunTracking
        );
        assert!("jump".parse::<Action>().is_err());
        assert_eq!(Action::Offscreen.to_string(), "offscreen");
    }
}
