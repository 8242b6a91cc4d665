//! Stateful translation of S-Pen events into pointer, mouse and lightgun input.

use crate::clock::{Clock, MonotonicClock};
use crate::guard::{GuardSettings, HoverGuard};
use crate::ids;
use crate::mapping::{Action, HoverBehavior, MappingConfig};
use crate::state::{DeviceState, ToolType, MAX_BUTTONS};

/// Maps a raw pen position to core screen coordinates. Context the caller
/// needs is captured by the closure.
pub type CoordinateTransform = Box<dyn Fn(f32, f32) -> (i32, i32)>;

/// One query against the consuming input API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputQuery {
    pub port: u32,
    pub device: u32,
    pub index: u32,
    pub id: u32,
}

impl InputQuery {
    pub fn new(port: u32, device: u32, index: u32, id: u32) -> Self {
        Self {
            port,
            device,
            index,
            id,
        }
    }

    /// Query against the pointer device class on port 0.
    pub fn pointer(id: u32) -> Self {
        Self::new(0, ids::DEVICE_POINTER, 0, id)
    }
}

/// The input API answering queries the engine does not intercept.
pub type Fallback<'a> = &'a mut dyn FnMut(InputQuery) -> i16;

pub struct StylusEngine<C: Clock = MonotonicClock> {
    clock: C,
    current: DeviceState,
    previous: DeviceState,
    guard: HoverGuard,
    require_contact_for_click: bool,
    mapping: MappingConfig,
    transform: Option<CoordinateTransform>,
}

impl StylusEngine {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for StylusEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StylusEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            current: DeviceState::default(),
            previous: DeviceState::default(),
            guard: HoverGuard::default(),
            require_contact_for_click: true,
            mapping: MappingConfig::default(),
            transform: None,
        }
    }

    pub fn on_hover(&mut self, x: f32, y: f32, pressure: f32) {
        let now = self.clock.now_ms();
        log::trace!("hover ({:.1}, {:.1}) p={:.2}", x, y, pressure);

        self.previous = self.current;
        self.current = DeviceState {
            x,
            y,
            pressure,
            contact: false,
            hover: true,
            timestamp_ms: now,
            ..self.current
        };
        self.guard.arm(now, x, y);
    }

    pub fn on_contact(&mut self, x: f32, y: f32, pressure: f32) {
        let now = self.clock.now_ms();
        log::trace!("contact ({:.1}, {:.1}) p={:.2}", x, y, pressure);

        self.previous = self.current;
        self.current = DeviceState {
            x,
            y,
            pressure,
            contact: true,
            hover: false,
            timestamp_ms: now,
            ..self.current
        };
        // A real contact is no longer a phantom candidate.
        self.guard.disarm();
    }

    /// Indices outside `0..32` are ignored.
    pub fn on_button(&mut self, button: impl Into<u32>, pressed: bool) {
        let index = button.into();
        if index >= MAX_BUTTONS {
            log::debug!("ignoring out-of-range button {}", index);
            return;
        }
        log::trace!("button {} {}", index, if pressed { "down" } else { "up" });

        self.previous = self.current;
        self.current.set_button(index, pressed);
        self.current.timestamp_ms = self.clock.now_ms();
    }

    pub fn on_tool_type(&mut self, tool_type: ToolType) {
        log::trace!("tool type {}", tool_type);

        self.previous = self.current;
        self.current.tool_type = tool_type;
        self.current.timestamp_ms = self.clock.now_ms();
    }

    pub fn state(&self) -> &DeviceState {
        &self.current
    }

    /// State immediately before the most recent ingestion.
    pub fn previous_state(&self) -> &DeviceState {
        &self.previous
    }

    pub fn is_active(&self) -> bool {
        self.current.is_active()
    }

    /// `Some(true)` if the latest ingestion put the tip down, `Some(false)` if it lifted it.
    pub fn contact_edge(&self) -> Option<bool> {
        match (self.previous.contact, self.current.contact) {
            (false, true) => Some(true),
            (true, false) => Some(false),
            _ => None,
        }
    }

    pub fn requires_contact_for_click(&self) -> bool {
        self.require_contact_for_click
    }

    /// When off, the barrel button alone also reports the pointer as pressed.
    pub fn set_require_contact_for_click(&mut self, required: bool) {
        self.require_contact_for_click = required;
    }

    /// Replaces any earlier transform.
    pub fn set_coordinate_transform<F>(&mut self, transform: F)
    where
        F: Fn(f32, f32) -> (i32, i32) + 'static,
    {
        self.transform = Some(Box::new(transform));
    }

    pub fn clear_coordinate_transform(&mut self) {
        self.transform = None;
    }

    /// Applies to guards armed from now on.
    pub fn configure_hover_guard(&mut self, settings: GuardSettings) {
        self.guard.configure(settings);
    }

    pub fn guard_settings(&self) -> GuardSettings {
        self.guard.settings()
    }

    pub fn hover_guard(&self) -> &HoverGuard {
        &self.guard
    }

    pub fn configure_mapping(&mut self, mapping: MappingConfig) {
        log::debug!(
            "mapping: tap={} barrel={} hover={} threshold={}",
            mapping.tap_action,
            mapping.barrel_action,
            mapping.hover_behavior,
            mapping.pressure_threshold
        );
        self.mapping = mapping;
    }

    pub fn mapping(&self) -> &MappingConfig {
        &self.mapping
    }

    /// Answer a pointer/lightgun input query.
    ///
    /// X, Y, pressed and count on the pointer class come straight from the pen.
    /// Everything else is checked against the hover guard first and then handed
    /// to `fallback`; without a fallback the answer is [`ids::NO_INPUT`].
    pub fn emit_pointer(&mut self, fallback: Option<Fallback<'_>>, query: InputQuery) -> i16 {
        if query.device == ids::DEVICE_POINTER {
            match query.id {
                ids::POINTER_X => return self.pointer_axis().0,
                ids::POINTER_Y => return self.pointer_axis().1,
                ids::POINTER_PRESSED => return self.pointer_pressed() as i16,
                ids::POINTER_COUNT => return self.current.is_active() as i16,
                _ => {}
            }
        }

        if self.guard.is_armed() {
            let now = self.clock.now_ms();
            if self.guard.suppresses(now, self.current.x, self.current.y) {
                return ids::NO_INPUT;
            }
        }

        match fallback {
            Some(query_input) => query_input(query),
            None => ids::NO_INPUT,
        }
    }

    fn pointer_axis(&self) -> (i16, i16) {
        let state = &self.current;
        match &self.transform {
            Some(transform) if state.is_active() => {
                let (x, y) = transform(state.x, state.y);
                (x as i16, y as i16)
            }
            _ => (state.x as i16, state.y as i16),
        }
    }

    fn pointer_pressed(&self) -> bool {
        if self.require_contact_for_click {
            self.current.contact
        } else {
            self.current.contact || self.current.barrel_pressed()
        }
    }

    fn triggered(&self, action: Action) -> bool {
        self.mapping.triggers(action, &self.current)
    }

    /// Mapped button state for a mouse or lightgun query. Unknown
    /// device/button combinations are never pressed.
    pub fn mapped_button(&self, device_class: u32, button_id: u32) -> bool {
        if device_class == ids::DEVICE_MOUSE {
            match button_id {
                ids::MOUSE_LEFT => return self.triggered(Action::LeftClick),
                ids::MOUSE_RIGHT => return self.triggered(Action::RightClick),
                ids::MOUSE_MIDDLE => return self.triggered(Action::MiddleClick),
                _ => {}
            }
        }

        if device_class == ids::DEVICE_LIGHTGUN {
            match button_id {
                ids::LIGHTGUN_TRIGGER => return self.triggered(Action::Trigger),
                ids::LIGHTGUN_RELOAD => {
                    return self.triggered(Action::Reload) || self.triggered(Action::Offscreen)
                }
                ids::LIGHTGUN_CURSOR => {
                    if self.mapping.hover_behavior == HoverBehavior::LightgunTracking {
                        return self.current.hover && !self.current.contact;
                    }
                    return self.triggered(Action::Cursor);
                }
                _ => {}
            }
        }

        false
    }
}
