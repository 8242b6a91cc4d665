mod cli;
mod file;

pub use cli::{Cli, Command};

use std::fmt;

use spen_adapter::{
    Action, Clock, GuardSettings, HoverBehavior, MappingConfig, Rotation, ScreenTransform,
    StylusEngine,
};

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub tap_action: Action,
    pub barrel_action: Action,
    pub hover_behavior: HoverBehavior,
    pub pressure_threshold: f32,
    pub require_contact_for_click: bool,
    pub guard_time_ms: u64,
    pub guard_radius_px: f32,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub rotation: Rotation,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();
        let screen = file_config.screen;

        Self {
            tap_action: cli.tap_action.unwrap_or(file_config.tap_action),
            barrel_action: cli.barrel_action.unwrap_or(file_config.barrel_action),
            hover_behavior: cli.hover_behavior.unwrap_or(file_config.hover_behavior),
            pressure_threshold: cli
                .pressure_threshold
                .unwrap_or(file_config.pressure_threshold),
            require_contact_for_click: !cli.no_require_contact
                && file_config.require_contact_for_click,
            guard_time_ms: cli.guard_time_ms.unwrap_or(file_config.guard_time_ms),
            guard_radius_px: cli.guard_radius_px.unwrap_or(file_config.guard_radius_px),
            screen_width: cli.screen_width.or(screen.map(|s| s.width)),
            screen_height: cli.screen_height.or(screen.map(|s| s.height)),
            rotation: cli
                .rotation
                .or(screen.map(|s| s.rotation))
                .unwrap_or_default(),
        }
    }

    pub fn mapping(&self) -> MappingConfig {
        MappingConfig {
            tap_action: self.tap_action,
            barrel_action: self.barrel_action,
            hover_behavior: self.hover_behavior,
            pressure_threshold: self.pressure_threshold,
        }
    }

    pub fn guard(&self) -> GuardSettings {
        GuardSettings {
            duration_ms: self.guard_time_ms,
            radius_px: self.guard_radius_px,
        }
    }

    pub fn screen(&self) -> Option<ScreenTransform> {
        match (self.screen_width, self.screen_height) {
            (Some(width), Some(height)) => {
                Some(ScreenTransform::new(width, height).with_rotation(self.rotation))
            }
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.pressure_threshold.is_finite() {
            return Err("Pressure threshold must be a finite number");
        }
        if !(self.guard_radius_px >= 0.0) {
            return Err("Guard radius must not be negative");
        }
        if self.screen_width.is_some() != self.screen_height.is_some() {
            return Err("Screen width and height must be given together");
        }
        if self.screen_width == Some(0) || self.screen_height == Some(0) {
            return Err("Screen dimensions must be non-zero");
        }
        Ok(())
    }

    pub fn apply<C: Clock>(&self, engine: &mut StylusEngine<C>) {
        engine.configure_mapping(self.mapping());
        engine.configure_hover_guard(self.guard());
        engine.set_require_contact_for_click(self.require_contact_for_click);
        match self.screen() {
            Some(screen) => engine.set_coordinate_transform(move |x, y| screen.apply(x, y)),
            None => engine.clear_coordinate_transform(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tap_action = \"{}\"", self.tap_action)?;
        writeln!(f, "barrel_action = \"{}\"", self.barrel_action)?;
        writeln!(f, "hover_behavior = \"{}\"", self.hover_behavior)?;
        writeln!(f, "pressure_threshold = {:?}", self.pressure_threshold)?;
        writeln!(f, "require_contact_for_click = {}", self.require_contact_for_click)?;
        writeln!(f, "guard_time_ms = {}", self.guard_time_ms)?;
        write!(f, "guard_radius_px = {:?}", self.guard_radius_px)?;
        if let Some(screen) = self.screen() {
            write!(
                f,
                "\n\n[screen]\nwidth = {}\nheight = {}\nrotation = \"{}\"",
                screen.width, screen.height, screen.rotation
            )?;
        }
        Ok(())
    }
}
