use serde::Deserialize;
use std::path::{Path, PathBuf};

use spen_adapter::guard::{DEFAULT_GUARD_RADIUS_PX, DEFAULT_GUARD_TIME_MS};
use spen_adapter::mapping::DEFAULT_PRESSURE_THRESHOLD;
use spen_adapter::{Action, HoverBehavior, Rotation};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub tap_action: Action,
    #[serde(default = "default_barrel_action")]
    pub barrel_action: Action,
    #[serde(default)]
    pub hover_behavior: HoverBehavior,
    #[serde(default = "default_pressure_threshold")]
    pub pressure_threshold: f32,
    #[serde(default = "default_true")]
    pub require_contact_for_click: bool,
    #[serde(default = "default_guard_time_ms")]
    pub guard_time_ms: u64,
    #[serde(default = "default_guard_radius_px")]
    pub guard_radius_px: f32,
    pub screen: Option<ScreenSection>,
}

/// `[screen]` table: registers a coordinate transform onto this resolution.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenSection {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub rotation: Rotation,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            tap_action: Action::default(),
            barrel_action: default_barrel_action(),
            hover_behavior: HoverBehavior::default(),
            pressure_threshold: DEFAULT_PRESSURE_THRESHOLD,
            require_contact_for_click: true,
            guard_time_ms: DEFAULT_GUARD_TIME_MS,
            guard_radius_px: DEFAULT_GUARD_RADIUS_PX,
            screen: None,
        }
    }
}

fn default_barrel_action() -> Action {
    Action::RightClick
}

fn default_pressure_threshold() -> f32 {
    DEFAULT_PRESSURE_THRESHOLD
}

fn default_guard_time_ms() -> u64 {
    DEFAULT_GUARD_TIME_MS
}

fn default_guard_radius_px() -> f32 {
    DEFAULT_GUARD_RADIUS_PX
}

fn default_true() -> bool {
    true
}

pub fn parse(content: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(content)
}

pub fn load_from_path(path: &Path) -> Option<FileConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match parse(&content) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

pub fn load_from_default_paths() -> Option<FileConfig> {
    default_config_paths()
        .into_iter()
        .filter(|path| path.exists())
        .find_map(|path| load_from_path(&path))
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("spen-adapter.toml")];

    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("spen-adapter.toml"));
    }

    paths
}
