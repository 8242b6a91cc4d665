use clap::{Parser, Subcommand};
use std::path::PathBuf;

use spen_adapter::{Action, HoverBehavior, Rotation};

#[derive(Parser)]
#[command(name = "spen-replay")]
#[command(about = "Replay S-Pen event scripts through the stylus engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// What touching the screen with the tip does
    #[arg(long, value_parser = clap::value_parser!(Action))]
    pub tap_action: Option<Action>,

    /// What the barrel (side) button does
    #[arg(long, value_parser = clap::value_parser!(Action))]
    pub barrel_action: Option<Action>,

    /// How hovering is reported (disabled, cursor, lightgun-tracking)
    #[arg(long, value_parser = clap::value_parser!(HoverBehavior))]
    pub hover_behavior: Option<HoverBehavior>,

    /// Minimum pressure for a hover to fire the tap action
    #[arg(long)]
    pub pressure_threshold: Option<f32>,

    /// Let the barrel button alone report the pointer as pressed
    #[arg(long)]
    pub no_require_contact: bool,

    /// Phantom-touch guard window after a hover, in milliseconds
    #[arg(long)]
    pub guard_time_ms: Option<u64>,

    /// Phantom-touch guard radius around the hover point, in pixels
    #[arg(long)]
    pub guard_radius_px: Option<f32>,

    /// Emulated screen width; enables the coordinate transform together with --screen-height
    #[arg(long)]
    pub screen_width: Option<u32>,

    /// Emulated screen height
    #[arg(long)]
    pub screen_height: Option<u32>,

    /// Screen rotation (none, clockwise, counter-clockwise, upside-down)
    #[arg(long, value_parser = clap::value_parser!(Rotation))]
    pub rotation: Option<Rotation>,

    /// Path to config file
    #[arg(long, env = "SPEN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Feed an event script to the engine and print query results
    Replay {
        /// Script file; reads stdin when omitted
        script: Option<PathBuf>,

        /// Value reported for queries passed through to the core's input API
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        fallback_value: i16,
    },
    /// Print the effective configuration
    Config,
}
