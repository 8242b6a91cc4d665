mod config;
mod replay;
mod script;

use std::io::Read;

use clap::Parser;
use spen_adapter::{ManualClock, StylusEngine};

use config::{Cli, Command, Config};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load(&cli);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Some(Command::Config) => {
            println!("{}", config);
            Ok(())
        }
        Some(Command::Replay {
            script: script_path,
            fallback_value,
        }) => {
            let source = match script_path {
                Some(path) => std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
                None => {
                    let mut source = String::new();
                    std::io::stdin().read_to_string(&mut source)?;
                    source
                }
            };
            let steps = script::parse_script(&source)?;

            let clock = ManualClock::new();
            let mut engine = StylusEngine::with_clock(clock.clone());
            config.apply(&mut engine);

            log::info!(
                "replaying {} steps (tap={}, barrel={}, hover={}, guard={}ms/{}px)",
                steps.len(),
                config.tap_action,
                config.barrel_action,
                config.hover_behavior,
                config.guard_time_ms,
                config.guard_radius_px
            );

            let stdout = std::io::stdout();
            replay::run(&mut engine, &clock, &steps, fallback_value, &mut stdout.lock())?;
            Ok(())
        }
        None => {
            eprintln!("Usage: spen-replay [OPTIONS] <replay [SCRIPT] | config>");
            eprintln!("  Run with --help for the full list of options.");
            std::process::exit(1);
        }
    }
}
