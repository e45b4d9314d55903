//! liftdfa - elevator console driven by a finite automaton
//!
//! Provides both a REPL and one-shot command execution.

mod commands;
mod config;
mod render;
mod repl;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use liftdfa_core::Elevator;
use render::Renderer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "liftdfa")]
#[command(about = "Elevator console driven by a deterministic finite automaton")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file (defaults to $LIFTDFA_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Highest floor served (floors are 0..=N)
    #[arg(short, long)]
    floors: Option<u32>,

    /// Disable the floor-by-floor animation
    #[arg(long)]
    no_animate: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start interactive REPL
    Repl,

    /// Travel through a sequence of floors
    Go {
        /// Target floors, visited in order
        #[arg(required = true, allow_negative_numbers = true)]
        floors: Vec<i64>,
    },

    /// Print the bitstring encoding a trip
    Encode {
        /// Starting floor
        from: u32,

        /// Target floor
        to: u32,
    },

    /// Execute a raw bitstring on the movement automaton
    Run {
        /// Input over the alphabet {0, 1}
        input: String,
    },

    /// Show the elevator status
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the effective configuration to a YAML file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };

    // Command-line flags override file and environment
    if let Some(floors) = cli.floors {
        config.elevator.floors = floors;
    }
    if cli.no_animate {
        config.display.animate = false;
    }
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }
    if !config.display.color {
        colored::control::set_override(false);
    }

    tracing::debug!(
        "Elevator with floors 0..={}, animation {}",
        config.elevator.floors,
        if config.display.animate { "on" } else { "off" }
    );

    let mut elevator = Elevator::new(config.elevator.floors);
    let renderer = Renderer::new(&config.display);

    match cli.command {
        Some(Commands::Repl) | None => {
            repl::run(&mut elevator, &renderer)?;
        }
        Some(Commands::InitConfig { path }) => {
            config.save(&path)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        Some(cmd) => match commands::execute(&mut elevator, &renderer, cmd) {
            Ok(output) => {
                println!("{}", output);
            }
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
