//! DHCN CLI
//!
//! Driver for the DHCN simulations. Every subcommand prints a short
//! human-readable summary, or the full series as JSON with `--json`.
//!
//! # Commands
//!
//! - `crystal`: evolve the spacetime crystal
//! - `dilation`: bandwidth time dilation of a moving clock
//! - `inertia`: constant force against the bandwidth limit
//! - `galaxy`: Newtonian vs entropic rotation curves
//! - `interference`: two-slit path summation
//! - `expansion`: decelerating then accelerating expansion

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

/// DHCN simulation driver
#[derive(Parser)]
#[command(name = "dhcn")]
#[command(version)]
#[command(about = "Finite-bandwidth network simulations")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve the spacetime crystal and report order and edge counts
    Crystal(commands::CrystalArgs),
    /// Compare a static and a moving internal clock
    Dilation(commands::DilationArgs),
    /// Push an agent with a constant force
    Inertia(commands::InertiaArgs),
    /// Galaxy rotation curves with and without the entropic term
    Galaxy(commands::GalaxyArgs),
    /// Two-slit interference, wave vs particle mode
    Interference(commands::InterferenceArgs),
    /// Expansion history and the cosmic jerk
    Expansion(commands::ExpansionArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Crystal(args) => commands::run_crystal(args),
        Commands::Dilation(args) => commands::run_dilation(args),
        Commands::Inertia(args) => commands::run_inertia(args),
        Commands::Galaxy(args) => commands::run_galaxy(args),
        Commands::Interference(args) => commands::run_interference(args),
        Commands::Expansion(args) => commands::run_expansion(args),
    }
}
