use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Dust particle simulation engine.
#[derive(Parser)]
#[command(
    name = "dust",
    version,
    about = "Particle simulation engine for stochastic state-space models"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate the configured model and report per-time particle means.
    Simulate(SimulateArgs),
    /// Run a bootstrap particle filter against the configured data.
    Filter(FilterArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "dust.toml")]
    pub config: PathBuf,

    /// Write JSON output here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `filter` subcommand.
#[derive(clap::Args)]
pub struct FilterArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "dust.toml")]
    pub config: PathBuf,

    /// Write JSON output here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
