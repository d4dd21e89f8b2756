//! CLI module for the content-experiment gateway
//!
//! Subcommands:
//! - `serve`: run the decision API server
//! - `decide`: make a one-shot decision and print it as JSON

pub mod decide;
pub mod serve;

use clap::{Parser, Subcommand};

/// Content-experiment gateway - server-side variation decisions
#[derive(Parser)]
#[command(name = "cx-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the decision API server
    Serve,

    /// Decide a variation once and print the result
    Decide(decide::DecideArgs),
}
