//! Command-line configuration module.

use std::path::PathBuf;

use clap::Parser;

/// Run-time configuration of the game, parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Number of columns in the maze.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,
    /// Number of rows in the maze.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: u16,
    /// Seed for maze generation; a random one is used when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File that receives the game log; logging is off when omitted.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
