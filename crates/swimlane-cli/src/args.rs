//! Command-line argument definitions for the swimlane CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input mode, the output directory,
//! the configuration file and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the swimlane process tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input token file, or to plain text with `--rules`
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Tag the input as plain text with the built-in keyword rules
    #[arg(long)]
    pub rules: bool,

    /// Directory receiving the diagram, artifacts and result JSON
    #[arg(short, long, default_value = "out")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
