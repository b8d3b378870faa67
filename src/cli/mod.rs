//! CLI module for AutoCut
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// AutoCut CLI
///
/// Turns a folder of raw video clips into an FCPXML edit with silent
/// regions tagged for removal and a subtitle pass over the loud parts.
#[derive(Parser)]
#[command(name = "autocut")]
#[command(about = "AutoCut - silence-tagged FCPXML edits from raw footage")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build a silence-tagged FCPXML project from a folder of clips
    Run(args::RunArgs),
    /// Generate subtitles for an already rendered video
    Subtitles(args::SubtitlesArgs),
}
