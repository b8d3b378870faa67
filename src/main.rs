//! AutoCut CLI
//!
//! Turns a folder of raw video clips into an FCPXML edit with silent
//! regions tagged for removal and a subtitle pass over the loud parts.
//!
//! # Usage
//!
//! ```bash
//! autocut run ./footage
//! autocut run ./footage --skip-preprocess --margin 0.3
//! autocut subtitles ./footage/remove_silence/final_preview.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use autocut_cli::cli::{commands, Cli, Commands};

/// Main entry point for the AutoCut CLI application
fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute the requested command
    match cli.command {
        Commands::Run(args) => {
            info!("Executing run command");
            commands::run(args)?;
        }
        Commands::Subtitles(args) => {
            info!("Executing subtitles command");
            commands::subtitles(args)?;
        }
    }

    Ok(())
}
