//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Folder with the video files to be edited
    pub input: PathBuf,

    /// Skip the preprocessing step and read the folder as-is
    #[arg(long)]
    pub skip_preprocess: bool,

    /// Reuse the preprocessed folder left by a previous run
    #[arg(long, conflicts_with = "skip_preprocess")]
    pub already_preprocessed: bool,

    /// Skip the preview render and subtitle pass
    #[arg(long)]
    pub skip_subtitles: bool,

    /// Padding kept around detected loud spans, in seconds
    #[arg(long)]
    pub margin: Option<f64>,

    /// Output FCPXML path (default: <input>/timeline.fcpxml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, env = "AUTOCUT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the subtitles command
#[derive(Args, Debug)]
pub struct SubtitlesArgs {
    /// Video file to transcribe
    pub input: PathBuf,

    /// Path to a TOML configuration file
    #[arg(long, env = "AUTOCUT_CONFIG")]
    pub config: Option<PathBuf>,
}
