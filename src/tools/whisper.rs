//! Speech-to-text invocation

use std::path::Path;
use std::process::Command;

use crate::error::AutoCutResult;
use crate::tools::run_tool;

/// Wrapper for the whisper transcription binary
#[derive(Debug, Clone)]
pub struct Whisper {
    binary: String,
}

impl Whisper {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }

    /// Transcribe a video, writing an SRT file into `output_dir`
    pub fn transcribe(&self, video: &Path, output_dir: &Path) -> AutoCutResult<()> {
        run_tool(
            "whisper",
            Command::new(&self.binary)
                .arg(video)
                .args(["--output_format", "srt", "--output_dir"])
                .arg(output_dir),
        )?;
        Ok(())
    }
}
