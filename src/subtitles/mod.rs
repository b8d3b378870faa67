//! Subtitle pass
//!
//! Thin boundary around the external speech-to-text tool. The SRT is
//! written next to the transcribed video.

use std::path::Path;

use tracing::info;

use crate::error::AutoCutResult;
use crate::tools::whisper::Whisper;

/// Transcribe a rendered video into an SRT file alongside it
pub fn generate_subtitles(video: &Path, whisper: &Whisper) -> AutoCutResult<()> {
    let output_dir = video.parent().unwrap_or_else(|| Path::new("."));
    info!(video = %video.display(), "generating subtitles");
    whisper.transcribe(video, output_dir)?;
    Ok(())
}
