//! ffmpeg and ffprobe invocations

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::error::{AutoCutError, AutoCutResult};
use crate::timeline::FrameRate;
use crate::tools::run_tool;

/// Probed facts about a source video
#[derive(Debug, Clone)]
pub struct ProbeInfo {
    pub duration_sec: f64,
    pub frame_rate: FrameRate,
}

#[derive(Debug, Deserialize)]
struct RawProbe {
    #[serde(default)]
    streams: Vec<RawStream>,
    format: RawFormat,
}

#[derive(Debug, Deserialize)]
struct RawStream {
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    duration: Option<String>,
}

/// ffmpeg/ffprobe wrapper
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg: String,
    ffprobe: String,
}

impl Ffmpeg {
    pub fn new(ffmpeg: &str, ffprobe: &str) -> Self {
        Self {
            ffmpeg: ffmpeg.to_string(),
            ffprobe: ffprobe.to_string(),
        }
    }

    /// Probe a video's duration and rational frame rate via ffprobe
    pub fn probe(&self, input: &Path) -> AutoCutResult<ProbeInfo> {
        let output = run_tool(
            "ffprobe",
            Command::new(&self.ffprobe)
                .args([
                    "-v",
                    "quiet",
                    "-print_format",
                    "json",
                    "-show_format",
                    "-show_streams",
                    "-select_streams",
                    "v:0",
                ])
                .arg(input),
        )?;

        let raw: RawProbe = serde_json::from_slice(&output.stdout)?;

        let probe_failure = |detail: String| AutoCutError::ExternalToolFailure {
            tool: "ffprobe".to_string(),
            detail: format!("{}: {}", input.display(), detail),
        };

        let stream = raw
            .streams
            .first()
            .ok_or_else(|| probe_failure("no video stream".to_string()))?;
        let rate_str = stream
            .r_frame_rate
            .as_deref()
            .or(stream.avg_frame_rate.as_deref())
            .ok_or_else(|| probe_failure("no frame rate reported".to_string()))?;
        let frame_rate = FrameRate::parse(rate_str)
            .map_err(|_| probe_failure(format!("unusable frame rate '{}'", rate_str)))?;

        let duration_sec = raw
            .format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| probe_failure("no duration reported".to_string()))?;

        Ok(ProbeInfo {
            duration_sec,
            frame_rate,
        })
    }

    /// Transcode a source into the uniform preprocessed format
    pub fn transcode(&self, input: &Path, output: &Path) -> AutoCutResult<()> {
        run_tool(
            "ffmpeg",
            Command::new(&self.ffmpeg)
                .arg("-i")
                .arg(input)
                .args([
                    "-c:v",
                    "libx264",
                    "-preset",
                    "fast",
                    "-crf",
                    "18",
                    "-c:a",
                    "aac",
                    "-b:a",
                    "192k",
                    "-movflags",
                    "+faststart",
                    "-y",
                ])
                .arg(output),
        )?;
        Ok(())
    }

    /// Concatenate previously rendered files listed in a concat-demuxer
    /// list file, stream-copying into `output`
    pub fn concat(&self, list_file: &Path, output: &Path) -> AutoCutResult<()> {
        run_tool(
            "ffmpeg",
            Command::new(&self.ffmpeg)
                .args(["-f", "concat", "-safe", "0", "-i"])
                .arg(list_file)
                .args(["-c", "copy", "-y"])
                .arg(output),
        )?;
        Ok(())
    }
}
