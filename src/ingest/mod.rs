//! Ingest pass
//!
//! Populates the timeline with one asset and one full-duration base clip per
//! source video, back to back in sorted file order. Everything downstream
//! (loud-map generation, segmentation, preview concatenation) relies on this
//! registration order.

use std::path::Path;

use tracing::info;

use crate::error::AutoCutResult;
use crate::timeline::Timeline;
use crate::tools::ffmpeg::Ffmpeg;
use crate::utils;

/// Probe every video under `folder` and place it on the timeline
pub fn populate_timeline(
    timeline: &mut Timeline,
    folder: &Path,
    ffmpeg: &Ffmpeg,
) -> AutoCutResult<()> {
    for video in utils::video_files(folder) {
        let probe = ffmpeg.probe(&video)?;
        let duration = probe.frame_rate.frames_from_seconds(probe.duration_sec);
        let name = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let id = timeline.register_asset(&name, probe.frame_rate, duration);
        timeline.append_base_clip(&id)?;
        timeline.recompute_total_duration();

        info!(
            asset = %id,
            name = %name,
            frames = duration,
            rate = %probe.frame_rate,
            "placed base clip"
        );
    }
    Ok(())
}
