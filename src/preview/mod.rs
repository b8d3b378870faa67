//! Preview renders and concatenation
//!
//! Builds a loud-parts-only preview per asset and joins them into one file.
//! The concat list is written in asset registration order, never directory
//! order: subtitle timing derived from the joined preview has to line up
//! with the sequence placement offsets the engine computed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AutoCutResult;
use crate::timeline::Timeline;
use crate::tools::auto_editor::AutoEditor;
use crate::tools::ffmpeg::Ffmpeg;
use crate::utils;

/// Suffix for per-asset preview renders
pub const PREVIEW_SUFFIX: &str = "_preview.mp4";
/// Joined preview file name
pub const FINAL_PREVIEW: &str = "final_preview.mp4";
const LIST_FILE: &str = "videos.txt";

/// Builds per-asset previews and the joined preview video
pub struct PreviewBuilder<'a> {
    work_dir: PathBuf,
    auto_editor: &'a AutoEditor,
    ffmpeg: &'a Ffmpeg,
}

impl<'a> PreviewBuilder<'a> {
    pub fn new(work_dir: impl Into<PathBuf>, auto_editor: &'a AutoEditor, ffmpeg: &'a Ffmpeg) -> Self {
        Self {
            work_dir: work_dir.into(),
            auto_editor,
            ffmpeg,
        }
    }

    /// Render a preview for every asset and concatenate them; returns the
    /// joined preview path.
    pub fn build(&self, timeline: &Timeline, videos_folder: &Path) -> AutoCutResult<PathBuf> {
        fs::create_dir_all(&self.work_dir)?;

        let mut rendered = Vec::new();
        for asset in timeline.assets() {
            let source = videos_folder.join(&asset.filename);
            let output = self
                .work_dir
                .join(format!("{}{}", utils::file_stem(&asset.filename), PREVIEW_SUFFIX));
            self.auto_editor.render_preview(&source, &output)?;
            rendered.push(output);
        }

        let list_path = self.work_dir.join(LIST_FILE);
        fs::write(&list_path, concat_list(&rendered))?;

        let final_path = self.work_dir.join(FINAL_PREVIEW);
        if final_path.exists() {
            fs::remove_file(&final_path)?;
        }
        self.ffmpeg.concat(&list_path, &final_path)?;

        info!(
            previews = rendered.len(),
            output = %final_path.display(),
            "joined preview videos"
        );
        Ok(final_path)
    }
}

/// Body of an ffmpeg concat-demuxer list file
fn concat_list(paths: &[PathBuf]) -> String {
    let mut body = String::new();
    for path in paths {
        body.push_str(&format!("file '{}'\n", path.display()));
    }
    body
}
