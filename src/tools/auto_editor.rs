//! auto-editor invocations (silence detection and preview renders)

use std::path::Path;
use std::process::Command;

use crate::error::AutoCutResult;
use crate::tools::run_tool;

/// Wrapper for the auto-editor binary
#[derive(Debug, Clone)]
pub struct AutoEditor {
    binary: String,
    /// Margin argument in the tool's "0.2sec" form
    margin: String,
}

impl AutoEditor {
    pub fn new(binary: &str, margin: &str) -> Self {
        Self {
            binary: binary.to_string(),
            margin: margin.to_string(),
        }
    }

    /// Export a video's loud map as JSON. The written document uses the
    /// tool's own field names; see the loudmap module for the remap.
    pub fn export_loud_map(&self, video: &Path, output: &Path) -> AutoCutResult<()> {
        run_tool(
            "auto-editor",
            Command::new(&self.binary)
                .arg(video)
                .args(["--export-as-json", "--margin", &self.margin, "--output-file"])
                .arg(output),
        )?;
        Ok(())
    }

    /// Render a loud-parts-only preview for one video
    pub fn render_preview(&self, video: &Path, output: &Path) -> AutoCutResult<()> {
        run_tool(
            "auto-editor",
            Command::new(&self.binary)
                .arg(video)
                .args(["--margin", &self.margin, "--output-file"])
                .arg(output)
                .arg("--no-open"),
        )?;
        Ok(())
    }
}
