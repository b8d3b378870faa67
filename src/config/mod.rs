//! Runtime configuration
//!
//! Loaded from an optional TOML file; every field has a default so a bare
//! `autocut run <folder>` works without one. CLI flags override file values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AutoCutError, AutoCutResult};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Padding kept around detected loud spans, in seconds
    pub margin_sec: f64,
    /// External tool locations
    pub tools: ToolPaths,
    /// Export options
    pub export: ExportOptions,
}

/// External tool binaries, resolved through PATH unless overridden
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub ffmpeg: String,
    pub ffprobe: String,
    pub auto_editor: String,
    pub whisper: String,
}

/// FCPXML export options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Project name embedded in the FCPXML document
    pub project_name: String,
    /// Output file name, relative to the input folder
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            margin_sec: 0.2,
            tools: ToolPaths::default(),
            export: ExportOptions::default(),
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            auto_editor: "auto-editor".to_string(),
            whisper: "whisper".to_string(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            project_name: "autocut".to_string(),
            output_file: "timeline.fcpxml".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AutoCutResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| AutoCutError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        toml::from_str(&content).map_err(|e| AutoCutError::ConfigError {
            message: format!("cannot parse {}: {}", path.display(), e),
        })
    }

    /// Load the given file, or fall back to defaults when none was passed
    pub fn load_or_default(path: Option<&Path>) -> AutoCutResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Margin in the form the detection tool expects ("0.2sec")
    pub fn margin_arg(&self) -> String {
        format!("{}sec", self.margin_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.margin_sec, 0.2);
        assert_eq!(config.tools.auto_editor, "auto-editor");
        assert_eq!(config.export.output_file, "timeline.fcpxml");
        assert_eq!(config.margin_arg(), "0.2sec");
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "margin_sec = 0.5\n\n[tools]\nffmpeg = \"/opt/ffmpeg\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.margin_sec, 0.5);
        assert_eq!(config.tools.ffmpeg, "/opt/ffmpeg");
        assert_eq!(config.tools.ffprobe, "ffprobe");
        assert_eq!(config.export.project_name, "autocut");
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "margin_sec = [not toml").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(AutoCutError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.margin_sec, 0.2);
    }
}
