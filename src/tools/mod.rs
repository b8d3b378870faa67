//! External tool boundary
//!
//! Every long-running step delegates to an external binary: ffmpeg/ffprobe
//! for media handling, auto-editor for silence detection and previews,
//! whisper for speech-to-text. Non-zero exits surface as
//! [`ExternalToolFailure`](crate::error::AutoCutError::ExternalToolFailure)
//! carrying the tool's own diagnostics; nothing here retries.

pub mod auto_editor;
pub mod ffmpeg;
pub mod whisper;

use std::process::{Command, Output};

use tracing::debug;

use crate::error::{AutoCutError, AutoCutResult};

/// Run a prepared command, capturing output and mapping failure to
/// `ExternalToolFailure` with the tool's stderr.
pub(crate) fn run_tool(tool: &str, command: &mut Command) -> AutoCutResult<Output> {
    debug!(tool, command = ?command, "invoking external tool");

    let output = command
        .output()
        .map_err(|e| AutoCutError::ExternalToolFailure {
            tool: tool.to_string(),
            detail: format!("failed to launch: {}", e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr.trim().to_string()
        };
        return Err(AutoCutError::ExternalToolFailure {
            tool: tool.to_string(),
            detail,
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tool_missing_binary() {
        let result = run_tool(
            "no-such-tool",
            &mut Command::new("autocut-definitely-not-installed"),
        );
        assert!(matches!(
            result,
            Err(AutoCutError::ExternalToolFailure { tool, .. }) if tool == "no-such-tool"
        ));
    }

    #[test]
    fn test_run_tool_captures_failure() {
        // `false` exits non-zero with empty stderr
        let result = run_tool("false", &mut Command::new("false"));
        match result {
            Err(AutoCutError::ExternalToolFailure { detail, .. }) => {
                assert!(detail.contains("exited with"));
            }
            other => panic!("expected tool failure, got {:?}", other.map(|_| ())),
        }
    }
}
