//! Error handling module for AutoCut

use thiserror::Error;

/// Main error type for AutoCut operations
#[derive(Error, Debug)]
pub enum AutoCutError {
    /// Referenced asset was never registered on the timeline
    #[error("Asset not found on timeline: {asset}")]
    AssetNotFound { asset: String },

    /// Asset has no full-duration base clip (never ingested, or already segmented)
    #[error("No base clip on timeline for asset: {asset}")]
    BaseClipNotFound { asset: String },

    /// Loud-map file for an asset is missing
    #[error("Loud map not found: {path}")]
    LoudMapNotFound { path: String },

    /// Loud-map document could not be interpreted
    #[error("Malformed loud map {path}: {reason}")]
    MalformedLoudMap { path: String, reason: String },

    /// Invalid frame-rate descriptor
    #[error("Invalid frame rate: {value}")]
    InvalidFrameRate { value: String },

    /// An external tool exited with a non-zero status
    #[error("{tool} failed: {detail}")]
    ExternalToolFailure { tool: String, detail: String },

    /// Configuration file error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// FCPXML write error
    #[error("FCPXML export failed: {message}")]
    ExportError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for AutoCut operations
pub type AutoCutResult<T> = std::result::Result<T, AutoCutError>;
