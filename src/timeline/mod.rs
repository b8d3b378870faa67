// Timeline store - resources, placed clip items, cumulative duration

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AutoCutError, AutoCutResult};

/// Tag key marking a clip as a silent span. Exported verbatim into FCPXML.
pub const SILENT_TAG: &str = "silent";

/// Rational frame-rate descriptor - all frame arithmetic stays integral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub num: u32,
    pub den: u32,
}

impl FrameRate {
    /// Create a new frame rate
    pub fn new(num: u32, den: u32) -> AutoCutResult<Self> {
        if num == 0 || den == 0 {
            return Err(AutoCutError::InvalidFrameRate {
                value: format!("{}/{}", num, den),
            });
        }
        Ok(Self { num, den })
    }

    /// Parse a frame-rate descriptor in "30" or "30000/1001" form
    pub fn parse(value: &str) -> AutoCutResult<Self> {
        let trimmed = value.trim();
        let invalid = || AutoCutError::InvalidFrameRate {
            value: trimmed.to_string(),
        };

        match trimmed.split_once('/') {
            Some((num, den)) => {
                let num = num.trim().parse::<u32>().map_err(|_| invalid())?;
                let den = den.trim().parse::<u32>().map_err(|_| invalid())?;
                Self::new(num, den)
            }
            None => {
                let num = trimmed.parse::<u32>().map_err(|_| invalid())?;
                Self::new(num, 1)
            }
        }
    }

    /// Frames per second as a float, for display and probe conversions only
    pub fn fps(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Convert a duration in seconds to the nearest whole frame count
    pub fn frames_from_seconds(&self, seconds: f64) -> u64 {
        (seconds * self.fps()).round() as u64
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// A source video resource. Created once at ingest, never mutated; sub-clips
/// derived during segmentation keep referencing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Opaque resource id ("r1", "r2", ...)
    pub id: String,
    /// Source file name
    pub filename: String,
    /// Native frame rate
    pub frame_rate: FrameRate,
    /// Total duration in frames
    pub duration: u64,
}

/// Distinguishes the single full-duration clip placed at ingest from the
/// sub-clips the segmentation engine emits. A segment covering a whole asset
/// (empty or full-coverage loud map) would otherwise be indistinguishable
/// from a base clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipRole {
    Base,
    Segment,
}

/// A segment placed on the output sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipItem {
    /// Referenced asset id (non-owning)
    pub asset_id: String,
    /// Display name
    pub name: String,
    /// Position within the asset's own media, in frames
    pub source_in: u64,
    /// Absolute position on the output sequence, in frames
    pub offset: u64,
    /// Duration in frames
    pub duration: u64,
    /// Frame rate
    pub frame_rate: FrameRate,
    /// Base clip or engine-emitted segment
    pub role: ClipRole,
    /// Custom key/value tags carried into the exported FCPXML
    pub tags: BTreeMap<String, String>,
}

impl ClipItem {
    /// First frame past this clip within the asset's media
    pub fn source_out(&self) -> u64 {
        self.source_in + self.duration
    }

    /// Whether this clip was tagged as a silent span
    pub fn is_silent(&self) -> bool {
        self.tags.get(SILENT_TAG).map(String::as_str) == Some("true")
    }
}

/// The ordered collection of all clip items plus a cached cumulative
/// duration. Mutated only by append/remove; the cached duration is refreshed
/// by summing surviving clip durations, never by incremental arithmetic.
#[derive(Debug, Default)]
pub struct Timeline {
    assets: Vec<Asset>,
    clips: Vec<ClipItem>,
    total_duration: u64,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source asset and return its resource id. Assets keep their
    /// registration order; the engine processes them in exactly this order.
    pub fn register_asset(
        &mut self,
        filename: &str,
        frame_rate: FrameRate,
        duration: u64,
    ) -> String {
        let id = format!("r{}", self.assets.len() + 1);
        self.assets.push(Asset {
            id: id.clone(),
            filename: filename.to_string(),
            frame_rate,
            duration,
        });
        id
    }

    /// Look up an asset by resource id
    pub fn asset(&self, asset_id: &str) -> AutoCutResult<&Asset> {
        self.assets
            .iter()
            .find(|a| a.id == asset_id)
            .ok_or_else(|| AutoCutError::AssetNotFound {
                asset: asset_id.to_string(),
            })
    }

    /// All registered assets, in registration order
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Resource ids in registration order
    pub fn asset_refs(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.id.clone()).collect()
    }

    /// All placed clips, in placement order
    pub fn clips(&self) -> &[ClipItem] {
        &self.clips
    }

    /// Cached cumulative duration in frames. Subsequent assets read this as
    /// their placement base, so it must only change via
    /// [`recompute_total_duration`](Self::recompute_total_duration).
    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    /// Place an asset's single full-duration base clip at the end of the
    /// sequence. Used at ingest, before any segmentation.
    pub fn append_base_clip(&mut self, asset_id: &str) -> AutoCutResult<()> {
        let asset = self.asset(asset_id)?;
        let clip = ClipItem {
            asset_id: asset.id.clone(),
            name: asset.filename.clone(),
            source_in: 0,
            offset: self.total_duration,
            duration: asset.duration,
            frame_rate: asset.frame_rate,
            role: ClipRole::Base,
            tags: BTreeMap::new(),
        };
        self.clips.push(clip);
        Ok(())
    }

    /// Append a segment clip. This is a pure insert: offsets are not checked
    /// for overlap, correctness is entirely the caller's responsibility.
    #[allow(clippy::too_many_arguments)]
    pub fn append_clip(
        &mut self,
        asset_id: &str,
        duration: u64,
        source_in: u64,
        offset: u64,
        frame_rate: FrameRate,
        name: &str,
        tags: BTreeMap<String, String>,
    ) -> AutoCutResult<()> {
        let asset = self.asset(asset_id)?;
        let clip = ClipItem {
            asset_id: asset.id.clone(),
            name: name.to_string(),
            source_in,
            offset,
            duration,
            frame_rate,
            role: ClipRole::Segment,
            tags,
        };
        self.clips.push(clip);
        Ok(())
    }

    /// The full-duration clip currently representing an asset, prior to
    /// segmentation. Fails if the asset was never ingested or has already
    /// been segmented.
    pub fn base_clip(&self, asset_id: &str) -> AutoCutResult<&ClipItem> {
        self.clips
            .iter()
            .find(|c| c.role == ClipRole::Base && c.asset_id == asset_id)
            .ok_or_else(|| AutoCutError::BaseClipNotFound {
                asset: asset_id.to_string(),
            })
    }

    /// Delete an asset's original full-duration clip from the sequence
    pub fn remove_base_clip(&mut self, asset_id: &str) -> AutoCutResult<()> {
        let position = self
            .clips
            .iter()
            .position(|c| c.role == ClipRole::Base && c.asset_id == asset_id)
            .ok_or_else(|| AutoCutError::BaseClipNotFound {
                asset: asset_id.to_string(),
            })?;
        self.clips.remove(position);
        Ok(())
    }

    /// Refresh the cached total by summing all surviving clip durations.
    /// Called once per asset after its segmentation completes, not per
    /// sub-clip, so later assets read a consistent placement base.
    pub fn recompute_total_duration(&mut self) -> u64 {
        self.total_duration = self.clips.iter().map(|c| c.duration).sum();
        self.total_duration
    }
}
