//! Segmentation engine
//!
//! Rewrites each asset's single full-duration clip into an ordered run of
//! tagged sub-clips that losslessly partitions the asset into silent and
//! loud spans, aligned to an externally produced loud map. Assets are
//! processed strictly in registration order: each asset's placement offsets
//! depend on the exact cumulative duration left behind by every prior one.

pub mod segmenter;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::AutoCutResult;
use crate::loudmap::LoudMapSource;
use crate::timeline::{Timeline, SILENT_TAG};

pub use segmenter::{plan_segments, Segment};

/// Drives the per-asset segmentation pass against the timeline store
#[derive(Debug, Default)]
pub struct SilenceCutter;

impl SilenceCutter {
    pub fn new() -> Self {
        Self
    }

    /// Replace every asset's base clip with tagged sub-clips, in
    /// registration order, then leave the store's cached total consistent.
    ///
    /// A failure while loading one asset's loud map aborts the run before
    /// any mutation for that asset, so it stays in its pre-segmentation
    /// state for a retry.
    pub fn cut_clips<S: LoudMapSource>(
        &self,
        timeline: &mut Timeline,
        maps: &S,
    ) -> AutoCutResult<()> {
        // Cumulative duration of already-segmented assets, threaded as an
        // explicit value rather than read back from the store, which still
        // holds the not-yet-segmented base clips.
        let mut base = 0u64;

        for asset_id in timeline.asset_refs() {
            base = self.cut_asset(timeline, maps, &asset_id, base)?;
        }
        Ok(())
    }

    /// Segment one asset against its loud map. `base` is the sequence
    /// duration contributed by all previously segmented assets; returns the
    /// base for the next asset.
    fn cut_asset<S: LoudMapSource>(
        &self,
        timeline: &mut Timeline,
        maps: &S,
        asset_id: &str,
        base: u64,
    ) -> AutoCutResult<u64> {
        // Load everything before mutating anything
        let (name, total, map) = {
            let clip = timeline.base_clip(asset_id)?;
            let name = clip.name.clone();
            let total = clip.duration;
            let map = maps.loud_map(&name)?;
            (name, total, map)
        };

        let segments = plan_segments(total, &map.intervals, base);
        debug!(
            asset = asset_id,
            intervals = map.intervals.len(),
            segments = segments.len(),
            base,
            "planned segmentation"
        );

        for segment in &segments {
            let mut tags = BTreeMap::new();
            if segment.silent {
                tags.insert(SILENT_TAG.to_string(), "true".to_string());
            }
            timeline.append_clip(
                asset_id,
                segment.duration,
                segment.source_in,
                segment.offset,
                map.timebase,
                &name,
                tags,
            )?;
        }

        timeline.remove_base_clip(asset_id)?;
        timeline.recompute_total_duration();

        info!(
            asset = asset_id,
            name = %name,
            segments = segments.len(),
            "segmented asset"
        );
        Ok(base + total)
    }
}

#[cfg(test)]
mod tests;
