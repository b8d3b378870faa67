// Silence segmentation planner - pure cursor walk over one asset's loud map

use crate::loudmap::LoudInterval;

/// One planned sub-clip of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Position within the asset's media, in frames
    pub source_in: u64,
    /// Duration in frames
    pub duration: u64,
    /// Absolute position on the output sequence, in frames
    pub offset: u64,
    /// Emitted from a gap between loud intervals
    pub silent: bool,
}

/// Partition `[0, total)` of one asset into alternating silent/loud segments
/// aligned to its loud intervals. `base` is the cumulative sequence duration
/// contributed by every previously processed asset; each segment lands at
/// `base + source_in` because this pass only tags frames, it never removes
/// them.
///
/// Intervals are trusted sorted and disjoint and are not revalidated here.
/// Zero-duration gaps emit nothing; an empty interval list yields a single
/// silent segment spanning the whole asset.
pub fn plan_segments(total: u64, intervals: &[LoudInterval], base: u64) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0u64;

    for interval in intervals {
        // Gap before this loud interval becomes a silent segment
        if interval.start > cursor {
            segments.push(Segment {
                source_in: cursor,
                duration: interval.start - cursor,
                offset: base + cursor,
                silent: true,
            });
            cursor = interval.start;
        }

        segments.push(Segment {
            source_in: cursor,
            duration: interval.duration,
            offset: base + cursor,
            silent: false,
        });
        cursor += interval.duration;
    }

    // Trailing frames past the last loud interval
    if cursor < total {
        segments.push(Segment {
            source_in: cursor,
            duration: total - cursor,
            offset: base + cursor,
            silent: true,
        });
    }

    segments
}
