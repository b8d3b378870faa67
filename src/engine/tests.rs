// Unit tests for the segmentation engine

use std::collections::HashMap;

use crate::engine::{plan_segments, Segment, SilenceCutter};
use crate::error::{AutoCutError, AutoCutResult};
use crate::loudmap::{LoudInterval, LoudMap, LoudMapSource};
use crate::timeline::{FrameRate, Timeline};

fn rate_30() -> FrameRate {
    FrameRate::new(30, 1).unwrap()
}

fn intervals(pairs: &[(u64, u64)]) -> Vec<LoudInterval> {
    pairs
        .iter()
        .map(|&(start, duration)| LoudInterval { start, duration })
        .collect()
}

/// In-memory loud-map source keyed by asset display name
#[derive(Default)]
struct FixtureMaps {
    maps: HashMap<String, LoudMap>,
}

impl FixtureMaps {
    fn with(mut self, name: &str, pairs: &[(u64, u64)]) -> Self {
        self.maps.insert(
            name.to_string(),
            LoudMap {
                timebase: rate_30(),
                intervals: intervals(pairs),
            },
        );
        self
    }
}

impl LoudMapSource for FixtureMaps {
    fn loud_map(&self, asset_name: &str) -> AutoCutResult<LoudMap> {
        self.maps
            .get(asset_name)
            .cloned()
            .ok_or_else(|| AutoCutError::LoudMapNotFound {
                path: asset_name.to_string(),
            })
    }
}

fn as_tuples(segments: &[Segment]) -> Vec<(u64, u64, bool)> {
    segments
        .iter()
        .map(|s| (s.source_in, s.duration, s.silent))
        .collect()
}

// Planner tests

#[test]
fn test_plan_alternating_silent_and_loud() {
    let segments = plan_segments(100, &intervals(&[(10, 20), (50, 10)]), 0);

    assert_eq!(
        as_tuples(&segments),
        vec![
            (0, 10, true),
            (10, 20, false),
            (30, 20, true),
            (50, 10, false),
            (60, 40, true),
        ]
    );
}

#[test]
fn test_plan_empty_map_is_one_silent_span() {
    let segments = plan_segments(50, &[], 0);
    assert_eq!(as_tuples(&segments), vec![(0, 50, true)]);
}

#[test]
fn test_plan_full_coverage_emits_no_silence() {
    let segments = plan_segments(100, &intervals(&[(0, 30), (30, 70)]), 0);
    assert_eq!(as_tuples(&segments), vec![(0, 30, false), (30, 70, false)]);
}

#[test]
fn test_plan_zero_gap_elision() {
    // First interval starts at 0: no leading silent segment
    let segments = plan_segments(100, &intervals(&[(0, 40)]), 0);
    assert_eq!(as_tuples(&segments), vec![(0, 40, false), (40, 60, true)]);
}

#[test]
fn test_plan_offsets_are_base_plus_source_in() {
    let segments = plan_segments(100, &intervals(&[(10, 20), (50, 10)]), 250);
    for segment in &segments {
        assert_eq!(segment.offset, 250 + segment.source_in);
    }
}

#[test]
fn test_plan_covers_asset_without_gaps_or_overlap() {
    let segments = plan_segments(100, &intervals(&[(10, 20), (50, 10)]), 0);

    let mut cursor = 0u64;
    for segment in &segments {
        assert_eq!(segment.source_in, cursor);
        assert!(segment.duration > 0);
        cursor = segment.source_in + segment.duration;
    }
    assert_eq!(cursor, 100);
    assert_eq!(segments.iter().map(|s| s.duration).sum::<u64>(), 100);
}

// Driver tests

fn ingest(timeline: &mut Timeline, filename: &str, duration: u64) -> String {
    let id = timeline.register_asset(filename, rate_30(), duration);
    timeline.append_base_clip(&id).unwrap();
    timeline.recompute_total_duration();
    id
}

#[test]
fn test_cut_clips_replaces_base_with_tagged_segments() {
    let mut timeline = Timeline::new();
    let id = ingest(&mut timeline, "talk.mp4", 100);

    let maps = FixtureMaps::default().with("talk.mp4", &[(10, 20), (50, 10)]);
    SilenceCutter::new().cut_clips(&mut timeline, &maps).unwrap();

    assert!(matches!(
        timeline.base_clip(&id),
        Err(AutoCutError::BaseClipNotFound { .. })
    ));

    let clips = timeline.clips();
    assert_eq!(clips.len(), 5);
    let silence: Vec<bool> = clips.iter().map(|c| c.is_silent()).collect();
    assert_eq!(silence, vec![true, false, true, false, true]);
    for clip in clips {
        assert_eq!(clip.asset_id, id);
        assert_eq!(clip.name, "talk.mp4");
        assert_eq!(clip.offset, clip.source_in);
    }
    assert_eq!(timeline.total_duration(), 100);
}

#[test]
fn test_cut_clips_second_asset_starts_after_first() {
    let mut timeline = Timeline::new();
    ingest(&mut timeline, "a.mp4", 100);
    ingest(&mut timeline, "b.mp4", 80);

    // First asset fully silent, second fully loud
    let maps = FixtureMaps::default()
        .with("a.mp4", &[])
        .with("b.mp4", &[(0, 80)]);
    SilenceCutter::new().cut_clips(&mut timeline, &maps).unwrap();

    let clips = timeline.clips();
    assert_eq!(clips.len(), 2);

    assert!(clips[0].is_silent());
    assert_eq!(clips[0].offset, 0);
    assert_eq!(clips[0].duration, 100);

    assert!(!clips[1].is_silent());
    assert_eq!(clips[1].offset, 100);
    assert_eq!(clips[1].duration, 80);

    assert_eq!(timeline.total_duration(), 180);
}

#[test]
fn test_cut_clips_preserves_registration_order() {
    let mut timeline = Timeline::new();
    let first = ingest(&mut timeline, "a.mp4", 60);
    let second = ingest(&mut timeline, "b.mp4", 60);

    let maps = FixtureMaps::default()
        .with("a.mp4", &[(0, 30)])
        .with("b.mp4", &[(30, 30)]);
    SilenceCutter::new().cut_clips(&mut timeline, &maps).unwrap();

    let owners: Vec<&str> = timeline
        .clips()
        .iter()
        .map(|c| c.asset_id.as_str())
        .collect();
    assert_eq!(owners, vec![first.as_str(), first.as_str(), second.as_str(), second.as_str()]);
}

#[test]
fn test_cut_clips_missing_map_leaves_asset_untouched() {
    let mut timeline = Timeline::new();
    let id = ingest(&mut timeline, "a.mp4", 100);

    let maps = FixtureMaps::default();
    let result = SilenceCutter::new().cut_clips(&mut timeline, &maps);

    assert!(matches!(result, Err(AutoCutError::LoudMapNotFound { .. })));
    // Zero sub-clips emitted, base clip still in place for a retry
    assert_eq!(timeline.clips().len(), 1);
    assert!(timeline.base_clip(&id).is_ok());
    assert_eq!(timeline.total_duration(), 100);
}

#[test]
fn test_cut_clips_failure_does_not_corrupt_later_assets() {
    let mut timeline = Timeline::new();
    let first = ingest(&mut timeline, "a.mp4", 100);
    let second = ingest(&mut timeline, "b.mp4", 80);

    // Map for the first asset only: the run aborts at the second
    let maps = FixtureMaps::default().with("a.mp4", &[(0, 100)]);
    let result = SilenceCutter::new().cut_clips(&mut timeline, &maps);

    assert!(matches!(result, Err(AutoCutError::LoudMapNotFound { .. })));

    // The first asset was segmented and its total committed; the second
    // stays in its pre-segmentation state
    assert!(matches!(
        timeline.base_clip(&first),
        Err(AutoCutError::BaseClipNotFound { .. })
    ));
    let remaining = timeline.base_clip(&second).unwrap();
    assert_eq!(remaining.offset, 100);
    assert_eq!(remaining.duration, 80);
    assert_eq!(timeline.total_duration(), 180);
}
