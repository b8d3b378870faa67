//! Loud-map loading and normalization
//!
//! The silence-detection tool exports one JSON document per asset. Its field
//! names do not carry their expected meaning: the interval field literally
//! called "offset" is the interval's start position within the asset, not a
//! placement offset. The remap happens exactly once here, so the rest of the
//! crate only ever sees the unambiguous `start`/`duration` vocabulary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AutoCutError, AutoCutResult};
use crate::timeline::FrameRate;

/// File-name suffix the detection tool uses for exported maps
pub const LOUD_MAP_SUFFIX: &str = "_loud_map.json";

/// Raw wire document as the detection tool writes it
#[derive(Debug, Deserialize)]
struct RawLoudMap {
    timebase: String,
    /// Video tracks; the first track holds the loud intervals
    #[serde(default)]
    v: Vec<Vec<RawInterval>>,
}

#[derive(Debug, Deserialize)]
struct RawInterval {
    /// Start of the interval within the asset's media. The tool calls this
    /// "offset"; it is not a placement offset.
    offset: u64,
    /// Interval duration in frames
    dur: u64,
}

/// A loud interval within an asset, in the map's native frame units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoudInterval {
    /// Start position within the asset, in frames
    pub start: u64,
    /// Duration in frames
    pub duration: u64,
}

/// Normalized loudness map for one asset
#[derive(Debug, Clone)]
pub struct LoudMap {
    /// Rational timebase the interval values are expressed in
    pub timebase: FrameRate,
    /// Loud intervals, ascending by start, non-overlapping (trusted)
    pub intervals: Vec<LoudInterval>,
}

impl LoudMap {
    /// Opportunistic well-formedness check: intervals must be non-empty in
    /// duration, ascending, and disjoint. The segmentation engine trusts the
    /// detection tool and does not call this on its hot path.
    pub fn validate(&self) -> Result<(), String> {
        let mut cursor = 0u64;
        for (index, interval) in self.intervals.iter().enumerate() {
            if interval.duration == 0 {
                return Err(format!("interval {} has zero duration", index));
            }
            if interval.start < cursor {
                return Err(format!(
                    "interval {} starts at {} before previous end {}",
                    index, interval.start, cursor
                ));
            }
            cursor = interval.start + interval.duration;
        }
        Ok(())
    }
}

/// Parse a raw loud-map document, applying the field remap
fn parse_loud_map(path: &Path, content: &str) -> AutoCutResult<LoudMap> {
    let malformed = |reason: String| AutoCutError::MalformedLoudMap {
        path: path.display().to_string(),
        reason,
    };

    let raw: RawLoudMap =
        serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;

    let timebase = FrameRate::parse(&raw.timebase)
        .map_err(|_| malformed(format!("bad timebase '{}'", raw.timebase)))?;

    // An asset with no audible sound legitimately yields no intervals
    let intervals = raw
        .v
        .into_iter()
        .next()
        .unwrap_or_default()
        .into_iter()
        .map(|i| LoudInterval {
            start: i.offset,
            duration: i.dur,
        })
        .collect();

    Ok(LoudMap {
        timebase,
        intervals,
    })
}

/// Source of loud maps, keyed by asset display name. The engine consumes
/// maps through this seam so tests can supply in-memory fixtures.
pub trait LoudMapSource {
    fn loud_map(&self, asset_name: &str) -> AutoCutResult<LoudMap>;
}

/// Filesystem-backed loud-map directory, one `<stem>_loud_map.json` per asset
#[derive(Debug, Clone)]
pub struct LoudMapDir {
    dir: PathBuf,
}

impl LoudMapDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the detection tool writes an asset's map to
    pub fn map_path(&self, asset_name: &str) -> PathBuf {
        let stem = crate::utils::file_stem(asset_name);
        self.dir.join(format!("{}{}", stem, LOUD_MAP_SUFFIX))
    }
}

impl LoudMapSource for LoudMapDir {
    fn loud_map(&self, asset_name: &str) -> AutoCutResult<LoudMap> {
        let path = self.map_path(asset_name);
        if !path.exists() {
            return Err(AutoCutError::LoudMapNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(&path)?;
        parse_loud_map(&path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> AutoCutResult<LoudMap> {
        parse_loud_map(Path::new("test_loud_map.json"), content)
    }

    #[test]
    fn test_parse_remaps_offset_to_start() {
        let map = parse(
            r#"{"timebase": "30/1", "v": [[{"offset": 10, "dur": 20}, {"offset": 50, "dur": 10}]]}"#,
        )
        .unwrap();

        assert_eq!(map.timebase, FrameRate::new(30, 1).unwrap());
        assert_eq!(
            map.intervals,
            vec![
                LoudInterval { start: 10, duration: 20 },
                LoudInterval { start: 50, duration: 10 },
            ]
        );
    }

    #[test]
    fn test_parse_bare_timebase() {
        let map = parse(r#"{"timebase": "30", "v": [[]]}"#).unwrap();
        assert_eq!(map.timebase.num, 30);
        assert_eq!(map.timebase.den, 1);
        assert!(map.intervals.is_empty());
    }

    #[test]
    fn test_parse_missing_track_is_empty_map() {
        let map = parse(r#"{"timebase": "30/1", "v": []}"#).unwrap();
        assert!(map.intervals.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse("not json"),
            Err(AutoCutError::MalformedLoudMap { .. })
        ));
        assert!(matches!(
            parse(r#"{"timebase": "zero/fps", "v": []}"#),
            Err(AutoCutError::MalformedLoudMap { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_sorted_disjoint() {
        let map = LoudMap {
            timebase: FrameRate::new(30, 1).unwrap(),
            intervals: vec![
                LoudInterval { start: 0, duration: 10 },
                LoudInterval { start: 10, duration: 5 },
                LoudInterval { start: 20, duration: 5 },
            ],
        };
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap_and_disorder() {
        let overlapping = LoudMap {
            timebase: FrameRate::new(30, 1).unwrap(),
            intervals: vec![
                LoudInterval { start: 0, duration: 10 },
                LoudInterval { start: 5, duration: 10 },
            ],
        };
        assert!(overlapping.validate().is_err());

        let zero = LoudMap {
            timebase: FrameRate::new(30, 1).unwrap(),
            intervals: vec![LoudInterval { start: 0, duration: 0 }],
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_dir_map_path_uses_stem_and_suffix() {
        let dir = LoudMapDir::new("/tmp/remove_silence");
        let path = dir.map_path("intro.mp4");
        assert_eq!(
            path,
            PathBuf::from("/tmp/remove_silence/intro_loud_map.json")
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = LoudMapDir::new("/nonexistent");
        assert!(matches!(
            dir.loud_map("intro.mp4"),
            Err(AutoCutError::LoudMapNotFound { .. })
        ));
    }
}
