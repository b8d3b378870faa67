//! AutoCut CLI Library
//!
//! Turns a folder of raw video clips into an FCPXML edit-decision document
//! with silent regions tagged for later removal and a subtitle pass over
//! the loud parts. The in-memory timeline model and the silence
//! segmentation engine live here; media processing, silence detection, and
//! transcription delegate to external tools.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod loudmap;
pub mod output;
pub mod preview;
pub mod subtitles;
pub mod timeline;
pub mod tools;
pub mod utils;

// Re-export commonly used types
pub use engine::{plan_segments, Segment, SilenceCutter};
pub use error::{AutoCutError, AutoCutResult};
pub use loudmap::{LoudInterval, LoudMap, LoudMapDir, LoudMapSource};
pub use timeline::{Asset, ClipItem, ClipRole, FrameRate, Timeline, SILENT_TAG};
