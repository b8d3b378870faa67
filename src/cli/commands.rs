//! Command implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::cli::args::{RunArgs, SubtitlesArgs};
use crate::config::Config;
use crate::engine::SilenceCutter;
use crate::ingest;
use crate::loudmap::LoudMapDir;
use crate::output::fcpxml;
use crate::preview::PreviewBuilder;
use crate::subtitles::generate_subtitles;
use crate::timeline::Timeline;
use crate::tools::auto_editor::AutoEditor;
use crate::tools::ffmpeg::Ffmpeg;
use crate::tools::whisper::Whisper;
use crate::utils;

/// Working directory for loud maps and previews, under the input folder
const WORK_DIR: &str = "remove_silence";
/// Preprocessed renders live here, under the input folder
const PREPROCESSED_DIR: &str = "preprocessed";

/// Execute the run command: the full folder-to-FCPXML pipeline
pub fn run(args: RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(margin) = args.margin {
        config.margin_sec = margin;
    }

    if !args.input.is_dir() {
        bail!("Input folder does not exist: {}", args.input.display());
    }

    let ffmpeg = Ffmpeg::new(&config.tools.ffmpeg, &config.tools.ffprobe);
    let auto_editor = AutoEditor::new(&config.tools.auto_editor, &config.margin_arg());

    // Preprocess into a uniform format, unless told otherwise
    let input_folder = if args.already_preprocessed {
        args.input.join(PREPROCESSED_DIR)
    } else if args.skip_preprocess {
        args.input.clone()
    } else {
        preprocess_videos(&args.input, &ffmpeg)?
    };

    // Ingest: one asset and one full-duration base clip per source video
    let mut timeline = Timeline::new();
    ingest::populate_timeline(&mut timeline, &input_folder, &ffmpeg)
        .context("Failed to ingest source videos")?;
    if timeline.assets().is_empty() {
        bail!("No video files found in {}", input_folder.display());
    }
    info!(assets = timeline.assets().len(), "ingest complete");

    // Silence detection, one loud map per asset
    let maps = LoudMapDir::new(input_folder.join(WORK_DIR));
    generate_loud_maps(&timeline, &input_folder, &maps, &auto_editor)?;

    // Core pass: split every base clip into tagged sub-clips
    SilenceCutter::new()
        .cut_clips(&mut timeline, &maps)
        .context("Silence segmentation failed")?;

    // Preview render + subtitle pass over the loud parts
    if !args.skip_subtitles {
        let builder = PreviewBuilder::new(maps.dir(), &auto_editor, &ffmpeg);
        let preview = builder
            .build(&timeline, &input_folder)
            .context("Failed to build preview videos")?;
        let whisper = Whisper::new(&config.tools.whisper);
        generate_subtitles(&preview, &whisper).context("Subtitle generation failed")?;
    }

    // Export
    let output = args
        .output
        .unwrap_or_else(|| args.input.join(&config.export.output_file));
    fcpxml::write_file(&timeline, &output, &config.export.project_name)
        .context("Failed to write FCPXML")?;

    info!(output = %output.display(), "wrote project file");
    println!("Wrote {}", output.display());
    Ok(())
}

/// Execute the subtitles command against an already rendered video
pub fn subtitles(args: SubtitlesArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    if !args.input.is_file() {
        bail!("Input video does not exist: {}", args.input.display());
    }

    let whisper = Whisper::new(&config.tools.whisper);
    generate_subtitles(&args.input, &whisper).context("Subtitle generation failed")?;
    Ok(())
}

/// Transcode every source video into `<folder>/preprocessed/`
fn preprocess_videos(folder: &Path, ffmpeg: &Ffmpeg) -> Result<PathBuf> {
    let output_dir = folder.join(PREPROCESSED_DIR);
    fs::create_dir_all(&output_dir)?;

    for video in utils::video_files(folder) {
        let name = video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = output_dir.join(format!("{}.mp4", utils::file_stem(&name)));
        ffmpeg
            .transcode(&video, &output)
            .with_context(|| format!("Failed to preprocess {}", video.display()))?;
        info!(input = %video.display(), "preprocessed video");
    }
    Ok(output_dir)
}

/// Run silence detection for every registered asset
fn generate_loud_maps(
    timeline: &Timeline,
    folder: &Path,
    maps: &LoudMapDir,
    auto_editor: &AutoEditor,
) -> Result<()> {
    fs::create_dir_all(maps.dir())?;

    for asset in timeline.assets() {
        let source = folder.join(&asset.filename);
        let output = maps.map_path(&asset.filename);
        auto_editor
            .export_loud_map(&source, &output)
            .with_context(|| format!("Silence detection failed for {}", asset.filename))?;
        info!(asset = %asset.id, name = %asset.filename, "generated loud map");
    }
    Ok(())
}
