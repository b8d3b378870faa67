//! FCPXML rendering
//!
//! Writes the timeline as an FCPXML document: a resources section with one
//! asset entry per source video and a sequence spine with the ordered clip
//! items. All time values are exact rational strings derived from frame
//! counts and the rational frame rate; nothing is rounded.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{AutoCutError, AutoCutResult};
use crate::timeline::{FrameRate, Timeline};

const FCPXML_VERSION: &str = "1.10";

/// A frame count as an FCPXML rational time string: `frames * den / num`
/// seconds, written as "N/Ds"
fn rational_time(frames: u64, rate: FrameRate) -> String {
    if frames == 0 {
        return "0s".to_string();
    }
    format!("{}/{}s", frames as u128 * rate.den as u128, rate.num)
}

/// One frame as a rational duration ("1/30s", "1001/30000s")
fn frame_duration(rate: FrameRate) -> String {
    format!("{}/{}s", rate.den, rate.num)
}

/// Render the timeline as an FCPXML document
pub fn render(timeline: &Timeline, project_name: &str) -> AutoCutResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let export_err = |e: quick_xml::Error| AutoCutError::ExportError {
        message: e.to_string(),
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(export_err)?;
    writer
        .write_event(Event::DocType(BytesText::from_escaped("fcpxml")))
        .map_err(export_err)?;

    let mut fcpxml = BytesStart::new("fcpxml");
    fcpxml.push_attribute(("version", FCPXML_VERSION));
    writer.write_event(Event::Start(fcpxml)).map_err(export_err)?;

    // Resources: a format and an asset entry per source video
    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(export_err)?;
    for asset in timeline.assets() {
        let mut format = BytesStart::new("format");
        format.push_attribute(("id", format!("{}f", asset.id).as_str()));
        format.push_attribute(("name", "FFVideoFormat"));
        format.push_attribute(("frameDuration", frame_duration(asset.frame_rate).as_str()));
        writer.write_event(Event::Empty(format)).map_err(export_err)?;

        let mut entry = BytesStart::new("asset");
        entry.push_attribute(("id", asset.id.as_str()));
        entry.push_attribute(("name", asset.filename.as_str()));
        entry.push_attribute(("src", format!("./{}", asset.filename).as_str()));
        entry.push_attribute(("start", "0s"));
        entry.push_attribute((
            "duration",
            rational_time(asset.duration, asset.frame_rate).as_str(),
        ));
        entry.push_attribute(("format", format!("{}f", asset.id).as_str()));
        entry.push_attribute(("hasVideo", "1"));
        entry.push_attribute(("hasAudio", "1"));
        writer.write_event(Event::Empty(entry)).map_err(export_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("resources")))
        .map_err(export_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("library")))
        .map_err(export_err)?;
    let mut event = BytesStart::new("event");
    event.push_attribute(("name", project_name));
    writer.write_event(Event::Start(event)).map_err(export_err)?;
    let mut project = BytesStart::new("project");
    project.push_attribute(("name", project_name));
    writer.write_event(Event::Start(project)).map_err(export_err)?;

    // Sequence timing uses the first asset's frame rate
    let mut sequence = BytesStart::new("sequence");
    if let Some(first) = timeline.assets().first() {
        sequence.push_attribute(("format", format!("{}f", first.id).as_str()));
        sequence.push_attribute((
            "duration",
            rational_time(timeline.total_duration(), first.frame_rate).as_str(),
        ));
    } else {
        sequence.push_attribute(("duration", "0s"));
    }
    sequence.push_attribute(("tcStart", "0s"));
    sequence.push_attribute(("tcFormat", "NDF"));
    writer.write_event(Event::Start(sequence)).map_err(export_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("spine")))
        .map_err(export_err)?;
    for clip in timeline.clips() {
        let mut entry = BytesStart::new("asset-clip");
        entry.push_attribute(("ref", clip.asset_id.as_str()));
        entry.push_attribute(("name", clip.name.as_str()));
        entry.push_attribute(("offset", rational_time(clip.offset, clip.frame_rate).as_str()));
        entry.push_attribute((
            "start",
            rational_time(clip.source_in, clip.frame_rate).as_str(),
        ));
        entry.push_attribute((
            "duration",
            rational_time(clip.duration, clip.frame_rate).as_str(),
        ));
        for (key, value) in &clip.tags {
            entry.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Empty(entry)).map_err(export_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("spine")))
        .map_err(export_err)?;

    writer
        .write_event(Event::End(BytesEnd::new("sequence")))
        .map_err(export_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("project")))
        .map_err(export_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("event")))
        .map_err(export_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("library")))
        .map_err(export_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("fcpxml")))
        .map_err(export_err)?;

    String::from_utf8(writer.into_inner()).map_err(|e| AutoCutError::ExportError {
        message: e.to_string(),
    })
}

/// Render and write the document to disk
pub fn write_file(timeline: &Timeline, path: &Path, project_name: &str) -> AutoCutResult<()> {
    let document = render(timeline, project_name)?;
    fs::write(path, document)?;
    Ok(())
}
