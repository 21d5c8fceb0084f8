//! Rendering a parsed playlist for the terminal.

use anyhow::Result;
use hlsforge_parser::{CodecId, Entry, Playlist, Tag};
use std::fmt::Write;

use crate::config::OutputFormat;

/// Render `playlist` in `format`. The result always ends with a newline.
pub fn render(playlist: &Playlist, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary(playlist)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(playlist)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::M3u8 => Ok(playlist.to_string()),
    }
}

fn file_type_label(playlist: &Playlist) -> String {
    playlist
        .file_type()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Type, counts and the diagnostics of a playlist.
pub fn check(playlist: &Playlist) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File type: {}", file_type_label(playlist));
    let _ = writeln!(out, "Entries: {}", playlist.len());
    let _ = writeln!(out, "  Media segments: {}", playlist.media_segments().count());
    let _ = writeln!(out, "  Variant streams: {}", playlist.variant_streams().count());
    let _ = writeln!(out, "  Media groups: {}", playlist.media_groups().count());
    let _ = writeln!(out, "Diagnostics: {}", playlist.diagnostics().len());
    for diagnostic in playlist.diagnostics() {
        let _ = writeln!(out, "  {}", diagnostic);
    }
    out
}

/// Human-readable description of every stream, group and segment.
pub fn summary(playlist: &Playlist) -> String {
    let mut out = check(playlist);

    let groups: Vec<_> = playlist.media_groups().collect();
    if !groups.is_empty() {
        let _ = writeln!(out, "\nMedia groups:");
        for entry in groups {
            let group = &entry.group;
            let _ = writeln!(
                out,
                "  {} {} {}{}",
                group.group_type.map(|t| t.as_str()).unwrap_or("-"),
                group.group_id.as_deref().unwrap_or("-"),
                group.name.as_deref().unwrap_or("-"),
                group
                    .language
                    .as_deref()
                    .map(|l| format!(" ({l})"))
                    .unwrap_or_default()
            );
        }
    }

    let streams: Vec<_> = playlist.variant_streams().collect();
    if !streams.is_empty() {
        let _ = writeln!(out, "\nVariant streams:");
        for entry in streams {
            let stream = &entry.stream;
            let _ = write!(out, "  {} bps", stream.bandwidth);
            if let Some(resolution) = stream.resolution {
                let _ = write!(out, " {}", resolution);
            }
            if !stream.codecs.is_empty() {
                let codecs: Vec<String> = stream
                    .codecs
                    .iter()
                    .map(|c| match c.id {
                        CodecId::NotImplemented => c.raw.clone(),
                        id => id.to_string(),
                    })
                    .collect();
                let _ = write!(out, " [{}]", codecs.join(", "));
            }
            let _ = writeln!(out, " {}", entry.url);
        }
    }

    let segments: Vec<_> = playlist.media_segments().collect();
    if !segments.is_empty() {
        let total: f64 = segments.iter().map(|s| s.segment.duration).sum();
        let _ = writeln!(out, "\nMedia segments: {} ({:.3}s total)", segments.len(), total);
        for entry in segments {
            let _ = write!(out, "  {:>8.3}s {}", entry.segment.duration, entry.url);
            if let Some(range) = entry.segment.byte_range {
                let _ = write!(out, " bytes {}-{}", range.start, range.end);
            }
            let _ = writeln!(out);
        }
    }

    let discontinuities = playlist
        .entries()
        .iter()
        .filter(|e| matches!(e, Entry::Generic(raw) if raw.tag == Tag::ExtXDiscontinuity))
        .count();
    if discontinuities > 0 {
        let _ = writeln!(out, "\nDiscontinuities: {}", discontinuities);
    }

    out
}
