//! The parsed playlist and its single forward pass.

use std::str::FromStr;

use url::Url;

use crate::assembler::{Diagnostic, ParserState, Step};
use crate::config::ParserConfig;
use crate::entry::{Entry, MediaGroupEntry, MediaSegmentEntry, VariantStreamEntry};
use crate::error::{Error, Result};

/// Longest prefix of an oversized line kept in its error.
const LINE_PREVIEW_CHARS: usize = 64;

/// Whether a playlist lists variant streams or media segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum FileType {
    /// References variant streams and media groups.
    Master,
    /// References playable media segments.
    Media,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Master => write!(f, "master"),
            FileType::Media => write!(f, "media"),
        }
    }
}

/// A playlist document.
///
/// Created empty, then populated once by [`Playlist::parse`]. The entries
/// keep document order; the per-kind views index into the same entries.
///
/// ```
/// use hlsforge_parser::{FileType, Playlist};
///
/// let playlist: Playlist = "#EXTM3U\n#EXTINF:10,\nhttp://cdn/a.ts\n".parse().unwrap();
/// assert_eq!(playlist.file_type(), Some(FileType::Media));
/// assert_eq!(playlist.media_segments().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Playlist {
    #[cfg_attr(feature = "serde", serde(skip))]
    config: ParserConfig,
    file_type: Option<FileType>,
    entries: Vec<Entry>,
    diagnostics: Vec<Diagnostic>,
    #[cfg_attr(feature = "serde", serde(skip))]
    media_segments: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    variant_streams: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    media_groups: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    parsed: bool,
}

impl Playlist {
    /// Create an empty playlist whose relative URLs resolve against `context`.
    pub fn new(context: Option<Url>) -> Self {
        Self::with_config(ParserConfig::builder().maybe_context(context).build())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build and parse in one call.
    pub fn parse_str(text: &str, context: Option<Url>) -> Result<Self> {
        let mut playlist = Self::new(context);
        playlist.parse(text)?;
        Ok(playlist)
    }

    /// Populate the playlist from a document.
    ///
    /// Runs at most once: after a successful parse further calls return
    /// `Ok(())` without doing anything. On error the playlist stays empty and
    /// may be parsed again.
    pub fn parse(&mut self, text: &str) -> Result<()> {
        if self.parsed {
            tracing::debug!("Playlist already parsed, skipping");
            return Ok(());
        }

        let digest = self.scan(text)?;

        tracing::debug!(
            entries = digest.entries.len(),
            file_type = ?digest.file_type,
            diagnostics = digest.diagnostics.len(),
            "Parsed playlist"
        );

        self.entries = digest.entries;
        self.media_segments = digest.media_segments;
        self.variant_streams = digest.variant_streams;
        self.media_groups = digest.media_groups;
        self.file_type = digest.file_type;
        self.diagnostics = digest.diagnostics;
        self.parsed = true;
        Ok(())
    }

    fn scan(&self, text: &str) -> Result<Digest> {
        let context = self.config.context.as_ref();
        let mut digest = Digest::default();
        let mut state = ParserState::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;

            if let Some(limit) = self.config.max_line_length {
                if line.len() > limit {
                    return Err(Error::LineTooLong { limit }.at_line(line_no, preview(line)));
                }
            }

            let (next, step) = state.advance(line_no, line, context)?;
            state = next;

            match step {
                Step::Skip => {}
                Step::Emit(entry) => digest
                    .push(entry)
                    .map_err(|e| e.at_line(line_no, line.trim_end()))?,
                Step::Malformed(diagnostic) => {
                    tracing::warn!(
                        line = diagnostic.line,
                        content = %diagnostic.content,
                        "Skipping line that is not a valid entry"
                    );
                    digest.diagnostics.push(diagnostic);
                }
            }
        }

        state.finish()?;
        Ok(digest)
    }

    /// Whether a parse has completed successfully.
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Base URL relative references resolve against.
    pub fn context(&self) -> Option<&Url> {
        self.config.context.as_ref()
    }

    /// Master or media, once an entry has decided it.
    pub fn file_type(&self) -> Option<FileType> {
        self.file_type
    }

    pub fn is_master(&self) -> bool {
        self.file_type == Some(FileType::Master)
    }

    pub fn is_media(&self) -> bool {
        self.file_type == Some(FileType::Media)
    }

    /// All entries, in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines skipped as neither entry, comment, nor URL.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn media_segments(&self) -> impl Iterator<Item = &MediaSegmentEntry> + '_ {
        self.view(&self.media_segments).filter_map(|entry| match entry {
            Entry::MediaSegment(segment) => Some(segment),
            _ => None,
        })
    }

    pub fn variant_streams(&self) -> impl Iterator<Item = &VariantStreamEntry> + '_ {
        self.view(&self.variant_streams).filter_map(|entry| match entry {
            Entry::VariantStream(stream) => Some(stream),
            _ => None,
        })
    }

    pub fn media_groups(&self) -> impl Iterator<Item = &MediaGroupEntry> + '_ {
        self.view(&self.media_groups).filter_map(|entry| match entry {
            Entry::MediaGroup(group) => Some(group),
            _ => None,
        })
    }

    fn view<'a>(&'a self, indexes: &'a [usize]) -> impl Iterator<Item = &'a Entry> + 'a {
        indexes.iter().filter_map(|&index| self.entries.get(index))
    }

    /// Append `suffix` verbatim to the URL of every entry that has one.
    ///
    /// Stops at the first URL that no longer parses and returns
    /// [`Error::InvalidUrl`]. Entries before it keep their new URL.
    pub fn append_url_suffix(&mut self, suffix: &str) -> Result<()> {
        let mut updated = 0usize;
        for url in self.entries.iter_mut().filter_map(Entry::url_mut) {
            let candidate = format!("{}{}", url.as_str(), suffix);
            *url = Url::parse(&candidate).map_err(|source| Error::invalid_url(candidate, source))?;
            updated += 1;
        }
        tracing::debug!(updated, suffix, "Appended URL suffix");
        Ok(())
    }
}

impl FromStr for Playlist {
    type Err = Error;

    /// Parse without a context URL, so every URL line must be absolute.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s, None)
    }
}

/// Entries and indexes accumulated during a scan, committed only on success.
#[derive(Debug, Default)]
struct Digest {
    entries: Vec<Entry>,
    media_segments: Vec<usize>,
    variant_streams: Vec<usize>,
    media_groups: Vec<usize>,
    file_type: Option<FileType>,
    diagnostics: Vec<Diagnostic>,
}

impl Digest {
    fn push(&mut self, entry: Entry) -> Result<()> {
        if let Some(implied) = entry.file_type() {
            match self.file_type {
                None => self.file_type = Some(implied),
                Some(current) if current != implied => {
                    return Err(Error::AmbiguousFileType(format!(
                        "#{} ({} playlist entry in a {} playlist)",
                        entry.tag(),
                        implied,
                        current
                    )));
                }
                Some(_) => {}
            }
        }

        tracing::trace!(tag = %entry.tag(), file_type = ?entry.file_type(), "Classified entry");

        let index = self.entries.len();
        match &entry {
            Entry::MediaSegment(_) => self.media_segments.push(index),
            Entry::VariantStream(_) => self.variant_streams.push(index),
            Entry::MediaGroup(_) => self.media_groups.push(index),
            Entry::Generic(_) => {}
        }
        self.entries.push(entry);
        Ok(())
    }
}

fn preview(line: &str) -> &str {
    match line.char_indices().nth(LINE_PREVIEW_CHARS) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;
    use crate::value::ByteRange;

    const MEDIA: &str = "#EXTM3U\n\
        #EXT-X-TARGETDURATION:10\n\
        #EXTINF:10.0,\n\
        segment1.ts\n\
        #EXTINF:9.5,\n\
        segment2.ts\n\
        #EXT-X-ENDLIST\n";

    fn context() -> Option<Url> {
        Some(Url::parse("http://host/path/playlist.m3u8").unwrap())
    }

    #[test]
    fn test_parse_media_playlist() {
        let playlist = Playlist::parse_str(MEDIA, context()).unwrap();
        assert!(playlist.is_parsed());
        assert!(playlist.is_media());
        assert_eq!(playlist.len(), 5);
        assert_eq!(playlist.entries()[0].tag(), Tag::ExtM3u);

        let urls: Vec<_> = playlist.media_segments().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["http://host/path/segment1.ts", "http://host/path/segment2.ts"]
        );
        assert_eq!(playlist.variant_streams().count(), 0);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let mut playlist = Playlist::new(context());
        playlist.parse(MEDIA).unwrap();
        let count = playlist.len();
        playlist.parse("#EXTM3U\n#EXT-X-ENDLIST\n").unwrap();
        assert_eq!(playlist.len(), count);
        assert_eq!(playlist.media_segments().count(), 2);
    }

    #[test]
    fn test_failed_parse_leaves_playlist_empty() {
        let mut playlist = Playlist::new(context());
        let err = playlist.parse("#EXTM3U\n#EXTINF:10,\na.ts\n#EXT-X-BOGUS\n").unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert!(!playlist.is_parsed());
        assert!(playlist.is_empty());
        assert_eq!(playlist.file_type(), None);

        playlist.parse(MEDIA).unwrap();
        assert_eq!(playlist.len(), 5);
    }

    #[test]
    fn test_ambiguous_file_type() {
        let text = "#EXTM3U\n\
            #EXT-X-STREAM-INF:BANDWIDTH=1280000\n\
            low.m3u8\n\
            #EXTINF:10,\n\
            a.ts\n";
        let err = Playlist::parse_str(text, context()).unwrap_err();
        assert!(matches!(err.root(), Error::AmbiguousFileType(_)));
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_diagnostics_are_kept() {
        let text = "#EXTM3U\nnot an entry\n#EXTINF:1,\na.ts\n";
        let playlist = Playlist::parse_str(text, context()).unwrap();
        assert_eq!(
            playlist.diagnostics(),
            [Diagnostic {
                line: 2,
                content: "not an entry".to_string()
            }]
        );
        assert_eq!(playlist.media_segments().count(), 1);
    }

    #[test]
    fn test_line_too_long() {
        let config = ParserConfig::builder().max_line_length(8).build();
        let mut playlist = Playlist::with_config(config);
        let err = playlist.parse("#EXTM3U\n#EXT-X-VERSION:3\n").unwrap_err();
        assert_eq!(err.root(), &Error::LineTooLong { limit: 8 });
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "#EXTM3U\r\n#EXTINF:10,\r\nsegment1.ts\r\n";
        let playlist = Playlist::parse_str(text, context()).unwrap();
        assert_eq!(
            playlist.media_segments().next().unwrap().url.as_str(),
            "http://host/path/segment1.ts"
        );
    }

    #[test]
    fn test_byte_ranges_across_playlist() {
        let text = "#EXTM3U\n\
            #EXTINF:10,\n\
            #EXT-X-BYTERANGE:76242@0\n\
            main.ts\n\
            #EXTINF:10,\n\
            #EXT-X-BYTERANGE:82112\n\
            main.ts\n";
        let playlist = Playlist::parse_str(text, context()).unwrap();
        let ranges: Vec<_> = playlist
            .media_segments()
            .map(|s| s.segment.byte_range.unwrap())
            .collect();
        assert_eq!(
            ranges,
            vec![
                ByteRange { start: 0, end: 76241 },
                ByteRange { start: 76242, end: 158353 }
            ]
        );
    }

    #[test]
    fn test_append_url_suffix() {
        let mut playlist = Playlist::parse_str(MEDIA, context()).unwrap();
        playlist.append_url_suffix("?token=abc").unwrap();
        assert!(playlist
            .media_segments()
            .all(|s| s.url.as_str().ends_with(".ts?token=abc")));
    }

    #[test]
    fn test_from_str_requires_absolute_urls() {
        let err = MEDIA.parse::<Playlist>().unwrap_err();
        assert_eq!(err.root(), &Error::MissingContext("segment1.ts".to_string()));
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(200);
        assert_eq!(preview(&long).len(), LINE_PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}
