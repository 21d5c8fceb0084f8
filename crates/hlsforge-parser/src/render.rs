//! Rendering entries and playlists back to m3u8 text.
//!
//! Generic entries reproduce their tag and raw values exactly. Typed entries
//! are rendered from their structured fields, attributes in a fixed order.

use std::fmt::{self, Display, Formatter};
use std::io;

use crate::attribute::AttributeName;
use crate::entry::{
    Entry, MediaGroup, MediaGroupEntry, MediaSegmentEntry, RawEntry, VariantStream,
    VariantStreamEntry,
};
use crate::grammar::{ATTRIBUTE_SEPARATOR, MARKER, VALUES_SEPARATOR, VALUE_SEPARATOR};
use crate::playlist::Playlist;
use crate::tag::Tag;

/// Write `#TAG` and, when there are values, `:v1,v2,...`.
fn write_tag_line<I, V>(f: &mut Formatter<'_>, tag: Tag, values: I) -> fmt::Result
where
    I: IntoIterator<Item = V>,
    V: Display,
{
    write!(f, "{MARKER}{tag}")?;
    for (i, value) in values.into_iter().enumerate() {
        let separator = if i == 0 { VALUE_SEPARATOR } else { VALUES_SEPARATOR };
        write!(f, "{separator}{value}")?;
    }
    Ok(())
}

/// Collects `KEY=value` pairs, quoting where the attribute calls for it.
#[derive(Default)]
struct AttributeList(Vec<String>);

impl AttributeList {
    fn push(&mut self, name: AttributeName, value: Option<impl Display>) -> &mut Self {
        if let Some(value) = value {
            let rendered = if name.is_quoted_string() {
                format!("{name}{ATTRIBUTE_SEPARATOR}\"{value}\"")
            } else {
                format!("{name}{ATTRIBUTE_SEPARATOR}{value}")
            };
            self.0.push(rendered);
        }
        self
    }
}

impl VariantStream {
    fn attributes(&self) -> AttributeList {
        let mut list = AttributeList::default();
        list.push(AttributeName::ProgramId, self.program_id)
            .push(AttributeName::Bandwidth, Some(self.bandwidth))
            .push(AttributeName::Codecs, self.codecs_raw.as_deref())
            .push(AttributeName::Resolution, self.resolution)
            .push(AttributeName::Audio, self.audio_group_id.as_deref())
            .push(AttributeName::Video, self.video_group_id.as_deref())
            .push(AttributeName::Subtitles, self.subtitles_group_id.as_deref())
            .push(AttributeName::Name, self.name.as_deref());
        list
    }
}

impl MediaGroup {
    fn attributes(&self) -> AttributeList {
        let mut list = AttributeList::default();
        list.push(AttributeName::Type, self.group_type)
            .push(AttributeName::GroupId, self.group_id.as_deref())
            .push(AttributeName::Language, self.language.as_deref())
            .push(AttributeName::Name, self.name.as_deref())
            .push(AttributeName::Uri, self.uri.as_deref());
        list
    }
}

impl Display for RawEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag_line(f, self.tag, &self.values)
    }
}

impl Display for MediaSegmentEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let segment = &self.segment;
        writeln!(
            f,
            "{MARKER}{}{VALUE_SEPARATOR}{}{VALUES_SEPARATOR}{}",
            Tag::ExtInf,
            segment.duration,
            segment.title.as_deref().unwrap_or_default()
        )?;
        if let Some(range) = segment.byte_range {
            write_tag_line(f, Tag::ExtXByteRange, [range])?;
            writeln!(f)?;
        }
        write!(f, "{}", self.url)
    }
}

impl Display for VariantStreamEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag_line(f, Tag::ExtXStreamInf, &self.stream.attributes().0)?;
        writeln!(f)?;
        write!(f, "{}", self.url)
    }
}

impl Display for MediaGroupEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_tag_line(f, Tag::ExtXMedia, &self.group.attributes().0)
    }
}

impl Display for Entry {
    /// One line per tag; entries with a URL end with their URL line.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Generic(raw) => raw.fmt(f),
            Entry::MediaSegment(entry) => entry.fmt(f),
            Entry::VariantStream(entry) => entry.fmt(f),
            Entry::MediaGroup(entry) => entry.fmt(f),
        }
    }
}

impl Display for Playlist {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for entry in self.entries() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl Playlist {
    /// Render every entry, in document order, to `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in self.entries() {
            writeln!(writer, "{entry}")?;
        }
        writer.flush()
    }
}
