//! Entry classification and the typed entry variants.
//!
//! A line is first tokenized into a [`RawEntry`] (tag plus raw value tokens),
//! then [`build`] turns it into the right variant for its tag. Entries whose
//! tag expects a URL come back as a [`PendingEntry`] that only becomes an
//! [`Entry`] once the URL line has been attached.

use url::Url;

use crate::attribute::{decode_attributes, decode_values, AttributeName};
use crate::codec::{parse_codec_list, Codec};
use crate::error::{Error, Result};
use crate::grammar::{is_entry_line, VALUES_SEPARATOR, VALUE_SEPARATOR};
use crate::playlist::FileType;
use crate::tag::Tag;
use crate::value::{parse_duration, parse_resolution, parse_uint, ByteRange, Resolution};

/// A tag with its raw value tokens, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawEntry {
    pub tag: Tag,
    /// Tokens from the value part, in order. Empty if the tag has no value part.
    pub values: Vec<String>,
}

impl RawEntry {
    pub fn new(tag: Tag, values: Vec<String>) -> Self {
        Self { tag, values }
    }

    /// Tokenize an entry line.
    ///
    /// Fails with [`Error::NotAnEntry`] if the line does not match the entry
    /// grammar and with [`Error::UnknownTag`] if the tag is not recognized.
    pub fn parse(line: &str) -> Result<Self> {
        if !is_entry_line(line) {
            return Err(Error::NotAnEntry(line.to_string()));
        }

        let (tag, values) = match line.split_once(VALUE_SEPARATOR) {
            Some((tag, value_part)) => (tag, decode_values(value_part)),
            None => (line, Vec::new()),
        };

        Ok(Self {
            tag: tag.parse()?,
            values,
        })
    }
}

/// Tokenize a single entry line. See [`RawEntry::parse`].
pub fn parse_line(line: &str) -> Result<RawEntry> {
    RawEntry::parse(line)
}

/// Payload of an `#EXTINF` entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaSegment {
    /// Duration in seconds, never negative.
    pub duration: f64,
    /// Title following the duration, if any.
    pub title: Option<String>,
    pub byte_range: Option<ByteRange>,
}

impl MediaSegment {
    /// Build from the raw values of an `#EXTINF` entry: exactly one value,
    /// the duration, optionally followed by a comma and a title.
    pub fn from_raw(raw: &RawEntry) -> Result<Self> {
        let [value] = raw.values.as_slice() else {
            return Err(Error::InvalidDuration(raw.values.join(",")));
        };

        let (duration, title) = match value.split_once(VALUES_SEPARATOR) {
            Some((duration, title)) => (duration, Some(title.trim())),
            None => (value.as_str(), None),
        };

        Ok(Self {
            duration: parse_duration(duration)?,
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
            byte_range: None,
        })
    }
}

/// Payload of an `#EXT-X-STREAM-INF` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariantStream {
    pub program_id: Option<u64>,
    /// Peak bits per second.
    pub bandwidth: u64,
    /// The `CODECS` value as written, unquoted.
    pub codecs_raw: Option<String>,
    pub codecs: Vec<Codec>,
    pub resolution: Option<Resolution>,
    pub audio_group_id: Option<String>,
    pub video_group_id: Option<String>,
    pub subtitles_group_id: Option<String>,
    pub name: Option<String>,
}

impl VariantStream {
    /// Build from raw attribute tokens. Attributes outside the variant stream
    /// set fail with [`Error::UnknownAttributeForEntry`].
    pub fn from_raw(raw: &RawEntry) -> Result<Self> {
        let mut stream = Self::default();

        for attribute in decode_attributes(&raw.values)? {
            match attribute.name {
                AttributeName::ProgramId => stream.program_id = Some(parse_uint(attribute.value())?),
                AttributeName::Bandwidth => stream.bandwidth = parse_uint(attribute.value())?,
                AttributeName::Codecs => {
                    stream.codecs = parse_codec_list(attribute.value());
                    stream.codecs_raw = Some(attribute.value().to_string());
                }
                AttributeName::Resolution => {
                    stream.resolution = Some(parse_resolution(attribute.value())?)
                }
                AttributeName::Audio => stream.audio_group_id = Some(attribute.value().to_string()),
                AttributeName::Video => stream.video_group_id = Some(attribute.value().to_string()),
                AttributeName::Subtitles => {
                    stream.subtitles_group_id = Some(attribute.value().to_string())
                }
                AttributeName::Name => stream.name = Some(attribute.value().to_string()),
                other => {
                    return Err(Error::UnknownAttributeForEntry {
                        tag: raw.tag,
                        attribute: other,
                    })
                }
            }
        }

        Ok(stream)
    }
}

/// Rendition type of a media group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GroupType {
    Audio,
    Video,
    Subtitles,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Audio => "AUDIO",
            GroupType::Video => "VIDEO",
            GroupType::Subtitles => "SUBTITLES",
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GroupType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "AUDIO" => Ok(GroupType::Audio),
            "VIDEO" => Ok(GroupType::Video),
            "SUBTITLES" => Ok(GroupType::Subtitles),
            other => Err(Error::InvalidGroupType(other.to_string())),
        }
    }
}

/// Payload of an `#EXT-X-MEDIA` entry. Every field is optional; only the
/// attributes actually present are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaGroup {
    pub group_type: Option<GroupType>,
    pub group_id: Option<String>,
    pub name: Option<String>,
    pub language: Option<String>,
    /// Referenced rendition playlist, as written. Not resolved.
    pub uri: Option<String>,
}

impl MediaGroup {
    /// Build from raw attribute tokens. Attributes outside the media group
    /// set fail with [`Error::UnknownAttributeForEntry`].
    pub fn from_raw(raw: &RawEntry) -> Result<Self> {
        let mut group = Self::default();

        for attribute in decode_attributes(&raw.values)? {
            match attribute.name {
                AttributeName::Type => group.group_type = Some(attribute.value().parse()?),
                AttributeName::GroupId => group.group_id = Some(attribute.value().to_string()),
                AttributeName::Name => group.name = Some(attribute.value().to_string()),
                AttributeName::Language => group.language = Some(attribute.value().to_string()),
                AttributeName::Uri => group.uri = Some(attribute.value().to_string()),
                other => {
                    return Err(Error::UnknownAttributeForEntry {
                        tag: raw.tag,
                        attribute: other,
                    })
                }
            }
        }

        Ok(group)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaSegmentEntry {
    pub raw: RawEntry,
    pub segment: MediaSegment,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariantStreamEntry {
    pub raw: RawEntry,
    pub stream: VariantStream,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MediaGroupEntry {
    pub raw: RawEntry,
    pub group: MediaGroup,
}

/// One logical playlist entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Entry {
    /// Any recognized tag without a typed payload, values kept verbatim.
    Generic(RawEntry),
    MediaSegment(MediaSegmentEntry),
    VariantStream(VariantStreamEntry),
    MediaGroup(MediaGroupEntry),
}

impl Entry {
    pub fn raw(&self) -> &RawEntry {
        match self {
            Entry::Generic(raw) => raw,
            Entry::MediaSegment(entry) => &entry.raw,
            Entry::VariantStream(entry) => &entry.raw,
            Entry::MediaGroup(entry) => &entry.raw,
        }
    }

    pub fn tag(&self) -> Tag {
        self.raw().tag
    }

    pub fn raw_values(&self) -> &[String] {
        &self.raw().values
    }

    /// Resolved URL, for entries that carry one.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Entry::MediaSegment(entry) => Some(&entry.url),
            Entry::VariantStream(entry) => Some(&entry.url),
            Entry::Generic(_) | Entry::MediaGroup(_) => None,
        }
    }

    pub(crate) fn url_mut(&mut self) -> Option<&mut Url> {
        match self {
            Entry::MediaSegment(entry) => Some(&mut entry.url),
            Entry::VariantStream(entry) => Some(&mut entry.url),
            Entry::Generic(_) | Entry::MediaGroup(_) => None,
        }
    }

    /// The playlist type this entry implies, if any.
    pub fn file_type(&self) -> Option<FileType> {
        match self {
            Entry::MediaSegment(_) => Some(FileType::Media),
            Entry::VariantStream(_) | Entry::MediaGroup(_) => Some(FileType::Master),
            Entry::Generic(_) => None,
        }
    }

    /// Drop the typed payload, keeping the tag and raw values.
    pub fn into_raw(self) -> RawEntry {
        match self {
            Entry::Generic(raw) => raw,
            Entry::MediaSegment(entry) => entry.raw,
            Entry::VariantStream(entry) => entry.raw,
            Entry::MediaGroup(entry) => entry.raw,
        }
    }
}

/// An entry waiting for the URL line that follows it.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingEntry {
    MediaSegment { raw: RawEntry, segment: MediaSegment },
    VariantStream { raw: RawEntry, stream: VariantStream },
}

impl PendingEntry {
    pub fn raw(&self) -> &RawEntry {
        match self {
            PendingEntry::MediaSegment { raw, .. } | PendingEntry::VariantStream { raw, .. } => raw,
        }
    }

    /// Set the byte range of a pending media segment.
    ///
    /// Returns false, leaving the entry untouched, for any other entry kind.
    pub fn set_byte_range(&mut self, range: ByteRange) -> bool {
        match self {
            PendingEntry::MediaSegment { segment, .. } => {
                segment.byte_range = Some(range);
                true
            }
            PendingEntry::VariantStream { .. } => false,
        }
    }

    /// Complete the entry with its resolved URL.
    pub fn attach(self, url: Url) -> Entry {
        match self {
            PendingEntry::MediaSegment { raw, segment } => {
                Entry::MediaSegment(MediaSegmentEntry { raw, segment, url })
            }
            PendingEntry::VariantStream { raw, stream } => {
                Entry::VariantStream(VariantStreamEntry { raw, stream, url })
            }
        }
    }
}

/// Result of building a tokenized entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Built {
    /// A finished entry.
    Complete(Entry),
    /// An entry that still needs its URL line.
    ExpectsUrl(PendingEntry),
    /// A byte range tag, which only has meaning attached to a media segment.
    ByteRange(RawEntry),
}

/// Build the typed variant for a tokenized entry.
pub fn build(raw: RawEntry) -> Result<Built> {
    let built = match raw.tag {
        Tag::ExtInf => {
            let segment = MediaSegment::from_raw(&raw)?;
            Built::ExpectsUrl(PendingEntry::MediaSegment { raw, segment })
        }
        Tag::ExtXStreamInf => {
            let stream = VariantStream::from_raw(&raw)?;
            Built::ExpectsUrl(PendingEntry::VariantStream { raw, stream })
        }
        Tag::ExtXMedia => {
            let group = MediaGroup::from_raw(&raw)?;
            Built::Complete(Entry::MediaGroup(MediaGroupEntry { raw, group }))
        }
        Tag::ExtXByteRange => Built::ByteRange(raw),
        Tag::ExtM3u
        | Tag::ExtXVersion
        | Tag::ExtXTargetDuration
        | Tag::ExtXPlaylistType
        | Tag::ExtXEndList
        | Tag::ExtXMap
        | Tag::ExtXMediaSequence
        | Tag::ExtXDiscontinuity => Built::Complete(Entry::Generic(raw)),
    };
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecId;

    fn built(line: &str) -> Result<Built> {
        build(parse_line(line)?)
    }

    #[test]
    fn test_parse_line_generic() {
        let raw = parse_line("#EXT-X-VERSION:3").unwrap();
        assert_eq!(raw.tag, Tag::ExtXVersion);
        assert_eq!(raw.values, vec!["3"]);

        let raw = parse_line("#EXTM3U").unwrap();
        assert_eq!(raw.tag, Tag::ExtM3u);
        assert!(raw.values.is_empty());
    }

    #[test]
    fn test_parse_line_errors() {
        assert_eq!(
            parse_line("#EXT-X-FOO:1"),
            Err(Error::UnknownTag("EXT-X-FOO".to_string()))
        );
        assert_eq!(
            parse_line("segment.ts"),
            Err(Error::NotAnEntry("segment.ts".to_string()))
        );
    }

    #[test]
    fn test_build_media_segment() {
        let Built::ExpectsUrl(PendingEntry::MediaSegment { segment, .. }) =
            built("#EXTINF:10.0,").unwrap()
        else {
            panic!("expected a pending media segment");
        };
        assert_eq!(segment.duration, 10.0);
        assert_eq!(segment.title, None);
        assert_eq!(segment.byte_range, None);
    }

    #[test]
    fn test_build_media_segment_with_title() {
        let Built::ExpectsUrl(PendingEntry::MediaSegment { segment, .. }) =
            built("#EXTINF:9.5,Station ID").unwrap()
        else {
            panic!("expected a pending media segment");
        };
        assert_eq!(segment.duration, 9.5);
        assert_eq!(segment.title.as_deref(), Some("Station ID"));
    }

    #[test]
    fn test_build_media_segment_invalid_duration() {
        assert_eq!(
            built("#EXTINF:abc"),
            Err(Error::InvalidDuration("abc".to_string()))
        );
        assert!(matches!(built("#EXTINF:-1,"), Err(Error::InvalidDuration(_))));
        assert!(matches!(
            built("#EXTINF:10,A=\"x\",B=\"y\""),
            Err(Error::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_build_variant_stream() {
        let Built::ExpectsUrl(PendingEntry::VariantStream { stream, .. }) = built(
            "#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=1280000,CODECS=\"mp4a.40.2,avc1.640029\",RESOLUTION=640x360,AUDIO=\"aac\",NAME=\"Low\"",
        )
        .unwrap() else {
            panic!("expected a pending variant stream");
        };

        assert_eq!(stream.program_id, Some(1));
        assert_eq!(stream.bandwidth, 1_280_000);
        assert_eq!(stream.codecs_raw.as_deref(), Some("mp4a.40.2,avc1.640029"));
        assert_eq!(
            stream.codecs.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![CodecId::AacLc, CodecId::H264HighProfile41]
        );
        assert_eq!(stream.resolution, Some(Resolution::new(640, 360)));
        assert_eq!(stream.audio_group_id.as_deref(), Some("aac"));
        assert_eq!(stream.name.as_deref(), Some("Low"));
        assert_eq!(stream.video_group_id, None);
    }

    #[test]
    fn test_build_variant_stream_single_attribute() {
        let Built::ExpectsUrl(PendingEntry::VariantStream { stream, .. }) =
            built("#EXT-X-STREAM-INF:BANDWIDTH=64000").unwrap()
        else {
            panic!("expected a pending variant stream");
        };
        assert_eq!(stream.bandwidth, 64_000);
    }

    #[test]
    fn test_build_variant_stream_rejects_foreign_attribute() {
        assert_eq!(
            built("#EXT-X-STREAM-INF:BANDWIDTH=1,GROUP-ID=\"aac\""),
            Err(Error::UnknownAttributeForEntry {
                tag: Tag::ExtXStreamInf,
                attribute: AttributeName::GroupId,
            })
        );
    }

    #[test]
    fn test_build_variant_stream_bad_values() {
        assert!(matches!(
            built("#EXT-X-STREAM-INF:BANDWIDTH=fast,RESOLUTION=1x1"),
            Err(Error::InvalidInteger(_))
        ));
        assert!(matches!(
            built("#EXT-X-STREAM-INF:BANDWIDTH=1,RESOLUTION=1920"),
            Err(Error::MalformedResolution(_))
        ));
    }

    #[test]
    fn test_build_media_group() {
        let Built::Complete(Entry::MediaGroup(entry)) = built(
            "#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",LANGUAGE=\"en\",NAME=\"English\",URI=\"audio_en.m3u8\"",
        )
        .unwrap() else {
            panic!("expected a media group");
        };

        assert_eq!(entry.group.group_type, Some(GroupType::Audio));
        assert_eq!(entry.group.group_id.as_deref(), Some("aac"));
        assert_eq!(entry.group.language.as_deref(), Some("en"));
        assert_eq!(entry.group.name.as_deref(), Some("English"));
        assert_eq!(entry.group.uri.as_deref(), Some("audio_en.m3u8"));
    }

    #[test]
    fn test_build_media_group_partial_and_strict() {
        let Built::Complete(Entry::MediaGroup(entry)) =
            built("#EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID=\"subs\"").unwrap()
        else {
            panic!("expected a media group");
        };
        assert_eq!(entry.group.group_type, Some(GroupType::Subtitles));
        assert_eq!(entry.group.uri, None);

        assert_eq!(
            built("#EXT-X-MEDIA:TYPE=AUDIO,BANDWIDTH=1"),
            Err(Error::UnknownAttributeForEntry {
                tag: Tag::ExtXMedia,
                attribute: AttributeName::Bandwidth,
            })
        );
        assert_eq!(
            built("#EXT-X-MEDIA:TYPE=CLOSED-CAPTIONS,GROUP-ID=\"cc\""),
            Err(Error::InvalidGroupType("CLOSED-CAPTIONS".to_string()))
        );
    }

    #[test]
    fn test_build_byte_range_and_generic() {
        assert!(matches!(
            built("#EXT-X-BYTERANGE:100@0").unwrap(),
            Built::ByteRange(_)
        ));

        let Built::Complete(entry) = built("#EXT-X-PLAYLIST-TYPE:VOD").unwrap() else {
            panic!("expected a generic entry");
        };
        assert_eq!(entry.tag(), Tag::ExtXPlaylistType);
        assert_eq!(entry.raw_values(), ["VOD".to_string()]);
        assert_eq!(entry.file_type(), None);
        assert_eq!(entry.url(), None);
    }

    #[test]
    fn test_pending_attach() {
        let Built::ExpectsUrl(mut pending) = built("#EXTINF:4,").unwrap() else {
            panic!("expected a pending entry");
        };
        assert!(pending.set_byte_range(ByteRange { start: 0, end: 9 }));

        let url = Url::parse("http://host/a.ts").unwrap();
        let entry = pending.attach(url.clone());
        assert_eq!(entry.url(), Some(&url));
        assert_eq!(entry.file_type(), Some(FileType::Media));

        let Entry::MediaSegment(segment) = entry else {
            panic!("expected a media segment");
        };
        assert_eq!(segment.segment.byte_range, Some(ByteRange { start: 0, end: 9 }));
    }
}
