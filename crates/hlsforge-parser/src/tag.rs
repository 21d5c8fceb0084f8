//! The closed set of recognized tag names.

use crate::error::Error;
use crate::grammar::MARKER;

/// A recognized playlist tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Tag {
    /// `#EXTM3U` file header
    ExtM3u,
    /// `#EXTINF` media segment duration
    ExtInf,
    /// `#EXT-X-STREAM-INF` variant stream
    ExtXStreamInf,
    /// `#EXT-X-MEDIA` media group rendition
    ExtXMedia,
    /// `#EXT-X-BYTERANGE` sub-range of the following segment resource
    ExtXByteRange,
    /// `#EXT-X-VERSION` protocol version
    ExtXVersion,
    /// `#EXT-X-TARGETDURATION` maximum segment duration
    ExtXTargetDuration,
    /// `#EXT-X-PLAYLIST-TYPE` VOD or EVENT
    ExtXPlaylistType,
    /// `#EXT-X-ENDLIST` end-of-list marker
    ExtXEndList,
    /// `#EXT-X-MAP` media initialization section
    ExtXMap,
    /// `#EXT-X-MEDIA-SEQUENCE` first media sequence number
    ExtXMediaSequence,
    /// `#EXT-X-DISCONTINUITY` encoding discontinuity marker
    ExtXDiscontinuity,
}

impl Tag {
    /// Every recognized tag.
    pub const ALL: [Tag; 12] = [
        Tag::ExtM3u,
        Tag::ExtInf,
        Tag::ExtXStreamInf,
        Tag::ExtXMedia,
        Tag::ExtXByteRange,
        Tag::ExtXVersion,
        Tag::ExtXTargetDuration,
        Tag::ExtXPlaylistType,
        Tag::ExtXEndList,
        Tag::ExtXMap,
        Tag::ExtXMediaSequence,
        Tag::ExtXDiscontinuity,
    ];

    /// The tag name as written in a playlist, without the marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::ExtM3u => "EXTM3U",
            Tag::ExtInf => "EXTINF",
            Tag::ExtXStreamInf => "EXT-X-STREAM-INF",
            Tag::ExtXMedia => "EXT-X-MEDIA",
            Tag::ExtXByteRange => "EXT-X-BYTERANGE",
            Tag::ExtXVersion => "EXT-X-VERSION",
            Tag::ExtXTargetDuration => "EXT-X-TARGETDURATION",
            Tag::ExtXPlaylistType => "EXT-X-PLAYLIST-TYPE",
            Tag::ExtXEndList => "EXT-X-ENDLIST",
            Tag::ExtXMap => "EXT-X-MAP",
            Tag::ExtXMediaSequence => "EXT-X-MEDIA-SEQUENCE",
            Tag::ExtXDiscontinuity => "EXT-X-DISCONTINUITY",
        }
    }

    /// Whether an entry with this tag is followed by a URL line.
    pub fn expects_url(&self) -> bool {
        matches!(self, Tag::ExtInf | Tag::ExtXStreamInf)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tag {
    type Err = Error;

    /// Accepts the tag name with or without the leading marker. Underscores
    /// are read as dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches(MARKER).replace('_', "-");
        match name.as_str() {
            "EXTM3U" => Ok(Tag::ExtM3u),
            "EXTINF" => Ok(Tag::ExtInf),
            "EXT-X-STREAM-INF" => Ok(Tag::ExtXStreamInf),
            "EXT-X-MEDIA" => Ok(Tag::ExtXMedia),
            "EXT-X-BYTERANGE" => Ok(Tag::ExtXByteRange),
            "EXT-X-VERSION" => Ok(Tag::ExtXVersion),
            "EXT-X-TARGETDURATION" => Ok(Tag::ExtXTargetDuration),
            "EXT-X-PLAYLIST-TYPE" => Ok(Tag::ExtXPlaylistType),
            "EXT-X-ENDLIST" => Ok(Tag::ExtXEndList),
            "EXT-X-MAP" => Ok(Tag::ExtXMap),
            "EXT-X-MEDIA-SEQUENCE" => Ok(Tag::ExtXMediaSequence),
            "EXT-X-DISCONTINUITY" => Ok(Tag::ExtXDiscontinuity),
            _ => Err(Error::UnknownTag(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_from_str() {
        assert_eq!("EXTINF".parse::<Tag>().unwrap(), Tag::ExtInf);
        assert_eq!("#EXT-X-STREAM-INF".parse::<Tag>().unwrap(), Tag::ExtXStreamInf);
        assert_eq!("EXT_X_MEDIA_SEQUENCE".parse::<Tag>().unwrap(), Tag::ExtXMediaSequence);
        assert_eq!(
            "EXT-X-KEY".parse::<Tag>(),
            Err(Error::UnknownTag("EXT-X-KEY".to_string()))
        );
    }

    #[test]
    fn test_tag_names_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
            assert_eq!(tag.to_string(), tag.as_str());
        }
    }

    #[test]
    fn test_expects_url() {
        assert!(Tag::ExtInf.expects_url());
        assert!(Tag::ExtXStreamInf.expects_url());
        assert!(!Tag::ExtXMedia.expects_url());
        assert!(!Tag::ExtXByteRange.expects_url());
        assert!(!Tag::ExtXEndList.expects_url());
    }
}
