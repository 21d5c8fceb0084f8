//! Codec signaling strings from the `CODECS` attribute.
//!
//! Known strings map to a closed set of codec/profile identifiers through a
//! static table. Anything else maps to [`CodecId::NotImplemented`]; an unknown
//! codec is never an error.

use phf::phf_map;

/// Known codec and profile identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CodecId {
    /// H.264 High Profile level 4.1
    H264HighProfile41,
    /// H.264 High Profile level 4.0
    H264HighProfile40,
    /// H.264 High Profile level 3.1
    H264HighProfile31,
    /// H.264 Main Profile level 4.0
    H264MainProfile40,
    /// H.264 Main Profile level 3.1
    H264MainProfile31,
    /// H.264 Main Profile level 3.0
    H264MainProfile30,
    /// H.264 Baseline Profile level 3.1
    H264BaselineProfile31,
    /// H.264 Baseline Profile level 3.0
    H264BaselineProfile30,
    /// H.264 Baseline Profile level 2.1
    H264BaselineProfile21,
    /// AAC Low Complexity
    AacLc,
    /// High-Efficiency AAC
    AacHe,
    /// MPEG-1 Audio Layer III
    Mp3,
    /// Signaling string not in the table
    NotImplemented,
}

/// See Apple's HLS authoring FAQ for the signaling strings.
static CODEC_TABLE: phf::Map<&'static str, CodecId> = phf_map! {
    "mp4a.40.2" => CodecId::AacLc,
    "mp4a.40.5" => CodecId::AacHe,
    "mp4a.40.34" => CodecId::Mp3,
    "avc1.640029" => CodecId::H264HighProfile41,
    "avc1.640028" => CodecId::H264HighProfile40,
    "avc1.64001f" => CodecId::H264HighProfile31,
    "avc1.4d0028" => CodecId::H264MainProfile40,
    "avc1.4d001f" => CodecId::H264MainProfile31,
    // constrained
    "avc1.4d401f" => CodecId::H264MainProfile31,
    "avc1.4d001e" => CodecId::H264MainProfile30,
    // iOS 3 compatible
    "avc1.77.30" => CodecId::H264MainProfile30,
    "avc1.42001f" => CodecId::H264BaselineProfile31,
    "avc1.42001e" => CodecId::H264BaselineProfile30,
    // iOS 3 compatible
    "avc1.66.30" => CodecId::H264BaselineProfile30,
    "avc1.420016" => CodecId::H264BaselineProfile21,
};

impl CodecId {
    /// Whether this is one of the H.264/AVC profiles.
    pub fn is_avc(&self) -> bool {
        matches!(
            self,
            CodecId::H264HighProfile41
                | CodecId::H264HighProfile40
                | CodecId::H264HighProfile31
                | CodecId::H264MainProfile40
                | CodecId::H264MainProfile31
                | CodecId::H264MainProfile30
                | CodecId::H264BaselineProfile31
                | CodecId::H264BaselineProfile30
                | CodecId::H264BaselineProfile21
        )
    }

    /// Whether this is one of the AAC variants.
    pub fn is_aac(&self) -> bool {
        matches!(self, CodecId::AacLc | CodecId::AacHe)
    }

    /// Whether this is MP3.
    pub fn is_mp3(&self) -> bool {
        matches!(self, CodecId::Mp3)
    }
}

impl std::fmt::Display for CodecId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecId::H264HighProfile41 => write!(f, "H.264 High 4.1"),
            CodecId::H264HighProfile40 => write!(f, "H.264 High 4.0"),
            CodecId::H264HighProfile31 => write!(f, "H.264 High 3.1"),
            CodecId::H264MainProfile40 => write!(f, "H.264 Main 4.0"),
            CodecId::H264MainProfile31 => write!(f, "H.264 Main 3.1"),
            CodecId::H264MainProfile30 => write!(f, "H.264 Main 3.0"),
            CodecId::H264BaselineProfile31 => write!(f, "H.264 Baseline 3.1"),
            CodecId::H264BaselineProfile30 => write!(f, "H.264 Baseline 3.0"),
            CodecId::H264BaselineProfile21 => write!(f, "H.264 Baseline 2.1"),
            CodecId::AacLc => write!(f, "AAC-LC"),
            CodecId::AacHe => write!(f, "HE-AAC"),
            CodecId::Mp3 => write!(f, "MP3"),
            CodecId::NotImplemented => write!(f, "not implemented"),
        }
    }
}

/// Look up a codec signaling string. Unknown strings yield [`CodecId::NotImplemented`].
pub fn parse_codec(raw: &str) -> CodecId {
    CODEC_TABLE
        .get(raw)
        .copied()
        .unwrap_or(CodecId::NotImplemented)
}

/// One entry of a `CODECS` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Codec {
    /// Resolved identifier.
    pub id: CodecId,
    /// Signaling string as it appeared in the playlist.
    pub raw: String,
}

impl Codec {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            id: parse_codec(raw),
            raw: raw.to_string(),
        }
    }

    pub fn is_avc(&self) -> bool {
        self.id.is_avc()
    }

    pub fn is_aac(&self) -> bool {
        self.id.is_aac()
    }

    pub fn is_mp3(&self) -> bool {
        self.id.is_mp3()
    }
}

impl From<CodecId> for Codec {
    fn from(id: CodecId) -> Self {
        let raw = CODEC_TABLE
            .entries()
            .find(|(_, candidate)| **candidate == id)
            .map(|(raw, _)| raw.to_string())
            .unwrap_or_default();
        Self { id, raw }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a comma-separated `CODECS` value into its codecs, in order.
pub fn parse_codec_list(codecs: &str) -> Vec<Codec> {
    codecs
        .split(',')
        .filter(|raw| !raw.trim().is_empty())
        .map(Codec::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codec_known() {
        assert_eq!(parse_codec("mp4a.40.2"), CodecId::AacLc);
        assert_eq!(parse_codec("mp4a.40.5"), CodecId::AacHe);
        assert_eq!(parse_codec("mp4a.40.34"), CodecId::Mp3);
        assert_eq!(parse_codec("avc1.640029"), CodecId::H264HighProfile41);
        assert_eq!(parse_codec("avc1.4d401f"), CodecId::H264MainProfile31);
        assert_eq!(parse_codec("avc1.66.30"), CodecId::H264BaselineProfile30);
    }

    #[test]
    fn test_parse_codec_unknown_is_not_an_error() {
        assert_eq!(parse_codec("xyz"), CodecId::NotImplemented);
        assert_eq!(parse_codec("hvc1.1.6.L93.90"), CodecId::NotImplemented);
        // lookup is exact
        assert_eq!(parse_codec("MP4A.40.2"), CodecId::NotImplemented);
    }

    #[test]
    fn test_codec_families() {
        let avc = Codec::parse("avc1.42001e");
        assert!(avc.is_avc());
        assert!(!avc.is_aac());

        let aac = Codec::parse("mp4a.40.5");
        assert!(aac.is_aac());
        assert!(!aac.is_mp3());

        assert!(Codec::parse("mp4a.40.34").is_mp3());

        let unknown = Codec::parse("ec-3");
        assert!(!unknown.is_avc() && !unknown.is_aac() && !unknown.is_mp3());
    }

    #[test]
    fn test_parse_codec_list_keeps_order() {
        let codecs = parse_codec_list("mp4a.40.2, avc1.640029");
        assert_eq!(codecs.len(), 2);
        assert_eq!(codecs[0].id, CodecId::AacLc);
        assert_eq!(codecs[1].id, CodecId::H264HighProfile41);
        assert_eq!(codecs[1].raw, "avc1.640029");
    }

    #[test]
    fn test_codec_from_id() {
        assert_eq!(Codec::from(CodecId::AacLc).raw, "mp4a.40.2");
        assert_eq!(Codec::from(CodecId::NotImplemented).raw, "");
    }
}
