//! Attribute lists and the values behind a tag's value separator.

use crate::error::{Error, Result};
use crate::grammar::{unwrap_char, ATTRIBUTE_LIST, ATTRIBUTE_SEPARATOR, VALUES_SEPARATOR};

/// A recognized attribute key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AttributeName {
    ProgramId,
    Bandwidth,
    Codecs,
    Resolution,
    Type,
    GroupId,
    Language,
    Uri,
    Name,
    Audio,
    Video,
    Subtitles,
}

impl AttributeName {
    /// The key as written in a playlist.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeName::ProgramId => "PROGRAM-ID",
            AttributeName::Bandwidth => "BANDWIDTH",
            AttributeName::Codecs => "CODECS",
            AttributeName::Resolution => "RESOLUTION",
            AttributeName::Type => "TYPE",
            AttributeName::GroupId => "GROUP-ID",
            AttributeName::Language => "LANGUAGE",
            AttributeName::Uri => "URI",
            AttributeName::Name => "NAME",
            AttributeName::Audio => "AUDIO",
            AttributeName::Video => "VIDEO",
            AttributeName::Subtitles => "SUBTITLES",
        }
    }

    /// Whether values of this attribute are quoted strings.
    pub fn is_quoted_string(&self) -> bool {
        matches!(
            self,
            AttributeName::Uri
                | AttributeName::Language
                | AttributeName::Codecs
                | AttributeName::Audio
                | AttributeName::Video
                | AttributeName::Subtitles
                | AttributeName::Name
                | AttributeName::GroupId
        )
    }
}

impl std::fmt::Display for AttributeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttributeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().replace('_', "-").as_str() {
            "PROGRAM-ID" => Ok(AttributeName::ProgramId),
            "BANDWIDTH" => Ok(AttributeName::Bandwidth),
            "CODECS" => Ok(AttributeName::Codecs),
            "RESOLUTION" => Ok(AttributeName::Resolution),
            "TYPE" => Ok(AttributeName::Type),
            "GROUP-ID" => Ok(AttributeName::GroupId),
            "LANGUAGE" => Ok(AttributeName::Language),
            "URI" => Ok(AttributeName::Uri),
            "NAME" => Ok(AttributeName::Name),
            "AUDIO" => Ok(AttributeName::Audio),
            "VIDEO" => Ok(AttributeName::Video),
            "SUBTITLES" => Ok(AttributeName::Subtitles),
            _ => Err(Error::UnknownAttributeName(s.trim().to_string())),
        }
    }
}

/// A decoded `KEY=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub name: AttributeName,
    /// Value as written, quotes included.
    pub raw_value: String,
}

impl Attribute {
    /// Decode one attribute token.
    ///
    /// The token must split on `=` into exactly one key and one non-empty
    /// value.
    pub fn parse(token: &str) -> Result<Self> {
        let mut parts = token.split(ATTRIBUTE_SEPARATOR);
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) if !value.trim().is_empty() => (key, value),
            _ => return Err(Error::MalformedAttribute(token.to_string())),
        };

        Ok(Self {
            name: key.parse()?,
            raw_value: value.trim().to_string(),
        })
    }

    /// The value, with quotes stripped for quoted-string attributes.
    pub fn value(&self) -> &str {
        if self.name.is_quoted_string() {
            unwrap_char(&self.raw_value, '"')
        } else {
            &self.raw_value
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.name, ATTRIBUTE_SEPARATOR, self.raw_value)
    }
}

/// Split the value part of an entry line into its raw value tokens.
///
/// A value part without commas is a single bare value. Otherwise it is
/// scanned as an attribute list whose quoted values may contain commas; each
/// `key=value` segment becomes one token. A value part that has commas but no
/// attribute segments is a single bare value with its surrounding commas
/// stripped (`10.0,` becomes `10.0`).
pub fn decode_values(value_part: &str) -> Vec<String> {
    if !value_part.contains(VALUES_SEPARATOR) {
        return vec![value_part.to_string()];
    }

    let values: Vec<String> = ATTRIBUTE_LIST
        .find_iter(value_part)
        .map(|m| unwrap_char(m.as_str(), VALUES_SEPARATOR).to_string())
        .collect();

    if values.is_empty() {
        vec![unwrap_char(value_part, VALUES_SEPARATOR).to_string()]
    } else {
        values
    }
}

/// Decode every raw value token as an attribute, in order.
pub fn decode_attributes<S: AsRef<str>>(values: &[S]) -> Result<Vec<Attribute>> {
    values.iter().map(|v| Attribute::parse(v.as_ref())).collect()
}
