//! Error types for hlsforge-parser.

use crate::attribute::AttributeName;
use crate::tag::Tag;

/// Result type for hlsforge-parser operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for playlist parsing.
///
/// Every variant except [`Error::AtLine`] names a single failure kind. Errors
/// raised while scanning a document are wrapped in [`Error::AtLine`] so the
/// caller gets the offending line back; use [`Error::root`] to match on the
/// underlying kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The tag name is not one of the recognized tags.
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// The attribute key is not one of the recognized attribute names.
    #[error("Unknown attribute name: {0}")]
    UnknownAttributeName(String),

    /// A recognized attribute appeared on an entry that does not accept it.
    #[error("Attribute {attribute} is not valid for #{tag}")]
    UnknownAttributeForEntry { tag: Tag, attribute: AttributeName },

    /// An attribute token did not split into exactly one key and one value.
    #[error("Malformed attribute: {0}")]
    MalformedAttribute(String),

    /// A resolution was not of the form `WIDTHxHEIGHT`.
    #[error("Malformed resolution: {0}")]
    MalformedResolution(String),

    /// A byte range was not of the form `LENGTH[@OFFSET]`.
    #[error("Malformed byte range: {0}")]
    MalformedByteRange(String),

    /// A media segment duration was missing, negative or not a number.
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// An integer attribute was not an unsigned decimal number.
    #[error("Invalid integer: {0}")]
    InvalidInteger(String),

    /// A media group `TYPE` was not AUDIO, VIDEO or SUBTITLES.
    #[error("Invalid group type: {0}")]
    InvalidGroupType(String),

    /// A relative reference was found but no context URL was supplied.
    #[error("Expected an absolute URL but got {0:?}, and no context URL was supplied")]
    MissingContext(String),

    /// A URL reference could not be resolved.
    #[error("Invalid URL {reference:?}: {source}")]
    InvalidUrl {
        reference: String,
        #[source]
        source: url::ParseError,
    },

    /// An entry that expects a URL line never received one.
    #[error("Entry never received its URL line: {0}")]
    IncompleteEntry(String),

    /// The document mixes master playlist and media playlist entries.
    #[error("Playlist is ambiguous: {0} conflicts with the entries seen so far")]
    AmbiguousFileType(String),

    /// A line handed to the entry parser does not match the entry grammar.
    #[error("Not an entry line: {0}")]
    NotAnEntry(String),

    /// A line exceeded the configured length limit.
    #[error("Line exceeds the limit of {limit} bytes")]
    LineTooLong { limit: usize },

    /// Wraps another error with the line that triggered it.
    #[error("line {line}: {source} (in {content:?})")]
    AtLine {
        line: usize,
        content: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach a 1-based line number and the line text to this error.
    ///
    /// Errors that already carry a line are returned unchanged.
    pub fn at_line(self, line: usize, content: impl Into<String>) -> Self {
        match self {
            Self::AtLine { .. } => self,
            other => Self::AtLine {
                line,
                content: content.into(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error kind, with any line context stripped.
    pub fn root(&self) -> &Error {
        match self {
            Self::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    /// The 1-based line number that triggered this error, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn invalid_url(reference: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            reference: reference.into(),
            source,
        }
    }
}
