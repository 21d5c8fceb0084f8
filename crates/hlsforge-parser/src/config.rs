//! Parser configuration.

use url::Url;

/// Configuration for a [`crate::Playlist`].
///
/// Use the builder to create a configuration:
///
/// ```
/// use hlsforge_parser::config::ParserConfig;
/// use url::Url;
///
/// let config = ParserConfig::builder()
///     .context(Url::parse("http://host/path/playlist.m3u8").unwrap())
///     .max_line_length(4096)
///     .build();
///
/// assert_eq!(config.max_line_length, Some(4096));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParserConfig {
    /// Base URL that relative URL lines resolve against.
    /// Without one, every URL line must be absolute.
    pub context: Option<Url>,

    /// Longest accepted line, in bytes, terminator excluded.
    /// Default: unlimited
    pub max_line_length: Option<usize>,
}

impl ParserConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

/// Builder for `ParserConfig`.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    context: Option<Url>,
    max_line_length: Option<usize>,
}

impl ParserConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context URL.
    pub fn context(mut self, context: Url) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the context URL if one is given, clearing it otherwise.
    pub fn maybe_context(mut self, context: Option<Url>) -> Self {
        self.context = context;
        self
    }

    /// Reject documents with a line longer than `limit` bytes.
    pub fn max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = Some(limit);
        self
    }

    pub fn build(self) -> ParserConfig {
        ParserConfig {
            context: self.context,
            max_line_length: self.max_line_length,
        }
    }
}
