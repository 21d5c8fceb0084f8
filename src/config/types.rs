use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserSection,

    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParserSection {
    /// Context URL for relative references when none is given on the command line
    #[serde(default)]
    pub base_url: Option<String>,

    /// Longest accepted line in bytes
    #[serde(default)]
    pub max_line_length: Option<usize>,

    /// Largest accepted input in bytes, checked before parsing
    #[serde(default)]
    pub max_input_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,

    /// Appended to every entry URL before output (e.g. a session token)
    #[serde(default)]
    pub url_suffix: Option<String>,
}

/// How `parse` prints a playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Structured model as JSON
    Json,
    /// Re-serialized playlist
    M3u8,
}
