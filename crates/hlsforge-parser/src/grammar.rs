//! Line grammar for m3u8 documents.
//!
//! Recognition is purely syntactic: an entry line only has to look like a tag,
//! whether the tag is known is decided later by [`crate::tag::Tag`].

use regex::Regex;
use std::sync::LazyLock;

/// Character that introduces every entry and comment line.
pub const MARKER: char = '#';
/// Separates a tag name from its value part.
pub const VALUE_SEPARATOR: char = ':';
/// Separates the values of an entry.
pub const VALUES_SEPARATOR: char = ',';
/// Separates an attribute key from its value.
pub const ATTRIBUTE_SEPARATOR: char = '=';
/// Separates width and height in a resolution.
pub const RESOLUTION_SEPARATOR: char = 'x';
/// Separates length and offset in a byte range.
pub const BYTE_RANGE_SEPARATOR: char = '@';

/// Entry line grammar: marker, tag name, optional value part.
pub const ENTRY_PATTERN: &str = r#"^#([A-Z0-9-]+)(:[A-Za-z0-9,"._ =@-]+)?$"#;
/// Comment line grammar: a doubled marker.
pub const COMMENT_PATTERN: &str = r"^##(.+)?$";
/// One `key=value` or `key="quoted, value"` segment of an attribute list,
/// including the comma that ends it.
pub const ATTRIBUTE_LIST_PATTERN: &str = r#"\s*(.+?)\s*=((?:".*?")|.*?)(?:,|$)"#;

static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENTRY_PATTERN).expect("entry pattern is valid"));
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COMMENT_PATTERN).expect("comment pattern is valid"));
pub(crate) static ATTRIBUTE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ATTRIBUTE_LIST_PATTERN).expect("attribute list pattern is valid")
});

/// Syntactic class of a single document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line.
    Blank,
    /// `##...` comment.
    Comment,
    /// Tag line matching [`ENTRY_PATTERN`].
    Entry,
    /// Anything else: a URL when one is expected, a malformed line otherwise.
    Other,
}

impl LineKind {
    /// Classify a line. The line must not contain its line terminator.
    pub fn of(line: &str) -> Self {
        if line.trim().is_empty() {
            LineKind::Blank
        } else if is_entry_line(line) {
            LineKind::Entry
        } else if is_comment_line(line) {
            LineKind::Comment
        } else {
            LineKind::Other
        }
    }
}

/// Whether the line matches the entry grammar.
pub fn is_entry_line(line: &str) -> bool {
    ENTRY.is_match(line)
}

/// Whether the line matches the comment grammar.
pub fn is_comment_line(line: &str) -> bool {
    COMMENT.is_match(line)
}

/// Strip every leading and trailing `c`, along with surrounding whitespace.
pub(crate) fn unwrap_char(s: &str, c: char) -> &str {
    s.trim_matches(|ch: char| ch == c || ch.is_whitespace())
}
