//! # hlsforge-parser
//!
//! Parser and serializer for HTTP Live Streaming playlists (`.m3u8`).
//!
//! A document is scanned once, line by line. Tags are tokenized, typed
//! entries are built for media segments, variant streams and media groups,
//! URL lines are resolved against an optional context URL, and the playlist is
//! classified as a master or a media playlist.
//!
//! ## Quick Start
//!
//! ```
//! use hlsforge_parser::{parse, FileType};
//! use url::Url;
//!
//! let text = "#EXTM3U\n\
//!             #EXT-X-STREAM-INF:BANDWIDTH=1280000,RESOLUTION=640x360\n\
//!             low/index.m3u8\n";
//! let context = Url::parse("http://cdn.example.com/live/master.m3u8").unwrap();
//!
//! let playlist = parse(text, Some(context)).unwrap();
//! assert_eq!(playlist.file_type(), Some(FileType::Master));
//!
//! let stream = playlist.variant_streams().next().unwrap();
//! assert_eq!(stream.stream.bandwidth, 1_280_000);
//! assert_eq!(stream.url.as_str(), "http://cdn.example.com/live/low/index.m3u8");
//! ```
//!
//! ## Configured Parsing
//!
//! ```
//! use hlsforge_parser::config::ParserConfig;
//! use hlsforge_parser::Playlist;
//!
//! let config = ParserConfig::builder().max_line_length(1024).build();
//! let mut playlist = Playlist::with_config(config);
//! playlist.parse("#EXTM3U\n#EXTINF:10,\nhttp://cdn/a.ts\n").unwrap();
//! assert!(playlist.is_media());
//! ```

pub mod assembler;
pub mod attribute;
pub mod codec;
pub mod config;
pub mod entry;
mod error;
pub mod grammar;
pub mod playlist;
mod render;
pub mod resolve;
pub mod tag;
pub mod value;

pub use assembler::Diagnostic;
pub use attribute::{Attribute, AttributeName};
pub use codec::{parse_codec, Codec, CodecId};
pub use config::ParserConfig;
pub use entry::{
    build, parse_line, Built, Entry, GroupType, MediaGroup, MediaGroupEntry, MediaSegment,
    MediaSegmentEntry, RawEntry, VariantStream, VariantStreamEntry,
};
pub use error::{Error, Result};
pub use playlist::{FileType, Playlist};
pub use resolve::resolve_url;
pub use tag::Tag;
pub use value::{parse_byte_range, parse_resolution, ByteRange, Resolution};

/// Parse a document, resolving relative URLs against `context`.
///
/// Shorthand for [`Playlist::parse_str`].
pub fn parse(text: &str, context: Option<url::Url>) -> Result<Playlist> {
    Playlist::parse_str(text, context)
}
