//! Line-by-line state machine that turns a document into entries.
//!
//! The whole parser state is one [`ParserState`] value. Each call to
//! [`ParserState::advance`] consumes the state and one line and returns the
//! next state plus what the line produced, so every transition can be
//! exercised on its own.

use url::Url;

use crate::entry::{build, Built, Entry, PendingEntry, RawEntry};
use crate::error::{Error, Result};
use crate::grammar::LineKind;
use crate::resolve::resolve_url;
use crate::tag::Tag;
use crate::value::{parse_byte_range, ByteRange};

/// A non-fatal problem found while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: not a valid entry: {}", self.line, self.content)
    }
}

/// Where the state machine is.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    AwaitingEntry,
    AwaitingUrl {
        pending: PendingEntry,
        /// Line the pending entry came from.
        line: usize,
        content: String,
    },
}

/// What a single line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Nothing to record (blank line, comment, consumed byte range).
    Skip,
    /// A finished entry to append to the playlist.
    Emit(Entry),
    /// A line that is neither an entry, a comment, nor an awaited URL.
    Malformed(Diagnostic),
}

/// Parser state threaded through the forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserState {
    pub phase: Phase,
    /// Where the next byte range without an explicit offset starts.
    pub byte_range_offset: u64,
    /// Byte range seen before its media segment tag, with its line.
    pub leading_byte_range: Option<(usize, ByteRange)>,
}

impl Default for ParserState {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingEntry,
            byte_range_offset: 0,
            leading_byte_range: None,
        }
    }

    /// Whether a URL line is expected next.
    pub fn is_awaiting_url(&self) -> bool {
        matches!(self.phase, Phase::AwaitingUrl { .. })
    }

    /// Consume one line. `line_no` is 1-based and only used for reporting.
    ///
    /// Errors come back wrapped with the line that caused them.
    pub fn advance(self, line_no: usize, line: &str, context: Option<&Url>) -> Result<(Self, Step)> {
        let line = line.trim_end();
        self.transition(line_no, line, context)
            .map_err(|e| e.at_line(line_no, line))
    }

    /// Check the state at end of input.
    ///
    /// Fails with [`Error::IncompleteEntry`] if an entry is still waiting for
    /// its URL, or a byte range never found its media segment.
    pub fn finish(self) -> Result<()> {
        if let Phase::AwaitingUrl { line, content, .. } = self.phase {
            return Err(Error::IncompleteEntry(content.clone()).at_line(line, content));
        }
        if let Some((line, range)) = self.leading_byte_range {
            let content = format!("#{}:{}", Tag::ExtXByteRange, range);
            return Err(Error::IncompleteEntry(content.clone()).at_line(line, content));
        }
        Ok(())
    }

    fn transition(mut self, line_no: usize, line: &str, context: Option<&Url>) -> Result<(Self, Step)> {
        let kind = LineKind::of(line);
        let phase = std::mem::replace(&mut self.phase, Phase::AwaitingEntry);

        match (phase, kind) {
            (phase, LineKind::Blank | LineKind::Comment) => {
                self.phase = phase;
                Ok((self, Step::Skip))
            }

            (Phase::AwaitingEntry, LineKind::Other) => {
                let diagnostic = Diagnostic {
                    line: line_no,
                    content: line.to_string(),
                };
                Ok((self, Step::Malformed(diagnostic)))
            }

            (Phase::AwaitingEntry, LineKind::Entry) => {
                match build(RawEntry::parse(line)?)? {
                    Built::Complete(entry) => Ok((self, Step::Emit(entry))),
                    Built::ExpectsUrl(mut pending) => {
                        if let Some((_, range)) = self.leading_byte_range.take() {
                            if !pending.set_byte_range(range) {
                                self.leading_byte_range = Some((line_no, range));
                            }
                        }
                        self.phase = Phase::AwaitingUrl {
                            pending,
                            line: line_no,
                            content: line.to_string(),
                        };
                        Ok((self, Step::Skip))
                    }
                    Built::ByteRange(raw) => {
                        let range = self.consume_byte_range(&raw)?;
                        if self.leading_byte_range.replace((line_no, range)).is_some() {
                            tracing::warn!(line = line_no, "Byte range replaces an unused earlier one");
                        }
                        Ok((self, Step::Skip))
                    }
                }
            }

            (
                Phase::AwaitingUrl {
                    mut pending,
                    line: origin,
                    content,
                },
                LineKind::Entry,
            ) => {
                let raw = RawEntry::parse(line)?;
                let step = if raw.tag == Tag::ExtXByteRange
                    && matches!(pending, PendingEntry::MediaSegment { .. })
                {
                    let range = self.consume_byte_range(&raw)?;
                    pending.set_byte_range(range);
                    Step::Skip
                } else {
                    tracing::debug!(line = line_no, tag = %raw.tag, "Side entry while awaiting a URL");
                    Step::Emit(Entry::Generic(raw))
                };
                self.phase = Phase::AwaitingUrl {
                    pending,
                    line: origin,
                    content,
                };
                Ok((self, step))
            }

            (Phase::AwaitingUrl { pending, .. }, LineKind::Other) => {
                let url = resolve_url(context, line)?;
                tracing::trace!(line = line_no, tag = %pending.raw().tag, %url, "Attached URL");
                Ok((self, Step::Emit(pending.attach(url))))
            }
        }
    }

    fn consume_byte_range(&mut self, raw: &RawEntry) -> Result<ByteRange> {
        let [token] = raw.values.as_slice() else {
            return Err(Error::MalformedByteRange(raw.values.join(",")));
        };
        let (range, next_offset) = parse_byte_range(token, self.byte_range_offset)?;
        self.byte_range_offset = next_offset;
        Ok(range)
    }
}
