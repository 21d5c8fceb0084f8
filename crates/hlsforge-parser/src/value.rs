//! Value parsers for typed attribute and tag values.

use crate::error::{Error, Result};
use crate::grammar::{BYTE_RANGE_SEPARATOR, RESOLUTION_SEPARATOR};

/// Video resolution of a variant stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.width, RESOLUTION_SEPARATOR, self.height)
    }
}

impl std::str::FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_resolution(s)
    }
}

/// Inclusive byte range within a segment resource. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// A range always covers at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Offset where a following contiguous range starts.
    pub fn next_offset(&self) -> u64 {
        self.end + 1
    }
}

impl std::fmt::Display for ByteRange {
    /// Renders in the explicit `LENGTH@OFFSET` form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.len(), BYTE_RANGE_SEPARATOR, self.start)
    }
}

/// Parse a `WIDTHxHEIGHT` resolution. Both halves must be plain decimal digits.
pub fn parse_resolution(s: &str) -> Result<Resolution> {
    let malformed = || Error::MalformedResolution(s.to_string());

    let (width, height) = s.trim().split_once(RESOLUTION_SEPARATOR).ok_or_else(malformed)?;
    if !is_digits(width) || !is_digits(height) {
        return Err(malformed());
    }

    Ok(Resolution {
        width: width.parse().map_err(|_| malformed())?,
        height: height.parse().map_err(|_| malformed())?,
    })
}

/// Parse a `LENGTH` or `LENGTH@OFFSET` byte range token.
///
/// Without an explicit offset the range starts at `running_offset`. Returns
/// the range and the offset to carry into the next byte range of the same
/// document, which is the first byte after this range.
pub fn parse_byte_range(token: &str, running_offset: u64) -> Result<(ByteRange, u64)> {
    let malformed = || Error::MalformedByteRange(token.to_string());

    let token = token.trim();
    let (length, offset) = match token.split_once(BYTE_RANGE_SEPARATOR) {
        Some((length, offset)) => (length, Some(offset)),
        None => (token, None),
    };

    if !is_digits(length) {
        return Err(malformed());
    }
    let length: u64 = length.parse().map_err(|_| malformed())?;
    if length == 0 {
        return Err(malformed());
    }

    let start = match offset {
        Some(offset) if is_digits(offset) => offset.parse().map_err(|_| malformed())?,
        Some(_) => return Err(malformed()),
        None => running_offset,
    };
    let end = start.checked_add(length - 1).ok_or_else(malformed)?;

    let range = ByteRange { start, end };
    Ok((range, range.next_offset()))
}

/// Parse a media segment duration in seconds. Must be a finite, non-negative number.
pub fn parse_duration(s: &str) -> Result<f64> {
    let duration: f64 = s
        .trim()
        .parse()
        .map_err(|_| Error::InvalidDuration(s.to_string()))?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(Error::InvalidDuration(s.to_string()));
    }
    Ok(duration)
}

/// Parse an unsigned decimal integer attribute value.
pub fn parse_uint(s: &str) -> Result<u64> {
    let trimmed = s.trim();
    if !is_digits(trimmed) {
        return Err(Error::InvalidInteger(s.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| Error::InvalidInteger(s.to_string()))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("1920x1080").unwrap(), Resolution::new(1920, 1080));
        assert_eq!(parse_resolution("640x360").unwrap().to_string(), "640x360");
    }

    #[test]
    fn test_parse_resolution_malformed() {
        for input in ["1920", "1920x", "x1080", "1920x1080x2", "19a0x1080", "-1x5", ""] {
            assert_eq!(
                parse_resolution(input),
                Err(Error::MalformedResolution(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_byte_range_chain() {
        let (a, offset) = parse_byte_range("76242@0", 0).unwrap();
        assert_eq!(a, ByteRange { start: 0, end: 76241 });
        assert_eq!(offset, 76242);

        let (b, offset) = parse_byte_range("82112", offset).unwrap();
        assert_eq!(b.start, a.end + 1);
        assert_eq!(b.start, 76242);
        assert_eq!(b.end, 158353);
        assert_eq!(offset, 158354);
    }

    #[test]
    fn test_byte_range_explicit_offset_replaces_running_offset() {
        let (range, offset) = parse_byte_range("100@5000", 42).unwrap();
        assert_eq!(range, ByteRange { start: 5000, end: 5099 });
        assert_eq!(range.len(), 100);
        assert_eq!(offset, 5100);
        assert_eq!(range.to_string(), "100@5000");
    }

    #[test]
    fn test_byte_range_malformed() {
        for input in ["", "@10", "abc", "10@", "10@x", "0", "0@5", "-5"] {
            assert!(
                matches!(parse_byte_range(input, 0), Err(Error::MalformedByteRange(_))),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("10.0").unwrap(), 10.0);
        assert_eq!(parse_duration("9.009").unwrap(), 9.009);
        assert_eq!(parse_duration("0").unwrap(), 0.0);
        assert!(matches!(parse_duration("-1"), Err(Error::InvalidDuration(_))));
        assert!(matches!(parse_duration("ten"), Err(Error::InvalidDuration(_))));
        assert!(matches!(parse_duration("NaN"), Err(Error::InvalidDuration(_))));
        assert!(matches!(parse_duration("inf"), Err(Error::InvalidDuration(_))));
    }

    #[test]
    fn test_parse_uint() {
        assert_eq!(parse_uint("1280000").unwrap(), 1_280_000);
        assert_eq!(parse_uint(" 1 ").unwrap(), 1);
        assert!(matches!(parse_uint("+1"), Err(Error::InvalidInteger(_))));
        assert!(matches!(parse_uint("1.5"), Err(Error::InvalidInteger(_))));
    }
}
