//! Reading playlist text from a file or stdin.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use url::Url;

/// Path that selects stdin.
pub const STDIN: &str = "-";

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN
}

/// Read the whole input as UTF-8, rejecting anything over `max_bytes`.
pub fn read_input(path: &Path, max_bytes: Option<u64>) -> Result<String> {
    if is_stdin(path) {
        read_limited(io::stdin().lock(), max_bytes).context("Failed to read playlist from stdin")
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        read_limited(file, max_bytes).with_context(|| format!("Failed to read {:?}", path))
    }
}

/// Read `reader` to the end, failing once more than `max_bytes` arrive.
pub fn read_limited<R: Read>(reader: R, max_bytes: Option<u64>) -> Result<String> {
    let mut bytes = Vec::new();
    match max_bytes {
        Some(limit) => {
            reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
            if bytes.len() as u64 > limit {
                anyhow::bail!("Input exceeds the limit of {} bytes", limit);
            }
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut bytes)?;
        }
    }

    String::from_utf8(bytes).context("Input is not valid UTF-8")
}

/// A `file://` context URL for a playlist read from disk.
///
/// Returns `None` for stdin, where there is no location to resolve against.
pub fn file_context(path: &Path) -> Result<Option<Url>> {
    if is_stdin(path) {
        return Ok(None);
    }
    let absolute = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {:?}", path))?;
    let url = Url::from_file_path(&absolute)
        .map_err(|()| anyhow::anyhow!("Cannot express {:?} as a file URL", absolute))?;
    Ok(Some(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_limited_within_limit() {
        let text = read_limited("#EXTM3U\n".as_bytes(), Some(8)).unwrap();
        assert_eq!(text, "#EXTM3U\n");
    }

    #[test]
    fn test_read_limited_over_limit() {
        let err = read_limited("#EXTM3U\n".as_bytes(), Some(4)).unwrap_err();
        assert!(err.to_string().contains("limit of 4 bytes"));
    }

    #[test]
    fn test_read_limited_rejects_invalid_utf8() {
        assert!(read_limited(&[0xff, 0xfe][..], None).is_err());
    }

    #[test]
    fn test_stdin_path() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("./-")));
        assert_eq!(file_context(Path::new("-")).unwrap(), None);
    }

    #[test]
    fn test_file_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.m3u8");
        std::fs::write(&path, "#EXTM3U\n").unwrap();

        let url = file_context(&path).unwrap().unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("/index.m3u8"));
    }
}
