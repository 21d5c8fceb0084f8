//! Resolution of URL lines against the playlist's context URL.

use url::Url;

use crate::error::{Error, Result};

/// Resolve a URL reference against an optional base.
///
/// Without a base the reference must already be absolute, otherwise this
/// fails with [`Error::MissingContext`]. With a base, relative references
/// (path-relative, scheme-relative, query or fragment only) resolve the usual
/// way.
pub fn resolve_url(context: Option<&Url>, reference: &str) -> Result<Url> {
    let reference = reference.trim();

    match context {
        Some(base) => base
            .join(reference)
            .map_err(|source| Error::invalid_url(reference, source)),
        None => Url::parse(reference).map_err(|source| match source {
            url::ParseError::RelativeUrlWithoutBase => Error::MissingContext(reference.to_string()),
            other => Error::invalid_url(reference, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://host/path/playlist.m3u8").unwrap()
    }

    #[test]
    fn test_resolve_path_relative() {
        let url = resolve_url(Some(&base()), "segment1.ts").unwrap();
        assert_eq!(url.as_str(), "http://host/path/segment1.ts");

        let url = resolve_url(Some(&base()), "../other/seg.ts").unwrap();
        assert_eq!(url.as_str(), "http://host/other/seg.ts");

        let url = resolve_url(Some(&base()), "/root.ts").unwrap();
        assert_eq!(url.as_str(), "http://host/root.ts");
    }

    #[test]
    fn test_resolve_scheme_relative_and_fragment() {
        let url = resolve_url(Some(&base()), "//cdn.example.com/a.ts").unwrap();
        assert_eq!(url.as_str(), "http://cdn.example.com/a.ts");

        let url = resolve_url(Some(&base()), "#frag").unwrap();
        assert_eq!(url.as_str(), "http://host/path/playlist.m3u8#frag");
    }

    #[test]
    fn test_resolve_absolute_ignores_context() {
        let url = resolve_url(Some(&base()), "https://other/seg.ts").unwrap();
        assert_eq!(url.as_str(), "https://other/seg.ts");

        let url = resolve_url(None, "https://other/seg.ts").unwrap();
        assert_eq!(url.as_str(), "https://other/seg.ts");
    }

    #[test]
    fn test_resolve_without_context() {
        assert_eq!(
            resolve_url(None, "segment1.ts"),
            Err(Error::MissingContext("segment1.ts".to_string()))
        );
    }

    #[test]
    fn test_resolve_invalid() {
        let err = resolve_url(None, "http://[::1").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));

        let err = resolve_url(Some(&base()), "http://exa mple.com/").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}
