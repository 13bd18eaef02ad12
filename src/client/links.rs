//! Opening session links with the system handler.

use reqwest::Url;

const OPENABLE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Open `url` in the system handler. Failures are logged, never returned.
pub fn open_link(url: &str) -> bool {
    open_link_with(url, |target| open::that(target))
}

/// Like [`open_link`], with the opener injected.
pub fn open_link_with<F>(url: &str, opener: F) -> bool
where
    F: FnOnce(&str) -> std::io::Result<()>,
{
    let parsed = match Url::parse(url.trim()) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Unable to open link {:?}: {}", url, e);
            return false;
        }
    };
    if !OPENABLE_SCHEMES.contains(&parsed.scheme()) {
        tracing::warn!("Unable to open link {:?}: unsupported scheme", url);
        return false;
    }

    match opener(parsed.as_str()) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Unable to open link {}: {}", parsed, e);
            false
        }
    }
}

/// Target of a session stream link such as `"Room A - https://meet.test/a"`.
pub fn stream_link_target(stream_link: &str) -> Option<&str> {
    stream_link
        .split("- ")
        .nth(1)
        .map(str::trim)
        .filter(|target| !target.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_open_link_passes_normalized_url() {
        let opened = open_link_with("https://www.sfscon.it", |target| {
            assert_eq!(target, "https://www.sfscon.it/");
            Ok(())
        });
        assert!(opened);
    }

    #[test]
    fn test_open_link_rejects_unparseable_url() {
        let called = Cell::new(false);
        let opened = open_link_with("not a url", |_| {
            called.set(true);
            Ok(())
        });
        assert!(!opened);
        assert!(!called.get());
    }

    #[test]
    fn test_open_link_rejects_unsupported_scheme() {
        assert!(!open_link_with("file:///etc/passwd", |_| Ok(())));
    }

    #[test]
    fn test_open_link_swallows_opener_error() {
        let opened = open_link_with("https://x.test", |_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"))
        });
        assert!(!opened);
    }

    #[test]
    fn test_stream_link_target() {
        assert_eq!(
            stream_link_target("Room A - https://meet.test/a"),
            Some("https://meet.test/a")
        );
        assert_eq!(stream_link_target("https://meet.test/a"), None);
        assert_eq!(stream_link_target("Room A - "), None);
        assert_eq!(
            stream_link_target("A - https://x.test - extra"),
            Some("https://x.test")
        );
    }
}
