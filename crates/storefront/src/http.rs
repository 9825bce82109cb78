//! Shared plumbing for the REST clients.

use std::time::Duration;

use url::Url;

/// Characters of a response body kept in error messages.
pub(crate) const ERROR_BODY_PREVIEW: usize = 200;

/// Characters of a response body written to the log.
pub(crate) const LOG_BODY_PREVIEW: usize = 500;

/// Build the HTTP client used for an external service.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("bookverse/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Append path segments to a base URL, percent-encoding each one.
///
/// Returns `None` if `base` cannot have a path (e.g. `mailto:`).
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().ok()?;
        path.pop_if_empty();
        path.extend(segments);
    }
    url.set_query(None);
    Some(url)
}

/// First `max` characters of `s`.
pub(crate) fn preview(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_root_base() {
        let base = Url::parse("https://api.example").unwrap();
        let url = endpoint(&base, &["books"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example/books");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("http://localhost:8080/api/").unwrap();
        let url = endpoint(&base, &["payment", "create-payment-intent"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/payment/create-payment-intent"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = Url::parse("https://api.example/").unwrap();
        let url = endpoint(&base, &["books", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example/books/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_rejects_cannot_be_base() {
        let base = Url::parse("mailto:books@example.com").unwrap();
        assert!(endpoint(&base, &["books"]).is_none());
    }

    #[test]
    fn test_preview_counts_chars() {
        assert_eq!(preview("héllo world", 5), "héllo");
        assert_eq!(preview("ok", 200), "ok");
    }
}
