//! Upstream URL construction.

use crate::error::ProxyError;

/// Compose the upstream URL from configured origin/prefix, the resolved
/// relative path, and the literal inbound query string.
///
/// Trailing slashes on the origin and surrounding slashes on the prefix are
/// stripped before composition, so repeated slash variants of the same
/// configuration produce the same URL. The query string is appended exactly
/// as received, preserving parameter order and encoding.
pub fn build_target_url(
    origin: Option<&str>,
    prefix: &str,
    path: &str,
    query: Option<&str>,
) -> Result<String, ProxyError> {
    let origin = origin.ok_or(ProxyError::MissingOrigin)?;
    let origin = origin.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    let path = path.trim_start_matches('/');

    let mut url = String::with_capacity(
        origin.len() + prefix.len() + path.len() + query.map_or(0, str::len) + 3,
    );
    url.push_str(origin);
    if !prefix.is_empty() {
        url.push('/');
        url.push_str(prefix);
    }
    url.push('/');
    url.push_str(path);
    if let Some(query) = query {
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
    }

    Ok(url)
}

/// Extract a single query parameter value from the raw query string.
///
/// Read-only lookup; the forwarded query string itself is never rebuilt
/// from parsed parameters.
pub fn query_param(raw_query: Option<&str>, name: &str) -> Option<String> {
    let raw = raw_query?;
    url::form_urlencoded::parse(raw.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_origin_prefix_path_and_query() {
        let url = build_target_url(
            Some("http://example.com"),
            "/api",
            "questions/1",
            Some("x=1"),
        )
        .unwrap();
        assert_eq!(url, "http://example.com/api/questions/1?x=1");
    }

    #[test]
    fn idempotent_under_trailing_slash_variants() {
        let expected = "http://example.com/api/questions/1?x=1";
        for origin in ["http://example.com", "http://example.com/", "http://example.com//"] {
            for prefix in ["/api", "api", "/api/", "api/"] {
                let url =
                    build_target_url(Some(origin), prefix, "questions/1", Some("x=1")).unwrap();
                assert_eq!(url, expected, "origin={origin} prefix={prefix}");
            }
        }
    }

    #[test]
    fn empty_prefix_contributes_nothing() {
        let url = build_target_url(Some("http://example.com"), "", "questions", None).unwrap();
        assert_eq!(url, "http://example.com/questions");
    }

    #[test]
    fn missing_origin_is_an_error() {
        let err = build_target_url(None, "/api", "questions", None).unwrap_err();
        assert!(matches!(err, ProxyError::MissingOrigin));
    }

    #[test]
    fn query_passes_through_literally() {
        // Ordering and encoding must survive untouched.
        let url = build_target_url(
            Some("http://example.com"),
            "/api",
            "search",
            Some("b=2&a=%20one&a=two"),
        )
        .unwrap();
        assert_eq!(url, "http://example.com/api/search?b=2&a=%20one&a=two");
    }

    #[test]
    fn empty_query_is_dropped() {
        let url = build_target_url(Some("http://example.com"), "/api", "questions", Some(""))
            .unwrap();
        assert_eq!(url, "http://example.com/api/questions");
    }

    #[test]
    fn leading_slash_on_path_is_tolerated() {
        let url =
            build_target_url(Some("http://example.com"), "/api", "/questions", None).unwrap();
        assert_eq!(url, "http://example.com/api/questions");
    }

    #[test]
    fn query_param_lookup() {
        assert_eq!(
            query_param(Some("path=questions%2F1&mock=1"), "path").as_deref(),
            Some("questions/1")
        );
        assert_eq!(query_param(Some("a=1"), "mock"), None);
        assert_eq!(query_param(None, "mock"), None);
    }
}
