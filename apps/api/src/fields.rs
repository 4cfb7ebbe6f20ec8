//! Normalisation shared by request validators and query filters.

use url::Url;

/// Trims an optional query or body field, treating blank as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Absolute `http`/`https` URL with a host. Whitespace is rejected up front
/// since the parser would otherwise percent-encode it.
pub fn is_http_url(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(raw) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}
