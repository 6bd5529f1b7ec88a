//! Hostname extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Extracts the hostname from the `Host` header.
///
/// Handles:
/// - IPv4 addresses (e.g., `192.168.1.1`)
/// - IPv6 addresses (e.g., `[::1]`)
/// - Hostnames with ports (e.g., `tr1p.local:3000`)
/// - Plain hostnames (e.g., `tr1p.io`)
///
/// Returns `None` when the header is missing or not valid UTF-8. A missing
/// host is not an error for this site; the caller falls back to the default
/// site.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "tr1p.local:8080".parse().unwrap());
///
/// assert_eq!(extract_host_from_headers(&headers).as_deref(), Some("tr1p.local"));
/// ```
pub fn extract_host_from_headers(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    Some(normalize_host(host))
}

/// Lowercases a raw host value and strips its port.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();

    let name = if host.starts_with('[') {
        // IPv6 address (e.g., [::1] or [::1]:8080)
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        // IPv4, hostname, or localhost - strip port if present
        host.split(':').next().unwrap_or(host)
    };

    name.trim_end_matches('.').to_ascii_lowercase()
}
