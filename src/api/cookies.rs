//! Cookie transport
//!
//! The core produces and consumes plain cookie value strings; this module
//! owns the HTTP edge: reading values out of `Cookie` request headers and
//! building `Set-Cookie` response headers. The tracking client sets neither
//! `Secure` nor `HttpOnly`, so neither flag is written here.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};

/// Read the value of `name` from the request's `Cookie` headers.
pub fn request_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(text) = header_value.to_str() else {
            continue;
        };

        for pair in text.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

/// Build a `Set-Cookie` header value scoped to `"." + domain`.
pub fn set_cookie(name: &str, value: &str, domain: &str, path: &str, expires_at: u64) -> String {
    let expires = DateTime::<Utc>::from_timestamp(expires_at as i64, 0)
        .map(|t| t.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        .unwrap_or_default();

    format!("{name}={value}; Domain=.{domain}; Path={path}; Expires={expires}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_a_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("__utmx=1.a$0:1; other=x; __utmxx=1.a$0:1:8035200"),
        );

        assert_eq!(request_cookie(&headers, "__utmx").as_deref(), Some("1.a$0:1"));
        assert_eq!(
            request_cookie(&headers, "__utmxx").as_deref(),
            Some("1.a$0:1:8035200")
        );
        assert_eq!(request_cookie(&headers, "missing"), None);
    }

    #[test]
    fn scans_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("__utmx=42.x$0:2"));

        assert_eq!(request_cookie(&headers, "__utmx").as_deref(), Some("42.x$0:2"));
    }

    #[test]
    fn cookie_value_dollars_and_colons_survive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("__utmx=159991919.ft-6uz$0:2"),
        );

        assert_eq!(
            request_cookie(&headers, "__utmx").as_deref(),
            Some("159991919.ft-6uz$0:2")
        );
    }

    #[test]
    fn set_cookie_writes_dot_prefixed_domain_and_no_flags() {
        let value = set_cookie("__utmx", "1.a$0:1", "example.com", "/", 0);

        assert_eq!(
            value,
            "__utmx=1.a$0:1; Domain=.example.com; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
        );
        assert!(!value.contains("Secure"));
        assert!(!value.contains("HttpOnly"));
    }
}
