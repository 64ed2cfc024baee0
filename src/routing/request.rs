//! Read-only view of an inbound request.
//!
//! # Responsibilities
//! - Extract routing-relevant information (path, query, host)
//! - Expose headers with case-insensitive lookup
//! - Parse the `Cookie` header once per request
//!
//! # Design Decisions
//! - Borrows from the original request; nothing is copied except cookies
//! - Host comes from the `Host` header, falling back to the URI authority (HTTP/2)

use std::collections::HashMap;

use axum::http::{header, HeaderMap, Request, Uri};

/// Immutable view of an inbound request as seen by the pipeline stages.
#[derive(Debug, Clone)]
pub struct RouteRequest<'a> {
    uri: &'a Uri,
    headers: &'a HeaderMap,
    host: &'a str,
    cookies: HashMap<&'a str, &'a str>,
}

impl<'a> RouteRequest<'a> {
    /// Build a view over a URI and its headers.
    pub fn new(uri: &'a Uri, headers: &'a HeaderMap) -> Self {
        let host = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .unwrap_or("");

        Self {
            uri,
            headers,
            host,
            cookies: parse_cookies(headers),
        }
    }

    /// Build a view over a full request.
    pub fn from_request<B>(request: &'a Request<B>) -> Self {
        Self::new(request.uri(), request.headers())
    }

    /// Request path, always starting with `/`.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Raw query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Host as sent by the client, port included.
    pub fn host(&self) -> &str {
        self.host
    }

    /// First value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// User agent, empty when absent.
    pub fn user_agent(&self) -> &str {
        self.header(header::USER_AGENT.as_str()).unwrap_or("")
    }

    /// Cookie value by exact name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).copied()
    }

    /// Target for a redirect to `path`, carrying over the current query string.
    pub fn target_with_path(&self, path: &str) -> String {
        match self.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        }
    }
}

/// Parse every `Cookie` header. The first occurrence of a name wins.
fn parse_cookies(headers: &HeaderMap) -> HashMap<&str, &str> {
    let mut cookies = HashMap::new();
    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            if let Some((name, val)) = pair.trim().split_once('=') {
                let val = val.trim();
                let val = val
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(val);
                cookies.entry(name.trim()).or_insert(val);
            }
        }
    }
    cookies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> axum::http::request::Builder {
        Request::builder().uri(uri)
    }

    #[test]
    fn test_path_query_and_host() {
        let req = request("/hu/products?ref=mail")
            .header("Host", "xnetik.hu")
            .body(())
            .unwrap();
        let view = RouteRequest::from_request(&req);

        assert_eq!(view.path(), "/hu/products");
        assert_eq!(view.query(), Some("ref=mail"));
        assert_eq!(view.host(), "xnetik.hu");
        assert_eq!(view.target_with_path("/en"), "/en?ref=mail");
    }

    #[test]
    fn test_host_falls_back_to_authority() {
        let req = request("https://www.xnetik.hu:8443/").body(()).unwrap();
        let view = RouteRequest::from_request(&req);
        assert_eq!(view.host(), "www.xnetik.hu:8443");
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let req = request("/")
            .header("CF-IPCountry", "HU")
            .header("User-Agent", "Googlebot/2.1")
            .body(())
            .unwrap();
        let view = RouteRequest::from_request(&req);

        assert_eq!(view.header("cf-ipcountry"), Some("HU"));
        assert_eq!(view.user_agent(), "Googlebot/2.1");
    }

    #[test]
    fn test_cookie_parsing() {
        let req = request("/")
            .header("Cookie", "theme=dark; NEXT_LOCALE=en")
            .header("Cookie", "NEXT_LOCALE=hu; quoted=\"x y\"")
            .body(())
            .unwrap();
        let view = RouteRequest::from_request(&req);

        assert_eq!(view.cookie("NEXT_LOCALE"), Some("en"));
        assert_eq!(view.cookie("theme"), Some("dark"));
        assert_eq!(view.cookie("quoted"), Some("x y"));
        assert_eq!(view.cookie("next_locale"), None);
    }

    #[test]
    fn test_missing_signals() {
        let req = request("/").body(()).unwrap();
        let view = RouteRequest::from_request(&req);

        assert_eq!(view.host(), "");
        assert_eq!(view.user_agent(), "");
        assert_eq!(view.cookie("NEXT_LOCALE"), None);
        assert_eq!(view.target_with_path("/en"), "/en");
    }
}
