//! Canonical host enforcement.

use crate::config::CanonicalConfig;
use crate::routing::outcome::Outcome;
use crate::routing::request::RouteRequest;

const WWW_PREFIX: &str = "www.";

/// Redirects `www.` hosts to the bare host.
#[derive(Debug, Clone)]
pub struct HostCanonicalizer {
    strip_www: bool,
    scheme: String,
}

impl HostCanonicalizer {
    pub fn new(strip_www: bool, scheme: impl Into<String>) -> Self {
        Self {
            strip_www,
            scheme: scheme.into(),
        }
    }

    pub fn from_config(config: &CanonicalConfig) -> Self {
        Self::new(config.strip_www, config.public_scheme.clone())
    }

    /// 301 to the bare host, keeping path, query and port.
    pub fn evaluate(&self, request: &RouteRequest<'_>) -> Option<Outcome> {
        if !self.strip_www {
            return None;
        }

        let host = request.host();
        let bare = host
            .get(..WWW_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(WWW_PREFIX))
            .map(|_| &host[WWW_PREFIX.len()..])
            .filter(|bare| !bare.is_empty())?;

        Some(Outcome::PermanentRedirect {
            location: format!(
                "{}://{}{}",
                self.scheme,
                bare,
                request.target_with_path(request.path())
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn evaluate(canonicalizer: &HostCanonicalizer, host: &str, uri: &str) -> Option<Outcome> {
        let req = Request::builder()
            .uri(uri)
            .header("Host", host)
            .body(())
            .unwrap();
        canonicalizer.evaluate(&RouteRequest::from_request(&req))
    }

    fn redirect(location: &str) -> Option<Outcome> {
        Some(Outcome::PermanentRedirect {
            location: location.to_string(),
        })
    }

    #[test]
    fn test_strips_www() {
        let c = HostCanonicalizer::new(true, "https");
        assert_eq!(evaluate(&c, "www.xnetik.hu", "/"), redirect("https://xnetik.hu/"));
        assert_eq!(
            evaluate(&c, "www.xnetik.hu", "/en/contact-us?x=1"),
            redirect("https://xnetik.hu/en/contact-us?x=1")
        );
    }

    #[test]
    fn test_keeps_port_and_ignores_case() {
        let c = HostCanonicalizer::new(true, "http");
        assert_eq!(
            evaluate(&c, "WWW.xnetik.hu:8080", "/hu"),
            redirect("http://xnetik.hu:8080/hu")
        );
    }

    #[test]
    fn test_bare_host_passes() {
        let c = HostCanonicalizer::new(true, "https");
        assert_eq!(evaluate(&c, "xnetik.hu", "/"), None);
        assert_eq!(evaluate(&c, "shop.www.xnetik.hu", "/"), None);
        assert_eq!(evaluate(&c, "www.", "/"), None);
        assert_eq!(evaluate(&c, "ww", "/"), None);
    }

    #[test]
    fn test_disabled() {
        let c = HostCanonicalizer::new(false, "https");
        assert_eq!(evaluate(&c, "www.xnetik.hu", "/"), None);
    }
}
