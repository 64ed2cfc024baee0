//! Locale negotiation.
//!
//! # Responsibilities
//! - Detect an explicit locale prefix in the path
//! - Honor a manually selected locale cookie
//! - Keep crawlers on canonical, non-redirected content
//! - Infer a locale for the site root from the CDN country header
//!
//! # Design Decisions
//! - Only the bare root (`/`) is ever geo-redirected
//! - Geo redirects are 302: the inference may be wrong or change
//! - The default locale is never used as a path prefix
//! - Every other request renders; the renderer owns 404s for unknown segments

use std::collections::HashMap;

use axum::http::HeaderName;

use crate::config::EdgeConfig;
use crate::routing::outcome::Outcome;
use crate::routing::request::RouteRequest;

/// Locale chosen for a rendered request, attached as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

/// Ordered set of supported locales with a distinguished default.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    supported: Vec<String>,
    default: String,
}

impl LocaleSet {
    /// `default` is expected to be one of `supported`; configuration
    /// validation guarantees it.
    pub fn new(supported: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            supported,
            default: default.into(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.supported.iter().any(|l| l == locale)
    }

    /// Locale named by the first path segment, if it is a supported one.
    pub fn prefix_of(&self, path: &str) -> Option<&str> {
        let rest = path.strip_prefix('/')?;
        let segment = rest.split('/').next().unwrap_or("");
        self.supported
            .iter()
            .find(|l| l.as_str() == segment)
            .map(String::as_str)
    }
}

/// Country code to locale.
#[derive(Debug, Clone, Default)]
pub struct CountryLocales {
    map: HashMap<String, String>,
}

impl CountryLocales {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            map: entries
                .into_iter()
                .map(|(country, locale)| (country.to_ascii_uppercase(), locale))
                .collect(),
        }
    }

    pub fn lookup(&self, country: &str) -> Option<&str> {
        self.map
            .get(&country.trim().to_ascii_uppercase())
            .map(String::as_str)
    }
}

/// Lower-case user-agent substrings identifying crawlers.
#[derive(Debug, Clone, Default)]
pub struct CrawlerSignatures {
    signatures: Vec<String>,
}

impl CrawlerSignatures {
    pub fn new<I>(signatures: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            signatures: signatures
                .into_iter()
                .map(|s| s.to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn is_crawler(&self, user_agent: &str) -> bool {
        let ua = user_agent.to_lowercase();
        self.signatures.iter().any(|s| ua.contains(s.as_str()))
    }
}

/// Decides between a geo redirect and rendering.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    locales: LocaleSet,
    countries: CountryLocales,
    crawlers: CrawlerSignatures,
    cookie_name: String,
    geo_headers: Vec<HeaderName>,
}

impl LocaleResolver {
    pub fn new(
        locales: LocaleSet,
        countries: CountryLocales,
        crawlers: CrawlerSignatures,
        cookie_name: impl Into<String>,
        geo_headers: Vec<HeaderName>,
    ) -> Self {
        Self {
            locales,
            countries,
            crawlers,
            cookie_name: cookie_name.into(),
            geo_headers,
        }
    }

    /// Header names are checked by config validation; invalid ones are skipped here.
    pub fn from_config(config: &EdgeConfig) -> Self {
        let geo_headers = config
            .geo
            .trusted_headers
            .iter()
            .filter_map(|name| HeaderName::from_bytes(name.as_bytes()).ok())
            .collect();

        Self::new(
            LocaleSet::new(config.locales.supported.clone(), config.locales.default.clone()),
            CountryLocales::new(config.geo.country_locales.clone()),
            CrawlerSignatures::new(config.crawlers.signatures.clone()),
            config.locales.cookie_name.clone(),
            geo_headers,
        )
    }

    /// Always produces an outcome: a geo redirect or a render.
    pub fn evaluate(&self, request: &RouteRequest<'_>) -> Outcome {
        let path = request.path();
        let has_locale_prefix = self.locales.prefix_of(path).is_some();
        let cookie = self.preference_cookie(request);

        if path == "/" && !has_locale_prefix && cookie.is_none() {
            if self.crawlers.is_crawler(request.user_agent()) {
                tracing::trace!(user_agent = request.user_agent(), "Crawler, skipping geo redirect");
                return self.render(self.locales.default_locale());
            }

            let detected = self.country_locale(request);
            if detected != self.locales.default_locale() {
                return Outcome::TemporaryRedirect {
                    location: request.target_with_path(&format!("/{detected}")),
                };
            }
        }

        self.render(&self.render_locale(request))
    }

    /// Locale the renderer should use: path prefix, then cookie, then default.
    pub fn render_locale(&self, request: &RouteRequest<'_>) -> String {
        self.locales
            .prefix_of(request.path())
            .or_else(|| {
                self.preference_cookie(request)
                    .filter(|locale| self.locales.contains(locale))
            })
            .unwrap_or(self.locales.default_locale())
            .to_string()
    }

    fn preference_cookie<'r>(&self, request: &'r RouteRequest<'_>) -> Option<&'r str> {
        request.cookie(&self.cookie_name).filter(|v| !v.is_empty())
    }

    /// First non-empty trusted geo header, mapped to a supported locale.
    fn country_locale(&self, request: &RouteRequest<'_>) -> &str {
        self.geo_headers
            .iter()
            .find_map(|name| request.header(name.as_str()).filter(|v| !v.is_empty()))
            .and_then(|country| self.countries.lookup(country))
            .filter(|locale| self.locales.contains(locale))
            .unwrap_or(self.locales.default_locale())
    }

    fn render(&self, locale: &str) -> Outcome {
        Outcome::Render {
            locale: locale.to_string(),
        }
    }
}
