//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge router.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults matching the reference deployment so an empty
//! file is a valid configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Rendering application that receives pass-through requests.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Supported locales and the locale preference cookie.
    pub locales: LocaleConfig,

    /// Geolocation headers and country mapping.
    pub geo: GeoConfig,

    /// Legacy URL redirects and removed areas.
    pub legacy: LegacyConfig,

    /// User-agent substrings identifying crawlers.
    pub crawlers: CrawlerConfig,

    /// Canonical host handling.
    pub canonical: CanonicalConfig,

    /// Paths that skip the pipeline entirely.
    pub bypass: BypassConfig,

    /// Headers set on every response produced through the pipeline.
    pub security_headers: SecurityHeadersConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream rendering application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Address of the rendering application (e.g., "127.0.0.1:3003").
    pub address: String,

    /// Request header carrying the resolved locale to the renderer.
    pub locale_header: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3003".to_string(),
            locale_header: "x-edge-locale".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Supported locales.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Ordered locale codes served by the site.
    pub supported: Vec<String>,

    /// Locale served without a path prefix.
    pub default: String,

    /// Cookie holding a manually selected locale.
    pub cookie_name: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["hu".to_string(), "en".to_string()],
            default: "hu".to_string(),
            cookie_name: "NEXT_LOCALE".to_string(),
        }
    }
}

/// Geolocation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Headers set by the CDN carrying the client country, in priority order.
    ///
    /// Only list headers that the fronting proxy overwrites; anything a client
    /// can set directly lets it choose its own redirect.
    pub trusted_headers: Vec<String>,

    /// Two-letter country code to locale.
    pub country_locales: BTreeMap<String, String>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            trusted_headers: vec!["cf-ipcountry".to_string(), "x-vercel-ip-country".to_string()],
            country_locales: BTreeMap::from([("HU".to_string(), "hu".to_string())]),
        }
    }
}

/// Legacy site migration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LegacyConfig {
    /// Exact legacy path to canonical path (permanent redirect).
    pub redirects: BTreeMap<String, String>,

    /// Path prefixes answered with 410 Gone.
    pub removed_prefixes: Vec<String>,

    /// Answer any `/wp-*.php` script path with 410 Gone.
    pub remove_wp_scripts: bool,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        let redirects = [
            ("/xag-p100", "/hu/products/p100-pro"),
            ("/xag-p150", "/hu/products/p150-max"),
            ("/termekek", "/hu/products"),
            ("/kapcsolat", "/hu/contact-us"),
            ("/rolunk", "/hu/about-us"),
        ]
        .into_iter()
        .flat_map(|(from, to)| {
            [
                (from.to_string(), to.to_string()),
                (format!("{from}/"), to.to_string()),
            ]
        })
        .collect();

        let removed_prefixes = [
            "/wp-admin",
            "/wp-content",
            "/wp-includes",
            "/wp-login",
            "/wp-json",
            "/xmlrpc.php",
            "/wp-cron.php",
            "/wp-config.php",
            "/wp-settings.php",
            "/wp-load.php",
            "/wp-blog-header.php",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            redirects,
            removed_prefixes,
            remove_wp_scripts: true,
        }
    }
}

/// Crawler detection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// User-agent substrings (matched case-insensitively).
    pub signatures: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        let signatures = [
            "googlebot",
            "bingbot",
            "yandex",
            "duckduckbot",
            "slurp",
            "baiduspider",
            "facebookexternalhit",
            "twitterbot",
            "linkedinbot",
            "embedly",
            "quora link preview",
            "showyoubot",
            "outbrain",
            "pinterest",
            "applebot",
            "semrushbot",
            "ahrefsbot",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        Self { signatures }
    }
}

/// Canonical host handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CanonicalConfig {
    /// Redirect `www.` hosts to the bare host.
    pub strip_www: bool,

    /// Scheme used in absolute redirect locations.
    pub public_scheme: String,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            strip_www: true,
            public_scheme: "https".to_string(),
        }
    }
}

/// Pipeline exclusions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BypassConfig {
    /// First-segment prefixes (without the leading slash) that skip the pipeline.
    pub prefixes: Vec<String>,

    /// Skip any path containing a `.` (static files).
    pub skip_file_paths: bool,
}

impl Default for BypassConfig {
    fn default() -> Self {
        Self {
            prefixes: vec!["api".to_string(), "_next".to_string(), "_vercel".to_string()],
            skip_file_paths: true,
        }
    }
}

/// Response security headers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityHeadersConfig {
    /// Header name to value.
    pub headers: BTreeMap<String, String>,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        let headers = [
            (
                "Strict-Transport-Security",
                "max-age=31536000; includeSubDomains; preload",
            ),
            ("Referrer-Policy", "strict-origin-when-cross-origin"),
            (
                "Permissions-Policy",
                "camera=(), microphone=(), geolocation=(self), interest-cohort=()",
            ),
            (
                "Content-Security-Policy",
                "default-src 'self'; \
                 script-src 'self' 'unsafe-inline' 'unsafe-eval' https://www.googletagmanager.com https://www.google-analytics.com https://cdn.jsdelivr.net; \
                 style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
                 font-src 'self' https://fonts.gstatic.com data:; \
                 img-src 'self' data: https: blob:; \
                 connect-src 'self' https://www.google-analytics.com https://region1.google-analytics.com https://api.resend.com; \
                 frame-ancestors 'none'; base-uri 'self'; form-action 'self';",
            ),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
        Self { headers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: EdgeConfig = toml::from_str("").unwrap();
        assert_eq!(config.locales.default, "hu");
        assert_eq!(config.locales.supported, vec!["hu", "en"]);
        assert_eq!(config.legacy.redirects.len(), 10);
        assert_eq!(config.legacy.redirects["/rolunk/"], "/hu/about-us");
        assert_eq!(config.geo.trusted_headers[0], "cf-ipcountry");
        assert_eq!(config.security_headers.headers.len(), 4);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: EdgeConfig = toml::from_str(
            r#"
            [geo.country_locales]
            GB = "en"
            US = "en"

            [locales]
            cookie_name = "LANG"
            "#,
        )
        .unwrap();

        assert_eq!(config.geo.country_locales.len(), 2);
        assert_eq!(config.geo.trusted_headers.len(), 2);
        assert_eq!(config.locales.cookie_name, "LANG");
        assert_eq!(config.locales.default, "hu");
    }

    #[test]
    fn test_csp_is_single_line() {
        let config = SecurityHeadersConfig::default();
        let csp = &config.headers["Content-Security-Policy"];
        assert!(!csp.contains('\n'));
        assert!(csp.starts_with("default-src 'self'; script-src"));
        assert!(csp.ends_with("form-action 'self';"));
    }
}
