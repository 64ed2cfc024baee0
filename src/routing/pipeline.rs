//! Ordered decision pipeline.
//!
//! # Responsibilities
//! - Compile configuration into immutable stage objects
//! - Run stages in fixed priority order, first result wins
//! - Carry the response header policy and renderer hand-off settings
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Pure: no I/O, same input always yields the same outcome
//! - Total: the locale stage always produces an outcome

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::http::{HeaderName, HeaderValue, Request};

use crate::config::validation::validate_config;
use crate::config::{ConfigError, EdgeConfig, ValidationError};
use crate::routing::host::HostCanonicalizer;
use crate::routing::legacy::LegacyRewriter;
use crate::routing::locale::{LocaleResolver, ResolvedLocale};
use crate::routing::matcher::BypassMatcher;
use crate::routing::outcome::Outcome;
use crate::routing::request::RouteRequest;
use crate::security::SecurityHeaders;

/// Pipeline snapshot shared by all requests; swapped whole on reload.
pub type SharedPipeline = Arc<ArcSwap<EdgePipeline>>;

/// The compiled edge routing pipeline.
#[derive(Debug, Clone)]
pub struct EdgePipeline {
    bypass: BypassMatcher,
    legacy: LegacyRewriter,
    host: HostCanonicalizer,
    locale: LocaleResolver,
    security_headers: SecurityHeaders,
    locale_header: HeaderName,
}

impl EdgePipeline {
    pub fn new(
        bypass: BypassMatcher,
        legacy: LegacyRewriter,
        host: HostCanonicalizer,
        locale: LocaleResolver,
        security_headers: SecurityHeaders,
        locale_header: HeaderName,
    ) -> Self {
        Self {
            bypass,
            legacy,
            host,
            locale,
            security_headers,
            locale_header,
        }
    }

    /// Validate and compile a configuration.
    pub fn from_config(config: &EdgeConfig) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let security_headers = SecurityHeaders::from_config(&config.security_headers)
            .map_err(ConfigError::Validation)?;
        let locale_header = HeaderName::from_bytes(config.upstream.locale_header.as_bytes())
            .map_err(|_| {
                ConfigError::Validation(vec![ValidationError::InvalidHeaderName(
                    config.upstream.locale_header.clone(),
                )])
            })?;

        Ok(Self::new(
            BypassMatcher::from_config(&config.bypass),
            LegacyRewriter::from_config(&config.legacy),
            HostCanonicalizer::from_config(&config.canonical),
            LocaleResolver::from_config(config),
            security_headers,
            locale_header,
        ))
    }

    /// Wrap in a swappable shared handle.
    pub fn shared(self) -> SharedPipeline {
        Arc::new(ArcSwap::from_pointee(self))
    }

    /// Returns true if the path skips the pipeline entirely.
    pub fn is_bypassed(&self, path: &str) -> bool {
        self.bypass.matches(path)
    }

    /// Run the stages in order: legacy URLs, canonical host, locale.
    pub fn decide(&self, request: &RouteRequest<'_>) -> Outcome {
        self.legacy
            .evaluate(request)
            .or_else(|| self.host.evaluate(request))
            .unwrap_or_else(|| self.locale.evaluate(request))
    }

    pub fn security_headers(&self) -> &SecurityHeaders {
        &self.security_headers
    }

    /// Record the resolved locale on a request about to be rendered.
    pub fn attach_locale<B>(&self, request: &mut Request<B>, locale: &str) {
        if let Ok(value) = HeaderValue::from_str(locale) {
            request.headers_mut().insert(self.locale_header.clone(), value);
        }
        request
            .extensions_mut()
            .insert(ResolvedLocale(locale.to_string()));
    }
}
