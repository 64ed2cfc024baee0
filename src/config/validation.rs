//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (country map and default point at supported locales)
//! - Validate header names and values before they reach the hot path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::{HeaderName, HeaderValue};

use crate::config::schema::EdgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no supported locales configured")]
    NoLocales,

    #[error("locale code {0:?} must be non-empty ASCII letters, digits or '-'")]
    InvalidLocale(String),

    #[error("locale {0:?} is listed more than once")]
    DuplicateLocale(String),

    #[error("default locale {0:?} is not a supported locale")]
    UnknownDefaultLocale(String),

    #[error("country {country:?} maps to unsupported locale {locale:?}")]
    UnknownCountryLocale { country: String, locale: String },

    #[error("country code {0:?} must be two ASCII letters")]
    InvalidCountry(String),

    #[error("legacy path {0:?} must start with '/'")]
    InvalidLegacyPath(String),

    #[error("redirect target {0:?} must start with '/'")]
    InvalidRedirectTarget(String),

    #[error("removed prefix {0:?} must start with '/'")]
    InvalidRemovedPrefix(String),

    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),

    #[error("cookie name must not be empty")]
    EmptyCookieName,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let supported = &config.locales.supported;
    if supported.is_empty() {
        errors.push(ValidationError::NoLocales);
    }
    for (i, locale) in supported.iter().enumerate() {
        if !is_valid_locale(locale) {
            errors.push(ValidationError::InvalidLocale(locale.clone()));
        }
        if supported[..i].contains(locale) {
            errors.push(ValidationError::DuplicateLocale(locale.clone()));
        }
    }
    if !supported.contains(&config.locales.default) {
        errors.push(ValidationError::UnknownDefaultLocale(config.locales.default.clone()));
    }
    if config.locales.cookie_name.is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }

    for (country, locale) in &config.geo.country_locales {
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(ValidationError::InvalidCountry(country.clone()));
        }
        if !supported.contains(locale) {
            errors.push(ValidationError::UnknownCountryLocale {
                country: country.clone(),
                locale: locale.clone(),
            });
        }
    }
    for name in &config.geo.trusted_headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(name.clone()));
        }
    }

    for (from, to) in &config.legacy.redirects {
        if !from.starts_with('/') {
            errors.push(ValidationError::InvalidLegacyPath(from.clone()));
        }
        if !to.starts_with('/') {
            errors.push(ValidationError::InvalidRedirectTarget(to.clone()));
        }
    }
    for prefix in &config.legacy.removed_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidRemovedPrefix(prefix.clone()));
        }
    }

    if HeaderName::from_bytes(config.upstream.locale_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(config.upstream.locale_header.clone()));
    }
    for (name, value) in &config.security_headers.headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(name.clone()));
        }
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue(name.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty() && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&EdgeConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = EdgeConfig::default();
        config.locales.default = "de".into();
        config.geo.country_locales.insert("FR".into(), "fr".into());
        config.legacy.redirects.insert("old".into(), "new".into());
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::UnknownDefaultLocale("de".into())));
        assert!(errors.contains(&ValidationError::UnknownCountryLocale {
            country: "FR".into(),
            locale: "fr".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidLegacyPath("old".into())));
        assert!(errors.contains(&ValidationError::InvalidRedirectTarget("new".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_bad_headers_and_locales() {
        let mut config = EdgeConfig::default();
        config.locales.supported = vec!["hu".into(), "hu".into(), "e n".into()];
        config
            .security_headers
            .headers
            .insert("Bad Header".into(), "x".into());
        config
            .security_headers
            .headers
            .insert("X-Ok".into(), "line\nbreak".into());

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateLocale("hu".into())));
        assert!(errors.contains(&ValidationError::InvalidLocale("e n".into())));
        assert!(errors.contains(&ValidationError::InvalidHeaderName("Bad Header".into())));
        assert!(errors.contains(&ValidationError::InvalidHeaderValue("X-Ok".into())));
    }
}
