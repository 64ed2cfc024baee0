//! Security response headers.
//!
//! # Responsibilities
//! - Hold the fixed header set compiled from configuration
//! - Set every header on a response, replacing existing values
//!
//! # Design Decisions
//! - Names and values are parsed once at startup, never per request
//! - No per-request variation; the same set applies to every status code

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::{SecurityHeadersConfig, ValidationError};

/// Response header directing indexers to drop a removed page.
pub const X_ROBOTS_TAG: &str = "x-robots-tag";

/// Fixed set of headers applied to every pipeline response.
#[derive(Debug, Clone, Default)]
pub struct SecurityHeaders {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl SecurityHeaders {
    pub fn new(entries: Vec<(HeaderName, HeaderValue)>) -> Self {
        Self { entries }
    }

    /// Parse configured headers, reporting every invalid name or value.
    pub fn from_config(config: &SecurityHeadersConfig) -> Result<Self, Vec<ValidationError>> {
        let mut entries = Vec::with_capacity(config.headers.len());
        let mut errors = Vec::new();

        for (name, value) in &config.headers {
            let parsed_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ValidationError::InvalidHeaderName(name.clone()));
            let parsed_value = HeaderValue::from_str(value)
                .map_err(|_| ValidationError::InvalidHeaderValue(name.clone()));

            match (parsed_name, parsed_value) {
                (Ok(n), Ok(v)) => entries.push((n, v)),
                (n, v) => errors.extend(n.err().into_iter().chain(v.err())),
            }
        }

        if errors.is_empty() {
            Ok(Self { entries })
        } else {
            Err(errors)
        }
    }

    /// Set every header, overwriting any value already present.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.entries {
            headers.insert(name.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
