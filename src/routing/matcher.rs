//! Pipeline exclusion matching.
//!
//! # Responsibilities
//! - Recognize API routes and framework asset paths by first-segment prefix
//! - Recognize static files (any `.` in the path)
//!
//! # Design Decisions
//! - Prefix match on the first segment, so `/api` also excludes `/apiary`
//! - Case-sensitive, like the renderer's own routes
//! - No regex to guarantee O(n) matching

use crate::config::BypassConfig;

/// Decides which paths skip the pipeline entirely.
#[derive(Debug, Clone)]
pub struct BypassMatcher {
    prefixes: Vec<String>,
    skip_file_paths: bool,
}

impl BypassMatcher {
    pub fn new<I>(prefixes: I, skip_file_paths: bool) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.trim_start_matches('/').to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            skip_file_paths,
        }
    }

    pub fn from_config(config: &BypassConfig) -> Self {
        Self::new(config.prefixes.clone(), config.skip_file_paths)
    }

    /// Returns true if the path bypasses the pipeline.
    pub fn matches(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        self.prefixes.iter().any(|p| rest.starts_with(p.as_str()))
            || (self.skip_file_paths && rest.contains('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let matcher = BypassMatcher::from_config(&BypassConfig::default());

        assert!(matcher.matches("/api/contact"));
        assert!(matcher.matches("/apiary"));
        assert!(matcher.matches("/_next/static/chunks/main.js"));
        assert!(matcher.matches("/_vercel/insights/script"));
        assert!(matcher.matches("/favicon.ico"));
        assert!(matcher.matches("/hu/brochure.pdf"));
        assert!(matcher.matches("/xmlrpc.php"));

        assert!(!matcher.matches("/"));
        assert!(!matcher.matches("/hu/products"));
        assert!(!matcher.matches("/en/api-docs"));
        assert!(!matcher.matches("/wp-admin"));
    }

    #[test]
    fn test_file_paths_can_be_routed() {
        let matcher = BypassMatcher::new(vec!["/api".to_string()], false);
        assert!(matcher.matches("/api/x"));
        assert!(!matcher.matches("/xmlrpc.php"));
    }
}
