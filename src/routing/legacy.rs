//! Legacy URL migration.
//!
//! # Responsibilities
//! - Permanently redirect old content pages to their new locations
//! - Answer removed areas of the old site with 410 Gone
//!
//! # Design Decisions
//! - Keys and prefixes are lower-cased once at construction
//! - Exact redirects are checked before removed prefixes
//! - Prefix matching, not equality, for removed areas

use std::collections::HashMap;

use crate::config::LegacyConfig;
use crate::routing::outcome::Outcome;
use crate::routing::request::RouteRequest;

/// Maps legacy paths to redirects or removals.
#[derive(Debug, Clone, Default)]
pub struct LegacyRewriter {
    redirects: HashMap<String, String>,
    removed_prefixes: Vec<String>,
    remove_wp_scripts: bool,
}

impl LegacyRewriter {
    /// Create a rewriter from redirect pairs and removed prefixes.
    pub fn new<R, P>(redirects: R, removed_prefixes: P, remove_wp_scripts: bool) -> Self
    where
        R: IntoIterator<Item = (String, String)>,
        P: IntoIterator<Item = String>,
    {
        Self {
            redirects: redirects
                .into_iter()
                .map(|(from, to)| (from.to_lowercase(), to))
                .collect(),
            removed_prefixes: removed_prefixes
                .into_iter()
                .map(|prefix| prefix.to_lowercase())
                .collect(),
            remove_wp_scripts,
        }
    }

    pub fn from_config(config: &LegacyConfig) -> Self {
        Self::new(
            config.redirects.clone(),
            config.removed_prefixes.clone(),
            config.remove_wp_scripts,
        )
    }

    /// Redirect, removal, or `None` to continue.
    pub fn evaluate(&self, request: &RouteRequest<'_>) -> Option<Outcome> {
        let path = request.path().to_lowercase();

        if let Some(target) = self.redirects.get(&path) {
            return Some(Outcome::PermanentRedirect {
                location: request.target_with_path(target),
            });
        }

        if self.is_removed(&path) {
            return Some(Outcome::Gone);
        }

        None
    }

    fn is_removed(&self, lower_path: &str) -> bool {
        self.removed_prefixes
            .iter()
            .any(|prefix| lower_path.starts_with(prefix.as_str()))
            || (self.remove_wp_scripts && is_wp_script(lower_path))
    }
}

/// `/wp-<anything>.php` at the end of the path.
fn is_wp_script(lower_path: &str) -> bool {
    lower_path
        .strip_suffix(".php")
        .is_some_and(|stem| stem.contains("/wp-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn evaluate(rewriter: &LegacyRewriter, uri: &str) -> Option<Outcome> {
        let req = Request::builder().uri(uri).body(()).unwrap();
        rewriter.evaluate(&RouteRequest::from_request(&req))
    }

    fn default_rewriter() -> LegacyRewriter {
        LegacyRewriter::from_config(&LegacyConfig::default())
    }

    fn redirect(location: &str) -> Option<Outcome> {
        Some(Outcome::PermanentRedirect {
            location: location.to_string(),
        })
    }

    #[test]
    fn test_every_table_entry_redirects() {
        let config = LegacyConfig::default();
        let rewriter = LegacyRewriter::from_config(&config);
        for (from, to) in &config.redirects {
            assert_eq!(evaluate(&rewriter, from), redirect(to), "{from}");
            assert_eq!(evaluate(&rewriter, &from.to_uppercase()), redirect(to), "{from}");
        }
    }

    #[test]
    fn test_uppercase_path_matches_lowercase_entry() {
        let rewriter = default_rewriter();
        assert_eq!(evaluate(&rewriter, "/XAG-P100"), redirect("/hu/products/p100-pro"));
        assert_eq!(evaluate(&rewriter, "/Kapcsolat/"), redirect("/hu/contact-us"));
    }

    #[test]
    fn test_query_is_preserved() {
        let rewriter = default_rewriter();
        assert_eq!(
            evaluate(&rewriter, "/termekek?utm_source=old"),
            redirect("/hu/products?utm_source=old")
        );
    }

    #[test]
    fn test_mixed_case_table_keys_are_normalized() {
        let rewriter = LegacyRewriter::new(
            [("/Old-Page".to_string(), "/hu/New-Page".to_string())],
            Vec::new(),
            false,
        );
        assert_eq!(evaluate(&rewriter, "/old-page"), redirect("/hu/New-Page"));
    }

    #[test]
    fn test_removed_prefixes_are_gone() {
        let rewriter = default_rewriter();
        assert_eq!(evaluate(&rewriter, "/wp-admin"), Some(Outcome::Gone));
        assert_eq!(evaluate(&rewriter, "/wp-admin/options.php"), Some(Outcome::Gone));
        assert_eq!(evaluate(&rewriter, "/WP-Content/uploads/a.jpg"), Some(Outcome::Gone));
        assert_eq!(evaluate(&rewriter, "/xmlrpc.php"), Some(Outcome::Gone));
        assert_eq!(evaluate(&rewriter, "/wp-json/wp/v2/users"), Some(Outcome::Gone));
    }

    #[test]
    fn test_wp_script_pattern() {
        let rewriter = default_rewriter();
        assert_eq!(evaluate(&rewriter, "/blog/wp-trackback.php"), Some(Outcome::Gone));
        assert_eq!(evaluate(&rewriter, "/old/WP-Signup.PHP"), Some(Outcome::Gone));
        assert_eq!(evaluate(&rewriter, "/wp-.php"), Some(Outcome::Gone));
        assert_eq!(evaluate(&rewriter, "/blog/wp-trackback.php5"), None);
        assert_eq!(evaluate(&rewriter, "/wordpress.php"), None);
    }

    #[test]
    fn test_wp_script_pattern_can_be_disabled() {
        let rewriter = LegacyRewriter::new(Vec::new(), Vec::new(), false);
        assert_eq!(evaluate(&rewriter, "/blog/wp-trackback.php"), None);
    }

    #[test]
    fn test_redirect_wins_over_removal() {
        let rewriter = LegacyRewriter::new(
            [("/wp-admin".to_string(), "/hu".to_string())],
            ["/wp-admin".to_string()],
            true,
        );
        assert_eq!(evaluate(&rewriter, "/wp-admin"), redirect("/hu"));
        assert_eq!(evaluate(&rewriter, "/wp-admin/"), Some(Outcome::Gone));
    }

    #[test]
    fn test_unrelated_paths_pass() {
        let rewriter = default_rewriter();
        assert_eq!(evaluate(&rewriter, "/"), None);
        assert_eq!(evaluate(&rewriter, "/hu/products"), None);
        assert_eq!(evaluate(&rewriter, "/xag-p100/extra"), None);
        assert_eq!(evaluate(&rewriter, "/en/wp-guide"), None);
    }
}
