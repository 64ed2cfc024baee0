//! Result of running a request through the pipeline.

use serde::Serialize;

/// What the edge does with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// 301 to a canonical location.
    PermanentRedirect { location: String },
    /// 302 to a location inferred from request geography.
    TemporaryRedirect { location: String },
    /// 410 for a permanently removed resource.
    Gone,
    /// Hand the request to the renderer at the given locale.
    Render { locale: String },
}

impl Outcome {
    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::PermanentRedirect { .. } => "permanent_redirect",
            Outcome::TemporaryRedirect { .. } => "temporary_redirect",
            Outcome::Gone => "gone",
            Outcome::Render { .. } => "render",
        }
    }
}
