//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, host, headers, cookies)
//!     → matcher.rs (excluded paths skip everything)
//!     → request.rs (read-only view)
//!     → pipeline.rs runs, first result wins:
//!         legacy.rs  (301 old pages, 410 removed areas)
//!         host.rs    (301 www → bare host)
//!         locale.rs  (302 geo redirect, or render at a locale)
//!     → Return: Outcome
//!
//! Pipeline Compilation (at startup and on reload):
//!     EdgeConfig
//!     → Normalize tables (lower-case keys, parsed headers)
//!     → Freeze as immutable EdgePipeline
//! ```
//!
//! # Design Decisions
//! - Stages compiled at startup, immutable at runtime
//! - No regex in hot path (prefix and substring matching only)
//! - Deterministic: same input always yields the same outcome
//! - First match wins (fixed stage order)

pub mod host;
pub mod legacy;
pub mod locale;
pub mod matcher;
pub mod outcome;
pub mod pipeline;
pub mod request;

pub use locale::ResolvedLocale;
pub use outcome::Outcome;
pub use pipeline::{EdgePipeline, SharedPipeline};
pub use request::RouteRequest;
