//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server and pipeline produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The decision pipeline itself never logs above trace; the server logs outcomes
//! - Request ID flows through spans and the upstream request

pub mod logging;
pub mod metrics;
