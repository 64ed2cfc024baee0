//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Any response leaving the pipeline:
//!     → redirect / gone / rendered page
//!     → headers.rs (HSTS, referrer, permissions, CSP)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Header set is part of the pipeline snapshot, so it reloads with config
//! - Applied last, after the response exists, so nothing downstream can drop it

pub mod headers;

pub use headers::SecurityHeaders;
