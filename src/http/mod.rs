//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → edge middleware (routing pipeline decides)
//!         → response.rs (301 / 302 / 410 built here)
//!         → render.rs (everything else forwarded to the renderer)
//!     → security headers applied
//!     → Send to client
//! ```

pub mod render;
pub mod request;
pub mod response;
pub mod server;

pub use render::Renderer;
pub use request::{MakeEdgeRequestId, X_REQUEST_ID};
pub use server::{apply_config, with_edge_pipeline, EdgeServer, ServerError};
