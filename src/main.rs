//! Locale edge router (v1)
//!
//! Front door for the localized marketing site, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────────┐
//!                         │                     EDGE ROUTER                       │
//!                         │                                                       │
//!     Client Request      │  ┌─────────┐   ┌────────────────────────────────┐    │
//!     ────────────────────┼─▶│  http   │──▶│         routing pipeline        │    │
//!                         │  │ server  │   │ bypass → legacy → host → locale │    │
//!                         │  └─────────┘   └───────┬──────────────┬─────────┘    │
//!                         │                        │ 301/302/410  │ render       │
//!                         │                        ▼              ▼              │
//!                         │                  ┌──────────┐  ┌────────────┐       │
//!                         │                  │ response │  │  renderer  │───────┼──▶ Rendering
//!                         │                  └────┬─────┘  └─────┬──────┘       │    Application
//!                         │                       ▼              ▼              │
//!     Client Response     │               ┌────────────────────────────┐       │
//!     ◀───────────────────┼───────────────│   security header policy    │       │
//!                         │               └────────────────────────────┘       │
//!                         │                                                       │
//!                         │  Cross-cutting: config (+ hot reload), observability, │
//!                         │  lifecycle (startup / graceful shutdown)             │
//!                         └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use edge_router::lifecycle::{startup, StartupOptions};

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Locale-aware edge router for the marketing site", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the configuration file when it changes.
    #[arg(short, long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    startup::run(StartupOptions {
        config_path: cli.config,
        watch: cli.watch,
    })
    .await
}
