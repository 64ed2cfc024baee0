use std::path::PathBuf;

use axum::http::{header, Request};
use clap::{Parser, Subcommand};
use serde_json::json;

use edge_router::config::{load_config, EdgeConfig};
use edge_router::routing::{EdgePipeline, RouteRequest};

#[derive(Parser)]
#[command(name = "edge-cli")]
#[command(about = "Offline tools for the edge router configuration", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print a summary
    Check,
    /// Show what the edge would do with a request
    Explain {
        /// Request path, with optional query string
        #[arg(default_value = "/")]
        path: String,

        #[arg(long, default_value = "localhost")]
        host: String,

        #[arg(long)]
        user_agent: Option<String>,

        /// Country reported by the CDN (sent as the first trusted geo header)
        #[arg(long)]
        country: Option<String>,

        /// Value of the locale preference cookie
        #[arg(long)]
        locale_cookie: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };
    let pipeline = EdgePipeline::from_config(&config)?;

    match cli.command {
        Commands::Check => {
            let summary = json!({
                "locales": config.locales.supported,
                "default_locale": config.locales.default,
                "legacy_redirects": config.legacy.redirects.len(),
                "removed_prefixes": config.legacy.removed_prefixes.len(),
                "countries": config.geo.country_locales,
                "trusted_geo_headers": config.geo.trusted_headers,
                "crawler_signatures": config.crawlers.signatures.len(),
                "security_headers": pipeline.security_headers().len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Explain {
            path,
            host,
            user_agent,
            country,
            locale_cookie,
        } => {
            let mut builder = Request::builder().uri(path.as_str()).header(header::HOST, host);
            if let Some(ua) = user_agent {
                builder = builder.header(header::USER_AGENT, ua);
            }
            if let (Some(country), Some(geo_header)) = (country, config.geo.trusted_headers.first()) {
                builder = builder.header(geo_header.as_str(), country);
            }
            if let Some(locale) = locale_cookie {
                builder = builder.header(
                    header::COOKIE,
                    format!("{}={}", config.locales.cookie_name, locale),
                );
            }
            let request = builder.body(())?;

            let output = if pipeline.is_bypassed(request.uri().path()) {
                json!({ "kind": "bypass" })
            } else {
                serde_json::to_value(pipeline.decide(&RouteRequest::from_request(&request)))?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
