//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the renderer as catch-all fallback
//! - Run the edge pipeline as middleware in front of the renderer
//! - Wire up middleware (tracing, timeout, request ID)
//! - Apply configuration reloads by swapping the pipeline
//! - Serve until the shutdown signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ConfigError, EdgeConfig};
use crate::http::render::{render_handler, Renderer};
use crate::http::request::{request_id, MakeEdgeRequestId};
use crate::http::response;
use crate::observability::metrics;
use crate::routing::{EdgePipeline, Outcome, RouteRequest, SharedPipeline};

/// Error building the server from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid upstream address: {0}")]
    Upstream(#[from] axum::http::uri::InvalidUri),
}

/// HTTP server for the edge router.
pub struct EdgeServer {
    router: Router,
    config: EdgeConfig,
    pipeline: SharedPipeline,
}

impl EdgeServer {
    /// Create a new edge server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, ServerError> {
        let pipeline = EdgePipeline::from_config(&config)?.shared();
        let renderer = Renderer::new(&config.upstream)?;

        let router = Self::build_router(&config, renderer, pipeline.clone());
        Ok(Self {
            router,
            config,
            pipeline,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, renderer: Renderer, pipeline: SharedPipeline) -> Router {
        // The timeout wraps only the renderer so its 408 still gets the header policy.
        let app = Router::new()
            .fallback(render_handler)
            .with_state(renderer)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        with_edge_pipeline(app, pipeline)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeEdgeRequestId))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configurations received on `config_updates` replace the pipeline;
    /// listener and upstream settings only change on restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<EdgeConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, upstream = %self.config.upstream.address, "HTTP server starting");

        let pipeline = self.pipeline.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                apply_config(&pipeline, &new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Rebuild the pipeline from a new configuration and swap it in.
/// An invalid configuration leaves the current pipeline in place.
pub fn apply_config(pipeline: &SharedPipeline, config: &EdgeConfig) -> bool {
    match EdgePipeline::from_config(config) {
        Ok(new_pipeline) => {
            pipeline.store(Arc::new(new_pipeline));
            metrics::record_config_reload(true);
            tracing::info!("Pipeline reloaded");
            true
        }
        Err(e) => {
            metrics::record_config_reload(false);
            tracing::error!(error = %e, "Rejected config update, keeping current pipeline");
            false
        }
    }
}

/// Put the edge pipeline in front of `router`, whose handlers act as the renderer.
pub fn with_edge_pipeline(router: Router, pipeline: SharedPipeline) -> Router {
    router.layer(middleware::from_fn_with_state(pipeline, edge_middleware))
}

/// Run the pipeline, then apply the header policy to whatever response results.
async fn edge_middleware(
    State(pipeline): State<SharedPipeline>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let pipeline = pipeline.load_full();

    if pipeline.is_bypassed(request.uri().path()) {
        metrics::record_bypass();
        return next.run(request).await;
    }

    let start_time = Instant::now();
    let outcome = pipeline.decide(&RouteRequest::from_request(&request));

    tracing::debug!(
        request_id = %request_id(&request),
        path = %request.uri().path(),
        outcome = outcome.label(),
        "Edge decision"
    );

    let mut response = match &outcome {
        Outcome::Render { locale } => {
            pipeline.attach_locale(&mut request, locale);
            next.run(request).await
        }
        Outcome::PermanentRedirect { location } => response::permanent_redirect(location),
        Outcome::TemporaryRedirect { location } => response::temporary_redirect(location),
        Outcome::Gone => response::gone(),
    };

    pipeline.security_headers().apply(response.headers_mut());
    metrics::record_request(outcome.label(), response.status().as_u16(), start_time);
    response
}
