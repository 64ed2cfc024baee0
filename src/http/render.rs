//! Hand-off to the rendering application.
//!
//! # Responsibilities
//! - Forward pass-through requests to the upstream renderer
//! - Keep the original path, query, headers and body
//! - Map upstream failures to 502 Bad Gateway
//!
//! # Design Decisions
//! - The renderer owns locale pages and 404s; the edge only picks the locale
//! - Response bodies are streamed back, never buffered
//! - No retries: a failed render is reported, not repeated

use std::str::FromStr;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::http::request::request_id;
use crate::observability::metrics;

/// Client for the upstream rendering application.
#[derive(Clone)]
pub struct Renderer {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl Renderer {
    pub fn new(config: &UpstreamConfig) -> Result<Self, InvalidUri> {
        let authority = Authority::from_str(&config.address)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self { client, authority })
    }

    /// Forward a request and stream back the renderer's response.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        let request_id = request_id(&request).to_string();
        let (mut parts, body) = request.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(self.authority.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri = match Uri::from_parts(uri_parts) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Invalid upstream URI");
                return (StatusCode::BAD_GATEWAY, "Invalid upstream URI").into_response();
            }
        };

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => response.map(Body::new),
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    upstream = %self.authority,
                    error = %e,
                    "Upstream render failed"
                );
                metrics::record_upstream_error();
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}

/// Fallback handler: everything the edge does not answer itself is rendered upstream.
pub async fn render_handler(State(renderer): State<Renderer>, request: Request<Body>) -> Response {
    renderer.forward(request).await
}
