//! Terminal responses produced by the edge itself.
//!
//! # Responsibilities
//! - Build 301/302 redirects with a `Location` header
//! - Build 410 Gone with an indexing opt-out and no body
//!
//! # Design Decisions
//! - Redirect bodies are empty; clients follow `Location`
//! - An unrepresentable `Location` becomes a 500 rather than a panic

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::security::headers::X_ROBOTS_TAG;

/// 301 Moved Permanently.
pub fn permanent_redirect(location: &str) -> Response {
    redirect(StatusCode::MOVED_PERMANENTLY, location)
}

/// 302 Found.
pub fn temporary_redirect(location: &str) -> Response {
    redirect(StatusCode::FOUND, location)
}

/// 410 Gone, marked `noindex`.
pub fn gone() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::GONE;
    response
        .headers_mut()
        .insert(X_ROBOTS_TAG, HeaderValue::from_static("noindex"));
    response
}

fn redirect(status: StatusCode, location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(location = %location, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
