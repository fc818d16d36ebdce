//! API route handlers
//!
//! - `ocr`: identity-card recognition through the vendor
//! - `mask`: PII redaction of free text
//! - `health`: liveness probe

pub mod health;
pub mod mask;
pub mod ocr;

use crate::error::ServerError;
use crate::state::ServerState;
use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// Prefix reserved for gateway routes.
pub const API_PREFIX: &str = "/api/";

/// Both gateway routes only accept POST.
pub(crate) fn require_post(method: &Method) -> Result<(), ServerError> {
    if method == Method::POST {
        Ok(())
    } else {
        Err(ServerError::MethodNotAllowed)
    }
}

/// Fallback for unmatched paths
///
/// API-prefixed paths get a JSON 404; everything else goes to the client
/// application.
pub async fn fallback(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    let path = request.uri().path();
    if path.starts_with(API_PREFIX) {
        return ServerError::NotFound.into_response();
    }
    state.documents.serve(request).await
}
