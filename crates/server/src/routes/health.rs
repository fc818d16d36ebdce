use crate::error::{ServerError, ServerResult};
use crate::response::JsonReply;
use axum::http::Method;
use serde_json::json;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Touch the start time so uptime counts from boot, not the first probe.
pub fn mark_started() {
    once_cell::sync::Lazy::force(&SERVER_START_TIME);
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running. GET and HEAD only.
pub async fn health_check(method: Method) -> ServerResult<JsonReply> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ServerError::MethodNotAllowed);
    }

    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Ok(JsonReply::ok(json!({
        "status": "healthy",
        "service": "idgate",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime,
    })))
}
