//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration for the gateway routes and their bare aliases
//! - Middleware stack (logging, compression, timeouts, panics)
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::middleware::{log_requests, request_id};
use crate::response::JsonReply;
use crate::routes::{fallback, health, mask, ocr};
use crate::state::ServerState;
use axum::extract::DefaultBodyLimit;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::middleware::{from_fn, map_response};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde_json::json;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// `/api/ocr` and `/api/mask` are also reachable through the bare aliases
/// `/ocr` and `/mask`. They accept every method so that anything but POST
/// gets the JSON 405 rather than axum's empty one.
///
/// Middleware stack (outermost last):
/// 1. Body limit
/// 2. Timeout handling, with the 504 rewritten as JSON
/// 3. Compression
/// 4. CORS
/// 5. Request ID tracking
/// 6. Request logging
/// 7. Tracing
/// 8. Panic recovery
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(cors::Any)
            .allow_headers(cors::Any)
    } else {
        CorsLayer::new()
    };

    let api_routes = Router::new()
        .route("/api/ocr", any(ocr::recognize))
        .route("/ocr", any(ocr::recognize))
        .route("/api/mask", any(mask::mask_text))
        .route("/mask", any(mask::mask_text))
        .route("/api/health", any(health::health_check));

    Router::new()
        .merge(api_routes)
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(map_response(timeout_as_json))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// The timeout layer answers 504 with an empty body; give it the JSON error.
async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::GATEWAY_TIMEOUT
        && !response.headers().contains_key(CONTENT_TYPE)
    {
        return ServerError::Timeout.into_response();
    }
    response
}

/// Turn a handler panic into `500 { "error": <message> }`.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal Server Error".to_string()
    };

    tracing::error!(error = %message, "handler panicked");
    JsonReply::new(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message })).into_response()
}

/// Start the idgate HTTP server
///
/// Initializes logging, builds the shared state and router, then serves until
/// Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    health::mark_started();

    let state = Arc::new(ServerState::new(config.clone())?);
    let credential_configured = state.env.credential().is_some();
    let app = build_router(state);

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(%addr, "Starting idgate gateway");
    tracing::info!(
        timeout_secs = config.timeout_secs,
        upstream_timeout_secs = config.upstream_timeout_secs,
        max_body_mb = config.max_body_size_mb,
        cors = config.enable_cors,
        static_dir = %config.static_dir.display(),
        "Gateway settings"
    );
    if !credential_configured {
        tracing::warn!("OCR credential is not configured; OCR requests will fail with 500");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
