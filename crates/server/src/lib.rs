//! idgate server - HTTP edge gateway for identity-card OCR and PII masking
//!
//! This crate exposes the `idgate` pipelines over HTTP and serves the client
//! application for every other path.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /api/ocr` (alias `/ocr`) - recognize an identity card image
//! - `POST /api/mask` (alias `/mask`) - mask PII in text
//! - `GET /api/health` - liveness probe
//!
//! Other methods on the OCR and mask routes answer 405. Unknown `/api/*`
//! paths answer a JSON 404; anything else is handed to the static document
//! server, which falls back to `index.html`.
//!
//! Every JSON answer carries `Content-Type: application/json; charset=utf-8`
//! and `Cache-Control: no-store`. Errors look like
//! `{ "error": "...", ...context }`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod spa;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use response::JsonReply;
pub use server::{build_router, start_server};
pub use spa::{DocumentServer, NoDocuments, StaticDocuments};
pub use state::ServerState;
