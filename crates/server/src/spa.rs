//! Static document delegate for every non-API path.

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::error::ServerError;

/// Serves the client application for paths the gateway does not handle.
#[async_trait]
pub trait DocumentServer: Send + Sync {
    async fn serve(&self, request: Request) -> Response;
}

/// Files under a build directory, with `index.html` as the answer for any
/// unknown path so client-side routes resolve.
#[derive(Debug, Clone)]
pub struct StaticDocuments {
    root: PathBuf,
    service: ServeDir<ServeFile>,
}

impl StaticDocuments {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let service = ServeDir::new(&root).fallback(ServeFile::new(root.join("index.html")));
        Self { root, service }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentServer for StaticDocuments {
    async fn serve(&self, request: Request) -> Response {
        let result: Result<_, Infallible> = self.service.clone().oneshot(request).await;
        match result {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(never) => match never {},
        }
    }
}

/// Used when no build directory exists; answers like an unmatched API path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocuments;

#[async_trait]
impl DocumentServer for NoDocuments {
    async fn serve(&self, _request: Request) -> Response {
        ServerError::NotFound.into_response()
    }
}
