use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use idgate::GatewayError;
use serde_json::json;

use crate::response::JsonReply;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
///
/// Every variant renders as `{ "error": <message>, ...context }`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Not Found")]
    NotFound,

    #[error("Payload Too Large")]
    PayloadTooLarge,

    /// Body could not be read for a reason other than its size.
    #[error("{0}")]
    BadRequest(String),

    #[error("Gateway Timeout")]
    Timeout,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ServerError::Gateway(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ServerError::Internal(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ServerError::Gateway(err) => err.body(),
            other => json!({ "error": other.to_string() }),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }

        JsonReply::new(status, body).into_response()
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<BytesRejection> for ServerError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    }
}

impl From<idgate::EnvError> for ServerError {
    fn from(err: idgate::EnvError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<idgate::OcrError> for ServerError {
    fn from(err: idgate::OcrError) -> Self {
        ServerError::Gateway(err.into())
    }
}
