//! Error surface of the gateway pipelines.
//!
//! | Variant | Category | HTTP |
//! |---------|----------|------|
//! | [`InvalidJson`](GatewayError::InvalidJson), [`ImageRequired`](GatewayError::ImageRequired), [`InvalidSide`](GatewayError::InvalidSide), [`TextRequired`](GatewayError::TextRequired) | client input | 400 |
//! | [`MissingCredential`](GatewayError::MissingCredential) | configuration | 500 |
//! | [`VendorRequestFailed`](GatewayError::VendorRequestFailed), [`VendorNonJson`](GatewayError::VendorNonJson) | vendor protocol | 502 |
//! | [`Unexpected`](GatewayError::Unexpected) | unhandled | 500 |
//!
//! Transient vendor failures never show up here; they are absorbed by the
//! degradation policy.

use serde_json::{json, Value};
use thiserror::Error;

use ocr::OcrError;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Image is required")]
    ImageRequired,

    #[error("Invalid side")]
    InvalidSide,

    #[error("Text is required")]
    TextRequired,

    #[error("AppCode is missing. Please configure ALIYUN_OCR_APPCODE in the gateway environment.")]
    MissingCredential,

    #[error("Aliyun OCR request failed")]
    VendorRequestFailed { status: u16, body: Value },

    #[error("Aliyun OCR returned non-JSON response")]
    VendorNonJson { status: u16, preview: String },

    #[error("{0}")]
    Unexpected(String),
}

impl GatewayError {
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::InvalidJson
            | GatewayError::ImageRequired
            | GatewayError::InvalidSide
            | GatewayError::TextRequired => 400,
            GatewayError::MissingCredential | GatewayError::Unexpected(_) => 500,
            GatewayError::VendorRequestFailed { .. } | GatewayError::VendorNonJson { .. } => 502,
        }
    }

    /// Wire body: `{ "error": message, ...context }`.
    pub fn body(&self) -> Value {
        match self {
            GatewayError::VendorRequestFailed { status, body } => json!({
                "error": self.to_string(),
                "upstreamStatus": status,
                "upstreamBody": body,
            }),
            GatewayError::VendorNonJson { status, preview } => json!({
                "error": self.to_string(),
                "upstreamStatus": status,
                "upstreamBody": preview,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }
}

impl From<OcrError> for GatewayError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::InvalidJson => GatewayError::InvalidJson,
            OcrError::ImageRequired => GatewayError::ImageRequired,
            OcrError::InvalidSide => GatewayError::InvalidSide,
            other => GatewayError::Unexpected(other.to_string()),
        }
    }
}
