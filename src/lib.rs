//! Umbrella crate for the idgate edge gateway.
//!
//! This crate stitches the stage crates together into the two request
//! pipelines the HTTP layer exposes:
//!
//! - [`recognize`]: validate an OCR body, resolve the vendor credential and
//!   endpoint, make one vendor call and apply the [degradation policy](policy).
//! - [`redact`]: validate a mask body and run the [`mask`] engine.
//!
//! Both are pure functions of (request body, environment) apart from the one
//! vendor call, which goes through the [`OcrUpstream`] seam so tests and
//! alternative transports can stand in for the real vendor.

pub mod env;
pub mod error;
pub mod policy;

pub use env::{Bindings, Credential, DotenvFile, EnvError, EnvResolver, EnvSource, ProcessEnv};
pub use error::GatewayError;
pub use mask::{mask, mask_detailed, mask_with, Masked, PiiKind};
pub use ocr::{
    HttpUpstream, OcrError, OcrRequest, OcrUpstream, Side, VendorOutcome, DEFAULT_OCR_URL,
    UPSTREAM_TIMEOUT,
};
pub use policy::{decide, degraded_record};

use serde_json::{json, Value};

/// Run the OCR pipeline for one request body.
///
/// The vendor is only contacted once the body is valid and a real credential
/// is configured.
pub async fn recognize(
    body: &[u8],
    env: &EnvResolver,
    upstream: &dyn OcrUpstream,
) -> Result<Value, GatewayError> {
    let request = OcrRequest::from_slice(body)?;

    let Some(credential) = env.credential() else {
        tracing::error!("vendor credential is not configured");
        return Err(GatewayError::MissingCredential);
    };
    let url = env.vendor_url();

    tracing::debug!(side = request.side().as_str(), "calling OCR vendor");
    let outcome = upstream
        .call(&request, credential.expose(), &url)
        .await?;
    tracing::info!(outcome = outcome.kind(), "OCR vendor call finished");

    decide(outcome)
}

/// Run the masking pipeline for one request body, producing `{ "result": ... }`.
pub fn redact(body: &[u8]) -> Result<Value, GatewayError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| GatewayError::InvalidJson)?;
    let Some(text) = value.get("text").and_then(Value::as_str) else {
        return Err(GatewayError::TextRequired);
    };

    let masked = mask_detailed(text);
    tracing::debug!(
        chars = text.chars().count(),
        redactions = masked.redactions,
        "masked text"
    );
    Ok(json!({ "result": masked.text }))
}
