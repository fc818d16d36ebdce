//! Identity-card OCR vendor client.
//!
//! This crate owns the vendor-facing half of the gateway:
//!
//! - [`OcrRequest`]: validation of the inbound `{ image, side }` body and the
//!   data-URL stripping the vendor expects.
//! - [`OcrUpstream`] / [`HttpUpstream`]: a single POST with
//!   `Authorization: APPCODE <credential>`, raced against [`UPSTREAM_TIMEOUT`].
//! - [`VendorOutcome`]: the classified result of that one attempt.
//!
//! Deciding what the caller finally sees (real payload, degraded record or a
//! structured error) is left to the gateway.
//!
//! # Example
//!
//! ```rust,no_run
//! use ocr::{HttpUpstream, OcrRequest, OcrUpstream, DEFAULT_OCR_URL};
//!
//! # async fn run() -> Result<(), ocr::OcrError> {
//! let request = OcrRequest::from_slice(br#"{"image":"data:image/png;base64,iVBORw0KGgo="}"#)?;
//! let upstream = HttpUpstream::new()?;
//! let outcome = upstream.call(&request, "my-appcode", DEFAULT_OCR_URL).await?;
//! println!("vendor said: {}", outcome.kind());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod outcome;
mod request;

pub use client::{
    HttpUpstream, OcrUpstream, DEFAULT_OCR_URL, PLACEHOLDER_APPCODE, UPSTREAM_TIMEOUT,
};
pub use error::OcrError;
pub use outcome::{
    classify, is_gateway_status, preview, VendorOutcome, GATEWAY_STATUSES, PREVIEW_CHARS,
};
pub use request::{OcrRequest, Side, VendorConfigure, VendorPayload};
