//! Vendor HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::outcome::{classify, is_gateway_status, VendorOutcome};
use crate::{OcrError, OcrRequest};

/// Hard bound on waiting for the vendor to answer.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder shipped in sample configuration; never a real credential.
pub const PLACEHOLDER_APPCODE: &str = "YOUR_APP_CODE_HERE";

/// Built-in vendor endpoint used when none is configured.
pub const DEFAULT_OCR_URL: &str =
    "https://cardnumber.market.alicloudapi.com/rest/160601/ocr/ocr_idcard.json";

/// One-shot call to the OCR vendor.
///
/// Implementations never retry. `Err` is reserved for failures that happen
/// before anything is sent; everything the vendor (or the network) does is
/// reported through [`VendorOutcome`].
#[async_trait]
pub trait OcrUpstream: Send + Sync {
    async fn call(
        &self,
        request: &OcrRequest,
        credential: &str,
        url: &str,
    ) -> Result<VendorOutcome, OcrError>;
}

/// [`OcrUpstream`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpUpstream {
    /// Client with the standard [`UPSTREAM_TIMEOUT`].
    pub fn new() -> Result<Self, OcrError> {
        Self::with_timeout(UPSTREAM_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(16)
            .build()
            .map_err(|e| OcrError::Prepare(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn vendor_headers(credential: &str) -> Result<HeaderMap, OcrError> {
    let mut auth = HeaderValue::from_str(&format!("APPCODE {credential}"))
        .map_err(|_| OcrError::InvalidCredential)?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=UTF-8"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[async_trait]
impl OcrUpstream for HttpUpstream {
    async fn call(
        &self,
        request: &OcrRequest,
        credential: &str,
        url: &str,
    ) -> Result<VendorOutcome, OcrError> {
        let headers = vendor_headers(credential)?;
        let body = serde_json::to_vec(&request.vendor_payload())
            .map_err(|e| OcrError::Prepare(format!("payload serialization failed: {e}")))?;

        let send = self.client.post(url).headers(headers).body(body).send();

        // The send future is dropped when the timer wins, so a late vendor
        // answer has nothing left to write into.
        let response = match tokio::time::timeout(self.timeout, send).await {
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "vendor call timed out");
                return Ok(VendorOutcome::Timeout);
            }
            Ok(Err(e)) if e.is_timeout() => {
                tracing::warn!("vendor call timed out in transport");
                return Ok(VendorOutcome::Timeout);
            }
            Ok(Err(e)) => {
                let e = e.without_url();
                tracing::warn!(error = %e, "vendor call failed");
                return Ok(VendorOutcome::NetworkFailure {
                    reason: e.to_string(),
                });
            }
            Ok(Ok(response)) => response,
        };

        let status = response.status().as_u16();
        if is_gateway_status(status) {
            tracing::warn!(status, "vendor gateway failure");
            return Ok(VendorOutcome::VendorError {
                status,
                body: serde_json::Value::Null,
            });
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                let e = e.without_url();
                tracing::warn!(status, error = %e, "vendor body read failed");
                return Ok(VendorOutcome::NetworkFailure {
                    reason: e.to_string(),
                });
            }
        };

        let outcome = classify(status, &text);
        tracing::debug!(status, outcome = outcome.kind(), body_len = text.len(), "vendor responded");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_appcode() {
        let headers = vendor_headers("abc123").unwrap();
        assert_eq!(headers[AUTHORIZATION], "APPCODE abc123");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json; charset=UTF-8");
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn credential_with_newline_is_rejected() {
        assert_eq!(
            vendor_headers("abc\r\nX-Injected: 1").unwrap_err(),
            OcrError::InvalidCredential
        );
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        let upstream = HttpUpstream::new().unwrap();
        assert_eq!(upstream.timeout(), Duration::from_secs(10));
    }
}
