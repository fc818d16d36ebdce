use thiserror::Error;

/// Errors raised while validating an OCR request or preparing the vendor call.
///
/// Vendor-side failures are not errors at this level; they are reported as a
/// [`VendorOutcome`](crate::VendorOutcome) so the caller can apply its own
/// degradation policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OcrError {
    /// Request body is missing or is not valid JSON.
    #[error("Invalid JSON body")]
    InvalidJson,

    /// `image` is absent, not a string, or blank.
    #[error("Image is required")]
    ImageRequired,

    /// `side` is present but is not `face` or `back`.
    #[error("Invalid side")]
    InvalidSide,

    /// The credential cannot be carried in an HTTP header.
    #[error("credential contains characters not allowed in an HTTP header")]
    InvalidCredential,

    /// Vendor request could not be prepared (serialization, client setup).
    #[error("failed to prepare vendor request: {0}")]
    Prepare(String),
}

impl OcrError {
    /// Returns true if the caller sent something we cannot use.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            OcrError::InvalidJson | OcrError::ImageRequired | OcrError::InvalidSide
        )
    }

    /// Suggested HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}
