//! Inbound OCR request parsing and the outbound vendor payload.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::OcrError;

/// Matches the `data:image/<subtype>;base64,` prefix browsers put on
/// `FileReader.readAsDataURL` output.
static DATA_URL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9_]+;base64,")
        .unwrap_or_else(|err| panic!("invalid data URL pattern: {err}"))
});

/// Which side of the identity card the image shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Portrait side (name, address, ID number).
    #[default]
    Face,
    /// Issuing authority and validity period.
    Back,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Face => "face",
            Side::Back => "back",
        }
    }
}

/// A validated OCR request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrRequest {
    image: String,
    side: Side,
}

impl OcrRequest {
    /// Build a request from an already-validated image and side.
    ///
    /// Returns [`OcrError::ImageRequired`] for a blank image.
    pub fn new(image: impl Into<String>, side: Side) -> Result<Self, OcrError> {
        let image = image.into();
        let trimmed = image.trim();
        if trimmed.is_empty() {
            return Err(OcrError::ImageRequired);
        }
        Ok(Self {
            image: trimmed.to_owned(),
            side,
        })
    }

    /// Parse and validate a raw request body.
    ///
    /// Checks run in a fixed order: JSON syntax, then `image`, then `side`.
    /// Any valid JSON that does not carry a non-blank string `image` is
    /// reported as [`OcrError::ImageRequired`]. An absent `side` defaults to
    /// [`Side::Face`]; any other value, `null` included, is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, OcrError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| OcrError::InvalidJson)?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed JSON body.
    pub fn from_value(value: &Value) -> Result<Self, OcrError> {
        let image = match value.get("image") {
            Some(Value::String(image)) => image,
            _ => return Err(OcrError::ImageRequired),
        };
        if image.trim().is_empty() {
            return Err(OcrError::ImageRequired);
        }

        let side = match value.get("side") {
            None => Side::Face,
            Some(Value::String(s)) if s == "face" => Side::Face,
            Some(Value::String(s)) if s == "back" => Side::Back,
            Some(_) => return Err(OcrError::InvalidSide),
        };

        Self::new(image.as_str(), side)
    }

    /// Trimmed image exactly as received.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Raw base64 for the vendor: the data URL prefix is stripped when present.
    pub fn upstream_image(&self) -> &str {
        match DATA_URL_PREFIX.find(&self.image) {
            Some(prefix) => &self.image[prefix.end()..],
            None => &self.image,
        }
    }

    /// Body sent to the vendor.
    pub fn vendor_payload(&self) -> VendorPayload<'_> {
        VendorPayload {
            image: self.upstream_image(),
            configure: VendorConfigure { side: self.side },
        }
    }
}

/// JSON body of the vendor call: `{ "image": ..., "configure": { "side": ... } }`.
#[derive(Debug, Clone, Serialize)]
pub struct VendorPayload<'a> {
    pub image: &'a str,
    pub configure: VendorConfigure,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct VendorConfigure {
    pub side: Side,
}
