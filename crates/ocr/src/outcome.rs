//! Classification of a single vendor exchange.

use serde_json::Value;

/// Longest prefix of a vendor body kept for diagnostics, in characters.
pub const PREVIEW_CHARS: usize = 2000;

/// Statuses treated as vendor gateway instability (bad gateway, gateway timeout).
pub const GATEWAY_STATUSES: [u16; 2] = [502, 504];

/// What happened on one upstream attempt. Exactly one variant per attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum VendorOutcome {
    /// 2xx with a JSON body.
    Success(Value),
    /// Non-2xx. `body` is the parsed JSON when possible, otherwise the text
    /// preview as a JSON string. For gateway statuses the body is not read
    /// and is `Null`.
    VendorError { status: u16, body: Value },
    /// The timeout fired before the vendor answered.
    Timeout,
    /// DNS, connect, TLS or mid-body transport failure.
    NetworkFailure { reason: String },
    /// 2xx whose body is not JSON (or is empty / `null`).
    NonJson { status: u16, preview: String },
}

impl VendorOutcome {
    /// Failures that are absorbed by serving the degraded record.
    pub fn is_transient(&self) -> bool {
        match self {
            VendorOutcome::Timeout | VendorOutcome::NetworkFailure { .. } => true,
            VendorOutcome::VendorError { status, .. } => is_gateway_status(*status),
            VendorOutcome::Success(_) | VendorOutcome::NonJson { .. } => false,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VendorOutcome::Success(_) => "success",
            VendorOutcome::VendorError { .. } => "vendor_error",
            VendorOutcome::Timeout => "timeout",
            VendorOutcome::NetworkFailure { .. } => "network_failure",
            VendorOutcome::NonJson { .. } => "non_json",
        }
    }
}

pub fn is_gateway_status(status: u16) -> bool {
    GATEWAY_STATUSES.contains(&status)
}

/// First [`PREVIEW_CHARS`] characters of `text`.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => text[..end].to_owned(),
        None => text.to_owned(),
    }
}

/// Classify a vendor response that was fully received.
///
/// Non-2xx wins over body shape: a failed status is always a
/// [`VendorError`](VendorOutcome::VendorError), carrying the JSON body when
/// it parses and the text preview otherwise.
pub fn classify(status: u16, text: &str) -> VendorOutcome {
    let parsed = if text.is_empty() {
        None
    } else {
        serde_json::from_str::<Value>(text)
            .ok()
            .filter(|value| !value.is_null())
    };

    if !(200..300).contains(&status) {
        let body = parsed.unwrap_or_else(|| Value::String(preview(text)));
        return VendorOutcome::VendorError { status, body };
    }

    match parsed {
        Some(json) => VendorOutcome::Success(json),
        None => VendorOutcome::NonJson {
            status,
            preview: preview(text),
        },
    }
}
