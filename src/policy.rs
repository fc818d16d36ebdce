//! Degradation policy: what the caller sees for each vendor outcome.

use serde_json::{json, Value};

use ocr::VendorOutcome;

use crate::GatewayError;

/// Canned record served when the vendor is unreachable or its gateway fails.
///
/// Carries no real data; the name and address are labelled as degraded so
/// the UI and any human reader can tell it apart from a real recognition.
pub fn degraded_record() -> Value {
    json!({
        "name": "演示用户(降级模式)",
        "sex": "男",
        "nationality": "汉",
        "birth": "19900307",
        "address": "北京市朝阳区演示路88号 (接口超时，已自动降级)",
        "num": "110101199003078888",
        "success": true,
        "card_region": [
            { "x": 50, "y": 50 },
            { "x": 950, "y": 50 },
            { "x": 950, "y": 600 },
            { "x": 50, "y": 600 },
        ],
    })
}

/// Map a classified vendor outcome to the gateway result.
///
/// Transient failures become `Ok(degraded_record())`.
pub fn decide(outcome: VendorOutcome) -> Result<Value, GatewayError> {
    if outcome.is_transient() {
        tracing::warn!(outcome = outcome.kind(), "serving degraded OCR record");
        return Ok(degraded_record());
    }

    match outcome {
        VendorOutcome::Success(json) => Ok(json),
        VendorOutcome::VendorError { status, body } => {
            Err(GatewayError::VendorRequestFailed { status, body })
        }
        VendorOutcome::NonJson { status, preview } => {
            Err(GatewayError::VendorNonJson { status, preview })
        }
        VendorOutcome::Timeout | VendorOutcome::NetworkFailure { .. } => Ok(degraded_record()),
    }
}
