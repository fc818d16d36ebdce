use crate::error::ServerResult;
use crate::response::JsonReply;
use crate::routes::require_post;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::Method;

/// Mask PII in free text
///
/// Body: `{ "text": "..." }`, answer: `{ "result": "..." }`.
pub async fn mask_text(
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<JsonReply> {
    require_post(&method)?;
    let result = idgate::redact(&body?)?;
    Ok(JsonReply::ok(result))
}
