use crate::error::ServerResult;
use crate::response::JsonReply;
use crate::routes::require_post;
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::Method;
use std::sync::Arc;

/// Recognize an identity card image
///
/// Body: `{ "image": "<base64 or data URL>", "side": "face" | "back" }`.
/// Answers with the vendor's JSON verbatim, or the degraded record when the
/// vendor is unreachable.
pub async fn recognize(
    State(state): State<Arc<ServerState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<JsonReply> {
    // Method first, so a wrong method is 405 whatever the body holds
    require_post(&method)?;
    let body = body?;
    let result = idgate::recognize(&body, &state.env, state.upstream.as_ref()).await?;
    Ok(JsonReply::ok(result))
}
