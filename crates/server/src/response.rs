//! JSON replies with the gateway's default headers.

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const NO_STORE: &str = "no-store";

/// A JSON response. `Content-Type` and `Cache-Control` default to
/// [`JSON_CONTENT_TYPE`] and [`NO_STORE`] unless set with
/// [`with_header`](Self::with_header).
#[derive(Debug, Clone)]
pub struct JsonReply {
    status: StatusCode,
    body: Value,
    headers: HeaderMap,
}

impl JsonReply {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            headers: HeaderMap::new(),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl IntoResponse for JsonReply {
    fn into_response(self) -> Response {
        let mut headers = self.headers;
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers
            .entry(CACHE_CONTROL)
            .or_insert(HeaderValue::from_static(NO_STORE));

        // Serializing a `Value` cannot fail.
        let bytes = serde_json::to_vec(&self.body).unwrap_or_default();

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = self.status;
        *response.headers_mut() = headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_applied() {
        let response = JsonReply::ok(json!({ "result": "x" })).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(response.headers()[CACHE_CONTROL], NO_STORE);
    }

    #[test]
    fn explicit_headers_win() {
        let response = JsonReply::new(StatusCode::ACCEPTED, json!({}))
            .with_header(CACHE_CONTROL, HeaderValue::from_static("max-age=60"))
            .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()[CACHE_CONTROL], "max-age=60");
        assert_eq!(response.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
    }
}
