//! Exercises `HttpUpstream` against a local fake vendor.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use ocr::{HttpUpstream, OcrRequest, OcrUpstream, Side, VendorOutcome};
use serde_json::{json, Value};

async fn spawn_vendor(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake vendor");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake vendor crashed");
    });
    format!("http://{addr}/ocr")
}

fn sample_request() -> OcrRequest {
    OcrRequest::from_slice(br#"{"image":"data:image/jpeg;base64,/9j/4AAQ","side":"back"}"#)
        .expect("valid request")
}

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };
    Json(json!({
        "authorization": header("authorization"),
        "content_type": header("content-type"),
        "accept": header("accept"),
        "received": body,
    }))
}

#[tokio::test]
async fn success_returns_vendor_json_and_sends_expected_request() {
    let url = spawn_vendor(Router::new().route("/ocr", post(echo))).await;
    let upstream = HttpUpstream::new().unwrap();

    let outcome = upstream
        .call(&sample_request(), "secret-code", &url)
        .await
        .unwrap();

    let VendorOutcome::Success(body) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(body["authorization"], "APPCODE secret-code");
    assert_eq!(body["content_type"], "application/json; charset=UTF-8");
    assert_eq!(body["accept"], "application/json");
    assert_eq!(
        body["received"],
        json!({ "image": "/9j/4AAQ", "configure": { "side": "back" } })
    );
}

#[tokio::test]
async fn gateway_timeout_status_is_transient() {
    let app = Router::new().route(
        "/ocr",
        post(|| async { (StatusCode::GATEWAY_TIMEOUT, "upstream timed out") }),
    );
    let url = spawn_vendor(app).await;

    let outcome = HttpUpstream::new()
        .unwrap()
        .call(&sample_request(), "k", &url)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        VendorOutcome::VendorError {
            status: 504,
            body: Value::Null
        }
    );
    assert!(outcome.is_transient());
}

#[tokio::test]
async fn vendor_rejection_keeps_json_body() {
    let app = Router::new().route(
        "/ocr",
        post(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "Invalid AppCode" })),
            )
        }),
    );
    let url = spawn_vendor(app).await;

    let outcome = HttpUpstream::new()
        .unwrap()
        .call(&sample_request(), "k", &url)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        VendorOutcome::VendorError {
            status: 403,
            body: json!({ "message": "Invalid AppCode" })
        }
    );
    assert!(!outcome.is_transient());
}

#[tokio::test]
async fn html_success_is_non_json() {
    let app = Router::new().route("/ocr", post(|| async { "<html>busy</html>" }));
    let url = spawn_vendor(app).await;

    let outcome = HttpUpstream::new()
        .unwrap()
        .call(&sample_request(), "k", &url)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        VendorOutcome::NonJson {
            status: 200,
            preview: "<html>busy</html>".into()
        }
    );
}

#[tokio::test]
async fn slow_vendor_times_out() {
    let app = Router::new().route(
        "/ocr",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "late": true }))
        }),
    );
    let url = spawn_vendor(app).await;
    let upstream = HttpUpstream::with_timeout(Duration::from_millis(200)).unwrap();

    let started = std::time::Instant::now();
    let outcome = upstream.call(&sample_request(), "k", &url).await.unwrap();

    assert_eq!(outcome, VendorOutcome::Timeout);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn refused_connection_is_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = HttpUpstream::new()
        .unwrap()
        .call(&sample_request(), "k", &format!("http://{addr}/ocr"))
        .await
        .unwrap();

    assert!(
        matches!(outcome, VendorOutcome::NetworkFailure { .. }),
        "got {outcome:?}"
    );
    assert!(outcome.is_transient());
}

#[tokio::test]
async fn face_side_is_sent_by_default() {
    let url = spawn_vendor(Router::new().route("/ocr", post(echo))).await;
    let request = OcrRequest::new("QUJD", Side::default()).unwrap();

    let outcome = HttpUpstream::new()
        .unwrap()
        .call(&request, "k", &url)
        .await
        .unwrap();

    let VendorOutcome::Success(body) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(body["received"]["configure"]["side"], "face");
}
