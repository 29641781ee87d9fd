//! Gateway tests against a stub upstream bound to an ephemeral port

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shareit::{
    config::{AppConfig, GatewayConfig},
    gateway::{self, GatewayState},
};

struct Upstream {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl Upstream {
    async fn spawn() -> Self {
        let app = Router::new()
            .route(
                "/users/404",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"title": "Not found", "detail": "User with id 404 not found"})),
                    )
                }),
            )
            .fallback(echo);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for Upstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Describes what the gateway forwarded
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "user": headers.get("x-sharer-user-id").and_then(|v| v.to_str().ok()),
        "body": serde_json::from_slice::<Value>(&body).ok(),
    }))
}

fn gateway_for(server_url: &str) -> Router {
    let config = AppConfig {
        gateway: GatewayConfig {
            server_url: server_url.to_string(),
            timeout_secs: 5,
            ..GatewayConfig::default()
        },
        ..AppConfig::default()
    };
    gateway::router(GatewayState::new(config).expect("gateway state"))
}

fn request(method: &str, uri: &str, user_id: Option<i64>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header("X-Sharer-User-Id", id.to_string());
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_valid_user_is_forwarded() {
    let upstream = Upstream::spawn().await;
    let app = gateway_for(&upstream.base_url);

    let response = app
        .oneshot(request(
            "POST",
            "/users",
            None,
            Some(json!({"name": "Anna", "email": "anna@example.com"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["method"], "POST");
    assert_eq!(body["path"], "/users");
    assert_eq!(body["body"]["email"], "anna@example.com");
}

#[tokio::test]
async fn test_invalid_email_is_rejected_locally() {
    let upstream = Upstream::spawn().await;
    let app = gateway_for(&upstream.base_url);

    let response = app
        .oneshot(request(
            "POST",
            "/users",
            None,
            Some(json!({"name": "Anna", "email": "not-an-email"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Validation error");
}

#[tokio::test]
async fn test_item_requires_header() {
    let upstream = Upstream::spawn().await;
    let app = gateway_for(&upstream.base_url);

    let response = app
        .oneshot(request(
            "POST",
            "/items",
            None,
            Some(json!({"name": "Drill", "description": "Cordless", "available": true})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_header_is_forwarded() {
    let upstream = Upstream::spawn().await;
    let app = gateway_for(&upstream.base_url);

    let response = app
        .oneshot(request(
            "POST",
            "/items",
            Some(4),
            Some(json!({"name": "Drill", "description": "Cordless", "available": true})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"], "4");
    assert_eq!(body["body"]["available"], true);
}

#[tokio::test]
async fn test_booking_end_before_start_is_rejected() {
    let upstream = Upstream::spawn().await;
    let app = gateway_for(&upstream.base_url);

    let response = app
        .oneshot(request(
            "POST",
            "/bookings",
            Some(2),
            Some(json!({"itemId": 1, "start": "2030-01-02T10:00:00", "end": "2030-01-01T10:00:00"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_state_is_checked_and_normalized() {
    let upstream = Upstream::spawn().await;

    let response = gateway_for(&upstream.base_url)
        .oneshot(request("GET", "/bookings?state=UNSUPPORTED_STATUS", Some(2), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "Unknown state: UNSUPPORTED_STATUS");

    let response = gateway_for(&upstream.base_url)
        .oneshot(request("GET", "/bookings/owner?state=past", Some(2), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["path"], "/bookings/owner");
    assert_eq!(body["query"], "state=PAST");
}

#[tokio::test]
async fn test_approval_flag_is_forwarded() {
    let upstream = Upstream::spawn().await;

    let response = gateway_for(&upstream.base_url)
        .oneshot(request("PATCH", "/bookings/9?approved=false", Some(1), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["method"], "PATCH");
    assert_eq!(body["path"], "/bookings/9");
    assert_eq!(body["query"], "approved=false");
}

#[tokio::test]
async fn test_upstream_status_is_relayed() {
    let upstream = Upstream::spawn().await;

    let response = gateway_for(&upstream.base_url)
        .oneshot(request("GET", "/users/404", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["detail"], "User with id 404 not found");
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // Bind then release a port so nothing listens on it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let response = gateway_for(&format!("http://{}", addr))
        .oneshot(request("GET", "/users", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Upstream error");
}
