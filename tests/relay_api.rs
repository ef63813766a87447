use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use ollama_chat::llm::ollama::OllamaClient;
use ollama_chat::server::api::router;

async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    addr
}

fn relay_for(addr: SocketAddr) -> Router {
    let client = Arc::new(OllamaClient::new(Some(format!("http://{}", addr)), None));
    router(client)
}

async fn post_chat(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn relay_extracts_assistant_content() {
    let upstream = Router::new().route(
        "/api/chat",
        post(|| async { Json(json!({"message": {"role": "assistant", "content": "Hi"}})) }),
    );
    let addr = spawn_upstream(upstream).await;

    let body = json!({"messages": [{"role": "user", "content": "hello"}]});
    let (status, value) = post_chat(relay_for(addr), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"content": "Hi"}));
}

#[tokio::test]
async fn upstream_error_is_normalized() {
    let upstream = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model not loaded") }),
    );
    let addr = spawn_upstream(upstream).await;

    let body = json!({"messages": [{"role": "user", "content": "hello"}]});
    let (status, value) = post_chat(relay_for(addr), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({"error": "Ollama API error"}));
}

#[tokio::test]
async fn unreachable_upstream_is_internal_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let body = json!({"messages": [{"role": "user", "content": "hello"}]});
    let (status, value) = post_chat(relay_for(addr), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn malformed_body_is_internal_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, value) = post_chat(relay_for(addr), "not json".to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn forwarded_request_strips_view_fields() {
    let captured: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let upstream = Router::new().route(
        "/api/chat",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                Json(json!({"message": {"role": "assistant", "content": "ok"}}))
            }
        }),
    );
    let addr = spawn_upstream(upstream).await;

    let body = json!({"messages": [
        {"id": "3f2b6e1c-0000-0000-0000-000000000000", "role": "user", "content": "hello"}
    ]});
    let (status, _) = post_chat(relay_for(addr), body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let forwarded = captured.lock().unwrap().take().unwrap();
    assert_eq!(forwarded["model"], "tinyllama:latest");
    assert_eq!(forwarded["stream"], json!(false));
    assert_eq!(
        forwarded["messages"],
        json!([{"role": "user", "content": "hello"}])
    );
}

#[tokio::test]
async fn health_endpoint() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = relay_for(addr).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({"status": "healthy"}));
}
