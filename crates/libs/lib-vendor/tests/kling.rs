use lib_core::{AppError, KlingCredentials};
use lib_vendor::{KlingClient, VendorError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> KlingClient {
    KlingClient::new(
        reqwest::Client::new(),
        format!("{}/v1", server.uri()),
        KlingCredentials {
            access_key: "ak".into(),
            secret_key: "sk".into(),
        },
    )
}

#[tokio::test]
async fn create_returns_task_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/videos/text2video"))
        .and(header("X-API-Key", "ak"))
        .and(header("X-API-Secret", "sk"))
        .and(body_partial_json(json!({
            "model": "kling-v1",
            "prompt": "say hi",
            "image": "data:image/jpeg;base64,IMG"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "task_id": "task-42" })))
        .expect(1)
        .mount(&server)
        .await;

    let id = client(&server).create_task("say hi", "IMG").await.expect("created");
    assert_eq!(id, "task-42");
}

#[tokio::test]
async fn create_without_task_id_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/videos/text2video"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "message": "ok" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).create_task("p", "IMG").await.unwrap_err();
    assert!(matches!(err, VendorError::MissingTaskId));

    let relay: AppError = err.into();
    assert!(matches!(relay, AppError::VendorTransport(_)));
    assert_eq!(relay.user_message(), "No task_id returned from Kling API");
}

#[tokio::test]
async fn create_rejection_wraps_raw_vendor_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = client(&server).create_task("p", "IMG").await.unwrap_err();
    assert_eq!(err.to_string(), "Kling API error: rate limited");
}

#[tokio::test]
async fn status_read_is_repeatable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/videos/text2video/task-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "processing",
            "progress": 35
        })))
        .expect(2)
        .mount(&server)
        .await;

    let kling = client(&server);
    let first = kling.task_status("task-42").await.expect("status");
    let second = kling.task_status("task-42").await.expect("status");
    assert_eq!(first, second);
    assert_eq!(first.status, "processing");
    assert_eq!(first.progress, 35);
    assert_eq!(first.video_url, None);
}

#[tokio::test]
async fn status_rejection_uses_check_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such task"))
        .mount(&server)
        .await;

    let err = client(&server).task_status("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Kling status check error: no such task");
}
