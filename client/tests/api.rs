use client::core::error::ClientError;
use client::core::service::RelayService;
use client::services::api::ApiClient;
use shared::{ChatRelayRequest, ChatTurn, Role};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn chat_reads_first_text_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "messages": [{ "role": "user", "content": "hi" }],
            "systemPrompt": "sys",
            "documents": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "model": "m",
            "content": [{ "type": "text", "text": "hello" }, { "type": "text", "text": "ignored" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let relay = ApiClient::new(server.uri());
    let request = ChatRelayRequest {
        messages: vec![ChatTurn::new(Role::User, "hi")],
        system_prompt: "sys".into(),
        documents: vec![],
    };
    let reply = relay.send_chat(&request).await.unwrap();
    assert_eq!(reply.first_text(), Some("hello"));
}

#[tokio::test]
async fn relay_error_body_becomes_relay_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "ANTHROPIC_API_KEY not configured" })),
        )
        .mount(&server)
        .await;

    let err = ApiClient::new(server.uri()).search(&["q".to_string()]).await.unwrap_err();
    assert!(matches!(err, ClientError::Relay(ref m) if m == "ANTHROPIC_API_KEY not configured"));
}

#[tokio::test]
async fn non_json_failure_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/video"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = ApiClient::new(server.uri()).create_video("t", "IMG").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to create video task");
}

#[tokio::test]
async fn video_actions_use_the_relay_contract() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/video"))
        .and(body_json(json!({ "action": "create", "text": "t", "imageBase64": "IMG" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "taskId": "task-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/video"))
        .and(body_json(json!({ "action": "check", "taskId": "task-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "processing", "videoUrl": null, "progress": 40
        })))
        .mount(&server)
        .await;

    let relay = ApiClient::new(server.uri());
    let task_id = relay.create_video("t", "IMG").await.unwrap();
    assert_eq!(task_id, "task-1");

    let status = relay.check_video(&task_id).await.unwrap();
    assert_eq!(status.status, "processing");
    assert_eq!(status.video_url, None);
    assert_eq!(status.progress, 40);
}

#[tokio::test]
async fn search_sends_queries_and_returns_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({ "queries": ["a", "b"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sources": [{ "title": "T", "url": "https://t", "summary": "S" }]
        })))
        .mount(&server)
        .await;

    let sources = ApiClient::new(server.uri())
        .search(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].url, "https://t");
}
