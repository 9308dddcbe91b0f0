use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use client::app::{JobOutcome, PollSettings, Session, SessionSettings};
use client::core::error::{ClientError, Result};
use client::core::service::RelayService;
use shared::{
    ChatRelayRequest, ChatReply, Document, ReplyBlock, Role, VideoStatusResponse, WebSource,
};
use tokio_util::sync::CancellationToken;

/// In-memory relay double that records what the session sent.
#[derive(Default)]
struct FakeRelay {
    chat_reply: Mutex<Option<std::result::Result<ChatReply, String>>>,
    chat_requests: Mutex<Vec<ChatRelayRequest>>,
    search_batches: Mutex<Vec<Vec<WebSource>>>,
    search_queries: Mutex<Vec<Vec<String>>>,
    task_id: Option<String>,
    statuses: Mutex<Vec<VideoStatusResponse>>,
    creates: AtomicU32,
    checks: AtomicU32,
}

impl FakeRelay {
    fn replying(text: &str) -> Self {
        let relay = Self::default();
        *relay.chat_reply.lock().unwrap() = Some(Ok(text_reply(text)));
        relay
    }

    fn last_chat(&self) -> ChatRelayRequest {
        self.chat_requests.lock().unwrap().last().cloned().expect("a chat request")
    }
}

fn text_reply(text: &str) -> ChatReply {
    ChatReply {
        content: vec![ReplyBlock {
            block_type: "text".into(),
            text: Some(text.into()),
        }],
    }
}

fn source(url: &str) -> WebSource {
    WebSource {
        title: format!("Title {}", url),
        url: url.into(),
        summary: "summary".into(),
    }
}

fn status(status: &str, url: Option<&str>) -> VideoStatusResponse {
    VideoStatusResponse {
        status: status.into(),
        video_url: url.map(str::to_string),
        progress: 0,
    }
}

#[async_trait]
impl RelayService for FakeRelay {
    async fn send_chat(&self, request: &ChatRelayRequest) -> Result<ChatReply> {
        self.chat_requests.lock().unwrap().push(request.clone());
        match self.chat_reply.lock().unwrap().clone() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(msg)) => Err(ClientError::Relay(msg)),
            None => Ok(ChatReply::default()),
        }
    }

    async fn search(&self, queries: &[String]) -> Result<Vec<WebSource>> {
        self.search_queries.lock().unwrap().push(queries.to_vec());
        let mut batches = self.search_batches.lock().unwrap();
        if batches.is_empty() {
            Err(ClientError::Relay("Search failed".into()))
        } else {
            Ok(batches.remove(0))
        }
    }

    async fn create_video(&self, _text: &str, _image_base64: &str) -> Result<String> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.task_id
            .clone()
            .ok_or_else(|| ClientError::Relay("No task_id returned from Kling API".into()))
    }

    async fn check_video(&self, _task_id: &str) -> Result<VideoStatusResponse> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        Ok(if statuses.len() > 1 { statuses.remove(0) } else { statuses[0].clone() })
    }
}

fn session() -> Session {
    let mut settings = SessionSettings::new("Jane Doe");
    settings.poll = PollSettings {
        interval: Duration::from_secs(5),
        max_attempts: 60,
    };
    Session::new(settings)
}

// region: --- Documents and sources

#[test]
fn remove_document_keeps_the_others_in_order() {
    let mut session = session();
    for name in ["a.txt", "b.txt", "c.txt", "d.txt"] {
        session.add_document(Document::text(name, "x"));
    }

    let removed = session.remove_document(1).unwrap();
    assert_eq!(removed.name, "b.txt");
    let names: Vec<_> = session.documents().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["a.txt", "c.txt", "d.txt"]);

    assert!(session.remove_document(7).is_none());
    assert_eq!(session.documents().len(), 3);
}

#[tokio::test]
async fn load_document_reads_text_and_encodes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.md");
    std::fs::write(&notes, "# Positions\nSupports transit.").unwrap();
    let pdf = dir.path().join("Plan.PDF");
    std::fs::write(&pdf, b"%PDF-1.4").unwrap();
    let image = dir.path().join("photo.png");
    std::fs::write(&image, b"png").unwrap();

    let mut session = session();

    let doc = session.load_document(&notes).await.unwrap().clone();
    assert!(!doc.is_pdf());
    assert_eq!(doc.content, "# Positions\nSupports transit.");

    let doc = session.load_document(&pdf).await.unwrap().clone();
    assert!(doc.is_pdf());
    assert_eq!(doc.name, "Plan.PDF");
    assert_eq!(doc.content, "JVBERi0xLjQ=");
    assert_eq!(doc.size, 8);

    let err = session.load_document(&image).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(session.documents().len(), 2);
}

#[tokio::test]
async fn scrape_web_dedupes_across_batches() {
    let relay = FakeRelay::default();
    relay.search_batches.lock().unwrap().extend([
        vec![source("https://a"), source("https://b")],
        vec![source("https://b"), source("https://c")],
    ]);
    let mut session = session();

    assert_eq!(session.scrape_web(&relay, None).await.unwrap(), 2);
    assert_eq!(
        session.scrape_web(&relay, Some(vec!["custom".into()])).await.unwrap(),
        1
    );

    let urls: Vec<_> = session.web_sources().iter().map(|s| s.url.as_str()).collect();
    assert_eq!(urls, ["https://a", "https://b", "https://c"]);

    let queries = relay.search_queries.lock().unwrap();
    assert_eq!(queries[0], session.settings().default_queries);
    assert_eq!(queries[0][0], "Jane Doe policy positions");
    assert_eq!(queries[1], ["custom"]);
}

#[tokio::test]
async fn failed_search_leaves_sources_untouched() {
    let relay = FakeRelay::default();
    let mut session = session();
    session.add_web_sources([source("https://kept")]);

    assert!(session.scrape_web(&relay, None).await.is_err());
    assert_eq!(session.web_sources().len(), 1);
}

// endregion: --- Documents and sources

// region: --- Conversation

#[test]
fn activate_requires_material_and_sets_banner() {
    let mut session = session();
    assert!(session.activate().is_err());
    assert!(!session.is_active());

    session.add_document(Document::text("a.txt", "x"));
    session.add_web_sources([source("https://a"), source("https://b")]);
    session.activate().unwrap();

    assert!(session.is_active());
    assert_eq!(session.messages().len(), 1);
    let banner = &session.messages()[0];
    assert_eq!(banner.role, Role::System);
    assert!(banner.content.starts_with("AVATAR ACTIVATED: Jane Doe"));
    assert!(banner.content.contains("• Documents: 1\n• Web Sources: 2"));
}

fn active_session() -> Session {
    let mut session = session();
    session.add_document(Document::text("a.txt", "x"));
    session.activate().unwrap();
    session
}

#[tokio::test]
async fn send_before_activation_is_ignored() {
    let relay = FakeRelay::replying("too early");
    let mut session = session();
    session.add_document(Document::text("a.txt", "x"));

    assert!(session.send(&relay, "Who are you?").await.is_none());
    assert!(session.messages().is_empty());
    assert!(relay.chat_requests.lock().unwrap().is_empty());

    session.activate().unwrap();
    let reply = session.send(&relay, "Who are you?").await.unwrap();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "too early");
}

#[tokio::test]
async fn send_after_reset_is_ignored_until_reactivated() {
    let relay = FakeRelay::replying("x");
    let mut session = active_session();
    session.reset();

    assert!(session.send(&relay, "hello").await.is_none());
    assert!(relay.chat_requests.lock().unwrap().is_empty());
}

#[test]
fn prompt_with_no_material_is_preamble_only() {
    let prompt = session().system_prompt();
    assert!(prompt.contains("Jane Doe"));
    assert!(!prompt.contains("UPLOADED DOCUMENTS:"));
    assert!(!prompt.contains("WEB SOURCES:"));
}

#[tokio::test]
async fn send_excludes_system_turns_and_forwards_only_pdfs() {
    let relay = FakeRelay::replying("answer");
    let mut session = session();
    session.add_document(Document::text("notes.txt", "plain"));
    session.add_document(Document::pdf("plan.pdf", "UERG", 3));
    session.activate().unwrap();

    session.send(&relay, "first").await;
    session.send(&relay, "  second  ").await;

    let request = relay.last_chat();
    let turns: Vec<_> = request
        .messages
        .iter()
        .map(|t| (t.role, t.content.text().unwrap_or_default().to_string()))
        .collect();
    assert_eq!(
        turns,
        [
            (Role::User, "first".to_string()),
            (Role::Assistant, "answer".to_string()),
            (Role::User, "second".to_string()),
        ]
    );
    assert_eq!(request.documents.len(), 1);
    assert_eq!(request.documents[0].name, "plan.pdf");
    assert!(request.system_prompt.contains("--- notes.txt ---\nplain\n"));
    assert!(request.system_prompt.contains("--- plan.pdf ---\n[PDF content will be provided]\n"));
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let relay = FakeRelay::replying("x");
    let mut session = active_session();

    assert!(session.send(&relay, "   ").await.is_none());
    assert_eq!(session.messages().len(), 1);
    assert!(relay.chat_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn relay_failure_is_appended_as_error_message() {
    let relay = FakeRelay::default();
    *relay.chat_reply.lock().unwrap() = Some(Err("ANTHROPIC_API_KEY not configured".into()));
    let mut session = active_session();

    session.send(&relay, "hello").await;
    let last = session.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, "Error: ANTHROPIC_API_KEY not configured");
    assert_eq!(session.messages().len(), 3);
}

#[tokio::test]
async fn reply_without_text_gets_fixed_message() {
    let relay = FakeRelay::default();
    let mut session = active_session();

    session.send(&relay, "hello").await;
    assert_eq!(
        session.messages().last().unwrap().content,
        "Error: Unable to generate response. Please try again."
    );
}

#[tokio::test]
async fn reset_clears_messages_but_keeps_material() {
    let relay = FakeRelay::replying("x");
    let mut session = session();
    session.add_document(Document::text("a.txt", "x"));
    session.add_web_sources([source("https://a")]);
    session.activate().unwrap();
    session.send(&relay, "hi").await;

    session.reset();
    assert!(session.messages().is_empty());
    assert!(!session.is_active());
    assert_eq!(session.documents().len(), 1);
    assert_eq!(session.web_sources().len(), 1);

    session.clear_all();
    assert!(session.documents().is_empty());
    assert!(session.web_sources().is_empty());
}

// endregion: --- Conversation

// region: --- Video

async fn session_with_reply(relay: &FakeRelay) -> Session {
    let mut session = active_session();
    session.send(relay, "hi").await;
    session
}

#[test]
fn attach_video_only_targets_assistant_messages() {
    let mut session = session();
    session.add_document(Document::text("a.txt", "x"));
    session.activate().unwrap();

    assert!(session.attach_video(0, "u").is_err());
    assert!(session.attach_video(5, "u").is_err());
    assert_eq!(session.messages()[0].video_url, None);
}

#[tokio::test(start_paused = true)]
async fn completed_video_is_attached_to_its_message() {
    let mut relay = FakeRelay::replying("Here is my answer.");
    relay.task_id = Some("task-9".into());
    *relay.statuses.lock().unwrap() = vec![
        status("pending", None),
        status("processing", None),
        status("completed", Some("https://cdn/v.mp4")),
    ];
    let mut session = session_with_reply(&relay).await;
    let before: Vec<_> = session.messages().iter().map(|m| m.content.clone()).collect();

    let outcome = session
        .generate_video(&relay, 2, "IMG", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, JobOutcome::Completed { video_url: "https://cdn/v.mp4".into(), checks: 3 });
    assert_eq!(session.messages()[2].video_url.as_deref(), Some("https://cdn/v.mp4"));
    let after: Vec<_> = session.messages().iter().map(|m| m.content.clone()).collect();
    assert_eq!(before, after);
}

#[tokio::test(start_paused = true)]
async fn failed_video_leaves_conversation_untouched() {
    let mut relay = FakeRelay::replying("answer");
    relay.task_id = Some("task-9".into());
    *relay.statuses.lock().unwrap() = vec![status("pending", None), status("failed", None)];
    let mut session = session_with_reply(&relay).await;

    let outcome = session
        .generate_video(&relay, 2, "IMG", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, JobOutcome::Failed { checks: 2 });
    assert!(session.messages().iter().all(|m| m.video_url.is_none()));
}

#[tokio::test]
async fn missing_task_id_never_starts_polling() {
    let relay = FakeRelay::replying("answer");
    let mut session = session_with_reply(&relay).await;

    let err = session
        .generate_video(&relay, 2, "IMG", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No task_id returned from Kling API");
    assert_eq!(relay.creates.load(Ordering::SeqCst), 1);
    assert_eq!(relay.checks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn video_for_a_user_message_is_rejected_before_create() {
    let mut relay = FakeRelay::replying("answer");
    relay.task_id = Some("task-9".into());
    let mut session = session_with_reply(&relay).await;

    let err = session
        .generate_video(&relay, 1, "IMG", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(relay.creates.load(Ordering::SeqCst), 0);
}

// endregion: --- Video
