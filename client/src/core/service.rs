//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use async_trait::async_trait;
use shared::{ChatRelayRequest, ChatReply, VideoStatusResponse, WebSource};

use super::error::Result;

/// The three relays as seen from the client.
///
/// Implemented over HTTP by [`ApiClient`](crate::services::api::ApiClient); tests use
/// in-memory doubles.
#[async_trait]
pub trait RelayService: Send + Sync {
    /// Send conversation history, grounding prompt and PDFs to the chat relay.
    async fn send_chat(&self, request: &ChatRelayRequest) -> Result<ChatReply>;

    /// Run a search batch; returns the merged source list.
    async fn search(&self, queries: &[String]) -> Result<Vec<WebSource>>;

    /// Submit a video task and return its id.
    async fn create_video(&self, text: &str, image_base64: &str) -> Result<String>;

    /// Read a video task's current state.
    async fn check_video(&self, task_id: &str) -> Result<VideoStatusResponse>;
}
