//! # Chat Endpoint

use shared::{ChatRelayRequest, ChatReply};

use super::client::ApiClient;
use crate::core::error::Result;

/// Send one chat turn (with full history) through the relay.
#[tracing::instrument(
    skip_all,
    fields(turns = request.messages.len(), pdfs = request.documents.len())
)]
pub async fn send_chat(client: &ApiClient, request: &ChatRelayRequest) -> Result<ChatReply> {
    tracing::debug!(system_chars = request.system_prompt.len(), "Sending chat");
    client.post_json("/api/chat", request, "Chat request failed").await
}
