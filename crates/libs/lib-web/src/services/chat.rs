//! # Chat Relay Service

use lib_core::{AppError, Config, Result};
use lib_vendor::anthropic::MessagesRequest;
use lib_vendor::AnthropicClient;
use serde_json::Value;
use shared::{
    ChatRelayRequest, ChatTurn, ContentBlock, Document, DocumentSource, MessageContent, Role,
};
use tracing::{debug, info};

/// Build the vendor request for a chat relay call.
///
/// System turns are dropped from the history since the grounding prompt travels in the
/// dedicated `system` field. When PDF documents are attached, the final turn is rewritten
/// into blocks: every PDF in order, then the turn's original text.
pub fn build_messages_request(
    config: &Config,
    request: ChatRelayRequest,
) -> Result<MessagesRequest> {
    let ChatRelayRequest {
        messages,
        system_prompt,
        documents,
    } = request;

    let mut turns: Vec<ChatTurn> = messages
        .into_iter()
        .filter(|turn| turn.role != Role::System)
        .collect();

    let pdfs: Vec<&Document> = documents.iter().filter(|doc| doc.is_pdf()).collect();
    if !pdfs.is_empty() {
        let last = turns.last_mut().ok_or_else(|| {
            AppError::InvalidInput("Cannot attach documents to an empty conversation".to_string())
        })?;
        attach_documents(last, &pdfs);
    }

    Ok(
        MessagesRequest::new(&config.anthropic_model, config.chat_max_tokens, turns)
            .with_system(system_prompt),
    )
}

fn attach_documents(turn: &mut ChatTurn, pdfs: &[&Document]) {
    let text = turn.content.text().unwrap_or_default().to_string();

    let mut blocks: Vec<ContentBlock> = pdfs
        .iter()
        .map(|doc| ContentBlock::Document {
            source: DocumentSource::pdf(doc.content.clone()),
        })
        .collect();
    blocks.push(ContentBlock::Text { text });

    turn.content = MessageContent::Blocks(blocks);
}

/// Forward a chat request and return the vendor payload unchanged.
pub async fn relay_chat(
    config: &Config,
    http: &reqwest::Client,
    request: ChatRelayRequest,
) -> Result<Value> {
    let api_key = config.anthropic_key()?;

    let pdf_count = request.documents.iter().filter(|doc| doc.is_pdf()).count();
    let vendor_request = build_messages_request(config, request)?;

    info!(
        turns = vendor_request.messages.len(),
        pdfs = pdf_count,
        system_chars = vendor_request.system.as_deref().map(str::len).unwrap_or(0),
        "[CHAT] Relaying conversation"
    );

    let client = AnthropicClient::new(http.clone(), &config.anthropic_api_base, api_key);
    let reply = client.messages(&vendor_request).await?;

    debug!("[CHAT] Vendor reply received");
    Ok(reply)
}
