//! # Chat Data Transfer Objects
//!
//! Conversation turns sent to the chat relay and the reply shape read back by the client.

use serde::{Deserialize, Serialize};

use super::sources::Document;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Base64 payload attached to a [`ContentBlock::Document`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub media_type: String,
    pub data: String,
}

impl DocumentSource {
    pub fn pdf(data: impl Into<String>) -> Self {
        Self {
            source_type: "base64".to_string(),
            media_type: "application/pdf".to_string(),
            data: data.into(),
        }
    }
}

/// One part of a multi-part turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Document { source: DocumentSource },
}

/// Turn content: plain text, or an ordered list of blocks once attachments are inlined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    /// The plain text of this content; for block content, the first text block.
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Blocks(blocks) => blocks.iter().find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            }),
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

/// A single turn of conversation history as sent to the chat relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRelayRequest {
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub system_prompt: String,
    /// PDF attachments; other document kinds are ignored by the relay.
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Content block of a vendor reply. Only text blocks carry `text`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// The part of the relayed vendor payload the client reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    #[serde(default)]
    pub content: Vec<ReplyBlock>,
}

impl ChatReply {
    /// Text of the first content block, if the first block is text.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(|block| block.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_system_prompt() {
        let request = ChatRelayRequest {
            messages: vec![ChatTurn::new(Role::User, "hi")],
            system_prompt: "be brief".to_string(),
            documents: Vec::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["systemPrompt"], "be brief");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn block_content_round_trips_through_untagged_enum() {
        let raw = r#"{"role":"user","content":[
            {"type":"document","source":{"type":"base64","media_type":"application/pdf","data":"AAAA"}},
            {"type":"text","text":"summarize"}
        ]}"#;
        let turn: ChatTurn = serde_json::from_str(raw).unwrap();
        assert_eq!(turn.content.text(), Some("summarize"));
        match turn.content {
            MessageContent::Blocks(blocks) => {
                assert_eq!(blocks.len(), 2);
                assert_eq!(
                    blocks[0],
                    ContentBlock::Document {
                        source: DocumentSource::pdf("AAAA")
                    }
                );
            }
            MessageContent::Text(_) => panic!("expected blocks"),
        }
    }

    #[test]
    fn reply_first_text_ignores_non_text_first_block() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"content":[{"type":"tool_use"},{"type":"text","text":"later"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.first_text(), None);

        let body = r#"{"id":"msg_1","content":[{"type":"text","text":"hello"}]}"#;
        let reply: ChatReply = serde_json::from_str(body).unwrap();
        assert_eq!(reply.first_text(), Some("hello"));
    }
}
