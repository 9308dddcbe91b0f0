//! # Session State
//!
//! All conversation state lives in one [`Session`]: the uploaded documents, the web
//! sources gathered so far, the message list and the activation flag. Relay-calling
//! operations take the relay as a parameter, so the session itself holds no
//! connection.
//!
//! ## Message invariants
//!
//! Messages are append-only. The one in-place change is attaching a `video_url` to an
//! existing assistant message once its video job completes. [`Session::reset`] is the
//! only way to clear them.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::{ChatRelayRequest, ChatTurn, Document, Role, WebSource};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::context::build_system_prompt;
use super::tasks::{poll_until_terminal, JobOutcome, PollSettings};
use crate::core::error::{ClientError, Result};
use crate::core::service::RelayService;

/// Appended when the relay answers without any usable text.
pub const EMPTY_REPLY_MESSAGE: &str = "Error: Unable to generate response. Please try again.";

// region: --- Settings

/// Per-session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Who the assistant speaks for; substituted into the grounding prompt.
    pub persona: String,
    /// Queries used by [`Session::scrape_web`] when none are given.
    pub default_queries: Vec<String>,
    pub poll: PollSettings,
}

impl SessionSettings {
    /// Settings for `persona`, with a default search batch about that persona.
    pub fn new(persona: impl Into<String>) -> Self {
        let persona = persona.into();
        let default_queries = [
            "policy positions",
            "official statements",
            "recent public posts",
            "interview transcripts",
        ]
        .iter()
        .map(|topic| format!("{} {}", persona, topic))
        .collect();

        Self {
            persona,
            default_queries,
            poll: PollSettings::default(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::new("the candidate")
    }
}

// endregion: --- Settings

// region: --- Messages

/// One entry of the visible conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    pub video_url: Option<String>,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            video_url: None,
        }
    }
}

// endregion: --- Messages

// region: --- Session

/// Documents, web sources and conversation for one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    settings: SessionSettings,
    documents: Vec<Document>,
    web_sources: Vec<WebSource>,
    messages: Vec<ConversationMessage>,
    active: bool,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn web_sources(&self) -> &[WebSource] {
        &self.web_sources
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // region: --- Documents

    pub fn add_document(&mut self, document: Document) {
        info!(name = %document.name, kind = ?document.kind, size = document.size, "Document added");
        self.documents.push(document);
    }

    /// Read a file from disk and add it as a document.
    ///
    /// `.pdf` files are stored base64 encoded; `.txt` and `.md` files as text. Anything
    /// else is rejected without touching the session.
    pub async fn load_document(&mut self, path: &Path) -> Result<&Document> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ClientError::Validation(format!("Not a file: {}", path.display())))?;
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        let document = match extension.as_str() {
            "pdf" => {
                let bytes = tokio::fs::read(path).await?;
                Document::pdf(name, STANDARD.encode(&bytes), bytes.len() as u64)
            }
            "txt" | "md" => {
                let bytes = tokio::fs::read(path).await?;
                let text = String::from_utf8(bytes).map_err(|_| {
                    ClientError::Validation(format!("{} is not valid UTF-8 text", name))
                })?;
                Document::text(name, text)
            }
            _ => {
                return Err(ClientError::Validation(format!(
                    "Unsupported file type: {} (expected .pdf, .txt or .md)",
                    name
                )))
            }
        };

        self.add_document(document);
        let added = self.documents.len() - 1;
        Ok(&self.documents[added])
    }

    /// Remove the document at `index`; other documents keep their order.
    pub fn remove_document(&mut self, index: usize) -> Option<Document> {
        (index < self.documents.len()).then(|| self.documents.remove(index))
    }

    // endregion: --- Documents

    // region: --- Web sources

    /// Append sources whose url is not already present. Returns how many were added.
    pub fn add_web_sources<I>(&mut self, sources: I) -> usize
    where
        I: IntoIterator<Item = WebSource>,
    {
        let before = self.web_sources.len();
        for source in sources {
            if !self.web_sources.iter().any(|known| known.url == source.url) {
                self.web_sources.push(source);
            }
        }
        self.web_sources.len() - before
    }

    /// Remove the web source at `index`; other sources keep their order.
    pub fn remove_web_source(&mut self, index: usize) -> Option<WebSource> {
        (index < self.web_sources.len()).then(|| self.web_sources.remove(index))
    }

    /// Run a search batch through the relay and merge the results.
    ///
    /// `None` uses [`SessionSettings::default_queries`]. Returns the number of new sources.
    pub async fn scrape_web(
        &mut self,
        relay: &dyn RelayService,
        queries: Option<Vec<String>>,
    ) -> Result<usize> {
        let queries = queries.unwrap_or_else(|| self.settings.default_queries.clone());
        let sources = relay.search(&queries).await?;
        let received = sources.len();
        let added = self.add_web_sources(sources);

        info!(queries = queries.len(), received, added, "Web sources merged");
        Ok(added)
    }

    // endregion: --- Web sources

    // region: --- Conversation

    /// Start the conversation. Needs at least one document or web source.
    pub fn activate(&mut self) -> Result<()> {
        if self.documents.is_empty() && self.web_sources.is_empty() {
            return Err(ClientError::Validation(
                "Add at least one document or web source before activating".to_string(),
            ));
        }

        let banner = format!(
            "AVATAR ACTIVATED: {}\n\nData Sources:\n• Documents: {}\n• Web Sources: {}\n\n\
             This AI avatar responds based solely on documented public information. \
             All statements are sourced from uploaded documents and verified web sources.",
            self.settings.persona,
            self.documents.len(),
            self.web_sources.len()
        );

        self.messages = vec![ConversationMessage::new(Role::System, banner)];
        self.active = true;
        Ok(())
    }

    /// Grounding prompt for the current documents and sources.
    pub fn system_prompt(&self) -> String {
        build_system_prompt(&self.settings.persona, &self.documents, &self.web_sources)
    }

    /// Request body for the chat relay: non-system history (ending with the latest
    /// user turn), the grounding prompt, and the PDF documents.
    pub fn chat_request(&self) -> ChatRelayRequest {
        ChatRelayRequest {
            messages: self
                .messages
                .iter()
                .filter(|msg| msg.role != Role::System)
                .map(|msg| ChatTurn::new(msg.role, msg.content.as_str()))
                .collect(),
            system_prompt: self.system_prompt(),
            documents: self.documents.iter().filter(|doc| doc.is_pdf()).cloned().collect(),
        }
    }

    /// Send a user message and append the reply.
    ///
    /// Blank input, or any input before [`activate`](Self::activate), is ignored and
    /// returns `None`. Otherwise the returned message is the appended assistant entry,
    /// which carries `Error: <message>` when the relay call failed.
    pub async fn send(
        &mut self,
        relay: &dyn RelayService,
        text: &str,
    ) -> Option<&ConversationMessage> {
        let text = text.trim();
        if text.is_empty() || !self.active {
            return None;
        }

        self.messages.push(ConversationMessage::new(Role::User, text));

        let reply = match relay.send_chat(&self.chat_request()).await {
            Ok(reply) => match reply.first_text() {
                Some(answer) if !answer.is_empty() => answer.to_string(),
                _ => {
                    warn!("[CHAT] Relay reply had no text block");
                    EMPTY_REPLY_MESSAGE.to_string()
                }
            },
            Err(e) => {
                warn!(error = %e, "[CHAT] Chat relay call failed");
                format!("Error: {}", e)
            }
        };

        self.messages.push(ConversationMessage::new(Role::Assistant, reply));
        self.messages.last()
    }

    fn assistant_text(&self, index: usize) -> Result<&str> {
        match self.messages.get(index) {
            Some(msg) if msg.role == Role::Assistant => Ok(&msg.content),
            Some(_) => Err(ClientError::Validation(format!(
                "Message {} is not an assistant reply",
                index
            ))),
            None => Err(ClientError::Validation(format!("No message at index {}", index))),
        }
    }

    /// Back-fill the video url of the assistant message at `index`.
    pub fn attach_video(&mut self, index: usize, video_url: impl Into<String>) -> Result<()> {
        self.assistant_text(index)?;
        self.messages[index].video_url = Some(video_url.into());
        Ok(())
    }

    /// Create a video for the assistant message at `index`, poll it to completion and
    /// attach the url on success.
    ///
    /// Outcomes other than success leave the conversation untouched. A failed create or
    /// status read is returned as `Err`; no polling happens after a failed create.
    pub async fn generate_video(
        &mut self,
        relay: &dyn RelayService,
        index: usize,
        image_base64: &str,
        cancel: &CancellationToken,
    ) -> Result<JobOutcome> {
        let text = self.assistant_text(index)?.to_string();

        let task_id = relay.create_video(&text, image_base64).await?;
        info!(task_id = %task_id, message = index, "[VIDEO] Task created");

        let outcome = poll_until_terminal(relay, &task_id, &self.settings.poll, cancel).await?;
        if let JobOutcome::Completed { video_url, .. } = &outcome {
            self.attach_video(index, video_url.clone())?;
        }
        Ok(outcome)
    }

    /// Clear the conversation and deactivate. Documents and sources are kept.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.active = false;
    }

    /// [`reset`](Self::reset), then drop all documents and sources too.
    pub fn clear_all(&mut self) {
        self.reset();
        self.documents.clear();
        self.web_sources.clear();
    }

    // endregion: --- Conversation
}

// endregion: --- Session
