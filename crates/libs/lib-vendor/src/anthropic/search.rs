//! # Web Search via the Messages API
//!
//! The vendor has no plain search endpoint; instead the model is given the
//! `web_search` tool and asked to answer with nothing but a JSON array of
//! `{title, url, summary}` objects. The reply is then mined with
//! [`extract_items`](crate::extract::extract_items).

use shared::{ChatTurn, Role, WebSource};
use tracing::debug;

use super::client::AnthropicClient;
use super::types::{reply_text, MessagesRequest, ToolSpec};
use crate::error::VendorError;
use crate::extract::extract_items;

/// How many sources the model is asked for per query.
pub const SOURCES_PER_REPLY: usize = 3;

/// The single user turn sent for `query`.
pub fn search_prompt(query: &str) -> String {
    format!(
        "Search for: {query}. Return only a JSON array of the top {SOURCES_PER_REPLY} most authoritative \
         sources with this format: [{{\"title\": \"...\", \"url\": \"...\", \"summary\": \"...\"}}]. \
         Only return valid JSON, no other text."
    )
}

impl AnthropicClient {
    /// Run one search query.
    ///
    /// `Ok(None)` means the vendor answered but no source list could be recovered from
    /// the reply text.
    pub async fn search_sources(
        &self,
        model: &str,
        max_tokens: u32,
        query: &str,
    ) -> Result<Option<Vec<WebSource>>, VendorError> {
        let request = MessagesRequest::new(
            model,
            max_tokens,
            vec![ChatTurn::new(Role::User, search_prompt(query))],
        )
        .with_tool(ToolSpec::web_search());

        let reply = self.messages(&request).await?;
        let text = reply_text(&reply);
        let sources = extract_items::<WebSource>(&text);

        debug!(
            query,
            reply_chars = text.len(),
            parsed = sources.as_ref().map(Vec::len),
            "[ANTHROPIC] search reply"
        );

        Ok(sources)
    }
}
